//! # Analyzer Plugins
//!
//! Every analyzer — whether it wraps an external tool through the
//! [`crate::registry`] + [`crate::runner`] pair or re-implements a linter
//! natively in Rust (`hadolint`, `helmlint`, `kubelint`) — conforms to the
//! [`Analyzer`] contract. The [`crate::pipeline`] orchestrator is the only
//! caller of `run`; it resolves `depends_on` into a topological schedule and
//! hands each analyzer an [`AnalysisContext`] carrying its artifact, any
//! resolved extension hints, and the findings of analyzers it depends on.

pub mod action_versions;
pub mod best_practices;
pub mod display;
pub mod docker_lint;
pub mod hadolint;
pub mod helm_lint;
pub mod helmlint;
pub mod jenkins_lint;
pub mod k8s_dryrun;
pub mod k8s_schema;
pub mod kubelint;
pub mod make_lint;
pub mod secret_scan;
pub mod shell_lint;
pub mod tf_lint;
pub mod tf_security;
pub mod workflow_run;
pub mod yaml_lint;
pub mod yaml_schema;

use std::collections::HashMap;

use crate::classify::Artifact;
use crate::config::types::Config;
use crate::doc_lookup::{DocLookup, SchemaFragment};
use crate::extension::ExtensionHint;
use crate::finding::Finding;
use crate::registry::ToolRegistry;

/// Everything an analyzer needs to inspect one artifact and emit Findings.
/// Built fresh per-artifact by the orchestrator; shared across the
/// analyzers scheduled for that artifact.
pub struct AnalysisContext<'a> {
    pub artifact: &'a Artifact,
    /// Extension hints discovered in this artifact, each paired with its
    /// resolved schema fragment if the doc side-channel found one.
    pub hints: &'a [(ExtensionHint, Option<SchemaFragment>)],
    pub registry: &'a ToolRegistry,
    pub doc_lookup: &'a DocLookup,
    pub config: &'a Config,
    /// Findings already produced by this artifact's other analyzers, keyed
    /// by analyzer name. Only ever contains entries for names listed in the
    /// calling analyzer's `depends_on()`.
    pub deps: &'a HashMap<String, Vec<Finding>>,
}

impl<'a> AnalysisContext<'a> {
    pub fn dep_findings(&self, analyzer_name: &str) -> &[Finding] {
        self.deps
            .get(analyzer_name)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

/// Uniform contract every built-in analyzer implements. See §4.5 of the
/// validation pipeline design: analyzers are a flat registry of small
/// capability objects, dispatched by `applies_to` + `depends_on`, never a
/// class hierarchy.
pub trait Analyzer: Send + Sync {
    /// Stable name used in config (`analyzers_enabled`), CLI scoping flags,
    /// and as the `Finding.analyzer` field.
    fn name(&self) -> &'static str;

    fn applies_to(&self, kind: crate::classify::ArtifactKind) -> bool;

    /// External tool names this analyzer resolves through the registry.
    /// Empty for purely-internal analyzers.
    fn required_tools(&self) -> &'static [&'static str] {
        &[]
    }

    /// Names of other analyzers that must complete first, for this
    /// artifact, before this one runs.
    fn depends_on(&self) -> &'static [&'static str] {
        &[]
    }

    fn run(&self, ctx: &AnalysisContext) -> Vec<Finding>;
}

/// The full built-in analyzer roster, in registration order. The
/// orchestrator never discovers analyzers dynamically — this static list is
/// the one place instantiation happens (§4.5, "no dynamic code loading").
pub fn all_analyzers() -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(yaml_lint::YamlLintAnalyzer),
        Box::new(yaml_schema::YamlSchemaAnalyzer),
        Box::new(shell_lint::ShellLintAnalyzer),
        Box::new(docker_lint::DockerLintAnalyzer),
        Box::new(tf_lint::TfLintAnalyzer),
        Box::new(tf_security::TfSecurityAnalyzer),
        Box::new(helm_lint::HelmLintAnalyzer),
        Box::new(k8s_schema::K8sSchemaAnalyzer),
        Box::new(k8s_dryrun::K8sDryRunAnalyzer),
        Box::new(make_lint::MakeLintAnalyzer),
        Box::new(jenkins_lint::JenkinsLintAnalyzer),
        Box::new(workflow_run::WorkflowLocalRunAnalyzer),
        Box::new(action_versions::ActionVersionsAnalyzer),
        Box::new(secret_scan::SecretScanAnalyzer),
        Box::new(best_practices::CoreBestPracticesAnalyzer),
    ]
}

/// Look up an analyzer by name. Used by the orchestrator to resolve
/// `depends_on` edges and by the CLI to validate `--config`'s
/// `analyzers_enabled` list.
pub fn find(name: &str) -> Option<Box<dyn Analyzer>> {
    all_analyzers().into_iter().find(|a| a.name() == name)
}

/// Resolve a required external tool, or produce the Finding the §4 config
/// table calls for when it's missing: an `info` `CORE-TOOL-SKIPPED` when
/// `skip_if_tool_missing` is set (the default), a `warning`
/// `CORE-TOOL-MISSING` otherwise.
pub fn resolve_or_skip(
    ctx: &AnalysisContext,
    analyzer_name: &str,
    tool: &str,
) -> Result<crate::registry::ToolHandle, Finding> {
    ctx.registry.resolve(tool).map_err(|_| {
        let skip = ctx.config.skip_if_tool_missing;
        Finding {
            id: if skip { "CORE-TOOL-SKIPPED" } else { "CORE-TOOL-MISSING" }.to_string(),
            severity: if skip { crate::finding::Severity::Info } else { crate::finding::Severity::Warning },
            message: format!("tool '{tool}' is not available; {analyzer_name} skipped"),
            location: crate::finding::Location::new(&ctx.artifact.path),
            analyzer: analyzer_name.to_string(),
            tool: Some(tool.to_string()),
            suggestion: Some(format!("install {tool} or set TOOL_{}_PATH", tool.to_uppercase().replace('-', "_"))),
            references: vec![],
        }
    })
}

/// Build the Finding for a tool invocation whose captured stdout or stderr
/// hit the runner's buffer cap. `None` when neither stream was truncated.
pub fn truncation_finding(
    ctx: &AnalysisContext,
    analyzer_name: &str,
    tool: &str,
    result: &crate::runner::ProcessResult,
) -> Option<Finding> {
    if !result.stdout_truncated && !result.stderr_truncated {
        return None;
    }
    Some(Finding {
        id: "CORE-TOOL-OUTPUT-TRUNCATED".to_string(),
        severity: crate::finding::Severity::Warning,
        message: format!("'{tool}' produced more output than the capture buffer holds; output was truncated"),
        location: crate::finding::Location::new(&ctx.artifact.path),
        analyzer: analyzer_name.to_string(),
        tool: Some(tool.to_string()),
        suggestion: None,
        references: vec![],
    })
}

/// Build the Finding for a tool invocation that hit its deadline. Analyzers
/// call this when `ProcessResult.timed_out` is set rather than trying to
/// interpret partial output.
pub fn timeout_finding(ctx: &AnalysisContext, analyzer_name: &str, tool: &str) -> Finding {
    Finding {
        id: "CORE-TOOL-TIMEOUT".to_string(),
        severity: crate::finding::Severity::Warning,
        message: format!("'{tool}' did not complete within the configured timeout"),
        location: crate::finding::Location::new(&ctx.artifact.path),
        analyzer: analyzer_name.to_string(),
        tool: Some(tool.to_string()),
        suggestion: None,
        references: vec![],
    }
}
