//! # Pipeline Orchestrator
//!
//! Ties the classifier, extension detector, doc side-channel, tool registry,
//! and analyzer roster into a single run. The algorithm:
//!
//! 1. Walk and classify the project tree (`classify::classify_tree`); a file
//!    that matched an expected location but failed to parse contributes a
//!    `fatal` Finding directly, no analyzer involved.
//! 2. For each artifact, detect extension hints (`extension::detect`).
//! 3. Resolve every hint through the doc side-channel
//!    (`doc_lookup::DocLookup::resolve`), each miss contributing an `info`
//!    Finding of its own.
//! 4. For each artifact, select the analyzers whose `applies_to` matches its
//!    kind and whose name is in `config.analyzers_enabled`, then schedule them
//!    in dependency order (`depends_on`) so a dependency's Findings are
//!    visible to the analyzer that asked for them.
//! 5. Artifacts run concurrently, bounded by `config.parallelism`.
//! 6. Merge every analyzer's output through `finding::dedup_and_sort`.
//! 7. Hand the merged stream, plus the tool registry's audit log, back to the
//!    caller as a [`Run`] for reporting and exit-code arbitration.
//!
//! A cycle in the static analyzer registry's `depends_on` graph is a
//! programming error, not a per-artifact condition: it is detected once up
//! front and turned into a single `fatal` `CORE-ANALYZER-CYCLE` Finding that
//! short-circuits the rest of the run.
//!
//! An analyzer that panics is contained at the call site
//! (`run_analyzer_contained`) and degrades to a `warning`
//! `CORE-ANALYZER-BUG-<name>` Finding rather than aborting its artifact.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::analyzer::{self, AnalysisContext, Analyzer};
use crate::classify::{self, Artifact};
use crate::config::types::Config;
use crate::doc_lookup::{BundledDocSource, DocLookup, SchemaFragment};
use crate::extension::{self, ExtensionHint};
use crate::finding::{dedup_and_sort, Finding, Location, Severity};
use crate::registry::{ToolAuditEntry, ToolRegistry, ToolRegistryConfig};

/// A cooperative cancellation flag, checked between artifacts rather than
/// mid-analyzer: an analyzer already running an external tool is allowed to
/// finish rather than being killed partway through.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The outcome of one full validation run.
pub struct Run {
    pub findings: Vec<Finding>,
    pub tool_audit: Vec<ToolAuditEntry>,
    /// `true` if the run was cut short by a cancellation request; at least
    /// one artifact's analyzers did not run, and the caller should exit 130.
    pub cancelled: bool,
    /// Every artifact the classifier placed into a known kind, independent of
    /// whether it produced any Findings. Surfaced by the reporter's
    /// `"artifacts"` section.
    pub artifacts: Vec<ArtifactMeta>,
}

/// The small slice of [`crate::classify::Artifact`] the reporter needs once
/// the run is over: just enough to list what was inspected, without keeping
/// the artifact's cached file contents alive past the run.
pub struct ArtifactMeta {
    pub path: std::path::PathBuf,
    pub kind: crate::classify::ArtifactKind,
}

/// Run the full pipeline over `root`. Never returns `Err`: a condition that
/// would otherwise abort the run (a parse failure, a missing tool, a cycle in
/// the analyzer graph) is instead represented as a Finding in the merged
/// stream, so the exit-code arbiter is the single place that turns Findings
/// into a process exit status.
pub fn run(root: &Path, config: &Config, cancellation: &CancellationToken) -> Run {
    let classification = classify::classify_tree(root);
    let mut findings = classification.fatal_findings;
    let artifact_meta: Vec<ArtifactMeta> = classification
        .artifacts
        .iter()
        .map(|a| ArtifactMeta { path: a.path.clone(), kind: a.kind })
        .collect();

    if let Some(cycle) = detect_registry_cycle(root) {
        findings.push(cycle);
        return Run {
            findings: dedup_and_sort(findings),
            tool_audit: Vec::new(),
            cancelled: false,
            artifacts: artifact_meta,
        };
    }

    let registry = ToolRegistry::new(ToolRegistryConfig {
        reuse_cache: config.venv_cache,
        ..ToolRegistryConfig::default()
    });
    let doc_lookup = DocLookup::new(Box::new(BundledDocSource::default()), config.doc_lookup_enabled);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.parallelism.max(1))
        .build()
        .expect("failed to build the analyzer thread pool");

    let per_artifact: Vec<(Vec<Finding>, bool)> = pool.install(|| {
        classification
            .artifacts
            .par_iter()
            .map(|artifact| {
                if cancellation.is_cancelled() {
                    return (Vec::new(), true);
                }
                (run_artifact(artifact, config, &registry, &doc_lookup), false)
            })
            .collect()
    });

    let cancelled = per_artifact.iter().any(|(_, skipped)| *skipped);
    findings.extend(per_artifact.into_iter().flat_map(|(f, _)| f));

    Run {
        findings: dedup_and_sort(findings),
        tool_audit: registry.audit_log().entries(),
        cancelled,
        artifacts: artifact_meta,
    }
}

/// Run every enabled, applicable analyzer for a single artifact, in
/// dependency order.
fn run_artifact(
    artifact: &Artifact,
    config: &Config,
    registry: &ToolRegistry,
    doc_lookup: &DocLookup,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    let hints: Vec<(ExtensionHint, Option<SchemaFragment>)> = extension::detect(artifact)
        .into_iter()
        .map(|hint| {
            let (fragment, info) = doc_lookup.resolve(&hint, &artifact.path);
            if let Some(info) = info {
                findings.push(info);
            }
            (hint, fragment)
        })
        .collect();

    let applicable: Vec<Box<dyn Analyzer>> = analyzer::all_analyzers()
        .into_iter()
        .filter(|a| {
            config.analyzers_enabled.iter().any(|n| n == a.name()) && a.applies_to(artifact.kind)
        })
        .collect();

    let Some(levels) = topo_levels(&applicable) else {
        // Unreachable given the static registry passes `detect_registry_cycle`
        // at startup, but a per-artifact subset could in principle still
        // disagree if `depends_on` named an analyzer that doesn't apply to
        // this artifact's kind; fail safe rather than panic.
        findings.push(Finding {
            id: "CORE-ANALYZER-CYCLE".to_string(),
            severity: Severity::Fatal,
            message: format!(
                "cyclic analyzer dependency detected while scheduling {}",
                artifact.path.display()
            ),
            location: Location::new(&artifact.path),
            analyzer: "orchestrator".to_string(),
            tool: None,
            suggestion: None,
            references: vec![],
        });
        return findings;
    };

    let mut deps: std::collections::HashMap<String, Vec<Finding>> = std::collections::HashMap::new();

    for level in levels {
        for idx in level {
            let a = &applicable[idx];
            let ctx = AnalysisContext {
                artifact,
                hints: &hints,
                registry,
                doc_lookup,
                config,
                deps: &deps,
            };
            let result = run_analyzer_contained(a.as_ref(), &ctx);
            findings.extend(result.iter().cloned());
            deps.insert(a.name().to_string(), result);
        }
    }

    findings
}

/// Run one analyzer, turning an unwinding panic into a `warning` Finding
/// instead of letting it tear down the whole artifact (or the process, since
/// each artifact runs on a rayon worker thread). A misbehaving analyzer
/// degrades the run; it does not fail it.
fn run_analyzer_contained(a: &dyn Analyzer, ctx: &AnalysisContext) -> Vec<Finding> {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| a.run(ctx))) {
        Ok(findings) => findings,
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "analyzer panicked with a non-string payload".to_string());
            vec![Finding {
                id: format!("CORE-ANALYZER-BUG-{}", a.name()),
                severity: Severity::Warning,
                message: format!("analyzer '{}' panicked: {detail}", a.name()),
                location: Location::new(&ctx.artifact.path),
                analyzer: a.name().to_string(),
                tool: None,
                suggestion: None,
                references: vec![],
            }]
        }
    }
}

/// Static, one-time check of the full built-in registry's `depends_on` graph,
/// independent of any artifact. A well-formed registry always passes this; it
/// exists to catch a future analyzer addition that introduces a cycle, per
/// the documented boundary behavior (exit 2, `CORE-ANALYZER-CYCLE`).
fn detect_registry_cycle(root: &Path) -> Option<Finding> {
    let analyzers = analyzer::all_analyzers();
    if topo_levels(&analyzers).is_some() {
        return None;
    }
    Some(Finding {
        id: "CORE-ANALYZER-CYCLE".to_string(),
        severity: Severity::Fatal,
        message: "cyclic dependency detected in the analyzer registry".to_string(),
        location: Location::new(root),
        analyzer: "orchestrator".to_string(),
        tool: None,
        suggestion: None,
        references: vec![],
    })
}

/// Kahn's algorithm over `depends_on` edges restricted to the analyzers
/// actually present in `analyzers` (a dependency naming an analyzer outside
/// this slice is simply not an edge - it either doesn't apply to this
/// artifact's kind or isn't enabled). Returns `None` on a cycle, otherwise the
/// indices into `analyzers` grouped into levels that can run in order.
fn topo_levels(analyzers: &[Box<dyn Analyzer>]) -> Option<Vec<Vec<usize>>> {
    let names: Vec<&str> = analyzers.iter().map(|a| a.name()).collect();
    let mut in_degree = vec![0usize; analyzers.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); analyzers.len()];

    for (i, a) in analyzers.iter().enumerate() {
        for dep in a.depends_on() {
            if let Some(j) = names.iter().position(|n| n == dep) {
                in_degree[i] += 1;
                dependents[j].push(i);
            }
        }
    }

    let mut levels = Vec::new();
    let mut done = vec![false; analyzers.len()];
    let mut processed = 0;

    while processed < analyzers.len() {
        let level: Vec<usize> = (0..analyzers.len())
            .filter(|&i| !done[i] && in_degree[i] == 0)
            .collect();
        if level.is_empty() {
            return None;
        }
        for &i in &level {
            done[i] = true;
        }
        for &i in &level {
            for &d in &dependents[i] {
                in_degree[d] -= 1;
            }
        }
        processed += level.len();
        levels.push(level);
    }

    Some(levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ArtifactKind;

    struct Fake {
        name: &'static str,
        deps: &'static [&'static str],
    }

    impl Analyzer for Fake {
        fn name(&self) -> &'static str {
            self.name
        }
        fn applies_to(&self, _kind: ArtifactKind) -> bool {
            true
        }
        fn depends_on(&self) -> &'static [&'static str] {
            self.deps
        }
        fn run(&self, _ctx: &AnalysisContext) -> Vec<Finding> {
            vec![]
        }
    }

    #[test]
    fn topo_levels_orders_dependencies_before_dependents() {
        let analyzers: Vec<Box<dyn Analyzer>> = vec![
            Box::new(Fake { name: "tf-security", deps: &["tf-lint"] }),
            Box::new(Fake { name: "tf-lint", deps: &[] }),
        ];
        let levels = topo_levels(&analyzers).expect("no cycle");
        // tf-lint (index 1) must be scheduled before tf-security (index 0).
        let position = |idx: usize| levels.iter().position(|level| level.contains(&idx)).unwrap();
        assert!(position(1) < position(0));
    }

    #[test]
    fn topo_levels_detects_a_cycle() {
        let analyzers: Vec<Box<dyn Analyzer>> = vec![
            Box::new(Fake { name: "a", deps: &["b"] }),
            Box::new(Fake { name: "b", deps: &["a"] }),
        ];
        assert!(topo_levels(&analyzers).is_none());
    }

    #[test]
    fn the_built_in_registry_has_no_cycles() {
        let analyzers = analyzer::all_analyzers();
        assert!(topo_levels(&analyzers).is_some());
    }
}
