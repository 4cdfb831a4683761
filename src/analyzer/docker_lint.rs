//! `docker-lint`: Dockerfile linting via the bundled [`super::hadolint`] port.
//!
//! Runs entirely in-process — no external hadolint binary is invoked — so this
//! analyzer declares no `required_tools` and every Finding carries `tool: None`.

use std::collections::HashSet;

use crate::analyzer::hadolint::{self, HadolintConfig};
use crate::analyzer::{AnalysisContext, Analyzer};
use crate::classify::ArtifactKind;
use crate::finding::{Finding, Location, Severity};

pub struct DockerLintAnalyzer;

impl Analyzer for DockerLintAnalyzer {
    fn name(&self) -> &'static str {
        "docker-lint"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::Dockerfile
    }

    fn run(&self, ctx: &AnalysisContext) -> Vec<Finding> {
        let Ok(content) = ctx.artifact.contents() else {
            return Vec::new();
        };

        let mut config = HadolintConfig::default();
        config.failure_threshold = hadolint::Severity::Ignore;

        let mut result = hadolint::lint(content, &config);
        result.sort();

        let mut findings: Vec<Finding> = result
            .failures
            .into_iter()
            .map(|failure| Finding {
                id: format!("HADOLINT-{}", failure.code.as_str()),
                severity: adapt_severity(failure.severity),
                message: failure.message,
                location: Location::at(&ctx.artifact.path, failure.line, failure.column.unwrap_or(0)),
                analyzer: "docker-lint".to_string(),
                tool: None,
                suggestion: None,
                references: vec![format!(
                    "https://github.com/hadolint/hadolint/wiki/{}",
                    failure.code.as_str()
                )],
            })
            .collect();

        findings.extend(result.parse_errors.into_iter().map(|message| Finding {
            id: "DOCKER-PARSE-ERROR".to_string(),
            severity: Severity::Error,
            message,
            location: Location::new(&ctx.artifact.path),
            analyzer: "docker-lint".to_string(),
            tool: None,
            suggestion: None,
            references: vec![],
        }));

        let seen: HashSet<_> = findings.iter().map(|f| f.id.clone()).collect();
        let _ = seen; // dedup happens centrally in `finding::dedup_and_sort`
        findings
    }
}

/// Map hadolint's 5-level ladder (`Error > Warning > Info > Style > Ignore`)
/// onto the engine's 4-level one. `Style` and `Ignore` both collapse to
/// `Info`: they're below the default failure threshold either way, but a
/// suppressed finding should still be visible in `--verbose` output rather
/// than silently vanishing.
fn adapt_severity(severity: hadolint::Severity) -> Severity {
    match severity {
        hadolint::Severity::Error => Severity::Error,
        hadolint::Severity::Warning => Severity::Warning,
        hadolint::Severity::Info | hadolint::Severity::Style | hadolint::Severity::Ignore => Severity::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Config;
    use crate::doc_lookup::DocLookup;
    use crate::registry::{ToolRegistry, ToolRegistryConfig};
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn ctx_for<'a>(
        artifact: &'a crate::classify::Artifact,
        registry: &'a ToolRegistry,
        doc_lookup: &'a DocLookup,
        config: &'a Config,
        deps: &'a HashMap<String, Vec<Finding>>,
    ) -> AnalysisContext<'a> {
        AnalysisContext {
            artifact,
            hints: &[],
            registry,
            doc_lookup,
            config,
            deps,
        }
    }

    #[test]
    fn flags_latest_tag() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Dockerfile");
        std::fs::write(&path, "FROM ubuntu:latest\nCMD [\"true\"]\n").unwrap();
        let artifact = crate::classify::Artifact::for_test(path, ArtifactKind::Dockerfile);

        let registry = ToolRegistry::new(ToolRegistryConfig::default());
        let doc_lookup = DocLookup::new(Box::new(crate::doc_lookup::BundledDocSource::default()), false);
        let config = Config::default();
        let deps = HashMap::new();
        let ctx = ctx_for(&artifact, &registry, &doc_lookup, &config, &deps);

        let findings = DockerLintAnalyzer.run(&ctx);
        assert!(findings.iter().any(|f| f.id == "HADOLINT-DL3007"));
    }
}
