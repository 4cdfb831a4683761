//! `helm-lint`: Helm chart linting via the bundled [`super::helmlint`] port.
//!
//! Runs in-process against the chart directory the classifier promoted to a
//! `HelmChart` artifact; no external `helm lint` process is spawned.

use crate::analyzer::helmlint::{self, HelmlintConfig};
use crate::analyzer::{AnalysisContext, Analyzer};
use crate::classify::ArtifactKind;
use crate::finding::{Finding, Location, Severity};

pub struct HelmLintAnalyzer;

impl Analyzer for HelmLintAnalyzer {
    fn name(&self) -> &'static str {
        "helm-lint"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::HelmChart
    }

    fn run(&self, ctx: &AnalysisContext) -> Vec<Finding> {
        let mut config = HelmlintConfig::default();
        config.failure_threshold = helmlint::Severity::Ignore;

        let mut result = helmlint::lint_chart(&ctx.artifact.path, &config);
        result.sort();

        let mut findings: Vec<Finding> = result
            .failures
            .into_iter()
            .map(|failure| Finding {
                id: failure.code.as_str().to_string(),
                severity: adapt_severity(failure.severity),
                message: failure.message,
                location: Location::at(&failure.file, failure.line, failure.column.unwrap_or(0)),
                analyzer: "helm-lint".to_string(),
                tool: None,
                suggestion: None,
                references: vec![],
            })
            .collect();

        findings.extend(result.parse_errors.into_iter().map(|message| Finding {
            id: "HELM-PARSE-ERROR".to_string(),
            severity: Severity::Error,
            message,
            location: Location::new(&ctx.artifact.path),
            analyzer: "helm-lint".to_string(),
            tool: None,
            suggestion: None,
            references: vec![],
        }));

        findings
    }
}

/// See `docker_lint::adapt_severity` for why `Style`/`Ignore` both fold to
/// `Info` rather than being dropped.
fn adapt_severity(severity: helmlint::Severity) -> Severity {
    match severity {
        helmlint::Severity::Error => Severity::Error,
        helmlint::Severity::Warning => Severity::Warning,
        helmlint::Severity::Info | helmlint::Severity::Style | helmlint::Severity::Ignore => Severity::Info,
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

    #[test]
    fn missing_chart_yaml_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let chart_dir = dir.path().join("chart");
        std::fs::create_dir_all(&chart_dir).unwrap();
        let artifact = crate::classify::Artifact::for_test(chart_dir, ArtifactKind::HelmChart);

        let registry = ToolRegistry::new(ToolRegistryConfig::default());
        let doc_lookup = DocLookup::new(Box::new(crate::doc_lookup::BundledDocSource::default()), false);
        let config = Config::default();
        let deps = HashMap::new();
        let ctx = AnalysisContext {
            artifact: &artifact,
            hints: &[],
            registry: &registry,
            doc_lookup: &doc_lookup,
            config: &config,
            deps: &deps,
        };

        let findings = HelmLintAnalyzer.run(&ctx);
        assert!(!findings.is_empty());
    }
}
