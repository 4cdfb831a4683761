//! `k8s-schema`: Kubernetes manifest validation via the bundled
//! [`super::kubelint`] port.
//!
//! Runs in-process; for a `HelmChart` artifact, `kubelint::lint` transparently
//! renders the chart through a real `helm template` invocation before
//! checking the rendered objects (see `kubelint::parser::helm`), so this
//! analyzer's `depends_on` on `helm-lint` is ordering only — there is no
//! explicit data hand-off between the two.
//!
//! Extension hints of category [`HintCategory::K8sCrd`] that the doc
//! side-channel couldn't resolve downgrade to an informational finding
//! instead of a schema violation: an unrecognized CRD is not itself a
//! mistake.

use crate::analyzer::kubelint::{self, KubelintConfig};
use crate::analyzer::{AnalysisContext, Analyzer};
use crate::classify::ArtifactKind;
use crate::extension::HintCategory;
use crate::finding::{Finding, Location, Severity};

pub struct K8sSchemaAnalyzer;

impl Analyzer for K8sSchemaAnalyzer {
    fn name(&self) -> &'static str {
        "k8s-schema"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        matches!(kind, ArtifactKind::KubernetesManifest | ArtifactKind::HelmChart)
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &["helm-lint"]
    }

    fn run(&self, ctx: &AnalysisContext) -> Vec<Finding> {
        let mut config = KubelintConfig::default();
        config.failure_threshold = kubelint::Severity::Info;

        let mut result = kubelint::lint(&ctx.artifact.path, &config);
        result.sort();

        let mut findings: Vec<Finding> = result
            .failures
            .into_iter()
            .map(|failure| {
                let mut location = Location::new(&failure.file_path);
                location.line = failure.line;
                if !failure.object_name.is_empty() {
                    location = location.with_resource(format!("{}/{}", failure.object_kind, failure.object_name));
                }
                Finding {
                    id: failure.code.as_str().to_string(),
                    severity: adapt_severity(failure.severity),
                    message: failure.message,
                    location,
                    analyzer: "k8s-schema".to_string(),
                    tool: None,
                    suggestion: failure.remediation,
                    references: vec![],
                }
            })
            .collect();

        findings.extend(result.parse_errors.into_iter().map(|message| Finding {
            id: "K8S-PARSE-ERROR".to_string(),
            severity: Severity::Error,
            message,
            location: Location::new(&ctx.artifact.path),
            analyzer: "k8s-schema".to_string(),
            tool: None,
            suggestion: None,
            references: vec![],
        }));

        for (hint, fragment) in ctx.hints {
            if hint.category != HintCategory::K8sCrd {
                continue;
            }
            if fragment.is_none() {
                findings.push(Finding {
                    id: "CORE-CRD-SCHEMA-UNAVAILABLE".to_string(),
                    severity: Severity::Info,
                    message: format!("custom resource '{}' has no bundled schema to validate against", hint.identifier),
                    location: Location::new(&ctx.artifact.path),
                    analyzer: "k8s-schema".to_string(),
                    tool: None,
                    suggestion: None,
                    references: vec![],
                });
            }
        }

        findings
    }
}

/// kube-linter's native ladder (`Error > Warning > Info`) is already a subset
/// of the engine's; the mapping is the identity modulo the enum names.
fn adapt_severity(severity: kubelint::Severity) -> Severity {
    match severity {
        kubelint::Severity::Error => Severity::Error,
        kubelint::Severity::Warning => Severity::Warning,
        kubelint::Severity::Info => Severity::Info,
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
    fn flags_missing_resource_limits() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deploy.yaml");
        std::fs::write(
            &path,
            "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: web\nspec:\n  template:\n    spec:\n      containers:\n      - name: app\n        image: nginx:latest\n",
        )
        .unwrap();
        let artifact = crate::classify::Artifact::for_test(path, ArtifactKind::KubernetesManifest);

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

        let findings = K8sSchemaAnalyzer.run(&ctx);
        assert!(!findings.is_empty());
    }
}
