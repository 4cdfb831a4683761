//! `k8s-dry-run`: best-effort `kubectl apply --dry-run=server` against a
//! reachable cluster. An unreachable cluster is not a failure — the whole
//! point of this analyzer is "validate against a real API server if one
//! happens to be configured", so it downgrades to a skip rather than a
//! tool-missing warning.

use std::time::Duration;

use crate::analyzer::{timeout_finding, truncation_finding, AnalysisContext, Analyzer};
use crate::classify::ArtifactKind;
use crate::finding::{Finding, Location, Severity};
use crate::runner::{self, ProcessSpec};

pub struct K8sDryRunAnalyzer;

impl Analyzer for K8sDryRunAnalyzer {
    fn name(&self) -> &'static str {
        "k8s-dry-run"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        matches!(kind, ArtifactKind::KubernetesManifest | ArtifactKind::HelmChart)
    }

    fn required_tools(&self) -> &'static [&'static str] {
        &["kubectl"]
    }

    fn run(&self, ctx: &AnalysisContext) -> Vec<Finding> {
        let Ok(handle) = ctx.registry.resolve("kubectl") else {
            let skip = ctx.config.skip_if_tool_missing;
            return vec![Finding {
                id: if skip { "CORE-TOOL-SKIPPED" } else { "CORE-TOOL-MISSING" }.to_string(),
                severity: if skip { Severity::Info } else { Severity::Warning },
                message: "kubectl is not available; k8s-dry-run skipped".to_string(),
                location: Location::new(&ctx.artifact.path),
                analyzer: "k8s-dry-run".to_string(),
                tool: Some("kubectl".to_string()),
                suggestion: Some("install kubectl".to_string()),
                references: vec![],
            }];
        };

        let probe = runner::run(ProcessSpec {
            argv: &[handle.argv0(), "cluster-info", "--request-timeout=2s"],
            stdin: None,
            cwd: None,
            env: &[],
            deadline: Duration::from_secs(3),
        });
        if !matches!(probe, Ok(ref result) if result.success()) {
            return vec![Finding {
                id: "K8S-DRYRUN-NO-CLUSTER".to_string(),
                severity: Severity::Info,
                message: "no reachable Kubernetes cluster; k8s-dry-run skipped".to_string(),
                location: Location::new(&ctx.artifact.path),
                analyzer: "k8s-dry-run".to_string(),
                tool: Some("kubectl".to_string()),
                suggestion: None,
                references: vec![],
            }];
        }

        let path = ctx.artifact.path.to_string_lossy().into_owned();
        let argv = [
            handle.argv0(),
            "apply",
            "--dry-run=server",
            "-f",
            path.as_str(),
        ];

        let result = match runner::run(ProcessSpec {
            argv: &argv,
            stdin: None,
            cwd: None,
            env: &[],
            deadline: Duration::from_secs(ctx.config.timeout_per_tool_seconds),
        }) {
            Ok(result) => result,
            Err(_) => return vec![timeout_finding(ctx, self.name(), "kubectl")],
        };

        if result.timed_out {
            return vec![timeout_finding(ctx, self.name(), "kubectl")];
        }

        let mut findings = if result.success() {
            vec![]
        } else {
            vec![Finding {
                id: "K8S-DRYRUN-REJECTED".to_string(),
                severity: Severity::Error,
                message: result.stderr_str().trim().to_string(),
                location: Location::new(&ctx.artifact.path),
                analyzer: "k8s-dry-run".to_string(),
                tool: Some("kubectl".to_string()),
                suggestion: None,
                references: vec![],
            }]
        };
        findings.extend(truncation_finding(ctx, self.name(), "kubectl", &result));
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyzer_applies_only_to_k8s_artifacts() {
        let analyzer = K8sDryRunAnalyzer;
        assert!(analyzer.applies_to(ArtifactKind::KubernetesManifest));
        assert!(!analyzer.applies_to(ArtifactKind::Dockerfile));
    }
}
