//! `workflow-local-run`: dry-run a CI workflow locally — `act` for GitHub
//! Actions, `gitlab-ci-local` for GitLab CI. Actual job execution is opt-in
//! and out of scope here; this analyzer only ever asks the runner to resolve
//! the pipeline plan, never to execute a step.

use std::time::Duration;

use crate::analyzer::{resolve_or_skip, timeout_finding, truncation_finding, AnalysisContext, Analyzer};
use crate::classify::ArtifactKind;
use crate::finding::{Finding, Location, Severity};
use crate::runner::{self, ProcessSpec};

pub struct WorkflowLocalRunAnalyzer;

impl Analyzer for WorkflowLocalRunAnalyzer {
    fn name(&self) -> &'static str {
        "workflow-local-run"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        matches!(kind, ArtifactKind::GithubWorkflow | ArtifactKind::GitlabCi)
    }

    fn required_tools(&self) -> &'static [&'static str] {
        &["act", "gitlab-ci-local"]
    }

    fn run(&self, ctx: &AnalysisContext) -> Vec<Finding> {
        let (tool, argv_tail): (&str, Vec<&str>) = match ctx.artifact.kind {
            ArtifactKind::GithubWorkflow => ("act", vec!["--dryrun"]),
            ArtifactKind::GitlabCi => ("gitlab-ci-local", vec!["--list"]),
            _ => return vec![],
        };

        let handle = match resolve_or_skip(ctx, self.name(), tool) {
            Ok(handle) => handle,
            Err(finding) => return vec![finding],
        };

        let path = ctx.artifact.path.to_string_lossy().into_owned();
        let cwd = ctx.artifact.path.parent().map(|p| p.to_path_buf());
        let mut argv = vec![handle.argv0()];
        argv.extend(argv_tail);
        if tool == "act" {
            argv.push("-W");
            argv.push(path.as_str());
        }

        let result = match runner::run(ProcessSpec {
            argv: &argv,
            stdin: None,
            cwd: cwd.as_deref(),
            env: &[],
            deadline: Duration::from_secs(ctx.config.timeout_per_tool_seconds),
        }) {
            Ok(result) => result,
            Err(_) => return vec![timeout_finding(ctx, self.name(), tool)],
        };

        if result.timed_out {
            return vec![timeout_finding(ctx, self.name(), tool)];
        }

        let mut findings = if result.success() {
            vec![]
        } else {
            vec![Finding {
                id: "CI-DRYRUN-FAILED".to_string(),
                severity: Severity::Error,
                message: {
                    let stderr = result.stderr_str();
                    let stdout = result.stdout_str();
                    let text = if stderr.trim().is_empty() { stdout } else { stderr };
                    text.trim().to_string()
                },
                location: Location::new(&ctx.artifact.path),
                analyzer: "workflow-local-run".to_string(),
                tool: Some(tool.to_string()),
                suggestion: None,
                references: vec![],
            }]
        };
        findings.extend(truncation_finding(ctx, self.name(), tool, &result));
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn does_not_apply_to_non_workflow_artifacts() {
        let analyzer = WorkflowLocalRunAnalyzer;
        assert!(!analyzer.applies_to(ArtifactKind::Dockerfile));
        assert!(analyzer.applies_to(ArtifactKind::GithubWorkflow));
        assert!(analyzer.applies_to(ArtifactKind::GitlabCi));
    }
}
