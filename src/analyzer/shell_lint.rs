//! `shell-lint`: standalone bash/sh script analysis via the system or
//! provisioned `shellcheck`.
//!
//! Distinct from `hadolint::shell::shellcheck::run_shellcheck`, which feeds
//! inline `RUN` snippets from a Dockerfile through a raw `Command` for the
//! DL30xx rule family. This analyzer validates a whole [`ArtifactKind::ShellScript`]
//! file and goes through the Tool Registry + Process Runner like every other
//! external-tool analyzer, so `shellcheck` participates in provisioning,
//! timeouts, and `tool_audit` the same way `yamllint` or `tflint` do.

use std::time::Duration;

use serde::Deserialize;

use crate::analyzer::hadolint::shell::shellcheck::ShellCheckComment;
use crate::analyzer::{resolve_or_skip, timeout_finding, truncation_finding, AnalysisContext, Analyzer};
use crate::classify::ArtifactKind;
use crate::finding::{Finding, Location, Severity};
use crate::runner::{self, ProcessSpec};

pub struct ShellLintAnalyzer;

impl Analyzer for ShellLintAnalyzer {
    fn name(&self) -> &'static str {
        "shell-lint"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::ShellScript
    }

    fn required_tools(&self) -> &'static [&'static str] {
        &["shellcheck"]
    }

    fn run(&self, ctx: &AnalysisContext) -> Vec<Finding> {
        let handle = match resolve_or_skip(ctx, self.name(), "shellcheck") {
            Ok(handle) => handle,
            Err(finding) => return vec![finding],
        };

        let path = ctx.artifact.path.to_string_lossy().into_owned();
        let argv = [handle.argv0(), "--format=json", path.as_str()];

        let result = match runner::run(ProcessSpec {
            argv: &argv,
            stdin: None,
            cwd: None,
            env: &[],
            deadline: Duration::from_secs(ctx.config.timeout_per_tool_seconds),
        }) {
            Ok(result) => result,
            Err(_) => return vec![timeout_finding(ctx, self.name(), "shellcheck")],
        };

        if result.timed_out {
            return vec![timeout_finding(ctx, self.name(), "shellcheck")];
        }

        // shellcheck exits non-zero whenever it reports anything at or above
        // its own default severity; treat the stdout JSON as the source of
        // truth regardless of exit code, per the Process Runner contract
        // that a non-zero exit is data, not a runner error.
        let mut findings = parse_json(&result.stdout_str(), &ctx.artifact.path);
        findings.extend(truncation_finding(ctx, self.name(), "shellcheck", &result));
        findings
    }
}

fn parse_json(stdout: &str, path: &std::path::Path) -> Vec<Finding> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wrapper {
        Array(Vec<ShellCheckComment>),
        Empty {},
    }

    let comments: Vec<ShellCheckComment> = match serde_json::from_str::<Wrapper>(stdout.trim()) {
        Ok(Wrapper::Array(comments)) => comments,
        Ok(Wrapper::Empty {}) | Err(_) => Vec::new(),
    };

    comments
        .into_iter()
        .map(|comment| Finding {
            id: format!("SHELLCHECK-{}", comment.rule_code()),
            severity: adapt_severity(&comment.level),
            message: comment.message.clone(),
            location: Location {
                line: Some(comment.line),
                column: Some(comment.column),
                end_line: Some(comment.end_line),
                end_column: Some(comment.end_column),
                resource_ref: None,
                ..Location::new(path)
            },
            analyzer: "shell-lint".to_string(),
            tool: Some("shellcheck".to_string()),
            suggestion: None,
            references: vec![format!(
                "https://www.shellcheck.net/wiki/{}",
                comment.rule_code()
            )],
        })
        .collect()
}

fn adapt_severity(level: &str) -> Severity {
    match level {
        "error" => Severity::Error,
        "warning" => Severity::Warning,
        _ => Severity::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_shellcheck_json_array() {
        let json = r#"[{"file":"-","line":2,"endLine":2,"column":5,"endColumn":10,"level":"warning","code":2086,"message":"Double quote to prevent globbing"}]"#;
        let findings = parse_json(json, std::path::Path::new("run.sh"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "SHELLCHECK-SC2086");
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn empty_array_yields_no_findings() {
        assert!(parse_json("[]", std::path::Path::new("run.sh")).is_empty());
    }
}
