//! `tf-lint`: Terraform/Terragrunt static analysis via the system or
//! provisioned `tflint`.
//!
//! `tflint --format=json` emits `{"issues": [...], "errors": [...]}`; both
//! arrays are mapped to Findings, `errors` (parse/config problems tflint
//! itself hit) at `error` severity regardless of their own shape.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::analyzer::{resolve_or_skip, timeout_finding, truncation_finding, AnalysisContext, Analyzer};
use crate::classify::ArtifactKind;
use crate::finding::{Finding, Location, Severity};
use crate::runner::{self, ProcessSpec};

pub struct TfLintAnalyzer;

impl Analyzer for TfLintAnalyzer {
    fn name(&self) -> &'static str {
        "tf-lint"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        matches!(kind, ArtifactKind::Terraform | ArtifactKind::Terragrunt)
    }

    fn required_tools(&self) -> &'static [&'static str] {
        &["tflint"]
    }

    fn run(&self, ctx: &AnalysisContext) -> Vec<Finding> {
        let handle = match resolve_or_skip(ctx, self.name(), "tflint") {
            Ok(handle) => handle,
            Err(finding) => return vec![finding],
        };

        let path = ctx.artifact.path.to_string_lossy().into_owned();
        let argv = [handle.argv0(), "--format=json", "--chdir", path.as_str()];

        let result = match runner::run(ProcessSpec {
            argv: &argv,
            stdin: None,
            cwd: None,
            env: &[],
            deadline: Duration::from_secs(ctx.config.timeout_per_tool_seconds),
        }) {
            Ok(result) => result,
            Err(_) => return vec![timeout_finding(ctx, self.name(), "tflint")],
        };

        if result.timed_out {
            return vec![timeout_finding(ctx, self.name(), "tflint")];
        }

        let mut findings = parse_json(&result.stdout_str(), &ctx.artifact.path);
        findings.extend(truncation_finding(ctx, self.name(), "tflint", &result));
        findings
    }
}

#[derive(Deserialize)]
struct TfLintRange {
    filename: Option<String>,
    start: TfLintPos,
}

#[derive(Deserialize)]
struct TfLintPos {
    line: u32,
    column: u32,
}

#[derive(Deserialize)]
struct TfLintIssue {
    rule: TfLintRule,
    message: String,
    range: Option<TfLintRange>,
}

#[derive(Deserialize)]
struct TfLintRule {
    name: String,
    severity: String,
}

#[derive(Deserialize)]
struct TfLintReport {
    #[serde(default)]
    issues: Vec<TfLintIssue>,
    #[serde(default)]
    errors: Vec<Value>,
}

fn parse_json(stdout: &str, fallback_path: &std::path::Path) -> Vec<Finding> {
    let Ok(report) = serde_json::from_str::<TfLintReport>(stdout.trim()) else {
        return vec![];
    };

    let mut findings: Vec<Finding> = report
        .issues
        .into_iter()
        .map(|issue| {
            let (path, line, column) = match &issue.range {
                Some(range) => (
                    range
                        .filename
                        .clone()
                        .map(std::path::PathBuf::from)
                        .unwrap_or_else(|| fallback_path.to_path_buf()),
                    range.start.line,
                    range.start.column,
                ),
                None => (fallback_path.to_path_buf(), 1, 1),
            };
            Finding {
                id: format!("TFLINT-{}", issue.rule.name.to_uppercase()),
                severity: adapt_severity(&issue.rule.severity),
                message: issue.message,
                location: Location::at(path, line, column),
                analyzer: "tf-lint".to_string(),
                tool: Some("tflint".to_string()),
                suggestion: None,
                references: vec![],
            }
        })
        .collect();

    findings.extend(report.errors.into_iter().map(|error| Finding {
        id: "TFLINT-ERROR".to_string(),
        severity: Severity::Error,
        message: error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("tflint reported an error")
            .to_string(),
        location: Location::new(fallback_path),
        analyzer: "tf-lint".to_string(),
        tool: Some("tflint".to_string()),
        suggestion: None,
        references: vec![],
    }));

    findings
}

fn adapt_severity(severity: &str) -> Severity {
    match severity {
        "error" => Severity::Error,
        "warning" => Severity::Warning,
        _ => Severity::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn parses_an_issue() {
        let json = r#"{"issues":[{"rule":{"name":"terraform_deprecated_interpolation","severity":"warning"},"message":"Interpolation-only expressions are deprecated","range":{"filename":"main.tf","start":{"line":3,"column":5}}}],"errors":[]}"#;
        let findings = parse_json(json, Path::new("main.tf"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].location.line, Some(3));
    }

    #[test]
    fn empty_report_yields_no_findings() {
        assert!(parse_json(r#"{"issues":[],"errors":[]}"#, Path::new("main.tf")).is_empty());
    }
}
