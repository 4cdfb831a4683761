//! `tf-security`: Terraform/Terragrunt security scanning, auto-selecting
//! `checkov` (preferred), then `trivy config`, then the deprecated `tfsec`
//! as a last resort.
//!
//! Unlike the single-tool analyzers this one can't go through
//! [`super::resolve_or_skip`] directly since it tries three tools in
//! priority order before giving up; it falls back to an equivalent
//! `CORE-TOOL-SKIPPED`/`CORE-TOOL-MISSING` Finding naming all three only
//! once every option is exhausted.

use std::time::Duration;

use serde_json::Value;

use crate::analyzer::{timeout_finding, truncation_finding, AnalysisContext, Analyzer};
use crate::classify::ArtifactKind;
use crate::finding::{Finding, Location, Severity};
use crate::registry::ToolHandle;
use crate::runner::{self, ProcessSpec};

pub struct TfSecurityAnalyzer;

impl Analyzer for TfSecurityAnalyzer {
    fn name(&self) -> &'static str {
        "tf-security"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        matches!(kind, ArtifactKind::Terraform | ArtifactKind::Terragrunt)
    }

    fn required_tools(&self) -> &'static [&'static str] {
        &["checkov", "trivy", "tfsec"]
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &["tf-lint"]
    }

    fn run(&self, ctx: &AnalysisContext) -> Vec<Finding> {
        for tool in ["checkov", "trivy", "tfsec"] {
            if let Ok(handle) = ctx.registry.resolve(tool) {
                return run_with(ctx, &handle, tool);
            }
        }

        let skip = ctx.config.skip_if_tool_missing;
        vec![Finding {
            id: if skip { "CORE-TOOL-SKIPPED" } else { "CORE-TOOL-MISSING" }.to_string(),
            severity: if skip { Severity::Info } else { Severity::Warning },
            message: "none of checkov, trivy, or tfsec is available; tf-security skipped"
                .to_string(),
            location: Location::new(&ctx.artifact.path),
            analyzer: "tf-security".to_string(),
            tool: None,
            suggestion: Some("install checkov (preferred), trivy, or tfsec".to_string()),
            references: vec![],
        }]
    }
}

fn run_with(ctx: &AnalysisContext, handle: &ToolHandle, tool: &str) -> Vec<Finding> {
    let path = ctx.artifact.path.to_string_lossy().into_owned();
    let argv: Vec<&str> = match tool {
        "checkov" => vec![handle.argv0(), "-f", path.as_str(), "--output", "json", "--compact"],
        "trivy" => vec![handle.argv0(), "config", "--format", "json", path.as_str()],
        "tfsec" => vec![handle.argv0(), path.as_str(), "--format", "json"],
        _ => unreachable!(),
    };

    let result = match runner::run(ProcessSpec {
        argv: &argv,
        stdin: None,
        cwd: None,
        env: &[],
        deadline: Duration::from_secs(ctx.config.timeout_per_tool_seconds),
    }) {
        Ok(result) => result,
        Err(_) => return vec![timeout_finding(ctx, "tf-security", tool)],
    };

    if result.timed_out {
        return vec![timeout_finding(ctx, "tf-security", tool)];
    }

    let mut findings = match tool {
        "checkov" => parse_checkov(&result.stdout_str(), &ctx.artifact.path),
        "trivy" => parse_trivy(&result.stdout_str(), &ctx.artifact.path),
        "tfsec" => parse_tfsec(&result.stdout_str(), &ctx.artifact.path),
        _ => unreachable!(),
    };
    findings.extend(truncation_finding(ctx, "tf-security", tool, &result));
    findings
}

fn parse_checkov(stdout: &str, fallback_path: &std::path::Path) -> Vec<Finding> {
    let Ok(root) = serde_json::from_str::<Value>(stdout.trim()) else {
        return vec![];
    };
    let failed = root
        .get("results")
        .and_then(|r| r.get("failed_checks"))
        .and_then(|f| f.as_array())
        .cloned()
        .unwrap_or_default();

    failed
        .into_iter()
        .map(|check| {
            let line = check
                .get("file_line_range")
                .and_then(|r| r.as_array())
                .and_then(|r| r.first())
                .and_then(|l| l.as_u64())
                .unwrap_or(1) as u32;
            Finding {
                id: check
                    .get("check_id")
                    .and_then(|c| c.as_str())
                    .unwrap_or("CHECKOV-UNKNOWN")
                    .to_string(),
                severity: Severity::Error,
                message: check
                    .get("check_name")
                    .and_then(|c| c.as_str())
                    .unwrap_or("checkov policy violation")
                    .to_string(),
                location: Location::at(fallback_path, line, 1),
                analyzer: "tf-security".to_string(),
                tool: Some("checkov".to_string()),
                suggestion: None,
                references: check
                    .get("guideline")
                    .and_then(|g| g.as_str())
                    .map(|g| vec![g.to_string()])
                    .unwrap_or_default(),
            }
        })
        .collect()
}

fn parse_trivy(stdout: &str, fallback_path: &std::path::Path) -> Vec<Finding> {
    let Ok(root) = serde_json::from_str::<Value>(stdout.trim()) else {
        return vec![];
    };
    let mut findings = Vec::new();
    for result in root.get("Results").and_then(|r| r.as_array()).into_iter().flatten() {
        for misc in result
            .get("Misconfigurations")
            .and_then(|m| m.as_array())
            .into_iter()
            .flatten()
        {
            let line = misc
                .get("CauseMetadata")
                .and_then(|c| c.get("StartLine"))
                .and_then(|l| l.as_u64())
                .unwrap_or(1) as u32;
            findings.push(Finding {
                id: misc
                    .get("ID")
                    .and_then(|i| i.as_str())
                    .unwrap_or("TRIVY-UNKNOWN")
                    .to_string(),
                severity: misc
                    .get("Severity")
                    .and_then(|s| s.as_str())
                    .map(adapt_trivy_severity)
                    .unwrap_or(Severity::Warning),
                message: misc
                    .get("Title")
                    .and_then(|t| t.as_str())
                    .unwrap_or("trivy misconfiguration")
                    .to_string(),
                location: Location::at(fallback_path, line, 1),
                analyzer: "tf-security".to_string(),
                tool: Some("trivy".to_string()),
                suggestion: None,
                references: vec![],
            });
        }
    }
    findings
}

fn parse_tfsec(stdout: &str, fallback_path: &std::path::Path) -> Vec<Finding> {
    let Ok(root) = serde_json::from_str::<Value>(stdout.trim()) else {
        return vec![];
    };
    root.get("results")
        .and_then(|r| r.as_array())
        .into_iter()
        .flatten()
        .map(|result| {
            let line = result
                .get("location")
                .and_then(|l| l.get("start_line"))
                .and_then(|l| l.as_u64())
                .unwrap_or(1) as u32;
            Finding {
                id: result
                    .get("rule_id")
                    .and_then(|r| r.as_str())
                    .unwrap_or("TFSEC-UNKNOWN")
                    .to_string(),
                severity: result
                    .get("severity")
                    .and_then(|s| s.as_str())
                    .map(adapt_trivy_severity)
                    .unwrap_or(Severity::Warning),
                message: result
                    .get("description")
                    .and_then(|d| d.as_str())
                    .unwrap_or("tfsec finding")
                    .to_string(),
                location: Location::at(fallback_path, line, 1),
                analyzer: "tf-security".to_string(),
                tool: Some("tfsec".to_string()),
                suggestion: Some(
                    "tfsec is deprecated upstream; prefer checkov or trivy config".to_string(),
                ),
                references: vec![],
            }
        })
        .collect()
}

fn adapt_trivy_severity(severity: &str) -> Severity {
    match severity.to_uppercase().as_str() {
        "CRITICAL" | "HIGH" => Severity::Error,
        "MEDIUM" | "LOW" => Severity::Warning,
        _ => Severity::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn parses_checkov_failed_checks() {
        let json = r#"{"results":{"failed_checks":[{"check_id":"CKV_AWS_1","check_name":"Ensure bucket is private","file_line_range":[10,12]}]}}"#;
        let findings = parse_checkov(json, Path::new("main.tf"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "CKV_AWS_1");
        assert_eq!(findings[0].location.line, Some(10));
    }

    #[test]
    fn parses_trivy_misconfigurations() {
        let json = r#"{"Results":[{"Misconfigurations":[{"ID":"AVD-AWS-0001","Severity":"HIGH","Title":"bucket is public"}]}]}"#;
        let findings = parse_trivy(json, Path::new("main.tf"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn parses_tfsec_results() {
        let json = r#"{"results":[{"rule_id":"aws-s3-enable-versioning","severity":"MEDIUM","description":"versioning disabled","location":{"start_line":7}}]}"#;
        let findings = parse_tfsec(json, Path::new("main.tf"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].location.line, Some(7));
    }
}
