//! `yaml-lint`: syntax and style checking via the system or provisioned
//! `yamllint`.

use std::time::Duration;

use regex::Regex;

use crate::analyzer::{resolve_or_skip, timeout_finding, truncation_finding, AnalysisContext, Analyzer};
use crate::classify::ArtifactKind;
use crate::finding::{Finding, Location, Severity};
use crate::runner::{self, ProcessSpec};

pub struct YamlLintAnalyzer;

impl Analyzer for YamlLintAnalyzer {
    fn name(&self) -> &'static str {
        "yaml-lint"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        matches!(
            kind,
            ArtifactKind::GithubWorkflow
                | ArtifactKind::GitlabCi
                | ArtifactKind::AzurePipelines
                | ArtifactKind::KubernetesManifest
                | ArtifactKind::LokiConfig
                | ArtifactKind::GenericYaml
        )
    }

    fn required_tools(&self) -> &'static [&'static str] {
        &["yamllint"]
    }

    fn run(&self, ctx: &AnalysisContext) -> Vec<Finding> {
        let handle = match resolve_or_skip(ctx, self.name(), "yamllint") {
            Ok(handle) => handle,
            Err(finding) => return vec![finding],
        };

        let path = ctx.artifact.path.to_string_lossy().into_owned();
        let argv = [handle.argv0(), "--format", "parsable", path.as_str()];

        let result = match runner::run(ProcessSpec {
            argv: &argv,
            stdin: None,
            cwd: None,
            env: &[],
            deadline: Duration::from_secs(ctx.config.timeout_per_tool_seconds),
        }) {
            Ok(result) => result,
            Err(_) => return vec![timeout_finding(ctx, self.name(), "yamllint")],
        };

        if result.timed_out {
            return vec![timeout_finding(ctx, self.name(), "yamllint")];
        }

        let mut findings = parse_parsable_output(&result.stdout_str(), &ctx.artifact.path);
        findings.extend(truncation_finding(ctx, self.name(), "yamllint", &result));
        findings
    }
}

/// yamllint's `parsable` format: `path:line:col: [level] message (rule)`.
fn parse_parsable_output(stdout: &str, path: &std::path::Path) -> Vec<Finding> {
    let re = Regex::new(r"^(?:.+):(\d+):(\d+):\s*\[(\w+)\]\s*(.+?)(?:\s*\(([\w-]+)\))?$").unwrap();

    stdout
        .lines()
        .filter_map(|line| {
            let cap = re.captures(line)?;
            let line_no: u32 = cap[1].parse().ok()?;
            let col_no: u32 = cap[2].parse().ok()?;
            let level = &cap[3];
            let message = cap[4].trim().to_string();
            let rule = cap.get(5).map(|m| m.as_str()).unwrap_or("yaml-lint");

            Some(Finding {
                id: format!("YAML-{}", rule.to_uppercase()),
                severity: match level {
                    "error" => Severity::Error,
                    "warning" => Severity::Warning,
                    _ => Severity::Info,
                },
                message,
                location: Location::at(path, line_no, col_no),
                analyzer: "yaml-lint".to_string(),
                tool: Some("yamllint".to_string()),
                suggestion: None,
                references: vec![],
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn parses_a_parsable_line() {
        let findings = parse_parsable_output(
            "ci.yml:3:1: [error] duplication of key \"on\" in mapping (key-duplicates)",
            Path::new("ci.yml"),
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
        assert_eq!(findings[0].location.line, Some(3));
        assert_eq!(findings[0].id, "YAML-KEY-DUPLICATES");
    }

    #[test]
    fn ignores_blank_lines() {
        assert!(parse_parsable_output("\n", Path::new("ci.yml")).is_empty());
    }
}
