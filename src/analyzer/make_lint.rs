//! `make-lint`: Makefile format and syntax checking via the system or
//! provisioned `mbake`.

use std::time::Duration;

use regex::Regex;

use crate::analyzer::{resolve_or_skip, timeout_finding, truncation_finding, AnalysisContext, Analyzer};
use crate::classify::ArtifactKind;
use crate::finding::{Finding, Location, Severity};
use crate::runner::{self, ProcessSpec};

pub struct MakeLintAnalyzer;

impl Analyzer for MakeLintAnalyzer {
    fn name(&self) -> &'static str {
        "make-lint"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::Makefile
    }

    fn required_tools(&self) -> &'static [&'static str] {
        &["mbake"]
    }

    fn run(&self, ctx: &AnalysisContext) -> Vec<Finding> {
        let handle = match resolve_or_skip(ctx, self.name(), "mbake") {
            Ok(handle) => handle,
            Err(finding) => return vec![finding],
        };

        let path = ctx.artifact.path.to_string_lossy().into_owned();
        let argv = [handle.argv0(), "validate", path.as_str()];

        let result = match runner::run(ProcessSpec {
            argv: &argv,
            stdin: None,
            cwd: None,
            env: &[],
            deadline: Duration::from_secs(ctx.config.timeout_per_tool_seconds),
        }) {
            Ok(result) => result,
            Err(_) => return vec![timeout_finding(ctx, self.name(), "mbake")],
        };

        if result.timed_out {
            return vec![timeout_finding(ctx, self.name(), "mbake")];
        }

        let mut findings = parse_output(&result.stdout_str(), &ctx.artifact.path);
        if findings.is_empty() && !result.success() {
            findings.push(Finding {
                id: "MAKE-VALIDATE-FAILED".to_string(),
                severity: Severity::Error,
                message: result.stderr_str().trim().to_string(),
                location: Location::new(&ctx.artifact.path),
                analyzer: "make-lint".to_string(),
                tool: Some("mbake".to_string()),
                suggestion: None,
                references: vec![],
            });
        }
        findings.extend(truncation_finding(ctx, self.name(), "mbake", &result));
        findings
    }
}

/// `mbake validate`'s plain output: `path:line: [level] message`.
fn parse_output(stdout: &str, path: &std::path::Path) -> Vec<Finding> {
    let re = Regex::new(r"^(?:.+):(\d+):\s*\[(\w+)\]\s*(.+)$").unwrap();

    stdout
        .lines()
        .filter_map(|line| {
            let cap = re.captures(line)?;
            let line_no: u32 = cap[1].parse().ok()?;
            let level = &cap[2];
            let message = cap[3].trim().to_string();

            Some(Finding {
                id: "MAKE-LINT".to_string(),
                severity: match level.to_lowercase().as_str() {
                    "error" => Severity::Error,
                    "warning" | "warn" => Severity::Warning,
                    _ => Severity::Info,
                },
                message,
                location: Location::at(path, line_no, 1),
                analyzer: "make-lint".to_string(),
                tool: Some("mbake".to_string()),
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
    fn parses_a_validate_line() {
        let findings = parse_output(
            "Makefile:4: [warning] recipe line uses spaces instead of a tab",
            Path::new("Makefile"),
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].location.line, Some(4));
    }

    #[test]
    fn ignores_unparseable_lines() {
        assert!(parse_output("all good", Path::new("Makefile")).is_empty());
    }
}
