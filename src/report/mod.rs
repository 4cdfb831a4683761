//! # Reporter & Exit-Code Arbiter
//!
//! Turns a [`pipeline::Run`] into one of the two externally visible
//! renderings — colored text for a terminal, or a single stable JSON object —
//! and derives the process exit status. Both renderings read the same
//! `Run.findings` stream; neither mutates it.

use std::io::IsTerminal;
use std::path::Path;

use serde::Serialize;

use crate::analyzer::display::{get_color_adapter, BoxDrawer, ColorAdapter};
use crate::config::types::{ColorMode, Config};
use crate::finding::{Finding, Severity};
use crate::pipeline::{ArtifactMeta, Run};
use crate::registry::ToolAuditEntry;

/// Per-artifact metadata in the JSON report's `"artifacts"` array.
#[derive(Serialize)]
pub struct ArtifactSummary {
    pub path: std::path::PathBuf,
    pub kind: &'static str,
}

impl From<&ArtifactMeta> for ArtifactSummary {
    fn from(meta: &ArtifactMeta) -> Self {
        Self {
            path: meta.path.clone(),
            kind: meta.kind.label(),
        }
    }
}

#[derive(Serialize)]
struct ToolAuditSummary {
    tool: String,
    strategy: &'static str,
    succeeded: bool,
    /// Seconds since the Unix epoch; `SystemTime` itself isn't a stable wire
    /// format, and the reporter needs byte-reproducible JSON.
    at_unix_seconds: u64,
}

impl From<&ToolAuditEntry> for ToolAuditSummary {
    fn from(entry: &ToolAuditEntry) -> Self {
        Self {
            tool: entry.tool.clone(),
            strategy: entry.strategy,
            succeeded: entry.succeeded,
            at_unix_seconds: entry
                .at
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }
}

#[derive(Serialize, Default, Clone, Copy)]
pub struct SeverityCounts {
    pub info: usize,
    pub warning: usize,
    pub error: usize,
    pub fatal: usize,
}

impl SeverityCounts {
    fn tally(findings: &[Finding]) -> Self {
        let mut counts = Self::default();
        for finding in findings {
            match finding.severity {
                Severity::Info => counts.info += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Error => counts.error += 1,
                Severity::Fatal => counts.fatal += 1,
            }
        }
        counts
    }
}

#[derive(Serialize)]
struct Summary {
    counts: SeverityCounts,
    pass: bool,
}

/// Field order here is the wire contract: the spec's example shows
/// `artifacts, findings, tool_audit, summary` and a `derive(Serialize)`
/// struct serializes in declaration order regardless of the `serde_json`
/// feature set, which is what keeps JSON reports byte-reproducible across
/// runs without reaching for a sorted map.
#[derive(Serialize)]
struct JsonReport<'a> {
    artifacts: Vec<ArtifactSummary>,
    findings: &'a [Finding],
    tool_audit: Vec<ToolAuditSummary>,
    summary: Summary,
}

/// Render the full JSON report for one run.
pub fn render_json(run: &Run, config: &Config) -> String {
    let report = JsonReport {
        artifacts: run.artifacts.iter().map(ArtifactSummary::from).collect(),
        findings: &run.findings,
        tool_audit: run.tool_audit.iter().map(ToolAuditSummary::from).collect(),
        summary: Summary {
            counts: SeverityCounts::tally(&run.findings),
            pass: exit_code(run, config) == 0,
        },
    };
    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
}

/// Render the human-readable report: one section per artifact that produced
/// at least one Finding, a severity count table, and a final PASS/FAIL line.
pub fn render_human(run: &Run, config: &Config) -> String {
    let colorize = match config.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    };
    colored::control::set_override(colorize);

    let adapter = get_color_adapter();
    let mut out = String::new();

    for artifact in &run.artifacts {
        let findings: Vec<&Finding> = run
            .findings
            .iter()
            .filter(|f| f.location.path == artifact.path)
            .collect();
        if findings.is_empty() {
            continue;
        }

        out.push_str(&format!(
            "{}\n",
            adapter.header_text(&format!("{} ({})", artifact.path.display(), artifact.kind.label()))
        ));
        for finding in findings {
            render_finding(&mut out, adapter, finding);
        }
        out.push('\n');
    }

    out.push_str(&render_summary(run, config, adapter));
    out.push('\n');
    out
}

fn render_finding(out: &mut String, adapter: &ColorAdapter, finding: &Finding) {
    let location = format!(
        "{}:{}:{}",
        finding.location.path.display(),
        finding.location.line.unwrap_or(0),
        finding.location.column.unwrap_or(0)
    );
    out.push_str(&format!(
        "{} [{}] {} \u{2014} {}\n",
        severity_label(adapter, finding.severity),
        finding.id,
        adapter.path(&location),
        finding.message
    ));

    if let Some(excerpt) = finding.location.line.and_then(|line| source_excerpt(&finding.location.path, line)) {
        out.push_str(&excerpt);
    }
    if let Some(suggestion) = &finding.suggestion {
        out.push_str(&format!("    {} {}\n", adapter.dimmed("suggestion:"), suggestion));
    }
}

fn severity_label(adapter: &ColorAdapter, severity: Severity) -> String {
    match severity {
        Severity::Info => adapter.info("info").to_string(),
        Severity::Warning => adapter.warning("warning").to_string(),
        Severity::Error => adapter.error("error").to_string(),
        Severity::Fatal => adapter.error("fatal").to_string(),
    }
}

/// Three lines of source centered on `line` (1-indexed), the reported line
/// marked with `>`. `None` if the file can no longer be read (e.g. deleted
/// between classification and reporting) — a missing excerpt is not itself
/// a Finding, it's just omitted.
fn source_excerpt(path: &Path, line: u32) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let lines: Vec<&str> = content.lines().collect();
    let idx = line.saturating_sub(1) as usize;
    let start = idx.saturating_sub(1);
    let end = (idx + 2).min(lines.len());
    let window = lines.get(start..end)?;

    let mut excerpt = String::new();
    for (offset, text) in window.iter().enumerate() {
        let current = start + offset + 1;
        let marker = if current as u32 == line { ">" } else { " " };
        excerpt.push_str(&format!("  {marker} {current:>4} | {text}\n"));
    }
    Some(excerpt)
}

fn render_summary(run: &Run, config: &Config, adapter: &ColorAdapter) -> String {
    let counts = SeverityCounts::tally(&run.findings);
    let pass = exit_code(run, config) == 0;

    let mut summary = BoxDrawer::new("summary");
    summary.add_line("info", &counts.info.to_string(), true);
    summary.add_line("warning", &counts.warning.to_string(), true);
    summary.add_line("error", &counts.error.to_string(), true);
    summary.add_line("fatal", &counts.fatal.to_string(), true);
    summary.add_separator();
    let verdict = if pass {
        adapter.success("PASS").to_string()
    } else {
        adapter.error("FAIL").to_string()
    };
    summary.add_value_only(&verdict);
    summary.draw()
}

/// The exit-code arbiter. Findings below `config.severity_threshold` are
/// still reported but never influence the exit code; cancellation overrides
/// every other rule.
pub fn exit_code(run: &Run, config: &Config) -> i32 {
    if run.cancelled {
        return 130;
    }

    let counted = run
        .findings
        .iter()
        .filter(|f| f.severity >= config.severity_threshold);

    let mut highest: Option<Severity> = None;
    for finding in counted {
        highest = Some(highest.map_or(finding.severity, |h| h.max(finding.severity)));
    }

    match highest {
        Some(Severity::Fatal) => 2,
        Some(Severity::Error) => 1,
        Some(Severity::Warning) if config.strict_mode => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Location;
    use crate::pipeline::ArtifactMeta;
    use std::path::PathBuf;

    fn finding(severity: Severity) -> Finding {
        Finding {
            id: "TEST-ID".to_string(),
            severity,
            message: "message".to_string(),
            location: Location::new("a.yml"),
            analyzer: "test".to_string(),
            tool: None,
            suggestion: None,
            references: vec![],
        }
    }

    fn run_with(findings: Vec<Finding>, cancelled: bool) -> Run {
        Run {
            findings,
            tool_audit: vec![],
            cancelled,
            artifacts: vec![ArtifactMeta {
                path: PathBuf::from("a.yml"),
                kind: crate::classify::ArtifactKind::GenericYaml,
            }],
        }
    }

    #[test]
    fn clean_run_exits_zero() {
        let run = run_with(vec![finding(Severity::Info)], false);
        assert_eq!(exit_code(&run, &Config::default()), 0);
    }

    #[test]
    fn fatal_finding_exits_two() {
        let run = run_with(vec![finding(Severity::Fatal)], false);
        assert_eq!(exit_code(&run, &Config::default()), 2);
    }

    #[test]
    fn error_finding_exits_one() {
        let run = run_with(vec![finding(Severity::Error)], false);
        assert_eq!(exit_code(&run, &Config::default()), 1);
    }

    #[test]
    fn warning_only_exits_zero_unless_strict() {
        let run = run_with(vec![finding(Severity::Warning)], false);
        assert_eq!(exit_code(&run, &Config::default()), 0);

        let mut strict = Config::default();
        strict.strict_mode = true;
        assert_eq!(exit_code(&run, &strict), 1);
    }

    #[test]
    fn cancellation_overrides_everything() {
        let run = run_with(vec![finding(Severity::Fatal)], true);
        assert_eq!(exit_code(&run, &Config::default()), 130);
    }

    #[test]
    fn severity_threshold_excludes_findings_from_the_arbiter() {
        let run = run_with(vec![finding(Severity::Error)], false);
        let mut config = Config::default();
        config.severity_threshold = Severity::Fatal;
        assert_eq!(exit_code(&run, &config), 0);
    }

    #[test]
    fn json_report_keeps_the_documented_key_order() {
        let run = run_with(vec![finding(Severity::Warning)], false);
        let json = render_json(&run, &Config::default());
        let artifacts_at = json.find("\"artifacts\"").unwrap();
        let findings_at = json.find("\"findings\"").unwrap();
        let tool_audit_at = json.find("\"tool_audit\"").unwrap();
        let summary_at = json.find("\"summary\"").unwrap();
        assert!(artifacts_at < findings_at);
        assert!(findings_at < tool_audit_at);
        assert!(tool_audit_at < summary_at);
    }
}
