//! The canonical Finding record.
//!
//! Every analyzer, regardless of whether it wraps an external tool (tflint,
//! shellcheck) or re-implements a linter natively in Rust (hadolint, kube-linter),
//! reports its results as a stream of [`Finding`]s. This is the single currency
//! the orchestrator, reporter, and exit-code arbiter all speak.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Severity ladder for the unified Finding model: `info < warning < error < fatal`.
///
/// This is intentionally a different, smaller ladder than the 5-level scale used
/// internally by the hadolint-derived linter (`Error > Warning > Info > Style >
/// Ignore`). Analyzers that wrap a tool with a richer native scale map down to
/// this one at their boundary; see `analyzer::hadolint::adapt_severity` and the
/// kube-linter/helmlint equivalents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    /// Reserved for parse/classification failures that prevented an analyzer
    /// from running at all, never assigned by a rule that actually inspected
    /// the artifact's contents.
    Fatal,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        };
        f.write_str(s)
    }
}

/// A location within an artifact, or within a resource embedded in it (e.g. a
/// single Kubernetes object inside a multi-document YAML stream).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,
    /// Identifies a sub-resource within the artifact, e.g. `Deployment/web` for
    /// the second document in a multi-doc Kubernetes manifest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_ref: Option<String>,
}

impl Location {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            line: None,
            column: None,
            end_line: None,
            end_column: None,
            resource_ref: None,
        }
    }

    pub fn at(path: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            line: Some(line),
            column: Some(column),
            ..Self::new(path)
        }
    }

    pub fn with_resource(mut self, resource_ref: impl Into<String>) -> Self {
        self.resource_ref = Some(resource_ref.into());
        self
    }
}

/// One diagnostic produced by an analyzer.
///
/// Findings are immutable once constructed; `Pipeline Orchestrator` dedup/merge
/// logic works by constructing a new Finding with the max severity rather than
/// mutating one in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable identifier for the rule that produced this Finding, e.g. `DL3008`,
    /// `KL-runasnonroot`, `WF-ACTION-PIN`. Used for dedup keys and suppression.
    pub id: String,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
    /// Name of the analyzer that produced this Finding, e.g. `docker-lint`.
    pub analyzer: String,
    /// Name of the underlying tool, when the analyzer wraps one; `None` for
    /// purely-internal analyzers with no external process involved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

impl Finding {
    /// The dedup key: Findings that collide on this key are merged, keeping the
    /// maximum severity between them.
    fn dedup_key(&self) -> (String, &Path, Option<u32>, Option<u32>, Option<&str>) {
        (
            self.id.clone(),
            self.location.path.as_path(),
            self.location.line,
            self.location.column,
            self.location.resource_ref.as_deref(),
        )
    }

    /// The total order the reporter and exit-code arbiter rely on: by path,
    /// then line (missing line sorts as if it were line 0), then column
    /// (same rule), then severity descending, then id. This order depends only
    /// on the Finding's own fields, never on which analyzer produced it or the
    /// order analyzers happened to complete in.
    fn sort_key(&self) -> (&Path, u32, u32, std::cmp::Reverse<Severity>, &str) {
        (
            self.location.path.as_path(),
            self.location.line.unwrap_or(0),
            self.location.column.unwrap_or(0),
            std::cmp::Reverse(self.severity),
            self.id.as_str(),
        )
    }
}

impl PartialOrd for Finding {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Finding {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// Merge a raw stream of Findings: collapse entries that share a dedup key to
/// the single one with the highest severity, then sort into the canonical
/// total order.
pub fn dedup_and_sort(findings: Vec<Finding>) -> Vec<Finding> {
    use std::collections::HashMap;

    let mut by_key: HashMap<(String, PathBuf, Option<u32>, Option<u32>, Option<String>), Finding> =
        HashMap::with_capacity(findings.len());

    for finding in findings {
        let key = (
            finding.id.clone(),
            finding.location.path.clone(),
            finding.location.line,
            finding.location.column,
            finding.location.resource_ref.clone(),
        );

        match by_key.get_mut(&key) {
            Some(existing) if finding.severity > existing.severity => {
                *existing = finding;
            }
            Some(_) => {}
            None => {
                by_key.insert(key, finding);
            }
        }
    }

    let mut merged: Vec<Finding> = by_key.into_values().collect();
    merged.sort();
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(id: &str, path: &str, line: Option<u32>, severity: Severity) -> Finding {
        Finding {
            id: id.to_string(),
            severity,
            message: "msg".to_string(),
            location: Location {
                path: PathBuf::from(path),
                line,
                column: None,
                end_line: None,
                end_column: None,
                resource_ref: None,
            },
            analyzer: "test".to_string(),
            tool: None,
            suggestion: None,
            references: vec![],
        }
    }

    #[test]
    fn dedup_keeps_max_severity() {
        let findings = vec![
            f("DL3008", "Dockerfile", Some(3), Severity::Info),
            f("DL3008", "Dockerfile", Some(3), Severity::Error),
        ];
        let merged = dedup_and_sort(findings);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].severity, Severity::Error);
    }

    #[test]
    fn sort_orders_by_path_then_line_then_severity_desc_then_id() {
        let findings = vec![
            f("B", "b.yml", Some(1), Severity::Warning),
            f("A", "a.yml", None, Severity::Info),
            f("A", "a.yml", Some(5), Severity::Error),
            f("Z", "a.yml", Some(5), Severity::Warning),
        ];
        let sorted = dedup_and_sort(findings);
        let ids: Vec<&str> = sorted.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "A", "Z", "B"]);
        assert_eq!(sorted[0].location.line, None);
        assert_eq!(sorted[1].severity, Severity::Error);
    }

    #[test]
    fn severity_ladder_orders_correctly() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }
}
