//! `action-versions`: flags GitHub Actions `uses:` references pinned to a
//! deprecated or outdated major version.
//!
//! Deliberately independent of the [`crate::extension`]/[`crate::doc_lookup`]
//! side-channel: that system only ever hints on *third-party* actions (see
//! `FIRST_PARTY_ACTION_ORGS`) since its job is enriching validation for
//! extensions the bundled schemas don't cover. The official `actions/*`
//! catalogue this analyzer checks against is itself the content being
//! validated, so it carries its own small bundled table instead.

use regex::Regex;

use crate::analyzer::{AnalysisContext, Analyzer};
use crate::classify::ArtifactKind;
use crate::finding::{Finding, Location, Severity};

pub struct ActionVersionsAnalyzer;

/// `(owner/repo, minimum supported major version, latest known major version)`.
const KNOWN_ACTIONS: &[(&str, u32, u32)] = &[
    ("actions/checkout", 4, 4),
    ("actions/setup-node", 4, 4),
    ("actions/setup-python", 5, 5),
    ("actions/upload-artifact", 4, 4),
    ("actions/download-artifact", 4, 4),
    ("actions/cache", 4, 4),
    ("actions/create-release", 1, 1),
];

impl Analyzer for ActionVersionsAnalyzer {
    fn name(&self) -> &'static str {
        "action-versions"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        kind == ArtifactKind::GithubWorkflow
    }

    fn run(&self, ctx: &AnalysisContext) -> Vec<Finding> {
        let Ok(content) = ctx.artifact.contents() else {
            return vec![];
        };
        scan(content, &ctx.artifact.path)
    }
}

fn scan(content: &str, path: &std::path::Path) -> Vec<Finding> {
    let re = Regex::new(r#"uses:\s*([\w.-]+/[\w.-]+)@v(\d+)"#).unwrap();
    let mut findings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let Some(cap) = re.captures(line) else {
            continue;
        };
        let slug = &cap[1];
        let Ok(used_major) = cap[2].parse::<u32>() else {
            continue;
        };
        let Some((_, min_major, latest_major)) =
            KNOWN_ACTIONS.iter().find(|(known, _, _)| *known == slug)
        else {
            continue;
        };
        if used_major < *min_major {
            let column = line.find("uses:").map(|i| i as u32 + 1).unwrap_or(1);
            findings.push(Finding {
                id: "ACTION-DEPRECATED".to_string(),
                severity: Severity::Error,
                message: format!(
                    "{slug}@v{used_major} is deprecated; minimum v{min_major}"
                ),
                location: Location::at(path, (idx + 1) as u32, column),
                analyzer: "action-versions".to_string(),
                tool: None,
                suggestion: Some(format!("pin to {slug}@v{latest_major}")),
                references: vec![format!("https://github.com/{slug}/releases")],
            });
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn flags_deprecated_upload_artifact() {
        let content = "jobs:\n  build:\n    steps:\n      - uses: actions/upload-artifact@v3\n";
        let findings = scan(content, Path::new("ci.yml"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "ACTION-DEPRECATED");
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].message.contains("minimum v4"));
        assert_eq!(findings[0].location.line, Some(4));
    }

    #[test]
    fn current_version_is_not_flagged() {
        let content = "steps:\n  - uses: actions/checkout@v4\n";
        assert!(scan(content, Path::new("ci.yml")).is_empty());
    }

    #[test]
    fn unknown_action_is_ignored() {
        let content = "steps:\n  - uses: someorg/cool-action@v1\n";
        assert!(scan(content, Path::new("ci.yml")).is_empty());
    }
}
