//! `core-best-practices`: small, artifact-specific conventions that aren't
//! covered by a dedicated linter — a missing `HEALTHCHECK`, a Makefile with
//! no `.PHONY` declarations, a shell script without strict mode, a GitHub
//! Actions step pinned to a mutable ref.

use regex::Regex;

use crate::analyzer::{AnalysisContext, Analyzer};
use crate::classify::ArtifactKind;
use crate::finding::{Finding, Location, Severity};

pub struct CoreBestPracticesAnalyzer;

impl Analyzer for CoreBestPracticesAnalyzer {
    fn name(&self) -> &'static str {
        "core-best-practices"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        matches!(
            kind,
            ArtifactKind::Dockerfile
                | ArtifactKind::Makefile
                | ArtifactKind::ShellScript
                | ArtifactKind::GithubWorkflow
        )
    }

    fn run(&self, ctx: &AnalysisContext) -> Vec<Finding> {
        let Ok(content) = ctx.artifact.contents() else {
            return vec![];
        };
        let path = &ctx.artifact.path;

        match ctx.artifact.kind {
            ArtifactKind::Dockerfile => check_dockerfile(content, path),
            ArtifactKind::Makefile => check_makefile(content, path),
            ArtifactKind::ShellScript => check_shell_script(content, path),
            ArtifactKind::GithubWorkflow => check_workflow(content, path),
            _ => vec![],
        }
    }
}

fn check_dockerfile(content: &str, path: &std::path::Path) -> Vec<Finding> {
    if content.to_uppercase().contains("HEALTHCHECK") {
        return vec![];
    }
    vec![Finding {
        id: "CORE-NO-HEALTHCHECK".to_string(),
        severity: Severity::Warning,
        message: "Dockerfile has no HEALTHCHECK instruction".to_string(),
        location: Location::new(path),
        analyzer: "core-best-practices".to_string(),
        tool: None,
        suggestion: Some("add a HEALTHCHECK instruction for the running container".to_string()),
        references: vec![],
    }]
}

fn check_makefile(content: &str, path: &std::path::Path) -> Vec<Finding> {
    if content.contains(".PHONY") {
        return vec![];
    }
    // A Makefile with no targets at all has nothing to mark phony.
    if !content.lines().any(|l| !l.starts_with('\t') && !l.trim_start().starts_with('#') && l.contains(':')) {
        return vec![];
    }
    vec![Finding {
        id: "CORE-MISSING-PHONY".to_string(),
        severity: Severity::Info,
        message: "Makefile declares targets but no .PHONY targets".to_string(),
        location: Location::new(path),
        analyzer: "core-best-practices".to_string(),
        tool: None,
        suggestion: Some("declare non-file targets (e.g. 'all', 'clean', 'test') as .PHONY".to_string()),
        references: vec![],
    }]
}

fn check_shell_script(content: &str, path: &std::path::Path) -> Vec<Finding> {
    let head: String = content.lines().take(5).collect::<Vec<_>>().join("\n");
    if head.contains("set -e") || head.contains("set -o errexit") {
        return vec![];
    }
    vec![Finding {
        id: "CORE-MISSING-STRICT-MODE".to_string(),
        severity: Severity::Info,
        message: "script does not enable strict mode ('set -euo pipefail') near the top".to_string(),
        location: Location::at(path, 1, 1),
        analyzer: "core-best-practices".to_string(),
        tool: None,
        suggestion: Some("add 'set -euo pipefail' after the shebang".to_string()),
        references: vec![],
    }]
}

fn check_workflow(content: &str, path: &std::path::Path) -> Vec<Finding> {
    const MUTABLE_REFS: &[&str] = &["main", "master", "latest", "HEAD"];
    let re = Regex::new(r#"uses:\s*([\w.-]+/[\w.-]+)@([\w./-]+)"#).unwrap();

    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let cap = re.captures(line)?;
            let slug = &cap[1];
            let reference = &cap[2];
            if !MUTABLE_REFS.contains(&reference) {
                return None;
            }
            Some(Finding {
                id: "CORE-UNPINNED-ACTION".to_string(),
                severity: Severity::Warning,
                message: format!("'{slug}@{reference}' is pinned to a mutable ref"),
                location: Location::at(path, (idx + 1) as u32, 1),
                analyzer: "core-best-practices".to_string(),
                tool: None,
                suggestion: Some("pin to a release tag or full commit SHA".to_string()),
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
    fn flags_missing_healthcheck() {
        let findings = check_dockerfile("FROM nginx:latest\nCMD [\"nginx\"]\n", Path::new("Dockerfile"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "CORE-NO-HEALTHCHECK");
    }

    #[test]
    fn healthcheck_present_yields_no_finding() {
        let content = "FROM nginx:1.25\nHEALTHCHECK CMD curl -f http://localhost/ || exit 1\n";
        assert!(check_dockerfile(content, Path::new("Dockerfile")).is_empty());
    }

    #[test]
    fn flags_missing_strict_mode() {
        let findings = check_shell_script("#!/bin/bash\nrm $file\n", Path::new("run.sh"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "CORE-MISSING-STRICT-MODE");
    }

    #[test]
    fn flags_action_pinned_to_main() {
        let content = "steps:\n  - uses: someorg/cool-action@main\n";
        let findings = check_workflow(content, Path::new("ci.yml"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "CORE-UNPINNED-ACTION");
    }
}
