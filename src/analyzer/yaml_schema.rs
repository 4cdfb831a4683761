//! `yaml-schema`: structural validation of known CI workflow shapes (GitHub
//! Actions, GitLab CI, Azure Pipelines) against a small embedded schema.
//!
//! Kubernetes manifests are deliberately out of scope here even though they
//! are YAML: [`super::k8s_schema`] owns Kubernetes exclusively via the
//! bundled kube-linter port, so this analyzer never claims
//! [`ArtifactKind::KubernetesManifest`] — claiming it too would mean two
//! analyzers disagreeing about the same document.

use serde_yaml::Value;

use crate::analyzer::{AnalysisContext, Analyzer};
use crate::classify::ArtifactKind;
use crate::finding::{Finding, Location, Severity};

pub struct YamlSchemaAnalyzer;

impl Analyzer for YamlSchemaAnalyzer {
    fn name(&self) -> &'static str {
        "yaml-schema"
    }

    fn applies_to(&self, kind: ArtifactKind) -> bool {
        matches!(
            kind,
            ArtifactKind::GithubWorkflow | ArtifactKind::GitlabCi | ArtifactKind::AzurePipelines
        )
    }

    fn run(&self, ctx: &AnalysisContext) -> Vec<Finding> {
        let Ok(content) = ctx.artifact.contents() else {
            return vec![];
        };
        let path = &ctx.artifact.path;

        let value: Value = match serde_yaml::from_str(content) {
            Ok(value) => value,
            Err(err) => {
                return vec![Finding {
                    id: "YAML-SCHEMA-PARSE-ERROR".to_string(),
                    severity: Severity::Error,
                    message: err.to_string(),
                    location: Location::new(path),
                    analyzer: "yaml-schema".to_string(),
                    tool: None,
                    suggestion: None,
                    references: vec![],
                }]
            }
        };

        match ctx.artifact.kind {
            ArtifactKind::GithubWorkflow => validate_github_workflow(&value, path),
            ArtifactKind::GitlabCi => validate_gitlab_ci(&value, path),
            ArtifactKind::AzurePipelines => validate_azure_pipelines(&value, path),
            _ => vec![],
        }
    }
}

fn validate_github_workflow(value: &Value, path: &std::path::Path) -> Vec<Finding> {
    let mut findings = Vec::new();
    let Some(map) = value.as_mapping() else {
        return vec![missing("YAML-SCHEMA-NOT-A-MAPPING", "workflow file is not a YAML mapping", path)];
    };

    // `on:` parses as the boolean key `true` in YAML 1.1; accept both.
    let has_on = map.contains_key(Value::String("on".to_string())) || map.contains_key(Value::Bool(true));
    if !has_on {
        findings.push(missing("YAML-SCHEMA-MISSING-ON", "workflow is missing a top-level 'on' trigger", path));
    }

    match map.get(Value::String("jobs".to_string())).and_then(|j| j.as_mapping()) {
        None => findings.push(missing("YAML-SCHEMA-MISSING-JOBS", "workflow is missing a top-level 'jobs' mapping", path)),
        Some(jobs) if jobs.is_empty() => {
            findings.push(missing("YAML-SCHEMA-EMPTY-JOBS", "workflow's 'jobs' mapping has no entries", path))
        }
        Some(jobs) => {
            for (name, job) in jobs {
                let job_name = name.as_str().unwrap_or("<unnamed>");
                let has_runner = job
                    .as_mapping()
                    .map(|j| j.contains_key(Value::String("runs-on".to_string())) || j.contains_key(Value::String("uses".to_string())))
                    .unwrap_or(false);
                if !has_runner {
                    findings.push(missing(
                        "YAML-SCHEMA-JOB-MISSING-RUNNER",
                        &format!("job '{job_name}' has neither 'runs-on' nor 'uses'"),
                        path,
                    ));
                }
            }
        }
    }

    findings
}

fn validate_gitlab_ci(value: &Value, path: &std::path::Path) -> Vec<Finding> {
    const RESERVED_KEYS: &[&str] = &["stages", "variables", "include", "default", "workflow", "image"];
    let Some(map) = value.as_mapping() else {
        return vec![missing("YAML-SCHEMA-NOT-A-MAPPING", "pipeline file is not a YAML mapping", path)];
    };

    let has_job = map.keys().any(|k| {
        k.as_str()
            .map(|name| !name.starts_with('.') && !RESERVED_KEYS.contains(&name))
            .unwrap_or(false)
    });

    if !has_job {
        vec![missing("YAML-SCHEMA-NO-JOBS", "pipeline defines no jobs", path)]
    } else {
        vec![]
    }
}

fn validate_azure_pipelines(value: &Value, path: &std::path::Path) -> Vec<Finding> {
    let Some(map) = value.as_mapping() else {
        return vec![missing("YAML-SCHEMA-NOT-A-MAPPING", "pipeline file is not a YAML mapping", path)];
    };

    let has_work = ["steps", "jobs", "stages"]
        .iter()
        .any(|key| map.contains_key(Value::String(key.to_string())));

    if !has_work {
        vec![missing(
            "YAML-SCHEMA-NO-WORK",
            "pipeline defines none of 'steps', 'jobs', or 'stages'",
            path,
        )]
    } else {
        vec![]
    }
}

fn missing(id: &str, message: &str, path: &std::path::Path) -> Finding {
    Finding {
        id: id.to_string(),
        severity: Severity::Error,
        message: message.to_string(),
        location: Location::new(path),
        analyzer: "yaml-schema".to_string(),
        tool: None,
        suggestion: None,
        references: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_workflow_missing_jobs() {
        let value: Value = serde_yaml::from_str("on: push\n").unwrap();
        let findings = validate_github_workflow(&value, std::path::Path::new("ci.yml"));
        assert!(findings.iter().any(|f| f.id == "YAML-SCHEMA-MISSING-JOBS"));
    }

    #[test]
    fn accepts_a_complete_workflow() {
        let value: Value = serde_yaml::from_str(
            "on: push\njobs:\n  build:\n    runs-on: ubuntu-latest\n",
        )
        .unwrap();
        assert!(validate_github_workflow(&value, std::path::Path::new("ci.yml")).is_empty());
    }

    #[test]
    fn flags_gitlab_pipeline_with_no_jobs() {
        let value: Value = serde_yaml::from_str("stages:\n  - build\nvariables:\n  FOO: bar\n").unwrap();
        let findings = validate_gitlab_ci(&value, std::path::Path::new(".gitlab-ci.yml"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "YAML-SCHEMA-NO-JOBS");
    }
}
