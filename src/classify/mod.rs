//! # Artifact Classifier & Loader
//!
//! Walks a project tree and assigns each candidate file an [`ArtifactKind`]
//! using an ordered list of rules: filename/extension first, then content
//! sniffing for the ambiguous `.yml`/`.yaml` family (a workflow, a Kubernetes
//! manifest, a Helm chart, a Loki config, and a Fluent Bit config all end in
//! `.yml`). Loading is lazy: [`Artifact::contents`] reads from disk on first
//! access and caches the result, so classifying a tree of ten thousand files
//! costs ten thousand `stat`s, not ten thousand `read`s.

mod rules;

use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ClassifyError, Result};
use crate::finding::{Finding, Location, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Dockerfile,
    Makefile,
    /// A `Jenkinsfile` whose top level contains a `pipeline {` block.
    JenkinsfileDeclarative,
    /// A `Jenkinsfile` using the older scripted-pipeline style.
    JenkinsfileScripted,
    /// A `.groovy` file under `vars/` or `src/` implementing a Jenkins
    /// shared-library step (`def call(` entry point).
    GroovySharedLib,
    ShellScript,
    Terraform,
    Terragrunt,
    GithubWorkflow,
    GitlabCi,
    AzurePipelines,
    KubernetesManifest,
    HelmChart,
    FluentBit,
    LokiConfig,
    /// A `.yml`/`.yaml` file that sniffing could not place in any of the
    /// above categories. Still loaded; no analyzer claims it via `applies_to`,
    /// so it produces no findings, not a fatal error.
    GenericYaml,
}

impl ArtifactKind {
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Dockerfile => "dockerfile",
            ArtifactKind::Makefile => "makefile",
            ArtifactKind::JenkinsfileDeclarative => "jenkinsfile-declarative",
            ArtifactKind::JenkinsfileScripted => "jenkinsfile-scripted",
            ArtifactKind::GroovySharedLib => "groovy-shared-lib",
            ArtifactKind::ShellScript => "shell-script",
            ArtifactKind::Terraform => "terraform",
            ArtifactKind::Terragrunt => "terragrunt",
            ArtifactKind::GithubWorkflow => "github-workflow",
            ArtifactKind::GitlabCi => "gitlab-ci",
            ArtifactKind::AzurePipelines => "azure-pipelines",
            ArtifactKind::KubernetesManifest => "kubernetes-manifest",
            ArtifactKind::HelmChart => "helm-chart",
            ArtifactKind::FluentBit => "fluent-bit",
            ArtifactKind::LokiConfig => "loki-config",
            ArtifactKind::GenericYaml => "generic-yaml",
        }
    }
}

/// A classified, lazily-loaded file.
pub struct Artifact {
    pub path: PathBuf,
    pub kind: ArtifactKind,
    contents: OnceCell<String>,
}

impl Artifact {
    fn new(path: PathBuf, kind: ArtifactKind) -> Self {
        Self {
            path,
            kind,
            contents: OnceCell::new(),
        }
    }

    /// Build an artifact directly, bypassing tree classification. Used by
    /// other modules' tests that need an `Artifact` without walking a
    /// directory.
    #[cfg(test)]
    pub(crate) fn for_test(path: PathBuf, kind: ArtifactKind) -> Self {
        Self::new(path, kind)
    }

    /// Read and cache the artifact's contents as UTF-8 (lossily, for the rare
    /// non-UTF-8 shell script or Groovy file with stray bytes).
    pub fn contents(&self) -> Result<&str> {
        if let Some(cached) = self.contents.get() {
            return Ok(cached);
        }
        let raw = fs::read(&self.path).map_err(|source| ClassifyError::Read {
            path: self.path.clone(),
            source,
        })?;
        let text = String::from_utf8_lossy(&raw).into_owned();
        Ok(self.contents.get_or_init(|| text))
    }
}

/// Result of classifying a project tree: artifacts that were placed into a
/// known kind, plus a fatal Finding for each file that matched an expected
/// location (e.g. `.github/workflows/*.yml`) but failed to parse at all.
pub struct ClassificationResult {
    pub artifacts: Vec<Artifact>,
    pub fatal_findings: Vec<Finding>,
}

/// Classify every recognizable artifact under `root`. Helm charts are
/// detected at the directory level (a `Chart.yaml` promotes its containing
/// directory to a `HelmChart` artifact) and the individual template files
/// underneath are left to the helm-lint analyzer rather than classified
/// individually.
pub fn classify_tree(root: &Path) -> ClassificationResult {
    let mut artifacts = Vec::new();
    let mut fatal_findings = Vec::new();
    let mut helm_chart_dirs = Vec::new();

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !rules::is_ignored_dir(e.path()))
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_dir() {
            if path.join("Chart.yaml").is_file() {
                helm_chart_dirs.push(path.to_path_buf());
            }
            continue;
        }
        if helm_chart_dirs.iter().any(|dir| path.starts_with(dir)) {
            // Owned by the enclosing chart; not classified individually.
            continue;
        }

        match rules::classify_file(path) {
            Ok(Some(kind)) => artifacts.push(Artifact::new(path.to_path_buf(), kind)),
            Ok(None) => {}
            Err(message) => fatal_findings.push(Finding {
                id: "CORE-PARSE-FAILURE".to_string(),
                severity: Severity::Fatal,
                message,
                location: Location::new(path),
                analyzer: "classifier".to_string(),
                tool: None,
                suggestion: None,
                references: vec![],
            }),
        }
    }

    for dir in helm_chart_dirs {
        artifacts.push(Artifact::new(dir, ArtifactKind::HelmChart));
    }

    ClassificationResult {
        artifacts,
        fatal_findings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn classifies_dockerfile_and_makefile() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("Dockerfile"), "FROM scratch\n").unwrap();
        std::fs::write(dir.path().join("Makefile"), "all:\n\techo hi\n").unwrap();

        let result = classify_tree(dir.path());
        let kinds: Vec<ArtifactKind> = result.artifacts.iter().map(|a| a.kind).collect();
        assert!(kinds.contains(&ArtifactKind::Dockerfile));
        assert!(kinds.contains(&ArtifactKind::Makefile));
    }

    #[test]
    fn classifies_github_workflow_by_path_and_content() {
        let dir = tempdir().unwrap();
        let workflows = dir.path().join(".github").join("workflows");
        std::fs::create_dir_all(&workflows).unwrap();
        std::fs::write(workflows.join("ci.yml"), "on: push\njobs:\n  build:\n    runs-on: ubuntu-latest\n").unwrap();

        let result = classify_tree(dir.path());
        assert_eq!(result.artifacts.len(), 1);
        assert_eq!(result.artifacts[0].kind, ArtifactKind::GithubWorkflow);
    }

    #[test]
    fn promotes_chart_directory_to_a_single_helm_artifact() {
        let dir = tempdir().unwrap();
        let chart = dir.path().join("mychart");
        let templates = chart.join("templates");
        std::fs::create_dir_all(&templates).unwrap();
        std::fs::write(chart.join("Chart.yaml"), "apiVersion: v2\nname: mychart\nversion: 0.1.0\n").unwrap();
        std::fs::write(chart.join("values.yaml"), "replicaCount: 1\n").unwrap();
        std::fs::write(templates.join("deployment.yaml"), "kind: Deployment\n").unwrap();

        let result = classify_tree(dir.path());
        let helm: Vec<_> = result
            .artifacts
            .iter()
            .filter(|a| a.kind == ArtifactKind::HelmChart)
            .collect();
        assert_eq!(helm.len(), 1);
        assert_eq!(helm[0].path, chart);
    }

    #[test]
    fn lazy_contents_are_cached_after_first_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Dockerfile");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "FROM scratch").unwrap();

        let artifact = Artifact::new(path, ArtifactKind::Dockerfile);
        let first = artifact.contents().unwrap().to_string();
        let second = artifact.contents().unwrap().to_string();
        assert_eq!(first, second);
    }
}
