//! # Extension Detector
//!
//! Scans a classified, loaded [`Artifact`] for references to out-of-standard
//! elements — a Kubernetes CRD, a Terraform provider or module the bundled
//! schemas don't cover, a Helm subchart dependency, a Fluent Bit output
//! plugin, a third-party GitHub Action — and turns each into an
//! [`ExtensionHint`]. The orchestrator resolves every hint it collects
//! through [`crate::doc_lookup::DocLookup`] before the analyzer DAG runs, so
//! analyzers that want schema enrichment just read `hint.resolved` off the
//! [`crate::analyzer::AnalysisContext`] they're handed.
//!
//! Detection here is deliberately shallow: regex and line scanning over the
//! artifact's raw text, not a full HCL/YAML semantic walk. A hint only needs
//! to be precise enough to key a doc lookup; the analyzer that consumes
//! `hint.resolved` does the real validation.

use std::collections::HashSet;

use crate::classify::{Artifact, ArtifactKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HintCategory {
    K8sCrd,
    TerraformProvider,
    TerraformModule,
    HelmSubchart,
    FluentbitPlugin,
    ActionReference,
    /// Reserved for a future Jenkins shared-library step lookup; the
    /// `@NonCPS` analyzer currently covers Jenkins entirely through textual
    /// rules and never emits this category. See `DESIGN.md`.
    JenkinsStep,
}

/// A pointer to an out-of-standard element found in an artifact that may
/// benefit from a doc side-channel lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionHint {
    pub category: HintCategory,
    /// Category-specific identifier: `group/Kind@version` for a CRD,
    /// `hashicorp/aws` for a provider, `owner/repo@ref` for an action.
    pub identifier: String,
    /// 1-indexed line in the artifact where the hint was found, when known.
    pub line: Option<u32>,
}

impl ExtensionHint {
    pub(crate) fn new(category: HintCategory, identifier: impl Into<String>, line: Option<u32>) -> Self {
        Self {
            category,
            identifier: identifier.into(),
            line,
        }
    }
}

/// Kubernetes API groups considered built-in; anything else on a document's
/// `apiVersion` is treated as a CRD.
const CORE_K8S_GROUPS: &[&str] = &[
    "", // core/v1 (Pod, Service, ConfigMap, ...)
    "apps",
    "batch",
    "networking.k8s.io",
    "rbac.authorization.k8s.io",
    "policy",
    "autoscaling",
    "storage.k8s.io",
    "extensions",
    "apiextensions.k8s.io",
    "admissionregistration.k8s.io",
    "scheduling.k8s.io",
    "coordination.k8s.io",
    "node.k8s.io",
    "discovery.k8s.io",
    "events.k8s.io",
    "certificates.k8s.io",
];

/// Terraform providers the bundled schemas already cover.
const KNOWN_TF_PROVIDERS: &[&str] = &[
    "aws", "azurerm", "google", "kubernetes", "helm", "random", "null", "local", "template",
    "tls", "time", "archive", "http", "external",
];

/// Fluent Bit output plugins shipped with every Fluent Bit build.
const BUILTIN_FLUENTBIT_OUTPUTS: &[&str] = &[
    "stdout", "file", "forward", "null", "es", "kafka", "http", "syslog", "exit", "counter",
];

/// GitHub orgs whose actions are treated as first-party and never hinted.
const FIRST_PARTY_ACTION_ORGS: &[&str] = &["actions", "github"];

/// Scan one artifact's text for extension references. Returns hints in the
/// order they were found; duplicates (same category + identifier) within a
/// single artifact are collapsed since the side-channel would resolve them
/// identically.
pub fn detect(artifact: &Artifact) -> Vec<ExtensionHint> {
    let mut seen = HashSet::new();
    let mut hints = Vec::new();
    let mut push = |hint: ExtensionHint| {
        let key = (hint.category, hint.identifier.clone());
        if seen.insert(key) {
            hints.push(hint);
        }
    };

    // Helm charts are directories; every other artifact kind is a single
    // file readable through `contents()`.
    if artifact.kind == ArtifactKind::HelmChart {
        detect_helm_subcharts(artifact, &mut push);
        return hints;
    }

    let Ok(content) = artifact.contents() else {
        return hints;
    };

    match artifact.kind {
        ArtifactKind::KubernetesManifest => detect_k8s_crds(content, &mut push),
        ArtifactKind::Terraform | ArtifactKind::Terragrunt => {
            detect_terraform_providers(content, &mut push);
            detect_terraform_modules(content, &mut push);
        }
        ArtifactKind::FluentBit => detect_fluentbit_plugins(content, &mut push),
        ArtifactKind::GithubWorkflow => detect_action_references(content, &mut push),
        _ => {}
    }

    hints
}

fn detect_k8s_crds(content: &str, push: &mut impl FnMut(ExtensionHint)) {
    let mut current_api_version: Option<String> = None;
    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix("apiVersion:") {
            current_api_version = Some(rest.trim().trim_matches('"').to_string());
        } else if let Some(rest) = trimmed.strip_prefix("kind:") {
            let kind = rest.trim().trim_matches('"');
            if let Some(api_version) = &current_api_version {
                let group = api_version.split('/').next().unwrap_or("");
                if !CORE_K8S_GROUPS.contains(&group) {
                    let version = api_version.split('/').nth(1).unwrap_or(api_version);
                    push(ExtensionHint::new(
                        HintCategory::K8sCrd,
                        format!("{group}/{kind}@{version}"),
                        Some((idx + 1) as u32),
                    ));
                }
            }
        } else if trimmed == "---" {
            current_api_version = None;
        }
    }
}

fn detect_terraform_providers(content: &str, push: &mut impl FnMut(ExtensionHint)) {
    // Matches the `name = { source = "org/name" ... }` entries inside a
    // `required_providers { }` block. We scan line-by-line rather than
    // parsing HCL since a regex over the conventional formatting is robust
    // enough to key a doc lookup and tolerates malformed blocks.
    let Some(block_start) = content.find("required_providers") else {
        return;
    };
    let rest = &content[block_start..];
    let Some(open) = rest.find('{') else { return };
    let mut depth = 0i32;
    let mut end = rest.len();
    for (i, c) in rest.char_indices().skip(open) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    end = i;
                    break;
                }
            }
            _ => {}
        }
    }
    let block = &rest[open..=end.min(rest.len() - 1)];
    let base_line = content[..block_start].lines().count();

    let re = regex::Regex::new(r#"(?m)^\s*(\w[\w-]*)\s*=\s*\{[^}]*source\s*=\s*"([^"]+)""#).unwrap();
    for cap in re.captures_iter(block) {
        let name = &cap[1];
        let source = &cap[2];
        let short = source.rsplit('/').next().unwrap_or(source);
        if !KNOWN_TF_PROVIDERS.contains(&short) && !KNOWN_TF_PROVIDERS.contains(&name) {
            let line_offset = block[..cap.get(0).unwrap().start()].lines().count();
            push(ExtensionHint::new(
                HintCategory::TerraformProvider,
                source.to_string(),
                Some((base_line + line_offset) as u32),
            ));
        }
    }
}

fn detect_terraform_modules(content: &str, push: &mut impl FnMut(ExtensionHint)) {
    let re = regex::Regex::new(r#"(?m)^\s*module\s+"([^"]+)"\s*\{"#).unwrap();
    for cap in re.captures_iter(content) {
        let name = &cap[1];
        let start = cap.get(0).unwrap().start();
        let line = content[..start].lines().count() as u32 + 1;
        // Look for the `source = "..."` line within the next few lines.
        let after = &content[start..];
        if let Some(src_cap) = regex::Regex::new(r#"source\s*=\s*"([^"]+)""#)
            .unwrap()
            .captures(after.lines().take(10).collect::<Vec<_>>().join("\n").as_str())
        {
            let source = &src_cap[1];
            if !source.starts_with('.') && !source.starts_with("registry.terraform.io") {
                push(ExtensionHint::new(
                    HintCategory::TerraformModule,
                    format!("{name}:{source}"),
                    Some(line),
                ));
            }
        }
    }
}

fn detect_helm_subcharts(artifact: &Artifact, push: &mut impl FnMut(ExtensionHint)) {
    let chart_yaml = artifact.path.join("Chart.yaml");
    let Ok(content) = std::fs::read_to_string(&chart_yaml) else {
        return;
    };
    let Ok(parsed) = serde_yaml::from_str::<serde_yaml::Value>(&content) else {
        return;
    };
    let Some(deps) = parsed.get("dependencies").and_then(|d| d.as_sequence()) else {
        return;
    };
    for dep in deps {
        if let Some(name) = dep.get("name").and_then(|n| n.as_str()) {
            let version = dep
                .get("version")
                .and_then(|v| v.as_str())
                .unwrap_or("*");
            push(ExtensionHint::new(
                HintCategory::HelmSubchart,
                format!("{name}@{version}"),
                None,
            ));
        }
    }
}

fn detect_fluentbit_plugins(content: &str, push: &mut impl FnMut(ExtensionHint)) {
    let mut in_output = false;
    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("[OUTPUT]") {
            in_output = true;
            continue;
        }
        if trimmed.starts_with('[') {
            in_output = false;
            continue;
        }
        if in_output {
            if let Some(rest) = trimmed.strip_prefix("Name") {
                let name = rest.trim_start_matches(|c: char| c == ' ' || c == '=').trim();
                if !BUILTIN_FLUENTBIT_OUTPUTS.contains(&name) {
                    push(ExtensionHint::new(
                        HintCategory::FluentbitPlugin,
                        name.to_string(),
                        Some((idx + 1) as u32),
                    ));
                }
            }
        }
    }
}

fn detect_action_references(content: &str, push: &mut impl FnMut(ExtensionHint)) {
    let re = regex::Regex::new(r#"uses:\s*([\w.-]+/[\w.-]+)@([\w.-]+)"#).unwrap();
    for (idx, line) in content.lines().enumerate() {
        if let Some(cap) = re.captures(line) {
            let slug = &cap[1];
            let org = slug.split('/').next().unwrap_or("");
            if !FIRST_PARTY_ACTION_ORGS.contains(&org) {
                push(ExtensionHint::new(
                    HintCategory::ActionReference,
                    format!("{slug}@{}", &cap[2]),
                    Some((idx + 1) as u32),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ArtifactKind;
    use std::path::PathBuf;

    fn artifact_with(kind: ArtifactKind, dir: &tempfile::TempDir, name: &str, content: &str) -> Artifact {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        Artifact::for_test(path, kind)
    }

    #[test]
    fn detects_k8s_crd_outside_core_groups() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = artifact_with(
            ArtifactKind::KubernetesManifest,
            &dir,
            "cert.yaml",
            "apiVersion: cert-manager.io/v1\nkind: Certificate\nmetadata:\n  name: x\n",
        );
        let hints = detect(&artifact);
        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].category, HintCategory::K8sCrd);
        assert_eq!(hints[0].identifier, "cert-manager.io/Certificate@v1");
    }

    #[test]
    fn core_resources_produce_no_hints() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = artifact_with(
            ArtifactKind::KubernetesManifest,
            &dir,
            "dep.yaml",
            "apiVersion: apps/v1\nkind: Deployment\n",
        );
        assert!(detect(&artifact).is_empty());
    }

    #[test]
    fn detects_third_party_action_reference() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = artifact_with(
            ArtifactKind::GithubWorkflow,
            &dir,
            "ci.yml",
            "jobs:\n  build:\n    steps:\n      - uses: someorg/cool-action@v2\n      - uses: actions/checkout@v4\n",
        );
        let hints = detect(&artifact);
        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].identifier, "someorg/cool-action@v2");
    }

    #[test]
    fn detects_unknown_terraform_provider() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = artifact_with(
            ArtifactKind::Terraform,
            &dir,
            "main.tf",
            "terraform {\n  required_providers {\n    datadog = {\n      source = \"DataDog/datadog\"\n    }\n  }\n}\n",
        );
        let hints = detect(&artifact);
        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].category, HintCategory::TerraformProvider);
    }
}
