//! Ordered classification rules. Filename- and extension-based rules run
//! first since they're unambiguous and cheap; content sniffing is reserved
//! for the `.yml`/`.yaml` family (and a handful of extensionless/INI-like
//! files) where the extension alone is not enough.

use std::path::Path;

use super::ArtifactKind;

const IGNORED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "target",
    "vendor",
    ".terragrunt-cache",
    ".terraform",
];

pub fn is_ignored_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| IGNORED_DIRS.contains(&name))
        .unwrap_or(false)
}

/// Returns `Ok(Some(kind))` for a recognized artifact, `Ok(None)` for a file
/// with no applicable rule (skipped silently), or `Err(message)` when the
/// file sits in a location that implies a specific format but its contents
/// could not even be read as text.
pub fn classify_file(path: &Path) -> Result<Option<ArtifactKind>, String> {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    if file_name == "Dockerfile" || file_name.starts_with("Dockerfile.") || file_name.ends_with(".Dockerfile") {
        return Ok(Some(ArtifactKind::Dockerfile));
    }
    if file_name == "Makefile" || file_name == "makefile" || file_name == "GNUmakefile" || extension == "mk" {
        return Ok(Some(ArtifactKind::Makefile));
    }
    if file_name == "Jenkinsfile" || file_name.ends_with(".Jenkinsfile") {
        let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
        return Ok(Some(if content.contains("pipeline {") || content.contains("pipeline{") {
            ArtifactKind::JenkinsfileDeclarative
        } else {
            ArtifactKind::JenkinsfileScripted
        }));
    }
    if extension == "groovy" {
        // Only a recognized shared-library step is force-classified; an
        // ordinary Groovy source file (e.g. a Gradle build script) matches no
        // rule and falls through to `Ok(None)`.
        if is_shared_lib_groovy(path) {
            return Ok(Some(ArtifactKind::GroovySharedLib));
        }
        return Ok(None);
    }
    if extension == "sh" || extension == "bash" || has_shell_shebang(path) {
        return Ok(Some(ArtifactKind::ShellScript));
    }
    if extension == "hcl" {
        return Ok(Some(if is_in_terragrunt_context(path) {
            ArtifactKind::Terragrunt
        } else {
            ArtifactKind::Terraform
        }));
    }
    if extension == "tf" || extension == "tfvars" {
        return Ok(Some(ArtifactKind::Terraform));
    }
    if file_name == "terragrunt.hcl" {
        return Ok(Some(ArtifactKind::Terragrunt));
    }

    if extension == "yml" || extension == "yaml" {
        return classify_yaml(path);
    }

    if looks_like_ini(&read_to_string_opt(path)) {
        return Ok(Some(ArtifactKind::FluentBit));
    }

    Ok(None)
}

fn read_to_string_opt(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_default()
}

/// A `.groovy` file under `vars/` or `src/` exposing a `call(` entry point is
/// a Jenkins shared-library step rather than a pipeline definition (§4.4
/// rule 4).
fn is_shared_lib_groovy(path: &Path) -> bool {
    let under_lib_dir = path
        .ancestors()
        .any(|p| matches!(p.file_name().and_then(|n| n.to_str()), Some("vars") | Some("src")));
    if !under_lib_dir {
        return false;
    }
    std::fs::read_to_string(path)
        .map(|content| content.contains("def call(") || content.contains("@NonCPS"))
        .unwrap_or(false)
}

/// Rule 5's extensionless branch: a file whose first line is a `#!` shebang
/// naming `bash` or `sh`. Only the first line is read, never the whole file.
fn has_shell_shebang(path: &Path) -> bool {
    let Ok(file) = std::fs::File::open(path) else {
        return false;
    };
    use std::io::BufRead;
    let mut first_line = String::new();
    if std::io::BufReader::new(file).read_line(&mut first_line).is_err() {
        return false;
    }
    let first_line = first_line.trim_end();
    first_line.starts_with("#!") && (first_line.contains("bash") || first_line.ends_with("sh"))
}

fn is_in_terragrunt_context(path: &Path) -> bool {
    path.ancestors()
        .any(|p| p.file_name().and_then(|n| n.to_str()) == Some("terragrunt.hcl"))
        || path_contains(path, "terragrunt")
}

fn path_contains(path: &Path, needle: &str) -> bool {
    path.to_string_lossy().to_lowercase().contains(needle)
}

fn classify_yaml(path: &Path) -> Result<Option<ArtifactKind>, String> {
    let path_str = path.to_string_lossy().replace('\\', "/");
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;

    if path_str.contains("/.github/workflows/") {
        return Ok(Some(ArtifactKind::GithubWorkflow));
    }
    if path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n == ".gitlab-ci.yml" || n == ".gitlab-ci.yaml")
        .unwrap_or(false)
        || looks_like_gitlab_ci(&content)
    {
        return Ok(Some(ArtifactKind::GitlabCi));
    }
    if path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n == "azure-pipelines.yml" || n == "azure-pipelines.yaml")
        .unwrap_or(false)
        || looks_like_azure_pipelines(&content)
    {
        return Ok(Some(ArtifactKind::AzurePipelines));
    }
    if looks_like_kubernetes_manifest(&content) {
        return Ok(Some(ArtifactKind::KubernetesManifest));
    }
    if looks_like_ini(&content) {
        return Ok(Some(ArtifactKind::FluentBit));
    }
    if looks_like_loki_config(&content) {
        return Ok(Some(ArtifactKind::LokiConfig));
    }

    Ok(Some(ArtifactKind::GenericYaml))
}

fn looks_like_kubernetes_manifest(content: &str) -> bool {
    content.contains("apiVersion:") && content.contains("kind:")
}

/// Rule 7b: a top-level `stages:` whose jobs each carry their own `script:`
/// key directly (GitLab CI's job shape), distinguished from Azure's nested
/// `jobs:` by the *absence* of a `jobs:` key — GitLab never nests jobs under
/// stages the way Azure does.
fn looks_like_gitlab_ci(content: &str) -> bool {
    content.contains("stages:") && content.contains("script:") && !content.contains("jobs:")
}

/// Rule 7c: a top-level `stages:` with jobs nested under `jobs:`, carrying
/// `pool:` or `trigger:` — Azure Pipelines' distinguishing shape.
fn looks_like_azure_pipelines(content: &str) -> bool {
    content.contains("stages:")
        && content.contains("jobs:")
        && (content.contains("pool:") || content.contains("trigger:"))
}

/// Rules 7f/8: Fluent Bit's INI-style `[INPUT]`/`[OUTPUT]`/`[SERVICE]`
/// section markers, regardless of whether the file carries a `.yml`
/// extension or none at all.
fn looks_like_ini(content: &str) -> bool {
    const SECTIONS: &[&str] = &["[INPUT]", "[OUTPUT]", "[SERVICE]"];
    SECTIONS.iter().any(|section| content.contains(section))
}

/// Rule 9: both `schema_config:` and `storage_config:` must be present, not
/// merely one of a larger set of Loki-ish keys.
fn looks_like_loki_config(content: &str) -> bool {
    content.contains("schema_config:") && content.contains("storage_config:")
}
