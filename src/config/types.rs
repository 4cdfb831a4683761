use serde::{Deserialize, Serialize};

use crate::finding::Severity;

/// The full set of tunables, after CLI flags, environment variables, and the
/// per-project config file have all been layered on top of [`Config::default`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub analyzers_enabled: Vec<String>,
    pub severity_threshold: Severity,
    pub strict_mode: bool,
    pub output_format: OutputFormat,
    pub color: ColorMode,
    pub parallelism: usize,
    pub timeout_per_tool_seconds: u64,
    pub doc_lookup_enabled: bool,
    pub doc_lookup_timeout_seconds: u64,
    /// If true, reuse a venv cached under `CACHE_DIR` across runs, keyed by
    /// `(tool, python-minor-version)`. If false (the default), a pip-installed
    /// tool gets a fresh venv in a uniquely-named temp directory that is torn
    /// down when the last [`crate::registry::ToolHandle`] referencing it drops.
    pub venv_cache: bool,
    pub skip_if_tool_missing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

/// Every analyzer known to the registry, used as the default for
/// `analyzers_enabled` and to validate the value a user supplies.
pub const ALL_ANALYZERS: &[&str] = &[
    "yaml-lint",
    "yaml-schema",
    "shell-lint",
    "docker-lint",
    "tf-lint",
    "tf-security",
    "helm-lint",
    "k8s-schema",
    "k8s-dry-run",
    "make-lint",
    "jenkins-lint",
    "workflow-local-run",
    "action-versions",
    "secret-scan",
    "core-best-practices",
];

impl Default for Config {
    fn default() -> Self {
        Self {
            analyzers_enabled: ALL_ANALYZERS.iter().map(|s| s.to_string()).collect(),
            severity_threshold: Severity::Warning,
            strict_mode: false,
            output_format: OutputFormat::Human,
            color: ColorMode::Auto,
            parallelism: num_cpus::get().max(1),
            timeout_per_tool_seconds: 120,
            doc_lookup_enabled: true,
            doc_lookup_timeout_seconds: 10,
            venv_cache: false,
            skip_if_tool_missing: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_every_known_analyzer() {
        let config = Config::default();
        assert_eq!(config.analyzers_enabled.len(), ALL_ANALYZERS.len());
    }
}
