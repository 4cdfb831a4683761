//! # Configuration & Policy
//!
//! Precedence, highest wins: CLI flags > environment variables > per-project
//! config file (`.validate.toml`) > [`types::Config::default`]. Each layer is
//! applied as a sparse overlay so a user can override a single key without
//! restating the rest.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::finding::{Finding, Location, Severity};

const CONFIG_FILE_NAME: &str = ".validate.toml";

pub fn local_config_path(project_path: &Path) -> PathBuf {
    project_path.join(CONFIG_FILE_NAME)
}

/// Overlay parsed from the environment. `None` fields mean "not set"; only
/// set fields are applied over the config-file/default layer.
#[derive(Default)]
pub struct EnvOverlay {
    pub severity_threshold: Option<Severity>,
    pub strict_mode: Option<bool>,
    pub output_format: Option<types::OutputFormat>,
    pub color: Option<types::ColorMode>,
    pub parallelism: Option<usize>,
    pub doc_lookup_enabled: Option<bool>,
}

impl EnvOverlay {
    pub fn from_process_env() -> Self {
        Self {
            severity_threshold: std::env::var("VALIDATE_SEVERITY_THRESHOLD")
                .ok()
                .and_then(|v| parse_severity(&v)),
            strict_mode: std::env::var("VALIDATE_STRICT").ok().and_then(|v| parse_bool(&v)),
            output_format: std::env::var("VALIDATE_OUTPUT_FORMAT").ok().and_then(|v| match v.as_str() {
                "json" => Some(types::OutputFormat::Json),
                "human" => Some(types::OutputFormat::Human),
                _ => None,
            }),
            color: std::env::var("VALIDATE_COLOR").ok().and_then(|v| match v.as_str() {
                "always" => Some(types::ColorMode::Always),
                "never" => Some(types::ColorMode::Never),
                "auto" => Some(types::ColorMode::Auto),
                _ => None,
            }),
            parallelism: std::env::var("VALIDATE_PARALLELISM")
                .ok()
                .and_then(|v| v.parse().ok()),
            doc_lookup_enabled: std::env::var("VALIDATE_DOC_LOOKUP").ok().and_then(|v| parse_bool(&v)),
        }
    }

    fn apply(&self, config: &mut types::Config) {
        if let Some(v) = self.severity_threshold {
            config.severity_threshold = v;
        }
        if let Some(v) = self.strict_mode {
            config.strict_mode = v;
        }
        if let Some(v) = self.output_format {
            config.output_format = v;
        }
        if let Some(v) = self.color {
            config.color = v;
        }
        if let Some(v) = self.parallelism {
            config.parallelism = v;
        }
        if let Some(v) = self.doc_lookup_enabled {
            config.doc_lookup_enabled = v;
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_severity(s: &str) -> Option<Severity> {
    match s.to_ascii_lowercase().as_str() {
        "info" => Some(Severity::Info),
        "warning" => Some(Severity::Warning),
        "error" => Some(Severity::Error),
        "fatal" => Some(Severity::Fatal),
        _ => None,
    }
}

/// Result of loading config: the merged config plus any informational
/// findings produced along the way (unknown keys in the project file).
pub struct LoadedConfig {
    pub config: types::Config,
    pub findings: Vec<Finding>,
}

/// Load the project config file (if present), overlay environment variables,
/// and fall back to defaults for anything neither layer sets. CLI flags are
/// applied by the caller afterward, since they're parsed by `clap` before
/// this function runs.
pub fn load_config(project_path: &Path) -> Result<LoadedConfig> {
    load_config_from(project_path, None)
}

/// Same as [`load_config`], but `--config <file>` on the command line takes
/// precedence over the project's `.validate.toml` when given, per the §4.9
/// precedence order (CLI > env > per-project file > defaults) — an explicit
/// `--config` is itself a CLI-level choice of *which* file to read.
pub fn load_config_from(project_path: &Path, explicit_file: Option<&Path>) -> Result<LoadedConfig> {
    let mut config = types::Config::default();
    let mut findings = Vec::new();

    let file_path = match explicit_file {
        Some(path) => path.to_path_buf(),
        None => local_config_path(project_path),
    };
    if explicit_file.is_some() && !file_path.exists() {
        return Err(ConfigError::Io {
            path: file_path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
        }
        .into());
    }
    if file_path.exists() {
        let content = fs::read_to_string(&file_path).map_err(|source| ConfigError::Io {
            path: file_path.clone(),
            source,
        })?;
        findings.extend(unknown_key_findings(&content, &file_path));
        config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: file_path.clone(),
            source,
        })?;
    }

    EnvOverlay::from_process_env().apply(&mut config);

    Ok(LoadedConfig { config, findings })
}

/// Diff the raw TOML's top-level keys against the known field set and emit an
/// info Finding per unrecognized key, rather than letting serde silently drop
/// them or hard-failing the whole run over a typo.
fn unknown_key_findings(content: &str, file_path: &Path) -> Vec<Finding> {
    const KNOWN_KEYS: &[&str] = &[
        "analyzers_enabled",
        "severity_threshold",
        "strict_mode",
        "output_format",
        "color",
        "parallelism",
        "timeout_per_tool_seconds",
        "doc_lookup_enabled",
        "doc_lookup_timeout_seconds",
        "venv_cache",
        "skip_if_tool_missing",
    ];

    let Ok(toml::Value::Table(table)) = content.parse::<toml::Value>() else {
        return Vec::new();
    };

    table
        .keys()
        .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
        .map(|key| Finding {
            id: "CORE-UNKNOWN-CONFIG-KEY".to_string(),
            severity: Severity::Info,
            message: format!("unknown configuration key '{key}' ignored"),
            location: Location::new(file_path),
            analyzer: "config".to_string(),
            tool: None,
            suggestion: Some(format!(
                "remove '{key}' or check for a typo against the supported keys"
            )),
            references: vec![],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn explicit_config_file_overrides_the_project_file() {
        let dir = tempdir().unwrap();
        fs::write(local_config_path(dir.path()), "strict_mode = false\n").unwrap();
        let explicit = dir.path().join("other.toml");
        fs::write(&explicit, "strict_mode = true\n").unwrap();

        let loaded = load_config_from(dir.path(), Some(&explicit)).unwrap();
        assert!(loaded.config.strict_mode);
    }

    #[test]
    fn a_missing_explicit_config_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist.toml");
        let err = load_config_from(dir.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, crate::error::EngineError::Config(ConfigError::Io { .. })));
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let loaded = load_config(dir.path()).unwrap();
        assert_eq!(loaded.config, types::Config::default());
        assert!(loaded.findings.is_empty());
    }

    #[test]
    fn project_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            local_config_path(dir.path()),
            "strict_mode = true\nparallelism = 2\n",
        )
        .unwrap();
        let loaded = load_config(dir.path()).unwrap();
        assert!(loaded.config.strict_mode);
        assert_eq!(loaded.config.parallelism, 2);
    }

    #[test]
    fn unknown_key_produces_info_finding_not_error() {
        let dir = tempdir().unwrap();
        fs::write(local_config_path(dir.path()), "strict_mode = true\nfoo_bar = 1\n").unwrap();
        let loaded = load_config(dir.path()).unwrap();
        assert_eq!(loaded.findings.len(), 1);
        assert_eq!(loaded.findings[0].id, "CORE-UNKNOWN-CONFIG-KEY");
        assert_eq!(loaded.findings[0].severity, Severity::Info);
    }

    #[test]
    fn env_overlay_applies_over_file() {
        let dir = tempdir().unwrap();
        fs::write(local_config_path(dir.path()), "strict_mode = false\n").unwrap();
        std::env::set_var("VALIDATE_STRICT", "true");
        let loaded = load_config(dir.path()).unwrap();
        std::env::remove_var("VALIDATE_STRICT");
        assert!(loaded.config.strict_mode);
    }
}
