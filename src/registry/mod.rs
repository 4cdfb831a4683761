//! # Tool Registry & Provisioner
//!
//! Resolves a logical tool name (`"shellcheck"`, `"tflint"`, `"checkov"`, ...) to
//! a usable executable. Resolution order:
//!
//! 1. `TOOL_<NAME>_PATH` environment override (name upper-cased, `-` -> `_`)
//! 2. `PATH` lookup
//! 3. a previously-provisioned ephemeral virtualenv for this tool
//! 4. on-demand virtualenv provisioning, for pip-installable tools only
//!
//! Handles are reference-counted: the orchestrator checks one out per artifact
//! that needs it and releases it when the analyzer DAG node finishes, so the
//! registry knows when it is safe to tear down an ephemeral venv.

mod audit;
mod pip;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};
use crate::runner;

pub use audit::{ToolAuditEntry, ToolAuditLog};

/// Where a resolved tool's executable came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallationSource {
    EnvOverride,
    SystemPath,
    CachedVenv,
    EphemeralVenv,
}

/// Tools pip-installable into an ephemeral venv when not already on PATH.
/// This is exactly the set §4.1 calls out as "known to be pip-installable";
/// anything else that fails PATH resolution is simply unavailable, never
/// provisioned. `gitlab-ci-local` is npm-installable, not pip, and is listed
/// only so callers get a clear `NotProvisionable` rather than a silent miss.
const PIP_PROVISIONABLE: &[(&str, &str)] = &[
    ("yamllint", "yamllint"),
    ("mbake", "mbake"),
    ("checkov", "checkov"),
    ("shellcheck-py", "shellcheck-py"),
    ("python-hcl2", "python-hcl2"),
];

const NOT_PROVISIONABLE: &[&str] = &["gitlab-ci-local"];

fn pip_package_for(tool: &str) -> Option<&'static str> {
    PIP_PROVISIONABLE
        .iter()
        .find(|(name, _)| *name == tool)
        .map(|(_, pkg)| *pkg)
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedTool {
    pub(crate) path: PathBuf,
    pub(crate) version: Option<String>,
    pub(crate) source: InstallationSource,
    pub(crate) resolved_at: SystemTime,
    /// The venv root to delete once the last handle referencing it drops.
    /// `None` for env-override/PATH resolutions and for a cached (reused)
    /// venv, which outlives any single run by design.
    pub(crate) teardown_dir: Option<PathBuf>,
}

/// A checked-out handle to a resolved tool. Dropping the last outstanding
/// handle for an ephemeral tool removes its venv directory; a tool resolved
/// from `PATH`, an env override, or a reused cache is left untouched.
pub struct ToolHandle {
    pub name: String,
    pub path: PathBuf,
    pub version: Option<String>,
    pub source: InstallationSource,
    refcount: Arc<AtomicUsize>,
    teardown_dir: Option<PathBuf>,
}

impl ToolHandle {
    pub fn argv0(&self) -> &str {
        self.path.to_str().unwrap_or(&self.name)
    }

    /// Current number of outstanding handles for this tool, including this one.
    pub fn ref_count(&self) -> usize {
        self.refcount.load(Ordering::SeqCst)
    }
}

impl Drop for ToolHandle {
    fn drop(&mut self) {
        // `fetch_sub` returns the value from *before* the decrement; 1 means
        // this was the last outstanding handle.
        let was_last = self.refcount.fetch_sub(1, Ordering::SeqCst) == 1;
        if was_last {
            if let Some(dir) = &self.teardown_dir {
                if let Err(err) = std::fs::remove_dir_all(dir) {
                    log::warn!("failed to remove ephemeral venv at {}: {err}", dir.display());
                }
            }
        }
    }
}

pub struct ToolRegistryConfig {
    pub venv_cache_dir: PathBuf,
    pub cache_ttl: Duration,
    /// Mirrors `Config.venv_cache`: reuse a persistent venv under
    /// `venv_cache_dir` across runs rather than provisioning a fresh,
    /// uniquely-named ephemeral one per run.
    pub reuse_cache: bool,
}

impl Default for ToolRegistryConfig {
    fn default() -> Self {
        let root = std::env::var_os("CACHE_DIR")
            .map(PathBuf::from)
            .or_else(dirs::cache_dir)
            .unwrap_or_else(std::env::temp_dir);
        Self {
            venv_cache_dir: root.join("devops-validate").join("venvs"),
            cache_ttl: Duration::from_secs(300),
            reuse_cache: false,
        }
    }
}

pub struct ToolRegistry {
    config: ToolRegistryConfig,
    resolved: Mutex<HashMap<String, ResolvedTool>>,
    refcounts: Mutex<HashMap<String, Arc<AtomicUsize>>>,
    /// Tools whose cached venv has already been destroyed-and-recreated once
    /// this run; §4.1's "at most once per run" invariant for a corrupted venv.
    rebuilt_once: Mutex<std::collections::HashSet<String>>,
    audit: ToolAuditLog,
}

impl ToolRegistry {
    pub fn new(config: ToolRegistryConfig) -> Self {
        Self {
            config,
            resolved: Mutex::new(HashMap::new()),
            refcounts: Mutex::new(HashMap::new()),
            rebuilt_once: Mutex::new(std::collections::HashSet::new()),
            audit: ToolAuditLog::default(),
        }
    }

    pub fn audit_log(&self) -> &ToolAuditLog {
        &self.audit
    }

    /// Resolve `name` to a usable tool, provisioning it ephemerally if it is
    /// pip-installable and not otherwise found. Returns `ToolError::Unavailable`
    /// if no resolution path succeeds.
    pub fn resolve(&self, name: &str) -> Result<ToolHandle> {
        if let Some(cached) = self.cached_if_fresh(name) {
            return Ok(self.checkout(name, cached));
        }

        if let Some(resolved) = self.try_env_override(name) {
            self.audit.record(name, "env-override", true);
            self.store(name, resolved.clone());
            return Ok(self.checkout(name, resolved));
        }

        if let Some(resolved) = self.try_path(name) {
            self.audit.record(name, "path", true);
            self.store(name, resolved.clone());
            return Ok(self.checkout(name, resolved));
        }

        if self.config.reuse_cache {
            if let Some(resolved) = self.try_cached_venv(name) {
                self.audit.record(name, "cached-venv", true);
                self.store(name, resolved.clone());
                return Ok(self.checkout(name, resolved));
            }
        }

        if let Some(package) = pip_package_for(name) {
            let dir = if self.config.reuse_cache {
                pip::venv_dir(&self.config.venv_cache_dir, name)
            } else {
                pip::unique_ephemeral_dir(name)
            };
            match pip::provision(&dir, name, package) {
                Ok(provisioned) => {
                    let resolved = ResolvedTool {
                        path: provisioned.path,
                        version: provisioned.version,
                        source: InstallationSource::EphemeralVenv,
                        resolved_at: SystemTime::now(),
                        teardown_dir: (!self.config.reuse_cache).then(|| dir.clone()),
                    };
                    self.audit.record(name, "ephemeral-venv", true);
                    // A reused venv is still keyed/cached in-memory for this
                    // run, but not written to `venv_cache_dir` state beyond
                    // what `provision` already did; an ephemeral one is never
                    // reused across a second `resolve` in *this* process
                    // either once it tears down, but `cached_if_fresh` lets
                    // concurrent resolutions within the run share it.
                    self.store(name, resolved.clone());
                    return Ok(self.checkout(name, resolved));
                }
                Err(message) => {
                    self.audit.record(name, "ephemeral-venv", false);
                    return Err(ToolError::ProvisioningFailed {
                        tool: name.to_string(),
                        message,
                    }
                    .into());
                }
            }
        }

        if NOT_PROVISIONABLE.contains(&name) {
            self.audit.record(name, "not-provisionable", false);
            return Err(ToolError::NotProvisionable(name.to_string()).into());
        }

        self.audit.record(name, "exhausted", false);
        Err(ToolError::Unavailable(name.to_string()).into())
    }

    fn cached_if_fresh(&self, name: &str) -> Option<ResolvedTool> {
        let resolved = self.resolved.lock().unwrap();
        resolved.get(name).and_then(|r| {
            if r.resolved_at.elapsed().unwrap_or(Duration::MAX) < self.config.cache_ttl {
                Some(r.clone())
            } else {
                None
            }
        })
    }

    fn store(&self, name: &str, resolved: ResolvedTool) {
        self.resolved
            .lock()
            .unwrap()
            .insert(name.to_string(), resolved);
    }

    fn checkout(&self, name: &str, resolved: ResolvedTool) -> ToolHandle {
        let mut refcounts = self.refcounts.lock().unwrap();
        let counter = refcounts
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(AtomicUsize::new(0)))
            .clone();
        counter.fetch_add(1, Ordering::SeqCst);
        ToolHandle {
            name: name.to_string(),
            path: resolved.path,
            version: resolved.version,
            source: resolved.source,
            refcount: counter,
            teardown_dir: resolved.teardown_dir,
        }
    }

    fn try_env_override(&self, name: &str) -> Option<ResolvedTool> {
        let env_key = format!(
            "TOOL_{}_PATH",
            name.to_uppercase().replace('-', "_")
        );
        let path = PathBuf::from(std::env::var(env_key).ok()?);
        if !path.exists() {
            return None;
        }
        Some(ResolvedTool {
            version: probe_version(&path, name),
            path,
            source: InstallationSource::EnvOverride,
            resolved_at: SystemTime::now(),
            teardown_dir: None,
        })
    }

    fn try_path(&self, name: &str) -> Option<ResolvedTool> {
        if !runner::is_command_available(name) {
            return None;
        }
        Some(ResolvedTool {
            path: PathBuf::from(name),
            version: probe_version(&PathBuf::from(name), name),
            source: InstallationSource::SystemPath,
            resolved_at: SystemTime::now(),
            teardown_dir: None,
        })
    }

    /// Looks up a persistent, cross-run venv under `venv_cache_dir`. A venv
    /// whose binary exists but whose `.ready` sentinel is missing is
    /// considered corrupted (an interrupted install): it is destroyed and,
    /// at most once per run per tool, the caller falls through to
    /// re-provisioning rather than handing back a binary that may not work.
    fn try_cached_venv(&self, name: &str) -> Option<ResolvedTool> {
        let dir = pip::venv_dir(&self.config.venv_cache_dir, name);
        let bin = pip::venv_bin_path(&self.config.venv_cache_dir, name);
        if !bin.exists() {
            return None;
        }
        if !pip::is_ready(&dir) {
            let mut rebuilt = self.rebuilt_once.lock().unwrap();
            if rebuilt.insert(name.to_string()) {
                log::warn!("cached venv for '{name}' is missing its .ready sentinel; destroying and re-provisioning");
                let _ = std::fs::remove_dir_all(&dir);
            }
            return None;
        }
        Some(ResolvedTool {
            version: probe_version(&bin, name),
            path: bin,
            source: InstallationSource::CachedVenv,
            resolved_at: SystemTime::now(),
            teardown_dir: None,
        })
    }
}

fn probe_version(path: &std::path::Path, name: &str) -> Option<String> {
    let output = std::process::Command::new(path)
        .arg("--version")
        .output()
        .ok()?;
    let text = if output.status.success() {
        String::from_utf8_lossy(&output.stdout).into_owned()
    } else {
        String::from_utf8_lossy(&output.stderr).into_owned()
    };
    extract_version(&text, name)
}

fn extract_version(text: &str, _name: &str) -> Option<String> {
    let re = regex::Regex::new(r"\b(\d+\.\d+(?:\.\d+)?)\b").ok()?;
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_a_tool_already_on_path() {
        let registry = ToolRegistry::new(ToolRegistryConfig::default());
        let handle = registry.resolve("echo").expect("echo is always on PATH");
        assert_eq!(handle.source, InstallationSource::SystemPath);
    }

    #[test]
    fn unknown_tool_is_unavailable() {
        let registry = ToolRegistry::new(ToolRegistryConfig::default());
        let err = registry.resolve("definitely-not-a-real-tool-xyz").unwrap_err();
        assert!(matches!(
            err,
            crate::error::EngineError::Tool(ToolError::Unavailable(_))
        ));
    }

    #[test]
    fn env_override_takes_precedence_over_path() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::env::set_var("TOOL_ECHO_PATH", tmp.path());
        let registry = ToolRegistry::new(ToolRegistryConfig::default());
        let handle = registry.resolve("echo").unwrap();
        assert_eq!(handle.source, InstallationSource::EnvOverride);
        std::env::remove_var("TOOL_ECHO_PATH");
    }

    #[test]
    fn ref_counting_tracks_checkouts() {
        let registry = ToolRegistry::new(ToolRegistryConfig::default());
        let first = registry.resolve("echo").unwrap();
        assert_eq!(first.ref_count(), 1);
        {
            let second = registry.resolve("echo").unwrap();
            assert_eq!(second.ref_count(), 2);
        }
        assert_eq!(first.ref_count(), 1);
    }

    #[test]
    fn dropping_the_last_handle_removes_its_ephemeral_dir() {
        let dir = std::env::temp_dir().join(format!(
            "devops-validate-test-ephemeral-{}",
            SystemTime::now().duration_since(std::time::UNIX_EPOCH).unwrap().as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        assert!(dir.exists());

        let registry = ToolRegistry::new(ToolRegistryConfig::default());
        let resolved = ResolvedTool {
            path: dir.join("tool"),
            version: None,
            source: InstallationSource::EphemeralVenv,
            resolved_at: SystemTime::now(),
            teardown_dir: Some(dir.clone()),
        };
        {
            let handle = registry.checkout("test-tool-ephemeral", resolved);
            assert_eq!(handle.ref_count(), 1);
            assert!(dir.exists());
        }
        assert!(!dir.exists(), "ephemeral dir should be removed once the last handle drops");
    }

    #[test]
    fn a_cached_venv_handle_leaves_its_dir_alone_on_drop() {
        let dir = std::env::temp_dir().join(format!(
            "devops-validate-test-cached-{}",
            SystemTime::now().duration_since(std::time::UNIX_EPOCH).unwrap().as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();

        let registry = ToolRegistry::new(ToolRegistryConfig::default());
        let resolved = ResolvedTool {
            path: dir.join("tool"),
            version: None,
            source: InstallationSource::CachedVenv,
            resolved_at: SystemTime::now(),
            teardown_dir: None,
        };
        drop(registry.checkout("test-tool-cached", resolved));
        assert!(dir.exists(), "a reused cache venv must survive the handle dropping");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn reuse_cache_off_is_the_default() {
        assert!(!ToolRegistryConfig::default().reuse_cache);
    }
}
