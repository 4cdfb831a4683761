//! Ephemeral virtualenv provisioning for pip-installable tools.
//!
//! Grounded on the same "try several invocation styles, don't fail the whole
//! run if unavailable" spirit as the teacher's `pip-audit` bootstrap, but
//! isolated into a per-tool venv under the cache directory rather than a
//! user-wide `pip install --user`, so provisioning one tool can never shadow
//! or conflict with another.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

/// Name of the zero-byte sentinel a fully-provisioned venv carries (§6:
/// "Persisted state layout"). Its absence means re-provisioning is required,
/// whether because nothing is there yet or because a prior install was
/// interrupted partway through.
const READY_SENTINEL: &str = ".ready";

pub fn venv_dir(cache_dir: &Path, tool: &str) -> PathBuf {
    cache_dir.join(format!("{tool}-py{}", python_minor_version()))
}

/// A directory for a one-off venv that belongs to a single run: uniquely
/// named so two concurrent runs provisioning the same tool never collide
/// (§5, "Temporary directories are uniquely named").
pub fn unique_ephemeral_dir(tool: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("devops-validate-{tool}-{}-{nanos}", std::process::id()))
}

pub fn venv_bin_path(cache_dir: &Path, tool: &str) -> PathBuf {
    bin_path_in(&venv_dir(cache_dir, tool), tool)
}

/// Whether `dir` (a venv root, not `cache_dir`) carries the `.ready`
/// sentinel written at the end of a successful [`provision`].
pub fn is_ready(dir: &Path) -> bool {
    dir.join(READY_SENTINEL).is_file()
}

pub struct Provisioned {
    pub path: PathBuf,
    pub version: Option<String>,
}

/// Create a venv at `dir` and pip-install `package` into it, writing the
/// `.ready` sentinel only once the binary is confirmed present. `dir` is
/// either a persistent `venv_dir(...)` (cache reuse) or a
/// [`unique_ephemeral_dir`] (one-off); the caller decides which.
pub fn provision(dir: &Path, tool: &str, package: &str) -> Result<Provisioned, String> {
    if let Some(parent) = dir.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    let python = find_python().ok_or_else(|| "no python3/python interpreter found".to_string())?;

    let venv_status = Command::new(&python)
        .args(["-m", "venv"])
        .arg(dir)
        .status()
        .map_err(|e| format!("failed to spawn venv creation: {e}"))?;
    if !venv_status.success() {
        return Err(format!("`{python} -m venv {}` exited non-zero", dir.display()));
    }

    let pip = pip_bin_path(dir);
    let install_status = Command::new(&pip)
        .args(["install", "--quiet", package])
        .status()
        .map_err(|e| format!("failed to spawn pip install: {e}"))?;
    if !install_status.success() {
        return Err(format!("`pip install {package}` exited non-zero"));
    }

    let bin = bin_path_in(dir, tool);
    if !bin.exists() {
        return Err(format!(
            "pip install succeeded but {} was not produced",
            bin.display()
        ));
    }

    std::fs::write(dir.join(READY_SENTINEL), []).map_err(|e| e.to_string())?;

    Ok(Provisioned {
        path: bin,
        version: None,
    })
}

fn bin_path_in(dir: &Path, tool: &str) -> PathBuf {
    #[cfg(windows)]
    {
        dir.join("Scripts").join(format!("{tool}.exe"))
    }
    #[cfg(not(windows))]
    {
        dir.join("bin").join(tool)
    }
}

fn python_minor_version() -> String {
    for candidate in ["python3", "python"] {
        if let Ok(output) = Command::new(candidate).arg("--version").output() {
            let text = String::from_utf8_lossy(&output.stdout).into_owned()
                + &String::from_utf8_lossy(&output.stderr);
            if let Some(v) = parse_minor_version(&text) {
                return v;
            }
        }
    }
    "unknown".to_string()
}

fn parse_minor_version(text: &str) -> Option<String> {
    let digits = text.split_whitespace().find_map(|tok| {
        let mut parts = tok.split('.');
        let major = parts.next()?.parse::<u32>().ok()?;
        let minor = parts.next()?.parse::<u32>().ok()?;
        Some(format!("{major}.{minor}"))
    });
    digits
}

fn pip_bin_path(venv_dir: &Path) -> PathBuf {
    #[cfg(windows)]
    {
        venv_dir.join("Scripts").join("pip.exe")
    }
    #[cfg(not(windows))]
    {
        venv_dir.join("bin").join("pip")
    }
}

fn find_python() -> Option<String> {
    for candidate in ["python3", "python"] {
        if crate::runner::is_command_available(candidate) {
            return Some(candidate.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_ephemeral_dirs_never_collide() {
        let a = unique_ephemeral_dir("yamllint");
        let b = unique_ephemeral_dir("yamllint");
        assert_ne!(a, b);
    }

    #[test]
    fn a_venv_without_the_sentinel_is_not_ready() {
        let dir = std::env::temp_dir().join(format!(
            "devops-validate-test-sentinel-{}",
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        assert!(!is_ready(&dir));
        std::fs::write(dir.join(READY_SENTINEL), []).unwrap();
        assert!(is_ready(&dir));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn parses_minor_version_from_python_dash_dash_version_output() {
        assert_eq!(parse_minor_version("Python 3.11.4"), Some("3.11".to_string()));
        assert_eq!(parse_minor_version("nonsense"), None);
    }
}
