//! # Process Runner
//!
//! Every analyzer that shells out to an external tool (tflint, checkov, act,
//! kubectl, mbake, real shellcheck) does so through [`run`]. It centralizes
//! deadline enforcement, output buffering, and the soft-terminate/hard-kill
//! escalation so individual analyzers never touch `std::process` directly.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::{Result, RunnerError};

/// Hard cap on captured stdout/stderr per process. Output beyond this is
/// dropped, not buffered, so a runaway tool can't exhaust memory.
const MAX_BUFFER_BYTES: usize = 16 * 1024 * 1024;

/// Grace period between SIGTERM and SIGKILL once a deadline is hit.
const SOFT_TERMINATE_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct ProcessResult {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// `None` when the process was killed before it could exit, e.g. on timeout.
    pub exit_code: Option<i32>,
    pub timed_out: bool,
    pub wall_time: Duration,
    /// Set when `stdout` hit [`MAX_BUFFER_BYTES`] and further output was
    /// dropped rather than buffered.
    pub stdout_truncated: bool,
    pub stderr_truncated: bool,
}

impl ProcessResult {
    pub fn stdout_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    pub fn stderr_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Describes one invocation. Never raises on a non-zero exit code; a lint
/// tool reporting findings via its exit status is expected behavior, not a
/// runner-level error.
pub struct ProcessSpec<'a> {
    pub argv: &'a [&'a str],
    pub stdin: Option<&'a [u8]>,
    pub cwd: Option<&'a Path>,
    pub env: &'a [(&'a str, &'a str)],
    pub deadline: Duration,
}

/// Run a process to completion or until `deadline` elapses, whichever comes
/// first. On timeout the child is sent a soft-terminate signal, given
/// [`SOFT_TERMINATE_GRACE`] to exit, then hard-killed.
pub fn run(spec: ProcessSpec<'_>) -> Result<ProcessResult> {
    let Some((program, args)) = spec.argv.split_first() else {
        return Err(RunnerError::Spawn {
            command: String::new(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty argv"),
        }
        .into());
    };

    let start = Instant::now();
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(if spec.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(cwd) = spec.cwd {
        command.current_dir(cwd);
    }
    for (key, value) in spec.env {
        command.env(key, value);
    }

    let mut child = command.spawn().map_err(|source| RunnerError::Spawn {
        command: spec.argv.join(" "),
        source,
    })?;

    if let Some(input) = spec.stdin {
        if let Some(mut stdin) = child.stdin.take() {
            // A tool that never reads stdin (closed pipe) is not a runner
            // failure: ignore write errors and proceed to reap the child.
            let _ = stdin.write_all(input);
        }
    }

    let deadline = Instant::now() + spec.deadline;
    loop {
        if let Some(status) = child.try_wait().map_err(|source| RunnerError::Spawn {
            command: spec.argv.join(" "),
            source,
        })? {
            let mut stdout = Vec::new();
            let mut stderr = Vec::new();
            let stdout_truncated = child
                .stdout
                .take()
                .map(|mut out| read_bounded(&mut out, &mut stdout).unwrap_or(false))
                .unwrap_or(false);
            let stderr_truncated = child
                .stderr
                .take()
                .map(|mut err| read_bounded(&mut err, &mut stderr).unwrap_or(false))
                .unwrap_or(false);
            return Ok(ProcessResult {
                stdout,
                stderr,
                exit_code: status.code(),
                timed_out: false,
                wall_time: start.elapsed(),
                stdout_truncated,
                stderr_truncated,
            });
        }

        if Instant::now() >= deadline {
            terminate_with_escalation(&mut child, spec.argv.join(" "))?;
            let mut stdout = Vec::new();
            let mut stderr = Vec::new();
            let stdout_truncated = child
                .stdout
                .take()
                .map(|mut out| read_bounded(&mut out, &mut stdout).unwrap_or(false))
                .unwrap_or(false);
            let stderr_truncated = child
                .stderr
                .take()
                .map(|mut err| read_bounded(&mut err, &mut stderr).unwrap_or(false))
                .unwrap_or(false);
            return Ok(ProcessResult {
                stdout,
                stderr,
                exit_code: None,
                timed_out: true,
                wall_time: start.elapsed(),
                stdout_truncated,
                stderr_truncated,
            });
        }

        std::thread::sleep(Duration::from_millis(20));
    }
}

fn terminate_with_escalation(child: &mut std::process::Child, command: String) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        let pid = child.id();
        unsafe {
            libc_kill(pid as i32, 15 /* SIGTERM */);
        }
        let soft_deadline = Instant::now() + SOFT_TERMINATE_GRACE;
        while Instant::now() < soft_deadline {
            if let Ok(Some(_)) = child.try_wait() {
                return Ok(());
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        if child.kill().is_err() {
            return Err(RunnerError::KillFailed { command, pid }.into());
        }
        let _ = child.wait();
        let _ = ExitStatusExt::into_raw; // keep the unix-only import meaningful
        Ok(())
    }
    #[cfg(not(unix))]
    {
        let pid = child.id();
        if child.kill().is_err() {
            return Err(RunnerError::KillFailed { command, pid }.into());
        }
        let _ = child.wait();
        Ok(())
    }
}

#[cfg(unix)]
unsafe fn libc_kill(pid: i32, sig: i32) {
    extern "C" {
        fn kill(pid: i32, sig: i32) -> i32;
    }
    let _ = unsafe { kill(pid, sig) };
}

/// Reads into `buf` up to [`MAX_BUFFER_BYTES`], returning whether the reader
/// still had unread output left when the cap was hit.
fn read_bounded<R: std::io::Read>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<bool> {
    let mut chunk = [0u8; 8192];
    loop {
        if buf.len() >= MAX_BUFFER_BYTES {
            // Drain one more read to tell a true cap-hit from an exact-fit read.
            let n = reader.read(&mut chunk)?;
            return Ok(n > 0);
        }
        let n = reader.read(&mut chunk)?;
        if n == 0 {
            return Ok(false);
        }
        let remaining = MAX_BUFFER_BYTES - buf.len();
        buf.extend_from_slice(&chunk[..n.min(remaining)]);
    }
}

/// Check if a command responds to `--version` at all, without enforcing a
/// deadline. Used by the tool registry's PATH probe, not by analyzers.
pub fn is_command_available(cmd: &str) -> bool {
    Command::new(cmd).arg("--version").output().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_a_trivial_command() {
        let result = run(ProcessSpec {
            argv: &["echo", "hello"],
            stdin: None,
            cwd: None,
            env: &[],
            deadline: Duration::from_secs(5),
        })
        .unwrap();
        assert!(result.success());
        assert_eq!(result.stdout_str().trim(), "hello");
        assert!(!result.timed_out);
    }

    #[test]
    fn enforces_deadline_on_a_sleeping_command() {
        let result = run(ProcessSpec {
            argv: &["sleep", "5"],
            stdin: None,
            cwd: None,
            env: &[],
            deadline: Duration::from_millis(100),
        })
        .unwrap();
        assert!(result.timed_out);
        assert!(result.exit_code.is_none());
        assert!(result.wall_time < Duration::from_secs(2));
    }

    #[test]
    fn non_zero_exit_is_not_a_runner_error() {
        let result = run(ProcessSpec {
            argv: &["false"],
            stdin: None,
            cwd: None,
            env: &[],
            deadline: Duration::from_secs(5),
        })
        .unwrap();
        assert!(!result.success());
        assert_eq!(result.exit_code, Some(1));
    }

    #[test]
    fn pipes_stdin_through() {
        let result = run(ProcessSpec {
            argv: &["cat"],
            stdin: Some(b"from stdin"),
            cwd: None,
            env: &[],
            deadline: Duration::from_secs(5),
        })
        .unwrap();
        assert_eq!(result.stdout_str(), "from stdin");
    }
}
