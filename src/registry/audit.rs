//! Records every tool resolution attempt for the Reporter's "environment"
//! section and for diagnosing `--check-versions` output.

use std::sync::Mutex;
use std::time::SystemTime;

#[derive(Debug, Clone)]
pub struct ToolAuditEntry {
    pub tool: String,
    pub strategy: &'static str,
    pub succeeded: bool,
    pub at: SystemTime,
}

#[derive(Default)]
pub struct ToolAuditLog {
    entries: Mutex<Vec<ToolAuditEntry>>,
}

impl ToolAuditLog {
    pub fn record(&self, tool: &str, strategy: &'static str, succeeded: bool) {
        log::debug!(
            "tool resolution: {} via {} -> {}",
            tool,
            strategy,
            if succeeded { "ok" } else { "failed" }
        );
        self.entries.lock().unwrap().push(ToolAuditEntry {
            tool: tool.to_string(),
            strategy,
            succeeded,
            at: SystemTime::now(),
        });
    }

    pub fn entries(&self) -> Vec<ToolAuditEntry> {
        self.entries.lock().unwrap().clone()
    }
}
