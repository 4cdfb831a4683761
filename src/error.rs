//! Crate-wide error types.
//!
//! Every fallible boundary in the engine funnels into [`EngineError`]. Lower-level
//! modules define their own focused error enums (`ConfigError`, `ClassifyError`,
//! `ToolError`, `RunnerError`) and fold them in via `#[from]` so call sites can use
//! `?` without manual mapping.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error("invalid invocation: {0}")]
    InvalidInvocation(String),

    #[error("run cancelled")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors raised while classifying or loading an artifact. A classification
/// failure is never fatal to the whole run; the orchestrator turns it into a
/// `fatal` Finding scoped to the offending artifact instead of aborting.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("{path}: unrecognized artifact, no classification rule matched")]
    Unrecognized { path: PathBuf },

    #[error("{path}: failed to read file: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: failed to parse as {kind}: {message}")]
    Parse {
        path: PathBuf,
        kind: String,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool '{0}' is not available and could not be provisioned")]
    Unavailable(String),

    #[error("failed to provision '{tool}' into an ephemeral environment: {message}")]
    ProvisioningFailed { tool: String, message: String },

    #[error("tool '{0}' is not eligible for ephemeral provisioning")]
    NotProvisionable(String),
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to terminate timed-out process '{command}' (pid {pid})")]
    KillFailed { command: String, pid: u32 },
}
