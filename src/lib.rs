//! # DevOps Artifact Validation Pipeline
//!
//! A multi-stage engine that classifies DevOps artifacts in a project tree
//! (CI workflows, Dockerfiles, Terraform/Terragrunt, Helm charts, Makefiles,
//! shell scripts, Jenkinsfiles, Kubernetes manifests, Fluent Bit and Loki
//! configs), runs a registry of analyzers — wrapping external tools through a
//! provisioning layer or re-implementing a linter natively — and reports the
//! merged Finding stream as either colored text or a single JSON object.
//!
//! [`pipeline::run`] is the entry point; everything else is a module it
//! composes.

pub mod analyzer;
pub mod classify;
pub mod cli;
pub mod config;
pub mod doc_lookup;
pub mod error;
pub mod extension;
pub mod finding;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod runner;

pub use error::{EngineError, Result};
pub use pipeline::{run as run_pipeline, CancellationToken, Run};

/// The current version of the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
