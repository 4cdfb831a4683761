//! YAML, Helm, and Kustomize parsing for Kubernetes manifests.

pub mod helm;
pub mod kustomize;
pub mod yaml;

pub use yaml::{parse_yaml, parse_yaml_dir, parse_yaml_file};
