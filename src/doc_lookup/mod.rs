//! # Extension Detector & Doc Side-Channel
//!
//! Detects third-party extensions referenced by an artifact (a GitHub Action
//! `uses:` line, a Helm chart dependency, a Terraform provider) and resolves
//! them to a schema fragment an analyzer can validate field names/types
//! against. Resolution goes through a pluggable [`DocSource`] so the engine
//! never hard-codes a network client: the default source is local-only
//! (bundled schema fragments), and doc lookup can be disabled entirely via
//! config without changing analyzer code.
//!
//! Lookups are cached per run and are side-effect-free from the engine's
//! perspective: a failed lookup produces an informational Finding, never a
//! hard failure, since schema enrichment is an enhancement, not a dependency.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::extension::{ExtensionHint, HintCategory};
use crate::finding::{Finding, Location, Severity};

/// A small, schema-relevant fact about a resolved extension. Intentionally
/// not a full JSON Schema document: analyzers only ever ask "is this input
/// name valid" or "what's the latest known version", not full validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFragment {
    pub identifier: String,
    pub latest_version: Option<String>,
    pub known_inputs: Vec<String>,
    pub deprecated: bool,
}

pub trait DocSource: Send + Sync {
    fn lookup(&self, hint: &ExtensionHint) -> Option<SchemaFragment>;
}

/// Bundled, offline source covering a handful of widely-used GitHub Actions.
/// Stands in for a real marketplace/registry client; analyzers depend only on
/// the `DocSource` trait, so swapping in a networked implementation later
/// requires no change at the call sites.
pub struct BundledDocSource {
    known: HashMap<&'static str, SchemaFragment>,
}

impl Default for BundledDocSource {
    fn default() -> Self {
        let mut known = HashMap::new();
        known.insert(
            "actions/checkout",
            SchemaFragment {
                identifier: "actions/checkout".to_string(),
                latest_version: Some("v4".to_string()),
                known_inputs: vec!["repository".into(), "ref".into(), "token".into(), "path".into()],
                deprecated: false,
            },
        );
        known.insert(
            "actions/setup-node",
            SchemaFragment {
                identifier: "actions/setup-node".to_string(),
                latest_version: Some("v4".to_string()),
                known_inputs: vec!["node-version".into(), "cache".into()],
                deprecated: false,
            },
        );
        known.insert(
            "actions/upload-artifact",
            SchemaFragment {
                identifier: "actions/upload-artifact".to_string(),
                latest_version: Some("v4".to_string()),
                known_inputs: vec!["name".into(), "path".into(), "retention-days".into()],
                deprecated: false,
            },
        );
        known.insert(
            "actions/setup-python",
            SchemaFragment {
                identifier: "actions/setup-python".to_string(),
                latest_version: Some("v5".to_string()),
                known_inputs: vec!["python-version".into(), "cache".into()],
                deprecated: false,
            },
        );
        Self { known }
    }
}

impl DocSource for BundledDocSource {
    fn lookup(&self, hint: &ExtensionHint) -> Option<SchemaFragment> {
        if hint.category != HintCategory::ActionReference {
            return None;
        }
        let action_slug = hint.identifier.split('@').next().unwrap_or(&hint.identifier);
        self.known.get(action_slug).cloned()
    }
}

/// Per-run cache in front of a [`DocSource`]. `lookup` is idempotent: calling
/// it twice for the same hint returns the same value without a second
/// resolution attempt.
pub struct DocLookup {
    source: Box<dyn DocSource>,
    cache: Mutex<HashMap<ExtensionHint, Option<SchemaFragment>>>,
    enabled: bool,
}

impl DocLookup {
    pub fn new(source: Box<dyn DocSource>, enabled: bool) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
            enabled,
        }
    }

    /// Resolve a hint, returning `(fragment, info_finding)`. The info Finding
    /// is `Some` only when the lookup was attempted and failed; a disabled
    /// doc lookup silently yields `(None, None)`.
    ///
    /// [`HintCategory::K8sCrd`] is special-cased to never produce the generic
    /// miss Finding here: `k8s-schema` already emits its own
    /// `CORE-CRD-SCHEMA-UNAVAILABLE` Finding for an unresolved CRD hint (the
    /// literal id Scenario C names), and emitting both would put two
    /// Findings with different ids at the same location for one failed
    /// lookup — `dedup_and_sort` collapses same-id duplicates, not
    /// same-cause ones. Every other category has no analyzer-specific
    /// fallback, so the generic note is the only one ever produced for it.
    pub fn resolve(&self, hint: &ExtensionHint, artifact_path: &std::path::Path) -> (Option<SchemaFragment>, Option<Finding>) {
        if !self.enabled {
            return (None, None);
        }

        let mut cache = self.cache.lock().unwrap();
        if let Some(cached) = cache.get(hint) {
            return (cached.clone(), None);
        }

        let resolved = self.source.lookup(hint);
        cache.insert(hint.clone(), resolved.clone());

        let info = (resolved.is_none() && hint.category != HintCategory::K8sCrd).then(|| Finding {
            id: "CORE-DOC-LOOKUP-MISS".to_string(),
            severity: Severity::Info,
            message: format!("no schema information available for '{}'", hint.identifier),
            location: Location::new(artifact_path),
            analyzer: "doc-lookup".to_string(),
            tool: None,
            suggestion: None,
            references: vec![],
        });

        (resolved, info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn action_hint(identifier: &str) -> ExtensionHint {
        ExtensionHint::new(HintCategory::ActionReference, identifier, None)
    }

    #[test]
    fn resolves_a_known_action() {
        let lookup = DocLookup::new(Box::new(BundledDocSource::default()), true);
        let hint = action_hint("actions/checkout@v4");
        let (fragment, info) = lookup.resolve(&hint, Path::new("ci.yml"));
        assert!(fragment.is_some());
        assert!(info.is_none());
    }

    #[test]
    fn unknown_action_yields_info_finding_not_error() {
        let lookup = DocLookup::new(Box::new(BundledDocSource::default()), true);
        let hint = action_hint("someorg/unknown-action@v1");
        let (fragment, info) = lookup.resolve(&hint, Path::new("ci.yml"));
        assert!(fragment.is_none());
        let info = info.expect("a miss should produce an info finding");
        assert_eq!(info.severity, Severity::Info);
    }

    #[test]
    fn disabled_lookup_is_a_no_op() {
        let lookup = DocLookup::new(Box::new(BundledDocSource::default()), false);
        let hint = action_hint("actions/checkout@v4");
        let (fragment, info) = lookup.resolve(&hint, Path::new("ci.yml"));
        assert!(fragment.is_none());
        assert!(info.is_none());
    }

    #[test]
    fn a_missed_crd_lookup_yields_no_generic_finding() {
        let lookup = DocLookup::new(Box::new(BundledDocSource::default()), true);
        let hint = ExtensionHint::new(HintCategory::K8sCrd, "cert-manager.io/Certificate/v1", None);
        let (fragment, info) = lookup.resolve(&hint, Path::new("cert.yaml"));
        assert!(fragment.is_none());
        assert!(info.is_none(), "k8s-schema emits its own CORE-CRD-SCHEMA-UNAVAILABLE for this case");
    }

    #[test]
    fn repeated_lookup_is_idempotent() {
        let lookup = DocLookup::new(Box::new(BundledDocSource::default()), true);
        let hint = action_hint("actions/checkout@v4");
        let (first, _) = lookup.resolve(&hint, Path::new("ci.yml"));
        let (second, _) = lookup.resolve(&hint, Path::new("ci.yml"));
        assert_eq!(first.unwrap().identifier, second.unwrap().identifier);
    }
}
