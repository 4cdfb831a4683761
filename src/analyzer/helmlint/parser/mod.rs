//! Parsers for Helm chart components.
//!
//! This module provides parsers for:
//! - Chart.yaml metadata
//! - values.yaml configuration
//! - Go templates (tokenization and static analysis)
//! - Helper templates (_helpers.tpl)

pub mod chart;
pub mod helpers;
pub mod template;
pub mod values;

pub use chart::{ChartMetadata, ChartType, Dependency, Maintainer, parse_chart_yaml};
pub use helpers::{HelperDefinition, parse_helpers};
pub use template::{ParsedTemplate, TemplateToken, parse_template};
pub use values::{ValuesFile, parse_values_yaml};
