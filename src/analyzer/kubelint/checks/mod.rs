//! Built-in check registry.

mod builtin;

pub use builtin::builtin_checks;
