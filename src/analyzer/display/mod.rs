//! # Display Module
//!
//! Low-level terminal rendering helpers shared by the reporter: box drawing,
//! background-aware color adaptation, and visual-width-safe string utilities.
//! The reporter (`crate::report`) builds the human-readable Finding output on
//! top of these building blocks; JSON output bypasses them entirely.

mod box_drawer;
mod color_adapter;
mod utils;

pub use box_drawer::BoxDrawer;
pub use color_adapter::{get_color_adapter, init_color_adapter, ColorAdapter, ColorScheme};
pub use utils::{strip_ansi_codes, truncate_to_width, visual_width};
