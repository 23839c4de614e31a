//! Shared CLI argument types
//!
//! This module contains reusable argument structs that can be flattened
//! into commands using `#[command(flatten)]`.

mod common;
mod export;
mod global;

pub use common::OutputFormat;
pub use export::ExportArgs;
pub use global::GlobalOptions;
