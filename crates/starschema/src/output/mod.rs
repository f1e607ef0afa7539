//! Rendering of built and persisted rows.
//!
//! Every printable value implements [`Pretty`] for aligned text tables and
//! `Serialize` for JSON output.

mod json;
mod pretty;

use serde::Serialize;

pub use json::to_json;
pub use pretty::{Pretty, TextTable};

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned text tables.
    #[default]
    Pretty,
    /// Pretty-printed JSON.
    Json,
}

/// Renders `value` in the requested format.
pub fn render<T>(value: &T, format: OutputFormat) -> serde_json::Result<String>
where
    T: Pretty + Serialize + ?Sized,
{
    match format {
        OutputFormat::Pretty => Ok(value.pretty()),
        OutputFormat::Json => to_json(value),
    }
}
