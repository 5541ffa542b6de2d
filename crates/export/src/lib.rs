//! Output renderers for Tally reports.
//!
//! Each renderer implements [`tally_core::render::Renderer`] over a
//! [`tally_core::render::ReportTable`].

pub mod csv;
pub mod json;
pub mod markdown;

pub use self::csv::CsvRenderer;
pub use self::json::JsonRenderer;
pub use self::markdown::MarkdownRenderer;

use tally_core::render::Renderer;
use tally_shared::{OutputConfig, OutputFormat};

/// Returns the renderer for an output format.
#[must_use]
pub fn renderer_for(format: OutputFormat, config: &OutputConfig) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Csv => Box::new(CsvRenderer::with_delimiter(config.delimiter)),
        OutputFormat::Markdown => Box::new(MarkdownRenderer::new()),
        OutputFormat::Json => Box::new(JsonRenderer::new()),
    }
}
