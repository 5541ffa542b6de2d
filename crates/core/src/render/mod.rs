//! Presentation adapter.
//!
//! Reports are turned into a [`ReportTable`] of display strings, and a
//! [`Renderer`] turns the table into an output document. Renderers never see
//! the report types, so they can be tested against hand-built tables.

pub mod error;
pub mod table;

pub use error::RenderError;
pub use table::{ReportTable, TableBuilder};

use crate::reports::ReportTotals;

/// Capability that turns a computed table into an output document.
pub trait Renderer {
    /// Short format name, used in logs and file extensions.
    fn format_name(&self) -> &'static str;

    /// Renders a table.
    fn render(&self, table: &ReportTable) -> Result<String, RenderError>;

    /// Renders category totals with the default table layout.
    fn render_totals(&self, totals: &ReportTotals) -> Result<String, RenderError> {
        self.render(&TableBuilder::default().totals(totals))
    }
}
