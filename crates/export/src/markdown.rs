//! Markdown export, used for the print view.

use std::fmt::Write;

use tally_core::render::{RenderError, ReportTable, Renderer};

/// Renders a table as a titled Markdown document.
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Creates a new Markdown renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(cell: &str) -> String {
    cell.replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
        .replace('|', "\\|")
}

impl Renderer for MarkdownRenderer {
    fn format_name(&self) -> &'static str {
        "markdown"
    }

    fn render(&self, table: &ReportTable) -> Result<String, RenderError> {
        table.validate()?;

        let mut output = String::new();
        let _ = writeln!(output, "# {}\n", table.title);

        if table.rows.is_empty() {
            output.push_str("*No rows.*\n");
            return Ok(output);
        }

        let header: Vec<String> = table.headers.iter().map(|h| escape(h)).collect();
        let rule: Vec<&str> = table.headers.iter().map(|_| "---").collect();
        let _ = writeln!(output, "| {} |", header.join(" | "));
        let _ = writeln!(output, "| {} |", rule.join(" | "));

        for row in &table.rows {
            let cells: Vec<String> = row.iter().map(|c| escape(c)).collect();
            let _ = writeln!(output, "| {} |", cells.join(" | "));
        }

        Ok(output)
    }
}
