//! Tally report renderer.
//!
//! Fetches report rows from a file or the reporting backend, assembles the
//! requested report, and writes it as CSV, Markdown, or JSON.

mod cli;
mod report;
mod source;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use source::Source;
use tally_core::render::TableBuilder;
use tally_export::renderer_for;
use tally_shared::{AppConfig, AppError};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for the report itself
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=info,tally_core=info,tally_export=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let app_error = err.downcast_ref::<AppError>();
            error!(
                code = app_error.map_or("INTERNAL_ERROR", AppError::error_code),
                "{err:#}"
            );
            let status = app_error.map_or(1, AppError::exit_code);
            ExitCode::from(u8::try_from(status).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::load().map_err(AppError::from)?;
    let format = cli.format.unwrap_or(config.output.format);

    let source = Source::resolve(
        cli.input,
        cli.url,
        cli.report.endpoint(),
        &config.source,
    )?;
    let body = source.fetch(&config.source).await?;

    let table = report::build_table(
        &cli.report,
        &body,
        TableBuilder::new(config.output.decimal_places),
    )?;

    let renderer = renderer_for(format, &config.output);
    let rendered = renderer
        .render(&table)
        .map_err(|e| AppError::Render(e.to_string()))?;

    write_output(cli.output.as_deref(), &rendered).await?;

    info!(
        report = cli.report.name(),
        format = renderer.format_name(),
        rows = table.rows.len(),
        "Report rendered"
    );
    Ok(())
}

async fn write_output(path: Option<&Path>, rendered: &str) -> Result<(), AppError> {
    match path {
        Some(path) => tokio::fs::write(path, rendered)
            .await
            .map_err(|e| AppError::Render(format!("{}: {e}", path.display()))),
        None => {
            print!("{rendered}");
            Ok(())
        }
    }
}
