//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tally_shared::OutputFormat;

/// Render financial reports from backend JSON.
#[derive(Debug, Parser)]
#[command(name = "tally", version, about)]
pub struct Cli {
    /// Report to render.
    #[command(subcommand)]
    pub report: ReportCommand,

    /// Read report JSON from a file instead of the backend.
    #[arg(long, global = true, conflicts_with = "url")]
    pub input: Option<PathBuf>,

    /// Fetch report JSON from this URL instead of `source.base_url`.
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Output format: csv, markdown (print), or json.
    #[arg(long, short, global = true)]
    pub format: Option<OutputFormat>,

    /// Write to this file instead of stdout.
    #[arg(long, short, global = true)]
    pub output: Option<PathBuf>,
}

/// Available reports.
#[derive(Debug, Clone, Subcommand)]
pub enum ReportCommand {
    /// Category totals with gross and net profit.
    Totals,
    /// Profit & Loss statement with variances.
    ProfitAndLoss,
    /// Fixed assets schedule with class subtotals.
    AssetsSchedule,
    /// General ledger with running balances.
    GeneralLedger(LedgerArgs),
    /// Chart of accounts.
    ChartOfAccounts(AccountArgs),
}

impl ReportCommand {
    /// Report name used in logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Totals => "totals",
            Self::ProfitAndLoss => "profit-and-loss",
            Self::AssetsSchedule => "assets-schedule",
            Self::GeneralLedger(_) => "general-ledger",
            Self::ChartOfAccounts(_) => "chart-of-accounts",
        }
    }

    /// Backend path, relative to `source.base_url`.
    pub const fn endpoint(&self) -> &'static str {
        match self {
            Self::Totals | Self::ProfitAndLoss => "reports/profit-and-loss",
            Self::AssetsSchedule => "reports/assets-schedule",
            Self::GeneralLedger(_) => "reports/general-ledger",
            Self::ChartOfAccounts(_) => "accounts",
        }
    }
}

/// General ledger filters and paging.
#[derive(Debug, Clone, Default, Args)]
pub struct LedgerArgs {
    /// Only entries for this account code.
    #[arg(long)]
    pub account: Option<String>,

    /// Only entries of this journal voucher.
    #[arg(long)]
    pub jv: Option<String>,

    /// Inclusive start date (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Inclusive end date (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Balance brought forward.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub opening_balance: Decimal,

    /// Page to render (1-indexed); all rows when omitted.
    #[arg(long)]
    pub page: Option<u32>,

    /// Rows per page.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
    pub per_page: u32,
}

/// Chart of accounts filters.
#[derive(Debug, Clone, Default, Args)]
pub struct AccountArgs {
    /// Only accounts of this type.
    #[arg(long = "type")]
    pub account_type: Option<String>,

    /// Case-insensitive search over code and name.
    #[arg(long)]
    pub search: Option<String>,

    /// Hide inactive accounts.
    #[arg(long)]
    pub active_only: bool,
}
