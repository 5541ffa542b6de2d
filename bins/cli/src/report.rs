//! Payload → report → table.

use serde_json::Value;
use tally_core::render::{ReportTable, TableBuilder};
use tally_core::reports::{
    AccountFilter, AccountRecord, AssetLine, LedgerEntry, LedgerFilter, LineItem, ReportError,
    ReportService, payload,
};
use tally_shared::types::PageRequest;
use tally_shared::{AppError, AppResult};

use crate::cli::ReportCommand;

/// Assembles the requested report from a payload and lays it out as a table.
pub fn build_table(
    command: &ReportCommand,
    body: &Value,
    builder: TableBuilder,
) -> AppResult<ReportTable> {
    let table = match command {
        ReportCommand::Totals => {
            let items: Vec<LineItem> = payload::parse_rows(body).map_err(report_error)?;
            builder.totals(&ReportService::totals(&items))
        }
        ReportCommand::ProfitAndLoss => {
            let items: Vec<LineItem> = payload::parse_rows(body).map_err(report_error)?;
            builder.profit_and_loss(&ReportService::profit_and_loss(&items))
        }
        ReportCommand::AssetsSchedule => {
            let lines: Vec<AssetLine> = payload::parse_rows(body).map_err(report_error)?;
            builder.assets_schedule(&ReportService::assets_schedule(lines))
        }
        ReportCommand::GeneralLedger(args) => {
            let entries: Vec<LedgerEntry> = payload::parse_rows(body).map_err(report_error)?;
            let filter = LedgerFilter {
                account_code: args.account.clone(),
                jv_number: args.jv.clone(),
                from: args.from,
                to: args.to,
            };
            let report = ReportService::general_ledger(entries, args.opening_balance, &filter)
                .map_err(report_error)?;

            match args.page {
                Some(page) => {
                    let request = PageRequest {
                        page,
                        per_page: args.per_page,
                    };
                    builder.general_ledger_page(&report, &request.paginate(report.rows.clone()))
                }
                None => builder.general_ledger(&report),
            }
        }
        ReportCommand::ChartOfAccounts(args) => {
            let records: Vec<AccountRecord> = payload::parse_rows(body).map_err(report_error)?;
            let filter = AccountFilter {
                account_type: args.account_type.clone(),
                search: args.search.clone(),
                active_only: args.active_only,
            };
            builder.chart_of_accounts(&ReportService::chart_of_accounts(records, &filter))
        }
    };
    Ok(table)
}

fn report_error(err: ReportError) -> AppError {
    match err {
        ReportError::InvalidDateRange { .. } => AppError::Validation(err.to_string()),
        ReportError::UnexpectedPayload(_) | ReportError::InvalidRow { .. } => {
            AppError::Source(err.to_string())
        }
    }
}
