//! Report tables: reports reshaped into rows of display strings.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tally_shared::types::PageResponse;

use super::error::RenderError;
use crate::reports::{
    AssetsScheduleReport, ChartOfAccountsReport, GeneralLedgerReport, LedgerRow, PeriodAmount,
    ProfitAndLossReport, ProfitAndLossSection, ProfitSummary, ReportTotals,
};

const PERIOD_HEADERS: [&str; 4] = ["Actual", "Cumulative", "Previous", "Budget"];

/// Columns in the profit and loss table.
const P_AND_L_WIDTH: usize = 8;

/// A titled table of display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTable {
    /// Table title.
    pub title: String,
    /// Column headers.
    pub headers: Vec<String>,
    /// Data rows, one cell per header.
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new<S: Into<String>>(title: impl Into<String>, headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            title: title.into(),
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Checks that every row has one cell per header.
    pub fn validate(&self) -> Result<(), RenderError> {
        let expected = self.headers.len();
        match self.rows.iter().position(|r| r.len() != expected) {
            Some(row) => Err(RenderError::RaggedRow {
                row,
                expected,
                got: self.rows[row].len(),
            }),
            None => Ok(()),
        }
    }
}

/// Builds report tables with a fixed amount precision.
#[derive(Debug, Clone, Copy)]
pub struct TableBuilder {
    decimal_places: u32,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self { decimal_places: 2 }
    }
}

impl TableBuilder {
    /// Creates a builder formatting amounts with `decimal_places` digits.
    #[must_use]
    pub const fn new(decimal_places: u32) -> Self {
        Self { decimal_places }
    }

    /// Formats an amount, rounding half away from zero.
    #[must_use]
    pub fn amount(&self, value: Decimal) -> String {
        let rounded =
            value.round_dp_with_strategy(self.decimal_places, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.*}", self.decimal_places as usize, rounded)
    }

    /// Category totals table.
    #[must_use]
    pub fn totals(&self, totals: &ReportTotals) -> ReportTable {
        let mut table = ReportTable::new("Report Totals", header_row("Category", &[]));
        for (label, amounts) in [
            ("REVENUE", &totals.revenue),
            ("DIRECT_COST", &totals.direct_cost),
            ("EXPENSES", &totals.expenses),
            ("GROSS_PROFIT", &totals.gross_profit),
            ("NET_PROFIT", &totals.net_profit),
        ] {
            table.push_row(self.period_row(label.to_string(), amounts, &[]));
        }
        table
    }

    /// Profit and loss table.
    #[must_use]
    pub fn profit_and_loss(&self, report: &ProfitAndLossReport) -> ReportTable {
        let mut table = ReportTable::new(
            "Profit & Loss",
            header_row(
                "Line",
                &["Variance", "% of Revenue", "Cumulative % of Revenue"],
            ),
        );

        self.push_section(&mut table, &report.revenue);
        self.push_section(&mut table, &report.direct_costs);
        self.push_summary(&mut table, "Gross Profit", &report.gross_profit);
        self.push_section(&mut table, &report.expenses);
        self.push_summary(&mut table, "Net Profit", &report.net_profit);

        if !report.unclassified.is_empty() {
            table.push_row(heading("Unclassified", P_AND_L_WIDTH));
            for item in &report.unclassified {
                table.push_row(self.period_row(
                    format!("  {}", item.name),
                    &item.amounts,
                    &[String::new(), String::new(), String::new()],
                ));
            }
        }
        table
    }

    /// Assets schedule table with class subtotals and a grand total.
    #[must_use]
    pub fn assets_schedule(&self, report: &AssetsScheduleReport) -> ReportTable {
        let mut headers = vec!["Asset Class", "Asset"];
        headers.extend(PERIOD_HEADERS);
        let mut table = ReportTable::new("Assets Schedule", headers);

        for group in &report.groups {
            for line in &group.lines {
                let mut row = vec![group.asset_class.clone(), line.name.clone()];
                row.extend(self.period_cells(&line.amounts));
                table.push_row(row);
            }
            let mut row = vec![group.asset_class.clone(), "Total".to_string()];
            row.extend(self.period_cells(&group.total));
            table.push_row(row);
        }

        let mut row = vec!["Grand Total".to_string(), String::new()];
        row.extend(self.period_cells(&report.grand_total));
        table.push_row(row);
        table
    }

    /// General ledger table over every row.
    #[must_use]
    pub fn general_ledger(&self, report: &GeneralLedgerReport) -> ReportTable {
        self.ledger_table("General Ledger".to_string(), report, &report.rows)
    }

    /// General ledger table over one page of rows.
    ///
    /// Opening, total and closing rows always reflect the whole ledger.
    #[must_use]
    pub fn general_ledger_page(
        &self,
        report: &GeneralLedgerReport,
        page: &PageResponse<LedgerRow>,
    ) -> ReportTable {
        let title = format!(
            "General Ledger (page {} of {})",
            page.meta.page, page.meta.total_pages
        );
        self.ledger_table(title, report, &page.data)
    }

    /// Chart of accounts table, names indented by depth.
    #[must_use]
    pub fn chart_of_accounts(&self, report: &ChartOfAccountsReport) -> ReportTable {
        let mut table = ReportTable::new(
            "Chart of Accounts",
            ["Code", "Name", "Type", "Parent", "Active"],
        );
        for row in &report.accounts {
            let account = &row.account;
            table.push_row(vec![
                account.code.clone(),
                format!("{}{}", "  ".repeat(row.depth), account.name),
                account.account_type.clone(),
                account.parent_code.clone().unwrap_or_default(),
                if account.is_active { "yes" } else { "no" }.to_string(),
            ]);
        }
        table
    }

    fn ledger_table(
        &self,
        title: String,
        report: &GeneralLedgerReport,
        rows: &[LedgerRow],
    ) -> ReportTable {
        let mut table = ReportTable::new(
            title,
            [
                "Date",
                "JV",
                "Account",
                "Account Name",
                "Description",
                "Debit",
                "Credit",
                "Balance",
            ],
        );

        let summary = |label: &str, debit: String, credit: String, balance: Decimal| {
            vec![
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                label.to_string(),
                debit,
                credit,
                self.amount(balance),
            ]
        };

        table.push_row(summary(
            "Opening Balance",
            String::new(),
            String::new(),
            report.opening_balance,
        ));
        for row in rows {
            let entry = &row.entry;
            table.push_row(vec![
                entry.date.format("%Y-%m-%d").to_string(),
                entry.jv_number.clone(),
                entry.account_code.clone(),
                entry.account_name.clone(),
                entry.description.clone(),
                self.amount(entry.debit),
                self.amount(entry.credit),
                self.amount(row.running_balance),
            ]);
        }
        table.push_row(summary(
            "Closing Balance",
            self.amount(report.total_debit),
            self.amount(report.total_credit),
            report.closing_balance,
        ));
        table
    }

    fn push_section(&self, table: &mut ReportTable, section: &ProfitAndLossSection) {
        let label = section.category.label();
        table.push_row(heading(label, P_AND_L_WIDTH));
        for line in &section.lines {
            table.push_row(self.period_row(
                format!("  {}", line.name),
                &line.amounts,
                &[
                    percent(line.variance_percent),
                    percent(line.percent_of_revenue),
                    String::new(),
                ],
            ));
        }
        table.push_row(self.period_row(
            format!("Total {label}"),
            &section.total,
            &[
                percent(section.variance_percent),
                percent(section.percent_of_revenue),
                String::new(),
            ],
        ));
    }

    fn push_summary(&self, table: &mut ReportTable, label: &str, summary: &ProfitSummary) {
        table.push_row(self.period_row(
            label.to_string(),
            &summary.amounts,
            &[
                percent(summary.variance_percent),
                percent(summary.percent_of_revenue),
                percent(summary.cumulative_percent_of_revenue),
            ],
        ));
    }

    fn period_row(&self, label: String, amounts: &PeriodAmount, extra: &[String]) -> Vec<String> {
        let mut row = vec![label];
        row.extend(self.period_cells(amounts));
        row.extend_from_slice(extra);
        row
    }

    fn period_cells(&self, amounts: &PeriodAmount) -> [String; 4] {
        [
            self.amount(amounts.actual),
            self.amount(amounts.cumulative),
            self.amount(amounts.previous),
            self.amount(amounts.budget),
        ]
    }
}

fn header_row<'a>(first: &'a str, extra: &[&'a str]) -> Vec<&'a str> {
    let mut headers = vec![first];
    headers.extend(PERIOD_HEADERS);
    headers.extend_from_slice(extra);
    headers
}

fn heading(label: &str, width: usize) -> Vec<String> {
    let mut row = vec![label.to_string()];
    row.resize(width, String::new());
    row
}

fn percent(value: i64) -> String {
    format!("{value}%")
}
