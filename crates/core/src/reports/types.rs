//! Report data types.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce;

/// One financial line's value across the four reporting periods.
///
/// Missing or non-numeric fields deserialize to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAmount {
    /// Current period actual.
    #[serde(default, deserialize_with = "coerce::lenient_amount")]
    pub actual: Decimal,
    /// Year-to-date cumulative actual.
    #[serde(default, deserialize_with = "coerce::lenient_amount")]
    pub cumulative: Decimal,
    /// Same period of the previous year.
    #[serde(default, deserialize_with = "coerce::lenient_amount")]
    pub previous: Decimal,
    /// Budgeted amount for the current period.
    #[serde(default, deserialize_with = "coerce::lenient_amount")]
    pub budget: Decimal,
}

impl PeriodAmount {
    /// The all-zero amount.
    pub const ZERO: Self = Self {
        actual: Decimal::ZERO,
        cumulative: Decimal::ZERO,
        previous: Decimal::ZERO,
        budget: Decimal::ZERO,
    };

    /// Creates a new period amount.
    #[must_use]
    pub const fn new(actual: Decimal, cumulative: Decimal, previous: Decimal, budget: Decimal) -> Self {
        Self {
            actual,
            cumulative,
            previous,
            budget,
        }
    }

    /// Builds a period amount from an arbitrary JSON value. Never fails.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        Self {
            actual: coerce::field_amount(value, "actual"),
            cumulative: coerce::field_amount(value, "cumulative"),
            previous: coerce::field_amount(value, "previous"),
            budget: coerce::field_amount(value, "budget"),
        }
    }

    /// Returns true if all four periods are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.actual.is_zero()
            && self.cumulative.is_zero()
            && self.previous.is_zero()
            && self.budget.is_zero()
    }
}

// Saturating: aggregation must never panic.
impl Add for PeriodAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            actual: self.actual.saturating_add(rhs.actual),
            cumulative: self.cumulative.saturating_add(rhs.cumulative),
            previous: self.previous.saturating_add(rhs.previous),
            budget: self.budget.saturating_add(rhs.budget),
        }
    }
}

impl Sub for PeriodAmount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            actual: self.actual.saturating_sub(rhs.actual),
            cumulative: self.cumulative.saturating_sub(rhs.cumulative),
            previous: self.previous.saturating_sub(rhs.previous),
            budget: self.budget.saturating_sub(rhs.budget),
        }
    }
}

impl Sum for PeriodAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a PeriodAmount> for PeriodAmount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Classification of a profit and loss line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineCategory {
    /// Sales and other income.
    Revenue,
    /// Cost of sales.
    DirectCost,
    /// Operating expenses.
    Expense,
}

impl LineCategory {
    /// Whether a higher actual than budget is favorable for this category.
    #[must_use]
    pub const fn is_revenue(self) -> bool {
        matches!(self, Self::Revenue)
    }

    /// Human readable section label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::DirectCost => "Direct Costs",
            Self::Expense => "Expenses",
        }
    }
}

impl fmt::Display for LineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Revenue => write!(f, "REVENUE"),
            Self::DirectCost => write!(f, "DIRECT_COST"),
            Self::Expense => write!(f, "EXPENSE"),
        }
    }
}

impl FromStr for LineCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace([' ', '-'], "_").as_str() {
            "REVENUE" | "INCOME" => Ok(Self::Revenue),
            "DIRECT_COST" | "DIRECT_COSTS" | "COST_OF_SALES" => Ok(Self::DirectCost),
            "EXPENSE" | "EXPENSES" => Ok(Self::Expense),
            _ => Err(format!("Unknown line category: {s}")),
        }
    }
}

/// A named period amount, optionally tagged with a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Line name (account or group name).
    #[serde(default, deserialize_with = "coerce::lenient_string")]
    pub name: String,
    /// Category tag; `None` when absent or unrecognized.
    #[serde(default, deserialize_with = "coerce::lenient_category")]
    pub category: Option<LineCategory>,
    /// Amounts across the reporting periods.
    #[serde(flatten)]
    pub amounts: PeriodAmount,
}

impl LineItem {
    /// Creates a new line item.
    #[must_use]
    pub fn new(name: impl Into<String>, category: Option<LineCategory>, amounts: PeriodAmount) -> Self {
        Self {
            name: name.into(),
            category,
            amounts,
        }
    }
}

/// Aggregated totals per category plus derived profit lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// Sum of revenue lines.
    pub revenue: PeriodAmount,
    /// Sum of direct cost lines.
    pub direct_cost: PeriodAmount,
    /// Sum of expense lines.
    pub expenses: PeriodAmount,
    /// Revenue minus direct costs.
    pub gross_profit: PeriodAmount,
    /// Gross profit minus expenses.
    pub net_profit: PeriodAmount,
}

// ============================================================================
// Profit & Loss
// ============================================================================

/// A profit and loss line with its computed percentages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitAndLossLine {
    /// Line name.
    pub name: String,
    /// Line category.
    pub category: LineCategory,
    /// Amounts across the reporting periods.
    pub amounts: PeriodAmount,
    /// Actual vs budget variance, positive is favorable.
    pub variance_percent: i64,
    /// Actual as a percentage of total revenue actual.
    pub percent_of_revenue: i64,
}

/// One section (revenue, direct costs, expenses) of the statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitAndLossSection {
    /// Section category.
    pub category: LineCategory,
    /// Lines in input order.
    pub lines: Vec<ProfitAndLossLine>,
    /// Section total.
    pub total: PeriodAmount,
    /// Section total variance, positive is favorable.
    pub variance_percent: i64,
    /// Section total as a percentage of revenue.
    pub percent_of_revenue: i64,
}

/// Gross or net profit summary row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProfitSummary {
    /// Profit amounts.
    pub amounts: PeriodAmount,
    /// Actual vs budget variance (revenue convention).
    pub variance_percent: i64,
    /// Profit as a percentage of revenue for the actual period (GOP/NOP).
    pub percent_of_revenue: i64,
    /// Profit as a percentage of revenue for the cumulative period.
    pub cumulative_percent_of_revenue: i64,
}

/// Profit and loss statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitAndLossReport {
    /// Report type identifier.
    pub report_type: String,
    /// Revenue section.
    pub revenue: ProfitAndLossSection,
    /// Direct cost section.
    pub direct_costs: ProfitAndLossSection,
    /// Gross profit (revenue - direct costs).
    pub gross_profit: ProfitSummary,
    /// Expense section.
    pub expenses: ProfitAndLossSection,
    /// Net profit (gross profit - expenses).
    pub net_profit: ProfitSummary,
    /// Category totals.
    pub totals: ReportTotals,
    /// Lines without a recognized category; excluded from totals.
    pub unclassified: Vec<LineItem>,
}

// ============================================================================
// Assets Schedule
// ============================================================================

/// A fixed asset line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLine {
    /// Asset class (e.g. "Vehicles", "Furniture & Fittings").
    #[serde(default, deserialize_with = "coerce::lenient_string")]
    pub asset_class: String,
    /// Asset name.
    #[serde(default, deserialize_with = "coerce::lenient_string")]
    pub name: String,
    /// Amounts across the reporting periods.
    #[serde(flatten)]
    pub amounts: PeriodAmount,
}

/// Lines of one asset class with their column totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetClassGroup {
    /// Asset class.
    pub asset_class: String,
    /// Lines in input order.
    pub lines: Vec<AssetLine>,
    /// Column totals for the class.
    pub total: PeriodAmount,
}

/// Assets schedule report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsScheduleReport {
    /// Report type identifier.
    pub report_type: String,
    /// Groups in order of first appearance.
    pub groups: Vec<AssetClassGroup>,
    /// Column totals over every line.
    pub grand_total: PeriodAmount,
}

// ============================================================================
// General Ledger
// ============================================================================

/// A posted ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Posting date; timestamps are truncated to their date.
    #[serde(deserialize_with = "coerce::lenient_date")]
    pub date: NaiveDate,
    /// Journal voucher number.
    #[serde(default, deserialize_with = "coerce::lenient_string")]
    pub jv_number: String,
    /// Account code.
    #[serde(default, deserialize_with = "coerce::lenient_string")]
    pub account_code: String,
    /// Account name.
    #[serde(default, deserialize_with = "coerce::lenient_string")]
    pub account_name: String,
    /// Narration.
    #[serde(default, deserialize_with = "coerce::lenient_string")]
    pub description: String,
    /// Debit amount.
    #[serde(default, deserialize_with = "coerce::lenient_amount")]
    pub debit: Decimal,
    /// Credit amount.
    #[serde(default, deserialize_with = "coerce::lenient_amount")]
    pub credit: Decimal,
}

/// Filter applied to ledger entries.
#[derive(Debug, Clone, Default)]
pub struct LedgerFilter {
    /// Only entries for this account code.
    pub account_code: Option<String>,
    /// Only entries of this journal voucher.
    pub jv_number: Option<String>,
    /// Inclusive start date.
    pub from: Option<NaiveDate>,
    /// Inclusive end date.
    pub to: Option<NaiveDate>,
}

/// Ledger entry with its running balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRow {
    /// The posted entry.
    pub entry: LedgerEntry,
    /// Balance after this entry.
    pub running_balance: Decimal,
}

/// General ledger report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralLedgerReport {
    /// Report type identifier.
    pub report_type: String,
    /// Balance brought forward.
    pub opening_balance: Decimal,
    /// Rows ordered by date.
    pub rows: Vec<LedgerRow>,
    /// Total debit.
    pub total_debit: Decimal,
    /// Total credit.
    pub total_credit: Decimal,
    /// Balance carried forward.
    pub closing_balance: Decimal,
}

// ============================================================================
// Chart of Accounts
// ============================================================================

/// An account as sent by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Account code.
    #[serde(deserialize_with = "coerce::lenient_string")]
    pub code: String,
    /// Account name.
    #[serde(default, deserialize_with = "coerce::lenient_string")]
    pub name: String,
    /// Account type (asset, liability, equity, revenue, expense).
    #[serde(default, deserialize_with = "coerce::lenient_string")]
    pub account_type: String,
    /// Parent account code.
    #[serde(default, deserialize_with = "coerce::lenient_optional_string")]
    pub parent_code: Option<String>,
    /// Whether the account accepts postings.
    #[serde(default = "default_active", deserialize_with = "coerce::lenient_bool")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Filter applied to the chart of accounts.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Only accounts of this type (case-insensitive).
    pub account_type: Option<String>,
    /// Case-insensitive substring match over code and name.
    pub search: Option<String>,
    /// Exclude inactive accounts.
    pub active_only: bool,
}

/// Account row with its depth in the hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRow {
    /// The account.
    pub account: AccountRecord,
    /// Number of ancestors reachable through `parent_code`.
    pub depth: usize,
}

/// Chart of accounts report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartOfAccountsReport {
    /// Report type identifier.
    pub report_type: String,
    /// Accounts sorted by code.
    pub accounts: Vec<AccountRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_period_amount_missing_fields_default_to_zero() {
        let amount: PeriodAmount = serde_json::from_value(json!({"actual": 5})).unwrap();
        assert_eq!(amount, PeriodAmount::new(dec!(5), dec!(0), dec!(0), dec!(0)));
    }

    #[test]
    fn test_period_amount_non_numeric_fields_are_zero() {
        let amount: PeriodAmount = serde_json::from_value(json!({
            "actual": "12.5",
            "cumulative": null,
            "previous": "—",
            "budget": {"nested": true}
        }))
        .unwrap();
        assert_eq!(amount, PeriodAmount::new(dec!(12.5), dec!(0), dec!(0), dec!(0)));
    }

    #[test]
    fn test_period_amount_from_json_non_object() {
        assert!(PeriodAmount::from_json(&json!("garbage")).is_zero());
        assert!(PeriodAmount::from_json(&json!(null)).is_zero());
    }

    #[test]
    fn test_line_item_flattened_amounts() {
        let item: LineItem = serde_json::from_value(json!({
            "name": "Room Sales",
            "category": "REVENUE",
            "actual": 1200,
            "budget": "1000"
        }))
        .unwrap();

        assert_eq!(item.name, "Room Sales");
        assert_eq!(item.category, Some(LineCategory::Revenue));
        assert_eq!(item.amounts.actual, dec!(1200));
        assert_eq!(item.amounts.budget, dec!(1000));
        assert_eq!(item.amounts.previous, Decimal::ZERO);
    }

    #[test]
    fn test_line_item_unknown_category_is_untagged() {
        let item: LineItem =
            serde_json::from_value(json!({"name": "Suspense", "category": "ASSET"})).unwrap();
        assert_eq!(item.category, None);
        assert!(item.amounts.is_zero());
    }

    #[test]
    fn test_line_category_parsing() {
        assert_eq!("revenue".parse::<LineCategory>(), Ok(LineCategory::Revenue));
        assert_eq!("Direct Cost".parse::<LineCategory>(), Ok(LineCategory::DirectCost));
        assert_eq!("EXPENSES".parse::<LineCategory>(), Ok(LineCategory::Expense));
        assert!("equity".parse::<LineCategory>().is_err());
    }

    #[test]
    fn test_period_amount_arithmetic() {
        let a = PeriodAmount::new(dec!(10), dec!(20), dec!(30), dec!(40));
        let b = PeriodAmount::new(dec!(1), dec!(2), dec!(3), dec!(4));

        assert_eq!(a + b, PeriodAmount::new(dec!(11), dec!(22), dec!(33), dec!(44)));
        assert_eq!(a - b, PeriodAmount::new(dec!(9), dec!(18), dec!(27), dec!(36)));
        assert_eq!([a, b].iter().sum::<PeriodAmount>(), a + b);
    }

    #[test]
    fn test_period_amount_add_saturates() {
        let max = PeriodAmount::new(Decimal::MAX, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        assert_eq!((max + max).actual, Decimal::MAX);
    }

    #[test]
    fn test_account_record_defaults() {
        let account: AccountRecord =
            serde_json::from_value(json!({"code": 1000, "name": "Cash"})).unwrap();
        assert_eq!(account.code, "1000");
        assert!(account.is_active);
        assert!(account.parent_code.is_none());
    }

    #[test]
    fn test_account_record_numeric_parent_and_flag() {
        let accounts: Vec<AccountRecord> = crate::reports::payload::parse_rows(&json!([
            {"code": 1100, "name": "Petty Cash", "parent_code": 1000, "is_active": 0},
            {"code": "1200", "parent_code": "", "is_active": "true"},
            {"code": 1300, "parent_code": null, "is_active": 1}
        ]))
        .unwrap();

        assert_eq!(accounts[0].parent_code.as_deref(), Some("1000"));
        assert!(!accounts[0].is_active);
        assert!(accounts[1].parent_code.is_none());
        assert!(accounts[1].is_active);
        assert!(accounts[2].parent_code.is_none());
        assert!(accounts[2].is_active);
    }

    #[test]
    fn test_ledger_entry_accepts_timestamp() {
        let entry: LedgerEntry = serde_json::from_value(json!({
            "date": "2026-01-05T00:00:00Z",
            "jv_number": 17,
            "debit": "250"
        }))
        .unwrap();

        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        assert_eq!(entry.jv_number, "17");
        assert_eq!(entry.debit, dec!(250));
    }
}
