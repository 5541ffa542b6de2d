//! Report generation service.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use tracing::debug;

use super::calculator::ReportCalculator;
use super::error::ReportError;
use super::types::{
    AccountFilter, AccountRecord, AccountRow, AssetClassGroup, AssetLine, AssetsScheduleReport,
    ChartOfAccountsReport, GeneralLedgerReport, LedgerEntry, LedgerFilter, LedgerRow, LineCategory,
    LineItem, PeriodAmount, ProfitAndLossLine, ProfitAndLossReport, ProfitAndLossSection,
    ProfitSummary, ReportTotals,
};

/// Service for assembling financial reports from backend rows.
pub struct ReportService;

impl ReportService {
    /// Aggregates line items per category and derives gross and net profit.
    ///
    /// Untagged items do not contribute to any category.
    #[must_use]
    pub fn totals(items: &[LineItem]) -> ReportTotals {
        let revenue = Self::category_total(items, LineCategory::Revenue);
        let direct_cost = Self::category_total(items, LineCategory::DirectCost);
        let expenses = Self::category_total(items, LineCategory::Expense);
        let gross_profit = revenue - direct_cost;

        ReportTotals {
            revenue,
            direct_cost,
            expenses,
            gross_profit,
            net_profit: gross_profit - expenses,
        }
    }

    /// Generates a profit and loss statement.
    ///
    /// Each line carries its budget variance (revenue convention for revenue
    /// lines, cost convention otherwise) and its share of revenue.
    #[must_use]
    pub fn profit_and_loss(items: &[LineItem]) -> ProfitAndLossReport {
        let totals = Self::totals(items);
        let revenue_actual = totals.revenue.actual;

        let unclassified: Vec<LineItem> = items
            .iter()
            .filter(|item| item.category.is_none())
            .cloned()
            .collect();
        if !unclassified.is_empty() {
            debug!(
                count = unclassified.len(),
                "Excluding untagged lines from profit and loss totals"
            );
        }

        let section = |category: LineCategory, total: PeriodAmount| {
            let lines = items
                .iter()
                .filter(|item| item.category == Some(category))
                .map(|item| ProfitAndLossLine {
                    name: item.name.clone(),
                    category,
                    amounts: item.amounts,
                    variance_percent: Self::variance(category, &item.amounts),
                    percent_of_revenue: ReportCalculator::percentage_of_revenue(
                        item.amounts.actual,
                        revenue_actual,
                    ),
                })
                .collect();

            ProfitAndLossSection {
                category,
                lines,
                total,
                variance_percent: Self::variance(category, &total),
                percent_of_revenue: ReportCalculator::percentage_of_revenue(
                    total.actual,
                    revenue_actual,
                ),
            }
        };

        ProfitAndLossReport {
            report_type: "profit_and_loss".to_string(),
            revenue: section(LineCategory::Revenue, totals.revenue),
            direct_costs: section(LineCategory::DirectCost, totals.direct_cost),
            gross_profit: Self::profit_summary(&totals.gross_profit, &totals.revenue),
            expenses: section(LineCategory::Expense, totals.expenses),
            net_profit: Self::profit_summary(&totals.net_profit, &totals.revenue),
            totals,
            unclassified,
        }
    }

    /// Generates an assets schedule grouped by asset class.
    ///
    /// Groups keep the order in which their class first appears.
    #[must_use]
    pub fn assets_schedule(lines: Vec<AssetLine>) -> AssetsScheduleReport {
        let mut groups: Vec<AssetClassGroup> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for line in lines {
            let slot = *index.entry(line.asset_class.clone()).or_insert_with(|| {
                groups.push(AssetClassGroup {
                    asset_class: line.asset_class.clone(),
                    lines: Vec::new(),
                    total: PeriodAmount::ZERO,
                });
                groups.len() - 1
            });
            groups[slot].lines.push(line);
        }

        for group in &mut groups {
            let amounts: Vec<PeriodAmount> = group.lines.iter().map(|l| l.amounts).collect();
            group.total = ReportCalculator::sum_amounts(&amounts);
        }

        let grand_total = groups.iter().map(|g| &g.total).sum();

        AssetsScheduleReport {
            report_type: "assets_schedule".to_string(),
            groups,
            grand_total,
        }
    }

    /// Generates a general ledger with running balances.
    ///
    /// Entries are ordered by date; entries on the same date keep input order.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidDateRange` if `filter.from` is after `filter.to`.
    pub fn general_ledger(
        entries: Vec<LedgerEntry>,
        opening_balance: Decimal,
        filter: &LedgerFilter,
    ) -> Result<GeneralLedgerReport, ReportError> {
        if let (Some(start), Some(end)) = (filter.from, filter.to) {
            if start > end {
                return Err(ReportError::InvalidDateRange { start, end });
            }
        }

        let mut selected: Vec<LedgerEntry> = entries
            .into_iter()
            .filter(|e| Self::ledger_matches(e, filter))
            .collect();
        selected.sort_by_key(|e| e.date);

        let mut balance = opening_balance;
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        let rows: Vec<LedgerRow> = selected
            .into_iter()
            .map(|entry| {
                total_debit = total_debit.saturating_add(entry.debit);
                total_credit = total_credit.saturating_add(entry.credit);
                balance = balance
                    .saturating_add(entry.debit)
                    .saturating_sub(entry.credit);
                LedgerRow {
                    entry,
                    running_balance: balance,
                }
            })
            .collect();

        debug!(rows = rows.len(), closing = %balance, "Assembled general ledger");

        Ok(GeneralLedgerReport {
            report_type: "general_ledger".to_string(),
            opening_balance,
            rows,
            total_debit,
            total_credit,
            closing_balance: balance,
        })
    }

    /// Generates a chart of accounts sorted by code.
    ///
    /// Depth is computed over the full account list, so filtering does not
    /// change an account's indentation.
    #[must_use]
    pub fn chart_of_accounts(
        records: Vec<AccountRecord>,
        filter: &AccountFilter,
    ) -> ChartOfAccountsReport {
        let parents: HashMap<String, Option<String>> = records
            .iter()
            .map(|r| (r.code.clone(), r.parent_code.clone()))
            .collect();

        let needle = filter.search.as_deref().map(str::to_lowercase);
        let mut accounts: Vec<AccountRow> = records
            .into_iter()
            .filter(|r| !filter.active_only || r.is_active)
            .filter(|r| {
                filter
                    .account_type
                    .as_deref()
                    .is_none_or(|t| r.account_type.eq_ignore_ascii_case(t))
            })
            .filter(|r| {
                needle.as_deref().is_none_or(|n| {
                    r.code.to_lowercase().contains(n) || r.name.to_lowercase().contains(n)
                })
            })
            .map(|account| {
                let depth = Self::account_depth(&account.code, &parents);
                AccountRow { account, depth }
            })
            .collect();
        accounts.sort_by(|a, b| a.account.code.cmp(&b.account.code));

        ChartOfAccountsReport {
            report_type: "chart_of_accounts".to_string(),
            accounts,
        }
    }

    fn category_total(items: &[LineItem], category: LineCategory) -> PeriodAmount {
        let amounts: Vec<PeriodAmount> = items
            .iter()
            .filter(|item| item.category == Some(category))
            .map(|item| item.amounts)
            .collect();
        ReportCalculator::sum_amounts(&amounts)
    }

    fn variance(category: LineCategory, amounts: &PeriodAmount) -> i64 {
        if category.is_revenue() {
            ReportCalculator::variance_for_revenue(amounts.actual, amounts.budget)
        } else {
            ReportCalculator::variance_for_cost(amounts.actual, amounts.budget)
        }
    }

    fn profit_summary(profit: &PeriodAmount, revenue: &PeriodAmount) -> ProfitSummary {
        ProfitSummary {
            amounts: *profit,
            variance_percent: ReportCalculator::variance_for_revenue(profit.actual, profit.budget),
            percent_of_revenue: ReportCalculator::percentage_of_revenue(
                profit.actual,
                revenue.actual,
            ),
            cumulative_percent_of_revenue: ReportCalculator::percentage_of_revenue(
                profit.cumulative,
                revenue.cumulative,
            ),
        }
    }

    fn ledger_matches(entry: &LedgerEntry, filter: &LedgerFilter) -> bool {
        filter
            .account_code
            .as_deref()
            .is_none_or(|code| entry.account_code == code)
            && filter
                .jv_number
                .as_deref()
                .is_none_or(|jv| entry.jv_number.eq_ignore_ascii_case(jv))
            && filter.from.is_none_or(|from| entry.date >= from)
            && filter.to.is_none_or(|to| entry.date <= to)
    }

    fn account_depth(code: &str, parents: &HashMap<String, Option<String>>) -> usize {
        let mut seen: HashSet<&str> = HashSet::from([code]);
        let mut depth = 0;
        let mut current = code;

        while let Some(Some(parent)) = parents.get(current) {
            if !parents.contains_key(parent.as_str()) || !seen.insert(parent.as_str()) {
                break;
            }
            depth += 1;
            current = parent.as_str();
        }
        depth
    }
}
