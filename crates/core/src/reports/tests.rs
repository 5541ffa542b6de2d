//! Property-based tests for reports module.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calculator::{ReportCalculator, VARIANCE_SENTINEL};
use super::service::ReportService;
use super::types::{AssetLine, LedgerEntry, LedgerFilter, LineCategory, LineItem, PeriodAmount};

fn amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000, 0u32..3).prop_map(|(n, scale)| Decimal::new(n, scale))
}

fn period_amount() -> impl Strategy<Value = PeriodAmount> {
    (amount(), amount(), amount(), amount())
        .prop_map(|(a, c, p, b)| PeriodAmount::new(a, c, p, b))
}

fn line_item() -> impl Strategy<Value = LineItem> {
    let category = prop_oneof![
        Just(None),
        Just(Some(LineCategory::Revenue)),
        Just(Some(LineCategory::DirectCost)),
        Just(Some(LineCategory::Expense)),
    ];
    (category, period_amount()).prop_map(|(category, amounts)| LineItem::new("line", category, amounts))
}

proptest! {
    /// Column totals equal the per-field sums.
    #[test]
    fn test_sum_amounts_is_fieldwise(rows in prop::collection::vec(period_amount(), 0..30)) {
        let total = ReportCalculator::sum_amounts(&rows);

        prop_assert_eq!(total.actual, rows.iter().map(|r| r.actual).sum::<Decimal>());
        prop_assert_eq!(total.cumulative, rows.iter().map(|r| r.cumulative).sum::<Decimal>());
        prop_assert_eq!(total.previous, rows.iter().map(|r| r.previous).sum::<Decimal>());
        prop_assert_eq!(total.budget, rows.iter().map(|r| r.budget).sum::<Decimal>());
    }

    /// Positive means favorable in both conventions: the two formulas are
    /// mirror images whenever the budget is nonzero and no rounding tie occurs.
    #[test]
    fn test_revenue_and_cost_variance_mirror(actual in amount(), budget in amount()) {
        prop_assume!(!budget.is_zero());
        let raw = (actual - budget) / budget * Decimal::ONE_HUNDRED;
        prop_assume!(raw.fract().abs() != Decimal::new(5, 1));

        let revenue = ReportCalculator::variance_for_revenue(actual, budget);
        let cost = ReportCalculator::variance_for_cost(actual, budget);
        prop_assert_eq!(revenue, -cost);
    }

    /// Zero budget yields 0 or the ±999 sentinel, never anything else.
    #[test]
    fn test_zero_budget_sentinel(actual in amount()) {
        let revenue = ReportCalculator::variance_for_revenue(actual, Decimal::ZERO);
        let cost = ReportCalculator::variance_for_cost(actual, Decimal::ZERO);

        if actual.is_zero() {
            prop_assert_eq!(revenue, 0);
            prop_assert_eq!(cost, 0);
        } else if actual.is_sign_positive() {
            prop_assert_eq!(revenue, VARIANCE_SENTINEL);
            prop_assert_eq!(cost, -VARIANCE_SENTINEL);
        } else {
            prop_assert_eq!(revenue, -VARIANCE_SENTINEL);
            prop_assert_eq!(cost, VARIANCE_SENTINEL);
        }
    }

    /// Percentage of zero revenue is always zero.
    #[test]
    fn test_percentage_of_zero_revenue(numerator in amount()) {
        prop_assert_eq!(ReportCalculator::percentage_of_revenue(numerator, Decimal::ZERO), 0);
    }

    /// GROSS_PROFIT = REVENUE - DIRECT_COST and NET_PROFIT = GROSS_PROFIT - EXPENSES.
    #[test]
    fn test_profit_identities(items in prop::collection::vec(line_item(), 0..25)) {
        let totals = ReportService::totals(&items);

        prop_assert_eq!(totals.gross_profit, totals.revenue - totals.direct_cost);
        prop_assert_eq!(totals.net_profit, totals.gross_profit - totals.expenses);
    }

    /// The P&L sections partition the tagged lines.
    #[test]
    fn test_profit_and_loss_partitions_lines(items in prop::collection::vec(line_item(), 0..25)) {
        let report = ReportService::profit_and_loss(&items);

        let listed = report.revenue.lines.len()
            + report.direct_costs.lines.len()
            + report.expenses.lines.len()
            + report.unclassified.len();
        prop_assert_eq!(listed, items.len());
    }

    /// Assets schedule grand total equals the sum of group totals.
    #[test]
    fn test_assets_grand_total(
        rows in prop::collection::vec((0usize..4, period_amount()), 0..30),
    ) {
        let lines: Vec<AssetLine> = rows
            .into_iter()
            .map(|(class, amounts)| AssetLine {
                asset_class: format!("Class {class}"),
                name: "asset".to_string(),
                amounts,
            })
            .collect();
        let expected: PeriodAmount = lines.iter().map(|l| l.amounts).sum();

        let report = ReportService::assets_schedule(lines);

        let group_sum: PeriodAmount = report.groups.iter().map(|g| g.total).sum();
        prop_assert_eq!(report.grand_total, group_sum);
        prop_assert_eq!(report.grand_total, expected);
    }

    /// Closing balance = opening + total debit - total credit.
    #[test]
    fn test_ledger_closing_balance(
        opening in amount(),
        postings in prop::collection::vec((0i64..365, 0i64..1_000_000, 0i64..1_000_000), 0..40),
    ) {
        let start = chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let entries: Vec<LedgerEntry> = postings
            .into_iter()
            .enumerate()
            .map(|(i, (day, debit, credit))| LedgerEntry {
                date: start + chrono::Duration::days(day),
                jv_number: format!("JV-{i}"),
                account_code: "1000".to_string(),
                account_name: "Cash".to_string(),
                description: String::new(),
                debit: Decimal::new(debit, 2),
                credit: Decimal::new(credit, 2),
            })
            .collect();

        let report = ReportService::general_ledger(entries, opening, &LedgerFilter::default()).unwrap();

        prop_assert_eq!(
            report.closing_balance,
            opening + report.total_debit - report.total_credit
        );
        if let Some(last) = report.rows.last() {
            prop_assert_eq!(last.running_balance, report.closing_balance);
        }
        prop_assert!(report.rows.windows(2).all(|w| w[0].entry.date <= w[1].entry.date));
    }
}
