use shared::{CategoryBreakdown, DashboardSummaryResponse, Totals, TrendPoint};

use crate::domain::aggregator::Summary;

pub struct DashboardMapper;

impl DashboardMapper {
    pub fn to_summary_response(summary: Summary) -> DashboardSummaryResponse {
        DashboardSummaryResponse {
            totals: Totals {
                income: summary.totals.income.to_decimal(),
                expense: summary.totals.expense.to_decimal(),
                net: summary.totals.net().to_decimal(),
            },
            by_category: summary
                .by_category
                .into_iter()
                .map(|entry| CategoryBreakdown {
                    category: entry.category,
                    income: entry.flow.income.to_decimal(),
                    expense: entry.flow.expense.to_decimal(),
                })
                .collect(),
            trend: summary
                .trend
                .into_iter()
                .map(|point| TrendPoint {
                    date: point.date,
                    income: point.flow.income.to_decimal(),
                    expense: point.flow.expense.to_decimal(),
                })
                .collect(),
        }
    }
}
