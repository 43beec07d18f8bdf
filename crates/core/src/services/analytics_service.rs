use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::errors::CoreError;
use crate::format::format_currency;
use crate::models::analytics::{
    AnalysisPeriod, AnalysisReport, CategoryTotal, FinancialSummary, Insight, InsightLevel,
    MonthlyTrend, YearMonth,
};
use crate::models::record::{Listable, RecordKind};
use crate::providers::traits::AnalysisSource;

/// Savings rate (percent of income) considered healthy.
pub const TARGET_SAVINGS_RATE: f64 = 20.0;

/// Savings rate below which the user is nudged to cut spending.
pub const MODERATE_SAVINGS_RATE: f64 = 10.0;

/// Categories listed in the analysis screen's "top" sections.
pub const TOP_CATEGORY_COUNT: usize = 3;

/// Derives summaries, breakdowns, trends and recommendations.
///
/// The local functions work on records already loaded into the list screens
/// (no I/O, easy to test). `build_report` assembles the analysis screen from
/// the server-side aggregates instead.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    // ── Local aggregation ───────────────────────────────────────────

    /// Totals, balance and savings rate from raw records.
    ///
    /// Savings rate = balance / income × 100, rounded to two decimals;
    /// 0 when there is no income.
    pub fn summarize<E: Listable, I: Listable>(
        &self,
        expenses: &[E],
        investments: &[I],
    ) -> FinancialSummary {
        let total_expenses: f64 = expenses.iter().map(E::amount).sum();
        let total_investments: f64 = investments.iter().map(I::amount).sum();
        self.summary_from_totals(total_investments, total_expenses)
    }

    pub fn summary_from_totals(
        &self,
        total_investments: f64,
        total_expenses: f64,
    ) -> FinancialSummary {
        let balance = total_investments - total_expenses;
        let savings_rate = if total_investments > 0.0 {
            round2(balance / total_investments * 100.0)
        } else {
            0.0
        };
        FinancialSummary {
            total_investments,
            total_expenses,
            balance,
            savings_rate,
        }
    }

    /// Per-category totals with their share of the grand total.
    ///
    /// Largest first; categories with equal totals keep first-appearance order.
    pub fn breakdown_by_category<R: Listable>(&self, records: &[R]) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for record in records {
            match totals.iter_mut().find(|t| t.category == record.category()) {
                Some(entry) => entry.total += record.amount(),
                None => totals.push(CategoryTotal {
                    category: record.category().to_string(),
                    total: record.amount(),
                    percentage: 0.0,
                }),
            }
        }

        let grand_total: f64 = totals.iter().map(|t| t.total).sum();
        for entry in &mut totals {
            entry.percentage = if grand_total > 0.0 {
                round2(entry.total / grand_total * 100.0)
            } else {
                0.0
            };
        }

        totals.sort_by(|a, b| b.total.total_cmp(&a.total));
        totals
    }

    /// Records dated within `month`.
    pub fn in_month<'a, R: Listable>(&self, records: &'a [R], month: YearMonth) -> Vec<&'a R> {
        records.iter().filter(|r| month.contains(r.date())).collect()
    }

    /// The last `months` calendar months ending with `today`'s month, oldest first.
    pub fn monthly_trend<E: Listable, I: Listable>(
        &self,
        expenses: &[E],
        investments: &[I],
        months: u32,
        today: NaiveDate,
    ) -> Vec<MonthlyTrend> {
        let mut window = Vec::new();
        let mut month = YearMonth::of(today);
        for _ in 0..months {
            window.push(month);
            month = month.previous();
        }
        window.reverse();

        window
            .into_iter()
            .map(|ym| {
                let total_expenses: f64 = expenses
                    .iter()
                    .filter(|r| ym.contains(r.date()))
                    .map(E::amount)
                    .sum();
                let total_investments: f64 = investments
                    .iter()
                    .filter(|r| ym.contains(r.date()))
                    .map(I::amount)
                    .sum();
                MonthlyTrend {
                    period: ym.to_string(),
                    total_investments,
                    total_expenses,
                    balance: total_investments - total_expenses,
                }
            })
            .collect()
    }

    /// Totals per calendar quarter, labelled `YYYY-Qn`, in chronological order.
    pub fn quarterly_totals<R: Listable>(&self, records: &[R]) -> Vec<(String, f64)> {
        let mut buckets: BTreeMap<(i32, u32), f64> = BTreeMap::new();
        for record in records {
            let ym = YearMonth::of(record.date());
            *buckets.entry((ym.year(), ym.quarter())).or_insert(0.0) += record.amount();
        }
        buckets
            .into_iter()
            .map(|((year, quarter), total)| (format!("{year}-Q{quarter}"), total))
            .collect()
    }

    /// The first `n` entries of a largest-first breakdown.
    pub fn top_categories(&self, breakdown: &[CategoryTotal], n: usize) -> Vec<CategoryTotal> {
        breakdown.iter().take(n).cloned().collect()
    }

    // ── Recommendations ─────────────────────────────────────────────

    /// Recommendations for a summary.
    ///
    /// One insight for the savings rate (≥ 20 success, ≥ 10 warning,
    /// negative danger, anything else info), plus a suggestion to invest half
    /// of a positive balance.
    pub fn insights(&self, summary: &FinancialSummary) -> Vec<Insight> {
        let mut insights = Vec::new();
        let rate = summary.savings_rate;

        let first = if rate >= TARGET_SAVINGS_RATE {
            Insight {
                level: InsightLevel::Success,
                message: format!(
                    "Excellent! You are saving more than {TARGET_SAVINGS_RATE}% of your income."
                ),
            }
        } else if rate >= MODERATE_SAVINGS_RATE {
            Insight {
                level: InsightLevel::Warning,
                message: "You are saving a moderate share. Try cutting unnecessary expenses."
                    .to_string(),
            }
        } else if rate < 0.0 {
            Insight {
                level: InsightLevel::Danger,
                message: "Alert! Your expenses exceed your income. Review your budget urgently."
                    .to_string(),
            }
        } else {
            Insight {
                level: InsightLevel::Info,
                message: format!(
                    "You can improve your savings. The recommended target is {TARGET_SAVINGS_RATE}%."
                ),
            }
        };
        insights.push(first);

        if summary.balance > 0.0 {
            insights.push(Insight {
                level: InsightLevel::Success,
                message: format!(
                    "Your balance is positive. Consider investing {}.",
                    format_currency(summary.balance * 0.5)
                ),
            });
        }

        insights
    }

    // ── Analysis screen ─────────────────────────────────────────────

    /// Assemble the analysis screen for `period` from the server aggregates.
    ///
    /// The summary (or trend) is required; a failed breakdown only empties
    /// its "top" section.
    pub async fn build_report(
        &self,
        source: &dyn AnalysisSource,
        period: AnalysisPeriod,
        trend_months: u32,
    ) -> Result<AnalysisReport, CoreError> {
        let period_label = period.label(trend_months);

        let month = match period {
            AnalysisPeriod::General => None,
            AnalysisPeriod::Monthly(ym) => Some(ym),
            AnalysisPeriod::Quarterly => {
                let trend = source.monthly_trend(trend_months).await?;
                return Ok(AnalysisReport {
                    period,
                    period_label,
                    summary: None,
                    insights: Vec::new(),
                    top_expenses: Vec::new(),
                    top_investments: Vec::new(),
                    trend: Some(trend),
                });
            }
        };

        let summary = source.summary(month).await?;
        let expenses = self
            .breakdown_or_empty(source, RecordKind::Expense, month)
            .await;
        let investments = self
            .breakdown_or_empty(source, RecordKind::Investment, month)
            .await;

        Ok(AnalysisReport {
            period,
            period_label,
            insights: self.insights(&summary),
            summary: Some(summary),
            top_expenses: self.top_categories(&expenses, TOP_CATEGORY_COUNT),
            top_investments: self.top_categories(&investments, TOP_CATEGORY_COUNT),
            trend: None,
        })
    }

    /// Breakdown from the server, or an empty list (logged) if it fails.
    pub async fn breakdown_or_empty(
        &self,
        source: &dyn AnalysisSource,
        kind: RecordKind,
        month: Option<YearMonth>,
    ) -> Vec<CategoryTotal> {
        match source.category_breakdown(kind, month).await {
            Ok(breakdown) => breakdown,
            Err(e) => {
                tracing::warn!(%kind, error = %e, "category breakdown unavailable");
                Vec::new()
            }
        }
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
