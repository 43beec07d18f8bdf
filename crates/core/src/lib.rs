pub mod errors;
pub mod format;
pub mod models;
pub mod providers;
pub mod services;

use chrono::NaiveDate;
use std::sync::Arc;

use errors::CoreError;
use models::{
    analytics::{AnalysisPeriod, AnalysisReport, Dashboard, FinancialSummary, MonthlyTrend},
    chart::TrendBar,
    record::RecordKind,
    settings::ClientSettings,
};
use providers::{
    http_api::HttpFinanceApi,
    traits::{AnalysisSource, RecordSource},
};
use services::{
    analytics_service::AnalyticsService,
    chart_service::{ChartService, DEFAULT_MAX_BARS},
    record_service::RecordService,
};

/// Main entry point for the finance tracker client core.
/// Holds one screen per record kind plus the services behind the dashboard
/// and analysis views. The UI shell awaits the async calls and renders what
/// comes back.
#[must_use]
pub struct FinanceTracker {
    settings: ClientSettings,
    expenses: RecordService,
    investments: RecordService,
    analysis_source: Arc<dyn AnalysisSource>,
    analytics_service: AnalyticsService,
    chart_service: ChartService,
}

impl std::fmt::Debug for FinanceTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceTracker")
            .field("api_base_url", &self.settings.api_base_url)
            .field("expenses", &self.expenses.list().records().len())
            .field("investments", &self.investments.list().records().len())
            .finish()
    }
}

impl FinanceTracker {
    /// Connect to the HTTP API described by `settings`.
    pub fn new(settings: ClientSettings) -> Result<Self, CoreError> {
        settings.validate()?;
        let api = Arc::new(HttpFinanceApi::new(&settings));
        Ok(Self::with_sources(settings, api.clone(), api))
    }

    /// Build on custom sources (offline shells, tests).
    pub fn with_sources(
        settings: ClientSettings,
        records: Arc<dyn RecordSource>,
        analysis: Arc<dyn AnalysisSource>,
    ) -> Self {
        let page_size = settings.page_size;
        Self {
            expenses: RecordService::new(RecordKind::Expense, records.clone(), page_size),
            investments: RecordService::new(RecordKind::Investment, records, page_size),
            analysis_source: analysis,
            analytics_service: AnalyticsService::new(),
            chart_service: ChartService::new(),
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    // ── Screens ─────────────────────────────────────────────────────

    pub fn expenses(&self) -> &RecordService {
        &self.expenses
    }

    pub fn expenses_mut(&mut self) -> &mut RecordService {
        &mut self.expenses
    }

    pub fn investments(&self) -> &RecordService {
        &self.investments
    }

    pub fn investments_mut(&mut self) -> &mut RecordService {
        &mut self.investments
    }

    /// The screen for `kind`.
    pub fn screen(&self, kind: RecordKind) -> &RecordService {
        match kind {
            RecordKind::Expense => &self.expenses,
            RecordKind::Investment => &self.investments,
        }
    }

    pub fn screen_mut(&mut self, kind: RecordKind) -> &mut RecordService {
        match kind {
            RecordKind::Expense => &mut self.expenses,
            RecordKind::Investment => &mut self.investments,
        }
    }

    /// Reload both record screens. Both fetches are attempted; the first
    /// error (if any) is returned.
    pub async fn reload_all(&mut self) -> Result<(), CoreError> {
        let expenses = self.expenses.reload().await;
        let investments = self.investments.reload().await;
        expenses.and(investments)
    }

    // ── Dashboard & Analysis ────────────────────────────────────────

    /// Summary cards and both category charts.
    /// A missing breakdown only empties its chart; a missing summary is an error.
    pub async fn load_dashboard(&self) -> Result<Dashboard, CoreError> {
        let source = self.analysis_source.as_ref();
        let summary = source.summary(None).await?;

        let expenses = self
            .analytics_service
            .breakdown_or_empty(source, RecordKind::Expense, None)
            .await;
        let investments = self
            .analytics_service
            .breakdown_or_empty(source, RecordKind::Investment, None)
            .await;

        Ok(Dashboard {
            summary,
            expense_chart: self.chart_service.bar_rows(&expenses, DEFAULT_MAX_BARS),
            investment_chart: self.chart_service.bar_rows(&investments, DEFAULT_MAX_BARS),
        })
    }

    /// The analysis screen for `period`.
    pub async fn load_analysis(&self, period: AnalysisPeriod) -> Result<AnalysisReport, CoreError> {
        self.analytics_service
            .build_report(
                self.analysis_source.as_ref(),
                period,
                self.settings.trend_months,
            )
            .await
    }

    /// Analysis for the month containing `today`.
    pub async fn load_current_month_analysis(
        &self,
        today: NaiveDate,
    ) -> Result<AnalysisReport, CoreError> {
        self.load_analysis(AnalysisPeriod::current_month(today)).await
    }

    /// Trend columns ready for the chart, from a report's trend.
    #[must_use]
    pub fn trend_chart(&self, trend: &[MonthlyTrend]) -> Vec<TrendBar> {
        self.chart_service.trend_bars(trend)
    }

    // ── Local derivations ───────────────────────────────────────────

    /// Summary computed from the records already loaded in both screens.
    #[must_use]
    pub fn local_summary(&self) -> FinancialSummary {
        self.analytics_service.summarize(
            self.expenses.list().records(),
            self.investments.list().records(),
        )
    }

    /// Month-by-month trend from the loaded records, ending at `today`'s month.
    #[must_use]
    pub fn local_trend(&self, today: NaiveDate) -> Vec<MonthlyTrend> {
        self.analytics_service.monthly_trend(
            self.expenses.list().records(),
            self.investments.list().records(),
            self.settings.trend_months,
            today,
        )
    }
}
