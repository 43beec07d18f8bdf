use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::analytics::{CategoryTotal, FinancialSummary, MonthlyTrend, YearMonth};
use crate::models::record::{Record, RecordDraft, RecordKind};

/// Where expense and investment records come from.
///
/// The HTTP client implements this; tests and offline shells plug in their
/// own. Screens only ever see the trait, so the transport can change without
/// touching list or form logic.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RecordSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Every record of `kind`, in the order the backend returns them.
    async fn list_records(&self, kind: RecordKind) -> Result<Vec<Record>, CoreError>;

    /// A single record, used to prefill the edit form.
    async fn get_record(&self, kind: RecordKind, id: i64) -> Result<Record, CoreError>;

    async fn create_record(&self, kind: RecordKind, draft: &RecordDraft) -> Result<(), CoreError>;

    async fn update_record(
        &self,
        kind: RecordKind,
        id: i64,
        draft: &RecordDraft,
    ) -> Result<(), CoreError>;

    async fn delete_record(&self, kind: RecordKind, id: i64) -> Result<(), CoreError>;
}

/// Server-side aggregates behind the dashboard and analysis screens.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AnalysisSource: Send + Sync {
    /// Totals for all time (`None`) or a single month.
    async fn summary(&self, month: Option<YearMonth>) -> Result<FinancialSummary, CoreError>;

    /// Per-category totals of `kind`, largest first.
    async fn category_breakdown(
        &self,
        kind: RecordKind,
        month: Option<YearMonth>,
    ) -> Result<Vec<CategoryTotal>, CoreError>;

    /// The last `months` months of income vs. expenses, oldest first.
    async fn monthly_trend(&self, months: u32) -> Result<Vec<MonthlyTrend>, CoreError>;
}
