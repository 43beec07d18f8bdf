use chrono::NaiveDate;
use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::listing::PageView;
use crate::models::record::{Record, RecordForm, RecordKind};
use crate::providers::traits::RecordSource;
use crate::services::list_view::ListViewController;
use crate::services::validation_service::ValidationService;

/// Screen logic for one record kind (the expenses table or the investments table).
///
/// Owns the list view state for that screen and talks to the record source.
/// Every successful create/update/delete is followed by a full reload, so the
/// table mirrors the backend. A write that reached the source always reports
/// `Ok`; if the reload after it fails, the previous rows stay in place.
/// A failed `reload` on its own hands the error back for the shell to show.
pub struct RecordService {
    kind: RecordKind,
    source: Arc<dyn RecordSource>,
    list: ListViewController<Record>,
    validation: ValidationService,
}

impl RecordService {
    pub fn new(kind: RecordKind, source: Arc<dyn RecordSource>, page_size: usize) -> Self {
        Self {
            kind,
            source,
            list: ListViewController::with_page_size(page_size),
            validation: ValidationService::new(),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Filter / sort / page state of this screen.
    pub fn list(&self) -> &ListViewController<Record> {
        &self.list
    }

    /// Mutable access for the filter inputs, sort headers and pagination buttons.
    pub fn list_mut(&mut self) -> &mut ListViewController<Record> {
        &mut self.list
    }

    /// Shortcut for `list().current_page()`.
    #[must_use]
    pub fn current_page(&self) -> PageView<'_, Record> {
        self.list.current_page()
    }

    /// Fetch every record of this kind and replace the list.
    ///
    /// On failure the previously loaded records stay in place.
    pub async fn reload(&mut self) -> Result<(), CoreError> {
        match self.source.list_records(self.kind).await {
            Ok(records) => {
                tracing::debug!(
                    kind = %self.kind,
                    source = self.source.name(),
                    count = records.len(),
                    "records reloaded"
                );
                self.list.set_records(records);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(kind = %self.kind, error = %e, "failed to load records; keeping previous list");
                Err(e)
            }
        }
    }

    /// Fetch one record and turn it into a prefilled edit form.
    pub async fn load_for_edit(&self, id: i64) -> Result<RecordForm, CoreError> {
        let record = self.source.get_record(self.kind, id).await?;
        Ok(RecordForm::from(&record))
    }

    /// Validate the form, create the record, then reload.
    pub async fn create(&mut self, form: &RecordForm, today: NaiveDate) -> Result<(), CoreError> {
        let draft = self.validation.validate_record_form(form, today)?;
        self.source.create_record(self.kind, &draft).await?;
        tracing::info!(kind = %self.kind, category = %draft.category, "record created");
        self.refresh_after_write().await;
        Ok(())
    }

    /// Validate the form, update record `id`, then reload.
    pub async fn update(
        &mut self,
        id: i64,
        form: &RecordForm,
        today: NaiveDate,
    ) -> Result<(), CoreError> {
        let draft = self.validation.validate_record_form(form, today)?;
        self.source.update_record(self.kind, id, &draft).await?;
        tracing::info!(kind = %self.kind, id, "record updated");
        self.refresh_after_write().await;
        Ok(())
    }

    /// Delete record `id`, then reload.
    pub async fn delete(&mut self, id: i64) -> Result<(), CoreError> {
        self.source.delete_record(self.kind, id).await?;
        tracing::info!(kind = %self.kind, id, "record deleted");
        self.refresh_after_write().await;
        Ok(())
    }

    /// The write already stands; a failed reload only leaves the list stale.
    async fn refresh_after_write(&mut self) {
        if self.reload().await.is_err() {
            tracing::warn!(kind = %self.kind, "list is stale until the next reload");
        }
    }
}
