use std::cmp::Ordering;

use crate::models::listing::{PageView, SortDirection, SortField};
use crate::models::record::Listable;

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Filter → sort → paginate pipeline behind the expense and investment tables.
///
/// One instance per screen. Pure in-memory state: no I/O, and every operation
/// is total (empty lists, empty filters and out-of-range pages all have a
/// defined result). The filtered set is kept as indices into `all`, so a page
/// borrows its rows instead of cloning them.
#[derive(Debug, Clone)]
pub struct ListViewController<R> {
    /// Records as last fetched, in API response order
    all: Vec<R>,

    /// Indices into `all` that pass the filters, in display order
    filtered: Vec<usize>,

    /// 1-based
    page: usize,

    page_size: usize,

    text_filter: String,

    /// Lowercased copy of `text_filter`, matched against lowercased fields
    text_needle: String,

    category_filter: Option<String>,

    sort: Option<(SortField, SortDirection)>,
}

impl<R: Listable> ListViewController<R> {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// A page size of 0 is treated as 1.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            all: Vec::new(),
            filtered: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
            text_filter: String::new(),
            text_needle: String::new(),
            category_filter: None,
            sort: None,
        }
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Replace the whole record set (after every fetch). Resets to page 1.
    pub fn set_records(&mut self, records: Vec<R>) {
        self.all = records;
        self.page = 1;
        self.refilter();
    }

    /// Case-insensitive substring match against category or description.
    /// An empty string matches everything. Resets to page 1.
    pub fn set_text_filter(&mut self, text: impl Into<String>) {
        self.text_filter = text.into();
        self.text_needle = self.text_filter.to_lowercase();
        self.page = 1;
        self.refilter();
    }

    /// Exact, case-sensitive category match. An empty string clears the
    /// filter. Resets to page 1.
    pub fn set_category_filter(&mut self, category: impl Into<String>) {
        let category = category.into();
        self.category_filter = if category.is_empty() {
            None
        } else {
            Some(category)
        };
        self.page = 1;
        self.refilter();
    }

    /// Sort the filtered rows. Stable: rows with equal keys keep their
    /// current relative order. Keeps the current page.
    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        self.sort = Some((field, direction));
        self.sort_filtered(field, direction);
    }

    /// Drop the active sort and fall back to API response order. Keeps the current page.
    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.refilter();
    }

    /// Jump to page `n`, clamped to `1..=total_pages()`.
    pub fn go_to_page(&mut self, n: i64) {
        let last = i64::try_from(self.total_pages()).unwrap_or(i64::MAX);
        self.page = usize::try_from(n.clamp(1, last)).unwrap_or(1);
    }

    pub fn next_page(&mut self) {
        let next = i64::try_from(self.page).unwrap_or(i64::MAX).saturating_add(1);
        self.go_to_page(next);
    }

    pub fn previous_page(&mut self) {
        let prev = i64::try_from(self.page).unwrap_or(i64::MAX).saturating_sub(1);
        self.go_to_page(prev);
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// The rows to draw plus pagination metadata.
    #[must_use]
    pub fn current_page(&self) -> PageView<'_, R> {
        let total_pages = self.total_pages();
        let page_number = self.page.clamp(1, total_pages);
        let start = (page_number - 1) * self.page_size;
        let end = (start + self.page_size).min(self.filtered.len());

        let items = self
            .filtered
            .get(start..end)
            .unwrap_or(&[])
            .iter()
            .map(|&i| &self.all[i])
            .collect();

        PageView {
            items,
            page_number,
            total_pages,
            total_count: self.filtered.len(),
        }
    }

    /// `ceil(filtered / page_size)`, never below 1.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(self.page_size).max(1)
    }

    #[must_use]
    pub fn page_number(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// All loaded records, in API order.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.all
    }

    /// Rows passing the filters, in display order, across all pages.
    pub fn filtered(&self) -> impl Iterator<Item = &R> {
        self.filtered.iter().map(|&i| &self.all[i])
    }

    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    /// Sum of `amount` over the filtered rows.
    #[must_use]
    pub fn filtered_total(&self) -> f64 {
        self.filtered().map(R::amount).sum()
    }

    /// Distinct categories of the loaded records, sorted, for the category dropdown.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.all.iter().map(R::category).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    #[must_use]
    pub fn text_filter(&self) -> &str {
        &self.text_filter
    }

    #[must_use]
    pub fn category_filter(&self) -> Option<&str> {
        self.category_filter.as_deref()
    }

    #[must_use]
    pub fn sort(&self) -> Option<(SortField, SortDirection)> {
        self.sort
    }

    // ── Internal ────────────────────────────────────────────────────

    fn matches(&self, record: &R) -> bool {
        if let Some(category) = &self.category_filter {
            if record.category() != category.as_str() {
                return false;
            }
        }

        if self.text_needle.is_empty() {
            return true;
        }

        record.category().to_lowercase().contains(&self.text_needle)
            || record
                .description()
                .is_some_and(|d| d.to_lowercase().contains(&self.text_needle))
    }

    /// Rebuild `filtered` from `all` and re-apply the active sort.
    fn refilter(&mut self) {
        self.filtered = (0..self.all.len())
            .filter(|&i| self.matches(&self.all[i]))
            .collect();

        if let Some((field, direction)) = self.sort {
            self.sort_filtered(field, direction);
        }

        tracing::trace!(
            total = self.all.len(),
            filtered = self.filtered.len(),
            "list view recomputed"
        );
    }

    fn sort_filtered(&mut self, field: SortField, direction: SortDirection) {
        let all = &self.all;
        // slice::sort_by is stable
        self.filtered
            .sort_by(|&a, &b| compare(&all[a], &all[b], field, direction));
    }
}

impl<R: Listable> Default for ListViewController<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn compare<R: Listable>(a: &R, b: &R, field: SortField, direction: SortDirection) -> Ordering {
    let ascending = match field {
        SortField::Category => a.category().cmp(b.category()),
        SortField::Amount => a.amount().total_cmp(&b.amount()),
        SortField::Date => a.date().cmp(&b.date()),
    };
    match direction {
        SortDirection::Ascending => ascending,
        SortDirection::Descending => ascending.reverse(),
    }
}
