use serde::{Deserialize, Serialize};

/// Column a list view can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    /// Case-sensitive string order
    Category,
    /// Numeric order
    Amount,
    /// Chronological order
    Date,
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortField::Category => write!(f, "category"),
            SortField::Amount => write!(f, "amount"),
            SortField::Date => write!(f, "date"),
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = crate::errors::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "category" => Ok(SortField::Category),
            "amount" => Ok(SortField::Amount),
            "date" => Ok(SortField::Date),
            other => Err(crate::errors::CoreError::ValidationError(format!(
                "Unknown sort field '{other}' (expected category, amount or date)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = crate::errors::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(crate::errors::CoreError::ValidationError(format!(
                "Unknown sort direction '{other}' (expected asc or desc)"
            ))),
        }
    }
}

/// One page of a list view, ready for the table and pagination widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a, R> {
    /// At most `page_size` rows
    pub items: Vec<&'a R>,

    /// 1-based, always within `1..=total_pages`
    pub page_number: usize,

    /// Never below 1, even for an empty list
    pub total_pages: usize,

    /// Rows passing the active filters, across all pages
    pub total_count: usize,
}

impl<R> PageView<'_, R> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }
}
