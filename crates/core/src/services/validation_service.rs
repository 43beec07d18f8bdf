use chrono::NaiveDate;

use crate::errors::{CoreError, FieldError};
use crate::models::record::{RecordDraft, RecordForm};

/// Which side of `today` a date field may fall on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRules {
    pub allow_future: bool,
    pub allow_past: bool,
}

impl Default for DateRules {
    fn default() -> Self {
        Self {
            allow_future: true,
            allow_past: true,
        }
    }
}

/// Validates raw form input before anything is sent to the API.
///
/// Pure business logic: `today` is passed in so results are deterministic.
pub struct ValidationService;

impl ValidationService {
    pub fn new() -> Self {
        Self
    }

    /// Validate the expense/investment form and build the request body.
    ///
    /// Rules:
    /// - category is required
    /// - amount is a finite number greater than zero
    /// - date is `YYYY-MM-DD` and not after `today`
    /// - a blank description is sent as none
    ///
    /// Every failing field is reported, not just the first one.
    pub fn validate_record_form(
        &self,
        form: &RecordForm,
        today: NaiveDate,
    ) -> Result<RecordDraft, CoreError> {
        let mut errors = Vec::new();

        let category = Self::validate_required(&form.category, "category", "Category")
            .map_err(|e| errors.push(e))
            .ok();

        let amount = Self::validate_positive_number(&form.amount, "amount", "Amount")
            .map_err(|e| errors.push(e))
            .ok();

        let rules = DateRules {
            allow_future: false,
            allow_past: true,
        };
        let date = Self::validate_date(&form.date, "date", "Date", rules, today)
            .map_err(|e| errors.push(e))
            .ok();

        match (category, amount, date) {
            (Some(category), Some(amount), Some(date)) if errors.is_empty() => {
                let description = form.description.trim();
                Ok(RecordDraft {
                    category: category.to_string(),
                    amount,
                    date,
                    description: (!description.is_empty()).then(|| description.to_string()),
                })
            }
            _ => Err(CoreError::InvalidForm(errors)),
        }
    }

    /// Non-blank check. Returns the trimmed value.
    pub fn validate_required<'a>(
        value: &'a str,
        field: &str,
        label: &str,
    ) -> Result<&'a str, FieldError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(FieldError::new(field, format!("{label} is required")));
        }
        Ok(trimmed)
    }

    /// Parses a finite number strictly greater than zero.
    pub fn validate_positive_number(
        value: &str,
        field: &str,
        label: &str,
    ) -> Result<f64, FieldError> {
        let trimmed = Self::validate_required(value, field, label)?;

        let number: f64 = trimmed
            .parse()
            .ok()
            .filter(|n: &f64| n.is_finite())
            .ok_or_else(|| FieldError::new(field, format!("{label} must be a valid number")))?;

        if number <= 0.0 {
            return Err(FieldError::new(
                field,
                format!("{label} must be greater than zero"),
            ));
        }
        Ok(number)
    }

    /// Parses a `YYYY-MM-DD` date and checks it against `today`.
    pub fn validate_date(
        value: &str,
        field: &str,
        label: &str,
        rules: DateRules,
        today: NaiveDate,
    ) -> Result<NaiveDate, FieldError> {
        let trimmed = Self::validate_required(value, field, label)?;

        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map_err(|_| FieldError::new(field, format!("{label} is not a valid date")))?;

        if !rules.allow_future && date > today {
            return Err(FieldError::new(
                field,
                format!("{label} cannot be in the future"),
            ));
        }
        if !rules.allow_past && date < today {
            return Err(FieldError::new(field, format!("{label} cannot be in the past")));
        }
        Ok(date)
    }
}

impl Default for ValidationService {
    fn default() -> Self {
        Self::new()
    }
}
