use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Which screen a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// Money going out ("gastos" on the API)
    Expense,
    /// Income and investments ("inversiones" on the API)
    Investment,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::Expense, RecordKind::Investment];

    /// Collection path segment on the API.
    pub fn collection(&self) -> &'static str {
        match self {
            RecordKind::Expense => "gastos",
            RecordKind::Investment => "inversiones",
        }
    }

    /// Suffix the API appends to every field name of this kind
    /// (`tipo_gasto`, `cantidad_inversion`, ...).
    pub fn field_suffix(&self) -> &'static str {
        match self {
            RecordKind::Expense => "gasto",
            RecordKind::Investment => "inversion",
        }
    }

    pub fn category_field(&self) -> String {
        format!("tipo_{}", self.field_suffix())
    }

    pub fn amount_field(&self) -> String {
        format!("cantidad_{}", self.field_suffix())
    }

    pub fn date_field(&self) -> String {
        format!("fecha_{}", self.field_suffix())
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Expense => write!(f, "Expense"),
            RecordKind::Investment => write!(f, "Investment"),
        }
    }
}

/// The shape a list view needs from a row: something to filter, sort and page over.
///
/// Implemented by [`Record`]; screens with other row types implement it
/// themselves and reuse the same controller.
pub trait Listable {
    fn category(&self) -> &str;
    fn amount(&self) -> f64;
    fn date(&self) -> NaiveDate;
    fn description(&self) -> Option<&str>;
}

/// A single expense or investment entry, normalized from the API's
/// kind-specific field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Assigned by the backing store, never changed by the client
    pub id: i64,

    pub kind: RecordKind,

    /// Free-text label, e.g. "comida" or "salario"
    pub category: String,

    /// Positive when entered through the form; loaded data is taken as-is
    pub amount: f64,

    pub date: NaiveDate,

    #[serde(default)]
    pub description: Option<String>,
}

impl Record {
    pub fn new(
        id: i64,
        kind: RecordKind,
        category: impl Into<String>,
        amount: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            kind,
            category: category.into(),
            amount,
            date,
            description: None,
        }
    }

    /// Attach a description (builder style).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Listable for Record {
    fn category(&self) -> &str {
        &self.category
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A validated create/update request body.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl RecordDraft {
    /// JSON body in the API's field naming for `kind`.
    pub fn to_payload(&self, kind: RecordKind) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        body.insert(kind.category_field(), self.category.clone().into());
        body.insert(kind.amount_field(), self.amount.into());
        body.insert(
            kind.date_field(),
            self.date.format("%Y-%m-%d").to_string().into(),
        );
        body.insert(
            "descripcion".to_string(),
            self.description.clone().map_or(serde_json::Value::Null, Into::into),
        );
        serde_json::Value::Object(body)
    }
}

/// Raw form input, exactly as typed. Validation turns it into a [`RecordDraft`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordForm {
    pub category: String,
    pub amount: String,
    pub date: String,
    pub description: String,
}

impl From<&Record> for RecordForm {
    /// Prefill the edit form from a stored record.
    fn from(record: &Record) -> Self {
        Self {
            category: record.category.clone(),
            amount: record.amount.to_string(),
            date: record.date.format("%Y-%m-%d").to_string(),
            description: record.description.clone().unwrap_or_default(),
        }
    }
}

// ── API wire format ─────────────────────────────────────────────────

/// A record as the API returns it. Field names carry the kind suffix, so
/// both spellings are accepted and the kind is attached afterwards.
#[derive(Debug, Deserialize)]
pub struct WireRecord {
    pub id: i64,

    #[serde(alias = "tipo_gasto", alias = "tipo_inversion")]
    pub category: String,

    #[serde(alias = "cantidad_gasto", alias = "cantidad_inversion")]
    pub amount: f64,

    #[serde(
        alias = "fecha_gasto",
        alias = "fecha_inversion",
        deserialize_with = "deserialize_api_date"
    )]
    pub date: NaiveDate,

    #[serde(default, alias = "descripcion")]
    pub description: Option<String>,
}

impl WireRecord {
    pub fn into_record(self, kind: RecordKind) -> Record {
        Record {
            id: self.id,
            kind,
            category: self.category,
            amount: self.amount,
            date: self.date,
            description: self.description,
        }
    }
}

/// Accepts `YYYY-MM-DD` as well as a full ISO timestamp (`YYYY-MM-DDTHH:MM:SS`),
/// keeping only the calendar date.
fn deserialize_api_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let date_part = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(serde::de::Error::custom)
}
