use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Income vs. spending over some period.
///
/// Deserializes from the analysis endpoints, which use Spanish field names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Sum of all investments / income
    #[serde(alias = "total_inversiones")]
    pub total_investments: f64,

    /// Sum of all expenses
    #[serde(alias = "total_gastos")]
    pub total_expenses: f64,

    /// `total_investments - total_expenses`
    pub balance: f64,

    /// Balance as a percentage of income (e.g. 25.0 = 25%)
    #[serde(alias = "porcentaje_ahorro")]
    pub savings_rate: f64,
}

/// Total and share of one category within a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    #[serde(alias = "tipo_gasto", alias = "tipo_inversion")]
    pub category: String,

    pub total: f64,

    /// Share of the breakdown's grand total (e.g. 40.0 = 40%)
    #[serde(alias = "porcentaje", default)]
    pub percentage: f64,
}

/// One month of the income/expense trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    /// Display label, e.g. "2025-03"
    #[serde(alias = "periodo", alias = "mes")]
    pub period: String,

    #[serde(alias = "total_inversiones", default)]
    pub total_investments: f64,

    #[serde(alias = "total_gastos", default)]
    pub total_expenses: f64,

    #[serde(default)]
    pub balance: f64,
}

/// A calendar month, used for monthly summaries and bucketing.
///
/// Only built through [`YearMonth::new`], [`YearMonth::of`] or validated
/// deserialization, so `month` is always 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = String;

    fn try_from(raw: RawYearMonth) -> Result<Self, Self::Error> {
        YearMonth::new(raw.year, raw.month)
            .ok_or_else(|| format!("month {} is outside 1..=12", raw.month))
    }
}

impl YearMonth {
    /// Returns `None` when `month` is outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1..=12
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The month before this one.
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// 1..=4
    pub fn quarter(&self) -> u32 {
        (self.month - 1) / 3 + 1
    }

    /// English month name followed by the year, e.g. "March 2025".
    pub fn display_name(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| chrono::Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("?");
        format!("{name} {}", self.year)
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Time window of the analysis screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisPeriod {
    /// Everything ever recorded
    General,
    /// A single calendar month
    Monthly(YearMonth),
    /// Month-by-month trend over the last few months
    Quarterly,
}

impl AnalysisPeriod {
    /// Monthly period for the month containing `today`.
    pub fn current_month(today: NaiveDate) -> Self {
        AnalysisPeriod::Monthly(YearMonth::of(today))
    }

    pub fn label(&self, trend_months: u32) -> String {
        match self {
            AnalysisPeriod::General => "All time".to_string(),
            AnalysisPeriod::Monthly(ym) => ym.display_name(),
            AnalysisPeriod::Quarterly => format!("Last {trend_months} months"),
        }
    }
}

/// Severity of an automatically generated recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsightLevel {
    Success,
    Warning,
    Danger,
    Info,
}

/// A recommendation derived from a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub level: InsightLevel,
    pub message: String,
}

/// Everything the analysis screen shows for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub period: AnalysisPeriod,

    /// Header label, e.g. "All time" or "March 2025"
    pub period_label: String,

    /// Present for general and monthly periods
    pub summary: Option<FinancialSummary>,

    pub insights: Vec<Insight>,

    /// Largest expense categories (at most three)
    pub top_expenses: Vec<CategoryTotal>,

    /// Largest income sources (at most three)
    pub top_investments: Vec<CategoryTotal>,

    /// Present for the quarterly period
    pub trend: Option<Vec<MonthlyTrend>>,
}

/// Summary cards plus the two category charts of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub summary: FinancialSummary,
    pub expense_chart: Vec<super::chart::BarChartRow>,
    pub investment_chart: Vec<super::chart::BarChartRow>,
}
