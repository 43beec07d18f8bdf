use serde::{Deserialize, Serialize};

/// One horizontal bar of a category chart.
///
/// The core computes the numbers; the frontend just draws them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartRow {
    pub label: String,
    pub value: f64,

    /// Share shown next to the value (e.g. 40.0 = 40%)
    pub percentage: f64,

    /// Bar width in percent of the track, clamped to 0..=100
    pub width_pct: f64,

    /// CSS hex colour for the category
    pub color: String,
}

/// One slice of a pie legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub percentage: f64,
    pub color: String,
}

/// A polyline vertex in percent coordinates (origin top-left, y grows down).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub label: String,
    pub x_pct: f64,
    pub y_pct: f64,
}

/// Paired income/expense columns for one month of the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendBar {
    pub period: String,

    /// Column heights in percent of the tallest value in the series
    pub investment_height_pct: f64,
    pub expense_height_pct: f64,

    pub balance: f64,
    pub balance_positive: bool,
}

/// How healthy a gauge reading is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GaugeLevel {
    Good,
    Fair,
    Poor,
}

/// A circular percentage gauge (e.g. savings rate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeReading {
    pub percentage: f64,

    /// Portion of the ring to fill, 0.0..=1.0
    pub fill_fraction: f64,

    pub level: GaugeLevel,
}
