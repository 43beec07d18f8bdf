use crate::models::analytics::{CategoryTotal, MonthlyTrend};
use crate::models::chart::{BarChartRow, GaugeLevel, GaugeReading, LinePoint, PieSlice, TrendBar};

/// Colour for categories missing from the palette.
pub const DEFAULT_CATEGORY_COLOR: &str = "#64748b";

/// Bars drawn by a category chart unless told otherwise.
pub const DEFAULT_MAX_BARS: usize = 10;

/// Fixed colour per known category, matched case-insensitively.
pub fn category_color(category: &str) -> &'static str {
    match category.to_lowercase().as_str() {
        "comida" => "#10b981",
        "transporte" => "#3b82f6",
        "servicios" => "#f59e0b",
        "entretenimiento" => "#8b5cf6",
        "salud" => "#ef4444",
        "educación" | "trabajo" => "#6366f1",
        "ropa" | "arriendo" => "#ec4899",
        "hogar" | "negocio" => "#14b8a6",
        _ => DEFAULT_CATEGORY_COLOR,
    }
}

/// Generates chart-ready data sets from summaries and breakdowns.
///
/// The core computes all the numbers (shares, bar widths, heights, point
/// coordinates); the frontend only renders.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Horizontal bars for a category breakdown, at most `max_bars` of them.
    pub fn bar_rows(&self, breakdown: &[CategoryTotal], max_bars: usize) -> Vec<BarChartRow> {
        breakdown
            .iter()
            .take(max_bars)
            .map(|entry| BarChartRow {
                label: entry.category.clone(),
                value: entry.total,
                percentage: entry.percentage,
                width_pct: clamp_pct(entry.percentage),
                color: category_color(&entry.category).to_string(),
            })
            .collect()
    }

    /// Pie legend: each value's share of the sum (all zero when the sum is zero).
    pub fn pie_slices(&self, values: &[(String, f64)]) -> Vec<PieSlice> {
        let sum: f64 = values.iter().map(|(_, v)| v).sum();
        values
            .iter()
            .map(|(label, value)| PieSlice {
                label: label.clone(),
                value: *value,
                percentage: if sum != 0.0 { value / sum * 100.0 } else { 0.0 },
                color: category_color(label).to_string(),
            })
            .collect()
    }

    /// Polyline vertices in percent coordinates.
    ///
    /// x spreads points evenly over 0..=100 (a single point sits at 0);
    /// y is inverted so the maximum is at the top, with a value range of at
    /// least 1 so a flat series does not divide by zero.
    pub fn line_points(&self, series: &[(String, f64)]) -> Vec<LinePoint> {
        if series.is_empty() {
            return Vec::new();
        }

        let min = series.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
        let max = series
            .iter()
            .map(|(_, v)| *v)
            .fold(f64::NEG_INFINITY, f64::max);
        let range = if max - min == 0.0 { 1.0 } else { max - min };
        let last_index = (series.len() - 1) as f64;

        series
            .iter()
            .enumerate()
            .map(|(i, (label, value))| LinePoint {
                label: label.clone(),
                x_pct: if last_index > 0.0 {
                    i as f64 / last_index * 100.0
                } else {
                    0.0
                },
                y_pct: 100.0 - (value - min) / range * 100.0,
            })
            .collect()
    }

    /// Income/expense column pairs scaled to the tallest value in the series.
    pub fn trend_bars(&self, trend: &[MonthlyTrend]) -> Vec<TrendBar> {
        let max = trend
            .iter()
            .map(|m| m.total_investments.max(m.total_expenses))
            .fold(0.0_f64, f64::max);

        let scale = |value: f64| {
            if max > 0.0 {
                clamp_pct(value / max * 100.0)
            } else {
                0.0
            }
        };

        trend
            .iter()
            .map(|m| TrendBar {
                period: m.period.clone(),
                investment_height_pct: scale(m.total_investments),
                expense_height_pct: scale(m.total_expenses),
                balance: m.balance,
                balance_positive: m.balance >= 0.0,
            })
            .collect()
    }

    /// Ring gauge for a percentage (≥ 75 good, ≥ 50 fair, otherwise poor).
    pub fn gauge(&self, percentage: f64) -> GaugeReading {
        let level = if percentage >= 75.0 {
            GaugeLevel::Good
        } else if percentage >= 50.0 {
            GaugeLevel::Fair
        } else {
            GaugeLevel::Poor
        };

        GaugeReading {
            percentage,
            fill_fraction: clamp_pct(percentage) / 100.0,
            level,
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

/// NaN becomes 0.
fn clamp_pct(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
