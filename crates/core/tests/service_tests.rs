// ═══════════════════════════════════════════════════════════════════
// Service Tests: validation, analytics, charts, formatting
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use finance_tracker_core::errors::CoreError;
use finance_tracker_core::format::{format_currency, format_date, format_percentage};
use finance_tracker_core::models::analytics::{
    CategoryTotal, FinancialSummary, InsightLevel, MonthlyTrend, YearMonth,
};
use finance_tracker_core::models::chart::GaugeLevel;
use finance_tracker_core::models::record::{Record, RecordForm, RecordKind};
use finance_tracker_core::services::analytics_service::AnalyticsService;
use finance_tracker_core::services::chart_service::{
    category_color, ChartService, DEFAULT_CATEGORY_COLOR,
};
use finance_tracker_core::services::validation_service::{DateRules, ValidationService};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn expense(id: i64, category: &str, amount: f64, date: NaiveDate) -> Record {
    Record::new(id, RecordKind::Expense, category, amount, date)
}

fn income(id: i64, category: &str, amount: f64, date: NaiveDate) -> Record {
    Record::new(id, RecordKind::Investment, category, amount, date)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ═══════════════════════════════════════════════════════════════════
//  ValidationService
// ═══════════════════════════════════════════════════════════════════

mod validation {
    use super::*;

    fn today() -> NaiveDate {
        d(2025, 6, 15)
    }

    fn form(category: &str, amount: &str, date: &str, description: &str) -> RecordForm {
        RecordForm {
            category: category.into(),
            amount: amount.into(),
            date: date.into(),
            description: description.into(),
        }
    }

    fn field_messages(err: &CoreError) -> Vec<(String, String)> {
        err.field_errors()
            .iter()
            .map(|e| (e.field.clone(), e.message.clone()))
            .collect()
    }

    #[test]
    fn valid_form_builds_draft() {
        let svc = ValidationService::new();
        let draft = svc
            .validate_record_form(&form("  comida ", "12.50", "2025-06-01", " Almuerzo "), today())
            .unwrap();
        assert_eq!(draft.category, "comida");
        assert!(approx(draft.amount, 12.5));
        assert_eq!(draft.date, d(2025, 6, 1));
        assert_eq!(draft.description.as_deref(), Some("Almuerzo"));
    }

    #[test]
    fn blank_description_becomes_none() {
        let svc = ValidationService::new();
        let draft = svc
            .validate_record_form(&form("comida", "5", "2025-06-01", "   "), today())
            .unwrap();
        assert_eq!(draft.description, None);
    }

    #[test]
    fn today_is_allowed() {
        let svc = ValidationService::new();
        assert!(svc
            .validate_record_form(&form("comida", "5", "2025-06-15", ""), today())
            .is_ok());
    }

    #[test]
    fn every_failing_field_is_reported() {
        let svc = ValidationService::new();
        let err = svc
            .validate_record_form(&RecordForm::default(), today())
            .unwrap_err();
        assert_eq!(
            field_messages(&err),
            vec![
                ("category".into(), "Category is required".into()),
                ("amount".into(), "Amount is required".into()),
                ("date".into(), "Date is required".into()),
            ]
        );
    }

    #[test]
    fn future_date_rejected() {
        let svc = ValidationService::new();
        let err = svc
            .validate_record_form(&form("comida", "5", "2025-06-16", ""), today())
            .unwrap_err();
        assert_eq!(
            field_messages(&err),
            vec![("date".into(), "Date cannot be in the future".into())]
        );
    }

    #[test]
    fn impossible_date_rejected() {
        let svc = ValidationService::new();
        let err = svc
            .validate_record_form(&form("comida", "5", "2025-02-30", ""), today())
            .unwrap_err();
        assert_eq!(err.field_errors()[0].message, "Date is not a valid date");
    }

    #[test]
    fn amount_rules() {
        let cases = [
            ("abc", "Amount must be a valid number"),
            ("NaN", "Amount must be a valid number"),
            ("inf", "Amount must be a valid number"),
            ("0", "Amount must be greater than zero"),
            ("-3.5", "Amount must be greater than zero"),
        ];
        for (input, expected) in cases {
            let err = ValidationService::validate_positive_number(input, "amount", "Amount")
                .unwrap_err();
            assert_eq!(err.message, expected, "input {input:?}");
        }
    }

    #[test]
    fn amount_accepts_decimals_and_whitespace() {
        let n = ValidationService::validate_positive_number(" 0.01 ", "amount", "Amount").unwrap();
        assert!(approx(n, 0.01));
    }

    #[test]
    fn required_returns_trimmed() {
        assert_eq!(
            ValidationService::validate_required("  x  ", "f", "F").unwrap(),
            "x"
        );
    }

    #[test]
    fn past_dates_can_be_forbidden() {
        let rules = DateRules {
            allow_future: true,
            allow_past: false,
        };
        let err =
            ValidationService::validate_date("2025-06-14", "due", "Due date", rules, today())
                .unwrap_err();
        assert_eq!(err.message, "Due date cannot be in the past");
        assert!(
            ValidationService::validate_date("2025-07-01", "due", "Due date", rules, today())
                .is_ok()
        );
    }

    #[test]
    fn default_rules_allow_any_date() {
        let rules = DateRules::default();
        assert!(ValidationService::validate_date("1999-01-01", "d", "D", rules, today()).is_ok());
        assert!(ValidationService::validate_date("2099-01-01", "d", "D", rules, today()).is_ok());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  AnalyticsService
// ═══════════════════════════════════════════════════════════════════

mod analytics {
    use super::*;

    #[test]
    fn summary_from_totals() {
        let s = AnalyticsService::new().summary_from_totals(5000.0, 3500.0);
        assert!(approx(s.balance, 1500.0));
        assert!(approx(s.savings_rate, 30.0));
    }

    #[test]
    fn savings_rate_rounded_to_two_decimals() {
        let s = AnalyticsService::new().summary_from_totals(3000.0, 2000.0);
        assert!(approx(s.savings_rate, 33.33));
    }

    #[test]
    fn no_income_means_zero_rate() {
        let s = AnalyticsService::new().summary_from_totals(0.0, 250.0);
        assert!(approx(s.balance, -250.0));
        assert_eq!(s.savings_rate, 0.0);
    }

    #[test]
    fn overspending_gives_negative_rate() {
        let s = AnalyticsService::new().summary_from_totals(1000.0, 1500.0);
        assert!(approx(s.savings_rate, -50.0));
    }

    #[test]
    fn summarize_records() {
        let svc = AnalyticsService::new();
        let expenses = vec![
            expense(1, "comida", 100.0, d(2025, 1, 1)),
            expense(2, "salud", 50.0, d(2025, 1, 2)),
        ];
        let incomes = vec![income(1, "salario", 600.0, d(2025, 1, 1))];
        let s = svc.summarize(&expenses, &incomes);
        assert!(approx(s.total_expenses, 150.0));
        assert!(approx(s.total_investments, 600.0));
        assert!(approx(s.balance, 450.0));
        assert!(approx(s.savings_rate, 75.0));
    }

    #[test]
    fn breakdown_largest_first_with_shares() {
        let svc = AnalyticsService::new();
        let records = vec![
            expense(1, "comida", 100.0, d(2025, 1, 1)),
            expense(2, "salud", 300.0, d(2025, 1, 2)),
            expense(3, "comida", 100.0, d(2025, 1, 3)),
        ];
        let b = svc.breakdown_by_category(&records);
        assert_eq!(b.len(), 2);
        assert_eq!(b[0].category, "salud");
        assert!(approx(b[0].total, 300.0));
        assert!(approx(b[0].percentage, 60.0));
        assert_eq!(b[1].category, "comida");
        assert!(approx(b[1].percentage, 40.0));
    }

    #[test]
    fn breakdown_ties_keep_first_appearance() {
        let svc = AnalyticsService::new();
        let records = vec![
            expense(1, "ropa", 10.0, d(2025, 1, 1)),
            expense(2, "hogar", 10.0, d(2025, 1, 2)),
        ];
        let names: Vec<String> = svc
            .breakdown_by_category(&records)
            .into_iter()
            .map(|c| c.category)
            .collect();
        assert_eq!(names, vec!["ropa", "hogar"]);
    }

    #[test]
    fn breakdown_of_nothing_is_empty() {
        let svc = AnalyticsService::new();
        assert!(svc.breakdown_by_category::<Record>(&[]).is_empty());
    }

    #[test]
    fn in_month_filters_by_calendar_month() {
        let svc = AnalyticsService::new();
        let records = vec![
            expense(1, "a", 1.0, d(2025, 2, 28)),
            expense(2, "a", 1.0, d(2025, 3, 1)),
            expense(3, "a", 1.0, d(2024, 3, 15)),
        ];
        let march = svc.in_month(&records, YearMonth::new(2025, 3).unwrap());
        assert_eq!(march.len(), 1);
        assert_eq!(march[0].id, 2);
    }

    #[test]
    fn monthly_trend_spans_year_boundary() {
        let svc = AnalyticsService::new();
        let expenses = vec![
            expense(1, "a", 40.0, d(2024, 12, 5)),
            expense(2, "a", 10.0, d(2025, 1, 2)),
            expense(3, "a", 99.0, d(2024, 10, 1)),
        ];
        let incomes = vec![income(1, "salario", 100.0, d(2025, 1, 1))];
        let trend = svc.monthly_trend(&expenses, &incomes, 3, d(2025, 1, 20));

        let periods: Vec<&str> = trend.iter().map(|t| t.period.as_str()).collect();
        assert_eq!(periods, vec!["2024-11", "2024-12", "2025-01"]);
        assert!(approx(trend[0].total_expenses, 0.0));
        assert!(approx(trend[1].total_expenses, 40.0));
        assert!(approx(trend[1].balance, -40.0));
        assert!(approx(trend[2].balance, 90.0));
    }

    #[test]
    fn quarterly_totals_chronological() {
        let svc = AnalyticsService::new();
        let records = vec![
            expense(1, "a", 5.0, d(2025, 4, 1)),
            expense(2, "a", 10.0, d(2025, 1, 10)),
            expense(3, "a", 20.0, d(2025, 3, 31)),
            expense(4, "a", 1.0, d(2024, 12, 31)),
        ];
        let q = svc.quarterly_totals(&records);
        assert_eq!(
            q,
            vec![
                ("2024-Q4".to_string(), 1.0),
                ("2025-Q1".to_string(), 30.0),
                ("2025-Q2".to_string(), 5.0),
            ]
        );
    }

    #[test]
    fn top_categories_truncates() {
        let svc = AnalyticsService::new();
        let breakdown: Vec<CategoryTotal> = (0..5)
            .map(|i| CategoryTotal {
                category: format!("c{i}"),
                total: 100.0 - i as f64,
                percentage: 20.0,
            })
            .collect();
        let top = svc.top_categories(&breakdown, 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[2].category, "c2");
        assert_eq!(svc.top_categories(&breakdown[..1], 3).len(), 1);
    }

    fn summary(rate: f64, balance: f64) -> FinancialSummary {
        FinancialSummary {
            total_investments: 1000.0,
            total_expenses: 1000.0 - balance,
            balance,
            savings_rate: rate,
        }
    }

    #[test]
    fn insight_excellent_saver() {
        let svc = AnalyticsService::new();
        let insights = svc.insights(&summary(25.0, 1000.0));
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].level, InsightLevel::Success);
        assert!(insights[0].message.contains("more than 20%"));
        assert_eq!(insights[1].level, InsightLevel::Success);
        assert!(insights[1].message.contains("$ 500"));
    }

    #[test]
    fn insight_threshold_is_inclusive() {
        let svc = AnalyticsService::new();
        assert_eq!(svc.insights(&summary(20.0, 1.0))[0].level, InsightLevel::Success);
        assert_eq!(svc.insights(&summary(10.0, 1.0))[0].level, InsightLevel::Warning);
    }

    #[test]
    fn insight_moderate() {
        let svc = AnalyticsService::new();
        assert_eq!(svc.insights(&summary(15.0, 150.0))[0].level, InsightLevel::Warning);
    }

    #[test]
    fn insight_overspending() {
        let svc = AnalyticsService::new();
        let insights = svc.insights(&summary(-5.0, -50.0));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].level, InsightLevel::Danger);
    }

    #[test]
    fn insight_low_saver() {
        let svc = AnalyticsService::new();
        let insights = svc.insights(&summary(0.0, 0.0));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].level, InsightLevel::Info);
        assert!(insights[0].message.contains("20%"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ChartService
// ═══════════════════════════════════════════════════════════════════

mod charts {
    use super::*;

    fn total(category: &str, total: f64, percentage: f64) -> CategoryTotal {
        CategoryTotal {
            category: category.into(),
            total,
            percentage,
        }
    }

    #[test]
    fn palette_is_case_insensitive() {
        assert_eq!(category_color("comida"), "#10b981");
        assert_eq!(category_color("COMIDA"), "#10b981");
        assert_eq!(category_color("Educación"), "#6366f1");
        assert_eq!(category_color("arriendo"), category_color("ropa"));
        assert_eq!(category_color("mascotas"), DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn bar_rows_limit_and_width() {
        let svc = ChartService::new();
        let breakdown = vec![
            total("comida", 600.0, 120.0),
            total("salud", 300.0, -3.0),
            total("ropa", 100.0, 10.0),
        ];
        let rows = svc.bar_rows(&breakdown, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "comida");
        assert_eq!(rows[0].width_pct, 100.0);
        assert_eq!(rows[0].percentage, 120.0);
        assert_eq!(rows[1].width_pct, 0.0);
        assert_eq!(rows[1].color, "#ef4444");
    }

    #[test]
    fn pie_shares() {
        let svc = ChartService::new();
        let slices = svc.pie_slices(&[("a".into(), 30.0), ("b".into(), 10.0)]);
        assert!(approx(slices[0].percentage, 75.0));
        assert!(approx(slices[1].percentage, 25.0));
    }

    #[test]
    fn pie_with_zero_sum() {
        let svc = ChartService::new();
        let slices = svc.pie_slices(&[("a".into(), 0.0), ("b".into(), 0.0)]);
        assert!(slices.iter().all(|s| s.percentage == 0.0));
    }

    #[test]
    fn line_points_span_and_invert() {
        let svc = ChartService::new();
        let points = svc.line_points(&[
            ("Jan".into(), 10.0),
            ("Feb".into(), 15.0),
            ("Mar".into(), 20.0),
        ]);
        assert_eq!(points.len(), 3);
        assert!(approx(points[0].x_pct, 0.0));
        assert!(approx(points[1].x_pct, 50.0));
        assert!(approx(points[2].x_pct, 100.0));
        assert!(approx(points[0].y_pct, 100.0));
        assert!(approx(points[1].y_pct, 50.0));
        assert!(approx(points[2].y_pct, 0.0));
    }

    #[test]
    fn single_point_and_flat_series() {
        let svc = ChartService::new();
        let single = svc.line_points(&[("Jan".into(), 42.0)]);
        assert!(approx(single[0].x_pct, 0.0));
        assert!(approx(single[0].y_pct, 100.0));

        let flat = svc.line_points(&[("a".into(), 5.0), ("b".into(), 5.0)]);
        assert!(flat.iter().all(|p| p.y_pct.is_finite()));
        assert!(svc.line_points(&[]).is_empty());
    }

    #[test]
    fn trend_bars_scale_to_tallest() {
        let svc = ChartService::new();
        let trend = vec![
            MonthlyTrend {
                period: "2025-01".into(),
                total_investments: 200.0,
                total_expenses: 50.0,
                balance: 150.0,
            },
            MonthlyTrend {
                period: "2025-02".into(),
                total_investments: 80.0,
                total_expenses: 100.0,
                balance: -20.0,
            },
        ];
        let bars = svc.trend_bars(&trend);
        assert!(approx(bars[0].investment_height_pct, 100.0));
        assert!(approx(bars[0].expense_height_pct, 25.0));
        assert!(bars[0].balance_positive);
        assert!(approx(bars[1].expense_height_pct, 50.0));
        assert!(!bars[1].balance_positive);
    }

    #[test]
    fn trend_bars_all_zero() {
        let svc = ChartService::new();
        let bars = svc.trend_bars(&[MonthlyTrend {
            period: "2025-01".into(),
            total_investments: 0.0,
            total_expenses: 0.0,
            balance: 0.0,
        }]);
        assert_eq!(bars[0].investment_height_pct, 0.0);
        assert!(bars[0].balance_positive);
    }

    #[test]
    fn gauge_levels_and_fill() {
        let svc = ChartService::new();
        let good = svc.gauge(80.0);
        assert_eq!(good.level, GaugeLevel::Good);
        assert!(approx(good.fill_fraction, 0.8));
        assert_eq!(svc.gauge(75.0).level, GaugeLevel::Good);
        assert_eq!(svc.gauge(50.0).level, GaugeLevel::Fair);
        assert_eq!(svc.gauge(49.9).level, GaugeLevel::Poor);
        assert!(approx(svc.gauge(150.0).fill_fraction, 1.0));
        assert!(approx(svc.gauge(-5.0).fill_fraction, 0.0));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Formatting
// ═══════════════════════════════════════════════════════════════════

mod formatting {
    use super::*;

    #[test]
    fn currency_thousands() {
        assert_eq!(format_currency(1_234_567.0), "$ 1.234.567");
        assert_eq!(format_currency(1000.0), "$ 1.000");
        assert_eq!(format_currency(999.0), "$ 999");
        assert_eq!(format_currency(0.0), "$ 0");
    }

    #[test]
    fn currency_rounds_to_whole_units() {
        assert_eq!(format_currency(1234.6), "$ 1.235");
        assert_eq!(format_currency(-0.4), "$ 0");
    }

    #[test]
    fn currency_negative() {
        assert_eq!(format_currency(-1234.0), "-$ 1.234");
    }

    #[test]
    fn currency_non_finite() {
        assert_eq!(format_currency(f64::NAN), "-");
        assert_eq!(format_currency(f64::INFINITY), "-");
    }

    #[test]
    fn date_without_padding() {
        assert_eq!(format_date(d(2025, 3, 5)), "5/3/2025");
        assert_eq!(format_date(d(2024, 12, 31)), "31/12/2024");
    }

    #[test]
    fn percentage_one_decimal() {
        assert_eq!(format_percentage(12.5), "12.5%");
        assert_eq!(format_percentage(33.333), "33.3%");
        assert_eq!(format_percentage(0.0), "0.0%");
    }
}
