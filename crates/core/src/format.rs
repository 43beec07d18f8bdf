use chrono::{Datelike, NaiveDate};

/// `$ 1.234.567`: whole pesos, `.` as thousands separator, `-$ 1.234` for
/// negatives. NaN and infinities render as `-`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "-".to_string();
    }

    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-$ {grouped}")
    } else {
        format!("$ {grouped}")
    }
}

/// Day/month/year without padding, e.g. `5/3/2025`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// One decimal place, e.g. `12.5%`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}
