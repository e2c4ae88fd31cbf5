//! Display formatting for prices and dates (es-CO conventions)

use chrono::{DateTime, Utc};

/// Groups the integer part in threes with `sep`.
fn group_thousands(integer_part: &str, sep: char) -> String {
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(sep);
        }
        result.push(c);
    }
    format!("{}{}", sign, result.chars().rev().collect::<String>())
}

/// Formats a value as Colombian pesos.
///
/// ```text
/// format_cop(1234567.5) == "$ 1.234.567,50"
/// ```
pub fn format_cop(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let (integer_part, decimal_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));
    format!("$ {},{}", group_thousands(integer_part, '.'), decimal_part)
}

/// DD/MM/YYYY
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%d/%m/%Y").to_string()
}
