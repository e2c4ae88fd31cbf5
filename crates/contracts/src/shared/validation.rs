//! Field rules shared by the form view-models and the backend services.

/// Validation rules for a single text field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextRule {
    pub required: bool,
    pub max_length: Option<usize>,
    /// Message reported when a required value is blank.
    pub required_message: &'static str,
}

impl TextRule {
    pub const fn required(required_message: &'static str) -> Self {
        Self {
            required: true,
            max_length: None,
            required_message,
        }
    }

    pub const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Blank means empty after trimming.
    pub fn check(&self, value: &str) -> Result<(), String> {
        if self.required && is_blank(value) {
            return Err(self.required_message.to_string());
        }
        if let Some(max) = self.max_length {
            if value.trim().chars().count() > max {
                return Err(format!(
                    "Asegúrese de que este campo no tenga más de {} caracteres.",
                    max
                ));
            }
        }
        Ok(())
    }
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Basic `local@domain.tld` shape check.
///
/// Requires a non-empty local part, an `@`, and a domain containing a `.`
/// with at least one character on each side. Whitespace is never allowed.
/// Tighter than a plain `\S+@\S+\.\S+` match: a domain that starts with
/// `.` or ends with `.` is rejected.
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.split_once('.') {
        Some((host, rest)) => !host.is_empty() && !rest.is_empty() && !rest.ends_with('.'),
        None => false,
    }
}

/// Parses a whole quantity typed by the user.
pub fn parse_quantity(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Parses a decimal price typed by the user; accepts `,` as decimal separator.
pub fn parse_price(value: &str) -> Option<f64> {
    let normalized = value.trim().replace(',', ".");
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Number of digits after the decimal point when rendered without trailing noise.
pub fn decimal_places(value: f64) -> usize {
    let rendered = format!("{}", value);
    rendered
        .split_once('.')
        .map(|(_, frac)| frac.len())
        .unwrap_or(0)
}
