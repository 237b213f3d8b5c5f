use num_format::{Locale, ToFormattedString};

/// Whole-won amount truncated toward zero with thousands separators, e.g.
/// `-1,234`. Non-finite values render as `-`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    (value.trunc() as i64).to_formatted_string(&Locale::en)
}

/// KPI text: `1,234 원`.
pub fn format_won(value: f64) -> String {
    format!("{} 원", format_amount(value))
}
