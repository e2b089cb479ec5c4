//! Result formatting.
//!
//! The display rule: integers below 1e15 print without a decimal point,
//! everything else rounds to 10 decimal places with trailing zeros and a
//! trailing point stripped. No scientific notation, no separators.

/// Format a finite numeric result for the display.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.10}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}
