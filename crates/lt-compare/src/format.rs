//! Display formatting for comparison reports.

/// Format a signed percentage: `+` prefix above zero, two decimals, `%`
/// suffix. Zero (including negative zero) gets no sign.
pub fn format_percentage(value: f64) -> String {
    if value == 0.0 {
        return "0.00%".to_string();
    }
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{sign}{value:.2}%")
}

/// Metric values display at 3 decimal places.
pub fn format_metric_value(value: f64) -> String {
    format!("{value:.3}")
}
