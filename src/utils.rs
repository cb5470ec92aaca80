// Utility functions

/// Returns the trimmed string when it is non-empty, treating `None`, `""`
/// and whitespace-only values alike.
pub fn trimmed_nonempty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Formats a numeric price as a dollar amount with two decimals.
pub fn format_currency(value: f64) -> String {
    format!("${value:.2}")
}
