/// An absent field reads as empty string, then surrounding whitespace
/// is stripped. Applied to every field taken from a TSV row.
pub fn norm(s: Option<&str>) -> String {
    s.unwrap_or("").trim().to_string()
}

/// Case-insensitive boolean token parse. Anything outside the accepted
/// set (including empty) is false, never an error.
pub fn truthy(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "true" | "t" | "1" | "yes" | "y"
    )
}
