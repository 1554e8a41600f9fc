//! CLI argument validators.

/// Parse a table delimiter: a single ASCII character, or `tab` / `\t`.
pub fn parse_delimiter(s: &str) -> Result<char, String> {
    if s.eq_ignore_ascii_case("tab") || s == "\\t" {
        return Ok('\t');
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() && !matches!(c, '"' | '\n' | '\r') => Ok(c),
        (Some(c), None) => Err(format!("'{c}' cannot be used as a table delimiter")),
        _ => Err(format!(
            "delimiter must be a single character, got '{s}'"
        )),
    }
}

/// Parse a non-empty, trimmed string value.
pub fn parse_non_empty(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("value must not be empty".to_string());
    }
    Ok(trimmed.to_string())
}
