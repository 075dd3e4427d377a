//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

/// Parse and validate confidence value (0.0-1.0).
pub fn parse_confidence(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(0.0..=1.0).contains(&value) {
        return Err(format!(
            "confidence must be between 0.0 and 1.0, got {value}"
        ));
    }

    Ok(value)
}

/// Parse and validate a bounded float value.
///
/// # Arguments
///
/// * `s` - The string to parse
/// * `min` - Minimum allowed value (inclusive)
/// * `max` - Maximum allowed value (inclusive)
/// * `name` - Name of the parameter for error messages
pub fn parse_bounded_float(s: &str, min: f64, max: f64, name: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(min..=max).contains(&value) {
        return Err(format!(
            "{name} must be between {min} and {max}, got {value}"
        ));
    }

    Ok(value)
}

/// Parse the largest plausible box-to-frame area ratio (0.0 exclusive, 1.0 inclusive).
pub fn parse_area_ratio(s: &str) -> Result<f64, String> {
    let value = parse_bounded_float(s, 0.0, 1.0, "area ratio")?;
    if value <= 0.0 {
        return Err("area ratio must be greater than 0.0".to_string());
    }
    Ok(value)
}

/// Parse the size gap ratio (at least 1.0).
pub fn parse_gap_ratio(s: &str) -> Result<f64, String> {
    parse_bounded_float(s, 1.0, f64::MAX, "size gap ratio")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_confidence_valid() {
        assert_eq!(parse_confidence("0.5").ok(), Some(0.5));
        assert_eq!(parse_confidence("0.0").ok(), Some(0.0));
        assert_eq!(parse_confidence("1.0").ok(), Some(1.0));
    }

    #[test]
    fn test_parse_confidence_invalid() {
        assert!(parse_confidence("1.1").is_err());
        assert!(parse_confidence("-0.1").is_err());
        assert!(parse_confidence("abc").is_err());
    }

    #[test]
    fn test_parse_bounded_float_invalid() {
        assert!(parse_bounded_float("101.0", -100.0, 100.0, "test").is_err());
        let err = parse_bounded_float("x", 0.0, 1.0, "test").unwrap_err();
        assert!(err.contains("not a valid number"));
    }

    #[test]
    fn test_parse_area_ratio() {
        assert_eq!(parse_area_ratio("0.85").ok(), Some(0.85));
        assert_eq!(parse_area_ratio("1").ok(), Some(1.0));
        assert!(parse_area_ratio("0").is_err());
        assert!(parse_area_ratio("1.2").is_err());
    }

    #[test]
    fn test_parse_gap_ratio() {
        assert_eq!(parse_gap_ratio("2.0").ok(), Some(2.0));
        assert_eq!(parse_gap_ratio("1").ok(), Some(1.0));
        assert!(parse_gap_ratio("0.5").is_err());
        assert!(parse_gap_ratio("NaN").is_err());
    }
}
