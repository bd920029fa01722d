//! Field validators for input validation

use super::sanitizers::trim;

/// Minimum gist length, in characters
pub const GIST_MIN_CHARS: usize = 20;
/// Maximum gist length, in characters
pub const GIST_MAX_CHARS: usize = 900;

/// Aggregate missing-fields failure.
///
/// The contract never reports which field was absent, only that the request
/// is incomplete, so this carries no detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingFields;

/// Resolve a required string field: present and non-empty after trimming.
pub fn required(value: Option<String>) -> Result<String, MissingFields> {
    let value = value.ok_or(MissingFields)?;
    let trimmed = trim(&value);
    if trimmed.is_empty() {
        return Err(MissingFields);
    }
    Ok(trimmed)
}

/// Resolve a required numeric field.
pub fn required_number(value: Option<f64>) -> Result<f64, MissingFields> {
    value.ok_or(MissingFields)
}

/// Validate gist length within bounds, counted in characters
pub fn validate_gist_length(gist: &str) -> Result<(), String> {
    let len = gist.chars().count();
    if len < GIST_MIN_CHARS || len > GIST_MAX_CHARS {
        return Err(format!(
            "Gist must be between {} and {} characters",
            GIST_MIN_CHARS, GIST_MAX_CHARS
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(required(Some("team".to_string())), Ok("team".to_string()));
        assert_eq!(required(Some("  team  ".to_string())), Ok("team".to_string()));
        assert_eq!(required(Some("   ".to_string())), Err(MissingFields));
        assert_eq!(required(Some(String::new())), Err(MissingFields));
        assert_eq!(required(None), Err(MissingFields));
    }

    #[test]
    fn test_required_number() {
        assert_eq!(required_number(Some(12.5)), Ok(12.5));
        assert_eq!(required_number(None), Err(MissingFields));
    }

    #[test]
    fn test_gist_bounds_inclusive() {
        assert!(validate_gist_length(&"x".repeat(19)).is_err());
        assert!(validate_gist_length(&"x".repeat(20)).is_ok());
        assert!(validate_gist_length(&"x".repeat(900)).is_ok());
        assert!(validate_gist_length(&"x".repeat(901)).is_err());
    }

    #[test]
    fn test_gist_counts_characters_not_bytes() {
        // 20 multibyte characters are 40 bytes but still pass the bound.
        assert!(validate_gist_length(&"é".repeat(20)).is_ok());
    }

    #[test]
    fn test_gist_error_message() {
        let err = validate_gist_length("too short").unwrap_err();
        assert_eq!(err, "Gist must be between 20 and 900 characters");
    }
}
