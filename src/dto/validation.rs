//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest accepted display name.
const MAX_PLAYER_NAME_LEN: usize = 64;

/// Validates that a player display name is non-blank and of sane length.
///
/// # Examples
///
/// ```ignore
/// validate_player_name("Robin")   // Ok
/// validate_player_name("   ")     // Err - blank
/// ```
pub fn validate_player_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("player_name_blank");
        err.message = Some("Player name must not be blank".into());
        return Err(err);
    }

    if name.chars().count() > MAX_PLAYER_NAME_LEN {
        let mut err = ValidationError::new("player_name_length");
        err.message = Some(
            format!(
                "Player name must be at most {} characters (got {})",
                MAX_PLAYER_NAME_LEN,
                name.chars().count()
            )
            .into(),
        );
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_player_name_valid() {
        assert!(validate_player_name("Robin").is_ok());
        assert!(validate_player_name("The 180 Club").is_ok());
        assert!(validate_player_name("é").is_ok());
    }

    #[test]
    fn test_validate_player_name_blank() {
        assert!(validate_player_name("").is_err());
        assert!(validate_player_name("   ").is_err());
        assert!(validate_player_name("\t\n").is_err());
    }

    #[test]
    fn test_validate_player_name_too_long() {
        let long = "x".repeat(MAX_PLAYER_NAME_LEN + 1);
        assert!(validate_player_name(&long).is_err());
        let exact = "x".repeat(MAX_PLAYER_NAME_LEN);
        assert!(validate_player_name(&exact).is_ok());
    }
}
