// Input validation for author APIs
//
// Limits mirror the column widths of the `autor` table so the in-memory and
// PostgreSQL backends reject the same inputs.

use super::common::ApiError;

/// Maximum length of `nome` (characters)
pub const MAX_NAME_CHARS: usize = 100;

/// Maximum length of `email` (characters)
pub const MAX_EMAIL_CHARS: usize = 120;

/// Maximum length of `senha` (characters)
pub const MAX_SECRET_CHARS: usize = 255;

/// Present, non-empty and within `max` characters
pub fn require_field(field: &str, value: Option<String>, max: usize) -> Result<String, ApiError> {
    let value = value.ok_or_else(|| {
        ApiError::validation(format!("Campo obrigatório ausente: {}", field))
    })?;
    check_field(field, value, max)
}

/// Non-empty and within `max` characters
pub fn check_field(field: &str, value: String, max: usize) -> Result<String, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!(
            "Campo não pode ser vazio: {}",
            field
        )));
    }
    let len = value.chars().count();
    if len > max {
        tracing::warn!(field, len, max, "Field exceeds limit");
        return Err(ApiError::validation(format!(
            "Campo excede {} caracteres: {}",
            max, field
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_field() {
        assert_eq!(
            require_field("nome", Some("Ana".to_string()), MAX_NAME_CHARS).unwrap(),
            "Ana"
        );
        assert!(require_field("nome", None, MAX_NAME_CHARS).is_err());
        assert!(require_field("nome", Some(String::new()), MAX_NAME_CHARS).is_err());
        assert!(require_field("nome", Some("   ".to_string()), MAX_NAME_CHARS).is_err());
    }

    #[test]
    fn test_length_counts_characters() {
        let name = "é".repeat(MAX_NAME_CHARS);
        assert!(check_field("nome", name, MAX_NAME_CHARS).is_ok());

        let name = "a".repeat(MAX_NAME_CHARS + 1);
        let err = check_field("nome", name, MAX_NAME_CHARS).unwrap_err();
        assert!(err.to_string().contains("nome"));
    }
}
