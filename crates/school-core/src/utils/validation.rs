//! Input validation utilities
//!
//! Checks that run before a request is built. A failure here means no network
//! call is made for the operation.

use crate::error::ValidationError;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::new("url", "URL cannot be empty"));
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::new(
            "url",
            format!(
                "Invalid URL '{}': URL must start with http:// or https://",
                url
            ),
        ));
    }

    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::new("email", "Email cannot be empty"));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ValidationError::new(
            "email",
            format!("Invalid email '{}': Email must have username and domain parts", email),
        ));
    }

    if !parts[1].contains('.') {
        return Err(ValidationError::new(
            "email",
            format!("Invalid email '{}': Domain must contain dot", email),
        ));
    }

    Ok(())
}

/// Reject blank mandatory text fields
pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(
            field,
            format!("{} cannot be empty", capitalize(field)),
        ));
    }
    Ok(())
}

/// Payment and fee amounts must be strictly positive and finite
pub fn validate_amount(amount: f64) -> Result<(), ValidationError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::new(
            "amount",
            "Amount must be greater than 0",
        ));
    }
    Ok(())
}

fn capitalize(field: &str) -> String {
    let label = field.replace('_', " ");
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_valid_urls() {
        assert!(validate_url("http://localhost:8000").is_ok());
        assert!(validate_url("https://school.example.com").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_invalid_urls() {
        assert!(validate_url("").is_err());
        assert!(validate_url("localhost:8000").is_err());
        assert!(validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_email_accepts_valid_emails() {
        assert!(validate_email("parent@example.com").is_ok());
        assert!(validate_email("bursar.office@school.ac.ke").is_ok());
    }

    #[test]
    fn test_validate_email_rejects_invalid_emails() {
        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@domain.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
        assert!(validate_email("user@domain@com").is_err());
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("password", "Passw0rd").is_ok());

        let err = validate_required("qr_token", "  ").unwrap_err();
        assert_eq!(err.field, "qr_token");
        assert_eq!(err.message, "Qr token cannot be empty");
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(0.01).is_ok());
        assert!(validate_amount(15000.0).is_ok());

        let err = validate_amount(0.0).unwrap_err();
        assert_eq!(err.message, "Amount must be greater than 0");
        assert!(validate_amount(-10.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }
}
