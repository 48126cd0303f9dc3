//! Input validation for account and conversation fields.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid email format.
    InvalidEmail(String),
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
    /// Empty value where one is required.
    Empty(String),
    /// Numeric value outside its allowed range.
    OutOfRange { field: String, min: i64, max: i64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidEmail(msg) => write!(f, "Invalid email: {}", msg),
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
            ValidationError::OutOfRange { field, min, max } => {
                write!(f, "{} must be between {} and {}", field, min, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for email addresses.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum allowed length for display names.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum allowed age.
pub const MAX_AGE: i64 = 150;

/// Validate an email address (basic RFC 5322 format check).
///
/// This is a basic validation that checks:
/// - Contains exactly one @
/// - Has at least one character before @
/// - Has at least one character after @
/// - Has at least one dot after @
/// - Is not too long
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Empty("email".to_string()));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LENGTH,
            actual: email.len(),
        });
    }

    // Basic format check: local@domain.tld
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ValidationError::InvalidEmail(
            "must contain exactly one @ symbol".to_string(),
        ));
    }

    let (local, domain) = (parts[0], parts[1]);

    if local.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "missing local part (before @)".to_string(),
        ));
    }

    if domain.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "missing domain (after @)".to_string(),
        ));
    }

    if !domain.contains('.') {
        return Err(ValidationError::InvalidEmail(
            "domain must contain at least one dot".to_string(),
        ));
    }

    if domain.starts_with('.') || domain.ends_with('.') {
        return Err(ValidationError::InvalidEmail(
            "domain cannot start or end with a dot".to_string(),
        ));
    }

    if domain.contains("..") {
        return Err(ValidationError::InvalidEmail(
            "domain cannot contain consecutive dots".to_string(),
        ));
    }

    Ok(())
}

/// Validate a display name length.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if len > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
            actual: len,
        });
    }

    Ok(())
}

/// Validate a plaintext password before hashing.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Empty("password".to_string()));
    }

    Ok(())
}

/// Validate an age.
pub fn validate_age(age: i64) -> Result<(), ValidationError> {
    if !(0..=MAX_AGE).contains(&age) {
        return Err(ValidationError::OutOfRange {
            field: "age".to_string(),
            min: 0,
            max: MAX_AGE,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("user.name@domain.co.uk").is_ok());
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email(" test@example.com ").is_ok()); // trimmed
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(matches!(validate_email(""), Err(ValidationError::Empty(_))));

        for email in [
            "test.example.com",
            "test@example@com",
            "@example.com",
            "test@",
            "test@localhost",
            "test@.example.com",
            "test@example.com.",
            "test@example..com",
        ] {
            assert!(
                matches!(validate_email(email), Err(ValidationError::InvalidEmail(_))),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_email_too_long() {
        let long_local = "a".repeat(250);
        let email = format!("{}@example.com", long_local);
        assert!(matches!(
            validate_email(&email),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("").is_ok());
        assert!(validate_name("Ada Lovelace").is_ok());
        assert!(matches!(
            validate_name(&"n".repeat(101)),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_password_and_age() {
        assert!(validate_password("pw123456").is_ok());
        assert!(matches!(validate_password(""), Err(ValidationError::Empty(_))));

        assert!(validate_age(0).is_ok());
        assert!(validate_age(42).is_ok());
        assert!(matches!(validate_age(-1), Err(ValidationError::OutOfRange { .. })));
        assert!(matches!(validate_age(151), Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::InvalidEmail("test message".to_string());
        assert_eq!(err.to_string(), "Invalid email: test message");

        let err = ValidationError::TooLong {
            field: "email".to_string(),
            max: 254,
            actual: 300,
        };
        assert_eq!(err.to_string(), "email is too long (300 chars, max 254)");

        let err = ValidationError::Empty("messages".to_string());
        assert_eq!(err.to_string(), "messages cannot be empty");
    }
}
