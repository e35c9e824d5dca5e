//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID cannot be empty")]
    EmptyId,

    #[error("User ID exceeds maximum length of {0} characters")]
    IdTooLong(usize),

    #[error("User ID contains invalid character: '{0}'. Only alphanumeric characters and hyphens are allowed")]
    InvalidIdCharacter(char),

    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username is too short. Minimum length is {0} characters")]
    UsernameTooShort(usize),

    #[error("Username exceeds maximum length of {0} characters")]
    UsernameTooLong(usize),

    #[error("Username contains invalid character: '{0}'. Only alphanumeric characters, underscores, and hyphens are allowed")]
    InvalidUsernameCharacter(char),

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email is not a valid address")]
    InvalidEmail,
}

const MAX_USER_ID_LENGTH: usize = 50;
const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 50;
const MIN_PASSWORD_LENGTH: usize = 6;

/// Validate a user ID
///
/// Rules:
/// - Cannot be empty
/// - Maximum 50 characters
/// - Only alphanumeric characters and hyphens (uuid shaped)
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    if id.is_empty() {
        return Err(UserValidationError::EmptyId);
    }

    if id.len() > MAX_USER_ID_LENGTH {
        return Err(UserValidationError::IdTooLong(MAX_USER_ID_LENGTH));
    }

    for c in id.chars() {
        if !c.is_ascii_alphanumeric() && c != '-' {
            return Err(UserValidationError::InvalidIdCharacter(c));
        }
    }

    Ok(())
}

/// Validate a username
///
/// Rules:
/// - Cannot be empty
/// - Minimum 3 characters
/// - Maximum 50 characters
/// - Only alphanumeric characters, underscores, and hyphens
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    if username.len() < MIN_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooShort(MIN_USERNAME_LENGTH));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    for c in username.chars() {
        if !c.is_ascii_alphanumeric() && c != '_' && c != '-' {
            return Err(UserValidationError::InvalidUsernameCharacter(c));
        }
    }

    Ok(())
}

/// Validate a password
///
/// Rules:
/// - Minimum 6 characters
/// - No upper bound; the hasher must accept arbitrarily long input
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    Ok(())
}

/// Validate an email address
///
/// Deliberately shallow: one '@' with non-empty local and domain parts,
/// no whitespace. Deliverability is not our problem.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if email.chars().any(char::is_whitespace) {
        return Err(UserValidationError::InvalidEmail);
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(UserValidationError::InvalidEmail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // User ID tests
    #[test]
    fn test_valid_user_ids() {
        assert!(validate_user_id("admin").is_ok());
        assert!(validate_user_id("user-1").is_ok());
        assert!(validate_user_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
    }

    #[test]
    fn test_empty_user_id() {
        assert_eq!(validate_user_id(""), Err(UserValidationError::EmptyId));
    }

    #[test]
    fn test_user_id_too_long() {
        let long_id = "a".repeat(51);
        assert_eq!(
            validate_user_id(&long_id),
            Err(UserValidationError::IdTooLong(50))
        );
    }

    #[test]
    fn test_user_id_invalid_character() {
        assert_eq!(
            validate_user_id("user_name"),
            Err(UserValidationError::InvalidIdCharacter('_'))
        );
    }

    // Username tests
    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("user_name").is_ok());
        assert!(validate_username("user-name").is_ok());
        assert!(validate_username("User123").is_ok());
    }

    #[test]
    fn test_empty_username() {
        assert_eq!(
            validate_username(""),
            Err(UserValidationError::EmptyUsername)
        );
    }

    #[test]
    fn test_username_too_short() {
        assert_eq!(
            validate_username("ab"),
            Err(UserValidationError::UsernameTooShort(3))
        );
    }

    #[test]
    fn test_username_too_long() {
        let long_username = "a".repeat(51);
        assert_eq!(
            validate_username(&long_username),
            Err(UserValidationError::UsernameTooLong(50))
        );
    }

    #[test]
    fn test_username_invalid_character() {
        assert_eq!(
            validate_username("user@name"),
            Err(UserValidationError::InvalidUsernameCharacter('@'))
        );
    }

    // Password tests
    #[test]
    fn test_valid_passwords() {
        assert!(validate_password("123456").is_ok());
        assert!(validate_password("P@ssw0rd!").is_ok());
    }

    #[test]
    fn test_password_too_short() {
        assert_eq!(
            validate_password("12345"),
            Err(UserValidationError::PasswordTooShort(6))
        );
    }

    #[test]
    fn test_long_password_accepted() {
        let long_password = "a".repeat(1024);
        assert!(validate_password(&long_password).is_ok());
    }

    // Email tests
    #[test]
    fn test_valid_emails() {
        assert!(validate_email("admin@sweetshop.com").is_ok());
        assert!(validate_email("a@b").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(validate_email(""), Err(UserValidationError::EmptyEmail));
        assert_eq!(
            validate_email("no-at-sign"),
            Err(UserValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_email("@domain.com"),
            Err(UserValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_email("user@"),
            Err(UserValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_email("user @domain.com"),
            Err(UserValidationError::InvalidEmail)
        );
    }
}
