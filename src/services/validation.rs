//! Field rules for account forms. Failures are returned as readable messages
//! and reported to the caller with `flag == false`.

use crate::models::{Login, Register};

const FULL_NAME_MIN: usize = 5;
const FULL_NAME_MAX: usize = 100;
const PASSWORD_MIN: usize = 8;

pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    }) && !email.chars().any(char::is_whitespace);

    if valid {
        Ok(())
    } else {
        Err("Email is not a valid email address".to_string())
    }
}

/// At least eight characters with a lowercase letter, an uppercase letter,
/// a digit and a symbol.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    let strong = password.chars().count() >= PASSWORD_MIN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_ascii_alphanumeric());

    if strong {
        Ok(())
    } else {
        Err("Password must contain at least one lowercase letter, one uppercase letter, one digit, one special character and be at least 8 characters long".to_string())
    }
}

pub fn validate_full_name(full_name: &str) -> Result<(), String> {
    let length = full_name.trim().chars().count();
    if length == 0 {
        return Err("Full name is required".to_string());
    }

    if !(FULL_NAME_MIN..=FULL_NAME_MAX).contains(&length) {
        return Err(format!(
            "Full name must be between {FULL_NAME_MIN} and {FULL_NAME_MAX} characters"
        ));
    }

    Ok(())
}

pub fn validate_register(form: &Register) -> Result<(), String> {
    validate_full_name(&form.full_name)?;
    validate_email(&form.email)?;
    validate_password(&form.password)?;

    if form.confirm_password.is_empty() {
        return Err("Confirm password is required".to_string());
    }
    if form.password != form.confirm_password {
        return Err("Passwords do not match".to_string());
    }

    Ok(())
}

pub fn validate_login(form: &Login) -> Result<(), String> {
    validate_email(&form.email)?;
    if form.password.is_empty() {
        return Err("Password is required".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(password: &str, confirm: &str) -> Register {
        Register {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("jane@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("jane.example.com").is_err());
        assert!(validate_email("jane@localhost").is_err());
        assert!(validate_email("ja ne@example.com").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("Secret#123").is_ok());
        assert!(validate_password("secret#123").is_err());
        assert!(validate_password("SECRET#123").is_err());
        assert!(validate_password("Secret1234").is_err());
        assert!(validate_password("Se#1").is_err());
    }

    #[test]
    fn test_validate_full_name() {
        assert!(validate_full_name("Jane Doe").is_ok());
        assert!(validate_full_name("Jan").is_err());
        assert!(validate_full_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_register_confirmation() {
        assert!(validate_register(&register("Secret#123", "Secret#123")).is_ok());
        assert_eq!(
            validate_register(&register("Secret#123", "Secret#124")),
            Err("Passwords do not match".to_string())
        );
    }
}
