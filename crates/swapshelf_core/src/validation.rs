//! Payload shape and format checks.
//!
//! All checks are pure: they inspect the payload only and never touch
//! the record store. Uniqueness rules (email, duplicate swap triples)
//! need store reads and are enforced by the facade before mutation.

use crate::entity::{BookPayload, UserPayload};
use crate::error::{ServiceError, ServiceResult};
use regex::Regex;
use std::sync::OnceLock;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .expect("email pattern is valid")
    })
}

fn phone_re() -> &'static Regex {
    PHONE_RE.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"))
}

/// Checks that a required field is non-empty once trimmed.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidPayload`] naming the field.
pub fn require(value: &str, field: &'static str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::invalid_payload(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

/// Checks that an email has a `local@domain.tld` shape.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidPayload`] if the shape doesn't match.
pub fn validate_email(email: &str) -> ServiceResult<()> {
    require(email, "email")?;
    if !email_re().is_match(email) {
        return Err(ServiceError::invalid_payload(format!(
            "email {email:?} is not a valid address"
        )));
    }
    Ok(())
}

/// Checks that a phone number is exactly 10 decimal digits.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidPayload`] otherwise.
pub fn validate_phone(phone: &str) -> ServiceResult<()> {
    require(phone, "phone number")?;
    if !phone_re().is_match(phone) {
        return Err(ServiceError::invalid_payload(
            "phone number must be exactly 10 digits",
        ));
    }
    Ok(())
}

/// Checks that a rating is present (non-zero).
///
/// # Errors
///
/// Returns [`ServiceError::InvalidPayload`] for a zero rating.
pub fn validate_rating(rating: u32) -> ServiceResult<()> {
    if rating == 0 {
        return Err(ServiceError::invalid_payload("rating must be provided"));
    }
    Ok(())
}

/// Validates a full user payload.
///
/// # Errors
///
/// Returns the first violated rule as [`ServiceError::InvalidPayload`].
pub fn validate_user_payload(payload: &UserPayload) -> ServiceResult<()> {
    require(&payload.name, "name")?;
    validate_email(&payload.email)?;
    validate_phone(&payload.phone_number)?;
    Ok(())
}

/// Validates a full book payload.
///
/// # Errors
///
/// Returns the first violated rule as [`ServiceError::InvalidPayload`].
pub fn validate_book_payload(payload: &BookPayload) -> ServiceResult<()> {
    require(&payload.title, "title")?;
    require(&payload.author, "author")?;
    require(&payload.genre, "genre")?;
    require(&payload.description, "description")?;
    require(&payload.image_url, "image url")?;
    Ok(())
}
