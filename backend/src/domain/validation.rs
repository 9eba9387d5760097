//! Exhaustive payload validation.
//!
//! Validation is a pure step: a raw payload either becomes a typed draft or
//! yields every violated rule at once. Nothing here touches storage, so
//! callers can reject a request before any mutation is attempted.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use super::Error;

/// Machine-readable reason a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// A required field was absent.
    Required,
    /// The field was present but empty or whitespace only.
    Blank,
    /// The field exceeded its maximum length.
    TooLong,
    /// The field is not a syntactically valid email address.
    InvalidEmail,
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Violation {
    #[schema(example = "firstName")]
    field: &'static str,
    code: ViolationCode,
    #[schema(example = "firstName must not be blank")]
    message: String,
}

impl Violation {
    fn new(field: &'static str, code: ViolationCode) -> Self {
        let message = match code {
            ViolationCode::Required => format!("{field} is required"),
            ViolationCode::Blank => format!("{field} must not be blank"),
            ViolationCode::TooLong => format!("{field} is too long"),
            ViolationCode::InvalidEmail => format!("{field} must be a valid email"),
        };
        Self {
            field,
            code,
            message,
        }
    }

    /// Wire name of the rejected field.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Reason the field was rejected.
    pub fn code(&self) -> ViolationCode {
        self.code
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Payload failed one or more rules.
///
/// Always carries at least one violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", violations.len())]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Every violation, in field declaration order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether `field` was rejected with `code`.
    pub fn contains(&self, field: &str, code: ViolationCode) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && v.code == code)
    }
}

impl From<ValidationError> for Error {
    fn from(value: ValidationError) -> Self {
        let first = value
            .violations
            .first()
            .map(|v| v.message.clone())
            .unwrap_or_else(|| "request failed validation".to_owned());
        Error::invalid_request(first).with_details(json!({ "violations": value.violations }))
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Collects violations while individual fields are checked.
#[derive(Debug, Default)]
pub(crate) struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn reject(&mut self, field: &'static str, code: ViolationCode) {
        self.violations.push(Violation::new(field, code));
    }

    fn check_shape(&mut self, field: &'static str, value: &str, max: usize) -> bool {
        if value.trim().is_empty() {
            self.reject(field, ViolationCode::Blank);
            return false;
        }
        if value.chars().count() > max {
            self.reject(field, ViolationCode::TooLong);
            return false;
        }
        true
    }

    /// Require a non-blank value of at most `max` characters.
    pub(crate) fn required(
        &mut self,
        field: &'static str,
        value: Option<String>,
        max: usize,
    ) -> String {
        match value {
            None => {
                self.reject(field, ViolationCode::Required);
                String::new()
            }
            Some(value) => {
                self.check_shape(field, &value, max);
                value
            }
        }
    }

    /// Require a non-empty secret of at most `max` characters.
    ///
    /// Whitespace is significant in secrets, so only the empty string is
    /// treated as blank.
    pub(crate) fn secret(
        &mut self,
        field: &'static str,
        value: Option<String>,
        max: usize,
    ) -> Option<String> {
        match value {
            None => self.reject(field, ViolationCode::Required),
            Some(ref secret) if secret.is_empty() => self.reject(field, ViolationCode::Blank),
            Some(ref secret) if secret.chars().count() > max => {
                self.reject(field, ViolationCode::TooLong);
            }
            Some(_) => {}
        }
        value
    }

    /// Accept an absent value; a present one must be non-blank and bounded.
    pub(crate) fn optional(
        &mut self,
        field: &'static str,
        value: Option<String>,
        max: usize,
    ) -> Option<String> {
        if let Some(ref present) = value {
            self.check_shape(field, present, max);
        }
        value
    }

    /// Like [`Validator::optional`], additionally enforcing an email shape.
    pub(crate) fn optional_email(
        &mut self,
        field: &'static str,
        value: Option<String>,
        max: usize,
    ) -> Option<String> {
        if let Some(ref present) = value {
            if self.check_shape(field, present, max) && !email_regex().is_match(present) {
                self.reject(field, ViolationCode::InvalidEmail);
            }
        }
        value
    }

    /// Return `value` when no rule was broken.
    pub(crate) fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError {
                violations: self.violations,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("test@pzn.com", true)]
    #[case("first.last@mail.example.org", true)]
    #[case("test", false)]
    #[case("test@pzn", false)]
    #[case("a b@pzn.com", false)]
    #[case("@pzn.com", false)]
    fn email_shape(#[case] email: &str, #[case] valid: bool) {
        let mut validator = Validator::new();
        validator.optional_email("email", Some(email.to_owned()), 100);
        assert_eq!(validator.finish(()).is_ok(), valid);
    }

    #[rstest]
    fn collects_every_violation() {
        let mut validator = Validator::new();
        validator.required("firstName", None, 100);
        validator.optional("phone", Some("1".repeat(21)), 20);
        validator.optional_email("email", Some("  ".to_owned()), 100);
        let err = validator.finish(()).expect_err("three violations");

        assert_eq!(err.violations().len(), 3);
        assert!(err.contains("firstName", ViolationCode::Required));
        assert!(err.contains("phone", ViolationCode::TooLong));
        assert!(err.contains("email", ViolationCode::Blank));
    }

    #[rstest]
    fn lengths_count_characters_not_bytes() {
        let mut validator = Validator::new();
        validator.required("postalCode", Some("éééééééééé".to_owned()), 10);
        assert!(validator.finish(()).is_ok());
    }

    #[rstest]
    fn converts_into_invalid_request_with_details() {
        let mut validator = Validator::new();
        validator.required("country", None, 100);
        let err: Error = validator.finish(()).expect_err("violation").into();

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "country is required");
        let violations = err
            .details()
            .and_then(|d| d.get("violations"))
            .and_then(|v| v.as_array())
            .expect("violations array");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0]["code"], "required");
    }
}
