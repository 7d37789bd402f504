//! Strongly-typed value objects used by the customer entity.
//!
//! These wrappers enforce the format rules of every customer field so that a
//! value reaching the backend payload can be treated as trusted. The raw
//! predicates are public as well: the form layer uses them to compute per-field
//! error flags without building the value objects.
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Accepted document lengths: 11 digits (CPF) or 14 digits (CNPJ).
pub const DOCUMENT_LENGTHS: [usize; 2] = [11, 14];
/// Accepted phone lengths: landline (10) or mobile (11) with area code.
pub const PHONE_LENGTHS: [usize; 2] = [10, 11];

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

static PHONE_DISPLAY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2})(\d{5})(\d{4})").expect("phone pattern compiles"));

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Name contained something other than letters and whitespace.
    #[error("name must contain only letters")]
    InvalidName,
    /// Document did not have 11 or 14 digits.
    #[error("document must have 11 or 14 digits")]
    InvalidDocument,
    /// Phone did not have 10 or 11 digits.
    #[error("phone must have 10 or 11 digits")]
    InvalidPhone,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
}

/// Keeps only the ASCII digits of `value`.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Letters (any script) and whitespace only, at least one character.
pub fn is_valid_name(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace())
}

/// Document digits, ignoring any mask characters, count 11 or 14.
pub fn is_valid_document(value: &str) -> bool {
    DOCUMENT_LENGTHS.contains(&digits_only(value).len())
}

/// Phone digits, ignoring any mask characters, count 10 or 11.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_LENGTHS.contains(&digits_only(value).len())
}

/// Basic `local@domain.tld` shape.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Renders the first 11-digit run as `(DD) NNNNN-NNNN`.
///
/// Values without such a run are returned unchanged. Display only, stored
/// data keeps its digits-only form.
pub fn format_phone(phone: &str) -> String {
    PHONE_DISPLAY_REGEX
        .replace(phone, "($1) $2-$3")
        .into_owned()
}

/// Unique identifier for a customer, assigned by the backend.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "i64", into = "i64")]
pub struct CustomerId(i64);

impl CustomerId {
    /// Creates a new identifier ensuring it is greater than zero.
    pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveId)
        }
    }

    /// Returns the raw `i64` backing this identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for CustomerId {
    type Error = TypeConstraintError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CustomerId> for i64 {
    fn from(value: CustomerId) -> Self {
        value.0
    }
}

/// Generates a string newtype checked by `$check` after `$normalize`.
macro_rules! checked_string_newtype {
    ($name:ident, $doc:expr, $normalize:expr, $check:expr, $err:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Normalizes and validates the raw input.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let raw: String = value.into();
                let normalized: String = $normalize(raw.as_str());
                if $check(normalized.as_str()) {
                    Ok(Self(normalized))
                } else {
                    Err($err)
                }
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

checked_string_newtype!(
    CustomerName,
    "Customer name made of letters and whitespace.",
    str::to_owned,
    is_valid_name,
    TypeConstraintError::InvalidName
);

checked_string_newtype!(
    Document,
    "Digits-only CPF or CNPJ shaped document. No checksum is verified.",
    digits_only,
    is_valid_document,
    TypeConstraintError::InvalidDocument
);

checked_string_newtype!(
    Phone,
    "Digits-only phone number with area code.",
    digits_only,
    is_valid_phone,
    TypeConstraintError::InvalidPhone
);

checked_string_newtype!(
    CustomerEmail,
    "Contact email in `local@domain.tld` shape.",
    str::to_owned,
    is_valid_email,
    TypeConstraintError::InvalidEmail
);

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(len: usize) -> String {
        "1234567890".chars().cycle().take(len).collect()
    }

    #[test]
    fn document_accepts_only_cpf_and_cnpj_lengths() {
        for len in 0..=20 {
            let expected = len == 11 || len == 14;
            assert_eq!(is_valid_document(&digits(len)), expected, "length {len}");
        }
    }

    #[test]
    fn document_ignores_mask_characters() {
        assert!(is_valid_document("123.456.789-09"));
        assert!(is_valid_document("12.345.678/0001-95"));
        assert_eq!(
            Document::new("123.456.789-09").unwrap().as_str(),
            "12345678909"
        );
    }

    #[test]
    fn phone_accepts_ten_or_eleven_digits() {
        for len in 0..=15 {
            let expected = len == 10 || len == 11;
            assert_eq!(is_valid_phone(&digits(len)), expected, "length {len}");
        }
        assert_eq!(Phone::new("(11) 98765-4321").unwrap().as_str(), "11987654321");
    }

    #[test]
    fn name_allows_letters_and_whitespace_only() {
        assert!(is_valid_name("Maria da Silva"));
        assert!(is_valid_name("João Conceição"));
        assert!(!is_valid_name("R2D2"));
        assert!(!is_valid_name("Ana-Paula"));
        assert!(!is_valid_name(""));
        assert!(is_valid_name("   "));
        assert_eq!(
            CustomerName::new("Ana 2"),
            Err(TypeConstraintError::InvalidName)
        );
    }

    #[test]
    fn email_requires_at_and_domain_dot() {
        assert!(is_valid_email("ana@oficina.com.br"));
        assert!(!is_valid_email("ana.oficina.com"));
        assert!(!is_valid_email("ana@oficina"));
        assert!(!is_valid_email("ana silva@oficina.com"));
        assert!(CustomerEmail::new("x@y").is_err());
    }

    #[test]
    fn format_phone_inserts_separators() {
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(format_phone("1133334444"), "1133334444");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn customer_id_must_be_positive() {
        assert_eq!(CustomerId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(CustomerId::new(7).unwrap().get(), 7);
    }
}
