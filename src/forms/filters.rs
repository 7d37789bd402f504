//! Listing filters and their non-blocking format hints.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::types::is_valid_name;

static FILTER_EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,4}$")
        .expect("filter email pattern compiles")
});

/// Optional narrowing criteria for the customer list.
///
/// A missing or blank value means "no constraint".
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct CustomerFilters {
    pub name: Option<String>,
    pub document: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Helper texts for filters whose current value looks malformed.
///
/// Hints never block a search.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct FilterHints {
    pub name: Option<&'static str>,
    pub document: Option<&'static str>,
    pub phone: Option<&'static str>,
    pub email: Option<&'static str>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn hint(value: &Option<String>, check: fn(&str) -> bool, message: &'static str) -> Option<&'static str> {
    non_blank(value).filter(|v| !check(v)).map(|_| message)
}

impl CustomerFilters {
    /// Trimmed, non-blank filters keyed by their backend parameter name.
    pub fn active(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", &self.name),
            ("document", &self.document),
            ("phone", &self.phone),
            ("email", &self.email),
        ]
        .into_iter()
        .filter_map(|(key, value)| non_blank(value).map(|v| (key, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }

    /// Computes helper texts for the filters that have content.
    pub fn hints(&self) -> FilterHints {
        FilterHints {
            name: hint(&self.name, is_valid_name, "Nome inválido"),
            document: hint(
                &self.document,
                |v| v.chars().all(|c| c.is_ascii_digit()),
                "Documento inválido",
            ),
            phone: hint(
                &self.phone,
                |v| v.chars().all(|c| c.is_ascii_digit()) && (10..=11).contains(&v.len()),
                "Telefone inválido",
            ),
            email: hint(
                &self.email,
                |v| FILTER_EMAIL_REGEX.is_match(v),
                "E-mail inválido",
            ),
        }
    }
}
