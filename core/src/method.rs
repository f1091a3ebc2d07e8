//! The fixed set of supported HTTP verbs.
//!
//! Registry checks are case-sensitive against the uppercase names. Callers
//! that accept user input go through `parse_method`, which uppercases first.
//! An absent or empty method means "no constraint" and passes validation,
//! which is how header operations express "every verb".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RequestError, Result};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    /// Every supported verb, in registry order.
    pub const ALL: [Verb; 5] = [Verb::Get, Verb::Post, Verb::Put, Verb::Patch, Verb::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }

    /// Whether the transport receives a request body for this verb.
    pub fn has_body(self) -> bool {
        matches!(self, Verb::Post | Verb::Put | Verb::Patch)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = RequestError;

    /// Exact, case-sensitive lookup in the registry.
    fn from_str(s: &str) -> Result<Self> {
        Verb::ALL
            .into_iter()
            .find(|verb| verb.as_str() == s)
            .ok_or_else(|| RequestError::invalid_method(s))
    }
}

/// Names of all valid methods.
pub fn valid_methods() -> [&'static str; 5] {
    Verb::ALL.map(Verb::as_str)
}

pub fn is_valid(method: &str) -> bool {
    method.parse::<Verb>().is_ok()
}

/// Validates an optional method.
///
/// `None` and `Some("")` pass and yield `None`; any other string must be
/// an exact registry member.
pub fn validate(method: Option<&str>) -> Result<Option<Verb>> {
    match method {
        None | Some("") => Ok(None),
        Some(name) => name.parse().map(Some),
    }
}

/// Uppercases `raw` and validates it as a required method.
pub fn parse_method(raw: &str) -> Result<Verb> {
    raw.to_uppercase().parse()
}

/// Uppercases and validates an optional method.
pub(crate) fn parse_optional(raw: Option<&str>) -> Result<Option<Verb>> {
    let upper = raw.map(str::to_uppercase);
    validate(upper.as_deref())
}
