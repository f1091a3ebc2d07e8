//! Per-verb default headers.
//!
//! # Design
//! The table is a fixed array with one `Headers` map per `Verb`, so every
//! verb always has an entry. It is only changed through `set_default` and
//! `remove_default`. Leaving the verb out of either call applies it to
//! every verb.

use std::collections::BTreeMap;

use http::{HeaderName, HeaderValue};
use tracing::trace;

use crate::error::{RequestError, Result};
use crate::method::{self, Verb};

/// Header name to header value.
pub type Headers = BTreeMap<String, String>;

/// Default headers keyed by verb, as accepted from configuration.
pub type HeaderDefaults = BTreeMap<Verb, Headers>;

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Owns the header table and merges call headers over it.
#[derive(Debug, Clone)]
pub struct HeaderResolver {
    table: [Headers; 5],
}

impl Default for HeaderResolver {
    fn default() -> Self {
        let mut table: [Headers; 5] = Default::default();
        for verb in Verb::ALL {
            if verb != Verb::Get {
                table[verb.index()].insert("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string());
            }
        }
        Self { table }
    }
}

impl HeaderResolver {
    /// Seeds the built-in defaults, then merges `overrides` per verb.
    /// Override values win on key collision.
    ///
    /// Overrides go through the same checks as `set_default`; one bad
    /// entry rejects the whole configuration.
    pub fn new(overrides: &HeaderDefaults) -> Result<Self> {
        let mut resolver = Self::default();
        for (verb, headers) in overrides {
            validate(headers)?;
            resolver.table[verb.index()].extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Ok(resolver)
    }

    /// Sets a default header for `method`, or for every verb when `method`
    /// is `None` or empty.
    pub fn set_default(&mut self, key: &str, value: &str, method: Option<&str>) -> Result<()> {
        validate_name(key)?;
        validate_value(key, value)?;
        let target = method::parse_optional(method)?;

        for headers in self.targets(target) {
            headers.insert(key.to_string(), value.to_string());
        }
        trace!(key, value, method = ?target, "default header set");
        Ok(())
    }

    /// Removes a default header. Removing a key that is not present is a
    /// no-op.
    pub fn remove_default(&mut self, key: &str, method: Option<&str>) -> Result<()> {
        validate_name(key)?;
        let target = method::parse_optional(method)?;

        for headers in self.targets(target) {
            headers.remove(key);
        }
        trace!(key, method = ?target, "default header removed");
        Ok(())
    }

    /// Defaults for `method` with `custom` merged on top.
    ///
    /// An empty `method` selects no defaults and returns `custom` alone.
    pub fn headers_for(&self, method: &str, custom: &Headers) -> Result<Headers> {
        match method::parse_optional(Some(method))? {
            Some(verb) => Ok(self.headers_for_verb(verb, custom)),
            None => Ok(custom.clone()),
        }
    }

    pub fn headers_for_verb(&self, verb: Verb, custom: &Headers) -> Headers {
        let mut merged = self.table[verb.index()].clone();
        merged.extend(custom.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    fn targets(&mut self, verb: Option<Verb>) -> Vec<&mut Headers> {
        match verb {
            Some(verb) => vec![&mut self.table[verb.index()]],
            None => self.table.iter_mut().collect(),
        }
    }
}

/// Checks that every entry can be sent as an HTTP header.
pub(crate) fn validate(headers: &Headers) -> Result<()> {
    for (key, value) in headers {
        validate_name(key)?;
        validate_value(key, value)?;
    }
    Ok(())
}

fn validate_name(key: &str) -> Result<()> {
    HeaderName::from_bytes(key.as_bytes())
        .map(|_| ())
        .map_err(|_| RequestError::InvalidArgument(format!("invalid header name {key:?}")))
}

fn validate_value(key: &str, value: &str) -> Result<()> {
    HeaderValue::from_str(value)
        .map(|_| ())
        .map_err(|_| RequestError::InvalidArgument(format!("invalid value for header {key:?}")))
}
