//! Base URL + endpoint + query string.

use serde_json::{Map, Value};

use crate::convert::ConversionMode;
use crate::error::{RequestError, Result};
use crate::query;

/// Holds the base URL and joins endpoints onto it.
///
/// No normalisation happens: `"https://h"` + `"/users"` is
/// `"https://h/users"`, and the caller owns the slashes.
#[derive(Debug, Clone, Default)]
pub struct UrlBuilder {
    base_url: String,
}

impl UrlBuilder {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut builder = Self::default();
        builder.set_base_url(base_url)?;
        Ok(builder)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replaces the base URL. Whitespace and control characters are
    /// rejected and leave the previous value in place.
    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(RequestError::InvalidArgument(format!(
                "the base url must not contain whitespace or control characters: {url:?}"
            )));
        }
        self.base_url = url.to_string();
        Ok(())
    }

    /// `base_url + endpoint`, followed by the query string of `params` after
    /// their keys went through `mode`.
    pub fn build_url(&self, endpoint: &str, params: &Map<String, Value>, mode: ConversionMode) -> String {
        let params = mode.convert_map(params);
        format!("{}{}{}", self.base_url, endpoint, query::format(&params))
    }
}
