//! Client configuration and request options.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::convert::ConversionMode;
use crate::header::HeaderDefaults;

/// Resolved options for a request. The client holds one set as defaults;
/// every call sees its own copy with `CallOptions` applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderOptions {
    /// Key conversion applied to params and body before dispatch.
    #[serde(default)]
    pub before_send_conversion_mode: ConversionMode,

    /// Carried through to the context for after-receive middleware; the
    /// client itself does not act on it.
    #[serde(default)]
    pub after_receive_conversion_mode: ConversionMode,

    /// Milliseconds to wait for the transport. `0` waits indefinitely.
    #[serde(default = "default_response_timeout")]
    pub response_timeout: u64,
}

impl Default for SenderOptions {
    fn default() -> Self {
        Self {
            before_send_conversion_mode: ConversionMode::Default,
            after_receive_conversion_mode: ConversionMode::Default,
            response_timeout: default_response_timeout(),
        }
    }
}

impl SenderOptions {
    /// The timeout to race against, if any.
    pub fn timeout(&self) -> Option<Duration> {
        (self.response_timeout > 0).then(|| Duration::from_millis(self.response_timeout))
    }

    /// Applies the fields set in `overrides` on top of `self`.
    pub fn merged(&self, overrides: &CallOptions) -> SenderOptions {
        SenderOptions {
            before_send_conversion_mode: overrides
                .before_send_conversion_mode
                .unwrap_or(self.before_send_conversion_mode),
            after_receive_conversion_mode: overrides
                .after_receive_conversion_mode
                .unwrap_or(self.after_receive_conversion_mode),
            response_timeout: overrides.response_timeout.unwrap_or(self.response_timeout),
        }
    }
}

fn default_response_timeout() -> u64 {
    5000
}

/// Per-call option overrides. Unset fields fall back to the client defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_send_conversion_mode: Option<ConversionMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_receive_conversion_mode: Option<ConversionMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_timeout: Option<u64>,
}

impl CallOptions {
    pub fn with_timeout(mut self, millis: u64) -> Self {
        self.response_timeout = Some(millis);
        self
    }

    pub fn with_before_send_conversion(mut self, mode: ConversionMode) -> Self {
        self.before_send_conversion_mode = Some(mode);
        self
    }
}

/// Everything a `RequestService` can be constructed from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(default)]
    pub base_url: String,

    /// Default headers per verb, merged over the built-in defaults.
    #[serde(default)]
    pub headers: HeaderDefaults,

    #[serde(default)]
    pub options: SenderOptions,
}
