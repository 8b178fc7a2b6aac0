// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error type for URL discovery

use thiserror::Error;

/// Errors that can occur while discovering candidate URLs
///
/// "No results" is never an error: providers return an empty list instead.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Request to the provider failed before a response arrived
    #[error("{provider} request failed: {message}")]
    Request {
        /// Provider name
        provider: String,
        /// Transport error message
        message: String,
    },

    /// Provider answered with a non-success status
    #[error("{provider} returned HTTP {status}")]
    Status {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
    },

    /// Provider did not answer in time
    #[error("{provider} timed out after {timeout_ms}ms")]
    Timeout {
        /// Provider name
        provider: String,
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// Every configured provider failed
    #[error("All discovery providers failed")]
    AllProvidersFailed,

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl DiscoveryError {
    /// Map a reqwest error from `provider` into a discovery error
    pub fn from_reqwest(provider: &str, timeout_ms: u64, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
                timeout_ms,
            }
        } else {
            Self::Request {
                provider: provider.to_string(),
                message: error.to_string(),
            }
        }
    }
}
