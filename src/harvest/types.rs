// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for the fetch-and-extract pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::discovery::DiscoveryError;

/// Classification of a per-URL failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// Request exceeded its deadline
    Timeout,
    /// Server answered with a non-2xx status
    HttpError,
    /// Connection, DNS, TLS failure or unparseable markup
    TransportError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "Timeout"),
            Self::HttpError => write!(f, "HTTPError"),
            Self::TransportError => write!(f, "TransportError"),
        }
    }
}

/// Raw outcome of retrieving one URL, before extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success { status_code: u16, raw_body: String },
    Failure { kind: FailureKind, message: String },
}

impl FetchOutcome {
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Readable content extracted from one successfully fetched page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedPage {
    /// Document title, empty when the page has none
    pub title: String,
    /// `description` meta content, empty when absent
    pub description: String,
    /// Heading, optional description line and Markdown body
    pub text: String,
    /// Absolute image URLs in discovery order, no duplicates
    pub images: Vec<String>,
}

/// Final classification of a URL once extraction has run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ResultOutcome {
    #[serde(rename_all = "camelCase")]
    Extracted {
        status_code: u16,
        page: ExtractedPage,
    },
    #[serde(rename_all = "camelCase")]
    Failed { kind: FailureKind, message: String },
}

/// Per-URL record produced exactly once by the fetch executor
///
/// Fields are private so a result cannot change after it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    url: String,
    outcome: ResultOutcome,
    captured_at: DateTime<Utc>,
}

impl FetchResult {
    pub fn extracted(url: impl Into<String>, status_code: u16, page: ExtractedPage) -> Self {
        Self {
            url: url.into(),
            outcome: ResultOutcome::Extracted { status_code, page },
            captured_at: Utc::now(),
        }
    }

    pub fn failed(url: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            outcome: ResultOutcome::Failed {
                kind,
                message: message.into(),
            },
            captured_at: Utc::now(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn outcome(&self) -> &ResultOutcome {
        &self.outcome
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ResultOutcome::Extracted { .. })
    }

    /// Extracted page, present only on success
    pub fn page(&self) -> Option<&ExtractedPage> {
        match &self.outcome {
            ResultOutcome::Extracted { page, .. } => Some(page),
            ResultOutcome::Failed { .. } => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match &self.outcome {
            ResultOutcome::Extracted { status_code, .. } => Some(*status_code),
            ResultOutcome::Failed { .. } => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match &self.outcome {
            ResultOutcome::Failed { kind, .. } => Some(*kind),
            ResultOutcome::Extracted { .. } => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match &self.outcome {
            ResultOutcome::Failed { message, .. } => Some(message),
            ResultOutcome::Extracted { .. } => None,
        }
    }

    /// Number of images, zero for failures
    pub fn image_count(&self) -> usize {
        self.page().map(|p| p.images.len()).unwrap_or(0)
    }
}

/// Errors raised while turning markup into an [`ExtractedPage`]
///
/// These never leave the executor: they are downgraded to
/// [`FailureKind::TransportError`] results.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Body was empty or contained only whitespace
    #[error("Empty document")]
    EmptyDocument,

    /// A CSS selector failed to compile
    #[error("Invalid selector {selector}: {reason}")]
    Selector {
        /// The selector source text
        selector: String,
        /// Parser message
        reason: String,
    },

    /// Markdown conversion failed
    #[error("Markup conversion failed: {0}")]
    Conversion(String),
}

/// Batch-level errors surfaced to the caller
#[derive(Debug, Error)]
pub enum HarvestError {
    /// No candidate URLs, nothing was fetched
    #[error("No candidate URLs found for {query}")]
    DiscoveryEmpty {
        /// The query (or direct-input sentinel) that yielded nothing
        query: String,
    },

    /// Discovery failed at the transport level
    #[error("Discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
