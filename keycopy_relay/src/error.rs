// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Relay errors.

use thiserror::Error;

/// Why a relayed request was not delivered.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RelayError {
    /// The request was not a valid message.
    #[error("malformed relay message: {0}")]
    Malformed(String),
    /// There is no active tab to deliver to.
    #[error("no active tab")]
    NoActiveTab,
    /// The messenger failed to deliver. Not retried.
    #[error("delivery failed: {0}")]
    Delivery(String),
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
