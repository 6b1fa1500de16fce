// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! None of these are fatal: the [`Session`](crate::Session) recovers from each one
//! by showing a transient notice and returning to the inactive state. They are
//! surfaced to hosts for logging.

use alloc::string::String;

use thiserror::Error;

/// Hint engine errors.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum HintError {
    /// The scan found no visible element qualifying for the requested mode.
    #[error("no visible text elements to hint")]
    NoCandidates,
    /// The clipboard rejected a write.
    #[error("clipboard write failed: {0}")]
    ClipboardWriteFailed(#[from] ClipboardError),
    /// A label alphabet was rejected.
    #[error("invalid hint alphabet: {0}")]
    InvalidAlphabet(&'static str),
}

/// Failure reported by a [`ClipboardSink`](crate::ClipboardSink) host.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("{reason}")]
pub struct ClipboardError {
    reason: String,
}

impl ClipboardError {
    /// Create an error carrying the host's reason text.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The host's reason text.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
