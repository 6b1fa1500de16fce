// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wire messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RelayError;

/// A request exchanged between the background relay and page sessions.
///
/// Encoded as a JSON object tagged by `action`:
///
/// ```
/// use keycopy_relay::RelayMessage;
///
/// let msg = RelayMessage::Copy { text: "hi".into() };
/// assert_eq!(msg.to_json(), r#"{"action":"copy","text":"hi"}"#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum RelayMessage {
    /// Put `text` on the clipboard of the receiving page.
    Copy {
        /// Text to copy.
        text: String,
    },
}

impl RelayMessage {
    /// Decode a message.
    ///
    /// Returns `Ok(None)` for well-formed objects whose `action` is not one this
    /// relay knows, so newer senders do not trip older receivers.
    pub fn parse(json: &str) -> Result<Option<Self>, RelayError> {
        let value: Value = serde_json::from_str(json)?;
        match value.get("action").and_then(Value::as_str) {
            Some("copy") => Ok(Some(serde_json::from_value(value)?)),
            Some(_) => Ok(None),
            None => Err(RelayError::Malformed("missing `action`".into())),
        }
    }

    /// Encode as compact JSON.
    pub fn to_json(&self) -> String {
        match self {
            Self::Copy { text } => serde_json::json!({ "action": "copy", "text": text }).to_string(),
        }
    }
}
