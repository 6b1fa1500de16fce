// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keycopy Relay: forwards copy requests to the active tab.
//!
//! A background component receives `{"action": "copy", "text": ...}` requests
//! and passes them, unchanged, to the page in the active tab through a
//! [`TabMessenger`]. The page side decodes them with [`RelayMessage::parse`] and
//! hands the text to its hint session's clipboard path.
//!
//! ```
//! use keycopy_relay::{Relay, RelayError, Relayed, TabMessenger};
//!
//! struct OneTab(Vec<String>);
//!
//! impl TabMessenger for OneTab {
//!     type Tab = ();
//!     type Error = String;
//!     fn active_tab(&self) -> Option<()> {
//!         Some(())
//!     }
//!     fn send(&mut self, _tab: (), message: &str) -> Result<(), String> {
//!         self.0.push(message.to_owned());
//!         Ok(())
//!     }
//! }
//!
//! let mut relay = Relay::new(OneTab(Vec::new()));
//! assert!(matches!(
//!     relay.handle_json(r#"{"action":"copy","text":"x"}"#),
//!     Ok(Relayed::Forwarded(_))
//! ));
//! assert_eq!(relay.handle_json(r#"{"action":"other"}"#), Ok(Relayed::Ignored));
//! assert!(matches!(relay.handle_json("nope"), Err(RelayError::Malformed(_))));
//! ```

mod error;
mod message;
mod relay;

pub use error::RelayError;
pub use message::RelayMessage;
pub use relay::{Relay, Relayed, TabMessenger};
