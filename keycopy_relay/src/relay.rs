// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The background-side forwarder.

use core::fmt::{Debug, Display};

use tracing::{debug, warn};

use crate::error::RelayError;
use crate::message::RelayMessage;

/// Browser-tab messaging as seen by the relay.
pub trait TabMessenger {
    /// Tab identifier.
    type Tab: Copy + Debug;
    /// Delivery failure.
    type Error: Display;

    /// The active tab of the current window, if any.
    fn active_tab(&self) -> Option<Self::Tab>;

    /// Send an encoded [`RelayMessage`] to `tab`.
    fn send(&mut self, tab: Self::Tab, message: &str) -> Result<(), Self::Error>;
}

/// What the relay did with a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Relayed {
    /// Forwarded to the active tab.
    Forwarded(RelayMessage),
    /// Not a request the relay handles.
    Ignored,
}

/// Forwards copy requests to whichever tab is active.
#[derive(Debug)]
pub struct Relay<M> {
    messenger: M,
}

impl<M: TabMessenger> Relay<M> {
    /// Create a relay sending through `messenger`.
    pub fn new(messenger: M) -> Self {
        Self { messenger }
    }

    /// Decode a request and forward it if it is one the relay handles.
    pub fn handle_json(&mut self, json: &str) -> Result<Relayed, RelayError> {
        match RelayMessage::parse(json) {
            Ok(Some(message)) => self.forward(message),
            Ok(None) => {
                debug!("ignoring unknown relay action");
                Ok(Relayed::Ignored)
            }
            Err(err) => {
                warn!(%err, "dropping relay request");
                Err(err)
            }
        }
    }

    /// Forward `message` to the active tab, unchanged.
    pub fn forward(&mut self, message: RelayMessage) -> Result<Relayed, RelayError> {
        let tab = self.messenger.active_tab().ok_or(RelayError::NoActiveTab)?;
        self.messenger
            .send(tab, &message.to_json())
            .map_err(|err| {
                warn!(?tab, %err, "relay delivery failed");
                RelayError::Delivery(err.to_string())
            })?;
        debug!(?tab, "relay request forwarded");
        Ok(Relayed::Forwarded(message))
    }

    /// The messenger.
    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Consume the relay, returning the messenger.
    pub fn into_inner(self) -> M {
        self.messenger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Tabs {
        active: Option<u32>,
        offline: bool,
        sent: Vec<(u32, String)>,
    }

    impl TabMessenger for Tabs {
        type Tab = u32;
        type Error = &'static str;

        fn active_tab(&self) -> Option<u32> {
            self.active
        }

        fn send(&mut self, tab: u32, message: &str) -> Result<(), Self::Error> {
            if self.offline {
                return Err("receiving end does not exist");
            }
            self.sent.push((tab, message.to_owned()));
            Ok(())
        }
    }

    const COPY: &str = r#"{"action":"copy","text":"hello"}"#;

    #[test]
    fn forwards_copy_to_active_tab() {
        let mut relay = Relay::new(Tabs {
            active: Some(7),
            ..Tabs::default()
        });
        let out = relay.handle_json(COPY).unwrap();
        assert_eq!(
            out,
            Relayed::Forwarded(RelayMessage::Copy {
                text: "hello".into()
            })
        );
        assert_eq!(relay.messenger().sent, [(7, COPY.to_owned())]);
    }

    #[test]
    fn unknown_actions_send_nothing() {
        let mut relay = Relay::new(Tabs {
            active: Some(1),
            ..Tabs::default()
        });
        assert_eq!(
            relay.handle_json(r#"{"action":"ping"}"#).unwrap(),
            Relayed::Ignored
        );
        assert!(relay.into_inner().sent.is_empty());
    }

    #[test]
    fn failures_are_reported_without_retry() {
        let mut relay = Relay::new(Tabs::default());
        assert_eq!(relay.handle_json(COPY), Err(RelayError::NoActiveTab));

        let mut relay = Relay::new(Tabs {
            active: Some(2),
            offline: true,
            ..Tabs::default()
        });
        assert_eq!(
            relay.handle_json(COPY),
            Err(RelayError::Delivery("receiving end does not exist".into()))
        );
        assert!(matches!(
            relay.handle_json("{"),
            Err(RelayError::Malformed(_))
        ));
    }
}
