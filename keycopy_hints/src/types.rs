// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: modes, candidate handles, colors, and key events.
//!
//! ## Overview
//!
//! These types describe the inputs and outputs of the hint engine.
//! They are referenced by the [`session`](crate::session) and used by hosts to
//! translate their native key events and paint calls.

use core::fmt;

/// What text an activation collects and copies.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Elements owning at least one non-blank text node; copies only those text nodes.
    DirectText,
    /// Elements with any non-blank descendant text; copies the full text content.
    AllText,
}

impl Mode {
    /// The mode entered by an activation key: `y` for direct text, `Y` for all text.
    pub fn from_activation_key(c: char) -> Option<Self> {
        match c {
            'y' => Some(Self::DirectText),
            'Y' => Some(Self::AllText),
            _ => None,
        }
    }
}

/// Handle of a candidate within one activation's [`CandidateForest`](crate::CandidateForest).
///
/// Ids are dense indices in document order and are meaningless across activations.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CandidateId(pub(crate) u32);

impl CandidateId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Candidate counts are bounded by page element counts, far below u32::MAX."
    )]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of the candidate in document order.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A color in HSL space with alpha, matching CSS `hsla()`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsla {
    /// Hue in degrees, `0.0..360.0`.
    pub hue: f64,
    /// Saturation in percent.
    pub saturation: f64,
    /// Lightness in percent.
    pub lightness: f64,
    /// Alpha in `0.0..=1.0`.
    pub alpha: f64,
}

impl Hsla {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(0.0, 0.0, 100.0, 1.0);
    /// Opaque pure red.
    pub const RED: Self = Self::new(0.0, 100.0, 50.0, 1.0);

    /// Create a color from its components.
    pub const fn new(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }
}

/// Formats as a CSS color, e.g. `hsla(120, 100%, 50%, 0.2)`.
impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({}, {}%, {}%, {})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

bitflags::bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Control.
        const CTRL  = 0b0000_0001;
        /// Shift.
        const SHIFT = 0b0000_0010;
        /// Alt / Option.
        const ALT   = 0b0000_0100;
        /// Meta / Command / Super.
        const META  = 0b0000_1000;
    }
}

/// A logical key.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Key {
    /// A printable character other than space.
    Char(char),
    /// The space bar.
    Space,
    /// Backspace.
    Backspace,
    /// Escape.
    Escape,
    /// Anything else (arrows, function keys, ...).
    Other,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value.
    ///
    /// ```
    /// use keycopy_hints::Key;
    /// assert_eq!(Key::parse(" "), Key::Space);
    /// assert_eq!(Key::parse("Y"), Key::Char('Y'));
    /// assert_eq!(Key::parse("Escape"), Key::Escape);
    /// assert_eq!(Key::parse("ArrowDown"), Key::Other);
    /// ```
    pub fn parse(key: &str) -> Self {
        match key {
            " " => Self::Space,
            "Backspace" => Self::Backspace,
            "Escape" => Self::Escape,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other,
                }
            }
        }
    }
}

/// A key press delivered to the [`Session`](crate::Session).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct KeyEvent {
    /// The logical key.
    pub key: Key,
    /// Modifiers held at the time of the press.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press without modifiers.
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// A printable character press without modifiers.
    pub const fn char(c: char) -> Self {
        Self::new(Key::Char(c))
    }

    /// The same press with `modifiers` held.
    pub const fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self {
            key: self.key,
            modifiers,
        }
    }
}

/// Whether the session consumed a key press.
///
/// Hosts should suppress the page's native handling (e.g. `preventDefault`) for
/// [`Consumed`](Self::Consumed) presses and let [`PassThrough`](Self::PassThrough) presses reach the page.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyDisposition {
    /// The session handled the key.
    Consumed,
    /// The key is not meaningful in the current state.
    PassThrough,
}
