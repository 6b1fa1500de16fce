// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session configuration.

use alloc::string::String;
use core::fmt;
use core::time::Duration;

use crate::labels::Alphabet;
use crate::types::{Hsla, Mode};

/// What happens to an active session when the page scrolls.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollPolicy {
    /// Tear down and re-activate in the same mode, rebuilding the forest.
    #[default]
    Rescan,
    /// Keep the forest and labels; re-read bounds and repaint.
    Reposition,
}

/// Font used for hint labels.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontSpec {
    /// CSS font family list.
    pub family: String,
    /// Size in CSS pixels.
    pub size: f64,
    /// Bold weight.
    pub bold: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Arial, sans-serif".into(),
            size: 12.0,
            bold: true,
        }
    }
}

/// CSS shorthand, e.g. `bold 12px Arial, sans-serif`.
impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bold {
            f.write_str("bold ")?;
        }
        write!(f, "{}px {}", self.size, self.family)
    }
}

/// Texts of the transient notices.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NoticeTexts {
    /// Shown while direct-text mode is active.
    pub direct_text: String,
    /// Shown while all-text mode is active.
    pub all_text: String,
    /// Shown when activation finds nothing to hint.
    pub no_candidates: String,
    /// Shown after a successful copy.
    pub copied: String,
    /// Shown after a failed copy.
    pub copy_failed: String,
}

impl NoticeTexts {
    /// The sticky notice shown while `mode` is active.
    pub fn mode(&self, mode: Mode) -> &str {
        match mode {
            Mode::DirectText => &self.direct_text,
            Mode::AllText => &self.all_text,
        }
    }
}

impl Default for NoticeTexts {
    fn default() -> Self {
        Self {
            direct_text: "Yank Direct Text".into(),
            all_text: "Yank All Text".into(),
            no_candidates: "No text elements to yank".into(),
            copied: "Copied!".into(),
            copy_failed: "Copy failed".into(),
        }
    }
}

/// Tunables of a [`Session`](crate::Session).
///
/// The default reproduces the stock look and timing. With the `serde` feature
/// every field is optional when deserializing:
///
/// ```
/// # #[cfg(feature = "serde")] {
/// let config: keycopy_hints::HintConfig =
///     serde_json::from_str(r#"{ "alphabet": "asdf", "label_padding": 2.0 }"#).unwrap();
/// assert_eq!(config.alphabet.radix(), 4);
/// assert_eq!(config.border_width, 2.0);
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HintConfig {
    /// Symbols labels are spelled with.
    pub alphabet: Alphabet,
    /// Label font.
    pub font: FontSpec,
    /// Label offset from the box's top-left corner.
    pub label_padding: f64,
    /// Box border color.
    pub border_color: Hsla,
    /// Box border width.
    pub border_width: f64,
    /// Untyped label color.
    pub label_color: Hsla,
    /// Color of the typed part of a label.
    pub accent_color: Hsla,
    /// Label outline color.
    pub label_outline_color: Hsla,
    /// Label outline width.
    pub label_outline_width: f64,
    /// Box fill alpha in direct-text mode.
    pub direct_text_alpha: f64,
    /// Box fill alpha in all-text mode.
    pub all_text_alpha: f64,
    /// Copy confirmation outline color.
    pub flash_color: Hsla,
    /// Copy confirmation outline width.
    pub flash_width: f64,
    /// How long the copy confirmation outline stays.
    pub flash_duration: Duration,
    /// How long transient notices stay.
    pub notice_duration: Duration,
    /// Quiet period before a viewport resize is handled.
    pub resize_debounce: Duration,
    /// Reaction to page scrolling while active.
    pub scroll_policy: ScrollPolicy,
    /// Notice texts.
    pub notices: NoticeTexts,
}

impl HintConfig {
    /// Box fill alpha for `mode`.
    pub fn fill_alpha(&self, mode: Mode) -> f64 {
        match mode {
            Mode::DirectText => self.direct_text_alpha,
            Mode::AllText => self.all_text_alpha,
        }
    }
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::digits(),
            font: FontSpec::default(),
            label_padding: 4.0,
            border_color: Hsla::BLACK,
            border_width: 2.0,
            label_color: Hsla::BLACK,
            accent_color: Hsla::RED,
            label_outline_color: Hsla::WHITE,
            label_outline_width: 3.0,
            direct_text_alpha: 0.2,
            all_text_alpha: 0.1,
            flash_color: Hsla::BLACK,
            flash_width: 3.0,
            flash_duration: Duration::from_millis(150),
            notice_duration: Duration::from_millis(1500),
            resize_debounce: Duration::from_millis(100),
            scroll_policy: ScrollPolicy::Rescan,
            notices: NoticeTexts::default(),
        }
    }
}
