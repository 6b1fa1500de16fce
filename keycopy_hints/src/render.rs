// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay painting.
//!
//! ## Overview
//!
//! The renderer paints one box per visible hint onto a [`Surface`]: a
//! translucent fill in the candidate's color, a solid border, and the label,
//! outlined for contrast. Every paint starts from a cleared surface, so
//! repainting with unchanged geometry is idempotent.
//!
//! Paint order is descending layer, so inner (more nested) hints land on top of
//! the containers around them.
//!
//! ## Selection
//!
//! [`OverlayRenderer::render_with_selection`] paints only hints whose label starts
//! with the typed prefix and draws that prefix in the accent color, followed by
//! the rest of the label offset by the prefix's measured width.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};

use crate::config::{FontSpec, HintConfig};
use crate::forest::{Candidate, CandidateForest};
use crate::hint_index::HintIndex;
use crate::types::Hsla;

/// A 2D drawing surface covering the viewport, in CSS pixel coordinates.
///
/// The overlay is a single layer that is cleared and fully repainted. A second,
/// independent flash layer shows the brief outline confirming a copy.
pub trait Surface {
    /// Resize the backing store to `size * scale` device pixels and scale drawing
    /// so that coordinates stay in CSS pixels. Clears the overlay.
    fn resize(&mut self, size: Size, scale: f64);
    /// Clear the whole overlay layer.
    fn clear(&mut self);
    /// Select the font for subsequent text calls. Text is drawn with a top baseline.
    fn set_font(&mut self, font: &FontSpec);
    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Hsla);
    /// Stroke a rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, color: Hsla, width: f64);
    /// Fill text with its top-left at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, color: Hsla);
    /// Stroke the outline of text with its top-left at `origin`.
    fn stroke_text(&mut self, text: &str, origin: Point, color: Hsla, width: f64);
    /// Advance width of `text` in the current font.
    fn measure_text(&self, text: &str) -> f64;
    /// Show the flash outline, replacing any previous one.
    fn show_flash(&mut self, rect: Rect, color: Hsla, width: f64);
    /// Remove the flash outline.
    fn clear_flash(&mut self);
}

/// Fill color for candidate `index` of `total`: hues evenly spread around the wheel.
pub fn hint_color(index: usize, total: usize, alpha: f64) -> Hsla {
    #[allow(
        clippy::cast_precision_loss,
        reason = "Candidate counts are far below 2^52."
    )]
    let hue = if total == 0 {
        0.0
    } else {
        (index as f64 * (360.0 / total as f64)) % 360.0
    };
    Hsla::new(hue, 100.0, 50.0, alpha)
}

/// Color every candidate of `forest` by its document-order index.
pub fn assign_colors<E: Copy>(forest: &mut CandidateForest<E>, alpha: f64) {
    let total = forest.len();
    for (i, candidate) in forest.candidates_mut().iter_mut().enumerate() {
        candidate.color = hint_color(i, total, alpha);
    }
}

/// Paints hints with the styling from a [`HintConfig`].
#[derive(Clone, Copy, Debug)]
pub struct OverlayRenderer<'a> {
    config: &'a HintConfig,
}

impl<'a> OverlayRenderer<'a> {
    /// Create a renderer using `config` for fonts, strokes, and colors.
    pub fn new(config: &'a HintConfig) -> Self {
        Self { config }
    }

    /// Clear the surface and paint every hint in `visible`.
    pub fn render_all<S, E>(&self, surface: &mut S, forest: &CandidateForest<E>, visible: &HintIndex)
    where
        S: Surface + ?Sized,
        E: Copy,
    {
        self.begin(surface);
        for candidate in visible.paint_order().iter().filter_map(|id| forest.get(*id)) {
            self.paint_box(surface, candidate);
            self.paint_label(surface, candidate.label(), candidate.bounds(), self.config.label_color);
        }
    }

    /// Clear the surface and paint the hints whose label starts with `prefix`,
    /// highlighting the typed part.
    pub fn render_with_selection<S, E>(
        &self,
        surface: &mut S,
        forest: &CandidateForest<E>,
        visible: &HintIndex,
        prefix: &str,
    ) where
        S: Surface + ?Sized,
        E: Copy,
    {
        self.begin(surface);
        for candidate in visible.paint_order().iter().filter_map(|id| forest.get(*id)) {
            let Some(rest) = candidate.label().strip_prefix(prefix) else {
                continue;
            };
            self.paint_box(surface, candidate);
            let bounds = candidate.bounds();
            self.paint_label(surface, prefix, bounds, self.config.accent_color);
            let offset = surface.measure_text(prefix);
            self.paint_label(
                surface,
                rest,
                bounds + Vec2::new(offset, 0.0),
                self.config.label_color,
            );
        }
    }

    /// Paint the flash outline confirming a copy of the element at `rect`.
    pub fn flash<S: Surface + ?Sized>(&self, surface: &mut S, rect: Rect) {
        surface.show_flash(rect, self.config.flash_color, self.config.flash_width);
    }

    fn begin<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        surface.set_font(&self.config.font);
    }

    fn paint_box<S: Surface + ?Sized, E>(&self, surface: &mut S, candidate: &Candidate<E>) {
        surface.fill_rect(candidate.bounds, candidate.color);
        surface.stroke_rect(
            candidate.bounds,
            self.config.border_color,
            self.config.border_width,
        );
    }

    fn paint_label<S: Surface + ?Sized>(&self, surface: &mut S, text: &str, bounds: Rect, color: Hsla) {
        if text.is_empty() {
            return;
        }
        let pad = self.config.label_padding;
        let origin = Point::new(bounds.x0 + pad, bounds.y0 + pad);
        surface.stroke_text(
            text,
            origin,
            self.config.label_outline_color,
            self.config.label_outline_width,
        );
        surface.fill_text(text, origin, color);
    }
}

/// One recorded paint call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// [`Surface::fill_rect`].
    FillRect {
        /// Filled rectangle.
        rect: Rect,
        /// Fill color.
        color: Hsla,
    },
    /// [`Surface::stroke_rect`].
    StrokeRect {
        /// Outlined rectangle.
        rect: Rect,
        /// Stroke color.
        color: Hsla,
        /// Line width.
        width: f64,
    },
    /// [`Surface::fill_text`].
    FillText {
        /// The text.
        text: String,
        /// Top-left of the text.
        origin: Point,
        /// Fill color.
        color: Hsla,
    },
    /// [`Surface::stroke_text`].
    StrokeText {
        /// The text.
        text: String,
        /// Top-left of the text.
        origin: Point,
        /// Stroke color.
        color: Hsla,
        /// Line width.
        width: f64,
    },
}

/// A [`Surface`] that records paint calls instead of rasterizing them.
///
/// The op list holds what is currently on the overlay: [`Surface::clear`] and
/// [`Surface::resize`] empty it. Text is measured as a fixed advance per character
/// (`0.6 * font size`), which is enough for layout-dependent assertions and for
/// headless hosts that forward the list to a real canvas.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    font_size: f64,
    size: Size,
    scale: f64,
    clears: usize,
    flash: Option<Rect>,
}

impl RecordingSurface {
    /// Create an empty, zero-sized surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint calls since the last clear.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Whether nothing is painted.
    pub fn is_blank(&self) -> bool {
        self.ops.is_empty()
    }

    /// Filled text runs since the last clear, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Filled rectangles since the last clear, in paint order.
    pub fn boxes(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Size in CSS pixels and device scale from the last resize.
    pub fn dimensions(&self) -> (Size, f64) {
        (self.size, self.scale)
    }

    /// Backing store size in device pixels.
    pub fn device_size(&self) -> Size {
        self.size * self.scale
    }

    /// How many times the overlay was cleared (including by resize).
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// The flash outline currently shown.
    pub fn flash(&self) -> Option<Rect> {
        self.flash
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, size: Size, scale: f64) {
        self.size = size;
        self.scale = scale;
        self.clear();
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.clears += 1;
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.font_size = font.size;
    }

    fn fill_rect(&mut self, rect: Rect, color: Hsla) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Hsla, width: f64) {
        self.ops.push(DrawOp::StrokeRect { rect, color, width });
    }

    fn fill_text(&mut self, text: &str, origin: Point, color: Hsla) {
        self.ops.push(DrawOp::FillText {
            text: text.into(),
            origin,
            color,
        });
    }

    fn stroke_text(&mut self, text: &str, origin: Point, color: Hsla, width: f64) {
        self.ops.push(DrawOp::StrokeText {
            text: text.into(),
            origin,
            color,
            width,
        });
    }

    fn measure_text(&self, text: &str) -> f64 {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Label lengths are tiny."
        )]
        let chars = text.chars().count() as f64;
        chars * self.font_size * 0.6
    }

    fn show_flash(&mut self, rect: Rect, _color: Hsla, _width: f64) {
        self.flash = Some(rect);
    }

    fn clear_flash(&mut self) {
        self.flash = None;
    }
}
