// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The hint-mode state machine.
//!
//! ## Overview
//!
//! A [`Session`] owns the page and the host capabilities (surface, clipboard,
//! notifier) and is fed key presses, scroll and resize notifications, clipboard
//! completions, and clock ticks. It is single-threaded: each call runs to
//! completion and every timer is a deadline checked in [`Session::advance`].
//!
//! ## States
//!
//! - [`Activation::Inactive`]: `y` enters direct-text mode and `Y` all-text mode,
//!   unless the focused element accepts text input. Other keys pass through.
//! - [`Activation::Active`]: the page has been scanned into a
//!   [`CandidateForest`], layered, labeled and painted.
//!   - Space / Ctrl+Space: show the layers from the next / previous layer outward.
//!   - Alphabet symbol: extend the typed prefix. A unique match is copied and the
//!     session deactivates; no match resets the prefix.
//!   - Backspace: drop the last typed symbol.
//!   - Escape, `y`, `Y`: deactivate.
//!
//! Copy completions arrive later through [`Session::clipboard_completed`] and only
//! drive the notice and the flash outline, never the hint state.

use alloc::string::String;
use core::time::Duration;

use keycopy_dom::Page;
use tracing::{debug, trace, warn};

use crate::collect::collect;
use crate::config::{HintConfig, ScrollPolicy};
use crate::copy::{ClipboardSink, CopyExecutor, CopyTicket, extract_text};
use crate::error::{ClipboardError, HintError};
use crate::forest::CandidateForest;
use crate::hint_index::{HintIndex, Matches};
use crate::labels::assign_labels;
use crate::layers::{LayerIndex, assign_layers};
use crate::notice::{NoticeBoard, Notifier};
use crate::render::{OverlayRenderer, Surface, assign_colors};
use crate::timer::{Debounce, Timer, earliest};
use crate::types::{Key, KeyDisposition, KeyEvent, Mode, Modifiers};

/// Everything built for one activation. Discarded as a whole on deactivation.
#[derive(Clone, Debug)]
pub struct ActiveHints<E> {
    mode: Mode,
    forest: CandidateForest<E>,
    layers: LayerIndex,
    current_layer: usize,
    prefix: String,
    visible: HintIndex,
}

impl<E: Copy> ActiveHints<E> {
    /// The active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// All candidates found by the scan.
    pub fn forest(&self) -> &CandidateForest<E> {
        &self.forest
    }

    /// Candidates grouped by layer.
    pub fn layers(&self) -> &LayerIndex {
        &self.layers
    }

    /// Index of the innermost layer shown; every layer from here outward is visible.
    pub fn current_layer(&self) -> usize {
        self.current_layer
    }

    /// Symbols typed so far.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The hints currently shown.
    pub fn visible(&self) -> &HintIndex {
        &self.visible
    }

    /// Show `layer` and everything outward, re-reading their geometry from `page`.
    fn show_layers_from<P: Page<Element = E>>(&mut self, page: &P, layer: usize) {
        self.current_layer = layer;
        self.visible = HintIndex::build(&self.forest, self.layers.window(layer));
        self.reposition(page);
        if self.visible.matches(&self.prefix) == Matches::Empty {
            self.prefix.clear();
        }
    }

    fn cycle<P: Page<Element = E>>(&mut self, page: &P, backward: bool) {
        let count = self.layers.len();
        if count == 0 {
            return;
        }
        let next = if backward {
            self.current_layer.checked_sub(1).unwrap_or(count - 1)
        } else {
            (self.current_layer + 1) % count
        };
        self.show_layers_from(page, next);
    }

    fn paint<S: Surface + ?Sized>(&self, surface: &mut S, config: &HintConfig) {
        let renderer = OverlayRenderer::new(config);
        if self.prefix.is_empty() {
            renderer.render_all(surface, &self.forest, &self.visible);
        } else {
            renderer.render_with_selection(surface, &self.forest, &self.visible, &self.prefix);
        }
    }

    fn reposition<P: Page<Element = E>>(&mut self, page: &P) {
        self.forest
            .refresh_bounds(page, self.visible.paint_order().iter().copied());
    }
}

/// The activation state.
#[derive(Clone, Debug)]
pub enum Activation<E> {
    /// No hints shown.
    Inactive,
    /// Hints are shown and keys are interpreted.
    Active(ActiveHints<E>),
}

/// A hint-mode session over one page.
pub struct Session<P: Page, S, C, N> {
    page: P,
    surface: S,
    clipboard: C,
    notifier: N,
    config: HintConfig,
    overlay: Option<P::Element>,
    state: Activation<P::Element>,
    notice: NoticeBoard,
    flash: Timer,
    resize: Debounce,
    copies: CopyExecutor<P::Element>,
}

impl<P: Page, S, C, N> core::fmt::Debug for Session<P, S, C, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = match &self.state {
            Activation::Inactive => "inactive",
            Activation::Active(_) => "active",
        };
        f.debug_struct("Session")
            .field("state", &state)
            .field("copies_in_flight", &self.copies.in_flight())
            .field("flash", &self.flash.deadline())
            .field("resize", &self.resize.deadline())
            .finish_non_exhaustive()
    }
}

impl<P, S, C, N> Session<P, S, C, N>
where
    P: Page,
    S: Surface,
    C: ClipboardSink,
    N: Notifier,
{
    /// Create an inactive session.
    pub fn new(page: P, surface: S, clipboard: C, notifier: N, config: HintConfig) -> Self {
        Self {
            page,
            surface,
            clipboard,
            notifier,
            config,
            overlay: None,
            state: Activation::Inactive,
            notice: NoticeBoard::default(),
            flash: Timer::default(),
            resize: Debounce::default(),
            copies: CopyExecutor::default(),
        }
    }

    /// Exclude `container` (the element hosting the overlay and notice) from scans.
    pub fn with_overlay_container(mut self, container: P::Element) -> Self {
        self.overlay = Some(container);
        self
    }

    /// Handle a key press at `now`.
    pub fn key_down(&mut self, event: KeyEvent, now: Duration) -> KeyDisposition {
        trace!(?event, "key down");
        let Activation::Active(hints) = &mut self.state else {
            let Key::Char(c) = event.key else {
                return KeyDisposition::PassThrough;
            };
            let Some(mode) = Mode::from_activation_key(c) else {
                return KeyDisposition::PassThrough;
            };
            if self
                .page
                .focused()
                .is_some_and(|focused| self.page.is_text_input(focused))
            {
                return KeyDisposition::PassThrough;
            }
            if let Err(err) = self.activate(mode, now) {
                debug!(%err, "activation abandoned");
            }
            return KeyDisposition::Consumed;
        };

        match event.key {
            Key::Space => {
                hints.cycle(&self.page, event.modifiers.contains(Modifiers::CTRL));
                trace!(layer = hints.current_layer, "layer cycled");
                hints.paint(&mut self.surface, &self.config);
            }
            Key::Char(c) if self.config.alphabet.contains(c) => {
                hints.prefix.push(c);
                match hints.visible.matches(&hints.prefix) {
                    Matches::Unique(id) => {
                        if let Some(element) = hints.forest.get(id).map(|candidate| candidate.element()) {
                            let text = extract_text(&self.page, element, hints.mode);
                            let ticket = self.copies.start(&mut self.clipboard, &text, Some(element));
                            debug!(?ticket, len = text.len(), "copy started");
                        }
                        self.deactivate();
                    }
                    Matches::Empty => {
                        hints.prefix.clear();
                        hints.paint(&mut self.surface, &self.config);
                    }
                    Matches::Several(n) => {
                        trace!(matches = n, prefix = %hints.prefix, "narrowed");
                        hints.paint(&mut self.surface, &self.config);
                    }
                }
            }
            Key::Backspace => {
                hints.prefix.pop();
                hints.paint(&mut self.surface, &self.config);
            }
            Key::Escape | Key::Char('y' | 'Y') => self.deactivate(),
            _ => return KeyDisposition::PassThrough,
        }
        KeyDisposition::Consumed
    }

    /// Scan the page and show hints for `mode`, replacing any current activation.
    ///
    /// When nothing qualifies, a transient notice is shown, the session stays
    /// inactive, and [`HintError::NoCandidates`] is returned.
    pub fn activate(&mut self, mode: Mode, now: Duration) -> Result<(), HintError> {
        self.deactivate();
        let mut forest = match collect(&self.page, mode, self.overlay) {
            Ok(forest) => forest,
            Err(err) => {
                self.notice.transient(
                    &mut self.notifier,
                    &self.config.notices.no_candidates,
                    now,
                    self.config.notice_duration,
                );
                return Err(err);
            }
        };
        let layers = assign_layers(&mut forest);
        assign_labels(&mut forest, &self.config.alphabet);
        assign_colors(&mut forest, self.config.fill_alpha(mode));
        let visible = HintIndex::build(&forest, layers.window(0));
        debug!(
            ?mode,
            candidates = forest.len(),
            layers = layers.len(),
            "hint mode activated"
        );

        let hints = ActiveHints {
            mode,
            forest,
            layers,
            current_layer: 0,
            prefix: String::new(),
            visible,
        };
        let viewport = self.page.viewport();
        self.surface
            .resize(viewport.size, viewport.device_pixel_ratio);
        hints.paint(&mut self.surface, &self.config);
        self.notice
            .sticky(&mut self.notifier, self.config.notices.mode(mode));
        self.state = Activation::Active(hints);
        Ok(())
    }

    /// Remove the overlay and the mode notice and forget every activation structure.
    ///
    /// Does nothing when inactive. Copies already started still complete.
    pub fn deactivate(&mut self) {
        if let Activation::Active(hints) = core::mem::replace(&mut self.state, Activation::Inactive) {
            debug!(mode = ?hints.mode, "hint mode deactivated");
            self.surface.clear();
            self.notice.hide(&mut self.notifier);
            self.resize.cancel();
        }
    }

    /// The page scrolled. Applies the configured [`ScrollPolicy`].
    pub fn scroll(&mut self, now: Duration) {
        let Activation::Active(hints) = &mut self.state else {
            return;
        };
        match self.config.scroll_policy {
            ScrollPolicy::Rescan => {
                let mode = hints.mode;
                trace!(?mode, "rescanning after scroll");
                if let Err(err) = self.activate(mode, now) {
                    debug!(%err, "rescan found nothing");
                }
            }
            ScrollPolicy::Reposition => {
                hints.reposition(&self.page);
                hints.paint(&mut self.surface, &self.config);
            }
        }
    }

    /// The viewport resized. Handled once resizing has been quiet for
    /// [`HintConfig::resize_debounce`].
    pub fn resize(&mut self, now: Duration) {
        if matches!(self.state, Activation::Active(_)) {
            self.resize.trigger(now, self.config.resize_debounce);
        }
    }

    /// Fire every timer due at `now`.
    pub fn advance(&mut self, now: Duration) {
        self.notice.advance(&mut self.notifier, now);
        if self.flash.fire(now) {
            self.surface.clear_flash();
        }
        if self.resize.settle(now) {
            if let Activation::Active(hints) = &mut self.state {
                let viewport = self.page.viewport();
                trace!(size = ?viewport.size, "viewport resized");
                self.surface
                    .resize(viewport.size, viewport.device_pixel_ratio);
                hints.reposition(&self.page);
                hints.paint(&mut self.surface, &self.config);
            }
        }
    }

    /// When [`advance`](Self::advance) next has work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        earliest([
            self.notice.deadline(),
            self.flash.deadline(),
            self.resize.deadline(),
        ])
    }

    /// Report the outcome of the clipboard write for `ticket`.
    ///
    /// Success shows the copied notice and flashes the copied element; failure
    /// shows the failure notice and is returned as
    /// [`HintError::ClipboardWriteFailed`]. Unknown tickets are ignored.
    pub fn clipboard_completed(
        &mut self,
        ticket: CopyTicket,
        result: Result<(), ClipboardError>,
        now: Duration,
    ) -> Result<(), HintError> {
        let Some(pending) = self.copies.complete(ticket) else {
            warn!(?ticket, "completion for unknown clipboard write");
            return Ok(());
        };
        match result {
            Ok(()) => {
                debug!(?ticket, "copied");
                self.notice.transient(
                    &mut self.notifier,
                    &self.config.notices.copied,
                    now,
                    self.config.notice_duration,
                );
                if let Some(element) = pending.element {
                    let rect = self.page.bounding_rect(element);
                    OverlayRenderer::new(&self.config).flash(&mut self.surface, rect);
                    self.flash.arm(now, self.config.flash_duration);
                }
                Ok(())
            }
            Err(err) => {
                warn!(?ticket, %err, "clipboard write failed");
                self.notice.transient(
                    &mut self.notifier,
                    &self.config.notices.copy_failed,
                    now,
                    self.config.notice_duration,
                );
                Err(err.into())
            }
        }
    }

    /// Write `text` to the clipboard without touching hint state, e.g. for a
    /// copy request relayed from elsewhere. Completion is reported as usual.
    pub fn copy_text(&mut self, text: &str) -> CopyTicket {
        let ticket = self.copies.start(&mut self.clipboard, text, None);
        debug!(?ticket, len = text.len(), "relayed copy started");
        ticket
    }

    /// The current activation state.
    pub fn state(&self) -> &Activation<P::Element> {
        &self.state
    }

    /// The active hints, if any.
    pub fn active(&self) -> Option<&ActiveHints<P::Element>> {
        match &self.state {
            Activation::Active(hints) => Some(hints),
            Activation::Inactive => None,
        }
    }

    /// Whether hints are shown.
    pub fn is_active(&self) -> bool {
        self.active().is_some()
    }

    /// The page.
    pub fn page(&self) -> &P {
        &self.page
    }

    /// The page, for host-driven changes such as scrolling or focus. Follow up
    /// with [`scroll`](Self::scroll) or [`resize`](Self::resize) as appropriate.
    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// The overlay surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The clipboard sink.
    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// The clipboard sink, mutably.
    pub fn clipboard_mut(&mut self) -> &mut C {
        &mut self.clipboard
    }

    /// The notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// The configuration.
    pub fn config(&self) -> &HintConfig {
        &self.config
    }
}
