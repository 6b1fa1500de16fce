// Copyright 2025 the Keycopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of a [`Session`] driven over an in-memory page.

use core::time::Duration;

use keycopy_dom::{DomTree, ElementFlags, ElementId, LocalElement, Page, Viewport};
use keycopy_hints::{
    ClipboardError, ClipboardSink, CopyTicket, HintConfig, HintError, Key, KeyDisposition,
    KeyEvent, Mode, Modifiers, Notifier, RecordingSurface, ScrollPolicy, Session,
};
use kurbo::{Rect, Size, Vec2};

#[derive(Debug, Default)]
struct Clipboard {
    writes: Vec<(CopyTicket, String)>,
}

impl ClipboardSink for Clipboard {
    fn write(&mut self, ticket: CopyTicket, text: &str) {
        self.writes.push((ticket, text.to_owned()));
    }
}

#[derive(Debug, Default)]
struct Notices {
    shown: Option<String>,
    history: Vec<String>,
}

impl Notifier for Notices {
    fn show(&mut self, text: &str) {
        self.shown = Some(text.to_owned());
        self.history.push(text.to_owned());
    }

    fn hide(&mut self) {
        self.shown = None;
    }
}

type TestSession = Session<DomTree, RecordingSurface, Clipboard, Notices>;

const T0: Duration = Duration::ZERO;

const fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn block(x0: f64, y0: f64, x1: f64, y1: f64) -> LocalElement {
    LocalElement {
        bounds: Rect::new(x0, y0, x1, y1),
        ..Default::default()
    }
}

fn page() -> (DomTree, ElementId) {
    let mut page = DomTree::new(Viewport::new(400.0, 300.0));
    let body = page.insert(None, block(0.0, 0.0, 400.0, 300.0));
    (page, body)
}

/// A body with `texts.len()` stacked paragraphs, 25px apart.
fn paragraphs(texts: &[&str]) -> (DomTree, Vec<ElementId>) {
    let (mut page, body) = page();
    let mut ids = Vec::new();
    for (i, text) in texts.iter().enumerate() {
        let y = 25.0 * f64::from(u32::try_from(i).unwrap());
        let p = page.insert(Some(body), block(0.0, y, 200.0, y + 20.0));
        page.push_text(p, *text);
        ids.push(p);
    }
    (page, ids)
}

fn session(page: DomTree) -> TestSession {
    session_with(page, HintConfig::default())
}

fn session_with(page: DomTree, config: HintConfig) -> TestSession {
    Session::new(
        page,
        RecordingSurface::new(),
        Clipboard::default(),
        Notices::default(),
        config,
    )
}

fn press(s: &mut TestSession, c: char) -> KeyDisposition {
    s.key_down(KeyEvent::char(c), T0)
}

fn labels(s: &TestSession) -> Vec<String> {
    let hints = s.active().expect("session should be active");
    hints
        .forest()
        .iter()
        .map(|(_, c)| c.label().to_owned())
        .collect()
}

#[test]
fn three_leaves_get_single_digit_labels() {
    let (page, ids) = paragraphs(&["one", "two", "three"]);
    let mut s = session(page);
    assert_eq!(press(&mut s, 'y'), KeyDisposition::Consumed);

    let hints = s.active().expect("activated");
    assert_eq!(hints.mode(), Mode::DirectText);
    let elements: Vec<_> = hints.forest().iter().map(|(_, c)| c.element()).collect();
    assert_eq!(elements, ids);
    assert!(hints.forest().iter().all(|(_, c)| c.layer() == 1));
    assert_eq!(labels(&s), ["0", "1", "2"]);
    assert_eq!(s.surface().texts(), ["0", "1", "2"]);
    assert_eq!(s.surface().dimensions(), (Size::new(400.0, 300.0), 1.0));
    assert_eq!(s.notifier().shown.as_deref(), Some("Yank Direct Text"));
    assert_eq!(s.notifier().history, ["Yank Direct Text"]);
}

#[test]
fn all_text_mode_uses_lighter_fill() {
    let (page, _) = paragraphs(&["one"]);
    let mut s = session(page);
    press(&mut s, 'Y');
    let hints = s.active().expect("activated");
    assert_eq!(hints.mode(), Mode::AllText);
    // Body and paragraph both carry text.
    assert_eq!(hints.forest().len(), 2);
    assert!(hints.forest().iter().all(|(_, c)| c.color().alpha == 0.1));
    assert_eq!(s.notifier().shown.as_deref(), Some("Yank All Text"));
}

#[test]
fn zero_match_prefix_resets_and_stays_active() {
    let texts: Vec<String> = (0..12).map(|i| format!("p{i}")).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let (page, _) = paragraphs(&refs);
    let mut s = session(page);
    press(&mut s, 'y');
    assert_eq!(labels(&s)[11], "11");

    assert_eq!(press(&mut s, '1'), KeyDisposition::Consumed);
    assert_eq!(s.active().unwrap().prefix(), "1");
    assert_eq!(s.surface().texts(), ["1", "0", "1", "1"]);

    // "12" matches nothing.
    press(&mut s, '2');
    let hints = s.active().expect("still active");
    assert_eq!(hints.prefix(), "");
    assert_eq!(s.surface().texts().len(), 12);
    assert!(s.clipboard().writes.is_empty());
}

#[test]
fn backspace_drops_last_symbol() {
    let texts: Vec<String> = (0..30).map(|i| format!("p{i}")).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let (page, _) = paragraphs(&refs);
    let mut s = session(page);
    press(&mut s, 'y');
    press(&mut s, '0');
    assert_eq!(s.surface().boxes().len(), 10);
    s.key_down(KeyEvent::new(Key::Backspace), T0);
    assert_eq!(s.active().unwrap().prefix(), "");
    assert_eq!(s.surface().boxes().len(), 12, "only 12 paragraphs fit the viewport");
    // Floor at empty.
    s.key_down(KeyEvent::new(Key::Backspace), T0);
    assert_eq!(s.active().unwrap().prefix(), "");
}

#[test]
fn unique_match_copies_once_and_deactivates() {
    let (page, _) = paragraphs(&["one", "two", "three"]);
    let mut s = session(page);
    press(&mut s, 'y');
    assert_eq!(press(&mut s, '2'), KeyDisposition::Consumed);

    assert!(!s.is_active());
    assert_eq!(s.clipboard().writes.len(), 1);
    assert_eq!(s.clipboard().writes[0].1, "three");
    assert!(s.surface().is_blank());
    assert_eq!(s.notifier().shown, None);

    // Digits mean nothing while inactive.
    assert_eq!(press(&mut s, '2'), KeyDisposition::PassThrough);
    assert_eq!(s.clipboard().writes.len(), 1);
}

#[test]
fn copy_success_shows_notice_and_flash() {
    let (page, ids) = paragraphs(&["one", "two"]);
    let mut s = session(page);
    press(&mut s, 'y');
    press(&mut s, '1');
    let ticket = s.clipboard().writes[0].0;

    s.clipboard_completed(ticket, Ok(()), ms(10)).unwrap();
    assert_eq!(s.notifier().shown.as_deref(), Some("Copied!"));
    assert_eq!(s.surface().flash(), Some(s.page().bounding_rect(ids[1])));
    assert_eq!(s.next_deadline(), Some(ms(160)));

    s.advance(ms(160));
    assert_eq!(s.surface().flash(), None);
    assert_eq!(s.notifier().shown.as_deref(), Some("Copied!"));
    assert_eq!(s.next_deadline(), Some(ms(1510)));

    s.advance(ms(1510));
    assert_eq!(s.notifier().shown, None);
    assert_eq!(s.next_deadline(), None);

    // Completing the same ticket again is a no-op.
    s.clipboard_completed(ticket, Ok(()), ms(2000)).unwrap();
    assert_eq!(s.notifier().shown, None);
}

#[test]
fn copy_failure_is_reported() {
    let (page, _) = paragraphs(&["one"]);
    let mut s = session(page);
    press(&mut s, 'y');
    press(&mut s, '0');
    let ticket = s.clipboard().writes[0].0;

    let err = s
        .clipboard_completed(ticket, Err(ClipboardError::new("denied")), T0)
        .unwrap_err();
    assert_eq!(
        err,
        HintError::ClipboardWriteFailed(ClipboardError::new("denied"))
    );
    assert_eq!(s.notifier().shown.as_deref(), Some("Copy failed"));
    assert_eq!(s.surface().flash(), None);
    assert!(!s.is_active());
}

/// `section` (own text) wraps `inner` (own text); `lone` is a sibling of `section`.
fn two_layers() -> (DomTree, [ElementId; 3]) {
    let (mut page, body) = page();
    let section = page.insert(Some(body), block(0.0, 0.0, 400.0, 100.0));
    page.push_text(section, "Heading");
    let inner = page.insert(Some(section), block(0.0, 50.0, 200.0, 80.0));
    page.push_text(inner, "Nested");
    let lone = page.insert(Some(body), block(0.0, 120.0, 200.0, 150.0));
    page.push_text(lone, "Lone");
    (page, [section, inner, lone])
}

#[test]
fn layer_cycling_wraps_both_ways() {
    let (page, [section, ..]) = two_layers();
    let mut s = session(page);
    press(&mut s, 'y');
    assert_eq!(s.active().unwrap().layers().len(), 2);
    assert_eq!(s.active().unwrap().visible().len(), 3);

    let space = KeyEvent::new(Key::Space);
    let back = space.with_modifiers(Modifiers::CTRL);

    assert_eq!(s.key_down(space, T0), KeyDisposition::Consumed);
    let hints = s.active().unwrap();
    assert_eq!(hints.current_layer(), 1);
    assert_eq!(hints.visible().len(), 1);
    let shown = hints.visible().paint_order()[0];
    assert_eq!(hints.forest().get(shown).unwrap().element(), section);
    assert_eq!(s.surface().texts(), ["0"]);

    s.key_down(space, T0);
    assert_eq!(s.active().unwrap().current_layer(), 0);
    assert_eq!(s.surface().texts().len(), 3);

    s.key_down(back, T0);
    assert_eq!(s.active().unwrap().current_layer(), 1);
    s.key_down(back, T0);
    assert_eq!(s.active().unwrap().current_layer(), 0);
}

#[test]
fn cycling_keeps_a_prefix_that_still_matches() {
    // One section wrapping ten paragraphs, then a lone paragraph: labels 00..11.
    let (mut page, body) = page();
    let section = page.insert(Some(body), block(0.0, 0.0, 400.0, 280.0));
    page.push_text(section, "Section");
    let mut paras = Vec::new();
    for i in 0..10_u32 {
        let y = 20.0 + 25.0 * f64::from(i);
        let p = page.insert(Some(section), block(0.0, y, 200.0, y + 20.0));
        page.push_text(p, "para");
        paras.push(p);
    }
    let lone = page.insert(Some(body), block(0.0, 285.0, 200.0, 300.0));
    page.push_text(lone, "lone");

    let mut s = session(page);
    press(&mut s, 'y');
    assert_eq!(labels(&s)[0], "00");
    press(&mut s, '0');
    s.key_down(KeyEvent::new(Key::Space), T0);

    // Only "00" remains, yet cycling never copies on its own.
    let hints = s.active().expect("still active");
    assert_eq!(hints.prefix(), "0");
    assert_eq!(hints.visible().len(), 1);
    assert!(s.clipboard().writes.is_empty());

    // Back to every layer; the prefix still narrows to 00..09.
    s.key_down(KeyEvent::new(Key::Space), T0);
    assert_eq!(s.active().unwrap().prefix(), "0");
    press(&mut s, '1');
    assert_eq!(s.clipboard().writes.len(), 1);
    assert_eq!(s.clipboard().writes[0].1, "para");
    assert!(!s.is_active());
}

#[test]
fn cycling_resets_a_prefix_that_no_longer_matches() {
    let texts: Vec<String> = (0..11).map(|i| format!("p{i}")).collect();
    let (mut page, body) = page();
    let section = page.insert(Some(body), block(0.0, 0.0, 400.0, 290.0));
    page.push_text(section, "Section");
    for (i, text) in texts.iter().enumerate() {
        let y = 10.0 + 25.0 * f64::from(u32::try_from(i).unwrap());
        let p = page.insert(Some(section), block(0.0, y, 200.0, y + 20.0));
        page.push_text(p, text.as_str());
    }
    let mut s = session(page);
    press(&mut s, 'y');
    press(&mut s, '1');
    assert_eq!(s.active().unwrap().prefix(), "1");
    s.key_down(KeyEvent::new(Key::Space), T0);
    assert_eq!(s.active().unwrap().prefix(), "");
    assert_eq!(s.surface().texts(), ["00"]);
}

#[test]
fn exit_keys_and_pass_through() {
    let (page, _) = paragraphs(&["one", "two"]);
    let mut s = session(page);
    assert_eq!(
        s.key_down(KeyEvent::new(Key::Other), T0),
        KeyDisposition::PassThrough
    );
    for exit in [
        KeyEvent::new(Key::Escape),
        KeyEvent::char('y'),
        KeyEvent::char('Y'),
    ] {
        press(&mut s, 'y');
        assert!(s.is_active());
        assert_eq!(
            s.key_down(KeyEvent::char('q'), T0),
            KeyDisposition::PassThrough
        );
        assert_eq!(s.key_down(exit, T0), KeyDisposition::Consumed);
        assert!(!s.is_active());
        assert!(s.surface().is_blank());
        assert_eq!(s.notifier().shown, None);
    }
    assert!(s.clipboard().writes.is_empty());
}

#[test]
fn activation_is_ignored_in_text_inputs() {
    let (mut page, body) = page();
    let input = page.insert(
        Some(body),
        LocalElement {
            flags: ElementFlags::VISIBLE | ElementFlags::EDITABLE,
            ..block(0.0, 0.0, 200.0, 20.0)
        },
    );
    let p = page.insert(Some(body), block(0.0, 40.0, 200.0, 60.0));
    page.push_text(p, "text");
    page.set_focus(Some(input));

    let mut s = session(page);
    assert_eq!(press(&mut s, 'y'), KeyDisposition::PassThrough);
    assert!(!s.is_active());

    s.page_mut().set_focus(None);
    assert_eq!(press(&mut s, 'y'), KeyDisposition::Consumed);
    assert!(s.is_active());
}

#[test]
fn nothing_to_hint_shows_transient_notice() {
    let (page, _) = page();
    let mut s = session(page);
    assert_eq!(
        s.activate(Mode::AllText, ms(5)).unwrap_err(),
        HintError::NoCandidates
    );
    assert_eq!(press(&mut s, 'Y'), KeyDisposition::Consumed);
    assert!(!s.is_active());
    assert_eq!(s.notifier().shown.as_deref(), Some("No text elements to yank"));
    assert_eq!(s.next_deadline(), Some(ms(1500)));
    s.advance(ms(1500));
    assert_eq!(s.notifier().shown, None);
}

#[test]
fn scroll_rescans_the_page() {
    let (mut page, body) = page();
    let top = page.insert(Some(body), block(0.0, 10.0, 200.0, 30.0));
    page.push_text(top, "top");
    let below = page.insert(Some(body), block(0.0, 500.0, 200.0, 520.0));
    page.push_text(below, "below the fold");

    let mut s = session(page);
    press(&mut s, 'y');
    let first: Vec<_> = s
        .active()
        .unwrap()
        .forest()
        .iter()
        .map(|(_, c)| c.element())
        .collect();
    assert_eq!(first, [top]);

    s.page_mut().scroll_by(Vec2::new(0.0, 450.0));
    s.scroll(T0);
    let hints = s.active().expect("re-activated");
    assert_eq!(hints.mode(), Mode::DirectText);
    let second: Vec<_> = hints.forest().iter().map(|(_, c)| c.element()).collect();
    assert_eq!(second, [below]);
    assert_eq!(hints.forest().get(hints.visible().paint_order()[0]).unwrap().bounds().y0, 50.0);
}

#[test]
fn scroll_with_reposition_keeps_labels() {
    let (page, ids) = paragraphs(&["one", "two"]);
    let config = HintConfig {
        scroll_policy: ScrollPolicy::Reposition,
        ..HintConfig::default()
    };
    let mut s = session_with(page, config);
    press(&mut s, 'y');
    s.page_mut().scroll_by(Vec2::new(0.0, 10.0));
    s.scroll(T0);

    let hints = s.active().unwrap();
    let elements: Vec<_> = hints.forest().iter().map(|(_, c)| c.element()).collect();
    assert_eq!(elements, ids);
    assert_eq!(
        s.surface().boxes(),
        [
            Rect::new(0.0, -10.0, 200.0, 10.0),
            Rect::new(0.0, 15.0, 200.0, 35.0)
        ]
    );
}

#[test]
fn resize_is_debounced() {
    let (page, ids) = paragraphs(&["one", "two"]);
    let mut s = session(page);
    press(&mut s, 'y');
    let clears = s.surface().clear_count();

    s.page_mut().set_viewport(Viewport {
        size: Size::new(600.0, 500.0),
        device_pixel_ratio: 2.0,
    });
    s.page_mut().set_bounds(ids[0], Rect::new(5.0, 0.0, 300.0, 20.0));
    s.resize(ms(0));
    s.resize(ms(60));
    assert_eq!(s.next_deadline(), Some(ms(160)));

    s.advance(ms(120));
    assert_eq!(s.surface().dimensions(), (Size::new(400.0, 300.0), 1.0));
    assert_eq!(s.surface().clear_count(), clears);

    s.advance(ms(160));
    assert_eq!(s.surface().dimensions(), (Size::new(600.0, 500.0), 2.0));
    assert_eq!(s.surface().device_size(), Size::new(1200.0, 1000.0));
    assert_eq!(s.surface().boxes()[0], Rect::new(5.0, 0.0, 300.0, 20.0));
    assert_eq!(s.surface().texts(), ["0", "1"]);
    assert_eq!(s.next_deadline(), None);
}

#[test]
fn cycling_back_rereads_hidden_layer_geometry() {
    let (mut page, body) = page();
    let section = page.insert(Some(body), block(0.0, 0.0, 400.0, 100.0));
    page.push_text(section, "heading");
    let inner = page.insert(Some(section), block(0.0, 50.0, 200.0, 80.0));
    page.push_text(inner, "nested");

    let mut s = session(page);
    press(&mut s, 'y');
    s.key_down(KeyEvent::new(Key::Space), T0);
    assert_eq!(s.surface().boxes(), [Rect::new(0.0, 0.0, 400.0, 100.0)]);

    // Only the outer layer is shown while the layout changes.
    s.page_mut().set_bounds(inner, Rect::new(10.0, 60.0, 210.0, 90.0));
    s.resize(T0);
    s.advance(ms(100));

    s.key_down(KeyEvent::new(Key::Space), ms(100));
    assert_eq!(s.active().unwrap().current_layer(), 0);
    assert_eq!(
        s.surface().boxes(),
        [
            Rect::new(0.0, 0.0, 400.0, 100.0),
            Rect::new(10.0, 60.0, 210.0, 90.0)
        ]
    );
}

#[test]
fn resize_while_inactive_is_ignored() {
    let (page, _) = paragraphs(&["one"]);
    let mut s = session(page);
    s.resize(T0);
    assert_eq!(s.next_deadline(), None);
}

#[test]
fn overlay_container_is_never_hinted() {
    let (mut page, body) = page();
    let p = page.insert(Some(body), block(0.0, 0.0, 200.0, 20.0));
    page.push_text(p, "content");
    let overlay = page.insert(
        Some(body),
        LocalElement {
            z_index: 1000,
            ..block(300.0, 250.0, 400.0, 300.0)
        },
    );
    page.push_text(overlay, "Yank Direct Text");

    let mut s = session(page).with_overlay_container(overlay);
    press(&mut s, 'y');
    assert_eq!(s.active().unwrap().forest().len(), 1);
    assert_eq!(s.active().unwrap().forest().find(overlay), None);
}

#[test]
fn relayed_copy_notifies_without_flash() {
    let (page, _) = paragraphs(&["one"]);
    let mut s = session(page);
    let ticket = s.copy_text("from elsewhere");
    assert_eq!(s.clipboard().writes, [(ticket, "from elsewhere".to_owned())]);
    s.clipboard_completed(ticket, Ok(()), T0).unwrap();
    assert_eq!(s.notifier().shown.as_deref(), Some("Copied!"));
    assert_eq!(s.surface().flash(), None);
    assert!(!s.is_active());
}

#[test]
fn custom_alphabet_drives_labels_and_keys() {
    let (page, _) = paragraphs(&["a", "b", "c", "d", "e"]);
    let config = HintConfig {
        alphabet: keycopy_hints::Alphabet::new("asdf").unwrap(),
        ..HintConfig::default()
    };
    let mut s = session_with(page, config);
    press(&mut s, 'y');
    assert_eq!(labels(&s), ["aa", "as", "ad", "af", "sa"]);
    // Digits are no longer hint symbols.
    assert_eq!(press(&mut s, '1'), KeyDisposition::PassThrough);
    press(&mut s, 's');
    assert_eq!(s.clipboard().writes[0].1, "e");
}

#[cfg(feature = "serde")]
#[test]
fn config_loads_from_json() {
    let config: HintConfig = serde_json::from_str(
        r#"{
            "alphabet": "jkl",
            "scroll_policy": "Reposition",
            "notices": { "copied": "Yanked" }
        }"#,
    )
    .unwrap();
    assert_eq!(config.alphabet.radix(), 3);
    assert_eq!(config.scroll_policy, ScrollPolicy::Reposition);
    assert_eq!(config.notices.copied, "Yanked");
    assert_eq!(config.notices.copy_failed, "Copy failed");
    assert_eq!(config.notice_duration, ms(1500));
}
