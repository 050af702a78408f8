//! End-to-end behavior of the Studio engine through its public API.

use crossterm::event::{KeyCode, KeyModifiers};

use keystudio::config::Config;
use keystudio::models::{ConfigModel, KeyPosition, LayoutKind, RgbColor};
use keystudio::services::MemoryClipboard;
use keystudio::studio::{
    ConfigCodec, DecodeError, FocusTarget, HistoryStack, KeySurface, NoticeLevel, ShareLinks,
    ShortcutDispatcher, ShortcutEvent, StudioCommand, StudioController,
};

mod fixtures;
use fixtures::{model_with_overrides, sample_model};

fn studio() -> StudioController {
    StudioController::new(&Config::default())
        .expect("default config is valid")
        .with_dispatcher(ShortcutDispatcher::with_primary_modifier(
            KeyModifiers::CONTROL,
            0,
        ))
}

// ============================================================================
// History
// ============================================================================

#[test]
fn test_history_keeps_most_recent_entries() {
    let mut history = HistoryStack::new(0, 20);
    for value in 1..=25 {
        history.push(value);
    }
    assert_eq!(history.len(), 20);
    assert_eq!(*history.current(), 25);
    assert_eq!(history.iter().next(), Some(&6));
}

#[test]
fn test_undo_redo_are_exact() {
    let mut history = HistoryStack::new("a", 20);
    history.push("b");
    history.push("c");

    assert_eq!(history.undo(), Some(&"b"));
    assert_eq!(history.redo(), Some(&"c"));
    assert_eq!(history.redo(), None);

    history.undo();
    history.undo();
    assert_eq!(history.undo(), None);
    assert_eq!(*history.current(), "a");
}

#[test]
fn test_push_after_undo_clears_redo() {
    let mut history = HistoryStack::new(1, 20);
    history.push(2);
    history.push(3);
    history.undo();
    history.push(4);

    assert!(!history.can_redo());
    assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![1, 2, 4]);
}

// ============================================================================
// Codec
// ============================================================================

#[test]
fn test_round_trip_within_budget() {
    let codec = ConfigCodec::default();
    let model = model_with_overrides(LayoutKind::SixtyFive, 10);

    let encoded = codec.encode(&model);
    assert!(!encoded.overrides_excluded);
    assert_eq!(codec.decode(encoded.token.as_str()).unwrap(), model);
}

#[test]
fn test_over_budget_keeps_base_only() {
    let codec = ConfigCodec::default();
    let model = model_with_overrides(LayoutKind::FullSize, 104);

    let encoded = codec.encode(&model);
    assert!(encoded.overrides_excluded);
    assert!(encoded.token.len() <= codec.max_token_len());

    let decoded = codec.decode(encoded.token.as_str()).unwrap();
    assert_eq!(decoded.base, model.base);
    assert!(decoded.per_key_overrides.is_empty());
}

#[test]
fn test_selection_is_never_encoded() {
    let codec = ConfigCodec::default();
    let mut model = sample_model();
    model.selection.insert(KeyPosition::nth(3));

    let decoded = codec.decode(codec.encode(&model).token.as_str()).unwrap();
    assert!(decoded.selection.is_empty());
    assert!(decoded.same_design(&model));
}

#[test]
fn test_unsupported_version() {
    let codec = ConfigCodec::default();
    let token = codec.encode(&sample_model()).token;
    let foreign = token.as_str().replacen("v1.", "v2.", 1);

    assert!(matches!(
        codec.decode(&foreign),
        Err(DecodeError::VersionUnsupported(_))
    ));
}

#[test]
fn test_truncated_token_is_malformed() {
    let codec = ConfigCodec::default();
    let token = codec.encode(&sample_model()).token;
    let truncated = &token.as_str()[..token.len() / 2];

    assert!(matches!(
        codec.decode(truncated),
        Err(DecodeError::Malformed(_))
    ));
}

// ============================================================================
// Shortcuts and controller
// ============================================================================

#[test]
fn test_preset_undo_redo_scenario() {
    let mut studio = studio();
    let default = ConfigModel::default();

    studio.toggle_key(&KeyPosition::nth(1)).unwrap();
    studio.toggle_key(&KeyPosition::nth(2)).unwrap();

    let mut digit = ShortcutEvent::press(KeyCode::Char('1'), KeyModifiers::NONE);
    assert_eq!(
        studio.handle_key_event(&mut digit),
        Some(StudioCommand::ApplyPreset(1))
    );
    assert!(digit.is_default_prevented());
    let after_preset = studio.config().clone();

    let mut undo = ShortcutEvent::press(KeyCode::Char('z'), KeyModifiers::CONTROL);
    studio.handle_key_event(&mut undo);
    assert!(studio.config().same_design(&default));

    let mut redo = ShortcutEvent::press(
        KeyCode::Char('Z'),
        KeyModifiers::CONTROL | KeyModifiers::SHIFT,
    );
    studio.handle_key_event(&mut redo);
    assert!(studio.config().same_design(&after_preset));
}

#[test]
fn test_undo_suppressed_in_text_input() {
    let mut studio = studio();
    studio
        .set_key_color(&KeyPosition::nth(1), RgbColor::new(1, 2, 3))
        .unwrap();
    let before = studio.config().clone();

    let mut event = ShortcutEvent::press(KeyCode::Char('z'), KeyModifiers::CONTROL)
        .on(FocusTarget::TextInput);
    assert_eq!(studio.handle_key_event(&mut event), None);
    assert!(!event.is_default_prevented());
    assert_eq!(studio.config(), &before);
}

#[test]
fn test_digit_three_with_two_presets() {
    let mut config = Config::default();
    config.studio.presets.truncate(2);
    let mut studio = StudioController::new(&config).unwrap();
    studio.select_all();
    let before = studio.config().clone();

    let mut event = ShortcutEvent::press(KeyCode::Char('3'), KeyModifiers::NONE);
    assert_eq!(studio.handle_key_event(&mut event), None);
    assert!(!event.is_default_prevented());
    assert_eq!(studio.config(), &before);
    assert!(!studio.can_undo());
}

#[test]
fn test_surface_routes_events_until_guard_dropped() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let studio = Rc::new(RefCell::new(studio()));
    studio
        .borrow_mut()
        .set_key_color(&KeyPosition::nth(4), RgbColor::new(9, 9, 9))
        .unwrap();

    let surface = KeySurface::new();
    let guard = {
        let studio = Rc::clone(&studio);
        surface.listen(move |event| {
            studio.borrow_mut().handle_key_event(event);
        })
    };

    let mut undo = ShortcutEvent::press(KeyCode::Char('z'), KeyModifiers::CONTROL);
    assert!(surface.emit(&mut undo));
    assert!(studio.borrow().config().per_key_overrides.is_empty());

    drop(guard);
    let mut redo = ShortcutEvent::press(
        KeyCode::Char('z'),
        KeyModifiers::CONTROL | KeyModifiers::SHIFT,
    );
    assert!(!surface.emit(&mut redo));
    assert!(studio.borrow().config().per_key_overrides.is_empty());
}

#[test]
fn test_share_and_reload_through_link() {
    let mut studio = studio();
    studio.set_base_option("keycaps", "sa").unwrap();
    for n in 1..=8 {
        studio.toggle_key(&KeyPosition::nth(n)).unwrap();
    }
    assert!(studio.execute(StudioCommand::ApplyPreset(5)));

    let mut clipboard = MemoryClipboard::new();
    let outcome = studio.share_to_clipboard(&mut clipboard);
    let link = clipboard.contents().expect("link copied").to_string();
    assert_eq!(link, outcome.link);
    assert!(!outcome.overrides_excluded);

    let mut reopened = StudioController::new(&Config::default()).unwrap();
    reopened.load_url(&link).unwrap();
    assert!(reopened.config().same_design(studio.config()));
}

#[test]
fn test_bad_link_falls_back_with_warning() {
    let mut studio = studio();
    let result = studio.load_url("https://keystudio.app/studio?c=v1.%21%21%21");

    assert!(matches!(result, Err(DecodeError::Malformed(_))));
    assert_eq!(studio.config(), &ConfigModel::default());
    let notices = studio.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
}

#[test]
fn test_build_link_carries_token() {
    let studio = studio();
    let request = studio.build_this();
    assert_eq!(
        ShareLinks::token_from_url(&request.link).as_deref(),
        Some(request.token.as_str())
    );
    assert!(ConfigCodec::default().decode(request.token.as_str()).is_ok());
}
