//! Keyboard shortcut dispatch for the Studio.
//!
//! The dispatcher maps key combinations to [`StudioCommand`]s. It is armed
//! unless the event originates from a text-entry control or the dispatcher is
//! disabled; the focus state is read from each event, never tracked.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;

use crate::constants::MAX_COLOR_PRESETS;

/// Semantic commands produced by shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudioCommand {
    /// Step back in history
    Undo,
    /// Step forward in history
    Redo,
    /// Select every key position of the layout
    SelectAll,
    /// Clear the key selection
    ClearSelection,
    /// Remove overrides from every selected key
    ResetSelection,
    /// Apply the Nth (1-based) color preset to every selected key
    ApplyPreset(u8),
}

impl StudioCommand {
    /// Get the command ID string used in help text and logs.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::SelectAll => "select_all",
            Self::ClearSelection => "clear_selection",
            Self::ResetSelection => "reset_selection",
            Self::ApplyPreset(_) => "apply_preset",
        }
    }
}

/// Kind of element that had focus when the key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    /// The 3D keyboard canvas
    #[default]
    Canvas,
    /// A text input or text area
    TextInput,
    /// A select / dropdown control
    Select,
    /// Any other non-text element (buttons, panels)
    Other,
}

impl FocusTarget {
    /// True for controls that consume typed characters.
    #[must_use]
    pub const fn is_text_entry(&self) -> bool {
        matches!(self, Self::TextInput | Self::Select)
    }
}

/// A key press together with its origin and a prevent-default flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutEvent {
    /// The key and modifiers pressed
    pub key: KeyEvent,
    /// Focused element at dispatch time
    pub target: FocusTarget,
    default_prevented: bool,
}

impl ShortcutEvent {
    /// Creates an event for the given key and focus target.
    #[must_use]
    pub const fn new(key: KeyEvent, target: FocusTarget) -> Self {
        Self {
            key,
            target,
            default_prevented: false,
        }
    }

    /// Creates a key press event targeting the canvas.
    #[must_use]
    pub fn press(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self::new(KeyEvent::new(code, modifiers), FocusTarget::Canvas)
    }

    /// Returns the same event with a different focus target.
    #[must_use]
    pub fn on(mut self, target: FocusTarget) -> Self {
        self.target = target;
        self
    }

    /// Stops the host's default handling of this key.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// True once a handler claimed the event.
    #[must_use]
    pub const fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Returns the conventional primary modifier of the host OS.
///
/// Command on macOS, Control elsewhere.
#[must_use]
pub const fn host_primary_modifier() -> KeyModifiers {
    if cfg!(target_os = "macos") {
        KeyModifiers::SUPER
    } else {
        KeyModifiers::CONTROL
    }
}

/// A key binding (key + modifiers), normalized for lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// Key code; letters are stored lowercase
    pub code: KeyCode,
    /// Modifiers; an uppercase letter implies Shift
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a new key binding.
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        match code {
            KeyCode::Char(c) if c.is_ascii_uppercase() => Self {
                code: KeyCode::Char(c.to_ascii_lowercase()),
                modifiers: modifiers | KeyModifiers::SHIFT,
            },
            _ => Self { code, modifiers },
        }
    }

    /// Create a key binding from a KeyEvent.
    #[must_use]
    pub fn from_event(event: KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }
}

/// Maps key events to Studio commands.
///
/// Disabling the dispatcher (`set_enabled(false)`) suspends every shortcut
/// without detaching its listener.
#[derive(Debug, Clone)]
pub struct ShortcutDispatcher {
    bindings: HashMap<KeyBinding, StudioCommand>,
    preset_count: usize,
    enabled: bool,
}

impl ShortcutDispatcher {
    /// Creates a dispatcher bound to the host primary modifier.
    #[must_use]
    pub fn new(preset_count: usize) -> Self {
        Self::with_primary_modifier(host_primary_modifier(), preset_count)
    }

    /// Creates a dispatcher with an explicit primary modifier.
    #[must_use]
    pub fn with_primary_modifier(primary: KeyModifiers, preset_count: usize) -> Self {
        let mut dispatcher = Self {
            bindings: HashMap::new(),
            preset_count: preset_count.min(MAX_COLOR_PRESETS),
            enabled: true,
        };
        dispatcher.register_studio_shortcuts(primary);
        dispatcher
    }

    fn register_studio_shortcuts(&mut self, primary: KeyModifiers) {
        use KeyCode as K;
        use KeyModifiers as M;

        // === HISTORY ===
        self.register(K::Char('z'), primary, StudioCommand::Undo);
        self.register(K::Char('z'), primary | M::SHIFT, StudioCommand::Redo);

        // === SELECTION ===
        self.register(K::Char('a'), primary, StudioCommand::SelectAll);
        self.register(K::Esc, M::NONE, StudioCommand::ClearSelection);
        self.register(K::Delete, M::NONE, StudioCommand::ResetSelection);
        self.register(K::Backspace, M::NONE, StudioCommand::ResetSelection);

        // === COLOR PRESETS ===
        for (digit, number) in ('1'..='9').zip(1u8..) {
            self.register(K::Char(digit), M::NONE, StudioCommand::ApplyPreset(number));
        }
    }

    fn register(&mut self, code: KeyCode, modifiers: KeyModifiers, command: StudioCommand) {
        self.bindings.insert(KeyBinding::new(code, modifiers), command);
    }

    /// Looks up the command bound to a key, ignoring focus, enablement and preset count.
    #[must_use]
    pub fn lookup(&self, event: KeyEvent) -> Option<StudioCommand> {
        self.bindings.get(&KeyBinding::from_event(event)).copied()
    }

    /// Resolves an event to a command.
    ///
    /// Returns `None` and leaves the event untouched when the dispatcher is
    /// disabled, a text-entry control has focus, the key is unbound, or the
    /// key selects a preset beyond the configured count. A matched event has
    /// its default prevented.
    pub fn dispatch(&self, event: &mut ShortcutEvent) -> Option<StudioCommand> {
        if !self.enabled || event.target.is_text_entry() {
            return None;
        }
        if event.key.kind == KeyEventKind::Release {
            return None;
        }

        let command = self.lookup(event.key)?;
        if let StudioCommand::ApplyPreset(number) = command {
            if usize::from(number) > self.preset_count {
                return None;
            }
        }

        event.prevent_default();
        Some(command)
    }

    /// Enables or suspends all shortcuts.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// True if shortcuts are currently active.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Updates the number of presets reachable through digit keys.
    pub fn set_preset_count(&mut self, preset_count: usize) {
        self.preset_count = preset_count.min(MAX_COLOR_PRESETS);
    }

    /// Number of presets reachable through digit keys.
    #[must_use]
    pub const fn preset_count(&self) -> usize {
        self.preset_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn dispatcher() -> ShortcutDispatcher {
        ShortcutDispatcher::with_primary_modifier(KeyModifiers::CONTROL, 3)
    }

    #[test]
    fn test_history_shortcuts() {
        let dispatcher = dispatcher();

        let mut event = ShortcutEvent::press(KeyCode::Char('z'), KeyModifiers::CONTROL);
        assert_eq!(dispatcher.dispatch(&mut event), Some(StudioCommand::Undo));
        assert!(event.is_default_prevented());

        let mut event = ShortcutEvent::press(
            KeyCode::Char('z'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );
        assert_eq!(dispatcher.dispatch(&mut event), Some(StudioCommand::Redo));
    }

    #[test]
    fn test_uppercase_letter_implies_shift() {
        let dispatcher = dispatcher();

        // Terminals report Shift+Z as an uppercase char, with or without the flag
        let mut event = ShortcutEvent::press(
            KeyCode::Char('Z'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );
        assert_eq!(dispatcher.dispatch(&mut event), Some(StudioCommand::Redo));

        let mut event = ShortcutEvent::press(KeyCode::Char('Z'), KeyModifiers::CONTROL);
        assert_eq!(dispatcher.dispatch(&mut event), Some(StudioCommand::Redo));
    }

    #[test]
    fn test_selection_shortcuts() {
        let dispatcher = dispatcher();

        let cases = [
            (KeyCode::Char('a'), KeyModifiers::CONTROL, StudioCommand::SelectAll),
            (KeyCode::Esc, KeyModifiers::NONE, StudioCommand::ClearSelection),
            (KeyCode::Delete, KeyModifiers::NONE, StudioCommand::ResetSelection),
            (KeyCode::Backspace, KeyModifiers::NONE, StudioCommand::ResetSelection),
        ];
        for (code, modifiers, expected) in cases {
            let mut event = ShortcutEvent::press(code, modifiers);
            assert_eq!(dispatcher.dispatch(&mut event), Some(expected), "{code:?}");
        }
    }

    #[test]
    fn test_suppressed_while_text_input_focused() {
        let dispatcher = dispatcher();

        let mut event = ShortcutEvent::press(KeyCode::Char('z'), KeyModifiers::CONTROL)
            .on(FocusTarget::TextInput);
        assert_eq!(dispatcher.dispatch(&mut event), None);
        assert!(!event.is_default_prevented());

        let mut event =
            ShortcutEvent::press(KeyCode::Backspace, KeyModifiers::NONE).on(FocusTarget::Select);
        assert_eq!(dispatcher.dispatch(&mut event), None);

        let mut event = ShortcutEvent::press(KeyCode::Char('z'), KeyModifiers::CONTROL)
            .on(FocusTarget::Other);
        assert_eq!(dispatcher.dispatch(&mut event), Some(StudioCommand::Undo));
    }

    #[test]
    fn test_disabled_dispatcher_ignores_everything() {
        let mut dispatcher = dispatcher();
        dispatcher.set_enabled(false);

        let mut event = ShortcutEvent::press(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(dispatcher.dispatch(&mut event), None);
        assert!(!event.is_default_prevented());

        dispatcher.set_enabled(true);
        assert_eq!(
            dispatcher.dispatch(&mut event),
            Some(StudioCommand::ClearSelection)
        );
    }

    #[test]
    fn test_preset_digits_respect_preset_count() {
        let dispatcher = ShortcutDispatcher::with_primary_modifier(KeyModifiers::CONTROL, 2);

        let mut event = ShortcutEvent::press(KeyCode::Char('2'), KeyModifiers::NONE);
        assert_eq!(
            dispatcher.dispatch(&mut event),
            Some(StudioCommand::ApplyPreset(2))
        );

        let mut event = ShortcutEvent::press(KeyCode::Char('3'), KeyModifiers::NONE);
        assert_eq!(dispatcher.dispatch(&mut event), None);
        assert!(!event.is_default_prevented());
    }

    #[test]
    fn test_digits_with_modifier_are_unbound() {
        let dispatcher = dispatcher();
        let mut event = ShortcutEvent::press(KeyCode::Char('1'), KeyModifiers::CONTROL);
        assert_eq!(dispatcher.dispatch(&mut event), None);

        let mut event = ShortcutEvent::press(KeyCode::Char('0'), KeyModifiers::NONE);
        assert_eq!(dispatcher.dispatch(&mut event), None);
    }

    #[test]
    fn test_unmatched_passes_through() {
        let dispatcher = dispatcher();
        let mut event = ShortcutEvent::press(KeyCode::Char('f'), KeyModifiers::CONTROL);
        assert_eq!(dispatcher.dispatch(&mut event), None);
        assert!(!event.is_default_prevented());

        // Plain 'z' without the primary modifier is just typing
        let mut event = ShortcutEvent::press(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(dispatcher.dispatch(&mut event), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let dispatcher = dispatcher();
        let key = KeyEvent {
            code: KeyCode::Char('z'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        let mut event = ShortcutEvent::new(key, FocusTarget::Canvas);
        assert_eq!(dispatcher.dispatch(&mut event), None);
    }

    #[test]
    fn test_mac_primary_modifier() {
        let dispatcher = ShortcutDispatcher::with_primary_modifier(KeyModifiers::SUPER, 0);
        let mut event = ShortcutEvent::press(KeyCode::Char('z'), KeyModifiers::SUPER);
        assert_eq!(dispatcher.dispatch(&mut event), Some(StudioCommand::Undo));

        let mut event = ShortcutEvent::press(KeyCode::Char('z'), KeyModifiers::CONTROL);
        assert_eq!(dispatcher.dispatch(&mut event), None);
    }

    #[test]
    fn test_preset_count_is_capped() {
        let dispatcher = ShortcutDispatcher::with_primary_modifier(KeyModifiers::CONTROL, 40);
        assert_eq!(dispatcher.preset_count(), MAX_COLOR_PRESETS);
    }
}
