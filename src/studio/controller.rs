//! Studio session controller.
//!
//! Owns the undo history and the live model, turns shortcut commands into
//! model edits and runs the share, build and load actions. User-facing
//! problems never abort the session; they are queued as [`Notice`]s.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;

use super::codec::{ConfigCodec, DecodeError, ShareToken};
use super::history::HistoryStack;
use super::links::ShareLinks;
use super::shortcuts::{ShortcutDispatcher, ShortcutEvent, StudioCommand};
use crate::config::{ColorPreset, Config};
use crate::models::{
    BaseField, ConfigModel, KeyOverride, KeyPosition, LegendStyle, RgbColor,
};
use crate::services::ClipboardSink;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Confirmation
    Info,
    /// Something was degraded or replaced
    Warning,
    /// An action failed
    Error,
}

/// Non-fatal message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Human-readable text
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Result of the share action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOutcome {
    /// Encoded configuration
    pub token: ShareToken,
    /// Studio link carrying the token
    pub link: String,
    /// True if per-key overrides did not fit into the token
    pub overrides_excluded: bool,
}

/// Hand-off to the custom build flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Encoded configuration
    pub token: ShareToken,
    /// Builder link carrying the token
    pub link: String,
}

const EXCLUDED_WARNING: &str = "Per-key colors and legends were left out of the link because \
    it would be too long. The link keeps your base configuration.";

/// One Studio editing session.
///
/// History entries never carry a selection. The live selection sits on the
/// active model and survives undo and redo as long as its keys exist.
#[derive(Debug)]
pub struct StudioController {
    history: HistoryStack<ConfigModel>,
    active: ConfigModel,
    codec: ConfigCodec,
    dispatcher: ShortcutDispatcher,
    presets: Vec<ColorPreset>,
    links: ShareLinks,
    notices: Vec<Notice>,
}

impl StudioController {
    /// Creates a session on the default model using the given settings.
    pub fn new(config: &Config) -> Result<Self> {
        let links = ShareLinks::new(&config.share.origin)?;
        let initial = ConfigModel::default();

        Ok(Self {
            history: HistoryStack::new(initial.clone(), config.studio.history_limit),
            active: initial,
            codec: ConfigCodec::new(config.share.max_token_len),
            dispatcher: ShortcutDispatcher::new(config.studio.presets.len()),
            presets: config.studio.presets.clone(),
            links,
            notices: Vec::new(),
        })
    }

    /// Replaces the shortcut dispatcher (e.g. to force a primary modifier).
    #[must_use]
    pub fn with_dispatcher(mut self, mut dispatcher: ShortcutDispatcher) -> Self {
        dispatcher.set_preset_count(self.presets.len());
        self.dispatcher = dispatcher;
        self
    }

    /// The live model, including the selection.
    #[must_use]
    pub const fn config(&self) -> &ConfigModel {
        &self.active
    }

    /// Undo history of the session.
    #[must_use]
    pub const fn history(&self) -> &HistoryStack<ConfigModel> {
        &self.history
    }

    /// Currently selected keys.
    #[must_use]
    pub const fn selection(&self) -> &BTreeSet<KeyPosition> {
        &self.active.selection
    }

    /// Configured color presets in digit order.
    #[must_use]
    pub fn presets(&self) -> &[ColorPreset] {
        &self.presets
    }

    /// Replaces the color presets and the digits that reach them.
    pub fn set_presets(&mut self, presets: Vec<ColorPreset>) {
        self.dispatcher.set_preset_count(presets.len());
        self.presets = presets;
    }

    /// Shortcut dispatcher of the session.
    #[must_use]
    pub const fn dispatcher(&self) -> &ShortcutDispatcher {
        &self.dispatcher
    }

    /// Suspends or resumes keyboard shortcuts.
    pub fn set_shortcuts_enabled(&mut self, enabled: bool) {
        self.dispatcher.set_enabled(enabled);
    }

    /// True if an undo step is available.
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// True if a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // === EDITS ===

    /// Sets the color override of one key, keeping its legend override.
    pub fn set_key_color(&mut self, position: &KeyPosition, color: RgbColor) -> Result<bool> {
        self.ensure_on_layout(position)?;
        let mut next = self.active.clone();
        next.per_key_overrides
            .entry(position.clone())
            .or_default()
            .color = Some(color);
        Ok(self.commit(next))
    }

    /// Sets the legend override of one key, keeping its color override.
    pub fn set_key_legend(&mut self, position: &KeyPosition, legend: LegendStyle) -> Result<bool> {
        self.ensure_on_layout(position)?;
        let mut next = self.active.clone();
        next.per_key_overrides
            .entry(position.clone())
            .or_default()
            .legend = Some(legend);
        Ok(self.commit(next))
    }

    /// Replaces the override of one key. An empty override clears it.
    pub fn set_key_override(
        &mut self,
        position: &KeyPosition,
        key_override: KeyOverride,
    ) -> Result<bool> {
        if key_override.is_empty() {
            return self.clear_key_override(position);
        }
        self.ensure_on_layout(position)?;
        let mut next = self.active.clone();
        next.per_key_overrides.insert(position.clone(), key_override);
        Ok(self.commit(next))
    }

    /// Removes the override of one key so it follows the base again.
    pub fn clear_key_override(&mut self, position: &KeyPosition) -> Result<bool> {
        self.ensure_on_layout(position)?;
        let mut next = self.active.clone();
        next.per_key_overrides.remove(position);
        Ok(self.commit(next))
    }

    /// Sets one base field by field id and option id.
    ///
    /// Switching the layout drops overrides and selected keys the new layout
    /// lacks and starts a fresh history.
    pub fn set_base_option(&mut self, field_id: &str, option_id: &str) -> Result<bool> {
        let field = BaseField::from_id(field_id)
            .with_context(|| format!("Unknown configuration field '{field_id}'"))?;

        let mut next = self.active.clone();
        next.base.set(field, option_id)?;
        if next.base == self.active.base {
            return Ok(false);
        }

        if field == BaseField::Layout {
            let removed = next.retain_layout();
            tracing::info!(
                "Layout changed to {}, dropped {removed} override(s)",
                next.layout()
            );
            if removed > 0 {
                self.notices.push(Notice::new(
                    NoticeLevel::Info,
                    format!(
                        "Removed {removed} key customization(s) that do not exist on the {} layout",
                        next.layout().display_name()
                    ),
                ));
            }
            self.history.reset(next.without_selection());
            self.active = next;
            return Ok(true);
        }

        Ok(self.commit(next))
    }

    // === SELECTION ===

    /// Makes `position` the only selected key.
    pub fn select_key(&mut self, position: &KeyPosition) -> Result<()> {
        self.ensure_on_layout(position)?;
        self.active.selection = BTreeSet::from([position.clone()]);
        Ok(())
    }

    /// Adds or removes one key from the selection.
    pub fn toggle_key(&mut self, position: &KeyPosition) -> Result<()> {
        self.ensure_on_layout(position)?;
        if !self.active.selection.remove(position) {
            self.active.selection.insert(position.clone());
        }
        Ok(())
    }

    /// Selects every key of the layout.
    pub fn select_all(&mut self) {
        self.active.selection = self.active.layout().positions().into_iter().collect();
    }

    /// Clears the selection. Returns false if nothing was selected.
    pub fn clear_selection(&mut self) -> bool {
        let had_selection = !self.active.selection.is_empty();
        self.active.selection.clear();
        had_selection
    }

    // === COMMANDS ===

    /// Dispatches a key event and runs the resulting command.
    ///
    /// Returns the command the event mapped to, whether or not it changed
    /// anything.
    pub fn handle_key_event(&mut self, event: &mut ShortcutEvent) -> Option<StudioCommand> {
        let command = self.dispatcher.dispatch(event)?;
        self.execute(command);
        Some(command)
    }

    /// Runs a command. Returns true if the live model changed.
    pub fn execute(&mut self, command: StudioCommand) -> bool {
        tracing::debug!("Executing {}", command.id());
        match command {
            StudioCommand::Undo => {
                if self.history.undo().is_none() {
                    return false;
                }
                self.restore_from_history();
                true
            }
            StudioCommand::Redo => {
                if self.history.redo().is_none() {
                    return false;
                }
                self.restore_from_history();
                true
            }
            StudioCommand::SelectAll => {
                let before = self.active.selection.len();
                self.select_all();
                self.active.selection.len() != before
            }
            StudioCommand::ClearSelection => self.clear_selection(),
            StudioCommand::ResetSelection => {
                if self.active.selection.is_empty() {
                    return false;
                }
                let mut next = self.active.clone();
                for position in &self.active.selection {
                    next.per_key_overrides.remove(position);
                }
                self.commit(next)
            }
            StudioCommand::ApplyPreset(number) => self.apply_preset(number),
        }
    }

    fn apply_preset(&mut self, number: u8) -> bool {
        let Some(preset) = usize::from(number)
            .checked_sub(1)
            .and_then(|index| self.presets.get(index))
        else {
            return false;
        };
        if self.active.selection.is_empty() {
            return false;
        }

        let color = preset.color;
        let mut next = self.active.clone();
        for position in &self.active.selection {
            next.per_key_overrides
                .entry(position.clone())
                .or_default()
                .color = Some(color);
        }
        self.commit(next)
    }

    // === SHARE / BUILD / LOAD ===

    /// Encodes the current design into a share link.
    pub fn share(&mut self) -> ShareOutcome {
        let encoded = self.codec.encode(&self.active);
        let link = self.links.studio_link(&encoded.token);
        tracing::info!(
            "Created share link ({} characters, overrides excluded: {})",
            encoded.token.len(),
            encoded.overrides_excluded
        );

        self.notices
            .push(Notice::new(NoticeLevel::Info, "Share link created"));
        if encoded.overrides_excluded {
            self.notices
                .push(Notice::new(NoticeLevel::Warning, EXCLUDED_WARNING));
        }

        ShareOutcome {
            token: encoded.token,
            link,
            overrides_excluded: encoded.overrides_excluded,
        }
    }

    /// Shares and copies the link. A clipboard failure only adds a notice.
    pub fn share_to_clipboard(&mut self, clipboard: &mut dyn ClipboardSink) -> ShareOutcome {
        let outcome = self.share();
        match clipboard.set_text(&outcome.link) {
            Ok(()) => self
                .notices
                .push(Notice::new(NoticeLevel::Info, "Link copied to clipboard")),
            Err(e) => {
                tracing::warn!("Clipboard write failed: {e:#}");
                self.notices.push(Notice::new(
                    NoticeLevel::Error,
                    format!("Could not copy the link: {e:#}"),
                ));
            }
        }
        outcome
    }

    /// Prepares the hand-off of the current design to the build flow.
    ///
    /// The build token ignores the share budget and always carries every
    /// per-key override.
    #[must_use]
    pub fn build_this(&self) -> BuildRequest {
        let encoded = ConfigCodec::unbounded().encode(&self.active);
        let link = self.links.builder_link(&encoded.token);
        BuildRequest {
            token: encoded.token,
            link,
        }
    }

    /// Starts over from a share token.
    ///
    /// A missing or blank token loads the default model. A token that fails
    /// to decode also loads the default model, queues a warning and returns
    /// the decode error.
    pub fn load_token(&mut self, token: Option<&str>) -> Result<(), DecodeError> {
        let Some(token) = token.map(str::trim).filter(|token| !token.is_empty()) else {
            self.reset_to(ConfigModel::default());
            return Ok(());
        };

        match self.codec.decode(token) {
            Ok(model) => {
                tracing::info!("Loaded shared configuration ({})", model.layout());
                self.reset_to(model);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Falling back to default configuration: {e}");
                self.reset_to(ConfigModel::default());
                self.notices.push(Notice::new(
                    NoticeLevel::Warning,
                    format!("The shared configuration could not be loaded ({e}). Showing the default configuration."),
                ));
                Err(e)
            }
        }
    }

    /// Starts over from a studio or builder link.
    pub fn load_url(&mut self, url: &str) -> Result<(), DecodeError> {
        let token = ShareLinks::token_from_url(url);
        self.load_token(token.as_deref())
    }

    /// Drains queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // === INTERNALS ===

    fn ensure_on_layout(&self, position: &KeyPosition) -> Result<()> {
        let layout = self.active.layout();
        if !layout.contains(position) {
            anyhow::bail!("Key '{position}' does not exist on layout '{layout}'");
        }
        Ok(())
    }

    /// Pushes `next` unless it describes the same design. Returns true on push.
    fn commit(&mut self, next: ConfigModel) -> bool {
        if next.same_design(&self.active) {
            return false;
        }
        self.history.push(next.without_selection());
        self.active = next;
        true
    }

    fn restore_from_history(&mut self) {
        let selection = std::mem::take(&mut self.active.selection);
        self.active = self.history.current().clone();
        self.active.selection = selection;
        self.active.retain_layout();
    }

    fn reset_to(&mut self, model: ConfigModel) {
        let model = model.without_selection();
        self.history.reset(model.clone());
        self.active = model;
    }
}
