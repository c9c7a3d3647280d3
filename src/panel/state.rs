//! The panel controller: Hidden/Visible state machine tying the option
//! index, the matcher and the navigator to a host editor.
//!
//! Data flows one way: workspace blocks → [`OptionIndex`] → [`Matcher`]
//! suggestions, and workspace blocks → exact-label match set →
//! [`MatchNavigator`] → viewport scroll target.

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::builtin_templates;
use crate::config::{ElementIds, PanelConfig};
use crate::error::Result;
use crate::index::{BlockDiagnostic, OptionIndex, exact_matches};
use crate::matcher::{LiteralToken, Matcher, classify_literal};
use crate::model::Point;
use crate::navigator::MatchNavigator;

use super::host::{BlockRequest, HostEditor, ListenerKey, UiEvent, UiRuntime};
use super::keys::{Key, KeyEvent, KeyOutcome, KeyTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PanelState {
    Hidden,
    Visible,
}

// ────────────────────────────────────────────────────────────────────────────
// Listener scope
// ────────────────────────────────────────────────────────────────────────────

/// Listener registrations owned by one Visible period.
///
/// Acquired on entering Visible and released on every way out of it,
/// including dropping the controller.
#[derive(Debug)]
struct ListenerScope {
    keys: Vec<ListenerKey>,
}

impl ListenerScope {
    fn acquire<U: UiRuntime>(ui: &mut U, ids: &ElementIds) -> Self {
        let keys = vec![
            ui.listen(&ids.input_text, UiEvent::Key),
            ui.listen(&ids.input_text, UiEvent::Update),
            ui.listen(&ids.previous, UiEvent::Action),
            ui.listen(&ids.next, UiEvent::Action),
        ];
        Self { keys }
    }

    fn release<U: UiRuntime>(self, ui: &mut U) {
        for key in self.keys {
            ui.unlisten(key);
        }
    }
}

/// Result of processing a change of the input text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputUpdate {
    /// Suggestions for the input field, best first.
    pub suggestions: Vec<String>,
    /// Number of workspace blocks whose label equals the input exactly.
    pub match_count: usize,
    /// Where the viewport was scrolled, if anywhere.
    pub focus: Option<Point>,
}

// ────────────────────────────────────────────────────────────────────────────
// PanelController
// ────────────────────────────────────────────────────────────────────────────

/// One type-blocking panel bound to a set of host elements.
///
/// # Example
///
/// ```rust,ignore
/// let mut panel = PanelController::new(PanelConfig::default(), ui)?;
/// panel.show(&host)?;
/// panel.ui_mut().set_text("ac_view_input_text", "when Button1.Click");
/// let update = panel.on_input_changed(&mut host)?;
/// panel.next(&mut host);
/// ```
pub struct PanelController<U: UiRuntime> {
    config: PanelConfig,
    ui: U,
    state: PanelState,
    index: OptionIndex,
    diagnostics: Vec<BlockDiagnostic>,
    matcher: Matcher,
    navigator: MatchNavigator,
    suggestions: Vec<String>,
    /// Set when the host's components changed since the last rebuild.
    needs_reload: bool,
    listeners: Option<ListenerScope>,
}

impl<U: UiRuntime> PanelController<U> {
    pub fn new(config: PanelConfig, ui: U) -> Result<Self> {
        config.validate()?;
        let matcher = Matcher::new(Vec::new(), config.use_similar);
        Ok(Self {
            config,
            ui,
            state: PanelState::Hidden,
            index: OptionIndex::default(),
            diagnostics: Vec::new(),
            matcher,
            navigator: MatchNavigator::new(),
            suggestions: Vec::new(),
            needs_reload: true,
            listeners: None,
        })
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == PanelState::Visible
    }

    pub fn index(&self) -> &OptionIndex {
        &self.index
    }

    /// Blocks skipped by the last index rebuild.
    pub fn diagnostics(&self) -> &[BlockDiagnostic] {
        &self.diagnostics
    }

    pub fn navigator(&self) -> &MatchNavigator {
        &self.navigator
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn needs_reload(&self) -> bool {
        self.needs_reload
    }

    /// Flag the index as stale; the next `show` rebuilds it.
    pub fn mark_components_changed(&mut self) {
        self.needs_reload = true;
    }

    /// Open the panel at the host's last click position.
    ///
    /// Rebuilds the option index first if it is stale. If that rebuild fails
    /// the panel stays hidden and the index stays flagged as stale.
    pub fn show<H: HostEditor + ?Sized>(&mut self, host: &H) -> Result<()> {
        self.lazy_load(host)?;

        if let Some(scope) = self.listeners.take() {
            scope.release(&mut self.ui);
        }

        let ids = &self.config.elements;
        let at = host.latest_click();
        self.ui.set_position(&ids.view_block_div, at);
        self.ui.set_visible(&ids.view_block_div, true);
        self.ui.focus(&ids.input_text);
        // Clear the input before listening so the first keystroke is not lost.
        self.ui.set_text(&ids.input_text, &self.config.initial_text);
        self.ui.set_text(&ids.matches_text, "");
        self.listeners = Some(ListenerScope::acquire(&mut self.ui, ids));

        self.suggestions.clear();
        self.state = PanelState::Visible;
        debug!(x = at.x, y = at.y, "type-block panel shown");
        Ok(())
    }

    /// Close the panel and drop the match set.
    pub fn hide(&mut self) {
        if let Some(scope) = self.listeners.take() {
            scope.release(&mut self.ui);
        }
        let ids = &self.config.elements;
        self.ui.set_visible(&ids.view_block_div, false);
        if self.state == PanelState::Visible {
            self.ui.focus(&ids.frame);
        }
        self.navigator.clear();
        self.suggestions.clear();
        self.state = PanelState::Hidden;
        debug!("type-block panel hidden");
    }

    fn lazy_load<H: HostEditor + ?Sized>(&mut self, host: &H) -> Result<()> {
        if self.needs_reload {
            let build = OptionIndex::build(
                host.blocks(),
                builtin_templates(),
                self.config.on_invalid_block,
            )?;
            info!(
                labels = build.index.len(),
                skipped = build.diagnostics.len(),
                "loaded type-block options"
            );
            self.index = build.index;
            self.diagnostics = build.diagnostics;
            self.needs_reload = false;
        }
        self.matcher.set_rows(self.index.labels().to_vec());
        Ok(())
    }

    /// Recompute suggestions and the match set from the current input text.
    ///
    /// Scrolls to the match under the cursor. The cursor itself is not reset.
    /// If the match-set scan fails, the match set and the count text are left
    /// empty.
    pub fn on_input_changed<H: HostEditor + ?Sized>(&mut self, host: &mut H) -> Result<InputUpdate> {
        if !self.is_visible() {
            return Ok(InputUpdate::default());
        }
        let text = self.ui.text(&self.config.elements.input_text);
        self.navigator.set_matches(Vec::new());
        self.ui.set_text(&self.config.elements.matches_text, "");
        let matches = exact_matches(host.blocks(), &text, self.config.on_invalid_block)?;

        self.suggestions = self
            .matcher
            .request_matching_rows(&text, self.config.max_matches);
        self.navigator.set_matches(matches);

        let count = self.navigator.len();
        let matches_text = if count > 0 {
            format!("{} match(es) found.", count)
        } else {
            String::new()
        };
        self.ui.set_text(&self.config.elements.matches_text, &matches_text);

        let focus = self.navigator.current().map(|b| b.position);
        if let Some(position) = focus {
            host.scroll_to(position);
        }
        Ok(InputUpdate {
            suggestions: self.suggestions.clone(),
            match_count: count,
            focus,
        })
    }

    /// Focus the next exact match, wrapping around.
    pub fn next<H: HostEditor + ?Sized>(&mut self, host: &mut H) -> Option<Point> {
        if !self.is_visible() {
            return None;
        }
        let position = self.navigator.next()?.position;
        debug!(cursor = self.navigator.cursor(), "focus next match");
        host.scroll_to(position);
        Some(position)
    }

    /// Focus the previous exact match, wrapping around.
    pub fn previous<H: HostEditor + ?Sized>(&mut self, host: &mut H) -> Option<Point> {
        if !self.is_visible() {
            return None;
        }
        let position = self.navigator.previous()?.position;
        debug!(cursor = self.navigator.cursor(), "focus previous match");
        host.scroll_to(position);
        Some(position)
    }

    /// Map a suggestion to the block it would create.
    ///
    /// Literal tokens always carry their typed value, even when a block with
    /// the same label is already indexed.
    pub fn resolve(&self, label: &str) -> Option<BlockRequest> {
        match classify_literal(label) {
            Some(LiteralToken::Number) => Some(BlockRequest::Number {
                value: label.to_string(),
            }),
            Some(LiteralToken::Text) => Some(BlockRequest::Text {
                value: label.trim_matches(|c| c == '"' || c == '\'').to_string(),
            }),
            None => self.index.get(label).map(|entry| BlockRequest::Template {
                canonical_type: entry.canonical_type.clone(),
                dropdown: entry.dropdown.clone(),
                mutator: entry.mutator_attributes.clone(),
            }),
        }
    }

    /// Create the block for `label` at the last click position and hide.
    pub fn select<H: HostEditor + ?Sized>(&mut self, host: &mut H, label: &str) -> Option<BlockRequest> {
        let request = self.resolve(label)?;
        let at = host.latest_click();
        host.create_block(&request, at);
        info!(label, block_type = request.canonical_type(), "created block from panel");
        self.hide();
        Some(request)
    }

    /// Route a key press.
    ///
    /// Delete/Backspace only delete the selected block while the panel is
    /// hidden, so typing in the panel never removes a block.
    pub fn handle_key<H: HostEditor + ?Sized>(&mut self, host: &mut H, event: KeyEvent) -> KeyOutcome {
        if event.has_modifier() || event.key == Key::Tab {
            return KeyOutcome::Ignored;
        }
        match event.key {
            Key::Delete | Key::Backspace => {
                if self.is_visible() || event.target == KeyTarget::BlockField {
                    return KeyOutcome::PassThrough;
                }
                let deletable = host
                    .selected_block()
                    .filter(|b| b.deletable)
                    .map(|b| b.id.clone());
                match deletable {
                    Some(id) => {
                        host.hide_chaff();
                        host.dispose_block(&id);
                        KeyOutcome::Deleted
                    }
                    None => KeyOutcome::Consumed,
                }
            }
            Key::Escape => {
                self.hide();
                KeyOutcome::Hidden
            }
            _ if event.target == KeyTarget::BlockField || !self.is_visible() => KeyOutcome::Ignored,
            Key::Enter => match self.suggestions.first().cloned() {
                Some(label) => match self.select(host, &label) {
                    Some(request) => KeyOutcome::Selected(request),
                    None => KeyOutcome::Consumed,
                },
                None => KeyOutcome::Consumed,
            },
            _ => KeyOutcome::PassThrough,
        }
    }
}

impl<U: UiRuntime> Drop for PanelController<U> {
    fn drop(&mut self) {
        if let Some(scope) = self.listeners.take() {
            scope.release(&mut self.ui);
        }
    }
}
