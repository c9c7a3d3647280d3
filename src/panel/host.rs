//! Seams between the panel and the application embedding it.
//!
//! [`HostEditor`] is the block editor (blocks, selection, viewport) and
//! [`UiRuntime`] the widget layer (elements, focus, listener registration).
//! The panel only talks to the outside world through these two traits.

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{BlockDescriptor, Point};

/// Handle returned by [`UiRuntime::listen`], passed back to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerKey(pub u64);

/// Event kinds the panel subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UiEvent {
    /// Key presses on the input field.
    Key,
    /// Clicks on the previous/next buttons.
    Action,
    /// The input field's text changed.
    Update,
}

/// A block the host is asked to create after a suggestion is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockRequest {
    /// An indexed label: create its canonical type with the given defaults.
    Template {
        canonical_type: String,
        dropdown: IndexMap<String, String>,
        mutator: IndexMap<String, String>,
    },
    /// A number block holding the typed value.
    Number { value: String },
    /// A text block holding the typed text without its quotes.
    Text { value: String },
}

impl BlockRequest {
    pub fn canonical_type(&self) -> &str {
        match self {
            BlockRequest::Template { canonical_type, .. } => canonical_type,
            BlockRequest::Number { .. } => "math_number",
            BlockRequest::Text { .. } => "text",
        }
    }
}

/// The block editor hosting the panel.
pub trait HostEditor {
    /// All blocks currently in the workspace.
    fn blocks(&self) -> &[BlockDescriptor];

    /// The currently selected block, if any.
    fn selected_block(&self) -> Option<&BlockDescriptor>;

    /// Remove a block from the workspace.
    fn dispose_block(&mut self, id: &str);

    fn create_block(&mut self, request: &BlockRequest, at: Point);

    /// Scroll the viewport so `position` is in view.
    fn scroll_to(&mut self, position: Point);

    /// Where the user last clicked on the workspace.
    fn latest_click(&self) -> Point;

    /// Close transient editor UI (menus, tooltips) before a destructive action.
    fn hide_chaff(&mut self) {}
}

/// The widget layer the panel's elements live in.
pub trait UiRuntime {
    fn set_visible(&mut self, element: &str, visible: bool);

    fn is_visible(&self, element: &str) -> bool;

    fn set_position(&mut self, element: &str, at: Point);

    fn set_text(&mut self, element: &str, text: &str);

    fn text(&self, element: &str) -> String;

    fn focus(&mut self, element: &str);

    fn listen(&mut self, element: &str, event: UiEvent) -> ListenerKey;

    fn unlisten(&mut self, key: ListenerKey);
}

impl<T: UiRuntime + ?Sized> UiRuntime for &mut T {
    fn set_visible(&mut self, element: &str, visible: bool) {
        (**self).set_visible(element, visible)
    }

    fn is_visible(&self, element: &str) -> bool {
        (**self).is_visible(element)
    }

    fn set_position(&mut self, element: &str, at: Point) {
        (**self).set_position(element, at)
    }

    fn set_text(&mut self, element: &str, text: &str) {
        (**self).set_text(element, text)
    }

    fn text(&self, element: &str) -> String {
        (**self).text(element)
    }

    fn focus(&mut self, element: &str) {
        (**self).focus(element)
    }

    fn listen(&mut self, element: &str, event: UiEvent) -> ListenerKey {
        (**self).listen(element, event)
    }

    fn unlisten(&mut self, key: ListenerKey) {
        (**self).unlisten(key)
    }
}
