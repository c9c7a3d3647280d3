//! In-memory host and UI, used by the CLI and by tests.
//!
//! Both record what the panel asked of them so callers can inspect it.

use indexmap::IndexMap;

use crate::model::{BlockDescriptor, Point, Workspace};

use super::host::{BlockRequest, HostEditor, ListenerKey, UiEvent, UiRuntime};

/// State of one element in [`HeadlessUi`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    pub visible: bool,
    pub text: String,
    pub position: Option<Point>,
}

/// A widget layer that keeps element state in memory.
#[derive(Debug, Clone, Default)]
pub struct HeadlessUi {
    elements: IndexMap<String, ElementState>,
    focused: Option<String>,
    listeners: IndexMap<ListenerKey, (String, UiEvent)>,
    next_key: u64,
}

impl HeadlessUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(&self, id: &str) -> Option<&ElementState> {
        self.elements.get(id)
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Registrations currently live, as `(element, event)` pairs.
    pub fn live_listeners(&self) -> Vec<(&str, UiEvent)> {
        self.listeners
            .values()
            .map(|(el, ev)| (el.as_str(), *ev))
            .collect()
    }

    fn entry(&mut self, id: &str) -> &mut ElementState {
        self.elements.entry(id.to_string()).or_default()
    }
}

impl UiRuntime for HeadlessUi {
    fn set_visible(&mut self, element: &str, visible: bool) {
        self.entry(element).visible = visible;
    }

    fn is_visible(&self, element: &str) -> bool {
        self.elements.get(element).is_some_and(|e| e.visible)
    }

    fn set_position(&mut self, element: &str, at: Point) {
        self.entry(element).position = Some(at);
    }

    fn set_text(&mut self, element: &str, text: &str) {
        self.entry(element).text = text.to_string();
    }

    fn text(&self, element: &str) -> String {
        self.elements
            .get(element)
            .map(|e| e.text.clone())
            .unwrap_or_default()
    }

    fn focus(&mut self, element: &str) {
        self.focused = Some(element.to_string());
    }

    fn listen(&mut self, element: &str, event: UiEvent) -> ListenerKey {
        self.next_key += 1;
        let key = ListenerKey(self.next_key);
        self.listeners.insert(key, (element.to_string(), event));
        key
    }

    fn unlisten(&mut self, key: ListenerKey) {
        self.listeners.shift_remove(&key);
    }
}

/// A host editor over an in-memory [`Workspace`].
#[derive(Debug, Clone, Default)]
pub struct WorkspaceHost {
    pub workspace: Workspace,
    /// Id of the selected block.
    pub selected: Option<String>,
    pub latest_click: Point,
    /// Every scroll target, oldest first.
    pub scrolled: Vec<Point>,
    /// Every block creation request with its position.
    pub created: Vec<(BlockRequest, Point)>,
    pub chaff_hidden: usize,
}

impl WorkspaceHost {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace,
            ..Default::default()
        }
    }

    pub fn select(&mut self, id: &str) {
        self.selected = Some(id.to_string());
    }

    pub fn last_scroll(&self) -> Option<Point> {
        self.scrolled.last().copied()
    }
}

impl HostEditor for WorkspaceHost {
    fn blocks(&self) -> &[BlockDescriptor] {
        &self.workspace.blocks
    }

    fn selected_block(&self) -> Option<&BlockDescriptor> {
        self.selected.as_deref().and_then(|id| self.workspace.find(id))
    }

    fn dispose_block(&mut self, id: &str) {
        self.workspace.blocks.retain(|b| b.id != id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
    }

    fn create_block(&mut self, request: &BlockRequest, at: Point) {
        self.created.push((request.clone(), at));
    }

    fn scroll_to(&mut self, position: Point) {
        self.scrolled.push(position);
    }

    fn latest_click(&self) -> Point {
        self.latest_click
    }

    fn hide_chaff(&mut self) {
        self.chaff_hidden += 1;
    }
}
