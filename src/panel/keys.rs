//! Key events as the panel sees them.

use super::host::BlockRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Other,
}

/// Where the key press landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget {
    /// The panel's own text input.
    PanelInput,
    /// The workspace canvas.
    Workspace,
    /// An editable field inside a block.
    BlockField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub target: KeyTarget,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyEvent {
    pub fn new(key: Key, target: KeyTarget) -> Self {
        Self {
            key,
            target,
            alt: false,
            ctrl: false,
            meta: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn has_modifier(&self) -> bool {
        self.alt || self.ctrl || self.meta
    }
}

/// What the panel did with a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not handled; the host treats it normally.
    Ignored,
    /// Let the focused widget (panel input or block field) process the key.
    PassThrough,
    /// Handled here; the host must not apply its default action.
    Consumed,
    /// The selected block was deleted.
    Deleted,
    /// The panel was dismissed.
    Hidden,
    /// A suggestion was chosen and the block requested.
    Selected(BlockRequest),
}
