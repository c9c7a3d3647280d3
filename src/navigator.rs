//! Cursor over the blocks whose label equals the typed text.
//!
//! The match set is replaced on every input update while the cursor is left
//! alone, so after retyping the cursor may point past the end of a shorter
//! set. [`MatchNavigator::current`] reports nothing in that case and the next
//! step brings the cursor back into range.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut nav = MatchNavigator::new();
//! nav.set_matches(blocks);
//! let focus = nav.next().map(|b| b.position);
//! ```

use crate::model::BlockDescriptor;

#[derive(Debug, Clone, Default)]
pub struct MatchNavigator {
    matches: Vec<BlockDescriptor>,
    cursor: usize,
}

impl MatchNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the match set. The cursor is kept as is.
    pub fn set_matches(&mut self, matches: Vec<BlockDescriptor>) {
        self.matches = matches;
    }

    /// Empty the match set and reset the cursor.
    pub fn clear(&mut self) {
        self.matches.clear();
        self.cursor = 0;
    }

    pub fn matches(&self) -> &[BlockDescriptor] {
        &self.matches
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Block under the cursor, if the cursor is in range.
    pub fn current(&self) -> Option<&BlockDescriptor> {
        self.matches.get(self.cursor)
    }

    /// Advance the cursor, wrapping to the first match. No-op on an empty set.
    pub fn next(&mut self) -> Option<&BlockDescriptor> {
        if self.matches.is_empty() {
            return None;
        }
        self.cursor = if self.cursor + 1 >= self.matches.len() {
            0
        } else {
            self.cursor + 1
        };
        self.current()
    }

    /// Step the cursor back, wrapping to the last match. No-op on an empty set.
    pub fn previous(&mut self) -> Option<&BlockDescriptor> {
        if self.matches.is_empty() {
            return None;
        }
        let last = self.matches.len() - 1;
        self.cursor = if self.cursor == 0 || self.cursor > last {
            last
        } else {
            self.cursor - 1
        };
        self.current()
    }
}
