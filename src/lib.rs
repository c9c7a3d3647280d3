//! Type blocking for visual block editors.
//!
//! The user types part of a block's name into a small panel; the crate
//! suggests matching labels (workspace blocks plus built-in templates),
//! walks the blocks whose label equals the input, and turns a chosen
//! suggestion into a block creation request for the host editor.
//!
//! The binary `typeblock` runs the pipeline against a workspace JSON file.

pub mod catalog;
pub mod config;
pub mod error;
pub mod index;
pub mod label;
pub mod matcher;
pub mod model;
pub mod navigator;
pub mod panel;

pub use config::PanelConfig;
pub use error::{Result, TypeBlockError};
pub use index::{InvalidBlockPolicy, LabelEntry, OptionIndex};
pub use matcher::Matcher;
pub use model::{BlockDescriptor, BlockKind, Workspace};
pub use navigator::MatchNavigator;
pub use panel::PanelController;
