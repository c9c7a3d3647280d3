//! The type-blocking panel (show/hide state machine, key routing, navigation).
//!
//! The panel owns no rendering. It drives a host editor and a widget layer
//! through the traits in [`host`]; [`headless`] provides in-memory versions
//! of both.

pub mod headless;
pub mod host;
pub mod keys;
pub mod state;

pub use headless::{HeadlessUi, WorkspaceHost};
pub use host::{BlockRequest, HostEditor, ListenerKey, UiEvent, UiRuntime};
pub use keys::{Key, KeyEvent, KeyOutcome, KeyTarget};
pub use state::{InputUpdate, PanelController, PanelState};
