//! stickbind — interactive controller/keyboard binding sessions.
//!
//! Drives the "configure input" dialog of a front-end: the user walks a fixed
//! list of actions, presses something on the target device for each, and the
//! resulting mapping is saved. See [`session`] for the state machine.

pub mod action;
pub mod backends;
pub mod binding;
pub mod device;
pub mod error;
pub mod event;
pub mod options;
pub mod session;
pub mod store;

pub use action::{ActionDesc, ACTIONS, HOTKEY_ACTION};
pub use binding::DeviceConfig;
pub use device::*;
pub use error::{Error, Result};
pub use event::*;
pub use options::SessionOptions;
pub use session::{BindingSession, Confirmation, HeldInput, HotkeyChoice, HotkeyPrompt, Phase, RowStatus};
pub use store::{ConfigStore, FileStore, InputConfigFile};
