//! Host editor integration for the pairing engine.
//!
//! The engine in `the-pairs` is a pure function of (buffer, keystroke). This
//! crate is the glue an editor needs around it: an event filter the editor
//! calls for every keystroke, explicit attach/detach calls that follow the
//! active document, and the user settings that switch pairing on or off.

pub mod config;
pub mod document;
pub mod plugin;

pub use config::PairsConfig;
pub use document::DocumentId;
pub use plugin::{
  EventFilter,
  FilterResult,
  PairingPlugin,
  handle_key,
};
