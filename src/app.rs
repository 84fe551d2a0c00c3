//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model in `app::model` holds the playlist store (authoritative
//! and rendered orderings), the server-confirmed selection, and transient
//! UI state such as prompts and an active drag.

mod model;

pub use model::*;
