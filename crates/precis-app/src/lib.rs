//! Precis Application
//!
//! Browser bindings for the Precis controls and a native gesture replayer.

#[cfg(not(target_arch = "wasm32"))]
pub mod replay;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use replay::{Gesture, Replay, ReplayError, ReplayResult, WidgetEntry, load_replay, run_replay};

#[cfg(target_arch = "wasm32")]
pub use web::PrecisUi;
