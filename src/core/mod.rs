//! Core model of the engine.
//!
//! This module contains the pure data side of the state machine:
//! - State values via the [`State`] trait
//! - The immutable [`TransitionGraph`] configuration
//! - Subject state access via the [`StateSubject`] capability
//!
//! Nothing here performs a transition; orchestration lives in
//! [`machine`](crate::machine).

mod access;
mod graph;
mod state;

pub use access::{AccessError, StateSubject};
pub use graph::{CallbackBinding, TransitionDef, TransitionGraph, DEFAULT_PROPERTY_PATH};
pub use state::State;
