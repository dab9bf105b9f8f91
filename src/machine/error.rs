//! Errors raised while checking or applying transitions.

use crate::core::AccessError;
use crate::hooks::HookResolutionError;
use thiserror::Error;

/// Errors surfaced by [`StateMachine`](crate::machine::StateMachine)
/// operations.
///
/// Every variant carries the structured context (graph, transition,
/// current/target state, subject identity) that external logging attaches;
/// the context never changes which errors are raised.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("graph '{graph}': unknown transition '{transition}'")]
    UnknownTransition { graph: String, transition: String },

    #[error(
        "graph '{graph}': transition '{transition}' is not allowed from state '{current}' on subject {subject}"
    )]
    IllegalTransition {
        graph: String,
        transition: String,
        current: String,
        subject: String,
    },

    #[error("graph '{graph}': transition '{transition}' targets state '{target}' absent from the graph")]
    InvalidState {
        graph: String,
        transition: String,
        target: String,
    },

    #[error(transparent)]
    HookResolution(#[from] HookResolutionError),

    #[error(transparent)]
    Access(#[from] AccessError),
}
