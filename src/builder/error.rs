//! Configuration errors for graph construction.

use thiserror::Error;

/// Errors raised when a transition graph fails validation at build time.
///
/// Every variant names the graph and the offending identifier so callers
/// can attach the context to their own logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("graph '{graph}': state '{state}' declared more than once")]
    DuplicateState { graph: String, state: String },

    #[error("graph '{graph}': transition '{transition}' declared more than once")]
    DuplicateTransition { graph: String, transition: String },

    #[error("graph '{graph}': transition '{transition}' targets undeclared state '{state}'")]
    UnknownTargetState {
        graph: String,
        transition: String,
        state: String,
    },

    #[error("graph '{graph}': transition '{transition}' allows undeclared source state '{state}'")]
    UnknownSourceState {
        graph: String,
        transition: String,
        state: String,
    },

    #[error("graph '{graph}': callback binding '{callback}' filters on unknown transition '{transition}'")]
    UnknownBoundTransition {
        graph: String,
        callback: String,
        transition: String,
    },
}
