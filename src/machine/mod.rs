//! Transition orchestration.
//!
//! [`StateMachine`] ties the pieces together: the graph answers which
//! transitions exist, the optional [`EventGate`] gets a veto at two
//! checkpoints and observes completion, hooks run around the mutation, and
//! the subject's accessor performs the actual state write.

mod error;
mod event;
mod state_machine;

pub use error::TransitionError;
pub use event::{EventGate, GateCheckpoint, TransitionEvent};
pub use state_machine::StateMachine;
