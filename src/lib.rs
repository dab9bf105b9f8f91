//! Trellis: a configuration-driven finite state machine engine.
//!
//! A [`TransitionGraph`] declares states and named transitions (each with a
//! set of legal source states and a single destination); a subject exposes
//! its mutable state through the [`StateSubject`] capability; the
//! [`StateMachine`] determines which transitions are currently legal,
//! executes them, and invokes lifecycle hooks before and after each
//! mutation. An optional [`EventGate`] lets third parties veto or observe
//! transitions.
//!
//! # Core Concepts
//!
//! - **Graph**: immutable set of states and transitions governing one class
//!   of subjects, validated at construction by [`GraphBuilder`]
//! - **Hooks**: `before`/`after` callables registered on a [`Workflow`],
//!   resolved once at bind time; a before hook may veto
//! - **Gate**: dispatcher consulted at the `test_transition`,
//!   `pre_transition`, and `post_transition` checkpoints
//!
//! # Example
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use trellis::{
//!     AccessError, GraphBuilder, HookOutcome, State, StateMachine, StateSubject, Workflow,
//! };
//!
//! #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
//! enum DocumentState {
//!     Draft,
//!     Review,
//!     Published,
//! }
//!
//! impl State for DocumentState {
//!     fn name(&self) -> &str {
//!         match self {
//!             Self::Draft => "draft",
//!             Self::Review => "review",
//!             Self::Published => "published",
//!         }
//!     }
//! }
//!
//! struct Document {
//!     state: DocumentState,
//! }
//!
//! impl StateSubject for Document {
//!     type State = DocumentState;
//!
//!     fn state(&self) -> Result<DocumentState, AccessError> {
//!         Ok(self.state.clone())
//!     }
//!
//!     fn set_state(&mut self, next: DocumentState) -> Result<(), AccessError> {
//!         self.state = next;
//!         Ok(())
//!     }
//! }
//!
//! let graph = GraphBuilder::new("document")
//!     .states([
//!         DocumentState::Draft,
//!         DocumentState::Review,
//!         DocumentState::Published,
//!     ])
//!     .transition("submit", [DocumentState::Draft], DocumentState::Review)
//!     .transition("publish", [DocumentState::Review], DocumentState::Published)
//!     .build()
//!     .unwrap();
//!
//! let workflow = Workflow::from_graph(graph)
//!     .on_before("publish", |_doc: &mut Document, _previous| HookOutcome::Proceed);
//!
//! let subject = Document {
//!     state: DocumentState::Draft,
//! };
//! let mut machine = StateMachine::new(subject, workflow).unwrap();
//!
//! assert!(!machine.can("publish").unwrap());
//! assert!(machine.apply("submit").unwrap());
//! assert!(machine.apply("publish").unwrap());
//! assert_eq!(machine.state().unwrap(), DocumentState::Published);
//! ```

pub mod builder;
pub mod core;
pub mod hooks;
pub mod machine;

// Re-export commonly used types
pub use crate::core::{
    AccessError, CallbackBinding, State, StateSubject, TransitionDef, TransitionGraph,
    DEFAULT_PROPERTY_PATH,
};
pub use builder::{ConfigurationError, GraphBuilder};
pub use hooks::{hook_name, studly_case, HookOutcome, HookPosition, HookRegistry,
    HookResolutionError, Workflow};
pub use machine::{EventGate, GateCheckpoint, StateMachine, TransitionError, TransitionEvent};
