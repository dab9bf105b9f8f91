//! Immutable transition graph model.
//!
//! A [`TransitionGraph`] is the declarative description of one class of
//! subjects: the states they may hold, the named transitions between those
//! states, and the callback bindings attached to each lifecycle position.
//! Graphs are constructed once through
//! [`GraphBuilder`](crate::builder::GraphBuilder), are immutable afterwards,
//! and are shared read-only (typically behind an `Arc`) across every state
//! machine governed by them.
//!
//! The graph types derive `Serialize`/`Deserialize` so callers may
//! materialize them from any configuration source. A deserialized graph
//! bypasses builder validation; the state machine therefore re-checks the
//! target state's membership at apply time.

use crate::core::state::State;
use crate::hooks::HookPosition;
use serde::{Deserialize, Serialize};

/// Conventional name of the subject field holding the current state.
pub const DEFAULT_PROPERTY_PATH: &str = "state";

fn default_property_path() -> String {
    DEFAULT_PROPERTY_PATH.to_string()
}

/// A named, directed edge: legal from any state in `from`, landing on `to`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionDef<S: State> {
    name: String,
    from: Vec<S>,
    to: S,
}

impl<S: State> TransitionDef<S> {
    pub(crate) fn new(name: String, from: Vec<S>, to: S) -> Self {
        Self { name, from, to }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// States this transition is legal from.
    pub fn from(&self) -> &[S] {
        &self.from
    }

    /// The single destination state.
    pub fn to(&self) -> &S {
        &self.to
    }

    /// Check whether the transition is legal from `state`.
    pub fn allows_from(&self, state: &S) -> bool {
        self.from.contains(state)
    }
}

/// An extra callback invoked at a lifecycle position, in addition to the
/// transition's named hook.
///
/// The `callback` field names a callable registered on the
/// [`Workflow`](crate::hooks::Workflow); an empty `transitions` filter means
/// the binding applies to every transition in the graph. Bindings run in
/// declaration order after the named hook for their position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallbackBinding {
    pub position: HookPosition,
    #[serde(default)]
    pub transitions: Vec<String>,
    pub callback: String,
}

impl CallbackBinding {
    pub fn applies_to(&self, transition: &str) -> bool {
        self.transitions.is_empty() || self.transitions.iter().any(|t| t == transition)
    }
}

/// Immutable description of states, transitions, and hook bindings.
///
/// # Example
///
/// ```rust
/// use trellis::{GraphBuilder, State};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum DocumentState {
///     Draft,
///     Review,
///     Published,
/// }
///
/// impl State for DocumentState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Draft => "draft",
///             Self::Review => "review",
///             Self::Published => "published",
///         }
///     }
/// }
///
/// let graph = GraphBuilder::new("document")
///     .states([
///         DocumentState::Draft,
///         DocumentState::Review,
///         DocumentState::Published,
///     ])
///     .transition("submit", [DocumentState::Draft], DocumentState::Review)
///     .transition("publish", [DocumentState::Review], DocumentState::Published)
///     .build()
///     .unwrap();
///
/// assert_eq!(graph.name(), "document");
/// assert!(graph.transition("submit").is_some());
/// assert!(graph.has_state(&DocumentState::Review));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionGraph<S: State> {
    name: String,
    states: Vec<S>,
    transitions: Vec<TransitionDef<S>>,
    #[serde(default = "default_property_path")]
    property_path: String,
    #[serde(default)]
    callback_bindings: Vec<CallbackBinding>,
}

impl<S: State> TransitionGraph<S> {
    pub(crate) fn from_parts(
        name: String,
        states: Vec<S>,
        transitions: Vec<TransitionDef<S>>,
        property_path: String,
        callback_bindings: Vec<CallbackBinding>,
    ) -> Self {
        Self {
            name,
            states,
            transitions,
            property_path,
            callback_bindings,
        }
    }

    /// Graph identifier, carried in error context and gate events.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All declared states.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// Check whether `state` is declared in this graph.
    pub fn has_state(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    /// All transitions, in declaration order.
    pub fn transitions(&self) -> &[TransitionDef<S>] {
        &self.transitions
    }

    /// Transition names, in declaration order.
    pub fn transition_names(&self) -> impl Iterator<Item = &str> {
        self.transitions.iter().map(TransitionDef::name)
    }

    /// Look up a transition by name.
    pub fn transition(&self, name: &str) -> Option<&TransitionDef<S>> {
        self.transitions.iter().find(|t| t.name == name)
    }

    /// Name of the subject field holding the current state.
    ///
    /// With [`StateSubject`](crate::core::StateSubject) resolving access at
    /// compile time this is documentation and diagnostics, not a runtime
    /// lookup path.
    pub fn property_path(&self) -> &str {
        &self.property_path
    }

    /// Extra callback bindings, in declaration order.
    pub fn callback_bindings(&self) -> &[CallbackBinding] {
        &self.callback_bindings
    }
}
