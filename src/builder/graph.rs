//! Builder for constructing transition graphs.

use crate::builder::error::ConfigurationError;
use crate::core::{CallbackBinding, State, TransitionDef, TransitionGraph, DEFAULT_PROPERTY_PATH};
use crate::hooks::HookPosition;

/// Builder for [`TransitionGraph`] values with a fluent API.
///
/// `build` validates the assembled graph and fails fast with
/// [`ConfigurationError`] instead of deferring a malformed graph to the
/// moment a transition is applied: target and source states must be
/// declared, transition names must be unique, and callback bindings may
/// only filter on declared transitions.
pub struct GraphBuilder<S: State> {
    name: String,
    states: Vec<S>,
    transitions: Vec<TransitionDef<S>>,
    property_path: String,
    callback_bindings: Vec<CallbackBinding>,
}

impl<S: State> GraphBuilder<S> {
    /// Create a builder for a graph named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            transitions: Vec::new(),
            property_path: DEFAULT_PROPERTY_PATH.to_string(),
            callback_bindings: Vec::new(),
        }
    }

    /// Declare a single state.
    pub fn state(mut self, state: S) -> Self {
        self.states.push(state);
        self
    }

    /// Declare multiple states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.states.extend(states);
        self
    }

    /// Declare a transition legal from every state in `from`, landing on `to`.
    pub fn transition(
        mut self,
        name: impl Into<String>,
        from: impl IntoIterator<Item = S>,
        to: S,
    ) -> Self {
        self.transitions
            .push(TransitionDef::new(name.into(), from.into_iter().collect(), to));
        self
    }

    /// Override the conventional subject state field name.
    pub fn property_path(mut self, path: impl Into<String>) -> Self {
        self.property_path = path.into();
        self
    }

    /// Bind a named callback at `position`, filtered to `transitions`
    /// (an empty filter applies the callback to every transition).
    pub fn binding(
        mut self,
        position: HookPosition,
        transitions: impl IntoIterator<Item = impl Into<String>>,
        callback: impl Into<String>,
    ) -> Self {
        self.callback_bindings.push(CallbackBinding {
            position,
            transitions: transitions.into_iter().map(Into::into).collect(),
            callback: callback.into(),
        });
        self
    }

    /// Validate and build the graph.
    pub fn build(self) -> Result<TransitionGraph<S>, ConfigurationError> {
        for (idx, state) in self.states.iter().enumerate() {
            if self.states[..idx].contains(state) {
                return Err(ConfigurationError::DuplicateState {
                    graph: self.name.clone(),
                    state: state.name().to_string(),
                });
            }
        }

        for (idx, transition) in self.transitions.iter().enumerate() {
            if self.transitions[..idx].iter().any(|t| t.name() == transition.name()) {
                return Err(ConfigurationError::DuplicateTransition {
                    graph: self.name.clone(),
                    transition: transition.name().to_string(),
                });
            }
            if !self.states.contains(transition.to()) {
                return Err(ConfigurationError::UnknownTargetState {
                    graph: self.name.clone(),
                    transition: transition.name().to_string(),
                    state: transition.to().name().to_string(),
                });
            }
            if let Some(missing) = transition.from().iter().find(|s| !self.states.contains(s)) {
                return Err(ConfigurationError::UnknownSourceState {
                    graph: self.name.clone(),
                    transition: transition.name().to_string(),
                    state: missing.name().to_string(),
                });
            }
        }

        for binding in &self.callback_bindings {
            if let Some(unknown) = binding
                .transitions
                .iter()
                .find(|name| self.transitions.iter().all(|t| t.name() != name.as_str()))
            {
                return Err(ConfigurationError::UnknownBoundTransition {
                    graph: self.name.clone(),
                    callback: binding.callback.clone(),
                    transition: unknown.clone(),
                });
            }
        }

        Ok(TransitionGraph::from_parts(
            self.name,
            self.states,
            self.transitions,
            self.property_path,
            self.callback_bindings,
        ))
    }
}
