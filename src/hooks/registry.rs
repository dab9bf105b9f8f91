//! Hook registration and workflow binding.
//!
//! Instead of resolving `beforeStartReview`-style method names
//! reflectively at call time, hooks are registered once on a [`Workflow`]
//! and stored in a table keyed by the derived name. Binding a workflow to a
//! state machine validates the whole table up front: a hook registered for
//! a transition the graph does not declare, or a callback binding with no
//! registered callable, surfaces immediately as [`HookResolutionError`]
//! rather than being silently skipped.

use crate::core::{StateSubject, TransitionGraph};
use crate::hooks::name::{hook_name, HookPosition};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Raised when a registered hook or bound callback cannot be matched
/// against the graph at bind time. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("hook '{hook}' cannot be resolved for graph '{graph}'")]
pub struct HookResolutionError {
    pub graph: String,
    pub hook: String,
}

/// Verdict of a before-position callable.
///
/// `Veto` aborts the transition with no state mutation; it is the typed
/// rendition of a guard answering "no" after arbitrary side effects have
/// already run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookOutcome {
    Proceed,
    Veto,
}

type BeforeHook<T> =
    Box<dyn FnMut(&mut T, Option<&<T as StateSubject>::State>) -> HookOutcome + Send>;
type AfterHook<T> = Box<dyn FnMut(&mut T, Option<&<T as StateSubject>::State>) + Send>;

/// Registration table mapping derived hook names and callback names to
/// callables. Built once per [`Workflow`]; never consulted by name at
/// transition time without having been validated first.
pub struct HookRegistry<T: StateSubject> {
    before: HashMap<String, BeforeHook<T>>,
    after: HashMap<String, AfterHook<T>>,
    before_callbacks: HashMap<String, BeforeHook<T>>,
    after_callbacks: HashMap<String, AfterHook<T>>,
}

impl<T: StateSubject> Default for HookRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StateSubject> HookRegistry<T> {
    pub fn new() -> Self {
        Self {
            before: HashMap::new(),
            after: HashMap::new(),
            before_callbacks: HashMap::new(),
            after_callbacks: HashMap::new(),
        }
    }

    pub(crate) fn insert_before(&mut self, key: String, hook: BeforeHook<T>) {
        self.before.insert(key, hook);
    }

    pub(crate) fn insert_after(&mut self, key: String, hook: AfterHook<T>) {
        self.after.insert(key, hook);
    }

    pub(crate) fn insert_before_callback(&mut self, name: String, hook: BeforeHook<T>) {
        self.before_callbacks.insert(name, hook);
    }

    pub(crate) fn insert_after_callback(&mut self, name: String, hook: AfterHook<T>) {
        self.after_callbacks.insert(name, hook);
    }

    pub(crate) fn before_mut(&mut self, key: &str) -> Option<&mut BeforeHook<T>> {
        self.before.get_mut(key)
    }

    pub(crate) fn after_mut(&mut self, key: &str) -> Option<&mut AfterHook<T>> {
        self.after.get_mut(key)
    }

    pub(crate) fn before_callback_mut(&mut self, name: &str) -> Option<&mut BeforeHook<T>> {
        self.before_callbacks.get_mut(name)
    }

    pub(crate) fn after_callback_mut(&mut self, name: &str) -> Option<&mut AfterHook<T>> {
        self.after_callbacks.get_mut(name)
    }

    /// Check whether a callable is registered for a callback binding.
    pub fn has_callback(&self, position: HookPosition, name: &str) -> bool {
        match position {
            HookPosition::Before => self.before_callbacks.contains_key(name),
            HookPosition::After => self.after_callbacks.contains_key(name),
        }
    }

    fn keys(&self, position: HookPosition) -> Box<dyn Iterator<Item = &String> + '_> {
        match position {
            HookPosition::Before => Box::new(self.before.keys()),
            HookPosition::After => Box::new(self.after.keys()),
        }
    }
}

/// A transition graph bound together with the hooks that run around it.
///
/// The workflow owns the graph (shared, read-only) and the registry of
/// callables. Hooks receive `(subject, previous_state)`; the previous state
/// is `None` until the machine has applied its first transition and is the
/// pre-mutation state during one.
///
/// # Example
///
/// ```rust
/// use trellis::{GraphBuilder, HookOutcome, State, StateSubject, Workflow};
/// # use trellis::AccessError;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum DocumentState {
///     Draft,
///     Review,
/// }
///
/// impl State for DocumentState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Draft => "draft",
///             Self::Review => "review",
///         }
///     }
/// }
///
/// struct Document {
///     state: DocumentState,
/// }
///
/// impl StateSubject for Document {
///     type State = DocumentState;
///     fn state(&self) -> Result<DocumentState, AccessError> {
///         Ok(self.state.clone())
///     }
///     fn set_state(&mut self, next: DocumentState) -> Result<(), AccessError> {
///         self.state = next;
///         Ok(())
///     }
/// }
///
/// let graph = GraphBuilder::new("document")
///     .states([DocumentState::Draft, DocumentState::Review])
///     .transition("submit", [DocumentState::Draft], DocumentState::Review)
///     .build()
///     .unwrap();
///
/// let workflow: Workflow<Document> = Workflow::from_graph(graph)
///     .on_before("submit", |_doc, _previous| HookOutcome::Proceed)
///     .on_after("submit", |_doc, _previous| {});
/// ```
pub struct Workflow<T: StateSubject> {
    config: Arc<TransitionGraph<T::State>>,
    hooks: HookRegistry<T>,
}

impl<T: StateSubject> Workflow<T> {
    /// Bind hooks to a shared graph.
    pub fn new(config: Arc<TransitionGraph<T::State>>) -> Self {
        Self {
            config,
            hooks: HookRegistry::new(),
        }
    }

    /// Bind hooks to an owned graph.
    pub fn from_graph(config: TransitionGraph<T::State>) -> Self {
        Self::new(Arc::new(config))
    }

    /// Register the named before-hook for `transition`.
    ///
    /// Stored under the derived key, e.g. `beforeStartReview` for
    /// `start_review`. One hook per transition per position; a second
    /// registration replaces the first.
    pub fn on_before<F>(mut self, transition: &str, hook: F) -> Self
    where
        F: FnMut(&mut T, Option<&T::State>) -> HookOutcome + Send + 'static,
    {
        self.hooks
            .insert_before(hook_name(HookPosition::Before, transition), Box::new(hook));
        self
    }

    /// Register the named after-hook for `transition`.
    pub fn on_after<F>(mut self, transition: &str, hook: F) -> Self
    where
        F: FnMut(&mut T, Option<&T::State>) + Send + 'static,
    {
        self.hooks
            .insert_after(hook_name(HookPosition::After, transition), Box::new(hook));
        self
    }

    /// Register a callable for before-position callback bindings.
    pub fn before_callback<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: FnMut(&mut T, Option<&T::State>) -> HookOutcome + Send + 'static,
    {
        self.hooks.insert_before_callback(name.into(), Box::new(hook));
        self
    }

    /// Register a callable for after-position callback bindings.
    pub fn after_callback<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: FnMut(&mut T, Option<&T::State>) + Send + 'static,
    {
        self.hooks.insert_after_callback(name.into(), Box::new(hook));
        self
    }

    /// The transition graph this workflow is bound to.
    pub fn config(&self) -> &TransitionGraph<T::State> {
        &self.config
    }

    /// A shareable handle to the graph.
    pub fn graph(&self) -> Arc<TransitionGraph<T::State>> {
        Arc::clone(&self.config)
    }

    pub(crate) fn parts_mut(&mut self) -> (&TransitionGraph<T::State>, &mut HookRegistry<T>) {
        (&self.config, &mut self.hooks)
    }

    /// Resolve every registered hook and every graph binding, failing on
    /// the first mismatch.
    pub(crate) fn validate(&self) -> Result<(), HookResolutionError> {
        for position in [HookPosition::Before, HookPosition::After] {
            for key in self.hooks.keys(position) {
                let resolved = self
                    .config
                    .transition_names()
                    .any(|t| hook_name(position, t) == *key);
                if !resolved {
                    return Err(HookResolutionError {
                        graph: self.config.name().to_string(),
                        hook: key.clone(),
                    });
                }
            }
        }

        for binding in self.config.callback_bindings() {
            if !self.hooks.has_callback(binding.position, &binding.callback) {
                return Err(HookResolutionError {
                    graph: self.config.name().to_string(),
                    hook: binding.callback.clone(),
                });
            }
        }

        Ok(())
    }
}
