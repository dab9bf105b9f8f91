//! Lifecycle hooks.
//!
//! Hooks are caller-supplied callables invoked immediately before and after
//! a transition's state mutation. Name derivation lives in [`studly_case`]
//! and [`hook_name`]; registration and bind-time resolution live in
//! [`Workflow`] and [`HookRegistry`].

mod name;
mod registry;

pub use name::{hook_name, studly_case, HookPosition};
pub use registry::{HookOutcome, HookRegistry, HookResolutionError, Workflow};
