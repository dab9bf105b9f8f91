//! Core State trait for graph-governed states.
//!
//! Every state value stored on a subject and declared in a transition graph
//! implements this trait, which provides pure inspection methods with no
//! side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state values governed by a [`TransitionGraph`](crate::core::TransitionGraph).
///
/// All methods are pure. States are immutable values describing the current
/// position of a subject inside its graph.
///
/// # Required Traits
///
/// - `Clone`: states are captured as previous-state snapshots during `apply`
/// - `PartialEq`: membership checks against a transition's `from` set
/// - `Debug`: diagnostics
/// - `Serialize` + `Deserialize`: graphs embedding states are plain data
///
/// # Example
///
/// ```rust
/// use trellis::State;
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
/// assert_eq!(DocumentState::Draft.name(), "draft");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    ///
    /// Returns a static string reference for zero-cost naming. Error context
    /// and gate events carry this name, so it should be stable.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Draft,
        Review,
        Published,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Draft => "draft",
                Self::Review => "review",
                Self::Published => "published",
            }
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Draft.name(), "draft");
        assert_eq!(TestState::Review.name(), "review");
        assert_eq!(TestState::Published.name(), "published");
    }

    #[test]
    fn state_serializes_correctly() {
        let state = TestState::Draft;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }

    #[test]
    fn state_is_comparable() {
        assert_eq!(TestState::Review, TestState::Review);
        assert_ne!(TestState::Review, TestState::Published);
    }
}
