//! Subject state access.
//!
//! The engine never touches a subject's fields directly. All reads and
//! writes of the current state go through the [`StateSubject`] capability,
//! which a subject type implements once. The `property_path` configured on
//! a graph documents which field the implementation is expected to back.

use crate::core::state::State;
use thiserror::Error;

/// Errors raised when a subject's state slot cannot be accessed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("state field '{path}' is not readable on subject {subject}: {detail}")]
    Unreadable {
        path: String,
        subject: String,
        detail: String,
    },

    #[error("state field '{path}' is not writable on subject {subject}: {detail}")]
    Unwritable {
        path: String,
        subject: String,
        detail: String,
    },
}

/// Capability granting the engine read/write access to a subject's state.
///
/// The accessors are fallible: a subject whose state slot is optional,
/// lazily initialized, or guarded may legitimately fail a read, and the
/// engine treats that as [`AccessError`] rather than a panic. A machine
/// cannot even be constructed over a subject whose state is unreadable.
///
/// # Example
///
/// ```rust
/// use trellis::{AccessError, State, StateSubject};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum LampState {
///     Off,
///     On,
/// }
///
/// impl State for LampState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Off => "off",
///             Self::On => "on",
///         }
///     }
/// }
///
/// struct Lamp {
///     state: LampState,
/// }
///
/// impl StateSubject for Lamp {
///     type State = LampState;
///
///     fn state(&self) -> Result<LampState, AccessError> {
///         Ok(self.state.clone())
///     }
///
///     fn set_state(&mut self, next: LampState) -> Result<(), AccessError> {
///         self.state = next;
///         Ok(())
///     }
/// }
/// ```
pub trait StateSubject {
    /// The state value stored on this subject.
    type State: State;

    /// Read the current state.
    fn state(&self) -> Result<Self::State, AccessError>;

    /// Overwrite the current state.
    fn set_state(&mut self, next: Self::State) -> Result<(), AccessError>;

    /// A short identity used in error context and gate events.
    ///
    /// Default implementation returns an anonymous placeholder.
    fn identity(&self) -> String {
        String::from("<subject>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Busy,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "idle",
                Self::Busy => "busy",
            }
        }
    }

    struct Widget {
        state: Option<TestState>,
    }

    impl StateSubject for Widget {
        type State = TestState;

        fn state(&self) -> Result<TestState, AccessError> {
            self.state.clone().ok_or_else(|| AccessError::Unreadable {
                path: "state".to_string(),
                subject: self.identity(),
                detail: "field is unset".to_string(),
            })
        }

        fn set_state(&mut self, next: TestState) -> Result<(), AccessError> {
            self.state = Some(next);
            Ok(())
        }

        fn identity(&self) -> String {
            String::from("widget#1")
        }
    }

    #[test]
    fn read_returns_current_state() {
        let widget = Widget {
            state: Some(TestState::Idle),
        };
        assert_eq!(widget.state().unwrap(), TestState::Idle);
    }

    #[test]
    fn write_replaces_state() {
        let mut widget = Widget {
            state: Some(TestState::Idle),
        };
        widget.set_state(TestState::Busy).unwrap();
        assert_eq!(widget.state().unwrap(), TestState::Busy);
    }

    #[test]
    fn unset_slot_is_unreadable() {
        let widget = Widget { state: None };
        let err = widget.state().unwrap_err();
        assert!(matches!(err, AccessError::Unreadable { .. }));
        assert!(err.to_string().contains("widget#1"));
    }
}
