//! Event gate checkpoints and transition events.
//!
//! A state machine can be handed an [`EventGate`]: a dispatcher notified at
//! three checkpoints of a transition attempt. The first two may veto by
//! rejecting the event; the last is observation only. Absent a gate, the
//! machine's control flow is identical with every checkpoint answering
//! "proceed".

use crate::core::{State, TransitionDef};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The three dispatch checkpoints of a transition attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateCheckpoint {
    /// Dispatched by `can`: may reject to make the check answer `false`.
    TestTransition,
    /// Dispatched by `apply` after `can` passed, before any hook runs:
    /// may reject to abort with no mutation.
    PreTransition,
    /// Dispatched after the state has been committed and after-hooks ran.
    /// Rejection is ignored.
    PostTransition,
}

impl GateCheckpoint {
    /// Wire name of the checkpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TestTransition => "test_transition",
            Self::PreTransition => "pre_transition",
            Self::PostTransition => "post_transition",
        }
    }
}

/// Snapshot of a transition attempt handed to gate listeners.
///
/// Ephemeral: one event is built per gated checkpoint and dropped when the
/// dispatch returns. Instead of a back-reference to the machine it carries
/// the machine's identity snapshot (graph name, subject identity, machine
/// id), which keeps listeners decoupled from the machine's borrows.
#[derive(Clone, Debug)]
pub struct TransitionEvent<S: State> {
    checkpoint: GateCheckpoint,
    transition: String,
    from: Vec<S>,
    to: S,
    current: S,
    graph: String,
    subject: String,
    machine: Uuid,
    occurred_at: DateTime<Utc>,
    rejected: bool,
}

impl<S: State> TransitionEvent<S> {
    pub(crate) fn new(
        checkpoint: GateCheckpoint,
        def: &TransitionDef<S>,
        current: S,
        graph: String,
        subject: String,
        machine: Uuid,
    ) -> Self {
        Self {
            checkpoint,
            transition: def.name().to_string(),
            from: def.from().to_vec(),
            to: def.to().clone(),
            current,
            graph,
            subject,
            machine,
            occurred_at: Utc::now(),
            rejected: false,
        }
    }

    pub fn checkpoint(&self) -> GateCheckpoint {
        self.checkpoint
    }

    /// Name of the transition being attempted.
    pub fn transition(&self) -> &str {
        &self.transition
    }

    /// The transition's legal source states.
    pub fn from(&self) -> &[S] {
        &self.from
    }

    /// The transition's destination state.
    pub fn to(&self) -> &S {
        &self.to
    }

    /// Subject state at the time the event was built. For
    /// `post_transition` this is the committed destination state.
    pub fn current_state(&self) -> &S {
        &self.current
    }

    pub fn graph(&self) -> &str {
        &self.graph
    }

    /// Identity of the subject, as reported by its accessor.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Identifier of the dispatching machine instance.
    pub fn machine(&self) -> Uuid {
        self.machine
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Mark the transition as rejected. Meaningful at the
    /// `test_transition` and `pre_transition` checkpoints.
    pub fn reject(&mut self) {
        self.rejected = true;
    }

    pub fn is_rejected(&self) -> bool {
        self.rejected
    }
}

/// Dispatcher consulted at each [`GateCheckpoint`].
///
/// Dispatch takes `&self`: a gate shared across machines must handle its
/// own synchronization (interior mutability), which also satisfies the
/// concurrent-dispatch requirement on shared gates.
pub trait EventGate<S: State>: Send {
    fn dispatch(&self, event: &mut TransitionEvent<S>);
}
