//! State machine orchestration.

use crate::core::{State, StateSubject, TransitionDef};
use crate::hooks::{hook_name, HookOutcome, HookPosition, Workflow};
use crate::machine::error::TransitionError;
use crate::machine::event::{EventGate, GateCheckpoint, TransitionEvent};
use tracing::{debug, trace};
use uuid::Uuid;

/// Drives one subject through the transitions of one graph.
///
/// The machine owns the subject and the bound [`Workflow`] for its
/// lifetime. It validates legality (`can`), consults the optional event
/// gate, runs before/after hooks, and mutates the subject's state through
/// its [`StateSubject`] accessor. Synchronous and single-threaded: callers
/// sharing a subject across threads must serialize access externally.
///
/// A transition attempt has two independent veto layers: the structural
/// and listener check in [`can`](Self::can), then the before-hook's
/// procedural check. The cheap graph-shape check short-circuits before any
/// hook code runs, while hooks keep full access to the subject for
/// last-mile validation.
pub struct StateMachine<T: StateSubject> {
    subject: T,
    workflow: Workflow<T>,
    previous: Option<T::State>,
    gate: Option<Box<dyn EventGate<T::State>>>,
    id: Uuid,
}

impl<T: StateSubject> std::fmt::Debug for StateMachine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<T: StateSubject> StateMachine<T> {
    /// Bind `workflow` to `subject`.
    ///
    /// Fatal if the subject's state cannot be read or if any registered
    /// hook or callback binding fails resolution; no partial machine is
    /// returned.
    pub fn new(subject: T, workflow: Workflow<T>) -> Result<Self, TransitionError> {
        let initial = subject.state()?;
        workflow.validate()?;
        trace!(
            graph = workflow.config().name(),
            state = initial.name(),
            subject = %subject.identity(),
            "state machine bound"
        );
        Ok(Self {
            subject,
            workflow,
            previous: None,
            gate: None,
            id: Uuid::new_v4(),
        })
    }

    /// Attach an event gate.
    pub fn with_gate(mut self, gate: impl EventGate<T::State> + 'static) -> Self {
        self.gate = Some(Box::new(gate));
        self
    }

    /// Replace the event gate.
    pub fn set_gate(&mut self, gate: impl EventGate<T::State> + 'static) {
        self.gate = Some(Box::new(gate));
    }

    /// Check whether `transition` is currently legal.
    ///
    /// Fails with [`TransitionError::UnknownTransition`] if the name is not
    /// in the graph. Returns `false` when the current state is outside the
    /// transition's `from` set, or when a gate listener rejects the
    /// `test_transition` event. Never mutates the subject.
    pub fn can(&self, transition: &str) -> Result<bool, TransitionError> {
        let config = self.workflow.config();
        let def = config
            .transition(transition)
            .ok_or_else(|| TransitionError::UnknownTransition {
                graph: config.name().to_string(),
                transition: transition.to_string(),
            })?;

        let current = self.subject.state()?;
        if !def.allows_from(&current) {
            return Ok(false);
        }

        if let Some(gate) = &self.gate {
            let mut event = self.gate_event(GateCheckpoint::TestTransition, def, &current);
            gate.dispatch(&mut event);
            if event.is_rejected() {
                trace!(
                    graph = config.name(),
                    transition,
                    "transition rejected at test_transition"
                );
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Apply `transition`, failing with
    /// [`TransitionError::IllegalTransition`] when it is not currently
    /// legal. Returns `false` without mutation when the gate or a before
    /// hook vetoes.
    pub fn apply(&mut self, transition: &str) -> Result<bool, TransitionError> {
        self.apply_inner(transition, false)
    }

    /// Like [`apply`](Self::apply), but an illegal transition yields
    /// `Ok(false)` instead of an error.
    pub fn soft_apply(&mut self, transition: &str) -> Result<bool, TransitionError> {
        self.apply_inner(transition, true)
    }

    fn apply_inner(&mut self, transition: &str, soft: bool) -> Result<bool, TransitionError> {
        if !self.can(transition)? {
            if soft {
                debug!(
                    graph = self.workflow.config().name(),
                    transition, "soft apply refused"
                );
                return Ok(false);
            }
            let current = self.subject.state()?;
            return Err(TransitionError::IllegalTransition {
                graph: self.workflow.config().name().to_string(),
                transition: transition.to_string(),
                current: current.name().to_string(),
                subject: self.subject.identity(),
            });
        }

        let def = self
            .workflow
            .config()
            .transition(transition)
            .cloned()
            .ok_or_else(|| TransitionError::UnknownTransition {
                graph: self.workflow.config().name().to_string(),
                transition: transition.to_string(),
            })?;

        let current = self.subject.state()?;

        // Pre-apply checkpoint, independent of the test_transition check
        // already dispatched by `can`.
        if let Some(gate) = &self.gate {
            let mut event = self.gate_event(GateCheckpoint::PreTransition, &def, &current);
            gate.dispatch(&mut event);
            if event.is_rejected() {
                debug!(
                    graph = self.workflow.config().name(),
                    transition, "transition rejected at pre_transition"
                );
                return Ok(false);
            }
        }

        self.previous = Some(current);

        if self.run_before_hooks(&def) == HookOutcome::Veto {
            debug!(
                graph = self.workflow.config().name(),
                transition, "transition vetoed by before hook"
            );
            return Ok(false);
        }

        // A graph materialized through Deserialize bypasses builder
        // validation, so the target's membership is re-checked here.
        if !self.workflow.config().has_state(def.to()) {
            return Err(TransitionError::InvalidState {
                graph: self.workflow.config().name().to_string(),
                transition: def.name().to_string(),
                target: def.to().name().to_string(),
            });
        }

        self.subject.set_state(def.to().clone())?;
        debug!(
            graph = self.workflow.config().name(),
            transition,
            to = def.to().name(),
            "transition committed"
        );

        // State is committed; after hooks cannot roll it back.
        self.run_after_hooks(&def);

        if let Some(gate) = &self.gate {
            let mut event = self.gate_event(GateCheckpoint::PostTransition, &def, def.to());
            gate.dispatch(&mut event);
        }

        Ok(true)
    }

    fn run_before_hooks(&mut self, def: &TransitionDef<T::State>) -> HookOutcome {
        let (graph, hooks) = self.workflow.parts_mut();
        let subject = &mut self.subject;
        let previous = self.previous.as_ref();

        let key = hook_name(HookPosition::Before, def.name());
        if let Some(hook) = hooks.before_mut(&key) {
            if hook(subject, previous) == HookOutcome::Veto {
                return HookOutcome::Veto;
            }
        }

        for binding in graph.callback_bindings() {
            if binding.position == HookPosition::Before && binding.applies_to(def.name()) {
                if let Some(hook) = hooks.before_callback_mut(&binding.callback) {
                    if hook(subject, previous) == HookOutcome::Veto {
                        return HookOutcome::Veto;
                    }
                }
            }
        }

        HookOutcome::Proceed
    }

    fn run_after_hooks(&mut self, def: &TransitionDef<T::State>) {
        let (graph, hooks) = self.workflow.parts_mut();
        let subject = &mut self.subject;
        let previous = self.previous.as_ref();

        let key = hook_name(HookPosition::After, def.name());
        if let Some(hook) = hooks.after_mut(&key) {
            hook(subject, previous);
        }

        for binding in graph.callback_bindings() {
            if binding.position == HookPosition::After && binding.applies_to(def.name()) {
                if let Some(hook) = hooks.after_callback_mut(&binding.callback) {
                    hook(subject, previous);
                }
            }
        }
    }

    fn gate_event(
        &self,
        checkpoint: GateCheckpoint,
        def: &TransitionDef<T::State>,
        current: &T::State,
    ) -> TransitionEvent<T::State> {
        TransitionEvent::new(
            checkpoint,
            def,
            current.clone(),
            self.workflow.config().name().to_string(),
            self.subject.identity(),
            self.id,
        )
    }

    /// Current subject state, read through the accessor.
    pub fn state(&self) -> Result<T::State, TransitionError> {
        Ok(self.subject.state()?)
    }

    /// The state before the most recent `apply`, `None` before the first.
    pub fn previous_state(&self) -> Option<&T::State> {
        self.previous.as_ref()
    }

    /// Transition names currently answering `can == true`, in graph
    /// declaration order.
    pub fn possible_transitions(&self) -> Result<Vec<&str>, TransitionError> {
        let mut names = Vec::new();
        for def in self.workflow.config().transitions() {
            if self.can(def.name())? {
                names.push(def.name());
            }
        }
        Ok(names)
    }

    pub fn graph_name(&self) -> &str {
        self.workflow.config().name()
    }

    pub fn subject(&self) -> &T {
        &self.subject
    }

    pub fn subject_mut(&mut self) -> &mut T {
        &mut self.subject
    }

    /// Identifier of this machine instance, carried in gate events.
    pub fn id(&self) -> Uuid {
        self.id
    }
}
