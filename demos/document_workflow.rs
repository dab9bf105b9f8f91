//! Document Publication Workflow
//!
//! This example demonstrates a configuration-driven workflow with lifecycle
//! hooks.
//!
//! Key concepts:
//! - Declarative graph (draft -> review -> published) built and validated up front
//! - Named hooks run around each transition and receive the previous state
//! - A before hook vetoes the transition when the document is not ready
//! - Soft apply reports illegality as `false` instead of an error
//!
//! Run with: cargo run --example document_workflow

use serde::{Deserialize, Serialize};
use trellis::{
    AccessError, GraphBuilder, HookOutcome, State, StateMachine, StateSubject, Workflow,
};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
enum DocState {
    Draft,
    Review,
    Published,
}

impl State for DocState {
    fn name(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Review => "review",
            Self::Published => "published",
        }
    }
}

struct Document {
    id: u64,
    state: DocState,
    word_count: usize,
}

impl StateSubject for Document {
    type State = DocState;

    fn state(&self) -> Result<DocState, AccessError> {
        Ok(self.state.clone())
    }

    fn set_state(&mut self, next: DocState) -> Result<(), AccessError> {
        self.state = next;
        Ok(())
    }

    fn identity(&self) -> String {
        format!("document#{}", self.id)
    }
}

fn main() {
    let graph = GraphBuilder::new("document")
        .states([DocState::Draft, DocState::Review, DocState::Published])
        .transition("start_review", [DocState::Draft], DocState::Review)
        .transition("publish", [DocState::Review], DocState::Published)
        .build()
        .expect("graph is valid");

    let workflow = Workflow::from_graph(graph)
        .on_before("start_review", |doc: &mut Document, _previous| {
            if doc.word_count < 100 {
                println!("  [Hook] document too short to review, vetoing");
                return HookOutcome::Veto;
            }
            HookOutcome::Proceed
        })
        .on_after("publish", |doc: &mut Document, previous| {
            println!(
                "  [Hook] document {} published (was {:?})",
                doc.id,
                previous.map(State::name)
            );
        });

    let document = Document {
        id: 7,
        state: DocState::Draft,
        word_count: 50,
    };
    let mut machine = StateMachine::new(document, workflow).expect("machine binds");

    println!("Workflow: {}", machine.graph_name());
    println!("Possible: {:?}", machine.possible_transitions().unwrap());

    // Too short: the before hook vetoes.
    let moved = machine.apply("start_review").unwrap();
    println!("start_review at 50 words -> {moved}");

    machine.subject_mut().word_count = 1200;
    let moved = machine.apply("start_review").unwrap();
    println!("start_review at 1200 words -> {moved}");
    println!("State: {:?}", machine.state().unwrap());

    let moved = machine.apply("publish").unwrap();
    println!("publish -> {moved}");

    // Already published: soft apply answers false instead of erroring.
    let moved = machine.soft_apply("start_review").unwrap();
    println!("start_review after publish (soft) -> {moved}");
    println!("Final state: {:?}", machine.state().unwrap());
}
