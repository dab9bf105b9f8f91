//! Property-based tests for the state machine engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use trellis::{
    studly_case, AccessError, GraphBuilder, State, StateMachine, StateSubject, TransitionGraph,
    Workflow,
};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
enum DocState {
    Draft,
    Review,
    Published,
    Archived,
}

impl State for DocState {
    fn name(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Review => "review",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

struct Document {
    state: DocState,
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
}

fn graph() -> TransitionGraph<DocState> {
    GraphBuilder::new("document")
        .states([
            DocState::Draft,
            DocState::Review,
            DocState::Published,
            DocState::Archived,
        ])
        .transition("submit", [DocState::Draft], DocState::Review)
        .transition("reject", [DocState::Review], DocState::Draft)
        .transition("publish", [DocState::Review], DocState::Published)
        .transition(
            "archive",
            [DocState::Draft, DocState::Review, DocState::Published],
            DocState::Archived,
        )
        .build()
        .unwrap()
}

fn machine(initial: DocState) -> StateMachine<Document> {
    StateMachine::new(Document { state: initial }, Workflow::from_graph(graph())).unwrap()
}

prop_compose! {
    fn arbitrary_state()(variant in 0..4u8) -> DocState {
        match variant {
            0 => DocState::Draft,
            1 => DocState::Review,
            2 => DocState::Published,
            _ => DocState::Archived,
        }
    }
}

prop_compose! {
    fn transition_name()(idx in 0..4usize) -> &'static str {
        ["submit", "reject", "publish", "archive"][idx]
    }
}

proptest! {
    #[test]
    fn studly_case_strips_separators(name in "[a-z_-]{0,24}") {
        let out = studly_case(&name);
        prop_assert!(!out.contains('_'));
        prop_assert!(!out.contains('-'));
    }

    #[test]
    fn studly_case_concatenates_capitalized_words(
        words in prop::collection::vec("[a-z]{1,8}", 1..5)
    ) {
        let name = words.join("_");
        let expected: String = words
            .iter()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect();
        prop_assert_eq!(studly_case(&name), expected);
    }

    #[test]
    fn can_never_mutates_state(
        initial in arbitrary_state(),
        checks in prop::collection::vec(transition_name(), 1..20)
    ) {
        let machine = machine(initial.clone());
        let first: Vec<bool> = checks.iter().map(|t| machine.can(t).unwrap()).collect();
        let second: Vec<bool> = checks.iter().map(|t| machine.can(t).unwrap()).collect();
        prop_assert_eq!(first, second);
        prop_assert_eq!(machine.state().unwrap(), initial);
    }

    #[test]
    fn possible_transitions_match_can(initial in arbitrary_state()) {
        let machine = machine(initial);
        let graph = graph();
        let expected: Vec<&str> = graph
            .transition_names()
            .filter(|t| machine.can(t).unwrap())
            .collect();
        prop_assert_eq!(machine.possible_transitions().unwrap(), expected);
    }

    #[test]
    fn state_stays_within_graph(
        initial in arbitrary_state(),
        applies in prop::collection::vec(transition_name(), 0..20)
    ) {
        let mut machine = machine(initial);
        let graph = graph();
        for name in applies {
            let before = machine.state().unwrap();
            let applied = machine.soft_apply(name).unwrap();
            let after = machine.state().unwrap();
            prop_assert!(graph.has_state(&after));
            if applied {
                let def = graph.transition(name).unwrap();
                prop_assert!(def.allows_from(&before));
                prop_assert_eq!(&after, def.to());
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }
}
