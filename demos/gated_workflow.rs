//! Gated Order Workflow
//!
//! This example demonstrates the event gate: a dispatcher consulted at the
//! `test_transition` and `pre_transition` checkpoints (where it may veto)
//! and notified at `post_transition` (observation only).
//!
//! Run with: cargo run --example gated_workflow

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use trellis::{
    AccessError, EventGate, GateCheckpoint, GraphBuilder, State, StateMachine, StateSubject,
    TransitionEvent, Workflow,
};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
enum OrderState {
    Cart,
    Placed,
    Shipped,
}

impl State for OrderState {
    fn name(&self) -> &str {
        match self {
            Self::Cart => "cart",
            Self::Placed => "placed",
            Self::Shipped => "shipped",
        }
    }
}

struct Order {
    state: OrderState,
}

impl StateSubject for Order {
    type State = OrderState;

    fn state(&self) -> Result<OrderState, AccessError> {
        Ok(self.state.clone())
    }

    fn set_state(&mut self, next: OrderState) -> Result<(), AccessError> {
        self.state = next;
        Ok(())
    }

    fn identity(&self) -> String {
        String::from("order#1001")
    }
}

/// Gate that blocks shipping until payment clears and journals everything
/// it sees. Interior mutability keeps dispatch `&self`.
struct FulfillmentGate {
    payment_cleared: Arc<Mutex<bool>>,
    journal: Arc<Mutex<Vec<String>>>,
}

impl EventGate<OrderState> for FulfillmentGate {
    fn dispatch(&self, event: &mut TransitionEvent<OrderState>) {
        self.journal.lock().unwrap().push(format!(
            "{} {} ({} -> {})",
            event.checkpoint().as_str(),
            event.transition(),
            event.current_state().name(),
            event.to().name()
        ));

        let blocking = event.transition() == "ship"
            && event.checkpoint() != GateCheckpoint::PostTransition
            && !*self.payment_cleared.lock().unwrap();
        if blocking {
            event.reject();
        }
    }
}

fn main() {
    let graph = GraphBuilder::new("order")
        .states([OrderState::Cart, OrderState::Placed, OrderState::Shipped])
        .transition("place", [OrderState::Cart], OrderState::Placed)
        .transition("ship", [OrderState::Placed], OrderState::Shipped)
        .build()
        .expect("graph is valid");

    let payment_cleared = Arc::new(Mutex::new(false));
    let journal = Arc::new(Mutex::new(Vec::new()));
    let gate = FulfillmentGate {
        payment_cleared: Arc::clone(&payment_cleared),
        journal: Arc::clone(&journal),
    };

    let order = Order {
        state: OrderState::Cart,
    };
    let mut machine = StateMachine::new(order, Workflow::from_graph(graph))
        .expect("machine binds")
        .with_gate(gate);

    println!("place -> {}", machine.apply("place").unwrap());

    // Payment has not cleared: the gate rejects the pre-check.
    println!("can ship -> {}", machine.can("ship").unwrap());
    println!("ship (soft) -> {}", machine.soft_apply("ship").unwrap());
    println!("state: {:?}", machine.state().unwrap());

    *payment_cleared.lock().unwrap() = true;
    println!("ship -> {}", machine.apply("ship").unwrap());
    println!("final state: {:?}", machine.state().unwrap());

    println!("gate journal:");
    for line in journal.lock().unwrap().iter() {
        println!("  {line}");
    }
}
