//! Property-based tests for the conversation state machine
//!
//! Random event sequences are folded through `transition`, applying only
//! accepted results, and the transcript invariants are checked after
//! every step.

use super::state::{CANCELLED_NOTICE, TIMEOUT_APOLOGY, TRANSPORT_APOLOGY};
use super::*;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> SessionContext {
    SessionContext::new("prop-session", "Moon in Cancer")
}

/// Event shapes before tickets are bound to the state they are applied to
#[derive(Debug, Clone)]
enum Step {
    Submit(String),
    Draft(String),
    Cancel,
    Succeed { stale: bool, response: String },
    Fail { stale: bool, failure: DispatchFailure },
}

impl Step {
    fn into_event(self, state: &SessionState) -> Event {
        let ticket_for = |stale: bool| {
            if stale {
                state.ticket.saturating_sub(1)
            } else {
                state.ticket
            }
        };
        match self {
            Step::Submit(text) => Event::Submit { text },
            Step::Draft(text) => Event::DraftChanged { text },
            Step::Cancel => Event::Cancel,
            Step::Succeed { stale, response } => Event::DispatchSucceeded {
                ticket: ticket_for(stale),
                response,
            },
            Step::Fail { stale, failure } => Event::DispatchFailed {
                ticket: ticket_for(stale),
                failure,
            },
        }
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_failure() -> impl Strategy<Value = DispatchFailure> {
    prop_oneof![
        Just(DispatchFailure::Network),
        (400u16..600).prop_map(DispatchFailure::Status),
        Just(DispatchFailure::MalformedReply),
        Just(DispatchFailure::TimedOut),
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ \t\n]{1,4}",
        "[a-zA-Z ?]{1,30}",
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => arb_text().prop_map(Step::Submit),
        1 => arb_text().prop_map(Step::Draft),
        1 => Just(Step::Cancel),
        2 => (any::<bool>(), "[a-zA-Z .]{0,40}")
            .prop_map(|(stale, response)| Step::Succeed { stale, response }),
        2 => (any::<bool>(), arb_failure())
            .prop_map(|(stale, failure)| Step::Fail { stale, failure }),
    ]
}

fn count(state: &SessionState, role: Role) -> usize {
    state.transcript.iter().filter(|m| m.role == role).count()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn transcript_only_grows_and_keeps_its_prefix(
        steps in proptest::collection::vec(arb_step(), 0..40)
    ) {
        let ctx = test_context();
        let mut state = SessionState::new();

        for step in steps {
            let event = step.into_event(&state);
            if let Ok(result) = transition(&state, &ctx, event) {
                let before = state.transcript.len();
                prop_assert!(result.new_state.transcript.len() >= before);
                prop_assert_eq!(
                    result.new_state.transcript.since(0).get(..before),
                    state.transcript.since(0).get(..before)
                );
                state = result.new_state;
            }
        }
    }

    #[test]
    fn every_user_turn_pairs_with_exactly_one_reply(
        steps in proptest::collection::vec(arb_step(), 0..40)
    ) {
        let ctx = test_context();
        let mut state = SessionState::new();

        for step in steps {
            let event = step.into_event(&state);
            if let Ok(result) = transition(&state, &ctx, event) {
                state = result.new_state;
            }

            let users = count(&state, Role::User);
            let replies = count(&state, Role::Assistant) - 1; // greeting
            if state.pending {
                prop_assert_eq!(users, replies + 1);
                prop_assert_eq!(state.transcript.last().map(|m| m.role), Some(Role::User));
            } else {
                prop_assert_eq!(users, replies);
                prop_assert_eq!(
                    state.transcript.last().map(|m| m.role),
                    Some(Role::Assistant)
                );
            }
        }
    }

    #[test]
    fn at_most_one_dispatch_is_ever_outstanding(
        steps in proptest::collection::vec(arb_step(), 0..40)
    ) {
        let ctx = test_context();
        let mut state = SessionState::new();

        for step in steps {
            let was_pending = state.pending;
            let event = step.into_event(&state);
            let Ok(result) = transition(&state, &ctx, event) else {
                continue;
            };

            let dispatches: Vec<_> = result
                .effects
                .iter()
                .filter_map(|e| match e {
                    Effect::Dispatch { ticket, .. } => Some(*ticket),
                    _ => None,
                })
                .collect();

            if was_pending {
                prop_assert!(dispatches.is_empty());
            }
            prop_assert!(dispatches.len() <= 1);
            if let Some(ticket) = dispatches.first() {
                prop_assert_eq!(*ticket, state.ticket + 1);
                prop_assert_eq!(result.new_state.outstanding(), Some(*ticket));
            }
            state = result.new_state;
        }
    }

    #[test]
    fn failure_replies_are_always_fixed_text(
        failure in arb_failure(),
        text in "[a-zA-Z]{1,20}"
    ) {
        let ctx = test_context();
        let pending = transition(&SessionState::new(), &ctx, Event::Submit { text })
            .unwrap()
            .new_state;
        let settled = transition(
            &pending,
            &ctx,
            Event::DispatchFailed { ticket: pending.ticket, failure },
        )
        .unwrap()
        .new_state;

        let reply = settled.transcript.last().unwrap();
        prop_assert_eq!(reply.role, Role::Assistant);
        prop_assert!(
            reply.content == TRANSPORT_APOLOGY || reply.content == TIMEOUT_APOLOGY
        );
        prop_assert_ne!(reply.content.as_str(), CANCELLED_NOTICE);
        prop_assert!(!settled.pending);
    }

    #[test]
    fn rejected_events_produce_no_effects_to_apply(
        text in "[ \t]{0,5}"
    ) {
        let ctx = test_context();
        let state = SessionState::new();
        let rejected = transition(&state, &ctx, Event::Submit { text }).is_err();
        prop_assert!(rejected);
        prop_assert_eq!(state, SessionState::new());
    }
}
