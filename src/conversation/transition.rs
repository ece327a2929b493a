//! Pure state transition function
//!
//! Given the same state and event it always produces the same result and
//! performs no I/O. Rejected events leave the state untouched; callers
//! drop them.

use super::state::{CANCELLED_NOTICE, TIMEOUT_APOLOGY, TRANSPORT_APOLOGY};
use super::{DispatchFailure, Effect, Event, Message, SessionContext, SessionState};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Events the session ignores in its current state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionRejection {
    #[error("Input is empty or whitespace only")]
    BlankInput,
    #[error("An exchange is already outstanding (ticket {0})")]
    Busy(u64),
    #[error("Completion for ticket {0} arrived with nothing outstanding")]
    NotPending(u64),
    #[error("Completion for ticket {got} does not match outstanding ticket {expected}")]
    StaleTicket { expected: u64, got: u64 },
    #[error("Nothing to cancel")]
    NothingToCancel,
}

/// Pure transition function
pub fn transition(
    state: &SessionState,
    context: &SessionContext,
    event: Event,
) -> Result<TransitionResult, TransitionRejection> {
    match event {
        Event::DraftChanged { text } => Ok(TransitionResult::new(SessionState {
            draft: text,
            ..state.clone()
        })
        .with_effect(Effect::PublishState)),

        // ============================================================
        // Submission guards
        // ============================================================
        Event::Submit { text } if text.trim().is_empty() => Err(TransitionRejection::BlankInput),

        Event::Submit { .. } if state.pending => Err(TransitionRejection::Busy(state.ticket)),

        // Idle + Submit -> Pending
        Event::Submit { text } => {
            let ticket = state.ticket + 1;
            let new_state = SessionState {
                transcript: state.transcript.append(Message::user(text.clone())),
                pending: true,
                draft: String::new(),
                ticket,
            };
            Ok(TransitionResult::new(new_state)
                .with_effect(Effect::PublishState)
                .with_effect(Effect::dispatch(ticket, text, context.context.clone())))
        }

        // ============================================================
        // Dispatch completion
        // ============================================================
        Event::DispatchSucceeded { ticket, response } => {
            check_outstanding(state, ticket)?;
            Ok(settle(state, Message::assistant(response)))
        }

        Event::DispatchFailed { ticket, failure } => {
            check_outstanding(state, ticket)?;
            Ok(settle(state, Message::assistant(apology_for(failure))))
        }

        // ============================================================
        // Cancellation
        // ============================================================
        Event::Cancel if state.pending => {
            let ticket = state.ticket;
            Ok(settle(state, Message::assistant(CANCELLED_NOTICE))
                .with_effect(Effect::AbortDispatch { ticket }))
        }

        Event::Cancel => Err(TransitionRejection::NothingToCancel),
    }
}

/// Fixed user-facing text for a failed exchange
pub fn apology_for(failure: DispatchFailure) -> &'static str {
    match failure {
        DispatchFailure::TimedOut => TIMEOUT_APOLOGY,
        DispatchFailure::Network
        | DispatchFailure::Status(_)
        | DispatchFailure::MalformedReply => TRANSPORT_APOLOGY,
    }
}

fn check_outstanding(state: &SessionState, ticket: u64) -> Result<(), TransitionRejection> {
    match state.outstanding() {
        None => Err(TransitionRejection::NotPending(ticket)),
        Some(expected) if expected != ticket => Err(TransitionRejection::StaleTicket {
            expected,
            got: ticket,
        }),
        Some(_) => Ok(()),
    }
}

/// Append the assistant turn that closes the outstanding exchange and
/// clear the pending flag last.
fn settle(state: &SessionState, reply: Message) -> TransitionResult {
    let transcript = state.transcript.append(reply);
    TransitionResult::new(SessionState {
        transcript,
        draft: state.draft.clone(),
        ticket: state.ticket,
        pending: false,
    })
    .with_effect(Effect::PublishState)
}
