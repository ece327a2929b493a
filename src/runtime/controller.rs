//! Conversation controller

use crate::conversation::{transition, Effect, Event, SessionContext, SessionState};
use crate::dispatcher::RequestDispatcher;
use crate::responder::Responder;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

const EVENT_CHANNEL_CAPACITY: usize = 32;

/// The session's event loop has stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Session has ended")]
pub struct SessionClosed;

/// Cancellation handle for the outstanding dispatch
struct InFlight {
    ticket: u64,
    cancel: CancellationToken,
}

/// Drives one conversation: every mutation goes through [`transition`],
/// one event at a time.
pub struct ConversationController<R: Responder + 'static> {
    context: SessionContext,
    state: SessionState,
    dispatcher: RequestDispatcher<R>,
    event_rx: mpsc::Receiver<Event>,
    /// Completions reported by dispatch tasks
    completion_tx: mpsc::Sender<Event>,
    completion_rx: mpsc::Receiver<Event>,
    state_tx: watch::Sender<SessionState>,
    in_flight: Option<InFlight>,
}

/// Caller-side handle: feeds UI events in and observes published state
#[derive(Clone)]
pub struct SessionHandle {
    event_tx: mpsc::Sender<Event>,
    state_rx: watch::Receiver<SessionState>,
}

impl<R: Responder + 'static> ConversationController<R> {
    /// Mount a fresh session seeded with the greeting
    pub fn new(context: SessionContext, dispatcher: RequestDispatcher<R>) -> (Self, SessionHandle) {
        let state = SessionState::new();
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (completion_tx, completion_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (state_tx, state_rx) = watch::channel(state.clone());

        let controller = Self {
            context,
            state,
            dispatcher,
            event_rx,
            completion_tx,
            completion_rx,
            state_tx,
            in_flight: None,
        };
        (controller, SessionHandle { event_tx, state_rx })
    }

    /// Process events until every [`SessionHandle`] is dropped
    pub async fn run(mut self) {
        tracing::info!(session_id = %self.context.session_id, "Starting conversation session");

        loop {
            tokio::select! {
                Some(event) = self.completion_rx.recv() => self.process_event(event),
                event = self.event_rx.recv() => match event {
                    Some(event) => self.process_event(event),
                    None => break,
                },
            }
        }

        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel.cancel();
        }
        tracing::info!(session_id = %self.context.session_id, "Conversation session stopped");
    }

    fn process_event(&mut self, event: Event) {
        let completes = matches!(
            event,
            Event::DispatchSucceeded { .. } | Event::DispatchFailed { .. }
        );

        let result = match transition(&self.state, &self.context, event) {
            Ok(r) => r,
            Err(rejection) => {
                tracing::debug!(
                    session_id = %self.context.session_id,
                    reason = %rejection,
                    "Event ignored"
                );
                return;
            }
        };

        self.state = result.new_state;
        if completes {
            self.in_flight = None;
        }

        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::PublishState => {
                self.state_tx.send_replace(self.state.clone());
            }

            Effect::Dispatch {
                ticket,
                query,
                context,
            } => {
                tracing::debug!(session_id = %self.context.session_id, ticket, "Dispatching query");
                let cancel = CancellationToken::new();
                self.in_flight = Some(InFlight {
                    ticket,
                    cancel: cancel.clone(),
                });

                let dispatcher = self.dispatcher.clone();
                let completion_tx = self.completion_tx.clone();
                tokio::spawn(async move {
                    if let Some(outcome) = dispatcher
                        .send_cancellable(&query, &context, &cancel)
                        .await
                    {
                        // Receiver gone means the session ended
                        let _ = completion_tx.send(outcome.into_event(ticket)).await;
                    }
                });
            }

            Effect::AbortDispatch { ticket } => match self.in_flight.take() {
                Some(in_flight) if in_flight.ticket == ticket => {
                    tracing::info!(session_id = %self.context.session_id, ticket, "Aborting dispatch");
                    in_flight.cancel.cancel();
                }
                other => self.in_flight = other,
            },
        }
    }
}

impl SessionHandle {
    /// Submit a user turn; ignored when blank or while a reply is pending
    pub async fn submit(&self, text: impl Into<String>) -> Result<(), SessionClosed> {
        self.send(Event::Submit { text: text.into() }).await
    }

    pub async fn set_draft(&self, text: impl Into<String>) -> Result<(), SessionClosed> {
        self.send(Event::DraftChanged { text: text.into() }).await
    }

    /// Withdraw the outstanding question, if any
    pub async fn cancel(&self) -> Result<(), SessionClosed> {
        self.send(Event::Cancel).await
    }

    /// Latest published state
    pub fn snapshot(&self) -> SessionState {
        self.state_rx.borrow().clone()
    }

    /// Wait for the next published state
    pub async fn changed(&mut self) -> Result<SessionState, SessionClosed> {
        self.state_rx.changed().await.map_err(|_| SessionClosed)?;
        Ok(self.state_rx.borrow_and_update().clone())
    }

    /// Wait until the published state satisfies `predicate`
    pub async fn wait_for(
        &mut self,
        predicate: impl FnMut(&SessionState) -> bool,
    ) -> Result<SessionState, SessionClosed> {
        let state = self
            .state_rx
            .wait_for(predicate)
            .await
            .map_err(|_| SessionClosed)?;
        Ok(state.clone())
    }

    async fn send(&self, event: Event) -> Result<(), SessionClosed> {
        self.event_tx.send(event).await.map_err(|_| SessionClosed)
    }
}
