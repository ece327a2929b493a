//! Effects produced by state transitions

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start one exchange with the remote responder
    Dispatch {
        ticket: u64,
        query: String,
        context: String,
    },

    /// Abort the outstanding exchange, if it is still running
    AbortDispatch { ticket: u64 },

    /// Publish the new state to observers
    PublishState,
}

impl Effect {
    pub fn dispatch(ticket: u64, query: impl Into<String>, context: impl Into<String>) -> Self {
        Effect::Dispatch {
            ticket,
            query: query.into(),
            context: context.into(),
        }
    }
}
