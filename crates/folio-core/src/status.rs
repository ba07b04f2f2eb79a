//! Request status: the store-wide progress of the latest remote operation.
//!
//! ```text
//!            pending                 settle
//!   idle ───────────► loading ─────────────► succeeded | failed
//!    ▲                  ▲                          │
//!    │                  └──────── pending ─────────┤
//!    └──────────────────── reset ──────────────────┘
//! ```
//!
//! There is no terminal state. A new outcome overwrites the previous one;
//! nothing is queued.

use crate::error::RemoteError;

/// Progress of the most recent remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl RequestStatus {
    /// True once an operation has settled and not yet been dismissed.
    pub fn is_settled(self) -> bool {
        matches!(self, RequestStatus::Succeeded | RequestStatus::Failed)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Idle => write!(f, "idle"),
            RequestStatus::Loading => write!(f, "loading"),
            RequestStatus::Succeeded => write!(f, "succeeded"),
            RequestStatus::Failed => write!(f, "failed"),
        }
    }
}

/// The status together with its message and last error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusState {
    status: RequestStatus,
    message: Option<String>,
    error: Option<RemoteError>,
}

impl StatusState {
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn error(&self) -> Option<&RemoteError> {
        self.error.as_ref()
    }

    /// An operation started. Message and error from the last settlement stay
    /// visible until the new one lands.
    pub fn begin(&mut self) {
        self.transition(RequestStatus::Loading);
    }

    /// An operation settled successfully. Clears any earlier error.
    pub fn succeed(&mut self, message: Option<String>) {
        self.transition(RequestStatus::Succeeded);
        self.message = message;
        self.error = None;
    }

    /// An operation was rejected. Clears any earlier confirmation message.
    pub fn fail(&mut self, error: RemoteError) {
        self.transition(RequestStatus::Failed);
        self.message = None;
        self.error = Some(error);
    }

    /// Dismiss the current notification.
    pub fn reset(&mut self) {
        self.transition(RequestStatus::Idle);
        self.message = None;
        self.error = None;
    }

    fn transition(&mut self, to: RequestStatus) {
        if self.status != to {
            tracing::debug!(from = %self.status, to = %to, "request status");
        }
        self.status = to;
    }
}
