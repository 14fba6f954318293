use crate::validation::ValidationErrors;
use crate::workflow::StatusAction;
use thiserror::Error;

/// Shown when the server did not say anything useful about a failure.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// A failed remote call.
///
/// Network, validation and authorization failures reported by the server all
/// collapse into this one type; callers only distinguish them by message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", self.user_message())]
pub struct RequestError {
    message: String,
    status: Option<u16>,
}

impl RequestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }

    /// HTTP status when the failure came back from the server.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }

    /// Raw server message, possibly empty.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Never empty.
    pub fn user_message(&self) -> &str {
        let trimmed = self.message.trim();
        if trimmed.is_empty() {
            GENERIC_FAILURE
        } else {
            trimmed
        }
    }
}

/// Failure of a status transition. Illegal and in-flight attempts never
/// reach the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Cannot {action} a {entity} that is {from}")]
    Illegal {
        entity: &'static str,
        from: String,
        action: StatusAction,
    },

    #[error("A change to this {entity} is already in progress")]
    InFlight { entity: &'static str },

    #[error("The {entity} is no longer in the list")]
    NotFound { entity: &'static str },

    /// A non-status row action (delete) the current status does not allow.
    #[error("Cannot {operation} a {entity} that is {from}")]
    Forbidden {
        entity: &'static str,
        from: String,
        operation: &'static str,
    },

    /// The action's payload (a rejection reason) failed validation.
    #[error("Please fix the highlighted fields: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error(transparent)]
    Request(#[from] RequestError),
}

impl TransitionError {
    /// Message suitable for a toast or banner. Never empty.
    pub fn user_message(&self) -> String {
        match self {
            TransitionError::Request(err) => err.user_message().to_string(),
            other => other.to_string(),
        }
    }
}

/// Failure of a form submission (edit, create, upload).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Refused locally; nothing was sent.
    #[error("Please fix the highlighted fields: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("This {entity} is {status} and can no longer be edited")]
    Locked {
        entity: &'static str,
        status: String,
    },

    #[error("The {entity} is no longer in the list")]
    NotFound { entity: &'static str },

    #[error(transparent)]
    Request(#[from] RequestError),
}

impl SubmitError {
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Request(err) => err.user_message().to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_message_falls_back() {
        let err = RequestError::with_status(500, "   ");
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[test]
    fn server_message_is_preserved() {
        let err = RequestError::new("User already banned");
        assert_eq!(err.user_message(), "User already banned");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn illegal_transition_reads_naturally() {
        let err = TransitionError::Illegal {
            entity: "submission",
            from: "ACCEPTED".into(),
            action: StatusAction::Accept,
        };
        assert_eq!(err.user_message(), "Cannot accept a submission that is ACCEPTED");
    }
}
