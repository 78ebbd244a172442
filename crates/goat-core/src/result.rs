//! The envelope a run hands back to the host.

use std::fmt;

use crate::protocol::{PdbStatus, PLUG_IN_ERROR_DOMAIN, PLUG_IN_FAILED};

/// Structured error attached to a failed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPayload {
    pub domain: String,
    pub code: i32,
    pub message: String,
}

impl ErrorPayload {
    /// Error in the plug-in domain with the generic failure code.
    pub fn plug_in_failed(message: impl Into<String>) -> Self {
        Self {
            domain: PLUG_IN_ERROR_DOMAIN.to_string(),
            code: PLUG_IN_FAILED,
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.message, self.domain, self.code)
    }
}

/// Status plus optional error of one procedure run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct RunResult {
    pub status: PdbStatus,
    pub error: Option<ErrorPayload>,
}

impl RunResult {
    pub fn success() -> Self {
        Self {
            status: PdbStatus::Success,
            error: None,
        }
    }

    /// The user backed out. Not an error, so no payload.
    pub fn cancel() -> Self {
        Self {
            status: PdbStatus::Cancel,
            error: None,
        }
    }

    /// The caller broke a precondition.
    pub fn calling_error(message: impl Into<String>) -> Self {
        Self {
            status: PdbStatus::CallingError,
            error: Some(ErrorPayload::plug_in_failed(message)),
        }
    }

    /// A host or library call failed while running. Reported as a calling
    /// error with the whole context chain in the message.
    pub fn fault(err: &anyhow::Error) -> Self {
        Self::calling_error(format!("{err:#}"))
    }

    /// The plug-in itself is broken, e.g. its descriptors do not validate.
    pub fn execution_error(err: &anyhow::Error) -> Self {
        Self {
            status: PdbStatus::ExecutionError,
            error: Some(ErrorPayload::plug_in_failed(format!("{err:#}"))),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == PdbStatus::Success
    }

    pub fn message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }
}
