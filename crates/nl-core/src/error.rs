use thiserror::Error;

use crate::workflow::Endpoint;

pub const COLD_START_HINT: &str =
    "Render may be waking up (cold start). Try again in 10-20 seconds.";

/// Everything that can end a solve invocation early.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    #[error("puzzle description is empty")]
    EmptyInput,
    #[error("{endpoint} request failed: {detail}")]
    Network { endpoint: Endpoint, detail: String },
    #[error("{endpoint} request returned HTTP {status}")]
    HttpStatus { endpoint: Endpoint, status: u16 },
    #[error("{endpoint} response was malformed: {detail}")]
    MalformedResponse { endpoint: Endpoint, detail: String },
}

impl SolveError {
    /// Stable short name, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            SolveError::EmptyInput => "empty_input",
            SolveError::Network { .. } => "network",
            SolveError::HttpStatus { .. } => "http_status",
            SolveError::MalformedResponse { .. } => "malformed_response",
        }
    }

    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            SolveError::EmptyInput => None,
            SolveError::Network { endpoint, .. }
            | SolveError::HttpStatus { endpoint, .. }
            | SolveError::MalformedResponse { endpoint, .. } => Some(*endpoint),
        }
    }

    /// Text for the blocking notification shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            SolveError::EmptyInput => "Please enter a puzzle description.".to_string(),
            SolveError::Network { endpoint, detail } => format!(
                "Backend connection failed during the {endpoint} step. {COLD_START_HINT}\n({detail})"
            ),
            SolveError::HttpStatus { endpoint, status } => format!(
                "The backend answered the {endpoint} step with HTTP {status}. Try again shortly."
            ),
            SolveError::MalformedResponse { endpoint, detail } => format!(
                "The backend sent an unexpected {endpoint} response: {detail}"
            ),
        }
    }
}

/// A seat assignment that breaks the solution invariants.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SolutionError {
    #[error("seat {seat} for {person} is outside 1..={max}")]
    SeatOutOfRange { person: String, seat: i64, max: u32 },
    #[error("seat {seat} is assigned to both {first} and {second}")]
    DuplicateSeat {
        seat: u32,
        first: String,
        second: String,
    },
}
