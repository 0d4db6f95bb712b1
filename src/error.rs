use crate::model::{ReportId, Status};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriageError {
    #[error("report {0} not found")]
    NotFound(ReportId),

    #[error("report {id}: cannot move from {from} to {to}")]
    InvalidTransition {
        id: ReportId,
        from: Status,
        to: Status,
    },

    #[error("report {0}: resolution time is earlier than creation time")]
    ResolvedBeforeCreated(ReportId),
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("parsing report fixture")]
    Parse(#[from] serde_json::Error),

    #[error("report id must be positive (found 0 at position {index})")]
    ZeroId { index: usize },

    #[error("duplicate report id {0}")]
    DuplicateId(ReportId),

    #[error("report {0}: resolvedAt is earlier than createdAt")]
    ResolvedBeforeCreated(ReportId),

    #[error("report {id}: AI verification score {score} is outside [0, 1]")]
    ScoreOutOfRange { id: ReportId, score: f64 },

    #[error("invalid contact pattern")]
    Pattern(#[from] regex::Error),

    #[error("report {id}: invalid {field} {value:?}")]
    Contact {
        id: ReportId,
        field: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseValueError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
