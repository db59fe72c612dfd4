//! Run module - lifecycle of a remote assistant run

use std::fmt;

/// Status of a run as reported by the service
///
/// Runs start `queued`, move through `in_progress` and end in one of the
/// terminal states. Only `failed`, `cancelled` and `expired` are treated as
/// failures; any status we do not model explicitly is kept in `Other` and
/// treated as still running.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// Waiting to be picked up
    Queued,

    /// Executing
    InProgress,

    /// Waiting on tool outputs from the caller
    RequiresAction,

    /// Cancellation requested but not finished
    Cancelling,

    /// Finished successfully
    Completed,

    /// Finished with an error
    Failed,

    /// Cancelled
    Cancelled,

    /// Ran out of time on the service side
    Expired,

    /// Ended early (e.g. token limits)
    Incomplete,

    /// Any status string this crate does not know about
    Other(String),
}

impl RunStatus {
    /// Parse a status string; never fails
    pub fn parse(s: &str) -> Self {
        match s {
            "queued" => RunStatus::Queued,
            "in_progress" => RunStatus::InProgress,
            "requires_action" => RunStatus::RequiresAction,
            "cancelling" => RunStatus::Cancelling,
            "completed" => RunStatus::Completed,
            "failed" => RunStatus::Failed,
            "cancelled" => RunStatus::Cancelled,
            "expired" => RunStatus::Expired,
            "incomplete" => RunStatus::Incomplete,
            other => RunStatus::Other(other.to_string()),
        }
    }

    /// Wire representation of the status
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Expired => "expired",
            RunStatus::Incomplete => "incomplete",
            RunStatus::Other(s) => s,
        }
    }

    /// `failed`, `cancelled` or `expired`
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired
        )
    }

    /// No further transition happens from this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed) || self.is_failure()
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observation of a run's status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSnapshot {
    /// Decoded status
    pub status: RunStatus,

    /// Raw response payload, kept for failure reports
    pub payload: String,
}

impl RunSnapshot {
    /// Create a snapshot
    pub fn new(status: RunStatus, payload: impl Into<String>) -> Self {
        Self {
            status,
            payload: payload.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip_known_statuses() {
        for s in [
            "queued",
            "in_progress",
            "requires_action",
            "cancelling",
            "completed",
            "failed",
            "cancelled",
            "expired",
            "incomplete",
        ] {
            assert_eq!(RunStatus::parse(s).as_str(), s);
        }
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let status = RunStatus::parse("paused");
        assert_eq!(status, RunStatus::Other("paused".to_string()));
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_terminal_states() {
        assert!(RunStatus::Completed.is_terminal());
        assert!(!RunStatus::Completed.is_failure());
        assert!(RunStatus::Failed.is_failure());
        assert!(RunStatus::Cancelled.is_failure());
        assert!(RunStatus::Expired.is_failure());
        assert!(!RunStatus::Queued.is_terminal());
        assert!(!RunStatus::InProgress.is_terminal());
        assert!(!RunStatus::Incomplete.is_terminal());
    }
}
