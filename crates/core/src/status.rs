//! Remote run lifecycle states.
//!
//! The remote job service reports a `life_cycle_state` string for every
//! run. Only [`LifeCycleState::is_terminal`] states end polling; every other
//! value, including ones this crate does not know about, keeps the poller
//! waiting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a remote run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LifeCycleState {
    Queued,
    Pending,
    Running,
    Terminating,
    Blocked,
    WaitingForRetry,
    /// The run finished; its `result_state` says how.
    Terminated,
    /// The run was skipped (e.g. a concurrent run limit was hit).
    Skipped,
    /// The job service itself failed the run.
    InternalError,
    /// Any state string not listed above.
    Unknown,
}

impl LifeCycleState {
    /// Terminal states: no further progress will occur.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Terminated | Self::Skipped | Self::InternalError)
    }

    /// Wire name, e.g. `"INTERNAL_ERROR"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "QUEUED",
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Terminating => "TERMINATING",
            Self::Blocked => "BLOCKED",
            Self::WaitingForRetry => "WAITING_FOR_RETRY",
            Self::Terminated => "TERMINATED",
            Self::Skipped => "SKIPPED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Parse a wire name. Unrecognised names map to [`Self::Unknown`].
    pub fn from_wire(name: &str) -> Self {
        match name {
            "QUEUED" => Self::Queued,
            "PENDING" => Self::Pending,
            "RUNNING" => Self::Running,
            "TERMINATING" => Self::Terminating,
            "BLOCKED" => Self::Blocked,
            "WAITING_FOR_RETRY" => Self::WaitingForRetry,
            "TERMINATED" => Self::Terminated,
            "SKIPPED" => Self::Skipped,
            "INTERNAL_ERROR" => Self::InternalError,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for LifeCycleState {
    fn from(name: String) -> Self {
        Self::from_wire(&name)
    }
}

impl From<LifeCycleState> for String {
    fn from(state: LifeCycleState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for LifeCycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `state` object of a run status response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub life_cycle_state: LifeCycleState,
    /// Outcome once terminated, e.g. `SUCCESS` or `FAILED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_state: Option<String>,
    /// Human-readable note from the job service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_message: Option<String>,
}

impl RunState {
    pub fn new(life_cycle_state: LifeCycleState) -> Self {
        Self {
            life_cycle_state,
            result_state: None,
            state_message: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.life_cycle_state.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [LifeCycleState; 10] = [
        LifeCycleState::Queued,
        LifeCycleState::Pending,
        LifeCycleState::Running,
        LifeCycleState::Terminating,
        LifeCycleState::Blocked,
        LifeCycleState::WaitingForRetry,
        LifeCycleState::Terminated,
        LifeCycleState::Skipped,
        LifeCycleState::InternalError,
        LifeCycleState::Unknown,
    ];

    #[test]
    fn exactly_three_states_are_terminal() {
        let terminal: Vec<_> = ALL.iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(
            terminal,
            [
                &LifeCycleState::Terminated,
                &LifeCycleState::Skipped,
                &LifeCycleState::InternalError
            ]
        );
    }

    #[test]
    fn wire_names_map_back_to_the_same_state() {
        for state in ALL {
            assert_eq!(LifeCycleState::from_wire(state.as_str()), state);
        }
    }

    #[test]
    fn unrecognised_state_is_unknown_and_not_terminal() {
        let state: LifeCycleState = serde_json::from_str(r#""SOMETHING_NEW""#).unwrap();
        assert_eq!(state, LifeCycleState::Unknown);
        assert!(!state.is_terminal());
    }

    #[test]
    fn run_state_deserializes_optional_fields() {
        let json = r#"{"life_cycle_state":"TERMINATED","result_state":"SUCCESS"}"#;
        let state: RunState = serde_json::from_str(json).unwrap();
        assert!(state.is_terminal());
        assert_eq!(state.result_state.as_deref(), Some("SUCCESS"));
        assert!(state.state_message.is_none());
    }
}
