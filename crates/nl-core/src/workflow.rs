use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend routes the client talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Health,
    Baseline,
    NeuroSymbolic,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Health => "/",
            Endpoint::Baseline => "/baseline",
            Endpoint::NeuroSymbolic => "/neurosymbolic",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::Health => "health",
            Endpoint::Baseline => "baseline",
            Endpoint::NeuroSymbolic => "neuro-symbolic",
        };
        f.write_str(name)
    }
}

/// The two network phases of a solve, in the order they run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Baseline,
    NeuroSymbolic,
}

impl Phase {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Phase::Baseline => Endpoint::Baseline,
            Phase::NeuroSymbolic => Endpoint::NeuroSymbolic,
        }
    }

    /// Status line shown while the phase is in flight.
    pub fn busy_message(&self) -> &'static str {
        match self {
            Phase::Baseline => "LLM is thinking intuitively...",
            Phase::NeuroSymbolic => "Formalizing logic & solving...",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.endpoint(), f)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    #[default]
    Idle,
    Running(Phase),
    Succeeded,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkflowEvent {
    Start,
    BaselineDone,
    NeuroSymbolicDone,
    Fail(String),
    Reset,
}

impl WorkflowState {
    pub fn is_idle(&self) -> bool {
        matches!(self, WorkflowState::Idle)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowState::Succeeded | WorkflowState::Failed(_))
    }

    pub fn phase(&self) -> Option<Phase> {
        match self {
            WorkflowState::Running(phase) => Some(*phase),
            _ => None,
        }
    }

    /// Pure transition table. `None` means the event is not legal in this state.
    pub fn next(&self, event: &WorkflowEvent) -> Option<WorkflowState> {
        use WorkflowEvent as E;
        use WorkflowState as S;

        match (self, event) {
            (S::Idle, E::Start) => Some(S::Running(Phase::Baseline)),
            (S::Running(Phase::Baseline), E::BaselineDone) => {
                Some(S::Running(Phase::NeuroSymbolic))
            }
            (S::Running(Phase::NeuroSymbolic), E::NeuroSymbolicDone) => Some(S::Succeeded),
            (S::Running(_), E::Fail(reason)) => Some(S::Failed(reason.clone())),
            (S::Succeeded | S::Failed(_), E::Reset) => Some(S::Idle),
            _ => None,
        }
    }
}
