use nl_core::Phase;
use serde::Serialize;

use crate::presenter::{BaselinePanel, NeuroSymbolicPanel, SeatingPanel};

/// Which part of the display just changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Cleared,
    Baseline,
    NeuroSymbolic,
    Seating,
}

/// Everything currently on screen. Owned by the orchestrator; screens only
/// ever see snapshots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    pub baseline: Option<BaselinePanel>,
    pub neurosymbolic: Option<NeuroSymbolicPanel>,
    pub seating: Option<SeatingPanel>,
}

impl DisplayState {
    pub fn is_blank(&self) -> bool {
        self == &Self::default()
    }
}

/// The UI the orchestrator drives.
pub trait Screen: Send + Sync {
    /// `Some` disables the solve trigger and shows the phase's status line;
    /// `None` re-enables it.
    fn set_busy(&self, phase: Option<Phase>);

    fn refresh(&self, section: Section, display: &DisplayState);

    /// Blocking notification for the user.
    fn alert(&self, message: &str);
}
