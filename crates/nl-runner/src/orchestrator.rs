use std::sync::{Mutex, MutexGuard, PoisonError};

use nl_client::Backend;
use nl_core::{
    render, Phase, PuzzleRequest, RunId, SolveError, WorkflowEvent, WorkflowState,
};
use tracing::{debug, info, info_span, warn, Instrument};

use crate::display::{DisplayState, Screen, Section};
use crate::presenter::{baseline_panel, neurosymbolic_panel, show_seating, PROVED_SEATING_TITLE};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    Succeeded,
    Failed(SolveError),
    /// Another solve was still running; nothing happened.
    Rejected,
}

/// Drives one solve at a time: baseline call, then neuro-symbolic call, with
/// the display and busy state kept in step.
pub struct RequestOrchestrator<B, S> {
    backend: B,
    screen: S,
    state: Mutex<WorkflowState>,
    display: Mutex<DisplayState>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Held for the length of a run. Dropping it returns the orchestrator to
/// `Idle` and re-enables the trigger, whichever way the run ended.
struct RunGuard<'a, B: Backend, S: Screen> {
    orchestrator: &'a RequestOrchestrator<B, S>,
}

impl<B: Backend, S: Screen> Drop for RunGuard<'_, B, S> {
    fn drop(&mut self) {
        self.orchestrator.release();
    }
}

impl<B: Backend, S: Screen> RequestOrchestrator<B, S> {
    pub fn new(backend: B, screen: S) -> Self {
        Self {
            backend,
            screen,
            state: Mutex::new(WorkflowState::Idle),
            display: Mutex::new(DisplayState::default()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn state(&self) -> WorkflowState {
        lock(&self.state).clone()
    }

    pub fn display(&self) -> DisplayState {
        lock(&self.display).clone()
    }

    /// Run the whole workflow for `puzzle_text`. Failures are shown on the
    /// screen and also returned.
    pub async fn solve(&self, puzzle_text: &str) -> SolveOutcome {
        let request = match PuzzleRequest::new(puzzle_text) {
            Ok(request) => request,
            Err(err) => {
                debug!("empty puzzle, nothing sent");
                self.screen.alert(&err.user_message());
                return SolveOutcome::Failed(err);
            }
        };

        let Some(guard) = self.begin() else {
            debug!("solve rejected: a run is already in progress");
            return SolveOutcome::Rejected;
        };

        let run_id = RunId::new();
        let result = self
            .run(&request)
            .instrument(info_span!("solve", %run_id))
            .await;

        let outcome = match result {
            Ok(()) => {
                self.advance(WorkflowEvent::NeuroSymbolicDone);
                info!(%run_id, "solve succeeded");
                SolveOutcome::Succeeded
            }
            Err(err) => {
                warn!(%run_id, kind = err.kind(), error = %err, "solve failed");
                self.advance(WorkflowEvent::Fail(err.to_string()));
                self.screen.alert(&err.user_message());
                SolveOutcome::Failed(err)
            }
        };

        drop(guard);
        outcome
    }

    async fn run(&self, request: &PuzzleRequest) -> Result<(), SolveError> {
        info!(phase = %Phase::Baseline, "requesting");
        let baseline = self.backend.baseline(request).await?;
        info!(
            valid = baseline.validation.valid,
            violations = baseline.validation.violations.len(),
            "baseline answered"
        );
        let panel = baseline_panel(&baseline);
        self.update(Section::Baseline, |d| d.baseline = Some(panel));

        self.advance(WorkflowEvent::BaselineDone);
        self.screen.set_busy(Some(Phase::NeuroSymbolic));

        info!(phase = %Phase::NeuroSymbolic, "requesting");
        let result = self.backend.neurosymbolic(request).await?;
        info!(
            total_solutions = result.total_solutions,
            returned = result.solutions.len(),
            "neuro-symbolic answered"
        );
        let panel = neurosymbolic_panel(&result);
        self.update(Section::NeuroSymbolic, |d| d.neurosymbolic = Some(panel));

        let slots = result.first_solution().map(render).unwrap_or_default();
        if slots.is_empty() {
            info!("no solution to seat");
        }
        let seating = show_seating(PROVED_SEATING_TITLE, &slots);
        self.update(Section::Seating, |d| d.seating = Some(seating));
        Ok(())
    }

    /// Claim the orchestrator for a new run, or `None` if one is active.
    fn begin(&self) -> Option<RunGuard<'_, B, S>> {
        {
            let mut state = lock(&self.state);
            let next = state.next(&WorkflowEvent::Start)?;
            *state = next;
        }
        let guard = RunGuard { orchestrator: self };

        self.update(Section::Cleared, |d| *d = DisplayState::default());
        self.screen.set_busy(Some(Phase::Baseline));
        Some(guard)
    }

    fn release(&self) {
        {
            let mut state = lock(&self.state);
            if !state.is_terminal() && !state.is_idle() {
                // Future dropped mid-phase.
                warn!(state = ?*state, "run abandoned before completion");
                *state = WorkflowState::Failed("abandoned".to_string());
            }
            let next = state.next(&WorkflowEvent::Reset).unwrap_or_default();
            *state = next;
        }
        self.screen.set_busy(None);
    }

    fn advance(&self, event: WorkflowEvent) {
        let mut state = lock(&self.state);
        match state.next(&event) {
            Some(next) => *state = next,
            None => warn!(state = ?*state, ?event, "ignoring illegal workflow transition"),
        }
    }

    fn update(&self, section: Section, change: impl FnOnce(&mut DisplayState)) {
        let snapshot = {
            let mut display = lock(&self.display);
            change(&mut display);
            display.clone()
        };
        self.screen.refresh(section, &snapshot);
    }
}
