#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use nl_client::Backend;
use nl_core::{
    BaselineResult, Endpoint, NeuroSymbolicResult, Phase, PuzzleRequest, SolveError, Solution,
    Validation,
};
use nl_runner::{DisplayState, Screen, Section};
use tokio::sync::Notify;

/// Scripted backend that records every call it receives.
#[derive(Clone)]
pub struct FakeBackend {
    calls: Arc<Mutex<Vec<(Endpoint, String)>>>,
    baseline: Result<BaselineResult, SolveError>,
    neurosymbolic: Result<NeuroSymbolicResult, SolveError>,
    baseline_gate: Option<Arc<Notify>>,
}

impl FakeBackend {
    pub fn ok() -> Self {
        Self {
            calls: Arc::default(),
            baseline: Ok(baseline_result(Validation::failed(vec![
                "Alice cannot be at seat 1".into(),
            ]))),
            neurosymbolic: Ok(neuro_result(
                2,
                vec![Solution::new([("Alice", 2), ("Bob", 3), ("Carol", 1)]).unwrap()],
            )),
            baseline_gate: None,
        }
    }

    pub fn with_baseline(mut self, result: Result<BaselineResult, SolveError>) -> Self {
        self.baseline = result;
        self
    }

    pub fn with_neurosymbolic(mut self, result: Result<NeuroSymbolicResult, SolveError>) -> Self {
        self.neurosymbolic = result;
        self
    }

    /// Make the baseline call wait until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.baseline_gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<(Endpoint, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.calls().into_iter().map(|(e, _)| e).collect()
    }

    fn record(&self, endpoint: Endpoint, request: &PuzzleRequest) {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint, request.puzzle().to_string()));
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn baseline(&self, request: &PuzzleRequest) -> Result<BaselineResult, SolveError> {
        self.record(Endpoint::Baseline, request);
        if let Some(gate) = &self.baseline_gate {
            gate.notified().await;
        }
        self.baseline.clone()
    }

    async fn neurosymbolic(
        &self,
        request: &PuzzleRequest,
    ) -> Result<NeuroSymbolicResult, SolveError> {
        self.record(Endpoint::NeuroSymbolic, request);
        self.neurosymbolic.clone()
    }

    async fn health(&self) -> Result<String, SolveError> {
        Ok("ok".into())
    }
}

pub fn baseline_result(validation: Validation) -> BaselineResult {
    BaselineResult {
        raw_response: "Final Seating Order:\nSeat 1: Alice\nSeat 2: Carol\nSeat 3: Bob".into(),
        validation,
        model: Some("baseline_llm".into()),
        structured_representation: None,
    }
}

pub fn neuro_result(total: u64, solutions: Vec<Solution>) -> NeuroSymbolicResult {
    NeuroSymbolicResult {
        structured_representation: serde_json::json!({ "people": ["Alice", "Bob", "Carol"] }),
        total_solutions: total,
        solutions,
        model: Some("neuro_symbolic".into()),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScreenEvent {
    Busy(Option<Phase>),
    Refresh(Section, DisplayState),
    Alert(String),
}

#[derive(Clone, Default)]
pub struct RecordingScreen {
    events: Arc<Mutex<Vec<ScreenEvent>>>,
}

impl RecordingScreen {
    pub fn events(&self) -> Vec<ScreenEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ScreenEvent::Alert(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn busy(&self) -> Vec<Option<Phase>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ScreenEvent::Busy(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn sections(&self) -> Vec<Section> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ScreenEvent::Refresh(s, _) => Some(s),
                _ => None,
            })
            .collect()
    }
}

impl Screen for RecordingScreen {
    fn set_busy(&self, phase: Option<Phase>) {
        self.events.lock().unwrap().push(ScreenEvent::Busy(phase));
    }

    fn refresh(&self, section: Section, display: &DisplayState) {
        self.events
            .lock()
            .unwrap()
            .push(ScreenEvent::Refresh(section, display.clone()));
    }

    fn alert(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(ScreenEvent::Alert(message.to_string()));
    }
}
