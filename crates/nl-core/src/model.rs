use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{SolutionError, SolveError};

/// Largest seat number a solution may use. Bounds the rendered layout.
pub const MAX_SEAT: u32 = 10_000;

/// Body of both solver requests. Construction rejects blank text, so holding
/// one means the request may go out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PuzzleRequest {
    puzzle: String,
}

impl PuzzleRequest {
    pub fn new(puzzle: impl Into<String>) -> Result<Self, SolveError> {
        let puzzle = puzzle.into();
        if puzzle.trim().is_empty() {
            return Err(SolveError::EmptyInput);
        }
        Ok(Self { puzzle })
    }

    pub fn puzzle(&self) -> &str {
        &self.puzzle
    }
}

/// Post-hoc check of the baseline answer against the formalized constraints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawValidation")]
pub struct Validation {
    pub valid: bool,
    pub violations: Vec<String>,
    /// Seating the backend parsed out of the baseline text, if it reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_solution: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct RawValidation {
    valid: bool,
    violations: Vec<String>,
    #[serde(default)]
    baseline_solution: Option<serde_json::Value>,
}

impl TryFrom<RawValidation> for Validation {
    type Error = String;

    fn try_from(raw: RawValidation) -> Result<Self, Self::Error> {
        if raw.valid && !raw.violations.is_empty() {
            return Err(format!(
                "validation is marked valid but lists {} violation(s)",
                raw.violations.len()
            ));
        }
        Ok(Self {
            valid: raw.valid,
            violations: raw.violations,
            baseline_solution: raw.baseline_solution,
        })
    }
}

impl Validation {
    pub fn passed() -> Self {
        Self {
            valid: true,
            violations: vec![],
            baseline_solution: None,
        }
    }

    pub fn failed(violations: Vec<String>) -> Self {
        Self {
            valid: false,
            violations,
            baseline_solution: None,
        }
    }

    /// Decode the optional baseline seating. `None` when the backend sent none.
    pub fn baseline_seating(&self) -> Option<Result<Solution, serde_json::Error>> {
        self.baseline_solution
            .as_ref()
            .filter(|v| !v.is_null())
            .map(|v| serde_json::from_value(v.clone()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaselineResult {
    pub raw_response: String,
    pub validation: Validation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_representation: Option<serde_json::Value>,
}

/// One seat assignment: person name -> seat number.
///
/// Seats are unique and within `1..=MAX_SEAT`; they need not be contiguous.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, i64>", into = "BTreeMap<String, u32>")]
pub struct Solution(BTreeMap<String, u32>);

impl Solution {
    pub fn new<I, S>(assignments: I) -> Result<Self, SolutionError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let raw: BTreeMap<String, i64> = assignments
            .into_iter()
            .map(|(name, seat)| (name.into(), seat))
            .collect();
        Self::try_from(raw)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn seat_of(&self, person: &str) -> Option<u32> {
        self.0.get(person).copied()
    }

    pub fn max_seat(&self) -> u32 {
        self.0.values().copied().max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(name, seat)| (name.as_str(), *seat))
    }
}

impl TryFrom<BTreeMap<String, i64>> for Solution {
    type Error = SolutionError;

    fn try_from(raw: BTreeMap<String, i64>) -> Result<Self, Self::Error> {
        let mut taken: BTreeMap<u32, &str> = BTreeMap::new();
        for (person, &seat) in &raw {
            if seat < 1 || seat > i64::from(MAX_SEAT) {
                return Err(SolutionError::SeatOutOfRange {
                    person: person.clone(),
                    seat,
                    max: MAX_SEAT,
                });
            }
            let seat = seat as u32;
            if let Some(first) = taken.insert(seat, person) {
                return Err(SolutionError::DuplicateSeat {
                    seat,
                    first: first.to_string(),
                    second: person.clone(),
                });
            }
        }
        Ok(Self(
            raw.into_iter()
                .map(|(person, seat)| (person, seat as u32))
                .collect(),
        ))
    }
}

impl From<Solution> for BTreeMap<String, u32> {
    fn from(solution: Solution) -> Self {
        solution.0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeuroSymbolicResult {
    pub structured_representation: serde_json::Value,
    pub total_solutions: u64,
    pub solutions: Vec<Solution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl NeuroSymbolicResult {
    /// The backend may cap `solutions`; only the first one is ever shown.
    pub fn first_solution(&self) -> Option<&Solution> {
        self.solutions.first()
    }
}
