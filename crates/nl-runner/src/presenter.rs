//! Turns backend results into display panels. Pure: nothing here touches the
//! screen or the orchestrator's state.

use nl_core::{
    render, BaselineResult, NeuroSymbolicResult, SeatSlot, Validation, NO_SOLUTION_TEXT,
};
use serde::Serialize;
use std::fmt;
use tracing::warn;

pub const NO_RESPONSE_TEXT: &str = "No response.";
pub const PROVED_SEATING_TITLE: &str = "Proved Seating Arrangement";
pub const BASELINE_SEATING_TITLE: &str = "Baseline Seating (unverified)";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BaselinePanel {
    pub model: Option<String>,
    pub output: String,
    pub validation: ValidationPanel,
    /// Seating the backend parsed out of the LLM answer, when usable.
    pub guessed_seating: Option<SeatingPanel>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationPanel {
    Passed,
    Failed { count: usize, violations: Vec<String> },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NeuroSymbolicPanel {
    pub model: Option<String>,
    pub total_solutions: u64,
    pub solution_count: String,
    pub structured: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeatingPanel {
    pub title: String,
    pub seats: Vec<SeatView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub seat_number: u32,
    pub occupant: Option<String>,
    pub initial: String,
    pub color: Option<String>,
}

impl SeatingPanel {
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}

pub fn show_baseline(raw: &str) -> String {
    if raw.is_empty() {
        return NO_RESPONSE_TEXT.to_string();
    }
    escape_block(raw)
}

pub fn show_validation(v: &Validation) -> ValidationPanel {
    if v.valid {
        return ValidationPanel::Passed;
    }
    ValidationPanel::Failed {
        count: v.violations.len(),
        violations: v.violations.iter().map(|s| escape_line(s)).collect(),
    }
}

pub fn show_solution_count(n: u64) -> String {
    format!("Total Valid Solutions Found: {n}")
}

pub fn show_structured(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

pub fn show_seating(title: &str, slots: &[SeatSlot]) -> SeatingPanel {
    SeatingPanel {
        title: title.to_string(),
        seats: slots
            .iter()
            .map(|slot| SeatView {
                seat_number: slot.seat_number,
                occupant: slot.occupant.as_deref().map(escape_line),
                initial: escape_line(&slot.initial().to_string()),
                color: slot.hue().map(|h| h.css()),
            })
            .collect(),
    }
}

pub fn baseline_panel(result: &BaselineResult) -> BaselinePanel {
    let guessed_seating = match result.validation.baseline_seating() {
        None => None,
        Some(Ok(solution)) if solution.is_empty() => None,
        Some(Ok(solution)) => Some(show_seating(BASELINE_SEATING_TITLE, &render(&solution))),
        Some(Err(e)) => {
            warn!(error = %e, "ignoring unusable baseline seating");
            None
        }
    };

    BaselinePanel {
        model: result.model.clone(),
        output: show_baseline(&result.raw_response),
        validation: show_validation(&result.validation),
        guessed_seating,
    }
}

pub fn neurosymbolic_panel(result: &NeuroSymbolicResult) -> NeuroSymbolicPanel {
    NeuroSymbolicPanel {
        model: result.model.clone(),
        total_solutions: result.total_solutions,
        solution_count: show_solution_count(result.total_solutions),
        structured: show_structured(&result.structured_representation),
    }
}

/// Escape every control character, newlines included.
pub fn escape_line(s: &str) -> String {
    escape_with(s, |_| false)
}

/// Escape control characters but keep line structure.
pub fn escape_block(s: &str) -> String {
    escape_with(&s.replace("\r\n", "\n"), |c| c == '\n' || c == '\t')
}

fn escape_with(s: &str, keep: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_control() && !keep(c) {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}

impl fmt::Display for ValidationPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationPanel::Passed => write!(f, "✅ All constraints satisfied."),
            ValidationPanel::Failed { count, violations } => {
                let noun = if *count == 1 { "violation" } else { "violations" };
                write!(f, "❌ Intuition failed: {count} {noun} detected.")?;
                for v in violations {
                    write!(f, "\n   - {v}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for SeatingPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if self.seats.is_empty() {
            return write!(f, "  {NO_SOLUTION_TEXT}");
        }
        let width = self
            .seats
            .last()
            .map(|s| s.seat_number.to_string().len())
            .unwrap_or(1);
        for (i, seat) in self.seats.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match (&seat.occupant, &seat.color) {
                (Some(name), Some(color)) => write!(
                    f,
                    "  Seat {:>width$}  [{}] {}  {}",
                    seat.seat_number, seat.initial, name, color
                )?,
                (Some(name), None) => write!(
                    f,
                    "  Seat {:>width$}  [{}] {}",
                    seat.seat_number, seat.initial, name
                )?,
                (None, _) => write!(f, "  Seat {:>width$}  [?] Empty", seat.seat_number)?,
            }
        }
        Ok(())
    }
}
