//! Seat layout rendering.
//!
//! `render` turns a solution into one slot per seat from 1 up to the highest
//! assigned seat. Unassigned seats in that range come out as empty slots, so
//! the layout shows the real row including gaps. A solution whose seats are
//! already 1..=n simply renders as the sorted assignment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::model::Solution;

/// Placeholder shown when there is nothing to seat.
pub const NO_SOLUTION_TEXT: &str = "No valid solution found.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSlot {
    pub seat_number: u32,
    pub occupant: Option<String>,
}

impl SeatSlot {
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// Avatar letter: the occupant's first character, `?` for an empty seat.
    pub fn initial(&self) -> char {
        self.occupant
            .as_deref()
            .and_then(|name| name.chars().next())
            .unwrap_or('?')
    }

    pub fn hue(&self) -> Option<Hue> {
        self.occupant.as_deref().map(color_of)
    }
}

pub fn render(solution: &Solution) -> Vec<SeatSlot> {
    let by_seat: BTreeMap<u32, &str> = solution.iter().map(|(name, seat)| (seat, name)).collect();

    (1..=solution.max_seat())
        .map(|seat_number| SeatSlot {
            seat_number,
            occupant: by_seat.get(&seat_number).map(|name| name.to_string()),
        })
        .collect()
}

/// HSL hue in `0..360`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hue(pub u16);

impl Hue {
    /// CSS colour with the fixed saturation/lightness used for avatars.
    pub fn css(&self) -> String {
        format!("hsl({}, 60%, 50%)", self.0)
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}

/// Deterministic avatar colour for a name. Cosmetic; collisions are fine.
///
/// Reproduces the browser string hash: over UTF-16 code units,
/// `hash = c + ((int32(hash) << 5) - hash)`, evaluated in double precision
/// (exact here, the magnitude stays far below 2^53), then folded into a hue.
pub fn color_of(name: &str) -> Hue {
    let mut hash: i64 = 0;
    for unit in name.encode_utf16() {
        let shifted = (hash as i32).wrapping_shl(5);
        hash = i64::from(unit) + (i64::from(shifted) - hash);
    }
    Hue(hash.rem_euclid(360) as u16)
}
