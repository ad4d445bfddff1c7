use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::waiting::WAITING_PREFIX;

/// Identifier of a seat slot, unique across the whole floor plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(String);

impl SeatId {
    pub fn new(id: impl Into<String>) -> Self {
        SeatId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeatId {
    fn from(id: &str) -> Self {
        SeatId::new(id)
    }
}

/// A structural position in a section grid.
///
/// `empty` marks a visual gap: it occupies a grid cell but can never be
/// assigned. That is different from an assignable seat nobody sits in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub empty: bool,
}

impl Seat {
    pub fn new(id: impl Into<String>) -> Self {
        Seat {
            id: SeatId::new(id),
            label: None,
            empty: false,
        }
    }

    pub fn gap(id: impl Into<String>) -> Self {
        Seat {
            empty: true,
            ..Seat::new(id)
        }
    }

    pub fn is_assignable(&self) -> bool {
        !self.empty
    }
}

fn default_columns() -> u16 {
    2
}

/// A group of seats laid out as a grid, filled row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub key: String,
    pub title: String,
    /// Floor band the section is drawn in ("upper", "middle", ...).
    pub row: String,
    #[serde(default = "default_columns")]
    pub columns: u16,
    pub seats: Vec<Seat>,
}

impl Section {
    /// Number of grid rows needed to hold every seat.
    pub fn grid_rows(&self) -> u16 {
        let columns = usize::from(self.columns.max(1));
        u16::try_from(self.seats.len().div_ceil(columns)).unwrap_or(u16::MAX)
    }

    /// Grid cell (column, row) of the seat at `index`.
    pub fn cell_of(&self, index: usize) -> (u16, u16) {
        let columns = usize::from(self.columns.max(1));
        ((index % columns) as u16, (index / columns) as u16)
    }
}

/// Read-only catalog of every seat in the layout.
#[derive(Debug, Clone, Default)]
pub struct SeatDirectory {
    sections: Vec<Section>,
    // seat id -> (section index, seat index)
    index: HashMap<SeatId, (usize, usize)>,
}

impl SeatDirectory {
    /// Builds the directory, rejecting duplicate or reserved seat ids.
    pub fn new(sections: Vec<Section>) -> Result<Self, PlanError> {
        let mut index = HashMap::new();

        for (section_idx, section) in sections.iter().enumerate() {
            if section.columns == 0 {
                return Err(PlanError::ZeroColumns(section.key.clone()));
            }
            for (seat_idx, seat) in section.seats.iter().enumerate() {
                if seat.id.as_str().starts_with(WAITING_PREFIX) {
                    return Err(PlanError::ReservedSeatId(seat.id.clone()));
                }
                if index.insert(seat.id.clone(), (section_idx, seat_idx)).is_some() {
                    return Err(PlanError::DuplicateSeat(seat.id.clone()));
                }
            }
        }

        Ok(SeatDirectory { sections, index })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn seat(&self, id: &SeatId) -> Option<&Seat> {
        self.index
            .get(id)
            .map(|&(section, seat)| &self.sections[section].seats[seat])
    }

    pub fn section_of(&self, id: &SeatId) -> Option<&Section> {
        self.index.get(id).map(|&(section, _)| &self.sections[section])
    }

    pub fn contains(&self, id: &SeatId) -> bool {
        self.index.contains_key(id)
    }

    /// True when the seat exists and is not a structural gap.
    pub fn is_assignable(&self, id: &SeatId) -> bool {
        self.seat(id).is_some_and(Seat::is_assignable)
    }

    /// All seats in layout order, gaps included.
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.sections.iter().flat_map(|s| s.seats.iter())
    }

    pub fn assignable_count(&self) -> usize {
        self.seats().filter(|s| s.is_assignable()).count()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
