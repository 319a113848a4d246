use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    error::{LayoutError, Result},
    polygon::Polygon,
    r2::R2,
};

/// A seating section: one named polygon on the venue canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub name: String,
    pub polygon: Polygon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl Section {
    pub fn new(id: &str, name: &str, polygon: Polygon) -> Self {
        Section {
            id: id.to_string(),
            name: name.to_string(),
            polygon,
            zone: None,
        }
    }
}

/// Which physical end of a row holds the lowest seat number, as seen along the row axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Lowest number at the smallest `u`.
    LeftToRight,
    /// Lowest number at the largest `u`.
    RightToLeft,
}

impl Direction {
    pub fn reversed(self) -> Direction {
        match self {
            Direction::LeftToRight => Direction::RightToLeft,
            Direction::RightToLeft => Direction::LeftToRight,
        }
    }
}

/// One physical row: its label, how many seats it holds and how they are numbered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct RowSpec {
    pub label: String,
    pub seat_count: u32,
    pub number_range_start: u32,
    pub number_range_end: u32,
    pub direction: Direction,
    /// Aisle breaks, each after the k-th seat counted from the low-`u` end.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aisles: Vec<u32>,
}

impl RowSpec {
    /// Row numbered consecutively from `start`.
    ///
    /// A range that would run past `u32::MAX` is clamped there, so [`RowSpec::check`] rejects it.
    pub fn new(label: &str, seat_count: u32, start: u32, direction: Direction) -> Self {
        RowSpec {
            label: label.to_string(),
            seat_count,
            number_range_start: start,
            number_range_end: start.saturating_add(seat_count.saturating_sub(1)),
            direction,
            aisles: vec![],
        }
    }

    pub fn with_aisles(mut self, aisles: Vec<u32>) -> Self {
        self.aisles = aisles;
        self
    }

    /// Size of the declared (inclusive) number range; `None` if it runs backwards.
    pub fn range_len(&self) -> Option<u64> {
        let (start, end) = (self.number_range_start as u64, self.number_range_end as u64);
        (end >= start).then(|| end - start + 1)
    }

    /// The declared count must match the declared (inclusive, consecutive) number range.
    pub fn check(&self) -> Result<()> {
        let consistent = self.seat_count > 0 && self.range_len() == Some(self.seat_count as u64);
        if consistent {
            Ok(())
        } else {
            Err(LayoutError::InconsistentRow {
                row: self.label.clone(),
                seat_count: self.seat_count,
                start: self.number_range_start,
                end: self.number_range_end,
            })
        }
    }

    /// Seat number for the `k`th position (0-indexed, ascending `u`) of this row.
    pub fn number_at(&self, k: usize, direction: Direction) -> u32 {
        let k = k as u32;
        match direction {
            Direction::LeftToRight => self.number_range_start + k,
            Direction::RightToLeft => self.number_range_end - k,
        }
    }
}

/// Reject lists that can't be laid out as given: empty, inconsistent rows, or repeated labels.
pub fn check_rows(rows: &[RowSpec]) -> Result<()> {
    if rows.is_empty() {
        return Err(LayoutError::EmptySpecification);
    }
    let mut seen = BTreeSet::new();
    for row in rows {
        row.check()?;
        if !seen.insert(row.label.as_str()) {
            return Err(LayoutError::DuplicateRow(row.label.clone()));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
pub struct SeatSize {
    pub width: f64,
    pub height: f64,
}

impl Default for SeatSize {
    fn default() -> Self {
        SeatSize { width: 7., height: 7. }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSeat {
    pub id: String,
    pub section_id: String,
    pub row: String,
    pub seat_number: u32,
    pub label: String,
    pub position: R2<f64>,
    pub size: SeatSize,
    /// Degrees, facing the configured focal point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

/// Stable upsert key for a seat.
pub fn seat_id(section_id: &str, row: &str, seat_number: u32) -> String {
    format!("{}-{}-{}", section_id, row, seat_number)
}
