//! Compare a seat list against the rows it is supposed to realise.
//!
//! The seat list may come from [`crate::generator::generate`] or from anywhere
//! else (e.g. seats already persisted in a database), as long as it implements
//! [`SeatRecord`].

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{self, Display},
};

use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    frame::Frame,
    r2::R2,
    section::{Direction, GeneratedSeat, RowSpec},
};

/// The fields the validator needs from a seat.
pub trait SeatRecord {
    fn row(&self) -> &str;
    fn seat_number(&self) -> u32;
    /// Canvas position, when known; needed for the direction audit.
    fn position(&self) -> Option<R2<f64>> {
        None
    }
}

impl SeatRecord for GeneratedSeat {
    fn row(&self) -> &str {
        &self.row
    }
    fn seat_number(&self) -> u32 {
        self.seat_number
    }
    fn position(&self) -> Option<R2<f64>> {
        Some(self.position)
    }
}

/// Inclusive seat number range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
pub struct NumberRange {
    pub start: u32,
    pub end: u32,
}

impl Display for NumberRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct RowCheck {
    pub row: String,
    pub expected_count: u32,
    pub actual_count: u32,
    pub expected_range: NumberRange,
    /// Whether the declared count matches the declared range; gaps aren't listed otherwise.
    pub declared_ok: bool,
    /// Smallest and largest number seen; `None` if the row has no seats.
    pub actual_range: Option<NumberRange>,
    /// Expected numbers with no seat.
    pub missing: Vec<u32>,
    /// Numbers carried by more than one seat.
    pub duplicates: Vec<u32>,
    /// Numbers outside the expected range.
    pub extra: Vec<u32>,
    /// Numbering direction read off seat positions (direction audit only).
    pub observed_direction: Option<Direction>,
    pub direction_ok: Option<bool>,
    pub ok: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub per_row: Vec<RowCheck>,
    /// Row labels present in the seats but absent from the row list, with their seat counts.
    pub unexpected_rows: BTreeMap<String, u32>,
    pub overall_ok: bool,
}

impl ValidationReport {
    pub fn failures(&self) -> impl Iterator<Item = &RowCheck> {
        self.per_row.iter().filter(|r| !r.ok)
    }
}

fn short_list(numbers: &[u32]) -> String {
    const MAX: usize = 8;
    if numbers.len() <= MAX {
        numbers.iter().join(",")
    } else {
        format!("{},… (+{})", numbers[..MAX].iter().join(","), numbers.len() - MAX)
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<6} {:>9} {:>11} {:>11}  status", "row", "seats", "expected", "actual")?;
        for r in &self.per_row {
            let actual = r.actual_range.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string());
            write!(
                f,
                "{:<6} {:>4}/{:<4} {:>11} {:>11}  {}",
                r.row,
                r.actual_count,
                r.expected_count,
                r.expected_range.to_string(),
                actual,
                if r.ok { "ok" } else { "MISMATCH" },
            )?;
            if !r.declared_ok {
                write!(f, " declared-count-range-mismatch")?;
            }
            if !r.missing.is_empty() {
                write!(f, " missing=[{}]", short_list(&r.missing))?;
            }
            if !r.duplicates.is_empty() {
                write!(f, " duplicates=[{}]", short_list(&r.duplicates))?;
            }
            if !r.extra.is_empty() {
                write!(f, " extra=[{}]", short_list(&r.extra))?;
            }
            if r.direction_ok == Some(false) {
                match r.observed_direction {
                    Some(d) => write!(f, " direction={:?}", d)?,
                    None => write!(f, " direction=mixed")?,
                }
            }
            writeln!(f)?;
        }
        for (row, count) in &self.unexpected_rows {
            writeln!(f, "{:<6} {:>4}/{:<4} {:>11} {:>11}  UNEXPECTED", row, count, 0, "-", "-")?;
        }
        write!(f, "overall: {}", if self.overall_ok { "OK" } else { "FAILED" })
    }
}

/// Counts, ranges, gaps and duplicates per row.
pub fn validate<S: SeatRecord>(seats: &[S], specs: &[RowSpec]) -> ValidationReport {
    check(seats, specs, None)
}

/// [`validate`], also checking that numbers run in each row's `direction` along `axis` (radians).
///
/// Rows whose seats carry no positions are not direction-checked.
pub fn validate_along<S: SeatRecord>(seats: &[S], specs: &[RowSpec], axis: f64) -> ValidationReport {
    check(seats, specs, Some(Frame::new(axis)))
}

/// Direction implied by `(u, number)` pairs: numbers strictly increasing with `u` is left-to-right.
fn observed_direction(mut points: Vec<(f64, u32)>) -> Option<Direction> {
    if points.len() < 2 {
        return None;
    }
    points.sort_by_key(|(u, _)| OrderedFloat(*u));
    let pairs = || points.iter().tuple_windows::<(_, _)>();
    if pairs().all(|((_, a), (_, b))| a < b) {
        Some(Direction::LeftToRight)
    } else if pairs().all(|((_, a), (_, b))| a > b) {
        Some(Direction::RightToLeft)
    } else {
        None
    }
}

fn check<S: SeatRecord>(seats: &[S], specs: &[RowSpec], frame: Option<Frame>) -> ValidationReport {
    let mut by_row: BTreeMap<&str, Vec<&S>> = BTreeMap::new();
    for seat in seats {
        by_row.entry(seat.row()).or_default().push(seat);
    }

    let mut per_row = Vec::with_capacity(specs.len());
    for spec in specs {
        let row_seats = by_row.remove(spec.label.as_str()).unwrap_or_default();
        let expected_range = NumberRange { start: spec.number_range_start, end: spec.number_range_end };

        let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
        for seat in &row_seats {
            *counts.entry(seat.seat_number()).or_default() += 1;
        }
        let present: BTreeSet<u32> = counts.keys().copied().collect();
        let declared_ok = spec.check().is_ok();
        let missing: Vec<u32> = if declared_ok {
            (spec.number_range_start..=spec.number_range_end)
                .filter(|n| !present.contains(n))
                .collect()
        } else {
            vec![]
        };
        let duplicates: Vec<u32> = counts.iter().filter(|(_, c)| **c > 1).map(|(n, _)| *n).collect();
        let extra: Vec<u32> = present
            .iter()
            .copied()
            .filter(|n| *n < spec.number_range_start || *n > spec.number_range_end)
            .collect();
        let actual_range = match (present.first(), present.last()) {
            (Some(&start), Some(&end)) => Some(NumberRange { start, end }),
            _ => None,
        };

        let (observed_direction, direction_ok) = match frame {
            Some(frame) => {
                let points: Option<Vec<(f64, u32)>> = row_seats
                    .iter()
                    .map(|s| s.position().map(|p| (frame.to_frame(&p).u, s.seat_number())))
                    .collect();
                match points {
                    Some(points) if points.len() >= 2 => {
                        let observed = observed_direction(points);
                        (observed, Some(observed == Some(spec.direction)))
                    }
                    _ => (None, None),
                }
            }
            None => (None, None),
        };

        let actual_count = row_seats.len() as u32;
        let ok = declared_ok
            && actual_count == spec.seat_count
            && missing.is_empty()
            && duplicates.is_empty()
            && extra.is_empty()
            && direction_ok != Some(false);

        per_row.push(RowCheck {
            row: spec.label.clone(),
            expected_count: spec.seat_count,
            actual_count,
            expected_range,
            declared_ok,
            actual_range,
            missing,
            duplicates,
            extra,
            observed_direction,
            direction_ok,
            ok,
        });
    }

    let unexpected_rows: BTreeMap<String, u32> = by_row
        .into_iter()
        .map(|(row, seats)| (row.to_string(), seats.len() as u32))
        .collect();
    let overall_ok = unexpected_rows.is_empty() && per_row.iter().all(|r| r.ok);

    ValidationReport { per_row, unexpected_rows, overall_ok }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A persisted seat, as read back from an external store.
    struct Stored {
        row: &'static str,
        number: u32,
        x: Option<f64>,
    }

    impl SeatRecord for Stored {
        fn row(&self) -> &str {
            self.row
        }
        fn seat_number(&self) -> u32 {
            self.number
        }
        fn position(&self) -> Option<R2<f64>> {
            self.x.map(|x| R2::new(x, 0.))
        }
    }

    fn stored(row: &'static str, numbers: impl IntoIterator<Item = u32>) -> Vec<Stored> {
        numbers.into_iter().map(|number| Stored { row, number, x: None }).collect()
    }

    #[test]
    fn test_all_present() {
        let specs = vec![RowSpec::new("A", 5, 1, Direction::LeftToRight), RowSpec::new("B", 3, 10, Direction::LeftToRight)];
        let mut seats = stored("A", 1..=5);
        seats.extend(stored("B", 10..=12));
        let report = validate(&seats, &specs);
        assert!(report.overall_ok, "{}", report);
        assert_eq!(report.per_row[1].actual_range, Some(NumberRange { start: 10, end: 12 }));
        assert_eq!(report.failures().count(), 0);
    }

    #[test]
    fn test_missing_duplicate_extra() {
        let specs = vec![RowSpec::new("M", 5, 51, Direction::LeftToRight)];
        let seats = stored("M", [51, 52, 52, 54, 56]);
        let report = validate(&seats, &specs);
        assert!(!report.overall_ok);
        let m = &report.per_row[0];
        assert_eq!(m.actual_count, 5);
        assert_eq!(m.missing, vec![53, 55]);
        assert_eq!(m.duplicates, vec![52]);
        assert_eq!(m.extra, vec![56]);
        assert_eq!(m.actual_range, Some(NumberRange { start: 51, end: 56 }));
        assert!(!m.ok);
    }

    #[test]
    fn test_inconsistent_declared_range() {
        // Count disagrees with a range spanning nearly all of u32
        let mut spec = RowSpec::new("A", 2, 1, Direction::LeftToRight);
        spec.number_range_end = 4_000_000_000;
        let report = validate(&stored("A", [1, 2]), &[spec]);
        let a = &report.per_row[0];
        assert!(!a.declared_ok);
        assert!(a.missing.is_empty());
        assert!(!a.ok);
        assert!(!report.overall_ok);
        assert!(report.to_string().contains("declared-count-range-mismatch"));
    }

    #[test]
    fn test_empty_and_unexpected_rows() {
        let specs = vec![RowSpec::new("A", 2, 1, Direction::LeftToRight)];
        let seats = stored("Z", [1, 2, 3]);
        let report = validate(&seats, &specs);
        assert!(!report.overall_ok);
        assert_eq!(report.per_row[0].actual_range, None);
        assert_eq!(report.per_row[0].missing, vec![1, 2]);
        assert_eq!(report.unexpected_rows.get("Z"), Some(&3));
        let table = report.to_string();
        assert!(table.contains("UNEXPECTED"));
        assert!(table.ends_with("overall: FAILED"));
    }

    #[test]
    fn test_direction_audit() {
        let specs = vec![RowSpec::new("P", 3, 49, Direction::RightToLeft)];
        let rtl = vec![
            Stored { row: "P", number: 51, x: Some(0.) },
            Stored { row: "P", number: 50, x: Some(10.) },
            Stored { row: "P", number: 49, x: Some(20.) },
        ];
        let report = validate_along(&rtl, &specs, 0.);
        assert_eq!(report.per_row[0].observed_direction, Some(Direction::RightToLeft));
        assert_eq!(report.per_row[0].direction_ok, Some(true));
        assert!(report.overall_ok);

        let ltr: Vec<Stored> = [49, 50, 51]
            .into_iter()
            .zip([0., 10., 20.])
            .map(|(number, x)| Stored { row: "P", number, x: Some(x) })
            .collect();
        let report = validate_along(&ltr, &specs, 0.);
        assert_eq!(report.per_row[0].observed_direction, Some(Direction::LeftToRight));
        assert!(!report.overall_ok);
        // Same seats seen along the reversed axis read right-to-left
        assert!(validate_along(&ltr, &specs, std::f64::consts::PI).overall_ok);

        // No positions: the audit is skipped, not failed
        let report = validate_along(&stored("P", 49..=51), &specs, 0.);
        assert_eq!(report.per_row[0].direction_ok, None);
        assert!(report.overall_ok);
    }

    #[test]
    fn test_mixed_direction() {
        assert_eq!(observed_direction(vec![(0., 1), (1., 3), (2., 2)]), None);
        assert_eq!(observed_direction(vec![(5., 1)]), None);
    }
}
