//! Seat positions and numbers along a single row.

use log::debug;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    frame::Uv,
    polygon::Polygon,
    r2::R2,
    sampler::Span,
    section::{Direction, RowSpec},
};

/// A numbered seat position in the row frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedSeat {
    pub seat_number: u32,
    pub uv: Uv,
}

/// `count` evenly spaced `u` values across `span` after trimming `margin_fraction` from each end.
///
/// A single seat sits at the midpoint; otherwise the first and last seats sit
/// exactly on the trimmed ends.
pub fn positions(span: Span, count: usize, margin_fraction: f64) -> Vec<f64> {
    let usable = span.shrink(margin_fraction);
    match count {
        0 => vec![],
        1 => vec![usable.mid()],
        _ => {
            let step = usable.width() / (count - 1) as f64;
            (0..count).map(|k| usable.min + k as f64 * step).collect()
        }
    }
}

/// [`positions`] with `gap` units of empty space after each seat position listed in `aisles`.
///
/// Aisle entries count seats from the low-`u` end (an aisle at 3 sits between the 3rd and 4th
/// seat). Entries outside `1..count` are ignored. The first and last seats stay on the trimmed
/// ends, and gaps wider than half the usable width in total are scaled down to half.
pub fn positions_with_aisles(span: Span, count: usize, margin_fraction: f64, aisles: &[u32], gap: f64) -> Vec<f64> {
    let mut breaks: Vec<usize> = aisles
        .iter()
        .map(|&a| a as usize)
        .filter(|&a| a >= 1 && a < count)
        .collect();
    breaks.sort_unstable();
    breaks.dedup();
    if breaks.is_empty() || gap <= 0. {
        return positions(span, count, margin_fraction);
    }
    let usable = span.shrink(margin_fraction);
    let total_gap = (gap * breaks.len() as f64).min(usable.width() / 2.);
    let gap = total_gap / breaks.len() as f64;
    let step = (usable.width() - total_gap) / (count - 1) as f64;
    (0..count)
        .map(|k| {
            let gaps_before = breaks.iter().filter(|&&b| b <= k).count();
            usable.min + k as f64 * step + gaps_before as f64 * gap
        })
        .collect()
}

/// Split `count` seats across `spans` in proportion to their widths.
///
/// Largest-remainder rounding; ties go to the earlier span.
pub fn allocate(spans: &[Span], count: usize) -> Vec<usize> {
    let total: f64 = spans.iter().map(|s| s.width()).sum();
    if spans.is_empty() {
        return vec![];
    }
    if total <= 0. {
        let mut counts = vec![0; spans.len()];
        counts[0] = count;
        return counts;
    }
    let quotas: Vec<f64> = spans.iter().map(|s| count as f64 * s.width() / total).collect();
    let mut counts: Vec<usize> = quotas.iter().map(|q| q.floor() as usize).collect();
    let assigned: usize = counts.iter().sum();
    let mut order: Vec<usize> = (0..spans.len()).collect();
    // Stable sort keeps earlier spans first among equal remainders
    order.sort_by(|&a, &b| {
        let ra = quotas[a] - quotas[a].floor();
        let rb = quotas[b] - quotas[b].floor();
        rb.total_cmp(&ra)
    });
    for &idx in order.iter().take(count.saturating_sub(assigned)) {
        counts[idx] += 1;
    }
    counts
}

fn number(us: Vec<f64>, row_v: f64, row: &RowSpec, direction: Direction) -> Vec<PlacedSeat> {
    us.into_iter()
        .enumerate()
        .map(|(k, u)| PlacedSeat {
            seat_number: row.number_at(k, direction),
            uv: Uv { u, v: row_v },
        })
        .collect()
}

/// Place `row.seat_count` seats along `span` at `row_v`, numbered per `row.direction`.
pub fn place_seats(span: Span, row_v: f64, row: &RowSpec, margin_fraction: f64) -> Vec<PlacedSeat> {
    place_seats_directed(span, row_v, row, row.direction, margin_fraction)
}

/// [`place_seats`] with the numbering direction given explicitly.
pub fn place_seats_directed(
    span: Span,
    row_v: f64,
    row: &RowSpec,
    direction: Direction,
    margin_fraction: f64,
) -> Vec<PlacedSeat> {
    let us = positions(span, row.seat_count as usize, margin_fraction);
    number(us, row_v, row, direction)
}

/// [`place_seats_directed`], leaving `gap` units at each of `row.aisles`.
pub fn place_seats_with_aisles(
    span: Span,
    row_v: f64,
    row: &RowSpec,
    direction: Direction,
    margin_fraction: f64,
    gap: f64,
) -> Vec<PlacedSeat> {
    let us = positions_with_aisles(span, row.seat_count as usize, margin_fraction, &row.aisles, gap);
    number(us, row_v, row, direction)
}

/// Place a row's seats across several inside runs (e.g. either side of a notch).
///
/// Numbering runs continuously along the physical row, skipping the gaps.
pub fn place_seats_in_segments(
    spans: &[Span],
    row_v: f64,
    row: &RowSpec,
    direction: Direction,
    margin_fraction: f64,
) -> Vec<PlacedSeat> {
    let counts = allocate(spans, row.seat_count as usize);
    debug!("place_seats_in_segments: row {} split {:?}", row.label, counts);
    let us: Vec<f64> = spans
        .iter()
        .zip(counts)
        .flat_map(|(span, count)| positions(*span, count, margin_fraction))
        .collect();
    number(us, row_v, row, direction)
}

/// Bounds on moving a stray seat back inside its polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct NudgePolicy {
    /// Canvas units moved per attempt.
    pub step: f64,
    pub max_steps: u32,
}

impl Default for NudgePolicy {
    fn default() -> Self {
        NudgePolicy { step: 1., max_steps: 50 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Nudge {
    /// Already inside; not moved.
    Inside,
    /// Moved `steps` attempts toward the target to land inside.
    Nudged { position: R2<f64>, steps: u32 },
    /// Still outside after every attempt; left where it was.
    Outside,
}

/// Walk `p` toward `target` in `policy.step` increments until it lands inside `polygon`.
pub fn nudge_inside(p: &R2<f64>, polygon: &Polygon, target: &R2<f64>, policy: &NudgePolicy) -> Nudge {
    if polygon.contains(p) {
        return Nudge::Inside;
    }
    let delta = *target - *p;
    let dist = delta.norm();
    if dist == 0. {
        return Nudge::Outside;
    }
    let dir = delta / dist;
    for steps in 1..=policy.max_steps {
        let travelled = policy.step * steps as f64;
        let position = if travelled >= dist { *target } else { *p + dir * travelled };
        if polygon.contains(&position) {
            return Nudge::Nudged { position, steps };
        }
        if travelled >= dist {
            break;
        }
    }
    Nudge::Outside
}
