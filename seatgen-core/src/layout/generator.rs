//! Lays out every seat of one section.
//!
//! The generator is pure: identical `(section, rows, options)` always produce
//! identical seats, ids included, so callers can re-run it and upsert by id.

use std::fmt::{self, Display};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    deg::Deg,
    error::{LayoutError, Result},
    fmt::Fmt,
    frame::Frame,
    naming::section_prefix,
    placer::{self, Nudge, NudgePolicy},
    r2::R2,
    rows::{self, check_fraction, RowOrder, RowSpacing},
    sampler::{Sampler, Span},
    section::{check_rows, seat_id, Direction, GeneratedSeat, RowSpec, SeatSize, Section},
    validator,
};

/// What to do when a row crosses a concave notch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub enum NotchPolicy {
    /// Spread seats over the outermost extent; seats landing in the notch are nudged back inside.
    #[default]
    OuterSpan,
    /// Spread seats over each inside run separately, leaving the notch empty.
    SplitAroundGaps,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub enum Numbering {
    /// Every row uses its own `direction`.
    #[default]
    AsSpecified,
    /// Odd-indexed rows reverse their declared direction.
    Serpentine,
}

impl Numbering {
    pub fn direction(&self, row_index: usize, declared: Direction) -> Direction {
        match self {
            Numbering::Serpentine if row_index % 2 == 1 => declared.reversed(),
            _ => declared,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Row axis in radians; defaults to the polygon's longest edge.
    pub axis: Option<f64>,
    /// Fraction of each row's extent left empty at both ends.
    pub margin_fraction: f64,
    /// Fraction of the section depth left empty before the first and after the last row.
    pub row_margin_fraction: f64,
    pub row_order: RowOrder,
    pub row_spacing: RowSpacing,
    pub notch_policy: NotchPolicy,
    pub numbering: Numbering,
    pub seat_size: SeatSize,
    pub nudge: NudgePolicy,
    /// Empty space at each of a row's `aisles`, canvas units.
    pub aisle_gap: f64,
    /// Seats get a `rotation` facing this point (e.g. the stage).
    pub focal_point: Option<R2<f64>>,
    /// Label prefix; derived from the section name when unset.
    pub label_prefix: Option<String>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            axis: None,
            margin_fraction: 0.05,
            row_margin_fraction: 0.,
            row_order: RowOrder::default(),
            row_spacing: RowSpacing::default(),
            notch_policy: NotchPolicy::default(),
            numbering: Numbering::default(),
            seat_size: SeatSize::default(),
            nudge: NudgePolicy::default(),
            aisle_gap: 14.,
            focal_point: None,
            label_prefix: None,
        }
    }
}

impl LayoutOptions {
    pub fn check(&self) -> Result<()> {
        check_fraction("marginFraction", self.margin_fraction)?;
        check_fraction("rowMarginFraction", self.row_margin_fraction)?;
        if let Some(axis) = self.axis {
            if !axis.is_finite() {
                return Err(LayoutError::InvalidOption { name: "axis", reason: format!("{} is not finite", axis) });
            }
        }
        if !(self.nudge.step.is_finite() && self.nudge.step > 0.) {
            return Err(LayoutError::InvalidOption {
                name: "nudge.step",
                reason: format!("expected a positive step, got {}", self.nudge.step),
            });
        }
        if !(self.aisle_gap.is_finite() && self.aisle_gap >= 0.) {
            return Err(LayoutError::InvalidOption {
                name: "aisleGap",
                reason: format!("expected a non-negative gap, got {}", self.aisle_gap),
            });
        }
        let SeatSize { width, height } = self.seat_size;
        if !(width.is_finite() && height.is_finite() && width > 0. && height > 0.) {
            return Err(LayoutError::InvalidOption {
                name: "seatSize",
                reason: format!("expected positive dimensions, got {}x{}", width, height),
            });
        }
        if let Some(focal) = self.focal_point {
            if !focal.is_finite() {
                return Err(LayoutError::InvalidOption { name: "focalPoint", reason: format!("{} is not finite", focal) });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct RowDiagnostics {
    pub row: String,
    pub requested: u32,
    pub produced: u32,
    /// Row position across the section, in the row frame.
    pub slice: f64,
    /// Outermost extent at `slice`.
    pub span: Span,
    /// Inside runs the seats were spread over (1 unless splitting around notches).
    pub segments: usize,
    /// Seats moved toward the centroid to land inside.
    pub nudged: Vec<u32>,
    /// Seats still outside the polygon after nudging.
    pub outside: Vec<u32>,
}

impl RowDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.requested == self.produced && self.nudged.is_empty() && self.outside.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    /// Row axis actually used, radians.
    pub axis: f64,
    pub rows: Vec<RowDiagnostics>,
    /// Whether the generated seats passed [`validator::validate`] against the input rows.
    pub self_check_ok: bool,
}

impl Diagnostics {
    pub fn nudged_count(&self) -> usize {
        self.rows.iter().map(|r| r.nudged.len()).sum()
    }

    pub fn outside_count(&self) -> usize {
        self.rows.iter().map(|r| r.outside.len()).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.self_check_ok && self.rows.iter().all(|r| r.is_clean())
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "axis {}", self.axis.deg_str())?;
        for r in &self.rows {
            write!(
                f,
                "  row {:>4}: {:>3}/{:<3} v={} u=[{}, {}]",
                r.row,
                r.produced,
                r.requested,
                r.slice.s(1),
                r.span.min.s(1),
                r.span.max.s(1),
            )?;
            if r.segments > 1 {
                write!(f, " segments={}", r.segments)?;
            }
            if !r.nudged.is_empty() {
                write!(f, " nudged={:?}", r.nudged)?;
            }
            if !r.outside.is_empty() {
                write!(f, " outside={:?}", r.outside)?;
            }
            writeln!(f)?;
        }
        write!(f, "self-check: {}", if self.self_check_ok { "ok" } else { "FAILED" })
    }
}

/// Seats for one section plus what happened while placing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub seats: Vec<GeneratedSeat>,
    pub diagnostics: Diagnostics,
}

/// Lay out `rows` inside `section.polygon`.
///
/// Fails without producing any seats if the input is unusable or any row's
/// slice misses the polygon. Seats that can't be placed cleanly are still
/// emitted and reported in [`Diagnostics`].
pub fn generate(section: &Section, rows: &[RowSpec], options: &LayoutOptions) -> Result<Layout> {
    options.check()?;
    let polygon = &section.polygon;
    polygon.validate()?;
    check_rows(rows)?;

    let axis = options.axis.unwrap_or_else(|| polygon.dominant_edge_angle());
    let frame = Frame::new(axis);
    let sampler = Sampler::new(polygon, frame);
    info!(
        "generate: section {:?} ({} rows, {} seats) axis {}",
        section.name,
        rows.len(),
        rows.iter().map(|r| r.seat_count as u64).sum::<u64>(),
        axis.deg_str(),
    );

    let slices = rows::slices(
        sampler.v_range(),
        rows,
        options.row_margin_fraction,
        options.row_order,
        &options.row_spacing,
    )?;

    // Every row must be feasible before any seat is placed
    let spans = slices
        .iter()
        .map(|slice| {
            sampler.extent(slice.v).ok_or_else(|| LayoutError::InfeasibleRow {
                row: slice.spec.label.clone(),
                slice: slice.v,
            })
        })
        .collect::<Result<Vec<Span>>>()?;

    let centroid = polygon.centroid();
    let prefix = options
        .label_prefix
        .clone()
        .unwrap_or_else(|| section_prefix(&section.name));

    let mut seats = Vec::with_capacity(rows.iter().map(|r| r.seat_count as usize).sum());
    let mut row_diagnostics = Vec::with_capacity(rows.len());

    for (slice, span) in slices.iter().zip(spans) {
        let row = slice.spec;
        let direction = options.numbering.direction(slice.index, row.direction);
        let (placed, segments) = match options.notch_policy {
            NotchPolicy::OuterSpan => (
                placer::place_seats_with_aisles(span, slice.v, row, direction, options.margin_fraction, options.aisle_gap),
                1,
            ),
            NotchPolicy::SplitAroundGaps => {
                let mut runs = sampler.segments(slice.v);
                // Slice grazing a vertex: zero-width extent, no inside run
                if runs.is_empty() {
                    runs.push(span);
                }
                (
                    placer::place_seats_in_segments(&runs, slice.v, row, direction, options.margin_fraction),
                    runs.len(),
                )
            }
        };

        let mut nudged = Vec::new();
        let mut outside = Vec::new();
        for seat in &placed {
            let clipped = frame.from_frame(&seat.uv);
            let position = match placer::nudge_inside(&clipped, polygon, &centroid, &options.nudge) {
                Nudge::Inside => clipped,
                Nudge::Nudged { position, steps } => {
                    debug!("row {} seat {}: nudged {} step(s) to {}", row.label, seat.seat_number, steps, position);
                    nudged.push(seat.seat_number);
                    position
                }
                Nudge::Outside => {
                    outside.push(seat.seat_number);
                    clipped
                }
            };
            let rotation = options.focal_point.map(|focal| {
                let d = focal - position;
                d.y.atan2(d.x).deg()
            });
            seats.push(GeneratedSeat {
                id: seat_id(&section.id, &row.label, seat.seat_number),
                section_id: section.id.clone(),
                row: row.label.clone(),
                seat_number: seat.seat_number,
                label: format!("{}-{}-{}", prefix, row.label, seat.seat_number),
                position,
                size: options.seat_size,
                rotation,
            });
        }

        if !nudged.is_empty() {
            warn!("section {:?} row {}: nudged seats {:?} back inside", section.name, row.label, nudged);
        }
        if !outside.is_empty() {
            warn!("section {:?} row {}: seats {:?} remain outside the polygon", section.name, row.label, outside);
        }
        debug!(
            "row {}: {} seats at v={:.3}, u=[{:.3}, {:.3}], {:?}",
            row.label,
            placed.len(),
            slice.v,
            span.min,
            span.max,
            direction
        );

        row_diagnostics.push(RowDiagnostics {
            row: row.label.clone(),
            requested: row.seat_count,
            produced: placed.len() as u32,
            slice: slice.v,
            span,
            segments,
            nudged,
            outside,
        });
    }

    let report = validator::validate(&seats, rows);
    if !report.overall_ok {
        warn!("section {:?}: generated seats fail validation\n{}", section.name, report);
    }

    Ok(Layout {
        seats,
        diagnostics: Diagnostics {
            axis,
            rows: row_diagnostics,
            self_check_ok: report.overall_ok,
        },
    })
}
