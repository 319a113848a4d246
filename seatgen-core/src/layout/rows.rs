//! Assigns each row of a section to a slice across the polygon.

use log::debug;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    error::{LayoutError, Result},
    frame::Frame,
    polygon::Polygon,
    sampler::{Sampler, Span},
    section::RowSpec,
};

/// Which side of the section `rows[0]` sits on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub enum RowOrder {
    /// `rows[0]` at the smallest `v`.
    #[default]
    NearToFar,
    /// `rows[0]` at the largest `v`.
    FarToNear,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub enum RowSpacing {
    /// Equal bands, one row centred in each.
    #[default]
    Even,
    /// Explicit distance of each row from the `rows[0]` edge, one entry per row.
    Offsets(Vec<f64>),
}

/// A row placed at a `v` coordinate in the row frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSlice<'a> {
    pub index: usize,
    pub spec: &'a RowSpec,
    pub v: f64,
}

pub(crate) fn check_fraction(name: &'static str, fraction: f64) -> Result<()> {
    if fraction.is_finite() && (0. ..0.5).contains(&fraction) {
        Ok(())
    } else {
        Err(LayoutError::InvalidOption {
            name,
            reason: format!("expected a fraction in [0, 0.5), got {}", fraction),
        })
    }
}

/// Slice positions for `rows` across `v_range`.
pub fn slices<'a>(
    v_range: Span,
    rows: &'a [RowSpec],
    margin_fraction: f64,
    order: RowOrder,
    spacing: &RowSpacing,
) -> Result<Vec<RowSlice<'a>>> {
    if rows.is_empty() {
        return Err(LayoutError::EmptySpecification);
    }
    check_fraction("rowMarginFraction", margin_fraction)?;

    let n = rows.len();
    let vs: Vec<f64> = match spacing {
        RowSpacing::Even => {
            let usable = v_range.shrink(margin_fraction);
            let band = usable.width() / n as f64;
            (0..n)
                .map(|i| {
                    let offset = band * (i as f64 + 0.5);
                    match order {
                        RowOrder::NearToFar => usable.min + offset,
                        RowOrder::FarToNear => usable.max - offset,
                    }
                })
                .collect()
        }
        RowSpacing::Offsets(offsets) => {
            if offsets.len() != n {
                return Err(LayoutError::SpacingMismatch { expected: n, found: offsets.len() });
            }
            if let Some(bad) = offsets.iter().find(|o| !o.is_finite()) {
                return Err(LayoutError::InvalidOption {
                    name: "rowSpacing",
                    reason: format!("offset {} is not finite", bad),
                });
            }
            offsets
                .iter()
                .map(|offset| match order {
                    RowOrder::NearToFar => v_range.min + offset,
                    RowOrder::FarToNear => v_range.max - offset,
                })
                .collect()
        }
    };

    debug!(
        "rows::slices: {} rows over v=[{:.3}, {:.3}] ({:?}, {:?})",
        n, v_range.min, v_range.max, order, spacing
    );

    Ok(rows
        .iter()
        .zip(vs)
        .enumerate()
        .map(|(index, (spec, v))| RowSlice { index, spec, v })
        .collect())
}

/// Map `rows` onto slices of `polygon` in the frame rotated by `frame`.
pub fn distribute_rows<'a>(
    polygon: &Polygon,
    rows: &'a [RowSpec],
    frame: &Frame,
    margin_fraction: f64,
    order: RowOrder,
    spacing: &RowSpacing,
) -> Result<Vec<RowSlice<'a>>> {
    let v_range = Sampler::new(polygon, *frame).v_range();
    slices(v_range, rows, margin_fraction, order, spacing)
}
