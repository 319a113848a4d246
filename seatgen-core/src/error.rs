/// Hard failures: a section that cannot be laid out at all.
///
/// Soft anomalies (nudged seats, seats left outside the polygon, count drift
/// in externally sourced data) are never raised here; they surface through
/// [`crate::generator::Diagnostics`] and [`crate::validator::ValidationReport`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("No rows to lay out")]
    EmptySpecification,

    #[error("Row {row:?} is infeasible: slice v={slice:.3} does not intersect the section polygon")]
    InfeasibleRow { row: String, slice: f64 },

    #[error("Row {row:?} declares {seat_count} seats but numbers {start}..={end}")]
    InconsistentRow {
        row: String,
        seat_count: u32,
        start: u32,
        end: u32,
    },

    #[error("Row {0:?} appears more than once in the row list")]
    DuplicateRow(String),

    #[error("Expected {expected} explicit row offsets (one per row), found {found}")]
    SpacingMismatch { expected: usize, found: usize },

    #[error("Invalid option {name}: {reason}")]
    InvalidOption { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
