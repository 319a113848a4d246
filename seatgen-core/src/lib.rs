#[cfg_attr(not(test), allow(unused_imports))]
#[macro_use]
extern crate approx;

pub mod geometry;
pub mod layout;

pub use geometry::deg;
pub use geometry::frame;
pub use geometry::polygon;
pub use geometry::r2;

pub use layout::generator;
pub use layout::naming;
pub use layout::placer;
pub use layout::rows;
pub use layout::sampler;
pub use layout::section;
pub use layout::validator;

pub mod error;
pub mod fmt;

pub use error::LayoutError;
pub use generator::{generate, Diagnostics, Layout, LayoutOptions, NotchPolicy, Numbering};
pub use polygon::Polygon;
pub use r2::R2;
pub use rows::{RowOrder, RowSpacing};
pub use section::{Direction, GeneratedSeat, RowSpec, Section};
pub use validator::{validate, validate_along, SeatRecord, ValidationReport};

/// Parse a log level string into LevelFilter.
pub fn parse_log_level(level: Option<&str>) -> log::LevelFilter {
    match level {
        Some("error") => log::LevelFilter::Error,
        Some("warn") => log::LevelFilter::Warn,
        Some("info") | Some("") | None => log::LevelFilter::Info,
        Some("debug") => log::LevelFilter::Debug,
        Some("trace") => log::LevelFilter::Trace,
        Some(level) => panic!("invalid log level: {}", level),
    }
}
