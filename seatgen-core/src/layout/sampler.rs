//! Usable row extent of a section polygon at a given slice.

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{frame::Frame, polygon::Polygon};

/// Interval along the row axis (`u`), `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub fn new(min: f64, max: f64) -> Self {
        Span { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn mid(&self) -> f64 {
        (self.min + self.max) / 2.
    }

    /// Trim `fraction` of the width from each end.
    pub fn shrink(&self, fraction: f64) -> Span {
        let inset = self.width() * fraction;
        Span {
            min: self.min + inset,
            max: self.max - inset,
        }
    }
}

/// A polygon pre-rotated into a row frame, sliced repeatedly at different `v`.
#[derive(Debug, Clone)]
pub struct Sampler {
    pub frame: Frame,
    rotated: Polygon,
}

impl Sampler {
    pub fn new(polygon: &Polygon, frame: Frame) -> Self {
        Sampler {
            frame,
            rotated: polygon.in_frame(&frame),
        }
    }

    /// The polygon's extent across rows (`v`).
    pub fn v_range(&self) -> Span {
        let b = self.rotated.bounds();
        Span::new(b.min_y, b.max_y)
    }

    /// The polygon's extent along rows (`u`).
    pub fn u_range(&self) -> Span {
        let b = self.rotated.bounds();
        Span::new(b.min_x, b.max_x)
    }

    /// Sorted `u` values where the slice crosses the boundary.
    pub fn crossings(&self, v: f64) -> Vec<f64> {
        self.rotated.at_y(v)
    }

    /// Outermost pair of boundary crossings; `None` if the slice misses the polygon.
    ///
    /// A concave notch produces more than two crossings; the interior ones are
    /// ignored here (see [`Sampler::segments`]).
    pub fn extent(&self, v: f64) -> Option<Span> {
        let us = self.crossings(v);
        match (us.first(), us.last()) {
            (Some(&min), Some(&max)) if us.len() >= 2 => Some(Span::new(min, max)),
            _ => None,
        }
    }

    /// Every inside run of the slice, left to right (even-odd pairing of crossings).
    pub fn segments(&self, v: f64) -> Vec<Span> {
        self.crossings(v)
            .chunks_exact(2)
            .map(|pair| Span::new(pair[0], pair[1]))
            .filter(|span| span.width() > 0.)
            .collect()
    }
}

pub fn edge_extent_at_slice(polygon: &Polygon, frame: &Frame, v: f64) -> Option<Span> {
    Sampler::new(polygon, *frame).extent(v)
}

pub fn segments(polygon: &Polygon, frame: &Frame, v: f64) -> Vec<Span> {
    Sampler::new(polygon, *frame).segments(v)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::r2::R2;

    fn notched() -> Polygon {
        Polygon::new(vec![
            R2::new(0., 0.),
            R2::new(100., 0.),
            R2::new(100., 50.),
            R2::new(60., 50.),
            R2::new(50., 30.),
            R2::new(40., 50.),
            R2::new(0., 50.),
        ])
    }

    #[test]
    fn test_extent_outer_pair_only() {
        let frame = Frame::new(0.);
        let span = edge_extent_at_slice(&notched(), &frame, 40.).unwrap();
        assert_relative_eq!(span.min, 0.);
        assert_relative_eq!(span.max, 100.);
    }

    #[test]
    fn test_segments_split_at_notch() {
        let frame = Frame::new(0.);
        let spans = segments(&notched(), &frame, 40.);
        assert_eq!(spans.len(), 2);
        assert_relative_eq!(spans[0].min, 0.);
        assert_relative_eq!(spans[0].max, 45.);
        assert_relative_eq!(spans[1].min, 55.);
        assert_relative_eq!(spans[1].max, 100.);

        // Below the notch, a single run
        assert_eq!(segments(&notched(), &frame, 10.).len(), 1);
    }

    #[test]
    fn test_slice_outside() {
        let frame = Frame::new(0.);
        assert_eq!(edge_extent_at_slice(&notched(), &frame, 60.), None);
        assert_eq!(edge_extent_at_slice(&notched(), &frame, -0.5), None);
        assert!(segments(&notched(), &frame, 60.).is_empty());
    }

    #[test]
    fn test_rotated_frame() {
        // Tall rectangle with rows running along +y
        let poly = Polygon::new(vec![
            R2::new(0., 0.),
            R2::new(20., 0.),
            R2::new(20., 80.),
            R2::new(0., 80.),
        ]);
        let sampler = Sampler::new(&poly, Frame::new(FRAC_PI_2));
        let v = sampler.v_range();
        // v = -x
        assert_relative_eq!(v.min, -20., epsilon = 1e-9);
        assert_relative_eq!(v.max, 0., epsilon = 1e-9);
        let span = sampler.extent(-10.).unwrap();
        assert_relative_eq!(span.min, 0., epsilon = 1e-9);
        assert_relative_eq!(span.max, 80., epsilon = 1e-9);
        let u = sampler.u_range();
        assert_relative_eq!(u.width(), 80., epsilon = 1e-9);
    }

    #[test]
    fn test_span_shrink() {
        let s = Span::new(0., 100.).shrink(0.05);
        assert_relative_eq!(s.min, 5.);
        assert_relative_eq!(s.max, 95.);
        assert_relative_eq!(s.mid(), 50.);
    }
}
