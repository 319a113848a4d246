use std::fmt::Display;

use derive_more::From;
use itertools::Itertools;
use log::debug;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    error::{LayoutError, Result},
    frame::Frame,
    r2::R2,
};

/// Polygons with less area than this are treated as degenerate.
pub const MIN_AREA: f64 = 1e-9;

/// Closed boundary of a seating section; the last vertex connects back to the first.
#[derive(Debug, Clone, From, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Polygon {
    pub vertices: Vec<R2<f64>>,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> R2<f64> {
        R2 {
            x: (self.min_x + self.max_x) / 2.,
            y: (self.min_y + self.max_y) / 2.,
        }
    }

    /// Smallest box containing both.
    pub fn union(&self, o: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(o.min_x),
            max_x: self.max_x.max(o.max_x),
            min_y: self.min_y.min(o.min_y),
            max_y: self.max_y.max(o.max_y),
        }
    }
}

impl Polygon {
    pub fn new(vertices: Vec<R2<f64>>) -> Self {
        assert!(vertices.len() >= 3, "Polygon must have at least 3 vertices");
        Polygon { vertices }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Check the polygon can be laid out: at least 3 finite vertices enclosing non-zero area.
    ///
    /// Simplicity (no self-intersections) is assumed, not checked; see [`Polygon::is_self_intersecting`].
    pub fn validate(&self) -> Result<()> {
        let n = self.vertices.len();
        if n < 3 {
            return Err(LayoutError::InvalidGeometry(format!(
                "polygon needs at least 3 vertices, found {}",
                n
            )));
        }
        if let Some((idx, v)) = self.vertices.iter().find_position(|v| !v.is_finite()) {
            return Err(LayoutError::InvalidGeometry(format!(
                "vertex {} is not finite: {}",
                idx, v
            )));
        }
        let area = self.area();
        if area < MIN_AREA {
            return Err(LayoutError::InvalidGeometry(format!(
                "polygon is degenerate (area {:e})",
                area
            )));
        }
        Ok(())
    }

    /// Edges as `(start, end)` pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (&R2<f64>, &R2<f64>)> + '_ {
        self.vertices.iter().circular_tuple_windows()
    }

    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for v in &self.vertices {
            bounds.min_x = bounds.min_x.min(v.x);
            bounds.max_x = bounds.max_x.max(v.x);
            bounds.min_y = bounds.min_y.min(v.y);
            bounds.max_y = bounds.max_y.max(v.y);
        }
        bounds
    }

    /// Returns x-coordinates where polygon edges cross the given y-value, sorted ascending.
    /// Horizontal edges are skipped (treated as tangent points).
    /// Uses half-open interval [y_min, y_max) to avoid double-counting vertices.
    pub fn at_y(&self, y: f64) -> Vec<f64> {
        let mut xs = Vec::new();

        for (v0, v1) in self.edges() {
            // Skip horizontal edges (they don't represent true crossings)
            if v0.y == v1.y {
                continue;
            }

            let (y_min, y_max) = if v0.y < v1.y {
                (v0.y, v1.y)
            } else {
                (v1.y, v0.y)
            };

            if y_min <= y && y < y_max {
                let t = (y - v0.y) / (v1.y - v0.y);
                xs.push(v0.x + t * (v1.x - v0.x));
            }
        }

        xs.sort_by_key(|x| OrderedFloat(*x));
        xs
    }

    /// Check if a point is inside the polygon using ray casting algorithm.
    /// Casts a horizontal ray to the right and counts edge crossings (even-odd rule).
    pub fn contains(&self, p: &R2<f64>) -> bool {
        let mut crossings = 0;

        for (v0, v1) in self.edges() {
            // Skip if edge is entirely above or below the ray
            let (y_min, y_max) = if v0.y < v1.y { (v0.y, v1.y) } else { (v1.y, v0.y) };
            if p.y < y_min || p.y >= y_max {
                continue;
            }

            let t = (p.y - v0.y) / (v1.y - v0.y);
            let x_crossing = v0.x + t * (v1.x - v0.x);

            if x_crossing > p.x {
                crossings += 1;
            }
        }

        crossings % 2 == 1
    }

    /// Shoelace sum / 2; positive for counter-clockwise winding (y-up).
    pub fn signed_area(&self) -> f64 {
        self.edges().map(|(a, b)| a.x * b.y - b.x * a.y).sum::<f64>() * 0.5
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Vertex mean.
    pub fn center(&self) -> R2<f64> {
        let n = self.vertices.len() as f64;
        let sum = self
            .vertices
            .iter()
            .fold(R2::new(0., 0.), |acc, v| acc + *v);
        sum / n
    }

    /// Area centroid; falls back to the vertex mean for degenerate polygons.
    pub fn centroid(&self) -> R2<f64> {
        let a = self.signed_area();
        if a.abs() < MIN_AREA {
            return self.center();
        }
        let (cx, cy) = self.edges().fold((0., 0.), |(cx, cy), (p, q)| {
            let cross = p.x * q.y - q.x * p.y;
            (cx + (p.x + q.x) * cross, cy + (p.y + q.y) * cross)
        });
        R2 {
            x: cx / (6. * a),
            y: cy / (6. * a),
        }
    }

    /// Angle (radians, `atan2` convention) of the longest edge; the first longest edge wins ties.
    ///
    /// The edge is taken in vertex order, so the result depends on where the vertex list
    /// starts and which way it winds: the same rectangle listed from its opposite corner yields
    /// an angle π apart, which mirrors row order and numbering direction. Pass an explicit
    /// axis when the vertex order isn't controlled.
    pub fn dominant_edge_angle(&self) -> f64 {
        let mut best_len = 0.;
        let mut best_angle = 0.;
        for (v0, v1) in self.edges() {
            let d = *v1 - *v0;
            let len = d.norm();
            if len > best_len {
                best_len = len;
                best_angle = d.y.atan2(d.x);
            }
        }
        debug!("Polygon::dominant_edge_angle: longest edge {:.3} at {:.4} rad", best_len, best_angle);
        best_angle
    }

    /// This polygon expressed in `frame` coordinates (`x` = u along rows, `y` = v across rows).
    pub fn in_frame(&self, frame: &Frame) -> Polygon {
        Polygon {
            vertices: self
                .vertices
                .iter()
                .map(|p| {
                    let uv = frame.to_frame(p);
                    R2 { x: uv.u, y: uv.v }
                })
                .collect(),
        }
    }

    /// Check if this polygon self-intersects (any non-adjacent edges cross).
    pub fn is_self_intersecting(&self) -> bool {
        let n = self.vertices.len();
        if n < 4 {
            return false; // Triangles can't self-intersect
        }

        for i in 0..n {
            let a0 = &self.vertices[i];
            let a1 = &self.vertices[(i + 1) % n];

            for j in (i + 2)..n {
                // Skip the closing edge, which is adjacent to edge 0
                if i == 0 && j == n - 1 {
                    continue;
                }

                let b0 = &self.vertices[j];
                let b1 = &self.vertices[(j + 1) % n];

                if Self::segments_intersect(a0, a1, b0, b1) {
                    return true;
                }
            }
        }
        false
    }

    /// Check if two line segments properly cross (touching endpoints don't count).
    fn segments_intersect(a0: &R2<f64>, a1: &R2<f64>, b0: &R2<f64>, b1: &R2<f64>) -> bool {
        let d1 = Self::cross_sign(b0, b1, a0);
        let d2 = Self::cross_sign(b0, b1, a1);
        let d3 = Self::cross_sign(a0, a1, b0);
        let d4 = Self::cross_sign(a0, a1, b1);

        ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
            && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    }

    /// Cross product sign: (b - a) × (c - a)
    fn cross_sign(a: &R2<f64>, b: &R2<f64>, c: &R2<f64>) -> f64 {
        (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
    }
}

/// Free-function form of [`Polygon::contains`].
pub fn point_in_polygon(p: &R2<f64>, polygon: &Polygon) -> bool {
    polygon.contains(p)
}

impl Display for Polygon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verts: Vec<String> = self
            .vertices
            .iter()
            .map(|v| format!("({:.3}, {:.3})", v.x, v.y))
            .collect();
        write!(f, "Polygon[{}]", verts.join(", "))
    }
}

#[cfg(test)]
mod tests;
