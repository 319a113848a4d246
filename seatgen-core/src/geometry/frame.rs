//! Row-aligned coordinate frame.
//!
//! `u` runs along the rows, `v` runs across them (front to back). Downstream
//! layout code works in this frame so it can treat every section as if its
//! rows were horizontal.

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::r2::R2;

/// A point expressed in a [`Frame`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Uv {
    pub u: f64,
    pub v: f64,
}

/// Rotation about the origin by `angle` radians; caches its sine and cosine.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub angle: f64,
    cos: f64,
    sin: f64,
}

impl Frame {
    pub fn new(angle: f64) -> Self {
        Frame { angle, cos: angle.cos(), sin: angle.sin() }
    }

    /// Unit vector along the rows, in canvas space.
    pub fn row_dir(&self) -> R2<f64> {
        R2 { x: self.cos, y: self.sin }
    }

    pub fn to_frame(&self, p: &R2<f64>) -> Uv {
        Uv {
            u: p.x * self.cos + p.y * self.sin,
            v: -p.x * self.sin + p.y * self.cos,
        }
    }

    pub fn from_frame(&self, uv: &Uv) -> R2<f64> {
        R2 {
            x: uv.u * self.cos - uv.v * self.sin,
            y: uv.u * self.sin + uv.v * self.cos,
        }
    }
}

pub fn to_rotated_frame(p: &R2<f64>, angle: f64) -> Uv {
    Frame::new(angle).to_frame(p)
}

pub fn from_rotated_frame(uv: &Uv, angle: f64) -> R2<f64> {
    Frame::new(angle).from_frame(uv)
}
