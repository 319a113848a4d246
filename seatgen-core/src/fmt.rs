use crate::{frame::Uv, r2::R2};

/// Fixed-precision rendering with a leading space for non-negative values, so columns line up.
pub trait Fmt {
    fn s(&self, n: usize) -> String;
}

impl Fmt for f64 {
    fn s(&self, n: usize) -> String {
        let rendered = format!("{:.1$}", self, n);
        format!("{}{}", if rendered.starts_with('-') { "" } else { " " }, rendered)
    }
}

impl Fmt for R2<f64> {
    fn s(&self, n: usize) -> String {
        format!("({},{})", self.x.s(n), self.y.s(n))
    }
}

impl Fmt for Uv {
    fn s(&self, n: usize) -> String {
        format!("u={} v={}", self.u.s(n), self.v.s(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_sign() {
        assert_eq!(1.5.s(2), " 1.50");
        assert_eq!((-1.5).s(1), "-1.5");
        assert_eq!(R2::new(3., -4.).s(1), "( 3.0,-4.0)");
    }
}
