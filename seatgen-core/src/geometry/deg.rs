use std::f64::consts::PI;

pub trait Deg {
    fn deg(&self) -> Self;
    fn rad(&self) -> Self;
    fn deg_str(&self) -> String;
}

impl Deg for f64 {
    /// Radians → degrees.
    fn deg(&self) -> f64 {
        self * 180.0 / PI
    }
    /// Degrees → radians.
    fn rad(&self) -> f64 {
        self * PI / 180.0
    }
    fn deg_str(&self) -> String {
        format!("{:.1}°", self.deg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deg() {
        assert_relative_eq!(PI.deg(), 180.);
        assert_relative_eq!(90_f64.rad(), PI / 2.);
        assert_eq!((-0.527_f64).deg_str(), "-30.2°");
    }
}
