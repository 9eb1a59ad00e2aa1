use std::ops::{Add, Mul, Neg, Sub};

/// 2D vector in tile units. `x` grows east, `y` grows south (screen convention).
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The vector rotated a quarter turn clockwise on screen: `(-y, x)`.
    ///
    /// For a facing direction this yields the camera plane direction, so that
    /// positive camera-space offsets land on the right of the screen.
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Rotate by `angle` radians with the standard 2D rotation matrix.
    /// Positive angles turn clockwise on screen because `y` points down.
    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// The grid cell containing this point.
    pub fn cell(self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }

    /// Component-wise fractional part, in `[0, 1)`.
    pub fn fract(self) -> Self {
        Self::new(self.x - self.x.floor(), self.y - self.y.floor())
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn vec_approx_eq(a: Vec2, b: Vec2) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
    }

    #[test]
    fn rotate_round_trip() {
        let dir = Vec2::new(0.0, -1.0);
        let plane = Vec2::new(0.66, 0.0);
        for theta in [0.01, 0.3, 1.0, -2.5, 3.0] {
            assert!(vec_approx_eq(dir.rotate(theta).rotate(-theta), dir));
            assert!(vec_approx_eq(plane.rotate(theta).rotate(-theta), plane));
        }
    }

    #[test]
    fn rotation_preserves_length_and_perpendicularity() {
        let mut dir = Vec2::new(1.0, 0.0);
        let mut plane = Vec2::new(0.0, 0.66);
        for _ in 0..1000 {
            dir = dir.rotate(0.0173);
            plane = plane.rotate(0.0173);
            assert!((dir.length() - 1.0).abs() < 1e-9);
            assert!((plane.length() - 0.66).abs() < 1e-9);
            assert!(dir.dot(plane).abs() < 1e-9);
        }
    }

    #[test]
    fn quarter_turn_matches_perp() {
        let v = Vec2::new(0.0, -1.0);
        assert!(vec_approx_eq(v.rotate(FRAC_PI_2), v.perp()));
        assert_eq!(v.perp(), Vec2::new(1.0, 0.0));
        assert_eq!(v.dot(v.perp()), 0.0);
    }

    #[test]
    fn cell_floors_negative_coordinates() {
        assert_eq!(Vec2::new(2.5, 3.99).cell(), (2, 3));
        assert_eq!(Vec2::new(-0.25, 0.0).cell(), (-1, 0));
    }
}
