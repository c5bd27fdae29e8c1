//! 2D affine transforms for the render pipeline.
//!
//! Screen coordinates: origin top-left, y down. A positive rotation angle
//! therefore turns the image clockwise on screen.
//!
//! ```text
//! | a c e |
//! | b d f |
//! | 0 0 1 |
//! ```

/// A 2D affine transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    /// Rotation about the origin, clockwise on screen for positive angles.
    ///
    /// Quarter turns use exact sine/cosine values so pixel grids map onto
    /// pixel grids without floating point drift.
    pub fn rotate_degrees(degrees: f64) -> Self {
        let (sin, cos) = match degrees.rem_euclid(360.0) {
            r if r == 0.0 => (0.0, 1.0),
            r if r == 90.0 => (1.0, 0.0),
            r if r == 180.0 => (0.0, -1.0),
            r if r == 270.0 => (-1.0, 0.0),
            _ => degrees.to_radians().sin_cos(),
        };
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Rotation about `(cx, cy)`.
    pub fn rotate_about(degrees: f64, cx: f64, cy: f64) -> Self {
        Self::translate(cx, cy)
            .then(&Self::rotate_degrees(degrees))
            .then(&Self::translate(-cx, -cy))
    }

    /// `self * other`: `other` is applied to points first.
    pub fn then(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Inverse transform, or `None` when the matrix is singular.
    pub fn invert(&self) -> Option<Self> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < f64::EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_identity() {
        assert!(Affine::default().is_identity());
        assert_eq!(Affine::IDENTITY.apply(3.0, 4.0), (3.0, 4.0));
    }

    #[test]
    fn test_quarter_turn_is_exact_and_clockwise() {
        let r = Affine::rotate_degrees(90.0);
        // +x axis turns to +y (down the screen)
        assert_eq!(r.apply(1.0, 0.0), (0.0, 1.0));
        assert_eq!(r.apply(0.0, 1.0), (-1.0, 0.0));
    }

    #[test]
    fn test_negative_quarter_turns_normalize() {
        assert_eq!(Affine::rotate_degrees(-90.0), Affine::rotate_degrees(270.0));
        assert_eq!(Affine::rotate_degrees(-360.0), Affine::IDENTITY);
        assert_eq!(Affine::rotate_degrees(720.0), Affine::IDENTITY);
    }

    #[test]
    fn test_rotate_about_keeps_center_fixed() {
        let r = Affine::rotate_about(90.0, 50.0, 25.0);
        assert_point(r.apply(50.0, 25.0), (50.0, 25.0));
        // Point right of the center ends up below it
        assert_point(r.apply(60.0, 25.0), (50.0, 35.0));
    }

    #[test]
    fn test_arbitrary_angle() {
        let r = Affine::rotate_degrees(45.0);
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert_point(r.apply(1.0, 0.0), (s, s));
    }

    #[test]
    fn test_invert_round_trip() {
        let m = Affine::rotate_about(30.0, 12.0, 7.0).then(&Affine::translate(3.0, -2.0));
        let inv = m.invert().unwrap();

        let (x, y) = m.apply(5.5, 9.25);
        assert_point(inv.apply(x, y), (5.5, 9.25));
    }

    #[test]
    fn test_singular_matrix() {
        let m = Affine {
            a: 0.0,
            d: 0.0,
            ..Affine::IDENTITY
        };
        assert!(m.invert().is_none());
    }

    #[test]
    fn test_then_order() {
        // Translate first, then rotate
        let m = Affine::rotate_degrees(90.0).then(&Affine::translate(1.0, 0.0));
        assert_eq!(m.apply(0.0, 0.0), (0.0, 1.0));
    }
}
