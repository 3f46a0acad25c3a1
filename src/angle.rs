//! Angle utilities shared by the gradient, NMS and Hough stages.
use std::f32::consts::{FRAC_PI_2, PI};

/// Normalizes an angle into the range [0, π).
#[inline]
pub fn normalize_half_pi(angle: f32) -> f32 {
    let mut norm = angle.rem_euclid(PI);
    if norm >= PI {
        norm -= PI;
    }
    if norm >= PI - 1e-6 {
        0.0
    } else {
        norm
    }
}

/// Computes the smallest unsigned angular difference between two angles,
/// treating antipodal directions as equivalent (i.e. π apart → 0).
#[inline]
pub fn angular_difference(a: f32, b: f32) -> f32 {
    let mut diff = (a - b).abs();
    if diff > PI {
        diff = diff.rem_euclid(PI);
    }
    if diff > FRAC_PI_2 {
        PI - diff
    } else {
        diff
    }
}

/// One of the four principal gradient directions used by non-maximum
/// suppression. Offsets are in image coordinates (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction4 {
    /// 0°: compare left/right.
    Horizontal,
    /// 45°: gradient along (+x, +y).
    Diagonal,
    /// 90°: compare up/down.
    Vertical,
    /// 135°: gradient along (−x, +y).
    AntiDiagonal,
}

impl Direction4 {
    /// Quantize an orientation (any range, π-periodic) to the nearest of 0°,
    /// 45°, 90° or 135°.
    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        let deg = normalize_half_pi(angle).to_degrees();
        if !(22.5..157.5).contains(&deg) {
            Direction4::Horizontal
        } else if deg < 67.5 {
            Direction4::Diagonal
        } else if deg < 112.5 {
            Direction4::Vertical
        } else {
            Direction4::AntiDiagonal
        }
    }

    /// Unit step `(dx, dy)` along the gradient; the opposite neighbor is the
    /// negated step.
    #[inline]
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction4::Horizontal => (1, 0),
            Direction4::Diagonal => (1, 1),
            Direction4::Vertical => (0, 1),
            Direction4::AntiDiagonal => (-1, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn normalize_half_pi_basic() {
        assert!(approx_eq(normalize_half_pi(0.5), 0.5));
        assert!(approx_eq(normalize_half_pi(-FRAC_PI_4), 3.0 * FRAC_PI_4));
        assert!(approx_eq(normalize_half_pi(PI), 0.0));
        assert!(approx_eq(normalize_half_pi(3.0 * PI), 0.0));
    }

    #[test]
    fn angular_difference_handles_wrap() {
        assert!(approx_eq(angular_difference(0.0, PI), 0.0));
        assert!(approx_eq(angular_difference(0.0, FRAC_PI_2), FRAC_PI_2));
        assert!(approx_eq(
            angular_difference(FRAC_PI_4, -FRAC_PI_4),
            FRAC_PI_2
        ));
        assert!(approx_eq(angular_difference(0.1, PI - 0.1), 0.2));
    }

    #[test]
    fn quantizes_to_four_directions() {
        let cases = [
            (0.0f32, Direction4::Horizontal),
            (10.0, Direction4::Horizontal),
            (170.0, Direction4::Horizontal),
            (180.0, Direction4::Horizontal),
            (-10.0, Direction4::Horizontal),
            (30.0, Direction4::Diagonal),
            (60.0, Direction4::Diagonal),
            (90.0, Direction4::Vertical),
            (-90.0, Direction4::Vertical),
            (120.0, Direction4::AntiDiagonal),
            (-45.0, Direction4::AntiDiagonal),
            (225.0, Direction4::Diagonal),
        ];
        for (deg, want) in cases {
            assert_eq!(Direction4::from_angle(deg.to_radians()), want, "{deg}°");
        }
    }
}
