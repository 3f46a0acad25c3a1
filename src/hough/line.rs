//! Detected lines in normal form `x·cos θ + y·sin θ = ρ`.
use super::accumulator::Accumulator;
use super::peaks::Peak;
use crate::angle::angular_difference;
use nalgebra::Vector3;
use serde::Serialize;
use std::fmt;

const CLIP_EPS: f32 = 1e-3;

/// A line built from one accumulator peak. Immutable once constructed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Line2d {
    rho: f32,
    theta: f32,
    votes: u32,
    theta_bin: usize,
    rho_bin: usize,
    /// Segment of the infinite line inside the image, `None` if it misses.
    endpoints: Option<[[f32; 2]; 2]>,
}

impl Line2d {
    /// Build from a peak, clipping against a `width × height` image.
    pub fn from_peak(acc: &Accumulator, peak: Peak, width: usize, height: usize) -> Self {
        let rho = acc.rho_of(peak.rho_bin);
        let theta = acc.theta_of(peak.theta_bin);
        let endpoints = clip_to_image(&normal_form(rho, theta), width, height);
        Self {
            rho,
            theta,
            votes: peak.votes,
            theta_bin: peak.theta_bin,
            rho_bin: peak.rho_bin,
            endpoints,
        }
    }

    pub fn rho(&self) -> f32 {
        self.rho
    }

    /// Normal angle in radians, [0, π).
    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn votes(&self) -> u32 {
        self.votes
    }

    pub fn theta_bin(&self) -> usize {
        self.theta_bin
    }

    pub fn rho_bin(&self) -> usize {
        self.rho_bin
    }

    pub fn endpoints(&self) -> Option<[[f32; 2]; 2]> {
        self.endpoints
    }

    /// Homogeneous coefficients `(a, b, c)` with `a·x + b·y + c = 0` and
    /// `a² + b² = 1`.
    pub fn homogeneous(&self) -> Vector3<f32> {
        normal_form(self.rho, self.theta)
    }

    /// Unit direction along the line.
    pub fn direction(&self) -> [f32; 2] {
        [-self.theta.sin(), self.theta.cos()]
    }

    /// Unsigned angle between the two lines in [0, π/2].
    pub fn angle_to(&self, other: &Line2d) -> f32 {
        angular_difference(self.theta, other.theta)
    }

    /// Perpendicular distance from `(x, y)`.
    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        self.homogeneous().dot(&Vector3::new(x, y, 1.0)).abs()
    }
}

impl fmt::Display for Line2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Line2d(rho={:.1}, theta={:.1}°, votes={})",
            self.rho,
            self.theta.to_degrees(),
            self.votes
        )?;
        if let Some([p0, p1]) = self.endpoints {
            write!(
                f,
                " ({:.1}, {:.1}) -> ({:.1}, {:.1})",
                p0[0], p0[1], p1[0], p1[1]
            )?;
        }
        Ok(())
    }
}

#[inline]
fn normal_form(rho: f32, theta: f32) -> Vector3<f32> {
    Vector3::new(theta.cos(), theta.sin(), -rho)
}

/// Intersect a homogeneous line with the pixel rectangle
/// `[0, width-1] × [0, height-1]` and return the two farthest intersection
/// points. A line that only grazes a corner yields a zero-length segment.
pub fn clip_to_image(line: &Vector3<f32>, width: usize, height: usize) -> Option<[[f32; 2]; 2]> {
    if width == 0 || height == 0 {
        return None;
    }
    let (x_max, y_max) = ((width - 1) as f32, (height - 1) as f32);
    let borders = [
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, -x_max),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 1.0, -y_max),
    ];

    let mut points: Vec<[f32; 2]> = Vec::with_capacity(4);
    for border in &borders {
        let p = line.cross(border);
        if p.z.abs() < 1e-9 {
            continue;
        }
        let (x, y) = (p.x / p.z, p.y / p.z);
        let inside = (-CLIP_EPS..=x_max + CLIP_EPS).contains(&x)
            && (-CLIP_EPS..=y_max + CLIP_EPS).contains(&y);
        if inside {
            points.push([x.clamp(0.0, x_max), y.clamp(0.0, y_max)]);
        }
    }

    let first = *points.first()?;
    let mut best = [first, first];
    let mut best_d = 0.0f32;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let d = (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2);
            if d > best_d {
                best_d = d;
                best = [*a, *b];
            }
        }
    }
    Some(best)
}
