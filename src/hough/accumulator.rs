//! Polar vote grid indexed by (θ-bin, ρ-bin).
//!
//! θ covers [0, π) in `theta_bins` uniform steps; ρ covers
//! [−ρ_max, ρ_max] where ρ_max is the image diagonal, in steps of
//! `rho_resolution` pixels. Bin `rho_offset` holds ρ = 0.
use crate::image::{EdgeMap, GrayImageU8};
use rayon::prelude::*;
use std::f32::consts::PI;

/// Edge pixels voted per rayon task.
const VOTE_CHUNK: usize = 1024;

#[derive(Clone, Debug, PartialEq)]
pub struct Accumulator {
    theta_bins: usize,
    rho_bins: usize,
    rho_offset: usize,
    rho_max: f32,
    rho_resolution: f32,
    votes: Vec<u32>,
}

impl Accumulator {
    /// Zeroed accumulator for a `width × height` image.
    ///
    /// Callers validate `theta_bins > 0` and a positive finite resolution.
    pub fn new(width: usize, height: usize, theta_bins: usize, rho_resolution: f32) -> Self {
        let rho_max = ((width * width + height * height) as f32).sqrt();
        let rho_offset = (rho_max / rho_resolution).ceil() as usize;
        let rho_bins = 2 * rho_offset + 1;
        Self {
            theta_bins,
            rho_bins,
            rho_offset,
            rho_max,
            rho_resolution,
            votes: vec![0; theta_bins * rho_bins],
        }
    }

    pub fn theta_bins(&self) -> usize {
        self.theta_bins
    }

    pub fn rho_bins(&self) -> usize {
        self.rho_bins
    }

    pub fn rho_max(&self) -> f32 {
        self.rho_max
    }

    pub fn rho_resolution(&self) -> f32 {
        self.rho_resolution
    }

    /// Angle (radians) at the start of θ-bin `t`.
    #[inline]
    pub fn theta_of(&self, t: usize) -> f32 {
        t as f32 * PI / self.theta_bins as f32
    }

    /// Signed distance at the centre of ρ-bin `r`.
    #[inline]
    pub fn rho_of(&self, r: usize) -> f32 {
        (r as f32 - self.rho_offset as f32) * self.rho_resolution
    }

    /// ρ-bin containing `rho`, rounding to the nearest bin centre.
    #[inline]
    pub fn rho_bin(&self, rho: f32) -> Option<usize> {
        rho_bin(rho, self.rho_resolution, self.rho_offset, self.rho_bins)
    }

    #[inline]
    pub fn votes(&self, t: usize, r: usize) -> u32 {
        self.votes[t * self.rho_bins + r]
    }

    /// Votes of θ-bin `t` across all ρ-bins.
    pub fn theta_row(&self, t: usize) -> &[u32] {
        &self.votes[t * self.rho_bins..(t + 1) * self.rho_bins]
    }

    pub fn total_votes(&self) -> u64 {
        self.votes.iter().map(|&v| v as u64).sum()
    }

    /// Highest cell as `(theta_bin, rho_bin, votes)`; the first one in
    /// row-major order wins ties.
    pub fn max_cell(&self) -> Option<(usize, usize, u32)> {
        let mut best: Option<(usize, usize, u32)> = None;
        for (i, &v) in self.votes.iter().enumerate() {
            if best.map_or(true, |(_, _, b)| v > b) {
                best = Some((i / self.rho_bins, i % self.rho_bins, v));
            }
        }
        best
    }

    /// Cast one vote per θ-bin for every edge pixel.
    ///
    /// Pixel chunks vote into private grids that are summed at the end, so
    /// no update is lost and the result does not depend on scheduling.
    pub fn vote(&mut self, edges: &EdgeMap) {
        let pixels = edges.edge_pixels();
        if pixels.is_empty() {
            return;
        }
        let trig: Vec<(f32, f32)> = (0..self.theta_bins)
            .map(|t| {
                let theta = self.theta_of(t);
                (theta.cos(), theta.sin())
            })
            .collect();
        let (res, offset, rho_bins) = (self.rho_resolution, self.rho_offset, self.rho_bins);
        let len = self.votes.len();

        let partial = pixels
            .par_chunks(VOTE_CHUNK)
            .fold(
                || vec![0u32; len],
                |mut local, chunk| {
                    for &(x, y) in chunk {
                        let (fx, fy) = (x as f32, y as f32);
                        for (t, &(c, s)) in trig.iter().enumerate() {
                            if let Some(r) = rho_bin(fx * c + fy * s, res, offset, rho_bins) {
                                local[t * rho_bins + r] += 1;
                            }
                        }
                    }
                    local
                },
            )
            .reduce(
                || vec![0u32; len],
                |mut a, b| {
                    for (dst, src) in a.iter_mut().zip(b) {
                        *dst += src;
                    }
                    a
                },
            );

        for (dst, src) in self.votes.iter_mut().zip(partial) {
            *dst += src;
        }
    }

    /// Visualization with θ along rows and ρ along columns, linearly scaled
    /// so the strongest cell maps to 255.
    pub fn to_gray_image(&self) -> GrayImageU8 {
        let max = self.votes.iter().copied().max().unwrap_or(0).max(1) as f32;
        let mut out = GrayImageU8::zeros(self.rho_bins, self.theta_bins);
        for t in 0..self.theta_bins {
            for (r, &v) in self.theta_row(t).iter().enumerate() {
                out.set(r, t, (v as f32 * 255.0 / max).round() as u8);
            }
        }
        out
    }
}

#[inline]
fn rho_bin(rho: f32, resolution: f32, offset: usize, bins: usize) -> Option<usize> {
    let idx = (rho / resolution).round() as isize + offset as isize;
    (idx >= 0 && (idx as usize) < bins).then_some(idx as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_covers_the_diagonal() {
        let acc = Accumulator::new(30, 40, 180, 1.0);
        assert_eq!(acc.rho_max(), 50.0);
        assert_eq!(acc.rho_bins(), 101);
        assert_eq!(acc.rho_of(0), -50.0);
        assert_eq!(acc.rho_of(50), 0.0);
        assert_eq!(acc.rho_bin(0.4), Some(50));
        assert_eq!(acc.rho_bin(-50.0), Some(0));
        assert_eq!(acc.rho_bin(51.0), None);
        assert!((acc.theta_of(90) - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn single_pixel_votes_once_per_theta() {
        let mut edges = EdgeMap::new(20, 10);
        edges.set(7, 3, true);
        let mut acc = Accumulator::new(20, 10, 180, 1.0);
        acc.vote(&edges);
        assert_eq!(acc.total_votes(), 180);
        for t in 0..180 {
            assert_eq!(acc.theta_row(t).iter().sum::<u32>(), 1, "theta bin {t}");
        }
        // θ = 0 → ρ = x.
        let r0 = acc.rho_bin(7.0).unwrap();
        assert_eq!(acc.votes(0, r0), 1);
    }

    #[test]
    fn chunked_voting_matches_serial_count() {
        let (w, h) = (64, 48);
        let mut edges = EdgeMap::new(w, h);
        for y in 0..h {
            for x in 0..w {
                if (x * 3 + y * 5) % 7 == 0 {
                    edges.set(x, y, true);
                }
            }
        }
        let mut acc = Accumulator::new(w, h, 90, 2.0);
        acc.vote(&edges);
        assert_eq!(acc.total_votes(), (edges.count() * 90) as u64);
    }

    #[test]
    fn visualization_scales_to_full_range() {
        let mut edges = EdgeMap::new(8, 8);
        for x in 0..8 {
            edges.set(x, 4, true);
        }
        let mut acc = Accumulator::new(8, 8, 180, 1.0);
        acc.vote(&edges);
        let img = acc.to_gray_image();
        assert_eq!(img.width(), acc.rho_bins());
        assert_eq!(img.height(), 180);
        assert_eq!(img.data().iter().copied().max(), Some(255));
    }
}
