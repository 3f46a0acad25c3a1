//! Peak extraction with spatial non‑maximum suppression in (θ, ρ) bin space.
//!
//! Candidates are cells with at least `min_votes`. They are visited by vote
//! count, highest first; ties keep row-major (θ-major) order because the
//! sort is stable. A candidate is accepted unless an already accepted peak
//! lies within Chebyshev distance `radius` (no θ wrap-around). Accepted
//! peaks stamp their `(2·radius+1)²` neighborhood into a blocked mask, so
//! each later candidate is checked in O(1).
use super::accumulator::Accumulator;
use log::debug;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Peak {
    pub theta_bin: usize,
    pub rho_bin: usize,
    pub votes: u32,
}

impl Peak {
    /// Chebyshev distance in bin space.
    pub fn bin_distance(&self, other: &Peak) -> usize {
        self.theta_bin
            .abs_diff(other.theta_bin)
            .max(self.rho_bin.abs_diff(other.rho_bin))
    }
}

/// All cells with at least `min_votes`, strongest first, ties in row-major order.
pub fn candidates(acc: &Accumulator, min_votes: u32) -> Vec<Peak> {
    let mut out = Vec::new();
    for t in 0..acc.theta_bins() {
        for (r, &votes) in acc.theta_row(t).iter().enumerate() {
            if votes >= min_votes {
                out.push(Peak {
                    theta_bin: t,
                    rho_bin: r,
                    votes,
                });
            }
        }
    }
    out.sort_by(|a, b| b.votes.cmp(&a.votes));
    out
}

/// Greedy vote-ordered suppression; accepted peaks are returned strongest first.
pub fn extract_peaks(acc: &Accumulator, min_votes: u32, radius: usize) -> Vec<Peak> {
    let cands = candidates(acc, min_votes);
    let n_candidates = cands.len();
    let (t_bins, r_bins) = (acc.theta_bins(), acc.rho_bins());
    let mut blocked = vec![false; t_bins * r_bins];
    let mut accepted = Vec::new();

    for peak in cands {
        if blocked[peak.theta_bin * r_bins + peak.rho_bin] {
            continue;
        }
        let t_range =
            peak.theta_bin.saturating_sub(radius)..=(peak.theta_bin + radius).min(t_bins - 1);
        let r_lo = peak.rho_bin.saturating_sub(radius);
        let r_hi = (peak.rho_bin + radius).min(r_bins - 1);
        for t in t_range {
            blocked[t * r_bins + r_lo..=t * r_bins + r_hi].fill(true);
        }
        accepted.push(peak);
    }
    debug!(
        "Hough peaks: candidates={} accepted={} (min_votes={}, radius={})",
        n_candidates,
        accepted.len(),
        min_votes,
        radius
    );
    accepted
}
