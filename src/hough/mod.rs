//! Hough transform line detection.
//!
//! Every edge pixel votes once per θ-bin into a polar [`Accumulator`].
//! Peaks are extracted greedily by vote count with spatial non-maximum
//! suppression in bin space, then converted to [`Line2d`] in normal form
//! with endpoints clipped to the image.

pub mod accumulator;
pub mod line;
pub mod peaks;

pub use accumulator::Accumulator;
pub use line::{clip_to_image, Line2d};
pub use peaks::{extract_peaks, Peak};

use crate::error::PipelineError;
use crate::image::EdgeMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Tuning knobs for [`HoughLineDetector`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughParams {
    /// Minimum votes for a cell to become a candidate (>= 1).
    pub min_votes: i32,
    /// Chebyshev suppression radius in bins (>= 0).
    pub nms_radius: i32,
    /// Number of θ-bins over [0, π).
    pub theta_bins: usize,
    /// ρ-bin width in pixels.
    pub rho_resolution: f32,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            min_votes: 50,
            nms_radius: 15,
            theta_bins: 180,
            rho_resolution: 1.0,
        }
    }
}

impl HoughParams {
    pub fn new(min_votes: i32, nms_radius: i32) -> Self {
        Self {
            min_votes,
            nms_radius,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.min_votes < 1 {
            return Err(PipelineError::invalid_param(
                "min_votes",
                format!("must be at least 1, got {}", self.min_votes),
            ));
        }
        if self.nms_radius < 0 {
            return Err(PipelineError::invalid_param(
                "nms_radius",
                format!("must be non-negative, got {}", self.nms_radius),
            ));
        }
        if self.theta_bins == 0 {
            return Err(PipelineError::invalid_param(
                "theta_bins",
                "must be positive",
            ));
        }
        if !self.rho_resolution.is_finite() || self.rho_resolution <= 0.0 {
            return Err(PipelineError::invalid_param(
                "rho_resolution",
                format!("must be a positive finite value, got {}", self.rho_resolution),
            ));
        }
        Ok(())
    }
}

/// Line detector over binary edge maps with validated parameters.
#[derive(Clone, Debug)]
pub struct HoughLineDetector {
    params: HoughParams,
}

impl HoughLineDetector {
    pub fn new(params: HoughParams) -> Result<Self, PipelineError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &HoughParams {
        &self.params
    }

    /// Vote grid for `edges` without peak extraction.
    pub fn accumulate(&self, edges: &EdgeMap) -> Accumulator {
        let mut acc = Accumulator::new(
            edges.w,
            edges.h,
            self.params.theta_bins,
            self.params.rho_resolution,
        );
        acc.vote(edges);
        acc
    }

    /// Lines of `edges`, strongest first. When `accumulator_out` is given
    /// it receives the filled vote grid.
    pub fn detect(
        &self,
        edges: &EdgeMap,
        accumulator_out: Option<&mut Accumulator>,
    ) -> Vec<Line2d> {
        let start = Instant::now();
        let acc = self.accumulate(edges);
        let vote_ms = start.elapsed().as_secs_f64() * 1000.0;

        let lines: Vec<Line2d> = if edges.is_blank() {
            Vec::new()
        } else {
            extract_peaks(
                &acc,
                self.params.min_votes as u32,
                self.params.nms_radius as usize,
            )
            .into_iter()
            .map(|peak| Line2d::from_peak(&acc, peak, edges.w, edges.h))
            .collect()
        };

        debug!(
            "Hough {}x{}: edge_px={} bins={}x{} lines={} vote={:.3} ms total={:.3} ms",
            edges.w,
            edges.h,
            edges.count(),
            acc.theta_bins(),
            acc.rho_bins(),
            lines.len(),
            vote_ms,
            start.elapsed().as_secs_f64() * 1000.0
        );

        if let Some(out) = accumulator_out {
            *out = acc;
        }
        lines
    }
}

/// Detect lines with default θ/ρ resolution.
///
/// Fails with [`PipelineError::InvalidParameters`] when `min_votes < 1` or
/// `nms_radius < 0`. A blank edge map yields no lines.
pub fn detect_lines(
    edges: &EdgeMap,
    accumulator_out: Option<&mut Accumulator>,
    min_votes: i32,
    nms_radius: i32,
) -> Result<Vec<Line2d>, PipelineError> {
    let detector = HoughLineDetector::new(HoughParams::new(min_votes, nms_radius))?;
    Ok(detector.detect(edges, accumulator_out))
}

/// Vote grid for `edges` with the given resolution.
pub fn hough_accumulate(
    edges: &EdgeMap,
    theta_bins: usize,
    rho_resolution: f32,
) -> Result<Accumulator, PipelineError> {
    let params = HoughParams {
        theta_bins,
        rho_resolution,
        ..HoughParams::default()
    };
    Ok(HoughLineDetector::new(params)?.accumulate(edges))
}
