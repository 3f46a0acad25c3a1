//! Canny edge detector.
//!
//! Stages, each producing a fresh buffer:
//! 1. Convert 8-bit input to float (raw 0..255) and smooth with a Gaussian
//!    sized by `kernel_size` (3 → `GAUSSIAN_3X3`, 5 → `GAUSSIAN_5X5`, larger
//!    odd sizes → binomial).
//! 2. Sobel gradients with aperture `sobel_aperture` (independent of the
//!    smoothing size).
//! 3. Directional non-maximum suppression.
//! 4. Double threshold: `>= high` strong, `[low, high)` weak, else dropped.
//! 5. Hysteresis: weak pixels 8-connected (possibly through other weak
//!    pixels) to a strong pixel are promoted. Linking uses an explicit
//!    stack, so arbitrarily large connected regions cannot exhaust the call
//!    stack. Connectivity never wraps or reflects across the image border.
//!
//! All parameters are validated before any pixel is touched.
use super::grad::{sobel_gradients_with, Grad};
use super::nms::non_max_suppression;
use crate::border::BorderMode;
use crate::convolution::convolve_with_border;
use crate::diagnostics::TimingBreakdown;
use crate::error::{ensure_non_empty, PipelineError};
use crate::image::{EdgeMap, ImageF32, ImageU8};
use crate::kernels::gaussian_for_size;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Tuning knobs for [`Canny`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyParams {
    /// Lower hysteresis threshold (Sobel units of 8-bit intensity).
    pub low_threshold: f32,
    /// Upper hysteresis threshold; must exceed `low_threshold`.
    pub high_threshold: f32,
    /// Gaussian smoothing size (odd, >= 3).
    pub kernel_size: usize,
    /// Sobel aperture (3, 5 or 7).
    pub sobel_aperture: usize,
    /// Border policy for smoothing, gradients and NMS neighbor lookup.
    pub border: BorderMode,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            low_threshold: 70.0,
            high_threshold: 210.0,
            kernel_size: 3,
            sobel_aperture: 3,
            border: BorderMode::Reflect101,
        }
    }
}

impl CannyParams {
    pub fn new(low_threshold: f32, high_threshold: f32, kernel_size: usize) -> Self {
        Self {
            low_threshold,
            high_threshold,
            kernel_size,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        let (low, high) = (self.low_threshold, self.high_threshold);
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(PipelineError::InvalidThresholds { low, high });
        }
        let k = self.kernel_size;
        if k < 3 || k % 2 == 0 {
            return Err(PipelineError::InvalidKernel {
                rows: k,
                cols: k,
                len: k * k,
            });
        }
        if !matches!(self.sobel_aperture, 3 | 5 | 7) {
            return Err(PipelineError::invalid_param(
                "sobel_aperture",
                format!("must be 3, 5 or 7, got {}", self.sobel_aperture),
            ));
        }
        Ok(())
    }
}

/// Intermediate per-pixel class after the double threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeClass {
    Suppressed,
    Weak,
    Strong,
}

/// Pixel counts gathered while thresholding and linking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CannyStats {
    pub strong: usize,
    pub weak: usize,
    /// Weak pixels promoted by hysteresis.
    pub promoted: usize,
    /// Final edge pixels (`strong + promoted`).
    pub edge_pixels: usize,
}

/// Every intermediate artifact of one Canny run.
#[derive(Clone, Debug)]
pub struct CannyOutput {
    pub edges: EdgeMap,
    pub smoothed: ImageF32,
    pub grad: Grad,
    /// Gradient magnitude after non-maximum suppression.
    pub suppressed: ImageF32,
    pub stats: CannyStats,
    pub timings: TimingBreakdown,
}

/// Canny detector with validated parameters.
#[derive(Clone, Debug)]
pub struct Canny {
    params: CannyParams,
}

impl Canny {
    pub fn new(params: CannyParams) -> Result<Self, PipelineError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &CannyParams {
        &self.params
    }

    /// Binary edge map of an 8-bit image.
    pub fn detect(&self, src: &ImageU8<'_>) -> Result<EdgeMap, PipelineError> {
        Ok(self.detect_with_stages(src)?.edges)
    }

    pub fn detect_with_stages(&self, src: &ImageU8<'_>) -> Result<CannyOutput, PipelineError> {
        ensure_non_empty(src.w, src.h)?;
        self.run(ImageF32::from_u8(src))
    }

    /// Run on an image that is already in float form (raw intensity scale).
    pub fn detect_f32(&self, src: &ImageF32) -> Result<CannyOutput, PipelineError> {
        ensure_non_empty(src.w, src.h)?;
        self.run(src.clone())
    }

    fn run(&self, input: ImageF32) -> Result<CannyOutput, PipelineError> {
        let p = &self.params;
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let stage = Instant::now();
        let kernel = gaussian_for_size(p.kernel_size)?;
        let smoothed = convolve_with_border(&input, &kernel, p.border)?;
        timings.push("smooth", elapsed_ms(stage));

        let stage = Instant::now();
        let grad = sobel_gradients_with(&smoothed, p.sobel_aperture, p.border)?;
        timings.push("gradient", elapsed_ms(stage));

        let stage = Instant::now();
        let suppressed = non_max_suppression(&grad, p.border);
        timings.push("nms", elapsed_ms(stage));

        let stage = Instant::now();
        let classes = classify(&suppressed, p.low_threshold, p.high_threshold);
        let (edges, stats) = hysteresis(&classes, suppressed.w, suppressed.h);
        timings.push("hysteresis", elapsed_ms(stage));
        timings.total_ms = elapsed_ms(total_start);

        debug!(
            "Canny {}x{}: strong={} weak={} promoted={} edges={} ({:.3} ms)",
            input.w,
            input.h,
            stats.strong,
            stats.weak,
            stats.promoted,
            stats.edge_pixels,
            timings.total_ms
        );

        Ok(CannyOutput {
            edges,
            smoothed,
            grad,
            suppressed,
            stats,
            timings,
        })
    }
}

/// Canny edge detection with default Sobel aperture and border.
pub fn canny(
    src: &ImageU8<'_>,
    low_threshold: f32,
    high_threshold: f32,
    kernel_size: usize,
) -> Result<EdgeMap, PipelineError> {
    Canny::new(CannyParams::new(low_threshold, high_threshold, kernel_size))?.detect(src)
}

/// Double threshold on the suppressed magnitude.
pub fn classify(suppressed: &ImageF32, low: f32, high: f32) -> Vec<EdgeClass> {
    suppressed
        .data
        .iter()
        .map(|&m| {
            if m <= 0.0 {
                EdgeClass::Suppressed
            } else if m >= high {
                EdgeClass::Strong
            } else if m >= low {
                EdgeClass::Weak
            } else {
                EdgeClass::Suppressed
            }
        })
        .collect()
}

/// Promote weak pixels connected to strong ones; returns the binary map.
pub fn hysteresis(classes: &[EdgeClass], w: usize, h: usize) -> (EdgeMap, CannyStats) {
    let mut edges = EdgeMap::new(w, h);
    let mut stats = CannyStats::default();
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for (i, class) in classes.iter().enumerate() {
        match class {
            EdgeClass::Strong => {
                let (x, y) = (i % w, i / w);
                edges.set(x, y, true);
                stack.push((x, y));
                stats.strong += 1;
            }
            EdgeClass::Weak => stats.weak += 1,
            EdgeClass::Suppressed => {}
        }
    }

    while let Some((x, y)) = stack.pop() {
        for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                if classes[ny * w + nx] == EdgeClass::Weak && !edges.is_edge(nx, ny) {
                    edges.set(nx, ny, true);
                    stats.promoted += 1;
                    stack.push((nx, ny));
                }
            }
        }
    }

    stats.edge_pixels = stats.strong + stats.promoted;
    (edges, stats)
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
