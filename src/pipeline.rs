//! End-to-end line detection: optional pre-blur → Canny → Hough.
//!
//! ```no_run
//! use canny_hough::image::ImageU8;
//! use canny_hough::pipeline::{LineDetector, LineDetectorParams};
//!
//! # fn example(gray: ImageU8) -> Result<(), canny_hough::PipelineError> {
//! let detector = LineDetector::new(LineDetectorParams::default())?;
//! let report = detector.process(gray)?;
//! for line in &report.lines {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```
use crate::convolution::convolve_with_border;
use crate::diagnostics::{InputDescriptor, TimingBreakdown};
use crate::edges::{Canny, CannyParams, CannyStats};
use crate::error::{ensure_non_empty, PipelineError};
use crate::hough::{Accumulator, HoughLineDetector, HoughParams, Line2d};
use crate::image::{EdgeMap, ImageF32, ImageU8};
use crate::kernels::gaussian_for_size;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Gaussian smoothing applied before Canny's own smoothing stage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurParams {
    pub enabled: bool,
    pub kernel_size: usize,
}

impl Default for BlurParams {
    fn default() -> Self {
        Self {
            enabled: false,
            kernel_size: 5,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineDetectorParams {
    pub blur: BlurParams,
    pub canny: CannyParams,
    pub hough: HoughParams,
}

/// Output of one [`LineDetector::process`] call.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub input: InputDescriptor,
    pub lines: Vec<Line2d>,
    pub canny: CannyStats,
    pub timings: TimingBreakdown,
    /// Gradient magnitude of the smoothed input.
    #[serde(skip)]
    pub magnitude: ImageF32,
    #[serde(skip)]
    pub edges: EdgeMap,
    #[serde(skip)]
    pub accumulator: Accumulator,
}

/// Validated pipeline; holds no per-image state.
#[derive(Clone, Debug)]
pub struct LineDetector {
    params: LineDetectorParams,
    canny: Canny,
    hough: HoughLineDetector,
}

impl LineDetector {
    pub fn new(params: LineDetectorParams) -> Result<Self, PipelineError> {
        if params.blur.enabled {
            gaussian_for_size(params.blur.kernel_size)?;
        }
        Ok(Self {
            params,
            canny: Canny::new(params.canny)?,
            hough: HoughLineDetector::new(params.hough)?,
        })
    }

    pub fn params(&self) -> &LineDetectorParams {
        &self.params
    }

    pub fn process(&self, gray: ImageU8<'_>) -> Result<PipelineReport, PipelineError> {
        ensure_non_empty(gray.w, gray.h)?;
        let (width, height) = (gray.w, gray.h);
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let mut input = ImageF32::from_u8(&gray);
        if self.params.blur.enabled {
            let start = Instant::now();
            let kernel = gaussian_for_size(self.params.blur.kernel_size)?;
            input = convolve_with_border(&input, &kernel, self.params.canny.border)?;
            timings.push("blur", start.elapsed().as_secs_f64() * 1000.0);
        }

        let canny = self.canny.detect_f32(&input)?;
        timings.extend_prefixed("canny", &canny.timings);

        let start = Instant::now();
        let mut accumulator = Accumulator::new(
            width,
            height,
            self.params.hough.theta_bins,
            self.params.hough.rho_resolution,
        );
        let lines = self.hough.detect(&canny.edges, Some(&mut accumulator));
        timings.push("hough", start.elapsed().as_secs_f64() * 1000.0);
        timings.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;

        debug!(
            "LineDetector {}x{}: edges={} lines={} total={:.3} ms",
            width,
            height,
            canny.stats.edge_pixels,
            lines.len(),
            timings.total_ms
        );

        Ok(PipelineReport {
            input: InputDescriptor { width, height },
            lines,
            canny: canny.stats,
            timings,
            magnitude: canny.grad.mag,
            edges: canny.edges,
            accumulator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_blur_size() {
        let params = LineDetectorParams {
            blur: BlurParams {
                enabled: true,
                kernel_size: 4,
            },
            ..LineDetectorParams::default()
        };
        assert!(matches!(
            LineDetector::new(params),
            Err(PipelineError::InvalidKernel { .. })
        ));
    }

    #[test]
    fn disabled_blur_ignores_size() {
        let params = LineDetectorParams {
            blur: BlurParams {
                enabled: false,
                kernel_size: 4,
            },
            ..LineDetectorParams::default()
        };
        assert!(LineDetector::new(params).is_ok());
    }

    #[test]
    fn empty_input_is_rejected() {
        let detector = LineDetector::new(LineDetectorParams::default()).unwrap();
        let img = ImageU8 {
            w: 0,
            h: 4,
            stride: 0,
            data: &[],
        };
        assert_eq!(
            detector.process(img).unwrap_err(),
            PipelineError::EmptyImage {
                width: 0,
                height: 4
            }
        );
    }

    #[test]
    fn flat_image_has_no_lines() {
        let data = vec![90u8; 32 * 24];
        let img = ImageU8 {
            w: 32,
            h: 24,
            stride: 32,
            data: &data,
        };
        let detector = LineDetector::new(LineDetectorParams::default()).unwrap();
        let report = detector.process(img).unwrap();
        assert!(report.lines.is_empty());
        assert!(report.edges.is_blank());
        assert_eq!(report.accumulator.total_votes(), 0);
        assert!(report.timings.stage_ms("canny/nms").is_some());
        assert!(report.timings.stage_ms("blur").is_none());
    }
}
