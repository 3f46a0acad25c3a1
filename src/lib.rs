#![doc = include_str!("../README.md")]

// Core stages
pub mod convolution;
pub mod edges;
pub mod hough;
pub mod pipeline;

// Building blocks shared by the stages.
pub mod angle;
pub mod border;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod kernels;

// Tool configuration (JSON).
pub mod config;

// --- High-level re-exports -------------------------------------------------

pub use crate::border::BorderMode;
pub use crate::convolution::{convolve, convolve_with_border};
pub use crate::edges::{canny, Canny, CannyParams, CannyStats};
pub use crate::error::PipelineError;
pub use crate::hough::{detect_lines, Accumulator, HoughLineDetector, HoughParams, Line2d};
pub use crate::pipeline::{LineDetector, LineDetectorParams, PipelineReport};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use canny_hough::prelude::*;
///
/// # fn main() -> Result<(), PipelineError> {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let smoothed = convolve(&ImageF32::from_u8(&img), &GAUSSIAN_5X5)?;
/// let grad = sobel_gradients(&smoothed)?;
/// let edges = canny(&img, 70.0, 210.0, 3)?;
/// let mut acc = Accumulator::new(w, h, 180, 1.0);
/// let lines = detect_lines(&edges, Some(&mut acc), 50, 15)?;
/// println!("max |g|={:.1} lines={}", grad.mag.max_value(), lines.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::edges::{canny, sobel_gradients};
    pub use crate::hough::{detect_lines, Accumulator, Line2d};
    pub use crate::image::{EdgeMap, ImageF32, ImageU8};
    pub use crate::kernels::{GAUSSIAN_3X3, GAUSSIAN_5X5};
    pub use crate::pipeline::{LineDetector, LineDetectorParams};
    pub use crate::{convolve, PipelineError};
}
