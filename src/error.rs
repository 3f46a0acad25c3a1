//! Precondition failures reported by the processing stages.
//!
//! Every stage validates its inputs before touching a single pixel, so an
//! error always means no output was produced. None of these are transient:
//! they indicate a caller or configuration mistake.

/// Error taxonomy shared by convolution, gradients, Canny and Hough.
#[derive(Clone, Debug, PartialEq)]
pub enum PipelineError {
    /// Kernel is empty, has an even dimension, or its weight buffer does not
    /// match `rows × cols`.
    InvalidKernel {
        rows: usize,
        cols: usize,
        len: usize,
    },
    /// Source image has zero width or height.
    EmptyImage { width: usize, height: usize },
    /// Canny thresholds must satisfy `low < high`.
    InvalidThresholds { low: f32, high: f32 },
    /// Any other out-of-range tuning parameter.
    InvalidParameters { name: &'static str, detail: String },
}

impl PipelineError {
    pub(crate) fn invalid_param(name: &'static str, detail: impl Into<String>) -> Self {
        PipelineError::InvalidParameters {
            name,
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::InvalidKernel { rows, cols, len } => write!(
                f,
                "invalid kernel {rows}x{cols} with {len} weights (dimensions must be odd and non-zero)"
            ),
            PipelineError::EmptyImage { width, height } => {
                write!(f, "empty image ({width}x{height})")
            }
            PipelineError::InvalidThresholds { low, high } => {
                write!(f, "invalid thresholds: low {low} must be below high {high}")
            }
            PipelineError::InvalidParameters { name, detail } => {
                write!(f, "invalid parameter `{name}`: {detail}")
            }
        }
    }
}

impl std::error::Error for PipelineError {}

/// Fails with [`PipelineError::EmptyImage`] when either dimension is zero.
#[inline]
pub(crate) fn ensure_non_empty(width: usize, height: usize) -> Result<(), PipelineError> {
    if width == 0 || height == 0 {
        return Err(PipelineError::EmptyImage { width, height });
    }
    Ok(())
}
