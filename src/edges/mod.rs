//! Edge processing: Sobel gradients, directional non‑maximum suppression and
//! the Canny detector built on top of them.
//!
//! - Gradient computation returning `gx`, `gy`, magnitude and orientation in
//!   [0, π), driven by the convolution engine.
//! - Non‑maximum suppression along one of four quantized gradient directions
//!   with a strict local-maximum test.
//! - Canny: Gaussian smoothing, gradients, NMS, double threshold and
//!   worklist-based hysteresis producing a binary [`EdgeMap`](crate::image::EdgeMap).
//!
//! Borders follow a single [`BorderMode`](crate::border::BorderMode) per run,
//! shared by smoothing, derivatives and neighbor lookups.

pub mod canny;
pub mod grad;
pub mod nms;

pub use canny::{canny, Canny, CannyOutput, CannyParams, CannyStats, EdgeClass};
pub use grad::{
    sobel_gradients, sobel_gradients_with, sobel_magnitude, sobel_orientation, sobel_x, sobel_y,
    Grad,
};
pub use nms::non_max_suppression;
