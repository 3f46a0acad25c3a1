//! Image gradients (Sobel) with magnitude and orientation.
//!
//! - Convolves the `X`/`Y` derivative kernels through the convolution
//!   engine, so border handling follows the same [`BorderMode`].
//! - Outputs per‑pixel `gx`, `gy`, `mag = sqrt(gx^2+gy^2)` and
//!   `ori = atan2(gy, gx)` folded into [0, π).
//! - Magnitudes are left unnormalized (a unit step in 8-bit intensity gives
//!   `4·Δ` with the 3×3 operator); display scaling is the caller's concern.
//!
//! Complexity: O(W·H·k²) per derivative, or O(W·H·2k) for the separable
//! kernels produced by [`sobel_kernels`].
use crate::angle::normalize_half_pi;
use crate::border::BorderMode;
use crate::convolution::convolve_with_border;
use crate::error::PipelineError;
use crate::image::ImageF32;
use crate::kernels::{sobel_kernels, SOBEL_X_3X3, SOBEL_Y_3X3};

/// Per‑pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative (positive when intensity increases to the right)
    pub gx: ImageF32,
    /// Vertical derivative (positive when intensity increases downward)
    pub gy: ImageF32,
    /// Euclidean magnitude per pixel: `sqrt(gx^2 + gy^2)`
    pub mag: ImageF32,
    /// Orientation `atan2(gy, gx)` normalized into [0, π)
    pub ori: ImageF32,
}

/// Horizontal Sobel derivative (3×3, reflect-101 border).
pub fn sobel_x(src: &ImageF32) -> Result<ImageF32, PipelineError> {
    convolve_with_border(src, &SOBEL_X_3X3, BorderMode::default())
}

/// Vertical Sobel derivative (3×3, reflect-101 border).
pub fn sobel_y(src: &ImageF32) -> Result<ImageF32, PipelineError> {
    convolve_with_border(src, &SOBEL_Y_3X3, BorderMode::default())
}

/// Pointwise `sqrt(gx² + gy²)`.
pub fn sobel_magnitude(src: &ImageF32) -> Result<ImageF32, PipelineError> {
    Ok(sobel_gradients(src)?.mag)
}

/// Pointwise `atan2(gy, gx)` in [0, π).
pub fn sobel_orientation(src: &ImageF32) -> Result<ImageF32, PipelineError> {
    Ok(sobel_gradients(src)?.ori)
}

/// Compute all gradient fields with the 3×3 operator.
pub fn sobel_gradients(src: &ImageF32) -> Result<Grad, PipelineError> {
    sobel_gradients_with(src, 3, BorderMode::default())
}

/// Compute all gradient fields with a Sobel aperture of 3, 5 or 7.
pub fn sobel_gradients_with(
    src: &ImageF32,
    aperture: usize,
    border: BorderMode,
) -> Result<Grad, PipelineError> {
    let (gx, gy) = if aperture == 3 {
        (
            convolve_with_border(src, &SOBEL_X_3X3, border)?,
            convolve_with_border(src, &SOBEL_Y_3X3, border)?,
        )
    } else {
        let (kx, ky) = sobel_kernels(aperture)?;
        (
            convolve_with_border(src, &kx, border)?,
            convolve_with_border(src, &ky, border)?,
        )
    };
    Ok(combine(gx, gy))
}

fn combine(gx: ImageF32, gy: ImageF32) -> Grad {
    let mut mag = ImageF32::new(gx.w, gx.h);
    let mut ori = ImageF32::new(gx.w, gx.h);
    for (i, (&dx, &dy)) in gx.data.iter().zip(&gy.data).enumerate() {
        mag.data[i] = (dx * dx + dy * dy).sqrt();
        ori.data[i] = normalize_half_pi(dy.atan2(dx));
    }
    Grad { gx, gy, mag, ori }
}
