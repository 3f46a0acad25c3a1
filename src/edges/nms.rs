//! Non‑maximum suppression on gradient magnitude with direction alignment.
//!
//! The orientation of each pixel is quantized to 0°, 45°, 90° or 135° and its
//! magnitude is compared against the two neighbors along that direction. A
//! pixel survives only when it is strictly greater than both; equal
//! neighbors suppress each other so flat ridges never produce double edges.
//!
//! Neighbor lookups outside the image go through the same [`BorderMode`] used
//! by the convolution engine, so every pixel (including the outer frame) is
//! evaluated.
use super::grad::Grad;
use crate::angle::Direction4;
use crate::border::BorderMode;
use crate::image::{ImageF32, ImageView};
use rayon::prelude::*;

/// Thin the gradient magnitude to single-pixel ridges. Suppressed pixels are
/// `0.0`; survivors keep their magnitude.
pub fn non_max_suppression(grad: &Grad, border: BorderMode) -> ImageF32 {
    let (w, h) = (grad.mag.w, grad.mag.h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    let mag = &grad.mag;
    let ori = &grad.ori;
    out.data
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, out_row)| {
            let mag_row = mag.row(y);
            let ori_row = ori.row(y);
            for (x, dst) in out_row.iter_mut().enumerate() {
                let m = mag_row[x];
                if m <= 0.0 {
                    continue;
                }
                let (dx, dy) = Direction4::from_angle(ori_row[x]).step();
                let (xi, yi) = (x as isize, y as isize);
                let forward = mag.sample(xi + dx, yi + dy, border);
                let backward = mag.sample(xi - dx, yi - dy, border);
                if m > forward && m > backward {
                    *dst = m;
                }
            }
        });
    out
}
