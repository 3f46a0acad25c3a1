//! 2D convolution of single-channel float images.
//!
//! The kernel footprint is centred on each output pixel and weights are
//! applied without flipping (correlation form), so `SOBEL_X_3X3` responds
//! positively to intensity increasing to the right.
//!
//! Border samples are resolved through [`BorderMode`]; the default is
//! reflect-101. Column offsets are resolved once per image into a lookup
//! table so the inner loop is branch-free apart from the `Zero` policy.
//!
//! Kernels exposing separable factors run as two 1D passes (rows then
//! columns). Because every border mode resolves each axis independently,
//! the result matches the full 2D sweep up to float rounding.
//!
//! Output rows are computed in parallel with `rayon`; each task writes a
//! single row and only reads from the borrowed source.
use crate::border::BorderMode;
use crate::error::{ensure_non_empty, PipelineError};
use crate::image::{ImageF32, ImageView};
use crate::kernels::Kernel2d;
use rayon::prelude::*;

/// Convolve with the default reflect-101 border.
pub fn convolve<K: Kernel2d + ?Sized>(
    src: &ImageF32,
    kernel: &K,
) -> Result<ImageF32, PipelineError> {
    convolve_with_border(src, kernel, BorderMode::default())
}

/// Convolve `src` with `kernel`; output has the same dimensions as `src`.
///
/// Fails with `InvalidKernel` for empty or even-sized kernels and with
/// `EmptyImage` when `src` has no pixels. No work is done on failure.
pub fn convolve_with_border<K: Kernel2d + ?Sized>(
    src: &ImageF32,
    kernel: &K,
    border: BorderMode,
) -> Result<ImageF32, PipelineError> {
    kernel.validate()?;
    ensure_non_empty(src.w, src.h)?;
    if let Some((col, row)) = kernel.factors() {
        return Ok(separable_passes(src, col, row, border));
    }
    Ok(full_2d(src, kernel.rows(), kernel.cols(), kernel.weights(), border))
}

/// Two-pass convolution with an explicit column and row tap vector.
pub fn convolve_separable(
    src: &ImageF32,
    col_taps: &[f32],
    row_taps: &[f32],
    border: BorderMode,
) -> Result<ImageF32, PipelineError> {
    for taps in [col_taps, row_taps] {
        if taps.is_empty() || taps.len() % 2 == 0 {
            return Err(PipelineError::InvalidKernel {
                rows: col_taps.len(),
                cols: row_taps.len(),
                len: col_taps.len() * row_taps.len(),
            });
        }
    }
    ensure_non_empty(src.w, src.h)?;
    Ok(separable_passes(src, col_taps, row_taps, border))
}

/// For every `i` in `0..n` and every tap `k`, the resolved source index of
/// `i + k - len/2`.
fn offset_lut(n: usize, len: usize, border: BorderMode) -> Vec<Option<usize>> {
    let half = (len / 2) as isize;
    (0..n)
        .flat_map(|i| (0..len).map(move |k| border.resolve(i as isize + k as isize - half, n)))
        .collect()
}

fn full_2d(
    src: &ImageF32,
    rows: usize,
    cols: usize,
    weights: &[f32],
    border: BorderMode,
) -> ImageF32 {
    let (w, h) = (src.w, src.h);
    let half_r = (rows / 2) as isize;
    let col_lut = offset_lut(w, cols, border);
    let mut dst = ImageF32::new(w, h);

    dst.data
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, out_row)| {
            for kr in 0..rows {
                let Some(sy) = border.resolve(y as isize + kr as isize - half_r, h) else {
                    continue;
                };
                let src_row = src.row(sy);
                let k_row = &weights[kr * cols..(kr + 1) * cols];
                for (x, out) in out_row.iter_mut().enumerate() {
                    let lut = &col_lut[x * cols..(x + 1) * cols];
                    let mut acc = 0.0f32;
                    for (&kv, sx) in k_row.iter().zip(lut) {
                        if let Some(sx) = *sx {
                            acc += kv * src_row[sx];
                        }
                    }
                    *out += acc;
                }
            }
        });
    dst
}

fn separable_passes(src: &ImageF32, col: &[f32], row: &[f32], border: BorderMode) -> ImageF32 {
    let (w, h) = (src.w, src.h);

    // Horizontal pass.
    let x_lut = offset_lut(w, row.len(), border);
    let mut tmp = ImageF32::new(w, h);
    tmp.data
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, out_row)| {
            let src_row = src.row(y);
            for (x, out) in out_row.iter_mut().enumerate() {
                let lut = &x_lut[x * row.len()..(x + 1) * row.len()];
                let mut acc = 0.0f32;
                for (&kv, sx) in row.iter().zip(lut) {
                    if let Some(sx) = *sx {
                        acc += kv * src_row[sx];
                    }
                }
                *out = acc;
            }
        });

    // Vertical pass.
    let half = (col.len() / 2) as isize;
    let mut dst = ImageF32::new(w, h);
    dst.data
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, out_row)| {
            for (k, &kv) in col.iter().enumerate() {
                let Some(sy) = border.resolve(y as isize + k as isize - half, h) else {
                    continue;
                };
                let tmp_row = tmp.row(sy);
                for (out, &v) in out_row.iter_mut().zip(tmp_row) {
                    *out += kv * v;
                }
            }
        });
    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::{Kernel, GAUSSIAN_3X3, GAUSSIAN_5X5, IDENTITY_3X3};

    fn ramp(w: usize, h: usize) -> ImageF32 {
        let data = (0..w * h).map(|i| ((i * 37) % 101) as f32).collect();
        ImageF32::from_vec(w, h, data).unwrap()
    }

    fn assert_close(a: &ImageF32, b: &ImageF32, tol: f32) {
        assert_eq!((a.w, a.h), (b.w, b.h));
        for (i, (x, y)) in a.data.iter().zip(&b.data).enumerate() {
            assert!((x - y).abs() <= tol, "mismatch at {i}: {x} vs {y}");
        }
    }

    #[test]
    fn identity_kernel_reproduces_input() {
        let img = ramp(7, 5);
        let out = convolve(&img, &IDENTITY_3X3).unwrap();
        assert_eq!(out, img);

        let wide = Kernel::identity(5, 7).unwrap();
        for border in [
            BorderMode::Reflect101,
            BorderMode::Reflect,
            BorderMode::Replicate,
            BorderMode::Zero,
        ] {
            let out = convolve_with_border(&img, &wide, border).unwrap();
            assert_eq!(out, img, "{border:?}");
        }
    }

    #[test]
    fn output_dimensions_match_input() {
        let kernels = [
            Kernel::new(1, 1, vec![2.0]).unwrap(),
            Kernel::new(1, 5, vec![1.0; 5]).unwrap(),
            Kernel::new(3, 1, vec![1.0; 3]).unwrap(),
            Kernel::binomial(7).unwrap(),
        ];
        for (w, h) in [(1, 1), (2, 3), (9, 4), (16, 16)] {
            let img = ramp(w, h);
            for k in &kernels {
                let out = convolve(&img, k).unwrap();
                assert_eq!((out.w, out.h), (w, h));
            }
        }
    }

    #[test]
    fn zero_image_stays_zero_under_gaussian() {
        let img = ImageF32::new(5, 5);
        let out = convolve(&img, &GAUSSIAN_3X3).unwrap();
        assert!(out.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn constant_image_is_preserved_by_normalized_kernels() {
        let img = ImageF32::from_vec(6, 4, vec![42.0; 24]).unwrap();
        for border in [
            BorderMode::Reflect101,
            BorderMode::Reflect,
            BorderMode::Replicate,
        ] {
            let out = convolve_with_border(&img, &GAUSSIAN_5X5, border).unwrap();
            for &v in &out.data {
                assert!((v - 42.0).abs() < 1e-3, "{border:?}: {v}");
            }
        }
    }

    #[test]
    fn reflect101_border_by_hand() {
        // Row [10, 20, 30] with a non-separable 1x3 kernel [1, 2, 3].
        // x=0 sees [20, 10, 20] -> 20 + 20 + 60 = 100
        // x=2 sees [20, 30, 20] -> 20 + 60 + 60 = 140
        let img = ImageF32::from_vec(3, 1, vec![10.0, 20.0, 30.0]).unwrap();
        let k = Kernel::new(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
        let out = convolve(&img, &k).unwrap();
        assert_eq!(out.data, vec![100.0, 140.0, 140.0]);

        let zero = convolve_with_border(&img, &k, BorderMode::Zero).unwrap();
        assert_eq!(zero.data, vec![80.0, 140.0, 80.0]);

        let replicate = convolve_with_border(&img, &k, BorderMode::Replicate).unwrap();
        assert_eq!(replicate.data, vec![90.0, 140.0, 170.0]);
    }

    #[test]
    fn weights_are_not_flipped() {
        // Single bright pixel; correlation places kernel weight (r, c) at
        // output offset (-(r-1), -(c-1)).
        let mut img = ImageF32::new(3, 3);
        img.set(1, 1, 1.0);
        let weights: Vec<f32> = (1..=9).map(|v| v as f32).collect();
        let k = Kernel::new(3, 3, weights).unwrap();
        let out = convolve_with_border(&img, &k, BorderMode::Zero).unwrap();
        assert_eq!(out.get(0, 0), 9.0);
        assert_eq!(out.get(2, 2), 1.0);
        assert_eq!(out.get(1, 1), 5.0);
    }

    #[test]
    fn separable_path_matches_full_sweep() {
        let img = ramp(11, 8);
        for border in [
            BorderMode::Reflect101,
            BorderMode::Reflect,
            BorderMode::Replicate,
            BorderMode::Zero,
        ] {
            let separable = convolve_with_border(&img, &GAUSSIAN_5X5, border).unwrap();
            let dense = Kernel::new(5, 5, GAUSSIAN_5X5.weights().to_vec()).unwrap();
            let full = convolve_with_border(&img, &dense, border).unwrap();
            assert_close(&separable, &full, 1e-3);
        }
    }

    #[test]
    fn kernel_larger_than_image() {
        let img = ramp(2, 2);
        let k = Kernel::binomial(7).unwrap();
        let out = convolve(&img, &k).unwrap();
        assert_eq!((out.w, out.h), (2, 2));
        assert!(out.data.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn rejects_empty_image_and_bad_kernels() {
        let empty = ImageF32::new(0, 4);
        assert!(matches!(
            convolve(&empty, &GAUSSIAN_3X3),
            Err(PipelineError::EmptyImage { .. })
        ));

        let img = ramp(4, 4);
        assert!(matches!(
            convolve_separable(&img, &[0.5, 0.5], &[1.0], BorderMode::Reflect101),
            Err(PipelineError::InvalidKernel { .. })
        ));
        assert!(matches!(
            convolve_separable(&img, &[1.0], &[], BorderMode::Reflect101),
            Err(PipelineError::InvalidKernel { .. })
        ));
    }
}
