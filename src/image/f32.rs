//! Owned single-channel f32 image in row-major layout (stride == width).
//!
//! Every processing stage produces a fresh `ImageF32`; inputs are only ever
//! borrowed.
use super::traits::{ImageView, ImageViewMut};
use super::u8::{GrayImageU8, ImageU8};
use crate::border::BorderMode;

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of f32 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h],
        }
    }

    /// Wrap an existing row-major buffer. Returns `None` on a length mismatch.
    pub fn from_vec(w: usize, h: usize, data: Vec<f32>) -> Option<Self> {
        (data.len() == w * h).then_some(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    /// Convert 8-bit intensities to float without rescaling (0..=255).
    pub fn from_u8(gray: &ImageU8<'_>) -> Self {
        let mut out = ImageF32::new(gray.w, gray.h);
        for y in 0..gray.h {
            let src = gray.row(y);
            let dst = out.row_mut(y);
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = s as f32;
            }
        }
        out
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Sample at signed coordinates, resolving out-of-range positions through
    /// `border`. `BorderMode::Zero` yields `0.0` outside the image.
    #[inline]
    pub fn sample(&self, x: isize, y: isize, border: BorderMode) -> f32 {
        match (border.resolve(x, self.w), border.resolve(y, self.h)) {
            (Some(xx), Some(yy)) => self.get(xx, yy),
            _ => 0.0,
        }
    }

    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0.0).count()
    }

    pub fn max_value(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Display conversion to 8 bits: optional absolute value, multiply by
    /// `scale`, round and clamp into `[0, 255]`.
    pub fn to_u8_scaled(&self, take_abs: bool, scale: f32) -> GrayImageU8 {
        let mut out = GrayImageU8::zeros(self.w, self.h);
        for y in 0..self.h {
            for (x, &v) in self.row(y).iter().enumerate() {
                let v = if take_abs { v.abs() } else { v };
                out.set(x, y, (v * scale).round().clamp(0.0, 255.0) as u8);
            }
        }
        out
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

impl ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u8_keeps_raw_intensities() {
        let bytes = [0u8, 17, 255, 128, 1, 2];
        let view = ImageU8 {
            w: 3,
            h: 2,
            stride: 3,
            data: &bytes,
        };
        let img = ImageF32::from_u8(&view);
        assert_eq!(img.get(2, 0), 255.0);
        assert_eq!(img.get(0, 1), 128.0);
    }

    #[test]
    fn from_u8_honours_stride() {
        let bytes = [1u8, 2, 99, 3, 4, 99];
        let view = ImageU8 {
            w: 2,
            h: 2,
            stride: 3,
            data: &bytes,
        };
        let img = ImageF32::from_u8(&view);
        assert_eq!(img.data, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn sample_uses_border_policy() {
        let img = ImageF32::from_vec(3, 1, vec![10.0, 20.0, 30.0]).unwrap();
        assert_eq!(img.sample(-1, 0, BorderMode::Reflect101), 20.0);
        assert_eq!(img.sample(-1, 0, BorderMode::Replicate), 10.0);
        assert_eq!(img.sample(3, 0, BorderMode::Zero), 0.0);
        assert_eq!(img.sample(1, -1, BorderMode::Reflect101), 20.0);
    }

    #[test]
    fn scaled_display_conversion_clamps() {
        let img = ImageF32::from_vec(4, 1, vec![-40.0, 10.0, 300.0, 100.0]).unwrap();
        let abs = img.to_u8_scaled(true, 1.0);
        assert_eq!(abs.data(), &[40, 10, 255, 100]);
        let signed = img.to_u8_scaled(false, 0.5);
        assert_eq!(signed.data(), &[0, 5, 150, 50]);
    }
}
