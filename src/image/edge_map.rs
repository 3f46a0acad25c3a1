//! Binary edge map produced by Canny and consumed by the Hough transform.
use super::traits::ImageView;
use super::u8::{GrayImageU8, ImageU8};

/// Value stored for edge pixels. Non-edge pixels are `0`.
pub const EDGE: u8 = 255;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeMap {
    pub w: usize,
    pub h: usize,
    data: Vec<u8>,
}

impl EdgeMap {
    /// Empty (all non-edge) map of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    /// Build from an externally produced binary or grayscale image: pixels
    /// strictly above `threshold` become edges.
    pub fn from_gray(gray: &ImageU8<'_>, threshold: u8) -> Self {
        let mut out = EdgeMap::new(gray.w, gray.h);
        for (y, row) in gray.rows().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                if v > threshold {
                    out.set(x, y, true);
                }
            }
        }
        out
    }

    #[inline]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x] != 0
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, edge: bool) {
        self.data[y * self.w + x] = if edge { EDGE } else { 0 };
    }

    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }

    /// Coordinates of all edge pixels in row-major order.
    pub fn edge_pixels(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (y, row) in self.data.chunks_exact(self.w.max(1)).enumerate() {
            for (x, &v) in row.iter().enumerate() {
                if v != 0 {
                    out.push((x, y));
                }
            }
        }
        out
    }

    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.w,
            h: self.h,
            stride: self.w,
            data: &self.data,
        }
    }

    pub fn to_gray(&self) -> GrayImageU8 {
        GrayImageU8::from_packed(self.w, self.h, self.data.clone())
    }
}
