//! Kernel catalog: static convolution tables and owned kernel builders.
//!
//! Smoothing kernels are normalized (weights sum to 1 within `1e-4`).
//! Derivative kernels are antisymmetric about their centre column (X) or
//! centre row (Y) and are exempt from normalization.
//!
//! Kernels that factor into an outer product `col ⊗ row` expose the factors
//! through [`Kernel2d::factors`], which lets the convolution engine run two
//! 1D passes instead of a full 2D sweep.
use crate::error::PipelineError;

/// Tolerance used for the sum-to-one invariant of smoothing kernels.
pub const NORMALIZATION_EPS: f32 = 1e-4;

/// Odd-dimensioned 2D weight grid in row-major order.
pub trait Kernel2d {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    fn weights(&self) -> &[f32];

    /// Separable factors `(column taps, row taps)` whose outer product equals
    /// the kernel, if known.
    fn factors(&self) -> Option<(&[f32], &[f32])> {
        None
    }

    #[inline]
    fn weight(&self, r: usize, c: usize) -> f32 {
        self.weights()[r * self.cols() + c]
    }

    fn sum(&self) -> f32 {
        self.weights().iter().sum()
    }

    /// Check the shape invariants: non-empty, odd in both axes, and a weight
    /// buffer that matches the declared size.
    fn validate(&self) -> Result<(), PipelineError> {
        let (rows, cols, len) = (self.rows(), self.cols(), self.weights().len());
        if rows == 0 || cols == 0 || rows % 2 == 0 || cols % 2 == 0 || len != rows * cols {
            return Err(PipelineError::InvalidKernel { rows, cols, len });
        }
        if let Some((col, row)) = self.factors() {
            if col.len() != rows || row.len() != cols {
                return Err(PipelineError::InvalidKernel { rows, cols, len });
            }
        }
        Ok(())
    }

    fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() <= NORMALIZATION_EPS
    }

    /// `w(r, c) == -w(r, cols-1-c)`: horizontal derivative shape.
    fn is_antisymmetric_x(&self) -> bool {
        let (rows, cols) = (self.rows(), self.cols());
        (0..rows).all(|r| {
            (0..cols).all(|c| (self.weight(r, c) + self.weight(r, cols - 1 - c)).abs() < 1e-6)
        })
    }

    /// `w(r, c) == -w(rows-1-r, c)`: vertical derivative shape.
    fn is_antisymmetric_y(&self) -> bool {
        let (rows, cols) = (self.rows(), self.cols());
        (0..rows).all(|r| {
            (0..cols).all(|c| (self.weight(r, c) + self.weight(rows - 1 - r, c)).abs() < 1e-6)
        })
    }
}

/// Kernel backed by `'static` tables, usable in `const` items.
#[derive(Clone, Copy, Debug)]
pub struct StaticKernel {
    rows: usize,
    cols: usize,
    weights: &'static [f32],
    factors: Option<(&'static [f32], &'static [f32])>,
}

impl StaticKernel {
    pub const fn new(rows: usize, cols: usize, weights: &'static [f32]) -> Self {
        Self {
            rows,
            cols,
            weights,
            factors: None,
        }
    }

    pub const fn separable(
        rows: usize,
        cols: usize,
        weights: &'static [f32],
        col: &'static [f32],
        row: &'static [f32],
    ) -> Self {
        Self {
            rows,
            cols,
            weights,
            factors: Some((col, row)),
        }
    }

    pub fn to_kernel(&self) -> Kernel {
        Kernel {
            rows: self.rows,
            cols: self.cols,
            weights: self.weights.to_vec(),
            factors: self.factors.map(|(c, r)| (c.to_vec(), r.to_vec())),
        }
    }
}

impl Kernel2d for StaticKernel {
    fn rows(&self) -> usize {
        self.rows
    }
    fn cols(&self) -> usize {
        self.cols
    }
    fn weights(&self) -> &[f32] {
        self.weights
    }
    fn factors(&self) -> Option<(&[f32], &[f32])> {
        self.factors
    }
}

const BINOMIAL_3: [f32; 3] = [0.25, 0.5, 0.25];
const BINOMIAL_5: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// `[1 2 1]ᵀ [1 2 1] / 16`
pub const GAUSSIAN_3X3: StaticKernel = StaticKernel::separable(
    3,
    3,
    &[
        0.0625, 0.125, 0.0625, //
        0.125, 0.25, 0.125, //
        0.0625, 0.125, 0.0625,
    ],
    &BINOMIAL_3,
    &BINOMIAL_3,
);

/// `[1 4 6 4 1]ᵀ [1 4 6 4 1] / 256`
pub const GAUSSIAN_5X5: StaticKernel = StaticKernel::separable(
    5,
    5,
    &[
        0.00390625, 0.015625, 0.0234375, 0.015625, 0.00390625, //
        0.015625, 0.0625, 0.09375, 0.0625, 0.015625, //
        0.0234375, 0.09375, 0.140625, 0.09375, 0.0234375, //
        0.015625, 0.0625, 0.09375, 0.0625, 0.015625, //
        0.00390625, 0.015625, 0.0234375, 0.015625, 0.00390625,
    ],
    &BINOMIAL_5,
    &BINOMIAL_5,
);

pub const IDENTITY_3X3: StaticKernel = StaticKernel::new(
    3,
    3,
    &[
        0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0,
    ],
);

pub const SOBEL_X_3X3: StaticKernel = StaticKernel::separable(
    3,
    3,
    &[
        -1.0, 0.0, 1.0, //
        -2.0, 0.0, 2.0, //
        -1.0, 0.0, 1.0,
    ],
    &[1.0, 2.0, 1.0],
    &[-1.0, 0.0, 1.0],
);

pub const SOBEL_Y_3X3: StaticKernel = StaticKernel::separable(
    3,
    3,
    &[
        -1.0, -2.0, -1.0, //
        0.0, 0.0, 0.0, //
        1.0, 2.0, 1.0,
    ],
    &[-1.0, 0.0, 1.0],
    &[1.0, 2.0, 1.0],
);

/// Owned kernel built at runtime.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    rows: usize,
    cols: usize,
    weights: Vec<f32>,
    factors: Option<(Vec<f32>, Vec<f32>)>,
}

impl Kernel {
    /// Validated kernel from raw row-major weights.
    pub fn new(rows: usize, cols: usize, weights: Vec<f32>) -> Result<Self, PipelineError> {
        let kernel = Self {
            rows,
            cols,
            weights,
            factors: None,
        };
        kernel.validate()?;
        Ok(kernel)
    }

    /// Single `1.0` at the centre.
    pub fn identity(rows: usize, cols: usize) -> Result<Self, PipelineError> {
        let mut weights = vec![0.0; rows * cols];
        if rows % 2 == 1 && cols % 2 == 1 {
            weights[(rows / 2) * cols + cols / 2] = 1.0;
        }
        Kernel::new(rows, cols, weights)
    }

    /// Outer product `col ⊗ row`, keeping the factors for separable passes.
    pub fn from_factors(col: &[f32], row: &[f32]) -> Result<Self, PipelineError> {
        let mut weights = Vec::with_capacity(col.len() * row.len());
        for &c in col {
            weights.extend(row.iter().map(|&r| c * r));
        }
        let kernel = Self {
            rows: col.len(),
            cols: row.len(),
            weights,
            factors: Some((col.to_vec(), row.to_vec())),
        };
        kernel.validate()?;
        Ok(kernel)
    }

    /// Normalized binomial approximation of a Gaussian, `size × size`.
    ///
    /// Sizes 3 and 5 reproduce [`GAUSSIAN_3X3`] and [`GAUSSIAN_5X5`].
    pub fn binomial(size: usize) -> Result<Self, PipelineError> {
        if size < 3 || size % 2 == 0 {
            return Err(PipelineError::InvalidKernel {
                rows: size,
                cols: size,
                len: size * size,
            });
        }
        let taps = binomial_taps(size);
        let total: f32 = taps.iter().sum();
        let taps: Vec<f32> = taps.iter().map(|t| t / total).collect();
        Kernel::from_factors(&taps, &taps)
    }

    /// Sampled Gaussian with standard deviation `sigma`, normalized.
    pub fn gaussian(size: usize, sigma: f32) -> Result<Self, PipelineError> {
        if size == 0 || size % 2 == 0 {
            return Err(PipelineError::InvalidKernel {
                rows: size,
                cols: size,
                len: size * size,
            });
        }
        if sigma.is_nan() || sigma <= 0.0 {
            return Err(PipelineError::invalid_param(
                "sigma",
                format!("must be positive, got {sigma}"),
            ));
        }
        let half = (size / 2) as f32;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let raw: Vec<f32> = (0..size)
            .map(|i| {
                let x = i as f32 - half;
                (-x * x / two_sigma_sq).exp()
            })
            .collect();
        let total: f32 = raw.iter().sum();
        let taps: Vec<f32> = raw.iter().map(|t| t / total).collect();
        Kernel::from_factors(&taps, &taps)
    }
}

impl Kernel2d for Kernel {
    fn rows(&self) -> usize {
        self.rows
    }
    fn cols(&self) -> usize {
        self.cols
    }
    fn weights(&self) -> &[f32] {
        &self.weights
    }
    fn factors(&self) -> Option<(&[f32], &[f32])> {
        self.factors
            .as_ref()
            .map(|(c, r)| (c.as_slice(), r.as_slice()))
    }
}

/// Smoothing kernel used for a given odd size: the catalog tables for 3 and
/// 5, a binomial kernel beyond that.
pub fn gaussian_for_size(size: usize) -> Result<Kernel, PipelineError> {
    match size {
        3 => Ok(GAUSSIAN_3X3.to_kernel()),
        5 => Ok(GAUSSIAN_5X5.to_kernel()),
        _ => Kernel::binomial(size),
    }
}

/// Sobel pair `(X, Y)` for apertures 3, 5 or 7.
///
/// The smoothing axis uses binomial taps of length `aperture`; the derivative
/// axis is a binomial of length `aperture - 2` convolved with `[-1, 0, 1]`.
/// Aperture 3 yields the classic `[1 2 1] ⊗ [-1 0 1]` operator.
pub fn sobel_kernels(aperture: usize) -> Result<(Kernel, Kernel), PipelineError> {
    if !matches!(aperture, 3 | 5 | 7) {
        return Err(PipelineError::invalid_param(
            "sobel_aperture",
            format!("must be 3, 5 or 7, got {aperture}"),
        ));
    }
    let smooth = binomial_taps(aperture);
    let base = binomial_taps(aperture - 2);
    let mut deriv = vec![0.0f32; aperture];
    for (i, &b) in base.iter().enumerate() {
        deriv[i] -= b;
        deriv[i + 2] += b;
    }
    let kx = Kernel::from_factors(&smooth, &deriv)?;
    let ky = Kernel::from_factors(&deriv, &smooth)?;
    Ok((kx, ky))
}

/// Row `size - 1` of Pascal's triangle.
fn binomial_taps(size: usize) -> Vec<f32> {
    let mut taps = vec![1.0f32];
    for _ in 1..size {
        let mut next = vec![1.0f32; taps.len() + 1];
        for i in 1..taps.len() {
            next[i] = taps[i - 1] + taps[i];
        }
        taps = next;
    }
    taps
}
