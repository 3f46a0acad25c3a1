//! Border policy for neighborhood lookups.
//!
//! Convolution and the non-maximum suppression neighbor lookup both resolve
//! out-of-range coordinates through [`BorderMode::resolve`], so a boundary
//! pixel sees exactly the same virtual neighborhood in every stage.
//!
//! With `n = 5` samples `a b c d e`, the modes extend the row as:
//!
//! ```text
//! Reflect101:  d c b | a b c d e | d c b
//! Reflect:     c b a | a b c d e | e d c
//! Replicate:   a a a | a b c d e | e e e
//! Zero:        0 0 0 | a b c d e | 0 0 0
//! ```
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode {
    /// Mirror about the edge sample without repeating it.
    #[default]
    Reflect101,
    /// Mirror including the edge sample.
    Reflect,
    /// Clamp to the nearest in-bounds sample.
    Replicate,
    /// Out-of-range samples contribute nothing.
    Zero,
}

impl BorderMode {
    /// Map a possibly out-of-range index onto `0..n`.
    ///
    /// Returns `None` only for [`BorderMode::Zero`] outside the range, or when
    /// `n == 0`. Mirroring modes are periodic, so offsets larger than the
    /// image itself (a 7×7 kernel over a 2×2 image) still land in bounds.
    #[inline]
    pub fn resolve(self, i: isize, n: usize) -> Option<usize> {
        if n == 0 {
            return None;
        }
        if i >= 0 && (i as usize) < n {
            return Some(i as usize);
        }
        let n_i = n as isize;
        match self {
            BorderMode::Reflect101 => {
                if n == 1 {
                    return Some(0);
                }
                let period = 2 * (n_i - 1);
                let m = i.rem_euclid(period);
                let mirrored = if m >= n_i { period - m } else { m };
                Some(mirrored as usize)
            }
            BorderMode::Reflect => {
                let period = 2 * n_i;
                let m = i.rem_euclid(period);
                let mirrored = if m >= n_i { period - 1 - m } else { m };
                Some(mirrored as usize)
            }
            BorderMode::Replicate => Some(i.clamp(0, n_i - 1) as usize),
            BorderMode::Zero => None,
        }
    }
}
