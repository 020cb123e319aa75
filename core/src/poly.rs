//! Per-byte sharing polynomials and their recovery.

use math::prelude::*;

use crate::error::{Result, SharingError};

/// Sharing polynomial for one secret byte: the constant term carries the
/// byte, the borrowed slice carries the random coefficients of degrees
/// 1..K-1 straight out of the registered coefficient matrix.
pub(crate) struct BytePolynomial<'a> {
    constant: Gf256,
    high: &'a [u8],
}

impl<'a> BytePolynomial<'a> {
    pub(crate) fn new(constant: Gf256, high: &'a [u8]) -> Self {
        Self { constant, high }
    }

    /// Horner evaluation, highest degree first.
    pub(crate) fn evaluate(&self, x: Gf256) -> Gf256 {
        let mut acc = Gf256::ZERO;
        for &coefficient in self.high.iter().rev() {
            acc = acc * x + gf!(coefficient);
        }
        acc * x + self.constant
    }
}

/// Value at zero of the polynomial through `points`.
///
/// The basis weight for point j is `Π_{m≠j} x_m · (x_m ⊕ x_j)^-1` and the
/// weighted sum is XOR. Callers guarantee distinct non-zero x-coordinates,
/// so a failed inversion here is a bug, not bad input.
pub(crate) fn interpolate_at_zero(points: &[(Gf256, Gf256)]) -> Result<Gf256> {
    let mut value = Gf256::ZERO;
    for (j, &(xj, yj)) in points.iter().enumerate() {
        let mut weight = Gf256::ONE;
        for (m, &(xm, _)) in points.iter().enumerate() {
            if m == j {
                continue;
            }
            let denominator = (xm + xj).try_inverse().map_err(|_| {
                SharingError::Internal("duplicate x-coordinates in interpolation")
            })?;
            weight = weight * xm * denominator;
        }
        value += yj * weight;
    }
    Ok(value)
}
