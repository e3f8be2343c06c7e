//! The fixed-point multiply primitive.
//!
//! Deployed nodes compute `(value * factor) >> scale` by splitting the
//! 64-bit value into 32-bit halves so the intermediate never overflows
//! 64 bits. With a 128-bit intermediate the split becomes a single
//! multiply, and the two forms are bit-identical as long as every shift
//! truncates and the factor fits in 32 bits. The factor precondition is a
//! hard constraint of the split form and is validated explicitly here.

use crate::error::{ManaError, ManaResult};

/// Multiply a 64-bit fixed-point value by an integer factor and rescale
/// the result by `2^-scale`, truncating.
///
/// Fails with [`ManaError::Overflow`] when the factor exceeds 32 bits or
/// the rescaled result does not fit in 64 bits.
pub(crate) fn fixed_point_multiply(value: u64, factor: u64, scale: u32) -> ManaResult<u64> {
    if factor > u64::from(u32::MAX) {
        return Err(ManaError::Overflow);
    }

    // value and factor are both < 2^64, so the product fits in u128 and
    // any shift of 128 or more truncates to zero.
    if scale >= 128 {
        return Ok(0);
    }

    let shifted = (u128::from(value) * u128::from(factor)) >> scale;

    u64::try_from(shifted).map_err(|_| ManaError::Overflow)
}
