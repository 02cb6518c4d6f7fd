// src/integer_math/division.rs
//
// Normalized long division over the public BigInteger contract.

use std::cmp::Ordering;
use crate::core::big_integer::{BigInteger, Sign};
use crate::core::error::{ArithmeticError, Result};
use crate::core::radix::RADIX;

/// Computes `(quotient, remainder)` with `dividend = quotient * divisor + remainder`
/// and `0 <= |remainder| < |divisor|`.
///
/// The quotient truncates toward zero and the remainder takes the dividend's
/// sign. A zero divisor yields `DivisionByZero`.
///
/// Both operands are scaled by `RADIX / (top + 1)` so the divisor's leading
/// limb is at least half the radix; each quotient digit estimated from the
/// two leading limbs of the running remainder is then off by at most a couple
/// of units, which the add-back loop corrects.
pub fn divmod(dividend: &BigInteger, divisor: &BigInteger) -> Result<(BigInteger, BigInteger)> {
    if divisor.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }

    if dividend.cmp_magnitude(divisor) == Ordering::Less {
        return Ok((BigInteger::from(0), dividend.clone()));
    }

    if divisor.limb_count() == 1 {
        let small = divisor.limb(0) as i64 * divisor.signum() as i64;
        let (quotient, remainder) = dividend.div_rem_small(small)?;
        return Ok((quotient, BigInteger::from(remainder)));
    }

    let divisor_top = divisor.limb(divisor.limb_count() - 1);
    let norm = (RADIX / (divisor_top + 1)) as i64;
    let a = dividend.abs().mul_small(norm);
    let b = divisor.abs().mul_small(norm);

    let b_len = b.limb_count();
    let b_top = b.limb(b_len - 1) as u64;
    let mut quotient = vec![0u32; a.limb_count()];
    let mut remainder = BigInteger::from(0);

    for i in (0..a.limb_count()).rev() {
        remainder *= RADIX as i64;
        remainder += BigInteger::from(a.limb(i));

        let s1 = remainder.limb(b_len) as u64;
        let s2 = remainder.limb(b_len - 1) as u64;
        let mut digit = ((s1 * RADIX as u64 + s2) / b_top) as i64;

        remainder -= b.mul_small(digit);
        while remainder.is_negative() {
            remainder += &b;
            digit -= 1;
        }
        quotient[i] = digit as u32;
    }

    let quotient_sign = dividend.sign().product(divisor.sign());
    let quotient = BigInteger::from_limbs(quotient_sign, quotient)?;

    let (remainder, _) = remainder.div_rem_small(norm)?;
    let remainder = if dividend.sign() == Sign::Minus { -remainder } else { remainder };

    Ok((quotient, remainder))
}

/// Division by a native integer; the single-pass variant without normalization.
pub fn divmod_small(dividend: &BigInteger, divisor: i64) -> Result<(BigInteger, i64)> {
    dividend.div_rem_small(divisor)
}
