// src/integer_math/modular.rs
//
// Sliding-window modular exponentiation.
// Fewer multiplications than plain square-and-multiply at the cost of a
// table of 2^(W-1) odd powers.

use log::trace;
use crate::core::big_integer::BigInteger;
use crate::core::error::{ArithmeticError, Result};

/// Window width used by [`mod_pow`].
pub const WINDOW_WIDTH: usize = 4;

/// Reduces `value` into `[0, modulus)` for a positive modulus.
pub fn reduce(value: &BigInteger, modulus: &BigInteger) -> Result<BigInteger> {
    let remainder = value.checked_rem(modulus)?;
    if remainder.is_negative() {
        Ok(remainder + modulus)
    } else {
        Ok(remainder)
    }
}

/// `(a * b) mod modulus` for operands already in `[0, modulus)`.
pub fn mod_mul(a: &BigInteger, b: &BigInteger, modulus: &BigInteger) -> Result<BigInteger> {
    (a * b).checked_rem(modulus)
}

/// Computes `base^exponent mod modulus`, returning a value in `[0, modulus)`.
///
/// Requires `modulus > 0` and `exponent >= 0`; anything else is `InvalidParameter`.
pub fn mod_pow(base: &BigInteger, exponent: &BigInteger, modulus: &BigInteger) -> Result<BigInteger> {
    if modulus.signum() <= 0 {
        return Err(ArithmeticError::InvalidParameter(format!(
            "modulus must be positive, got {}",
            modulus
        )));
    }
    if exponent.is_negative() {
        return Err(ArithmeticError::InvalidParameter(format!(
            "exponent must be non-negative, got {}",
            exponent
        )));
    }

    if *modulus == 1 {
        return Ok(BigInteger::from(0));
    }
    if exponent.is_zero() {
        return Ok(BigInteger::from(1));
    }

    let base = reduce(base, modulus)?;
    if base.is_zero() {
        return Ok(base);
    }

    let bits = exponent_bits(exponent);
    let table = precompute_odd_powers(&base, modulus, WINDOW_WIDTH)?;

    let mut result = BigInteger::from(1);
    let mut multiplications = 0usize;
    // `remaining` counts the bits not yet consumed; the next one is bits[remaining - 1]
    let mut remaining = bits.len();
    while remaining > 0 {
        let top = remaining - 1;
        if !bits[top] {
            result = mod_mul(&result, &result, modulus)?;
            multiplications += 1;
            remaining -= 1;
        } else {
            let (window_value, window_len) = extract_window(&bits, top, WINDOW_WIDTH);
            for _ in 0..window_len {
                result = mod_mul(&result, &result, modulus)?;
            }
            result = mod_mul(&result, &table[window_value >> 1], modulus)?;
            multiplications += window_len + 1;
            remaining -= window_len;
        }
    }

    trace!(
        "mod_pow: {} exponent bits, {} modular multiplications",
        bits.len(),
        multiplications
    );
    Ok(result)
}

/// Binary digits of a non-negative exponent, least significant first.
fn exponent_bits(exponent: &BigInteger) -> Vec<bool> {
    let words = exponent.to_words_le();
    let mut bits: Vec<bool> = words
        .iter()
        .flat_map(|&word| (0..32).map(move |i| (word >> i) & 1 == 1))
        .collect();
    while bits.last() == Some(&false) {
        bits.pop();
    }
    bits
}

/// Returns `[base^1, base^3, ..., base^(2^width - 1)] mod modulus`.
///
/// Entry `u >> 1` holds `base^u` for odd `u`.
fn precompute_odd_powers(base: &BigInteger, modulus: &BigInteger, width: usize) -> Result<Vec<BigInteger>> {
    let table_size = 1 << (width - 1);
    let mut table = Vec::with_capacity(table_size);
    table.push(base.clone());
    if table_size == 1 {
        return Ok(table);
    }

    let base_squared = mod_mul(base, base, modulus)?;
    for i in 1..table_size {
        let next = mod_mul(&table[i - 1], &base_squared, modulus)?;
        table.push(next);
    }
    Ok(table)
}

/// Takes the window starting at the set bit `start` and reaching down at most
/// `width` bits, shrunk so that its lowest bit is also set.
///
/// Returns `(window_value, window_len)`; `window_value` is always odd.
fn extract_window(bits: &[bool], start: usize, width: usize) -> (usize, usize) {
    debug_assert!(bits[start]);
    let mut low = start.saturating_sub(width - 1);
    while low < start && !bits[low] {
        low += 1;
    }

    let window_value = (low..=start)
        .rev()
        .fold(0usize, |acc, i| (acc << 1) | bits[i] as usize);
    (window_value, start - low + 1)
}
