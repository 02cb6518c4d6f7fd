// src/integer_math/multiplication.rs
//
// Multiplication strategies over little-endian limb slices.
//
// Operand size          Algorithm           Cost
// ───────────────────────────────────────────────────────────
// < FFT_THRESHOLD limbs Schoolbook          O(n·m), exact
// otherwise             FFT convolution     O(n log n), rounded
//
// Both paths produce trimmed limb vectors in base RADIX. Signs are handled
// by the caller.

use log::trace;
use crate::core::radix::{pow10, FFT_DIGITS, FFT_RADIX, FFT_THRESHOLD, LIMB_DIGITS, RADIX};
use crate::integer_math::fft;

/// Multiplies two magnitudes, choosing the strategy from the smaller operand's length.
pub fn multiply_limbs(a: &[u32], b: &[u32]) -> Vec<u32> {
    if a.len().min(b.len()) < FFT_THRESHOLD {
        schoolbook_multiply(a, b)
    } else {
        trace!("fft multiply: {} x {} limbs", a.len(), b.len());
        fft_multiply(a, b)
    }
}

/// O(n·m) multiply-accumulate with carry.
pub fn schoolbook_multiply(a: &[u32], b: &[u32]) -> Vec<u32> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let radix = RADIX as u64;
    let mut result = vec![0u32; a.len() + b.len()];
    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        let mut carry = 0u64;
        let mut j = 0;
        while j < b.len() || carry != 0 {
            let y = b.get(j).copied().unwrap_or(0) as u64;
            let cur = result[i + j] as u64 + x as u64 * y + carry;
            carry = cur / radix;
            result[i + j] = (cur % radix) as u32;
            j += 1;
        }
    }
    trim_limbs(&mut result);
    result
}

/// Transform-based multiply: re-express both operands in base `FFT_RADIX`,
/// convolve, and convert the product back to base `RADIX`.
pub fn fft_multiply(a: &[u32], b: &[u32]) -> Vec<u32> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let fine_a = convert_base(a, LIMB_DIGITS, FFT_DIGITS);
    let fine_b = convert_base(b, LIMB_DIGITS, FFT_DIGITS);
    let product = fft::convolve(&fine_a, &fine_b, FFT_RADIX);
    convert_base(&product, FFT_DIGITS, LIMB_DIGITS)
}

/// Regroups little-endian decimal blocks of `old_digits` digits into blocks of
/// `new_digits` digits. Both widths must be at most 9.
pub fn convert_base(digits: &[u32], old_digits: usize, new_digits: usize) -> Vec<u32> {
    let new_radix = pow10(new_digits);
    let mut result = Vec::with_capacity(digits.len() * old_digits / new_digits + 1);
    let mut cur = 0u64;
    let mut cur_digits = 0usize;

    for &digit in digits {
        cur += digit as u64 * pow10(cur_digits);
        cur_digits += old_digits;
        while cur_digits >= new_digits {
            result.push((cur % new_radix) as u32);
            cur /= new_radix;
            cur_digits -= new_digits;
        }
    }
    result.push(cur as u32);
    trim_limbs(&mut result);
    result
}

/// Drops trailing (most significant) zero limbs.
pub fn trim_limbs(limbs: &mut Vec<u32>) {
    while limbs.last() == Some(&0) {
        limbs.pop();
    }
}
