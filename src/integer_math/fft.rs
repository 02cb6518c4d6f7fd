// src/integer_math/fft.rs
//
// Complex-valued discrete Fourier transform used by the fast multiplier.
// Buffers live only for the duration of one `convolve` call.

use num::complex::Complex64;
use std::f64::consts::PI;

/// In-place iterative radix-2 transform. `values.len()` must be a power of two.
///
/// With `invert` set this computes the inverse transform, including the `1/n` scale.
pub fn fft(values: &mut [Complex64], invert: bool) {
    let n = values.len();
    debug_assert!(n.is_power_of_two(), "transform length {} is not a power of two", n);

    // Bit-reversal permutation
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            values.swap(i, j);
        }
    }

    let direction = if invert { -1.0 } else { 1.0 };
    let mut len = 2;
    while len <= n {
        let half = len / 2;
        // Twiddles are computed directly per stage rather than by repeated
        // multiplication, which would accumulate rounding error.
        let step = direction * 2.0 * PI / len as f64;
        let roots: Vec<Complex64> = (0..half)
            .map(|k| Complex64::from_polar(1.0, step * k as f64))
            .collect();

        for start in (0..n).step_by(len) {
            for k in 0..half {
                let u = values[start + k];
                let v = values[start + k + half] * roots[k];
                values[start + k] = u + v;
                values[start + k + half] = u - v;
            }
        }
        len <<= 1;
    }

    if invert {
        let scale = n as f64;
        for value in values.iter_mut() {
            *value /= scale;
        }
    }
}

/// Multiplies two little-endian digit sequences in base `radix` by convolution.
///
/// The transform length is the smallest power of two holding `a.len() + b.len()`
/// coefficients, so the cyclic convolution never wraps around. Each coefficient
/// is rounded back to an integer before carries are propagated; the caller picks
/// `radix` small enough that this rounding is exact.
pub fn convolve(a: &[u32], b: &[u32], radix: u32) -> Vec<u32> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let n = (a.len() + b.len()).next_power_of_two();
    let mut fa = to_spectrum_input(a, n);
    let mut fb = to_spectrum_input(b, n);

    fft(&mut fa, false);
    fft(&mut fb, false);
    for (x, y) in fa.iter_mut().zip(fb.iter()) {
        *x *= *y;
    }
    fft(&mut fa, true);

    let radix = radix as u64;
    let mut digits = Vec::with_capacity(n + 2);
    let mut carry = 0u64;
    for coefficient in &fa {
        // Negative zero and tiny negative noise saturate to 0 on the cast.
        let cur = coefficient.re.round() as u64 + carry;
        digits.push((cur % radix) as u32);
        carry = cur / radix;
    }
    while carry > 0 {
        digits.push((carry % radix) as u32);
        carry /= radix;
    }
    while digits.last() == Some(&0) {
        digits.pop();
    }
    digits
}

fn to_spectrum_input(digits: &[u32], n: usize) -> Vec<Complex64> {
    let mut buffer = vec![Complex64::new(0.0, 0.0); n];
    for (slot, &digit) in buffer.iter_mut().zip(digits) {
        *slot = Complex64::new(digit as f64, 0.0);
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_then_inverse_restores_input() {
        let original: Vec<Complex64> = (0..16).map(|i| Complex64::new(i as f64, 0.0)).collect();
        let mut values = original.clone();
        fft(&mut values, false);
        fft(&mut values, true);
        for (a, b) in values.iter().zip(original.iter()) {
            assert!((a.re - b.re).abs() < 1e-9);
            assert!(a.im.abs() < 1e-9);
        }
    }

    #[test]
    fn test_convolve_small_decimal() {
        // 1234 * 5678 = 7006652, digits little-endian in base 10
        let a = vec![4, 3, 2, 1];
        let b = vec![8, 7, 6, 5];
        assert_eq!(convolve(&a, &b, 10), vec![2, 5, 6, 6, 0, 0, 7]);
    }

    #[test]
    fn test_convolve_with_empty_operand() {
        assert!(convolve(&[], &[1, 2, 3], 10_000).is_empty());
    }

    #[test]
    fn test_convolve_carries_across_radix() {
        // 9999 * 9999 = 99980001 in base 10^4
        assert_eq!(convolve(&[9999], &[9999], 10_000), vec![1, 9998]);
    }
}
