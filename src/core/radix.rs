// src/core/radix.rs

/// Radix of one limb. A power of ten so formatting is a per-limb operation,
/// and small enough that `limb * limb + limb + carry` fits a `u64`.
pub const RADIX: u32 = 1_000_000_000;

/// Decimal digits stored per limb, derived from `RADIX` at compile time.
pub const LIMB_DIGITS: usize = decimal_digits(RADIX);

/// Radix used inside the transform multiplier. Products of two digits summed
/// over the convolution must stay exact in an `f64` mantissa.
pub const FFT_RADIX: u32 = 10_000;

/// Decimal digits per transform digit.
pub const FFT_DIGITS: usize = decimal_digits(FFT_RADIX);

/// Below this many limbs in the smaller operand, schoolbook multiplication wins.
pub const FFT_THRESHOLD: usize = 150;

/// Number of decimal digits in `radix - 1`, i.e. `log10(radix)` for a power of ten.
pub const fn decimal_digits(radix: u32) -> usize {
    let mut value = radix;
    let mut digits = 0;
    while value > 1 {
        value /= 10;
        digits += 1;
    }
    digits
}

/// `10^exponent` as a `u64`. Only called with exponents up to 18.
pub const fn pow10(exponent: usize) -> u64 {
    let mut result = 1u64;
    let mut i = 0;
    while i < exponent {
        result *= 10;
        i += 1;
    }
    result
}
