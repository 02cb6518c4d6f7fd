// src/core/big_integer.rs

use num::{One, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};
use std::str::FromStr;

use crate::core::error::{ArithmeticError, Result};
use crate::core::radix::{LIMB_DIGITS, RADIX};
use crate::integer_math::{division, multiplication};

/// Sign of a [`BigInteger`]. Zero is always `Plus`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    Minus,
    Plus,
}

impl Sign {
    /// Sign of the product of two values carrying `self` and `other`.
    pub fn product(self, other: Sign) -> Sign {
        if self == other {
            Sign::Plus
        } else {
            Sign::Minus
        }
    }

    fn flip(self) -> Sign {
        match self {
            Sign::Minus => Sign::Plus,
            Sign::Plus => Sign::Minus,
        }
    }
}

/// Signed arbitrary-precision integer.
///
/// The magnitude is stored as little-endian limbs in base [`RADIX`] (10^9).
/// Every value leaving a public operation is normalized: no trailing zero
/// limbs, and zero is the empty limb vector with `Sign::Plus`. Because of
/// this, the derived `PartialEq`/`Hash` compare numeric values.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigInteger {
    sign: Sign,
    limbs: Vec<u32>,
}

impl BigInteger {
    /// Builds a value from a sign and little-endian limbs, validating every limb.
    pub fn from_limbs(sign: Sign, limbs: Vec<u32>) -> Result<Self> {
        if let Some(limb) = limbs.iter().find(|&&limb| limb >= RADIX) {
            return Err(ArithmeticError::InvalidParameter(format!(
                "limb {} is not below the radix {}",
                limb, RADIX
            )));
        }
        Ok(Self::from_parts(sign, limbs))
    }

    fn from_parts(sign: Sign, limbs: Vec<u32>) -> Self {
        let mut value = BigInteger { sign, limbs };
        value.trim();
        value
    }

    /// Read-only view of the little-endian limbs.
    pub fn limbs(&self) -> &[u32] {
        &self.limbs
    }

    /// Limb `index`, or 0 past the most significant limb.
    pub(crate) fn limb(&self, index: usize) -> u32 {
        self.limbs.get(index).copied().unwrap_or(0)
    }

    pub(crate) fn limb_count(&self) -> usize {
        self.limbs.len()
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Removes trailing zero limbs and gives zero its canonical sign.
    pub fn trim(&mut self) {
        multiplication::trim_limbs(&mut self.limbs);
        if self.limbs.is_empty() {
            self.sign = Sign::Plus;
        }
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Minus
    }

    /// The radix is even, so parity lives in the lowest limb.
    pub fn is_even(&self) -> bool {
        self.limb(0) % 2 == 0
    }

    pub fn is_odd(&self) -> bool {
        !self.is_even()
    }

    /// -1, 0 or 1.
    pub fn signum(&self) -> i32 {
        if self.is_zero() {
            0
        } else if self.is_negative() {
            -1
        } else {
            1
        }
    }

    pub fn abs(&self) -> BigInteger {
        BigInteger {
            sign: Sign::Plus,
            limbs: self.limbs.clone(),
        }
    }

    /// Compares magnitudes, ignoring signs.
    pub fn cmp_magnitude(&self, other: &BigInteger) -> Ordering {
        compare_magnitudes(&self.limbs, &other.limbs)
    }

    /// Converts to `i64`, failing with `Overflow` when out of range.
    pub fn to_i64(&self) -> Result<i64> {
        let mut value: i128 = 0;
        for &limb in self.limbs.iter().rev() {
            value = value
                .checked_mul(RADIX as i128)
                .and_then(|v| v.checked_add(limb as i128))
                .ok_or(ArithmeticError::Overflow)?;
        }
        if self.is_negative() {
            value = -value;
        }
        i64::try_from(value).map_err(|_| ArithmeticError::Overflow)
    }

    /// Lossy conversion to `i64`: the result is the value modulo 2^64,
    /// reinterpreted as two's complement. Only exact when the value fits.
    pub fn to_i64_wrapping(&self) -> i64 {
        let mut value = 0i64;
        for &limb in self.limbs.iter().rev() {
            value = value.wrapping_mul(RADIX as i64).wrapping_add(limb as i64);
        }
        if self.is_negative() {
            value.wrapping_neg()
        } else {
            value
        }
    }

    /// Multiplies by a native integer in one pass.
    pub fn mul_small(&self, factor: i64) -> BigInteger {
        let mut result = self.clone();
        result.mul_small_assign(factor);
        result
    }

    fn mul_small_assign(&mut self, factor: i64) {
        if factor < 0 {
            self.sign = self.sign.flip();
        }
        let factor = factor.unsigned_abs() as u128;
        let radix = RADIX as u128;
        let mut carry = 0u128;
        let mut i = 0;
        while i < self.limbs.len() || carry != 0 {
            if i == self.limbs.len() {
                self.limbs.push(0);
            }
            let cur = self.limbs[i] as u128 * factor + carry;
            carry = cur / radix;
            self.limbs[i] = (cur % radix) as u32;
            i += 1;
        }
        self.trim();
    }

    /// Single-pass division by a native integer, most significant limb first.
    ///
    /// Returns `(quotient, remainder)` with the quotient truncated toward zero
    /// and the remainder carrying the dividend's sign.
    pub(crate) fn div_rem_small(&self, divisor: i64) -> Result<(BigInteger, i64)> {
        if divisor == 0 {
            return Err(ArithmeticError::DivisionByZero);
        }
        let mut quotient = self.clone();
        let remainder = quotient.divide_magnitude(divisor.unsigned_abs()) as i64;
        if divisor < 0 {
            quotient.sign = quotient.sign.flip();
        }
        quotient.trim();
        let remainder = if self.is_negative() { -remainder } else { remainder };
        Ok((quotient, remainder))
    }

    /// Divides the magnitude in place by a nonzero `divisor`, returning the
    /// magnitude of the remainder. Leaves the sign untouched and the limbs untrimmed.
    fn divide_magnitude(&mut self, divisor: u64) -> u64 {
        debug_assert!(divisor != 0);
        let divisor = divisor as u128;
        let mut remainder = 0u128;
        for limb in self.limbs.iter_mut().rev() {
            let cur = *limb as u128 + remainder * RADIX as u128;
            *limb = (cur / divisor) as u32;
            remainder = cur % divisor;
        }
        remainder as u64
    }

    /// Joint quotient and remainder; see [`division::divmod`].
    pub fn divmod(&self, divisor: &BigInteger) -> Result<(BigInteger, BigInteger)> {
        division::divmod(self, divisor)
    }

    pub fn checked_div(&self, divisor: &BigInteger) -> Result<BigInteger> {
        Ok(self.divmod(divisor)?.0)
    }

    pub fn checked_rem(&self, divisor: &BigInteger) -> Result<BigInteger> {
        Ok(self.divmod(divisor)?.1)
    }

    /// Raises to a native power by square-and-multiply.
    pub fn pow(&self, mut exponent: u32) -> BigInteger {
        let mut base = self.clone();
        let mut result = BigInteger::from(1);
        while exponent > 0 {
            if exponent & 1 == 1 {
                result *= &base;
            }
            exponent >>= 1;
            if exponent > 0 {
                base = &base * &base;
            }
        }
        result
    }

    /// Magnitude as little-endian base-2^32 words.
    pub fn to_words_le(&self) -> Vec<u32> {
        let mut magnitude = self.abs();
        let mut words = Vec::new();
        while !magnitude.is_zero() {
            words.push(magnitude.divide_magnitude(1 << 32) as u32);
            magnitude.trim();
        }
        words
    }

    /// Non-negative value from little-endian base-2^32 words.
    pub fn from_words_le(words: &[u32]) -> BigInteger {
        let mut value = BigInteger::from(0);
        for &word in words.iter().rev() {
            value.mul_small_assign(1 << 32);
            value += BigInteger::from(word);
        }
        value
    }

    /// Number of bits in the magnitude; 0 for zero.
    pub fn bit_length(&self) -> usize {
        let words = self.to_words_le();
        match words.last() {
            Some(&top) => 32 * (words.len() - 1) + (32 - top.leading_zeros() as usize),
            None => 0,
        }
    }

    fn add_signed(&mut self, other_sign: Sign, other_limbs: &[u32]) {
        if self.sign == other_sign {
            add_magnitudes(&mut self.limbs, other_limbs);
        } else if compare_magnitudes(&self.limbs, other_limbs) == Ordering::Less {
            // |self| < |other|: compute |other| - |self| and take other's sign
            let mut result = other_limbs.to_vec();
            sub_magnitudes(&mut result, &self.limbs);
            self.limbs = result;
            self.sign = other_sign;
        } else {
            sub_magnitudes(&mut self.limbs, other_limbs);
        }
        self.trim();
    }
}

fn compare_magnitudes(a: &[u32], b: &[u32]) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

fn add_magnitudes(acc: &mut Vec<u32>, other: &[u32]) {
    let mut carry = 0u32;
    let mut i = 0;
    while i < other.len() || carry != 0 {
        if i == acc.len() {
            acc.push(0);
        }
        let sum = acc[i] + carry + other.get(i).copied().unwrap_or(0);
        if sum >= RADIX {
            acc[i] = sum - RADIX;
            carry = 1;
        } else {
            acc[i] = sum;
            carry = 0;
        }
        i += 1;
    }
}

/// `acc -= other`, requires `|acc| >= |other|`.
fn sub_magnitudes(acc: &mut [u32], other: &[u32]) {
    let mut borrow = 0i64;
    for i in 0..acc.len() {
        if i >= other.len() && borrow == 0 {
            break;
        }
        let mut cur = acc[i] as i64 - borrow - other.get(i).copied().unwrap_or(0) as i64;
        if cur < 0 {
            cur += RADIX as i64;
            borrow = 1;
        } else {
            borrow = 0;
        }
        acc[i] = cur as u32;
    }
    debug_assert_eq!(borrow, 0, "subtrahend magnitude exceeded minuend");
}

// Construction

impl From<i64> for BigInteger {
    fn from(value: i64) -> Self {
        let sign = if value < 0 { Sign::Minus } else { Sign::Plus };
        let mut magnitude = value.unsigned_abs();
        let mut limbs = Vec::new();
        while magnitude > 0 {
            limbs.push((magnitude % RADIX as u64) as u32);
            magnitude /= RADIX as u64;
        }
        BigInteger::from_parts(sign, limbs)
    }
}

impl From<u64> for BigInteger {
    fn from(mut value: u64) -> Self {
        let mut limbs = Vec::new();
        while value > 0 {
            limbs.push((value % RADIX as u64) as u32);
            value /= RADIX as u64;
        }
        BigInteger::from_parts(Sign::Plus, limbs)
    }
}

impl From<i32> for BigInteger {
    fn from(value: i32) -> Self {
        BigInteger::from(value as i64)
    }
}

impl From<u32> for BigInteger {
    fn from(value: u32) -> Self {
        BigInteger::from(value as u64)
    }
}

impl TryFrom<&BigInteger> for i64 {
    type Error = ArithmeticError;

    fn try_from(value: &BigInteger) -> Result<i64> {
        value.to_i64()
    }
}

impl Default for BigInteger {
    fn default() -> Self {
        BigInteger {
            sign: Sign::Plus,
            limbs: Vec::new(),
        }
    }
}

impl Zero for BigInteger {
    fn zero() -> Self {
        BigInteger::default()
    }

    fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }
}

impl One for BigInteger {
    fn one() -> Self {
        BigInteger::from(1)
    }
}

// Decimal text

impl FromStr for BigInteger {
    type Err = ArithmeticError;

    /// Parses an optional `+`/`-` followed by one or more ASCII digits.
    fn from_str(text: &str) -> Result<Self> {
        let bytes = text.as_bytes();
        let (sign, start) = match bytes.first() {
            Some(b'-') => (Sign::Minus, 1),
            Some(b'+') => (Sign::Plus, 1),
            _ => (Sign::Plus, 0),
        };
        let digits = &bytes[start..];
        let malformed = |position: usize| ArithmeticError::MalformedInput {
            input: text.to_string(),
            position,
        };
        if digits.is_empty() {
            return Err(malformed(start));
        }
        if let Some(offset) = digits.iter().position(|b| !b.is_ascii_digit()) {
            return Err(malformed(start + offset));
        }

        // Group digits into limbs from the least significant end
        let limbs = digits
            .rchunks(LIMB_DIGITS)
            .map(|chunk| chunk.iter().fold(0u32, |acc, &d| acc * 10 + (d - b'0') as u32))
            .collect();
        Ok(BigInteger::from_parts(sign, limbs))
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut digits = String::with_capacity(self.limbs.len() * LIMB_DIGITS + 1);
        match self.limbs.split_last() {
            None => digits.push('0'),
            Some((top, rest)) => {
                digits.push_str(&top.to_string());
                for limb in rest.iter().rev() {
                    digits.push_str(&format!("{:0width$}", limb, width = LIMB_DIGITS));
                }
            }
        }
        f.pad_integral(!self.is_negative(), "", &digits)
    }
}

impl fmt::Debug for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInteger({})", self)
    }
}

impl Serialize for BigInteger {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BigInteger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

// Ordering

impl Ord for BigInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.sign != other.sign {
            return self.sign.cmp(&other.sign);
        }
        let magnitude = compare_magnitudes(&self.limbs, &other.limbs);
        match self.sign {
            Sign::Plus => magnitude,
            Sign::Minus => magnitude.reverse(),
        }
    }
}

impl PartialOrd for BigInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Arithmetic operators. The by-reference forms do the work; owned forms forward.

impl Neg for BigInteger {
    type Output = BigInteger;

    fn neg(mut self) -> BigInteger {
        if !self.is_zero() {
            self.sign = self.sign.flip();
        }
        self
    }
}

impl Neg for &BigInteger {
    type Output = BigInteger;

    fn neg(self) -> BigInteger {
        -self.clone()
    }
}

impl AddAssign<&BigInteger> for BigInteger {
    fn add_assign(&mut self, other: &BigInteger) {
        self.add_signed(other.sign, &other.limbs);
    }
}

impl SubAssign<&BigInteger> for BigInteger {
    fn sub_assign(&mut self, other: &BigInteger) {
        // a - b == a + (-b); zero's flipped sign is canonicalized by trim
        self.add_signed(other.sign.flip(), &other.limbs);
    }
}

impl MulAssign<&BigInteger> for BigInteger {
    fn mul_assign(&mut self, other: &BigInteger) {
        *self = &*self * other;
    }
}

impl DivAssign<&BigInteger> for BigInteger {
    fn div_assign(&mut self, other: &BigInteger) {
        *self = &*self / other;
    }
}

impl RemAssign<&BigInteger> for BigInteger {
    fn rem_assign(&mut self, other: &BigInteger) {
        *self = &*self % other;
    }
}

impl Add<&BigInteger> for &BigInteger {
    type Output = BigInteger;

    fn add(self, other: &BigInteger) -> BigInteger {
        let mut result = self.clone();
        result += other;
        result
    }
}

impl Sub<&BigInteger> for &BigInteger {
    type Output = BigInteger;

    fn sub(self, other: &BigInteger) -> BigInteger {
        let mut result = self.clone();
        result -= other;
        result
    }
}

impl Mul<&BigInteger> for &BigInteger {
    type Output = BigInteger;

    fn mul(self, other: &BigInteger) -> BigInteger {
        let limbs = multiplication::multiply_limbs(&self.limbs, &other.limbs);
        BigInteger::from_parts(self.sign.product(other.sign), limbs)
    }
}

impl Div<&BigInteger> for &BigInteger {
    type Output = BigInteger;

    /// Truncating division. Panics on a zero divisor, like the primitive
    /// integer types; use [`BigInteger::checked_div`] to get an error instead.
    fn div(self, other: &BigInteger) -> BigInteger {
        match division::divmod(self, other) {
            Ok((quotient, _)) => quotient,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Rem<&BigInteger> for &BigInteger {
    type Output = BigInteger;

    /// Remainder with the dividend's sign. Panics on a zero divisor.
    fn rem(self, other: &BigInteger) -> BigInteger {
        match division::divmod(self, other) {
            Ok((_, remainder)) => remainder,
            Err(e) => panic!("{}", e),
        }
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $assign_imp:ident, $assign_method:ident) => {
        impl $imp<BigInteger> for BigInteger {
            type Output = BigInteger;

            fn $method(self, other: BigInteger) -> BigInteger {
                (&self).$method(&other)
            }
        }

        impl $imp<&BigInteger> for BigInteger {
            type Output = BigInteger;

            fn $method(self, other: &BigInteger) -> BigInteger {
                (&self).$method(other)
            }
        }

        impl $imp<BigInteger> for &BigInteger {
            type Output = BigInteger;

            fn $method(self, other: BigInteger) -> BigInteger {
                self.$method(&other)
            }
        }

        impl $assign_imp<BigInteger> for BigInteger {
            fn $assign_method(&mut self, other: BigInteger) {
                self.$assign_method(&other);
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);
forward_binop!(Div, div, DivAssign, div_assign);
forward_binop!(Rem, rem, RemAssign, rem_assign);

// Native-integer operands

impl MulAssign<i64> for BigInteger {
    fn mul_assign(&mut self, factor: i64) {
        self.mul_small_assign(factor);
    }
}

impl Mul<i64> for &BigInteger {
    type Output = BigInteger;

    fn mul(self, factor: i64) -> BigInteger {
        self.mul_small(factor)
    }
}

impl Mul<i64> for BigInteger {
    type Output = BigInteger;

    fn mul(mut self, factor: i64) -> BigInteger {
        self.mul_small_assign(factor);
        self
    }
}

impl AddAssign<i64> for BigInteger {
    fn add_assign(&mut self, value: i64) {
        *self += &BigInteger::from(value);
    }
}

impl Add<i64> for BigInteger {
    type Output = BigInteger;

    fn add(mut self, value: i64) -> BigInteger {
        self += value;
        self
    }
}

impl Add<i64> for &BigInteger {
    type Output = BigInteger;

    fn add(self, value: i64) -> BigInteger {
        self.clone() + value
    }
}

impl SubAssign<i64> for BigInteger {
    fn sub_assign(&mut self, value: i64) {
        *self -= &BigInteger::from(value);
    }
}

impl Sub<i64> for BigInteger {
    type Output = BigInteger;

    fn sub(mut self, value: i64) -> BigInteger {
        self -= value;
        self
    }
}

impl Sub<i64> for &BigInteger {
    type Output = BigInteger;

    fn sub(self, value: i64) -> BigInteger {
        self.clone() - value
    }
}

impl Div<i64> for &BigInteger {
    type Output = BigInteger;

    /// Panics on a zero divisor; see [`division::divmod_small`].
    fn div(self, divisor: i64) -> BigInteger {
        match self.div_rem_small(divisor) {
            Ok((quotient, _)) => quotient,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Div<i64> for BigInteger {
    type Output = BigInteger;

    fn div(self, divisor: i64) -> BigInteger {
        &self / divisor
    }
}

impl DivAssign<i64> for BigInteger {
    fn div_assign(&mut self, divisor: i64) {
        *self = &*self / divisor;
    }
}

impl Rem<i64> for &BigInteger {
    type Output = i64;

    /// Remainder with the dividend's sign. Panics on a zero divisor.
    fn rem(self, divisor: i64) -> i64 {
        match self.div_rem_small(divisor) {
            Ok((_, remainder)) => remainder,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Rem<i64> for BigInteger {
    type Output = i64;

    fn rem(self, divisor: i64) -> i64 {
        &self % divisor
    }
}

impl PartialEq<i64> for BigInteger {
    fn eq(&self, other: &i64) -> bool {
        *self == BigInteger::from(*other)
    }
}

impl PartialOrd<i64> for BigInteger {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        Some(self.cmp(&BigInteger::from(*other)))
    }
}
