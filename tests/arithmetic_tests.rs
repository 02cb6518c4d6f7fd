// tests/arithmetic_tests.rs
//
// Cross-checks BigInteger arithmetic against num::BigInt.

use num::{BigInt, Signed};
use rand::RngCore;
use safeprime::{divmod, ArithmeticError, BigInteger, StaticRandom};

fn to_oracle(value: &BigInteger) -> BigInt {
    value.to_string().parse().unwrap()
}

fn random_signed(rng: &mut StaticRandom, max_bits: usize) -> BigInteger {
    let bits = 1 + (rng.next_u32() as usize % max_bits);
    let magnitude = rng.next_bits(bits);
    if rng.next_u32() & 1 == 1 {
        -magnitude
    } else {
        magnitude
    }
}

#[test]
fn test_ring_operations_match_oracle() {
    let mut rng = StaticRandom::from_seed_u64(11);
    for _ in 0..300 {
        let a = random_signed(&mut rng, 700);
        let b = random_signed(&mut rng, 700);
        let (oa, ob) = (to_oracle(&a), to_oracle(&b));
        assert_eq!(to_oracle(&(&a + &b)), &oa + &ob);
        assert_eq!(to_oracle(&(&a - &b)), &oa - &ob);
        assert_eq!(to_oracle(&(&a * &b)), &oa * &ob);
    }
}

#[test]
fn test_division_matches_oracle() {
    let mut rng = StaticRandom::from_seed_u64(12);
    for _ in 0..300 {
        let a = random_signed(&mut rng, 900);
        let b = random_signed(&mut rng, 450);
        let (oa, ob) = (to_oracle(&a), to_oracle(&b));
        let (q, r) = divmod(&a, &b).unwrap();
        // Truncating division: remainder follows the dividend
        assert_eq!(to_oracle(&q), &oa / &ob, "{} / {}", a, b);
        assert_eq!(to_oracle(&r), &oa % &ob, "{} % {}", a, b);
        assert!(r.cmp_magnitude(&b) == std::cmp::Ordering::Less);
        assert_eq!(&q * &b + &r, a);
    }
}

#[test]
fn test_fft_sized_products_match_oracle() {
    let mut rng = StaticRandom::from_seed_u64(13);
    // 6000 bits is roughly 200 limbs, past the FFT threshold
    for bits in [4000usize, 6000, 12000] {
        let a = rng.next_bits(bits);
        let b = -rng.next_bits(bits + 37);
        assert!(a.limbs().len() > 100);
        assert_eq!(to_oracle(&(&a * &b)), to_oracle(&a) * to_oracle(&b));
    }
    // Unbalanced operands
    let a = rng.next_bits(9000);
    let b = rng.next_bits(40);
    assert_eq!(to_oracle(&(&a * &b)), to_oracle(&a) * to_oracle(&b));
}

#[test]
fn test_squares_of_all_nines() {
    // (10^k - 1)^2 stresses every carry path
    for k in [9usize, 18, 1350, 2000] {
        let nines: BigInteger = "9".repeat(k).parse().unwrap();
        let expected = format!("{}8{}1", "9".repeat(k - 1), "0".repeat(k - 1));
        assert_eq!((&nines * &nines).to_string(), expected);
    }
}

#[test]
fn test_large_division_round_trip() {
    let mut rng = StaticRandom::from_seed_u64(14);
    for _ in 0..20 {
        let divisor = rng.next_bits(3000);
        let quotient = rng.next_bits(2000);
        let remainder = rng.next_bits(2500);
        let dividend = &divisor * &quotient + &remainder;
        let (q, r) = divmod(&dividend, &divisor).unwrap();
        assert_eq!(q, quotient);
        assert_eq!(r, remainder);
    }
}

#[test]
fn test_division_by_zero_is_reported() {
    let a: BigInteger = "123456789123456789123456789".parse().unwrap();
    assert_eq!(divmod(&a, &BigInteger::from(0)), Err(ArithmeticError::DivisionByZero));
    assert!(a.checked_div(&BigInteger::from(0)).is_err());
    assert!(a.checked_rem(&BigInteger::from(0)).is_err());
}

#[test]
fn test_text_round_trip_and_formats() {
    let mut rng = StaticRandom::from_seed_u64(15);
    for _ in 0..100 {
        let value = random_signed(&mut rng, 2000);
        let text = value.to_string();
        assert_eq!(text, to_oracle(&value).to_string());
        assert_eq!(text.parse::<BigInteger>().unwrap(), value);
    }
    assert_eq!("+000123".parse::<BigInteger>().unwrap(), BigInteger::from(123));
    assert_eq!("-0".parse::<BigInteger>().unwrap().to_string(), "0");
    assert!("".parse::<BigInteger>().is_err());
    assert!("-".parse::<BigInteger>().is_err());
    assert!("12a4".parse::<BigInteger>().is_err());
    assert!("--5".parse::<BigInteger>().is_err());
}

#[test]
fn test_bit_length_matches_oracle() {
    let mut rng = StaticRandom::from_seed_u64(16);
    for _ in 0..100 {
        let value = random_signed(&mut rng, 1500);
        assert_eq!(value.bit_length() as u64, to_oracle(&value).abs().bits());
    }
}

#[test]
fn test_pow_matches_oracle() {
    let base = BigInteger::from(-37);
    let oracle = BigInt::from(-37);
    for exponent in [0u32, 1, 2, 17, 101] {
        assert_eq!(to_oracle(&base.pow(exponent)), num::pow(oracle.clone(), exponent as usize));
    }
}

#[test]
fn test_ordering_matches_oracle() {
    let mut rng = StaticRandom::from_seed_u64(17);
    for _ in 0..200 {
        let a = random_signed(&mut rng, 200);
        let b = random_signed(&mut rng, 200);
        assert_eq!(a.cmp(&b), to_oracle(&a).cmp(&to_oracle(&b)));
    }
}
