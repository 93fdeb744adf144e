use super::*;
use crate::bignum::MpInt;

// p = 2^255 - 19, the curve25519 field prime
const P25519: &str = "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed";
// The P-256 field prime
const P256: &str = "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff";

fn domain64(hex_modulus: &str) -> MontgomeryDomain<u64> {
    let m = MpInt::<u64>::from_be_bytes(&hex::decode(hex_modulus).unwrap(), 4).unwrap();
    MontgomeryDomain::new(&m).unwrap()
}

fn small_domain(m: u64) -> MontgomeryDomain<u64> {
    MontgomeryDomain::new(&MpInt::from_u64(m, 1)).unwrap()
}

#[test]
fn rejects_even_and_tiny_moduli() {
    assert!(MontgomeryDomain::new(&MpInt::<u64>::from_u64(100, 1)).is_err());
    assert!(MontgomeryDomain::new(&MpInt::<u64>::from_u64(0, 1)).is_err());
    assert!(MontgomeryDomain::new(&MpInt::<u64>::from_u64(1, 1)).is_err());
    assert!(MontgomeryDomain::new(&MpInt::<u64>::from_u64(97, 1)).is_ok());
}

#[test]
fn small_prime_arithmetic() {
    let d = small_domain(97);
    let a = d.from_u64(45);
    let b = d.from_u64(67);
    // 45 * 67 = 3015 = 31 * 97 + 8
    assert_eq!(d.mul(&a, &b), d.from_u64(8));
    assert_eq!(d.mul_portable(&a, &b), d.from_u64(8));
    assert_eq!(d.add(&a, &b), d.from_u64(15));
    assert_eq!(d.sub(&a, &b), d.from_u64(75));
    assert_eq!(d.neg(&a), d.from_u64(52));
    assert_eq!(d.neg(&d.zero()), d.zero());
}

#[test]
fn fermat_property_small_prime() {
    let d = small_domain(97);
    let p_minus_1 = d.from_u64(96);
    for a in [2u64, 3, 5, 42, 96] {
        assert_eq!(d.pow_vartime(&d.from_u64(a), &p_minus_1), d.one());
    }
}

#[test]
fn invert_round_trips() {
    let d = domain64(P256);
    let a = d
        .from_bytes_strict(
            &hex::decode("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296")
                .unwrap(),
        )
        .unwrap();
    let inv = d.invert(&a).unwrap();
    assert_eq!(d.mul(&a, &inv), d.one());
    assert!(d.invert(&d.zero()).is_err());
}

#[test]
fn blinded_inversion_matches_plain() {
    let d = domain64(P25519);
    use rand_chacha::rand_core::SeedableRng;
    let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(99);
    for _ in 0..16 {
        let a = d.random_reduced(&mut rng, d.bits()).unwrap();
        let mask = d.random_reduced(&mut rng, d.bits()).unwrap();
        if bool::from(a.is_zero()) || bool::from(mask.is_zero()) {
            continue;
        }
        assert_eq!(d.invert_blinded(&a, &mask).unwrap(), d.invert(&a).unwrap());
    }
}

#[test]
fn wide_reduction_matches_division() {
    let d = small_domain(0xFFFF_FFFF_FFFF_FFC5);
    let t = MpInt::<u64>::from_be_bytes(
        &hex::decode("e3b0c44298fc1c149afbf4c8996fb924").unwrap(),
        2,
    )
    .unwrap();
    let (_, expected) = t.div_rem_vartime(&d.modulus().resized(2)).unwrap();
    assert_eq!(d.reduce_wide(&t), expected.resized(1));
}

#[test]
fn reduce_handles_values_above_modulus() {
    let d = small_domain(97);
    assert_eq!(d.reduce(&d.from_u64(300)), d.from_u64(9));
    assert_eq!(d.reduce(&d.from_u64(96)), d.from_u64(96));
}

#[test]
fn bytes_strict_enforces_range_and_width() {
    let d = domain64(P25519);
    assert_eq!(d.byte_len(), 32);
    // p itself must be rejected
    assert!(d.from_bytes_strict(&hex::decode(P25519).unwrap()).is_err());
    // p - 1 is fine
    let pm1 = hex::decode("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffec")
        .unwrap();
    assert!(d.from_bytes_strict(&pm1).is_ok());
    assert!(d.from_bytes_strict(&pm1[1..]).is_err());
}

#[test]
fn bytes_strict_range_check_agrees_with_vartime_compare() {
    let d = domain64(P256);
    let p = MpInt::<u64>::from_be_bytes(&hex::decode(P256).unwrap(), 4).unwrap();
    let one = MpInt::one(4);
    let (p_plus_1, _) = p.add_with_carry(&one);
    let (p_minus_1, _) = p.sub_with_borrow(&one);

    for (value, accept) in [
        (MpInt::zero(4), true),
        (one.clone(), true),
        (p_minus_1, true),
        (p.clone(), false),
        (p_plus_1, false),
    ] {
        let bytes = value.to_be_bytes(32).unwrap();
        assert_eq!(d.from_bytes_strict(&bytes).is_ok(), accept);
        assert_eq!(value.cmp_vartime(d.modulus()).is_lt(), accept);
    }
}

#[test]
fn sqrt_p_equals_3_mod_4() {
    // P-256 prime is 3 mod 4
    let d = domain64(P256);
    let x = d.from_u64(1234567);
    let sq = d.square(&x);
    let root = d.sqrt(&sq).unwrap().expect("square must have a root");
    assert!(root == x || root == d.neg(&x));
    // A non-residue has no root: -1 is a non-residue mod p = 3 mod 4
    assert!(d.sqrt(&d.neg(&d.one())).unwrap().is_none());
}

#[test]
fn sqrt_p_equals_5_mod_8() {
    // 2^255 - 19 is 5 mod 8
    let d = domain64(P25519);
    let x = d.from_u64(987654321);
    let sq = d.square(&x);
    let root = d.sqrt(&sq).unwrap().expect("square must have a root");
    assert!(root == x || root == d.neg(&x));
    assert_eq!(d.mul(&root, &root), sq);
}

#[test]
fn euler_criterion() {
    let d = small_domain(97);
    // 2 is a QR mod 97 (97 = 1 mod 8); 5 is not
    assert!(d.is_quadratic_residue(&d.from_u64(2)));
    assert!(!d.is_quadratic_residue(&d.from_u64(5)));
    assert!(d.is_quadratic_residue(&d.zero()));
}

#[test]
fn portable_and_wide_paths_bit_identical() {
    let d = domain64(P256);
    use rand_chacha::rand_core::SeedableRng;
    let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(42);
    for _ in 0..32 {
        let a = d.random_reduced(&mut rng, d.bits()).unwrap();
        let b = d.random_reduced(&mut rng, d.bits()).unwrap();
        assert_eq!(d.mul(&a, &b), d.mul_portable(&a, &b));
    }
}

#[test]
fn u32_and_u64_domains_agree() {
    let bytes = hex::decode(P256).unwrap();
    let m64 = MpInt::<u64>::from_be_bytes(&bytes, 4).unwrap();
    let m32 = MpInt::<u32>::from_be_bytes(&bytes, 8).unwrap();
    let d64 = MontgomeryDomain::new(&m64).unwrap();
    let d32 = MontgomeryDomain::new(&m32).unwrap();

    let a_bytes = hex::decode("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5")
        .unwrap();
    let b_bytes = hex::decode("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296")
        .unwrap();
    let a64 = d64.from_bytes_strict(&a_bytes).unwrap();
    let b64 = d64.from_bytes_strict(&b_bytes).unwrap();
    let a32 = d32.from_bytes_strict(&a_bytes).unwrap();
    let b32 = d32.from_bytes_strict(&b_bytes).unwrap();

    assert_eq!(
        d64.to_bytes(&d64.mul(&a64, &b64)).unwrap(),
        d32.to_bytes(&d32.mul(&a32, &b32)).unwrap()
    );
    assert_eq!(
        d64.to_bytes(&d64.invert(&a64).unwrap()).unwrap(),
        d32.to_bytes(&d32.invert(&a32).unwrap()).unwrap()
    );
}

#[test]
fn random_reduced_truncates() {
    let d = domain64(P25519);
    use rand_chacha::rand_core::SeedableRng;
    let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(5);
    let v = d.random_reduced(&mut rng, 128).unwrap();
    assert!(v.bit_len() <= 128);
    let w = d.random_reduced(&mut rng, 4096).unwrap();
    assert!(w.cmp_vartime(d.modulus()).is_lt());
}
