//! Differential properties of the arithmetic engines: the two limb-level
//! multiplication paths must be bit-exact, and the u32 and u64 limb stacks
//! must agree byte for byte.

use eckit_algorithms::bignum::{Limb, MpInt};
use eckit_algorithms::field::MontgomeryDomain;
use proptest::prelude::*;

const P256: &str = "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff";
const P25519: &str = "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed";

fn domain64(modulus: &str) -> MontgomeryDomain<u64> {
    let m = MpInt::<u64>::from_be_bytes(&hex::decode(modulus).unwrap(), 4).unwrap();
    MontgomeryDomain::new(&m).unwrap()
}

fn domain32(modulus: &str) -> MontgomeryDomain<u32> {
    let m = MpInt::<u32>::from_be_bytes(&hex::decode(modulus).unwrap(), 8).unwrap();
    MontgomeryDomain::new(&m).unwrap()
}

proptest! {
    #[test]
    fn limb_mac_paths_bit_exact_u64(acc: u64, a: u64, b: u64, carry: u64) {
        prop_assert_eq!(
            <u64 as Limb>::mac(acc, a, b, carry),
            <u64 as Limb>::mac_portable(acc, a, b, carry)
        );
    }

    #[test]
    fn limb_mac_paths_bit_exact_u32(acc: u32, a: u32, b: u32, carry: u32) {
        prop_assert_eq!(
            <u32 as Limb>::mac(acc, a, b, carry),
            <u32 as Limb>::mac_portable(acc, a, b, carry)
        );
    }

    #[test]
    fn widening_mul_paths_agree(a in prop::array::uniform32(any::<u8>()),
                                b in prop::array::uniform32(any::<u8>())) {
        let x = MpInt::<u64>::from_be_bytes(&a, 4).unwrap();
        let y = MpInt::<u64>::from_be_bytes(&b, 4).unwrap();
        prop_assert_eq!(x.widening_mul(&y), x.widening_mul_portable(&y));
    }

    #[test]
    fn montgomery_mul_paths_agree(a in prop::array::uniform32(any::<u8>()),
                                  b in prop::array::uniform32(any::<u8>())) {
        let d = domain64(P256);
        let x = d.from_bytes_reduced(&a).unwrap();
        let y = d.from_bytes_reduced(&b).unwrap();
        prop_assert_eq!(d.mul(&x, &y), d.mul_portable(&x, &y));
    }

    #[test]
    fn limb_widths_agree_on_field_ops(a in prop::array::uniform32(any::<u8>()),
                                      b in prop::array::uniform32(any::<u8>())) {
        let d64 = domain64(P25519);
        let d32 = domain32(P25519);
        let x64 = d64.from_bytes_reduced(&a).unwrap();
        let y64 = d64.from_bytes_reduced(&b).unwrap();
        let x32 = d32.from_bytes_reduced(&a).unwrap();
        let y32 = d32.from_bytes_reduced(&b).unwrap();

        prop_assert_eq!(
            d64.to_bytes(&d64.mul(&x64, &y64)).unwrap(),
            d32.to_bytes(&d32.mul(&x32, &y32)).unwrap()
        );
        prop_assert_eq!(
            d64.to_bytes(&d64.add(&x64, &y64)).unwrap(),
            d32.to_bytes(&d32.add(&x32, &y32)).unwrap()
        );
        prop_assert_eq!(
            d64.to_bytes(&d64.sub(&x64, &y64)).unwrap(),
            d32.to_bytes(&d32.sub(&x32, &y32)).unwrap()
        );
    }

    #[test]
    fn blinded_inversion_equals_plain(a in prop::array::uniform32(any::<u8>()),
                                      mask in prop::array::uniform32(any::<u8>())) {
        let d = domain64(P256);
        let x = d.from_bytes_reduced(&a).unwrap();
        let m = d.from_bytes_reduced(&mask).unwrap();
        prop_assume!(!bool::from(x.is_zero()));
        prop_assume!(!bool::from(m.is_zero()));
        prop_assert_eq!(d.invert_blinded(&x, &m).unwrap(), d.invert(&x).unwrap());
    }

    #[test]
    fn reduce_wide_matches_division(t in prop::array::uniform32(any::<u8>())) {
        let d = domain64(P25519);
        let wide = MpInt::<u64>::from_be_bytes(&t, 8).unwrap();
        let divisor = MpInt::<u64>::from_be_bytes(&hex::decode(P25519).unwrap(), 8).unwrap();
        let (_, expected) = wide.div_rem_vartime(&divisor).unwrap();
        prop_assert_eq!(
            d.to_bytes(&d.reduce_wide(&wide)).unwrap(),
            expected.to_be_bytes(32).unwrap()
        );
    }
}
