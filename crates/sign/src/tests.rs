use super::*;
use eckit_params::{CURVE25519, EDWARDS25519, NIST_P256};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;

// RFC 6979 appendix A.2.5: ECDSA over P-256 with SHA-256
const RFC6979_KEY: &str = "c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721";
const RFC6979_UX: &str = "60fed4ba255a9d31c961eb74c6356d68c049b8923b61fa6ce669622e60f29fb6";
const RFC6979_UY: &str = "7903fe1008b8bc99a41ae9e95628bc64f2f1b20c2d7e9f5177a3c294d4462299";

const SAMPLE_K: &str = "a6e3c57dd01abe90086538398355dd4c3b17aa873382b0f24d6129493d8aad60";
const SAMPLE_R: &str = "efd48b2aacb6a8fd1140dd9cd45e81d69d2c877b56aaf991c34d0ea84eaf3716";
const SAMPLE_S: &str = "f7cb1c942d657c41d436c7a1b6e29f65f3e900dbb9aff4064dc4ab2f843acda8";

const TEST_K: &str = "d16b6ae827f17175e040871a1c7ec3500192c4c92677336ec2537acaee0008e0";
const TEST_R: &str = "f1abb023518351cd71d881567b1ea663ed3efcf6c5132b354f28d3b0b7d38367";
const TEST_S: &str = "019f4113742a2b14bd25926b49c649155f267e60d3814b4c0cc84250e46f0083";

fn p256_suite() -> EcdsaSuite {
    EcdsaSuite::new(&NIST_P256).unwrap()
}

fn rfc6979_keypair(suite: &EcdsaSuite) -> (EcdsaPublicKey, EcdsaSecretKey) {
    suite
        .keypair_from_scalar(&hex::decode(RFC6979_KEY).unwrap())
        .unwrap()
}

fn rng() -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(0x51611)
}

#[test]
fn rfc6979_public_key() {
    let suite = p256_suite();
    let (public, _) = rfc6979_keypair(&suite);
    let mut expected = vec![0x04u8];
    expected.extend_from_slice(&hex::decode(RFC6979_UX).unwrap());
    expected.extend_from_slice(&hex::decode(RFC6979_UY).unwrap());
    assert_eq!(public.as_bytes(), &expected[..]);
}

#[test]
fn rfc6979_known_answer_signatures() {
    let suite = p256_suite();
    let (public, secret) = rfc6979_keypair(&suite);

    for (message, k, r, s) in [
        (&b"sample"[..], SAMPLE_K, SAMPLE_R, SAMPLE_S),
        (&b"test"[..], TEST_K, TEST_R, TEST_S),
    ] {
        let signature = suite
            .sign_with_nonce(message, &secret, &hex::decode(k).unwrap())
            .unwrap();
        let mut expected = hex::decode(r).unwrap();
        expected.extend_from_slice(&hex::decode(s).unwrap());
        assert_eq!(signature.as_bytes(), &expected[..]);
        suite.verify(message, &signature, &public).unwrap();

        // Decrementing D must break the signature
        let mut tampered = signature.as_bytes().to_vec();
        *tampered.last_mut().unwrap() = tampered.last().unwrap().wrapping_sub(1);
        let tampered = suite.signature_from_bytes(&tampered).unwrap();
        assert!(suite.verify(message, &tampered, &public).is_err());
    }
}

#[test]
fn randomized_sign_verify_round_trip() {
    let suite = p256_suite();
    let mut rng = rng();
    let (public, secret) = suite.keypair(&mut rng).unwrap();
    let message = b"attack at dawn";

    let sig1 = suite.sign(&mut rng, message, &secret).unwrap();
    let sig2 = suite.sign(&mut rng, message, &secret).unwrap();
    suite.verify(message, &sig1, &public).unwrap();
    suite.verify(message, &sig2, &public).unwrap();
    // Fresh nonce per call: same message, different signatures
    assert_ne!(sig1.as_bytes(), sig2.as_bytes());
}

#[test]
fn tampering_fails_verification() {
    let suite = p256_suite();
    let mut rng = rng();
    let (public, secret) = suite.keypair(&mut rng).unwrap();
    let message = b"the quick brown fox";
    let signature = suite.sign(&mut rng, message, &secret).unwrap();

    assert!(suite.verify(b"the quick brown fax", &signature, &public).is_err());

    for index in [0usize, 15, 32, 63] {
        let mut bytes = signature.as_bytes().to_vec();
        bytes[index] ^= 0x01;
        let tampered = suite.signature_from_bytes(&bytes).unwrap();
        assert!(suite.verify(message, &tampered, &public).is_err());
    }

    let (other_public, _) = suite.keypair(&mut rng).unwrap();
    assert!(suite.verify(message, &signature, &other_public).is_err());
}

#[test]
fn component_range_checks() {
    let suite = p256_suite();
    let mut rng = rng();
    let (public, secret) = suite.keypair(&mut rng).unwrap();
    let message = b"boundary";
    let good = suite.sign(&mut rng, message, &secret).unwrap();

    // Zero C and zero D
    for half in 0..2 {
        let mut bytes = good.as_bytes().to_vec();
        bytes[half * 32..(half + 1) * 32].fill(0);
        let sig = suite.signature_from_bytes(&bytes).unwrap();
        assert!(suite.verify(message, &sig, &public).is_err());
    }

    // C = order (out of range, must not be reduced)
    let order = hex::decode("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551")
        .unwrap();
    let mut bytes = good.as_bytes().to_vec();
    bytes[..32].copy_from_slice(&order);
    let sig = suite.signature_from_bytes(&bytes).unwrap();
    assert!(suite.verify(message, &sig, &public).is_err());

    // Wrong wire width
    assert!(suite.signature_from_bytes(&good.as_bytes()[..63]).is_err());
}

#[test]
fn fixed_nonce_rejects_degenerate_nonce() {
    let suite = p256_suite();
    let mut rng = rng();
    let (_, secret) = suite.keypair(&mut rng).unwrap();
    assert!(suite.sign_with_nonce(b"m", &secret, &[0u8; 32]).is_err());
    // Nonce congruent to zero mod n
    let order = hex::decode("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551")
        .unwrap();
    assert!(suite.sign_with_nonce(b"m", &secret, &order).is_err());
}

#[test]
fn edwards_curve_hosts_the_scheme() {
    let suite: EcdsaSuite = EcdsaSuite::new(&EDWARDS25519).unwrap();
    let mut rng = rng();
    let (public, secret) = suite.keypair(&mut rng).unwrap();
    let message = b"edwards message";
    let signature = suite.sign(&mut rng, message, &secret).unwrap();
    suite.verify(message, &signature, &public).unwrap();
    assert!(suite.verify(b"other", &signature, &public).is_err());
}

#[test]
fn montgomery_curve_rejected() {
    assert!(matches!(
        EcdsaSuite::<u64>::new(&CURVE25519),
        Err(Error::Unsupported { .. })
    ));
}

#[test]
fn u32_and_u64_suites_agree_on_fixed_nonce() {
    let suite64: EcdsaSuite<u64> = EcdsaSuite::new(&NIST_P256).unwrap();
    let suite32: EcdsaSuite<u32> = EcdsaSuite::new(&NIST_P256).unwrap();
    let key = hex::decode(RFC6979_KEY).unwrap();
    let nonce = hex::decode(SAMPLE_K).unwrap();
    let (_, sec64) = suite64.keypair_from_scalar(&key).unwrap();
    let (_, sec32) = suite32.keypair_from_scalar(&key).unwrap();
    let sig64 = suite64.sign_with_nonce(b"sample", &sec64, &nonce).unwrap();
    let sig32 = suite32.sign_with_nonce(b"sample", &sec32, &nonce).unwrap();
    assert_eq!(sig64.as_bytes(), sig32.as_bytes());
}
