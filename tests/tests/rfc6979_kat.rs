//! RFC 6979 appendix A.2.5 known-answer scenario: ECDSA over P-256 with
//! SHA-256, driven end to end through the public suite API

use eckit_api::SignatureScheme;
use eckit_sign::EcdsaSuite;
use eckit_tests::unhex;

const PRIVATE_SCALAR: &str = "c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721";
const PUBLIC_X: &str = "60fed4ba255a9d31c961eb74c6356d68c049b8923b61fa6ce669622e60f29fb6";
const PUBLIC_Y: &str = "7903fe1008b8bc99a41ae9e95628bc64f2f1b20c2d7e9f5177a3c294d4462299";

struct Vector {
    message: &'static [u8],
    nonce: &'static str,
    c: &'static str,
    d: &'static str,
}

const VECTORS: [Vector; 2] = [
    Vector {
        message: b"sample",
        nonce: "a6e3c57dd01abe90086538398355dd4c3b17aa873382b0f24d6129493d8aad60",
        c: "efd48b2aacb6a8fd1140dd9cd45e81d69d2c877b56aaf991c34d0ea84eaf3716",
        d: "f7cb1c942d657c41d436c7a1b6e29f65f3e900dbb9aff4064dc4ab2f843acda8",
    },
    Vector {
        message: b"test",
        nonce: "d16b6ae827f17175e040871a1c7ec3500192c4c92677336ec2537acaee0008e0",
        c: "f1abb023518351cd71d881567b1ea663ed3efcf6c5132b354f28d3b0b7d38367",
        d: "019f4113742a2b14bd25926b49c649155f267e60d3814b4c0cc84250e46f0083",
    },
];

#[test]
fn fixed_scalar_yields_known_public_point() {
    let suite: EcdsaSuite = EcdsaSuite::new(&eckit_params::NIST_P256).unwrap();
    let (public, _) = suite.keypair_from_scalar(&unhex(PRIVATE_SCALAR)).unwrap();
    let mut expected = vec![0x04u8];
    expected.extend_from_slice(&unhex(PUBLIC_X));
    expected.extend_from_slice(&unhex(PUBLIC_Y));
    assert_eq!(public.as_bytes(), &expected[..]);
}

#[test]
fn fixed_nonce_signatures_match_and_verify() {
    let suite: EcdsaSuite = EcdsaSuite::new(&eckit_params::NIST_P256).unwrap();
    let (public, secret) = suite.keypair_from_scalar(&unhex(PRIVATE_SCALAR)).unwrap();

    for vector in &VECTORS {
        let signature = suite
            .sign_with_nonce(vector.message, &secret, &unhex(vector.nonce))
            .unwrap();
        let mut expected = unhex(vector.c);
        expected.extend_from_slice(&unhex(vector.d));
        assert_eq!(signature.as_bytes(), &expected[..]);
        suite.verify(vector.message, &signature, &public).unwrap();

        // Decrementing the last byte of D breaks verification
        let mut tampered = signature.as_bytes().to_vec();
        let last = tampered.len() - 1;
        tampered[last] = tampered[last].wrapping_sub(1);
        let tampered = suite.signature_from_bytes(&tampered).unwrap();
        assert!(suite.verify(vector.message, &tampered, &public).is_err());
    }
}
