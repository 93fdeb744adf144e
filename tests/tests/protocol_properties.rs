//! Cross-curve protocol properties exercised through the public suite APIs

use eckit_api::{HybridEncryption, KeyAgreement, SignatureScheme};
use eckit_ecdh::EcdhSuite;
use eckit_params::CurveShape;
use eckit_pke::EciesSuite;
use eckit_sign::EcdsaSuite;
use eckit_tests::{seeded_rng, shipped_records};

#[test]
fn agreement_commutes_and_keys_validate_everywhere() {
    for record in shipped_records() {
        let suite: EcdhSuite = EcdhSuite::new(record).unwrap();
        let mut rng = seeded_rng(1);
        for _ in 0..3 {
            let (pub_a, sec_a) = suite.keypair(&mut rng).unwrap();
            let (pub_b, sec_b) = suite.keypair(&mut rng).unwrap();
            suite.validate_public_key(&pub_a).unwrap();
            suite.validate_public_key(&pub_b).unwrap();
            assert_eq!(
                suite.shared_secret(&sec_a, &pub_b).unwrap().as_ref(),
                suite.shared_secret(&sec_b, &pub_a).unwrap().as_ref(),
                "curve {}",
                record.name
            );
        }
    }
}

#[test]
fn signatures_round_trip_on_full_point_curves() {
    for record in shipped_records() {
        if record.shape == CurveShape::Montgomery {
            assert!(EcdsaSuite::<u64>::new(record).is_err());
            continue;
        }
        let suite: EcdsaSuite = EcdsaSuite::new(record).unwrap();
        let mut rng = seeded_rng(2);
        let (public, secret) = suite.keypair(&mut rng).unwrap();
        for message in [&b""[..], b"m", b"a longer message body for signing"] {
            let signature = suite.sign(&mut rng, message, &secret).unwrap();
            suite.verify(message, &signature, &public).unwrap();
            assert!(suite.verify(b"not the message", &signature, &public).is_err());
        }
    }
}

#[test]
fn hybrid_encryption_round_trips_on_full_point_curves() {
    for record in shipped_records() {
        if record.shape == CurveShape::Montgomery {
            assert!(EciesSuite::<u64>::new(record).is_err());
            continue;
        }
        let suite: EciesSuite = EciesSuite::new(record).unwrap();
        let mut rng = seeded_rng(3);
        let (public, secret) = suite.keypair(&mut rng).unwrap();
        let ct = suite
            .encrypt(&mut rng, &public, b"integration payload", b"kdf", b"mac", 16)
            .unwrap();
        assert_eq!(
            suite.decrypt(&secret, &ct, b"kdf", b"mac").unwrap(),
            b"integration payload"
        );
        assert!(suite.decrypt(&secret, &ct, b"kdf", b"other").is_err());
    }
}

#[test]
fn keys_transfer_between_suites_as_bytes() {
    // An ECDH keypair doubles as an ECIES recipient: both decode the same
    // wire format over the same curve.
    let record = &eckit_params::NIST_P256;
    let ecdh: EcdhSuite = EcdhSuite::new(record).unwrap();
    let ecies: EciesSuite = EciesSuite::new(record).unwrap();
    let mut rng = seeded_rng(4);

    let (public, secret) = ecdh.keypair(&mut rng).unwrap();
    let recipient = ecies.public_key_from_bytes(public.as_bytes()).unwrap();
    let ct = ecies
        .encrypt(&mut rng, &recipient, b"shared wire format", b"", b"", 16)
        .unwrap();

    let exported = ecdh.secret_key_bytes(&secret).unwrap();
    let recipient_secret = ecies.secret_key_from_bytes(exported.as_ref()).unwrap();
    assert_eq!(
        ecies.decrypt(&recipient_secret, &ct, b"", b"").unwrap(),
        b"shared wire format"
    );
}

#[test]
fn suite_names_follow_the_curve() {
    let ecdh: EcdhSuite = EcdhSuite::new(&eckit_params::NIST_P256).unwrap();
    assert_eq!(ecdh.name(), "ECDH-NIST-P256");
    let sign: EcdsaSuite = EcdsaSuite::new(&eckit_params::EDWARDS25519).unwrap();
    assert_eq!(sign.name(), "ECDSA-edwards25519");
    let pke: EciesSuite = EciesSuite::new(&eckit_params::NIST_P256).unwrap();
    assert_eq!(pke.name(), "ECIES-NIST-P256");
    let xdh: EcdhSuite = EcdhSuite::new(&eckit_params::CURVE25519).unwrap();
    assert_eq!(xdh.name(), "ECDH-curve25519");
}
