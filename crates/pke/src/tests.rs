use super::*;
use eckit_params::{CURVE25519, EDWARDS25519, NIST_P256};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn suite() -> EciesSuite {
    EciesSuite::new(&NIST_P256).unwrap()
}

fn rng() -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(0xec1e5)
}

#[test]
fn round_trip_including_empty_message() {
    let suite = suite();
    let mut rng = rng();
    let (public, secret) = suite.keypair(&mut rng).unwrap();

    for message in [&b""[..], b"x", b"exactly sixteen!", b"a considerably longer message spanning several cipher blocks"] {
        let ct = suite
            .encrypt(&mut rng, &public, message, b"kdf-ctx", b"mac-ctx", 16)
            .unwrap();
        let pt = suite.decrypt(&secret, &ct, b"kdf-ctx", b"mac-ctx").unwrap();
        assert_eq!(pt, message);
    }
}

#[test]
fn edwards_curve_round_trip() {
    let suite: EciesSuite = EciesSuite::new(&EDWARDS25519).unwrap();
    let mut rng = rng();
    let (public, secret) = suite.keypair(&mut rng).unwrap();
    let ct = suite
        .encrypt(&mut rng, &public, b"edwards payload", b"", b"", 8)
        .unwrap();
    assert_eq!(
        suite.decrypt(&secret, &ct, b"", b"").unwrap(),
        b"edwards payload"
    );
}

#[test]
fn montgomery_curve_rejected() {
    assert!(matches!(
        EciesSuite::<u64>::new(&CURVE25519),
        Err(Error::Unsupported { .. })
    ));
}

#[test]
fn fresh_ephemeral_per_message() {
    let suite = suite();
    let mut rng = rng();
    let (public, _) = suite.keypair(&mut rng).unwrap();
    let ct1 = suite.encrypt(&mut rng, &public, b"m", b"", b"", 16).unwrap();
    let ct2 = suite.encrypt(&mut rng, &public, b"m", b"", b"", 16).unwrap();
    assert_ne!(ct1.ephemeral_point(), ct2.ephemeral_point());
    assert_ne!(ct1.payload(), ct2.payload());
}

#[test]
fn any_corruption_fails_identically() {
    let suite = suite();
    let mut rng = rng();
    let (public, secret) = suite.keypair(&mut rng).unwrap();
    let ct = suite
        .encrypt(&mut rng, &public, b"sensitive", b"p1", b"p2", 12)
        .unwrap();

    let check = |candidate: &EciesCiphertext| {
        match suite.decrypt(&secret, candidate, b"p1", b"p2") {
            Err(Error::DecryptionFailed { .. }) => {}
            other => panic!("expected undifferentiated failure, got {:?}", other.is_ok()),
        }
    };

    // Every tag byte
    for i in 0..ct.tag().len() {
        let mut bad = ct.clone();
        bad.t[i] ^= 0x01;
        check(&bad);
    }
    // Every payload byte
    for i in 0..ct.payload().len() {
        let mut bad = ct.clone();
        bad.c[i] ^= 0x80;
        check(&bad);
    }
    // Corrupted ephemeral point
    let mut bad = ct.clone();
    bad.v[10] ^= 0x01;
    check(&bad);

    // Wrong contexts
    assert!(suite.decrypt(&secret, &ct, b"p1-wrong", b"p2").is_err());
    assert!(suite.decrypt(&secret, &ct, b"p1", b"p2-wrong").is_err());

    // Wrong recipient
    let (_, other_secret) = suite.keypair(&mut rng).unwrap();
    match suite.decrypt(&other_secret, &ct, b"p1", b"p2") {
        Err(Error::DecryptionFailed { .. }) => {}
        _ => panic!("expected undifferentiated failure"),
    }
}

#[test]
fn context_length_is_bound_into_the_tag() {
    // p2 = "ab" || "" and p2 = "a" || "b" must not collide: the MAC input
    // carries the context's byte length.
    let suite = suite();
    let mut rng = rng();
    let (public, secret) = suite.keypair(&mut rng).unwrap();
    let ct = suite.encrypt(&mut rng, &public, b"m", b"", b"ab", 16).unwrap();
    assert!(suite.decrypt(&secret, &ct, b"", b"a").is_err());
    assert!(suite.decrypt(&secret, &ct, b"", b"ab").is_ok());
}

#[test]
fn tag_length_bounds() {
    let suite = suite();
    let mut rng = rng();
    let (public, secret) = suite.keypair(&mut rng).unwrap();

    assert!(matches!(
        suite.encrypt(&mut rng, &public, b"m", b"", b"", 3),
        Err(Error::InvalidLength {
            expected: MIN_TAG_LEN,
            actual: 3,
            ..
        })
    ));
    assert!(matches!(
        suite.encrypt(&mut rng, &public, b"m", b"", b"", 33),
        Err(Error::InvalidLength {
            expected: 32,
            actual: 33,
            ..
        })
    ));
    for tag_len in [MIN_TAG_LEN, 16, 32] {
        let ct = suite
            .encrypt(&mut rng, &public, b"m", b"", b"", tag_len)
            .unwrap();
        assert_eq!(ct.tag().len(), tag_len);
        assert_eq!(suite.decrypt(&secret, &ct, b"", b"").unwrap(), b"m");
    }
}

#[test]
fn wire_codec_round_trips() {
    let suite = suite();
    let mut rng = rng();
    let (public, secret) = suite.keypair(&mut rng).unwrap();
    let ct = suite
        .encrypt(&mut rng, &public, b"over the wire", b"", b"", 16)
        .unwrap();
    let wire = ct.to_bytes();
    assert_eq!(wire.len(), 65 + ct.payload().len() + 16);
    let parsed = suite.ciphertext_from_bytes(&wire, 16).unwrap();
    assert_eq!(parsed, ct);
    assert_eq!(
        suite.decrypt(&secret, &parsed, b"", b"").unwrap(),
        b"over the wire"
    );

    // Too short to hold a point, a block and a tag
    assert!(suite.ciphertext_from_bytes(&wire[..70], 16).is_err());
    // Tag width outside the accepted range
    assert!(suite.ciphertext_from_bytes(&wire, 2).is_err());
}

#[test]
fn u32_and_u64_suites_interoperate() {
    let suite64: EciesSuite<u64> = EciesSuite::new(&NIST_P256).unwrap();
    let suite32: EciesSuite<u32> = EciesSuite::new(&NIST_P256).unwrap();
    let mut rng = rng();

    let (public64, secret64) = suite64.keypair(&mut rng).unwrap();
    // Rebuild the same recipient key on the u32 stack
    let public32 = suite32.public_key_from_bytes(public64.as_bytes()).unwrap();

    let ct = suite32
        .encrypt(&mut rng, &public32, b"cross-width", b"p1", b"p2", 16)
        .unwrap();
    let parsed = suite64.ciphertext_from_bytes(&ct.to_bytes(), 16).unwrap();
    assert_eq!(
        suite64.decrypt(&secret64, &parsed, b"p1", b"p2").unwrap(),
        b"cross-width"
    );
}
