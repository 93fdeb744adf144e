//! NIST prime-field Weierstrass curves

use super::{CurveParamsRecord, CurveShape};

/// NIST P-256 (secp256r1), FIPS 186-4 / SEC 2 §2.4.2
pub static NIST_P256: CurveParamsRecord = CurveParamsRecord {
    name: "NIST-P256",
    shape: CurveShape::Weierstrass,
    p: "FFFFFFFF00000001000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFF",
    a: -3,
    b_or_d: "5AC635D8AA3A93E7B3EBBD55769886BC651D06B0CC53B0F63BCE3C3E27D2604B",
    n: "FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551",
    gx: "6B17D1F2E12C4247F8BCE6E563A440F277037D812DEB33A0F4A13945D898C296",
    gy: "4FE342E2FE1A7F9B8EE7EB4A7C0F9E162BCE33576B315ECECBB6406837BF51F5",
    h: 1,
    security_bits: 128,
};
