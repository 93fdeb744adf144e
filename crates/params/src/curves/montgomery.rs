//! Montgomery curves (x-only arithmetic)

use super::{CurveParamsRecord, CurveShape};

/// curve25519, RFC 7748 §4.1
///
/// y² = x³ + 486662x² + x over GF(2²⁵⁵ - 19). Points carry only the
/// x-coordinate; gy is unused.
pub static CURVE25519: CurveParamsRecord = CurveParamsRecord {
    name: "curve25519",
    shape: CurveShape::Montgomery,
    p: "7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFED",
    a: 486662,
    b_or_d: "",
    n: "1000000000000000000000000000000014DEF9DEA2F79CD65812631A5CF5D3ED",
    gx: "0000000000000000000000000000000000000000000000000000000000000009",
    gy: "",
    h: 8,
    security_bits: 128,
};
