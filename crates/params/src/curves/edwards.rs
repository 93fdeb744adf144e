//! Twisted Edwards curves

use super::{CurveParamsRecord, CurveShape};

/// edwards25519, RFC 7748 §4.1 / RFC 8032 §5.1
///
/// -x² + y² = 1 + dx²y² over GF(2²⁵⁵ - 19), with d = -121665/121666.
pub static EDWARDS25519: CurveParamsRecord = CurveParamsRecord {
    name: "edwards25519",
    shape: CurveShape::Edwards,
    p: "7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFED",
    a: -1,
    b_or_d: "52036CEE2B6FFE738CC740797779E89800700A4D4141D8AB75EB4DCA135978A3",
    n: "1000000000000000000000000000000014DEF9DEA2F79CD65812631A5CF5D3ED",
    gx: "216936D3CD6E53FEC0A4E231FDD6DC5C692CC7609525A7B2C9562D608F25D51A",
    gy: "6666666666666666666666666666666666666666666666666666666666666658",
    h: 8,
    security_bits: 128,
};
