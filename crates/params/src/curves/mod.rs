//! Curve parameter record definitions and the shipped curve registry

pub mod edwards;
pub mod montgomery;
pub mod nist;

/// The three supported curve equation shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveShape {
    /// Short Weierstrass: y² = x³ + ax + b
    Weierstrass,
    /// Twisted Edwards: ax² + y² = 1 + dx²y²
    Edwards,
    /// Montgomery: By² = x³ + Ax² + x, with B = 1 and x-only arithmetic
    Montgomery,
}

/// Domain parameters for one named curve
///
/// Big integers are uppercase big-endian hex without a `0x` prefix, exactly
/// as printed in the defining standard. The small coefficient `a` is kept as
/// a signed integer: -3 or 0 for Weierstrass curves, 1 or -1 for Edwards
/// curves, and the Montgomery `A` coefficient otherwise.
#[derive(Debug, Clone, Copy)]
pub struct CurveParamsRecord {
    /// Curve name, e.g. `"NIST-P256"`
    pub name: &'static str,
    /// Equation shape
    pub shape: CurveShape,
    /// Prime field modulus p
    pub p: &'static str,
    /// Small curve coefficient (see type-level docs)
    pub a: i64,
    /// Weierstrass b or Edwards d; empty for Montgomery curves
    pub b_or_d: &'static str,
    /// Prime order n of the base point
    pub n: &'static str,
    /// Base point x-coordinate
    pub gx: &'static str,
    /// Base point y-coordinate; empty for x-only Montgomery curves
    pub gy: &'static str,
    /// Cofactor h = #E / n
    pub h: u32,
    /// Target security level in bits; selects hash and cipher widths
    pub security_bits: u32,
}

/// Look up a shipped curve record by name
pub fn by_name(name: &str) -> Option<&'static CurveParamsRecord> {
    ALL.iter().find(|record| record.name == name).copied()
}

/// All curve records shipped with this crate
pub static ALL: [&CurveParamsRecord; 3] = [
    &nist::NIST_P256,
    &edwards::EDWARDS25519,
    &montgomery::CURVE25519,
];
