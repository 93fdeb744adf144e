//! Montgomery-shape x-only arithmetic: By² = x³ + Ax² + x, B = 1
//!
//! Points carry only an x-coordinate; arithmetic runs on projective
//! (X : Z) pairs through the Montgomery ladder, with a constant-time swap
//! driven by successive scalar bits. Z = 0 encodes the identity.
//!
//! General point addition needs y-coordinates this shape does not carry,
//! so [`GroupLaw::add`] and [`GroupLaw::mul2_vartime`] report the
//! operation as unsupported. Doubling works x-only and is kept because
//! cofactor clearing needs it.

use super::{CurvePoint, GroupLaw};
use crate::bignum::{Limb, MpInt};
use crate::error::{Error, Result};
use crate::field::MontgomeryDomain;

pub(crate) struct MontgomeryLaw<L: Limb> {
    field: MontgomeryDomain<L>,
    /// Coefficient A, plain form (only the curve equation uses it)
    a: MpInt<L>,
    /// (A + 2) / 4, Montgomery form, for the ladder step
    a24: MpInt<L>,
}

impl<L: Limb> MontgomeryLaw<L> {
    pub(crate) fn new(field: MontgomeryDomain<L>, a: &MpInt<L>) -> Result<Self> {
        let a_plus_2 = field.add(a, &field.from_u64(2));
        let inv4 = field.invert(&field.from_u64(4))?;
        let a24 = field.to_mont(&field.mul(&a_plus_2, &inv4));
        Ok(MontgomeryLaw {
            field,
            a: a.clone(),
            a24,
        })
    }

    fn x_of(&self, p: &CurvePoint<L>) -> Result<Option<MpInt<L>>> {
        match p {
            CurvePoint::Infinity => Ok(None),
            CurvePoint::XOnly { x } => Ok(Some(x.clone())),
            CurvePoint::Affine { .. } => Err(Error::InvalidParameter {
                context: "MontgomeryLaw",
                #[cfg(feature = "std")]
                message: "Montgomery-shape points are x-only".into(),
            }),
        }
    }

    fn from_projective(&self, x: &MpInt<L>, z: &MpInt<L>) -> Result<CurvePoint<L>> {
        if bool::from(z.is_zero()) {
            return Ok(CurvePoint::Infinity);
        }
        let xp = self.field.from_mont(x);
        let zp = self.field.from_mont(z);
        let zi = self.field.invert(&zp)?;
        Ok(CurvePoint::XOnly {
            x: self.field.mul(&xp, &zi),
        })
    }

    /// x-only projective doubling. Total: both the identity (Z = 0) and the
    /// order-2 point (X = 0) double to the identity without a branch.
    fn xz_double(&self, x: &MpInt<L>, z: &MpInt<L>) -> (MpInt<L>, MpInt<L>) {
        let f = &self.field;
        let aa = f.mont_square(&f.add(x, z));
        let bb = f.mont_square(&f.sub(x, z));
        let c = f.sub(&aa, &bb);
        let x2 = f.mont_mul(&aa, &bb);
        let z2 = f.mont_mul(&c, &f.add(&bb, &f.mont_mul(&self.a24, &c)));
        (x2, z2)
    }

    /// Full Montgomery ladder over exactly `bits` iterations.
    /// `x1` is the base x-coordinate in Montgomery form.
    fn ladder(&self, x1: &MpInt<L>, k: &MpInt<L>, bits: usize) -> (MpInt<L>, MpInt<L>) {
        let f = &self.field;
        let mut x2 = f.mont_one();
        let mut z2 = f.zero();
        let mut x3 = x1.clone();
        let mut z3 = f.mont_one();
        let mut swap = subtle::Choice::from(0);

        for i in (0..bits).rev() {
            let bit = k.bit(i);
            let s = swap ^ bit;
            MpInt::conditional_swap(&mut x2, &mut x3, s);
            MpInt::conditional_swap(&mut z2, &mut z3, s);
            swap = bit;

            let a = f.add(&x2, &z2);
            let aa = f.mont_square(&a);
            let b = f.sub(&x2, &z2);
            let bb = f.mont_square(&b);
            let e = f.sub(&aa, &bb);
            let c = f.add(&x3, &z3);
            let d = f.sub(&x3, &z3);
            let da = f.mont_mul(&d, &a);
            let cb = f.mont_mul(&c, &b);

            x3 = f.mont_square(&f.add(&da, &cb));
            z3 = f.mont_mul(x1, &f.mont_square(&f.sub(&da, &cb)));
            x2 = f.mont_mul(&aa, &bb);
            z2 = f.mont_mul(&e, &f.add(&bb, &f.mont_mul(&self.a24, &e)));
        }
        MpInt::conditional_swap(&mut x2, &mut x3, swap);
        MpInt::conditional_swap(&mut z2, &mut z3, swap);
        (x2, z2)
    }

    fn unsupported(&self, what: &'static str) -> Error {
        Error::Unsupported { feature: what }
    }
}

impl<L: Limb> GroupLaw<L> for MontgomeryLaw<L> {
    fn double(&self, p: &CurvePoint<L>) -> Result<CurvePoint<L>> {
        match self.x_of(p)? {
            None => Ok(CurvePoint::Infinity),
            Some(x) => {
                let xm = self.field.to_mont(&x);
                let (x2, z2) = self.xz_double(&xm, &self.field.mont_one());
                self.from_projective(&x2, &z2)
            }
        }
    }

    fn add(&self, _p: &CurvePoint<L>, _q: &CurvePoint<L>) -> Result<CurvePoint<L>> {
        Err(self.unsupported("general point addition on x-only Montgomery curves"))
    }

    fn scalar_mul(&self, p: &CurvePoint<L>, k: &MpInt<L>, bits: usize) -> Result<CurvePoint<L>> {
        match self.x_of(p)? {
            None => Ok(CurvePoint::Infinity),
            Some(x) => {
                let xm = self.field.to_mont(&x);
                let (xr, zr) = self.ladder(&xm, k, bits);
                self.from_projective(&xr, &zr)
            }
        }
    }

    fn scalar_mul_vartime(&self, p: &CurvePoint<L>, k: &MpInt<L>) -> Result<CurvePoint<L>> {
        // The ladder's cost depends only on the iteration count, so the
        // variable-time entry point just trims to the multiplier's width.
        self.scalar_mul(p, k, k.bit_len())
    }

    fn mul2_vartime(
        &self,
        _p: &CurvePoint<L>,
        _q: &CurvePoint<L>,
        _a: &MpInt<L>,
        _b: &MpInt<L>,
    ) -> Result<CurvePoint<L>> {
        Err(self.unsupported("double scalar multiplication on x-only Montgomery curves"))
    }

    fn is_on_curve(&self, p: &CurvePoint<L>) -> bool {
        match p {
            CurvePoint::Infinity => true,
            CurvePoint::Affine { .. } => false,
            CurvePoint::XOnly { x } => {
                // x is valid when x^3 + A*x^2 + x is a square
                let f = &self.field;
                let x2 = f.square(x);
                let x3 = f.mul(&x2, x);
                let rhs = f.add(&f.add(&x3, &f.mul(&self.a, &x2)), x);
                f.is_quadratic_residue(&rhs)
            }
        }
    }

    fn recover_y(&self, _x: &MpInt<L>, _y_odd: bool) -> Result<MpInt<L>> {
        Err(self.unsupported("y-coordinate recovery on x-only Montgomery curves"))
    }
}
