//! Twisted Edwards group law: ax² + y² = 1 + dx²y²
//!
//! Internal arithmetic uses extended coordinates (X : Y : Z : T) with
//! XY = ZT, over Montgomery-form field elements. The unified addition
//! formula is complete for the shipped parameter classes (a square,
//! d non-square), so it handles doubling and identity operands without any
//! branch; constant-time scalar multiplication needs no degenerate selects
//! beyond the bit-driven one.
//!
//! The affine identity is (0, 1); this law reports it as the abstract
//! identity point at its boundary.

use super::{CurvePoint, GroupLaw};
use crate::bignum::{Limb, MpInt};
use crate::error::{Error, Result};
use crate::field::MontgomeryDomain;
use subtle::Choice;

/// Extended point (X : Y : Z : T), coordinates in Montgomery form
struct Extended<L: Limb> {
    x: MpInt<L>,
    y: MpInt<L>,
    z: MpInt<L>,
    t: MpInt<L>,
}

impl<L: Limb> Extended<L> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Extended {
            x: MpInt::conditional_select(&a.x, &b.x, choice),
            y: MpInt::conditional_select(&a.y, &b.y, choice),
            z: MpInt::conditional_select(&a.z, &b.z, choice),
            t: MpInt::conditional_select(&a.t, &b.t, choice),
        }
    }
}

pub(crate) struct EdwardsLaw<L: Limb> {
    field: MontgomeryDomain<L>,
    /// Coefficient a, Montgomery form
    a: MpInt<L>,
    /// Coefficient d, Montgomery form
    d: MpInt<L>,
}

impl<L: Limb> EdwardsLaw<L> {
    pub(crate) fn new(field: MontgomeryDomain<L>, a: &MpInt<L>, d: &MpInt<L>) -> Self {
        let a_mont = field.to_mont(a);
        let d_mont = field.to_mont(d);
        EdwardsLaw {
            field,
            a: a_mont,
            d: d_mont,
        }
    }

    fn identity(&self) -> Extended<L> {
        Extended {
            x: self.field.zero(),
            y: self.field.mont_one(),
            z: self.field.mont_one(),
            t: self.field.zero(),
        }
    }

    fn to_extended(&self, p: &CurvePoint<L>) -> Result<Extended<L>> {
        match p {
            CurvePoint::Infinity => Ok(self.identity()),
            CurvePoint::Affine { x, y } => {
                let xm = self.field.to_mont(x);
                let ym = self.field.to_mont(y);
                let tm = self.field.mont_mul(&xm, &ym);
                Ok(Extended {
                    x: xm,
                    y: ym,
                    z: self.field.mont_one(),
                    t: tm,
                })
            }
            CurvePoint::XOnly { .. } => Err(Error::InvalidParameter {
                context: "EdwardsLaw",
                #[cfg(feature = "std")]
                message: "x-only points have no Edwards group law".into(),
            }),
        }
    }

    fn to_affine(&self, p: &Extended<L>) -> Result<CurvePoint<L>> {
        let x = self.field.from_mont(&p.x);
        let y = self.field.from_mont(&p.y);
        let z = self.field.from_mont(&p.z);
        let zi = self.field.invert(&z)?;
        let x = self.field.mul(&x, &zi);
        let y = self.field.mul(&y, &zi);
        if bool::from(x.is_zero()) && y == self.field.one() {
            return Ok(CurvePoint::Infinity);
        }
        Ok(CurvePoint::Affine { x, y })
    }

    /// Unified extended addition (complete for the shipped parameters)
    fn ext_add(&self, p: &Extended<L>, q: &Extended<L>) -> Extended<L> {
        let f = &self.field;
        let a = f.mont_mul(&p.x, &q.x);
        let b = f.mont_mul(&p.y, &q.y);
        let c = f.mont_mul(&self.d, &f.mont_mul(&p.t, &q.t));
        let d = f.mont_mul(&p.z, &q.z);
        let e = f.sub(
            &f.sub(&f.mont_mul(&f.add(&p.x, &p.y), &f.add(&q.x, &q.y)), &a),
            &b,
        );
        let ff = f.sub(&d, &c);
        let g = f.add(&d, &c);
        let h = f.sub(&b, &f.mont_mul(&self.a, &a));
        Extended {
            x: f.mont_mul(&e, &ff),
            y: f.mont_mul(&g, &h),
            z: f.mont_mul(&ff, &g),
            t: f.mont_mul(&e, &h),
        }
    }
}

impl<L: Limb> GroupLaw<L> for EdwardsLaw<L> {
    fn double(&self, p: &CurvePoint<L>) -> Result<CurvePoint<L>> {
        let ep = self.to_extended(p)?;
        self.to_affine(&self.ext_add(&ep, &ep))
    }

    fn add(&self, p: &CurvePoint<L>, q: &CurvePoint<L>) -> Result<CurvePoint<L>> {
        let ep = self.to_extended(p)?;
        let eq = self.to_extended(q)?;
        self.to_affine(&self.ext_add(&ep, &eq))
    }

    fn scalar_mul(&self, p: &CurvePoint<L>, k: &MpInt<L>, bits: usize) -> Result<CurvePoint<L>> {
        let base = self.to_extended(p)?;
        let mut acc = self.identity();
        for i in (0..bits).rev() {
            acc = self.ext_add(&acc, &acc);
            let sum = self.ext_add(&acc, &base);
            acc = Extended::conditional_select(&acc, &sum, k.bit(i));
        }
        self.to_affine(&acc)
    }

    fn scalar_mul_vartime(&self, p: &CurvePoint<L>, k: &MpInt<L>) -> Result<CurvePoint<L>> {
        let base = self.to_extended(p)?;
        let mut acc = self.identity();
        for i in (0..k.bit_len()).rev() {
            acc = self.ext_add(&acc, &acc);
            if bool::from(k.bit(i)) {
                acc = self.ext_add(&acc, &base);
            }
        }
        self.to_affine(&acc)
    }

    fn mul2_vartime(
        &self,
        p: &CurvePoint<L>,
        q: &CurvePoint<L>,
        a: &MpInt<L>,
        b: &MpInt<L>,
    ) -> Result<CurvePoint<L>> {
        let ep = self.to_extended(p)?;
        let eq = self.to_extended(q)?;
        let epq = self.ext_add(&ep, &eq);
        let mut acc = self.identity();
        for i in (0..a.bit_len().max(b.bit_len())).rev() {
            acc = self.ext_add(&acc, &acc);
            match (bool::from(a.bit(i)), bool::from(b.bit(i))) {
                (true, true) => acc = self.ext_add(&acc, &epq),
                (true, false) => acc = self.ext_add(&acc, &ep),
                (false, true) => acc = self.ext_add(&acc, &eq),
                (false, false) => {}
            }
        }
        self.to_affine(&acc)
    }

    fn is_on_curve(&self, p: &CurvePoint<L>) -> bool {
        match p {
            CurvePoint::Infinity => true,
            CurvePoint::XOnly { .. } => false,
            CurvePoint::Affine { x, y } => {
                let f = &self.field;
                let x2 = f.square(x);
                let y2 = f.square(y);
                let lhs = f.add(&f.mul(&f.from_mont(&self.a), &x2), &y2);
                let rhs = f.add(
                    &f.one(),
                    &f.mul(&f.from_mont(&self.d), &f.mul(&x2, &y2)),
                );
                bool::from(f.ct_eq(&lhs, &rhs))
            }
        }
    }

    /// Solve ax² + y² = 1 + dx²y² for y: y² = (1 - ax²) / (1 - dx²)
    fn recover_y(&self, x: &MpInt<L>, y_odd: bool) -> Result<MpInt<L>> {
        let f = &self.field;
        let x2 = f.square(x);
        let num = f.sub(&f.one(), &f.mul(&f.from_mont(&self.a), &x2));
        let den = f.sub(&f.one(), &f.mul(&f.from_mont(&self.d), &x2));
        let y2 = f.mul(&num, &f.invert(&den)?);
        let root = f.sqrt(&y2)?.ok_or(Error::InvalidEncoding {
            context: "EdwardsLaw::recover_y",
            #[cfg(feature = "std")]
            message: "x-coordinate has no point on the curve".into(),
        })?;
        if bool::from(root.is_odd()) == y_odd {
            Ok(root)
        } else {
            Ok(f.neg(&root))
        }
    }
}
