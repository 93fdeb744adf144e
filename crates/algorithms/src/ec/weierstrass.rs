//! Short Weierstrass group law: y² = x³ + ax + b
//!
//! Internal arithmetic uses Jacobian projective coordinates over
//! Montgomery-form field elements, so a full scalar multiplication costs
//! one inversion at the end. The addition and doubling formulas are total:
//! degenerate cases (identity operands, P + P, P + (-P)) are folded in with
//! constant-time selects rather than branches, which makes
//! [`GroupLaw::scalar_mul`] a fixed double-and-add-always sequence.

use super::{CurvePoint, GroupLaw};
use crate::bignum::{Limb, MpInt};
use crate::error::{Error, Result};
use crate::field::MontgomeryDomain;
use subtle::Choice;

/// Jacobian point (X : Y : Z), coordinates in Montgomery form.
/// Z = 0 encodes the identity.
struct Jacobian<L: Limb> {
    x: MpInt<L>,
    y: MpInt<L>,
    z: MpInt<L>,
}

impl<L: Limb> Jacobian<L> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Jacobian {
            x: MpInt::conditional_select(&a.x, &b.x, choice),
            y: MpInt::conditional_select(&a.y, &b.y, choice),
            z: MpInt::conditional_select(&a.z, &b.z, choice),
        }
    }
}

pub(crate) struct WeierstrassLaw<L: Limb> {
    field: MontgomeryDomain<L>,
    /// Coefficient a, Montgomery form
    a: MpInt<L>,
    /// Coefficient b, plain form (only the curve equation uses it)
    b: MpInt<L>,
}

impl<L: Limb> WeierstrassLaw<L> {
    pub(crate) fn new(field: MontgomeryDomain<L>, a: &MpInt<L>, b: &MpInt<L>) -> Self {
        let a_mont = field.to_mont(a);
        WeierstrassLaw {
            field,
            a: a_mont,
            b: b.clone(),
        }
    }

    fn identity(&self) -> Jacobian<L> {
        Jacobian {
            x: self.field.mont_one(),
            y: self.field.mont_one(),
            z: self.field.zero(),
        }
    }

    fn to_jacobian(&self, p: &CurvePoint<L>) -> Result<Jacobian<L>> {
        match p {
            CurvePoint::Infinity => Ok(self.identity()),
            CurvePoint::Affine { x, y } => Ok(Jacobian {
                x: self.field.to_mont(x),
                y: self.field.to_mont(y),
                z: self.field.mont_one(),
            }),
            CurvePoint::XOnly { .. } => Err(Error::InvalidParameter {
                context: "WeierstrassLaw",
                #[cfg(feature = "std")]
                message: "x-only points have no Weierstrass group law".into(),
            }),
        }
    }

    fn to_affine(&self, p: &Jacobian<L>) -> Result<CurvePoint<L>> {
        if bool::from(p.z.is_zero()) {
            return Ok(CurvePoint::Infinity);
        }
        let x = self.field.from_mont(&p.x);
        let y = self.field.from_mont(&p.y);
        let z = self.field.from_mont(&p.z);
        let zi = self.field.invert(&z)?;
        let zi2 = self.field.square(&zi);
        let zi3 = self.field.mul(&zi2, &zi);
        Ok(CurvePoint::Affine {
            x: self.field.mul(&x, &zi2),
            y: self.field.mul(&y, &zi3),
        })
    }

    /// Jacobian doubling. The formula is total: Z = 0 and Y = 0 inputs both
    /// produce Z3 = 0, so no branching is needed.
    fn jac_double(&self, p: &Jacobian<L>) -> Jacobian<L> {
        let f = &self.field;
        let xx = f.mont_square(&p.x);
        let yy = f.mont_square(&p.y);
        let yyyy = f.mont_square(&yy);
        let zz = f.mont_square(&p.z);

        // S = 2 * ((X + YY)^2 - XX - YYYY)
        let t = f.mont_square(&f.add(&p.x, &yy));
        let s = f.sub(&f.sub(&t, &xx), &yyyy);
        let s = f.add(&s, &s);

        // M = 3*XX + a*ZZ^2
        let m = f.add(&f.add(&xx, &xx), &xx);
        let m = f.add(&m, &f.mont_mul(&self.a, &f.mont_square(&zz)));

        // X3 = M^2 - 2*S
        let x3 = f.sub(&f.sub(&f.mont_square(&m), &s), &s);

        // Y3 = M*(S - X3) - 8*YYYY
        let y8 = f.add(&yyyy, &yyyy);
        let y8 = f.add(&y8, &y8);
        let y8 = f.add(&y8, &y8);
        let y3 = f.sub(&f.mont_mul(&m, &f.sub(&s, &x3)), &y8);

        // Z3 = (Y + Z)^2 - YY - ZZ = 2*Y*Z
        let z3 = f.sub(&f.sub(&f.mont_square(&f.add(&p.y, &p.z)), &yy), &zz);

        Jacobian { x: x3, y: y3, z: z3 }
    }

    /// Jacobian addition with constant-time degenerate handling.
    ///
    /// The generic formula is computed unconditionally; identity operands,
    /// the doubling case and inverse operands are then folded in with
    /// selects on public-structure-free flags.
    fn jac_add(&self, p: &Jacobian<L>, q: &Jacobian<L>) -> Jacobian<L> {
        let f = &self.field;
        let z1z1 = f.mont_square(&p.z);
        let z2z2 = f.mont_square(&q.z);
        let u1 = f.mont_mul(&p.x, &z2z2);
        let u2 = f.mont_mul(&q.x, &z1z1);
        let s1 = f.mont_mul(&f.mont_mul(&p.y, &z2z2), &q.z);
        let s2 = f.mont_mul(&f.mont_mul(&q.y, &z1z1), &p.z);

        let h = f.sub(&u2, &u1);
        let r = f.sub(&s2, &s1);

        let h2 = f.mont_square(&h);
        let h3 = f.mont_mul(&h2, &h);
        let v = f.mont_mul(&u1, &h2);

        let x3 = f.sub(&f.sub(&f.mont_square(&r), &h3), &f.add(&v, &v));
        let y3 = f.sub(&f.mont_mul(&r, &f.sub(&v, &x3)), &f.mont_mul(&s1, &h3));
        let z3 = f.mont_mul(&f.mont_mul(&p.z, &q.z), &h);
        let generic = Jacobian { x: x3, y: y3, z: z3 };

        let p_inf = p.z.is_zero();
        let q_inf = q.z.is_zero();
        let h_zero = h.is_zero();
        let r_zero = r.is_zero();
        let both_finite = !p_inf & !q_inf;

        // Same x: either P + P (same y, double) or P + (-P) (identity)
        let doubled = self.jac_double(p);
        let mut out = Jacobian::conditional_select(&generic, &doubled, both_finite & h_zero & r_zero);
        out = Jacobian::conditional_select(&out, &self.identity(), both_finite & h_zero & !r_zero);
        out = Jacobian::conditional_select(&out, q, p_inf);
        out = Jacobian::conditional_select(&out, p, q_inf);
        out
    }
}

impl<L: Limb> GroupLaw<L> for WeierstrassLaw<L> {
    fn double(&self, p: &CurvePoint<L>) -> Result<CurvePoint<L>> {
        let jp = self.to_jacobian(p)?;
        self.to_affine(&self.jac_double(&jp))
    }

    fn add(&self, p: &CurvePoint<L>, q: &CurvePoint<L>) -> Result<CurvePoint<L>> {
        let jp = self.to_jacobian(p)?;
        let jq = self.to_jacobian(q)?;
        self.to_affine(&self.jac_add(&jp, &jq))
    }

    fn scalar_mul(&self, p: &CurvePoint<L>, k: &MpInt<L>, bits: usize) -> Result<CurvePoint<L>> {
        let base = self.to_jacobian(p)?;
        let mut acc = self.identity();
        for i in (0..bits).rev() {
            acc = self.jac_double(&acc);
            let sum = self.jac_add(&acc, &base);
            acc = Jacobian::conditional_select(&acc, &sum, k.bit(i));
        }
        self.to_affine(&acc)
    }

    fn scalar_mul_vartime(&self, p: &CurvePoint<L>, k: &MpInt<L>) -> Result<CurvePoint<L>> {
        let base = self.to_jacobian(p)?;
        let mut acc = self.identity();
        for i in (0..k.bit_len()).rev() {
            acc = self.jac_double(&acc);
            if bool::from(k.bit(i)) {
                acc = self.jac_add(&acc, &base);
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
        let jp = self.to_jacobian(p)?;
        let jq = self.to_jacobian(q)?;
        let jpq = self.jac_add(&jp, &jq);
        let mut acc = self.identity();
        for i in (0..a.bit_len().max(b.bit_len())).rev() {
            acc = self.jac_double(&acc);
            match (bool::from(a.bit(i)), bool::from(b.bit(i))) {
                (true, true) => acc = self.jac_add(&acc, &jpq),
                (true, false) => acc = self.jac_add(&acc, &jp),
                (false, true) => acc = self.jac_add(&acc, &jq),
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
                let lhs = f.square(y);
                let x3 = f.mul(&f.square(x), x);
                let ax = f.mul(&f.from_mont(&self.a), x);
                let rhs = f.add(&f.add(&x3, &ax), &self.b);
                bool::from(f.ct_eq(&lhs, &rhs))
            }
        }
    }

    fn recover_y(&self, x: &MpInt<L>, y_odd: bool) -> Result<MpInt<L>> {
        let f = &self.field;
        let x3 = f.mul(&f.square(x), x);
        let ax = f.mul(&f.from_mont(&self.a), x);
        let rhs = f.add(&f.add(&x3, &ax), &self.b);
        let root = f.sqrt(&rhs)?.ok_or(Error::InvalidEncoding {
            context: "WeierstrassLaw::recover_y",
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
