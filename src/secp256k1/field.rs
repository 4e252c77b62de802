//! secp256k1 field element arithmetic (mod p)
//! p = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F

#![allow(clippy::needless_range_loop)] // Indexed loops clearer for low-level math

use std::ops::{Add, Mul, Neg, Sub};

use super::bigint::Uint256;

/// Prime field element for secp256k1
/// p = 2^256 - 2^32 - 977
///
/// Invariant: the stored value is fully reduced, 0 <= v < p. Reductions are
/// masked conditional subtractions, never data-dependent branches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldElement {
    pub v: Uint256,
}

// Field prime p = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F
pub const P: Uint256 = Uint256::new([
    0xFFFFFFFEFFFFFC2F, // low limb
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
]);

// 2^256 = p + K, so folding the high half of a product multiplies it by K
const K: u64 = 0x1000003D1;

// (p + 1) / 4, the exponent that computes square roots since p = 3 mod 4
const SQRT_EXP: Uint256 = Uint256::new([
    0xFFFFFFFFBFFFFF0C,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0x3FFFFFFFFFFFFFFF,
]);

impl FieldElement {
    pub const ZERO: Self = Self { v: Uint256::ZERO };
    pub const ONE: Self = Self { v: Uint256::ONE };

    #[inline]
    pub const fn from_u64(val: u64) -> Self {
        Self {
            v: Uint256::from_u64(val),
        }
    }

    /// Wrap an integer already known to be below p.
    #[inline]
    pub fn from_uint(v: Uint256) -> Option<Self> {
        if v.less_than(&P) == 1 {
            Some(Self { v })
        } else {
            None
        }
    }

    #[inline]
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Option<Self> {
        Self::from_uint(Uint256::from_be_bytes(bytes))
    }

    #[inline]
    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.v.to_be_bytes()
    }

    #[inline]
    pub fn ct_eq(&self, other: &Self) -> u64 {
        self.v.ct_eq(&other.v)
    }

    #[inline]
    pub fn ct_is_zero(&self) -> u64 {
        self.v.ct_is_zero()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.ct_is_zero() == 1
    }

    #[inline]
    pub fn is_odd(&self) -> bool {
        self.v.is_odd()
    }

    #[inline]
    pub fn replace(&mut self, other: &Self, enable: u64) {
        self.v.replace(&other.v, enable);
    }

    /// Modular addition
    pub fn add(&self, other: &Self) -> Self {
        let mut r = self.v;
        let carry = r.add(&other.v, 1);
        // Subtract p when the raw sum overflowed 2^256 or landed in [p, 2p).
        let ge_p = r.less_than(&P) ^ 1;
        r.subtract(&P, carry | ge_p);
        Self { v: r }
    }

    /// Modular subtraction
    pub fn sub(&self, other: &Self) -> Self {
        let mut r = self.v;
        let borrow = r.subtract(&other.v, 1);
        r.add(&P, borrow);
        Self { v: r }
    }

    /// Modular negation
    pub fn neg(&self) -> Self {
        let mut r = P;
        r.subtract(&self.v, 1);
        // p - 0 = p, which must canonicalize back to 0.
        r.subtract(&P, self.ct_is_zero());
        Self { v: r }
    }

    /// Modular multiplication. The 512-bit product is folded twice through
    /// 2^256 = K (mod p), leaving at most one conditional subtraction.
    pub fn mul(&self, other: &Self) -> Self {
        let t = mul_wide(&self.v.d, &other.v.d);

        // r = t_lo + t_hi * K; fits in five limbs (t_hi * K < 2^290).
        let mut r = [0u64; 5];
        r[..4].copy_from_slice(&t[..4]);
        let mut carry = 0u128;
        for i in 0..4 {
            let prod = (t[i + 4] as u128) * (K as u128) + (r[i] as u128) + carry;
            r[i] = prod as u64;
            carry = prod >> 64;
        }
        r[4] = carry as u64;

        // Second fold: absorb r[4] the same way.
        let mut s = [0u64; 4];
        let mut carry = (r[4] as u128) * (K as u128);
        for i in 0..4 {
            carry += r[i] as u128;
            s[i] = carry as u64;
            carry >>= 64;
        }

        // A carry out of the second fold means the value wrapped past 2^256
        // once more, worth another K. The residue is then tiny, so this add
        // cannot itself carry.
        let mut v = Uint256::new(s);
        v.add(&Uint256::from_u64(K), carry as u64);

        let ge_p = v.less_than(&P) ^ 1;
        v.subtract(&P, ge_p);
        Self { v }
    }

    /// Modular square
    #[inline]
    pub fn sqr(&self) -> Self {
        self.mul(self)
    }

    /// Modular reciprocal via the extended binary GCD. Zero maps to zero.
    pub fn recip(&self) -> Self {
        let mut r = self.v;
        r.reciprocal(&P);
        Self { v: r }
    }

    /// Raise to a 256-bit exponent, right-to-left square-and-multiply.
    /// Constant time in the base; the exponent is assumed public.
    pub fn pow(&self, exp: &Uint256) -> Self {
        let mut result = Self::ONE;
        let mut base = *self;
        for i in 0..256 {
            let bit = (exp.d[i / 64] >> (i % 64)) & 1;
            let multiplied = result.mul(base);
            result.replace(&multiplied, bit);
            base = base.sqr();
        }
        result
    }

    /// Square root via x^((p+1)/4); valid because p = 3 mod 4. Returns None
    /// when the input is not a quadratic residue.
    pub fn sqrt(&self) -> Option<Self> {
        let root = self.pow(&SQRT_EXP);
        if root.sqr() == *self {
            Some(root)
        } else {
            None
        }
    }
}

/// Schoolbook 4x4 limb multiplication into a 512-bit result.
fn mul_wide(a: &[u64; 4], b: &[u64; 4]) -> [u64; 8] {
    let mut t = [0u64; 8];
    for i in 0..4 {
        let mut carry = 0u128;
        for j in 0..4 {
            let prod = (a[i] as u128) * (b[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = prod as u64;
            carry = prod >> 64;
        }
        t[i + 4] = carry as u64;
    }
    t
}

impl Add for FieldElement {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        FieldElement::add(&self, &other)
    }
}

impl Sub for FieldElement {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        FieldElement::sub(&self, &other)
    }
}

impl Mul for FieldElement {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        FieldElement::mul(&self, &other)
    }
}

impl Neg for FieldElement {
    type Output = Self;
    fn neg(self) -> Self {
        FieldElement::neg(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fe(hex: &str) -> FieldElement {
        FieldElement::from_uint(Uint256::from_hex(hex).unwrap()).unwrap()
    }

    #[test]
    fn test_field_add() {
        let a = FieldElement::from_u64(1);
        let b = FieldElement::from_u64(2);
        assert_eq!(a.add(b), FieldElement::from_u64(3));
    }

    #[test]
    fn test_field_add_wraps() {
        // (p - 1) + 2 = 1
        let p_minus_1 = FieldElement::ZERO.sub(FieldElement::ONE);
        let two = FieldElement::from_u64(2);
        assert_eq!(p_minus_1.add(two), FieldElement::ONE);
    }

    #[test]
    fn test_field_sub_wraps() {
        // 1 - 2 = p - 1
        let one = FieldElement::ONE;
        let two = FieldElement::from_u64(2);
        let p_minus_1 = FieldElement::ZERO.sub(FieldElement::ONE);
        assert_eq!(one.sub(two), p_minus_1);
    }

    #[test]
    fn test_field_neg() {
        let a = fe("0000000000000000000000000000000000000000000000000000000000ABCDEF");
        assert_eq!(a.add(a.neg()), FieldElement::ZERO);
        assert_eq!(FieldElement::ZERO.neg(), FieldElement::ZERO);
    }

    #[test]
    fn test_field_mul_small() {
        let a = FieldElement::from_u64(2);
        let b = FieldElement::from_u64(3);
        assert_eq!(a.mul(b), FieldElement::from_u64(6));
    }

    #[test]
    fn test_field_mul_reduces() {
        // (p - 1)^2 = 1 since p - 1 = -1 mod p
        let p_minus_1 = FieldElement::ZERO.sub(FieldElement::ONE);
        assert_eq!(p_minus_1.sqr(), FieldElement::ONE);
    }

    #[test]
    fn test_field_recip() {
        let a = FieldElement::from_u64(7);
        assert_eq!(a.mul(a.recip()), FieldElement::ONE);

        let b = fe("7AE96A2B657C07106E64479EAC3434E99CF0497512F58995C1396C28719501EE");
        assert_eq!(b.mul(b.recip()), FieldElement::ONE);
        assert_eq!(FieldElement::ZERO.recip(), FieldElement::ZERO);
    }

    #[test]
    fn test_field_sqrt() {
        let a = fe("00000000000000000000000000000000000000000000000000000000DEADBEEF");
        let square = a.sqr();
        let root = square.sqrt().unwrap();
        assert!(root == a || root == a.neg());
    }

    #[test]
    fn test_field_sqrt_non_residue() {
        // -1 is a non-residue because p = 3 mod 4, so exactly one of x and
        // -x has a root for nonzero x.
        let a = FieldElement::from_u64(7);
        let has_root = a.sqrt().is_some();
        let neg_has_root = a.neg().sqrt().is_some();
        assert!(has_root != neg_has_root);
    }

    #[test]
    fn test_pow_matches_mul_chain() {
        let a = FieldElement::from_u64(3);
        let e = Uint256::from_u64(5);
        assert_eq!(a.pow(&e), FieldElement::from_u64(243));
    }

    #[test]
    fn test_from_uint_rejects_unreduced() {
        assert!(FieldElement::from_uint(P).is_none());
        let mut over = P;
        over.add(&Uint256::ONE, 1);
        assert!(FieldElement::from_uint(over).is_none());
    }
}
