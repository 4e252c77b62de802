//! ECDSA over secp256k1: signing, verification, public-key recovery.
//!
//! Signing and the scalar arithmetic underneath it are constant time in the
//! private key and nonce; the only early exits are the public-range
//! precondition checks and the astronomically unlikely r = 0 / s = 0
//! failures, which the caller handles by retrying with a fresh nonce.
//! Verification and recovery take only public inputs and may branch freely.

use super::bigint::Uint256;
use super::field::FieldElement;
use super::point::{self, CurvePoint};
use super::rfc6979;
use super::scalar::{Scalar, ORDER};

/// An ECDSA signature (r, s) with both components in (0, n).
///
/// Signatures produced by [`sign`] are additionally low-s normalized
/// (s <= n/2, BIP 62) to rule out the trivial malleability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    pub r: Scalar,
    pub s: Scalar,
}

impl Signature {
    /// Fixed-width big-endian r || s.
    pub fn to_be_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.r.to_be_bytes());
        out[32..].copy_from_slice(&self.s.to_be_bytes());
        out
    }

    /// Parse fixed-width big-endian r || s; both components must lie in
    /// (0, n). Non-secret path.
    pub fn from_be_bytes(bytes: &[u8; 64]) -> Option<Self> {
        let r = Scalar::from_be_bytes(bytes[..32].try_into().unwrap())?;
        let s = Scalar::from_be_bytes(bytes[32..].try_into().unwrap())?;
        if r.is_zero() || s.is_zero() {
            return None;
        }
        Some(Self { r, s })
    }

    pub fn is_low_s(&self) -> bool {
        !self.s.is_high()
    }
}

/// Derive the public key for a private exponent; constant time.
pub fn public_key(private_key: &Scalar) -> CurvePoint {
    point::public_key(private_key)
}

/// ECDSA signature generation with an explicit nonce.
///
/// Returns None if the private key or nonce is zero (outside [1, n)) or on
/// the unlucky r = 0 / s = 0 outcomes; the caller retries with a new nonce.
/// On every successful path the operation sequence is fixed, independent of
/// the private key and nonce values.
pub fn sign(private_key: &Scalar, msg_hash: &Uint256, nonce: &Scalar) -> Option<Signature> {
    if private_key.is_zero() || nonce.is_zero() {
        return None;
    }

    // r = (nonce * G).x mod n
    let p = point::public_key(nonce);
    let mut r_raw = p.x.v;
    let ge_n = r_raw.less_than(&ORDER) ^ 1;
    r_raw.subtract(&ORDER, ge_n);
    let r = Scalar { v: r_raw };
    if r.is_zero() {
        return None;
    }

    // s = nonce^-1 * (z + r * privateKey) mod n
    let z = Scalar::reduce(msg_hash);
    let mut s = r.mul_mod(private_key);
    s = s.add_mod(&z);
    s = s.mul_mod(&nonce.inverse());
    if s.is_zero() {
        return None;
    }

    // Low-s normalization (BIP 62): take min(s, n - s).
    let neg_s = s.neg_mod();
    let take_neg = neg_s.v.less_than(&s.v);
    s.v.replace(&neg_s.v, take_neg);

    Some(Signature { r, s })
}

/// Deterministic ECDSA per RFC 6979, deriving the nonce from the private
/// key and message hash with HMAC-SHA-256.
pub fn sign_deterministic(private_key: &Scalar, msg_hash: &Uint256) -> Option<Signature> {
    let nonce = rfc6979::nonce(private_key, msg_hash);
    sign(private_key, msg_hash, &nonce)
}

/// ECDSA verification. Public inputs only; not constant time.
///
/// The public key must be normalized, on the curve, and in the prime-order
/// group; anything else is rejected rather than repaired.
pub fn verify(public_key: &CurvePoint, msg_hash: &Uint256, sig: &Signature) -> bool {
    if sig.r.is_zero() || sig.s.is_zero() {
        return false;
    }
    if public_key.is_zero()
        || public_key.z != FieldElement::ONE
        || !public_key.is_on_curve()
        || !point::mul_by_order(public_key).is_zero()
    {
        return false;
    }

    let w = sig.s.inverse();
    let z = Scalar::reduce(msg_hash);
    let u1 = z.mul_mod(&w);
    let u2 = sig.r.mul_mod(&w);

    let mut p = point::G;
    p.multiply(&u1.v);
    let mut q = *public_key;
    q.multiply(&u2.v);
    p.add(&q);
    p.normalize();

    let mut px = p.x.v;
    let ge_n = px.less_than(&ORDER) ^ 1;
    px.subtract(&ORDER, ge_n);
    px == sig.r.v
}

/// Public-key recovery: the two candidate keys that could have produced
/// (r, s) over msg_hash. Exactly one equals the signer's key, except in the
/// negligible case where the nonce point's x coordinate exceeded n.
///
/// Returns None when a component is out of range or r is not a valid curve
/// x coordinate. Public inputs only; not constant time.
pub fn recover(msg_hash: &Uint256, sig: &Signature) -> Option<(CurvePoint, CurvePoint)> {
    if sig.r.is_zero() || sig.s.is_zero() {
        return None;
    }

    // r < n < p, so it injects into the field unchanged.
    let rf = FieldElement::from_uint(sig.r.v)?;
    let r1 = CurvePoint::from_x(rf)?;
    let mut r2 = r1;
    r2.negate();

    let r_inv = sig.r.inverse();
    let z = Scalar::reduce(msg_hash);
    let u1 = z.neg_mod().mul_mod(&r_inv);
    let u2 = sig.s.mul_mod(&r_inv);

    let mut u1g = point::G;
    u1g.multiply(&u1.v);

    let mut pk_a = u1g;
    let mut t = r1;
    t.multiply(&u2.v);
    pk_a.add(&t);
    pk_a.normalize();

    let mut pk_b = u1g;
    let mut t = r2;
    t.multiply(&u2.v);
    pk_b.add(&t);
    pk_b.normalize();

    Some((pk_a, pk_b))
}
