//! ECDSA over the miniature curve.
//!
//! Same protocol as the full-width implementation, but on 16-bit scalars so
//! tests can sweep meaningful fractions of the whole input space. Branching
//! arithmetic throughout; nothing here handles real secrets.

use super::field::{recip_mod, FieldElement};
use super::point::{self, Point, ORDER};

/// Signature over the mini curve: r and s in (0, n).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    pub r: u16,
    pub s: u16,
}

/// Multiplication mod the group order via 32-bit intermediates.
fn mul_mod_order(x: u16, y: u16) -> u16 {
    ((x as u32 * y as u32) % ORDER as u32) as u16
}

/// ECDSA signature generation with an explicit nonce.
pub fn sign(private_key: u16, msg_hash: u16, nonce: u16) -> Option<Signature> {
    if nonce == 0 || nonce >= ORDER {
        return None;
    }

    let p = point::public_key(nonce);
    let mut r = p.x.v;
    if r >= ORDER {
        r -= ORDER;
    }
    if r == 0 {
        return None;
    }

    // s = nonce^-1 * (z + r * privateKey) mod n
    let z = msg_hash % ORDER;
    let mut s = mul_mod_order(r, private_key);
    s = ((s as u32 + z as u32) % ORDER as u32) as u16;
    let k_inv = recip_mod(nonce, ORDER);
    s = mul_mod_order(s, k_inv);
    if s == 0 {
        return None;
    }

    // Low-s normalization
    let neg_s = ORDER - s;
    if neg_s < s {
        s = neg_s;
    }

    Some(Signature { r, s })
}

/// ECDSA verification.
pub fn verify(public_key: &Point, msg_hash: u16, sig: &Signature) -> bool {
    if sig.r == 0 || sig.r >= ORDER || sig.s == 0 || sig.s >= ORDER {
        return false;
    }
    if public_key.is_zero() || public_key.z != FieldElement::ONE || !public_key.is_on_curve() {
        return false;
    }
    let mut q = *public_key;
    q.multiply(ORDER);
    if !q.is_zero() {
        return false;
    }

    let w = recip_mod(sig.s, ORDER);
    let u1 = mul_mod_order(msg_hash % ORDER, w);
    let u2 = mul_mod_order(sig.r, w);

    let mut p = point::G;
    p.multiply(u1);
    let mut q = *public_key;
    q.multiply(u2);
    p.add(&q);
    p.normalize();

    let mut px = p.x.v;
    if px >= ORDER {
        px -= ORDER;
    }
    sig.r == px
}

/// Public-key recovery: the two candidates that could have signed msg_hash.
pub fn recover(msg_hash: u16, sig: &Signature) -> Option<(Point, Point)> {
    if sig.r == 0 || sig.r >= ORDER || sig.s == 0 || sig.s >= ORDER {
        return None;
    }

    let r1 = Point::from_x(FieldElement::new(sig.r))?;
    let mut r2 = r1;
    r2.negate();

    let r_inv = recip_mod(sig.r, ORDER);
    let neg_msg = (ORDER - msg_hash % ORDER) % ORDER;
    let u1 = mul_mod_order(neg_msg, r_inv);
    let u2 = mul_mod_order(sig.s, r_inv);

    let mut u1g = point::G;
    u1g.multiply(u1);

    let mut pk_a = u1g;
    let mut t = r1;
    t.multiply(u2);
    pk_a.add(&t);
    pk_a.normalize();

    let mut pk_b = u1g;
    let mut t = r2;
    t.multiply(u2);
    pk_b.add(&t);
    pk_b.normalize();

    Some((pk_a, pk_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify_known_inputs() {
        let sig = sign(12345, 42, 777).unwrap();
        let pk = point::public_key(12345);
        assert!(verify(&pk, 42, &sig));
        assert!(!verify(&pk, 43, &sig));
    }

    #[test]
    fn test_sign_rejects_bad_nonce() {
        assert!(sign(1, 1, 0).is_none());
        assert!(sign(1, 1, ORDER).is_none());
    }

    #[test]
    fn test_recover_known_inputs() {
        let sig = sign(12345, 42, 777).unwrap();
        let pk = point::public_key(12345);
        let (pk_a, pk_b) = recover(42, &sig).unwrap();
        assert!(pk_a == pk || pk_b == pk);
    }

    #[test]
    fn test_low_s() {
        let sig = sign(12345, 42, 777).unwrap();
        assert!(sig.s <= ORDER / 2);
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let sig = sign(100, 5, 9).unwrap();
        let wrong = point::public_key(101);
        assert!(!verify(&wrong, 5, &sig));
    }
}
