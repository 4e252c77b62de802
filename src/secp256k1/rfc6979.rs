//! Deterministic nonce derivation (RFC 6979) with HMAC-SHA-256.
//!
//! Produces the per-signature secret k from the private key and message
//! hash, so signing needs no external randomness. For secp256k1 the hash
//! and curve widths coincide, which reduces the RFC's bits2int to the
//! identity; bits2octets is a single reduction mod n.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::bigint::Uint256;
use super::scalar::Scalar;

type HmacSha256 = Hmac<Sha256>;

fn hmac_sha256(key: &[u8; 32], parts: &[&[u8]]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    for part in parts {
        mac.update(part);
    }
    mac.finalize().into_bytes().into()
}

/// Derive the deterministic nonce for (private_key, msg_hash).
///
/// Always returns a scalar in [1, n): candidates outside the range are
/// rejected and the generator is cranked again, per RFC 6979 section 3.2.
pub fn nonce(private_key: &Scalar, msg_hash: &Uint256) -> Scalar {
    let x = private_key.to_be_bytes();
    let h1 = Scalar::reduce(msg_hash).to_be_bytes();

    let mut k = [0u8; 32];
    let mut v = [1u8; 32];

    k = hmac_sha256(&k, &[&v, &[0x00], &x, &h1]);
    v = hmac_sha256(&k, &[&v]);
    k = hmac_sha256(&k, &[&v, &[0x01], &x, &h1]);
    v = hmac_sha256(&k, &[&v]);

    loop {
        v = hmac_sha256(&k, &[&v]);
        let candidate = Uint256::from_be_bytes(&v);
        if let Some(scalar) = Scalar::from_uint(candidate) {
            if !scalar.is_zero() {
                return scalar;
            }
        }
        k = hmac_sha256(&k, &[&v, &[0x00]]);
        v = hmac_sha256(&k, &[&v]);
    }
}
