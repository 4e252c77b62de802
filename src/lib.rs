//! ecsign: a self-contained ECDSA and Keccak-256 computation kernel.
//!
//! Signing, verification and two-candidate public-key recovery over
//! secp256k1, built on constant-time 256-bit limb arithmetic so that secret
//! scalars leave no timing or memory-access trace. Message digests and
//! RFC 6979 deterministic nonces come from the bundled Keccak-256 sponge and
//! HMAC-SHA-256. A 16-bit miniature curve with the same protocol shape
//! backs wide-range protocol tests.

pub mod hash;
pub mod mini;
pub mod secp256k1;

pub use crate::hash::{keccak256, Keccak256};
pub use crate::secp256k1::{
    recover, sign, sign_deterministic, verify, CurvePoint, FieldElement, Scalar, Signature,
    Uint256,
};
