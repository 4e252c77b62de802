//! secp256k1 elliptic curve cryptography, constant-time paths throughout

pub mod bigint;
pub mod ecdsa;
pub mod field;
pub mod point;
pub mod rfc6979;
pub mod scalar;

pub use bigint::Uint256;
pub use ecdsa::{recover, sign, sign_deterministic, verify, Signature};
pub use field::FieldElement;
pub use point::{public_key, CurvePoint, G};
pub use scalar::Scalar;
