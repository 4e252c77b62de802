//! Miniature 16-bit curve (p = 65167, n = 64879)
//!
//! A scaled-down model of the production curve with identical protocol
//! structure, used to sweep sign/verify/recover behaviour across input
//! ranges that would be unreachable at 256 bits.

pub mod ecdsa;
pub mod field;
pub mod point;

pub use ecdsa::{recover, sign, verify, Signature};
pub use field::FieldElement;
pub use point::{public_key, Point, G};
