//! Hash functions

pub mod keccak256;

pub use keccak256::{keccak256, Keccak256};
