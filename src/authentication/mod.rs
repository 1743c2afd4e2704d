//! Polynomial message authentication codes.
//!
//! All MACs here evaluate a polynomial in a secret `r` over the message
//! blocks, modulo a prime-shaped modulus `2^k - 5`, and add a secret pad.
//! They share a single buffered accumulator and limb engine and differ in
//! limb layout, key schedule and serialization:
//!
//! | MAC                  | limbs        | block | tag | standard     |
//! |----------------------|--------------|-------|-----|--------------|
//! | [`Poly1305`]         | 5 × 26       | 16    | 16  | RFC 8439     |
//! | [`Poly1305Modified`] | 5 × 26       | 16    | 16  | experimental |
//! | [`Poly1795`]         | 6 × 29       | 24    | 24  | experimental |
//! | [`DoubleMac`]        | 2 × (5 × 26) | 16    | 32  | experimental |
//!
//! Every key is one-time: authenticating two messages under the same key
//! allows forgeries.

mod accumulator;

/// Dual standard Poly1305 with a concatenated 32-byte tag.
pub mod double;

/// Standard and modified 130-bit Poly1305.
pub mod poly1305;

/// The wide 24-byte-tag MAC.
pub mod poly1795;

pub use double::{DoubleMac, double_mac};
pub use poly1305::{Poly1305, Poly1305Modified, mac_130_modified, poly1305};
pub use poly1795::{Poly1795, mac_179};
