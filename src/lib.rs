//! Experimental ChaCha and Poly1305 parameterizations
//!
//! This crate implements two families of symmetric primitives, each a
//! deliberately re-parameterized version of a well-known construction:
//!
//! - `encryption`
//!   ChaCha24, a counter-mode stream cipher built on a 24-round ChaCha
//!   permutation with altered rotations and a 128-bit nonce.
//!
//! - `authentication`
//!   Polynomial MACs modulo `2^k - 5`: the wide Poly1795 (24-byte tags), a
//!   modified Poly1305, standard RFC 8439 Poly1305 and a dual Poly1305
//!   with 32-byte tags.
//!
//! - `primitives` (internal)
//!   The radix-2^b limb engine shared by every MAC and little-endian word
//!   conversions.
//!
//! None of the experimental variants interoperate with the standard
//! algorithms they derive from, and none have been analyzed. They exist
//! to study and benchmark the effect of the parameter changes.
//!
//! # Design goals
//!
//! - Bit-exact, documented behavior for each parameterization
//! - One arithmetic core shared by all limb widths
//! - Explicit `Result` errors instead of panics on misuse
//! - No heap allocations in core primitives
//! - Secret state wiped on drop
//!
//! # Example
//!
//! ```
//! use chacha24_poly1795::authentication::mac_179;
//! use chacha24_poly1795::encryption::chacha24::apply_keystream;
//!
//! let key = [7u8; 32];
//! let nonce = [9u8; 16];
//!
//! let ciphertext = apply_keystream(&key, &nonce, 0, b"hello world").unwrap();
//! let tag = mac_179(&[3u8; 32], &ciphertext);
//!
//! let plaintext = apply_keystream(&key, &nonce, 0, &ciphertext).unwrap();
//! assert_eq!(plaintext, b"hello world");
//! assert_eq!(tag.len(), 24);
//! ```

mod error;
mod primitives;

pub mod authentication;
pub mod encryption;

pub use error::Error;
