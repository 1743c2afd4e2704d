//! ChaCha24: a 24-round ChaCha variant with a 128-bit nonce.
//!
//! The module is split into two layers:
//!
//! - `core`: the quarter round, the permutation and the 64-byte block
//!   function
//! - `stream`: counter-mode encryption built on the block function
//!
//! This is an experimental parameterization. It is deliberately not
//! compatible with RFC 8439 ChaCha20 and provides no authentication; pair
//! it with one of the MACs in [`crate::authentication`] when integrity is
//! needed.

/// Block function and permutation.
pub(crate) mod core;

/// Counter-mode stream cipher.
pub(crate) mod stream;

pub use self::core::{BLOCK_SIZE, KEY_SIZE, NONCE_SIZE, generate_block};
pub use self::stream::{ChaCha24, apply_keystream, xor_keystream};
