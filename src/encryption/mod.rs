//! Symmetric encryption.
//!
//! Currently provides the ChaCha24 stream cipher. Encryption here is
//! unauthenticated; see [`crate::authentication`] for the MACs.

pub mod chacha24;
