//! Dual Poly1305.
//!
//! Runs two independent standard Poly1305 instances over the same message
//! and concatenates their tags:
//!
//! ```text
//! tag = Poly1305(key[0..32], m) || Poly1305(key[32..64], m)
//! ```
//!
//! The halves share no state. The first 16 tag bytes depend only on the
//! first key half and the last 16 only on the second.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use super::poly1305::{self, Poly1305};
use crate::error::Error;

/// Key length in bytes, two Poly1305 keys back to back.
pub const KEY_SIZE: usize = 64;

/// Tag length in bytes.
pub const TAG_SIZE: usize = 32;

/// Copies the two Poly1305 keys out of a 64-byte key.
fn split_key(key: &[u8; KEY_SIZE]) -> ([u8; 32], [u8; 32]) {
    let mut first = [0u8; 32];
    let mut second = [0u8; 32];

    first.copy_from_slice(&key[..32]);
    second.copy_from_slice(&key[32..]);

    (first, second)
}

/// Streaming dual Poly1305 state.
pub struct DoubleMac {
    first: Poly1305,
    second: Poly1305,
}

impl DoubleMac {
    /// Creates a new instance from a 64-byte key.
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        let (mut first, mut second) = split_key(key);

        let mac = Self {
            first: Poly1305::new(&first),
            second: Poly1305::new(&second),
        };

        first.zeroize();
        second.zeroize();

        mac
    }

    /// Absorbs message bytes into both halves.
    ///
    /// # Errors
    /// [`Error::UseAfterFinalize`] if the tag was already produced.
    pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        self.first.update(data)?;
        self.second.update(data)
    }

    /// Produces the 32-byte tag.
    ///
    /// # Errors
    /// [`Error::UseAfterFinalize`] if the tag was already produced.
    pub fn finalize(&mut self) -> Result<[u8; TAG_SIZE], Error> {
        let first = self.first.finalize()?;
        let second = self.second.finalize()?;

        Ok(concat(&first, &second))
    }

    /// Produces the tag and compares it with `expected` in constant time.
    ///
    /// # Errors
    /// - [`Error::UseAfterFinalize`] if the tag was already produced
    /// - [`Error::AuthenticationFailed`] if the tags differ
    pub fn verify(&mut self, expected: &[u8; TAG_SIZE]) -> Result<(), Error> {
        let tag = self.finalize()?;

        if bool::from(tag[..].ct_eq(&expected[..])) {
            Ok(())
        } else {
            Err(Error::AuthenticationFailed)
        }
    }
}

impl fmt::Debug for DoubleMac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DoubleMac {{ [protected] }}")
    }
}

fn concat(first: &[u8; 16], second: &[u8; 16]) -> [u8; TAG_SIZE] {
    let mut out = [0u8; TAG_SIZE];
    out[..16].copy_from_slice(first);
    out[16..].copy_from_slice(second);
    out
}

/// Computes the 32-byte dual Poly1305 tag of `message` under `key`.
pub fn double_mac(key: &[u8; KEY_SIZE], message: &[u8]) -> [u8; TAG_SIZE] {
    let (mut first, mut second) = split_key(key);

    let tag = concat(
        &poly1305::poly1305(&first, message),
        &poly1305::poly1305(&second, message),
    );

    first.zeroize();
    second.zeroize();

    tag
}
