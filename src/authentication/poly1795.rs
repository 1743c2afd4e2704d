//! Poly1795: an experimental wide polynomial MAC.
//!
//! Poly1795 keeps Poly1305's evaluate-then-pad structure but widens every
//! dimension:
//!
//! - six 29-bit limbs instead of five 26-bit ones
//! - 24-byte message blocks, each loaded as six raw little-endian words
//! - a 24-byte tag
//!
//! # Key layout
//!
//! - `r[i] = (le32(key[3i..3i + 4]) >> 3i) & 0x1fffffff` for `i` in `0..6`
//!   (so `r` draws on `key[0..19]`)
//! - `pad = le32(key[20..24]), le32(key[24..28]), le32(key[28..32]), le32(key[16..20])`
//!
//! The pad is added only to the first 16 bytes of the serialized
//! accumulator. The last 8 tag bytes are the raw top limbs.
//!
//! Not standardized and not analyzed. Like Poly1305, a key must
//! authenticate a single message only.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use super::accumulator::{Accumulator, RawWords, add_pad_words};
use crate::error::Error;
use crate::primitives::conv::{le32_at, store_le_words};
use crate::primitives::limbs::Limbs;

/// Key length in bytes.
pub const KEY_SIZE: usize = 32;

/// Message block length in bytes.
pub const BLOCK_SIZE: usize = 24;

/// Tag length in bytes.
pub const TAG_SIZE: usize = 24;

const LIMB_MASK: u32 = 0x1fff_ffff;

/// Streaming Poly1795 state.
///
/// Call [`Poly1795::update`] any number of times, then exactly one of
/// [`Poly1795::finalize`] or [`Poly1795::verify`]. Every call after that
/// returns [`Error::UseAfterFinalize`].
pub struct Poly1795 {
    inner: Accumulator<RawWords, 6, 29, BLOCK_SIZE>,
}

impl Poly1795 {
    /// Creates a new instance from a one-time 32-byte key.
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        let mut r = [0u32; 6];
        for (i, r_i) in r.iter_mut().enumerate() {
            *r_i = (le32_at(key, 3 * i) >> (3 * i)) & LIMB_MASK;
        }

        let pad = [
            le32_at(key, 20),
            le32_at(key, 24),
            le32_at(key, 28),
            le32_at(key, 16),
        ];

        Self {
            inner: Accumulator::new(Limbs(r), pad),
        }
    }

    /// Absorbs message bytes.
    ///
    /// # Errors
    /// [`Error::UseAfterFinalize`] if the tag was already produced.
    pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        self.inner.update(data)
    }

    /// Produces the 24-byte tag.
    ///
    /// # Errors
    /// [`Error::UseAfterFinalize`] if the tag was already produced.
    pub fn finalize(&mut self) -> Result<[u8; TAG_SIZE], Error> {
        self.inner.ensure_active()?;
        Ok(self.tag())
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

    fn tag(&mut self) -> [u8; TAG_SIZE] {
        let mut h = self.inner.seal();

        let mut tag = [0u8; TAG_SIZE];
        store_le_words(&h.0, &mut tag);
        add_pad_words(&mut tag, self.inner.pad());

        h.zeroize();

        tag
    }
}

impl fmt::Debug for Poly1795 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Poly1795 {{ [protected] }}")
    }
}

/// Computes the Poly1795 tag of `message` under `key`.
pub fn mac_179(key: &[u8; KEY_SIZE], message: &[u8]) -> [u8; TAG_SIZE] {
    let mut mac = Poly1795::new(key);
    mac.inner.absorb(message);
    mac.tag()
}
