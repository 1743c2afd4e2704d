//! Poly1305 over the 130-bit modulus `2^130 - 5`.
//!
//! Two MACs share this file and the five 26-bit limb engine:
//!
//! - [`Poly1305`]: standard Poly1305 as specified in RFC 8439. It backs
//!   the dual MAC.
//! - [`Poly1305Modified`]: an experimental variant with its own key
//!   schedule, raw-word block loading, word-wise pad addition and a final
//!   `+1` on the first tag byte. Its tags never match RFC 8439.
//!
//! Both are one-time authenticators: a key must never be used for more
//! than one message.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use super::accumulator::{Accumulator, RawWords, Rfc8439, add_pad_carry, add_pad_words};
use crate::error::Error;
use crate::primitives::conv::{le32_at, store_le_words};
use crate::primitives::limbs::Limbs;

/// Key length in bytes.
pub const KEY_SIZE: usize = 32;

/// Message block length in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Tag length in bytes.
pub const TAG_SIZE: usize = 16;

/// Compares two tags in constant time.
fn check_tag(tag: &[u8; TAG_SIZE], expected: &[u8; TAG_SIZE]) -> Result<(), Error> {
    if bool::from(tag[..].ct_eq(&expected[..])) {
        Ok(())
    } else {
        Err(Error::AuthenticationFailed)
    }
}

/// Standard Poly1305 state (RFC 8439).
///
/// # Key layout
///
/// - `key[0..16]` → `r` (clamped, used for polynomial multiplication)
/// - `key[16..32]` → `s` (added at finalization modulo 2^128)
pub struct Poly1305 {
    inner: Accumulator<Rfc8439, 5, 26, BLOCK_SIZE>,
}

impl Poly1305 {
    /// Creates a new instance from a one-time 32-byte key, clamping `r`.
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        let r0 = le32_at(key, 0) & 0x0fffffff;
        let r1 = le32_at(key, 4) & 0x0ffffffc;
        let r2 = le32_at(key, 8) & 0x0ffffffc;
        let r3 = le32_at(key, 12) & 0x0ffffffc;

        let r = [
            r0 & 0x3ffffff,
            ((r0 >> 26) | (r1 << 6)) & 0x3ffffff,
            ((r1 >> 20) | (r2 << 12)) & 0x3ffffff,
            ((r2 >> 14) | (r3 << 18)) & 0x3ffffff,
            (r3 >> 8) & 0x3ffffff,
        ];

        let s = [
            le32_at(key, 16),
            le32_at(key, 20),
            le32_at(key, 24),
            le32_at(key, 28),
        ];

        Self {
            inner: Accumulator::new(Limbs(r), s),
        }
    }

    /// Absorbs message bytes.
    ///
    /// # Errors
    /// [`Error::UseAfterFinalize`] if the tag was already produced.
    pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        self.inner.update(data)
    }

    /// Produces the 16-byte tag.
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
        check_tag(&self.finalize()?, expected)
    }

    /// Serializes `h mod 2^128` and adds `s` with carry.
    fn tag(&mut self) -> [u8; TAG_SIZE] {
        let mut h = self.inner.seal();
        let [h0, h1, h2, h3, h4] = h.0;

        let words = [
            h0 | (h1 << 26),
            (h1 >> 6) | (h2 << 20),
            (h2 >> 12) | (h3 << 14),
            (h3 >> 18) | (h4 << 8),
        ];

        let mut tag = [0u8; TAG_SIZE];
        store_le_words(&words, &mut tag);
        add_pad_carry(&mut tag, self.inner.pad());

        h.zeroize();

        tag
    }
}

impl fmt::Debug for Poly1305 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Poly1305 {{ [protected] }}")
    }
}

/// Computes the standard Poly1305 tag of `message` under `key`.
pub fn poly1305(key: &[u8; KEY_SIZE], message: &[u8]) -> [u8; TAG_SIZE] {
    let mut mac = Poly1305::new(key);
    mac.inner.absorb(message);
    mac.tag()
}

/// Experimental modified Poly1305 state.
///
/// # Key layout
///
/// - `r` is read from overlapping windows of `key[0..16]`:
///   `le32(key[0..4]) & 0x3ffffff`, `(le32(key[3..7]) >> 2) & 0x3ffff03`,
///   `(le32(key[6..10]) >> 4) & 0x3ffc0ff`, `(le32(key[9..13]) >> 6) & 0x3f03fff`,
///   `(le32(key[12..16]) >> 8) & 0x00fffff`
/// - `key[16..32]` → four pad words
///
/// Blocks are loaded as four raw words with no 2^128 bit, and the pad is
/// added word by word without carries. The serialization packs limbs that
/// have already been shifted in place, which drops the upper bits of
/// limbs 1 to 3; this is part of the construction and is kept as-is.
pub struct Poly1305Modified {
    inner: Accumulator<RawWords, 5, 26, BLOCK_SIZE>,
}

impl Poly1305Modified {
    /// Creates a new instance from a one-time 32-byte key.
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        let r = [
            le32_at(key, 0) & 0x3ffffff,
            (le32_at(key, 3) >> 2) & 0x3ffff03,
            (le32_at(key, 6) >> 4) & 0x3ffc0ff,
            (le32_at(key, 9) >> 6) & 0x3f03fff,
            (le32_at(key, 12) >> 8) & 0x00fffff,
        ];

        let pad = [
            le32_at(key, 16),
            le32_at(key, 20),
            le32_at(key, 24),
            le32_at(key, 28),
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

    /// Produces the 16-byte tag.
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
        check_tag(&self.finalize()?, expected)
    }

    fn tag(&mut self) -> [u8; TAG_SIZE] {
        let mut h = self.inner.seal();
        let [f0, f1, f2, f3, f4] = h.0;

        let f1 = f1 << 26;
        let f2 = f2 << 20;
        let f3 = f3 << 14;
        let f4 = f4 << 8;

        let words = [f0 | f1, (f1 >> 6) | f2, (f2 >> 12) | f3, (f3 >> 18) | f4];

        let mut tag = [0u8; TAG_SIZE];
        store_le_words(&words, &mut tag);
        add_pad_words(&mut tag, self.inner.pad());

        tag[0] = tag[0].wrapping_add(1);

        h.zeroize();

        tag
    }
}

impl fmt::Debug for Poly1305Modified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Poly1305Modified {{ [protected] }}")
    }
}

/// Computes the modified Poly1305 tag of `message` under `key`.
pub fn mac_130_modified(key: &[u8; KEY_SIZE], message: &[u8]) -> [u8; TAG_SIZE] {
    let mut mac = Poly1305Modified::new(key);
    mac.inner.absorb(message);
    mac.tag()
}
