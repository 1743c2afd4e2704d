//! ChaCha24 stream cipher
//!
//! Counter-mode encryption over the block function in [`super::core`]:
//! each 64-byte block of keystream is XORed into the data and the counter
//! advances by one per block. Encryption and decryption are the same
//! operation.
//!
//! Each block depends only on `(key, nonce, counter)`, so disjoint counter
//! ranges can be processed independently (for example on separate
//! threads) and still produce byte-identical output.

use super::core::{BLOCK_SIZE, KEY_SIZE, NONCE_SIZE, block, nonce_array};
use crate::error::Error;

use std::fmt;

use zeroize::Zeroize;

/// XORs `input` with the keystream into `output`.
///
/// # Parameters
/// - `key`: 256-bit secret key
/// - `nonce`: 128-bit nonce, must be exactly 16 bytes
/// - `counter`: counter of the first keystream block
/// - `input`: plaintext or ciphertext
/// - `output`: destination, same length as `input`
///
/// # Errors
/// - [`Error::InvalidNonceLength`] if `nonce` is not 16 bytes
/// - [`Error::LengthMismatch`] if `output.len() != input.len()`
///
/// Nothing is written to `output` on error.
///
/// # Notes
/// - The counter wraps modulo 2³² after block `u32::MAX`.
/// - The caller must ensure `(key, nonce)` uniqueness.
pub fn xor_keystream(
    key: &[u8; KEY_SIZE],
    nonce: &[u8],
    counter: u32,
    input: &[u8],
    output: &mut [u8],
) -> Result<(), Error> {
    let nonce = nonce_array(nonce)?;

    if input.len() != output.len() {
        return Err(Error::LengthMismatch {
            expected: input.len(),
            actual: output.len(),
        });
    }

    let mut block_counter = counter;

    for (src, dst) in input
        .chunks(BLOCK_SIZE)
        .zip(output.chunks_mut(BLOCK_SIZE))
    {
        let mut keystream = block(key, nonce, block_counter);
        block_counter = block_counter.wrapping_add(1);

        for ((d, s), k) in dst.iter_mut().zip(src).zip(&keystream) {
            *d = s ^ k;
        }

        keystream.zeroize();
    }

    Ok(())
}

/// Encrypts or decrypts `data`, returning a new buffer of the same length.
///
/// Applying it twice with the same key, nonce and counter returns the
/// original data.
///
/// # Errors
/// Returns [`Error::InvalidNonceLength`] if `nonce` is not 16 bytes.
pub fn apply_keystream(
    key: &[u8; KEY_SIZE],
    nonce: &[u8],
    counter: u32,
    data: &[u8],
) -> Result<Vec<u8>, Error> {
    let mut output = vec![0u8; data.len()];
    xor_keystream(key, nonce, counter, data, &mut output)?;
    Ok(output)
}

/// Resumable ChaCha24 cipher.
///
/// Keeps the position inside the current keystream block, so data may be
/// fed in slices of any size. The concatenated output is identical to a
/// single call to [`apply_keystream`] over the concatenated input.
pub struct ChaCha24 {
    /// Secret key
    key: [u8; KEY_SIZE],

    /// Nonce, length-checked at construction
    nonce: [u8; NONCE_SIZE],

    /// Counter of the next block to generate
    counter: u32,

    /// Current keystream block
    buffer: [u8; BLOCK_SIZE],

    /// Bytes of `buffer` already consumed; `BLOCK_SIZE` means empty
    offset: usize,
}

impl ChaCha24 {
    /// Creates a cipher positioned at the start of block `counter`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidNonceLength`] if `nonce` is not 16 bytes.
    pub fn new(key: &[u8; KEY_SIZE], nonce: &[u8], counter: u32) -> Result<Self, Error> {
        let nonce = *nonce_array(nonce)?;

        Ok(Self {
            key: *key,
            nonce,
            counter,
            buffer: [0u8; BLOCK_SIZE],
            offset: BLOCK_SIZE,
        })
    }

    /// Returns the counter of the next keystream block to be generated.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// XORs the keystream into `data` in place.
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        let mut data = data;

        while !data.is_empty() {
            if self.offset == BLOCK_SIZE {
                self.buffer = block(&self.key, &self.nonce, self.counter);
                self.counter = self.counter.wrapping_add(1);
                self.offset = 0;
            }

            let take = (BLOCK_SIZE - self.offset).min(data.len());
            let (head, rest) = std::mem::take(&mut data).split_at_mut(take);

            for (d, k) in head.iter_mut().zip(&self.buffer[self.offset..]) {
                *d ^= k;
            }

            self.offset += take;
            data = rest;
        }
    }
}

impl Drop for ChaCha24 {
    fn drop(&mut self) {
        self.key.zeroize();
        self.nonce.zeroize();
        self.buffer.zeroize();
        self.offset.zeroize();
        self.counter.zeroize();
    }
}

impl fmt::Debug for ChaCha24 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChaCha24 {{ [protected] }}")
    }
}
