//! ChaCha24 block function
//!
//! A ChaCha-family keystream generator with a 16-byte nonce and 24 rounds.
//! It keeps ChaCha's 4x4 word state and column/diagonal schedule, and
//! differs from RFC 8439 ChaCha20 in the following ways:
//!
//! - the quarter round rotates by 10, 14, 6 and 9 bits, and adds 1 to `d`
//!   after its first rotation
//! - 24 rounds (12 double rounds) instead of 20
//! - the nonce occupies words 11..15 and the block counter word 15
//!
//! The nonce window starts at word 11, so the last key word is loaded and
//! then overwritten by the first nonce word. Output therefore depends on
//! only the first 28 key bytes. This layout is kept as-is; changing it
//! changes every keystream.
//!
//! The result is not interoperable with ChaCha20 and has had no
//! cryptanalysis. Use it for experimentation only.

use crate::error::Error;
use crate::primitives::conv::{load_le_words, store_le_words};

use zeroize::Zeroize;

/// Key length in bytes.
pub const KEY_SIZE: usize = 32;

/// Nonce length in bytes.
pub const NONCE_SIZE: usize = 16;

/// Keystream block length in bytes.
pub const BLOCK_SIZE: usize = 64;

/// Number of rounds applied per block.
const ROUNDS: usize = 24;

/// ChaCha constant words, `"expand 32-byte k"` as little-endian `u32`s.
const CHACHA_CONSTANTS: [u32; 4] = [
    0x6170_7865, // "expa"
    0x3320_646e, // "nd 3"
    0x7962_2d32, // "2-by"
    0x6b20_6574, // "te k"
];

/// Performs one quarter round on four words of the state.
///
/// Same add/xor/rotate structure as ChaCha, with rotations 10, 14, 6, 9
/// and an extra `+1` on `d` after the first rotation. All additions wrap
/// modulo 2³².
#[inline(always)]
pub(crate) fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(10);
    state[d] = state[d].wrapping_add(1);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(14);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(6);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(9);
}

/// Applies the full 24-round permutation.
///
/// Each of the 12 iterations performs one column round followed by one
/// diagonal round.
pub(crate) fn rounds(state: &mut [u32; 16]) {
    for _ in 0..ROUNDS / 2 {
        // Column rounds
        quarter_round(state, 0, 4, 8, 12);
        quarter_round(state, 1, 5, 9, 13);
        quarter_round(state, 2, 6, 10, 14);
        quarter_round(state, 3, 7, 11, 15);

        // Diagonal rounds
        quarter_round(state, 0, 5, 10, 15);
        quarter_round(state, 1, 6, 11, 12);
        quarter_round(state, 2, 7, 8, 13);
        quarter_round(state, 3, 4, 9, 14);
    }
}

/// Checks the nonce length and borrows it as a fixed-size array.
pub(crate) fn nonce_array(nonce: &[u8]) -> Result<&[u8; NONCE_SIZE], Error> {
    nonce.try_into().map_err(|_| Error::InvalidNonceLength {
        expected: NONCE_SIZE,
        actual: nonce.len(),
    })
}

/// Generates one keystream block from a length-checked nonce.
pub(crate) fn block(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE], counter: u32) -> [u8; 64] {
    let mut state = [0u32; 16];

    // Constants
    state[0..4].copy_from_slice(&CHACHA_CONSTANTS);

    // Key, words 4..12
    load_le_words(key, &mut state[4..12]);

    // Nonce, words 11..15 (word 11 is overwritten)
    load_le_words(nonce, &mut state[11..15]);

    // Block counter
    state[15] = counter;

    // Preserve original state for feed-forward
    let mut original = state;

    rounds(&mut state);

    state.iter_mut().zip(&original).for_each(|(s, o)| {
        *s = s.wrapping_add(*o);
    });

    let mut out = [0u8; BLOCK_SIZE];
    store_le_words(&state, &mut out);

    state.zeroize();
    original.zeroize();

    out
}

/// Generates a single 64-byte ChaCha24 keystream block.
///
/// # Parameters
/// - `key`: 256-bit secret key
/// - `nonce`: 128-bit nonce, must be exactly 16 bytes
/// - `counter`: 32-bit block counter
///
/// # Errors
/// Returns [`Error::InvalidNonceLength`] if `nonce` is not 16 bytes. No
/// keystream is produced in that case.
///
/// # Security Notes
/// - Reusing a `(key, nonce, counter)` tuple reuses keystream; preventing
///   that is the caller's responsibility.
pub fn generate_block(key: &[u8; KEY_SIZE], nonce: &[u8], counter: u32) -> Result<[u8; 64], Error> {
    let nonce = nonce_array(nonce)?;
    Ok(block(key, nonce, counter))
}
