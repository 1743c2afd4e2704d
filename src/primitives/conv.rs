//! Little-endian conversions between byte strings and 32-bit words.
//!
//! All multi-byte fields handled by this crate are little-endian. These
//! helpers zip over whole words only; trailing bytes that do not fill a
//! word, and words with no corresponding bytes, are left untouched.

/// Reads the little-endian word starting at `offset`.
///
/// Offsets need not be word aligned; the MAC key layouts read overlapping
/// windows such as `key[3..7]`.
#[inline(always)]
pub(crate) fn le32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[cfg(not(feature = "speed"))]
/// Fills `words` from consecutive little-endian words of `bytes`.
#[inline(always)]
pub(crate) fn load_le_words(bytes: &[u8], words: &mut [u32]) {
    words
        .iter_mut()
        .zip(bytes.chunks_exact(4))
        .for_each(|(w, c)| *w = u32::from_le_bytes([c[0], c[1], c[2], c[3]]));
}

#[cfg(feature = "speed")]
/// Fills `words` from consecutive little-endian words of `bytes` (shift-based fast path).
#[inline(always)]
pub(crate) fn load_le_words(bytes: &[u8], words: &mut [u32]) {
    let n = words.len().min(bytes.len() / 4);

    for i in 0..n {
        let o = 4 * i;
        words[i] = (bytes[o] as u32)
            | ((bytes[o + 1] as u32) << 8)
            | ((bytes[o + 2] as u32) << 16)
            | ((bytes[o + 3] as u32) << 24);
    }
}

#[cfg(not(feature = "speed"))]
/// Writes `words` as consecutive little-endian words into `out`.
#[inline(always)]
pub(crate) fn store_le_words(words: &[u32], out: &mut [u8]) {
    out.chunks_exact_mut(4)
        .zip(words)
        .for_each(|(c, w)| c.copy_from_slice(&w.to_le_bytes()));
}

#[cfg(feature = "speed")]
/// Writes `words` as consecutive little-endian words into `out` (shift-based fast path).
#[inline(always)]
pub(crate) fn store_le_words(words: &[u32], out: &mut [u8]) {
    let n = words.len().min(out.len() / 4);

    for i in 0..n {
        let o = 4 * i;
        let v = words[i];
        out[o] = v as u8;
        out[o + 1] = (v >> 8) as u8;
        out[o + 2] = (v >> 16) as u8;
        out[o + 3] = (v >> 24) as u8;
    }
}
