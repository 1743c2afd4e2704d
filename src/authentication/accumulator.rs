//! Buffered polynomial accumulator shared by every MAC in the crate.
//!
//! An [`Accumulator`] owns the running value `h`, the fixed multiplier `r`
//! and the four-word pad, buffers input into `BLOCK`-byte blocks and feeds
//! each complete block through the limb engine:
//!
//! ```text
//! h = (h + block) * r  mod 2^(N * BITS) - 5
//! ```
//!
//! It is a two-state machine, `Active -> Finalized`. Once [`Accumulator::seal`]
//! has produced the reduced accumulator, further input or a second
//! finalization is refused with [`Error::UseAfterFinalize`].
//!
//! How a block becomes limbs differs between the MAC families and is
//! supplied by a [`BlockFormat`].

use std::marker::PhantomData;

use zeroize::Zeroize;

use crate::error::Error;
use crate::primitives::conv::load_le_words;
use crate::primitives::limbs::Limbs;

/// Conversion of a message block into limbs.
pub(crate) trait BlockFormat<const N: usize, const BLOCK: usize> {
    /// Whether the overflow of the top limb is folded back after every
    /// multiplication, with limb 0 carried once more before the final
    /// subtraction. When `false` that overflow is discarded.
    const FULL_CARRY: bool;

    /// Loads a block. `full` is `false` only for the zero-padded final
    /// block, whose terminating `1` byte is already in place.
    fn load(block: &[u8; BLOCK], full: bool) -> [u32; N];
}

/// One little-endian 32-bit word per limb, no splitting to the limb width.
///
/// Limbs past the end of the block stay zero, and full blocks carry no
/// extra high bit. Used by both experimental MACs.
pub(crate) struct RawWords;

impl<const N: usize, const BLOCK: usize> BlockFormat<N, BLOCK> for RawWords {
    const FULL_CARRY: bool = false;

    #[inline(always)]
    fn load(block: &[u8; BLOCK], _full: bool) -> [u32; N] {
        let mut t = [0u32; N];
        load_le_words(block, &mut t);
        t
    }
}

/// RFC 8439 layout: the 128-bit block is split into five 26-bit limbs and
/// full blocks get the 2^128 bit.
pub(crate) struct Rfc8439;

impl BlockFormat<5, 16> for Rfc8439 {
    const FULL_CARRY: bool = true;

    #[inline(always)]
    fn load(block: &[u8; 16], full: bool) -> [u32; 5] {
        let mut w = [0u32; 4];
        load_le_words(block, &mut w);

        let hibit = if full { 1 << 24 } else { 0 };

        [
            w[0] & 0x3ffffff,
            ((w[0] >> 26) | (w[1] << 6)) & 0x3ffffff,
            ((w[1] >> 20) | (w[2] << 12)) & 0x3ffffff,
            ((w[2] >> 14) | (w[3] << 18)) & 0x3ffffff,
            (w[3] >> 8) | hibit,
        ]
    }
}

/// Streaming accumulator for a MAC over `Limbs<N, BITS>` with `BLOCK`-byte
/// blocks.
pub(crate) struct Accumulator<F, const N: usize, const BITS: u32, const BLOCK: usize>
where
    F: BlockFormat<N, BLOCK>,
{
    /// Multiplier derived from the key, never mutated.
    r: Limbs<N, BITS>,

    /// Running accumulator.
    h: Limbs<N, BITS>,

    /// Additive pad, applied to the first 16 tag bytes at finalization.
    pad: [u32; 4],

    /// Partial block awaiting more input.
    buffer: [u8; BLOCK],

    /// Number of valid bytes in `buffer`, always `< BLOCK`.
    used: usize,

    finalized: bool,

    format: PhantomData<F>,
}

impl<F, const N: usize, const BITS: u32, const BLOCK: usize> Accumulator<F, N, BITS, BLOCK>
where
    F: BlockFormat<N, BLOCK>,
{
    pub(crate) fn new(r: Limbs<N, BITS>, pad: [u32; 4]) -> Self {
        Self {
            r,
            h: Limbs::ZERO,
            pad,
            buffer: [0u8; BLOCK],
            used: 0,
            finalized: false,
            format: PhantomData,
        }
    }

    pub(crate) fn pad(&self) -> &[u32; 4] {
        &self.pad
    }

    /// Fails with [`Error::UseAfterFinalize`] once a tag has been produced.
    pub(crate) fn ensure_active(&self) -> Result<(), Error> {
        if self.finalized {
            return Err(Error::UseAfterFinalize);
        }
        Ok(())
    }

    /// Absorbs more message bytes.
    pub(crate) fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        self.ensure_active()?;
        self.absorb(data);
        Ok(())
    }

    /// Feeds one block through the limb engine.
    #[inline(always)]
    fn process(h: &mut Limbs<N, BITS>, r: &Limbs<N, BITS>, block: &[u8; BLOCK], full: bool) {
        let mut t = F::load(block, full);
        h.accumulate(&t);

        let carry = h.multiply_reduce(r);
        if F::FULL_CARRY {
            h.fold_top_carry(carry);
        }

        t.zeroize();
    }

    /// Buffers `data`, processing every block that becomes complete.
    ///
    /// Callers must check [`Self::ensure_active`] first.
    pub(crate) fn absorb(&mut self, data: &[u8]) {
        let mut data = data;

        if self.used > 0 {
            let take = (BLOCK - self.used).min(data.len());
            self.buffer[self.used..self.used + take].copy_from_slice(&data[..take]);
            self.used += take;
            data = &data[take..];

            if self.used < BLOCK {
                return;
            }

            Self::process(&mut self.h, &self.r, &self.buffer, true);
            self.used = 0;
        }

        while let Some((block, rest)) = data.split_first_chunk::<BLOCK>() {
            Self::process(&mut self.h, &self.r, block, true);
            data = rest;
        }

        self.buffer[..data.len()].copy_from_slice(data);
        self.used = data.len();

        debug_assert!(self.used < BLOCK);
    }

    /// Processes any buffered tail, marks the accumulator finalized and
    /// returns `h` fully reduced modulo `2^(N * BITS) - 5`.
    ///
    /// Callers must check [`Self::ensure_active`] first.
    pub(crate) fn seal(&mut self) -> Limbs<N, BITS> {
        debug_assert!(!self.finalized);

        if self.used > 0 {
            self.buffer[self.used..].fill(0);
            self.buffer[self.used] = 1;
            Self::process(&mut self.h, &self.r, &self.buffer, false);
        }

        self.finalized = true;

        let mut f = self.h;
        f.propagate();
        if F::FULL_CARRY {
            f.carry_low();
        }
        f.reduce();

        f
    }
}

impl<F, const N: usize, const BITS: u32, const BLOCK: usize> Drop for Accumulator<F, N, BITS, BLOCK>
where
    F: BlockFormat<N, BLOCK>,
{
    fn drop(&mut self) {
        self.r.zeroize();
        self.h.zeroize();
        self.pad.zeroize();
        self.buffer.zeroize();
        self.used.zeroize();
    }
}

/// Adds the pad to the first 16 tag bytes as four independent wrapping
/// 32-bit additions, with no carry between words.
pub(crate) fn add_pad_words(tag: &mut [u8], pad: &[u32; 4]) {
    tag[..16]
        .chunks_exact_mut(4)
        .zip(pad)
        .for_each(|(c, p)| {
            let w = u32::from_le_bytes([c[0], c[1], c[2], c[3]]).wrapping_add(*p);
            c.copy_from_slice(&w.to_le_bytes());
        });
}

/// Adds the pad to a 16-byte tag modulo 2^128.
pub(crate) fn add_pad_carry(tag: &mut [u8; 16], pad: &[u32; 4]) {
    let mut carry = 0u64;

    tag.chunks_exact_mut(4).zip(pad).for_each(|(c, p)| {
        let sum = u32::from_le_bytes([c[0], c[1], c[2], c[3]]) as u64 + *p as u64 + carry;
        c.copy_from_slice(&(sum as u32).to_le_bytes());
        carry = sum >> 32;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    type Raw = Accumulator<RawWords, 5, 26, 16>;

    fn unit_r() -> Limbs<5, 26> {
        Limbs([1, 0, 0, 0, 0])
    }

    #[test]
    fn split_input_matches_whole_input() {
        let r = Limbs([0x0ab_cdef, 0x123_4567, 0x3ff_00ff, 0x0f0_f0f0, 0x00f_ffff]);
        let msg: Vec<u8> = (0u8..=70).collect();

        let mut whole = Raw::new(r, [0; 4]);
        whole.absorb(&msg);

        let mut split = Raw::new(r, [0; 4]);
        for chunk in msg.chunks(7) {
            split.absorb(chunk);
        }

        assert_eq!(whole.seal(), split.seal());
    }

    #[test]
    fn final_block_gets_terminator_byte() {
        // With r = 1 the accumulator is simply the padded block.
        let mut acc = Raw::new(unit_r(), [0; 4]);
        acc.absorb(&[0xaa, 0xbb]);

        assert_eq!(acc.seal().0, [0x01bbaa, 0, 0, 0, 0]);
    }

    #[test]
    fn full_raw_block_has_no_high_bit() {
        let mut acc = Raw::new(unit_r(), [0; 4]);
        acc.absorb(&[0u8; 16]);

        assert_eq!(acc.seal().0, [0; 5]);
    }

    #[test]
    fn rfc8439_full_block_sets_bit_128() {
        let limbs = <Rfc8439 as BlockFormat<5, 16>>::load(&[0u8; 16], true);
        assert_eq!(limbs, [0, 0, 0, 0, 1 << 24]);

        let limbs = <Rfc8439 as BlockFormat<5, 16>>::load(&[0xff; 16], false);
        assert_eq!(limbs, [0x3ffffff, 0x3ffffff, 0x3ffffff, 0x3ffffff, 0x00ffffff]);
    }

    #[test]
    fn use_after_finalize_is_refused() {
        let mut acc = Raw::new(unit_r(), [0; 4]);
        acc.update(b"abc").unwrap();
        acc.ensure_active().unwrap();
        acc.seal();

        assert_eq!(acc.update(b"more"), Err(Error::UseAfterFinalize));
        assert_eq!(acc.ensure_active(), Err(Error::UseAfterFinalize));
    }

    #[test]
    fn pad_words_do_not_carry() {
        let mut tag = [0xffu8; 16];
        add_pad_words(&mut tag, &[1, 0, 0, 0]);
        assert_eq!(&tag[..4], &[0, 0, 0, 0]);
        assert_eq!(&tag[4..8], &[0xff; 4]);
    }

    #[test]
    fn pad_carry_wraps_at_128_bits() {
        let mut tag = [0xffu8; 16];
        add_pad_carry(&mut tag, &[1, 0, 0, 0]);
        assert_eq!(tag, [0u8; 16]);

        let mut tag = [0xffu8; 16];
        tag[4] = 0;
        add_pad_carry(&mut tag, &[1, 0, 0, 0]);
        assert_eq!(&tag[..5], &[0, 0, 0, 0, 1]);
    }
}
