//! Radix-2^BITS limb arithmetic modulo `2^(N * BITS) - 5`.
//!
//! A [`Limbs`] value stores a big integer as `N` unsigned limbs of nominal
//! width `BITS`, kept in redundant form between operations. The same code
//! serves every MAC in the crate:
//!
//! - `Limbs<5, 26>` for the 130-bit modulus `2^130 - 5`
//! - `Limbs<6, 29>` for the wide MAC; it is named after a 179-bit modulus
//!   but six 29-bit limbs span 174 bits, so reduction is modulo
//!   `2^174 - 5`
//!
//! Reduction relies on the identity `2^(N * BITS) ≡ 5`, so any product
//! term that lands above the top limb is folded back into the low limbs
//! multiplied by 5.
//!
//! Limb additions wrap modulo 2^32 and product sums wrap modulo 2^64. For
//! the standard Poly1305 parameters neither ever wraps; the wider variants
//! rely on the exact wrapping behavior to stay bit-compatible.

use std::fmt;

use zeroize::Zeroize;

/// A big integer as `N` little-endian limbs of `BITS` bits each.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct Limbs<const N: usize, const BITS: u32>(pub(crate) [u32; N]);

impl<const N: usize, const BITS: u32> Limbs<N, BITS> {
    /// Mask selecting the low `BITS` bits of a limb.
    pub(crate) const MASK: u32 = (1 << BITS) - 1;

    pub(crate) const ZERO: Self = Limbs([0; N]);

    /// Adds `t` limb-wise into `self`.
    ///
    /// No carries are propagated; the following [`Self::multiply_reduce`]
    /// absorbs the excess.
    #[inline(always)]
    pub(crate) fn accumulate(&mut self, t: &[u32; N]) {
        self.0
            .iter_mut()
            .zip(t)
            .for_each(|(h, t)| *h = h.wrapping_add(*t));
    }

    /// Replaces `self` with `self * r` modulo `2^(N * BITS) - 5`, then runs
    /// one low-to-high carry pass.
    ///
    /// Output limb `i` collects `h[j] * r[i - j]` for `j <= i` and
    /// `h[j] * 5 * r[i + N - j]` for `j > i`. Each limb is masked to `BITS`
    /// bits and its overflow carried into the next one.
    ///
    /// Returns the overflow of the top limb, which the caller may fold back
    /// (see [`Self::fold_top_carry`]) or drop.
    #[inline(always)]
    pub(crate) fn multiply_reduce(&mut self, r: &Self) -> u64 {
        let h = &self.0;
        let r = &r.0;

        let mut d = [0u64; N];

        for (i, d_i) in d.iter_mut().enumerate() {
            for j in 0..=i {
                *d_i = d_i.wrapping_add(h[j] as u64 * r[i - j] as u64);
            }
            for j in (i + 1)..N {
                let r5 = 5u32.wrapping_mul(r[i + N - j]);
                *d_i = d_i.wrapping_add(h[j] as u64 * r5 as u64);
            }
        }

        let mut carry = 0u64;
        for (h_i, d_i) in self.0.iter_mut().zip(d) {
            let d_i = d_i.wrapping_add(carry);
            *h_i = (d_i & Self::MASK as u64) as u32;
            carry = d_i >> BITS;
        }

        carry
    }

    /// Folds an overflow out of the top limb back into limb 0 (times 5),
    /// then carries limb 0 into limb 1.
    #[inline(always)]
    pub(crate) fn fold_top_carry(&mut self, carry: u64) {
        self.0[0] = self.0[0].wrapping_add((carry * 5) as u32);
        self.carry_low();
    }

    /// Moves the overflow of limb 0 into limb 1.
    #[inline(always)]
    pub(crate) fn carry_low(&mut self) {
        let c = self.0[0] >> BITS;
        self.0[0] &= Self::MASK;
        self.0[1] = self.0[1].wrapping_add(c);
    }

    /// Full carry pass used at finalization.
    ///
    /// Carries limbs `0..N-1` upwards, then folds the top limb's overflow
    /// into limb 0 times 5 and masks the top limb. Limb 0 itself is not
    /// carried again afterwards.
    pub(crate) fn propagate(&mut self) {
        for i in 1..N {
            let c = self.0[i - 1] >> BITS;
            self.0[i] = self.0[i].wrapping_add(c);
            self.0[i - 1] &= Self::MASK;
        }

        let top = self.0[N - 1] >> BITS;
        self.0[0] = self.0[0].wrapping_add(5u32.wrapping_mul(top));
        self.0[N - 1] &= Self::MASK;
    }

    /// Conditionally subtracts the modulus.
    ///
    /// Computes `g = h + 5` with carries; a carry out of the top limb means
    /// `h >= 2^(N * BITS) - 5`, in which case the masked `g` equals
    /// `h - p`. The choice is made with a mask rather than a branch.
    pub(crate) fn reduce(&mut self) {
        let mut g = [0u32; N];

        let mut c = 5u32;
        for (g_i, h_i) in g.iter_mut().zip(&self.0) {
            *g_i = h_i.wrapping_add(c);
            c = *g_i >> BITS;
            *g_i &= Self::MASK;
        }

        let mask = (c ^ 1).wrapping_sub(1);

        for (h_i, g_i) in self.0.iter_mut().zip(&g) {
            *h_i = (*h_i & !mask) | (*g_i & mask);
        }

        g.zeroize();
    }
}

impl<const N: usize, const BITS: u32> Zeroize for Limbs<N, BITS> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<const N: usize, const BITS: u32> fmt::Debug for Limbs<N, BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Limbs<{N}, {BITS}> {{ [protected] }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type L130 = Limbs<5, 26>;
    type L174 = Limbs<6, 29>;

    #[test]
    fn multiply_by_one_is_identity() {
        let mut h = L130::ZERO;
        h.0[0] = 1;

        let r = Limbs([0x123_4567, 0x2ab_cdef, 0x3ff_ffff, 0, 0x0f0_f0f0]);
        let carry = h.multiply_reduce(&r);

        assert_eq!(h, r);
        assert_eq!(carry, 0);
    }

    #[test]
    fn top_limb_wraps_to_five() {
        // 2^104 * 2^26 = 2^130 ≡ 5
        let mut h = L130::ZERO;
        h.0[4] = 1;
        let mut r = L130::ZERO;
        r.0[1] = 1;

        h.multiply_reduce(&r);
        assert_eq!(h.0, [5, 0, 0, 0, 0]);

        // 2^145 * 2^29 = 2^174 ≡ 5
        let mut h = L174::ZERO;
        h.0[5] = 1;
        let mut r = L174::ZERO;
        r.0[1] = 1;

        h.multiply_reduce(&r);
        assert_eq!(h.0, [5, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn carries_move_upwards() {
        let mut h = L130::ZERO;
        h.0[0] = 1;
        let r = Limbs([L130::MASK, 0, 0, 0, 0]);

        // accumulate one more so the product overflows limb 0
        h.accumulate(&[1, 0, 0, 0, 0]);
        h.multiply_reduce(&r);

        // 2 * (2^26 - 1) = 2^27 - 2
        assert_eq!(h.0, [L130::MASK - 1, 1, 0, 0, 0]);
    }

    #[test]
    fn multiply_reports_top_overflow() {
        let mut h = Limbs::<5, 26>([0, 0, 0, 0, L130::MASK]);
        let r = Limbs([4, 0, 0, 0, 0]);

        let carry = h.multiply_reduce(&r);

        assert_eq!(carry, 3);
        assert_eq!(h.0[4], L130::MASK - 3);
    }

    #[test]
    fn fold_top_carry_multiplies_by_five() {
        let mut h = L130::ZERO;
        h.fold_top_carry(3);
        assert_eq!(h.0, [15, 0, 0, 0, 0]);

        let mut h = Limbs::<5, 26>([L130::MASK, 0, 0, 0, 0]);
        h.fold_top_carry(1);
        assert_eq!(h.0, [4, 1, 0, 0, 0]);
    }

    #[test]
    fn propagate_normalizes_limbs() {
        let mut h = Limbs::<5, 26>([1 << 26, 1 << 26, 0, 0, 1 << 26]);
        h.propagate();

        // limb 4 overflow folds to 5 in limb 0
        assert_eq!(h.0, [5, 1, 1, 0, 0]);
    }

    #[test]
    fn reduce_subtracts_modulus_once() {
        let m = L130::MASK;

        let mut p = Limbs::<5, 26>([m - 4, m, m, m, m]);
        p.reduce();
        assert_eq!(p.0, [0, 0, 0, 0, 0]);

        let mut p_plus_two = Limbs::<5, 26>([m - 2, m, m, m, m]);
        p_plus_two.reduce();
        assert_eq!(p_plus_two.0, [2, 0, 0, 0, 0]);

        let mut below = Limbs::<5, 26>([m - 5, m, m, m, m]);
        below.reduce();
        assert_eq!(below.0, [m - 5, m, m, m, m]);
    }

    #[test]
    fn reduce_six_limbs() {
        let m = L174::MASK;

        let mut p = Limbs::<6, 29>([m - 4, m, m, m, m, m]);
        p.reduce();
        assert_eq!(p.0, [0; 6]);

        let mut small = Limbs::<6, 29>([7, 0, 0, 0, 0, 1]);
        small.reduce();
        assert_eq!(small.0, [7, 0, 0, 0, 0, 1]);
    }
}
