//! Primitive building blocks
//!
//! Low-level, fixed-size helpers shared by the cipher and the MACs. They
//! provide well-defined semantics and predictable behavior, and are kept
//! crate-internal: nothing here is meaningful outside the constructions
//! that use it.
//!
//! Current primitives include:
//! - `Limbs`: radix-2^b big integers reduced modulo `2^(N * b) - 5`
//! - `conv`: little-endian word loading and storing

pub(crate) mod conv;
pub(crate) mod limbs;
