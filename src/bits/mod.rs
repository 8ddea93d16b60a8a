//! Bit-packed boolean vectors and matrices

pub mod matrix;
pub mod vector;

pub use matrix::BitMatrix;
pub use vector::BitVector;

/// Storage word. Fixed at 64 bits on every platform so layouts and
/// word-count based operations behave the same everywhere.
pub type Word = u64;

/// Number of bits in a [`Word`]
pub const WORD_BITS: usize = Word::BITS as usize;

/// Number of words needed to hold `n_bits` bits
#[inline]
pub fn words_for(n_bits: usize) -> usize {
    n_bits.div_ceil(WORD_BITS)
}
