//! Fixed-length boolean vector packed into 64-bit words

use super::{words_for, Word, WORD_BITS};
use crate::error::BitError;
use std::fmt;
use std::str::FromStr;

/// A fixed-length sequence of booleans packed into [`Word`]s.
///
/// Bit `i` lives in word `i / 64` at position `i % 64`. Bits past `len` in the
/// last word are never read by any length-bounded operation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitVector {
    words: Vec<Word>,
    len: usize,
}

impl BitVector {
    /// Create a zero-filled vector of `len` bits.
    ///
    /// Fails only when the storage cannot be allocated.
    pub fn new(len: usize) -> Result<Self, BitError> {
        let n_words = words_for(len);
        let mut words = Vec::new();
        words
            .try_reserve_exact(n_words)
            .map_err(|_| BitError::Allocation { bits: len })?;
        words.resize(n_words, 0);
        Ok(Self { words, len })
    }

    /// Build a vector from a string of '0'/'1' characters, one bit per character.
    ///
    /// A single trailing newline (`\n` or `\r\n`) is stripped before the length
    /// is taken. Any other character is rejected.
    pub fn from_bit_str(text: &str) -> Result<Self, BitError> {
        let text = text.strip_suffix('\n').unwrap_or(text);
        let text = text.strip_suffix('\r').unwrap_or(text);

        if text.is_empty() {
            return Err(BitError::Empty);
        }

        let mut vector = Self::new(text.chars().count())?;
        for (index, ch) in text.chars().enumerate() {
            match ch {
                '0' => {}
                '1' => vector.set(index, true),
                found => return Err(BitError::InvalidCharacter { index, found }),
            }
        }

        Ok(vector)
    }

    /// Logical length in bits
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of storage words backing the vector
    #[inline]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Raw word access. Callers must keep bits past `len` clear.
    #[inline]
    pub fn words_mut(&mut self) -> &mut [Word] {
        &mut self.words
    }

    /// Returns the bit at `index`.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.check_index(index);
        (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 == 1
    }

    /// Sets the bit at `index` to `value`.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) {
        self.check_index(index);
        let mask = 1 << (index % WORD_BITS);
        if value {
            self.words[index / WORD_BITS] |= mask;
        } else {
            self.words[index / WORD_BITS] &= !mask;
        }
    }

    /// Flips the bit at `index` only when `value` is true.
    ///
    /// Several neighbour presses accumulate on one cell through this, so a
    /// `false` toggle must leave the bit untouched.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[inline]
    pub fn xor_toggle(&mut self, index: usize, value: bool) {
        self.check_index(index);
        if value {
            self.words[index / WORD_BITS] ^= 1 << (index % WORD_BITS);
        }
    }

    /// Population count over the first `word_count` storage words.
    ///
    /// # Panics
    /// Panics if `word_count` exceeds the allocated words.
    pub fn count_ones(&self, word_count: usize) -> usize {
        self.words[..word_count]
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    /// Population count over the whole vector
    pub fn weight(&self) -> usize {
        self.count_ones(self.words.len())
    }

    /// Zeroes the first `word_count` storage words.
    ///
    /// # Panics
    /// Panics if `word_count` exceeds the allocated words.
    pub fn clear(&mut self, word_count: usize) {
        self.words[..word_count].fill(0);
    }

    /// XORs `other` into `self` word by word (addition over GF(2)).
    ///
    /// # Panics
    /// Panics if the lengths differ.
    pub fn xor_assign(&mut self, other: &BitVector) {
        assert_eq!(
            self.len, other.len,
            "cannot xor vectors of length {} and {}",
            self.len, other.len
        );
        for (dst, src) in self.words.iter_mut().zip(&other.words) {
            *dst ^= *src;
        }
    }

    /// Renders exactly `length` bits as '0'/'1' characters.
    ///
    /// # Panics
    /// Panics if `length > len`.
    pub fn to_bit_string(&self, length: usize) -> String {
        (0..length)
            .map(|index| if self.get(index) { '1' } else { '0' })
            .collect()
    }

    /// Iterates over the bits in order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |index| self.get(index))
    }

    #[inline]
    fn check_index(&self, index: usize) {
        assert!(
            index < self.len,
            "bit index {index} out of range (len={})",
            self.len
        );
    }
}

impl FromStr for BitVector {
    type Err = BitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bit_str(s)
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string(self.len))
    }
}

impl fmt::Debug for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitVector({})", self.to_bit_string(self.len))
    }
}
