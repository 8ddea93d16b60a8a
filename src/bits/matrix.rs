//! Resizable matrix of equal-width bit vectors

use super::BitVector;
use crate::error::BitError;
use std::fmt;
use std::io::BufRead;
use std::ops::{Index, IndexMut};

/// An ordered sequence of [`BitVector`] rows sharing one column count.
///
/// Rows are either equations of a linear system or rows of a puzzle field.
/// Row swaps exchange the owned vectors and never copy bits.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    rows: Vec<BitVector>,
    n_cols: usize,
}

impl BitMatrix {
    /// Allocate `n_rows` zero-filled rows of `n_cols` bits each.
    ///
    /// If any row fails to allocate, the rows built so far are dropped and the
    /// error is returned.
    pub fn new(n_rows: usize, n_cols: usize) -> Result<Self, BitError> {
        let mut matrix = Self::with_cols(n_cols);
        matrix.add_rows(n_rows)?;
        Ok(matrix)
    }

    /// An empty matrix whose rows will be `n_cols` wide
    pub fn with_cols(n_cols: usize) -> Self {
        Self {
            rows: Vec::new(),
            n_cols,
        }
    }

    /// Build a matrix from '0'/'1' text, one row per line.
    ///
    /// Reading stops at the first blank line or at end of input. The first
    /// row fixes the column count; a later row of different width is rejected.
    pub fn read_from_text<R: BufRead>(reader: R) -> Result<Self, BitError> {
        let mut matrix: Option<BitMatrix> = None;

        for (row, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }

            let vector = BitVector::from_bit_str(line).map_err(|source| BitError::MalformedRow {
                row,
                source: Box::new(source),
            })?;

            let matrix = matrix.get_or_insert_with(|| BitMatrix::with_cols(vector.len()));
            if vector.len() != matrix.n_cols {
                return Err(BitError::RaggedRow {
                    row,
                    width: vector.len(),
                    expected: matrix.n_cols,
                });
            }
            matrix.push_row(vector)?;
        }

        matrix.ok_or(BitError::Empty)
    }

    /// Parse a matrix from an in-memory string, see [`BitMatrix::read_from_text`]
    pub fn parse(text: &str) -> Result<Self, BitError> {
        Self::read_from_text(text.as_bytes())
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// `(rows, cols)`
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows.len(), self.n_cols)
    }

    #[inline]
    pub fn row(&self, row: usize) -> &BitVector {
        &self.rows[row]
    }

    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut BitVector {
        &mut self.rows[row]
    }

    pub fn rows(&self) -> impl Iterator<Item = &BitVector> {
        self.rows.iter()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.rows[row].get(col)
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.rows[row].set(col, value);
    }

    #[inline]
    pub fn xor_toggle(&mut self, row: usize, col: usize, value: bool) {
        self.rows[row].xor_toggle(col, value);
    }

    /// Exchange two rows in place
    #[inline]
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.rows.swap(a, b);
    }

    /// XOR row `src` into row `dst` across the full row width.
    ///
    /// # Panics
    /// Panics if `src == dst` or either index is out of range.
    pub fn xor_rows(&mut self, dst: usize, src: usize) {
        assert_ne!(dst, src, "cannot xor row {dst} into itself");
        let (dst_row, src_row) = if dst < src {
            let (head, tail) = self.rows.split_at_mut(src);
            (&mut head[dst], &tail[0])
        } else {
            let (head, tail) = self.rows.split_at_mut(dst);
            (&mut tail[0], &head[src])
        };
        dst_row.xor_assign(src_row);
    }

    /// Append `n_add` zero-filled rows.
    ///
    /// On allocation failure the matrix keeps its previous rows.
    pub fn add_rows(&mut self, n_add: usize) -> Result<(), BitError> {
        let n_rows = self.rows.len();
        self.rows
            .try_reserve_exact(n_add)
            .map_err(|_| BitError::Allocation {
                bits: n_add.saturating_mul(self.n_cols),
            })?;

        for _ in 0..n_add {
            match BitVector::new(self.n_cols) {
                Ok(row) => self.rows.push(row),
                Err(err) => {
                    self.rows.truncate(n_rows);
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Drop the last `n_remove` rows and release their storage.
    ///
    /// # Panics
    /// Panics if `n_remove` exceeds the row count.
    pub fn remove_rows(&mut self, n_remove: usize) {
        assert!(
            n_remove <= self.rows.len(),
            "cannot remove {n_remove} rows from a matrix with {} rows",
            self.rows.len()
        );
        self.rows.truncate(self.rows.len() - n_remove);
        self.rows.shrink_to_fit();
    }

    /// Append a row, which must be exactly `n_cols` wide
    pub fn push_row(&mut self, row: BitVector) -> Result<(), BitError> {
        if row.len() != self.n_cols {
            return Err(BitError::RaggedRow {
                row: self.rows.len(),
                width: row.len(),
                expected: self.n_cols,
            });
        }
        self.rows
            .try_reserve(1)
            .map_err(|_| BitError::Allocation { bits: self.n_cols })?;
        self.rows.push(row);
        Ok(())
    }

    /// Total number of set bits
    pub fn count_ones(&self) -> usize {
        self.rows.iter().map(BitVector::weight).sum()
    }

    /// True when no bit is set
    pub fn is_zero(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.words().iter().all(|&word| word == 0))
    }

    /// Print the matrix followed by a blank line
    pub fn print(&self) {
        println!("{self}");
    }
}

impl Index<usize> for BitMatrix {
    type Output = BitVector;

    fn index(&self, row: usize) -> &BitVector {
        &self.rows[row]
    }
}

impl IndexMut<usize> for BitMatrix {
    fn index_mut(&mut self, row: usize) -> &mut BitVector {
        &mut self.rows[row]
    }
}

/// Each row as '0'/'1' characters followed by a newline
impl fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row.to_bit_string(self.n_cols))?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitMatrix {}x{}\n{}", self.n_rows(), self.n_cols, self)
    }
}
