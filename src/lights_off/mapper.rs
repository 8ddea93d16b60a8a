//! Mapping between Lights Off fields and GF(2) systems

use crate::bits::BitMatrix;
use crate::error::LightsOffError;

/// Row-major index of cell `(row, col)` in an `n_rows x n_cols` field,
/// or `None` when the cell is outside the field.
#[inline]
pub fn cell_index(row: isize, col: isize, n_rows: usize, n_cols: usize) -> Option<usize> {
    if row >= 0 && col >= 0 && (row as usize) < n_rows && (col as usize) < n_cols {
        Some(row as usize * n_cols + col as usize)
    } else {
        None
    }
}

/// The cell itself followed by its in-bounds orthogonal neighbours
fn press_footprint(row: usize, col: usize, n_rows: usize, n_cols: usize) -> impl Iterator<Item = usize> {
    const OFFSETS: [(isize, isize); 5] = [(0, 0), (0, 1), (0, -1), (1, 0), (-1, 0)];
    let (row, col) = (row as isize, col as isize);
    OFFSETS
        .into_iter()
        .filter_map(move |(dr, dc)| cell_index(row + dr, col + dc, n_rows, n_cols))
}

/// A field with every light on
pub fn all_lit(n_rows: usize, n_cols: usize) -> Result<BitMatrix, LightsOffError> {
    if n_rows == 0 || n_cols == 0 {
        return Err(LightsOffError::EmptyField);
    }
    let mut field = BitMatrix::new(n_rows, n_cols)?;
    for row in 0..n_rows {
        for col in 0..n_cols {
            field.set(row, col, true);
        }
    }
    Ok(field)
}

/// Build the augmented system for `field`.
///
/// Cell `(r, c)` owns equation and variable `r * cols + c`. Its equation sets
/// the coefficients of itself and every in-bounds orthogonal neighbour, so the
/// coefficient block is symmetric. The last column is the cell's state.
pub fn build_system(field: &BitMatrix) -> Result<BitMatrix, LightsOffError> {
    let (n_rows, n_cols) = field.dimensions();
    if n_rows == 0 || n_cols == 0 {
        return Err(LightsOffError::EmptyField);
    }

    let n = n_rows * n_cols;
    let mut system = BitMatrix::new(n, n + 1)?;

    for row in 0..n_rows {
        for col in 0..n_cols {
            let equation = row * n_cols + col;
            for variable in press_footprint(row, col, n_rows, n_cols) {
                system.set(equation, variable, true);
            }
            system.set(equation, n, field.get(row, col));
        }
    }

    Ok(system)
}

/// Press every cell set in `presses`, toggling it and its in-bounds neighbours
pub fn apply_presses(field: &mut BitMatrix, presses: &BitMatrix) -> Result<(), LightsOffError> {
    let (n_rows, n_cols) = field.dimensions();
    if presses.dimensions() != (n_rows, n_cols) {
        return Err(LightsOffError::DimensionMismatch {
            expected: (n_rows, n_cols),
            found: presses.dimensions(),
        });
    }

    for row in 0..n_rows {
        for col in 0..n_cols {
            if presses.get(row, col) {
                for index in press_footprint(row, col, n_rows, n_cols) {
                    field.xor_toggle(index / n_cols, index % n_cols, true);
                }
            }
        }
    }

    Ok(())
}

/// The field that results from pressing `presses` on a copy of `field`
pub fn pressed(field: &BitMatrix, presses: &BitMatrix) -> Result<BitMatrix, LightsOffError> {
    let mut result = field.clone();
    apply_presses(&mut result, presses)?;
    Ok(result)
}

/// True when pressing `presses` switches every light of `field` off
pub fn verify(field: &BitMatrix, presses: &BitMatrix) -> Result<bool, LightsOffError> {
    Ok(pressed(field, presses)?.is_zero())
}

/// Reshape a solution vector indexed `r * cols + c` into a press grid
pub fn presses_from_solution(
    solution: &crate::bits::BitVector,
    n_rows: usize,
    n_cols: usize,
) -> Result<BitMatrix, LightsOffError> {
    if solution.len() != n_rows * n_cols {
        return Err(LightsOffError::DimensionMismatch {
            expected: (n_rows, n_cols),
            found: (1, solution.len()),
        });
    }

    let mut presses = BitMatrix::new(n_rows, n_cols)?;
    for row in 0..n_rows {
        for col in 0..n_cols {
            if solution.get(row * n_cols + col) {
                presses.set(row, col, true);
            }
        }
    }
    Ok(presses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::BitVector;

    fn field(text: &str) -> BitMatrix {
        BitMatrix::parse(text).unwrap()
    }

    #[test]
    fn test_cell_index() {
        assert_eq!(cell_index(0, 0, 2, 3), Some(0));
        assert_eq!(cell_index(1, 2, 2, 3), Some(5));
        assert_eq!(cell_index(-1, 0, 2, 3), None);
        assert_eq!(cell_index(0, 3, 2, 3), None);
        assert_eq!(cell_index(2, 0, 2, 3), None);
    }

    #[test]
    fn test_system_for_single_row() {
        let system = build_system(&field("101\n")).unwrap();
        assert_eq!(system.to_string(), "1101\n1110\n0111\n");
    }

    #[test]
    fn test_system_for_two_by_two() {
        let system = build_system(&field("10\n01\n")).unwrap();
        assert_eq!(system.to_string(), "11101\n11010\n10110\n01111\n");
    }

    #[test]
    fn test_system_is_symmetric() {
        for (rows, cols) in [(1, 1), (1, 4), (3, 3), (4, 5), (6, 2)] {
            let system = build_system(&all_lit(rows, cols).unwrap()).unwrap();
            let n = rows * cols;
            for a in 0..n {
                for b in 0..n {
                    assert_eq!(system.get(a, b), system.get(b, a), "{rows}x{cols} at ({a}, {b})");
                }
                assert!(system.get(a, n));
            }
        }
    }

    #[test]
    fn test_apply_single_press() {
        let mut grid = BitMatrix::new(3, 3).unwrap();
        apply_presses(&mut grid, &field("000\n010\n000\n")).unwrap();
        assert_eq!(grid.to_string(), "010\n111\n010\n");

        let mut grid = BitMatrix::new(3, 3).unwrap();
        apply_presses(&mut grid, &field("100\n000\n000\n")).unwrap();
        assert_eq!(grid.to_string(), "110\n100\n000\n");
    }

    #[test]
    fn test_presses_accumulate() {
        let mut grid = BitMatrix::new(1, 3).unwrap();
        apply_presses(&mut grid, &field("110\n")).unwrap();
        assert_eq!(grid.to_string(), "001\n");
    }

    #[test]
    fn test_zero_presses_are_identity() {
        for text in ["1\n", "010\n111\n010\n", "1011\n0110\n", "00000\n11111\n"] {
            let original = field(text);
            let zero = BitMatrix::new(original.n_rows(), original.n_cols()).unwrap();
            assert_eq!(pressed(&original, &zero).unwrap(), original);
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut grid = BitMatrix::new(2, 2).unwrap();
        let presses = BitMatrix::new(2, 3).unwrap();
        assert!(matches!(
            apply_presses(&mut grid, &presses),
            Err(LightsOffError::DimensionMismatch {
                expected: (2, 2),
                found: (2, 3)
            })
        ));
    }

    #[test]
    fn test_verify() {
        let plus = field("010\n111\n010\n");
        assert!(verify(&plus, &field("000\n010\n000\n")).unwrap());
        assert!(!verify(&plus, &field("000\n000\n000\n")).unwrap());
    }

    #[test]
    fn test_empty_field_rejected() {
        assert!(matches!(all_lit(0, 3), Err(LightsOffError::EmptyField)));
        assert!(matches!(
            build_system(&BitMatrix::with_cols(3)),
            Err(LightsOffError::EmptyField)
        ));
    }

    #[test]
    fn test_presses_from_solution() {
        let solution = BitVector::from_bit_str("100001").unwrap();
        let presses = presses_from_solution(&solution, 2, 3).unwrap();
        assert_eq!(presses.to_string(), "100\n001\n");
        assert!(presses_from_solution(&solution, 2, 2).is_err());
    }
}
