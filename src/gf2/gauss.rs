//! Gaussian elimination over GF(2) and minimum-weight back-substitution

use super::{ProgressSink, StopCondition};
use crate::bits::{BitMatrix, BitVector, WORD_BITS};
use crate::error::SolveError;
use tracing::debug;

/// Message reported after each eliminated column
pub const ELIMINATION_MESSAGE: &str = "Gaussing system";

/// Solves an augmented system of `n_rows` equations over `n_cols - 1`
/// boolean unknowns. The last column holds the right-hand side.
#[derive(Debug, Clone)]
pub struct GaussSolver {
    system: BitMatrix,
    pivots: Vec<usize>,
    free: Vec<usize>,
    eliminated: bool,
}

impl GaussSolver {
    /// Take ownership of an augmented system.
    ///
    /// # Panics
    /// Panics if the system has no right-hand-side column.
    pub fn new(system: BitMatrix) -> Self {
        assert!(
            system.n_cols() >= 1,
            "augmented system needs a right-hand-side column"
        );
        Self {
            system,
            pivots: Vec::new(),
            free: Vec::new(),
            eliminated: false,
        }
    }

    /// The system in its current (possibly reduced) form
    pub fn system(&self) -> &BitMatrix {
        &self.system
    }

    pub fn into_system(self) -> BitMatrix {
        self.system
    }

    /// Number of unknowns
    pub fn n_vars(&self) -> usize {
        self.system.n_cols() - 1
    }

    /// Number of pivot columns found by the last elimination
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// Pivot column of each of the first `rank` rows
    pub fn pivot_columns(&self) -> &[usize] {
        &self.pivots
    }

    /// Columns without a pivot, in increasing order
    pub fn free_columns(&self) -> &[usize] {
        &self.free
    }

    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    /// Reduce the system to reduced row-echelon form and return its rank
    pub fn eliminate(&mut self) -> usize {
        self.eliminate_with(&mut super::NoProgress)
    }

    /// Reduce the system, reporting progress after every column.
    ///
    /// For column `c`, the first row at or below the next pivot position with
    /// bit `c` set is swapped into that position and XORed into every other
    /// row with bit `c` set. Columns with no such row are free. Running this
    /// on an already reduced system changes nothing.
    pub fn eliminate_with<P: ProgressSink + ?Sized>(&mut self, progress: &mut P) -> usize {
        let n_rows = self.system.n_rows();
        let n_vars = self.n_vars();

        self.pivots.clear();
        self.free.clear();

        for col in 0..n_vars {
            let next = self.pivots.len();
            let pivot = (next..n_rows).find(|&row| self.system.get(row, col));

            match pivot {
                Some(row) => {
                    self.system.swap_rows(next, row);
                    for other in 0..n_rows {
                        if other != next && self.system.get(other, col) {
                            self.system.xor_rows(other, next);
                        }
                    }
                    self.pivots.push(col);
                }
                None => self.free.push(col),
            }

            progress.report(ELIMINATION_MESSAGE, ((col + 1) * 100 / n_vars) as u32);
        }

        self.eliminated = true;
        debug!(
            rows = n_rows,
            vars = n_vars,
            rank = self.rank(),
            free = self.free.len(),
            "eliminated system"
        );
        self.rank()
    }

    /// True when no row past the rank demands `0 = 1`
    pub fn is_consistent(&self) -> bool {
        self.assert_eliminated();
        let rhs = self.n_vars();
        (self.rank()..self.system.n_rows()).all(|row| !self.system.get(row, rhs))
    }

    /// Find the solution with the fewest set bits.
    ///
    /// Returns `Ok(None)` when the system is inconsistent. With `free` free
    /// variables, all `2^free` assignments are tried in increasing order of
    /// their bit pattern, and the first one of minimum weight wins. `stop` is
    /// polled once per assignment.
    ///
    /// # Panics
    /// Panics if the system has not been eliminated.
    pub fn minimum_weight_solution(
        &self,
        stop: &StopCondition,
    ) -> Result<Option<BitVector>, SolveError> {
        if !self.is_consistent() {
            debug!(rank = self.rank(), "system is inconsistent");
            return Ok(None);
        }

        let n_vars = self.n_vars();
        let rank = self.rank();
        let n_free = self.free.len();
        let mut solution = BitVector::new(n_vars)?;

        if n_free == 0 {
            for (row, &col) in self.pivots.iter().enumerate() {
                solution.set(col, self.system.get(row, n_vars));
            }
            return Ok(Some(solution));
        }

        if n_free >= WORD_BITS {
            return Err(SolveError::SearchSpaceTooLarge { free: n_free });
        }

        let n_assignments = 1u64 << n_free;
        debug!(free = n_free, assignments = n_assignments, "searching minimum weight solution");

        let mut rest = BitVector::new(n_free)?;
        let mut sum = BitVector::new(rank)?;
        let sum_words = sum.word_count();
        let mut min_weight = usize::MAX;

        for assignment in 0..n_assignments {
            stop.check()?;

            rest.words_mut()[0] = assignment;
            sum.clear(sum_words);

            for row in 0..rank {
                let equation = self.system.row(row);
                for (k, &col) in self.free.iter().enumerate() {
                    if rest.get(k) {
                        sum.xor_toggle(row, equation.get(col));
                    }
                }
                sum.xor_toggle(row, equation.get(n_vars));
            }

            let weight = rest.count_ones(1) + sum.count_ones(sum_words);
            if weight < min_weight {
                min_weight = weight;
                for (row, &col) in self.pivots.iter().enumerate() {
                    solution.set(col, sum.get(row));
                }
                for (k, &col) in self.free.iter().enumerate() {
                    solution.set(col, rest.get(k));
                }
            }
        }

        debug!(weight = min_weight, "minimum weight solution found");
        Ok(Some(solution))
    }

    /// Eliminate, then search. Returns the rank alongside the solution.
    pub fn solve<P: ProgressSink + ?Sized>(
        &mut self,
        progress: &mut P,
        stop: &StopCondition,
    ) -> Result<(usize, Option<BitVector>), SolveError> {
        let rank = self.eliminate_with(progress);
        let solution = self.minimum_weight_solution(stop)?;
        Ok((rank, solution))
    }

    fn assert_eliminated(&self) {
        assert!(self.eliminated, "system must be eliminated first");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gf2::{NoProgress, ProgressSink};

    fn solver(text: &str) -> GaussSolver {
        GaussSolver::new(BitMatrix::parse(text).unwrap())
    }

    /// Checks `solution` against the original system
    fn satisfies(system: &BitMatrix, solution: &BitVector) -> bool {
        let n_vars = system.n_cols() - 1;
        system.rows().all(|row| {
            let lhs = (0..n_vars).fold(false, |acc, col| acc ^ (row.get(col) & solution.get(col)));
            lhs == row.get(n_vars)
        })
    }

    #[test]
    fn test_anti_diagonal_system() {
        let mut gauss = solver("0011\n0101\n1001\n");
        assert_eq!(gauss.eliminate(), 3);
        assert_eq!(gauss.system().to_string(), "1001\n0101\n0011\n");
        assert!(gauss.free_columns().is_empty());

        let solution = gauss
            .minimum_weight_solution(&StopCondition::none())
            .unwrap()
            .unwrap();
        assert_eq!(solution.to_string(), "111");
    }

    #[test]
    fn test_inconsistent_system() {
        // x0 ^ x1 = 1, x0 ^ x1 = 0
        let mut gauss = solver("111\n110\n");
        assert_eq!(gauss.eliminate(), 1);
        assert!(!gauss.is_consistent());
        assert!(gauss
            .minimum_weight_solution(&StopCondition::none())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_zero_solution_is_not_absent() {
        let mut gauss = solver("100\n010\n");
        gauss.eliminate();
        let solution = gauss
            .minimum_weight_solution(&StopCondition::none())
            .unwrap()
            .unwrap();
        assert_eq!(solution.weight(), 0);
        assert_eq!(solution.len(), 2);
    }

    #[test]
    fn test_minimum_weight_with_free_variables() {
        // x0 ^ x1 ^ x2 = 1 has weight-1 solutions; the first found is x0.
        let mut gauss = solver("1111\n");
        let (rank, solution) = gauss.solve(&mut NoProgress, &StopCondition::none()).unwrap();
        assert_eq!(rank, 1);
        assert_eq!(gauss.free_columns(), &[1, 2]);
        assert_eq!(solution.unwrap().to_string(), "100");
    }

    #[test]
    fn test_minimum_weight_prefers_free_variables() {
        // x0 ^ x1 ^ x2 = 0 and x0 = x3; pressing nothing is optimal.
        let mut gauss = solver("11100\n10010\n");
        let (_, solution) = gauss.solve(&mut NoProgress, &StopCondition::none()).unwrap();
        assert_eq!(solution.unwrap().weight(), 0);
    }

    #[test]
    fn test_weight_is_minimal_exhaustively() {
        let original = BitMatrix::parse("110101\n011011\n101110\n").unwrap();
        let mut gauss = GaussSolver::new(original.clone());
        let (rank, solution) = gauss.solve(&mut NoProgress, &StopCondition::none()).unwrap();
        let solution = solution.unwrap();
        assert!(satisfies(&original, &solution));

        let n_vars = original.n_cols() - 1;
        let mut valid = 0;
        for pattern in 0u64..(1 << n_vars) {
            let mut candidate = BitVector::new(n_vars).unwrap();
            candidate.words_mut()[0] = pattern;
            if satisfies(&original, &candidate) {
                valid += 1;
                assert!(solution.weight() <= candidate.weight());
            }
        }
        assert_eq!(valid, 1 << (n_vars - rank));
    }

    #[test]
    fn test_non_trailing_free_column() {
        // Column 0 has no pivot; the solver must still pair rows and pivots.
        let original = BitMatrix::parse("0101\n0011\n").unwrap();
        let mut gauss = GaussSolver::new(original.clone());
        let (rank, solution) = gauss.solve(&mut NoProgress, &StopCondition::none()).unwrap();
        assert_eq!(rank, 2);
        assert_eq!(gauss.pivot_columns(), &[1, 2]);
        assert_eq!(gauss.free_columns(), &[0]);
        let solution = solution.unwrap();
        assert!(satisfies(&original, &solution));
        assert_eq!(solution.to_string(), "011");
    }

    #[test]
    fn test_elimination_is_idempotent() {
        let mut gauss = solver("1101\n0111\n1010\n0110\n");
        let rank = gauss.eliminate();
        let reduced = gauss.system().clone();

        let mut again = GaussSolver::new(reduced.clone());
        assert_eq!(again.eliminate(), rank);
        assert_eq!(again.system(), &reduced);

        assert_eq!(gauss.eliminate(), rank);
        assert_eq!(gauss.system(), &reduced);
    }

    #[test]
    fn test_rank_bounds() {
        for text in ["1\n", "01\n", "001\n001\n001\n", "1111\n1111\n", "10\n01\n11\n"] {
            let mut gauss = solver(text);
            let rank = gauss.eliminate();
            let n_rows = gauss.system().n_rows();
            assert!(rank <= n_rows.min(gauss.n_vars()), "rank {rank} for {text:?}");
        }
    }

    #[test]
    fn test_progress_reports_each_column() {
        struct Recorder(Vec<(String, u32)>);
        impl ProgressSink for Recorder {
            fn report(&mut self, message: &str, percent: u32) {
                self.0.push((message.to_string(), percent));
            }
        }

        let mut recorder = Recorder(Vec::new());
        let mut gauss = solver("10001\n01001\n00101\n00011\n");
        gauss.eliminate_with(&mut recorder);
        let percents: Vec<u32> = recorder.0.iter().map(|(_, p)| *p).collect();
        assert_eq!(percents, vec![25, 50, 75, 100]);
        assert!(recorder.0.iter().all(|(m, _)| m == ELIMINATION_MESSAGE));
    }

    #[test]
    fn test_search_honours_stop_condition() {
        let mut gauss = solver("1111\n");
        gauss.eliminate();
        let stop = StopCondition::with_timeout(std::time::Duration::ZERO);
        assert!(matches!(
            gauss.minimum_weight_solution(&stop),
            Err(SolveError::TimedOut { .. })
        ));
    }

    #[test]
    fn test_search_space_limit() {
        let mut system = BitMatrix::new(1, 66).unwrap();
        system.set(0, 0, true);
        let mut gauss = GaussSolver::new(system);
        gauss.eliminate();
        assert_eq!(gauss.free_columns().len(), 64);
        assert!(matches!(
            gauss.minimum_weight_solution(&StopCondition::none()),
            Err(SolveError::SearchSpaceTooLarge { free: 64 })
        ));
    }

    #[test]
    #[should_panic(expected = "eliminated first")]
    fn test_search_requires_elimination() {
        let gauss = solver("11\n");
        let _ = gauss.minimum_weight_solution(&StopCondition::none());
    }
}
