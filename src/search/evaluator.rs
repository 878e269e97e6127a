//! Pass/fail evaluation of candidate programs against a test suite.

use crate::schema::TestCase;
use crate::vm::{self, Instruction};

/// Whether a program reproduces every case in the suite.
///
/// Cases are checked in order and the scan stops at the first miss. Any
/// execution failure counts as a miss for that case.
pub fn passes_all(program: &[Instruction], suite: &[TestCase]) -> bool {
    suite.iter().all(|case| passes_case(program, case))
}

/// Whether a program reproduces one case, compared exactly.
pub fn passes_case(program: &[Instruction], case: &TestCase) -> bool {
    match vm::execute(program, case.inputs) {
        Ok(value) => value == case.expected,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::product_suite;

    fn program(genes: &[u8]) -> Vec<Instruction> {
        genes
            .iter()
            .map(|&gene| Instruction::from_gene(gene).unwrap())
            .collect()
    }

    #[test]
    fn test_passing_program() {
        let product = program(&[1, 2, 3, 6, 6]);
        assert!(passes_all(&product, &product_suite()));
    }

    #[test]
    fn test_wrong_program_misses() {
        let sum = program(&[1, 2, 4]);
        assert!(!passes_all(&sum, &product_suite()));
    }

    #[test]
    fn test_execution_failure_counts_as_miss() {
        let quotient = program(&[1, 2, 7]);
        let case = TestCase::new(1.0, 0.0, 0.0, 1.0);
        assert!(!passes_case(&quotient, &case));
        assert!(!passes_all(&quotient, &[case]));
    }

    #[test]
    fn test_equality_is_exact() {
        let quotient = program(&[1, 2, 7]);
        let case = TestCase::new(1.0, 3.0, 0.0, 0.3333);
        assert!(!passes_case(&quotient, &case));
    }

    #[test]
    fn test_empty_suite_passes_trivially() {
        // Vacuously true; the search constructor rejects empty suites
        // before this can matter.
        let sum = program(&[1, 2, 4]);
        assert!(passes_all(&sum, &[]));
    }
}
