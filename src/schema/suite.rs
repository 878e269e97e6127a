//! Test cases the searched-for program must reproduce.

use serde::{Deserialize, Serialize};

/// One labeled example: an input tuple and the output a passing program
/// must produce for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Values of the input slots a, b and c.
    pub inputs: [f64; 3],
    /// Required output, compared exactly.
    pub expected: f64,
}

impl TestCase {
    /// Build a case from slot values and the expected output.
    pub fn new(a: f64, b: f64, c: f64, expected: f64) -> Self {
        Self {
            inputs: [a, b, c],
            expected,
        }
    }
}

/// Canonical suite for the target `a * b * c`.
pub fn product_suite() -> Vec<TestCase> {
    vec![
        TestCase::new(1.0, 1.0, 1.0, 1.0),
        TestCase::new(2.0, 2.0, 2.0, 8.0),
        TestCase::new(3.0, 3.0, 3.0, 27.0),
        TestCase::new(4.0, 4.0, 4.0, 64.0),
    ]
}

/// Canonical suite for the target `a + b * c`.
pub fn sum_product_suite() -> Vec<TestCase> {
    vec![
        TestCase::new(1.0, 1.0, 1.0, 2.0),
        TestCase::new(2.0, 3.0, 3.0, 11.0),
        TestCase::new(3.0, 1.0, 3.0, 6.0),
        TestCase::new(4.0, 2.0, 4.0, 12.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::{Instruction, execute};

    fn program(genes: &[u8]) -> Vec<Instruction> {
        genes
            .iter()
            .map(|&gene| Instruction::from_gene(gene).unwrap())
            .collect()
    }

    #[test]
    fn test_product_suite_matches_its_target() {
        let target = program(&[1, 2, 3, 6, 6]);
        for case in product_suite() {
            assert_eq!(execute(&target, case.inputs), Ok(case.expected));
        }
    }

    #[test]
    fn test_sum_product_suite_matches_its_target() {
        let target = program(&[1, 2, 3, 6, 4]);
        for case in sum_product_suite() {
            assert_eq!(execute(&target, case.inputs), Ok(case.expected));
        }
    }

    #[test]
    fn test_case_serialization() {
        let case = TestCase::new(2.0, 3.0, 3.0, 11.0);
        let json = serde_json::to_string(&case).unwrap();
        let parsed: TestCase = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, case);
    }
}
