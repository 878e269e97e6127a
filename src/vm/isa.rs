//! Instruction set for the stack machine.
//!
//! Programs are flat sequences over a closed eight-entry vocabulary: a no-op,
//! three source instructions that push one of the named input slots, and four
//! binary arithmetic operators. Genes index this vocabulary by position.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A decoded instruction sequence.
pub type Program = Vec<Instruction>;

/// Named input slot a source instruction reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    A,
    B,
    C,
}

impl Slot {
    /// Position of this slot in an input tuple.
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Slot::A => 0,
            Slot::B => 1,
            Slot::C => 2,
        }
    }
}

/// Binary arithmetic operator applied to the top two stack values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// One instruction of the closed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// Inert filler with no stack effect.
    Nop,
    /// Push the value of one input slot.
    Push(Slot),
    /// Pop two values, combine them, push the result.
    Math(Operator),
}

/// The full gene vocabulary, indexed by gene value.
pub const VOCABULARY: [Instruction; 8] = [
    Instruction::Nop,
    Instruction::Push(Slot::A),
    Instruction::Push(Slot::B),
    Instruction::Push(Slot::C),
    Instruction::Math(Operator::Add),
    Instruction::Math(Operator::Subtract),
    Instruction::Math(Operator::Multiply),
    Instruction::Math(Operator::Divide),
];

/// Decode error for gene values outside the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Gene {0} does not index any instruction in the vocabulary")]
    UnknownGene(u8),
}

impl Instruction {
    /// Decode one gene into its instruction.
    pub fn from_gene(gene: u8) -> Result<Self, DecodeError> {
        VOCABULARY
            .get(gene as usize)
            .copied()
            .ok_or(DecodeError::UnknownGene(gene))
    }

    /// The gene this instruction decodes from.
    pub fn gene(&self) -> u8 {
        match self {
            Instruction::Nop => 0,
            Instruction::Push(Slot::A) => 1,
            Instruction::Push(Slot::B) => 2,
            Instruction::Push(Slot::C) => 3,
            Instruction::Math(Operator::Add) => 4,
            Instruction::Math(Operator::Subtract) => 5,
            Instruction::Math(Operator::Multiply) => 6,
            Instruction::Math(Operator::Divide) => 7,
        }
    }

    /// Assembly-style name.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Nop => "nop",
            Instruction::Push(Slot::A) => "push-a",
            Instruction::Push(Slot::B) => "push-b",
            Instruction::Push(Slot::C) => "push-c",
            Instruction::Math(Operator::Add) => "add",
            Instruction::Math(Operator::Subtract) => "subtract",
            Instruction::Math(Operator::Multiply) => "multiply",
            Instruction::Math(Operator::Divide) => "divide",
        }
    }
}

impl TryFrom<u8> for Instruction {
    type Error = DecodeError;

    fn try_from(gene: u8) -> Result<Self, Self::Error> {
        Instruction::from_gene(gene)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Render a program as space-separated mnemonics.
pub fn disassemble(program: &[Instruction]) -> String {
    program
        .iter()
        .map(|instruction| instruction.mnemonic())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Structural validity, decided by simulating stack depth over the whole
/// sequence.
///
/// Valid programs leave exactly one value on the stack. Every operator must
/// see two live values before it applies; a no-op changes nothing. This rules
/// out underflow and malformed results for any input tuple, but not runtime
/// division by zero.
pub fn is_structurally_valid(program: &[Instruction]) -> bool {
    let mut depth: usize = 0;

    for instruction in program {
        match instruction {
            Instruction::Nop => {}
            Instruction::Push(_) => depth += 1,
            Instruction::Math(_) => {
                if depth < 2 {
                    return false;
                }
                depth -= 1;
            }
        }
    }

    depth == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_decodes_in_order() {
        for (gene, instruction) in VOCABULARY.iter().enumerate() {
            let decoded = Instruction::from_gene(gene as u8).unwrap();
            assert_eq!(decoded, *instruction);
            assert_eq!(decoded.gene(), gene as u8);
        }
        assert_eq!(Instruction::from_gene(1), Ok(Instruction::Push(Slot::A)));
        assert_eq!(
            Instruction::from_gene(7),
            Ok(Instruction::Math(Operator::Divide))
        );
    }

    #[test]
    fn test_unknown_gene_rejected() {
        assert_eq!(Instruction::from_gene(8), Err(DecodeError::UnknownGene(8)));
        assert_eq!(
            Instruction::from_gene(255),
            Err(DecodeError::UnknownGene(255))
        );
        assert!(Instruction::try_from(42u8).is_err());
    }

    #[test]
    fn test_two_pushes_leave_two_values() {
        let program = vec![Instruction::Push(Slot::A), Instruction::Push(Slot::B)];
        assert!(!is_structurally_valid(&program));
    }

    #[test]
    fn test_push_push_add_is_valid() {
        let program = vec![
            Instruction::Push(Slot::A),
            Instruction::Push(Slot::B),
            Instruction::Math(Operator::Add),
        ];
        assert!(is_structurally_valid(&program));
    }

    #[test]
    fn test_operator_needs_two_live_values() {
        // Net depth reaches one, but the first add fires with one value live.
        let program = vec![
            Instruction::Push(Slot::A),
            Instruction::Math(Operator::Add),
            Instruction::Push(Slot::B),
            Instruction::Push(Slot::C),
            Instruction::Math(Operator::Add),
        ];
        assert!(!is_structurally_valid(&program));
    }

    #[test]
    fn test_empty_program_is_invalid() {
        assert!(!is_structurally_valid(&[]));
        assert!(!is_structurally_valid(&[Instruction::Nop]));
    }

    #[test]
    fn test_nops_do_not_affect_validity() {
        let program = vec![
            Instruction::Nop,
            Instruction::Push(Slot::C),
            Instruction::Nop,
            Instruction::Push(Slot::C),
            Instruction::Math(Operator::Multiply),
            Instruction::Nop,
        ];
        assert!(is_structurally_valid(&program));
    }

    #[test]
    fn test_disassemble() {
        let program = vec![
            Instruction::Push(Slot::A),
            Instruction::Push(Slot::B),
            Instruction::Math(Operator::Add),
        ];
        assert_eq!(disassemble(&program), "push-a push-b add");
        assert_eq!(format!("{}", Instruction::Nop), "nop");
    }
}
