//! Single-pass stack evaluator.

use super::isa::{Instruction, Operator};

/// Failure states of one execution.
///
/// Underflow and malformed results are structural and never occur for
/// programs that pass the validity check. Division by zero stays a runtime
/// failure either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExecError {
    #[error("Operator popped an empty stack")]
    StackUnderflow,
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Stack held {values} values after the last instruction, expected exactly one")]
    MalformedResult { values: usize },
}

/// Run a program against one input tuple.
///
/// Instructions execute strictly left to right; there is no branching. An
/// operator pops its right-hand operand first, then its left-hand operand,
/// and pushes `left OP right`.
pub fn execute(program: &[Instruction], inputs: [f64; 3]) -> Result<f64, ExecError> {
    let mut stack: Vec<f64> = Vec::with_capacity(4);

    for instruction in program {
        match instruction {
            Instruction::Nop => {}
            Instruction::Push(slot) => stack.push(inputs[slot.index()]),
            Instruction::Math(op) => {
                let rhs = stack.pop().ok_or(ExecError::StackUnderflow)?;
                let lhs = stack.pop().ok_or(ExecError::StackUnderflow)?;
                stack.push(apply(*op, lhs, rhs)?);
            }
        }
    }

    if stack.len() != 1 {
        return Err(ExecError::MalformedResult {
            values: stack.len(),
        });
    }
    Ok(stack[0])
}

/// Combine two operands, detecting division by zero before it happens.
fn apply(op: Operator, lhs: f64, rhs: f64) -> Result<f64, ExecError> {
    match op {
        Operator::Add => Ok(lhs + rhs),
        Operator::Subtract => Ok(lhs - rhs),
        Operator::Multiply => Ok(lhs * rhs),
        Operator::Divide => {
            if rhs == 0.0 {
                Err(ExecError::DivisionByZero)
            } else {
                Ok(lhs / rhs)
            }
        }
    }
}
