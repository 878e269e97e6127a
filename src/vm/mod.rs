//! Stack machine - instruction set and single-pass evaluator.

mod isa;
mod machine;

pub use isa::*;
pub use machine::*;
