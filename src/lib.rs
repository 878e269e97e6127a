//! Evolutionary synthesis of stack-machine arithmetic programs.
//!
//! This crate searches the space of short instruction sequences for one
//! that reproduces a target input/output mapping given as a fixed set of
//! example tests. Programs run on a minimal stack machine: three named
//! input slots, four arithmetic operators, no branching.
//!
//! # Architecture
//!
//! - [`schema`]: configuration and test-suite types
//! - [`vm`]: the instruction set and the stack evaluator
//! - [`search`]: genome encoding, mutation and the generation loop
//!
//! # Example
//!
//! ```rust
//! use stack_evolve::schema::{SearchConfig, TestCase};
//! use stack_evolve::search::{SearchEngine, SearchOutcome};
//! use stack_evolve::vm::disassemble;
//!
//! // Target mapping: a + b
//! let suite = vec![
//!     TestCase::new(1.0, 2.0, 0.0, 3.0),
//!     TestCase::new(4.0, 5.0, 0.0, 9.0),
//! ];
//!
//! let config = SearchConfig {
//!     random_seed: Some(7),
//!     ..SearchConfig::default()
//! };
//! let mut engine = SearchEngine::new(config, suite).expect("valid config");
//!
//! match engine.run().outcome {
//!     SearchOutcome::Found { program, generation } => {
//!         println!("generation {generation}: {}", disassemble(&program));
//!     }
//!     SearchOutcome::Exhausted => println!("no program found"),
//! }
//! ```

pub mod schema;
pub mod search;
pub mod vm;

// Re-export commonly used types
pub use schema::{ConfigError, GenomeConfig, RunConfig, SearchConfig, TestCase};
pub use search::{Genome, GenomeRng, SearchEngine, SearchOutcome, SearchResult};
pub use vm::{ExecError, Instruction, Operator, Program, Slot, execute};
