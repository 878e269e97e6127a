//! Evolutionary search for programs that reproduce a test suite.
//!
//! The search keeps a fixed-size population of genomes. Every generation,
//! each genome is decoded and, when structurally valid, run against the
//! suite; the first passing program ends the run. Otherwise every slot is
//! replaced by its mutant, with invalid mutants swapped for freshly
//! generated genomes. There is no fitness score and no selection pressure;
//! progress comes from point mutations around survivors and the steady
//! stream of fresh genomes.
//!
//! # Example
//!
//! ```rust
//! use stack_evolve::schema::{SearchConfig, sum_product_suite};
//! use stack_evolve::search::{SearchEngine, SearchOutcome};
//! use stack_evolve::vm::disassemble;
//!
//! let config = SearchConfig {
//!     random_seed: Some(42),
//!     ..SearchConfig::default()
//! };
//! let mut engine = SearchEngine::new(config, sum_product_suite()).expect("valid config");
//!
//! match engine.run().outcome {
//!     SearchOutcome::Found { program, generation } => {
//!         println!("generation {generation}: {}", disassemble(&program));
//!     }
//!     SearchOutcome::Exhausted => println!("budget spent, no program found"),
//! }
//! ```

mod engine;
mod evaluator;
mod genome;

pub use engine::{
    DEFAULT_RANDOM_ATTEMPTS, SearchEngine, SearchOutcome, SearchPhase, SearchProgress,
    SearchResult, SearchStats, random_search,
};
pub use evaluator::{passes_all, passes_case};
pub use genome::{Genome, GenomeRng};
