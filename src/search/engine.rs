//! The generation loop that drives the search.

use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use serde::{Deserialize, Serialize};

use crate::schema::{ConfigError, SearchConfig, TestCase};
use crate::vm::{self, Program, disassemble};

use super::evaluator;
use super::genome::{Genome, GenomeRng};

/// Default attempt budget for the generate-and-test strategy.
pub const DEFAULT_RANDOM_ATTEMPTS: usize = 100;

/// Current phase of a search run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// Seeding the population.
    #[default]
    Initializing,
    /// Scanning the population against the test suite.
    Evaluating,
    /// A passing program was returned.
    Succeeded,
    /// The generation budget ran out.
    Exhausted,
}

/// Progress snapshot reported to the run callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchProgress {
    /// Generation currently being worked on (0-based).
    pub generation: usize,
    /// Total generations budgeted.
    pub total_generations: usize,
    /// Evaluator invocations so far.
    pub evaluations: u64,
    /// Current phase.
    pub phase: SearchPhase,
}

/// How a finished run ended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SearchOutcome {
    /// A program reproducing every test case.
    Found {
        /// The decoded winning program.
        program: Program,
        /// Generation that produced it. The random strategy reports the
        /// attempt index here instead.
        generation: usize,
    },
    /// Budget spent without success. Nothing partial is ever returned.
    Exhausted,
}

/// Final result of a search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Terminal outcome.
    pub outcome: SearchOutcome,
    /// Statistics from the run.
    pub stats: SearchStats,
}

/// Statistics from a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchStats {
    /// Generations (or attempts) whose evaluation ran.
    pub generations: usize,
    /// Evaluator invocations: structurally valid programs run against
    /// the suite.
    pub evaluations: u64,
    /// Invalid mutants replaced by fresh genomes.
    pub replacements: u64,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
}

/// Per-slot evaluation outcome.
enum SlotOutcome {
    /// Genome does not decode to a structurally valid program.
    Invalid,
    /// Valid program, but at least one test case missed.
    Miss,
    /// Valid program reproducing the whole suite.
    Pass(Program),
}

/// Decode, validate and evaluate one genome.
fn evaluate_slot(genome: &Genome, suite: &[TestCase]) -> SlotOutcome {
    let program = match genome.decode() {
        Ok(program) => program,
        Err(_) => return SlotOutcome::Invalid,
    };
    if !vm::is_structurally_valid(&program) {
        return SlotOutcome::Invalid;
    }
    if evaluator::passes_all(&program, suite) {
        SlotOutcome::Pass(program)
    } else {
        SlotOutcome::Miss
    }
}

/// Search engine that runs the evolutionary loop.
pub struct SearchEngine {
    config: SearchConfig,
    suite: Vec<TestCase>,
    rng: GenomeRng,
    population: Vec<Genome>,
    generation: usize,
    evaluations: u64,
    replacements: u64,
}

impl SearchEngine {
    /// Create a new engine, failing fast on contract misuse.
    pub fn new(config: SearchConfig, suite: Vec<TestCase>) -> Result<Self, ConfigError> {
        config.validate()?;
        if suite.is_empty() {
            return Err(ConfigError::EmptySuite);
        }

        let seed = config.random_seed.unwrap_or_else(rand::random);
        let rng = GenomeRng::new(seed);

        Ok(Self {
            config,
            suite,
            rng,
            population: Vec::new(),
            generation: 0,
            evaluations: 0,
            replacements: 0,
        })
    }

    /// Seed the population with freshly generated genomes.
    fn initialize(&mut self) {
        self.population.clear();
        self.generation = 0;
        self.evaluations = 0;
        self.replacements = 0;

        for _ in 0..self.config.population_size {
            let genome = self.rng.generate(&self.config.genome);
            self.population.push(genome);
        }
    }

    /// Evaluate every slot and return the first passing program in
    /// population order.
    #[cfg(feature = "parallel")]
    fn evaluate_population(&mut self) -> Option<Program> {
        let suite = &self.suite;
        let outcomes: Vec<SlotOutcome> = self
            .population
            .par_iter()
            .map(|genome| evaluate_slot(genome, suite))
            .collect();
        self.resolve(outcomes)
    }

    /// Evaluate every slot and return the first passing program in
    /// population order.
    #[cfg(not(feature = "parallel"))]
    fn evaluate_population(&mut self) -> Option<Program> {
        let suite = &self.suite;
        let outcomes: Vec<SlotOutcome> = self
            .population
            .iter()
            .map(|genome| evaluate_slot(genome, suite))
            .collect();
        self.resolve(outcomes)
    }

    /// Tally evaluator work and pick the winner. Scanning the collected
    /// outcomes in slot order keeps the winner identical no matter how the
    /// evaluations were scheduled.
    fn resolve(&mut self, outcomes: Vec<SlotOutcome>) -> Option<Program> {
        let mut winner = None;
        for outcome in outcomes {
            match outcome {
                SlotOutcome::Invalid => {}
                SlotOutcome::Miss => self.evaluations += 1,
                SlotOutcome::Pass(program) => {
                    self.evaluations += 1;
                    if winner.is_none() {
                        winner = Some(program);
                    }
                }
            }
        }
        winner
    }

    /// Replace every slot with its mutant, or with a fresh genome when the
    /// mutant is not structurally valid.
    fn reproduce(&mut self) {
        for i in 0..self.population.len() {
            let mutant = self.rng.mutate(&self.population[i], &self.config.genome);
            if mutant.is_structurally_valid() {
                self.population[i] = mutant;
            } else {
                self.population[i] = self.rng.generate(&self.config.genome);
                self.replacements += 1;
            }
        }
    }

    /// Snapshot current progress.
    fn progress(&self, phase: SearchPhase) -> SearchProgress {
        SearchProgress {
            generation: self.generation,
            total_generations: self.config.generation_count,
            evaluations: self.evaluations,
            phase,
        }
    }

    /// Run the search with a progress callback.
    ///
    /// The callback fires once after seeding, once per generation during
    /// evaluation, and once with the terminal phase. It observes the run
    /// and cannot affect termination.
    pub fn run_with_callback<F>(&mut self, callback: F) -> SearchResult
    where
        F: Fn(&SearchProgress),
    {
        let start_time = Instant::now();

        self.initialize();
        callback(&self.progress(SearchPhase::Initializing));

        let outcome = loop {
            if self.generation >= self.config.generation_count {
                log::info!(
                    "no program found within {} generations",
                    self.config.generation_count
                );
                break SearchOutcome::Exhausted;
            }

            callback(&self.progress(SearchPhase::Evaluating));
            log::debug!("evaluating generation {}", self.generation);

            if let Some(program) = self.evaluate_population() {
                log::info!(
                    "found program at generation {}: {}",
                    self.generation,
                    disassemble(&program)
                );
                break SearchOutcome::Found {
                    program,
                    generation: self.generation,
                };
            }

            self.generation += 1;
            if self.generation < self.config.generation_count {
                self.reproduce();
            }
        };

        let generations = match &outcome {
            SearchOutcome::Found { .. } => self.generation + 1,
            SearchOutcome::Exhausted => self.generation,
        };
        let terminal = match &outcome {
            SearchOutcome::Found { .. } => SearchPhase::Succeeded,
            SearchOutcome::Exhausted => SearchPhase::Exhausted,
        };
        callback(&self.progress(terminal));

        SearchResult {
            outcome,
            stats: SearchStats {
                generations,
                evaluations: self.evaluations,
                replacements: self.replacements,
                elapsed_seconds: start_time.elapsed().as_secs_f64(),
            },
        }
    }

    /// Run the search without progress reporting.
    pub fn run(&mut self) -> SearchResult {
        self.run_with_callback(|_| {})
    }
}

/// Generate-and-test baseline: up to `attempts` fresh genomes, no mutation.
///
/// Each attempt draws one genome and runs it against the suite. In the
/// returned outcome and stats the attempt index takes the place of the
/// generation index.
pub fn random_search(
    config: &SearchConfig,
    suite: &[TestCase],
    attempts: usize,
) -> Result<SearchResult, ConfigError> {
    config.genome.validate()?;
    if suite.is_empty() {
        return Err(ConfigError::EmptySuite);
    }

    let seed = config.random_seed.unwrap_or_else(rand::random);
    let mut rng = GenomeRng::new(seed);
    let start_time = Instant::now();
    let mut evaluations = 0u64;

    for attempt in 0..attempts {
        let genome = rng.generate(&config.genome);
        match evaluate_slot(&genome, suite) {
            SlotOutcome::Pass(program) => {
                evaluations += 1;
                log::info!(
                    "found program at attempt {}: {}",
                    attempt,
                    disassemble(&program)
                );
                return Ok(SearchResult {
                    outcome: SearchOutcome::Found {
                        program,
                        generation: attempt,
                    },
                    stats: SearchStats {
                        generations: attempt + 1,
                        evaluations,
                        replacements: 0,
                        elapsed_seconds: start_time.elapsed().as_secs_f64(),
                    },
                });
            }
            SlotOutcome::Miss => {
                evaluations += 1;
                log::debug!("attempt {}: tests failed", attempt);
            }
            SlotOutcome::Invalid => {}
        }
    }

    log::info!("no program found within {} attempts", attempts);
    Ok(SearchResult {
        outcome: SearchOutcome::Exhausted,
        stats: SearchStats {
            generations: attempts,
            evaluations,
            replacements: 0,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        },
    })
}
