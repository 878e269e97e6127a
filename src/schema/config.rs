//! Configuration types for program-search runs.

use serde::{Deserialize, Serialize};

use super::TestCase;

/// Shortest structurally closed genome: two source genes and one operator.
pub const MIN_GENOME_LENGTH: usize = 3;

fn default_population_size() -> usize {
    20
}

fn default_generation_count() -> usize {
    100
}

fn default_max_length() -> usize {
    8
}

fn default_push_slot_cap() -> usize {
    3
}

fn default_grow_probability() -> f64 {
    0.02
}

fn default_shrink_probability() -> f64 {
    0.02
}

/// Top-level parameters for one search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of genomes held per generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,

    /// Generation budget. Zero is allowed and exhausts immediately.
    #[serde(default = "default_generation_count")]
    pub generation_count: usize,

    /// Genome shape and mutation-rate parameters.
    #[serde(default)]
    pub genome: GenomeConfig,

    /// Random seed for reproducibility. None draws one from entropy.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            generation_count: default_generation_count(),
            genome: GenomeConfig::default(),
            random_seed: None,
        }
    }
}

/// Genome shape and mutation-rate parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenomeConfig {
    /// Gene budget for freshly generated genomes.
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Most live stack values generation keeps open at once.
    #[serde(default = "default_push_slot_cap")]
    pub push_slot_cap: usize,

    /// Chance that a mutation appends one random gene.
    #[serde(default = "default_grow_probability")]
    pub grow_probability: f64,

    /// Chance that a mutation removes the last gene.
    #[serde(default = "default_shrink_probability")]
    pub shrink_probability: f64,
}

impl Default for GenomeConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            push_slot_cap: default_push_slot_cap(),
            grow_probability: default_grow_probability(),
            shrink_probability: default_shrink_probability(),
        }
    }
}

/// On-disk run description: search parameters plus the target test suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Search parameters.
    #[serde(default)]
    pub search: SearchConfig,

    /// Labeled examples the program must reproduce.
    pub suite: Vec<TestCase>,
}

impl SearchConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        self.genome.validate()
    }
}

impl GenomeConfig {
    /// Validate genome parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_length < MIN_GENOME_LENGTH {
            return Err(ConfigError::MaxLengthTooSmall {
                max_length: self.max_length,
            });
        }
        if self.push_slot_cap < 2 {
            return Err(ConfigError::PushSlotCapTooSmall {
                cap: self.push_slot_cap,
            });
        }
        for (name, value) in [
            ("grow_probability", self.grow_probability),
            ("shrink_probability", self.shrink_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be at least 1")]
    EmptyPopulation,

    #[error("Test suite must contain at least one case")]
    EmptySuite,

    #[error("Max genome length {max_length} is below the shortest closed program (3 genes)")]
    MaxLengthTooSmall { max_length: usize },

    #[error("Push slot cap {cap} is below the two opening source genes")]
    PushSlotCapTooSmall { cap: usize },

    #[error("{name} must lie within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
}
