//! Genome encoding and the random operations that explore it.
//!
//! A genome is a flat gene sequence; each gene indexes the instruction
//! vocabulary by value. Fresh genomes are built depth-aware so they always
//! decode to a structurally valid program. Mutants carry no such guarantee
//! and are re-validated by the caller.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{GenomeConfig, MIN_GENOME_LENGTH};
use crate::vm::{self, DecodeError, Instruction, Program, VOCABULARY};

/// Integer-sequence encoding of a candidate program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genome(Vec<u8>);

impl Genome {
    /// Wrap a raw gene sequence.
    pub fn new(genes: Vec<u8>) -> Self {
        Self(genes)
    }

    /// The raw gene sequence.
    #[inline]
    pub fn genes(&self) -> &[u8] {
        &self.0
    }

    /// Number of genes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the genome holds no genes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode every gene into its instruction.
    pub fn decode(&self) -> Result<Program, DecodeError> {
        self.0
            .iter()
            .map(|&gene| Instruction::from_gene(gene))
            .collect()
    }

    /// Whether the decoded program is structurally valid.
    ///
    /// Genes outside the vocabulary count as invalid rather than an error;
    /// the search treats such genomes like any other dead end.
    pub fn is_structurally_valid(&self) -> bool {
        match self.decode() {
            Ok(program) => vm::is_structurally_valid(&program),
            Err(_) => false,
        }
    }
}

impl From<Vec<u8>> for Genome {
    fn from(genes: Vec<u8>) -> Self {
        Self(genes)
    }
}

/// Random number generator wrapper for genome operations.
pub struct GenomeRng {
    rng: StdRng,
}

impl GenomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// One random source gene.
    fn source_gene(&mut self) -> u8 {
        self.rng.gen_range(1..=3)
    }

    /// One random operator gene.
    fn operator_gene(&mut self) -> u8 {
        self.rng.gen_range(4..=7)
    }

    /// One random gene from the full vocabulary.
    fn any_gene(&mut self) -> u8 {
        self.rng.gen_range(0..VOCABULARY.len() as u8)
    }

    /// Generate a fresh genome, structurally valid by construction.
    ///
    /// Opens with two source genes, then draws from the full vocabulary
    /// while tracking stack depth. Sources are appended only below the push
    /// slot cap and while enough budget remains to close every open value;
    /// drawing stops the moment depth returns to one. Whatever is still
    /// open afterwards is closed with random operator genes. A `max_length`
    /// below three is treated as three, the shortest closed program.
    pub fn generate(&mut self, config: &GenomeConfig) -> Genome {
        let max_length = config.max_length.max(MIN_GENOME_LENGTH);
        let mut genes = Vec::with_capacity(max_length);
        let mut depth: usize = 0;

        for _ in 0..2 {
            genes.push(self.source_gene());
            depth += 1;
        }

        for _ in 2..max_length {
            // Closing the open values takes depth - 1 operators.
            if genes.len() + depth - 1 >= max_length {
                break;
            }
            let gene = self.any_gene();
            match VOCABULARY[gene as usize] {
                Instruction::Nop => genes.push(gene),
                Instruction::Push(_) => {
                    if depth < config.push_slot_cap && genes.len() + depth + 1 <= max_length {
                        genes.push(gene);
                        depth += 1;
                    }
                }
                Instruction::Math(_) => {
                    genes.push(gene);
                    depth -= 1;
                    if depth == 1 {
                        break;
                    }
                }
            }
        }

        while depth > 1 {
            genes.push(self.operator_gene());
            depth -= 1;
        }

        Genome(genes)
    }

    /// Mutate a genome into a new one; the input is never modified.
    ///
    /// Applies, in order: a rare append of one random gene, a rare removal
    /// of the last gene, and one point replacement at a uniformly random
    /// position of the possibly resized genome. The first two positions are
    /// replaced with source genes, every other position with a gene from
    /// the full vocabulary. The result may be structurally invalid; the
    /// caller decides what survives.
    pub fn mutate(&mut self, genome: &Genome, config: &GenomeConfig) -> Genome {
        let mut genes = genome.genes().to_vec();

        if self.rng.gen_bool(config.grow_probability) {
            genes.push(self.any_gene());
        }
        if self.rng.gen_bool(config.shrink_probability) {
            genes.pop();
        }

        if !genes.is_empty() {
            let index = self.rng.gen_range(0..genes.len());
            genes[index] = if index < 2 {
                self.source_gene()
            } else {
                self.any_gene()
            };
        }

        Genome(genes)
    }
}
