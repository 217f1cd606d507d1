use crate::engines::generation::genome::{gene_key, Chromosome};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EliteChromosome {
    pub chromosome: Chromosome,
    pub fitness: f64,
    pub generation: usize,          // First generation it was seen in
    pub canonical_string: String,   // For deduplication
}

impl EliteChromosome {
    pub fn new(chromosome: Chromosome, fitness: f64, generation: usize) -> Self {
        let canonical_string = get_canonical_string(&chromosome);
        Self {
            chromosome,
            fitness,
            generation,
            canonical_string,
        }
    }
}

pub struct HallOfFame {
    entries: Vec<EliteChromosome>,
    max_size: usize,
    seen_signatures: HashSet<String>,
}

impl HallOfFame {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_size,
            seen_signatures: HashSet::new(),
        }
    }

    /// Attempt to add a chromosome to the Hall of Fame
    pub fn try_add(&mut self, entry: EliteChromosome) -> bool {
        if self.max_size == 0 {
            return false;
        }

        if self.seen_signatures.contains(&entry.canonical_string) {
            return false; // Duplicate, reject
        }

        // Full and not better than the current worst
        if self.entries.len() >= self.max_size {
            if let Some(worst) = self.entries.last() {
                if entry.fitness <= worst.fitness {
                    return false;
                }
            }
        }

        self.seen_signatures.insert(entry.canonical_string.clone());
        self.entries.push(entry);
        self.sort_and_trim();

        true
    }

    fn sort_and_trim(&mut self) {
        // Sort by fitness (descending), stable so earlier finds win ties
        self.entries.sort_by(|a, b| {
            b.fitness.partial_cmp(&a.fitness).unwrap_or(std::cmp::Ordering::Equal)
        });

        while self.entries.len() > self.max_size {
            if let Some(removed) = self.entries.pop() {
                self.seen_signatures.remove(&removed.canonical_string);
            }
        }
    }

    pub fn get_all(&self) -> &[EliteChromosome] {
        &self.entries
    }

    /// Get top N entries
    pub fn get_top_n(&self, n: usize) -> &[EliteChromosome] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Filter by minimum fitness threshold
    pub fn filter_by_threshold(&self, min_fitness: f64) -> Vec<EliteChromosome> {
        self.entries
            .iter()
            .filter(|e| e.fitness >= min_fitness)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonical string for deduplication: exact gene values, so 0.5 and
/// 0.5000001 are distinct melodies while -0.0 and 0.0 are not.
pub fn get_canonical_string(chromosome: &[f64]) -> String {
    chromosome
        .iter()
        .map(|g| format!("{:016x}", gene_key(*g)))
        .collect::<Vec<_>>()
        .join(":")
}
