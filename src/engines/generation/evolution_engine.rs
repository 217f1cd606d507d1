use crate::config::evolution::SelectionMethod;
use crate::engines::generation::{
    genome::{Bounds, Chromosome},
    hall_of_fame::{EliteChromosome, HallOfFame},
    operators::{random_chromosome, roulette_selection, tournament_selection},
    policy::{CrossoverPolicy, FitnessFunction, MutationPolicy},
};
use crate::error::{MelodyError, Result};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// When a run stops. `max_generations` always applies; the others can end it early.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminationCondition {
    pub max_generations: usize,
    pub target_fitness: Option<f64>,
    pub stall_generations: Option<usize>,
}

impl TerminationCondition {
    pub fn generations(max_generations: usize) -> Self {
        Self {
            max_generations,
            target_fitness: None,
            stall_generations: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    MaxGenerations,
    TargetReached,
    Stalled,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub population_size: usize,
    pub termination: TerminationCondition,
    pub selection_method: SelectionMethod,
    pub tournament_size: usize,
    pub crossover_rate: f64,
    pub elitism_ratio: f64,
    pub bounds: Bounds,
    pub hall_of_fame_size: usize,
    pub parallel_evaluation: bool,
    pub seed: Option<u64>,
}

/// What a finished run hands back to the caller
#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    pub best_chromosome: Chromosome,
    pub best_fitness: f64,
    /// Best fitness of each evaluated generation, in order
    pub fitness_history: Vec<f64>,
    pub generations_run: usize,
    pub stop_reason: StopReason,
    pub hall_of_fame: Vec<EliteChromosome>,
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(
        &mut self,
        generation: usize,
        best_fitness: f64,
        mean_fitness: f64,
        hall_of_fame_size: usize,
    );
}

/// Generic generational GA.
///
/// Knows nothing about the problem domain: scoring, mutation and crossover are
/// the injected `F`, `M` and `X` policies. Owns the population, selection,
/// elitism and termination.
pub struct EvolutionEngine<F, M, X> {
    config: EngineConfig,
    fitness: F,
    mutation: M,
    crossover: X,
    hall_of_fame: HallOfFame,
    rng: StdRng,
}

impl<F, M, X> EvolutionEngine<F, M, X>
where
    F: FitnessFunction,
    M: MutationPolicy,
    X: CrossoverPolicy,
{
    pub fn new(config: EngineConfig, fitness: F, mutation: M, crossover: X) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let hall_of_fame = HallOfFame::new(config.hall_of_fame_size);

        Self {
            config,
            fitness,
            mutation,
            crossover,
            hall_of_fame,
            rng,
        }
    }

    /// Run the evolution process
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> Result<EvolutionOutcome> {
        self.check_preconditions()?;

        let mut population = self.initialize_population();
        let mut fitness_history = Vec::with_capacity(self.config.termination.max_generations);
        let mut best: Option<(Chromosome, f64)> = None;
        let mut stalled_for = 0usize;
        let mut stop_reason = StopReason::MaxGenerations;

        for generation in 0..self.config.termination.max_generations {
            callback.on_generation_start(generation);

            let evaluated = self.evaluate_population(population);

            let (gen_best, gen_best_fitness) = match best_of(&evaluated) {
                Some((c, f)) => (c.clone(), *f),
                None => {
                    return Err(MelodyError::Engine("population became empty".to_string()));
                }
            };
            let mean_fitness =
                evaluated.iter().map(|(_, f)| *f).sum::<f64>() / evaluated.len() as f64;
            fitness_history.push(gen_best_fitness);

            for (chromosome, fitness) in &evaluated {
                self.hall_of_fame
                    .try_add(EliteChromosome::new(chromosome.clone(), *fitness, generation));
            }

            let improved = match &best {
                Some((_, best_fitness)) => gen_best_fitness > *best_fitness,
                None => true,
            };
            if improved {
                best = Some((gen_best, gen_best_fitness));
                stalled_for = 0;
            } else {
                stalled_for += 1;
            }

            log::debug!(
                "generation {}: best {:.2}, mean {:.2}, stalled for {}",
                generation + 1,
                gen_best_fitness,
                mean_fitness,
                stalled_for
            );
            callback.on_generation_complete(
                generation,
                gen_best_fitness,
                mean_fitness,
                self.hall_of_fame.len(),
            );

            // Check termination
            if let Some(reason) = self.should_stop(gen_best_fitness, stalled_for) {
                stop_reason = reason;
                break;
            }
            if generation + 1 == self.config.termination.max_generations {
                break;
            }

            population = self.create_next_generation(&evaluated);
        }

        let (best_chromosome, best_fitness) = best
            .ok_or_else(|| MelodyError::Engine("no generation was evaluated".to_string()))?;

        log::info!(
            "Evolution finished after {} generations ({:?}), best fitness {:.2}",
            fitness_history.len(),
            stop_reason,
            best_fitness
        );

        Ok(EvolutionOutcome {
            best_chromosome,
            best_fitness,
            generations_run: fitness_history.len(),
            fitness_history,
            stop_reason,
            hall_of_fame: self.hall_of_fame.get_all().to_vec(),
        })
    }

    fn check_preconditions(&self) -> Result<()> {
        if self.config.population_size == 0 {
            return Err(MelodyError::Engine("population size must be positive".to_string()));
        }
        if self.config.bounds.is_empty() {
            return Err(MelodyError::Engine("gene bounds are empty".to_string()));
        }
        if self.config.termination.max_generations == 0 {
            return Err(MelodyError::Engine("max_generations must be positive".to_string()));
        }
        Ok(())
    }

    fn should_stop(&self, gen_best_fitness: f64, stalled_for: usize) -> Option<StopReason> {
        let termination = &self.config.termination;
        if let Some(target) = termination.target_fitness {
            if gen_best_fitness >= target {
                return Some(StopReason::TargetReached);
            }
        }
        if let Some(limit) = termination.stall_generations {
            if limit > 0 && stalled_for >= limit {
                return Some(StopReason::Stalled);
            }
        }
        None
    }

    fn initialize_population(&mut self) -> Vec<Chromosome> {
        (0..self.config.population_size)
            .map(|_| random_chromosome(&self.config.bounds, &mut self.rng))
            .collect()
    }

    fn evaluate_population(&self, population: Vec<Chromosome>) -> Vec<(Chromosome, f64)> {
        let fitness = &self.fitness;
        if self.config.parallel_evaluation {
            population
                .into_par_iter()
                .map(|c| {
                    let score = fitness.evaluate(&c);
                    (c, score)
                })
                .collect()
        } else {
            population
                .into_iter()
                .map(|c| {
                    let score = fitness.evaluate(&c);
                    (c, score)
                })
                .collect()
        }
    }

    fn select(&mut self, population: &[(Chromosome, f64)]) -> Chromosome {
        match self.config.selection_method {
            SelectionMethod::Tournament => {
                tournament_selection(population, self.config.tournament_size.max(1), &mut self.rng)
            }
            SelectionMethod::Roulette => roulette_selection(population, &mut self.rng),
        }
    }

    fn create_next_generation(&mut self, evaluated: &[(Chromosome, f64)]) -> Vec<Chromosome> {
        let population_size = self.config.population_size;
        let mut next_generation = Vec::with_capacity(population_size);

        // Elitism: copy top performers
        let elite_count = ((population_size as f64 * self.config.elitism_ratio) as usize)
            .min(population_size);
        let mut sorted: Vec<&(Chromosome, f64)> = evaluated.iter().collect();
        sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        for (chromosome, _) in sorted.iter().take(elite_count) {
            next_generation.push(chromosome.clone());
        }

        // Generate offspring
        while next_generation.len() < population_size {
            if self.rng.gen::<f64>() < self.config.crossover_rate {
                let parent1 = self.select(evaluated);
                let parent2 = self.select(evaluated);

                let (child1, child2) = self.crossover.crossover(&parent1, &parent2, &mut self.rng);

                next_generation.push(self.mutation.mutate(&child1, &mut self.rng));
                if next_generation.len() < population_size {
                    next_generation.push(self.mutation.mutate(&child2, &mut self.rng));
                }
            } else {
                // Reproduction (copy)
                let parent = self.select(evaluated);
                next_generation.push(self.mutation.mutate(&parent, &mut self.rng));
            }
        }

        next_generation
    }
}

fn best_of(evaluated: &[(Chromosome, f64)]) -> Option<&(Chromosome, f64)> {
    evaluated
        .iter()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::evolution::CrossoverMethod;
    use crate::engines::generation::policy::{BoundedMutation, GenericCrossover};

    fn config(bounds: Bounds, seed: u64) -> EngineConfig {
        EngineConfig {
            population_size: 20,
            termination: TerminationCondition::generations(15),
            selection_method: SelectionMethod::Tournament,
            tournament_size: 3,
            crossover_rate: 0.9,
            elitism_ratio: 0.1,
            bounds,
            hall_of_fame_size: 3,
            parallel_evaluation: false,
            seed: Some(seed),
        }
    }

    fn sum(c: &[f64]) -> f64 {
        c.iter().sum()
    }

    fn engine(
        cfg: EngineConfig,
    ) -> EvolutionEngine<fn(&[f64]) -> f64, BoundedMutation, GenericCrossover> {
        let mutation = BoundedMutation::new(0.1, cfg.bounds.clone());
        EvolutionEngine::new(
            cfg,
            sum as fn(&[f64]) -> f64,
            mutation,
            GenericCrossover::new(CrossoverMethod::SinglePoint),
        )
    }

    #[test]
    fn test_history_matches_generations() {
        let outcome = engine(config(vec![(0.0, 1.0); 6], 42)).run(()).unwrap();
        assert_eq!(outcome.generations_run, 15);
        assert_eq!(outcome.fitness_history.len(), 15);
        assert_eq!(outcome.stop_reason, StopReason::MaxGenerations);
    }

    #[test]
    fn test_elitism_keeps_history_monotonic() {
        let outcome = engine(config(vec![(0.0, 1.0); 6], 7)).run(()).unwrap();
        for pair in outcome.fitness_history.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert_eq!(outcome.best_fitness, *outcome.fitness_history.last().unwrap());
    }

    #[test]
    fn test_target_fitness_stops_early() {
        let mut cfg = config(vec![(0.0, 1.0); 2], 1);
        cfg.termination.target_fitness = Some(0.0);
        let outcome = engine(cfg).run(()).unwrap();
        assert_eq!(outcome.generations_run, 1);
        assert_eq!(outcome.stop_reason, StopReason::TargetReached);
    }

    #[test]
    fn test_stall_stops_early() {
        // Constant bounds: nothing can ever improve
        let mut cfg = config(vec![(1.0, 1.0); 4], 1);
        cfg.termination.stall_generations = Some(3);
        let outcome = engine(cfg).run(()).unwrap();
        assert_eq!(outcome.generations_run, 4);
        assert_eq!(outcome.stop_reason, StopReason::Stalled);
    }

    #[test]
    fn test_rejects_empty_bounds() {
        let result = engine(config(Vec::new(), 1)).run(());
        assert!(matches!(result, Err(MelodyError::Engine(_))));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = engine(config(vec![(0.0, 10.0); 8], 99)).run(()).unwrap();
        let mut cfg = config(vec![(0.0, 10.0); 8], 99);
        cfg.parallel_evaluation = true;
        let parallel = engine(cfg).run(()).unwrap();
        assert_eq!(sequential.fitness_history, parallel.fitness_history);
        assert_eq!(sequential.best_chromosome, parallel.best_chromosome);
    }
}
