use crate::config::evolution::EvolutionConfig;
use crate::config::music::MusicConfig;
use crate::engines::generation::evolution_engine::{EngineConfig, TerminationCondition};
use crate::engines::melody::MusicDomain;

/// Turns user-facing config sections into the runtime objects they describe
pub struct ConfigBridge;

impl ConfigBridge {
    /// Convert MusicConfig to the domain model
    pub fn to_domain(music: &MusicConfig) -> MusicDomain {
        MusicDomain::new(music.scale.clone(), music.durations.clone(), music.phrase_length)
    }

    /// Convert EvolutionConfig to the engine's run parameters
    pub fn to_engine_config(evolution: &EvolutionConfig, domain: &MusicDomain) -> EngineConfig {
        EngineConfig {
            population_size: evolution.population_size,
            termination: TerminationCondition {
                max_generations: evolution.num_generations,
                target_fitness: evolution.target_fitness,
                stall_generations: evolution.stall_generations,
            },
            selection_method: evolution.selection_method,
            tournament_size: evolution.tournament_size,
            crossover_rate: evolution.crossover_rate,
            elitism_ratio: evolution.elitism_ratio,
            bounds: domain.gene_bounds(),
            hall_of_fame_size: evolution.hall_of_fame_size,
            parallel_evaluation: evolution.parallel_evaluation,
            seed: evolution.seed,
        }
    }
}
