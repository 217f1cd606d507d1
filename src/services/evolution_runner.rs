use crate::config::{AppConfig, ConfigBridge};
use crate::engines::generation::evolution_engine::{
    EvolutionEngine, EvolutionOutcome, ProgressCallback,
};
use crate::engines::melody::{
    decode, MelodyFitness, MusicDomain, MusicalCrossover, MusicalMutation,
};
use crate::error::Result;
use crate::export::write_midi;
use crate::types::RunReport;
use chrono::Utc;

/// Wires a validated `AppConfig` into an engine run and its exports
pub struct EvolutionRunner {
    config: AppConfig,
    domain: MusicDomain,
}

impl EvolutionRunner {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let domain = ConfigBridge::to_domain(&config.music);
        Ok(Self { config, domain })
    }

    pub fn domain(&self) -> &MusicDomain {
        &self.domain
    }

    /// Evolve one melody
    pub fn run<C: ProgressCallback>(&self, callback: C) -> Result<EvolutionOutcome> {
        let evolution = &self.config.evolution;
        let engine_config = ConfigBridge::to_engine_config(evolution, &self.domain);

        log::info!(
            "Evolving {}-note phrases: population {}, up to {} generations, {:?} crossover",
            self.domain.phrase_length(),
            evolution.population_size,
            evolution.num_generations,
            evolution.crossover_method
        );

        let mut engine = EvolutionEngine::new(
            engine_config,
            MelodyFitness::new(self.domain.clone()),
            MusicalMutation::new(evolution.mutation_rate, self.domain.clone()),
            MusicalCrossover::new(evolution.crossover_method, &self.domain),
        );

        engine.run(callback)
    }

    /// Evolve, then write the MIDI file and (if configured) the JSON report
    pub fn run_and_export<C: ProgressCallback>(&self, callback: C) -> Result<RunReport> {
        let started_at = Utc::now();
        let outcome = self.run(callback)?;
        let report = self.build_report(&outcome, started_at);

        let export = &self.config.export;
        write_midi(&report.melody, &export.midi_path, export.tempo_bpm, export.velocity)?;
        if let Some(path) = &export.report_path {
            report.save_json(path)?;
            log::info!("Wrote run report to {}", path.display());
        }

        Ok(report)
    }

    pub fn build_report(
        &self,
        outcome: &EvolutionOutcome,
        started_at: chrono::DateTime<Utc>,
    ) -> RunReport {
        let fitness = MelodyFitness::new(self.domain.clone());

        RunReport {
            started_at,
            finished_at: Utc::now(),
            generations_run: outcome.generations_run,
            stop_reason: format!("{:?}", outcome.stop_reason),
            best_fitness: outcome.best_fitness,
            best_chromosome: outcome.best_chromosome.clone(),
            melody: decode(&outcome.best_chromosome),
            breakdown: fitness.breakdown(&outcome.best_chromosome),
            fitness_history: outcome.fitness_history.clone(),
            hall_of_fame: outcome
                .hall_of_fame
                .iter()
                .map(|e| (e.chromosome.clone(), e.fitness))
                .collect(),
        }
    }
}
