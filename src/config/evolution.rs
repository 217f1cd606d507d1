use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::MelodyError;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub num_generations: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub selection_method: SelectionMethod,
    pub crossover_method: CrossoverMethod,
    pub elitism_ratio: f64,
    pub tournament_size: usize,
    pub target_fitness: Option<f64>,
    pub stall_generations: Option<usize>,
    pub seed: Option<u64>,
    pub parallel_evaluation: bool,
    pub hall_of_fame_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMethod {
    Tournament,
    Roulette,
}

/// `Musical` cuts only at phrase boundaries; the others are the engine's generic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverMethod {
    Musical,
    SinglePoint,
    Uniform,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            num_generations: 50,
            mutation_rate: 0.15,
            crossover_rate: 0.9,
            selection_method: SelectionMethod::Tournament,
            crossover_method: CrossoverMethod::Musical,
            elitism_ratio: 0.1,
            tournament_size: 3,
            target_fitness: None,
            stall_generations: None,
            seed: None,
            parallel_evaluation: false,
            hall_of_fame_size: 5,
        }
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<(), MelodyError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(MelodyError::Configuration(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(())
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), MelodyError> {
        if self.population_size < 2 {
            return Err(MelodyError::Configuration(
                "Population size must be at least 2".to_string()
            ));
        }
        if self.num_generations == 0 {
            return Err(MelodyError::Configuration(
                "Number of generations must be at least 1".to_string()
            ));
        }
        check_unit_interval("Mutation rate", self.mutation_rate)?;
        check_unit_interval("Crossover rate", self.crossover_rate)?;
        check_unit_interval("Elitism ratio", self.elitism_ratio)?;
        if self.tournament_size == 0 {
            return Err(MelodyError::Configuration(
                "Tournament size must be at least 1".to_string()
            ));
        }
        if let Some(target) = self.target_fitness {
            if !target.is_finite() {
                return Err(MelodyError::Configuration(
                    "Target fitness must be finite".to_string()
                ));
            }
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Evolution".to_string(),
            fields: vec![
                FieldManifest::new("population_size", "integer", json!(100), "Number of melodies in population")
                    .range(2.0, 100000.0),
                FieldManifest::new("num_generations", "integer", json!(50), "Maximum number of generations")
                    .range(1.0, 100000.0),
                FieldManifest::new("mutation_rate", "float", json!(0.15), "Per-gene mutation probability")
                    .range(0.0, 1.0),
                FieldManifest::new("crossover_rate", "float", json!(0.9), "Probability offspring are recombined")
                    .range(0.0, 1.0),
                FieldManifest::new("selection_method", "enum", json!("tournament"), "tournament | roulette"),
                FieldManifest::new("crossover_method", "enum", json!("musical"), "musical | single_point | uniform"),
                FieldManifest::new("elitism_ratio", "float", json!(0.1), "Share of population copied unchanged")
                    .range(0.0, 1.0),
                FieldManifest::new("tournament_size", "integer", json!(3), "Candidates per tournament")
                    .range(1.0, 1000.0),
                FieldManifest::new("target_fitness", "float", json!(null), "Stop once best fitness reaches this"),
                FieldManifest::new("stall_generations", "integer", json!(null), "Stop after this many generations without improvement"),
                FieldManifest::new("seed", "integer", json!(null), "Random seed for reproducible runs"),
                FieldManifest::new("parallel_evaluation", "bool", json!(false), "Score the population on the rayon pool"),
                FieldManifest::new("hall_of_fame_size", "integer", json!(5), "Distinct best melodies to keep"),
            ],
        }
    }
}
