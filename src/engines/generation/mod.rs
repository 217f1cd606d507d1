pub mod genome;
pub mod operators;
pub mod policy;
pub mod hall_of_fame;
pub mod evolution_engine;
pub mod progress;

pub use genome::{Bounds, Chromosome};
pub use hall_of_fame::{EliteChromosome, HallOfFame};
pub use evolution_engine::{
    EngineConfig, EvolutionEngine, EvolutionOutcome, ProgressCallback, StopReason,
    TerminationCondition,
};
pub use policy::{BoundedMutation, CrossoverPolicy, FitnessFunction, GenericCrossover, MutationPolicy};
pub use progress::{ChannelProgressCallback, LogProgressCallback, ProgressMessage};
