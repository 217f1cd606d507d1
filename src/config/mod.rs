pub mod traits;
pub mod evolution;
pub mod music;
pub mod export;
pub mod manager;
pub mod bridge;

pub use manager::{AppConfig, ConfigManager};
pub use evolution::{CrossoverMethod, EvolutionConfig, SelectionMethod};
pub use music::MusicConfig;
pub use export::ExportConfig;
pub use bridge::ConfigBridge;
