use anyhow::Context;
use melodygen::config::ConfigManager;
use melodygen::engines::generation::LogProgressCallback;
use melodygen::services::EvolutionRunner;
use std::env;

fn main() -> anyhow::Result<()> {
    // Configure logging (RUST_LOG=info to follow generations)
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let manager = ConfigManager::new();

    if args.iter().any(|a| a == "--describe") {
        for manifest in manager.get().manifests() {
            println!("[{}]", manifest.section.to_lowercase());
            for field in manifest.fields {
                println!("  {:<20} {:<8} default {}  {}", field.name, field.field_type, field.default, field.description);
            }
        }
        return Ok(());
    }

    // `--save-config <path>` writes the effective configuration and exits
    let save_index = args.iter().position(|a| a == "--save-config").map(|i| i + 1);
    let save_path = match save_index {
        Some(i) => Some(args.get(i).context("--save-config needs a path")?),
        None => None,
    };
    let config_path = args
        .iter()
        .enumerate()
        .find(|(i, a)| !a.starts_with("--") && Some(*i) != save_index)
        .map(|(_, a)| a);
    manager
        .load(config_path)
        .with_context(|| match config_path {
            Some(path) => format!("loading configuration from {}", path),
            None => "loading configuration from environment".to_string(),
        })?;
    let config = manager.get();

    if let Some(path) = save_path {
        manager
            .save_to_file(path)
            .with_context(|| format!("saving configuration to {}", path))?;
        println!("Configuration written to {}", path);
        return Ok(());
    }

    if args.iter().any(|a| a == "--print-config") {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let runner = EvolutionRunner::new(config.clone())?;
    let report = runner
        .run_and_export(LogProgressCallback)
        .context("evolving melody")?;

    println!("Best fitness: {:.2} after {} generations", report.best_fitness, report.generations_run);
    println!("Best melody MIDI notes: {:?}", report.melody.pitches);
    println!("Rhythm durations: {:?} ({} beats)", report.melody.durations, report.melody.total_beats());
    println!("MIDI written to {}", config.export.midi_path.display());

    Ok(())
}
