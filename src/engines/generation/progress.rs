use super::evolution_engine::ProgressCallback;
use std::sync::mpsc::Sender;

/// Reports progress through the `log` facade
pub struct LogProgressCallback;

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {} starting...", generation + 1);
    }

    fn on_generation_complete(
        &mut self,
        generation: usize,
        best_fitness: f64,
        mean_fitness: f64,
        hof_size: usize,
    ) {
        log::info!(
            "Generation {} complete. Best fitness: {:.2}, mean: {:.2}, Hall of Fame size: {}",
            generation + 1,
            best_fitness,
            mean_fitness,
            hof_size
        );
    }
}

/// No-op callback
impl ProgressCallback for () {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, _: usize, _: f64, _: f64, _: usize) {}
}

// For feeding a UI or another thread
pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
    disconnected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete {
        generation: usize,
        best_fitness: f64,
        mean_fitness: f64,
        hof_size: usize,
    },
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self {
            sender,
            disconnected: false,
        }
    }

    fn send(&mut self, message: ProgressMessage) {
        if self.sender.send(message).is_err() && !self.disconnected {
            log::debug!("Progress receiver dropped; further updates are discarded");
            self.disconnected = true;
        }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        self.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(
        &mut self,
        generation: usize,
        best_fitness: f64,
        mean_fitness: f64,
        hof_size: usize,
    ) {
        self.send(ProgressMessage::GenerationComplete {
            generation,
            best_fitness,
            mean_fitness,
            hof_size,
        });
    }
}
