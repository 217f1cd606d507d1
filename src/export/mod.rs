pub mod midi;

pub use midi::{melody_to_smf, write_midi};
