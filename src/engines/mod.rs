pub mod generation;
pub mod melody;
