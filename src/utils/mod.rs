pub mod rng;
pub mod render;
pub mod render2d;

pub use rng::{Randomizer, RngStream, SeedSequence, rng_from_seed};
pub use render2d::{Canvas, Color, BLACK, NIGHT, WHITE};
