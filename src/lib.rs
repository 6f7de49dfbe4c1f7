//! Falling snowflake particles for decorative overlays.
//!
//! A [`Snowflake`] is one particle: it picks a gaussian-biased size, derives its
//! fall speed from that size, drifts at a random angle off vertical, and either
//! recycles to the top or comes to rest once it crosses the bottom edge.
//! [`Snowfall`] owns a batch of them and paints onto any [`Surface`], such as the
//! bundled software [`Canvas`].

pub mod core;
pub mod params;
pub mod snowfall;
pub mod snowflake;
pub mod sprite;
pub mod utils;

pub use crate::core::{RenderFrame, Result, SnowError, Surface};
pub use crate::params::{Params, ParamsBuilder};
pub use crate::snowfall::Snowfall;
pub use crate::snowflake::Snowflake;
pub use crate::sprite::Sprite;
pub use crate::utils::{Canvas, Color, Randomizer, SeedSequence};
