// A synchronous owner for many snowflakes sharing one set of parameters.

use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::core::{RenderFrame, Result, Surface};
use crate::params::Params;
use crate::snowflake::Snowflake;
use crate::utils::render2d::{Canvas, Color};
use crate::utils::rng::SeedSequence;

/// Runs N snowflakes in the current thread.
///
/// - Construct with `Snowfall::new(params, n, seed)`
/// - Advance one frame with `update()`, paint with `draw(surface)` or `render_frame(bg)`
/// - `stop_falling()` lets every flake settle at the bottom; `restart_falling()` resumes
pub struct Snowfall {
    params: Arc<Params>,
    flakes: Vec<Snowflake>,
    seeds: SeedSequence,
}

impl Snowfall {
    /// Create `count` flakes. Each gets its own random stream derived from `seed`.
    pub fn new(params: Params, count: usize, seed: u64) -> Self {
        let params = Arc::new(params);
        let mut seeds = SeedSequence::new(seed);
        let flakes = spawn(&params, count, &mut seeds);
        debug!(
            "snowfall created: {} flakes on {}x{}",
            count, params.parent_width, params.parent_height
        );
        Self { params, flakes, seeds }
    }

    /// Number of flakes.
    pub fn len(&self) -> usize { self.flakes.len() }
    /// Whether there are no flakes.
    pub fn is_empty(&self) -> bool { self.flakes.is_empty() }

    pub fn params(&self) -> &Params { &self.params }

    /// Advance every flake that is still falling by one frame.
    pub fn update(&mut self) {
        for flake in self.flakes.iter_mut().filter(|f| f.is_still_falling()) {
            flake.update();
        }
    }

    /// Paint every flake that is still falling.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for flake in self.flakes.iter().filter(|f| f.is_still_falling()) {
            flake.draw(surface);
        }
    }

    /// Draw into a fresh canvas the size of the parent surface.
    pub fn render_frame(&self, background: Color) -> RenderFrame {
        let mut canvas = Canvas::new(self.params.parent_width, self.params.parent_height);
        canvas.clear(background);
        self.draw(&mut canvas);
        canvas.into_render_frame()
    }

    /// Render the current frame over `background` and write it to `path` as a PNG.
    /// Needs the `image` feature.
    pub fn save_frame<P: AsRef<Path>>(&self, path: P, background: Color) -> Result<()> {
        self.render_frame(background).save_png(path)
    }

    /// Stop recycling: flakes finish their current descent and rest below the bottom edge.
    pub fn stop_falling(&mut self) {
        debug!("snowfall stopping");
        for flake in &mut self.flakes { flake.set_should_recycle_falling(false); }
    }

    /// Resume recycling on every flake.
    pub fn restart_falling(&mut self) {
        debug!("snowfall restarting");
        for flake in &mut self.flakes { flake.set_should_recycle_falling(true); }
    }

    /// True while at least one flake is still falling.
    pub fn is_still_falling(&self) -> bool {
        self.flakes.iter().any(Snowflake::is_still_falling)
    }

    /// Rebuild all flakes for a new parent size, keeping the other parameters.
    pub fn resize(&mut self, parent_width: u32, parent_height: u32) {
        let params = Params { parent_width, parent_height, ..(*self.params).clone() };
        self.params = Arc::new(params);
        self.flakes = spawn(&self.params, self.flakes.len(), &mut self.seeds);
        debug!("snowfall resized to {}x{}", parent_width, parent_height);
    }

    /// Immutable access to the flakes.
    pub fn flakes(&self) -> &[Snowflake] { &self.flakes }
    /// Mutable access to the flakes (advanced usage).
    pub fn flakes_mut(&mut self) -> &mut [Snowflake] { &mut self.flakes }
}

fn spawn(params: &Arc<Params>, count: usize, seeds: &mut SeedSequence) -> Vec<Snowflake> {
    (0..count)
        .map(|_| Snowflake::new(Arc::clone(params), seeds.next_randomizer()))
        .collect()
}
