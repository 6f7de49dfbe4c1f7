// Core types shared across the crate: errors, frames, and the rendering surface contract.

use crate::sprite::Sprite;
use crate::utils::render2d::Color;

/// An RGBA8 snapshot of a rendered snowfall, row-major, 4 bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Recoverable errors across the configuration and export APIs.
///
/// The particle simulation itself never fails; these only come out of
/// parameter validation, asset decoding and frame export.
#[derive(thiserror::Error, Debug)]
pub enum SnowError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    #[error("Other error: {0}")]
    Other(String),
}

/// Convenience alias for results using SnowError.
pub type Result<T> = std::result::Result<T, SnowError>;

/// A host rendering surface that snowflakes paint onto.
///
/// Coordinates are in surface pixels with the origin at the top-left corner.
/// Implementations must tolerate positions partially or fully outside the
/// surface and simply clip.
pub trait Surface {
    /// Blit `sprite` with its top-left corner at `(x, y)`, scaled by `opacity` (0-255).
    fn draw_sprite(&mut self, sprite: &Sprite, x: f32, y: f32, opacity: u8);

    /// Fill a circle centred at `(cx, cy)`. The alpha channel of `color` is the opacity.
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);
}
