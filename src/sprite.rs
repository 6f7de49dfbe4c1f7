//! Decoded flake bitmaps and their square rescaling.

use crate::core::{Result, SnowError};

/// An RGBA8 bitmap, row-major, 4 bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Sprite {
    /// Wrap an RGBA buffer. Fails when the buffer length does not match the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if pixels.len() != expected {
            return Err(SnowError::InvalidParams(format!(
                "sprite buffer holds {} bytes, {}x{} RGBA needs {}",
                pixels.len(), width, height, expected
            )));
        }
        Ok(Self { width, height, pixels })
    }

    /// A sprite of a single solid color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba.repeat((width as usize) * (height as usize));
        Self { width, height, pixels }
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
    pub fn pixels(&self) -> &[u8] { &self.pixels }
    pub fn is_empty(&self) -> bool { self.width == 0 || self.height == 0 }

    /// RGBA of the pixel at (x, y). Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) as usize) * 4;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]]
    }

    /// Square `size x size` copy using nearest-neighbour sampling (no filtering).
    pub fn scaled(&self, size: u32) -> Sprite {
        if size == 0 || self.is_empty() {
            return Sprite { width: 0, height: 0, pixels: Vec::new() };
        }
        let mut pixels = Vec::with_capacity((size as usize) * (size as usize) * 4);
        for y in 0..size {
            let sy = (y as u64 * self.height as u64 / size as u64) as u32;
            for x in 0..size {
                let sx = (x as u64 * self.width as u64 / size as u64) as u32;
                pixels.extend_from_slice(&self.pixel(sx, sy));
            }
        }
        Sprite { width: size, height: size, pixels }
    }
}

#[cfg(feature = "image")]
impl Sprite {
    /// Take ownership of an already decoded `image` buffer.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self { width, height, pixels: img.into_raw() }
    }

    /// Decode any format supported by the `image` crate.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| {
            SnowError::Other(format!("Failed to load sprite {}: {}", path.display(), e))
        })?;
        Ok(Self::from_rgba_image(img.to_rgba8()))
    }
}
