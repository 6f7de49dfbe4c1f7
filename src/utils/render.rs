//! Exporting rendered snowfall frames as PNG images.

use std::path::Path;

use log::debug;

use crate::core::{RenderFrame, Result, SnowError};

impl RenderFrame {
    /// PNG bytes for this frame. Needs the `image` feature.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let expected = (self.width as usize) * (self.height as usize) * 4;
        if self.data.len() != expected {
            return Err(SnowError::Other(format!(
                "frame holds {} bytes, {}x{} RGBA needs {}",
                self.data.len(), self.width, self.height, expected
            )));
        }
        png_bytes(self)
    }

    /// Write this frame to `path` as a PNG. Needs the `image` feature.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.encode_png()?;
        std::fs::write(path, &bytes)
            .map_err(|e| SnowError::Other(format!("Failed to write {}: {}", path.display(), e)))?;
        debug!("saved {}x{} frame to {}", self.width, self.height, path.display());
        Ok(())
    }
}

#[cfg(feature = "image")]
fn png_bytes(frame: &RenderFrame) -> Result<Vec<u8>> {
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(&frame.data, frame.width, frame.height, ExtendedColorType::Rgba8)
        .map_err(|e| SnowError::Other(format!("PNG encode error: {}", e)))?;
    Ok(buf)
}

#[cfg(not(feature = "image"))]
fn png_bytes(_frame: &RenderFrame) -> Result<Vec<u8>> {
    Err(SnowError::NotSupported("PNG export requires the `image` feature".into()))
}
