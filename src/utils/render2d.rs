use crate::core::{RenderFrame, Surface};
use crate::sprite::Sprite;

/// RGBA color. The alpha channel doubles as paint opacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    /// Same color with its alpha replaced.
    pub fn with_alpha(self, alpha: u8) -> Self { Color(self.0, self.1, self.2, alpha) }
}

pub const BLACK: Color = Color(0, 0, 0, 255);
pub const WHITE: Color = Color(255, 255, 255, 255);
pub const NIGHT: Color = Color(16, 24, 48, 255);

/// A minimal RGBA software canvas with source-over blending.
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>, // RGBA
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let mut canvas = Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize) * 4],
        };
        canvas.clear(BLACK);
        canvas
    }

    pub fn clear(&mut self, color: Color) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.0, color.1, color.2, color.3]);
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 { return None; }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height { return None; }
        Some(((y * self.width + x) as usize) * 4)
    }

    /// Read back a pixel, `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| {
            Color(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3])
        })
    }

    /// Source-over blend of `color` onto the pixel at (x, y).
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some(idx) = self.index(x, y) else { return };
        let sa = color.3 as u32;
        if sa == 0 { return; }
        if sa == 255 {
            self.pixels[idx..idx + 4].copy_from_slice(&[color.0, color.1, color.2, 255]);
            return;
        }
        let inv = 255 - sa;
        let dst = &mut self.pixels[idx..idx + 4];
        dst[0] = ((color.0 as u32 * sa + dst[0] as u32 * inv + 127) / 255) as u8;
        dst[1] = ((color.1 as u32 * sa + dst[1] as u32 * inv + 127) / 255) as u8;
        dst[2] = ((color.2 as u32 * sa + dst[2] as u32 * inv + 127) / 255) as u8;
        dst[3] = (sa + (dst[3] as u32 * inv + 127) / 255).min(255) as u8;
    }

    pub fn into_render_frame(self) -> RenderFrame {
        RenderFrame { width: self.width, height: self.height, data: self.pixels }
    }
}

impl Surface for Canvas {
    fn draw_sprite(&mut self, sprite: &Sprite, x: f32, y: f32, opacity: u8) {
        if opacity == 0 || sprite.is_empty() { return; }
        let ox = x.floor() as i32;
        let oy = y.floor() as i32;
        for sy in 0..sprite.height() {
            for sx in 0..sprite.width() {
                let [r, g, b, a] = sprite.pixel(sx, sy);
                let alpha = (a as u32 * opacity as u32 + 127) / 255;
                self.blend_pixel(ox + sx as i32, oy + sy as i32, Color(r, g, b, alpha as u8));
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        if radius <= 0.0 || color.3 == 0 { return; }
        let x0 = ((cx - radius).floor() as i32).max(0);
        let y0 = ((cy - radius).floor() as i32).max(0);
        let x1 = ((cx + radius).ceil() as i32).min(self.width as i32 - 1);
        let y1 = ((cy + radius).ceil() as i32).min(self.height as i32 - 1);
        let r2 = radius * radius;
        for yy in y0..=y1 {
            for xx in x0..=x1 {
                // sample at pixel centres
                let dx = xx as f32 + 0.5 - cx;
                let dy = yy as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(xx, yy, color);
                }
            }
        }
    }
}
