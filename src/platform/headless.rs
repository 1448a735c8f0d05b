//! Headless surfaces
//!
//! A software collision buffer and a recording canvas. The native build runs
//! the game on these, and tests use them as fakes for the browser canvas.

use crate::assets::{AssetProvider, ImageKey, SoundKey};
use crate::sim::{Canvas, CollisionSurface, Rect, Rgb, SpriteDraw};

/// RGBA8 pixel buffer with exact, unblended fills
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width * height * 4) as usize],
            width,
            height,
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 4) as usize
    }

    /// Raw RGBA at an integer pixel, if in bounds
    pub fn rgba(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }
}

impl Canvas for PixelBuffer {
    fn width(&self) -> f32 {
        self.width as f32
    }

    fn height(&self) -> f32 {
        self.height as f32
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let r = rect.snapped();
        let x0 = r.x.max(0.0) as u32;
        let y0 = r.y.max(0.0) as u32;
        let x1 = (r.right().max(0.0) as u32).min(self.width);
        let y1 = (r.bottom().max(0.0) as u32).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let i = self.index(x, y);
                self.pixels[i..i + 4].copy_from_slice(&[color.0, color.1, color.2, 255]);
            }
        }
    }

    // Only identity-colored footprints belong on this surface
    fn draw_sprite(&mut self, _sprite: &SpriteDraw) {}

    fn fill_text(&mut self, _text: &str, _x: f32, _y: f32, _color: Rgb) {}
}

impl CollisionSurface for PixelBuffer {
    fn sample(&self, px: f32, py: f32) -> Rgb {
        if px < 0.0 || py < 0.0 {
            return Rgb::BACKGROUND;
        }
        match self.rgba(px.floor() as u32, py.floor() as u32) {
            Some([r, g, b, _]) => Rgb(r, g, b),
            None => Rgb::BACKGROUND,
        }
    }
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect(Rect, Rgb),
    Sprite(SpriteDraw),
    Text(String, f32, f32, Rgb),
}

/// Canvas that records draw calls since the last `clear`
pub struct RecordingCanvas {
    width: f32,
    height: f32,
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn sprites(&self) -> impl Iterator<Item = &SpriteDraw> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite(s) => Some(s),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn draw_sprite(&mut self, sprite: &SpriteDraw) {
        self.commands.push(DrawCommand::Sprite(*sprite));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgb) {
        self.commands
            .push(DrawCommand::Text(text.to_string(), x, y, color));
    }
}

/// Asset provider with no real handles, for headless runs
#[derive(Debug, Clone, Copy)]
pub struct StaticAssets {
    ready: bool,
}

impl StaticAssets {
    pub fn ready() -> Self {
        Self { ready: true }
    }

    /// Never becomes ready
    pub fn pending() -> Self {
        Self { ready: false }
    }
}

impl AssetProvider for StaticAssets {
    type Image = ();
    type Sound = ();

    fn image(&self, _key: ImageKey) -> Option<&()> {
        self.ready.then_some(&())
    }

    fn sound(&self, _key: SoundKey) -> Option<&()> {
        self.ready.then_some(&())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}
