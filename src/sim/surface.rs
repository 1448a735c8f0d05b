//! Render and collision surface interfaces
//!
//! The simulation draws through these traits only, so it runs against a real
//! browser canvas, a software pixel buffer, or a recording fake.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::color::Rgb;
use super::geometry::Rect;
use crate::assets::ImageKey;

/// Rotation applied around `origin` before drawing (save/translate/rotate/restore)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub origin: Vec2,
    pub angle: f32,
}

/// Draw a region of a sprite sheet into a destination rect
///
/// When `rotation` is set, `dst` is relative to the rotation origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteDraw {
    pub image: ImageKey,
    pub src: Rect,
    pub dst: Rect,
    pub rotation: Option<Rotation>,
}

/// A drawable 2D surface
pub trait Canvas {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    fn draw_sprite(&mut self, sprite: &SpriteDraw);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgb);
}

/// Off-screen buffer that entities paint in their identity colors
///
/// Fills must be exact: no blending, no anti-aliasing. A pixel reads back as
/// the color of the last fill covering it, or `Rgb::BACKGROUND` after `clear`.
pub trait CollisionSurface: Canvas {
    fn sample(&self, px: f32, py: f32) -> Rgb;
}
