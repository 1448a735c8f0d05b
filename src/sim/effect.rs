//! Blast effect spawned where a raven was shot

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::geometry::Rect;
use super::state::GameEvent;
use super::surface::{Canvas, Rotation, SpriteDraw};
use crate::assets::{ImageKey, SoundKey};
use crate::consts::*;

/// A short, rotated explosion animation with a one-shot sound cue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    /// Center of the blast (the click point)
    pub pos: Vec2,
    pub size: f32,
    /// Fixed for the effect's lifetime
    pub angle: f32,
    pub frame: u32,
    pub time_since_last_frame: f32,
    pub frame_interval: f32,
    pub terminal_frame: u32,
    sound_played: bool,
    pub marked_for_deletion: bool,
}

impl Effect {
    pub fn new(pos: Vec2, size: f32, angle: f32) -> Self {
        Self {
            pos,
            size,
            angle,
            frame: 0,
            time_since_last_frame: 0.0,
            frame_interval: BLAST_FRAME_INTERVAL_MS,
            terminal_frame: BLAST_TERMINAL_FRAME,
            sound_played: false,
            marked_for_deletion: false,
        }
    }

    /// New blast with a random rotation in `[0, BLAST_MAX_ANGLE)`
    pub fn spawn(pos: Vec2, size: f32, rng: &mut impl Rng) -> Self {
        Self::new(pos, size, rng.random::<f32>() * BLAST_MAX_ANGLE)
    }

    pub fn sound_played(&self) -> bool {
        self.sound_played
    }
}

impl Entity for Effect {
    fn update(&mut self, dt_ms: f32, events: &mut Vec<GameEvent>) {
        if self.frame == 0 && !self.sound_played {
            self.sound_played = true;
            events.push(GameEvent::PlaySound(SoundKey::Blast));
        }

        self.time_since_last_frame += dt_ms;
        if self.time_since_last_frame > self.frame_interval {
            self.frame += 1;
            self.time_since_last_frame = 0.0;
            if self.frame > self.terminal_frame {
                self.marked_for_deletion = true;
            }
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_sprite(&SpriteDraw {
            image: ImageKey::Blast,
            src: Rect::new(
                self.frame as f32 * BLAST_SPRITE_WIDTH,
                0.0,
                BLAST_SPRITE_WIDTH,
                BLAST_SPRITE_HEIGHT,
            ),
            dst: Rect::new(-self.size / 2.0, -self.size / 4.0, self.size, self.size),
            rotation: Some(Rotation {
                origin: self.pos,
                angle: self.angle,
            }),
        });
    }

    fn is_retired(&self) -> bool {
        self.marked_for_deletion
    }
}
