//! Ravens: the flying targets

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::color::Rgb;
use super::entity::Entity;
use super::geometry::Rect;
use super::state::GameEvent;
use super::surface::{Canvas, SpriteDraw};
use crate::assets::ImageKey;
use crate::consts::*;
use crate::settings::GameConfig;

/// A raven flying right-to-left across the canvas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    /// Top-left corner (pixels)
    pub pos: Vec2,
    /// Per-reference-frame motion; `x` is leftward speed, `y` is upward speed
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    /// Vertical band the raven bounces inside
    pub min_y: f32,
    pub max_y: f32,
    /// Frame duration that `vel` is expressed in (ms)
    pub frame_ms: f32,
    pub frame: u32,
    pub max_frame: u32,
    pub time_since_flap: f32,
    pub flap_interval: f32,
    /// Hit-test key; never changes after spawn
    color: Rgb,
    pub marked_for_deletion: bool,
    /// Set the first time the raven is seen past the left edge
    escaped: bool,
}

impl Target {
    /// Roll a new raven entering at the right edge of the canvas
    pub fn spawn(
        id: u32,
        rng: &mut impl Rng,
        config: &GameConfig,
        speed_modifier: f32,
        canvas_width: f32,
        canvas_height: f32,
    ) -> Self {
        let speed_x = config.speed_base + rng.random::<f32>() * speed_modifier;
        let speed_y = (rng.random::<f32>() * 2.0 - 1.0) * config.vertical_speed;

        let (size_min, size_max) = config.size_range;
        let size_modifier = if size_max > size_min {
            rng.random_range(size_min..size_max)
        } else {
            size_min
        };
        let width = RAVEN_SPRITE_WIDTH * size_modifier;
        let height = RAVEN_SPRITE_HEIGHT * size_modifier;

        let (min_y, max_y) = config.play_band.y_bounds(canvas_height, height);
        let y = min_y + rng.random::<f32>() * (max_y - min_y);

        let flap_interval = FLAP_INTERVAL_MIN_MS + rng.random::<f32>() * FLAP_INTERVAL_SPREAD_MS;
        let color = Rgb::random(rng);

        Self {
            id,
            pos: Vec2::new(canvas_width, y),
            vel: Vec2::new(speed_x, speed_y),
            width,
            height,
            min_y,
            max_y,
            frame_ms: config.reference_frame_ms,
            frame: 0,
            max_frame: RAVEN_MAX_FRAME,
            time_since_flap: 0.0,
            flap_interval,
            color,
            marked_for_deletion: false,
            escaped: false,
        }
    }

    /// Build a raven with explicit geometry and color (scripted scenes, tests)
    pub fn with_color(id: u32, pos: Vec2, width: f32, height: f32, color: Rgb) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            width,
            height,
            min_y: f32::NEG_INFINITY,
            max_y: f32::INFINITY,
            frame_ms: 1000.0 / 60.0,
            frame: 0,
            max_frame: RAVEN_MAX_FRAME,
            time_since_flap: 0.0,
            flap_interval: FLAP_INTERVAL_MIN_MS,
            color,
            marked_for_deletion: false,
            escaped: false,
        }
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Fully past the left edge of the canvas
    pub fn has_escaped(&self) -> bool {
        self.pos.x + self.width < 0.0
    }

    fn advance(&mut self, dt_ms: f32) {
        let frames = dt_ms / self.frame_ms;
        self.pos -= self.vel * frames;

        // Reflect, don't clamp: the raven may overshoot for a frame
        if self.pos.y < self.min_y || self.pos.y > self.max_y {
            self.vel.y = -self.vel.y;
        }

        self.time_since_flap += dt_ms;
        if self.time_since_flap > self.flap_interval {
            self.frame = if self.frame >= self.max_frame {
                0
            } else {
                self.frame + 1
            };
            self.time_since_flap = 0.0;
        }
    }
}

impl Entity for Target {
    fn update(&mut self, dt_ms: f32, events: &mut Vec<GameEvent>) {
        self.advance(dt_ms);

        // A raven shot this frame still ends the round if it got away
        if self.has_escaped() && !self.escaped {
            self.escaped = true;
            self.marked_for_deletion = true;
            events.push(GameEvent::TargetEscaped { id: self.id });
        }
    }

    fn draw_collision(&self, surface: &mut dyn Canvas) {
        surface.fill_rect(self.rect(), self.color);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_sprite(&SpriteDraw {
            image: ImageKey::Raven,
            src: Rect::new(
                self.frame as f32 * RAVEN_SPRITE_WIDTH,
                0.0,
                RAVEN_SPRITE_WIDTH,
                RAVEN_SPRITE_HEIGHT,
            ),
            dst: self.rect(),
            rotation: None,
        });
    }

    fn is_retired(&self) -> bool {
        self.marked_for_deletion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DifficultyMode;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn flying(pos: Vec2, vel: Vec2) -> Target {
        let mut t = Target::with_color(1, pos, 100.0, 70.0, Rgb(1, 2, 3));
        t.vel = vel;
        t.frame_ms = 10.0;
        t
    }

    #[test]
    fn test_spawn_ranges_ramp_mode() {
        let config = GameConfig::from_mode(DifficultyMode::Ramp);
        let mut rng = Pcg32::seed_from_u64(42);
        for id in 0..500 {
            let t = Target::spawn(id, &mut rng, &config, config.speed_modifier, 800.0, 600.0);
            assert!(t.vel.x >= 2.0 && t.vel.x < 6.0, "dx {}", t.vel.x);
            assert!(t.vel.y >= -2.5 && t.vel.y <= 2.5, "dy {}", t.vel.y);
            let scale = t.width / RAVEN_SPRITE_WIDTH;
            assert!((0.3 - 1e-4..0.5 + 1e-4).contains(&scale), "scale {scale}");
            assert!(t.flap_interval >= 50.0 && t.flap_interval < 100.0);
            assert!(t.pos.y >= t.min_y && t.pos.y <= t.max_y);
            assert_eq!(t.pos.x, 800.0);
            assert_eq!(t.frame_ms, config.reference_frame_ms);
            assert!(!t.marked_for_deletion);
        }
    }

    #[test]
    fn test_spawn_ranges_constant_mode() {
        let config = GameConfig::from_mode(DifficultyMode::Constant);
        let mut rng = Pcg32::seed_from_u64(43);
        for id in 0..500 {
            let t = Target::spawn(id, &mut rng, &config, config.speed_modifier, 800.0, 600.0);
            assert!(t.vel.x >= 3.0 && t.vel.x < 8.0);
            let scale = t.width / RAVEN_SPRITE_WIDTH;
            assert!((0.3 - 1e-4..0.6 + 1e-4).contains(&scale));
            assert_eq!(t.min_y, 0.0);
            assert!((t.max_y - (600.0 - t.height)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_moves_left_by_velocity_per_reference_frame() {
        let mut t = flying(Vec2::new(500.0, 300.0), Vec2::new(4.0, 1.0));
        let mut events = Vec::new();
        t.update(10.0, &mut events);
        assert_eq!(t.pos, Vec2::new(496.0, 299.0));

        // Two frames worth of time moves twice as far
        t.update(20.0, &mut events);
        assert_eq!(t.pos, Vec2::new(488.0, 297.0));
        assert!(events.is_empty());
    }

    #[test]
    fn test_bounces_off_band_without_clamping() {
        let mut t = flying(Vec2::new(500.0, 101.0), Vec2::new(1.0, 2.0));
        t.min_y = 100.0;
        t.max_y = 200.0;
        let mut events = Vec::new();

        t.update(10.0, &mut events);
        // Overshoots to 99 and flips direction, but is not clamped
        assert_eq!(t.pos.y, 99.0);
        assert_eq!(t.vel.y, -2.0);

        t.update(10.0, &mut events);
        assert_eq!(t.pos.y, 101.0);
        assert_eq!(t.vel.y, -2.0);
    }

    #[test]
    fn test_escape_marks_and_reports_once() {
        let mut t = flying(Vec2::new(-95.0, 300.0), Vec2::new(4.0, 0.0));
        let mut events = Vec::new();

        // x + width = 1 after this step: still on screen
        t.update(10.0, &mut events);
        assert!(!t.marked_for_deletion);
        assert!(events.is_empty());

        // x + width = -3: escaped
        t.update(10.0, &mut events);
        assert!(t.marked_for_deletion);
        assert_eq!(events, vec![GameEvent::TargetEscaped { id: 1 }]);

        t.update(10.0, &mut events);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_shot_raven_still_reports_escape() {
        let mut t = flying(Vec2::new(-95.0, 300.0), Vec2::new(10.0, 0.0));
        t.marked_for_deletion = true;
        let mut events = Vec::new();

        t.update(10.0, &mut events);
        assert_eq!(events, vec![GameEvent::TargetEscaped { id: 1 }]);

        t.update(10.0, &mut events);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_flap_cycles_through_frames() {
        let mut t = flying(Vec2::new(500.0, 300.0), Vec2::ZERO);
        t.flap_interval = 60.0;
        let mut events = Vec::new();

        // Exactly at the interval does not advance
        t.update(60.0, &mut events);
        assert_eq!(t.frame, 0);
        t.update(1.0, &mut events);
        assert_eq!(t.frame, 1);
        assert_eq!(t.time_since_flap, 0.0);

        let mut seen = vec![t.frame];
        for _ in 0..5 {
            t.update(61.0, &mut events);
            seen.push(t.frame);
        }
        assert_eq!(seen, vec![1, 2, 3, 4, 0, 1]);
    }

    #[test]
    fn test_draws_footprint_and_sprite_frame() {
        use crate::platform::headless::{DrawCommand, RecordingCanvas};

        let mut t = Target::with_color(9, Vec2::new(10.0, 20.0), 54.2, 38.8, Rgb(10, 20, 30));
        t.frame = 3;

        let mut collision = RecordingCanvas::new(100.0, 100.0);
        t.draw_collision(&mut collision);
        assert_eq!(
            collision.commands,
            vec![DrawCommand::FillRect(t.rect(), Rgb(10, 20, 30))]
        );

        let mut visible = RecordingCanvas::new(100.0, 100.0);
        t.draw(&mut visible);
        let DrawCommand::Sprite(sprite) = &visible.commands[0] else {
            panic!("expected a sprite draw");
        };
        assert_eq!(sprite.image, ImageKey::Raven);
        assert_eq!(sprite.src.x, 3.0 * RAVEN_SPRITE_WIDTH);
        assert_eq!(sprite.dst, t.rect());
        assert!(sprite.rotation.is_none());
    }
}
