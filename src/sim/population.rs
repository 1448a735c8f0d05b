//! Live entity collections, spawning and difficulty
//!
//! The manager is the only owner of the raven and blast lists. Other code
//! flags entities for deletion or appends blasts through it; removal happens
//! once per frame in `cull`, after drawing.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::effect::Effect;
use super::entity::Entity;
use super::state::GameEvent;
use super::surface::{Canvas, CollisionSurface};
use super::target::Target;
use crate::settings::GameConfig;

/// Spawn pacing and speed, tightened over time in ramp mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Time between spawns (ms)
    pub spawn_interval_ms: f32,
    /// Spread of the random horizontal speed
    pub speed_modifier: f32,
    /// Play time accumulated toward the next ramp step (ms)
    pub level_timer_ms: f32,
    /// Ramp steps applied so far
    pub level: u32,
}

impl Difficulty {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            spawn_interval_ms: config.spawn_interval_ms,
            speed_modifier: config.speed_modifier,
            level_timer_ms: 0.0,
            level: 0,
        }
    }

    /// Accumulate play time; once a full ramp period has built up, apply one
    /// step and start the next period from zero. Returns true on a step.
    pub fn advance(&mut self, dt_ms: f32, config: &GameConfig) -> bool {
        if !config.mode.ramps() {
            return false;
        }

        self.level_timer_ms += dt_ms;
        if self.level_timer_ms < config.ramp_period_ms {
            return false;
        }

        self.level_timer_ms = 0.0;
        self.level += 1;
        self.spawn_interval_ms =
            (self.spawn_interval_ms - config.spawn_interval_step_ms).max(config.min_spawn_interval_ms);
        self.speed_modifier += config.speed_modifier_step;

        log::info!(
            "Difficulty {}: spawn every {:.0}ms, speed modifier {:.1}",
            self.level,
            self.spawn_interval_ms,
            self.speed_modifier
        );
        true
    }
}

/// Owns the live ravens and blasts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationManager {
    /// Sorted by ascending width so larger ravens draw on top
    pub targets: Vec<Target>,
    pub effects: Vec<Effect>,
    /// Time since the last spawn (ms)
    pub spawn_timer: f32,
    pub difficulty: Difficulty,
    next_id: u32,
}

impl PopulationManager {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            targets: Vec::new(),
            effects: Vec::new(),
            spawn_timer: 0.0,
            difficulty: Difficulty::new(config),
            next_id: 1,
        }
    }

    /// Empty both collections and restore starting difficulty
    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self::new(config);
    }

    /// Allocate a new raven ID
    fn next_target_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Advance spawn and difficulty timers, spawning a raven when the spawn
    /// interval has been exceeded. Returns the new raven's ID.
    pub fn tick(
        &mut self,
        dt_ms: f32,
        config: &GameConfig,
        rng: &mut impl Rng,
        canvas_width: f32,
        canvas_height: f32,
    ) -> Option<u32> {
        self.spawn_timer += dt_ms;
        self.difficulty.advance(dt_ms, config);

        if self.spawn_timer <= self.difficulty.spawn_interval_ms {
            return None;
        }

        let id = self.next_target_id();
        let target = Target::spawn(
            id,
            rng,
            config,
            self.difficulty.speed_modifier,
            canvas_width,
            canvas_height,
        );
        log::debug!(
            "Spawned raven {} at y={:.0} width={:.0}",
            id,
            target.pos.y,
            target.width
        );
        self.insert_target(target);
        self.spawn_timer = 0.0;
        Some(id)
    }

    /// Add a raven, keeping the list sorted by width (stable for equal widths)
    pub fn insert_target(&mut self, target: Target) {
        self.targets.push(target);
        self.targets.sort_by(|a, b| a.width.total_cmp(&b.width));
    }

    /// Append a blast
    pub fn add_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Append a blast at `pos` with a random rotation
    pub fn spawn_effect(&mut self, pos: Vec2, size: f32, rng: &mut impl Rng) {
        self.add_effect(Effect::spawn(pos, size, rng));
    }

    /// Ravens first, then blasts
    pub fn entities(&self) -> impl Iterator<Item = &dyn Entity> {
        self.targets
            .iter()
            .map(|t| t as &dyn Entity)
            .chain(self.effects.iter().map(|e| e as &dyn Entity))
    }

    pub fn update_all(&mut self, dt_ms: f32, events: &mut Vec<GameEvent>) {
        for target in &mut self.targets {
            target.update(dt_ms, events);
        }
        for effect in &mut self.effects {
            effect.update(dt_ms, events);
        }
    }

    /// Clear both surfaces, then paint hit-test footprints and sprites in
    /// draw order
    pub fn draw_all<V: Canvas, C: CollisionSurface>(&self, visible: &mut V, collision: &mut C) {
        visible.clear();
        collision.clear();

        for entity in self.entities() {
            entity.draw_collision(collision);
        }
        for entity in self.entities() {
            entity.draw(visible);
        }
    }

    /// Drop every retired entity, keeping survivors in order.
    /// Returns how many were removed.
    pub fn cull(&mut self) -> usize {
        let before = self.targets.len() + self.effects.len();
        self.targets.retain(|t| !t.is_retired());
        self.effects.retain(|e| !e.is_retired());
        before - (self.targets.len() + self.effects.len())
    }

    pub fn len(&self) -> usize {
        self.targets.len() + self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
