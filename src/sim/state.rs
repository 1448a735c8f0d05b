//! Game state and core simulation types
//!
//! Everything a round needs lives in `GameState`; restarting a round resets it
//! in place rather than rebuilding the loop.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::population::PopulationManager;
use crate::assets::SoundKey;
use crate::settings::GameConfig;

/// Current phase of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for assets and a start trigger
    Ready,
    /// Frames are being scheduled
    Playing,
    /// A raven escaped; waiting for restart
    Over,
}

/// Side effects the simulation hands to the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Fire-and-forget audio cue
    PlaySound(SoundKey),
    /// A click resolved to a raven
    TargetHit { id: u32, score: u64 },
    /// A raven left the canvas on the left edge
    TargetEscaped { id: u32 },
    /// The round ended
    GameOver { final_score: u64 },
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Seed the current round was started with
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Ravens shot this round (never decreases within a round)
    pub score: u64,
    pub population: PopulationManager,
    /// Timestamp of the previous frame (ms), unset until the first frame
    pub last_timestamp: Option<f64>,
    /// Rounds started since construction
    pub rounds: u32,
    /// Pending events for the platform layer
    pub events: Vec<GameEvent>,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl GameState {
    /// Create a fresh state in the `Ready` phase
    pub fn new(config: GameConfig, seed: u64, canvas_width: f32, canvas_height: f32) -> Self {
        let population = PopulationManager::new(&config);
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Ready,
            score: 0,
            population,
            last_timestamp: None,
            rounds: 0,
            events: Vec::new(),
            canvas_width,
            canvas_height,
        }
    }

    /// Clear entities, score and timers for a new round.
    ///
    /// Each round gets its own RNG stream derived from the base seed.
    pub fn reset(&mut self) {
        self.rounds += 1;
        self.rng = Pcg32::seed_from_u64(self.seed.wrapping_add(self.rounds as u64));
        self.score = 0;
        self.population.reset(&self.config);
        self.last_timestamp = None;
        self.events.clear();
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use crate::sim::{Effect, Rgb, Target};

    #[test]
    fn test_reset_clears_round() {
        let mut state = GameState::new(GameConfig::default(), 5, 800.0, 600.0);
        state.score = 12;
        state.last_timestamp = Some(1234.0);
        state.population.targets.push(Target::with_color(
            1,
            Vec2::new(10.0, 10.0),
            50.0,
            40.0,
            Rgb(1, 1, 1),
        ));
        state.population.add_effect(Effect::new(Vec2::ZERO, 10.0, 0.0));
        state.population.spawn_timer = 400.0;
        state.events.push(GameEvent::TargetEscaped { id: 1 });

        state.reset();

        assert_eq!(state.score, 0);
        assert_eq!(state.last_timestamp, None);
        assert!(state.population.targets.is_empty());
        assert!(state.population.effects.is_empty());
        assert_eq!(state.population.spawn_timer, 0.0);
        assert!(state.events.is_empty());
        assert_eq!(state.rounds, 1);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(GameConfig::default(), 5, 800.0, 600.0);
        state.events.push(GameEvent::PlaySound(SoundKey::Blast));
        assert_eq!(state.drain_events().len(), 1);
        assert!(state.drain_events().is_empty());
    }
}
