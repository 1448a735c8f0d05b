//! Frame driver and phase state machine
//!
//! `Ready -> Playing -> Over`, with `Over -> Playing` on restart. The host
//! calls `frame` once per display refresh with the refresh timestamp and
//! `click` whenever the pointer is pressed. Both run to completion on the
//! same thread, in whatever order the host delivers them.

use serde::{Deserialize, Serialize};

use super::color::Rgb;
use super::input::{Hit, InputHandler};
use super::state::{GameEvent, GamePhase, GameState};
use super::surface::{Canvas, CollisionSurface};
use crate::assets::AssetProvider;
use crate::consts::{SCORE_SHADOW_POS, SCORE_TEXT_POS};
use crate::error::GameError;
use crate::settings::GameConfig;

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameOutcome {
    Continue,
    Stop,
}

/// Top-level driver owning the game state
#[derive(Debug, Clone)]
pub struct GameLoop {
    pub state: GameState,
}

impl GameLoop {
    pub fn new(config: GameConfig, seed: u64, canvas_width: f32, canvas_height: f32) -> Self {
        Self {
            state: GameState::new(config, seed, canvas_width, canvas_height),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    /// Begin a round from `Ready` or `Over` once every asset has loaded
    pub fn start<A: AssetProvider + ?Sized>(&mut self, assets: &A) -> Result<(), GameError> {
        if self.state.phase == GamePhase::Playing {
            return Err(GameError::InvalidTransition {
                from: GamePhase::Playing,
                to: GamePhase::Playing,
            });
        }
        if !assets.is_ready() {
            return Err(GameError::AssetsNotReady);
        }
        self.begin_round();
        Ok(())
    }

    /// Begin a new round after game over (assets are already loaded)
    pub fn restart(&mut self) -> Result<(), GameError> {
        if self.state.phase != GamePhase::Over {
            return Err(GameError::InvalidTransition {
                from: self.state.phase,
                to: GamePhase::Playing,
            });
        }
        self.begin_round();
        Ok(())
    }

    fn begin_round(&mut self) {
        self.state.reset();
        self.state.phase = GamePhase::Playing;
        log::info!(
            "Round {} started ({} mode, seed {})",
            self.state.rounds,
            self.state.config.mode.as_str(),
            self.state.seed
        );
    }

    /// Run one frame: spawn, update, draw, cull, then check for game over.
    ///
    /// `timestamp_ms` is the display refresh time; the first frame of a round
    /// has no predecessor and advances by zero.
    pub fn frame<V: Canvas, C: CollisionSurface>(
        &mut self,
        timestamp_ms: f64,
        visible: &mut V,
        collision: &mut C,
    ) -> FrameOutcome {
        if self.state.phase != GamePhase::Playing {
            return FrameOutcome::Stop;
        }

        let dt = match self.state.last_timestamp {
            Some(last) => (timestamp_ms - last).max(0.0) as f32,
            None => 0.0,
        };
        self.state.last_timestamp = Some(timestamp_ms);

        let state = &mut self.state;
        let first_new_event = state.events.len();

        state.population.tick(
            dt,
            &state.config,
            &mut state.rng,
            state.canvas_width,
            state.canvas_height,
        );
        state.population.update_all(dt, &mut state.events);
        state.population.draw_all(visible, collision);
        if state.config.show_score {
            draw_score(visible, state.score);
        }
        // Retired entities got their last draw above
        state.population.cull();

        let escaped = state.events[first_new_event..]
            .iter()
            .any(|e| matches!(e, GameEvent::TargetEscaped { .. }));
        if escaped {
            state.phase = GamePhase::Over;
            state.events.push(GameEvent::GameOver {
                final_score: state.score,
            });
            log::info!("Game over! Final score: {}", state.score);
            return FrameOutcome::Stop;
        }

        FrameOutcome::Continue
    }

    /// Resolve a pointer click at canvas coordinates
    pub fn click<C: CollisionSurface + ?Sized>(
        &mut self,
        px: f32,
        py: f32,
        collision: &C,
    ) -> Option<Hit> {
        InputHandler::handle_click(&mut self.state, collision, px, py)
    }

    /// Take all pending events for the platform layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

/// Score HUD with a drop shadow
fn draw_score<V: Canvas + ?Sized>(canvas: &mut V, score: u64) {
    let text = format!("Score: {score}");
    canvas.fill_text(&text, SCORE_SHADOW_POS.0, SCORE_SHADOW_POS.1, Rgb::BACKGROUND);
    canvas.fill_text(&text, SCORE_TEXT_POS.0, SCORE_TEXT_POS.1, Rgb::WHITE);
}
