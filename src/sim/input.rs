//! Click resolution via the collision surface
//!
//! A click samples the identity color under the pointer and credits the first
//! live raven (in draw order) painted in that color.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::color::Rgb;
use super::state::{GameEvent, GamePhase, GameState};
use super::surface::CollisionSurface;

/// A click that landed on a raven
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub target_id: u32,
    pub color: Rgb,
    pub pos: Vec2,
    pub score: u64,
}

/// Translates pointer clicks into hits
pub struct InputHandler;

impl InputHandler {
    /// Resolve a click at canvas coordinates `(px, py)`.
    ///
    /// On a match the raven is flagged for deletion, the score goes up by one
    /// and a blast sized from the raven's width is appended at the click point.
    /// At most one raven is credited per click. Ignored outside `Playing`.
    pub fn handle_click<C: CollisionSurface + ?Sized>(
        state: &mut GameState,
        collision: &C,
        px: f32,
        py: f32,
    ) -> Option<Hit> {
        if state.phase != GamePhase::Playing {
            return None;
        }

        let color = collision.sample(px, py);
        let target = state
            .population
            .targets
            .iter_mut()
            .find(|t| !t.marked_for_deletion && t.color() == color)?;

        target.marked_for_deletion = true;
        let target_id = target.id;
        let size = target.width;

        state.score += 1;
        let pos = Vec2::new(px, py);
        state.population.spawn_effect(pos, size, &mut state.rng);
        state.events.push(GameEvent::TargetHit {
            id: target_id,
            score: state.score,
        });

        log::debug!("Hit raven {} at ({:.0}, {:.0}), score {}", target_id, px, py, state.score);

        Some(Hit {
            target_id,
            color,
            pos,
            score: state.score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::PixelBuffer;
    use crate::settings::GameConfig;
    use crate::sim::Target;

    fn playing_state() -> GameState {
        let mut state = GameState::new(GameConfig::default(), 3, 800.0, 600.0);
        state.phase = GamePhase::Playing;
        state
    }

    fn paint(state: &GameState) -> PixelBuffer {
        let mut collision = PixelBuffer::new(800, 600);
        let mut visible = crate::platform::headless::RecordingCanvas::new(800.0, 600.0);
        state.population.draw_all(&mut visible, &mut collision);
        collision
    }

    #[test]
    fn test_click_inside_target_scores_and_spawns_blast() {
        let mut state = playing_state();
        state.population.insert_target(Target::with_color(
            7,
            Vec2::new(200.0, 150.0),
            60.0,
            40.0,
            Rgb(10, 20, 30),
        ));
        let collision = paint(&state);

        let hit = InputHandler::handle_click(&mut state, &collision, 230.0, 170.0)
            .expect("click should hit");

        assert_eq!(hit.target_id, 7);
        assert_eq!(hit.color, Rgb(10, 20, 30));
        assert_eq!(state.score, 1);
        assert!(state.population.targets[0].marked_for_deletion);
        assert_eq!(state.population.effects.len(), 1);
        assert_eq!(state.population.effects[0].pos, Vec2::new(230.0, 170.0));
        assert_eq!(state.population.effects[0].size, 60.0);
        assert!(
            state
                .events
                .contains(&GameEvent::TargetHit { id: 7, score: 1 })
        );
    }

    #[test]
    fn test_click_on_background_is_noop() {
        let mut state = playing_state();
        state.population.insert_target(Target::with_color(
            7,
            Vec2::new(200.0, 150.0),
            60.0,
            40.0,
            Rgb(10, 20, 30),
        ));
        let collision = paint(&state);
        assert_eq!(collision.sample(10.0, 10.0), Rgb::BACKGROUND);

        assert!(InputHandler::handle_click(&mut state, &collision, 10.0, 10.0).is_none());
        assert_eq!(state.score, 0);
        assert!(state.population.effects.is_empty());
        assert!(!state.population.targets[0].marked_for_deletion);
    }

    #[test]
    fn test_color_collision_credits_only_first() {
        let mut state = playing_state();
        let shared = Rgb(5, 5, 5);
        state
            .population
            .insert_target(Target::with_color(1, Vec2::new(0.0, 0.0), 50.0, 50.0, shared));
        state
            .population
            .insert_target(Target::with_color(2, Vec2::new(300.0, 300.0), 60.0, 60.0, shared));
        let collision = paint(&state);

        let hit = InputHandler::handle_click(&mut state, &collision, 310.0, 310.0).unwrap();
        assert_eq!(hit.target_id, 1);
        assert_eq!(state.score, 1);
        assert_eq!(state.population.effects.len(), 1);
        assert!(!state.population.targets[1].marked_for_deletion);
    }

    #[test]
    fn test_clicks_ignored_outside_playing() {
        let mut state = GameState::new(GameConfig::default(), 3, 800.0, 600.0);
        state.population.insert_target(Target::with_color(
            1,
            Vec2::new(0.0, 0.0),
            50.0,
            50.0,
            Rgb(9, 9, 9),
        ));
        let collision = paint(&state);

        assert!(InputHandler::handle_click(&mut state, &collision, 10.0, 10.0).is_none());
        state.phase = GamePhase::Over;
        assert!(InputHandler::handle_click(&mut state, &collision, 10.0, 10.0).is_none());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_second_click_on_flagged_target_is_noop() {
        let mut state = playing_state();
        state.population.insert_target(Target::with_color(
            1,
            Vec2::new(0.0, 0.0),
            50.0,
            50.0,
            Rgb(9, 9, 9),
        ));
        let collision = paint(&state);

        assert!(InputHandler::handle_click(&mut state, &collision, 10.0, 10.0).is_some());
        assert!(InputHandler::handle_click(&mut state, &collision, 12.0, 12.0).is_none());
        assert_eq!(state.score, 1);
        assert_eq!(state.population.effects.len(), 1);
    }
}
