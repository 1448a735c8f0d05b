//! Shared entity capabilities

use super::state::GameEvent;
use super::surface::Canvas;

/// Something the population manager updates, draws and retires
pub trait Entity {
    /// Advance by `dt_ms` of wall time, pushing any side effects onto `events`
    fn update(&mut self, dt_ms: f32, events: &mut Vec<GameEvent>);

    /// Paint the hit-test footprint. Entities that can't be clicked draw nothing.
    fn draw_collision(&self, _surface: &mut dyn Canvas) {}

    /// Paint the visible sprite
    fn draw(&self, canvas: &mut dyn Canvas);

    /// True once the entity should be removed at the end of the frame
    fn is_retired(&self) -> bool;
}
