//! Simulation module
//!
//! All gameplay logic lives here. Rules for this module:
//! - Seeded RNG only
//! - Draw through the `Canvas`/`CollisionSurface` traits only
//! - No platform dependencies
//! - Side effects leave as `GameEvent`s

pub mod color;
pub mod effect;
pub mod entity;
pub mod game_loop;
pub mod geometry;
pub mod input;
pub mod population;
pub mod state;
pub mod surface;
pub mod target;

pub use color::Rgb;
pub use effect::Effect;
pub use entity::Entity;
pub use game_loop::{FrameOutcome, GameLoop};
pub use geometry::Rect;
pub use input::{Hit, InputHandler};
pub use population::{Difficulty, PopulationManager};
pub use state::{GameEvent, GamePhase, GameState};
pub use surface::{Canvas, CollisionSurface, Rotation, SpriteDraw};
pub use target::Target;
