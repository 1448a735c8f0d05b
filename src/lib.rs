//! Raven Hunt - A click-to-shoot arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (entities, population, hit-testing, game loop)
//! - `platform`: Render/collision surface backends (headless and browser)
//! - `assets`: Asset keys and the provider interface
//! - `settings`: Data-driven game configuration

pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, GameError, PlatformError};
pub use settings::{DifficultyMode, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Raven sprite sheet frame size (pixels)
    pub const RAVEN_SPRITE_WIDTH: f32 = 271.0;
    pub const RAVEN_SPRITE_HEIGHT: f32 = 194.0;
    /// Last frame index of the raven flap cycle
    pub const RAVEN_MAX_FRAME: u32 = 4;
    /// Flap interval range (ms): [MIN, MIN + SPREAD)
    pub const FLAP_INTERVAL_MIN_MS: f32 = 50.0;
    pub const FLAP_INTERVAL_SPREAD_MS: f32 = 50.0;

    /// Blast sprite sheet frame size (pixels)
    pub const BLAST_SPRITE_WIDTH: f32 = 200.0;
    pub const BLAST_SPRITE_HEIGHT: f32 = 179.0;
    /// Time each blast frame stays on screen (ms)
    pub const BLAST_FRAME_INTERVAL_MS: f32 = 150.0;
    /// Blast retires once its frame index exceeds this
    pub const BLAST_TERMINAL_FRAME: u32 = 5;
    /// Upper bound of the random blast rotation (radians)
    pub const BLAST_MAX_ANGLE: f32 = 6.2;

    /// Score HUD layout
    pub const SCORE_FONT: &str = "50px impact";
    pub const SCORE_SHADOW_POS: (f32, f32) = (50.0, 75.0);
    pub const SCORE_TEXT_POS: (f32, f32) = (55.0, 80.0);
}
