//! Game configuration
//!
//! Two tunings of the game exist: a narrow flight band with a difficulty ramp,
//! and a full-height band at constant difficulty. The ramp is the default; the
//! other is exposed as a preset.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Difficulty preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyMode {
    /// Spawn interval shrinks and speed grows every ramp period
    #[default]
    Ramp,
    /// Spawn interval and speed never change
    Constant,
}

impl DifficultyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyMode::Ramp => "ramp",
            DifficultyMode::Constant => "constant",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ramp" | "ramped" => Some(DifficultyMode::Ramp),
            "constant" | "const" | "classic" => Some(DifficultyMode::Constant),
            _ => None,
        }
    }

    /// Whether elapsed play time tightens the spawn interval and speed
    pub fn ramps(&self) -> bool {
        matches!(self, DifficultyMode::Ramp)
    }
}

/// Vertical flight band, as fractions of canvas height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayBand {
    pub top: f32,
    pub bottom: f32,
}

impl PlayBand {
    /// Allowed `y` range (pixels) for a target of `height` on a canvas of
    /// `canvas_height`. Targets bounce when they leave it.
    pub fn y_bounds(&self, canvas_height: f32, height: f32) -> (f32, f32) {
        let min_y = (self.top * canvas_height - height).max(0.0);
        let max_y = (self.bottom * canvas_height - height).max(min_y);
        (min_y, max_y)
    }
}

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    pub mode: DifficultyMode,

    // === Spawning ===
    /// Time between raven spawns (ms)
    pub spawn_interval_ms: f32,
    /// Horizontal speed is `speed_base + U[0,1) * speed_modifier`
    pub speed_base: f32,
    pub speed_modifier: f32,
    /// Vertical speed is uniform in `[-vertical_speed, vertical_speed]`
    pub vertical_speed: f32,
    /// Sprite scale range `[min, max)`
    pub size_range: (f32, f32),
    pub play_band: PlayBand,

    // === Difficulty ramp ===
    pub ramp_period_ms: f32,
    pub spawn_interval_step_ms: f32,
    pub speed_modifier_step: f32,
    pub min_spawn_interval_ms: f32,

    // === Timing ===
    /// Frame duration that velocities are expressed in (ms)
    pub reference_frame_ms: f32,

    // === Presentation ===
    /// Blast sound volume (0.0 - 1.0)
    pub blast_volume: f32,
    /// Draw the score HUD on the canvas
    pub show_score: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_mode(DifficultyMode::Ramp)
    }
}

impl GameConfig {
    /// Create a config from a difficulty preset
    pub fn from_mode(mode: DifficultyMode) -> Self {
        let (speed_base, speed_modifier, size_range, play_band) = match mode {
            DifficultyMode::Ramp => (
                2.0,
                4.0,
                (0.3, 0.5),
                PlayBand {
                    top: 0.35,
                    bottom: 0.70,
                },
            ),
            DifficultyMode::Constant => (
                3.0,
                5.0,
                (0.3, 0.6),
                PlayBand {
                    top: 0.0,
                    bottom: 1.0,
                },
            ),
        };

        Self {
            mode,
            spawn_interval_ms: 850.0,
            speed_base,
            speed_modifier,
            vertical_speed: 2.5,
            size_range,
            play_band,
            ramp_period_ms: 15_000.0,
            spawn_interval_step_ms: 10.0,
            speed_modifier_step: 2.0,
            min_spawn_interval_ms: 0.0,
            reference_frame_ms: 1000.0 / 60.0,
            blast_volume: 0.3,
            show_score: true,
        }
    }

    /// Parse a config from JSON. Fields left out take the value of the
    /// preset named by `mode` (ramp when absent).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(overrides) = overrides else {
            return Err(ConfigError::Invalid("expected a JSON object".to_string()));
        };

        let mode = match overrides.get("mode") {
            Some(value) => DifficultyMode::deserialize(value)?,
            None => DifficultyMode::default(),
        };

        let mut merged = serde_json::to_value(Self::from_mode(mode))?;
        if let serde_json::Value::Object(base) = &mut merged {
            base.extend(overrides);
        }

        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs the simulation can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("ramp_period_ms", self.ramp_period_ms),
            ("reference_frame_ms", self.reference_frame_ms),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }

        let (lo, hi) = self.size_range;
        if !(lo > 0.0 && lo <= hi) {
            return Err(ConfigError::Invalid(format!(
                "size_range must satisfy 0 < min <= max, got ({lo}, {hi})"
            )));
        }

        let band = self.play_band;
        if !(0.0..=1.0).contains(&band.top) || !(0.0..=1.0).contains(&band.bottom) || band.top > band.bottom
        {
            return Err(ConfigError::Invalid(format!(
                "play_band must lie within [0, 1] with top <= bottom, got ({}, {})",
                band.top, band.bottom
            )));
        }

        if self.speed_modifier < 0.0 || self.vertical_speed < 0.0 || self.min_spawn_interval_ms < 0.0 {
            return Err(ConfigError::Invalid(
                "speeds and spawn floor must not be negative".to_string(),
            ));
        }

        Ok(())
    }

    /// Effective blast volume
    pub fn effective_blast_volume(&self) -> f32 {
        self.blast_volume.clamp(0.0, 1.0)
    }

    /// Id of the inline JSON config element
    #[cfg(target_arch = "wasm32")]
    const CONFIG_ELEMENT_ID: &'static str = "game-config";

    /// Load config from the page (WASM only)
    ///
    /// Reads an inline `<script type="application/json" id="game-config">`
    /// block, then lets a `?mode=` query parameter pick the preset when no
    /// block is present.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };

        let inline = window
            .document()
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = inline {
            match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded game config ({} mode)", config.mode.as_str());
                    return config;
                }
                Err(e) => log::warn!("Ignoring game config: {e}"),
            }
        }

        let query_mode = window
            .location()
            .search()
            .ok()
            .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
            .and_then(|params| params.get("mode"))
            .and_then(|mode| DifficultyMode::from_str(&mode));

        if let Some(mode) = query_mode {
            log::info!("Using {} preset from query string", mode.as_str());
            return Self::from_mode(mode);
        }

        log::info!("Using default game config");
        Self::default()
    }

    /// Native: no page to read from
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_match_documented_ranges() {
        let ramp = GameConfig::from_mode(DifficultyMode::Ramp);
        assert_eq!(ramp.speed_base, 2.0);
        assert_eq!(ramp.speed_base + ramp.speed_modifier, 6.0);
        assert_eq!(ramp.size_range, (0.3, 0.5));

        let constant = GameConfig::from_mode(DifficultyMode::Constant);
        assert_eq!(constant.speed_base, 3.0);
        assert_eq!(constant.speed_base + constant.speed_modifier, 8.0);
        assert_eq!(constant.size_range, (0.3, 0.6));
        assert_eq!(constant.play_band, PlayBand { top: 0.0, bottom: 1.0 });
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!(DifficultyMode::from_str("RAMP"), Some(DifficultyMode::Ramp));
        assert_eq!(DifficultyMode::from_str("constant"), Some(DifficultyMode::Constant));
        assert_eq!(DifficultyMode::from_str("nightmare"), None);
        assert!(DifficultyMode::Ramp.ramps());
        assert!(!DifficultyMode::Constant.ramps());
    }

    #[test]
    fn test_from_json_merges_over_preset() {
        let config = GameConfig::from_json(r#"{"mode": "constant", "spawn_interval_ms": 500}"#)
            .unwrap();
        assert_eq!(config.mode, DifficultyMode::Constant);
        assert_eq!(config.spawn_interval_ms, 500.0);
        assert_eq!(config.size_range, (0.3, 0.6));

        let config = GameConfig::from_json("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            GameConfig::from_json(r#"{"spawn_rate": 3}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json("[1, 2]"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"size_range": [0.6, 0.3]}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"spawn_interval_ms": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_play_band_bounds() {
        let band = PlayBand {
            top: 0.35,
            bottom: 0.70,
        };
        let (min_y, max_y) = band.y_bounds(1000.0, 50.0);
        assert!((min_y - 300.0).abs() < 0.01);
        assert!((max_y - 650.0).abs() < 0.01);

        let full = PlayBand {
            top: 0.0,
            bottom: 1.0,
        };
        assert_eq!(full.y_bounds(600.0, 100.0), (0.0, 500.0));
    }
}
