//! Error types
//!
//! Per-frame simulation never fails; errors only surface at the edges
//! (config parsing and state transitions driven by the UI).

use thiserror::Error;

use crate::sim::GamePhase;

/// Configuration could not be parsed or failed validation
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse game config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid game config: {0}")]
    Invalid(String),
}

/// Rejected game loop transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("assets are not loaded yet")]
    AssetsNotReady,
    #[error("cannot move from {from:?} to {to:?}")]
    InvalidTransition { from: GamePhase, to: GamePhase },
}

/// Browser API failure while setting up the page
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("missing element #{0}")]
    MissingElement(String),
    #[error("browser call failed: {0}")]
    Js(String),
}
