//! Platform abstraction layer
//!
//! Backends for the render/collision surfaces and asset loading:
//! - `headless`: software surfaces (native runs and tests)
//! - `web`: canvas 2d surfaces and DOM asset loading (wasm32)

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::{DrawCommand, PixelBuffer, RecordingCanvas, StaticAssets};
#[cfg(target_arch = "wasm32")]
pub use web::{WebAssets, WebCanvas};
