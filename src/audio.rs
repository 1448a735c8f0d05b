//! Sound playback through HTML audio elements
//!
//! Fire-and-forget: each cue plays on a fresh clone of the loaded element so
//! overlapping blasts don't cut each other off, and a rejected `play()`
//! (autoplay policy, busy device) is logged and dropped.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use crate::assets::{AssetProvider, SoundKey};
use crate::platform::WebAssets;

/// Audio manager for the game
pub struct AudioManager {
    assets: Rc<WebAssets>,
    volume: f32,
}

impl AudioManager {
    pub fn new(assets: Rc<WebAssets>, volume: f32) -> Self {
        Self {
            assets,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Play a sound cue
    pub fn play(&self, key: SoundKey) {
        if self.volume <= 0.0 {
            return;
        }

        let Some(source) = self.assets.sound(key) else {
            log::warn!("Sound '{}' not loaded", key.as_str());
            return;
        };

        let Some(voice) = source
            .clone_node()
            .ok()
            .and_then(|node| node.dyn_into::<HtmlAudioElement>().ok())
        else {
            return;
        };
        voice.set_volume(self.volume as f64);

        match voice.play() {
            Ok(promise) => {
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::debug!("Sound playback rejected: {:?}", e);
                    }
                });
            }
            Err(e) => log::debug!("Sound playback failed: {:?}", e),
        }
    }
}
