//! Asset keys and the provider interface
//!
//! The simulation refers to images and sounds by key only. Whoever owns the
//! decoded handles (browser elements, test stubs) implements `AssetProvider`
//! and resolves keys at draw/play time.

use serde::{Deserialize, Serialize};

/// Sprite sheets used by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageKey {
    Raven,
    Blast,
}

impl ImageKey {
    pub const ALL: [ImageKey; 2] = [ImageKey::Raven, ImageKey::Blast];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageKey::Raven => "raven",
            ImageKey::Blast => "blast",
        }
    }
}

/// Sound cues used by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundKey {
    Blast,
}

impl SoundKey {
    pub const ALL: [SoundKey; 1] = [SoundKey::Blast];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundKey::Blast => "blast",
        }
    }
}

/// Where each asset is fetched from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    pub images: Vec<(ImageKey, String)>,
    pub sounds: Vec<(SoundKey, String)>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            images: vec![
                (ImageKey::Raven, "/img/raven.png".to_string()),
                (ImageKey::Blast, "/img/boom.png".to_string()),
            ],
            sounds: vec![(SoundKey::Blast, "/audio/blast.wav".to_string())],
        }
    }
}

impl AssetManifest {
    /// Total number of assets that must signal ready
    pub fn len(&self) -> usize {
        self.images.len() + self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if every key the core draws or plays has an entry
    pub fn covers_core_keys(&self) -> bool {
        ImageKey::ALL
            .iter()
            .all(|k| self.images.iter().any(|(key, _)| key == k))
            && SoundKey::ALL
                .iter()
                .all(|k| self.sounds.iter().any(|(key, _)| key == k))
    }
}

/// Resolves keys to decoded, ready-to-use handles
///
/// Once `is_ready` returns true, `image` and `sound` must succeed for every
/// key in `ImageKey::ALL` / `SoundKey::ALL`. An asset that never loads keeps
/// the provider unready forever; there is no timeout.
pub trait AssetProvider {
    type Image;
    type Sound;

    fn image(&self, key: ImageKey) -> Option<&Self::Image>;
    fn sound(&self, key: SoundKey) -> Option<&Self::Sound>;
    fn is_ready(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest_covers_core_keys() {
        let manifest = AssetManifest::default();
        assert_eq!(manifest.len(), 3);
        assert!(manifest.covers_core_keys());

        let partial = AssetManifest {
            images: vec![(ImageKey::Raven, "/img/raven.png".to_string())],
            sounds: Vec::new(),
        };
        assert!(!partial.covers_core_keys());
    }

    #[test]
    fn test_key_names() {
        assert_eq!(ImageKey::Raven.as_str(), "raven");
        assert_eq!(ImageKey::Blast.as_str(), "blast");
        assert_eq!(SoundKey::Blast.as_str(), "blast");
    }
}
