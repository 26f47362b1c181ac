//! Asset loading
//!
//! Images are mandatory: a missing or unreadable image aborts startup.
//! Audio clips are optional: a missing clip is reported once and the game
//! runs without it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use image::imageops::FilterType;
use thiserror::Error;

use crate::consts::*;
use crate::sim::FruitKind;

pub const BACKGROUND_FILE: &str = "background.jpg";
pub const SLICE_SOUND_FILE: &str = "Slice.wav";
pub const MUSIC_FILE: &str = "background_music.mp3";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("file {name} not found in {}", .dir.display())]
    Missing { name: String, dir: PathBuf },
    #[error("failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl AssetError {
    /// File name of the asset that failed
    pub fn asset_name(&self) -> &str {
        match self {
            AssetError::Missing { name, .. }
            | AssetError::Decode { name, .. }
            | AssetError::Read { name, .. } => name,
        }
    }
}

/// Encoded audio clip, shared with the audio thread
pub type AudioClip = Arc<[u8]>;

/// Everything loaded from the asset directory, decoded and scaled
pub struct AssetCatalog {
    pub background: RgbaImage,
    /// Indexed by `FruitKind::index`
    pub fruits: [RgbaImage; 3],
    pub slice_sound: Option<AudioClip>,
    pub music: Option<AudioClip>,
}

impl AssetCatalog {
    /// Load all assets from `root`.
    ///
    /// Mandatory images are loaded first, background then fruits, and the
    /// first failure is returned.
    pub fn load(root: &Path) -> Result<Self, AssetError> {
        let background = load_image(root, BACKGROUND_FILE, SCREEN_WIDTH, SCREEN_HEIGHT)?;

        let fruit_size = FRUIT_SIZE as u32;
        let fruits = [
            load_image(root, FruitKind::Apple.file_name(), fruit_size, fruit_size)?,
            load_image(root, FruitKind::Orange.file_name(), fruit_size, fruit_size)?,
            load_image(root, FruitKind::Banana.file_name(), fruit_size, fruit_size)?,
        ];

        let slice_sound = match load_clip(root, SLICE_SOUND_FILE) {
            Ok(clip) => Some(clip),
            Err(e) => {
                log::warn!("Slice sound effect unavailable ({e}). Proceeding without sound.");
                None
            }
        };
        let music = match load_clip(root, MUSIC_FILE) {
            Ok(clip) => Some(clip),
            Err(e) => {
                log::warn!("Background music unavailable ({e}). Proceeding without music.");
                None
            }
        };

        log::info!("Loaded assets from {}", root.display());

        Ok(Self {
            background,
            fruits,
            slice_sound,
            music,
        })
    }

    /// Sprite for a fruit variant
    pub fn fruit(&self, kind: FruitKind) -> &RgbaImage {
        &self.fruits[kind.index()]
    }
}

/// Decode an image and scale it to exactly `width` x `height`
fn load_image(root: &Path, name: &str, width: u32, height: u32) -> Result<RgbaImage, AssetError> {
    let path = root.join(name);
    if !path.is_file() {
        return Err(AssetError::Missing {
            name: name.to_string(),
            dir: root.to_path_buf(),
        });
    }

    let img = image::open(&path).map_err(|source| AssetError::Decode {
        name: name.to_string(),
        source,
    })?;

    if img.width() == width && img.height() == height {
        Ok(img.to_rgba8())
    } else {
        Ok(img.resize_exact(width, height, FilterType::Triangle).to_rgba8())
    }
}

/// Read an encoded audio file; decoding happens at playback
fn load_clip(root: &Path, name: &str) -> Result<AudioClip, AssetError> {
    let path = root.join(name);
    if !path.is_file() {
        return Err(AssetError::Missing {
            name: name.to_string(),
            dir: root.to_path_buf(),
        });
    }

    std::fs::read(&path)
        .map(AudioClip::from)
        .map_err(|source| AssetError::Read {
            name: name.to_string(),
            source,
        })
}
