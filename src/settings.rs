//! Game settings and preferences
//!
//! Loaded once at startup from an optional JSON file, then overridden by the
//! environment and command line.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::SessionConfig;

/// Environment variable naming an explicit settings file
pub const CONFIG_ENV: &str = "FRUIT_CUTTER_CONFIG";
/// Environment variable overriding the asset directory
pub const ASSETS_ENV: &str = "FRUIT_CUTTER_ASSETS";
/// Settings file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "fruit_cutter.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding images and audio
    pub asset_root: PathBuf,

    // === Session ===
    /// Countdown length in seconds
    pub time_limit_secs: u32,
    /// Fruits on screen at once
    pub pool_size: usize,
    /// Frame pacing target
    pub target_fps: u32,
    /// Fixed RNG seed (random per run when unset)
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),

            time_limit_secs: TIME_LIMIT_SECS,
            pool_size: POOL_SIZE,
            target_fps: TARGET_FPS,
            seed: None,

            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.5,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve settings for this run.
    ///
    /// Defaults, then the settings file, then `FRUIT_CUTTER_ASSETS`, then the
    /// first command-line argument as the asset root.
    pub fn load(args: &[String]) -> Result<Self, SettingsError> {
        let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from).or_else(|| {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.is_file().then_some(local)
        });

        let mut settings = match config_path {
            Some(path) => {
                let settings = Self::from_file(&path)?;
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        };

        if let Some(root) = std::env::var_os(ASSETS_ENV) {
            settings.asset_root = PathBuf::from(root);
        }
        if let Some(root) = args.get(1) {
            settings.asset_root = PathBuf::from(root);
        }

        Ok(settings)
    }

    /// Clamp out-of-range values, warning about each one
    fn sanitize(&mut self) {
        if self.pool_size == 0 {
            log::warn!("pool_size must be at least 1, using 1");
            self.pool_size = 1;
        }
        if self.target_fps == 0 {
            log::warn!("target_fps must be at least 1, using {}", TARGET_FPS);
            self.target_fps = TARGET_FPS;
        }

        let (master, sfx, music) = (self.master_volume, self.sfx_volume, self.music_volume);
        self.set_master_volume(master);
        self.set_sfx_volume(sfx);
        self.set_music_volume(music);
        for (name, requested, clamped) in [
            ("master_volume", master, self.master_volume),
            ("sfx_volume", sfx, self.sfx_volume),
            ("music_volume", music, self.music_volume),
        ] {
            if requested != clamped {
                log::warn!("{} out of range ({}), clamped to {}", name, requested, clamped);
            }
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn effective_sfx_volume(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    pub fn effective_music_volume(&self) -> f32 {
        self.master_volume * self.music_volume
    }

    /// Session tunables for the simulation
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            time_limit_secs: self.time_limit_secs,
            pool_size: self.pool_size,
        }
    }

    /// Time between frames at the target rate
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.time_limit_secs, 60);
        assert_eq!(settings.pool_size, 3);
        assert_eq!(settings.target_fps, 60);
        assert_eq!(settings.asset_root, PathBuf::from("assets"));
        assert!((settings.effective_music_volume() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "asset_root": "/opt/fruit", "seed": 7 }"#).unwrap();
        assert_eq!(settings.asset_root, PathBuf::from("/opt/fruit"));
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.pool_size, POOL_SIZE);
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let settings =
            Settings::from_json(r#"{ "pool_size": 0, "target_fps": 0, "sfx_volume": 3.0 }"#)
                .unwrap();
        assert_eq!(settings.pool_size, 1);
        assert_eq!(settings.target_fps, TARGET_FPS);
        assert_eq!(settings.sfx_volume, 1.0);
    }

    #[test]
    fn test_file_volumes_go_through_setters() {
        let settings =
            Settings::from_json(r#"{ "master_volume": 2.0, "music_volume": -0.5 }"#).unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.music_volume, 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
        assert_eq!(settings.effective_sfx_volume(), 1.0);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Settings::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[test]
    fn test_volume_setters_clamp() {
        let mut settings = Settings::default();
        settings.set_master_volume(2.0);
        settings.set_sfx_volume(-1.0);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.effective_sfx_volume(), 0.0);
    }

    #[test]
    fn test_round_trip_json() {
        let mut settings = Settings::default();
        settings.seed = Some(42);
        settings.set_music_volume(0.25);
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_frame_interval() {
        let settings = Settings::default();
        let interval = settings.frame_interval();
        assert!((interval.as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }
}
