//! Startup configuration for the zone runtime.
//!
//! The zone list is read once from `zones.ron` in the asset folder, located the
//! same way Bevy's file asset reader finds it. When the file is absent the
//! built-in layout is used instead.
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::zone::{Zone, ZoneName};

/// Config file name inside the asset folder.
pub const CONFIG_FILE: &str = "zones.ron";
const ASSET_FOLDER: &str = "assets";

/// Opacity change per second of the fade overlay.
pub const DEFAULT_FADE_RATE: f32 = 1.0;

/// Location of the zone config. Native builds resolve it against
/// `BEVY_ASSET_ROOT`, `CARGO_MANIFEST_DIR` or the executable directory, like
/// `AssetPlugin` does, rather than the working directory.
pub fn config_path() -> PathBuf {
    #[cfg(not(target_arch = "wasm32"))]
    let base = bevy::asset::io::file::FileAssetReader::get_base_path();
    #[cfg(target_arch = "wasm32")]
    let base = PathBuf::new();
    base.join(ASSET_FOLDER).join(CONFIG_FILE)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse zone config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("fade rate must be a positive number, got {0}")]
    InvalidFadeRate(f32),
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    #[serde(default = "default_fade_rate")]
    pub fade_rate: f32,
    #[serde(default = "default_starting_zone")]
    pub starting_zone: ZoneName,
    pub zones: Vec<Zone>,
}

fn default_fade_rate() -> f32 {
    DEFAULT_FADE_RATE
}

fn default_starting_zone() -> ZoneName {
    ZoneName::Battlefield
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            fade_rate: DEFAULT_FADE_RATE,
            starting_zone: ZoneName::Battlefield,
            zones: vec![
                Zone::new(ZoneName::Battlefield, 96.0).with_active(true),
                Zone::new(ZoneName::SullenVillage, 64.0),
                Zone::new(ZoneName::ThrivingVillage, 64.0),
                Zone::new(ZoneName::CastleOfMan, 80.0),
                Zone::new(ZoneName::FortressOfDark, 128.0),
            ],
        }
    }
}

impl ZoneConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: ZoneConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the config at `path`, falling back to the default layout if the file
    /// does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(source) => {
                let config = Self::from_ron_str(&source)?;
                info!(
                    "Loaded {} zones from {}",
                    config.zones.len(),
                    path.display()
                );
                Ok(config)
            }
            Err(err)
                if matches!(
                    err.kind(),
                    std::io::ErrorKind::NotFound | std::io::ErrorKind::Unsupported
                ) =>
            {
                warn!("No zone config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fade_rate.is_finite() || self.fade_rate <= 0.0 {
            return Err(ConfigError::InvalidFadeRate(self.fade_rate));
        }
        Ok(())
    }
}
