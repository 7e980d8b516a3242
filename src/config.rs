/// Gallery configuration
///
/// Read from `$GALLERY_CONFIG`, or `<config dir>/responsive-gallery/config.toml`
/// (e.g. `~/.config/responsive-gallery/config.toml` on Linux). Every field
/// has a default, so an absent file or a partial one is fine.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{GalleryError, Result};
use crate::resolve::{SizesPolicy, VariantScheme};
use crate::resolve::sizes::DEFAULT_SIZES;

pub const CONFIG_ENV: &str = "GALLERY_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Naming and sizing of generated variants
    pub variants: VariantScheme,
    /// Width-selection policy for images that don't specify one
    pub default_sizes: String,
    /// Shown when a content entry has no image
    pub placeholder: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variants: VariantScheme::default(),
            default_sizes: DEFAULT_SIZES.to_string(),
            placeholder: "/images/placeholder.jpg".to_string(),
        }
    }
}

impl Config {
    /// Where the config file is looked up when `$GALLERY_CONFIG` is unset
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("responsive-gallery");
            path.push("config.toml");
            path
        })
    }

    /// Load from the environment / default location, or fall back to defaults
    pub fn load_or_default() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(Self::default_path);

        match path {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| GalleryError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&raw).map_err(|source| GalleryError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let scheme = &self.variants;
        if scheme.encoding.trim().is_empty() {
            return Err(GalleryError::InvalidConfig("variant encoding is empty".into()));
        }
        if !(scheme.small_width < scheme.medium_width && scheme.medium_width < scheme.large_width) {
            return Err(GalleryError::InvalidConfig(format!(
                "variant widths must increase: {} / {} / {}",
                scheme.small_width, scheme.medium_width, scheme.large_width
            )));
        }
        if self.placeholder.trim().is_empty() {
            return Err(GalleryError::InvalidConfig("placeholder path is empty".into()));
        }
        self.sizes_policy()?;
        Ok(())
    }

    pub fn sizes_policy(&self) -> Result<SizesPolicy> {
        self.default_sizes.parse()
    }
}
