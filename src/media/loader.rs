/// Candidate loader
///
/// This is the fetch half of the rendering layer: it maps a logical path to a
/// file under the asset root and decodes it. Any failure comes back as a
/// [`VariantUnavailable`], which the caller feeds to its resolver.
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::debug;

use crate::error::VariantUnavailable;

/// A decoded RGBA image, ready to hand to the UI
#[derive(Clone)]
pub struct LoadedImage {
    /// Logical path the pixels came from
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedImage")
            .field("path", &self.path)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// File backing a logical path. A leading `/` is relative to the asset root.
pub fn resolve_on_disk(asset_root: &Path, path: &str) -> PathBuf {
    asset_root.join(path.trim_start_matches('/'))
}

/// Load and decode one candidate off the UI thread
pub async fn load_candidate(
    asset_root: PathBuf,
    path: String,
) -> Result<LoadedImage, VariantUnavailable> {
    let requested = path.clone();

    // Decoding is CPU-bound
    task::spawn_blocking(move || load_candidate_blocking(&asset_root, &path))
        .await
        .map_err(|e| VariantUnavailable {
            path: requested,
            reason: format!("task join error: {e}"),
        })?
}

fn load_candidate_blocking(asset_root: &Path, path: &str) -> Result<LoadedImage, VariantUnavailable> {
    let unavailable = |reason: String| VariantUnavailable {
        path: path.to_string(),
        reason,
    };

    let file = resolve_on_disk(asset_root, path);
    if !file.is_file() {
        return Err(unavailable(format!("no file at {}", file.display())));
    }

    let rgba = image::open(&file)
        .map_err(|e| unavailable(e.to_string()))?
        .into_rgba8();

    debug!(path, width = rgba.width(), height = rgba.height(), "decoded candidate");

    Ok(LoadedImage {
        path: path.to_string(),
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}
