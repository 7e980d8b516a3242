/// Content source
///
/// A content manifest lists the images a gallery shows: one entry per
/// display slot, with its image path and descriptive text. Entries without
/// an image resolve to the configured placeholder.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

use crate::error::Result;
use crate::media::variants::is_original;
use crate::resolve::{AssetReference, VariantScheme};

/// One display slot
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ContentEntry {
    /// Where the image is shown, e.g. `rooms/hero`
    pub slot: String,
    /// Image path; absent when the content has no image yet
    pub src: Option<String>,
    /// Human-readable description
    pub alt: Option<String>,
    #[serde(default)]
    pub priority: bool,
    /// Width-selection policy for this slot
    pub sizes: Option<String>,
    /// Visual class for the rendering layer
    pub class: Option<String>,
}

impl ContentEntry {
    /// The entry's image, or `placeholder` if it has none
    pub fn asset(&self, placeholder: &str) -> Result<AssetReference> {
        match self.src.as_deref().map(str::trim).filter(|src| !src.is_empty()) {
            Some(src) => AssetReference::new(src),
            None => AssetReference::new(placeholder),
        }
    }

    /// The entry's description, or one derived from the slot name
    pub fn description(&self) -> String {
        match self.alt.as_deref().map(str::trim).filter(|alt| !alt.is_empty()) {
            Some(alt) => alt.to_string(),
            None => humanize(self.slot.rsplit('/').next().unwrap_or(&self.slot)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ContentManifest {
    #[serde(default)]
    pub entries: Vec<ContentEntry>,
}

impl ContentManifest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

/// `kinship-119` -> `kinship 119`
fn humanize(stem: &str) -> String {
    stem.replace(['-', '_'], " ").trim().to_string()
}

/// Build a manifest from the originals under `root`, ordered by path.
///
/// Paths are logical (`/rooms/suite.jpg`), relative to `root`. The first
/// image is treated as the hero and loaded eagerly.
pub fn scan_folder(root: &Path, scheme: &VariantScheme) -> ContentManifest {
    let mut entries = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || !is_original(path, scheme) {
            continue;
        }
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };

        let slot = relative_logical(&relative.with_extension(""));
        let stem = path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        entries.push(ContentEntry {
            src: Some(format!("/{}", relative_logical(relative))),
            alt: Some(humanize(&stem)),
            priority: entries.is_empty(),
            slot,
            ..ContentEntry::default()
        });
    }

    info!(root = %root.display(), images = entries.len(), "scanned folder");
    ContentManifest { entries }
}

fn relative_logical(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// [`scan_folder`] on a blocking thread, for the UI
pub async fn scan_folder_async(root: PathBuf, scheme: VariantScheme) -> std::result::Result<ContentManifest, String> {
    tokio::task::spawn_blocking(move || scan_folder(&root, &scheme))
        .await
        .map_err(|e| format!("Task join error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GalleryError;

    #[test]
    fn parses_manifest_with_missing_fields() {
        let manifest = ContentManifest::from_json(
            r#"{ "entries": [
                { "slot": "events/hero", "src": "/images/events-page/Gatherings/kinship-119.jpg",
                  "alt": "Long table dinner", "priority": true, "class": "rounded" },
                { "slot": "cafe/latte-art" }
            ] }"#,
        )
        .unwrap();

        assert_eq!(manifest.entries.len(), 2);
        assert!(manifest.entries[0].priority);
        assert_eq!(manifest.entries[0].class.as_deref(), Some("rounded"));
        assert_eq!(manifest.entries[1].src, None);
        assert!(!manifest.entries[1].priority);
    }

    #[test]
    fn absent_image_uses_placeholder() {
        let entry = ContentEntry {
            slot: "cafe/latte-art".into(),
            src: Some("  ".into()),
            ..ContentEntry::default()
        };
        assert_eq!(entry.asset("/images/placeholder.jpg").unwrap().as_str(), "/images/placeholder.jpg");
        assert_eq!(entry.description(), "latte art");
        assert!(matches!(entry.asset(""), Err(GalleryError::EmptyReference)));
    }

    #[test]
    fn explicit_alt_wins() {
        let entry = ContentEntry {
            slot: "rooms/suite".into(),
            src: Some("/rooms/suite.jpg".into()),
            alt: Some("Garden suite".into()),
            ..ContentEntry::default()
        };
        assert_eq!(entry.asset("/p.jpg").unwrap().as_str(), "/rooms/suite.jpg");
        assert_eq!(entry.description(), "Garden suite");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            ContentManifest::from_json("{ entries: "),
            Err(GalleryError::Manifest(_))
        ));
    }

    #[test]
    fn scan_lists_originals_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("rooms")).unwrap();
        for name in ["rooms/garden_suite.jpg", "rooms/garden_suite-md.webp", "lobby.png", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let manifest = scan_folder(dir.path(), &VariantScheme::default());
        let srcs: Vec<_> = manifest.entries.iter().filter_map(|e| e.src.as_deref()).collect();
        assert_eq!(srcs, vec!["/lobby.png", "/rooms/garden_suite.jpg"]);

        let suite = &manifest.entries[1];
        assert_eq!(suite.slot, "rooms/garden_suite");
        assert_eq!(suite.alt.as_deref(), Some("garden suite"));
        assert!(manifest.entries[0].priority);
        assert!(!suite.priority);
    }

    #[test]
    fn scan_keeps_variant_named_images_without_an_original() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["terrace-lg.webp", "suite.jpg", "suite-md.WEBP"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let manifest = scan_folder(dir.path(), &VariantScheme::default());
        let srcs: Vec<_> = manifest.entries.iter().filter_map(|e| e.src.as_deref()).collect();
        assert_eq!(srcs, vec!["/suite.jpg", "/terrace-lg.webp"]);
    }
}
