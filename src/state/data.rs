/// Per-tile gallery state
///
/// Each displayed image owns one `GalleryItem`, which owns its `Resolver`.
/// The item decides what to fetch and how to react to fetch results.
use iced::widget::image::Handle;
use tracing::debug;

use super::content::ContentEntry;
use crate::config::Config;
use crate::error::{Result, VariantUnavailable};
use crate::media::loader::LoadedImage;
use crate::resolve::{LoadFailureOutcome, Resolver, SizesPolicy};

/// Actions a tile can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryAction {
    /// Open the image with this id in the viewer
    Open(usize),
}

/// What a tile currently shows
#[derive(Debug, Clone)]
pub enum LoadStatus {
    /// Fetch in flight: skeleton
    Pending,
    Loaded {
        path: String,
        handle: Handle,
        width: u32,
        height: u32,
    },
    /// Variants and original both failed: placeholder
    Failed,
}

/// What to do after a fetch failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureStep {
    /// Fetch this path next
    Retry(String),
    /// Nothing left to try; show the placeholder
    GiveUp,
    /// The failure was for a path no longer offered
    Stale,
}

#[derive(Debug, Clone)]
pub struct GalleryItem {
    pub id: usize,
    pub resolver: Resolver<GalleryAction>,
    pub status: LoadStatus,
}

impl GalleryItem {
    pub fn from_entry(id: usize, entry: &ContentEntry, config: &Config) -> Result<Self> {
        let sizes: SizesPolicy = match entry.sizes.as_deref() {
            Some(sizes) => sizes.parse()?,
            None => config.sizes_policy()?,
        };

        let mut resolver = Resolver::new(entry.asset(&config.placeholder)?, entry.description())
            .priority(entry.priority)
            .sizes(sizes)
            .scheme(config.variants.clone())
            .on_press(GalleryAction::Open(id));
        if let Some(class) = &entry.class {
            resolver = resolver.class(class.clone());
        }

        Ok(Self {
            id,
            resolver,
            status: LoadStatus::Pending,
        })
    }

    /// Path to fetch for the current resolution state and viewport
    pub fn candidate(&self, viewport_width: f32) -> String {
        self.resolver.render().select(viewport_width, 1.0).to_string()
    }

    /// Show a fetched image. Returns `false` (and changes nothing) if the
    /// image is not one of the candidates this tile currently offers.
    pub fn on_loaded(&mut self, image: LoadedImage) -> bool {
        if !self.offers(&image.path) {
            debug!(id = self.id, path = %image.path, "ignoring image for another tile");
            return false;
        }

        debug!(id = self.id, path = %image.path, "tile loaded");
        self.status = LoadStatus::Loaded {
            handle: Handle::from_rgba(image.width, image.height, image.pixels),
            path: image.path,
            width: image.width,
            height: image.height,
        };
        true
    }

    fn offers(&self, path: &str) -> bool {
        self.resolver
            .render()
            .alternatives
            .values()
            .any(|offered| offered == path)
    }

    /// Feed a fetch failure to the resolver and decide what happens next
    pub fn on_failed(&mut self, error: &VariantUnavailable, viewport_width: f32) -> FailureStep {
        if !self.offers(&error.path) {
            return FailureStep::Stale;
        }

        match self.resolver.report_load_failure() {
            LoadFailureOutcome::FellBack => FailureStep::Retry(self.candidate(viewport_width)),
            LoadFailureOutcome::Exhausted => {
                self.status = LoadStatus::Failed;
                FailureStep::GiveUp
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, LoadStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GalleryError;
    use crate::resolve::{Loading, ResolutionState};

    fn entry(src: &str) -> ContentEntry {
        ContentEntry {
            slot: "events/hero".into(),
            src: Some(src.into()),
            alt: Some("Long table dinner".into()),
            ..ContentEntry::default()
        }
    }

    fn unavailable(path: &str) -> VariantUnavailable {
        VariantUnavailable {
            path: path.into(),
            reason: "no file".into(),
        }
    }

    #[test]
    fn builds_resolver_from_entry() {
        let mut e = entry("/images/kinship-119.jpg");
        e.priority = true;
        e.class = Some("rounded".into());
        let item = GalleryItem::from_entry(3, &e, &Config::default()).unwrap();

        let rendition = item.resolver.render();
        assert_eq!(rendition.description, "Long table dinner");
        assert_eq!(rendition.loading, Loading::Eager);
        assert_eq!(item.resolver.hints().on_press, Some(GalleryAction::Open(3)));
        assert_eq!(item.resolver.hints().class.as_deref(), Some("rounded"));
        assert!(item.is_pending());
    }

    #[test]
    fn invalid_entry_sizes_are_reported() {
        let mut e = entry("/a.jpg");
        e.sizes = Some("wide".into());
        assert!(matches!(
            GalleryItem::from_entry(0, &e, &Config::default()),
            Err(GalleryError::InvalidSizes { .. })
        ));
    }

    #[test]
    fn failure_walks_variant_then_original_then_placeholder() {
        let mut item = GalleryItem::from_entry(0, &entry("/images/kinship-119.jpg"), &Config::default()).unwrap();

        let first = item.candidate(400.0);
        assert_eq!(first, "/images/kinship-119-xs.webp");

        let step = item.on_failed(&unavailable(&first), 400.0);
        assert_eq!(step, FailureStep::Retry("/images/kinship-119.jpg".into()));
        assert_eq!(item.resolver.state(), ResolutionState::Fallback);

        // late failure for the variant must not exhaust the original
        assert_eq!(item.on_failed(&unavailable(&first), 400.0), FailureStep::Stale);

        assert_eq!(
            item.on_failed(&unavailable("/images/kinship-119.jpg"), 400.0),
            FailureStep::GiveUp
        );
        assert!(matches!(item.status, LoadStatus::Failed));
    }

    #[test]
    fn loaded_image_replaces_skeleton() {
        let mut item = GalleryItem::from_entry(0, &entry("/a.jpg"), &Config::default()).unwrap();
        assert!(item.on_loaded(LoadedImage {
            path: "/a-md.webp".into(),
            width: 2,
            height: 1,
            pixels: vec![0; 8],
        }));

        match &item.status {
            LoadStatus::Loaded { path, width, height, .. } => {
                assert_eq!(path, "/a-md.webp");
                assert_eq!((*width, *height), (2, 1));
            }
            other => panic!("expected loaded, got {other:?}"),
        }
    }

    #[test]
    fn image_from_a_previous_scan_is_ignored() {
        // ids restart at 0 on every scan, so a late result can reach a new tile
        let mut item = GalleryItem::from_entry(0, &entry("/folder_b/b.jpg"), &Config::default()).unwrap();

        let accepted = item.on_loaded(LoadedImage {
            path: "/folder_a/a-xs.webp".into(),
            width: 1,
            height: 1,
            pixels: vec![0; 4],
        });

        assert!(!accepted);
        assert!(item.is_pending());
    }

    #[test]
    fn variant_arriving_after_fallback_is_ignored() {
        let mut item = GalleryItem::from_entry(0, &entry("/b.jpg"), &Config::default()).unwrap();
        let variant = item.candidate(400.0);
        item.on_failed(&unavailable(&variant), 400.0);

        assert!(!item.on_loaded(LoadedImage {
            path: variant,
            width: 1,
            height: 1,
            pixels: vec![0; 4],
        }));
        assert!(item.on_loaded(LoadedImage {
            path: "/b.jpg".into(),
            width: 1,
            height: 1,
            pixels: vec![0; 4],
        }));
    }
}
