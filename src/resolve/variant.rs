/// Width-specific variants derived from an asset reference
use serde::{Deserialize, Serialize};

use super::asset::{normalize, RECOGNIZED_EXTENSIONS};

/// The three pre-generated sizes of every image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariantSize {
    Small,
    Medium,
    Large,
}

impl VariantSize {
    pub const ALL: [VariantSize; 3] = [VariantSize::Small, VariantSize::Medium, VariantSize::Large];

    /// File-name suffix appended to the base identifier
    pub fn suffix(self) -> &'static str {
        match self {
            VariantSize::Small => "-xs",
            VariantSize::Medium => "-md",
            VariantSize::Large => "-lg",
        }
    }
}

/// How variants are named and sized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantScheme {
    /// Extension of generated variants, without the dot
    pub encoding: String,
    /// Extensions stripped from a reference before suffixing
    pub recognized_extensions: Vec<String>,
    pub small_width: u32,
    pub medium_width: u32,
    pub large_width: u32,
}

impl Default for VariantScheme {
    fn default() -> Self {
        Self {
            encoding: "webp".to_string(),
            recognized_extensions: RECOGNIZED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            small_width: 640,
            medium_width: 1024,
            large_width: 1920,
        }
    }
}

impl VariantScheme {
    /// Target width of a variant in pixels
    pub fn width(&self, size: VariantSize) -> u32 {
        match size {
            VariantSize::Small => self.small_width,
            VariantSize::Medium => self.medium_width,
            VariantSize::Large => self.large_width,
        }
    }

    /// Base identifier for a reference under this scheme
    pub fn base<'a>(&self, reference: &'a str) -> &'a str {
        normalize(reference, &self.recognized_extensions)
    }

    /// Derived path for one variant of `reference`
    pub fn variant_path(&self, reference: &str, size: VariantSize) -> String {
        format!("{}{}.{}", self.base(reference), size.suffix(), self.encoding)
    }

    /// Base identifier a variant-named path would belong to:
    /// `room-md.webp` -> `room`. The encoding extension matches case-insensitively.
    ///
    /// This only looks at the name. A user's own `terrace-lg.webp` matches too;
    /// whether a sibling original exists decides if it really is generated.
    pub fn variant_base<'a>(&self, path: &'a str) -> Option<&'a str> {
        let dot = path.rfind('.')?;
        if !path[dot + 1..].eq_ignore_ascii_case(&self.encoding) {
            return None;
        }
        let stem = &path[..dot];
        VariantSize::ALL
            .iter()
            .find_map(|size| stem.strip_suffix(size.suffix()))
    }

    /// True if `path` is named like a generated variant (e.g. `room-md.webp`)
    pub fn is_variant_path(&self, path: &str) -> bool {
        self.variant_base(path).is_some()
    }
}

/// The small/medium/large candidates for one reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSet {
    pub small: String,
    pub medium: String,
    pub large: String,
}

impl VariantSet {
    pub fn derive(reference: &str, scheme: &VariantScheme) -> Self {
        Self {
            small: scheme.variant_path(reference, VariantSize::Small),
            medium: scheme.variant_path(reference, VariantSize::Medium),
            large: scheme.variant_path(reference, VariantSize::Large),
        }
    }

    pub fn get(&self, size: VariantSize) -> &str {
        match size {
            VariantSize::Small => &self.small,
            VariantSize::Medium => &self.medium,
            VariantSize::Large => &self.large,
        }
    }

    /// Variants paired with their target widths, smallest first
    pub fn with_widths<'a>(
        &'a self,
        scheme: &'a VariantScheme,
    ) -> impl Iterator<Item = (u32, &'a str)> + 'a {
        VariantSize::ALL
            .into_iter()
            .map(move |size| (scheme.width(size), self.get(size)))
    }
}
