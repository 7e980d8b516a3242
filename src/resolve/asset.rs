/// Logical image identifiers and extension normalization
use std::fmt;
use std::str::FromStr;

use crate::error::{GalleryError, Result};

/// Extensions stripped from a reference before variant suffixes are added
pub const RECOGNIZED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Strip one trailing recognized extension (case-insensitive).
///
/// Only the final extension is considered, so `a.jpg.png` becomes `a.jpg`.
/// References without a recognized extension are returned unchanged.
pub fn normalize<'a, S: AsRef<str>>(reference: &'a str, recognized: &[S]) -> &'a str {
    let Some(dot) = reference.rfind('.') else {
        return reference;
    };

    let extension = &reference[dot + 1..];
    if recognized
        .iter()
        .any(|known| known.as_ref().eq_ignore_ascii_case(extension))
    {
        &reference[..dot]
    } else {
        reference
    }
}

/// A logical path to an image, e.g. `/images/rooms/suite.jpg`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetReference(String);

impl AssetReference {
    /// Wrap a path. Empty (or whitespace-only) paths are rejected.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(GalleryError::EmptyReference);
        }
        Ok(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The extension of the final path segment, if any
    pub fn extension(&self) -> Option<&str> {
        let file = self.0.rsplit('/').next().unwrap_or(&self.0);
        file.rfind('.').map(|dot| &file[dot + 1..]).filter(|ext| !ext.is_empty())
    }

    /// The reference with its recognized extension removed
    pub fn base<S: AsRef<str>>(&self, recognized: &[S]) -> &str {
        normalize(&self.0, recognized)
    }
}

impl FromStr for AssetReference {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for AssetReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_recognized_extension() {
        assert_eq!(
            normalize("/images/events-page/Gatherings/kinship-119.jpg", &RECOGNIZED_EXTENSIONS),
            "/images/events-page/Gatherings/kinship-119"
        );
        assert_eq!(normalize("/a/b.PNG", &RECOGNIZED_EXTENSIONS), "/a/b");
        assert_eq!(normalize("/a/b.JpEg", &RECOGNIZED_EXTENSIONS), "/a/b");
    }

    #[test]
    fn leaves_unknown_or_missing_extension_alone() {
        assert_eq!(normalize("/images/foo", &RECOGNIZED_EXTENSIONS), "/images/foo");
        assert_eq!(normalize("/images/foo.gif", &RECOGNIZED_EXTENSIONS), "/images/foo.gif");
        assert_eq!(normalize("/images.v2/foo", &RECOGNIZED_EXTENSIONS), "/images.v2/foo");
    }

    #[test]
    fn strips_only_the_last_extension() {
        assert_eq!(normalize("/a/b.jpg.png", &RECOGNIZED_EXTENSIONS), "/a/b.jpg");
    }

    #[test]
    fn empty_reference_is_rejected() {
        assert!(matches!(AssetReference::new(""), Err(GalleryError::EmptyReference)));
        assert!(matches!(AssetReference::new("   "), Err(GalleryError::EmptyReference)));
    }

    #[test]
    fn extension_looks_at_last_segment() {
        let r = AssetReference::new("/images.v2/foo").unwrap();
        assert_eq!(r.extension(), None);

        let r: AssetReference = "/rooms/suite.JPG".parse().unwrap();
        assert_eq!(r.extension(), Some("JPG"));
        assert_eq!(r.base(&RECOGNIZED_EXTENSIONS), "/rooms/suite");
        assert_eq!(r.to_string(), "/rooms/suite.JPG");
    }

    proptest! {
        #[test]
        fn normalization_removes_exactly_the_extension(
            base in "/[a-z0-9_/-]{1,24}",
            ext in prop::sample::select(vec!["jpg", "JPG", "jpeg", "png", "Png", "webp"]),
        ) {
            let reference = format!("{base}.{ext}");
            let once = normalize(&reference, &RECOGNIZED_EXTENSIONS);
            prop_assert_eq!(once, base.as_str());
            prop_assert_eq!(normalize(once, &RECOGNIZED_EXTENSIONS), once);
        }
    }
}
