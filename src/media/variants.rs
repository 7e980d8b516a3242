/// Variant generation
///
/// Produces the xs/md/lg files a resolver asks for, next to each original:
/// `suite.jpg` -> `suite-xs.webp`, `suite-md.webp`, `suite-lg.webp`.
/// Variants are width-constrained and never upscaled.
use image::{imageops::FilterType, DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::{GalleryError, Result};
use crate::resolve::{VariantScheme, VariantSet, VariantSize};

/// Paths of the three files written for one original
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedVariants {
    pub small: PathBuf,
    pub medium: PathBuf,
    pub large: PathBuf,
}

/// Outcome of a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariantReport {
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Filesystem paths of the variants of `original`
pub fn variant_paths(original: &Path, scheme: &VariantScheme) -> GeneratedVariants {
    let set = VariantSet::derive(&original.to_string_lossy(), scheme);
    GeneratedVariants {
        small: PathBuf::from(set.get(VariantSize::Small)),
        medium: PathBuf::from(set.get(VariantSize::Medium)),
        large: PathBuf::from(set.get(VariantSize::Large)),
    }
}

/// Decode `original` once and write all three variants
pub fn generate_variants(original: &Path, scheme: &VariantScheme) -> Result<GeneratedVariants> {
    let format = ImageFormat::from_extension(&scheme.encoding)
        .ok_or_else(|| GalleryError::UnsupportedEncoding(scheme.encoding.clone()))?;

    let img = image::open(original).map_err(|source| GalleryError::Decode {
        path: original.to_path_buf(),
        source,
    })?;

    let paths = variant_paths(original, scheme);
    generate_variant(&img, scheme.width(VariantSize::Small), &paths.small, format)?;
    generate_variant(&img, scheme.width(VariantSize::Medium), &paths.medium, format)?;
    generate_variant(&img, scheme.width(VariantSize::Large), &paths.large, format)?;

    info!(
        original = %original.display(),
        width = img.width(),
        height = img.height(),
        "generated variants"
    );
    Ok(paths)
}

fn generate_variant(
    img: &DynamicImage,
    target_width: u32,
    path: &Path,
    format: ImageFormat,
) -> Result<()> {
    let resized = if img.width() > target_width {
        img.resize(target_width, u32::MAX, FilterType::Lanczos3)
    } else {
        img.clone()
    };

    // The WebP encoder only takes 8-bit RGB(A)
    DynamicImage::ImageRgba8(resized.to_rgba8())
        .save_with_format(path, format)
        .map_err(|source| GalleryError::Encode {
            path: path.to_path_buf(),
            source,
        })
}

/// True for files that should get variants: recognized extension, not a variant itself.
///
/// A variant-named file (`terrace-lg.webp`) only counts as generated when an
/// original it could come from (`terrace.jpg`, `terrace.PNG`, ...) sits next to it.
pub fn is_original(path: &Path, scheme: &VariantScheme) -> bool {
    let Some(ext) = path.extension().map(|e| e.to_string_lossy()) else {
        return false;
    };
    let recognized = scheme
        .recognized_extensions
        .iter()
        .any(|known| known.eq_ignore_ascii_case(&ext));
    if !recognized {
        return false;
    }

    let path_str = path.to_string_lossy();
    match scheme.variant_base(&path_str) {
        Some(base) => !has_original(base, scheme),
        None => true,
    }
}

fn has_original(base: &str, scheme: &VariantScheme) -> bool {
    scheme.recognized_extensions.iter().any(|ext| {
        [ext.to_ascii_lowercase(), ext.to_ascii_uppercase()]
            .iter()
            .any(|ext| Path::new(&format!("{base}.{ext}")).is_file())
    })
}

/// Generate variants for every original under `root`.
///
/// Originals whose three variants already exist are skipped; failures are
/// logged and counted, not fatal.
pub fn generate_folder(root: &Path, scheme: &VariantScheme) -> Result<VariantReport> {
    ImageFormat::from_extension(&scheme.encoding)
        .ok_or_else(|| GalleryError::UnsupportedEncoding(scheme.encoding.clone()))?;

    let mut report = VariantReport::default();

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

        let existing = variant_paths(path, scheme);
        if existing.small.exists() && existing.medium.exists() && existing.large.exists() {
            report.skipped += 1;
            continue;
        }

        match generate_variants(path, scheme) {
            Ok(_) => report.generated += 1,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "variant generation failed");
                report.failed += 1;
            }
        }
    }

    info!(
        root = %root.display(),
        generated = report.generated,
        skipped = report.skipped,
        failed = report.failed,
        "variant generation complete"
    );
    Ok(report)
}

/// [`generate_folder`] on a blocking thread, for the UI
pub async fn generate_folder_async(
    root: PathBuf,
    scheme: VariantScheme,
) -> std::result::Result<VariantReport, String> {
    tokio::task::spawn_blocking(move || generate_folder(&root, &scheme))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
        .map_err(|e| e.to_string())
}
