/// Image files on disk
///
/// This module handles:
/// - Loading and decoding candidates for display (loader.rs)
/// - Generating xs/md/lg variants from originals (variants.rs)

pub mod loader;
pub mod variants;
