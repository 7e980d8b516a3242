/// Responsive image resolution
///
/// This module handles:
/// - Normalizing image references (asset.rs)
/// - Deriving xs/md/lg variant paths (variant.rs)
/// - Width-selection policies (sizes.rs)
/// - The per-image resolver and its one-shot fallback (resolver.rs, state.rs)

pub mod asset;
pub mod resolver;
pub mod sizes;
pub mod state;
pub mod variant;

pub use asset::AssetReference;
pub use resolver::{CandidateKey, Loading, PresentationHints, Rendition, Resolver};
pub use sizes::SizesPolicy;
pub use state::{LoadFailureOutcome, ResolutionState};
pub use variant::{VariantScheme, VariantSet, VariantSize};
