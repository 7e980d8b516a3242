/// The responsive image resolver
///
/// A `Resolver` belongs to exactly one displayed image. It turns the image's
/// [`AssetReference`] into a [`Rendition`] (a primary candidate plus
/// width-keyed alternatives) and degrades to the original reference once the
/// rendering layer reports that a variant failed to load.
use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::asset::AssetReference;
use super::sizes::SizesPolicy;
use super::state::{LoadFailureOutcome, ResolutionState};
use super::variant::{VariantScheme, VariantSet};

/// Key of an alternative candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CandidateKey {
    /// Variant intended for slots up to this many pixels wide
    Width(u32),
    /// The unmodified original reference
    Original,
}

/// Loading hint for the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loading {
    /// Fetch immediately (above-the-fold, hero images)
    Eager,
    Lazy,
}

/// Optional presentation hints passed through to the rendering layer
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationHints<M> {
    /// Visual class, e.g. `rounded`
    pub class: Option<String>,
    /// Action emitted when the image is clicked
    pub on_press: Option<M>,
}

impl<M> Default for PresentationHints<M> {
    fn default() -> Self {
        Self {
            class: None,
            on_press: None,
        }
    }
}

/// Everything the rendering layer needs to display one image
#[derive(Debug, Clone, PartialEq)]
pub struct Rendition {
    pub primary: String,
    pub alternatives: BTreeMap<CandidateKey, String>,
    pub sizes: SizesPolicy,
    pub description: String,
    pub loading: Loading,
    pub state: ResolutionState,
}

impl Rendition {
    /// `srcset`-style listing: `a-xs.webp 640w, ...`, or the bare original
    pub fn srcset(&self) -> String {
        self.alternatives
            .iter()
            .map(|(key, path)| match key {
                CandidateKey::Width(w) => format!("{path} {w}w"),
                CandidateKey::Original => path.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Pick the candidate to fetch for a viewport.
    ///
    /// The smallest variant that covers the slot width (scaled by pixel
    /// density) wins; if none is wide enough, the largest one.
    pub fn select(&self, viewport_width: f32, pixel_density: f32) -> &str {
        let density = if pixel_density > 0.0 { pixel_density } else { 1.0 };
        let target = self.sizes.slot_width(viewport_width) * density;

        let widths: Vec<(u32, &str)> = self
            .alternatives
            .iter()
            .filter_map(|(key, path)| match key {
                CandidateKey::Width(w) => Some((*w, path.as_str())),
                CandidateKey::Original => None,
            })
            .collect();

        widths
            .iter()
            .find(|(w, _)| *w as f32 >= target)
            .or_else(|| widths.last())
            .map(|&(_, path)| path)
            .unwrap_or(self.primary.as_str())
    }
}

/// Resolves one image reference into candidates, with a one-shot fallback
#[derive(Debug, Clone)]
pub struct Resolver<M = ()> {
    reference: AssetReference,
    description: String,
    priority: bool,
    sizes: Option<SizesPolicy>,
    hints: PresentationHints<M>,
    scheme: VariantScheme,
    state: ResolutionState,
}

impl<M> Resolver<M> {
    pub fn new(reference: AssetReference, description: impl Into<String>) -> Self {
        Self {
            reference,
            description: description.into(),
            priority: false,
            sizes: None,
            hints: PresentationHints::default(),
            scheme: VariantScheme::default(),
            state: ResolutionState::Nominal,
        }
    }

    /// Mark the image as high priority (loaded eagerly)
    pub fn priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    /// Caller-supplied width-selection policy
    pub fn sizes(mut self, sizes: SizesPolicy) -> Self {
        self.sizes = Some(sizes);
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.hints.class = Some(class.into());
        self
    }

    pub fn on_press(mut self, action: M) -> Self {
        self.hints.on_press = Some(action);
        self
    }

    pub fn scheme(mut self, scheme: VariantScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn reference(&self) -> &AssetReference {
        &self.reference
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn hints(&self) -> &PresentationHints<M> {
        &self.hints
    }

    pub fn state(&self) -> ResolutionState {
        self.state
    }

    /// Compute the candidates for the current state
    pub fn render(&self) -> Rendition {
        let original = self.reference.as_str();

        let (primary, alternatives) = match self.state {
            ResolutionState::Nominal => {
                let variants = VariantSet::derive(original, &self.scheme);
                let alternatives = variants
                    .with_widths(&self.scheme)
                    .map(|(width, path)| (CandidateKey::Width(width), path.to_string()))
                    .collect();
                (variants.medium.clone(), alternatives)
            }
            ResolutionState::Fallback => (
                original.to_string(),
                BTreeMap::from([(CandidateKey::Original, original.to_string())]),
            ),
        };

        Rendition {
            primary,
            alternatives,
            sizes: self.sizes.clone().unwrap_or_default(),
            description: self.description.clone(),
            loading: if self.priority { Loading::Eager } else { Loading::Lazy },
            state: self.state,
        }
    }

    /// The rendering layer failed to load the offered candidate.
    ///
    /// The first report switches to the original reference. Later reports
    /// change nothing and return [`LoadFailureOutcome::Exhausted`]; showing a
    /// placeholder is then up to the caller.
    pub fn report_load_failure(&mut self) -> LoadFailureOutcome {
        let (next, outcome) = self.state.after_load_failure();
        self.state = next;

        match outcome {
            LoadFailureOutcome::FellBack => {
                debug!(reference = %self.reference, "variant unavailable, falling back to original");
            }
            LoadFailureOutcome::Exhausted => {
                warn!(reference = %self.reference, "original image failed to load");
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KINSHIP: &str = "/images/events-page/Gatherings/kinship-119.jpg";

    fn resolver(path: &str) -> Resolver {
        Resolver::new(AssetReference::new(path).unwrap(), "Guests gathered at dusk")
    }

    #[test]
    fn nominal_rendition_offers_variants() {
        let rendition = resolver(KINSHIP).render();

        assert_eq!(rendition.primary, "/images/events-page/Gatherings/kinship-119-md.webp");
        assert_eq!(
            rendition.alternatives,
            BTreeMap::from([
                (CandidateKey::Width(640), "/images/events-page/Gatherings/kinship-119-xs.webp".to_string()),
                (CandidateKey::Width(1024), "/images/events-page/Gatherings/kinship-119-md.webp".to_string()),
                (CandidateKey::Width(1920), "/images/events-page/Gatherings/kinship-119-lg.webp".to_string()),
            ])
        );
        assert_eq!(rendition.state, ResolutionState::Nominal);
        assert_eq!(rendition.alternatives[&CandidateKey::Width(1024)], rendition.primary);
    }

    #[test]
    fn fallback_rendition_offers_only_the_original() {
        let mut r = resolver(KINSHIP);
        assert_eq!(r.report_load_failure(), LoadFailureOutcome::FellBack);

        let rendition = r.render();
        assert_eq!(rendition.primary, KINSHIP);
        assert_eq!(
            rendition.alternatives,
            BTreeMap::from([(CandidateKey::Original, KINSHIP.to_string())])
        );
        assert_eq!(rendition.srcset(), KINSHIP);
        assert_eq!(rendition.select(320.0, 2.0), KINSHIP);
    }

    #[test]
    fn second_failure_is_terminal() {
        let mut r = resolver(KINSHIP);
        r.report_load_failure();
        let before = r.render();

        assert_eq!(r.report_load_failure(), LoadFailureOutcome::Exhausted);
        assert_eq!(r.state(), ResolutionState::Fallback);
        assert_eq!(r.render(), before);
    }

    #[test]
    fn extensionless_reference() {
        assert_eq!(resolver("/images/foo").render().primary, "/images/foo-md.webp");
    }

    #[test]
    fn default_sizes_policy_applies() {
        let rendition = resolver(KINSHIP).render();
        assert_eq!(rendition.sizes, SizesPolicy::default());

        let custom: SizesPolicy = "100vw".parse().unwrap();
        let rendition = resolver(KINSHIP).sizes(custom.clone()).render();
        assert_eq!(rendition.sizes, custom);
    }

    #[test]
    fn priority_and_hints() {
        let r: Resolver<&str> = Resolver::new(AssetReference::new(KINSHIP).unwrap(), "alt")
            .priority(true)
            .class("rounded")
            .on_press("open");

        assert_eq!(r.render().loading, Loading::Eager);
        assert_eq!(r.hints().class.as_deref(), Some("rounded"));
        assert_eq!(r.hints().on_press, Some("open"));
        assert_eq!(resolver(KINSHIP).render().loading, Loading::Lazy);
    }

    #[test]
    fn srcset_lists_widths() {
        assert_eq!(
            resolver("/a/b.png").render().srcset(),
            "/a/b-xs.webp 640w, /a/b-md.webp 1024w, /a/b-lg.webp 1920w"
        );
    }

    #[test]
    fn select_picks_smallest_covering_variant() {
        let rendition = resolver("/a/b.png").render();

        // 400px viewport, 100vw slot
        assert_eq!(rendition.select(400.0, 1.0), "/a/b-xs.webp");
        // same slot on a 2x display needs 800px
        assert_eq!(rendition.select(400.0, 2.0), "/a/b-md.webp");
        // 1000px viewport, 50vw slot
        assert_eq!(rendition.select(1000.0, 1.0), "/a/b-xs.webp");
        // nothing covers 4000px: take the largest
        assert_eq!(rendition.select(4000.0, 3.0), "/a/b-lg.webp");
    }

    proptest! {
        #[test]
        fn failures_never_return_to_nominal(failures in 1usize..8, base in "/[a-z]{1,12}") {
            let reference = format!("{base}.jpg");
            let mut r = resolver(&reference);
            for _ in 0..failures {
                r.report_load_failure();
            }

            let rendition = r.render();
            prop_assert_eq!(r.state(), ResolutionState::Fallback);
            prop_assert_eq!(&rendition.primary, &reference);
            prop_assert!(rendition.alternatives.values().all(|p| p == &reference));
        }
    }
}
