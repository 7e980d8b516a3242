/// Width-selection policies (`sizes` descriptors)
///
/// A policy tells the rendering layer how wide the image slot is at a given
/// viewport width, e.g. `(max-width: 768px) 100vw, (max-width: 1200px) 50vw, 33vw`.
/// Entries are evaluated in order; the first one whose condition matches wins.
use std::fmt;
use std::str::FromStr;

use crate::error::{GalleryError, Result};

/// Used when the caller supplies no policy:
/// narrow viewports get the full width, medium ones half, otherwise a third.
pub const DEFAULT_SIZES: &str = "(max-width: 768px) 100vw, (max-width: 1200px) 50vw, 33vw";

#[derive(Debug, Clone, Copy, PartialEq)]
enum MediaCondition {
    MaxWidth(f32),
    MinWidth(f32),
}

impl MediaCondition {
    fn matches(self, viewport_width: f32) -> bool {
        match self {
            MediaCondition::MaxWidth(max) => viewport_width <= max,
            MediaCondition::MinWidth(min) => viewport_width >= min,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SlotLength {
    ViewportPercent(f32),
    Pixels(f32),
}

impl SlotLength {
    fn resolve(self, viewport_width: f32) -> f32 {
        match self {
            SlotLength::ViewportPercent(pct) => viewport_width * pct / 100.0,
            SlotLength::Pixels(px) => px,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct SizeEntry {
    condition: Option<MediaCondition>,
    length: SlotLength,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SizesPolicy {
    source: String,
    entries: Vec<SizeEntry>,
}

impl SizesPolicy {
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Width of the image slot, in CSS pixels, at `viewport_width`
    pub fn slot_width(&self, viewport_width: f32) -> f32 {
        self.entries
            .iter()
            .find(|entry| entry.condition.map_or(true, |c| c.matches(viewport_width)))
            .map_or(viewport_width, |entry| entry.length.resolve(viewport_width))
    }
}

impl Default for SizesPolicy {
    /// The entries of [`DEFAULT_SIZES`], built directly
    fn default() -> Self {
        SizesPolicy {
            source: DEFAULT_SIZES.to_string(),
            entries: vec![
                SizeEntry {
                    condition: Some(MediaCondition::MaxWidth(768.0)),
                    length: SlotLength::ViewportPercent(100.0),
                },
                SizeEntry {
                    condition: Some(MediaCondition::MaxWidth(1200.0)),
                    length: SlotLength::ViewportPercent(50.0),
                },
                SizeEntry {
                    condition: None,
                    length: SlotLength::ViewportPercent(33.0),
                },
            ],
        }
    }
}

impl FromStr for SizesPolicy {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| GalleryError::InvalidSizes {
            policy: s.to_string(),
            reason: reason.to_string(),
        };

        let entries = s
            .split(',')
            .map(|raw| parse_entry(raw.trim()).map_err(|reason| invalid(&reason)))
            .collect::<Result<Vec<_>>>()?;

        Ok(SizesPolicy {
            source: s.trim().to_string(),
            entries,
        })
    }
}

impl fmt::Display for SizesPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_entry(raw: &str) -> std::result::Result<SizeEntry, String> {
    if raw.is_empty() {
        return Err("empty entry".to_string());
    }

    let (condition, rest) = match raw.strip_prefix('(') {
        Some(inner) => {
            let close = inner
                .find(')')
                .ok_or_else(|| format!("unclosed media condition in `{raw}`"))?;
            (Some(parse_condition(&inner[..close])?), inner[close + 1..].trim())
        }
        None => (None, raw),
    };

    Ok(SizeEntry {
        condition,
        length: parse_length(rest)?,
    })
}

fn parse_condition(raw: &str) -> std::result::Result<MediaCondition, String> {
    let (feature, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected `feature: value` in `({raw})`"))?;
    let px = parse_number(value.trim().strip_suffix("px").ok_or_else(|| {
        format!("media condition value `{}` must be in px", value.trim())
    })?)?;

    match feature.trim().to_ascii_lowercase().as_str() {
        "max-width" => Ok(MediaCondition::MaxWidth(px)),
        "min-width" => Ok(MediaCondition::MinWidth(px)),
        other => Err(format!("unsupported media feature `{other}`")),
    }
}

fn parse_length(raw: &str) -> std::result::Result<SlotLength, String> {
    if let Some(vw) = raw.strip_suffix("vw") {
        Ok(SlotLength::ViewportPercent(parse_number(vw)?))
    } else if let Some(px) = raw.strip_suffix("px") {
        Ok(SlotLength::Pixels(parse_number(px)?))
    } else if raw.is_empty() {
        Err("missing slot length".to_string())
    } else {
        Err(format!("slot length `{raw}` must be in vw or px"))
    }
}

fn parse_number(raw: &str) -> std::result::Result<f32, String> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .ok_or_else(|| format!("`{}` is not a valid length", raw.trim()))
}
