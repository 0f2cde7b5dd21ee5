//! Pure mapping from (festival, relationship) to animation parameters.
//!
//! Every function here is deterministic: identical inputs always produce identical
//! outputs, so callers may cache results freely.

use crate::animation::ease::Ease;
use crate::context::color::ColorVariant;
use crate::context::festival::Festival;
use crate::context::relationship::{AnimationSpeed, ColorIntensity, RelationshipContext};
use crate::foundation::core::Rgb8;

/// Qualitative animation style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Traditional,
    Vibrant,
    Romantic,
}

impl Tone {
    /// Unrecognized visual tones fall back to [`Tone::Traditional`].
    pub fn from_visual_tone(visual_tone: &str) -> Self {
        match visual_tone.trim().to_ascii_lowercase().as_str() {
            "formal" => Self::Professional,
            "respectful" | "warm" => Self::Traditional,
            "playful" => Self::Vibrant,
            "intimate" => Self::Romantic,
            _ => Self::Traditional,
        }
    }

    pub fn color_variant(self) -> ColorVariant {
        match self {
            Self::Professional => ColorVariant::Muted,
            Self::Traditional => ColorVariant::Traditional,
            Self::Vibrant => ColorVariant::Vibrant,
            Self::Romantic => ColorVariant::Pastel,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityTier {
    Low,
    Medium,
    High,
}

impl IntensityTier {
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Low => 0.5,
            Self::Medium => 1.0,
            Self::High => 1.5,
        }
    }

    /// `floor(base * multiplier)`.
    pub fn scale_count(self, base: u32) -> u32 {
        (f64::from(base) * self.multiplier()).floor() as u32
    }
}

impl From<ColorIntensity> for IntensityTier {
    fn from(value: ColorIntensity) -> Self {
        match value {
            ColorIntensity::Muted => Self::Low,
            ColorIntensity::Moderate => Self::Medium,
            ColorIntensity::Vibrant => Self::High,
        }
    }
}

impl AnimationSpeed {
    pub fn ease(self) -> Ease {
        match self {
            Self::Slow => Ease::InOutCubic,
            Self::Medium => Ease::InOutQuad,
            Self::Fast => Ease::OutQuad,
        }
    }
}

/// Derived animation parameters; built fresh per request and never mutated.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationContext {
    pub festival: String,
    pub palette: Vec<Rgb8>,
    pub intensity: IntensityTier,
    pub duration_ms: f64,
    pub tone: Tone,
    pub ease: Ease,
}

impl AnimationContext {
    pub fn derive(festival: &Festival, relationship: &RelationshipContext) -> Self {
        let tone = Tone::from_visual_tone(&relationship.visual_tone);
        Self {
            festival: festival.id.clone(),
            palette: tone.color_variant().apply_palette(&festival.palette),
            intensity: relationship.color_intensity.into(),
            duration_ms: festival.base_duration_ms * relationship.category.duration_scale(),
            tone,
            ease: relationship.animation_speed.ease(),
        }
    }

    pub fn scale_count(&self, base: u32) -> u32 {
        self.intensity.scale_count(base)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/context/adapter.rs"]
mod tests;
