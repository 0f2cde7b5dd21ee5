use crate::foundation::error::CardFxError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipCategory {
    Professional,
    Family,
    Friends,
    Romantic,
}

impl RelationshipCategory {
    /// Multiplier applied to a festival's base duration.
    pub fn duration_scale(self) -> f64 {
        match self {
            Self::Professional => 0.8,
            Self::Family => 1.0,
            Self::Friends => 1.1,
            Self::Romantic => 1.2,
        }
    }
}

impl std::str::FromStr for RelationshipCategory {
    type Err = CardFxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "professional" => Ok(Self::Professional),
            "family" => Ok(Self::Family),
            "friends" => Ok(Self::Friends),
            "romantic" => Ok(Self::Romantic),
            other => Err(CardFxError::config(format!(
                "unknown relationship category '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorIntensity {
    Muted,
    Moderate,
    Vibrant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    Medium,
    Fast,
}

/// Who the card is for, as resolved by the surrounding application.
///
/// `visual_tone` stays free-form: unknown tones are mapped to a safe default
/// by [`Tone::from_visual_tone`](crate::Tone::from_visual_tone).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipContext {
    pub category: RelationshipCategory,
    pub color_intensity: ColorIntensity,
    pub animation_speed: AnimationSpeed,
    pub visual_tone: String,
}

impl RelationshipContext {
    pub fn new(
        category: RelationshipCategory,
        color_intensity: ColorIntensity,
        animation_speed: AnimationSpeed,
        visual_tone: impl Into<String>,
    ) -> Self {
        Self {
            category,
            color_intensity,
            animation_speed,
            visual_tone: visual_tone.into(),
        }
    }
}

/// Resolves a relationship identifier (`"colleague"`, `"best-friend"`, ...).
///
/// Unknown identifiers resolve to a warm family context.
pub fn builtin_relationship(id: &str) -> RelationshipContext {
    use AnimationSpeed::*;
    use ColorIntensity::*;
    use RelationshipCategory::*;

    let key = id.trim().to_ascii_lowercase().replace(['_', ' '], "-");
    match key.as_str() {
        "colleague" | "coworker" => RelationshipContext::new(Professional, Muted, Slow, "formal"),
        "boss" | "manager" => RelationshipContext::new(Professional, Muted, Slow, "formal"),
        "client" => RelationshipContext::new(Professional, Moderate, Slow, "formal"),
        "mentor" | "teacher" => RelationshipContext::new(Professional, Moderate, Medium, "respectful"),
        "grandparent" => RelationshipContext::new(Family, Moderate, Slow, "respectful"),
        "parent" | "mother" | "father" => RelationshipContext::new(Family, Moderate, Medium, "warm"),
        "sibling" | "brother" | "sister" => RelationshipContext::new(Family, Vibrant, Fast, "playful"),
        "child" => RelationshipContext::new(Family, Vibrant, Fast, "playful"),
        "friend" => RelationshipContext::new(Friends, Vibrant, Medium, "playful"),
        "best-friend" => RelationshipContext::new(Friends, Vibrant, Fast, "playful"),
        "spouse" | "wife" | "husband" => RelationshipContext::new(Romantic, Moderate, Slow, "intimate"),
        "partner" | "girlfriend" | "boyfriend" => {
            RelationshipContext::new(Romantic, Vibrant, Medium, "intimate")
        }
        _ => {
            tracing::debug!(relationship = id, "unknown relationship, using family default");
            RelationshipContext::new(Family, Moderate, Medium, "warm")
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/context/relationship.rs"]
mod tests;
