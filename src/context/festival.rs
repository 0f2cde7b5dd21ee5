use std::collections::BTreeMap;

use crate::effects::EffectKind;
use crate::foundation::core::Rgb8;
use crate::foundation::error::{CardFxError, CardFxResult};

/// Static presentation metadata for one festival.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Festival {
    pub id: String,
    pub name: String,
    /// Ordered; the first color is the festival's primary accent.
    pub palette: Vec<Rgb8>,
    pub symbols: Vec<String>,
    pub base_duration_ms: f64,
    pub signature_effect: EffectKind,
}

impl Festival {
    pub fn validate(&self) -> CardFxResult<()> {
        if self.id.trim().is_empty() {
            return Err(CardFxError::config("festival id must not be empty"));
        }
        if self.palette.is_empty() {
            return Err(CardFxError::config(format!(
                "festival '{}' has an empty palette",
                self.id
            )));
        }
        if !self.base_duration_ms.is_finite() || self.base_duration_ms <= 0.0 {
            return Err(CardFxError::config(format!(
                "festival '{}' base_duration_ms must be > 0",
                self.id
            )));
        }
        Ok(())
    }
}

/// Lookup table of festivals keyed by id.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FestivalCatalog {
    festivals: BTreeMap<String, Festival>,
}

impl FestivalCatalog {
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        for f in builtin_festivals() {
            catalog.festivals.insert(f.id.clone(), f);
        }
        catalog
    }

    /// Parses a catalog shaped as `{ "<id>": Festival, ... }`.
    pub fn from_json(json: &str) -> CardFxResult<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        for (key, festival) in &catalog.festivals {
            festival.validate()?;
            if key != &festival.id {
                return Err(CardFxError::config(format!(
                    "catalog key '{key}' does not match festival id '{}'",
                    festival.id
                )));
            }
        }
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> CardFxResult<&Festival> {
        let key = id.trim().to_ascii_lowercase();
        self.festivals
            .get(&key)
            .ok_or_else(|| CardFxError::config(format!("unknown festival '{id}'")))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.festivals.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.festivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.festivals.is_empty()
    }
}

fn festival(
    id: &str,
    name: &str,
    palette: [Rgb8; 4],
    symbols: &[&str],
    base_duration_ms: f64,
    signature_effect: EffectKind,
) -> Festival {
    Festival {
        id: id.to_string(),
        name: name.to_string(),
        palette: palette.to_vec(),
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        base_duration_ms,
        signature_effect,
    }
}

fn builtin_festivals() -> Vec<Festival> {
    vec![
        festival(
            "diwali",
            "Diwali",
            [
                Rgb8::new(0xFF, 0x99, 0x33),
                Rgb8::new(0xFF, 0xD7, 0x00),
                Rgb8::new(0xFF, 0x6B, 0x35),
                Rgb8::new(0x8B, 0x00, 0x00),
            ],
            &["diya", "rangoli", "fireworks", "lantern"],
            4000.0,
            EffectKind::Firework,
        ),
        festival(
            "holi",
            "Holi",
            [
                Rgb8::new(0xFF, 0x14, 0x93),
                Rgb8::new(0x00, 0xCE, 0xD1),
                Rgb8::new(0xFF, 0xD7, 0x00),
                Rgb8::new(0x32, 0xCD, 0x32),
            ],
            &["gulal", "pichkari", "color-splash"],
            3500.0,
            EffectKind::Confetti,
        ),
        festival(
            "christmas",
            "Christmas",
            [
                Rgb8::new(0xC4, 0x1E, 0x3A),
                Rgb8::new(0x22, 0x8B, 0x22),
                Rgb8::new(0xFF, 0xD7, 0x00),
                Rgb8::WHITE,
            ],
            &["tree", "star", "snowflake", "gift"],
            4500.0,
            EffectKind::Sparkle,
        ),
        festival(
            "new-year",
            "New Year",
            [
                Rgb8::new(0xFF, 0xD7, 0x00),
                Rgb8::new(0xC0, 0xC0, 0xC0),
                Rgb8::new(0x1E, 0x90, 0xFF),
                Rgb8::new(0xFF, 0x69, 0xB4),
            ],
            &["fireworks", "clock", "champagne"],
            3000.0,
            EffectKind::Firework,
        ),
        festival(
            "eid",
            "Eid",
            [
                Rgb8::new(0x00, 0x64, 0x00),
                Rgb8::new(0xFF, 0xD7, 0x00),
                Rgb8::new(0xF5, 0xF5, 0xDC),
                Rgb8::new(0x4B, 0x00, 0x82),
            ],
            &["crescent", "star", "lantern"],
            4000.0,
            EffectKind::Sparkle,
        ),
        festival(
            "pongal",
            "Pongal",
            [
                Rgb8::new(0xFF, 0xA5, 0x00),
                Rgb8::new(0x8B, 0x45, 0x13),
                Rgb8::new(0xFF, 0xD7, 0x00),
                Rgb8::new(0x22, 0x8B, 0x22),
            ],
            &["pot", "sugarcane", "sun", "kolam"],
            3500.0,
            EffectKind::Steam,
        ),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/context/festival.rs"]
mod tests;
