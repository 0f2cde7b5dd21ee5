use crate::foundation::core::Rgb8;
use crate::foundation::error::{CardFxError, CardFxResult};

const MID_GRAY: f64 = 128.0;
const WHITE: f64 = 255.0;

/// Palette treatment applied before colors reach the particle engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorVariant {
    /// 70% original, 30% toward mid-gray.
    Muted,
    /// Channels scaled by 1.2, clamped to 255.
    Vibrant,
    /// 60% original, 40% toward white.
    Pastel,
    /// Identity.
    Traditional,
}

impl ColorVariant {
    pub fn transform(self, c: Rgb8) -> Rgb8 {
        match self {
            Self::Muted => c.map_channels(|v| blend_channel(v, MID_GRAY, 0.7)),
            Self::Vibrant => c.map_channels(|v| (f64::from(v) * 1.2).round().min(255.0) as u8),
            Self::Pastel => c.map_channels(|v| blend_channel(v, WHITE, 0.6)),
            Self::Traditional => c,
        }
    }

    /// Transforms a hex string, returning canonical `#RRGGBB`.
    pub fn apply_hex(self, hex: &str) -> CardFxResult<String> {
        Ok(self.transform(Rgb8::parse_hex(hex)?).to_hex())
    }

    pub fn apply_palette(self, palette: &[Rgb8]) -> Vec<Rgb8> {
        palette.iter().map(|&c| self.transform(c)).collect()
    }
}

impl std::str::FromStr for ColorVariant {
    type Err = CardFxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "muted" => Ok(Self::Muted),
            "vibrant" => Ok(Self::Vibrant),
            "pastel" => Ok(Self::Pastel),
            "traditional" => Ok(Self::Traditional),
            other => Err(CardFxError::config(format!("unknown color variant '{other}'"))),
        }
    }
}

fn blend_channel(v: u8, target: f64, keep: f64) -> u8 {
    (f64::from(v) * keep + target * (1.0 - keep))
        .round()
        .clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/context/color.rs"]
mod tests;
