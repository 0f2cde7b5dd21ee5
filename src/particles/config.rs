use crate::foundation::core::Rgb8;
use crate::foundation::error::{CardFxError, CardFxResult};
use crate::particles::rng::ParticleRng;

/// A scalar parameter that is either fixed or drawn uniformly from `[min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Spread {
    Fixed(f64),
    Range { min: f64, max: f64 },
}

impl Spread {
    pub fn fixed(value: f64) -> Self {
        Self::Fixed(value)
    }

    pub fn range(min: f64, max: f64) -> Self {
        Self::Range { min, max }
    }

    pub fn sample(self, rng: &mut ParticleRng) -> f64 {
        match self {
            Self::Fixed(v) => v,
            Self::Range { min, max } => rng.range(min, max),
        }
    }

    fn validate(self, field: &str, allow_negative: bool) -> CardFxResult<()> {
        let (min, max) = match self {
            Self::Fixed(v) => (v, v),
            Self::Range { min, max } => (min, max),
        };
        if !min.is_finite() || !max.is_finite() {
            return Err(CardFxError::validation(format!("{field} must be finite")));
        }
        if min > max {
            return Err(CardFxError::validation(format!(
                "{field} range is inverted (min {min} > max {max})"
            )));
        }
        if !allow_negative && min < 0.0 {
            return Err(CardFxError::validation(format!(
                "{field} must be >= 0, got {min}"
            )));
        }
        Ok(())
    }
}

/// Compositing rule for a whole render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParticleBlendMode {
    #[default]
    SourceOver,
    /// Additive; overlapping particles brighten.
    Lighter,
    Screen,
    Multiply,
}

/// Engine-wide particle parameters, fixed for the lifetime of one engine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParticleSystemConfig {
    pub colors: Vec<Rgb8>,
    /// Particle radius in pixels.
    pub particle_size: f64,
    /// Global opacity multiplier in `[0, 1]`.
    pub opacity: f64,
    /// px/s²; negative pulls upward.
    pub gravity: f64,
    /// Per-frame velocity damping in `(0, 1]`.
    pub friction: f64,
    /// Speed jitter fraction in `[0, 2]`: `speed *= 1 + (rand - 0.5) * velocity_variation`.
    pub velocity_variation: f64,
    pub max_particles: usize,
    pub lifespan_ms: f64,
    /// px/s, used when a burst does not specify a speed.
    pub speed: Spread,
    pub blend_mode: ParticleBlendMode,
}

impl Default for ParticleSystemConfig {
    fn default() -> Self {
        Self {
            colors: vec![
                Rgb8::new(0xFF, 0xD7, 0x00),
                Rgb8::new(0xFF, 0x6B, 0x6B),
                Rgb8::new(0x4E, 0xCD, 0xC4),
            ],
            particle_size: 3.0,
            opacity: 1.0,
            gravity: 150.0,
            friction: 0.98,
            velocity_variation: 0.2,
            max_particles: 500,
            lifespan_ms: 2000.0,
            speed: Spread::range(100.0, 250.0),
            blend_mode: ParticleBlendMode::SourceOver,
        }
    }
}

impl ParticleSystemConfig {
    pub fn validate(&self) -> CardFxResult<()> {
        if self.colors.is_empty() {
            return Err(CardFxError::validation("colors must not be empty"));
        }
        if self.max_particles == 0 {
            return Err(CardFxError::validation("max_particles must be > 0"));
        }
        if !self.particle_size.is_finite() || self.particle_size < 0.0 {
            return Err(CardFxError::validation("particle_size must be >= 0"));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(CardFxError::validation("opacity must be within [0, 1]"));
        }
        if !self.gravity.is_finite() {
            return Err(CardFxError::validation("gravity must be finite"));
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(CardFxError::validation("friction must be within (0, 1]"));
        }
        // Above 2 the jittered speed can turn negative and reverse the particle.
        if !(0.0..=2.0).contains(&self.velocity_variation) {
            return Err(CardFxError::validation(
                "velocity_variation must be within [0, 2]",
            ));
        }
        if !self.lifespan_ms.is_finite() || self.lifespan_ms <= 0.0 {
            return Err(CardFxError::validation("lifespan_ms must be > 0"));
        }
        self.speed.validate("speed", false)
    }
}

/// One-shot emission request.
///
/// Unset fields fall back to the engine config. Omitting `angle` spreads the
/// burst evenly around the full circle.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    pub count: usize,
    /// Radians; 0 points right, positive angles turn clockwise on screen.
    pub angle: Option<Spread>,
    pub speed: Option<Spread>,
    pub life: Option<f64>,
    pub size: Option<Spread>,
    pub colors: Option<Vec<Rgb8>>,
}

impl BurstConfig {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    pub fn with_angle(mut self, angle: Spread) -> Self {
        self.angle = Some(angle);
        self
    }

    pub fn with_speed(mut self, speed: Spread) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_life(mut self, life_ms: f64) -> Self {
        self.life = Some(life_ms);
        self
    }

    pub fn with_size(mut self, size: Spread) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_colors(mut self, colors: Vec<Rgb8>) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn validate(&self) -> CardFxResult<()> {
        if let Some(angle) = self.angle {
            angle.validate("angle", true)?;
        }
        if let Some(speed) = self.speed {
            speed.validate("speed", false)?;
        }
        if let Some(size) = self.size {
            size.validate("size", false)?;
        }
        if let Some(life) = self.life
            && (!life.is_finite() || life <= 0.0)
        {
            return Err(CardFxError::validation(format!(
                "life must be > 0, got {life}"
            )));
        }
        if let Some(colors) = &self.colors
            && colors.is_empty()
        {
            return Err(CardFxError::validation("colors override must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/config.rs"]
mod tests;
