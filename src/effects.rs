//! Effect presets: physics and emission parameters for each signature effect.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::context::adapter::{AnimationContext, Tone};
use crate::foundation::error::CardFxError;
use crate::particles::config::{BurstConfig, ParticleBlendMode, ParticleSystemConfig, Spread};

/// A festival's signature particle effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    /// Radial bursts with additive glow, falling under gravity.
    Firework,
    /// Small, slow points drifting upward.
    Sparkle,
    /// Upward fan of heavy flakes.
    Confetti,
    /// Soft, translucent plumes rising slowly.
    Steam,
}

struct Preset {
    base_count: u32,
    gravity: f64,
    friction: f64,
    particle_size: f64,
    opacity: f64,
    speed: Spread,
    /// Fraction of the context duration a particle lives.
    life_share: f64,
    blend_mode: ParticleBlendMode,
    angle: Option<Spread>,
    size: Option<Spread>,
}

const MIN_LIFESPAN_MS: f64 = 400.0;

impl EffectKind {
    pub const ALL: [Self; 4] = [Self::Firework, Self::Sparkle, Self::Confetti, Self::Steam];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Firework => "firework",
            Self::Sparkle => "sparkle",
            Self::Confetti => "confetti",
            Self::Steam => "steam",
        }
    }

    /// Particles per burst before intensity, device and quality scaling.
    pub fn base_count(self) -> u32 {
        self.preset().base_count
    }

    /// Engine configuration for this effect under `ctx`.
    pub fn system_config(self, ctx: &AnimationContext) -> ParticleSystemConfig {
        let p = self.preset();
        let per_burst = ctx.scale_count(p.base_count).max(1) as usize;
        let mut opacity = p.opacity;
        if ctx.tone == Tone::Professional {
            opacity *= 0.85;
        }

        let mut config = ParticleSystemConfig {
            particle_size: p.particle_size,
            opacity,
            gravity: p.gravity,
            friction: p.friction,
            max_particles: per_burst * 4,
            lifespan_ms: self.lifespan_ms(ctx),
            speed: p.speed,
            blend_mode: p.blend_mode,
            ..Default::default()
        };
        if !ctx.palette.is_empty() {
            config.colors = ctx.palette.clone();
        }
        config
    }

    /// Burst template for `count` particles.
    pub fn burst(self, ctx: &AnimationContext, count: usize) -> BurstConfig {
        let p = self.preset();
        let mut burst = BurstConfig::new(count).with_life(self.lifespan_ms(ctx));
        if let Some(angle) = p.angle {
            burst = burst.with_angle(angle);
        }
        if let Some(size) = p.size {
            burst = burst.with_size(size);
        }
        burst
    }

    /// Burst start times across the context duration, spaced by its ease.
    pub fn launch_times(self, ctx: &AnimationContext, bursts: usize) -> Vec<f64> {
        let window = ctx.duration_ms - self.lifespan_ms(ctx);
        ctx.ease.schedule(bursts, window.max(0.0))
    }

    fn lifespan_ms(self, ctx: &AnimationContext) -> f64 {
        (ctx.duration_ms * self.preset().life_share).max(MIN_LIFESPAN_MS)
    }

    fn preset(self) -> Preset {
        match self {
            Self::Firework => Preset {
                base_count: 80,
                gravity: 150.0,
                friction: 0.98,
                particle_size: 3.0,
                opacity: 1.0,
                speed: Spread::range(150.0, 300.0),
                life_share: 0.4,
                blend_mode: ParticleBlendMode::Lighter,
                angle: None,
                size: Some(Spread::range(2.0, 4.0)),
            },
            Self::Sparkle => Preset {
                base_count: 40,
                gravity: -20.0,
                friction: 0.95,
                particle_size: 2.0,
                opacity: 1.0,
                speed: Spread::range(20.0, 80.0),
                life_share: 0.35,
                blend_mode: ParticleBlendMode::Screen,
                angle: Some(Spread::range(0.0, TAU)),
                size: Some(Spread::range(1.0, 2.5)),
            },
            // Screen y grows downward, so "up" is -PI/2.
            Self::Confetti => Preset {
                base_count: 120,
                gravity: 220.0,
                friction: 0.97,
                particle_size: 4.0,
                opacity: 1.0,
                speed: Spread::range(200.0, 400.0),
                life_share: 0.6,
                blend_mode: ParticleBlendMode::SourceOver,
                angle: Some(Spread::range(-PI * 0.85, -PI * 0.15)),
                size: Some(Spread::range(3.0, 5.0)),
            },
            Self::Steam => Preset {
                base_count: 30,
                gravity: -60.0,
                friction: 0.99,
                particle_size: 6.0,
                opacity: 0.6,
                speed: Spread::range(10.0, 40.0),
                life_share: 0.75,
                blend_mode: ParticleBlendMode::SourceOver,
                angle: Some(Spread::range(-FRAC_PI_2 - 0.3, -FRAC_PI_2 + 0.3)),
                size: Some(Spread::range(4.0, 8.0)),
            },
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EffectKind {
    type Err = CardFxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| CardFxError::config(format!("unknown effect '{key}'")))
    }
}

#[cfg(test)]
#[path = "../tests/unit/effects.rs"]
mod tests;
