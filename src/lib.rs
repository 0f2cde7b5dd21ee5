//! cardfx is a particle effects engine for animated greeting cards.
//!
//! Two halves cooperate:
//!
//! - **Context adapter**: a pure mapping from "which festival, and who is the card for"
//!   ([`Festival`] + [`RelationshipContext`]) to an [`AnimationContext`] carrying palette,
//!   intensity tier, duration and easing.
//! - **Particle engine**: a fixed-capacity pool stepped by a frame loop, with burst and
//!   stream emitters, color-batched rendering onto a [`DrawSurface`] and adaptive quality
//!   scaling driven by a rolling FPS window.
//!
//! [`EffectKind`] bridges the two: it turns an [`AnimationContext`] into a
//! [`ParticleSystemConfig`] and burst templates for fireworks, sparkles, confetti or steam.
//!
//! The engine is single-threaded. The host drives it by calling
//! [`ParticleEngine::pump`] once per display refresh; [`ManualClock`] replaces wall time
//! for tests and offline rendering to PNG through [`CpuSurface`].
#![forbid(unsafe_code)]

mod animation;
mod context;
mod effects;
mod engine;
mod foundation;
mod particles;
mod render;
mod runtime;

pub use animation::ease::Ease;
pub use context::adapter::{AnimationContext, IntensityTier, Tone};
pub use context::color::ColorVariant;
pub use context::festival::{Festival, FestivalCatalog};
pub use context::relationship::{
    AnimationSpeed, ColorIntensity, RelationshipCategory, RelationshipContext,
    builtin_relationship,
};
pub use effects::EffectKind;
pub use engine::ParticleEngine;
pub use foundation::core::{Canvas, Point, Rgb8, Vec2};
pub use foundation::error::{CardFxError, CardFxResult};
pub use particles::config::{BurstConfig, ParticleBlendMode, ParticleSystemConfig, Spread};
pub use particles::emitter::StreamId;
pub use particles::pool::Particle;
pub use particles::rng::ParticleRng;
pub use render::cpu::{CpuSurface, FrameRGBA};
pub use render::renderer::RenderStats;
pub use render::surface::{DrawCommand, DrawSurface, RecordingSurface};
pub use runtime::clock::{Clock, ManualClock, MonotonicClock};
pub use runtime::monitor::{DeviceClass, PerformanceMonitor, QualityChange, scale_particle_count};
pub use runtime::scheduler::LoopState;
