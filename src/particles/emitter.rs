//! Burst resolution and stream timers.

use std::f64::consts::TAU;
use std::ops::Range;

use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{CardFxError, CardFxResult};
use crate::particles::config::{BurstConfig, ParticleSystemConfig, Spread};
use crate::particles::pool::{ParticlePool, Spawn};
use crate::particles::rng::ParticleRng;

// Absorbs float error in `duration / interval` so exact multiples count.
const TIMER_EPSILON: f64 = 1e-9;

/// Activates up to `burst.count` particles at `origin`; returns how many were spawned.
///
/// The burst is truncated to the pool's free capacity. Without an explicit angle the
/// spawned particles sit at `2πk/n` for `k in 0..n`.
pub fn emit_burst(
    pool: &mut ParticlePool,
    config: &ParticleSystemConfig,
    rng: &mut ParticleRng,
    origin: Point,
    burst: &BurstConfig,
) -> usize {
    emit_aged_burst(pool, config, rng, origin, burst, 0.0)
}

/// Like [`emit_burst`], but each new particle is stepped forward by `age_ms` right away.
///
/// Used for emissions that fell due before the current instant, so they come out
/// as if spawned on time.
pub fn emit_aged_burst(
    pool: &mut ParticlePool,
    config: &ParticleSystemConfig,
    rng: &mut ParticleRng,
    origin: Point,
    burst: &BurstConfig,
    age_ms: f64,
) -> usize {
    let n = burst.count.min(pool.free_count());
    if n == 0 {
        return 0;
    }

    let speed_spread = burst.speed.unwrap_or(config.speed);
    let life_ms = burst.life.unwrap_or(config.lifespan_ms);
    let colors = burst.colors.as_deref().unwrap_or(&config.colors);

    for i in 0..n {
        let angle = match burst.angle {
            Some(spread) => spread.sample(rng),
            None => i as f64 / n as f64 * TAU,
        };
        let mut speed = speed_spread.sample(rng);
        if config.velocity_variation > 0.0 {
            speed *= 1.0 + (rng.next_f64() - 0.5) * config.velocity_variation;
        }
        let size = burst
            .size
            .map(|s| s.sample(rng))
            .unwrap_or(config.particle_size);
        let color = colors[rng.index(colors.len())];

        let spawned = pool.spawn(Spawn {
            position: origin,
            velocity: Vec2::new(angle.cos() * speed, angle.sin() * speed),
            life_ms,
            size,
            color,
        });
        if let Some(idx) = spawned
            && age_ms > 0.0
        {
            pool.step_slot(idx, age_ms, config.gravity, config.friction);
        }
    }
    n
}

/// Handle returned by stream registration, used for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamId(pub u64);

/// Timer that emits single-particle bursts every `1000 / rate` ms until its duration ends.
#[derive(Clone, Debug)]
pub struct StreamEmitter {
    id: StreamId,
    origin: Point,
    interval_ms: f64,
    total: u64,
    fired: u64,
    elapsed_ms: f64,
    template: BurstConfig,
}

impl StreamEmitter {
    pub fn new(
        id: StreamId,
        origin: Point,
        rate_per_sec: f64,
        duration_ms: f64,
        template: BurstConfig,
    ) -> CardFxResult<Self> {
        if !rate_per_sec.is_finite() || rate_per_sec <= 0.0 {
            return Err(CardFxError::validation(format!(
                "stream rate must be > 0, got {rate_per_sec}"
            )));
        }
        if !duration_ms.is_finite() || duration_ms < 0.0 {
            return Err(CardFxError::validation(format!(
                "stream duration must be >= 0, got {duration_ms}"
            )));
        }
        template.validate()?;

        let interval_ms = 1000.0 / rate_per_sec;
        Ok(Self {
            id,
            origin,
            interval_ms,
            total: (duration_ms / interval_ms + TIMER_EPSILON).floor() as u64,
            fired: 0,
            elapsed_ms: 0.0,
            template: BurstConfig {
                count: 1,
                ..template
            },
        })
    }

    /// Full-circle random direction, one particle per tick.
    pub fn default_template() -> BurstConfig {
        BurstConfig::new(1).with_angle(Spread::range(0.0, TAU))
    }

    pub fn id(&self) -> StreamId {
        self.id
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn template(&self) -> &BurstConfig {
        &self.template
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Advances the timer and fills `lateness` with, per emission that fell due,
    /// how long ago it was due (ms, oldest first).
    pub fn advance_into(&mut self, dt_ms: f64, lateness: &mut Vec<f64>) {
        lateness.clear();
        for k in self.take_due(dt_ms) {
            let due_at = (k + 1) as f64 * self.interval_ms;
            lateness.push((self.elapsed_ms - due_at).max(0.0));
        }
    }

    // Zero-based indices of the emissions that became due.
    fn take_due(&mut self, dt_ms: f64) -> Range<u64> {
        self.elapsed_ms += dt_ms.max(0.0);
        let due = ((self.elapsed_ms / self.interval_ms + TIMER_EPSILON).floor() as u64)
            .min(self.total)
            .max(self.fired);
        let range = self.fired..due;
        self.fired = due;
        range
    }

    pub fn is_done(&self) -> bool {
        self.fired >= self.total
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/emitter.rs"]
mod tests;
