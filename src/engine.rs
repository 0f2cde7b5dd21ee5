//! The particle engine: pool, physics, renderer, frame loop and streams bound to one surface.

use std::time::Duration;

use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::CardFxResult;
use crate::particles::config::{BurstConfig, ParticleSystemConfig};
use crate::particles::emitter::{self, StreamEmitter, StreamId};
use crate::particles::pool::{Particle, ParticlePool};
use crate::particles::rng::ParticleRng;
use crate::render::renderer::{ParticleRenderer, RenderStats};
use crate::render::surface::DrawSurface;
use crate::runtime::clock::{Clock, MonotonicClock};
use crate::runtime::monitor::{DeviceClass, PerformanceMonitor, QualityChange, scale_particle_count};
use crate::runtime::scheduler::{FrameScheduler, LoopState};

struct ActiveStream {
    emitter: StreamEmitter,
    last: Duration,
}

/// Particle engine bound to one drawing surface.
///
/// All work happens on the caller's thread. The host calls [`pump`](Self::pump) once
/// per display refresh; emission calls are made between pumps.
pub struct ParticleEngine<S: DrawSurface, C: Clock = MonotonicClock> {
    surface: S,
    canvas: Canvas,
    config: ParticleSystemConfig,
    pool: ParticlePool,
    renderer: ParticleRenderer,
    rng: ParticleRng,
    clock: C,
    scheduler: FrameScheduler,
    monitor: PerformanceMonitor,
    device: DeviceClass,
    streams: Vec<ActiveStream>,
    // Scratch for stream emissions due in one pump.
    lateness: Vec<f64>,
    next_stream_id: u64,
    quality_listener: Option<Box<dyn FnMut(QualityChange)>>,
    last_stats: RenderStats,
    disposed: bool,
}

impl<S: DrawSurface> ParticleEngine<S, MonotonicClock> {
    /// Wall-clock engine with a time-seeded random source.
    pub fn new(surface: S, config: ParticleSystemConfig) -> CardFxResult<Self> {
        Self::with_parts(surface, config, ParticleRng::from_time(), MonotonicClock::new())
    }
}

impl<S: DrawSurface, C: Clock> ParticleEngine<S, C> {
    #[tracing::instrument(skip_all, fields(max_particles = config.max_particles, seed = rng.seed()))]
    pub fn with_parts(
        mut surface: S,
        config: ParticleSystemConfig,
        rng: ParticleRng,
        clock: C,
    ) -> CardFxResult<Self> {
        config.validate()?;
        let canvas = surface.acquire_context()?;
        let device = DeviceClass::from_canvas(canvas);
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            ?device,
            "particle engine bound to surface"
        );

        Ok(Self {
            surface,
            canvas,
            pool: ParticlePool::new(config.max_particles),
            renderer: ParticleRenderer::with_capacity(config.max_particles),
            config,
            rng,
            clock,
            scheduler: FrameScheduler::new(),
            monitor: PerformanceMonitor::new(),
            device,
            streams: Vec::new(),
            lateness: Vec::new(),
            next_stream_id: 0,
            quality_listener: None,
            last_stats: RenderStats::default(),
            disposed: false,
        })
    }

    /// Spawns up to `burst.count` particles at `(x, y)`; returns how many were spawned.
    ///
    /// Requests beyond the free capacity are truncated silently. Invalid bursts are
    /// rejected before anything is spawned.
    pub fn emit_burst(&mut self, x: f64, y: f64, burst: &BurstConfig) -> CardFxResult<usize> {
        burst.validate()?;
        let spawned = emitter::emit_burst(
            &mut self.pool,
            &self.config,
            &mut self.rng,
            Point::new(x, y),
            burst,
        );
        if spawned < burst.count {
            tracing::debug!(
                requested = burst.count,
                spawned,
                free = self.pool.free_count(),
                "burst truncated to pool capacity"
            );
        }
        Ok(spawned)
    }

    /// Emits one particle every `1000 / rate` ms for `duration_ms`.
    pub fn emit_stream(
        &mut self,
        x: f64,
        y: f64,
        rate: f64,
        duration_ms: f64,
    ) -> CardFxResult<StreamId> {
        self.emit_stream_with(x, y, rate, duration_ms, StreamEmitter::default_template())
    }

    /// Like [`emit_stream`](Self::emit_stream) with a custom per-particle template.
    pub fn emit_stream_with(
        &mut self,
        x: f64,
        y: f64,
        rate: f64,
        duration_ms: f64,
        template: BurstConfig,
    ) -> CardFxResult<StreamId> {
        let id = StreamId(self.next_stream_id);
        let stream = StreamEmitter::new(id, Point::new(x, y), rate, duration_ms, template)?;
        self.next_stream_id += 1;
        if self.disposed {
            tracing::debug!(?id, "engine disposed, stream dropped");
            return Ok(id);
        }
        tracing::debug!(
            ?id,
            interval_ms = stream.interval_ms(),
            duration_ms,
            "stream registered"
        );
        self.streams.push(ActiveStream {
            emitter: stream,
            last: self.clock.now(),
        });
        Ok(id)
    }

    /// Returns false if the stream had already finished or was cancelled.
    pub fn cancel_stream(&mut self, id: StreamId) -> bool {
        let before = self.streams.len();
        self.streams.retain(|s| s.emitter.id() != id);
        before != self.streams.len()
    }

    pub fn cancel_streams(&mut self) {
        self.streams.clear();
    }

    pub fn active_streams(&self) -> usize {
        self.streams.len()
    }

    pub fn start(&mut self) {
        if self.disposed {
            tracing::warn!("start() called on a disposed engine");
            return;
        }
        if self.scheduler.start(self.clock.now()) {
            tracing::info!(particles = self.pool.active_count(), "frame loop started");
        }
    }

    pub fn stop(&mut self) {
        if self.scheduler.stop() {
            tracing::info!(frames = self.scheduler.frames(), "frame loop stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn loop_state(&self) -> LoopState {
        self.scheduler.state()
    }

    /// Display-refresh callback. If the loop is running, steps physics; then fires due
    /// stream timers and, if running, renders. Returns whether a frame was drawn.
    ///
    /// Stream particles that fell due mid-frame are spawned already aged by the time
    /// since they were due, so they are not stepped by the whole frame delta.
    pub fn pump(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        let now = self.clock.now();
        let tick = self.scheduler.tick(now);
        if let Some(delta_ms) = tick {
            self.update(delta_ms);
        }
        self.fire_streams(now);

        let Some(delta_ms) = tick else {
            return false;
        };
        self.render();

        if let Some(change) = self.monitor.record_frame(delta_ms)
            && let Some(listener) = self.quality_listener.as_mut()
        {
            listener(change);
        }
        true
    }

    /// Advances physics by `delta_ms`. Non-finite or non-positive deltas are ignored.
    pub fn update(&mut self, delta_ms: f64) {
        if self.disposed || !delta_ms.is_finite() || delta_ms <= 0.0 {
            return;
        }
        self.pool.step(delta_ms, self.config.gravity, self.config.friction);
    }

    pub fn render(&mut self) -> RenderStats {
        if self.disposed {
            return RenderStats::default();
        }
        self.last_stats = self.renderer.render(
            &self.pool,
            &mut self.surface,
            self.config.opacity,
            self.config.blend_mode,
        );
        self.last_stats
    }

    /// Deactivates every particle without fading. Streams keep running.
    pub fn reset(&mut self) {
        self.pool.clear();
        tracing::debug!("particles reset");
    }

    /// Stops the loop, cancels streams and releases the pool. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.stop();
        self.streams.clear();
        self.pool.release();
        self.disposed = true;
        tracing::info!("particle engine disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn canvas_dimensions(&self) -> Canvas {
        self.canvas
    }

    pub fn particle_count(&self) -> usize {
        self.pool.active_count()
    }

    /// Active particles in slot order.
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.pool.active()
    }

    pub fn free_count(&self) -> usize {
        self.pool.free_count()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn is_finished(&self) -> bool {
        self.pool.active_count() == 0
    }

    pub fn config(&self) -> &ParticleSystemConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn last_render_stats(&self) -> RenderStats {
        self.last_stats
    }

    pub fn monitor(&self) -> &PerformanceMonitor {
        &self.monitor
    }

    pub fn quality_level(&self) -> f64 {
        self.monitor.quality_level()
    }

    pub fn device_class(&self) -> DeviceClass {
        self.device
    }

    /// `floor(base * device multiplier * quality)`, for sizing future bursts.
    pub fn scaled_count(&self, base: u32) -> u32 {
        scale_particle_count(base, self.device.multiplier(), self.monitor.quality_level())
    }

    /// Restores full quality after an idle period; notifies the listener if it changed.
    pub fn recalibrate(&mut self) {
        if let Some(change) = self.monitor.recalibrate() {
            tracing::info!(from = change.from, "particle quality recalibrated");
            if let Some(listener) = self.quality_listener.as_mut() {
                listener(change);
            }
        }
    }

    pub fn set_quality_listener(&mut self, listener: impl FnMut(QualityChange) + 'static) {
        self.quality_listener = Some(Box::new(listener));
    }

    fn fire_streams(&mut self, now: Duration) {
        if self.streams.is_empty() {
            return;
        }
        for stream in &mut self.streams {
            let dt_ms = now.saturating_sub(stream.last).as_secs_f64() * 1000.0;
            stream.last = now;
            stream.emitter.advance_into(dt_ms, &mut self.lateness);
            for &age_ms in &self.lateness {
                emitter::emit_aged_burst(
                    &mut self.pool,
                    &self.config,
                    &mut self.rng,
                    stream.emitter.origin(),
                    stream.emitter.template(),
                    age_ms,
                );
            }
        }
        self.streams.retain(|s| {
            let done = s.emitter.is_done();
            if done {
                tracing::debug!(id = ?s.emitter.id(), "stream finished");
            }
            !done
        });
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
