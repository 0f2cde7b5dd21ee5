//! Frame-rate tracking and one-way adaptive quality.

use crate::foundation::core::Canvas;

/// Number of inter-frame samples kept.
pub const FPS_WINDOW: usize = 60;
/// Consecutive tracked frames the average must stay low before quality drops.
pub const SUSTAIN_FRAMES: u32 = 60;
pub const DEGRADED_FPS: f64 = 45.0;
pub const CRITICAL_FPS: f64 = 30.0;
pub const FULL_QUALITY: f64 = 1.0;
pub const DEGRADED_QUALITY: f64 = 0.7;
pub const CRITICAL_QUALITY: f64 = 0.5;

/// Emitted when the quality level changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualityChange {
    pub from: f64,
    pub to: f64,
    pub average_fps: f64,
}

/// Ring buffer of recent FPS samples plus the quality state machine.
///
/// Quality only moves down (1.0 -> 0.7 -> 0.5) while monitoring; the only way
/// back up is an explicit [`recalibrate`](Self::recalibrate).
#[derive(Clone, Debug)]
pub struct PerformanceMonitor {
    samples: [f64; FPS_WINDOW],
    len: usize,
    head: usize,
    sum: f64,
    degraded_streak: u32,
    critical_streak: u32,
    quality: f64,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self {
            samples: [0.0; FPS_WINDOW],
            len: 0,
            head: 0,
            sum: 0.0,
            degraded_streak: 0,
            critical_streak: 0,
            quality: FULL_QUALITY,
        }
    }

    /// Records one inter-frame duration. Non-positive deltas are ignored.
    pub fn record_frame(&mut self, delta_ms: f64) -> Option<QualityChange> {
        if !delta_ms.is_finite() || delta_ms <= 0.0 {
            return None;
        }
        self.push(1000.0 / delta_ms);

        let avg = self.average_fps();
        self.degraded_streak = if avg < DEGRADED_FPS {
            self.degraded_streak.saturating_add(1)
        } else {
            0
        };
        self.critical_streak = if avg < CRITICAL_FPS {
            self.critical_streak.saturating_add(1)
        } else {
            0
        };

        if self.degraded_streak >= SUSTAIN_FRAMES && self.quality > DEGRADED_QUALITY {
            return Some(self.set_quality(DEGRADED_QUALITY, avg));
        }
        if self.critical_streak >= SUSTAIN_FRAMES && self.quality > CRITICAL_QUALITY {
            return Some(self.set_quality(CRITICAL_QUALITY, avg));
        }
        None
    }

    /// FPS of the most recent sample, 0 before any sample.
    pub fn current_fps(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        let last = (self.head + FPS_WINDOW - 1) % FPS_WINDOW;
        self.samples[last]
    }

    /// Mean FPS over the buffered samples, 0 before any sample.
    pub fn average_fps(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        self.sum / self.len as f64
    }

    pub fn sample_count(&self) -> usize {
        self.len
    }

    pub fn quality_level(&self) -> f64 {
        self.quality
    }

    /// Restores full quality and forgets all history.
    ///
    /// Intended for callers that know the load has changed, e.g. after an idle period.
    pub fn recalibrate(&mut self) -> Option<QualityChange> {
        let from = self.quality;
        *self = Self::new();
        (from != FULL_QUALITY).then_some(QualityChange {
            from,
            to: FULL_QUALITY,
            average_fps: 0.0,
        })
    }

    fn push(&mut self, fps: f64) {
        if self.len == FPS_WINDOW {
            self.sum -= self.samples[self.head];
        } else {
            self.len += 1;
        }
        self.samples[self.head] = fps;
        self.sum += fps;
        self.head = (self.head + 1) % FPS_WINDOW;
    }

    fn set_quality(&mut self, to: f64, average_fps: f64) -> QualityChange {
        let from = self.quality;
        self.quality = to;
        tracing::warn!(from, to, average_fps, "reducing particle quality");
        QualityChange {
            from,
            to,
            average_fps,
        }
    }
}

/// Coarse device bucket, inferred from the drawing surface width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    pub fn from_canvas(canvas: Canvas) -> Self {
        match canvas.width {
            0..768 => Self::Mobile,
            768..1024 => Self::Tablet,
            _ => Self::Desktop,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Self::Mobile => 0.5,
            Self::Tablet => 0.75,
            Self::Desktop => 1.0,
        }
    }
}

/// `floor(base * device_multiplier * quality)`.
pub fn scale_particle_count(base: u32, device_multiplier: f64, quality: f64) -> u32 {
    (f64::from(base) * device_multiplier * quality).floor().max(0.0) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/monitor.rs"]
mod tests;
