use std::time::Duration;

/// Frame loop state. There is no separate paused state: pausing is stopping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

/// Tracks `Idle -> Running -> Idle` and turns tick timestamps into deltas.
#[derive(Clone, Debug)]
pub struct FrameScheduler {
    state: LoopState,
    last_tick: Duration,
    frames: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            last_tick: Duration::ZERO,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Frames ticked since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Returns false if the loop was already running.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = LoopState::Running;
        self.last_tick = now;
        true
    }

    /// Returns false if the loop was already idle.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = LoopState::Idle;
        true
    }

    /// Milliseconds since the previous tick (or since `start`), or `None` when idle.
    pub fn tick(&mut self, now: Duration) -> Option<f64> {
        if !self.is_running() {
            return None;
        }
        let delta = now.saturating_sub(self.last_tick);
        self.last_tick = now;
        self.frames += 1;
        Some(delta.as_secs_f64() * 1000.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/scheduler.rs"]
mod tests;
