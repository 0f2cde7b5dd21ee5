//! Fixed-capacity particle arena with an index free-list.

use crate::foundation::core::{Point, Rgb8, Vec2};

/// Simulation state for one slot. Only meaningful while `active`.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Point,
    /// px/s
    pub velocity: Vec2,
    pub age_ms: f64,
    pub max_life_ms: f64,
    pub size: f64,
    pub color: Rgb8,
    pub opacity: f64,
    pub active: bool,
}

impl Particle {
    fn free() -> Self {
        Self {
            position: Point::ORIGIN,
            velocity: Vec2::ZERO,
            age_ms: 0.0,
            max_life_ms: 0.0,
            size: 0.0,
            color: Rgb8::BLACK,
            opacity: 0.0,
            active: false,
        }
    }
}

/// Initial values for a newly activated particle.
#[derive(Clone, Copy, Debug)]
pub struct Spawn {
    pub position: Point,
    pub velocity: Vec2,
    pub life_ms: f64,
    pub size: f64,
    pub color: Rgb8,
}

/// Pre-allocated slots plus a stack of free slot indices.
///
/// `active_count() + free_count() == capacity()` holds after every call.
pub struct ParticlePool {
    slots: Vec<Particle>,
    free: Vec<usize>,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Particle::free(); capacity],
            // Reversed so slots are handed out in ascending order.
            free: (0..capacity).rev().collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Activates a free slot. Returns `None` when the pool is full.
    pub fn spawn(&mut self, spawn: Spawn) -> Option<usize> {
        let idx = self.free.pop()?;
        self.slots[idx] = Particle {
            position: spawn.position,
            velocity: spawn.velocity,
            age_ms: 0.0,
            max_life_ms: spawn.life_ms,
            size: spawn.size,
            color: spawn.color,
            opacity: 1.0,
            active: true,
        };
        Some(idx)
    }

    /// Advances every active particle by `dt_ms`; returns how many expired.
    ///
    /// A particle whose age reaches its life is deactivated in the same call and
    /// skips the rest of the integration step.
    pub fn step(&mut self, dt_ms: f64, gravity: f64, friction: f64) -> usize {
        let Self { slots, free } = self;
        let mut expired = 0;

        for (idx, p) in slots.iter_mut().enumerate() {
            if p.active && integrate(p, dt_ms, gravity, friction) {
                free.push(idx);
                expired += 1;
            }
        }
        expired
    }

    /// [`step`](Self::step) for a single active slot; returns whether it expired.
    pub fn step_slot(&mut self, idx: usize, dt_ms: f64, gravity: f64, friction: f64) -> bool {
        let Some(p) = self.slots.get_mut(idx).filter(|p| p.active) else {
            return false;
        };
        let expired = integrate(p, dt_ms, gravity, friction);
        if expired {
            self.free.push(idx);
        }
        expired
    }

    pub fn active(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().filter(|p| p.active)
    }

    /// Active particles with their slot index, in slot order.
    pub fn active_slots(&self) -> impl Iterator<Item = (usize, &Particle)> {
        self.slots.iter().enumerate().filter(|(_, p)| p.active)
    }

    pub fn get(&self, idx: usize) -> Option<&Particle> {
        self.slots.get(idx).filter(|p| p.active)
    }

    /// Deactivates everything immediately, skipping the fade-out.
    pub fn clear(&mut self) {
        for p in &mut self.slots {
            p.active = false;
            p.opacity = 0.0;
        }
        self.free.clear();
        self.free.extend((0..self.slots.len()).rev());
    }

    /// Drops the backing storage; the pool has zero capacity afterwards.
    pub fn release(&mut self) {
        self.slots = Vec::new();
        self.free = Vec::new();
    }
}

fn integrate(p: &mut Particle, dt_ms: f64, gravity: f64, friction: f64) -> bool {
    p.age_ms += dt_ms;
    if p.age_ms >= p.max_life_ms {
        p.active = false;
        p.opacity = 0.0;
        return true;
    }
    let dt_s = dt_ms / 1000.0;
    p.velocity.y += gravity * dt_s;
    p.velocity *= friction;
    p.position += p.velocity * dt_s;
    p.opacity = 1.0 - p.age_ms / p.max_life_ms;
    false
}

#[cfg(test)]
#[path = "../../tests/unit/particles/pool.rs"]
mod tests;
