//! Particle storage, emission parameters and emitters.

pub(crate) mod config;
pub(crate) mod emitter;
pub(crate) mod pool;
pub(crate) mod rng;
