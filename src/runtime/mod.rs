//! Time sources, frame loop state and adaptive quality.

pub(crate) mod clock;
pub(crate) mod monitor;
pub(crate) mod scheduler;
