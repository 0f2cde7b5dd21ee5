//! Drawing surfaces and the particle renderer.

pub(crate) mod cpu;
pub(crate) mod renderer;
pub(crate) mod surface;
