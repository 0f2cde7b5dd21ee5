use crate::particles::config::ParticleBlendMode;
use crate::particles::pool::ParticlePool;
use crate::render::surface::DrawSurface;

/// Counters from one render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub drawn: usize,
    pub color_changes: usize,
}

/// Draws active particles grouped by color.
///
/// The only state kept between passes is a scratch buffer of `(color, slot)`
/// keys, sized to the pool capacity once so steady-state passes never allocate.
#[derive(Debug, Default)]
pub struct ParticleRenderer {
    order: Vec<(u32, usize)>,
}

impl ParticleRenderer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
        }
    }

    pub fn render<S: DrawSurface + ?Sized>(
        &mut self,
        pool: &ParticlePool,
        surface: &mut S,
        global_opacity: f64,
        blend_mode: ParticleBlendMode,
    ) -> RenderStats {
        surface.begin_frame();
        surface.set_blend_mode(blend_mode);

        self.order.clear();
        self.order
            .extend(pool.active_slots().map(|(idx, p)| (p.color.packed(), idx)));
        self.order.sort_unstable();

        let mut stats = RenderStats::default();
        let mut current = None;
        for &(key, idx) in &self.order {
            let Some(p) = pool.get(idx) else {
                continue;
            };
            let alpha = (p.opacity * global_opacity).clamp(0.0, 1.0);
            if alpha <= 0.0 {
                continue;
            }
            if current != Some(key) {
                surface.set_fill_color(p.color);
                current = Some(key);
                stats.color_changes += 1;
            }
            surface.fill_circle(p.position, p.size, alpha);
            stats.drawn += 1;
        }

        surface.end_frame();
        stats
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
