use crate::foundation::core::{Canvas, Point, Rgb8};
use crate::foundation::error::{CardFxError, CardFxResult};
use crate::particles::config::ParticleBlendMode;

/// 2D drawing target the particle renderer paints into.
///
/// Mirrors the subset of an immediate-mode canvas the renderer needs: one
/// composite mode per pass, a current fill color, and alpha-blended circles.
pub trait DrawSurface {
    /// Called once when an engine binds the surface. An error here means the
    /// surface cannot produce a usable 2D context and no engine is built.
    fn acquire_context(&mut self) -> CardFxResult<Canvas>;

    fn dimensions(&self) -> Canvas;

    /// Clears the frame and prepares for drawing.
    fn begin_frame(&mut self);

    fn set_blend_mode(&mut self, mode: ParticleBlendMode);

    fn set_fill_color(&mut self, color: Rgb8);

    /// `alpha` is the final per-particle opacity in `[0, 1]`.
    fn fill_circle(&mut self, center: Point, radius: f64, alpha: f64);

    fn end_frame(&mut self);
}

/// One recorded [`DrawSurface`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    BeginFrame,
    SetBlendMode(ParticleBlendMode),
    SetFillColor(Rgb8),
    FillCircle {
        center: Point,
        radius: f64,
        alpha: f64,
    },
    EndFrame,
}

/// Headless surface that records draw calls instead of rasterizing them.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            commands: Vec::new(),
        }
    }

    /// Commands since the last `begin_frame`.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn circles_drawn(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count()
    }

    pub fn fill_color_changes(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::SetFillColor(_)))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn acquire_context(&mut self) -> CardFxResult<Canvas> {
        if self.canvas.is_empty() {
            return Err(CardFxError::surface(format!(
                "cannot create a 2D context for a {}x{} surface",
                self.canvas.width, self.canvas.height
            )));
        }
        Ok(self.canvas)
    }

    fn dimensions(&self) -> Canvas {
        self.canvas
    }

    fn begin_frame(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::BeginFrame);
    }

    fn set_blend_mode(&mut self, mode: ParticleBlendMode) {
        self.commands.push(DrawCommand::SetBlendMode(mode));
    }

    fn set_fill_color(&mut self, color: Rgb8) {
        self.commands.push(DrawCommand::SetFillColor(color));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, alpha: f64) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            alpha,
        });
    }

    fn end_frame(&mut self) {
        self.commands.push(DrawCommand::EndFrame);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
