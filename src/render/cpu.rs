use std::path::Path;

use vello_cpu::kurbo::Shape as _;

use crate::foundation::core::{Canvas, Point, Rgb8};
use crate::foundation::error::{CardFxError, CardFxResult};
use crate::particles::config::ParticleBlendMode;
use crate::render::surface::DrawSurface;

const CIRCLE_TOLERANCE: f64 = 0.1;

/// Raw frame readback.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// CPU raster surface backed by `vello_cpu`.
pub struct CpuSurface {
    width: u16,
    height: u16,
    background: Option<Rgb8>,
    fill: Rgb8,
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: vello_cpu::Pixmap,
}

impl CpuSurface {
    pub fn new(width: u32, height: u32) -> CardFxResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| CardFxError::surface("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| CardFxError::surface("surface height exceeds u16"))?;
        Ok(Self {
            width: width_u16,
            height: height_u16,
            background: None,
            fill: Rgb8::WHITE,
            ctx: None,
            pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
        })
    }

    /// Opaque color painted at the start of every frame; transparent when unset.
    pub fn with_background(mut self, color: Rgb8) -> Self {
        self.background = Some(color);
        self
    }

    pub fn frame_rgba(&self) -> FrameRGBA {
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    /// Straight-alpha copy of the last rendered frame.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut data = self.pixmap.data_as_u8_slice().to_vec();
        unpremultiply_in_place(&mut data);
        image::RgbaImage::from_raw(u32::from(self.width), u32::from(self.height), data)
            .unwrap_or_else(|| image::RgbaImage::new(u32::from(self.width), u32::from(self.height)))
    }

    pub fn save_png(&self, path: &Path) -> CardFxResult<()> {
        self.to_rgba_image()
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| {
                CardFxError::Other(anyhow::anyhow!("write png '{}': {e}", path.display()))
            })
    }
}

impl DrawSurface for CpuSurface {
    fn acquire_context(&mut self) -> CardFxResult<Canvas> {
        if self.width == 0 || self.height == 0 {
            return Err(CardFxError::surface(format!(
                "cannot create a 2D context for a {}x{} surface",
                self.width, self.height
            )));
        }
        if self.ctx.is_none() {
            self.ctx = Some(vello_cpu::RenderContext::new(self.width, self.height));
        }
        Ok(self.dimensions())
    }

    fn dimensions(&self) -> Canvas {
        Canvas::new(u32::from(self.width), u32::from(self.height))
    }

    fn begin_frame(&mut self) {
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        if let Some(bg) = self.background {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, 255));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
    }

    fn set_blend_mode(&mut self, mode: ParticleBlendMode) {
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.set_blend_mode(blend_to_cpu(mode));
        }
    }

    fn set_fill_color(&mut self, color: Rgb8) {
        self.fill = color;
    }

    fn fill_circle(&mut self, center: Point, radius: f64, alpha: f64) {
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };
        if radius <= 0.0 {
            return;
        }
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            self.fill.r,
            self.fill.g,
            self.fill.b,
            a,
        ));
        let circle = vello_cpu::kurbo::Circle::new(
            vello_cpu::kurbo::Point::new(center.x, center.y),
            radius,
        );
        ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
    }

    fn end_frame(&mut self) {
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };
        ctx.flush();
        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);
        ctx.render_to_pixmap(&mut self.pixmap);
    }
}

fn blend_to_cpu(mode: ParticleBlendMode) -> vello_cpu::peniko::BlendMode {
    use vello_cpu::peniko::{BlendMode, Compose, Mix};

    match mode {
        ParticleBlendMode::SourceOver => BlendMode::new(Mix::Normal, Compose::SrcOver),
        ParticleBlendMode::Lighter => BlendMode::new(Mix::Normal, Compose::Plus),
        ParticleBlendMode::Screen => BlendMode::new(Mix::Screen, Compose::SrcOver),
        ParticleBlendMode::Multiply => BlendMode::new(Mix::Multiply, Compose::SrcOver),
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn unpremultiply_in_place(rgba8_premul: &mut [u8]) {
    for px in rgba8_premul.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
