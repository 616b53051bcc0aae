// Plotters-backed drawing surfaces that execute a SceneGraph

use crate::collision::{Point, Rect};
use crate::error::{ChartError, Result};
use crate::ir::{DrawCommand, HAlign, SceneGraph, VAlign};
use crate::palette::Rgba;
use image::ImageEncoder;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

const FONT_FAMILY: &str = "sans-serif";

/// Something a frame can be drawn onto
pub trait Surface {
    fn size(&self) -> (u32, u32);
    fn draw(&mut self, scene: &SceneGraph) -> Result<()>;
}

/// RGB pixel buffer drawn with `BitMapBackend`
#[derive(Debug, Clone)]
pub struct BitmapSurface {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

/// White RGB buffer for a `width` x `height` surface
fn rgb_buffer(width: u32, height: u32) -> Result<Vec<u8>> {
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or(ChartError::SurfaceTooLarge { width, height })?;
    Ok(vec![255u8; len])
}

impl BitmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(BitmapSurface {
            width,
            height,
            buffer: rgb_buffer(width, height)?,
        })
    }

    /// Reallocate the backing buffer; previous contents are discarded
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.buffer = rgb_buffer(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn pixels(&self) -> &[u8] {
        &self.buffer
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.buffer[i], self.buffer[i + 1], self.buffer[i + 2]])
    }

    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut png_bytes = Vec::new();
        {
            let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
            encoder.write_image(
                &self.buffer,
                self.width,
                self.height,
                image::ColorType::Rgb8,
            )?;
        }
        Ok(png_bytes)
    }
}

impl Surface for BitmapSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw(&mut self, scene: &SceneGraph) -> Result<()> {
        let root = BitMapBackend::with_buffer(&mut self.buffer, (self.width, self.height))
            .into_drawing_area();
        draw_scene(&root, scene)?;
        root.present().map_err(backend_error)
    }
}

/// SVG document drawn with `SVGBackend`
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    svg: String,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        SvgSurface { width, height, svg: String::new() }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// The last drawn frame
    pub fn as_str(&self) -> &str {
        &self.svg
    }

    pub fn into_string(self) -> String {
        self.svg
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw(&mut self, scene: &SceneGraph) -> Result<()> {
        let mut out = String::new();
        {
            let root = SVGBackend::with_string(&mut out, (self.width, self.height))
                .into_drawing_area();
            draw_scene(&root, scene)?;
            root.present().map_err(backend_error)?;
        }
        self.svg = out;
        Ok(())
    }
}

fn backend_error<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Backend(e.to_string())
}

fn to_plotters(color: Rgba) -> RGBAColor {
    RGBColor(color.r, color.g, color.b).mix(color.a)
}

fn px(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

fn corners(rect: Rect) -> [(i32, i32); 2] {
    let r = rect.normalized();
    [px(Point::new(r.x0, r.y0)), px(Point::new(r.x1, r.y1))]
}

/// Execute every command of `scene` in order
pub fn draw_scene<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, scene: &SceneGraph) -> Result<()> {
    for command in &scene.commands {
        match command {
            DrawCommand::Clear { color } => {
                area.fill(&to_plotters(*color)).map_err(backend_error)?;
            }
            DrawCommand::FillRect { rect, color, radius } => {
                let style = to_plotters(*color).filled();
                if *radius > 0.0 {
                    fill_rounded_rect(area, *rect, *radius, style)?;
                } else {
                    area.draw(&Rectangle::new(corners(*rect), style))
                        .map_err(backend_error)?;
                }
            }
            DrawCommand::StrokeRect { rect, color, width } => {
                let style = to_plotters(*color).stroke_width(width.round().max(1.0) as u32);
                area.draw(&Rectangle::new(corners(*rect), style))
                    .map_err(backend_error)?;
            }
            DrawCommand::Line { from, to, color, width } => {
                let style = to_plotters(*color).stroke_width(width.round().max(1.0) as u32);
                area.draw(&PathElement::new(vec![px(*from), px(*to)], style))
                    .map_err(backend_error)?;
            }
            DrawCommand::Text { text, at, color, size, h_align, v_align } => {
                let style = (FONT_FAMILY, *size)
                    .into_font()
                    .color(&to_plotters(*color))
                    .pos(Pos::new(h_pos(*h_align), v_pos(*v_align)));
                area.draw(&Text::new(text.clone(), px(*at), style))
                    .map_err(backend_error)?;
            }
        }
    }
    Ok(())
}

/// Two overlapping rectangles plus a disc in each corner
fn fill_rounded_rect<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    rect: Rect,
    radius: f64,
    style: ShapeStyle,
) -> Result<()> {
    let r = rect.normalized();
    let radius = radius.min((r.x1 - r.x0) / 2.0).min((r.y1 - r.y0) / 2.0).max(0.0);

    let horizontal = Rect::new(r.x0, r.y0 + radius, r.x1, r.y1 - radius);
    let vertical = Rect::new(r.x0 + radius, r.y0, r.x1 - radius, r.y1);
    area.draw(&Rectangle::new(corners(horizontal), style))
        .map_err(backend_error)?;
    area.draw(&Rectangle::new(corners(vertical), style))
        .map_err(backend_error)?;

    let disc = radius.round() as i32;
    for (cx, cy) in [
        (r.x0 + radius, r.y0 + radius),
        (r.x1 - radius, r.y0 + radius),
        (r.x0 + radius, r.y1 - radius),
        (r.x1 - radius, r.y1 - radius),
    ] {
        area.draw(&Circle::new(px(Point::new(cx, cy)), disc, style))
            .map_err(backend_error)?;
    }
    Ok(())
}

fn h_pos(align: HAlign) -> HPos {
    match align {
        HAlign::Left => HPos::Left,
        HAlign::Center => HPos::Center,
        HAlign::Right => HPos::Right,
    }
}

fn v_pos(align: VAlign) -> VPos {
    match align {
        VAlign::Top => VPos::Top,
        VAlign::Center => VPos::Center,
        VAlign::Bottom => VPos::Bottom,
    }
}
