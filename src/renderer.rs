// Chart renderer: compiles GraphData into a per-frame scene graph

use crate::backend::Surface;
use crate::collision::{Point, Rect};
use crate::error::Result;
use crate::graph::{BarDiagram, GraphData, GraphType};
use crate::ir::{DrawCommand, HAlign, SceneGraph, VAlign};
use crate::palette::{parse_color, Rgba};
use crate::scale::Scale;
use crate::style::ChartStyle;
use log::debug;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

const INFO_BOX_BORDER: f64 = 2.0;

/// The stacked segment under the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct HoverMatch {
    pub bar_index: usize,
    pub segment_index: usize,
    pub rect: Rect,
    pub name: Option<String>,
    pub value: f64,
}

/// Screen geometry of one stacked segment
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentGeometry<'a> {
    pub bar_index: usize,
    pub segment_index: usize,
    pub rect: Rect,
    pub color: &'a str,
    pub name: Option<&'a str>,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ChromeColors {
    background: Rgba,
    axis: Rgba,
    grid: Rgba,
    info_box: Rgba,
    canvas: Rgba,
}

impl ChromeColors {
    fn resolve(style: &ChartStyle) -> Result<Self> {
        let c = &style.colors;
        Ok(ChromeColors {
            background: parse_color(&c.background)?,
            axis: parse_color(&c.axis)?,
            grid: parse_color(&c.grid)?,
            info_box: parse_color(&c.info_box)?,
            canvas: parse_color(&c.canvas)?,
        })
    }
}

/// Draws a bar diagram frame by frame.
///
/// Holds the current data, viewport size and pointer position. Each call to
/// `scene` rebuilds the whole frame from that state, so two calls with the
/// same state produce the same commands.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    data: Option<GraphData>,
    style: ChartStyle,
    colors: ChromeColors,
    width: u32,
    height: u32,
    pointer: Option<Point>,
}

impl ChartRenderer {
    pub fn new(data: GraphData, style: ChartStyle) -> Result<Self> {
        let mut renderer = Self::empty(style)?;
        renderer.data = Some(data);
        Ok(renderer)
    }

    /// A renderer with no data; it draws nothing until `update_data`
    pub fn empty(style: ChartStyle) -> Result<Self> {
        style.validate()?;
        let colors = ChromeColors::resolve(&style)?;
        Ok(ChartRenderer {
            data: None,
            style,
            colors,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            pointer: None,
        })
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.resize(width, height);
        self
    }

    pub fn data(&self) -> Option<&GraphData> {
        self.data.as_ref()
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Replace the data wholesale; the next frame reflects it fully
    pub fn update_data(&mut self, data: GraphData) {
        self.data = Some(data);
    }

    pub fn clear_data(&mut self) {
        self.data = None;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        debug!("Viewport resized to {}x{}", width, height);
        self.width = width;
        self.height = height;
    }

    pub fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
    }

    /// Draw one frame onto `surface`
    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<()> {
        let scene = self.scene()?;
        if scene.is_empty() {
            debug!("No data, leaving surface untouched");
            return Ok(());
        }
        surface.draw(&scene)
    }

    /// Compile the current state into drawing commands
    pub fn scene(&self) -> Result<SceneGraph> {
        let mut scene = SceneGraph::new(self.width, self.height);

        let Some(data) = &self.data else {
            debug!("No graph data; nothing to draw");
            return Ok(scene);
        };

        self.draw_background(&mut scene);

        match &data.graph_type {
            GraphType::Bar(diagram) => {
                self.draw_names(&mut scene, diagram);
                self.draw_grid(&mut scene, diagram);
                self.draw_bars(&mut scene, diagram)?;
                self.draw_axis(&mut scene);
                if let Some(hover) = self.hit_test_diagram(diagram) {
                    self.draw_info_box(&mut scene, &hover);
                }
            }
            GraphType::Line(_) => {
                debug!("Line graphs are not rendered yet; drawing background only");
            }
        }

        Ok(scene)
    }

    /// The segment under the pointer, if any. Later segments win on overlap.
    pub fn hit_test(&self) -> Option<HoverMatch> {
        match &self.data.as_ref()?.graph_type {
            GraphType::Bar(diagram) => self.hit_test_diagram(diagram),
            GraphType::Line(_) => None,
        }
    }

    fn hit_test_diagram(&self, diagram: &BarDiagram) -> Option<HoverMatch> {
        let pointer = self.pointer?;
        self.segment_geometry(diagram)
            .into_iter()
            .filter(|seg| seg.rect.contains(pointer))
            .last()
            .map(|seg| HoverMatch {
                bar_index: seg.bar_index,
                segment_index: seg.segment_index,
                rect: seg.rect,
                name: seg.name.map(str::to_string),
                value: seg.value,
            })
    }

    /// Rectangles of every stacked segment, bottom-up within each bar
    pub fn segment_geometry<'a>(&self, diagram: &'a BarDiagram) -> Vec<SegmentGeometry<'a>> {
        let x_scale = self.bar_scale(diagram.values.len());
        let y_scale = self.value_scale(diagram);
        let half_width = self.style.bar.half_width;

        let mut segments = Vec::new();
        for (bar_index, bar) in diagram.values.iter().enumerate() {
            let x = x_scale.map(bar_index as f64);
            let mut prefix = diagram.value_range.min;

            for (segment_index, segment) in bar.value_params.iter().enumerate() {
                let rect = Rect::new(
                    x - half_width,
                    y_scale.map(prefix),
                    x + half_width,
                    y_scale.map(prefix + segment.value),
                );
                segments.push(SegmentGeometry {
                    bar_index,
                    segment_index,
                    rect,
                    color: &segment.color,
                    name: segment.name.as_deref(),
                    value: segment.value,
                });
                prefix += segment.value;
            }
        }
        segments
    }

    // === Layout ===

    fn plot_left(&self) -> f64 {
        self.style.axis.padding.left
    }

    fn plot_right(&self) -> f64 {
        self.width as f64 - self.style.axis.padding.right
    }

    fn plot_bottom(&self) -> f64 {
        self.height as f64 - self.style.axis.padding.down
    }

    fn plot_top(&self) -> f64 {
        self.style.axis.padding.up + self.style.axis.max_value_padding
    }

    fn bar_scale(&self, bar_count: usize) -> Scale {
        Scale::categorical(bar_count, (self.plot_left(), self.plot_right()))
    }

    fn value_scale(&self, diagram: &BarDiagram) -> Scale {
        let range = diagram.value_range;
        Scale::new((range.min, range.max), (self.plot_bottom(), self.plot_top()))
    }

    fn tick_scale(&self, tick_count: usize) -> Scale {
        Scale::ticks(tick_count, (self.plot_bottom(), self.plot_top()))
    }

    // === Drawing ===

    fn draw_background(&self, scene: &mut SceneGraph) {
        scene.push(DrawCommand::Clear { color: self.colors.canvas });
        scene.push(DrawCommand::FillRect {
            rect: Rect::new(0.0, 0.0, self.width as f64, self.height as f64),
            color: self.colors.background,
            radius: self.style.background_rounding,
        });
    }

    fn draw_names(&self, scene: &mut SceneGraph, diagram: &BarDiagram) {
        let axis = &self.style.axis;

        let ticks = self.tick_scale(diagram.value_names.len());
        for (i, name) in diagram.value_names.iter().enumerate() {
            scene.push(DrawCommand::Text {
                text: name.clone(),
                at: Point::new(self.plot_left() - axis.text_offset, ticks.map(i as f64)),
                color: self.colors.axis,
                size: axis.text_size,
                h_align: HAlign::Right,
                v_align: VAlign::Center,
            });
        }

        let bars = self.bar_scale(diagram.values.len());
        for (i, bar) in diagram.values.iter().enumerate() {
            scene.push(DrawCommand::Text {
                text: bar.name.clone(),
                at: Point::new(bars.map(i as f64), self.plot_bottom() + axis.text_offset),
                color: self.colors.axis,
                size: axis.text_size,
                h_align: HAlign::Center,
                v_align: VAlign::Top,
            });
        }
    }

    fn draw_grid(&self, scene: &mut SceneGraph, diagram: &BarDiagram) {
        let axis = &self.style.axis;
        let width = axis.size / 2.0;
        let start = self.plot_left() + width;
        let end = self.plot_right();
        let ticks = self.tick_scale(diagram.value_names.len());

        // Tick 0 sits on the x axis itself
        for i in 1..diagram.value_names.len() {
            let y = ticks.map(i as f64);

            if axis.dotted_grid {
                let dashes = ((end - start) / axis.dash_length).floor().max(0.0) as usize;
                for k in 0..dashes {
                    let x = start + k as f64 * axis.dash_length;
                    let dash_end = (x + axis.dash_length - axis.gap_length).min(end);
                    scene.push(DrawCommand::Line {
                        from: Point::new(x, y),
                        to: Point::new(dash_end, y),
                        color: self.colors.grid,
                        width,
                    });
                }
            } else {
                scene.push(DrawCommand::Line {
                    from: Point::new(start, y),
                    to: Point::new(end, y),
                    color: self.colors.grid,
                    width,
                });
            }
        }
    }

    fn draw_bars(&self, scene: &mut SceneGraph, diagram: &BarDiagram) -> Result<()> {
        for segment in self.segment_geometry(diagram) {
            scene.push(DrawCommand::FillRect {
                rect: segment.rect,
                color: parse_color(segment.color)?,
                radius: 0.0,
            });
        }
        Ok(())
    }

    fn draw_axis(&self, scene: &mut SceneGraph) {
        let size = self.style.axis.size;
        let left = self.plot_left();
        let bottom = self.plot_bottom();

        scene.push(DrawCommand::FillRect {
            rect: Rect::new(left, self.style.axis.padding.up, left + size, bottom),
            color: self.colors.axis,
            radius: 0.0,
        });
        scene.push(DrawCommand::FillRect {
            rect: Rect::new(left, bottom, self.plot_right(), bottom - size),
            color: self.colors.axis,
            radius: 0.0,
        });
    }

    fn draw_info_box(&self, scene: &mut SceneGraph, hover: &HoverMatch) {
        let (Some(name), Some(pointer)) = (&hover.name, self.pointer) else {
            return;
        };
        let info = &self.style.info_box;

        let center = Point::new(
            hover.rect.normalized().x1 - self.style.bar.half_width,
            pointer.y,
        );
        let rect = Rect::centered(center, info.width, info.height);

        scene.push(DrawCommand::FillRect {
            rect,
            color: self.colors.background,
            radius: 0.0,
        });
        scene.push(DrawCommand::StrokeRect {
            rect,
            color: self.colors.info_box,
            width: INFO_BOX_BORDER,
        });
        scene.push(DrawCommand::Text {
            text: format!("{}: {}", name, hover.value),
            at: center,
            color: self.colors.axis,
            size: info.text_size,
            h_align: HAlign::Center,
            v_align: VAlign::Center,
        });
    }
}
