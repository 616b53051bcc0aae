use crate::collision::{Point, Rect};
use crate::palette::Rgba;

// =============================================================================
// Scene Graph
// =============================================================================

/// One frame as a list of primitive drawing commands.
/// Surfaces execute these blindly, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGraph {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl SceneGraph {
    pub fn new(width: u32, height: u32) -> Self {
        SceneGraph { width, height, commands: Vec::new() }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear { color: Rgba },
    FillRect {
        rect: Rect,
        color: Rgba,
        /// Corner radius; 0 for square corners
        radius: f64,
    },
    StrokeRect { rect: Rect, color: Rgba, width: f64 },
    Line { from: Point, to: Point, color: Rgba, width: f64 },
    Text {
        text: String,
        at: Point,
        color: Rgba,
        size: f64,
        h_align: HAlign,
        v_align: VAlign,
    },
}
