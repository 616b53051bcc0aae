// Screen-space hit testing

/// A point in screen space (pixels, origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned rectangle given by two opposite corners, in any order
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Rect { x0, y0, x1, y1 }
    }

    /// Rectangle of the given size centered on `center`
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        Rect {
            x0: center.x - width / 2.0,
            y0: center.y - height / 2.0,
            x1: center.x + width / 2.0,
            y1: center.y + height / 2.0,
        }
    }

    /// Same rectangle with `x0 <= x1` and `y0 <= y1`
    pub fn normalized(&self) -> Self {
        Rect {
            x0: self.x0.min(self.x1),
            y0: self.y0.min(self.y1),
            x1: self.x0.max(self.x1),
            y1: self.y0.max(self.y1),
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        box_to_point_collision(self, point)
    }
}

/// Inclusive point-in-rectangle test; corner order does not matter
pub fn box_to_point_collision(rect: &Rect, point: Point) -> bool {
    let r = rect.normalized();
    point.x >= r.x0 && point.x <= r.x1 && point.y >= r.y0 && point.y <= r.y1
}
