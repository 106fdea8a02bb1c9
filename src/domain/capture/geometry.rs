use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in CSS pixels, relative to the capture root.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn scaled(&self, factor: f64) -> Rect {
        Rect::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Integer pixel span `[x0, x1) × [y0, y1)` clipped to `bounds`.
    pub fn pixel_span(&self, bounds: (u32, u32)) -> Option<(u32, u32, u32, u32)> {
        let clamp = |v: f64, max: u32| v.round().clamp(0.0, max as f64) as u32;
        let x0 = clamp(self.x, bounds.0);
        let y0 = clamp(self.y, bounds.1);
        let x1 = clamp(self.right(), bounds.0);
        let y1 = clamp(self.bottom(), bounds.1);
        (x1 > x0 && y1 > y0).then_some((x0, y0, x1, y1))
    }
}

/// Full scrollable size of a capture target in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_zero(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Device-pixel size of the raster at `scale`.
    pub fn raster_size(&self, scale: f64) -> (u64, u64) {
        (
            (self.width * scale).ceil().max(0.0) as u64,
            (self.height * scale).ceil().max(0.0) as u64,
        )
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}
