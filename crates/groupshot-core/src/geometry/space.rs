//! Pixel-space types and the one-way conversions into percentage space.
//!
//! Pointer events arrive as viewport pixel coordinates together with the
//! rendered rectangle of the element they landed on. These types keep the
//! two spaces apart so a pixel delta can never be added to a percentage
//! value by accident.

use super::region::{Region, PERCENT_MAX};
use serde::{Deserialize, Serialize};

/// A point in pixel space (viewport or container-local, as documented at use).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &PixelPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Rendered size of an element in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: f64,
    pub height: f64,
}

impl PixelSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero, negative or not finite.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0
            && self.height > 0.0
            && self.width.is_finite()
            && self.height.is_finite())
    }
}

/// Axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    /// Edge-inclusive containment test.
    pub fn contains(&self, point: PixelPoint) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Express a viewport point relative to this rectangle's top-left corner.
    pub fn to_local(&self, client: PixelPoint) -> PixelPoint {
        PixelPoint::new(client.x - self.x, client.y - self.y)
    }

    /// Convert a pixel delta into a percentage delta of this rectangle.
    ///
    /// An empty rectangle yields a zero delta rather than dividing by zero.
    pub fn delta_to_percent(&self, dx: f64, dy: f64) -> (f64, f64) {
        if self.size().is_empty() {
            return (0.0, 0.0);
        }
        (dx / self.width * PERCENT_MAX, dy / self.height * PERCENT_MAX)
    }
}

/// A point in percentage space (0 to 100 of the photo's rendered box).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PercentPoint {
    pub x: f64,
    pub y: f64,
}

impl PercentPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert a container-local pixel point to percent of `image_rect`.
    pub fn from_pixel(point: PixelPoint, image_rect: &PixelRect) -> Self {
        if image_rect.size().is_empty() {
            return Self::default();
        }
        Self {
            x: (point.x - image_rect.x) / image_rect.width * PERCENT_MAX,
            y: (point.y - image_rect.y) / image_rect.height * PERCENT_MAX,
        }
    }
}

impl Region {
    /// Pixel rectangle of this region inside a container of the given size.
    pub fn to_pixel(&self, container: PixelSize) -> PixelRect {
        PixelRect {
            x: self.x / PERCENT_MAX * container.width,
            y: self.y / PERCENT_MAX * container.height,
            width: self.width / PERCENT_MAX * container.width,
            height: self.height / PERCENT_MAX * container.height,
        }
    }

    /// Percentage region of a container-local pixel rectangle.
    ///
    /// The result is not clamped; run it through [`Region::normalized`] when
    /// the rectangle may extend past the container.
    pub fn from_pixel(rect: PixelRect, container: PixelSize) -> Region {
        if container.is_empty() {
            return Region::default();
        }
        Region {
            x: rect.x / container.width * PERCENT_MAX,
            y: rect.y / container.height * PERCENT_MAX,
            width: rect.width / container.width * PERCENT_MAX,
            height: rect.height / container.height * PERCENT_MAX,
        }
    }
}

/// Letterbox an image of `natural` size into a container.
///
/// The image is scaled by `min(cw / iw, ch / ih)` and centred; the returned
/// rectangle is container-local. Empty inputs produce an empty rectangle.
pub fn fit_image(container: PixelSize, natural: PixelSize) -> PixelRect {
    if container.is_empty() || natural.is_empty() {
        return PixelRect::default();
    }

    let scale = (container.width / natural.width).min(container.height / natural.height);
    let width = natural.width * scale;
    let height = natural.height * scale;

    PixelRect {
        x: (container.width - width) / 2.0,
        y: (container.height - height) / 2.0,
        width,
        height,
    }
}
