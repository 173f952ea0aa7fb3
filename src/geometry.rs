//! Dimension and rectangle value types shared by the fit and matrix code.

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Intrinsic size of an image or a layout container.
///
/// Both values are expected to be positive and finite. Nothing here
/// enforces that; see [`try_compute_fit`](crate::try_compute_fit) for a
/// validating entry point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Dimension {
    pub width: f32,
    pub height: f32,
}

impl Dimension {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether either side is zero or negative (NaN counts as empty).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

impl From<(f32, f32)> for Dimension {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for Dimension {
    fn from((width, height): (u32, u32)) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }
}

/// Axis-aligned rectangle in floating point coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Integer pixel bounds produced by [`Rect::round_out`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect at the origin covering `size`.
    pub const fn from_size(size: Dimension) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    /// Build from edges. `right < left` yields a negative width.
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Dimension {
        Dimension::new(self.width, self.height)
    }

    /// Whether the rect encloses no area (NaN counts as empty).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Whether `other` lies entirely within this rect, allowing `epsilon`
    /// of slack on every edge.
    pub fn contains_rect(&self, other: &Rect, epsilon: f32) -> bool {
        other.x >= self.x - epsilon
            && other.y >= self.y - epsilon
            && other.right() <= self.right() + epsilon
            && other.bottom() <= self.bottom() + epsilon
    }

    /// Smallest integer-aligned rect that encloses this one.
    ///
    /// Useful for clip and damage bounds of a fitted image. Values outside
    /// the `i32` range saturate.
    pub fn round_out(&self) -> PixelRect {
        let left = self.x.floor();
        let top = self.y.floor();
        let right = self.right().ceil();
        let bottom = self.bottom().ceil();
        PixelRect {
            x: left as i32,
            y: top as i32,
            width: (right - left).max(0.0) as u32,
            height: (bottom - top).max(0.0) as u32,
        }
    }
}
