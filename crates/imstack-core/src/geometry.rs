// crates/imstack-core/src/geometry.rs
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Border-box rectangle produced by the layout pass.
///
/// `#[repr(C)]` so a renderer can cast a slice of rects straight into a
/// vertex or instance buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Extent along an axis.
    pub fn extent(&self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}, {}, {}}}", self.x, self.y, self.width, self.height)
    }
}

/// Four-sided border or padding widths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    pub const ZERO: Insets = Insets::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Sum of both sides along an axis.
    pub fn along(&self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Horizontal => self.horizontal(),
            Orientation::Vertical => self.vertical(),
        }
    }

    /// The side an axis starts from (left or top).
    pub fn leading(&self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Horizontal => self.left,
            Orientation::Vertical => self.top,
        }
    }

    /// Negative widths are meaningless for a box model and are clamped to zero.
    pub fn sanitized(self) -> Self {
        Self::new(
            self.top.max(0.0),
            self.right.max(0.0),
            self.bottom.max(0.0),
            self.left.max(0.0),
        )
    }
}

/// Axis along which a group stacks its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const BOTH: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    pub fn cross(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Vertical
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => f.write_str("horizontal"),
            Orientation::Vertical => f.write_str("vertical"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_accessors() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.position(), Vec2::new(10.0, 20.0));
        assert_eq!(rect.size(), Vec2::new(30.0, 40.0));
        assert_eq!(rect.extent(Orientation::Horizontal), 30.0);
        assert_eq!(rect.extent(Orientation::Vertical), 40.0);
        assert_eq!(rect.to_string(), "{10, 20, 30, 40}");
    }

    #[test]
    fn test_rect_slice_is_plain_bytes() {
        let rects = [Rect::new(1.0, 2.0, 3.0, 4.0), Rect::ZERO];
        let bytes: &[u8] = bytemuck::cast_slice(&rects);
        assert_eq!(bytes.len(), 2 * 4 * std::mem::size_of::<f32>());
        let back: &[Rect] = bytemuck::cast_slice(bytes);
        assert_eq!(back[0], rects[0]);
    }

    #[test]
    fn test_insets_along_axis() {
        let insets = Insets::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(insets.along(Orientation::Horizontal), 6.0);
        assert_eq!(insets.along(Orientation::Vertical), 4.0);
        assert_eq!(insets.leading(Orientation::Horizontal), 4.0);
        assert_eq!(insets.leading(Orientation::Vertical), 1.0);
        assert_eq!(Insets::new(-1.0, 2.0, -3.0, 0.0).sanitized(), Insets::new(0.0, 2.0, 0.0, 0.0));
    }

    #[test]
    fn test_orientation_cross() {
        assert_eq!(Orientation::Horizontal.cross(), Orientation::Vertical);
        assert_eq!(Orientation::Horizontal.to_string(), "horizontal");
    }
}
