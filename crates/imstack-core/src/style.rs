// crates/imstack-core/src/style.rs
use crate::Insets;
use serde::{Deserialize, Serialize};

/// Smallest border-box size a node can be given on any axis.
pub const MIN_SIZE: f32 = 1.0;

/// Largest border-box size a node can be given on any axis.
pub const MAX_SIZE: f32 = 9999.0;

/// Sizing defaults supplied by the theme for every node the engine builds.
///
/// Nodes start from these values and callers override them per node with
/// [`LayoutOptions`](crate::LayoutOptions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutStyle {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
    pub horizontal_stretch_factor: u32,
    pub vertical_stretch_factor: u32,
    pub border: Insets,
    pub padding: Insets,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            min_width: MIN_SIZE,
            max_width: MAX_SIZE,
            min_height: MIN_SIZE,
            max_height: MAX_SIZE,
            horizontal_stretch_factor: 0,
            vertical_stretch_factor: 0,
            border: Insets::ZERO,
            padding: Insets::ZERO,
        }
    }
}

impl LayoutStyle {
    pub fn with_border(mut self, border: Insets) -> Self {
        self.border = border;
        self
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_stretch(mut self, horizontal: u32, vertical: u32) -> Self {
        self.horizontal_stretch_factor = horizontal;
        self.vertical_stretch_factor = vertical;
        self
    }

    pub fn with_width_bounds(mut self, min: f32, max: f32) -> Self {
        self.min_width = min;
        self.max_width = max;
        self
    }

    pub fn with_height_bounds(mut self, min: f32, max: f32) -> Self {
        self.min_height = min;
        self.max_height = max;
        self
    }
}

/// Clamps a size bound into `[MIN_SIZE, MAX_SIZE]`. NaN collapses to `MIN_SIZE`.
pub fn clamp_size(value: f32) -> f32 {
    if value.is_nan() {
        MIN_SIZE
    } else {
        value.clamp(MIN_SIZE, MAX_SIZE)
    }
}

/// Tolerance used when deciding whether a min/max pair describes a fixed size.
pub const SIZE_EPSILON: f32 = 1e-4;

pub fn almost_equal(a: f32, b: f32) -> bool {
    (a - b).abs() <= SIZE_EPSILON * a.abs().max(b.abs()).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_size() {
        assert_eq!(clamp_size(0.0), MIN_SIZE);
        assert_eq!(clamp_size(-5.0), MIN_SIZE);
        assert_eq!(clamp_size(20000.0), MAX_SIZE);
        assert_eq!(clamp_size(f32::NAN), MIN_SIZE);
        assert_eq!(clamp_size(42.5), 42.5);
    }

    #[test]
    fn test_almost_equal_scales_with_magnitude() {
        assert!(almost_equal(100.0, 100.00001));
        assert!(almost_equal(9999.0, 9999.0005));
        assert!(!almost_equal(1.0, 1.01));
    }

    #[test]
    fn test_style_deserializes_sparse() {
        let style: LayoutStyle = serde_json::from_str(r#"{ "padding": { "left": 4, "right": 4 } }"#).unwrap();
        assert_eq!(style.padding.horizontal(), 8.0);
        assert_eq!(style.max_width, MAX_SIZE);
        assert_eq!(style.horizontal_stretch_factor, 0);
    }
}
