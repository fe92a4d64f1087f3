// crates/imstack-core/src/options.rs
use crate::Orientation;
use serde::{Deserialize, Serialize};

/// Per-node overrides of the style defaults. Unset fields keep the style value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub min_width: Option<f32>,
    pub max_width: Option<f32>,
    pub min_height: Option<f32>,
    pub max_height: Option<f32>,
    pub horizontal_stretch_factor: Option<u32>,
    pub vertical_stretch_factor: Option<u32>,
}

impl LayoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the border-box width.
    pub fn width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self.max_width = Some(width);
        self
    }

    /// Fixes the border-box height.
    pub fn height(mut self, height: f32) -> Self {
        self.min_height = Some(height);
        self.max_height = Some(height);
        self
    }

    pub fn min_width(mut self, value: f32) -> Self {
        self.min_width = Some(value);
        self
    }

    pub fn max_width(mut self, value: f32) -> Self {
        self.max_width = Some(value);
        self
    }

    pub fn min_height(mut self, value: f32) -> Self {
        self.min_height = Some(value);
        self
    }

    pub fn max_height(mut self, value: f32) -> Self {
        self.max_height = Some(value);
        self
    }

    pub fn horizontal_stretch(mut self, factor: u32) -> Self {
        self.horizontal_stretch_factor = Some(factor);
        self
    }

    pub fn vertical_stretch(mut self, factor: u32) -> Self {
        self.vertical_stretch_factor = Some(factor);
        self
    }

    pub fn expand_width(self) -> Self {
        self.horizontal_stretch(1)
    }

    pub fn expand_height(self) -> Self {
        self.vertical_stretch(1)
    }

    /// The `(min, max)` overrides for an axis.
    pub fn bounds(&self, axis: Orientation) -> (Option<f32>, Option<f32>) {
        match axis {
            Orientation::Horizontal => (self.min_width, self.max_width),
            Orientation::Vertical => (self.min_height, self.max_height),
        }
    }

    pub fn stretch_factor(&self, axis: Orientation) -> Option<u32> {
        match axis {
            Orientation::Horizontal => self.horizontal_stretch_factor,
            Orientation::Vertical => self.vertical_stretch_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_only_named_fields() {
        let options = LayoutOptions::new().width(120.0).expand_height();
        assert_eq!(options.bounds(Orientation::Horizontal), (Some(120.0), Some(120.0)));
        assert_eq!(options.bounds(Orientation::Vertical), (None, None));
        assert_eq!(options.stretch_factor(Orientation::Vertical), Some(1));
        assert_eq!(options.stretch_factor(Orientation::Horizontal), None);
    }
}
