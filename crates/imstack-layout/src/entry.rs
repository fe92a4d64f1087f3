// crates/imstack-layout/src/entry.rs

use glam::Vec2;
use imstack_core::{
    almost_equal, clamp_size, Insets, LayoutError, LayoutOptions, LayoutStyle, NodeId, Orientation, Rect,
    Result, MAX_SIZE, MIN_SIZE,
};
use std::fmt;

use crate::pool::Poolable;

/// Box-model unit of the layout tree.
///
/// Leaf nodes are plain entries; groups wrap an entry and add children.
#[derive(Debug, Clone)]
pub struct LayoutEntry {
    /// Identity among the siblings of one group.
    pub id: NodeId,
    /// Diagnostic name, empty when unset.
    tag: String,
    /// Border-box result of the last resolution pass.
    pub rect: Rect,
    /// Natural content size, supplied by the caller before layout.
    pub content_width: f32,
    pub content_height: f32,
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
    pub horizontal_stretch_factor: u32,
    pub vertical_stretch_factor: u32,
    pub border: Insets,
    pub padding: Insets,
}

impl Default for LayoutEntry {
    fn default() -> Self {
        Self {
            id: 0,
            tag: String::new(),
            rect: Rect::ZERO,
            content_width: 0.0,
            content_height: 0.0,
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

impl LayoutEntry {
    pub fn new(id: NodeId, content_size: Vec2, options: Option<&LayoutOptions>, style: &LayoutStyle) -> Result<Self> {
        let mut entry = Self::default();
        entry.init(id, content_size, options, style)?;
        Ok(entry)
    }

    /// Back to the state of a freshly allocated entry. The tag keeps its buffer.
    pub fn reset(&mut self) {
        let mut tag = std::mem::take(&mut self.tag);
        tag.clear();
        *self = Self { tag, ..Self::default() };
    }

    /// Prepares the entry for this frame: style defaults first, then the
    /// caller's overrides.
    pub fn init(
        &mut self,
        id: NodeId,
        content_size: Vec2,
        options: Option<&LayoutOptions>,
        style: &LayoutStyle,
    ) -> Result<()> {
        self.reset();
        self.id = id;
        self.content_width = content_size.x.max(0.0);
        self.content_height = content_size.y.max(0.0);

        self.apply_style(style);
        if let Some(options) = options {
            self.apply_options(options);
        }
        self.validate()
    }

    pub fn tag(&self) -> Option<&str> {
        if self.tag.is_empty() {
            None
        } else {
            Some(&self.tag)
        }
    }

    pub fn set_tag(&mut self, tag: Option<&str>) {
        self.tag.clear();
        if let Some(tag) = tag {
            self.tag.push_str(tag);
        }
    }

    fn apply_style(&mut self, style: &LayoutStyle) {
        self.min_width = clamp_size(style.min_width);
        self.max_width = clamp_size(style.max_width).max(self.min_width);
        self.min_height = clamp_size(style.min_height);
        self.max_height = clamp_size(style.max_height).max(self.min_height);

        self.border = style.border.sanitized();
        self.padding = style.padding.sanitized();

        self.horizontal_stretch_factor = if self.is_fixed_width() { 0 } else { style.horizontal_stretch_factor };
        self.vertical_stretch_factor = if self.is_fixed_height() { 0 } else { style.vertical_stretch_factor };
    }

    fn apply_options(&mut self, options: &LayoutOptions) {
        for axis in Orientation::BOTH {
            let (min, max) = options.bounds(axis);
            if min.is_none() && max.is_none() {
                continue;
            }

            let (current_min, current_max) = self.bounds(axis);
            let mut new_min = min.map_or(current_min, clamp_size);
            let mut new_max = max.map_or(current_max, clamp_size);
            if new_min > new_max {
                match (min, max) {
                    (Some(_), Some(_)) => std::mem::swap(&mut new_min, &mut new_max),
                    (Some(_), None) => new_max = new_min,
                    _ => new_min = new_max,
                }
            }
            self.set_bounds(axis, new_min, new_max);

            if self.is_fixed(axis) {
                self.set_stretch_factor(axis, 0);
            }
        }

        for axis in Orientation::BOTH {
            if let Some(factor) = options.stretch_factor(axis) {
                self.set_stretch_factor(axis, factor);
            }
        }
    }

    /// A fixed box must at least hold its own insets.
    fn validate(&self) -> Result<()> {
        for axis in Orientation::BOTH {
            if !self.is_fixed(axis) {
                continue;
            }
            let insets = self.insets(axis);
            let (size, _) = self.bounds(axis);
            if size < insets {
                return Err(LayoutError::InsetsExceedFixedSize { id: self.id, axis, size, insets });
            }
        }
        Ok(())
    }

    pub fn is_fixed_width(&self) -> bool {
        almost_equal(self.min_width, self.max_width)
    }

    pub fn is_fixed_height(&self) -> bool {
        almost_equal(self.min_height, self.max_height)
    }

    pub fn horizontally_stretched(&self) -> bool {
        !self.is_fixed_width() && self.horizontal_stretch_factor > 0
    }

    pub fn vertically_stretched(&self) -> bool {
        !self.is_fixed_height() && self.vertical_stretch_factor > 0
    }

    pub fn is_fixed(&self, axis: Orientation) -> bool {
        match axis {
            Orientation::Horizontal => self.is_fixed_width(),
            Orientation::Vertical => self.is_fixed_height(),
        }
    }

    pub fn is_stretched(&self, axis: Orientation) -> bool {
        match axis {
            Orientation::Horizontal => self.horizontally_stretched(),
            Orientation::Vertical => self.vertically_stretched(),
        }
    }

    pub fn stretch_factor(&self, axis: Orientation) -> u32 {
        match axis {
            Orientation::Horizontal => self.horizontal_stretch_factor,
            Orientation::Vertical => self.vertical_stretch_factor,
        }
    }

    fn set_stretch_factor(&mut self, axis: Orientation, factor: u32) {
        match axis {
            Orientation::Horizontal => self.horizontal_stretch_factor = factor,
            Orientation::Vertical => self.vertical_stretch_factor = factor,
        }
    }

    pub fn bounds(&self, axis: Orientation) -> (f32, f32) {
        match axis {
            Orientation::Horizontal => (self.min_width, self.max_width),
            Orientation::Vertical => (self.min_height, self.max_height),
        }
    }

    fn set_bounds(&mut self, axis: Orientation, min: f32, max: f32) {
        match axis {
            Orientation::Horizontal => {
                self.min_width = min;
                self.max_width = max;
            }
            Orientation::Vertical => {
                self.min_height = min;
                self.max_height = max;
            }
        }
    }

    pub fn content(&self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Horizontal => self.content_width,
            Orientation::Vertical => self.content_height,
        }
    }

    pub fn set_content(&mut self, axis: Orientation, value: f32) {
        match axis {
            Orientation::Horizontal => self.content_width = value,
            Orientation::Vertical => self.content_height = value,
        }
    }

    /// Padding plus border along an axis.
    pub fn insets(&self, axis: Orientation) -> f32 {
        self.padding.along(axis) + self.border.along(axis)
    }

    /// Distance from the border-box edge to the content box on the leading side.
    pub fn leading_inset(&self, axis: Orientation) -> f32 {
        self.padding.leading(axis) + self.border.leading(axis)
    }

    /// Resolved border-box extent along an axis.
    pub fn size(&self, axis: Orientation) -> f32 {
        self.rect.extent(axis)
    }

    /// Resolved content-box extent along an axis.
    pub fn inner_size(&self, axis: Orientation) -> f32 {
        self.size(axis) - self.insets(axis)
    }

    /// Natural border-box size along an axis; `None` when the axis is fixed.
    pub fn default_size(&self, axis: Orientation) -> Option<f32> {
        if self.is_fixed(axis) {
            None
        } else {
            Some(self.content(axis) + self.insets(axis))
        }
    }

    pub fn default_width(&self) -> Option<f32> {
        self.default_size(Orientation::Horizontal)
    }

    pub fn default_height(&self) -> Option<f32> {
        self.default_size(Orientation::Vertical)
    }

    /// Size this entry asks for before any space is distributed.
    pub fn natural_size(&self, axis: Orientation) -> f32 {
        self.default_size(axis).unwrap_or_else(|| self.bounds(axis).0)
    }

    /// Resolves the border-box extent along `axis`.
    ///
    /// `unit` is the parent's share per stretch factor and is only read
    /// when the entry is stretched on that axis.
    pub fn calc_size(&mut self, axis: Orientation, unit: f32) -> Result<()> {
        if !self.is_stretched(axis) {
            self.calc_unstretched_size(axis);
            return Ok(());
        }
        if !(unit > 0.0) {
            return Err(LayoutError::InvalidUnitSize { id: self.id, axis, unit });
        }
        let size = unit * self.stretch_factor(axis) as f32;
        self.set_extent(axis, size);
        self.set_content(axis, size - self.insets(axis));
        Ok(())
    }

    /// Resolves `axis` as if the entry had no stretch factor: the fixed
    /// size when fixed, otherwise content plus insets.
    pub fn calc_unstretched_size(&mut self, axis: Orientation) {
        if self.is_fixed(axis) {
            let size = self.bounds(axis).0;
            self.set_extent(axis, size);
            self.set_content(axis, size - self.insets(axis));
        } else {
            let natural = self.content(axis) + self.insets(axis);
            self.set_extent(axis, natural);
        }
    }

    pub fn calc_width(&mut self, unit_width: f32) -> Result<()> {
        self.calc_size(Orientation::Horizontal, unit_width)
    }

    pub fn calc_height(&mut self, unit_height: f32) -> Result<()> {
        self.calc_size(Orientation::Vertical, unit_height)
    }

    fn set_extent(&mut self, axis: Orientation, value: f32) {
        match axis {
            Orientation::Horizontal => self.rect.width = value,
            Orientation::Vertical => self.rect.height = value,
        }
    }

    pub fn set_position(&mut self, axis: Orientation, value: f32) {
        match axis {
            Orientation::Horizontal => self.rect.x = value,
            Orientation::Vertical => self.rect.y = value,
        }
    }

    pub fn set_x(&mut self, x: f32) {
        self.rect.x = x;
    }

    pub fn set_y(&mut self, y: f32) {
        self.rect.y = y;
    }
}

impl Poolable for LayoutEntry {
    fn recycle(&mut self) {
        self.reset();
    }
}

impl fmt::Display for LayoutEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entry {}:{}, Rect={}", self.tag().unwrap_or("-"), self.id, self.rect)
    }
}
