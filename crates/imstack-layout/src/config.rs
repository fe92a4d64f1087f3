// crates/imstack-layout/src/config.rs

use glam::Vec2;
use imstack_core::{LayoutStyle, NodeId, Orientation};

use crate::pool::DEFAULT_POOL_CAPACITY;

/// Construction parameters for a [`StackLayout`](crate::StackLayout).
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub root_id: NodeId,
    pub root_orientation: Orientation,
    /// Viewport size held as the roots' content size.
    pub root_size: Vec2,
    /// Defaults applied to every node before its options.
    pub style: LayoutStyle,
    pub entry_pool_capacity: usize,
    pub group_pool_capacity: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root_id: 0,
            root_orientation: Orientation::Vertical,
            root_size: Vec2::new(800.0, 600.0),
            style: LayoutStyle::default(),
            entry_pool_capacity: DEFAULT_POOL_CAPACITY,
            group_pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root_id(mut self, root_id: NodeId) -> Self {
        self.root_id = root_id;
        self
    }

    pub fn with_root_orientation(mut self, orientation: Orientation) -> Self {
        self.root_orientation = orientation;
        self
    }

    pub fn with_root_size(mut self, size: Vec2) -> Self {
        self.root_size = size;
        self
    }

    pub fn with_style(mut self, style: LayoutStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_pool_capacity(mut self, entries: usize, groups: usize) -> Self {
        self.entry_pool_capacity = entries;
        self.group_pool_capacity = groups;
        self
    }
}
