// crates/imstack-layout/src/group.rs

use glam::Vec2;
use imstack_core::{
    LayoutError, LayoutOptions, LayoutStyle, NodeId, Orientation, Rect, Result, MIN_SIZE,
};

use tracing::trace;

use crate::entry::LayoutEntry;
use crate::pool::{NodePools, Poolable};

/// Id of the placeholder group pushed on the read side when a group has
/// no resolved counterpart from the previous frame.
pub const DUMMY_GROUP_ID: NodeId = -9999;

/// A node of the layout tree: either a leaf entry or a nested group.
#[derive(Debug)]
pub enum LayoutNode {
    Entry(Box<LayoutEntry>),
    Group(Box<LayoutGroup>),
}

impl LayoutNode {
    pub fn entry(&self) -> &LayoutEntry {
        match self {
            LayoutNode::Entry(entry) => entry,
            LayoutNode::Group(group) => &group.entry,
        }
    }

    pub fn entry_mut(&mut self) -> &mut LayoutEntry {
        match self {
            LayoutNode::Entry(entry) => entry,
            LayoutNode::Group(group) => &mut group.entry,
        }
    }

    pub fn id(&self) -> NodeId {
        self.entry().id
    }

    pub fn rect(&self) -> Rect {
        self.entry().rect
    }

    pub fn as_group(&self) -> Option<&LayoutGroup> {
        match self {
            LayoutNode::Group(group) => Some(group),
            LayoutNode::Entry(_) => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut LayoutGroup> {
        match self {
            LayoutNode::Group(group) => Some(group),
            LayoutNode::Entry(_) => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, LayoutNode::Group(_))
    }

    fn measure(&mut self) {
        if let LayoutNode::Group(group) = self {
            group.measure();
        }
    }

    /// `None` resolves the node as if it had no stretch factor on `axis`.
    fn calc_size(&mut self, axis: Orientation, unit: Option<f32>) -> Result<()> {
        match self {
            LayoutNode::Entry(entry) => match unit {
                Some(unit) => entry.calc_size(axis, unit),
                None => {
                    entry.calc_unstretched_size(axis);
                    Ok(())
                }
            },
            LayoutNode::Group(group) => group.calc_size(axis, unit),
        }
    }

    fn set_position(&mut self, axis: Orientation, value: f32) {
        match self {
            LayoutNode::Entry(entry) => entry.set_position(axis, value),
            LayoutNode::Group(group) => group.set_position(axis, value),
        }
    }
}

/// A node that stacks its children along one axis.
#[derive(Debug, Default)]
pub struct LayoutGroup {
    pub entry: LayoutEntry,
    pub orientation: Orientation,
    children: Vec<LayoutNode>,
}

impl LayoutGroup {
    pub fn new(id: NodeId, orientation: Orientation, options: Option<&LayoutOptions>, style: &LayoutStyle) -> Result<Self> {
        let mut group = Self::default();
        group.init(id, orientation, options, style)?;
        Ok(group)
    }

    /// Root of a layout tree. A root's border box is fixed to the viewport
    /// on both axes; roots are only ever resized.
    pub fn root(id: NodeId, orientation: Orientation, size: Vec2, style: &LayoutStyle) -> Self {
        let mut group = Self::default();
        group.orientation = orientation;
        group.entry.id = id;
        group.entry.border = style.border.sanitized();
        group.entry.padding = style.padding.sanitized();
        group.set_viewport_size(size);
        group
    }

    /// The shared, always-empty stand-in for a group missing from the read tree.
    pub fn dummy() -> Self {
        Self::root(DUMMY_GROUP_ID, Orientation::Vertical, Vec2::ONE, &LayoutStyle::default())
    }

    pub fn init(
        &mut self,
        id: NodeId,
        orientation: Orientation,
        options: Option<&LayoutOptions>,
        style: &LayoutStyle,
    ) -> Result<()> {
        debug_assert!(self.children.is_empty(), "group {} initialised with live children", id);
        self.children.clear();
        self.orientation = orientation;
        self.entry.init(id, Vec2::ZERO, options, style)
    }

    pub fn id(&self) -> NodeId {
        self.entry.id
    }

    pub fn rect(&self) -> Rect {
        self.entry.rect
    }

    /// Fixes the border box to `size` on both axes.
    pub fn set_viewport_size(&mut self, size: Vec2) {
        let size = size.max(Vec2::splat(MIN_SIZE));
        self.entry.min_width = size.x;
        self.entry.max_width = size.x;
        self.entry.min_height = size.y;
        self.entry.max_height = size.y;
        self.entry.horizontal_stretch_factor = 0;
        self.entry.vertical_stretch_factor = 0;
    }

    pub fn children(&self) -> &[LayoutNode] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Appends a child, rejecting ids already used by a sibling.
    pub fn add(&mut self, node: LayoutNode) -> std::result::Result<usize, (LayoutError, LayoutNode)> {
        let id = node.id();
        if self.position_of(id).is_some() {
            return Err((LayoutError::DuplicateId { parent: self.id(), id }, node));
        }
        self.children.push(node);
        Ok(self.children.len() - 1)
    }

    pub fn position_of(&self, id: NodeId) -> Option<usize> {
        self.children.iter().position(|child| child.id() == id)
    }

    pub fn get(&self, id: NodeId) -> Option<&LayoutNode> {
        self.children.iter().find(|child| child.id() == id)
    }

    pub fn child_at(&self, index: usize) -> Option<&LayoutNode> {
        self.children.get(index)
    }

    pub fn child_at_mut(&mut self, index: usize) -> Option<&mut LayoutNode> {
        self.children.get_mut(index)
    }

    /// Total number of nodes below this group.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.as_group().map_or(0, LayoutGroup::descendant_count))
            .sum()
    }

    /// Detaches every descendant and hands it back to the pools.
    pub fn recycle_children(&mut self, pools: &mut NodePools) {
        for child in self.children.drain(..) {
            match child {
                LayoutNode::Entry(entry) => pools.entries.put(entry),
                LayoutNode::Group(mut group) => {
                    group.recycle_children(pools);
                    pools.groups.put(group);
                }
            }
        }
    }

    /// Resolves this group as the root of a tree: children are measured,
    /// every node is sized, then positioned from the origin. The group
    /// itself keeps its own fixed or natural size.
    pub fn resolve(&mut self) -> Result<()> {
        for child in &mut self.children {
            child.measure();
        }
        self.calc_size(Orientation::Horizontal, None)?;
        self.calc_size(Orientation::Vertical, None)?;
        self.set_x(0.0);
        self.set_y(0.0);
        Ok(())
    }

    /// Bottom-up pass deriving a group's content size from its children.
    fn measure(&mut self) {
        if self.children.is_empty() {
            return;
        }
        let primary = self.orientation;
        let cross = primary.cross();
        let mut along = 0.0;
        let mut across: f32 = 0.0;
        for child in &mut self.children {
            child.measure();
            let entry = child.entry();
            along += entry.natural_size(primary);
            across = across.max(entry.natural_size(cross));
        }
        self.entry.set_content(primary, along);
        self.entry.set_content(cross, across);
    }

    pub fn calc_width(&mut self, unit_width: f32) -> Result<()> {
        self.calc_size(Orientation::Horizontal, Some(unit_width))
    }

    pub fn calc_height(&mut self, unit_height: f32) -> Result<()> {
        self.calc_size(Orientation::Vertical, Some(unit_height))
    }

    fn calc_size(&mut self, axis: Orientation, unit: Option<f32>) -> Result<()> {
        let stretched = match unit {
            Some(unit) => {
                self.entry.calc_size(axis, unit)?;
                self.entry.is_stretched(axis)
            }
            None => {
                self.entry.calc_unstretched_size(axis);
                false
            }
        };
        // A naturally sized group has no space beyond its children's own.
        let definite = stretched || self.entry.is_fixed(axis);
        let inner = self.entry.inner_size(axis);
        if axis == self.orientation {
            self.distribute_primary(axis, inner, definite)
        } else {
            self.distribute_cross(axis, inner)
        }
    }

    /// Fixed and content-sized children keep their size; the rest of the
    /// inner extent is shared among stretched children by factor. Without
    /// a definite extent or positive remainder stretched children fall
    /// back to their natural size.
    fn distribute_primary(&mut self, axis: Orientation, inner: f32, definite: bool) -> Result<()> {
        let mut consumed = 0.0;
        let mut factors = 0u64;
        for child in &mut self.children {
            let entry = child.entry();
            if definite && entry.is_stretched(axis) {
                factors += u64::from(entry.stretch_factor(axis));
            } else {
                child.calc_size(axis, None)?;
                consumed += child.entry().size(axis);
            }
        }

        if factors == 0 {
            return Ok(());
        }

        let remaining = inner - consumed;
        let unit = if remaining > 0.0 {
            Some(remaining / factors as f32)
        } else {
            trace!(id = self.id(), %axis, remaining, "no space left for stretched children");
            None
        };
        for child in &mut self.children {
            if child.entry().is_stretched(axis) {
                child.calc_size(axis, unit)?;
            }
        }
        Ok(())
    }

    /// Stretched children fill the inner extent; others size themselves.
    fn distribute_cross(&mut self, axis: Orientation, inner: f32) -> Result<()> {
        for child in &mut self.children {
            let entry = child.entry();
            let unit = if inner > 0.0 && entry.is_stretched(axis) {
                Some(inner / entry.stretch_factor(axis) as f32)
            } else {
                None
            };
            child.calc_size(axis, unit)?;
        }
        Ok(())
    }

    pub fn set_x(&mut self, x: f32) {
        self.set_position(Orientation::Horizontal, x);
    }

    pub fn set_y(&mut self, y: f32) {
        self.set_position(Orientation::Vertical, y);
    }

    fn set_position(&mut self, axis: Orientation, value: f32) {
        self.entry.set_position(axis, value);
        let origin = value + self.entry.leading_inset(axis);
        if axis == self.orientation {
            let mut cursor = origin;
            for child in &mut self.children {
                child.set_position(axis, cursor);
                cursor += child.entry().size(axis);
            }
        } else {
            for child in &mut self.children {
                child.set_position(axis, origin);
            }
        }
    }
}

impl Poolable for LayoutGroup {
    fn recycle(&mut self) {
        self.children.clear();
        self.orientation = Orientation::default();
        self.entry.reset();
    }
}
