// crates/imstack-layout/src/stack.rs

use glam::Vec2;
use imstack_core::{LayoutError, LayoutOptions, LayoutStyle, NodeId, Orientation, Rect, Result, MIN_SIZE};
use tracing::{debug, error, trace, warn};

use crate::config::LayoutConfig;
use crate::group::{LayoutGroup, LayoutNode};
use crate::pool::{NodePoolStats, NodePools};

/// Answer for nodes that have not been through a resolution pass yet.
pub const DUMMY_RECT: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

/// Frame-pipelined stack layout.
///
/// Widget code declares this frame's tree with [`begin_layout_group`],
/// [`get_rect`] and [`end_layout_group`] while the engine answers every
/// declaration from the tree resolved at the end of the previous frame.
/// [`layout`] resolves the tree just built, swaps it in as the read tree
/// and recycles the tree it replaces.
///
/// [`begin_layout_group`]: StackLayout::begin_layout_group
/// [`get_rect`]: StackLayout::get_rect
/// [`end_layout_group`]: StackLayout::end_layout_group
/// [`layout`]: StackLayout::layout
#[derive(Debug)]
pub struct StackLayout {
    roots: [LayoutGroup; 2],
    /// Index into `roots` of the tree being built; the other one is read.
    write: usize,
    /// Child indices from the write root down to the open group.
    write_path: Vec<usize>,
    /// Same path on the read side; `None` once a group had no counterpart.
    read_path: Vec<Option<usize>>,
    pools: NodePools,
    dummy_group: LayoutGroup,
    style: LayoutStyle,
    root_size: Vec2,
    frame: u64,
    poisoned: Option<LayoutError>,
}

impl StackLayout {
    pub fn new(root_id: NodeId, root_size: Vec2) -> Self {
        Self::with_config(LayoutConfig::default().with_root_id(root_id).with_root_size(root_size))
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        let root_size = clamp_root_size(config.root_size);
        let root = || LayoutGroup::root(config.root_id, config.root_orientation, root_size, &config.style);
        Self {
            roots: [root(), root()],
            write: 0,
            write_path: Vec::new(),
            read_path: Vec::new(),
            pools: NodePools::with_capacity(config.entry_pool_capacity, config.group_pool_capacity),
            dummy_group: LayoutGroup::dummy(),
            style: config.style,
            root_size,
            frame: 0,
            poisoned: None,
        }
    }

    /// Frame-start hook.
    pub fn begin(&mut self) {
        trace!(frame = self.frame, depth = self.depth(), "frame begin");
    }

    /// Declares a leaf for this frame and returns its rect from the last
    /// resolved frame, or [`DUMMY_RECT`] when it has none.
    pub fn get_rect(
        &mut self,
        id: NodeId,
        content_size: Vec2,
        options: Option<&LayoutOptions>,
        tag: Option<&str>,
    ) -> Result<Rect> {
        self.ensure_usable()?;

        let mut entry = self.pools.entries.get();
        if let Err(err) = entry.init(id, content_size, options, &self.style) {
            self.pools.entries.put(entry);
            return Err(self.fail(err));
        }
        entry.set_tag(tag);
        self.attach(LayoutNode::Entry(entry))?;

        match self.read_top().get(id) {
            Some(node) => Ok(node.rect()),
            None => {
                trace!(id, depth = self.depth(), "no resolved rect yet");
                Ok(DUMMY_RECT)
            }
        }
    }

    /// Opens a group; every following declaration becomes its child until
    /// the matching [`end_layout_group`](StackLayout::end_layout_group).
    pub fn begin_layout_group(
        &mut self,
        id: NodeId,
        orientation: Orientation,
        options: Option<&LayoutOptions>,
        tag: Option<&str>,
    ) -> Result<()> {
        self.ensure_usable()?;

        let mut group = self.pools.groups.get();
        if let Err(err) = group.init(id, orientation, options, &self.style) {
            self.pools.groups.put(group);
            return Err(self.fail(err));
        }
        group.entry.set_tag(tag);
        let index = self.attach(LayoutNode::Group(group))?;
        self.write_path.push(index);

        let read_index = self.read_top_group().and_then(|parent| {
            parent
                .position_of(id)
                .filter(|&index| parent.child_at(index).is_some_and(LayoutNode::is_group))
        });
        if read_index.is_none() {
            trace!(id, depth = self.depth(), "group has no resolved counterpart");
        }
        self.read_path.push(read_index);
        Ok(())
    }

    pub fn end_layout_group(&mut self) -> Result<()> {
        self.ensure_usable()?;
        if self.write_path.is_empty() {
            return Err(self.fail(LayoutError::StackUnderflow));
        }
        self.write_path.pop();
        self.read_path.pop();
        Ok(())
    }

    /// Resolves the tree built this frame, makes it the read tree and
    /// recycles the tree it replaces.
    pub fn layout(&mut self) -> Result<()> {
        self.ensure_usable()?;
        if !self.write_path.is_empty() || !self.read_path.is_empty() {
            let open = self.write_path.len().max(self.read_path.len());
            return Err(self.fail(LayoutError::UnbalancedGroups { open }));
        }

        let root = &mut self.roots[self.write];
        if let Err(err) = root.resolve() {
            return Err(self.fail(err));
        }
        debug!(
            frame = self.frame,
            nodes = root.descendant_count(),
            root = %root.rect(),
            "layout resolved"
        );

        self.write = 1 - self.write;
        self.roots[self.write].recycle_children(&mut self.pools);
        self.frame += 1;

        debug!(
            idle_entries = self.pools.entries.len(),
            idle_groups = self.pools.groups.len(),
            "stale tree recycled"
        );
        Ok(())
    }

    /// Resizes both roots so the new size is seen on either side of the swap.
    pub fn set_root_size(&mut self, size: Vec2) {
        let size = clamp_root_size(size);
        for root in &mut self.roots {
            root.set_viewport_size(size);
        }
        self.root_size = size;
    }

    /// Discards the frame under construction and clears an earlier error.
    /// The read tree is left untouched.
    pub fn reset(&mut self) {
        self.roots[self.write].recycle_children(&mut self.pools);
        self.write_path.clear();
        self.read_path.clear();
        if let Some(err) = self.poisoned.take() {
            warn!(frame = self.frame, "layout engine reset after error: {}", err);
        }
    }

    /// Rect from the last resolved frame of the group currently open.
    pub fn current_group_rect(&self) -> Rect {
        self.read_top_group().map_or(DUMMY_RECT, LayoutGroup::rect)
    }

    /// Rect from the last resolved frame at a path of ids below the root.
    pub fn find_rect(&self, path: &[NodeId]) -> Option<Rect> {
        let Some((&last, parents)) = path.split_last() else {
            return Some(self.read_root().rect());
        };
        let mut group = self.read_root();
        for &id in parents {
            group = group.get(id)?.as_group()?;
        }
        group.get(last).map(LayoutNode::rect)
    }

    /// Number of open groups including the root.
    pub fn depth(&self) -> usize {
        self.write_path.len() + 1
    }

    /// Number of completed layout passes.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn root_size(&self) -> Vec2 {
        self.root_size
    }

    pub fn style(&self) -> &LayoutStyle {
        &self.style
    }

    /// Applies to nodes declared from now on.
    pub fn set_style(&mut self, style: LayoutStyle) {
        self.style = style;
    }

    /// Tree resolved by the last [`layout`](StackLayout::layout).
    pub fn read_root(&self) -> &LayoutGroup {
        &self.roots[1 - self.write]
    }

    /// Tree being declared this frame.
    pub fn write_root(&self) -> &LayoutGroup {
        &self.roots[self.write]
    }

    pub fn pool_stats(&self) -> NodePoolStats {
        self.pools.stats()
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned.is_some()
    }

    fn ensure_usable(&self) -> Result<()> {
        match &self.poisoned {
            Some(err) => Err(LayoutError::Poisoned(Box::new(err.clone()))),
            None => Ok(()),
        }
    }

    fn fail(&mut self, err: LayoutError) -> LayoutError {
        error!(frame = self.frame, depth = self.depth(), "layout aborted: {}", err);
        if self.poisoned.is_none() {
            self.poisoned = Some(err.clone());
        }
        err
    }

    fn attach(&mut self, node: LayoutNode) -> Result<usize> {
        let added = match self.write_top() {
            Some(parent) => parent.add(node),
            None => Err((LayoutError::StackMismatch, node)),
        };
        added.map_err(|(err, node)| {
            self.release(node);
            self.fail(err)
        })
    }

    fn release(&mut self, node: LayoutNode) {
        match node {
            LayoutNode::Entry(entry) => self.pools.entries.put(entry),
            LayoutNode::Group(mut group) => {
                group.recycle_children(&mut self.pools);
                self.pools.groups.put(group);
            }
        }
    }

    fn write_top(&mut self) -> Option<&mut LayoutGroup> {
        let root = &mut self.roots[self.write];
        self.write_path
            .iter()
            .try_fold(root, |group, &index| group.child_at_mut(index).and_then(LayoutNode::as_group_mut))
    }

    /// Group on top of the read stack, `None` when it had no counterpart.
    fn read_top_group(&self) -> Option<&LayoutGroup> {
        let mut group = self.read_root();
        for slot in &self.read_path {
            group = slot
                .and_then(|index| group.child_at(index))
                .and_then(LayoutNode::as_group)?;
        }
        Some(group)
    }

    fn read_top(&self) -> &LayoutGroup {
        self.read_top_group().unwrap_or(&self.dummy_group)
    }
}

impl Default for StackLayout {
    fn default() -> Self {
        Self::with_config(LayoutConfig::default())
    }
}

fn clamp_root_size(size: Vec2) -> Vec2 {
    let clamped = size.max(Vec2::splat(MIN_SIZE));
    if clamped != size {
        warn!(?size, "root size clamped to {:?}", clamped);
    }
    clamped
}
