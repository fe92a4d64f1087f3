// crates/imstack-layout/src/snapshot.rs

use imstack_core::{NodeId, Orientation, Rect};
use serde::Serialize;

use crate::group::{LayoutGroup, LayoutNode};
use crate::stack::StackLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Entry,
    Group,
}

/// One node of a resolved tree, flattened in pre-order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRecord {
    pub depth: usize,
    pub id: NodeId,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    pub rect: Rect,
    pub children: usize,
}

/// Owned copy of a resolved tree, detached from the engine's pools.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSnapshot {
    pub frame: u64,
    pub nodes: Vec<NodeRecord>,
}

impl LayoutSnapshot {
    pub fn from_tree(root: &LayoutGroup, frame: u64) -> Self {
        let mut nodes = Vec::with_capacity(root.descendant_count() + 1);
        push_group(&mut nodes, root, 0);
        Self { frame, nodes }
    }

    pub fn root(&self) -> Option<&NodeRecord> {
        self.nodes.first()
    }

    /// First record with the given id, in pre-order.
    pub fn find(&self, id: NodeId) -> Option<&NodeRecord> {
        self.nodes.iter().find(|record| record.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn push_group(nodes: &mut Vec<NodeRecord>, group: &LayoutGroup, depth: usize) {
    nodes.push(NodeRecord {
        depth,
        id: group.id(),
        kind: NodeKind::Group,
        tag: group.entry.tag().map(str::to_owned),
        orientation: Some(group.orientation),
        rect: group.rect(),
        children: group.len(),
    });
    for child in group.children() {
        match child {
            LayoutNode::Group(inner) => push_group(nodes, inner, depth + 1),
            LayoutNode::Entry(entry) => nodes.push(NodeRecord {
                depth: depth + 1,
                id: entry.id,
                kind: NodeKind::Entry,
                tag: entry.tag().map(str::to_owned),
                orientation: None,
                rect: entry.rect,
                children: 0,
            }),
        }
    }
}

impl StackLayout {
    /// Snapshot of the tree resolved by the last layout pass.
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot::from_tree(self.read_root(), self.frame())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_snapshot_is_pre_order() {
        let mut layout = StackLayout::new(0, Vec2::new(100.0, 100.0));
        layout.begin_layout_group(1, Orientation::Horizontal, None, Some("toolbar")).unwrap();
        layout.get_rect(2, Vec2::new(10.0, 10.0), None, Some("button")).unwrap();
        layout.end_layout_group().unwrap();
        layout.get_rect(3, Vec2::new(5.0, 5.0), None, None).unwrap();
        layout.layout().unwrap();

        let snapshot = layout.snapshot();
        assert_eq!(snapshot.frame, 1);
        let ids: Vec<NodeId> = snapshot.iter().map(|record| record.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        let depths: Vec<usize> = snapshot.iter().map(|record| record.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 1]);

        let button = snapshot.find(2).unwrap();
        assert_eq!(button.kind, NodeKind::Entry);
        assert_eq!(button.tag.as_deref(), Some("button"));
        assert_eq!(snapshot.root().map(|root| root.children), Some(2));
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let mut layout = StackLayout::new(0, Vec2::new(20.0, 10.0));
        layout.get_rect(4, Vec2::new(3.0, 2.0), None, None).unwrap();
        layout.layout().unwrap();

        let json = serde_json::to_value(layout.snapshot()).unwrap();
        assert_eq!(json["nodes"][0]["kind"], "group");
        assert_eq!(json["nodes"][0]["orientation"], "vertical");
        assert_eq!(json["nodes"][1]["rect"]["width"], 3.0);
        assert!(json["nodes"][1].get("tag").is_none());
    }
}
