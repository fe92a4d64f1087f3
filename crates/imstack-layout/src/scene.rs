// crates/imstack-layout/src/scene.rs

use glam::Vec2;
use imstack_core::{LayoutOptions, LayoutStyle, NodeId, Orientation, Rect, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::LayoutConfig;
use crate::stack::StackLayout;

/// A declaration sequence that can be replayed against an engine once per
/// frame, the way widget code would issue it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub root_id: NodeId,
    pub root_orientation: Orientation,
    pub root_size: Option<[f32; 2]>,
    pub style: LayoutStyle,
    pub nodes: Vec<SceneNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SceneNode {
    Entry {
        id: NodeId,
        #[serde(default)]
        content: [f32; 2],
        #[serde(default)]
        options: Option<LayoutOptions>,
        #[serde(default)]
        tag: Option<String>,
    },
    Group {
        id: NodeId,
        #[serde(default)]
        orientation: Orientation,
        #[serde(default)]
        options: Option<LayoutOptions>,
        #[serde(default)]
        tag: Option<String>,
        #[serde(default)]
        children: Vec<SceneNode>,
    },
}

impl SceneNode {
    pub fn id(&self) -> NodeId {
        match self {
            SceneNode::Entry { id, .. } | SceneNode::Group { id, .. } => *id,
        }
    }
}

/// Rect handed back for one declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    /// Ids from below the root down to the node.
    pub path: Vec<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub rect: Rect,
}

impl Scene {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Engine configuration described by the scene header.
    pub fn config(&self) -> LayoutConfig {
        let mut config = LayoutConfig::default()
            .with_root_id(self.root_id)
            .with_root_orientation(self.root_orientation)
            .with_style(self.style.clone());
        if let Some([width, height]) = self.root_size {
            config = config.with_root_size(Vec2::new(width, height));
        }
        config
    }

    /// Issues one frame of declarations and returns what the engine
    /// answered. Groups answer with their own rect.
    pub fn declare(&self, layout: &mut StackLayout) -> Result<Vec<Answer>> {
        let mut answers = Vec::new();
        let mut path = Vec::new();
        for node in &self.nodes {
            declare_node(layout, node, &mut path, &mut answers)?;
        }
        Ok(answers)
    }

    /// Runs `frames` full frames on a fresh engine and returns it with the
    /// answers of the last frame.
    pub fn run(&self, frames: usize) -> Result<(StackLayout, Vec<Answer>)> {
        let mut layout = StackLayout::with_config(self.config());
        let mut answers = Vec::new();
        for _ in 0..frames {
            layout.begin();
            answers = self.declare(&mut layout)?;
            layout.layout()?;
            debug!(frame = layout.frame(), answers = answers.len(), "scene frame replayed");
        }
        info!(frames, nodes = layout.read_root().descendant_count(), "scene replay finished");
        Ok((layout, answers))
    }
}

fn declare_node(
    layout: &mut StackLayout,
    node: &SceneNode,
    path: &mut Vec<NodeId>,
    answers: &mut Vec<Answer>,
) -> Result<()> {
    path.push(node.id());
    match node {
        SceneNode::Entry { id, content, options, tag } => {
            let rect = layout.get_rect(*id, Vec2::from(*content), options.as_ref(), tag.as_deref())?;
            answers.push(Answer { path: path.clone(), tag: tag.clone(), rect });
        }
        SceneNode::Group { id, orientation, options, tag, children } => {
            layout.begin_layout_group(*id, *orientation, options.as_ref(), tag.as_deref())?;
            answers.push(Answer {
                path: path.clone(),
                tag: tag.clone(),
                rect: layout.current_group_rect(),
            });
            for child in children {
                declare_node(layout, child, path, answers)?;
            }
            layout.end_layout_group()?;
        }
    }
    path.pop();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::DUMMY_RECT;

    const TOOLBAR: &str = r#"{
        "root_size": [300, 200],
        "nodes": [
            { "kind": "group", "id": 1, "orientation": "horizontal", "tag": "toolbar",
              "options": { "min_height": 30, "max_height": 30, "horizontal_stretch_factor": 1 },
              "children": [
                { "kind": "entry", "id": 2, "content": [40, 20] },
                { "kind": "entry", "id": 3, "options": { "horizontal_stretch_factor": 1 } }
              ] },
            { "kind": "entry", "id": 4, "options": { "vertical_stretch_factor": 1 } }
        ]
    }"#;

    #[test]
    fn test_scene_parses_sparse_json() {
        let scene = Scene::from_json(TOOLBAR).unwrap();
        assert_eq!(scene.root_orientation, Orientation::Vertical);
        assert_eq!(scene.nodes.len(), 2);
        assert_eq!(scene.config().root_size, Vec2::new(300.0, 200.0));
        match &scene.nodes[0] {
            SceneNode::Group { children, orientation, .. } => {
                assert_eq!(*orientation, Orientation::Horizontal);
                assert_eq!(children.len(), 2);
            }
            other => panic!("expected a group, got {:?}", other),
        }
    }

    #[test]
    fn test_first_frame_answers_are_placeholders() {
        let scene = Scene::from_json(TOOLBAR).unwrap();
        let (_, answers) = scene.run(1).unwrap();
        assert_eq!(answers.len(), 4);
        assert!(answers.iter().all(|answer| answer.rect == DUMMY_RECT));
    }

    #[test]
    fn test_second_frame_answers_resolved_rects() {
        let scene = Scene::from_json(TOOLBAR).unwrap();
        let (layout, answers) = scene.run(2).unwrap();
        assert_eq!(layout.frame(), 2);

        let rect = |path: &[NodeId]| answers.iter().find(|a| a.path == path).map(|a| a.rect);
        assert_eq!(rect(&[1]), Some(Rect::new(0.0, 0.0, 300.0, 30.0)));
        assert_eq!(rect(&[1, 2]), Some(Rect::new(0.0, 0.0, 40.0, 20.0)));
        assert_eq!(rect(&[1, 3]), Some(Rect::new(40.0, 0.0, 260.0, 0.0)));
        assert_eq!(rect(&[4]), Some(Rect::new(0.0, 30.0, 0.0, 170.0)));
    }
}
