//! Snapshot builder for extractor unit tests.

use std::collections::HashMap;

use crate::types::{BoundingBox, ComputedStyle, DomNode, DomSnapshot};

pub struct SnapshotBuilder {
    snapshot: DomSnapshot,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            snapshot: DomSnapshot::default(),
        }
    }

    pub fn add(
        &mut self,
        id: &str,
        tag: &str,
        parent: Option<&str>,
        attrs: &[(&str, &str)],
        text: Option<&str>,
    ) -> &mut Self {
        if let Some(p) = parent {
            if let Some(parent) = self.snapshot.nodes.iter_mut().find(|n| n.id == p) {
                parent.children.push(id.to_string());
            }
        }
        self.snapshot.nodes.push(DomNode {
            id: id.into(),
            tag: tag.into(),
            children: vec![],
            parent: parent.map(str::to_string),
            attributes: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
            text: text.map(str::to_string),
            bounding_box: BoundingBox::new(0.0, 0.0, 100.0, 20.0),
            computed_style: None,
        });
        self
    }

    /// Apply `f` to the style of the most recently added node.
    pub fn style(&mut self, f: impl FnOnce(&mut ComputedStyle)) -> &mut Self {
        if let Some(node) = self.snapshot.nodes.last_mut() {
            f(node.computed_style.get_or_insert_with(ComputedStyle::default));
        }
        self
    }

    pub fn bounds(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        if let Some(node) = self.snapshot.nodes.last_mut() {
            node.bounding_box = BoundingBox::new(x, y, width, height);
        }
        self
    }

    pub fn snapshot_mut(&mut self) -> &mut DomSnapshot {
        &mut self.snapshot
    }

    pub fn build(&self) -> DomSnapshot {
        self.snapshot.clone()
    }
}
