//! Read-only index over a flat [`DomSnapshot`].
//!
//! The renderer emits nodes as a flat list linked by ids. `DomTree` resolves
//! those links once and exposes document-order traversal, which every
//! "first found wins" rule in the analyzer depends on.

use std::collections::HashMap;

use crate::types::{DomNode, DomSnapshot};

pub struct DomTree<'a> {
    snapshot: &'a DomSnapshot,
    index: HashMap<&'a str, usize>,
    order: Vec<usize>,
}

impl<'a> DomTree<'a> {
    pub fn new(snapshot: &'a DomSnapshot) -> Self {
        let index: HashMap<&str, usize> = snapshot
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();

        let mut visited = vec![false; snapshot.nodes.len()];
        let mut order = Vec::with_capacity(snapshot.nodes.len());
        for (i, node) in snapshot.nodes.iter().enumerate() {
            let is_root = node
                .parent
                .as_deref()
                .map(|p| !index.contains_key(p))
                .unwrap_or(true);
            if is_root {
                preorder(snapshot, &index, i, &mut visited, &mut order);
            }
        }
        // Anything unreachable from a root (cyclic parent links) keeps list order.
        for i in 0..snapshot.nodes.len() {
            if !visited[i] {
                preorder(snapshot, &index, i, &mut visited, &mut order);
            }
        }

        Self {
            snapshot,
            index,
            order,
        }
    }

    pub fn snapshot(&self) -> &'a DomSnapshot {
        self.snapshot
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.nodes.is_empty()
    }

    /// All nodes in document order.
    pub fn nodes(&self) -> impl Iterator<Item = &'a DomNode> + '_ {
        let nodes = &self.snapshot.nodes;
        self.order.iter().map(move |&i| &nodes[i])
    }

    pub fn get(&self, id: &str) -> Option<&'a DomNode> {
        self.index.get(id).map(|&i| &self.snapshot.nodes[i])
    }

    pub fn parent(&self, node: &DomNode) -> Option<&'a DomNode> {
        node.parent.as_deref().and_then(|p| self.get(p))
    }

    pub fn children(&self, node: &DomNode) -> Vec<&'a DomNode> {
        node.children.iter().filter_map(|id| self.get(id)).collect()
    }

    /// Descendants of `node` in document order, excluding `node` itself.
    pub fn descendants(&self, node: &DomNode) -> Vec<&'a DomNode> {
        let mut out = Vec::new();
        let mut stack = self.children(node);
        stack.reverse();
        let mut guard = 0usize;
        while let Some(current) = stack.pop() {
            guard += 1;
            if guard > self.snapshot.nodes.len() {
                break;
            }
            out.push(current);
            let mut kids = self.children(current);
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    pub fn ancestors(&self, node: &DomNode) -> Vec<&'a DomNode> {
        let mut out = Vec::new();
        let mut current = self.parent(node);
        while let Some(parent) = current {
            if out.len() > self.snapshot.nodes.len() {
                break;
            }
            out.push(parent);
            current = self.parent(parent);
        }
        out
    }

    pub fn has_ancestor(&self, node: &DomNode, predicate: impl Fn(&DomNode) -> bool) -> bool {
        self.ancestors(node).into_iter().any(|a| predicate(a))
    }

    /// Whether `node` and every ancestor render (no `display: none` up the chain).
    pub fn is_rendered(&self, node: &DomNode) -> bool {
        node.is_visible()
            && self
                .ancestors(node)
                .iter()
                .all(|a| a.computed_style.as_ref().map(|s| s.is_rendered()).unwrap_or(true))
    }

    /// Visible text of `node` and its subtree, whitespace-collapsed.
    pub fn text_content(&self, node: &DomNode) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(text) = node.text.as_deref() {
            parts.push(text);
        }
        for child in self.descendants(node) {
            if matches!(child.tag.as_str(), "script" | "style" | "noscript") {
                continue;
            }
            if let Some(text) = child.text.as_deref() {
                parts.push(text);
            }
        }
        collapse_whitespace(&parts.join(" "))
    }

    /// Text for a control: its own text, else `aria-label`, `value` or `title`.
    pub fn label_of(&self, node: &DomNode) -> String {
        let text = self.text_content(node);
        if !text.is_empty() {
            return text;
        }
        ["aria-label", "value", "title", "alt"]
            .iter()
            .find_map(|attr| node.attr(attr).map(collapse_whitespace))
            .filter(|s| !s.is_empty())
            .unwrap_or_default()
    }

    pub fn find_first(&self, predicate: impl Fn(&DomNode) -> bool) -> Option<&'a DomNode> {
        self.nodes().find(|n| predicate(n))
    }

    pub fn body(&self) -> Option<&'a DomNode> {
        self.find_first(|n| n.tag == "body")
    }
}

fn preorder(
    snapshot: &DomSnapshot,
    index: &HashMap<&str, usize>,
    start: usize,
    visited: &mut [bool],
    order: &mut Vec<usize>,
) {
    let mut stack = vec![start];
    while let Some(i) = stack.pop() {
        if visited[i] {
            continue;
        }
        visited[i] = true;
        order.push(i);
        for child in snapshot.nodes[i].children.iter().rev() {
            if let Some(&c) = index.get(child.as_str()) {
                if !visited[c] {
                    stack.push(c);
                }
            }
        }
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lower-cased, whitespace-collapsed text for keyword heuristics.
pub fn normalize(text: &str) -> String {
    collapse_whitespace(text).to_lowercase()
}

/// Lower-cased alphanumeric words of `text`.
pub fn word_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// True if any keyword starts a word, or any multi-word keyword appears as consecutive words.
pub fn mentions_any<S: AsRef<str>>(tokens: &[S], keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| {
        if keyword.contains(' ') {
            let phrase: Vec<&str> = keyword.split(' ').collect();
            tokens
                .windows(phrase.len())
                .any(|w| w.iter().zip(&phrase).all(|(a, b)| a.as_ref() == *b))
        } else {
            tokens.iter().any(|t| t.as_ref().starts_with(keyword))
        }
    })
}

/// Truncate to at most `max` characters on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundingBox;
    use std::collections::HashMap;

    #[test]
    fn mentions_any_respects_word_starts() {
        let tokens = word_tokens("Follow us on Facebook, or Restart the Industry tour");
        assert!(!mentions_any(&tokens, &["book", "start", "try"]));
        assert!(mentions_any(&tokens, &["follow us"]));
        assert!(mentions_any(&tokens, &["restart"]));
        assert!(!mentions_any(&tokens, &["us or"]));
    }

    fn node(id: &str, tag: &str, parent: Option<&str>, children: &[&str], text: Option<&str>) -> DomNode {
        DomNode {
            id: id.to_string(),
            tag: tag.to_string(),
            children: children.iter().map(|c| c.to_string()).collect(),
            parent: parent.map(str::to_string),
            attributes: HashMap::new(),
            text: text.map(str::to_string),
            bounding_box: BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            computed_style: None,
        }
    }

    fn snapshot() -> DomSnapshot {
        // Post-order list, as older renderer scripts emitted it.
        DomSnapshot {
            nodes: vec![
                node("h", "h1", Some("s"), &[], Some("Title")),
                node("p", "p", Some("s"), &[], Some("  Some   body ")),
                node("s", "section", Some("b"), &["h", "p"], None),
                node("f", "footer", Some("b"), &[], Some("Footer")),
                node("b", "body", None, &["s", "f"], None),
            ],
            ..DomSnapshot::default()
        }
    }

    #[test]
    fn nodes_iterate_in_document_order() {
        let snap = snapshot();
        let tree = DomTree::new(&snap);
        let tags: Vec<&str> = tree.nodes().map(|n| n.tag.as_str()).collect();
        assert_eq!(tags, vec!["body", "section", "h1", "p", "footer"]);
    }

    #[test]
    fn text_content_collapses_whitespace() {
        let snap = snapshot();
        let tree = DomTree::new(&snap);
        let section = tree.get("s").unwrap();
        assert_eq!(tree.text_content(section), "Title Some body");
    }

    #[test]
    fn ancestors_walk_to_root() {
        let snap = snapshot();
        let tree = DomTree::new(&snap);
        let heading = tree.get("h").unwrap();
        let tags: Vec<&str> = tree.ancestors(heading).iter().map(|n| n.tag.as_str()).collect();
        assert_eq!(tags, vec!["section", "body"]);
    }

    #[test]
    fn cyclic_links_do_not_hang() {
        let snap = DomSnapshot {
            nodes: vec![
                node("a", "div", Some("b"), &["b"], Some("a")),
                node("b", "div", Some("a"), &["a"], Some("b")),
            ],
            ..DomSnapshot::default()
        };
        let tree = DomTree::new(&snap);
        assert_eq!(tree.nodes().count(), 2);
        let a = tree.get("a").unwrap();
        assert!(tree.descendants(a).len() <= 2);
        assert!(tree.ancestors(a).len() <= 3);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
    }
}
