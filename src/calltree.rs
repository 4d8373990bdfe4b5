use std::collections::HashMap;

/// Identifies an action (operation category) within an [crate::ActionSet].
pub type ActionCode = i32;
/// Identifies a node of a [CallTree].
pub type NodeId = usize;
/// Every action code present in a call-tree, mapped to the nodes bearing it.
pub type CodeToNodes = HashMap<ActionCode, Vec<NodeId>>;

/// The read-only view of a call-tree that histogram updaters consume.
pub trait CallTree {
    fn start_time(&self, node: NodeId) -> i64;
    fn stop_time(&self, node: NodeId) -> i64;
    /// This function groups the tree's nodes by action code.
    fn action_codes_to_nodes(&self) -> CodeToNodes;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Span {
    action_code: ActionCode,
    parent: Option<NodeId>,
    start_time: i64,
    stop_time: i64,
}

/// A minimal in-memory call-tree: a flat arena of timed spans, each tagged
/// with an action code and an optional parent.
#[derive(Debug, Clone, Default)]
pub struct SpanTree {
    spans: Vec<Span>,
}

impl SpanTree {
    pub fn new() -> SpanTree {
        SpanTree { spans: Vec::new() }
    }
    /// This function appends a finished span and returns its [NodeId].
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not name an existing node.
    pub fn push(&mut self, action_code: ActionCode, parent: Option<NodeId>, start_time: i64, stop_time: i64) -> NodeId {
        if let Some(parent) = parent {
            assert!(parent < self.spans.len(), "unknown parent node {}", parent);
        }
        self.spans.push(Span { action_code, parent, start_time, stop_time });
        self.spans.len() - 1
    }
    /// This function opens a span at `start_time`; close it with [SpanTree::stop].
    pub fn start(&mut self, action_code: ActionCode, parent: Option<NodeId>, start_time: i64) -> NodeId {
        self.push(action_code, parent, start_time, start_time)
    }
    pub fn stop(&mut self, node: NodeId, stop_time: i64) {
        self.spans[node].stop_time = stop_time;
    }
    pub fn len(&self) -> usize {
        self.spans.len()
    }
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
    pub fn action_code(&self, node: NodeId) -> ActionCode {
        self.spans[node].action_code
    }
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.spans[node].parent
    }
    /// Direct children of `node`, in insertion order.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.spans.iter()
            .enumerate()
            .filter(move |(_, span)| span.parent == Some(node))
            .map(|(id, _)| id)
    }
}

impl CallTree for SpanTree {
    fn start_time(&self, node: NodeId) -> i64 {
        self.spans[node].start_time
    }
    fn stop_time(&self, node: NodeId) -> i64 {
        self.spans[node].stop_time
    }
    fn action_codes_to_nodes(&self) -> CodeToNodes {
        let mut map = CodeToNodes::new();
        for (id, span) in self.spans.iter().enumerate() {
            map.entry(span.action_code).or_default().push(id);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping() {
        let mut tree = SpanTree::new();
        let root = tree.push(0, None, 0, 100);
        let a = tree.push(1, Some(root), 10, 20);
        let b = tree.start(2, Some(root), 30);
        let c = tree.push(1, Some(b), 35, 40);
        tree.stop(b, 90);
        let map = tree.action_codes_to_nodes();
        assert_eq!(map.len(), 3);
        assert_eq!(map[&0], vec![root]);
        assert_eq!(map[&1], vec![a, c]);
        assert_eq!(map[&2], vec![b]);
        assert_eq!(tree.stop_time(b) - tree.start_time(b), 60);
        assert_eq!(tree.children(root).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(tree.parent(c), Some(b));
        assert_eq!(tree.action_code(c), 1);
    }

    #[test]
    fn empty_tree() {
        let tree = SpanTree::new();
        assert!(tree.is_empty());
        assert!(tree.action_codes_to_nodes().is_empty());
    }

    #[test]
    #[should_panic]
    fn unknown_parent() {
        let mut tree = SpanTree::new();
        tree.push(0, Some(3), 0, 1);
    }
}
