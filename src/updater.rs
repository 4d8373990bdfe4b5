use serde_json::{Map, Value};

use super::actions::ActionSet;
use super::calltree::{ActionCode, CallTree, CodeToNodes};

/// One measurement per histogram dimension, outermost dimension first.
pub type Measurement = Vec<i64>;

/// A strategy extracting measurements from a call-tree.
///
/// Updaters are immutable once built and are shared between aggregators
/// behind an `Arc`.  A new kind of measurement is added by implementing this
/// trait; the histogram itself is agnostic to what it counts.
pub trait HistogramUpdater: Send + Sync {
    /// The name this updater reports itself under.
    fn name(&self) -> &'static str;
    /// Number of values in every [Measurement] this updater yields.
    fn dimensions(&self) -> usize {
        1
    }
    /// This function extracts the measurements of `call_tree`, grouping its
    /// nodes by action code first.
    fn extract(&self, call_tree: &dyn CallTree) -> Vec<Measurement> {
        self.extract_with(call_tree, &call_tree.action_codes_to_nodes())
    }
    /// This function extracts the measurements of `call_tree` from an
    /// already computed code-to-nodes mapping.
    fn extract_with(&self, call_tree: &dyn CallTree, action_codes_to_nodes: &CodeToNodes) -> Vec<Measurement>;
    /// This function writes the updater's self-description into `sink`.
    fn describe(&self, sink: &mut Map<String, Value>, actions: &dyn ActionSet);
}

/// Writes the common `name` / `action_name` description.
fn describe_action(name: &str, action_code: ActionCode, sink: &mut Map<String, Value>, actions: &dyn ActionSet) {
    let action_name = match actions.action_name(action_code) {
        Some(action_name) => action_name.to_string(),
        None => {
            tracing::warn!(action_code, updater = name, "action code missing from the action set");
            format!("unknown_action_{}", action_code)
        },
    };
    sink.insert("name".to_string(), Value::from(name));
    sink.insert("action_name".to_string(), Value::from(action_name));
}

/// Measures the elapsed time (`stop - start`) of every node bearing one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTimeUpdater {
    action_code: ActionCode,
}

impl ActionTimeUpdater {
    pub fn new(action_code: ActionCode) -> ActionTimeUpdater {
        ActionTimeUpdater { action_code }
    }
    pub fn action_code(&self) -> ActionCode {
        self.action_code
    }
}

impl HistogramUpdater for ActionTimeUpdater {
    fn name(&self) -> &'static str {
        "action_time_updater"
    }
    fn extract_with(&self, call_tree: &dyn CallTree, action_codes_to_nodes: &CodeToNodes) -> Vec<Measurement> {
        let Some(nodes) = action_codes_to_nodes.get(&self.action_code) else {
            return Vec::new();
        };
        tracing::trace!(action_code = self.action_code, nodes = nodes.len(), "extracting action times");
        nodes.iter()
            .map(|&node| vec![call_tree.stop_time(node).saturating_sub(call_tree.start_time(node))])
            .collect()
    }
    fn describe(&self, sink: &mut Map<String, Value>, actions: &dyn ActionSet) {
        describe_action(self.name(), self.action_code, sink, actions);
    }
}

/// Measures, for every node bearing one action, how long after the start of
/// the tree it began and how long it took: `[start - tree_start, stop - start]`.
///
/// `tree_start` is the earliest start time among all nodes of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOffsetTimeUpdater {
    action_code: ActionCode,
}

impl ActionOffsetTimeUpdater {
    pub fn new(action_code: ActionCode) -> ActionOffsetTimeUpdater {
        ActionOffsetTimeUpdater { action_code }
    }
    pub fn action_code(&self) -> ActionCode {
        self.action_code
    }
}

impl HistogramUpdater for ActionOffsetTimeUpdater {
    fn name(&self) -> &'static str {
        "action_offset_time_updater"
    }
    fn dimensions(&self) -> usize {
        2
    }
    fn extract_with(&self, call_tree: &dyn CallTree, action_codes_to_nodes: &CodeToNodes) -> Vec<Measurement> {
        let Some(nodes) = action_codes_to_nodes.get(&self.action_code) else {
            return Vec::new();
        };
        let tree_start = action_codes_to_nodes.values()
            .flatten()
            .map(|&node| call_tree.start_time(node))
            .min()
            .unwrap_or(0);
        tracing::trace!(action_code = self.action_code, nodes = nodes.len(), tree_start, "extracting action offsets");
        nodes.iter()
            .map(|&node| {
                let start = call_tree.start_time(node);
                vec![start.saturating_sub(tree_start), call_tree.stop_time(node).saturating_sub(start)]
            })
            .collect()
    }
    fn describe(&self, sink: &mut Map<String, Value>, actions: &dyn ActionSet) {
        describe_action(self.name(), self.action_code, sink, actions);
    }
}
