use std::sync::Arc;

use super::actions::ActionSet;
use super::aggregator::{Aggregator, HistogramAggregator};
use super::calltree::CallTree;
use super::updater::HistogramUpdater;

/// An ordered set of independently configured [HistogramAggregator]s sharing
/// one action catalog.
///
/// Every call-tree is grouped by action code once, and all aggregators see
/// that same grouping.  Reports list the aggregators in registration order.
pub struct BatchHistogramAggregator {
    actions: Arc<dyn ActionSet>,
    aggregators: Vec<HistogramAggregator>,
}

impl BatchHistogramAggregator {
    pub fn new(actions: Arc<dyn ActionSet>) -> BatchHistogramAggregator {
        BatchHistogramAggregator { actions, aggregators: Vec::new() }
    }
    /// This function appends a new aggregator binding `updater` to an empty
    /// histogram with one tick list per dimension.
    pub fn register(&mut self, updater: Arc<dyn HistogramUpdater>, ticks: Vec<Vec<i64>>) -> Result<(), super::Error> {
        let aggregator = HistogramAggregator::new(self.actions.clone(), updater, ticks)?;
        tracing::debug!(
            updater = aggregator.updater().name(),
            dimensions = aggregator.histogram().dimensions(),
            position = self.aggregators.len(),
            "registered histogram aggregator"
        );
        self.aggregators.push(aggregator);
        Ok(())
    }
    pub fn len(&self) -> usize {
        self.aggregators.len()
    }
    pub fn is_empty(&self) -> bool {
        self.aggregators.is_empty()
    }
    /// The aggregators in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, HistogramAggregator> {
        self.aggregators.iter()
    }
    pub fn actions(&self) -> &dyn ActionSet {
        self.actions.as_ref()
    }
    /// Drops all accumulated samples, keeping every registration.
    pub fn clear(&mut self) {
        self.aggregators.iter_mut().for_each(HistogramAggregator::clear);
    }
}

impl Aggregator for BatchHistogramAggregator {
    fn aggregate(&mut self, call_tree: &dyn CallTree) {
        let action_codes_to_nodes = call_tree.action_codes_to_nodes();
        tracing::debug!(
            aggregators = self.aggregators.len(),
            action_codes = action_codes_to_nodes.len(),
            "aggregating call tree"
        );
        for aggregator in self.aggregators.iter_mut() {
            aggregator.aggregate_with(call_tree, &action_codes_to_nodes);
        }
    }
}

impl<'a> IntoIterator for &'a BatchHistogramAggregator {
    type Item = &'a HistogramAggregator;
    type IntoIter = std::slice::Iter<'a, HistogramAggregator>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActionOffsetTimeUpdater, ActionTimeUpdater, Actions, CodeToNodes, Error, NodeId, SpanTree};
    use serde_json::json;
    use std::cell::Cell;

    fn actions() -> Arc<Actions> {
        let mut actions = Actions::new();
        actions.define("request");
        actions.define("read");
        actions.define("write");
        Arc::new(actions)
    }

    fn tree() -> SpanTree {
        let mut tree = SpanTree::new();
        let root = tree.push(0, None, 0, 400);
        tree.push(1, Some(root), 10, 15);
        tree.push(1, Some(root), 20, 70);
        tree.push(2, Some(root), 100, 350);
        tree
    }

    #[test]
    fn report_shape() {
        let mut batch = BatchHistogramAggregator::new(actions());
        batch.register(Arc::new(ActionTimeUpdater::new(1)), vec![vec![10, 100]]).unwrap();
        batch.register(Arc::new(ActionTimeUpdater::new(2)), vec![vec![100]]).unwrap();
        batch.register(Arc::new(ActionOffsetTimeUpdater::new(1)), vec![vec![15], vec![10]]).unwrap();
        batch.aggregate(&tree());
        assert_eq!(batch.len(), 3);
        assert_eq!(json!(batch), json!({
            "batch_histogram_aggregator": {
                "histogram_aggregators": [
                    {
                        "histogram_aggregator": {
                            "histogram_updater": { "name": "action_time_updater", "action_name": "read" },
                            "histogram": { "<10": 1, "<100": 1, "<9223372036854775807": 0 },
                        }
                    },
                    {
                        "histogram_aggregator": {
                            "histogram_updater": { "name": "action_time_updater", "action_name": "write" },
                            "histogram": { "<100": 0, "<9223372036854775807": 1 },
                        }
                    },
                    {
                        "histogram_aggregator": {
                            "histogram_updater": { "name": "action_offset_time_updater", "action_name": "read" },
                            "histogram": {
                                "<15": { "<10": 1, "<9223372036854775807": 0 },
                                "<9223372036854775807": { "<10": 0, "<9223372036854775807": 1 },
                            },
                        }
                    },
                ]
            }
        }));
    }

    #[test]
    fn empty_batch() {
        let mut batch = BatchHistogramAggregator::new(actions());
        batch.aggregate(&tree());
        assert!(batch.is_empty());
        assert_eq!(json!(batch), json!({ "batch_histogram_aggregator": { "histogram_aggregators": [] } }));
    }

    #[test]
    fn registration_order_kept() {
        let mut batch = BatchHistogramAggregator::new(actions());
        for code in [2, 0, 1] {
            batch.register(Arc::new(ActionTimeUpdater::new(code)), vec![vec![1]]).unwrap();
        }
        batch.aggregate(&tree());
        batch.aggregate(&tree());
        let report = json!(batch);
        let listed: Vec<&str> = report["batch_histogram_aggregator"]["histogram_aggregators"]
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["histogram_aggregator"]["histogram_updater"]["action_name"].as_str().unwrap())
            .collect();
        assert_eq!(listed, vec!["write", "request", "read"]);
        let counts: Vec<u128> = (&batch).into_iter().map(|a| a.histogram().count()).collect();
        assert_eq!(counts, vec![2, 2, 4]);
        batch.clear();
        assert!(batch.iter().all(|a| a.histogram().count() == 0));
    }

    #[test]
    fn rejected_registration() {
        let mut batch = BatchHistogramAggregator::new(actions());
        let result = batch.register(Arc::new(ActionTimeUpdater::new(1)), vec![vec![20, 10]]);
        assert!(matches!(result, Err(Error::TicksOutOfOrder { .. })));
        assert!(batch.is_empty());
    }

    /// Counts how often the grouping is computed.
    struct CountingTree {
        inner: SpanTree,
        groupings: Cell<usize>,
    }

    impl CallTree for CountingTree {
        fn start_time(&self, node: NodeId) -> i64 {
            self.inner.start_time(node)
        }
        fn stop_time(&self, node: NodeId) -> i64 {
            self.inner.stop_time(node)
        }
        fn action_codes_to_nodes(&self) -> CodeToNodes {
            self.groupings.set(self.groupings.get() + 1);
            self.inner.action_codes_to_nodes()
        }
    }

    #[test]
    fn grouping_computed_once() {
        let mut batch = BatchHistogramAggregator::new(actions());
        for _ in 0..5 {
            batch.register(Arc::new(ActionTimeUpdater::new(1)), vec![vec![10]]).unwrap();
        }
        let tree = CountingTree { inner: tree(), groupings: Cell::new(0) };
        batch.aggregate(&tree);
        assert_eq!(tree.groupings.get(), 1);
        assert!(batch.iter().all(|a| a.histogram().read(&[0]) == 1 && a.histogram().read(&[1]) == 1));
    }
}
