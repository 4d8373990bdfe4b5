use std::sync::Arc;

use super::actions::ActionSet;
use super::calltree::{CallTree, CodeToNodes};
use super::histogram::Histogram;
use super::updater::HistogramUpdater;

/// Anything folding call-trees into accumulated state.
pub trait Aggregator {
    fn aggregate(&mut self, call_tree: &dyn CallTree);
}

/// Binds one [Histogram] to one [HistogramUpdater].
///
/// The histogram is owned; the updater and the action catalog are shared.
/// An aggregator must not be updated from several threads at once, distinct
/// aggregators can be driven independently.
pub struct HistogramAggregator {
    actions: Arc<dyn ActionSet>,
    updater: Arc<dyn HistogramUpdater>,
    histogram: Histogram,
}

impl HistogramAggregator {
    /// This function creates an aggregator with an empty histogram, one tick
    /// list per dimension.
    ///
    /// The updater must yield exactly one measurement per dimension.
    pub fn new(actions: Arc<dyn ActionSet>, updater: Arc<dyn HistogramUpdater>, ticks: Vec<Vec<i64>>) -> Result<HistogramAggregator, super::Error> {
        let histogram = Histogram::new(ticks)?;
        if updater.dimensions() != histogram.dimensions() {
            return Err(super::Error::DimensionMismatch {
                updater: updater.dimensions(),
                histogram: histogram.dimensions(),
            });
        }
        Ok(HistogramAggregator { actions, updater, histogram })
    }
    /// This function folds `call_tree` into the histogram reusing a
    /// precomputed code-to-nodes mapping.
    pub fn aggregate_with(&mut self, call_tree: &dyn CallTree, action_codes_to_nodes: &CodeToNodes) {
        for measurement in self.updater.extract_with(call_tree, action_codes_to_nodes) {
            self.histogram.update(&measurement);
        }
    }
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }
    pub fn updater(&self) -> &dyn HistogramUpdater {
        self.updater.as_ref()
    }
    pub fn actions(&self) -> &dyn ActionSet {
        self.actions.as_ref()
    }
    /// Drops all accumulated samples, keeping the configuration.
    pub fn clear(&mut self) {
        self.histogram.clear();
    }
}

impl Aggregator for HistogramAggregator {
    fn aggregate(&mut self, call_tree: &dyn CallTree) {
        for measurement in self.updater.extract(call_tree) {
            self.histogram.update(&measurement);
        }
    }
}
