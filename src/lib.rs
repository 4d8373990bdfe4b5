//! Tick-bounded, optionally multi-dimensional histograms aggregated over call-trees.
//!
//! Use this crate to summarize, per action, how measurements taken from the
//! spans of a call-tree (elapsed time, start offset, ...) distribute across
//! caller-chosen ranges, and to emit the result as a JSON report.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use react_histogram::{Actions, ActionTimeUpdater, Aggregator, BatchHistogramAggregator, SpanTree};
//!
//! let mut actions = Actions::new();
//! let read = actions.define("read");
//!
//! let mut batch = BatchHistogramAggregator::new(Arc::new(actions));
//! batch.register(Arc::new(ActionTimeUpdater::new(read)), vec![vec![10, 20]])?;
//!
//! let mut tree = SpanTree::new();
//! tree.push(read, None, 100, 115);
//! batch.aggregate(&tree);
//!
//! let report = serde_json::to_value(&batch)?;
//! let histogram = &report["batch_histogram_aggregator"]["histogram_aggregators"][0]
//!     ["histogram_aggregator"]["histogram"];
//! assert_eq!(histogram["<20"], 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
mod ticks;
mod bucket;
mod histogram;
mod report;
mod calltree;
mod actions;
mod updater;
mod aggregator;
mod batch;
mod config;

pub use ticks::{Ticks, SENTINEL};
pub use bucket::Bucket;
pub use histogram::Histogram;
pub use calltree::{ActionCode, CallTree, CodeToNodes, NodeId, SpanTree};
pub use actions::{ActionSet, Actions};
pub use updater::{ActionOffsetTimeUpdater, ActionTimeUpdater, HistogramUpdater, Measurement};
pub use aggregator::{Aggregator, HistogramAggregator};
pub use batch::BatchHistogramAggregator;
pub use config::{ActionRef, BatchConfig, HistogramConfig, UpdaterConfig};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("tick boundaries must be strictly ascending (offending index {index})")]
    TicksOutOfOrder { index: usize },
    #[error("a histogram needs at least one dimension")]
    NoDimensions,
    #[error("updater yields {updater} measurements, histogram has {histogram} dimensions")]
    DimensionMismatch { updater: usize, histogram: usize },
    #[error("histograms have different tick layouts")]
    IncompatibleTicks,
    #[error("unknown action: {}", .0)]
    UnknownAction(String),
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}
