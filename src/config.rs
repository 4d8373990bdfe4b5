//! Declarative setup of a [BatchHistogramAggregator] from JSON.
//!
//! ```json
//! { "histograms": [
//!     { "updater": { "type": "action_time", "action": "read" }, "ticks": [[10, 100, 1000]] },
//!     { "updater": { "type": "action_offset_time", "action_code": 3 }, "ticks": [[50], [10, 100]] }
//! ] }
//! ```
use std::sync::Arc;

use serde::Deserialize;

use super::actions::Actions;
use super::batch::BatchHistogramAggregator;
use super::calltree::ActionCode;
use super::updater::{ActionOffsetTimeUpdater, ActionTimeUpdater, HistogramUpdater};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchConfig {
    #[serde(default)]
    pub histograms: Vec<HistogramConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistogramConfig {
    pub updater: UpdaterConfig,
    /// One tick list per dimension, outermost first.
    pub ticks: Vec<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpdaterConfig {
    ActionTime(ActionRef),
    ActionOffsetTime(ActionRef),
}

/// An action named either by its catalog name or directly by its code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ActionRef {
    Name { action: String },
    Code { action_code: ActionCode },
}

impl ActionRef {
    fn resolve(&self, actions: &Actions) -> Result<ActionCode, super::Error> {
        match self {
            ActionRef::Name { action } => actions.code_of(action)
                .ok_or_else(|| super::Error::UnknownAction(action.clone())),
            ActionRef::Code { action_code } => Ok(*action_code),
        }
    }
}

impl UpdaterConfig {
    /// This function builds the configured updater, resolving action names
    /// through `actions`.
    pub fn build(&self, actions: &Actions) -> Result<Arc<dyn HistogramUpdater>, super::Error> {
        Ok(match self {
            UpdaterConfig::ActionTime(action) => Arc::new(ActionTimeUpdater::new(action.resolve(actions)?)),
            UpdaterConfig::ActionOffsetTime(action) => Arc::new(ActionOffsetTimeUpdater::new(action.resolve(actions)?)),
        })
    }
}

impl BatchConfig {
    pub fn from_json(text: &str) -> Result<BatchConfig, super::Error> {
        Ok(serde_json::from_str(text)?)
    }
}

impl BatchHistogramAggregator {
    /// This function builds a batch with one aggregator per configured
    /// histogram, in configuration order.
    pub fn from_config(actions: Arc<Actions>, config: &BatchConfig) -> Result<BatchHistogramAggregator, super::Error> {
        let mut batch = BatchHistogramAggregator::new(actions.clone());
        for histogram in &config.histograms {
            batch.register(histogram.updater.build(&actions)?, histogram.ticks.clone())?;
        }
        Ok(batch)
    }
}
