//! Flow engine configuration
//!
//! A [`FlowConfig`] carries the few tunables shared by the augmentors, the
//! balancer and the Edmonds-Karp solver. It can be built in code, loaded from
//! a JSON document, or adjusted field by field through
//! [`crate::algorithm::Algorithm::set_parameter`].
//!
//! ```json
//! { "connector_capacity": 1e9, "lower_bound": 1.0, "stop_at_sink": true }
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{validate_capacity, AlgorithmError};

/// Tunables for augmentation, balancing and flow computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Capacity reported for synthetic connector edges
    pub connector_capacity: f64,
    /// Preflow lower bound per edge used by the balancer
    pub lower_bound: f64,
    /// End each augmenting-path search as soon as the sink is discovered
    pub stop_at_sink: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            connector_capacity: f64::MAX,
            lower_bound: 1.0,
            stop_at_sink: true,
        }
    }
}

impl FlowConfig {
    /// Parses and validates a JSON configuration document
    pub fn from_json(document: &str) -> Result<Self, AlgorithmError> {
        let config: FlowConfig = serde_json::from_str(document)
            .map_err(|e| AlgorithmError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, AlgorithmError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AlgorithmError::InvalidConfiguration(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), AlgorithmError> {
        validate_capacity("connector_capacity", self.connector_capacity)?;
        validate_capacity("lower_bound", self.lower_bound)?;
        Ok(())
    }

    pub fn with_connector_capacity(mut self, capacity: f64) -> Self {
        self.connector_capacity = capacity;
        self
    }

    pub fn with_lower_bound(mut self, lower_bound: f64) -> Self {
        self.lower_bound = lower_bound;
        self
    }

    pub fn with_stop_at_sink(mut self, stop_at_sink: bool) -> Self {
        self.stop_at_sink = stop_at_sink;
        self
    }
}
