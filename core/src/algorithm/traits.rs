//! Core algorithm trait definitions for the GraphFlow engine
//!
//! Every augmentor and solver in the crate describes itself through the
//! [`Algorithm`] trait: a stable name and category, a human readable
//! description with complexity bounds, and a string-typed parameter surface
//! that mirrors the fields of [`crate::algorithm::config::FlowConfig`].
//!
//! # Key Design Principles
//! - Parametric polymorphism over caller-defined vertex and edge types
//! - Parameters validated on assignment, never at use
//! - Errors reported through `thiserror` enums, never panics

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Algorithm parameter with strongly typed values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmParameter {
    pub name: String,
    pub value: String,
    pub value_type: ParameterType,
    pub description: String,
}

impl AlgorithmParameter {
    pub fn new(name: &str, value: String, value_type: ParameterType, description: &str) -> Self {
        Self {
            name: name.to_owned(),
            value,
            value_type,
            description: description.to_owned(),
        }
    }
}

/// Parameter type enumeration for type-safe parameter handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    Float,
    Boolean,
}

/// Error types for algorithm configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Invalid configuration document: {0}")]
    InvalidConfiguration(String),
}

/// Algorithm complexity information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
}

impl AlgorithmComplexity {
    pub fn new(time: &str, space: &str) -> Self {
        Self {
            time_complexity: time.to_owned(),
            space_complexity: space.to_owned(),
        }
    }
}

/// Descriptive and configurable surface shared by every flow component
pub trait Algorithm {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g. max_flow, augmentation)
    fn category(&self) -> &'static str;

    /// Returns the algorithm's description with its guarantees
    fn description(&self) -> String;

    /// Returns the algorithm's asymptotic complexity in Big-O notation
    fn complexity(&self) -> AlgorithmComplexity;

    /// Returns supported parameters with their current values
    fn parameters(&self) -> Vec<AlgorithmParameter>;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String> {
        self.parameters()
            .into_iter()
            .find(|parameter| parameter.name == name)
            .map(|parameter| parameter.value)
    }
}

/// Parses a parameter value, mapping failures onto [`AlgorithmError`]
pub(crate) fn parse_parameter<T: FromStr>(name: &str, value: &str) -> Result<T, AlgorithmError> {
    value.trim().parse::<T>().map_err(|_| AlgorithmError::InvalidParameter {
        name: name.to_owned(),
        reason: format!("cannot parse '{}'", value),
    })
}

/// Accepts finite non-negative capacities; `f64::MAX` stands in for unbounded
pub(crate) fn validate_capacity(name: &str, value: f64) -> Result<f64, AlgorithmError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AlgorithmError::InvalidParameter {
            name: name.to_owned(),
            reason: format!("must be a finite non-negative number, got {}", value),
        });
    }
    Ok(value)
}
