//! Data models for engineering-model iterations.
//!
//! This module contains the typed records representing the slice of the
//! engineering-model object graph the mass calculator consumes: models,
//! iterations, element definitions, parameters, and value sets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix that marks a parameter as the total-mass parameter of its
/// owning element definition (`<element short name>.m`).
pub const MASS_SUFFIX: &str = ".m";

/// An engineering model: a named container of iterations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineeringModel {
    /// Human-readable short name of the model (e.g., "LOFT").
    pub short_name: String,
    /// Iterations of this model, in setup order.
    #[serde(default)]
    pub iterations: Vec<Iteration>,
}

impl EngineeringModel {
    /// Finds the iteration with the given number, if present.
    pub fn iteration(&self, number: u32) -> Option<&Iteration> {
        self.iterations.iter().find(|it| it.number == number)
    }
}

/// A versioned snapshot of an engineering model's element data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Iteration {
    /// Iteration number as assigned by the iteration setup (1-based).
    pub number: u32,
    /// Element definitions in this iteration, in model order.
    #[serde(default)]
    pub elements: Vec<ElementDefinition>,
}

impl Iteration {
    /// Creates an empty iteration with the given number.
    #[allow(dead_code)] // Builder utility
    pub fn new(number: u32) -> Self {
        Self {
            number,
            elements: Vec::new(),
        }
    }
}

/// A named system component within an iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementDefinition {
    /// Human-readable short name (e.g., "BAT" for a battery).
    pub short_name: String,
    /// Parameters of this element, in model order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl ElementDefinition {
    /// Short name a parameter must carry to count as this element's
    /// total-mass parameter. Exact, case-sensitive match.
    pub fn mass_parameter_short_name(&self) -> String {
        format!("{}{}", self.short_name, MASS_SUFFIX)
    }
}

impl fmt::Display for ElementDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name)
    }
}

/// A named property of an element definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Fully qualified short name (e.g., "BAT.m").
    pub short_name: String,
    /// Value sets of this parameter, possibly state- or option-dependent.
    #[serde(default)]
    pub value_sets: Vec<ValueSet>,
}

/// The values associated with a parameter.
///
/// The original data model carries several value kinds per set; the mass
/// calculation consults only the first published entry. The other kinds
/// are kept so documents round-trip without loss.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueSet {
    /// Published values, in component order.
    #[serde(default)]
    pub published: Vec<String>,
    /// Computed values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub computed: Vec<String>,
    /// Manually entered values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manual: Vec<String>,
    /// Reference values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference: Vec<String>,
}

impl ValueSet {
    /// Creates a value set with a single published value.
    #[allow(dead_code)] // Builder utility
    pub fn published(value: impl Into<String>) -> Self {
        Self {
            published: vec![value.into()],
            ..Self::default()
        }
    }

    /// First entry of the published sequence, if any.
    pub fn first_published(&self) -> Option<&str> {
        self.published.first().map(String::as_str)
    }
}
