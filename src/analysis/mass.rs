//! Total-mass aggregation.
//!
//! Walks an iteration's element definitions, selects the parameters
//! following the `<element short name>.m` convention, and sums the first
//! published value of each of their value sets.

use crate::models::Iteration;
use crate::source::{ModelSource, SourceError};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised during mass aggregation.
#[derive(Debug, Error)]
pub enum MassError {
    /// The iteration could not be obtained from the source.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A qualifying published value was not parseable as a number.
    ///
    /// This is fatal: a mass parameter carrying a garbage value means
    /// the total would be wrong, so the computation aborts rather than
    /// silently skipping it.
    #[error("invalid mass value '{value}' in parameter '{parameter}' of element '{element}'")]
    InvalidValue {
        element: String,
        parameter: String,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },
}

/// One mass contribution, for reporting.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ElementMass {
    /// Short name of the contributing element definition.
    pub element: String,
    /// Short name of the mass parameter.
    pub parameter: String,
    /// The published value as it appeared in the model.
    pub value: String,
    /// The parsed mass.
    pub mass: f64,
}

/// Result of a mass walk over one iteration.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct MassBreakdown {
    /// Individual contributions, in model order.
    pub contributions: Vec<ElementMass>,
    /// Number of element definitions visited.
    pub elements_visited: usize,
    /// Number of parameters matching the mass convention.
    pub parameters_matched: usize,
    /// Published entries skipped by the value filter.
    pub values_skipped: usize,
    /// Sum of all contributions.
    pub total: f64,
}

/// Decides whether a published entry contributes to the total.
///
/// An entry qualifies when it is non-empty and contains no `-` anywhere.
/// This deliberately crude filter excludes blanks and negative or
/// range-like placeholders; it also rejects negative exponents, which is
/// accepted as a known limitation rather than "fixed".
fn qualifies(value: &str) -> bool {
    !value.is_empty() && !value.contains('-')
}

/// Walks an already-fetched iteration and produces the mass breakdown.
pub fn aggregate_masses(iteration: &Iteration) -> Result<MassBreakdown, MassError> {
    let mut breakdown = MassBreakdown::default();

    for element in &iteration.elements {
        breakdown.elements_visited += 1;
        debug!(element = %element.short_name, "visiting element definition");

        let mass_name = element.mass_parameter_short_name();

        let mass_parameters = element
            .parameters
            .iter()
            .filter(|p| p.short_name == mass_name);

        for parameter in mass_parameters {
            breakdown.parameters_matched += 1;

            for value_set in &parameter.value_sets {
                let Some(value) = value_set.first_published() else {
                    breakdown.values_skipped += 1;
                    trace!(parameter = %parameter.short_name, "value set has no published entry");
                    continue;
                };

                trace!(parameter = %parameter.short_name, value, "inspecting published value");

                if !qualifies(value) {
                    breakdown.values_skipped += 1;
                    debug!(parameter = %parameter.short_name, value, "value skipped by filter");
                    continue;
                }

                let mass: f64 =
                    value
                        .parse()
                        .map_err(|source| MassError::InvalidValue {
                            element: element.short_name.clone(),
                            parameter: parameter.short_name.clone(),
                            value: value.to_string(),
                            source,
                        })?;

                debug!(
                    element = %element.short_name,
                    parameter = %parameter.short_name,
                    mass,
                    "mass contribution added"
                );

                breakdown.total += mass;
                breakdown.contributions.push(ElementMass {
                    element: element.short_name.clone(),
                    parameter: parameter.short_name.clone(),
                    value: value.to_string(),
                    mass,
                });
            }
        }
    }

    debug!(total = breakdown.total, "aggregation finished");
    Ok(breakdown)
}

/// Computes the total mass of an engineering-model iteration.
///
/// Resets the source, fetches the iteration, and sums the qualifying
/// published values of every `<element>.m` parameter. Lookup failures
/// and unparseable qualifying values propagate to the caller.
#[allow(dead_code)] // Convenience wrapper; the binary keeps the breakdown
pub fn compute_total_mass(
    source: &mut dyn ModelSource,
    model_short_name: &str,
    iteration_number: u32,
) -> Result<f64, MassError> {
    source.clear();

    let iteration = source.engineering_model_iteration(model_short_name, iteration_number)?;

    Ok(aggregate_masses(&iteration)?.total)
}
