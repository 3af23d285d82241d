//! Mass report generation.
//!
//! Renders the result of a mass aggregation as plain text, Markdown, or
//! JSON.

use crate::analysis::MassBreakdown;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Metadata about a mass computation.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Short name of the engineering model.
    pub model: String,
    /// Iteration number that was walked.
    pub iteration: u32,
    /// Date and time of the computation.
    pub analysis_date: DateTime<Utc>,
    /// Duration of the computation in seconds.
    pub duration_seconds: f64,
}

/// The complete mass report.
#[derive(Debug, Clone, Serialize)]
pub struct MassReport {
    /// Metadata about the report.
    pub metadata: ReportMetadata,
    /// Per-element contributions and counters.
    pub breakdown: MassBreakdown,
}

/// Generate a plain-text report.
pub fn generate_text_report(report: &MassReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Total mass of {} iteration {}\n\n",
        report.metadata.model, report.metadata.iteration
    ));

    for contribution in &report.breakdown.contributions {
        output.push_str(&format!(
            "  {:<16} {:>12} kg\n",
            contribution.element, contribution.value
        ));
    }

    if report.breakdown.contributions.is_empty() {
        output.push_str("  (no mass parameters found)\n");
    }

    output.push_str(&format!(
        "\n  Total: {} kg\n\n",
        report.breakdown.total
    ));
    output.push_str(&format!(
        "Elements visited: {} | Mass parameters: {} | Values skipped: {}\n",
        report.breakdown.elements_visited,
        report.breakdown.parameters_matched,
        report.breakdown.values_skipped
    ));

    output
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &MassReport) -> String {
    let mut output = String::new();

    output.push_str("# Mass Budget Report\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_breakdown_section(&report.breakdown));

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Engineering Model:** {}\n", metadata.model));
    section.push_str(&format!("- **Iteration:** {}\n", metadata.iteration));
    section.push_str(&format!(
        "- **Analysis Date:** {}\n",
        metadata.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Duration:** {:.3}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the per-element breakdown section.
fn generate_breakdown_section(breakdown: &MassBreakdown) -> String {
    let mut section = String::new();

    section.push_str("## Mass Breakdown\n\n");

    if breakdown.contributions.is_empty() {
        section.push_str("No mass parameters were found in this iteration.\n\n");
    } else {
        section.push_str("| Element | Parameter | Published Value | Mass (kg) |\n");
        section.push_str("|:---|:---|---:|---:|\n");

        for contribution in &breakdown.contributions {
            section.push_str(&format!(
                "| {} | `{}` | {} | {} |\n",
                contribution.element,
                contribution.parameter,
                contribution.value,
                contribution.mass
            ));
        }
        section.push('\n');
    }

    section.push_str(&format!("**Total mass:** {} kg\n\n", breakdown.total));

    section.push_str("## Statistics\n\n");
    section.push_str(&format!(
        "- **Elements Visited:** {}\n",
        breakdown.elements_visited
    ));
    section.push_str(&format!(
        "- **Mass Parameters Matched:** {}\n",
        breakdown.parameters_matched
    ));
    section.push_str(&format!(
        "- **Values Skipped:** {}\n",
        breakdown.values_skipped
    ));

    section
}

/// Generate a JSON report.
pub fn generate_json_report(report: &MassReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Write a rendered report to a file.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ElementMass;

    fn create_test_report() -> MassReport {
        MassReport {
            metadata: ReportMetadata {
                model: "LOFT".to_string(),
                iteration: 1,
                analysis_date: Utc::now(),
                duration_seconds: 0.004,
            },
            breakdown: MassBreakdown {
                contributions: vec![
                    ElementMass {
                        element: "BAT".to_string(),
                        parameter: "BAT.m".to_string(),
                        value: "7.5".to_string(),
                        mass: 7.5,
                    },
                    ElementMass {
                        element: "OBC".to_string(),
                        parameter: "OBC.m".to_string(),
                        value: "0.75".to_string(),
                        mass: 0.75,
                    },
                ],
                elements_visited: 3,
                parameters_matched: 2,
                values_skipped: 1,
                total: 8.25,
            },
        }
    }

    #[test]
    fn test_generate_text_report() {
        let report = create_test_report();
        let text = generate_text_report(&report);

        assert!(text.contains("Total mass of LOFT iteration 1"));
        assert!(text.contains("BAT"));
        assert!(text.contains("Total: 8.25 kg"));
        assert!(text.contains("Values skipped: 1"));
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report();
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("# Mass Budget Report"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("## Mass Breakdown"));
        assert!(markdown.contains("| BAT | `BAT.m` | 7.5 | 7.5 |"));
        assert!(markdown.contains("**Total mass:** 8.25 kg"));
    }

    #[test]
    fn test_markdown_report_without_contributions() {
        let mut report = create_test_report();
        report.breakdown = MassBreakdown::default();

        let markdown = generate_markdown_report(&report);
        assert!(markdown.contains("No mass parameters were found"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report();
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"model\""));
        assert!(json.contains("\"contributions\""));
        assert!(json.contains("\"total\""));
    }
}
