//! Diagnostic summary report

use std::fmt;

use serde::Serialize;

/// Current population of one filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub filter: String,
    pub population: usize,
}

/// Engine-wide diagnostic: total tracked keys plus per-filter populations,
/// sorted by filter name for deterministic output. Read-only; not part of
/// the ranking contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    pub total_records: usize,
    pub total_filters: usize,
    pub filters: Vec<FilterSummary>,
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "All Records: {}", self.total_records)?;
        writeln!(f, "Filters: {}", self.total_filters)?;
        for entry in &self.filters {
            writeln!(f, "{}: {}", entry.filter, entry.population)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SummaryReport {
        SummaryReport {
            total_records: 4,
            total_filters: 2,
            filters: vec![
                FilterSummary {
                    filter: "AA".to_string(),
                    population: 3,
                },
                FilterSummary {
                    filter: "BB".to_string(),
                    population: 1,
                },
            ],
        }
    }

    #[test]
    fn test_display_line_format() {
        assert_eq!(
            report().to_string(),
            "All Records: 4\nFilters: 2\nAA: 3\nBB: 1\n"
        );
    }

    #[test]
    fn test_serializes_with_stable_field_names() {
        let value = serde_json::to_value(report()).unwrap();
        assert_eq!(value["total_records"], 4);
        assert_eq!(value["filters"][0]["filter"], "AA");
        assert_eq!(value["filters"][0]["population"], 3);
    }
}
