use crate::usecase::aggregate::TOP_COMPONENTS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeStats {
    pub vertices: usize,
    pub edges: usize,
    pub self_loops: usize,
    pub components: usize,
    pub largest_component: usize,
}

/// What one run reports: counts plus the five largest component sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SccReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub stats: AnalyzeStats,
    pub top_components: [usize; TOP_COMPONENTS],
}

impl SccReport {
    /// `434821,968,459,313,211`
    pub fn sizes_line(&self) -> String {
        self.top_components
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_line_is_comma_separated_and_keeps_zero_padding() {
        let report = SccReport {
            input: None,
            stats: AnalyzeStats::default(),
            top_components: [2, 1, 0, 0, 0],
        };
        assert_eq!(report.sizes_line(), "2,1,0,0,0");
    }
}
