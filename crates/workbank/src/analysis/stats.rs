use super::combine::TaskAnalysisRow;
use serde::Serialize;
use std::collections::HashSet;

/// Dashboard headline numbers computed over the combined table. Means are
/// absent when no row carries a defined value for that field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_tasks: usize,
    pub total_workers: usize,
    pub avg_automation_desire: Option<f64>,
    pub avg_expert_capability: Option<f64>,
    pub avg_automation_readiness: Option<f64>,
    pub unique_occupations: usize,
    pub unique_domains: usize,
}

pub fn summary_statistics(combined: &[TaskAnalysisRow]) -> SummaryStats {
    let occupations: HashSet<&str> = combined.iter().map(|row| row.occupation.as_str()).collect();
    let domains: HashSet<&str> = combined.iter().map(|row| row.domain.as_str()).collect();

    SummaryStats {
        total_tasks: combined.len(),
        total_workers: combined.iter().map(|row| row.worker_count).sum(),
        avg_automation_desire: mean(combined.iter().map(|row| Some(row.automation_desire))),
        avg_expert_capability: mean(combined.iter().map(|row| row.expert_capability)),
        avg_automation_readiness: mean(combined.iter().map(|row| row.automation_readiness)),
        unique_occupations: occupations.len(),
        unique_domains: domains.len(),
    }
}

/// Mean over the defined values only; absent when nothing is defined.
fn mean(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values.flatten() {
        sum += value;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}
