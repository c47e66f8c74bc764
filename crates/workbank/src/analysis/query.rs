use super::combine::TaskAnalysisRow;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Row predicate backing the dashboard's filter controls. Empty criteria
/// match everything.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub domains: Option<Vec<String>>,
    pub occupations: Option<Vec<String>>,
    pub min_desire: Option<f64>,
    pub max_desire: Option<f64>,
}

impl TaskFilter {
    fn matches(&self, row: &TaskAnalysisRow) -> bool {
        if let Some(domains) = &self.domains {
            if !domains.iter().any(|domain| domain == &row.domain) {
                return false;
            }
        }
        if let Some(occupations) = &self.occupations {
            if !occupations.iter().any(|occupation| occupation == &row.occupation) {
                return false;
            }
        }
        if let Some(min) = self.min_desire {
            if row.automation_desire < min {
                return false;
            }
        }
        if let Some(max) = self.max_desire {
            if row.automation_desire > max {
                return false;
            }
        }
        true
    }
}

pub fn apply_filter(rows: &[TaskAnalysisRow], filter: &TaskFilter) -> Vec<TaskAnalysisRow> {
    rows.iter().filter(|row| filter.matches(row)).cloned().collect()
}

/// Numeric columns the table view can sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    AutomationDesire,
    ExpertCapability,
    AutomationReadiness,
    DesireCapabilityGap,
    WorkerCount,
}

impl SortKey {
    fn value(self, row: &TaskAnalysisRow) -> Option<f64> {
        match self {
            Self::AutomationDesire => Some(row.automation_desire),
            Self::ExpertCapability => row.expert_capability,
            Self::AutomationReadiness => row.automation_readiness,
            Self::DesireCapabilityGap => row.desire_capability_gap,
            Self::WorkerCount => Some(row.worker_count as f64),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Sort in place by the given column. Rows whose value is absent sink to the
/// end regardless of direction, so partial expert coverage never leads a
/// ranked view.
pub fn sort_rows(rows: &mut [TaskAnalysisRow], key: SortKey, order: SortOrder) {
    rows.sort_by(|a, b| match (key.value(a), key.value(b)) {
        (Some(left), Some(right)) => {
            let ordering = left.partial_cmp(&right).unwrap_or(Ordering::Equal);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Counts for the dashboard's viability quadrant view: tasks workers want
/// automated that AI can already do, and tasks workers want automated that
/// AI cannot do yet. Rows without an expert rating belong to neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuadrantCounts {
    pub automation_ready: usize,
    pub automation_wanted: usize,
}

pub fn viability_quadrants(rows: &[TaskAnalysisRow], threshold: f64) -> QuadrantCounts {
    let mut counts = QuadrantCounts {
        automation_ready: 0,
        automation_wanted: 0,
    };

    for row in rows {
        let Some(capability) = row.expert_capability else {
            continue;
        };
        if row.automation_desire >= threshold {
            if capability >= threshold {
                counts.automation_ready += 1;
            } else {
                counts.automation_wanted += 1;
            }
        }
    }

    counts
}
