use super::aggregate::{aggregate_expert_ratings, aggregate_worker_responses};
use crate::dataset::RawTables;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One task-level row of the combined analysis table. Field renames bind the
/// struct to the dataset's column vocabulary, which is also the CSV export
/// header. Optional fields are absent (not zero) when the expert side or the
/// metadata table has no row for the task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAnalysisRow {
    #[serde(rename = "Task ID")]
    pub task_id: String,
    #[serde(rename = "Task")]
    pub task: String,
    #[serde(rename = "Occupation")]
    pub occupation: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Automation Desire Rating")]
    pub automation_desire: f64,
    #[serde(rename = "Automation Desire Std")]
    pub desire_std: Option<f64>,
    #[serde(rename = "Worker Count")]
    pub worker_count: usize,
    #[serde(rename = "Job Security Rating")]
    pub job_security: f64,
    #[serde(rename = "Enjoyment Rating")]
    pub enjoyment: f64,
    #[serde(rename = "Expert Capability Rating")]
    pub expert_capability: Option<f64>,
    #[serde(rename = "Confidence")]
    pub expert_confidence: Option<f64>,
    #[serde(rename = "O*NET-SOC Code")]
    pub soc_code: Option<String>,
    #[serde(rename = "Task Category")]
    pub task_category: Option<String>,
    #[serde(rename = "Automation Readiness")]
    pub automation_readiness: Option<f64>,
    #[serde(rename = "Desire Capability Gap")]
    pub desire_capability_gap: Option<f64>,
}

/// Build the combined analysis table from the three raw tables.
///
/// Worker responses drive the join: the output has exactly one row per task
/// id present in the worker table, ordered by task id. Expert aggregates and
/// task metadata are left-joined in; tasks they know about but workers never
/// rated are dropped. The derived columns follow the dashboard definitions:
/// automation readiness is min(desire, capability) and the gap is desire
/// minus capability, both absent when no expert rated the task.
pub fn prepare_analysis(raw: &RawTables) -> Vec<TaskAnalysisRow> {
    let worker_aggregates = aggregate_worker_responses(&raw.worker);
    let expert_aggregates = aggregate_expert_ratings(&raw.expert);
    let metadata: HashMap<&str, &crate::dataset::TaskMetadata> = raw
        .task
        .iter()
        .map(|row| (row.task_id.as_str(), row))
        .collect();

    worker_aggregates
        .into_iter()
        .map(|(task_id, worker)| {
            let expert = expert_aggregates.get(&task_id);
            let meta = metadata.get(task_id.as_str());

            let expert_capability = expert.map(|agg| agg.capability_mean);
            let automation_readiness =
                expert_capability.map(|capability| worker.desire_mean.min(capability));
            let desire_capability_gap =
                expert_capability.map(|capability| worker.desire_mean - capability);

            TaskAnalysisRow {
                task_id,
                task: worker.task,
                occupation: worker.occupation,
                domain: worker.domain,
                automation_desire: worker.desire_mean,
                desire_std: worker.desire_std,
                worker_count: worker.worker_count,
                job_security: worker.job_security_mean,
                enjoyment: worker.enjoyment_mean,
                expert_capability,
                expert_confidence: expert.map(|agg| agg.confidence_mean),
                soc_code: meta.map(|row| row.soc_code.clone()),
                task_category: meta.map(|row| row.task_category.clone()),
                automation_readiness,
                desire_capability_gap,
            }
        })
        .collect()
}
