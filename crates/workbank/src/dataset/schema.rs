use super::DatasetError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One worker's ratings for one task. Task IDs repeat across rows; several
/// workers rate the same task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerResponse {
    #[serde(rename = "Task ID")]
    pub task_id: String,
    #[serde(rename = "Task")]
    pub task: String,
    #[serde(rename = "Occupation (O*NET-SOC Title)")]
    pub occupation: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Automation Desire Rating")]
    pub automation_desire: f64,
    #[serde(rename = "Job Security Rating")]
    pub job_security: f64,
    #[serde(rename = "Enjoyment Rating")]
    pub enjoyment: f64,
    #[serde(rename = "Worker ID")]
    pub worker_id: String,
}

/// One expert's capability assessment for one task. Task IDs repeat here too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpertRating {
    #[serde(rename = "Task ID")]
    pub task_id: String,
    #[serde(rename = "Task")]
    pub task: String,
    #[serde(rename = "Expert Capability Rating")]
    pub capability: f64,
    #[serde(rename = "Confidence")]
    pub confidence: f64,
    #[serde(rename = "Expert ID")]
    pub expert_id: String,
}

/// Descriptive metadata, one row per task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskMetadata {
    #[serde(rename = "Task ID")]
    pub task_id: String,
    #[serde(rename = "Task")]
    pub task: String,
    #[serde(rename = "Occupation (O*NET-SOC Title)")]
    pub occupation: String,
    #[serde(rename = "O*NET-SOC Code")]
    pub soc_code: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Task Category")]
    pub task_category: String,
}

/// The three raw survey tables, fully materialized before any transformation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTables {
    pub worker: Vec<WorkerResponse>,
    pub expert: Vec<ExpertRating>,
    pub task: Vec<TaskMetadata>,
}

pub(crate) const WORKER_RESOURCE: &str = "worker_data/domain_worker_desires.csv";
pub(crate) const EXPERT_RESOURCE: &str = "expert_ratings/expert_rated_technological_capability.csv";
pub(crate) const TASK_RESOURCE: &str = "task_data/task_statement_with_metadata.csv";

pub(crate) const WORKER_COLUMNS: &[&str] = &[
    "Task ID",
    "Task",
    "Occupation (O*NET-SOC Title)",
    "Domain",
    "Automation Desire Rating",
    "Job Security Rating",
    "Enjoyment Rating",
    "Worker ID",
];

pub(crate) const EXPERT_COLUMNS: &[&str] = &[
    "Task ID",
    "Task",
    "Expert Capability Rating",
    "Confidence",
    "Expert ID",
];

pub(crate) const TASK_COLUMNS: &[&str] = &[
    "Task ID",
    "Task",
    "Occupation (O*NET-SOC Title)",
    "O*NET-SOC Code",
    "Domain",
    "Task Category",
];

/// Parse one fetched resource into typed rows. The header row is checked
/// against the expected column set first, so upstream schema drift surfaces
/// as a loader failure instead of a half-parsed table. Extra columns are
/// tolerated.
pub(crate) fn parse_rows<T: DeserializeOwned>(
    resource: &'static str,
    expected: &[&str],
    bytes: &[u8],
) -> Result<Vec<T>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let missing: Vec<String> = expected
        .iter()
        .filter(|wanted| !headers.iter().any(|have| have == **wanted))
        .map(|wanted| wanted.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::Schema { resource, missing });
    }

    let mut rows = Vec::new();
    for record in reader.deserialize::<T>() {
        rows.push(record?);
    }
    Ok(rows)
}
