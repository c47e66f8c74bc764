use super::schema::{ExpertRating, RawTables, TaskMetadata, WorkerResponse};

/// Deterministic built-in table set used when the remote dataset cannot be
/// reached. Column-for-column identical to the remote schema, spans several
/// domains, and includes tasks with more than one worker response so the
/// aggregation and join paths stay exercised offline.
pub fn fallback_tables() -> RawTables {
    RawTables {
        worker: vec![
            worker(
                "T001",
                "Create marketing materials and promotional content",
                "Marketing Managers",
                "Marketing",
                4.2,
                3.1,
                3.8,
                "W001",
            ),
            worker(
                "T002",
                "Analyze customer feedback and survey responses",
                "Market Research Analysts",
                "Research",
                4.7,
                2.8,
                2.9,
                "W002",
            ),
            worker(
                "T003",
                "Schedule appointments and manage calendars",
                "Administrative Assistants",
                "Administration",
                4.9,
                2.3,
                2.1,
                "W003",
            ),
            worker(
                "T004",
                "Provide emotional support and counseling to patients",
                "Clinical Social Workers",
                "Healthcare",
                1.2,
                4.8,
                4.9,
                "W004",
            ),
            worker(
                "T005",
                "Write and edit technical documentation",
                "Technical Writers",
                "Technical",
                3.4,
                3.6,
                4.1,
                "W005",
            ),
            worker(
                "T001",
                "Create marketing materials and promotional content",
                "Marketing Managers",
                "Marketing",
                3.8,
                3.5,
                4.0,
                "W006",
            ),
            worker(
                "T002",
                "Analyze customer feedback and survey responses",
                "Market Research Analysts",
                "Research",
                4.5,
                3.0,
                3.2,
                "W007",
            ),
        ],
        expert: vec![
            expert(
                "T001",
                "Create marketing materials and promotional content",
                3.5,
                4.2,
                "E001",
            ),
            expert(
                "T002",
                "Analyze customer feedback and survey responses",
                4.1,
                4.5,
                "E002",
            ),
            expert(
                "T003",
                "Schedule appointments and manage calendars",
                4.8,
                4.9,
                "E003",
            ),
            expert(
                "T004",
                "Provide emotional support and counseling to patients",
                1.5,
                4.7,
                "E004",
            ),
            expert(
                "T005",
                "Write and edit technical documentation",
                3.8,
                4.0,
                "E005",
            ),
        ],
        task: vec![
            task(
                "T001",
                "Create marketing materials and promotional content",
                "Marketing Managers",
                "11-2021.00",
                "Marketing",
                "Creative",
            ),
            task(
                "T002",
                "Analyze customer feedback and survey responses",
                "Market Research Analysts",
                "13-1161.00",
                "Research",
                "Analytical",
            ),
            task(
                "T003",
                "Schedule appointments and manage calendars",
                "Administrative Assistants",
                "43-6011.00",
                "Administration",
                "Organizational",
            ),
            task(
                "T004",
                "Provide emotional support and counseling to patients",
                "Clinical Social Workers",
                "21-1022.00",
                "Healthcare",
                "Interpersonal",
            ),
            task(
                "T005",
                "Write and edit technical documentation",
                "Technical Writers",
                "27-3042.00",
                "Technical",
                "Communication",
            ),
        ],
    }
}

#[allow(clippy::too_many_arguments)]
fn worker(
    task_id: &str,
    task: &str,
    occupation: &str,
    domain: &str,
    automation_desire: f64,
    job_security: f64,
    enjoyment: f64,
    worker_id: &str,
) -> WorkerResponse {
    WorkerResponse {
        task_id: task_id.to_string(),
        task: task.to_string(),
        occupation: occupation.to_string(),
        domain: domain.to_string(),
        automation_desire,
        job_security,
        enjoyment,
        worker_id: worker_id.to_string(),
    }
}

fn expert(
    task_id: &str,
    task: &str,
    capability: f64,
    confidence: f64,
    expert_id: &str,
) -> ExpertRating {
    ExpertRating {
        task_id: task_id.to_string(),
        task: task.to_string(),
        capability,
        confidence,
        expert_id: expert_id.to_string(),
    }
}

fn task(
    task_id: &str,
    task: &str,
    occupation: &str,
    soc_code: &str,
    domain: &str,
    task_category: &str,
) -> TaskMetadata {
    TaskMetadata {
        task_id: task_id.to_string(),
        task: task.to_string(),
        occupation: occupation.to_string(),
        soc_code: soc_code.to_string(),
        domain: domain.to_string(),
        task_category: task_category.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fallback_spans_multiple_domains() {
        let tables = fallback_tables();
        let domains: HashSet<&str> = tables
            .worker
            .iter()
            .map(|row| row.domain.as_str())
            .collect();
        assert!(domains.len() >= 3, "expected several domains, got {domains:?}");
    }

    #[test]
    fn fallback_has_a_task_with_multiple_worker_responses() {
        let tables = fallback_tables();
        let t001_responses = tables
            .worker
            .iter()
            .filter(|row| row.task_id == "T001")
            .count();
        assert!(t001_responses >= 2);
    }

    #[test]
    fn fallback_has_a_task_in_all_three_tables() {
        let tables = fallback_tables();
        let in_worker = tables.worker.iter().any(|row| row.task_id == "T001");
        let in_expert = tables.expert.iter().any(|row| row.task_id == "T001");
        let in_task = tables.task.iter().any(|row| row.task_id == "T001");
        assert!(in_worker && in_expert && in_task);
    }

    #[test]
    fn fallback_ratings_stay_on_the_survey_scale() {
        let tables = fallback_tables();
        let in_range = |value: f64| (1.0..=5.0).contains(&value);
        assert!(tables.worker.iter().all(|row| in_range(row.automation_desire)
            && in_range(row.job_security)
            && in_range(row.enjoyment)));
        assert!(tables
            .expert
            .iter()
            .all(|row| in_range(row.capability) && in_range(row.confidence)));
    }
}
