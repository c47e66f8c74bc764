use crate::dataset::{ExpertRating, WorkerResponse};
use std::collections::BTreeMap;

/// Worker responses for one task, collapsed to task level. Task text,
/// occupation, and domain are first-seen values; the survey keeps them
/// constant within a task and they are not re-validated here.
#[derive(Debug, Clone)]
pub(crate) struct WorkerAggregate {
    pub(crate) task: String,
    pub(crate) occupation: String,
    pub(crate) domain: String,
    pub(crate) desire_mean: f64,
    pub(crate) desire_std: Option<f64>,
    pub(crate) worker_count: usize,
    pub(crate) job_security_mean: f64,
    pub(crate) enjoyment_mean: f64,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ExpertAggregate {
    pub(crate) capability_mean: f64,
    pub(crate) confidence_mean: f64,
}

/// Group worker rows by task id. BTreeMap keys give the combined table its
/// deterministic task-id ordering.
pub(crate) fn aggregate_worker_responses(
    rows: &[WorkerResponse],
) -> BTreeMap<String, WorkerAggregate> {
    struct Accum {
        task: String,
        occupation: String,
        domain: String,
        desires: Vec<f64>,
        job_security_sum: f64,
        enjoyment_sum: f64,
    }

    let mut groups: BTreeMap<String, Accum> = BTreeMap::new();
    for row in rows {
        let entry = groups.entry(row.task_id.clone()).or_insert_with(|| Accum {
            task: row.task.clone(),
            occupation: row.occupation.clone(),
            domain: row.domain.clone(),
            desires: Vec::new(),
            job_security_sum: 0.0,
            enjoyment_sum: 0.0,
        });
        entry.desires.push(row.automation_desire);
        entry.job_security_sum += row.job_security;
        entry.enjoyment_sum += row.enjoyment;
    }

    groups
        .into_iter()
        .map(|(task_id, accum)| {
            let count = accum.desires.len();
            let desire_mean = accum.desires.iter().sum::<f64>() / count as f64;
            (
                task_id,
                WorkerAggregate {
                    task: accum.task,
                    occupation: accum.occupation,
                    domain: accum.domain,
                    desire_mean,
                    desire_std: sample_std(&accum.desires, desire_mean),
                    worker_count: count,
                    job_security_mean: accum.job_security_sum / count as f64,
                    enjoyment_mean: accum.enjoyment_sum / count as f64,
                },
            )
        })
        .collect()
}

pub(crate) fn aggregate_expert_ratings(rows: &[ExpertRating]) -> BTreeMap<String, ExpertAggregate> {
    let mut sums: BTreeMap<String, (f64, f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = sums.entry(row.task_id.clone()).or_insert((0.0, 0.0, 0));
        entry.0 += row.capability;
        entry.1 += row.confidence;
        entry.2 += 1;
    }

    sums.into_iter()
        .map(|(task_id, (capability, confidence, count))| {
            (
                task_id,
                ExpertAggregate {
                    capability_mean: capability / count as f64,
                    confidence_mean: confidence / count as f64,
                },
            )
        })
        .collect()
}

/// Sample standard deviation (n − 1 denominator). Undefined for a single
/// observation.
fn sample_std(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let sum_sq: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}
