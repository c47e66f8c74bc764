use std::collections::HashSet;
use workbank::analysis::{
    prepare_analysis, read_csv, summary_statistics, viability_quadrants, write_csv,
    DEFAULT_QUADRANT_THRESHOLD,
};
use workbank::dataset::fallback_tables;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn fallback_tables_flow_through_the_whole_pipeline() {
    let raw = fallback_tables();
    let combined = prepare_analysis(&raw);

    let distinct_tasks: HashSet<&str> = raw.worker.iter().map(|row| row.task_id.as_str()).collect();
    assert_eq!(combined.len(), distinct_tasks.len());

    for row in &combined {
        let contributing = raw
            .worker
            .iter()
            .filter(|response| response.task_id == row.task_id)
            .count();
        assert!(row.worker_count >= 1);
        assert_eq!(row.worker_count, contributing);
    }

    // Every fallback task appears in all three tables, so no derived field
    // may come back absent.
    for row in &combined {
        assert!(row.expert_capability.is_some(), "{} lacks capability", row.task_id);
        assert!(row.automation_readiness.is_some(), "{} lacks readiness", row.task_id);
        assert!(row.desire_capability_gap.is_some(), "{} lacks gap", row.task_id);
        assert!(row.soc_code.is_some(), "{} lacks SOC code", row.task_id);
        assert!(row.task_category.is_some(), "{} lacks category", row.task_id);
    }

    for row in &combined {
        let capability = row.expert_capability.expect("capability present");
        let readiness = row.automation_readiness.expect("readiness present");
        let gap = row.desire_capability_gap.expect("gap present");
        assert!(close(readiness, row.automation_desire.min(capability)));
        assert!(close(gap, row.automation_desire - capability));
    }
}

#[test]
fn summary_statistics_agree_with_the_combined_table() {
    let combined = prepare_analysis(&fallback_tables());
    let stats = summary_statistics(&combined);

    assert_eq!(stats.total_tasks, combined.len());
    assert_eq!(
        stats.total_workers,
        combined.iter().map(|row| row.worker_count).sum::<usize>()
    );

    let desire = stats.avg_automation_desire.expect("desire mean defined");
    let expected_desire = combined.iter().map(|row| row.automation_desire).sum::<f64>()
        / combined.len() as f64;
    assert!(close(desire, expected_desire));
}

#[test]
fn quadrant_counts_stay_within_the_table() {
    let combined = prepare_analysis(&fallback_tables());
    let counts = viability_quadrants(&combined, DEFAULT_QUADRANT_THRESHOLD);
    assert!(counts.automation_ready + counts.automation_wanted <= combined.len());
}

#[test]
fn csv_export_round_trips_the_combined_table() {
    let combined = prepare_analysis(&fallback_tables());

    let mut buffer = Vec::new();
    write_csv(&combined, &mut buffer).expect("export succeeds");
    let parsed = read_csv(buffer.as_slice()).expect("reimport succeeds");

    assert_eq!(parsed.len(), combined.len());
    assert_eq!(parsed, combined);
}
