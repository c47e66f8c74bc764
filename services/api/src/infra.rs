use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use workbank::analysis::TaskFilter;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Split a comma-separated query value into trimmed, non-empty items.
pub(crate) fn parse_list(raw: Option<&str>) -> Option<Vec<String>> {
    let items: Vec<String> = raw?
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();
    (!items.is_empty()).then_some(items)
}

pub(crate) fn filter_from_parts(
    domain: Option<&str>,
    occupation: Option<&str>,
    min_desire: Option<f64>,
    max_desire: Option<f64>,
) -> TaskFilter {
    TaskFilter {
        domains: parse_list(domain),
        occupations: parse_list(occupation),
        min_desire,
        max_desire,
    }
}
