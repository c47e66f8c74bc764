use crate::infra::{filter_from_parts, AppState};
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use workbank::analysis::{
    apply_filter, prepare_analysis, sort_rows, summary_statistics, viability_quadrants,
    write_csv, QuadrantCounts, SortKey, SortOrder, SummaryStats, TaskAnalysisRow,
    DEFAULT_QUADRANT_THRESHOLD,
};
use workbank::dataset::{DatasetGateway, DatasetLoader, SourceProvenance};
use workbank::error::AppError;

#[derive(Debug, Deserialize, Default)]
pub(crate) struct TaskQuery {
    /// Comma-separated domain labels.
    pub(crate) domain: Option<String>,
    /// Comma-separated occupation labels.
    pub(crate) occupation: Option<String>,
    pub(crate) min_desire: Option<f64>,
    pub(crate) max_desire: Option<f64>,
    pub(crate) sort_by: Option<SortKey>,
    pub(crate) order: Option<SortOrder>,
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OverviewResponse {
    pub(crate) source: SourceProvenance,
    pub(crate) loaded_at: DateTime<Utc>,
    pub(crate) stats: SummaryStats,
    pub(crate) quadrant_threshold: f64,
    pub(crate) quadrants: QuadrantCounts,
}

#[derive(Debug, Serialize)]
pub(crate) struct TaskTableResponse {
    pub(crate) source: SourceProvenance,
    pub(crate) loaded_at: DateTime<Utc>,
    pub(crate) total: usize,
    pub(crate) returned: usize,
    pub(crate) tasks: Vec<TaskAnalysisRow>,
}

pub(crate) fn with_analysis_routes<G>(loader: Arc<DatasetLoader<G>>) -> axum::Router
where
    G: DatasetGateway + 'static,
{
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/overview", axum::routing::get(overview_endpoint::<G>))
        .route("/api/v1/tasks", axum::routing::get(tasks_endpoint::<G>))
        .route(
            "/api/v1/tasks/export",
            axum::routing::get(export_endpoint::<G>),
        )
        .layer(Extension(loader))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn overview_endpoint<G: DatasetGateway + 'static>(
    Extension(loader): Extension<Arc<DatasetLoader<G>>>,
) -> Json<OverviewResponse> {
    let loaded = loader.load_raw_tables().await;
    let combined = prepare_analysis(&loaded.tables);

    Json(OverviewResponse {
        source: loaded.provenance,
        loaded_at: loaded.loaded_at,
        stats: summary_statistics(&combined),
        quadrant_threshold: DEFAULT_QUADRANT_THRESHOLD,
        quadrants: viability_quadrants(&combined, DEFAULT_QUADRANT_THRESHOLD),
    })
}

pub(crate) async fn tasks_endpoint<G: DatasetGateway + 'static>(
    Extension(loader): Extension<Arc<DatasetLoader<G>>>,
    Query(query): Query<TaskQuery>,
) -> Json<TaskTableResponse> {
    let loaded = loader.load_raw_tables().await;
    let combined = prepare_analysis(&loaded.tables);
    let mut rows = filtered_rows(&combined, &query);

    let total = rows.len();
    if let Some(limit) = query.limit {
        rows.truncate(limit);
    }

    Json(TaskTableResponse {
        source: loaded.provenance,
        loaded_at: loaded.loaded_at,
        total,
        returned: rows.len(),
        tasks: rows,
    })
}

pub(crate) async fn export_endpoint<G: DatasetGateway + 'static>(
    Extension(loader): Extension<Arc<DatasetLoader<G>>>,
    Query(query): Query<TaskQuery>,
) -> Result<impl IntoResponse, AppError> {
    let loaded = loader.load_raw_tables().await;
    let combined = prepare_analysis(&loaded.tables);
    let mut rows = filtered_rows(&combined, &query);
    if let Some(limit) = query.limit {
        rows.truncate(limit);
    }

    let mut buffer = Vec::new();
    write_csv(&rows, &mut buffer)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"workbank_analysis.csv\"",
            ),
        ],
        buffer,
    ))
}

fn filtered_rows(combined: &[TaskAnalysisRow], query: &TaskQuery) -> Vec<TaskAnalysisRow> {
    let filter = filter_from_parts(
        query.domain.as_deref(),
        query.occupation.as_deref(),
        query.min_desire,
        query.max_desire,
    );
    let mut rows = apply_filter(combined, &filter);

    if let Some(key) = query.sort_by {
        let order = query.order.unwrap_or(SortOrder::Descending);
        sort_rows(&mut rows, key, order);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use workbank::dataset::{FetchError, TableCache};

    struct OfflineGateway;

    #[async_trait]
    impl DatasetGateway for OfflineGateway {
        async fn fetch_resource(&self, _repo: &str, path: &str) -> Result<Vec<u8>, FetchError> {
            Err(FetchError::Status {
                path: path.to_string(),
                status: 502,
            })
        }
    }

    fn offline_loader() -> Arc<DatasetLoader<OfflineGateway>> {
        Arc::new(DatasetLoader::new(
            OfflineGateway,
            "SALT-NLP/WORKBank",
            TableCache::new(Duration::from_secs(3600)),
        ))
    }

    #[tokio::test]
    async fn overview_endpoint_serves_fallback_statistics() {
        let Json(body) = overview_endpoint(Extension(offline_loader())).await;

        assert!(matches!(body.source, SourceProvenance::Fallback { .. }));
        assert_eq!(body.stats.total_tasks, 5);
        assert_eq!(body.stats.total_workers, 7);
        assert!(body.stats.avg_automation_desire.is_some());
        assert_eq!(body.quadrants.automation_ready, 3);
    }

    #[tokio::test]
    async fn tasks_endpoint_filters_sorts_and_limits() {
        let query = TaskQuery {
            sort_by: Some(SortKey::AutomationDesire),
            limit: Some(2),
            ..TaskQuery::default()
        };

        let Json(body) = tasks_endpoint(Extension(offline_loader()), Query(query)).await;

        assert_eq!(body.total, 5);
        assert_eq!(body.returned, 2);
        assert_eq!(body.tasks[0].task_id, "T003");
        assert!(body.tasks[0].automation_desire >= body.tasks[1].automation_desire);
    }

    #[tokio::test]
    async fn tasks_endpoint_applies_domain_filter() {
        let query = TaskQuery {
            domain: Some("Healthcare".to_string()),
            ..TaskQuery::default()
        };

        let Json(body) = tasks_endpoint(Extension(offline_loader()), Query(query)).await;

        assert_eq!(body.total, 1);
        assert_eq!(body.tasks[0].domain, "Healthcare");
    }

    #[tokio::test]
    async fn export_endpoint_returns_csv_with_headers() {
        let response = export_endpoint(Extension(offline_loader()), Query(TaskQuery::default()))
            .await
            .expect("export builds")
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .expect("content type set");
        assert_eq!(content_type, "text/csv; charset=utf-8");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let text = String::from_utf8(bytes.to_vec()).expect("csv is utf-8");
        assert!(text.starts_with("Task ID,Task,Occupation,Domain"));
        assert_eq!(text.lines().count(), 6, "header plus five tasks");
    }
}
