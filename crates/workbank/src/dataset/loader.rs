use super::cache::TableCache;
use super::fallback::fallback_tables;
use super::fetch::{DatasetGateway, HuggingFaceGateway};
use super::schema::{
    self, ExpertRating, RawTables, TaskMetadata, WorkerResponse, EXPERT_COLUMNS, EXPERT_RESOURCE,
    TASK_COLUMNS, TASK_RESOURCE, WORKER_COLUMNS, WORKER_RESOURCE,
};
use super::DatasetError;
use crate::config::DatasetConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// Which path produced the tables. Callers branch on this for reporting
/// only; the tables themselves are schema-identical either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceProvenance {
    Remote,
    Fallback { reason: String },
}

/// The three raw tables plus where they came from and when.
#[derive(Debug, Clone)]
pub struct LoadedTables {
    pub tables: RawTables,
    pub provenance: SourceProvenance,
    pub loaded_at: DateTime<Utc>,
}

/// Loads the survey tables from the dataset repository, substituting the
/// built-in fallback set when the remote path fails for any reason. Owns the
/// remote-fetch cache; fallback results are never cached.
pub struct DatasetLoader<G> {
    gateway: G,
    repo: String,
    cache: TableCache,
}

impl DatasetLoader<HuggingFaceGateway> {
    /// Production loader: Hugging Face transport with the configured request
    /// timeout and cache window.
    pub fn from_config(config: &DatasetConfig) -> Result<Self, DatasetError> {
        let gateway = HuggingFaceGateway::new(config.fetch_timeout)?;
        Ok(Self::new(
            gateway,
            config.repo.clone(),
            TableCache::new(config.cache_ttl),
        ))
    }
}

impl<G: DatasetGateway> DatasetLoader<G> {
    pub fn new(gateway: G, repo: impl Into<String>, cache: TableCache) -> Self {
        Self {
            gateway,
            repo: repo.into(),
            cache,
        }
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Obtain the three raw tables. Infallible by contract: any remote
    /// failure is logged and converted into the fallback set.
    pub async fn load_raw_tables(&self) -> LoadedTables {
        if let Some(tables) = self.cache.get(&self.repo) {
            return LoadedTables {
                tables,
                provenance: SourceProvenance::Remote,
                loaded_at: Utc::now(),
            };
        }

        match self.fetch_all().await {
            Ok(tables) => {
                info!(
                    repo = %self.repo,
                    worker_rows = tables.worker.len(),
                    expert_rows = tables.expert.len(),
                    task_rows = tables.task.len(),
                    "loaded survey tables from remote dataset"
                );
                self.cache.store(&self.repo, tables.clone());
                LoadedTables {
                    tables,
                    provenance: SourceProvenance::Remote,
                    loaded_at: Utc::now(),
                }
            }
            Err(err) => {
                let reason = err.to_string();
                let tables = fallback_tables();
                warn!(
                    repo = %self.repo,
                    %reason,
                    worker_rows = tables.worker.len(),
                    expert_rows = tables.expert.len(),
                    task_rows = tables.task.len(),
                    "remote dataset unavailable, using built-in sample tables"
                );
                LoadedTables {
                    tables,
                    provenance: SourceProvenance::Fallback { reason },
                    loaded_at: Utc::now(),
                }
            }
        }
    }

    async fn fetch_all(&self) -> Result<RawTables, DatasetError> {
        let worker_bytes = self.gateway.fetch_resource(&self.repo, WORKER_RESOURCE).await?;
        let expert_bytes = self.gateway.fetch_resource(&self.repo, EXPERT_RESOURCE).await?;
        let task_bytes = self.gateway.fetch_resource(&self.repo, TASK_RESOURCE).await?;

        let worker: Vec<WorkerResponse> =
            schema::parse_rows(WORKER_RESOURCE, WORKER_COLUMNS, &worker_bytes)?;
        let expert: Vec<ExpertRating> =
            schema::parse_rows(EXPERT_RESOURCE, EXPERT_COLUMNS, &expert_bytes)?;
        let task: Vec<TaskMetadata> = schema::parse_rows(TASK_RESOURCE, TASK_COLUMNS, &task_bytes)?;

        Ok(RawTables {
            worker,
            expert,
            task,
        })
    }
}
