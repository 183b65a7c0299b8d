use std::sync::Arc;

use crate::config::Config;
use crate::dto::candidate_dto::{CandidatePatch, NewCandidate};
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::models::cv_upload::CvUpload;
use crate::models::extracted::ExtractedFields;
use crate::services::extraction_service;
use crate::services::local_store::LocalStore;
use crate::services::record_store::RecordStore;
use crate::services::remote_store::RemoteStoreClient;

/// The operations the intake UI calls. Plain request/response: nothing here
/// refreshes views or holds state besides the store's mode flag.
#[derive(Clone, Debug)]
pub struct CandidateService {
    store: RecordStore,
}

impl CandidateService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let remote = RemoteStoreClient::new(
            &config.remote_base_url,
            config.request_timeout(),
            config.health_timeout(),
        )?;
        let local = LocalStore::new(&config.local_store_dir);
        Ok(Self::new(RecordStore::new(Arc::new(remote), local, true)))
    }

    /// Remote parser when reachable, local heuristics otherwise. A remote that
    /// answers with an error is reported, so the caller can warn and still
    /// show an empty form.
    pub async fn parse_cv(&self, upload: &CvUpload) -> Result<ExtractedFields> {
        match self.store.parse_cv_remote(upload).await {
            Ok(Some(fields)) => Ok(fields),
            Ok(None) => {
                tracing::info!(file = %upload.file_name, "Parsing CV locally");
                Ok(extraction_service::extract(upload))
            }
            Err(e) => {
                tracing::error!(file = %upload.file_name, error = %e, "CV parsing failed");
                Err(Error::Extraction(format!("CV parsing failed: {}", e)))
            }
        }
    }

    pub async fn check_backend_health(&self) -> bool {
        self.store.check_health().await
    }

    pub fn set_remote_mode(&self, use_remote: bool) {
        self.store.set_remote_mode(use_remote);
    }

    pub fn is_using_remote(&self) -> bool {
        self.store.is_using_remote()
    }

    pub async fn save_candidate(&self, payload: NewCandidate) -> Result<Candidate> {
        self.store.create(payload).await
    }

    pub async fn list_candidates(&self) -> Result<Vec<Candidate>> {
        self.store.list().await
    }

    /// Filters the full listing; an empty query returns every record.
    pub async fn search_candidates(&self, query: &str) -> Result<Vec<Candidate>> {
        let query = query.trim();
        let candidates = self.list_candidates().await?;
        Ok(candidates
            .into_iter()
            .filter(|c| c.matches_search(query))
            .collect())
    }

    pub async fn get_candidate(&self, id: &str) -> Result<Option<Candidate>> {
        self.store.get_by_id(id).await
    }

    pub async fn update_candidate(
        &self,
        id: &str,
        patch: CandidatePatch,
    ) -> Result<Option<Candidate>> {
        self.store.update(id, patch).await
    }

    pub fn ensure_sample_data(&self) -> Result<bool> {
        self.store.seed_sample_data()
    }
}
