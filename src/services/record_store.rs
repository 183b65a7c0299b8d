//! Record Store Adapter: remote record service first, on-device slot when the
//! remote cannot be reached.
//!
//! Only connection-class failures fall back and switch the mode. A reachable
//! remote that rejects a write or a CV parse (validation, server error) is
//! reported to the caller as is; a rejected read serves the local records.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::dto::candidate_dto::{CandidatePatch, NewCandidate};
use crate::error::Result;
use crate::models::candidate::Candidate;
use crate::models::cv_upload::CvUpload;
use crate::models::extracted::ExtractedFields;
use crate::services::local_store::LocalStore;
use crate::services::remote_store::RemoteRecords;
use crate::utils::validation::validate;

#[derive(Clone)]
pub struct RecordStore {
    remote: Arc<dyn RemoteRecords>,
    local: Arc<LocalStore>,
    use_remote: Arc<AtomicBool>,
}

impl RecordStore {
    pub fn new(remote: Arc<dyn RemoteRecords>, local: LocalStore, use_remote: bool) -> Self {
        Self {
            remote,
            local: Arc::new(local),
            use_remote: Arc::new(AtomicBool::new(use_remote)),
        }
    }

    pub fn is_using_remote(&self) -> bool {
        self.use_remote.load(Ordering::SeqCst)
    }

    pub fn set_remote_mode(&self, use_remote: bool) {
        self.use_remote.store(use_remote, Ordering::SeqCst);
    }

    pub fn local(&self) -> &LocalStore {
        &self.local
    }

    /// Probes the remote and records the outcome in the mode flag.
    pub async fn check_health(&self) -> bool {
        match self.remote.health().await {
            Ok(()) => {
                self.set_remote_mode(true);
                true
            }
            Err(e) => {
                tracing::info!(error = %e, "Remote health check failed, using local storage");
                self.set_remote_mode(false);
                false
            }
        }
    }

    /// Passes connection-class failures back as `None` after switching to
    /// local mode; every other outcome is returned unchanged.
    fn fallback_on_connection<T>(&self, op: &str, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_connection() => {
                tracing::warn!(operation = op, error = %e, "Remote unreachable, falling back to local storage");
                self.set_remote_mode(false);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Reads never hide locally held records. A connection failure switches
    /// to local mode; any other remote error is logged and the mode is kept.
    fn serve_local_on_read_error<T>(&self, op: &str, result: Result<T>) -> Option<T> {
        match self.fallback_on_connection(op, result) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(operation = op, error = %e, "Remote read failed, serving local records");
                None
            }
        }
    }

    pub async fn parse_cv_remote(&self, upload: &CvUpload) -> Result<Option<ExtractedFields>> {
        if !self.is_using_remote() {
            return Ok(None);
        }
        let result = self.remote.parse_cv(upload).await;
        self.fallback_on_connection("parse_cv", result)
    }

    pub async fn list(&self) -> Result<Vec<Candidate>> {
        let local = self.local.list()?;
        if !self.is_using_remote() {
            return Ok(local);
        }

        let result = self.remote.list().await;
        let Some(mut merged) = self.serve_local_on_read_error("list", result) else {
            return Ok(local);
        };
        let remote_ids: HashSet<String> = merged.iter().map(|c| c.id.clone()).collect();
        merged.extend(local.into_iter().filter(|c| !remote_ids.contains(&c.id)));
        Ok(merged)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Candidate>> {
        if self.is_using_remote() {
            match self.remote.get(id).await {
                Ok(candidate) => return Ok(Some(candidate)),
                Err(e) if e.is_not_found() => {}
                Err(e) => {
                    self.serve_local_on_read_error("get", Err::<Candidate, _>(e));
                }
            }
        }
        self.local.get(id)
    }

    pub async fn create(&self, payload: NewCandidate) -> Result<Candidate> {
        validate(&payload)?;

        if self.is_using_remote() {
            let result = self.remote.create(&payload).await;
            if let Some(candidate) = self.fallback_on_connection("create", result)? {
                tracing::info!(id = %candidate.id, "Candidate saved remotely");
                return Ok(candidate);
            }
        }

        let candidate = self.local.create(payload)?;
        tracing::info!(id = %candidate.id, "Candidate saved locally");
        Ok(candidate)
    }

    pub async fn update(&self, id: &str, patch: CandidatePatch) -> Result<Option<Candidate>> {
        validate(&patch)?;

        if self.is_using_remote() {
            match self.remote.update(id, &patch).await {
                Ok(candidate) => return Ok(Some(candidate)),
                // Records saved during an outage only exist locally.
                Err(e) if e.is_not_found() => {}
                Err(e) => {
                    self.fallback_on_connection("update", Err::<Candidate, _>(e))?;
                }
            }
        }

        let updated = self.local.update(id, patch)?;
        if updated.is_none() {
            tracing::debug!(id, "Candidate not found locally");
        }
        Ok(updated)
    }

    pub fn seed_sample_data(&self) -> Result<bool> {
        let seeded = self.local.seed()?;
        if seeded {
            tracing::info!("Seeded local storage with sample candidates");
        }
        Ok(seeded)
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("local", &self.local.path())
            .field("use_remote", &self.is_using_remote())
            .finish()
    }
}
