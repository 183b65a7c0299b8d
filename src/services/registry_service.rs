use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dto::candidate_dto::{CandidatePatch, NewCandidate};
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::utils::time::now;

/// Candidate registry behind the HTTP service. In memory, creation order.
#[derive(Clone, Default)]
pub struct RegistryService {
    candidates: Arc<RwLock<Vec<Candidate>>>,
}

impl RegistryService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, payload: NewCandidate) -> Result<Candidate> {
        let candidate = payload.into_candidate(Uuid::new_v4().to_string(), now());
        self.candidates.write().await.push(candidate.clone());
        tracing::info!(id = %candidate.id, "Candidate registered");
        Ok(candidate)
    }

    pub async fn list(&self) -> Vec<Candidate> {
        self.candidates.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Result<Candidate> {
        self.candidates
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))
    }

    pub async fn update(&self, id: &str, patch: CandidatePatch) -> Result<Candidate> {
        let mut candidates = self.candidates.write().await;
        let candidate = candidates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;
        patch.apply_to(candidate);
        Ok(candidate.clone())
    }
}
