use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::dto::candidate_dto::{CandidatePatch, NewCandidate};
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateSource};
use crate::utils::time::{from_rfc3339, now};

pub const STORAGE_KEY: &str = "hr_candidates";

/// On-device store: one named slot holding a JSON array of candidates.
/// A missing slot reads as an empty array.
pub struct LocalStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", STORAGE_KEY)),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> Result<Vec<Candidate>> {
        match fs::read(&self.path) {
            Ok(raw) if raw.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(raw) => Ok(serde_json::from_slice(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn get(&self, id: &str) -> Result<Option<Candidate>> {
        Ok(self.list()?.into_iter().find(|c| c.id == id))
    }

    pub fn create(&self, payload: NewCandidate) -> Result<Candidate> {
        let _guard = self.lock()?;
        let mut candidates = self.list()?;
        let candidate = payload.into_candidate(Uuid::new_v4().to_string(), now());
        candidates.push(candidate.clone());
        self.write(&candidates)?;
        Ok(candidate)
    }

    pub fn update(&self, id: &str, patch: CandidatePatch) -> Result<Option<Candidate>> {
        let _guard = self.lock()?;
        let mut candidates = self.list()?;
        let Some(candidate) = candidates.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        patch.apply_to(candidate);
        let updated = candidate.clone();
        self.write(&candidates)?;
        Ok(Some(updated))
    }

    /// Writes the demonstration records, but only into an empty slot.
    /// Returns whether anything was written.
    pub fn seed(&self) -> Result<bool> {
        let _guard = self.lock()?;
        if !self.list()?.is_empty() {
            return Ok(false);
        }
        self.write(&sample_candidates()?)?;
        Ok(true)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| Error::Internal("Local store lock poisoned".to_string()))
    }

    fn write(&self, candidates: &[Candidate]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(candidates)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn sample_candidates() -> Result<Vec<Candidate>> {
    let emily_ts = from_rfc3339("2024-01-15T10:30:00Z").map_err(|e| Error::Internal(e.to_string()))?;
    let michael_ts = from_rfc3339("2024-01-16T14:20:00Z").map_err(|e| Error::Internal(e.to_string()))?;

    Ok(vec![
        Candidate {
            id: "1".into(),
            full_name: "Emily Rodriguez".into(),
            alias_name: Some("Em".into()),
            email: "emily.rodriguez@email.com".into(),
            phone: Some("+1 (555) 234-5678".into()),
            current_title: Some("UX Designer".into()),
            manager: Some("David Kim".into()),
            employee_id: Some("EMP101".into()),
            education: Some("Bachelor of Fine Arts in Graphic Design, Art Institute (2020)".into()),
            skills: ["Figma", "Adobe Creative Suite", "User Research", "Prototyping", "HTML/CSS"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            summary: Some("Creative UX designer with 3+ years of experience creating user-centered designs. Passionate about accessibility and inclusive design practices.".into()),
            location: Some("Austin, TX".into()),
            source: CandidateSource::Upload,
            cv_filepath: Some("emily_rodriguez_resume.pdf".into()),
            created_at: emily_ts,
            updated_at: emily_ts,
        },
        Candidate {
            id: "2".into(),
            full_name: "Michael Chen".into(),
            alias_name: Some("Mike".into()),
            email: "michael.chen@email.com".into(),
            phone: Some("+1 (555) 345-6789".into()),
            current_title: Some("Data Scientist".into()),
            manager: Some("Jennifer Liu".into()),
            employee_id: Some("EMP102".into()),
            education: Some("PhD in Statistics, Stanford University (2021)".into()),
            skills: ["Python", "R", "Machine Learning", "SQL", "TensorFlow", "Statistics"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            summary: Some("Data scientist with expertise in machine learning and statistical analysis. 4+ years of experience in predictive modeling and data visualization.".into()),
            location: Some("Seattle, WA".into()),
            source: CandidateSource::Manual,
            cv_filepath: None,
            created_at: michael_ts,
            updated_at: michael_ts,
        },
    ])
}
