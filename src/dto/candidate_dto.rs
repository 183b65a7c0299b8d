use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::candidate::{Candidate, CandidateSource};
use crate::utils::time::next_update_timestamp;

/// Candidate as submitted from the intake form: everything except the id and
/// the timestamps, which are assigned on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_new_candidate_source"))]
pub struct NewCandidate {
    #[validate(custom(function = "not_blank"))]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub source: CandidateSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_filepath: Option<String>,
}

/// Required text fields must carry something besides whitespace.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    Ok(())
}

fn validate_new_candidate_source(payload: &NewCandidate) -> Result<(), ValidationError> {
    if payload.source == CandidateSource::Manual && payload.cv_filepath.is_some() {
        let mut err = ValidationError::new("cv_filepath_on_manual");
        err.message = Some("cv_filepath is only allowed for uploaded candidates".into());
        return Err(err);
    }
    Ok(())
}

impl NewCandidate {
    pub fn manual(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            alias_name: None,
            email: email.into(),
            phone: None,
            current_title: None,
            manager: None,
            employee_id: None,
            education: None,
            skills: Vec::new(),
            summary: None,
            location: None,
            source: CandidateSource::Manual,
            cv_filepath: None,
        }
    }

    pub fn into_candidate(self, id: String, created_at: DateTime<Utc>) -> Candidate {
        Candidate {
            id,
            full_name: self.full_name,
            alias_name: self.alias_name,
            email: self.email,
            phone: self.phone,
            current_title: self.current_title,
            manager: self.manager,
            employee_id: self.employee_id,
            education: self.education,
            skills: self.skills,
            summary: self.summary,
            location: self.location,
            source: self.source,
            cv_filepath: self.cv_filepath,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Partial update. Present fields replace the stored ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CandidatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<CandidateSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_filepath: Option<String>,
}

impl CandidatePatch {
    /// Merges the patch into `candidate`, leaving `id` and `created_at` alone
    /// and moving `updated_at` strictly forward.
    pub fn apply_to(self, candidate: &mut Candidate) {
        fn replace<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }
        fn replace_opt<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        replace(&mut candidate.full_name, self.full_name);
        replace_opt(&mut candidate.alias_name, self.alias_name);
        replace(&mut candidate.email, self.email);
        replace_opt(&mut candidate.phone, self.phone);
        replace_opt(&mut candidate.current_title, self.current_title);
        replace_opt(&mut candidate.manager, self.manager);
        replace_opt(&mut candidate.employee_id, self.employee_id);
        replace_opt(&mut candidate.education, self.education);
        replace(&mut candidate.skills, self.skills);
        replace_opt(&mut candidate.summary, self.summary);
        replace_opt(&mut candidate.location, self.location);
        replace(&mut candidate.source, self.source);
        replace_opt(&mut candidate.cv_filepath, self.cv_filepath);

        if candidate.source == CandidateSource::Manual {
            candidate.cv_filepath = None;
        }
        candidate.updated_at = next_update_timestamp(candidate.updated_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::now;

    fn uploaded() -> NewCandidate {
        NewCandidate {
            source: CandidateSource::Upload,
            cv_filepath: Some("jane_doe.txt".into()),
            skills: vec!["Rust".into(), "SQL".into()],
            ..NewCandidate::manual("Jane Doe", "jane.doe@example.com")
        }
    }

    #[test]
    fn manual_candidate_with_cv_path_is_invalid() {
        let mut payload = NewCandidate::manual("Jane Doe", "jane.doe@example.com");
        assert!(payload.validate().is_ok());
        payload.cv_filepath = Some("cv.pdf".into());
        assert!(payload.validate().is_err());
    }

    #[test]
    fn empty_name_is_invalid() {
        let payload = NewCandidate::manual("", "jane.doe@example.com");
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("full_name"));
    }

    #[test]
    fn whitespace_only_required_fields_are_invalid() {
        let payload = NewCandidate::manual("   ", "\t\n");
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("full_name"));
        assert!(errors.field_errors().contains_key("email"));

        let patch = CandidatePatch {
            full_name: Some(" ".into()),
            ..Default::default()
        };
        let errors = patch.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("full_name"));
        assert!(CandidatePatch::default().validate().is_ok());
    }

    #[test]
    fn new_candidate_starts_with_equal_timestamps() {
        let created = now();
        let candidate = uploaded().into_candidate("abc".into(), created);
        assert_eq!(candidate.created_at, candidate.updated_at);
        assert_eq!(candidate.cv_filepath.as_deref(), Some("jane_doe.txt"));
    }

    #[test]
    fn patch_keeps_identity_and_untouched_fields() {
        let mut candidate = uploaded().into_candidate("abc".into(), now());
        let created = candidate.created_at;

        CandidatePatch {
            current_title: Some("Staff Engineer".into()),
            ..Default::default()
        }
        .apply_to(&mut candidate);

        assert_eq!(candidate.id, "abc");
        assert_eq!(candidate.created_at, created);
        assert!(candidate.updated_at > created);
        assert_eq!(candidate.current_title.as_deref(), Some("Staff Engineer"));
        assert_eq!(candidate.skills, vec!["Rust".to_string(), "SQL".to_string()]);
    }

    #[test]
    fn switching_to_manual_drops_cv_path() {
        let mut candidate = uploaded().into_candidate("abc".into(), now());
        CandidatePatch {
            source: Some(CandidateSource::Manual),
            ..Default::default()
        }
        .apply_to(&mut candidate);
        assert_eq!(candidate.cv_filepath, None);
    }

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        let value = serde_json::to_value(CandidatePatch::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
