use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::time::deserialize_timestamp_flexible;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    Upload,
    Manual,
}

impl Default for CandidateSource {
    fn default() -> Self {
        CandidateSource::Manual
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_name: Option<String>,
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
    #[serde(deserialize_with = "deserialize_timestamp_flexible")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp_flexible")]
    pub updated_at: DateTime<Utc>,
}

impl Candidate {
    /// Case-insensitive substring match over name, alias, email, title and
    /// employee id. An empty query matches everything.
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            Some(self.full_name.as_str()),
            self.alias_name.as_deref(),
            Some(self.email.as_str()),
            self.current_title.as_deref(),
            self.employee_id.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|value| value.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_minimal_remote_payload() {
        let candidate: Candidate = serde_json::from_value(json!({
            "id": "3f1c",
            "full_name": "Jane Doe",
            "email": "jane.doe@example.com",
            "source": "upload",
            "cv_filepath": "jane.txt",
            "created_at": "2024-01-15T10:30:00",
            "updated_at": "2024-01-15T10:30:00Z"
        }))
        .unwrap();

        assert_eq!(candidate.source, CandidateSource::Upload);
        assert!(candidate.skills.is_empty());
        assert_eq!(candidate.created_at, candidate.updated_at);
        assert_eq!(candidate.phone, None);
    }

    fn jane() -> Candidate {
        Candidate {
            id: "1".into(),
            full_name: "Jane Doe".into(),
            alias_name: None,
            email: "jane.doe@example.com".into(),
            phone: None,
            current_title: None,
            manager: None,
            employee_id: None,
            education: None,
            skills: vec!["Rust".into()],
            summary: None,
            location: None,
            source: CandidateSource::Manual,
            cv_filepath: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn absent_optionals_are_not_serialized() {
        let candidate = jane();
        let value = serde_json::to_value(&candidate).unwrap();
        assert_eq!(value["source"], "manual");
        assert!(value.get("cv_filepath").is_none());
        assert!(value.get("alias_name").is_none());
    }

    #[test]
    fn search_matches_each_searchable_field() {
        let candidate = Candidate {
            alias_name: Some("JD".into()),
            current_title: Some("Platform Engineer".into()),
            employee_id: Some("EMP-042".into()),
            ..jane()
        };

        assert!(candidate.matches_search("jane"));
        assert!(candidate.matches_search("jd"));
        assert!(candidate.matches_search("@EXAMPLE.com"));
        assert!(candidate.matches_search("platform"));
        assert!(candidate.matches_search("emp-04"));
        assert!(candidate.matches_search(""));
        assert!(!candidate.matches_search("Rust"));
    }

    #[test]
    fn search_skips_absent_optional_fields() {
        let candidate = jane();
        assert!(!candidate.matches_search("engineer"));
        assert!(!candidate.matches_search("emp"));
    }
}
