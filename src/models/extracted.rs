use serde::{Deserialize, Serialize};

/// Names of the profile fields the extractor can fill, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateField {
    FullName,
    AliasName,
    Email,
    Phone,
    CurrentTitle,
    Manager,
    EmployeeId,
    Education,
    Skills,
    Summary,
    Location,
}

impl CandidateField {
    pub const ALL: [CandidateField; 11] = [
        CandidateField::FullName,
        CandidateField::AliasName,
        CandidateField::Email,
        CandidateField::Phone,
        CandidateField::CurrentTitle,
        CandidateField::Manager,
        CandidateField::EmployeeId,
        CandidateField::Education,
        CandidateField::Skills,
        CandidateField::Summary,
        CandidateField::Location,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateField::FullName => "full_name",
            CandidateField::AliasName => "alias_name",
            CandidateField::Email => "email",
            CandidateField::Phone => "phone",
            CandidateField::CurrentTitle => "current_title",
            CandidateField::Manager => "manager",
            CandidateField::EmployeeId => "employee_id",
            CandidateField::Education => "education",
            CandidateField::Skills => "skills",
            CandidateField::Summary => "summary",
            CandidateField::Location => "location",
        }
    }
}

impl std::fmt::Display for CandidateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient partial profile produced by CV extraction. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
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
    #[serde(default)]
    pub auto_populated_fields: Vec<CandidateField>,
}

impl ExtractedFields {
    pub fn is_present(&self, field: CandidateField) -> bool {
        match field {
            CandidateField::FullName => self.full_name.is_some(),
            CandidateField::AliasName => self.alias_name.is_some(),
            CandidateField::Email => self.email.is_some(),
            CandidateField::Phone => self.phone.is_some(),
            CandidateField::CurrentTitle => self.current_title.is_some(),
            CandidateField::Manager => self.manager.is_some(),
            CandidateField::EmployeeId => self.employee_id.is_some(),
            CandidateField::Education => self.education.is_some(),
            CandidateField::Skills => self.skills.is_some(),
            CandidateField::Summary => self.summary.is_some(),
            CandidateField::Location => self.location.is_some(),
        }
    }

    pub fn was_auto_populated(&self, field: CandidateField) -> bool {
        self.auto_populated_fields.contains(&field)
    }

    /// Sets a text field and records it as auto-populated. For `Skills` the
    /// text is read as a comma-separated list, the way the intake form edits it.
    pub fn set_text(&mut self, field: CandidateField, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            CandidateField::FullName => &mut self.full_name,
            CandidateField::AliasName => &mut self.alias_name,
            CandidateField::Email => &mut self.email,
            CandidateField::Phone => &mut self.phone,
            CandidateField::CurrentTitle => &mut self.current_title,
            CandidateField::Manager => &mut self.manager,
            CandidateField::EmployeeId => &mut self.employee_id,
            CandidateField::Education => &mut self.education,
            CandidateField::Summary => &mut self.summary,
            CandidateField::Location => &mut self.location,
            CandidateField::Skills => {
                self.set_skills(split_skills(&value));
                return;
            }
        };
        *slot = Some(value);
        self.mark(field);
    }

    pub fn set_skills(&mut self, skills: Vec<String>) {
        self.skills = Some(skills);
        self.mark(CandidateField::Skills);
    }

    fn mark(&mut self, field: CandidateField) {
        if !self.auto_populated_fields.contains(&field) {
            self.auto_populated_fields.push(field);
        }
    }
}

fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_serialize_as_snake_case_strings() {
        let fields = ExtractedFields {
            full_name: Some("Unknown Candidate".into()),
            email: Some("candidate@email.com".into()),
            auto_populated_fields: vec![CandidateField::FullName, CandidateField::Email],
            ..Default::default()
        };
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value["auto_populated_fields"], serde_json::json!(["full_name", "email"]));
        assert!(value.get("phone").is_none());
    }

    #[test]
    fn set_text_records_each_field_once() {
        let mut fields = ExtractedFields::default();
        fields.set_text(CandidateField::Email, "a@b.co");
        fields.set_text(CandidateField::Email, "c@d.co");
        assert_eq!(fields.email.as_deref(), Some("c@d.co"));
        assert_eq!(fields.auto_populated_fields, vec![CandidateField::Email]);
    }

    #[test]
    fn skills_given_as_text_are_split_on_commas() {
        let mut fields = ExtractedFields::default();
        fields.set_text(CandidateField::Skills, "Rust, SQL,, Docker ");
        assert_eq!(
            fields.skills,
            Some(vec!["Rust".to_string(), "SQL".to_string(), "Docker".to_string()])
        );
        assert!(fields.was_auto_populated(CandidateField::Skills));
    }

    #[test]
    fn display_matches_wire_name() {
        for field in CandidateField::ALL {
            let wire = serde_json::to_value(field).unwrap();
            assert_eq!(wire, field.to_string());
        }
    }
}
