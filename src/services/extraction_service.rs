//! Best-effort CV field extraction.
//!
//! Two tiers: sniff email, phone and name out of the text when the upload
//! can be read as text, otherwise fall back to canned profiles keyed on the
//! file name. Extraction never fails; the intake form is always shown.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::cv_upload::CvUpload;
use crate::models::extracted::{CandidateField, ExtractedFields};

/// Lines at the top of the text considered for the candidate name.
const NAME_SCAN_LINES: usize = 5;
const MAX_SKILLS: usize = 10;
const MAX_TITLE_LEN: usize = 50;

lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();

    static ref PHONE: Regex =
        Regex::new(r"[+]?[1-9]?[-.\s]?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}").unwrap();

    static ref NAME_LINE: Regex = Regex::new(r"^[A-Za-z\s]+$").unwrap();

    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    static ref EDUCATION: Vec<Regex> = [
        r"(?i)\b(Bachelor[^.]*?(?:Computer Science|Engineering|Business|Arts|Science)[^.]*)",
        r"(?i)\b(Master[^.]*?(?:Computer Science|Engineering|Business|Arts|Science)[^.]*)",
        r"(?i)\b(PhD[^.]*?(?:Computer Science|Engineering|Business|Arts|Science)[^.]*)",
        r"(?i)\b(B\.?S\.?[^.]*?(?:Computer Science|Engineering|Business)[^.]*)",
        r"(?i)\b(M\.?S\.?[^.]*?(?:Computer Science|Engineering|Business)[^.]*)",
        r"(?i)\b(MBA[^.]*)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref LOCATION: Vec<Regex> = [
        r"([A-Z][a-z]+,\s*[A-Z]{2})\b",
        r"([A-Z][a-z]+,\s*[A-Z][a-z]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref SKILLS: Vec<(&'static str, Regex)> = SKILL_KEYWORDS
        .iter()
        .map(|skill| (*skill, keyword_regex(skill)))
        .collect();

    static ref TITLES: Vec<Regex> = TITLE_KEYWORDS
        .iter()
        .map(|title| keyword_regex(title))
        .collect();
}

const SKILL_KEYWORDS: &[&str] = &[
    "JavaScript", "Python", "Java", "React", "Node.js", "SQL", "HTML", "CSS",
    "Angular", "Vue.js", "TypeScript", "PHP", "C++", "C#", ".NET", "Ruby",
    "Go", "Rust", "Swift", "Kotlin", "Flutter", "Django", "Flask", "Spring",
    "Express", "MongoDB", "PostgreSQL", "MySQL", "Redis", "Docker", "Kubernetes",
    "AWS", "Azure", "GCP", "Git", "Jenkins", "CI/CD", "Agile", "Scrum",
    "Machine Learning", "AI", "Data Science", "Analytics", "Tableau", "PowerBI",
    "Photoshop", "Illustrator", "Figma", "Sketch", "UI/UX", "Design",
    "Project Management", "Leadership", "Communication", "Problem Solving",
];

const TITLE_KEYWORDS: &[&str] = &[
    "Software Engineer", "Developer", "Programmer", "Architect", "Manager",
    "Director", "Lead", "Senior", "Junior", "Principal", "Staff",
    "Data Scientist", "Analyst", "Designer", "Product Manager", "Project Manager",
    "DevOps", "QA", "Tester", "Consultant", "Specialist", "Coordinator",
];

/// Case-insensitive whole-word match that also works for keywords such as
/// `C++` or `.NET` whose edges are not word characters.
fn keyword_regex(keyword: &str) -> Regex {
    let pattern = format!(
        r"(?i)(?:^|[^A-Za-z0-9]){}(?:$|[^A-Za-z0-9+#])",
        regex::escape(keyword)
    );
    Regex::new(&pattern).unwrap()
}

/// Extracts what it can from an upload. Text content wins; otherwise the
/// file name selects a canned profile.
pub fn extract(upload: &CvUpload) -> ExtractedFields {
    match upload.read_text() {
        Ok(text) if !text.is_empty() => extract_from_text(&text),
        Ok(_) => {
            tracing::debug!(file = %upload.file_name, "CV is empty, using filename fallback");
            extract_from_filename(&upload.file_name)
        }
        Err(e) => {
            tracing::debug!(file = %upload.file_name, error = %e, "CV not readable as text, using filename fallback");
            extract_from_filename(&upload.file_name)
        }
    }
}

/// Email, then phone, then a name from the first few lines.
pub fn extract_from_text(text: &str) -> ExtractedFields {
    let mut fields = ExtractedFields::default();

    if let Some(m) = EMAIL.find(text) {
        fields.set_text(CandidateField::Email, m.as_str());
    }

    if let Some(m) = PHONE.find(text) {
        fields.set_text(CandidateField::Phone, m.as_str());
    }

    if let Some(name) = find_name(text) {
        fields.set_text(CandidateField::FullName, name);
    }

    fields
}

fn find_name(text: &str) -> Option<&str> {
    text.split('\n')
        .take(NAME_SCAN_LINES)
        .map(str::trim)
        .find(|line| {
            let len = line.chars().count();
            len > 3 && len < 50 && NAME_LINE.is_match(line)
        })
}

pub fn extract_from_filename(file_name: &str) -> ExtractedFields {
    let lowered = file_name.to_lowercase();
    if lowered.contains("john") || lowered.contains("developer") {
        demo_profile()
    } else {
        unknown_profile()
    }
}

fn demo_profile() -> ExtractedFields {
    ExtractedFields {
        full_name: Some("John Smith".into()),
        alias_name: Some("Johnny".into()),
        email: Some("john.smith@email.com".into()),
        phone: Some("+1 (555) 123-4567".into()),
        current_title: Some("Senior Software Developer".into()),
        manager: Some("Sarah Johnson".into()),
        employee_id: Some("EMP001".into()),
        education: Some("Bachelor of Computer Science, University of Technology (2018)".into()),
        skills: Some(
            ["JavaScript", "React", "Node.js", "Python", "SQL", "AWS"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        ),
        summary: Some(
            "Experienced software developer with 5+ years of experience in full-stack development."
                .into(),
        ),
        location: Some("San Francisco, CA".into()),
        auto_populated_fields: CandidateField::ALL.to_vec(),
    }
}

fn unknown_profile() -> ExtractedFields {
    ExtractedFields {
        full_name: Some("Unknown Candidate".into()),
        email: Some("candidate@email.com".into()),
        auto_populated_fields: vec![CandidateField::FullName, CandidateField::Email],
        ..Default::default()
    }
}

/// Server-side enrichment: keyword heuristics for the fields the client-side
/// extractor does not attempt. Only fills fields that are still unset.
pub fn enrich_from_text(text: &str, fields: &mut ExtractedFields) {
    let flat = WHITESPACE.replace_all(text, " ");
    let flat = flat.trim();

    if fields.skills.is_none() {
        let skills: Vec<String> = SKILLS
            .iter()
            .filter(|(_, re)| re.is_match(flat))
            .map(|(skill, _)| skill.to_string())
            .take(MAX_SKILLS)
            .collect();
        if !skills.is_empty() {
            fields.set_skills(skills);
        }
    }

    if fields.education.is_none() {
        if let Some(education) = EDUCATION
            .iter()
            .find_map(|re| re.captures(flat).map(|c| c[1].trim().to_string()))
        {
            fields.set_text(CandidateField::Education, education);
        }
    }

    if fields.current_title.is_none() {
        if let Some(title) = find_title(text) {
            fields.set_text(CandidateField::CurrentTitle, title);
        }
    }

    if fields.location.is_none() {
        if let Some(location) = LOCATION
            .iter()
            .find_map(|re| re.captures(flat).map(|c| c[1].to_string()))
        {
            fields.set_text(CandidateField::Location, location);
        }
    }

    if fields.summary.is_none() && fields.auto_populated_fields.len() >= 3 {
        if let Some(summary) = build_summary(fields) {
            fields.set_text(CandidateField::Summary, summary);
        }
    }
}

fn find_title(text: &str) -> Option<String> {
    TITLES.iter().find_map(|re| {
        text.lines()
            .map(str::trim)
            .find(|line| line.len() < MAX_TITLE_LEN && re.is_match(line))
            .map(str::to_string)
    })
}

fn build_summary(fields: &ExtractedFields) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(title) = &fields.current_title {
        parts.push(format!("Experienced {}", title.to_lowercase()));
    }
    if let Some(skills) = fields.skills.as_ref().filter(|s| !s.is_empty()) {
        let top: Vec<&str> = skills.iter().take(3).map(String::as_str).collect();
        parts.push(format!("with expertise in {}", top.join(", ")));
    }
    if let Some(education) = &fields.education {
        parts.push(format!("holding {}", education));
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!("{}.", parts.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv_upload::TEXT_PLAIN;

    fn text_upload(name: &str, body: &str) -> CvUpload {
        CvUpload::new(name, Some(TEXT_PLAIN.into()), body.to_string())
    }

    fn binary_upload(name: &str) -> CvUpload {
        CvUpload::new(name, Some("application/pdf".into()), b"%PDF-1.7".to_vec())
    }

    #[test]
    fn finds_email_in_text() {
        let fields = extract(&text_upload(
            "cv.txt",
            "Contact me at jane.doe@example.com for details",
        ));
        assert_eq!(fields.email.as_deref(), Some("jane.doe@example.com"));
        assert!(fields.was_auto_populated(CandidateField::Email));
    }

    #[test]
    fn finds_phone_and_name() {
        let fields = extract_from_text("Jane Doe\nSenior Engineer\nPhone: (555) 123-4567\n");
        assert_eq!(fields.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(fields.phone.as_deref(), Some(" (555) 123-4567"));
        assert_eq!(
            fields.auto_populated_fields,
            vec![CandidateField::Phone, CandidateField::FullName]
        );
    }

    #[test]
    fn plain_dashed_phone_is_found() {
        let fields = extract_from_text("call 555-123-4567 anytime");
        assert_eq!(fields.phone.as_deref(), Some(" 555-123-4567"));
    }

    #[test]
    fn first_qualifying_line_wins() {
        let fields = extract_from_text("CV\nJane Doe\nJohn Smith\n");
        assert_eq!(fields.full_name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn name_is_only_searched_in_first_five_lines() {
        let text = "1\n2\n3\n4\n5\nJane Doe\n";
        let fields = extract_from_text(text);
        assert_eq!(fields.full_name, None);
        assert!(!fields.was_auto_populated(CandidateField::FullName));
    }

    #[test]
    fn name_length_bounds_are_exclusive() {
        assert_eq!(extract_from_text("Ann\n").full_name, None);
        assert_eq!(extract_from_text("Anna\n").full_name.as_deref(), Some("Anna"));
        let long = "A".repeat(50);
        assert_eq!(extract_from_text(&long).full_name, None);
        let just_under = "A".repeat(49);
        assert_eq!(
            extract_from_text(&just_under).full_name.as_deref(),
            Some(just_under.as_str())
        );
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        // U+3000 is three bytes in UTF-8: 49 chars, 51 bytes.
        let wide = format!("{}\u{3000}{}", "A".repeat(24), "B".repeat(24));
        assert_eq!(
            extract_from_text(&wide).full_name.as_deref(),
            Some(wide.as_str())
        );
        let too_long = format!("{}\u{3000}{}", "A".repeat(24), "B".repeat(25));
        assert_eq!(extract_from_text(&too_long).full_name, None);
    }

    #[test]
    fn name_line_with_digits_or_punctuation_is_skipped() {
        let fields = extract_from_text("Jane Doe, PhD\nR2 D2 Unit\n");
        assert_eq!(fields.full_name, None);
    }

    #[test]
    fn text_without_matches_yields_empty_result() {
        let fields = extract(&text_upload("notes.txt", "-- 42 --"));
        assert_eq!(fields, ExtractedFields::default());
    }

    #[test]
    fn binary_developer_resume_gets_demo_profile() {
        let fields = extract(&binary_upload("developer_resume.pdf"));
        assert_eq!(fields.full_name.as_deref(), Some("John Smith"));
        assert_eq!(fields.auto_populated_fields, CandidateField::ALL.to_vec());
        for field in CandidateField::ALL {
            assert!(fields.is_present(field), "{} should be set", field);
        }
    }

    #[test]
    fn filename_keyword_is_case_insensitive() {
        let fields = extract(&binary_upload("JOHN_CV.PDF"));
        assert_eq!(fields.employee_id.as_deref(), Some("EMP001"));
    }

    #[test]
    fn unknown_binary_gets_minimal_profile() {
        let fields = extract(&binary_upload("random.pdf"));
        assert_eq!(
            fields,
            ExtractedFields {
                full_name: Some("Unknown Candidate".into()),
                email: Some("candidate@email.com".into()),
                auto_populated_fields: vec![CandidateField::FullName, CandidateField::Email],
                ..Default::default()
            }
        );
    }

    #[test]
    fn empty_text_file_falls_back_to_filename() {
        let fields = extract(&text_upload("john.txt", ""));
        assert_eq!(fields.full_name.as_deref(), Some("John Smith"));
    }

    #[test]
    fn listed_fields_are_always_present() {
        let inputs = [
            extract(&text_upload("a.txt", "Jane Doe\njane@doe.io\n+1 555 123 4567")),
            extract(&binary_upload("developer.docx")),
            extract(&binary_upload("scan.png")),
        ];
        for fields in inputs {
            for field in &fields.auto_populated_fields {
                assert!(fields.is_present(*field), "{} listed but unset", field);
            }
        }
    }

    #[test]
    fn enrichment_fills_keyword_fields() {
        let text = "Jane Doe\nSenior Software Engineer\nAustin, TX\n\
                    Skills: Rust, Python, Docker and Kubernetes.\n\
                    Bachelor of Science in Computer Science, State University.\n";
        let mut fields = extract_from_text(text);
        enrich_from_text(text, &mut fields);

        assert_eq!(
            fields.skills,
            Some(vec![
                "Python".to_string(),
                "Rust".to_string(),
                "Docker".to_string(),
                "Kubernetes".to_string(),
            ])
        );
        assert_eq!(fields.current_title.as_deref(), Some("Senior Software Engineer"));
        assert_eq!(fields.location.as_deref(), Some("Austin, TX"));
        assert!(fields
            .education
            .as_deref()
            .unwrap()
            .starts_with("Bachelor of Science in Computer Science"));
        assert!(fields
            .summary
            .as_deref()
            .unwrap()
            .starts_with("Experienced senior software engineer with expertise in Python, Rust, Docker"));
        for field in &fields.auto_populated_fields {
            assert!(fields.is_present(*field));
        }
    }

    #[test]
    fn skill_keywords_match_whole_words_only() {
        let mut fields = ExtractedFields::default();
        enrich_from_text("A good email about ruby gems and C++", &mut fields);
        assert_eq!(fields.skills, Some(vec!["C++".to_string(), "Ruby".to_string()]));
    }

    #[test]
    fn enrichment_keeps_existing_values() {
        let mut fields = ExtractedFields::default();
        fields.set_text(CandidateField::Location, "Remote");
        enrich_from_text("Lives in Seattle, WA", &mut fields);
        assert_eq!(fields.location.as_deref(), Some("Remote"));
    }
}
