use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use validator::Validate;

/// The literal value meaning "no restriction" in a posting's major or grade
/// eligibility list.
pub const ANY_SENTINEL: &str = "무관";

/// Raw student profile exactly as the external store holds it
///
/// Every field is optional: the store is written by an upstream scraper and
/// records arrive with fields missing or empty. Validation happens when a
/// record is promoted to a [`StudentProfile`].
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProfileRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub majors: Option<Vec<String>>,
    #[serde(default)]
    pub grade: Option<i16>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub active: Option<bool>,
}

/// A profile record that failed promotion to a [`StudentProfile`]
#[derive(Debug, Error)]
#[error("required field `{field}` missing or empty")]
pub struct IncompleteRecord {
    pub field: &'static str,
}

/// Validated student profile used by matching and notification
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StudentProfile {
    #[validate(email)]
    pub email: String,
    pub name: String,
    #[validate(length(min = 1))]
    pub majors: Vec<String>,
    pub grade: u8,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TryFrom<ProfileRecord> for StudentProfile {
    type Error = IncompleteRecord;

    fn try_from(record: ProfileRecord) -> Result<Self, Self::Error> {
        let email = record
            .email
            .filter(|v| !v.is_empty())
            .ok_or(IncompleteRecord { field: "email" })?;
        let name = record
            .name
            .filter(|v| !v.is_empty())
            .ok_or(IncompleteRecord { field: "name" })?;
        let majors = record
            .majors
            .filter(|v| !v.is_empty())
            .ok_or(IncompleteRecord { field: "majors" })?;
        let grade = match record.grade {
            Some(grade) if grade >= 1 => grade as u8,
            _ => return Err(IncompleteRecord { field: "grade" }),
        };

        let profile = StudentProfile {
            email,
            name,
            majors,
            grade,
            tags: record.tags.unwrap_or_default(),
        };

        profile.validate().map_err(|errors| IncompleteRecord {
            field: errors
                .field_errors()
                .keys()
                .next()
                .copied()
                .unwrap_or("profile"),
        })?;

        Ok(profile)
    }
}

/// Major eligibility of a posting
///
/// The store encodes "open to any major" as the sentinel value inside the
/// majors list; parsing turns that into an explicit variant so matching
/// cannot miss it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MajorEligibility {
    Unrestricted,
    Specific(Vec<String>),
}

impl<'de> Deserialize<'de> for MajorEligibility {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let majors = Vec::<String>::deserialize(deserializer)?;
        if majors.iter().any(|major| major == ANY_SENTINEL) {
            Ok(MajorEligibility::Unrestricted)
        } else {
            Ok(MajorEligibility::Specific(majors))
        }
    }
}

impl Serialize for MajorEligibility {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            MajorEligibility::Unrestricted => serializer.collect_seq([ANY_SENTINEL]),
            MajorEligibility::Specific(majors) => serializer.collect_seq(majors),
        }
    }
}

impl fmt::Display for MajorEligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MajorEligibility::Unrestricted => f.write_str(ANY_SENTINEL),
            MajorEligibility::Specific(majors) => f.write_str(&majors.join(", ")),
        }
    }
}

/// Grade eligibility of a posting, with the same sentinel handling as majors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeEligibility {
    Unrestricted,
    Years(Vec<u8>),
}

impl<'de> Deserialize<'de> for GradeEligibility {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum GradeValue {
            Year(u8),
            Text(String),
        }

        let values = Vec::<GradeValue>::deserialize(deserializer)?;
        let mut years = Vec::new();
        for value in values {
            match value {
                GradeValue::Year(year) => years.push(year),
                GradeValue::Text(text) if text == ANY_SENTINEL => {
                    return Ok(GradeEligibility::Unrestricted);
                }
                // Free-text grade notes are not matchable; drop them
                GradeValue::Text(_) => {}
            }
        }
        Ok(GradeEligibility::Years(years))
    }
}

impl Serialize for GradeEligibility {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            GradeEligibility::Unrestricted => serializer.collect_seq([ANY_SENTINEL]),
            GradeEligibility::Years(years) => serializer.collect_seq(years),
        }
    }
}

impl fmt::Display for GradeEligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeEligibility::Unrestricted => f.write_str(ANY_SENTINEL),
            GradeEligibility::Years(years) => {
                let joined = years
                    .iter()
                    .map(|year| year.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                f.write_str(&joined)
            }
        }
    }
}

/// Internship posting as stored in the search index and change events
///
/// Organization name and the two eligibility lists are required; everything
/// else is descriptive and independently optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    pub organization_name: String,
    pub majors: MajorEligibility,
    pub grades: GradeEligibility,
    #[serde(default)]
    pub organization_size: Option<String>,
    #[serde(default)]
    pub organization_description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub recruit_count: Option<u32>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub application_deadline: Option<String>,
    #[serde(default)]
    pub announced_majors: Option<String>,
    #[serde(default)]
    pub qualifications: Option<Qualifications>,
    #[serde(default)]
    pub interview: Option<InterviewInfo>,
    #[serde(default)]
    pub details: Option<InternshipDetails>,
    #[serde(default)]
    pub support: Option<SupportAmount>,
}

/// Announced qualification block of a posting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qualifications {
    #[serde(default)]
    pub majors: Option<Vec<String>>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub etc: Option<String>,
    #[serde(default)]
    pub competence: Option<String>,
}

/// Interview process block of a posting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewInfo {
    #[serde(default)]
    pub interview_type: Option<String>,
    #[serde(default)]
    pub submission_period: Option<String>,
    #[serde(default)]
    pub interview_round: Option<String>,
    #[serde(default)]
    pub final_announcement: Option<String>,
}

/// Free-text description block of a posting, searched by the tag scan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipDetails {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub job_overview: Option<String>,
    #[serde(default)]
    pub goals: Option<String>,
    #[serde(default)]
    pub operation_guidance: Option<String>,
    #[serde(default)]
    pub target_outcomes: Option<String>,
}

/// Compensation block of a posting
///
/// An amount of zero means "not specified" and suppresses the compensation
/// line in rendered mail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportAmount {
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
}

/// One rendered, addressed message ready for the mail relay
#[derive(Debug, Clone)]
pub struct Notification {
    pub to: String,
    pub recipient: String,
    pub subject: String,
    pub html: String,
}
