use chrono::{FixedOffset, NaiveDate, Utc};
use serde_json::{json, Value};
use std::collections::HashSet;

use crate::models::{GradeEligibility, MajorEligibility, ANY_SENTINEL};

/// Result cap applied to every search query
const MAX_RESULTS: usize = 1000;

/// Posting fields searched by the tag scan
const KEYWORD_FIELDS: [&str; 8] = [
    "details.jobOverview",
    "details.goals",
    "details.jobTitle",
    "details.operationGuidance",
    "details.targetOutcomes",
    "qualifications.competence",
    "qualifications.etc",
    "organizationDescription",
];

/// Current date in Korea Standard Time, the deadline reference zone.
pub fn today_kst() -> NaiveDate {
    let kst = FixedOffset::east_opt(9 * 3600).expect("KST is a valid offset");
    Utc::now().with_timezone(&kst).date_naive()
}

/// Query for open postings matching a student's majors and grade.
///
/// The unrestricted sentinel is always appended to the major clause so that
/// postings open to any major match regardless of the student's field.
/// Results are ordered by ascending application deadline.
pub fn postings_for_profile(majors: &[String], grade: u8, today: NaiveDate) -> Value {
    let mut major_clauses: Vec<Value> = majors
        .iter()
        .map(|major| json!({ "match": { "majors": major } }))
        .collect();
    major_clauses.push(json!({ "match": { "majors": ANY_SENTINEL } }));

    json!({
        "query": {
            "bool": {
                "must": [
                    { "bool": { "should": major_clauses } },
                    { "match": { "grades": grade } },
                    { "range": { "applicationDeadline": { "gte": today.to_string() } } },
                ],
            },
        },
        "sort": [{ "applicationDeadline": { "order": "asc" } }],
        "size": MAX_RESULTS,
    })
}

/// Query for active student profiles matching a posting's eligibility.
///
/// An unrestricted major list means the posting is open to every major, so
/// the query matches on grade alone; this check comes before any exact-major
/// matching. An unrestricted grade list drops the grade clause the same way.
pub fn profiles_for_posting(majors: &MajorEligibility, grades: &GradeEligibility) -> Value {
    let mut must: Vec<Value> = Vec::new();

    if let MajorEligibility::Specific(majors) = majors {
        let clauses: Vec<Value> = majors
            .iter()
            .map(|major| json!({ "match": { "majors": major } }))
            .collect();
        must.push(json!({ "bool": { "should": clauses } }));
    }

    if let GradeEligibility::Years(years) = grades {
        let clauses: Vec<Value> = years
            .iter()
            .map(|year| json!({ "match": { "grade": year } }))
            .collect();
        must.push(json!({ "bool": { "should": clauses } }));
    }

    json!({
        "query": {
            "bool": {
                "must": must,
                "filter": [{ "term": { "active": true } }],
            },
        },
        "size": MAX_RESULTS,
    })
}

/// Keyword query across the descriptive posting fields.
///
/// Each keyword expands to one wildcard clause per searched field; a posting
/// matches when at least one keyword hits at least one field and its
/// deadline has not passed.
pub fn postings_by_keywords(keywords: &[String], today: NaiveDate) -> Value {
    let should: Vec<Value> = keywords
        .iter()
        .flat_map(|keyword| {
            KEYWORD_FIELDS
                .iter()
                .map(move |field| json!({ "wildcard": { (*field): format!("*{}*", keyword) } }))
        })
        .collect();

    json!({
        "query": {
            "bool": {
                "should": should,
                "minimum_should_match": 1,
                "filter": [{ "range": { "applicationDeadline": { "gte": today.to_string() } } }],
            },
        },
        "sort": [{ "applicationDeadline": { "order": "asc" } }],
        "size": MAX_RESULTS,
    })
}

/// Collapse duplicate hits by document id, keeping the first occurrence.
///
/// Search order is preserved, so the earliest-ranked copy of a document is
/// the one that survives.
pub fn dedup_by_id<T>(hits: Vec<(String, T)>) -> Vec<T> {
    let mut seen = HashSet::new();
    hits.into_iter()
        .filter(|(id, _)| seen.insert(id.clone()))
        .map(|(_, document)| document)
        .collect()
}
