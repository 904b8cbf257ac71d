// Criterion benchmarks for UniWEP Notify

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use uniwep_notify::core::matching::{dedup_by_id, postings_by_keywords, postings_for_profile};
use uniwep_notify::core::render;
use uniwep_notify::models::Posting;

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
}

fn create_posting(i: usize) -> Posting {
    serde_json::from_value(json!({
        "organizationName": format!("기관 {}", i),
        "majors": ["컴퓨터소프트웨어학부", "무관"],
        "grades": [3, 4],
        "applicationDeadline": "2099-01-01",
        "location": "서울",
        "details": {
            "jobTitle": "로봇 제어 인턴",
            "jobOverview": "제어 소프트웨어 개발",
        },
        "support": { "period": "월", "amount": 500000 },
    }))
    .unwrap()
}

fn bench_profile_query(c: &mut Criterion) {
    let majors = vec![
        "컴퓨터소프트웨어학부".to_string(),
        "로봇공학과".to_string(),
    ];
    let today = fixed_today();

    c.bench_function("profile_query", |b| {
        b.iter(|| postings_for_profile(black_box(&majors), black_box(3), black_box(today)));
    });
}

fn bench_keyword_query(c: &mut Criterion) {
    let today = fixed_today();
    let mut group = c.benchmark_group("keyword_query");

    for keyword_count in [1, 4, 8].iter() {
        let keywords: Vec<String> = (0..*keyword_count)
            .map(|i| format!("키워드{}", i))
            .collect();

        group.bench_with_input(
            BenchmarkId::new("postings_by_keywords", keyword_count),
            keyword_count,
            |b, _| {
                b.iter(|| postings_by_keywords(black_box(&keywords), black_box(today)));
            },
        );
    }

    group.finish();
}

fn bench_dedup(c: &mut Criterion) {
    let mut group = c.benchmark_group("dedup");

    for hit_count in [100, 1000].iter() {
        // Every other hit reuses an id, so half the list collapses away.
        let hits: Vec<(String, usize)> = (0..*hit_count)
            .map(|i| (format!("p{}", i / 2), i))
            .collect();

        group.bench_with_input(
            BenchmarkId::new("dedup_by_id", hit_count),
            hit_count,
            |b, _| {
                b.iter(|| dedup_by_id(black_box(hits.clone())));
            },
        );
    }

    group.finish();
}

fn bench_render_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for posting_count in [1, 5, 20].iter() {
        let postings: Vec<Posting> = (0..*posting_count).map(create_posting).collect();

        group.bench_with_input(
            BenchmarkId::new("tag_digest_email", posting_count),
            posting_count,
            |b, _| {
                b.iter(|| render::tag_digest_email(black_box("김대성"), black_box(&postings)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_profile_query,
    bench_keyword_query,
    bench_dedup,
    bench_render_digest
);

criterion_main!(benches);
