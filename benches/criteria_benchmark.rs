//! Benchmark for rule compilation and membership queries

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use date_criteria::{compile_rule, Criteria, CriteriaOptions};

/// Business-day style calendar: weekends, fixed holidays and Easter-relative days
const HOLIDAY_RULES: [&str; 8] = [
    "DayOfWeek == Saturday",
    "DayOfWeek == Sunday",
    "Month == 1; Day == 1",
    "Month == 12; Day == 25",
    "Month == 12; Day == 26",
    "Date == Easter - 2",
    "Date == Easter + 1",
    "Date == EndOfMonth; DayOfWeek != Wednesday",
];

fn build_criteria() -> Criteria {
    let criteria = Criteria::with_options(CriteriaOptions {
        auto_refresh: false,
        ..CriteriaOptions::default()
    });
    criteria.set_negate(true);
    for rule in HOLIDAY_RULES {
        criteria
            .add_rule(rule, false, None)
            .expect("benchmark rules compile");
    }
    criteria
}

fn year_of_dates(year: i32) -> Vec<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).expect("valid start date");
    (0..365).map(|offset| start + Duration::days(offset)).collect()
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_rule", |b| {
        b.iter(|| {
            compile_rule(
                black_box("Date == EndOfMonth - 3; DayOfWeek != Wednesday; Year >= 2000"),
                false,
                None,
            )
        })
    });
}

fn bench_contains_cold(c: &mut Criterion) {
    let dates = year_of_dates(2022);
    c.bench_function("contains_cold_year", |b| {
        b.iter_batched(
            build_criteria,
            |criteria| {
                dates
                    .iter()
                    .filter(|d| criteria.contains(**d).unwrap_or(false))
                    .count()
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_contains_warm(c: &mut Criterion) {
    let criteria = build_criteria();
    let dates = year_of_dates(2022);
    for date in &dates {
        let _ = criteria.contains(*date);
    }

    c.bench_function("contains_warm_year", |b| {
        b.iter(|| {
            dates
                .iter()
                .filter(|d| criteria.contains(black_box(**d)).unwrap_or(false))
                .count()
        })
    });
}

criterion_group!(benches, bench_compile, bench_contains_cold, bench_contains_warm);
criterion_main!(benches);
