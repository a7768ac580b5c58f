//! Performance benchmarks for the holiday engine.
//!
//! Measures holiday resolution and working-day counting over windows up to a
//! year long, with a holiday calendar mixing global, country, state and
//! company scopes.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use holiday_engine::calculation::{resolve_holidays, working_days};
use holiday_engine::models::{
    CompanyLocation, DEFAULT_WEEKENDS, DateWindow, EmployeeLocation, Holiday,
};
use holiday_engine::service::HolidayService;
use holiday_engine::storage::{HolidayRepository, InMemoryStore};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Builds a store with `count` holidays spread over 2026, cycling through the
/// four kinds of scope.
fn create_store(count: u64) -> InMemoryStore {
    let base = date(2026, 1, 1);
    let mut store = InMemoryStore::new()
        .with_company_location(CompanyLocation {
            id: 1,
            name: "New York HQ".to_string(),
            country: Some("US".to_string()),
            state: Some("NY".to_string()),
        })
        .with_company_location(CompanyLocation {
            id: 2,
            name: "Melbourne".to_string(),
            country: Some("AU".to_string()),
            state: Some("VIC".to_string()),
        });

    for id in 1..=count {
        let start = base + Duration::days(((id * 7) % 365) as i64);
        store = store.with_holiday(Holiday {
            id,
            title: format!("Holiday {id}"),
            start,
            end: start + Duration::days((id % 3) as i64),
        });
    }

    for id in 1..=count {
        match id % 4 {
            0 => {}
            1 => {
                store.insert_location_scope(id, "US", None).unwrap();
            }
            2 => {
                store.insert_location_scope(id, "US", Some("NY")).unwrap();
            }
            _ => {
                store.insert_company_scope(id, 2).unwrap();
            }
        }
    }

    store
}

fn new_york() -> EmployeeLocation {
    EmployeeLocation {
        company_id: 1,
        country: Some("US".to_string()),
        state: Some("NY".to_string()),
    }
}

fn bench_resolve_year(c: &mut Criterion) {
    let store = create_store(52);
    let location = new_york();
    let window = DateWindow::new(date(2026, 1, 1), date(2026, 12, 31)).unwrap();

    c.bench_function("resolve_holidays_year_52", |b| {
        b.iter(|| {
            black_box(resolve_holidays(&store, black_box(&location), black_box(&window)).unwrap())
        })
    });
}

fn bench_working_days_year(c: &mut Criterion) {
    let store = create_store(52);
    let location = new_york();
    let window = DateWindow::new(date(2026, 1, 1), date(2026, 12, 31)).unwrap();

    c.bench_function("working_days_year_52", |b| {
        b.iter(|| {
            black_box(
                working_days(&store, Some(&location), black_box(&window), &DEFAULT_WEEKENDS)
                    .unwrap(),
            )
        })
    });
}

fn bench_service_leave_days(c: &mut Criterion) {
    let store = create_store(52).with_stored_work_location(1, "1");
    let service = HolidayService::new(store);
    let window = DateWindow::new(date(2026, 12, 21), date(2026, 12, 31)).unwrap();

    c.bench_function("calculate_leave_days_with_holidays", |b| {
        b.iter(|| {
            black_box(
                service
                    .calculate_leave_days_with_holidays(1, black_box(&window), None)
                    .unwrap(),
            )
        })
    });
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("holiday_count_scaling");
    let location = new_york();
    let window = DateWindow::new(date(2026, 1, 1), date(2026, 12, 31)).unwrap();

    for count in [10u64, 100, 1000].iter() {
        let store = create_store(*count);

        group.throughput(Throughput::Elements(*count));
        group.bench_with_input(BenchmarkId::new("holidays", count), count, |b, _| {
            b.iter(|| {
                black_box(
                    working_days(&store, Some(&location), &window, &DEFAULT_WEEKENDS).unwrap(),
                )
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_resolve_year,
    bench_working_days_year,
    bench_service_leave_days,
    bench_scaling,
);
criterion_main!(benches);
