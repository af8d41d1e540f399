//! Performance benchmarks for the payroll engine.
//!
//! This benchmark suite covers:
//! - Single monthly calculation with a full attendance record
//! - Single calculation with overtime and leave
//! - Batch of 100 employees
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Duration, NaiveDate, NaiveTime};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::calculation::{PayrollCalculator, PayrollRequest};
use payroll_engine::config::{ConfigLoader, EngineConfig};
use payroll_engine::models::{
    AllowanceEntitlements, AttendanceRecord, EmployeeProfile, EmploymentStatus, LeaveRecord,
    LeaveStatus, OvertimeRecord,
};
use payroll_engine::provider::RecordStore;

fn load_config() -> EngineConfig {
    ConfigLoader::load("./config/ph")
        .expect("Failed to load config")
        .into_config()
}

fn june_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn june_last() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

fn create_employee(id: u32) -> EmployeeProfile {
    let status = match id % 3 {
        0 => EmploymentStatus::Probationary,
        1 => EmploymentStatus::Regular,
        _ => EmploymentStatus::Contractual,
    };
    EmployeeProfile {
        id,
        name: format!("Employee {}", id),
        status,
        basic_salary: Decimal::new(30000 + i64::from(id % 50) * 500, 0),
        entitlements: AllowanceEntitlements {
            rice: None,
            phone: Some(Decimal::new(1000, 0)),
            clothing: Some(Decimal::new(800, 0)),
        },
        bonus_eligible: id % 2 == 0,
    }
}

/// Adds 22 working days of attendance, a few overtime entries and one
/// approved leave day for `id`.
fn populate(store: &mut RecordStore, id: u32) {
    let first = june_first();
    store.insert_employee(create_employee(id));
    store.extend_attendance((0..22).map(|offset| {
        AttendanceRecord::new(
            id,
            first + Duration::days(offset),
            NaiveTime::from_hms_opt(8, 5, 0),
            NaiveTime::from_hms_opt(17, 0, 0),
        )
    }));
    store.extend_overtime((0..3).map(|week| OvertimeRecord {
        employee_id: id,
        date: first + Duration::days(week * 7 + 2),
        hours: Decimal::new(2, 0),
        approved: week != 2,
    }));
    store.extend_leave(vec![LeaveRecord {
        employee_id: id,
        start_date: first + Duration::days(25),
        end_date: first + Duration::days(25),
        status: LeaveStatus::Approved,
        paid: true,
        reason: None,
    }]);
}

/// Benchmark: one employee, one month.
fn bench_single_calculation(c: &mut Criterion) {
    let config = load_config();
    let mut store = RecordStore::new();
    populate(&mut store, 10001);
    let calculator = PayrollCalculator::new(&store, &config);

    c.bench_function("single_month", |b| {
        b.iter(|| {
            let result = calculator
                .calculate_payroll(black_box(10001), june_first(), june_last())
                .unwrap();
            black_box(result)
        })
    });
}

/// Benchmark: batches of employees sharing one store.
fn bench_batch(c: &mut Criterion) {
    let config = load_config();
    let mut group = c.benchmark_group("batch_processing");

    for size in [10_u32, 100] {
        let mut store = RecordStore::new();
        for id in 1..=size {
            populate(&mut store, id);
        }
        let requests: Vec<PayrollRequest> = (1..=size)
            .map(|id| PayrollRequest::new(id, june_first(), june_last()))
            .collect();
        let calculator = PayrollCalculator::new(&store, &config);

        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::new("employees", size), &requests, |b, requests| {
            b.iter(|| black_box(calculator.run_batch(requests)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_calculation, bench_batch);
criterion_main!(benches);
