//! Property tests for payroll invariants.

use chrono::{Duration, NaiveDate, NaiveTime};
use proptest::prelude::*;
use proptest::test_runner::Config;
use rust_decimal::Decimal;

use payroll_engine::calculation::{
    PayrollCalculator, aggregate_attendance, bracket_amount, calculate_contributions,
    entitled_allowances, withholding_tax,
};
use payroll_engine::config::{AllowancePolicy, ConfigLoader, ShiftPolicy};
use payroll_engine::models::{
    AllowanceEntitlements, AllowanceRule, AllowanceType, AttendanceRecord, CompensationPackage,
    EmployeeProfile, EmploymentStatus, OvertimeRecord, PayPeriod,
};
use payroll_engine::provider::RecordStore;

fn june_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn june_last() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

fn cents(value: u64) -> Decimal {
    Decimal::new(value as i64, 2)
}

fn status_strategy() -> impl Strategy<Value = EmploymentStatus> {
    prop_oneof![
        Just(EmploymentStatus::Regular),
        Just(EmploymentStatus::Probationary),
        Just(EmploymentStatus::Contractual),
        Just(EmploymentStatus::Terminated),
    ]
}

fn employee(id: u32, status: EmploymentStatus, salary: Decimal) -> EmployeeProfile {
    EmployeeProfile {
        id,
        name: format!("Employee {}", id),
        status,
        basic_salary: salary,
        entitlements: AllowanceEntitlements {
            rice: Some(Decimal::new(1500, 0)),
            phone: Some(Decimal::new(1000, 0)),
            clothing: Some(Decimal::new(800, 0)),
        },
        bonus_eligible: true,
    }
}

fn workday(offset: i64, start: NaiveDate) -> AttendanceRecord {
    AttendanceRecord::new(
        10001,
        start + Duration::days(offset),
        NaiveTime::from_hms_opt(8, 0, 0),
        NaiveTime::from_hms_opt(17, 0, 0),
    )
}

proptest! {
    #![proptest_config(Config::with_cases(64))]

    #[test]
    fn days_worked_never_exceed_calendar_days(
        offsets in proptest::collection::btree_set(0_i64..45, 0..45)
    ) {
        // Records start before the period and run past its end.
        let first = NaiveDate::from_ymd_opt(2024, 5, 25).unwrap();
        let attendance: Vec<AttendanceRecord> =
            offsets.iter().map(|offset| workday(*offset, first)).collect();
        let period = PayPeriod::new(june_first(), june_last()).unwrap();

        let result = aggregate_attendance(
            10001,
            &period,
            &attendance,
            &[],
            &[],
            &ShiftPolicy::default(),
            1,
        )
        .unwrap();

        prop_assert!(result.summary.days_worked <= result.summary.calendar_days);
        prop_assert!(result.summary.full_days <= result.summary.days_worked);
        prop_assert_eq!(result.summary.calendar_days, 30);
    }

    #[test]
    fn pay_totals_are_consistent(
        status in status_strategy(),
        salary_cents in 0_u64..30_000_000,
        days in 0_i64..26,
        overtime_quarters in 0_u32..160,
    ) {
        let config = ConfigLoader::builtin().unwrap().into_config();
        let store = RecordStore::new()
            .with_employee(employee(10001, status, cents(salary_cents)))
            .with_attendance((0..days).map(|offset| workday(offset, june_first())))
            .with_overtime(vec![OvertimeRecord {
                employee_id: 10001,
                date: june_first(),
                hours: Decimal::new(i64::from(overtime_quarters) * 25, 2),
                approved: true,
            }]);

        let result = PayrollCalculator::new(&store, &config)
            .calculate_payroll(10001, june_first(), june_last())
            .unwrap();

        prop_assert_eq!(
            result.gross_pay,
            result.gross_earnings + result.overtime_pay + result.allowance_total
        );
        prop_assert_eq!(result.net_pay, result.gross_pay - result.total_deductions);
        prop_assert_eq!(result.total_deductions, result.contributions.total());
        prop_assert!(result.gross_pay >= result.allowance_total);
        prop_assert!(result.days_worked <= result.attendance.calendar_days);
        prop_assert_eq!(
            result.audit_trace.has_warning("NEGATIVE_NET_PAY"),
            result.net_pay < Decimal::ZERO
        );
    }

    #[test]
    fn allowance_eligibility_follows_status(
        status in status_strategy(),
        phone_cents in 1_u64..500_000,
    ) {
        let mut profile = employee(10001, status, Decimal::new(30000, 0));
        profile.entitlements.phone = Some(cents(phone_cents));
        let policy = AllowancePolicy::default();

        let first = entitled_allowances(&profile, &policy, june_first()).unwrap();
        let second = entitled_allowances(&profile, &policy, june_first()).unwrap();
        prop_assert_eq!(&first, &second);

        let has = |kind: AllowanceType| first.iter().any(|a| a.allowance_type() == kind);
        let regular = status == EmploymentStatus::Regular;
        let probationary = status == EmploymentStatus::Probationary;

        prop_assert_eq!(has(AllowanceType::Rice), regular || probationary);
        prop_assert_eq!(has(AllowanceType::Clothing), regular);
        prop_assert_eq!(has(AllowanceType::Phone), regular || probationary);
        for allowance in &first {
            prop_assert!(allowance.is_eligible(status));
        }
    }

    #[test]
    fn cloning_never_adds_allowances(
        from in status_strategy(),
        to in status_strategy(),
    ) {
        let source = employee(10001, from, Decimal::new(40000, 0));
        let target = employee(10002, to, Decimal::new(40000, 0));
        let package = CompensationPackage::standard(
            &source,
            "Standard",
            &AllowancePolicy::default(),
            june_first(),
        )
        .unwrap();

        let cloned = package.clone_for_employee(&target);
        prop_assert!(cloned.allowance_count() <= package.allowance_count());
        prop_assert_eq!(cloned.employee_id(), 10002);
        prop_assert_eq!(cloned.total_deductions(), Decimal::ZERO);
    }

    #[test]
    fn contributions_are_non_negative_and_monotonic(
        low_cents in 0_u64..100_000_000,
        delta_cents in 0_u64..10_000_000,
    ) {
        let loader = ConfigLoader::builtin().unwrap();
        let schedule = loader.schedule_for(june_first()).unwrap();
        let low = cents(low_cents);
        let high = cents(low_cents + delta_cents);

        let result = calculate_contributions(low, schedule, 1).unwrap();
        prop_assert!(result.contributions.sss >= Decimal::ZERO);
        prop_assert!(result.contributions.philhealth >= Decimal::ZERO);
        prop_assert!(result.contributions.pagibig >= Decimal::ZERO);
        prop_assert!(result.contributions.withholding_tax >= Decimal::ZERO);
        prop_assert!(result.taxable_income >= Decimal::ZERO);

        for table in [&schedule.sss, &schedule.philhealth, &schedule.pagibig] {
            prop_assert!(bracket_amount(table, low) <= bracket_amount(table, high));
        }
        prop_assert!(
            withholding_tax(&schedule.withholding_tax, low)
                <= withholding_tax(&schedule.withholding_tax, high)
        );
    }
}
