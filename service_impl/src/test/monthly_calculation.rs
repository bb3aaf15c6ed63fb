use rust_decimal::Decimal;
use service::absence::{
    AbsenceCategory, AbsenceDay, AbsenceStatus, AbsenceType, AbsenceUnit,
};
use service::capping::{CappingAction, CappingExemption, CappingRule, CappingType};
use service::correction::{Correction, CorrectionType};
use service::daily_value::DailyValue;
use service::employee::Employee;
use std::sync::Arc;
use time::macros::date;
use uuid::{Uuid, uuid};

use crate::monthly_calculation::{AbsenceSummary, MonthInput, calculate_month};

fn default_employee_id() -> Uuid {
    uuid!("04215DFE-13C4-413C-8C66-77AC741BB5F0")
}

fn default_employee() -> Employee {
    Employee {
        id: default_employee_id(),
        tenant_id: uuid!("F79C462A-8D4E-42E1-8171-DB4DBD019E50"),
        department_id: None,
        hire_date: date!(2020 - 01 - 01),
        exit_date: None,
        birth_date: None,
        has_disability: false,
        weekly_hours: Decimal::new(4000, 2),
        vacation_entitlement: Decimal::new(3000, 2),
        target_hours_daily: None,
        target_hours_weekly: None,
        target_hours_monthly: None,
        target_hours_annual: None,
        version: Uuid::nil(),
    }
}

fn daily(date: time::Date, net: i32, target: i32) -> DailyValue {
    let mut value = DailyValue::empty(default_employee_id(), date);
    value.gross_time = net;
    value.net_time = net;
    value.target_time = target;
    value.overtime = (net - target).max(0);
    value.undertime = (target - net).max(0);
    value
}

/// 31 January days summing to the requested totals, in the shape of a
/// plain full month.
fn january_days(total_net: i32, total_target: i32) -> Vec<DailyValue> {
    let first = date!(2024 - 01 - 01);
    let mut days = Vec::new();
    let mut remaining_net = total_net;
    let mut remaining_target = total_target;
    for offset in 0..31 {
        let date = first.saturating_add(time::Duration::days(offset));
        let (net, target) = if offset == 30 {
            (remaining_net, remaining_target)
        } else {
            (total_net / 31, total_target / 31)
        };
        remaining_net -= total_net / 31;
        remaining_target -= total_target / 31;
        days.push(daily(date, net, target));
    }
    days
}

fn monthly_cap(positive_cap: i32) -> CappingRule {
    CappingRule {
        id: Uuid::new_v4(),
        tenant_id: uuid!("F79C462A-8D4E-42E1-8171-DB4DBD019E50"),
        capping_type: CappingType::Monthly,
        capping_month: None,
        capping_day: None,
        positive_cap: Some(positive_cap),
        negative_cap: None,
        action: CappingAction::Forfeit,
        transfer_account_id: None,
        priority: 0,
        version: Uuid::nil(),
    }
}

fn input<'a>(
    daily_values: &'a [DailyValue],
    previous_carryover: i32,
    capping_rules: &'a [CappingRule],
    exemptions: &'a [CappingExemption],
    absence_summary: &'a AbsenceSummary,
    corrections: &'a [Correction],
    employee: &'a Employee,
) -> MonthInput<'a> {
    MonthInput {
        employee,
        year: 2024,
        month: 1,
        daily_values,
        previous_carryover,
        capping_rules,
        exemptions,
        absence_summary,
        corrections,
    }
}

#[test]
fn test_monthly_capping_with_forfeit() {
    let days = january_days(10_000, 9_400);
    let rules = vec![monthly_cap(600)];
    let summary = AbsenceSummary::default();
    let employee = default_employee();

    let result =
        calculate_month(&input(&days, 100, &rules, &[], &summary, &[], &employee)).unwrap();
    let value = &result.value;
    assert_eq!(value.total_net, 10_000);
    assert_eq!(value.total_target, 9_400);
    assert_eq!(value.flextime_change, 600);
    assert_eq!(value.flextime_start, 100);
    assert_eq!(value.flextime_end, 600);
    assert_eq!(value.flextime_forfeited, 100);
    assert_eq!(value.flextime_carryover, 600);
    assert!(result.postings.is_empty());
}

#[test]
fn test_monthly_sums_are_additive() {
    let days = vec![
        daily(date!(2024 - 01 - 02), 510, 480),
        daily(date!(2024 - 01 - 03), 420, 480),
        daily(date!(2024 - 01 - 04), 0, 0),
    ];
    let summary = AbsenceSummary::default();
    let employee = default_employee();

    let result = calculate_month(&input(&days, 0, &[], &[], &summary, &[], &employee)).unwrap();
    let value = &result.value;
    assert_eq!(value.total_net, 930);
    assert_eq!(value.total_target, 960);
    assert_eq!(value.flextime_change, -30);
    assert_eq!(value.flextime_end, -30);
    assert_eq!(value.work_days, 2);
    assert_eq!(value.days_with_errors, 0);
}

#[test]
fn test_negative_cap_clamps_without_forfeit() {
    let days = vec![daily(date!(2024 - 01 - 02), 0, 480)];
    let mut rule = monthly_cap(600);
    rule.negative_cap = Some(300);
    let rules = vec![rule];
    let summary = AbsenceSummary::default();
    let employee = default_employee();

    let result = calculate_month(&input(&days, 0, &rules, &[], &summary, &[], &employee)).unwrap();
    let value = &result.value;
    assert_eq!(value.flextime_change, -480);
    assert_eq!(value.flextime_end, -300);
    assert_eq!(value.flextime_forfeited, 0);
    assert_eq!(value.flextime_carryover, -300);
}

#[test]
fn test_transfer_action_emits_account_posting() {
    let days = january_days(10_000, 9_400);
    let account_id = Uuid::new_v4();
    let mut rule = monthly_cap(600);
    rule.action = CappingAction::TransferAccount;
    rule.transfer_account_id = Some(account_id);
    let rules = vec![rule];
    let summary = AbsenceSummary::default();
    let employee = default_employee();

    let result =
        calculate_month(&input(&days, 100, &rules, &[], &summary, &[], &employee)).unwrap();
    assert_eq!(result.value.flextime_forfeited, 100);
    assert_eq!(result.postings.len(), 1);
    let posting = &result.postings[0];
    assert_eq!(posting.account_id, account_id);
    assert_eq!(posting.minutes, 100);
    assert_eq!(posting.date, date!(2024 - 01 - 31));
    assert_eq!(posting.reason.as_ref(), "capping_transfer");
}

#[test]
fn test_active_exemption_skips_the_rule() {
    let days = january_days(10_000, 9_400);
    let rule = monthly_cap(600);
    let exemption = CappingExemption {
        id: Uuid::new_v4(),
        employee_id: default_employee_id(),
        capping_rule_id: rule.id,
        valid_from: date!(2024 - 01 - 01),
        valid_to: None,
        version: Uuid::nil(),
    };
    let rules = vec![rule];
    let summary = AbsenceSummary::default();
    let employee = default_employee();

    let result = calculate_month(&input(
        &days,
        100,
        &rules,
        std::slice::from_ref(&exemption),
        &summary,
        &[],
        &employee,
    ))
    .unwrap();
    assert_eq!(result.value.flextime_end, 700);
    assert_eq!(result.value.flextime_forfeited, 0);
    assert!(result.value.warnings.is_empty());
}

#[test]
fn test_expired_exemption_warns_and_rule_applies() {
    let days = january_days(10_000, 9_400);
    let rule = monthly_cap(600);
    let exemption = CappingExemption {
        id: Uuid::new_v4(),
        employee_id: default_employee_id(),
        capping_rule_id: rule.id,
        valid_from: date!(2023 - 01 - 01),
        valid_to: Some(date!(2023 - 12 - 31)),
        version: Uuid::nil(),
    };
    let rules = vec![rule];
    let summary = AbsenceSummary::default();
    let employee = default_employee();

    let result = calculate_month(&input(
        &days,
        100,
        &rules,
        std::slice::from_ref(&exemption),
        &summary,
        &[],
        &employee,
    ))
    .unwrap();
    assert_eq!(result.value.flextime_end, 600);
    assert_eq!(result.value.flextime_forfeited, 100);
    assert_eq!(
        result.value.warnings,
        vec![Arc::<str>::from("capping_exemption_expired")]
    );
}

#[test]
fn test_higher_priority_rule_caps_first() {
    let days = january_days(10_000, 9_400);
    let mut strict = monthly_cap(500);
    strict.priority = 10;
    let loose = monthly_cap(600);
    let rules = vec![loose, strict];
    let summary = AbsenceSummary::default();
    let employee = default_employee();

    let result =
        calculate_month(&input(&days, 100, &rules, &[], &summary, &[], &employee)).unwrap();
    // The priority-10 rule runs first and already clamps to 500.
    assert_eq!(result.value.flextime_end, 500);
    assert_eq!(result.value.flextime_forfeited, 200);
}

#[test]
fn test_year_end_rule_only_fires_in_december() {
    let days = january_days(10_000, 9_400);
    let mut rule = monthly_cap(600);
    rule.capping_type = CappingType::YearEnd;
    let rules = vec![rule];
    let summary = AbsenceSummary::default();
    let employee = default_employee();

    let result =
        calculate_month(&input(&days, 100, &rules, &[], &summary, &[], &employee)).unwrap();
    assert_eq!(result.value.flextime_end, 700);
    assert_eq!(result.value.flextime_forfeited, 0);
}

#[test]
fn test_absence_summary_by_category() {
    fn absence(category: AbsenceCategory, duration: Decimal, status: AbsenceStatus) -> AbsenceDay {
        AbsenceDay {
            id: Uuid::new_v4(),
            employee_id: default_employee_id(),
            date: date!(2024 - 01 - 08),
            absence_type: AbsenceType {
                id: Uuid::new_v4(),
                tenant_id: Uuid::nil(),
                code: "XX".into(),
                name: "absence".into(),
                priority: 1,
                unit: AbsenceUnit::Day,
                paid: true,
                counts_as_worktime: false,
                category,
                version: Uuid::nil(),
            },
            duration,
            status,
            version: Uuid::nil(),
        }
    }

    let summary = AbsenceSummary::from_absences(&[
        absence(AbsenceCategory::Vacation, Decimal::ONE, AbsenceStatus::Approved),
        absence(
            AbsenceCategory::Vacation,
            Decimal::new(50, 2),
            AbsenceStatus::Approved,
        ),
        absence(AbsenceCategory::Sick, Decimal::ONE, AbsenceStatus::Approved),
        absence(AbsenceCategory::Other, Decimal::ONE, AbsenceStatus::Rejected),
    ]);
    assert_eq!(summary.vacation_days, Decimal::new(150, 2));
    assert_eq!(summary.sick_days, Decimal::ONE);
    assert_eq!(summary.other_days, Decimal::ZERO);

    let days = vec![daily(date!(2024 - 01 - 02), 480, 480)];
    let employee = default_employee();
    let result = calculate_month(&input(&days, 0, &[], &[], &summary, &[], &employee)).unwrap();
    assert_eq!(result.value.vacation_taken, Decimal::new(150, 2));
    assert_eq!(result.value.sick_days, Decimal::ONE);
    assert_eq!(result.value.other_absence_days, Decimal::ZERO);
}

#[test]
fn test_flextime_correction_overlays_after_capping() {
    let days = january_days(10_000, 9_400);
    let rules = vec![monthly_cap(600)];
    let summary = AbsenceSummary::default();
    let employee = default_employee();
    let correction = Correction {
        id: Uuid::new_v4(),
        employee_id: default_employee_id(),
        value_date: date!(2024 - 01 - 31),
        correction_type: CorrectionType::Flextime,
        amount: Decimal::from(-120),
        reason: "manual balance adjustment".into(),
        approved_by: Some("hr".into()),
        version: Uuid::nil(),
    };

    let result = calculate_month(&input(
        &days,
        100,
        &rules,
        &[],
        &summary,
        std::slice::from_ref(&correction),
        &employee,
    ))
    .unwrap();
    let value = &result.value;
    assert_eq!(value.flextime_end, 480);
    assert_eq!(value.flextime_carryover, 480);
    assert!(value
        .warnings
        .iter()
        .any(|warning| warning.as_ref() == "CORRECTION:flextime"));
}

#[test]
fn test_repeated_calculation_is_idempotent() {
    let days = january_days(10_000, 9_400);
    let rules = vec![monthly_cap(600)];
    let summary = AbsenceSummary::default();
    let employee = default_employee();

    let first =
        calculate_month(&input(&days, 100, &rules, &[], &summary, &[], &employee)).unwrap();
    let second =
        calculate_month(&input(&days, 100, &rules, &[], &summary, &[], &employee)).unwrap();
    assert_eq!(first.value, second.value);
    assert_eq!(first.postings, second.postings);
}

#[test]
fn test_error_days_are_counted() {
    let mut errored = daily(date!(2024 - 01 - 02), 480, 480);
    errored.has_error = true;
    let days = vec![errored, daily(date!(2024 - 01 - 03), 480, 480)];
    let summary = AbsenceSummary::default();
    let employee = default_employee();

    let result = calculate_month(&input(&days, 0, &[], &[], &summary, &[], &employee)).unwrap();
    assert_eq!(result.value.days_with_errors, 1);
    assert_eq!(result.value.work_days, 2);
}
