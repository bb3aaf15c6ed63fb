use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use service::account::{AccountPosting, POSTING_REASON_BONUS};
use service::absence::AbsenceDay;
use service::booking::{Booking, PairingOutcome};
use service::correction::{Correction, CorrectionType};
use service::daily_value::{
    CapSource, CappingItem, DailyValue, WARNING_ABSENCE_PREFIX, WARNING_BELOW_MIN_WORK_TIME,
    WARNING_CORE_TIME_MISSING, WARNING_CORRECTION_PREFIX, WARNING_HOLIDAY_PREFIX,
    WARNING_UNPAIRED_BOOKING,
};
use service::day_plan::{BonusCalculationType, BonusRule, DayPlan};
use service::employee::Employee;
use service::holiday::Holiday;
use terp_utils::overlap_minutes;
use time::Date;

use crate::booking_window::adjust_bookings;
use crate::break_deduction::deduct_breaks;
use crate::pairing::pair_bookings;

/// Everything one day's calculation needs, passed by value or reference.
/// The calculator reads no storage and is deterministic for equal inputs.
pub struct DayInput<'a> {
    pub date: Date,
    pub day_plan: Option<&'a DayPlan>,
    pub bookings: &'a [Booking],
    pub holiday: Option<&'a Holiday>,
    pub absence: Option<&'a AbsenceDay>,
    pub corrections: &'a [Correction],
    pub employee: &'a Employee,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayCalculation {
    pub value: DailyValue,
    pub postings: Vec<AccountPosting>,
}

/// Which credit applies when a holiday and an absence share the date: the
/// strictly higher priority wins, a tie goes to the holiday.
fn holiday_wins(holiday: &Holiday, absence: &AbsenceDay) -> bool {
    holiday.priority >= absence.absence_type.priority
}

fn scale_by_duration(minutes: i32, duration: Decimal) -> i32 {
    (Decimal::from(minutes) * duration).round().to_i32().unwrap_or(0)
}

/// Converts one employee-day of bookings plus configuration into a
/// `DailyValue` and the bonus postings the day earned.
pub fn calculate_day(input: &DayInput<'_>) -> DayCalculation {
    let mut value = DailyValue::empty(input.employee.id, input.date);

    // Target time for the day; an off day has none.
    let mut target_time = match input.day_plan {
        Some(plan) if plan.from_employee_master => input
            .employee
            .master_daily_target()
            .unwrap_or(plan.regular_hours),
        Some(plan) => plan.regular_hours,
        None => 0,
    };

    // Holiday versus absence. Only an applicable holiday and an approved
    // absence participate.
    let holiday = input
        .holiday
        .filter(|holiday| holiday.applies_to_department(input.employee.department_id));
    let absence = input.absence.filter(|absence| absence.is_approved());
    let (effective_holiday, effective_absence) = match (holiday, absence) {
        (Some(holiday), Some(absence)) if holiday_wins(holiday, absence) => (Some(holiday), None),
        (Some(_), Some(absence)) => (None, Some(absence)),
        (holiday, absence) => (holiday, absence),
    };

    let mut credit = 0;
    if let Some(holiday) = effective_holiday {
        let full_credit = match input.day_plan {
            Some(plan) => plan.holiday_credit_for(holiday.category, target_time),
            None => holiday.category.default_credit(target_time),
        };
        credit = if holiday.is_half_day {
            full_credit / 2
        } else {
            full_credit
        };
        let code = holiday.effective_code();
        value.push_warning(format!("{WARNING_HOLIDAY_PREFIX}{code}"));
        value.holiday_code = Some(code);
    } else if let Some(absence) = effective_absence {
        if absence.absence_type.counts_as_worktime {
            credit = scale_by_duration(target_time, absence.duration);
        } else {
            // The absence excuses its fraction of the day.
            target_time -= scale_by_duration(target_time, absence.duration);
        }
        let code = absence.absence_type.code.clone();
        value.push_warning(format!("{WARNING_ABSENCE_PREFIX}{code}"));
        value.absence_code = Some(code);
    }
    value.target_time = target_time;

    // Tolerance and rounding, then pairing. Without a plan there are no
    // windows, the raw times pair as they are.
    let pairing: PairingOutcome = match input.day_plan {
        Some(plan) => {
            let adjusted = adjust_bookings(plan, input.bookings);
            value.capping_items.extend(adjusted.capping_items.iter().copied());
            pair_bookings(&adjusted.bookings)
        }
        None => pair_bookings(input.bookings),
    };
    for _ in &pairing.unpaired {
        value.push_warning(WARNING_UNPAIRED_BOOKING);
    }

    // Gross time is the presence time: work plus booked breaks. A booked
    // break leaves the gross only through the break deduction below.
    value.gross_time = pairing.gross_time();
    value.first_come = pairing.work_pairs().map(|pair| pair.start_time).min();
    value.last_go = pairing.work_pairs().map(|pair| pair.end_time).max();

    // Break deduction.
    let break_rules = input.day_plan.map(|plan| plan.breaks.as_slice()).unwrap_or(&[]);
    let deduction = deduct_breaks(break_rules, &pairing, value.gross_time);
    value.break_time = deduction.total_break_time;
    value.break_items = deduction.items;
    for warning in &deduction.warnings {
        value.push_warning(warning.clone());
    }
    let negative_net_clamped = !deduction.warnings.is_empty();
    let mut net_time = deduction.net_time;

    // Cap to the plan's maximum net work time.
    if let Some(max_net) = input.day_plan.and_then(|plan| plan.max_net_work_time) {
        if net_time > max_net {
            value.capping_items.push(CappingItem {
                minutes: net_time - max_net,
                source: CapSource::MaxNetTime,
            });
            net_time = max_net;
        }
    }

    let worked_net = net_time;
    value.net_time = net_time + credit;
    value.credited_time = credit;
    value.overtime = (value.net_time - value.target_time).max(0);
    value.undertime = (value.target_time - value.net_time).max(0);
    value.capped_minutes = value.capping_items.iter().map(|item| item.minutes).sum();

    // Bonus rules credit side accounts, never the net time.
    let bonus_rules = input.day_plan.map(|plan| plan.bonuses.as_slice()).unwrap_or(&[]);
    let postings: Vec<AccountPosting> = bonus_rules
        .iter()
        .filter_map(|rule| bonus_posting(rule, input, &pairing, worked_net, effective_holiday))
        .collect();

    if let Some(plan) = input.day_plan {
        check_core_time(plan, &pairing, credit, &mut value);
        if let Some(min_work_time) = plan.min_work_time {
            if worked_net > 0 && worked_net < min_work_time {
                value.push_warning(WARNING_BELOW_MIN_WORK_TIME);
            }
        }
    }

    // Approved day-level corrections overlay the result last.
    for correction in input
        .corrections
        .iter()
        .filter(|correction| correction.is_approved() && correction.value_date == input.date)
    {
        match correction.correction_type {
            CorrectionType::Overtime => {
                value.overtime += correction.amount_minutes();
            }
            CorrectionType::Undertime => {
                value.undertime += correction.amount_minutes();
            }
            // Flextime, vacation and sick corrections overlay the month.
            _ => continue,
        }
        value.push_warning(format!(
            "{WARNING_CORRECTION_PREFIX}{}",
            correction.correction_type.as_str()
        ));
    }

    value.has_error = pairing.has_error() || negative_net_clamped;

    DayCalculation { value, postings }
}

fn bonus_posting(
    rule: &BonusRule,
    input: &DayInput<'_>,
    pairing: &PairingOutcome,
    worked_net: i32,
    holiday: Option<&Holiday>,
) -> Option<AccountPosting> {
    if holiday.is_some() && !rule.applies_on_holiday {
        return None;
    }
    if rule.min_work_minutes.is_some_and(|min| worked_net < min) {
        return None;
    }
    let overlap: i32 = pairing
        .work_pairs()
        .map(|pair| overlap_minutes(pair.start_time, pair.end_time, rule.time_from, rule.time_to))
        .sum();
    if overlap <= 0 {
        return None;
    }
    let minutes = match rule.calculation_type {
        BonusCalculationType::Fixed => rule.value_minutes,
        BonusCalculationType::PerMinute => overlap * rule.value_minutes,
        BonusCalculationType::Percentage => overlap * rule.value_minutes / 100,
    };
    (minutes > 0).then(|| AccountPosting {
        employee_id: input.employee.id,
        date: input.date,
        account_id: rule.account_id,
        minutes,
        reason: POSTING_REASON_BONUS.into(),
    })
}

/// Work must cover the core window; a day fully excused by a credit is not
/// checked. Missing coverage is an advisory warning.
fn check_core_time(
    plan: &DayPlan,
    pairing: &PairingOutcome,
    credit: i32,
    value: &mut DailyValue,
) {
    let (Some(core_start), Some(core_end)) = (plan.core_start, plan.core_end) else {
        return;
    };
    if core_end <= core_start || credit > 0 || value.target_time == 0 {
        return;
    }
    let covered: i32 = pairing
        .work_pairs()
        .map(|pair| overlap_minutes(pair.start_time, pair.end_time, core_start, core_end))
        .sum();
    if covered < core_end - core_start {
        value.push_warning(WARNING_CORE_TIME_MISSING);
    }
}
