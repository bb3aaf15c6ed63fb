use rust_decimal::Decimal;
use service::ServiceError;
use service::absence::{AbsenceCategory, AbsenceDay};
use service::account::{AccountPosting, POSTING_REASON_CAPPING_TRANSFER};
use service::capping::{CappingAction, CappingExemption, CappingRule};
use service::correction::{Correction, CorrectionType};
use service::daily_value::{DailyValue, WARNING_CORRECTION_PREFIX};
use service::employee::Employee;
use service::monthly_value::{MonthlyValue, WARNING_CAPPING_EXEMPTION_EXPIRED};
use terp_utils::month_bounds;

/// Absence day counts of one month, grouped by absence-type category.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AbsenceSummary {
    pub vacation_days: Decimal,
    pub sick_days: Decimal,
    pub other_days: Decimal,
}

impl AbsenceSummary {
    pub fn from_absences(absences: &[AbsenceDay]) -> Self {
        let mut summary = Self::default();
        for absence in absences.iter().filter(|absence| absence.is_approved()) {
            match absence.absence_type.category {
                AbsenceCategory::Vacation => summary.vacation_days += absence.duration,
                AbsenceCategory::Sick => summary.sick_days += absence.duration,
                AbsenceCategory::Other => summary.other_days += absence.duration,
            }
        }
        summary
    }
}

pub struct MonthInput<'a> {
    pub employee: &'a Employee,
    pub year: i32,
    pub month: u8,
    pub daily_values: &'a [DailyValue],
    pub previous_carryover: i32,
    pub capping_rules: &'a [CappingRule],
    pub exemptions: &'a [CappingExemption],
    pub absence_summary: &'a AbsenceSummary,
    pub corrections: &'a [Correction],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthCalculation {
    pub value: MonthlyValue,
    pub postings: Vec<AccountPosting>,
}

/// Aggregates a month of daily values into a `MonthlyValue`: sums, the
/// flextime chain, capping with exemptions, absence summary and the
/// month-level correction overlay. Pure and idempotent.
pub fn calculate_month(input: &MonthInput<'_>) -> Result<MonthCalculation, ServiceError> {
    let (_, last_day) = month_bounds(input.year, input.month)?;
    let mut value = MonthlyValue::empty(input.employee.id, input.year, input.month);
    let mut postings = Vec::new();

    for daily in input.daily_values {
        value.total_gross += daily.gross_time;
        value.total_net += daily.net_time;
        value.total_target += daily.target_time;
        value.total_overtime += daily.overtime;
        value.total_undertime += daily.undertime;
        value.total_break += daily.break_time;
        if daily.net_time > 0 {
            value.work_days += 1;
        }
        if daily.has_error {
            value.days_with_errors += 1;
        }
    }

    value.flextime_start = input.previous_carryover;
    value.flextime_change = value.total_net - value.total_target;
    value.flextime_end = value.flextime_start + value.flextime_change;

    // Capping, highest priority first.
    let mut rules: Vec<&CappingRule> = input
        .capping_rules
        .iter()
        .filter(|rule| rule.should_apply_on(last_day))
        .collect();
    rules.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.id.cmp(&b.id)));
    for rule in rules {
        let rule_exemptions: Vec<&CappingExemption> = input
            .exemptions
            .iter()
            .filter(|exemption| {
                exemption.capping_rule_id == rule.id
                    && exemption.employee_id == input.employee.id
            })
            .collect();
        if rule_exemptions.iter().any(|exemption| exemption.covers(last_day)) {
            continue;
        }
        if rule_exemptions
            .iter()
            .any(|exemption| exemption.expired_before(last_day))
        {
            value
                .warnings
                .push(WARNING_CAPPING_EXEMPTION_EXPIRED.into());
        }

        if let Some(positive_cap) = rule.positive_cap {
            if value.flextime_end > positive_cap {
                let excess = value.flextime_end - positive_cap;
                value.flextime_forfeited += excess;
                value.flextime_end = positive_cap;
                if rule.action == CappingAction::TransferAccount {
                    if let Some(account_id) = rule.transfer_account_id {
                        postings.push(AccountPosting {
                            employee_id: input.employee.id,
                            date: last_day,
                            account_id,
                            minutes: excess,
                            reason: POSTING_REASON_CAPPING_TRANSFER.into(),
                        });
                    }
                }
            }
        }
        // Negative excess is clamped but never forfeited.
        if let Some(negative_cap) = rule.negative_cap {
            if value.flextime_end < -negative_cap {
                value.flextime_end = -negative_cap;
            }
        }
    }
    value.flextime_carryover = value.flextime_end;

    value.vacation_taken = input.absence_summary.vacation_days;
    value.sick_days = input.absence_summary.sick_days;
    value.other_absence_days = input.absence_summary.other_days;

    // Approved month-level corrections overlay the capped result.
    for correction in input
        .corrections
        .iter()
        .filter(|correction| correction.is_approved())
    {
        match correction.correction_type {
            CorrectionType::Flextime => {
                value.flextime_end += correction.amount_minutes();
                value.flextime_carryover = value.flextime_end;
            }
            CorrectionType::Vacation => {
                value.vacation_taken += correction.amount;
            }
            CorrectionType::Sick => {
                value.sick_days += correction.amount;
            }
            // Overtime and undertime corrections already overlaid the day.
            CorrectionType::Overtime | CorrectionType::Undertime => continue,
        }
        value.warnings.push(
            format!(
                "{WARNING_CORRECTION_PREFIX}{}",
                correction.correction_type.as_str()
            )
            .into(),
        );
    }

    Ok(MonthCalculation { value, postings })
}
