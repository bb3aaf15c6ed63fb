use std::sync::Arc;

use service::booking::PairingOutcome;
use service::daily_value::{BreakItem, BreakReason, WARNING_NEGATIVE_NET_CLAMPED};
use service::day_plan::{BreakRule, BreakType};
use terp_utils::overlap_minutes;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BreakDeduction {
    pub net_time: i32,
    pub total_break_time: i32,
    pub items: Vec<BreakItem>,
    pub warnings: Vec<Arc<str>>,
}

/// Deducts breaks from the gross time in three phases: fixed rules against
/// the work pairs, actual break bookings (or the first auto-deduct variable
/// rule when none were booked), then minimum-break enforcement. `gross_time`
/// is presence time, booked breaks included, so a booked break is removed
/// here exactly once. Paid break rules are skipped. Net time never goes
/// below zero.
pub fn deduct_breaks(
    rules: &[BreakRule],
    pairing: &PairingOutcome,
    gross_time: i32,
) -> BreakDeduction {
    let mut deduction = BreakDeduction::default();

    for rule in rules
        .iter()
        .filter(|rule| rule.break_type == BreakType::Fixed && !rule.is_paid)
    {
        let overlap: i32 = pairing
            .work_pairs()
            .map(|pair| overlap_minutes(pair.start_time, pair.end_time, rule.start, rule.end))
            .sum();
        let deducted = overlap.min(rule.duration);
        if deducted > 0 {
            deduction.items.push(BreakItem {
                minutes: deducted,
                reason: BreakReason::FixedBreakOverlap,
            });
        }
    }

    let booked_breaks: i32 = pairing.break_pairs().map(|pair| pair.duration()).sum();
    if booked_breaks > 0 {
        deduction.items.push(BreakItem {
            minutes: booked_breaks,
            reason: BreakReason::ActualBreakBookings,
        });
    } else if let Some(rule) = rules
        .iter()
        .find(|rule| rule.break_type == BreakType::Variable && !rule.is_paid)
    {
        // Only the first variable rule is processed.
        if rule.auto_deduct && rule.duration > 0 {
            deduction.items.push(BreakItem {
                minutes: rule.duration,
                reason: BreakReason::AutoDeductNoBooking,
            });
        }
    }

    for rule in rules
        .iter()
        .filter(|rule| rule.break_type == BreakType::Minimum && !rule.is_paid)
    {
        let Some(threshold) = rule.after_work_minutes else {
            continue;
        };
        let total_so_far: i32 = deduction.items.iter().map(|item| item.minutes).sum();
        if gross_time > threshold && total_so_far < rule.duration {
            deduction.items.push(BreakItem {
                minutes: rule.duration - total_so_far,
                reason: BreakReason::MinimumBreakEnforcement,
            });
        }
    }

    deduction.total_break_time = deduction.items.iter().map(|item| item.minutes).sum();
    deduction.net_time = gross_time - deduction.total_break_time;
    if deduction.net_time < 0 {
        deduction.net_time = 0;
        deduction.warnings.push(WARNING_NEGATIVE_NET_CLAMPED.into());
    }

    deduction
}
