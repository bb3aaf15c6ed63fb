use service::booking::{AdjustedBookings, Booking, BookingKind};
use service::daily_value::{CapSource, CappingItem};
use service::day_plan::{DayPlan, Rounding, RoundingMode};

/// Which side of the day a booking time belongs to. Rounding direction
/// depends on it: `Up` moves a come later and a go earlier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Come,
    Go,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowAdjustment {
    pub time: i32,
    pub capped: Option<CappingItem>,
}

impl WindowAdjustment {
    fn kept(time: i32) -> Self {
        Self { time, capped: None }
    }
}

/// Tolerance for a come booking against the plan's come window.
///
/// Early arrivals inside the tolerance snap to the window start without
/// credit; arrivals before the clamp floor are cut and the cut minutes are
/// recorded. On fixed plans the tolerance does not widen the window, the
/// floor is the window start itself.
pub fn apply_come_tolerance(plan: &DayPlan, time: i32) -> WindowAdjustment {
    let Some(come_from) = plan.come_from else {
        return WindowAdjustment::kept(time);
    };
    let minus = if plan.tolerance_expands_window() {
        plan.tolerance_come_minus
    } else {
        0
    };
    let floor = come_from - minus;
    if time < floor {
        WindowAdjustment {
            time: floor,
            capped: Some(CappingItem {
                minutes: floor - time,
                source: CapSource::EarlyArrival,
            }),
        }
    } else if time <= come_from {
        WindowAdjustment::kept(come_from)
    } else {
        // Late arrival: kept, target and bonus handling account for it.
        WindowAdjustment::kept(time)
    }
}

/// Mirror of the come rule: departures inside the tolerance snap down to
/// the window end, departures past the clamp ceiling are cut.
pub fn apply_go_tolerance(plan: &DayPlan, time: i32) -> WindowAdjustment {
    let Some(go_to) = plan.go_to else {
        return WindowAdjustment::kept(time);
    };
    let plus = if plan.tolerance_expands_window() {
        plan.tolerance_go_plus
    } else {
        0
    };
    let ceiling = go_to + plus;
    if time > ceiling {
        WindowAdjustment {
            time: ceiling,
            capped: Some(CappingItem {
                minutes: time - ceiling,
                source: CapSource::LateDeparture,
            }),
        }
    } else if time >= go_to {
        WindowAdjustment::kept(go_to)
    } else {
        WindowAdjustment::kept(time)
    }
}

/// Rounds a tolerance-adjusted time. Idempotent for every mode.
pub fn round_time(rounding: Rounding, side: Side, time: i32) -> i32 {
    let interval = rounding.interval;
    if interval <= 1 {
        return time;
    }
    match (rounding.mode, side) {
        (RoundingMode::None, _) => time,
        (RoundingMode::Up, Side::Come) | (RoundingMode::Down, Side::Go) => {
            time.div_euclid(interval) * interval
                + if time.rem_euclid(interval) > 0 { interval } else { 0 }
        }
        (RoundingMode::Up, Side::Go) | (RoundingMode::Down, Side::Come) => {
            time.div_euclid(interval) * interval
        }
        (RoundingMode::Nearest, _) => (time + interval / 2).div_euclid(interval) * interval,
    }
}

/// Applies tolerance and rounding to every come/go booking, filling in
/// `calculated_time` and collecting the window capping. Break punches pass
/// through untouched.
pub fn adjust_bookings(plan: &DayPlan, bookings: &[Booking]) -> AdjustedBookings {
    let mut capping_items = Vec::new();
    let adjusted: Vec<Booking> = bookings
        .iter()
        .map(|booking| {
            let mut booking = booking.clone();
            let effective = booking.effective_time();
            let calculated = match booking.kind {
                BookingKind::Come => {
                    let adjustment = apply_come_tolerance(plan, effective);
                    if let Some(item) = adjustment.capped {
                        capping_items.push(item);
                    }
                    round_time(plan.come_rounding, Side::Come, adjustment.time)
                }
                BookingKind::Go => {
                    let adjustment = apply_go_tolerance(plan, effective);
                    if let Some(item) = adjustment.capped {
                        capping_items.push(item);
                    }
                    round_time(plan.go_rounding, Side::Go, adjustment.time)
                }
                BookingKind::BreakStart | BookingKind::BreakEnd => effective,
            };
            booking.calculated_time = Some(calculated);
            booking
        })
        .collect();
    AdjustedBookings {
        bookings: adjusted.into(),
        capping_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::day_plan::PlanType;
    use uuid::Uuid;

    fn plan() -> DayPlan {
        DayPlan {
            id: Uuid::nil(),
            tenant_id: Uuid::nil(),
            name: "day shift".into(),
            plan_type: PlanType::Flextime,
            come_from: Some(420),
            come_to: Some(540),
            go_from: Some(900),
            go_to: Some(1080),
            core_start: None,
            core_end: None,
            regular_hours: 480,
            tolerance_come_plus: 10,
            tolerance_come_minus: 15,
            tolerance_go_plus: 15,
            tolerance_go_minus: 10,
            come_rounding: Rounding::none(),
            go_rounding: Rounding::none(),
            min_work_time: None,
            max_net_work_time: None,
            variable_worktime: true,
            from_employee_master: false,
            holiday_credit_category1: None,
            holiday_credit_category2: None,
            holiday_credit_category3: None,
            breaks: Vec::new(),
            bonuses: Vec::new(),
            version: Uuid::nil(),
        }
    }

    #[test]
    fn test_come_before_tolerance_is_clamped_and_capped() {
        let adjustment = apply_come_tolerance(&plan(), 390);
        assert_eq!(adjustment.time, 405);
        assert_eq!(
            adjustment.capped,
            Some(CappingItem {
                minutes: 15,
                source: CapSource::EarlyArrival,
            })
        );
    }

    #[test]
    fn test_come_inside_tolerance_snaps_to_window_start() {
        assert_eq!(apply_come_tolerance(&plan(), 410).time, 420);
        assert_eq!(apply_come_tolerance(&plan(), 420).time, 420);
        assert!(apply_come_tolerance(&plan(), 410).capped.is_none());
    }

    #[test]
    fn test_come_after_window_start_is_kept() {
        assert_eq!(apply_come_tolerance(&plan(), 430).time, 430);
        assert_eq!(apply_come_tolerance(&plan(), 700).time, 700);
    }

    #[test]
    fn test_fixed_plan_clamps_at_window_start() {
        let mut fixed_plan = plan();
        fixed_plan.plan_type = PlanType::Fixed;
        let adjustment = apply_come_tolerance(&fixed_plan, 405);
        assert_eq!(adjustment.time, 420);
        assert_eq!(
            adjustment.capped,
            Some(CappingItem {
                minutes: 15,
                source: CapSource::EarlyArrival,
            })
        );
    }

    #[test]
    fn test_go_past_tolerance_is_clamped_and_capped() {
        let adjustment = apply_go_tolerance(&plan(), 1110);
        assert_eq!(adjustment.time, 1095);
        assert_eq!(
            adjustment.capped,
            Some(CappingItem {
                minutes: 15,
                source: CapSource::LateDeparture,
            })
        );
    }

    #[test]
    fn test_go_inside_tolerance_snaps_to_window_end() {
        assert_eq!(apply_go_tolerance(&plan(), 1090).time, 1080);
        assert!(apply_go_tolerance(&plan(), 1090).capped.is_none());
    }

    #[test]
    fn test_go_before_window_end_is_kept() {
        assert_eq!(apply_go_tolerance(&plan(), 1000).time, 1000);
        assert_eq!(apply_go_tolerance(&plan(), 880).time, 880);
    }

    #[test]
    fn test_tolerance_is_monotonic() {
        let plan = plan();
        let mut previous = i32::MIN;
        for time in 0..1440 {
            let adjusted = apply_come_tolerance(&plan, time).time;
            assert!(adjusted >= previous);
            previous = adjusted;
        }
    }

    fn rounding(mode: RoundingMode, interval: i32) -> Rounding {
        Rounding { mode, interval }
    }

    #[test]
    fn test_rounding_up_moves_come_later_and_go_earlier() {
        assert_eq!(round_time(rounding(RoundingMode::Up, 15), Side::Come, 482), 495);
        assert_eq!(round_time(rounding(RoundingMode::Up, 15), Side::Go, 1022), 1020);
    }

    #[test]
    fn test_rounding_down_moves_come_earlier_and_go_later() {
        assert_eq!(round_time(rounding(RoundingMode::Down, 15), Side::Come, 482), 480);
        assert_eq!(round_time(rounding(RoundingMode::Down, 15), Side::Go, 1022), 1035);
    }

    #[test]
    fn test_rounding_nearest_is_half_up() {
        assert_eq!(round_time(rounding(RoundingMode::Nearest, 10), Side::Come, 484), 480);
        assert_eq!(round_time(rounding(RoundingMode::Nearest, 10), Side::Come, 485), 490);
    }

    #[test]
    fn test_rounding_is_idempotent() {
        for mode in [
            RoundingMode::None,
            RoundingMode::Up,
            RoundingMode::Down,
            RoundingMode::Nearest,
        ] {
            for interval in [1, 5, 7, 15, 30, 60] {
                for side in [Side::Come, Side::Go] {
                    for time in (0..1440).step_by(11) {
                        let once = round_time(rounding(mode, interval), side, time);
                        let twice = round_time(rounding(mode, interval), side, once);
                        assert_eq!(once, twice);
                    }
                }
            }
        }
    }
}
