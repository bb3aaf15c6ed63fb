use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use time::Date;
use uuid::Uuid;

use crate::ServiceError;

/// Warning codes recorded on a daily value. Computational inconsistencies
/// are recorded here and never abort batch computation.
pub const WARNING_UNPAIRED_BOOKING: &str = "unpaired_booking";
pub const WARNING_NEGATIVE_NET_CLAMPED: &str = "negative_net_clamped";
pub const WARNING_CORE_TIME_MISSING: &str = "core_time_missing";
pub const WARNING_BELOW_MIN_WORK_TIME: &str = "below_min_work_time";
pub const WARNING_HOLIDAY_PREFIX: &str = "HOLIDAY:";
pub const WARNING_ABSENCE_PREFIX: &str = "ABSENCE:";
pub const WARNING_CORRECTION_PREFIX: &str = "CORRECTION:";

#[derive(Debug, Error)]
pub enum CapSourceParseError {
    #[error("Invalid capping source: {0}")]
    InvalidSource(String),
}

/// Where capped minutes were cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapSource {
    EarlyArrival,
    LateDeparture,
    MaxNetTime,
}

impl CapSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapSource::EarlyArrival => "early_arrival",
            CapSource::LateDeparture => "late_departure",
            CapSource::MaxNetTime => "max_net_time",
        }
    }
}

impl FromStr for CapSource {
    type Err = CapSourceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "early_arrival" => Ok(CapSource::EarlyArrival),
            "late_departure" => Ok(CapSource::LateDeparture),
            "max_net_time" => Ok(CapSource::MaxNetTime),
            _ => Err(CapSourceParseError::InvalidSource(s.into())),
        }
    }
}

/// Why break minutes were deducted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakReason {
    FixedBreakOverlap,
    ActualBreakBookings,
    AutoDeductNoBooking,
    MinimumBreakEnforcement,
}

impl BreakReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakReason::FixedBreakOverlap => "fixed_break_overlap",
            BreakReason::ActualBreakBookings => "actual_break_bookings",
            BreakReason::AutoDeductNoBooking => "auto_deduct_no_booking",
            BreakReason::MinimumBreakEnforcement => "minimum_break_enforcement",
        }
    }
}

impl FromStr for BreakReason {
    type Err = CapSourceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed_break_overlap" => Ok(BreakReason::FixedBreakOverlap),
            "actual_break_bookings" => Ok(BreakReason::ActualBreakBookings),
            "auto_deduct_no_booking" => Ok(BreakReason::AutoDeductNoBooking),
            "minimum_break_enforcement" => Ok(BreakReason::MinimumBreakEnforcement),
            _ => Err(CapSourceParseError::InvalidSource(s.into())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CappingItem {
    pub minutes: i32,
    pub source: CapSource,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BreakItem {
    pub minutes: i32,
    pub reason: BreakReason,
}

/// Engine output for one employee-day. Owned by the employee record and
/// recomputed idempotently until the enclosing month is closed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DailyValue {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: Date,
    pub gross_time: i32,
    pub net_time: i32,
    /// Holiday or absence credit contained in `net_time`. Worked net time
    /// is `net_time - credited_time`; the conservation identity
    /// `gross = worked net + breaks + max-net capping` holds exactly.
    pub credited_time: i32,
    pub target_time: i32,
    pub overtime: i32,
    pub undertime: i32,
    pub break_time: i32,
    pub capped_minutes: i32,
    pub capping_items: Vec<CappingItem>,
    pub break_items: Vec<BreakItem>,
    pub first_come: Option<i32>,
    pub last_go: Option<i32>,
    pub has_error: bool,
    pub warnings: Vec<Arc<str>>,
    pub holiday_code: Option<Arc<str>>,
    pub absence_code: Option<Arc<str>>,
    #[serde(skip)]
    pub version: Uuid,
}

impl DailyValue {
    /// Zeroed value for a day without plan, bookings and credits.
    pub fn empty(employee_id: Uuid, date: Date) -> Self {
        Self {
            id: Uuid::nil(),
            employee_id,
            date,
            gross_time: 0,
            net_time: 0,
            credited_time: 0,
            target_time: 0,
            overtime: 0,
            undertime: 0,
            break_time: 0,
            capped_minutes: 0,
            capping_items: Vec::new(),
            break_items: Vec::new(),
            first_come: None,
            last_go: None,
            has_error: false,
            warnings: Vec::new(),
            holiday_code: None,
            absence_code: None,
            version: Uuid::nil(),
        }
    }

    pub fn push_warning(&mut self, warning: impl Into<Arc<str>>) {
        self.warnings.push(warning.into());
    }
}

impl TryFrom<&dao::daily_value::DailyValueEntity> for DailyValue {
    type Error = ServiceError;

    fn try_from(entity: &dao::daily_value::DailyValueEntity) -> Result<Self, Self::Error> {
        let capping_items = entity
            .capping_items
            .iter()
            .map(|item| {
                Ok(CappingItem {
                    minutes: item.minutes,
                    source: CapSource::from_str(&item.source)
                        .map_err(|_| ServiceError::InternalError)?,
                })
            })
            .collect::<Result<Vec<_>, ServiceError>>()?;
        let break_items = entity
            .break_items
            .iter()
            .map(|item| {
                Ok(BreakItem {
                    minutes: item.minutes,
                    reason: BreakReason::from_str(&item.reason)
                        .map_err(|_| ServiceError::InternalError)?,
                })
            })
            .collect::<Result<Vec<_>, ServiceError>>()?;
        Ok(Self {
            id: entity.id,
            employee_id: entity.employee_id,
            date: entity.date,
            gross_time: entity.gross_time,
            net_time: entity.net_time,
            credited_time: entity.credited_time,
            target_time: entity.target_time,
            overtime: entity.overtime,
            undertime: entity.undertime,
            break_time: entity.break_time,
            capped_minutes: entity.capped_minutes,
            capping_items,
            break_items,
            first_come: entity.first_come,
            last_go: entity.last_go,
            has_error: entity.has_error,
            warnings: entity.warnings.to_vec(),
            holiday_code: entity.holiday_code.clone(),
            absence_code: entity.absence_code.clone(),
            version: entity.version,
        })
    }
}

impl DailyValue {
    /// Storage form; `created` is stamped by the caller.
    pub fn to_entity(&self, created: time::PrimitiveDateTime) -> dao::daily_value::DailyValueEntity {
        dao::daily_value::DailyValueEntity {
            id: self.id,
            employee_id: self.employee_id,
            date: self.date,
            gross_time: self.gross_time,
            net_time: self.net_time,
            credited_time: self.credited_time,
            target_time: self.target_time,
            overtime: self.overtime,
            undertime: self.undertime,
            break_time: self.break_time,
            capped_minutes: self.capped_minutes,
            capping_items: self
                .capping_items
                .iter()
                .map(|item| dao::daily_value::CappingItemEntity {
                    minutes: item.minutes,
                    source: item.source.as_str().into(),
                })
                .collect(),
            break_items: self
                .break_items
                .iter()
                .map(|item| dao::daily_value::BreakItemEntity {
                    minutes: item.minutes,
                    reason: item.reason.as_str().into(),
                })
                .collect(),
            first_come: self.first_come,
            last_go: self.last_go,
            has_error: self.has_error,
            warnings: self.warnings.iter().cloned().collect(),
            holiday_code: self.holiday_code.clone(),
            absence_code: self.absence_code.clone(),
            created,
            deleted: None,
            version: self.version,
        }
    }
}
