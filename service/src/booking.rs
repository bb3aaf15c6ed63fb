use std::sync::Arc;

use time::Date;
use uuid::Uuid;

use crate::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BookingKind {
    Come,
    BreakStart,
    BreakEnd,
    Go,
}

impl BookingKind {
    /// Tie-break order for bookings stamped at the same minute.
    pub fn sort_rank(&self) -> u8 {
        match self {
            BookingKind::Come => 0,
            BookingKind::BreakStart => 1,
            BookingKind::BreakEnd => 2,
            BookingKind::Go => 3,
        }
    }

    pub fn is_arrival_side(&self) -> bool {
        matches!(self, BookingKind::Come | BookingKind::BreakEnd)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookingSource {
    Web,
    Terminal,
    Api,
    Import,
    Correction,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub employee_id: Uuid,
    pub date: Date,
    pub kind: BookingKind,
    pub original_time: i32,
    pub edited_time: Option<i32>,
    pub calculated_time: Option<i32>,
    pub pair_id: Option<Uuid>,
    pub source: BookingSource,
    pub created: Option<time::PrimitiveDateTime>,
    pub deleted: Option<time::PrimitiveDateTime>,
    pub version: Uuid,
}

impl Booking {
    /// The supervisor edit wins over the raw punch; the calculated time is
    /// derived from this by tolerance and rounding.
    pub fn effective_time(&self) -> i32 {
        self.edited_time.unwrap_or(self.original_time)
    }

    /// Time the pairing layer works with, once tolerance and rounding ran.
    pub fn pairing_time(&self) -> i32 {
        self.calculated_time.unwrap_or_else(|| self.effective_time())
    }
}

impl From<&dao::booking::BookingKindEntity> for BookingKind {
    fn from(kind: &dao::booking::BookingKindEntity) -> Self {
        match kind {
            dao::booking::BookingKindEntity::Come => Self::Come,
            dao::booking::BookingKindEntity::BreakStart => Self::BreakStart,
            dao::booking::BookingKindEntity::BreakEnd => Self::BreakEnd,
            dao::booking::BookingKindEntity::Go => Self::Go,
        }
    }
}
impl From<&BookingKind> for dao::booking::BookingKindEntity {
    fn from(kind: &BookingKind) -> Self {
        match kind {
            BookingKind::Come => Self::Come,
            BookingKind::BreakStart => Self::BreakStart,
            BookingKind::BreakEnd => Self::BreakEnd,
            BookingKind::Go => Self::Go,
        }
    }
}

impl From<&dao::booking::BookingSourceEntity> for BookingSource {
    fn from(source: &dao::booking::BookingSourceEntity) -> Self {
        match source {
            dao::booking::BookingSourceEntity::Web => Self::Web,
            dao::booking::BookingSourceEntity::Terminal => Self::Terminal,
            dao::booking::BookingSourceEntity::Api => Self::Api,
            dao::booking::BookingSourceEntity::Import => Self::Import,
            dao::booking::BookingSourceEntity::Correction => Self::Correction,
        }
    }
}
impl From<&BookingSource> for dao::booking::BookingSourceEntity {
    fn from(source: &BookingSource) -> Self {
        match source {
            BookingSource::Web => Self::Web,
            BookingSource::Terminal => Self::Terminal,
            BookingSource::Api => Self::Api,
            BookingSource::Import => Self::Import,
            BookingSource::Correction => Self::Correction,
        }
    }
}

impl From<&dao::booking::BookingEntity> for Booking {
    fn from(entity: &dao::booking::BookingEntity) -> Self {
        Self {
            id: entity.id,
            tenant_id: entity.tenant_id,
            employee_id: entity.employee_id,
            date: entity.date,
            kind: (&entity.kind).into(),
            original_time: entity.original_time,
            edited_time: entity.edited_time,
            calculated_time: entity.calculated_time,
            pair_id: entity.pair_id,
            source: (&entity.source).into(),
            created: Some(entity.created),
            deleted: entity.deleted,
            version: entity.version,
        }
    }
}
terp_utils::derive_from_reference!(dao::booking::BookingEntity, Booking);

impl TryFrom<&Booking> for dao::booking::BookingEntity {
    type Error = ServiceError;
    fn try_from(booking: &Booking) -> Result<Self, Self::Error> {
        Ok(Self {
            id: booking.id,
            tenant_id: booking.tenant_id,
            employee_id: booking.employee_id,
            date: booking.date,
            kind: (&booking.kind).into(),
            original_time: booking.original_time,
            edited_time: booking.edited_time,
            calculated_time: booking.calculated_time,
            pair_id: booking.pair_id,
            source: (&booking.source).into(),
            created: booking.created.ok_or(ServiceError::InternalError)?,
            deleted: booking.deleted,
            version: booking.version,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairKind {
    Work,
    Break,
}

/// Derived presence interval; never stored. Cross-midnight pairs are not
/// supported, `end_time >= start_time` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookingPair {
    pub kind: PairKind,
    pub start_time: i32,
    pub end_time: i32,
}

impl BookingPair {
    pub fn new(kind: PairKind, start_time: i32, end_time: i32) -> Option<Self> {
        (end_time >= start_time).then_some(Self {
            kind,
            start_time,
            end_time,
        })
    }

    pub fn duration(&self) -> i32 {
        self.end_time - self.start_time
    }

    pub fn is_work(&self) -> bool {
        self.kind == PairKind::Work
    }
}

/// Pairing result for one employee-day: the pairs plus the bookings the
/// state machine could not place.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PairingOutcome {
    pub pairs: Vec<BookingPair>,
    pub unpaired: Vec<Uuid>,
}

impl PairingOutcome {
    pub fn has_error(&self) -> bool {
        !self.unpaired.is_empty()
    }

    pub fn work_pairs(&self) -> impl Iterator<Item = &BookingPair> {
        self.pairs.iter().filter(|p| p.kind == PairKind::Work)
    }

    pub fn break_pairs(&self) -> impl Iterator<Item = &BookingPair> {
        self.pairs.iter().filter(|p| p.kind == PairKind::Break)
    }

    /// Presence time of the day: work pairs plus booked breaks. Booked
    /// breaks stay in the gross time and leave it only through the break
    /// deduction, so they are never counted twice.
    pub fn gross_time(&self) -> i32 {
        self.pairs.iter().map(|pair| pair.duration()).sum()
    }
}

/// Booking list decorated with window capping collected while tolerance and
/// rounding ran.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjustedBookings {
    pub bookings: Arc<[Booking]>,
    pub capping_items: Vec<crate::daily_value::CappingItem>,
}
