use thiserror::Error;
use time::Date;
use uuid::Uuid;

pub mod absence;
pub mod account;
pub mod booking;
pub mod calculation;
pub mod capping;
pub mod clock;
pub mod closing;
pub mod correction;
pub mod daily_value;
pub mod day_plan;
pub mod employee;
pub mod employee_day_plan;
pub mod holiday;
pub mod monthly_value;
pub mod permission;
pub mod schedule;
pub mod tariff;
pub mod uuid_service;
pub mod week_plan;

pub use permission::PermissionService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database query error: {0}")]
    DatabaseQueryError(#[from] dao::DaoError),

    #[error("Forbidden")]
    Forbidden,

    #[error("Entity {0} not found")]
    EntityNotFound(Uuid),

    #[error("No day plan configuration for employee {0} on {1}")]
    MissingConfiguration(Uuid, Date),

    #[error("Month {month:02}/{year} is closed")]
    MonthClosed { year: i32, month: u8 },

    #[error("Month {month:02}/{year} starts in the future")]
    FutureMonth { year: i32, month: u8 },

    #[error("Invalid tariff configuration: {0}")]
    InvalidTariffConfig(&'static str),

    #[error("Rhythm tariff without a complete rhythm configuration")]
    MissingRhythmConfig,

    #[error("Week tariff without a week plan")]
    MissingWeekPlan,

    #[error("Tariff validity ranges overlap")]
    OverlappingTariff,

    #[error("Invalid date: {0}")]
    DateError(#[from] terp_utils::TerpDateError),

    #[error("Time component out of range: {0}")]
    ComponentRange(#[from] time::error::ComponentRange),

    #[error("Internal error")]
    InternalError,
}
