pub mod macros;

pub mod booking_window;
pub mod break_deduction;
pub mod calculation;
pub mod calculation_lock;
pub mod clock;
pub mod closing;
pub mod daily_calculation;
pub mod monthly_calculation;
pub mod pairing;
pub mod schedule;
pub mod uuid_service;

mod test;
