use std::sync::Arc;

use serde::Serialize;
use time::Date;
use uuid::Uuid;

pub const POSTING_REASON_BONUS: &str = "bonus";
pub const POSTING_REASON_CAPPING_TRANSFER: &str = "capping_transfer";

/// Ledger event emitted for bonus credits and capping transfers. The engine
/// produces these as values; persistence happens at the service boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountPosting {
    pub employee_id: Uuid,
    pub date: Date,
    pub account_id: Uuid,
    pub minutes: i32,
    pub reason: Arc<str>,
}

impl AccountPosting {
    pub fn to_entity(
        &self,
        id: Uuid,
        created: time::PrimitiveDateTime,
        version: Uuid,
    ) -> dao::account::AccountPostingEntity {
        dao::account::AccountPostingEntity {
            id,
            employee_id: self.employee_id,
            date: self.date,
            account_id: self.account_id,
            minutes: self.minutes,
            reason: self.reason.clone(),
            created,
            version,
        }
    }
}
