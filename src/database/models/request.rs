use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::macros::string_enum;

/// A request bound to a pre-existing `AvailabilitySlot` rather than a
/// freeform shoot.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub id: i64,
    pub slot_id: i64,
    pub agency_id: i64,
    pub status: RequestStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequestInput {
    pub slot_id: i64,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    pub enum RequestStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}
