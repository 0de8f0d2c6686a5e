use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::macros::string_enum;

/// An administrator-authored unavailability window. Never scoped to
/// an agency; rendered to every principal as a generic range.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub is_booked: bool,
    pub coverage_type: CoverageType,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInput {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub coverage_type: Option<CoverageType>,
}

string_enum! {
    // Informational only; `half` does not participate in any
    // conflict check.
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    pub enum CoverageType {
        Full => "full",
        Half => "half",
    }
}

impl Default for CoverageType {
    fn default() -> Self {
        CoverageType::Full
    }
}
