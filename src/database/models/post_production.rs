use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Created when a shoot is finished, deleted again when it is
/// reverted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PostProductionRecord {
    pub id: i64,
    pub shoot_id: i64,
    pub status: String,
    pub created_at: NaiveDateTime,
}
