use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::models::{AvailabilityRequest, RequestStatus};

const REQUEST_COLUMNS: &str = r#"
    id,
    slot_id,
    agency_id,
    status,
    created_at,
    updated_at
"#;

// Legacy slot-bound request path. Approval and rejection may touch
// the request row and the referenced slot's booked flag, so both run
// inside a transaction.
#[derive(Clone)]
pub struct AvailabilityRequestRepository {
    pool: SqlitePool,
}

impl AvailabilityRequestRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, slot_id: i64, agency_id: i64) -> Result<AvailabilityRequest> {
        let now = Utc::now().naive_utc();

        let request = sqlx::query_as::<_, AvailabilityRequest>(&format!(
            r#"
            INSERT INTO
                availability_requests (slot_id, agency_id, status, created_at, updated_at)
            VALUES
                (?, ?, ?, ?, ?)
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(slot_id)
        .bind(agency_id)
        .bind(RequestStatus::Pending)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<AvailabilityRequest>> {
        let request = sqlx::query_as::<_, AvailabilityRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM availability_requests WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn list(&self, agency_id: Option<i64>) -> Result<Vec<AvailabilityRequest>> {
        let mut query = format!("SELECT {REQUEST_COLUMNS} FROM availability_requests");
        if agency_id.is_some() {
            query.push_str(" WHERE agency_id = ?");
        }
        query.push_str(" ORDER BY created_at DESC");

        let mut prepared = sqlx::query_as::<_, AvailabilityRequest>(&query);
        if let Some(agency_id) = agency_id {
            prepared = prepared.bind(agency_id);
        }

        let requests = prepared.fetch_all(&self.pool).await?;

        Ok(requests)
    }

    // The slot update is guarded so an already-booked slot is never
    // booked twice.
    pub async fn approve(&self, id: i64) -> Result<Option<AvailabilityRequest>> {
        let now = Utc::now().naive_utc();
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, AvailabilityRequest>(&format!(
            "UPDATE availability_requests SET status = ?, updated_at = ? WHERE id = ? AND status = ? RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(RequestStatus::Approved)
        .bind(now)
        .bind(id)
        .bind(RequestStatus::Pending)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(request) = request else {
            tx.rollback().await?;
            return Ok(None);
        };

        let booked = sqlx::query(
            "UPDATE availability_slots SET is_booked = 1, updated_at = ? WHERE id = ? AND is_booked = 0",
        )
        .bind(now)
        .bind(request.slot_id)
        .execute(&mut *tx)
        .await?;

        if booked.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;

        Ok(Some(request))
    }

    // The slot is released only when this request had booked it;
    // rejecting a pending loser must not free a slot an approved
    // winner holds.
    pub async fn reject(&self, id: i64) -> Result<Option<AvailabilityRequest>> {
        let now = Utc::now().naive_utc();
        let mut tx = self.pool.begin().await?;

        let prior = sqlx::query_as::<_, AvailabilityRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM availability_requests WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(prior) = prior else {
            tx.rollback().await?;
            return Ok(None);
        };

        let request = sqlx::query_as::<_, AvailabilityRequest>(&format!(
            "UPDATE availability_requests SET status = ?, updated_at = ? WHERE id = ? RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(RequestStatus::Rejected)
        .bind(now)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if prior.status == RequestStatus::Approved {
            sqlx::query(
                "UPDATE availability_slots SET is_booked = 0, updated_at = ? WHERE id = ?",
            )
            .bind(now)
            .bind(request.slot_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Some(request))
    }
}
