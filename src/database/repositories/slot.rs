use anyhow::Result;
use chrono::{NaiveDateTime, Utc};
use sqlx::SqlitePool;

use crate::database::models::{AvailabilitySlot, BlockInput, CoverageType};

#[derive(Clone)]
pub struct SlotRepository {
    pool: SqlitePool,
}

impl SlotRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_blocks(
        &self,
        from: Option<NaiveDateTime>,
        to: Option<NaiveDateTime>,
    ) -> Result<Vec<AvailabilitySlot>> {
        let mut query = r#"
            SELECT
                id,
                start_time,
                end_time,
                is_booked,
                coverage_type,
                created_at,
                updated_at
            FROM
                availability_slots
            "#
        .to_string();

        let mut conditions = vec![];

        if from.is_some() {
            conditions.push("end_time >= ?");
        }
        if to.is_some() {
            conditions.push("start_time <= ?");
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY start_time ASC");

        let mut prepared = sqlx::query_as::<_, AvailabilitySlot>(&query);
        if let Some(from) = from {
            prepared = prepared.bind(from);
        }
        if let Some(to) = to {
            prepared = prepared.bind(to);
        }

        let slots = prepared.fetch_all(&self.pool).await?;

        Ok(slots)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<AvailabilitySlot>> {
        let slot = sqlx::query_as::<_, AvailabilitySlot>(
            r#"
            SELECT
                id,
                start_time,
                end_time,
                is_booked,
                coverage_type,
                created_at,
                updated_at
            FROM
                availability_slots
            WHERE
                id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(slot)
    }

    pub async fn create_block(&self, input: BlockInput) -> Result<AvailabilitySlot> {
        let now = Utc::now().naive_utc();
        let coverage = input.coverage_type.unwrap_or_default();

        let slot = sqlx::query_as::<_, AvailabilitySlot>(
            r#"
            INSERT INTO
                availability_slots (start_time, end_time, is_booked, coverage_type, created_at, updated_at)
            VALUES
                (?, ?, 0, ?, ?, ?)
            RETURNING
                id,
                start_time,
                end_time,
                is_booked,
                coverage_type,
                created_at,
                updated_at
            "#,
        )
        .bind(input.start_time)
        .bind(input.end_time)
        .bind(coverage)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(slot)
    }

    pub async fn update_block(
        &self,
        id: i64,
        input: BlockInput,
    ) -> Result<Option<AvailabilitySlot>> {
        let now = Utc::now().naive_utc();
        let coverage = input.coverage_type.unwrap_or_default();

        let slot = sqlx::query_as::<_, AvailabilitySlot>(
            r#"
            UPDATE
                availability_slots
            SET
                start_time = ?,
                end_time = ?,
                coverage_type = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                start_time,
                end_time,
                is_booked,
                coverage_type,
                created_at,
                updated_at
            "#,
        )
        .bind(input.start_time)
        .bind(input.end_time)
        .bind(coverage)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(slot)
    }

    // Standalone form for manual corrections; the legacy request
    // transitions flip this flag inside their own transactions.
    pub async fn set_booked(&self, id: i64, is_booked: bool) -> Result<Option<AvailabilitySlot>> {
        let now = Utc::now().naive_utc();

        let slot = sqlx::query_as::<_, AvailabilitySlot>(
            r#"
            UPDATE
                availability_slots
            SET
                is_booked = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                start_time,
                end_time,
                is_booked,
                coverage_type,
                created_at,
                updated_at
            "#,
        )
        .bind(is_booked)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(slot)
    }

    pub async fn delete_block(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM availability_slots WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
