use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::database::models::{PostProductionRecord, Shoot, ShootStatus};

const SHOOT_COLUMNS: &str = r#"
    id,
    client_id,
    agency_id,
    title,
    shoot_date,
    start_time,
    end_time,
    status,
    is_blocking,
    created_at,
    updated_at
"#;

// Fully-resolved row values; the booking service picks status and
// client before this point.
#[derive(Debug, Clone)]
pub struct NewShoot<'a> {
    pub title: &'a str,
    pub client_id: Option<i64>,
    pub agency_id: Option<i64>,
    pub shoot_date: NaiveDate,
    pub start_time: &'a str,
    pub end_time: &'a str,
    pub status: ShootStatus,
    pub is_blocking: bool,
}

#[derive(Clone)]
pub struct ShootRepository {
    pool: SqlitePool,
}

impl ShootRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // No tenant filtering here; that is the visibility engine's job.
    pub async fn list_shoots(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Shoot>> {
        let mut query = format!("SELECT {SHOOT_COLUMNS} FROM shoots");

        let mut conditions = vec![];
        if from.is_some() {
            conditions.push("shoot_date >= ?");
        }
        if to.is_some() {
            conditions.push("shoot_date <= ?");
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY shoot_date ASC, start_time ASC");

        let mut prepared = sqlx::query_as::<_, Shoot>(&query);
        if let Some(from) = from {
            prepared = prepared.bind(from);
        }
        if let Some(to) = to {
            prepared = prepared.bind(to);
        }

        let shoots = prepared.fetch_all(&self.pool).await?;

        Ok(shoots)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Shoot>> {
        let shoot =
            sqlx::query_as::<_, Shoot>(&format!("SELECT {SHOOT_COLUMNS} FROM shoots WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(shoot)
    }

    pub async fn create_shoot(&self, input: NewShoot<'_>) -> Result<Shoot> {
        let now = Utc::now().naive_utc();

        let shoot = sqlx::query_as::<_, Shoot>(&format!(
            r#"
            INSERT INTO
                shoots (title, client_id, agency_id, shoot_date, start_time, end_time, status, is_blocking, created_at, updated_at)
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {SHOOT_COLUMNS}
            "#
        ))
        .bind(input.title)
        .bind(input.client_id)
        .bind(input.agency_id)
        .bind(input.shoot_date)
        .bind(input.start_time)
        .bind(input.end_time)
        .bind(input.status)
        .bind(input.is_blocking)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(shoot)
    }

    pub async fn update_time(
        &self,
        id: i64,
        start_time: &str,
        end_time: &str,
    ) -> Result<Option<Shoot>> {
        let now = Utc::now().naive_utc();

        let shoot = sqlx::query_as::<_, Shoot>(&format!(
            "UPDATE shoots SET start_time = ?, end_time = ?, updated_at = ? WHERE id = ? RETURNING {SHOOT_COLUMNS}"
        ))
        .bind(start_time)
        .bind(end_time)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shoot)
    }

    pub async fn update_client(&self, id: i64, client_id: Option<i64>) -> Result<Option<Shoot>> {
        let now = Utc::now().naive_utc();

        let shoot = sqlx::query_as::<_, Shoot>(&format!(
            "UPDATE shoots SET client_id = ?, updated_at = ? WHERE id = ? RETURNING {SHOOT_COLUMNS}"
        ))
        .bind(client_id)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shoot)
    }

    pub async fn set_blocking(&self, id: i64, is_blocking: bool) -> Result<Option<Shoot>> {
        let now = Utc::now().naive_utc();

        let shoot = sqlx::query_as::<_, Shoot>(&format!(
            "UPDATE shoots SET is_blocking = ?, updated_at = ? WHERE id = ? RETURNING {SHOOT_COLUMNS}"
        ))
        .bind(is_blocking)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shoot)
    }

    pub async fn set_status(&self, id: i64, status: ShootStatus) -> Result<Option<Shoot>> {
        let now = Utc::now().naive_utc();

        let shoot = sqlx::query_as::<_, Shoot>(&format!(
            "UPDATE shoots SET status = ?, updated_at = ? WHERE id = ? RETURNING {SHOOT_COLUMNS}"
        ))
        .bind(status)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shoot)
    }

    // One statement so status and time are never half-applied.
    pub async fn approve(
        &self,
        id: i64,
        new_time: Option<(&str, &str)>,
        new_client: Option<i64>,
    ) -> Result<Option<Shoot>> {
        let now = Utc::now().naive_utc();

        let mut query = String::from("UPDATE shoots SET status = ?, updated_at = ?");
        if new_time.is_some() {
            query.push_str(", start_time = ?, end_time = ?");
        }
        if new_client.is_some() {
            query.push_str(", client_id = ?");
        }
        query.push_str(&format!(" WHERE id = ? RETURNING {SHOOT_COLUMNS}"));

        let mut prepared = sqlx::query_as::<_, Shoot>(&query)
            .bind(ShootStatus::Confirmed)
            .bind(now);
        if let Some((start, end)) = new_time {
            prepared = prepared.bind(start.to_string()).bind(end.to_string());
        }
        if let Some(client_id) = new_client {
            prepared = prepared.bind(client_id);
        }

        let shoot = prepared.bind(id).fetch_optional(&self.pool).await?;

        Ok(shoot)
    }

    // Denied requests are deleted outright, not marked cancelled.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM shoots WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // Returns None when the shoot is missing or not confirmed.
    pub async fn finish(&self, id: i64) -> Result<Option<Shoot>> {
        let now = Utc::now().naive_utc();
        let mut tx = self.pool.begin().await?;

        let shoot = sqlx::query_as::<_, Shoot>(&format!(
            "UPDATE shoots SET status = ?, updated_at = ? WHERE id = ? AND status = ? RETURNING {SHOOT_COLUMNS}"
        ))
        .bind(ShootStatus::Completed)
        .bind(now)
        .bind(id)
        .bind(ShootStatus::Confirmed)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(shoot) = shoot else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO post_production_records (shoot_id, status, created_at) VALUES (?, 'editing', ?)",
        )
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(shoot))
    }

    pub async fn revert(&self, id: i64) -> Result<Option<Shoot>> {
        let now = Utc::now().naive_utc();
        let mut tx = self.pool.begin().await?;

        let shoot = sqlx::query_as::<_, Shoot>(&format!(
            "UPDATE shoots SET status = ?, updated_at = ? WHERE id = ? AND status = ? RETURNING {SHOOT_COLUMNS}"
        ))
        .bind(ShootStatus::Confirmed)
        .bind(now)
        .bind(id)
        .bind(ShootStatus::Completed)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(shoot) = shoot else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query("DELETE FROM post_production_records WHERE shoot_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(shoot))
    }

    pub async fn find_post_production(&self, shoot_id: i64) -> Result<Option<PostProductionRecord>> {
        let record = sqlx::query_as::<_, PostProductionRecord>(
            "SELECT id, shoot_id, status, created_at FROM post_production_records WHERE shoot_id = ?",
        )
        .bind(shoot_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}
