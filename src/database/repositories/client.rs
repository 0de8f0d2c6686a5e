use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::models::{Client, ClientStatus};

const CLIENT_COLUMNS: &str = r#"
    id,
    agency_id,
    name,
    company_name,
    status,
    is_placeholder,
    created_at,
    updated_at
"#;

// The scheduler only creates pending rows and the shared placeholder;
// the rest of client lifecycle lives elsewhere.
#[derive(Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn list_for_agency(&self, agency_id: Option<i64>) -> Result<Vec<Client>> {
        let mut query = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE is_placeholder = 0");
        if agency_id.is_some() {
            query.push_str(" AND agency_id = ?");
        }
        query.push_str(" ORDER BY name ASC");

        let mut prepared = sqlx::query_as::<_, Client>(&query);
        if let Some(agency_id) = agency_id {
            prepared = prepared.bind(agency_id);
        }

        let clients = prepared.fetch_all(&self.pool).await?;

        Ok(clients)
    }

    pub async fn create_pending(&self, agency_id: i64, name: &str) -> Result<Client> {
        let now = Utc::now().naive_utc();

        let client = sqlx::query_as::<_, Client>(&format!(
            r#"
            INSERT INTO
                clients (agency_id, name, company_name, status, is_placeholder, created_at, updated_at)
            VALUES
                (?, ?, NULL, ?, 0, ?, ?)
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(agency_id)
        .bind(name)
        .bind(ClientStatus::Pending)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }

    // The partial unique index on is_placeholder guarantees at most
    // one such row exists.
    pub async fn placeholder(&self) -> Result<Client> {
        let existing = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE is_placeholder = 1"
        ))
        .fetch_optional(&self.pool)
        .await?;

        if let Some(client) = existing {
            return Ok(client);
        }

        let now = Utc::now().naive_utc();

        let client = sqlx::query_as::<_, Client>(&format!(
            r#"
            INSERT INTO
                clients (agency_id, name, company_name, status, is_placeholder, created_at, updated_at)
            VALUES
                (NULL, 'Unassigned', NULL, ?, 1, ?, ?)
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(ClientStatus::Active)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }
}
