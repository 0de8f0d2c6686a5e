use anyhow::Result;
use sqlx::SqlitePool;
use tempfile::TempDir;

use crewcal::BookingService;
use crewcal::database::init_database;
use crewcal::database::repositories::{
    AvailabilityRequestRepository, ClientRepository, ShootRepository, SlotRepository,
};

// Fresh on-disk SQLite database plus the full repository/service
// stack, one per test.
pub struct TestContext {
    pub pool: SqlitePool,
    pub slots: SlotRepository,
    pub shoots: ShootRepository,
    pub clients: ClientRepository,
    pub requests: AvailabilityRequestRepository,
    pub booking: BookingService,
    _temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());
        let pool = init_database(&database_url).await?;

        let slots = SlotRepository::new(pool.clone());
        let shoots = ShootRepository::new(pool.clone());
        let clients = ClientRepository::new(pool.clone());
        let requests = AvailabilityRequestRepository::new(pool.clone());
        let booking = BookingService::new(
            shoots.clone(),
            clients.clone(),
            requests.clone(),
            slots.clone(),
        );

        Ok(TestContext {
            pool,
            slots,
            shoots,
            clients,
            requests,
            booking,
            _temp_dir: temp_dir,
        })
    }
}

pub fn ops_headers() -> [(&'static str, String); 1] {
    [("X-Role", "admin".to_string())]
}

pub fn agency_headers(agency_id: i64) -> [(&'static str, String); 2] {
    [
        ("X-Role", "agency_admin".to_string()),
        ("X-Agency-Id", agency_id.to_string()),
    ]
}
