use chrono::Duration;
use serde::Deserialize;

use crate::database::models::{
    AvailabilityRequest, Client, ClientSelector, RequestStatus, Shoot, ShootInput,
    ShootRequestInput, ShootStatus, parse_time_of_day,
};
use crate::database::repositories::{
    AvailabilityRequestRepository, ClientRepository, NewShoot, ShootRepository, SlotRepository,
};
use crate::error::AppError;

// Fallback when a request carries no usable duration.
const DEFAULT_DURATION_MINUTES: i64 = 60;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalInput {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub client_id: Option<i64>,
}

/// Shoot lifecycle transitions plus the legacy slot-bound request
/// path. References are resolved before any row is touched.
#[derive(Clone)]
pub struct BookingService {
    shoots: ShootRepository,
    clients: ClientRepository,
    requests: AvailabilityRequestRepository,
    slots: SlotRepository,
}

impl BookingService {
    pub fn new(
        shoots: ShootRepository,
        clients: ClientRepository,
        requests: AvailabilityRequestRepository,
        slots: SlotRepository,
    ) -> Self {
        Self {
            shoots,
            clients,
            requests,
            slots,
        }
    }

    // Never touches availability_slots; the legacy path owns those.
    pub async fn request_shoot(
        &self,
        agency_id: i64,
        input: &ShootRequestInput,
    ) -> Result<Shoot, AppError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Shoot title is required"));
        }

        let start = parse_time_of_day(&input.start_time)
            .ok_or_else(|| AppError::validation("Invalid start time"))?;

        let duration = match input.duration_minutes {
            Some(minutes) if minutes > 0 => minutes,
            _ => DEFAULT_DURATION_MINUTES,
        };
        let end = start + Duration::minutes(duration);
        let start_time = start.format("%H:%M").to_string();
        let end_time = end.format("%H:%M").to_string();

        let client = self
            .resolve_client(input.client_selector.as_deref(), agency_id, title)
            .await?;

        let shoot = self
            .shoots
            .create_shoot(NewShoot {
                title,
                client_id: Some(client.id),
                agency_id: Some(agency_id),
                shoot_date: input.shoot_date,
                start_time: &start_time,
                end_time: &end_time,
                status: ShootStatus::Pending,
                is_blocking: false,
            })
            .await?;

        Ok(shoot)
    }

    pub async fn create_confirmed(&self, input: &ShootInput) -> Result<Shoot, AppError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Shoot title is required"));
        }
        let (start, end) = validate_times(&input.start_time, &input.end_time)?;

        if let Some(client_id) = input.client_id {
            self.require_client(client_id).await?;
        }

        let shoot = self
            .shoots
            .create_shoot(NewShoot {
                title,
                client_id: input.client_id,
                agency_id: input.agency_id,
                shoot_date: input.shoot_date,
                start_time: &start,
                end_time: &end,
                status: ShootStatus::Confirmed,
                is_blocking: input.is_blocking,
            })
            .await?;

        Ok(shoot)
    }

    // Time/client changes land in the same UPDATE as the confirmation.
    pub async fn approve_shoot(&self, id: i64, input: &ApprovalInput) -> Result<Shoot, AppError> {
        self.require_shoot(id).await?;

        let new_time = match (&input.start_time, &input.end_time) {
            (Some(start), Some(end)) => Some(validate_times(start, end)?),
            (None, None) => None,
            _ => {
                return Err(AppError::validation(
                    "A time change needs both start and end",
                ));
            }
        };

        if let Some(client_id) = input.client_id {
            self.require_client(client_id).await?;
        }

        let shoot = self
            .shoots
            .approve(
                id,
                new_time.as_ref().map(|(s, e)| (s.as_str(), e.as_str())),
                input.client_id,
            )
            .await?
            .ok_or_else(|| AppError::not_found(format!("Shoot {} not found", id)))?;

        Ok(shoot)
    }

    pub async fn deny_shoot(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.shoots.delete(id).await?;
        if !deleted {
            return Err(AppError::not_found(format!("Shoot {} not found", id)));
        }

        Ok(())
    }

    pub async fn finish_shoot(&self, id: i64) -> Result<Shoot, AppError> {
        let existing = self.require_shoot(id).await?;
        if existing.status != ShootStatus::Confirmed {
            return Err(AppError::validation(
                "Only confirmed shoots can be completed",
            ));
        }

        let shoot = self
            .shoots
            .finish(id)
            .await?
            .ok_or_else(|| AppError::validation("Only confirmed shoots can be completed"))?;

        Ok(shoot)
    }

    pub async fn revert_shoot(&self, id: i64) -> Result<Shoot, AppError> {
        let existing = self.require_shoot(id).await?;
        if existing.status != ShootStatus::Completed {
            return Err(AppError::validation("Only completed shoots can be reverted"));
        }

        let shoot = self
            .shoots
            .revert(id)
            .await?
            .ok_or_else(|| AppError::validation("Only completed shoots can be reverted"))?;

        Ok(shoot)
    }

    // Works in any status and never changes it.
    pub async fn set_blocking(&self, id: i64, is_blocking: bool) -> Result<Shoot, AppError> {
        let shoot = self
            .shoots
            .set_blocking(id, is_blocking)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Shoot {} not found", id)))?;

        Ok(shoot)
    }

    pub async fn reassign_client(
        &self,
        id: i64,
        client_id: Option<i64>,
    ) -> Result<Shoot, AppError> {
        if let Some(client_id) = client_id {
            self.require_client(client_id).await?;
        }

        let shoot = self
            .shoots
            .update_client(id, client_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Shoot {} not found", id)))?;

        Ok(shoot)
    }

    pub async fn reschedule(&self, id: i64, start: &str, end: &str) -> Result<Shoot, AppError> {
        let (start, end) = validate_times(start, end)?;

        let shoot = self
            .shoots
            .update_time(id, &start, &end)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Shoot {} not found", id)))?;

        Ok(shoot)
    }

    // --- legacy slot-bound request path ---

    pub async fn create_availability_request(
        &self,
        agency_id: i64,
        slot_id: i64,
    ) -> Result<AvailabilityRequest, AppError> {
        self.slots
            .find_by_id(slot_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Availability slot {} not found", slot_id)))?;

        let request = self.requests.create(slot_id, agency_id).await?;

        Ok(request)
    }

    // Fails when the slot was already committed by either pathway.
    pub async fn approve_availability_request(
        &self,
        id: i64,
    ) -> Result<AvailabilityRequest, AppError> {
        let existing = self.require_request(id).await?;
        if existing.status != RequestStatus::Pending {
            return Err(AppError::validation("Request is no longer pending"));
        }

        let request = self
            .requests
            .approve(id)
            .await?
            .ok_or_else(|| AppError::validation("Slot is already booked"))?;

        Ok(request)
    }

    // An approved request releases its slot; a pending one leaves the
    // booked flag alone.
    pub async fn reject_availability_request(
        &self,
        id: i64,
    ) -> Result<AvailabilityRequest, AppError> {
        self.require_request(id).await?;

        let request = self
            .requests
            .reject(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Availability request {} not found", id)))?;

        Ok(request)
    }

    // --- reference resolution ---

    async fn resolve_client(
        &self,
        selector: Option<&str>,
        agency_id: i64,
        title: &str,
    ) -> Result<Client, AppError> {
        let selector = ClientSelector::parse(selector)
            .ok_or_else(|| AppError::validation("Invalid client selector"))?;

        match selector {
            ClientSelector::Existing(id) => self.require_client(id).await,
            ClientSelector::New => Ok(self.clients.create_pending(agency_id, title).await?),
            ClientSelector::Placeholder => Ok(self.clients.placeholder().await?),
        }
    }

    async fn require_client(&self, id: i64) -> Result<Client, AppError> {
        self.clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Client {} not found", id)))
    }

    async fn require_shoot(&self, id: i64) -> Result<Shoot, AppError> {
        self.shoots
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Shoot {} not found", id)))
    }

    async fn require_request(&self, id: i64) -> Result<AvailabilityRequest, AppError> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Availability request {} not found", id)))
    }
}

fn validate_times(start: &str, end: &str) -> Result<(String, String), AppError> {
    let start_parsed =
        parse_time_of_day(start).ok_or_else(|| AppError::validation("Invalid start time"))?;
    let end_parsed =
        parse_time_of_day(end).ok_or_else(|| AppError::validation("Invalid end time"))?;

    Ok((
        start_parsed.format("%H:%M").to_string(),
        end_parsed.format("%H:%M").to_string(),
    ))
}
