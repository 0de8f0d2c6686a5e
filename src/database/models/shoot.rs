use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::macros::string_enum;

/// A production session. `start_time`/`end_time` are time-of-day
/// strings ("HH:MM") paired with `shoot_date`; no timezone conversion
/// is performed anywhere in the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Shoot {
    pub id: i64,
    pub client_id: Option<i64>,
    pub agency_id: Option<i64>,
    pub title: String,
    pub shoot_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: ShootStatus,
    pub is_blocking: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Ops direct creation; lands as Confirmed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShootInput {
    pub title: String,
    pub client_id: Option<i64>,
    pub agency_id: Option<i64>,
    pub shoot_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub is_blocking: bool,
}

// Tenant booking request; lands as Pending. The owning agency comes
// from the principal, never from the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShootRequestInput {
    pub title: String,
    pub shoot_date: NaiveDate,
    pub start_time: String,
    pub duration_minutes: Option<i64>,
    pub client_selector: Option<String>,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    pub enum ShootStatus {
        Pending => "pending",
        Confirmed => "confirmed",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

impl Default for ShootStatus {
    fn default() -> Self {
        ShootStatus::Pending
    }
}

/// Parse a time-of-day string, accepting "HH:MM" and "HH:MM:SS".
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_time_forms() {
        assert_eq!(
            parse_time_of_day("09:30"),
            NaiveTime::from_hms_opt(9, 30, 0)
        );
        assert_eq!(
            parse_time_of_day("17:45:00"),
            NaiveTime::from_hms_opt(17, 45, 0)
        );
        assert_eq!(parse_time_of_day("25:00"), None);
        assert_eq!(parse_time_of_day(""), None);
    }

    #[test]
    fn shoot_status_round_trips_through_strings() {
        assert_eq!("confirmed".parse::<ShootStatus>(), Ok(ShootStatus::Confirmed));
        assert_eq!(ShootStatus::Completed.to_string(), "completed");
        assert!("archived".parse::<ShootStatus>().is_err());
    }
}
