use actix_web::{HttpResponse, web};
use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::auth::Principal;
use crate::database::models::{Shoot, parse_time_of_day};
use crate::database::repositories::{ShootRepository, SlotRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::layout::{Geometry, clamp_range, layout};
use crate::services::visibility::{ShootVisibility, render_shoot};

const DEFAULT_WINDOW_START_HOUR: u32 = 8;
const DEFAULT_PX_PER_HOUR: f64 = 60.0;
const FALLBACK_DURATION_MINUTES: i64 = 60;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarQuery {
    pub date: NaiveDate,
    pub days: Option<u32>,
    pub window_start_hour: Option<u32>,
    pub px_per_hour: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum CellKind {
    Block,
    Shoot,
    Unavailable,
}

// The client switches on `kind` only; every authorization decision
// was already made upstream.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub kind: CellKind,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(flatten)]
    pub geometry: Geometry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shoot: Option<Shoot>,
}

// Blocks render for everyone as generic unavailability; shoots go
// through the visibility engine first.
pub async fn get_calendar(
    principal: Principal,
    shoot_repo: web::Data<ShootRepository>,
    slot_repo: web::Data<SlotRepository>,
    query: web::Query<CalendarQuery>,
) -> Result<HttpResponse, AppError> {
    let days = query.days.unwrap_or(1).max(1) as i64;
    let window_start_hour = query.window_start_hour.unwrap_or(DEFAULT_WINDOW_START_HOUR);
    let px_per_hour = query.px_per_hour.unwrap_or(DEFAULT_PX_PER_HOUR);

    let first_day = query.date;
    let last_day = first_day + Duration::days(days - 1);

    let window_from = first_day.and_hms_opt(0, 0, 0);
    let window_to = last_day.and_hms_opt(23, 59, 59);

    let mut cells = Vec::new();

    for slot in slot_repo.list_blocks(window_from, window_to).await? {
        let start = slot.start_time.time();
        let end = clamp_range(start, slot.end_time.time(), FALLBACK_DURATION_MINUTES);
        cells.push(CalendarCell {
            kind: CellKind::Block,
            date: slot.start_time.date(),
            start_time: format_time(start),
            end_time: format_time(end),
            geometry: layout(start, end, window_start_hour, px_per_hour),
            shoot: None,
        });
    }

    for shoot in shoot_repo
        .list_shoots(Some(first_day), Some(last_day))
        .await?
    {
        match render_shoot(&principal, &shoot) {
            ShootVisibility::Full { shoot } => {
                let (start, end) = shoot_times(&shoot.start_time, &shoot.end_time);
                cells.push(CalendarCell {
                    kind: CellKind::Shoot,
                    date: shoot.shoot_date,
                    start_time: format_time(start),
                    end_time: format_time(end),
                    geometry: layout(start, end, window_start_hour, px_per_hour),
                    shoot: Some(shoot),
                });
            }
            ShootVisibility::Redacted { range } => {
                let (start, end) = shoot_times(&range.start_time, &range.end_time);
                cells.push(CalendarCell {
                    kind: CellKind::Unavailable,
                    date: range.shoot_date,
                    start_time: format_time(start),
                    end_time: format_time(end),
                    geometry: layout(start, end, window_start_hour, px_per_hour),
                    shoot: None,
                });
            }
            ShootVisibility::Hidden => {}
        }
    }

    cells.sort_by(|a, b| (a.date, a.start_time.clone()).cmp(&(b.date, b.start_time.clone())));

    Ok(HttpResponse::Ok().json(ApiResponse::success(cells)))
}

// Unparsable stored times fall back to a one-hour cell at the top of
// the window rather than failing the whole calendar.
fn shoot_times(start_raw: &str, end_raw: &str) -> (NaiveTime, NaiveTime) {
    let start = parse_time_of_day(start_raw).unwrap_or(NaiveTime::MIN);
    let end = parse_time_of_day(end_raw).unwrap_or(start);

    (start, clamp_range(start, end, FALLBACK_DURATION_MINUTES))
}

fn format_time(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}
