use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::auth::Principal;
use crate::database::models::Shoot;

/// What one principal is allowed to see of one shoot. A redacted
/// entry carries the time range and nothing else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ShootVisibility {
    Full { shoot: Shoot },
    Redacted { range: TimeRange },
    Hidden,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub shoot_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

// Ops and the owning tenant see everything; another tenant sees a
// blocking shoot as a bare range and a non-blocking one not at all.
pub fn render_shoot(principal: &Principal, shoot: &Shoot) -> ShootVisibility {
    if principal.is_ops() || principal.owns_agency(shoot.agency_id) {
        return ShootVisibility::Full {
            shoot: shoot.clone(),
        };
    }

    if shoot.is_blocking {
        ShootVisibility::Redacted {
            range: TimeRange {
                shoot_date: shoot.shoot_date,
                start_time: shoot.start_time.clone(),
                end_time: shoot.end_time.clone(),
            },
        }
    } else {
        ShootVisibility::Hidden
    }
}

pub fn render_all(principal: &Principal, shoots: &[Shoot]) -> Vec<ShootVisibility> {
    shoots
        .iter()
        .map(|shoot| render_shoot(principal, shoot))
        .filter(|v| *v != ShootVisibility::Hidden)
        .collect()
}
