use std::future::{Ready, ready};

use actix_web::{Error as ActixError, FromRequest, HttpRequest, dev::Payload};
use serde::{Deserialize, Serialize};

use crate::database::models::macros::string_enum;
use crate::error::AppError;

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "snake_case")]
    pub enum Role {
        Admin => "admin",
        Team => "team",
        AgencyAdmin => "agency_admin",
        AgencyTeam => "agency_team",
    }
}

/// The resolved identity a request acts as. Session resolution is an
/// upstream concern; this service only trusts the `X-Role` and
/// `X-Agency-Id` headers the auth layer sets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Principal {
    pub role: Role,
    pub agency_id: Option<i64>,
}

impl Principal {
    pub fn is_ops(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Team)
    }

    pub fn is_tenant(&self) -> bool {
        matches!(self.role, Role::AgencyAdmin | Role::AgencyTeam)
    }

    pub fn owns_agency(&self, agency_id: Option<i64>) -> bool {
        self.agency_id.is_some() && self.agency_id == agency_id
    }

    pub fn require_agency(&self) -> Result<i64, AppError> {
        self.agency_id
            .ok_or_else(|| AppError::forbidden("No agency associated with this principal"))
    }
}

impl FromRequest for Principal {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let role = req
            .headers()
            .get("X-Role")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<Role>().ok());

        let Some(role) = role else {
            return ready(Err(AppError::Unauthorized.into()));
        };

        let agency_id = req
            .headers()
            .get("X-Agency-Id")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<i64>().ok());

        // A tenant role without an agency is a broken resolution
        // upstream, not a usable principal.
        if matches!(role, Role::AgencyAdmin | Role::AgencyTeam) && agency_id.is_none() {
            return ready(Err(AppError::Unauthorized.into()));
        }

        ready(Ok(Principal { role, agency_id }))
    }
}
