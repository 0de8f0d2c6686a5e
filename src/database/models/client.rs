use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::macros::string_enum;

/// A row in the client directory.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub agency_id: Option<i64>,
    pub name: String,
    pub company_name: Option<String>,
    pub status: ClientStatus,
    pub is_placeholder: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    pub enum ClientStatus {
        Pending => "pending",
        Active => "active",
    }
}

/// How a booking request names its client.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientSelector {
    Existing(i64),
    New,
    Placeholder,
}

impl ClientSelector {
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim) {
            None | Some("") => Some(ClientSelector::Placeholder),
            Some("new") => Some(ClientSelector::New),
            Some(id) => id.parse::<i64>().ok().map(ClientSelector::Existing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_parsing() {
        assert_eq!(ClientSelector::parse(None), Some(ClientSelector::Placeholder));
        assert_eq!(ClientSelector::parse(Some("")), Some(ClientSelector::Placeholder));
        assert_eq!(ClientSelector::parse(Some("new")), Some(ClientSelector::New));
        assert_eq!(
            ClientSelector::parse(Some("42")),
            Some(ClientSelector::Existing(42))
        );
        assert_eq!(ClientSelector::parse(Some("abc")), None);
    }
}
