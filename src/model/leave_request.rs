use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl RequestStatus {
    /// PENDING is the only state transitions are allowed from.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 1)]
    pub tenant_id: u64,
    #[schema(example = 1000)]
    pub user_id: u64,
    #[schema(example = 1)]
    pub leave_type_id: u64,
    #[schema(example = "2025-03-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2025-03-14", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = 5.0)]
    pub total_days: f64,
    #[schema(example = "family event")]
    pub reason: Option<String>,
    #[schema(example = "PENDING", value_type = String)]
    pub status: String,
    #[schema(example = "2025-03-01T09:00:00Z", format = "date-time", value_type = String)]
    pub applied_date: Option<DateTime<Utc>>,
    #[schema(format = "date-time", value_type = Option<String>)]
    pub approved_date: Option<DateTime<Utc>>,
    #[schema(format = "date-time", value_type = Option<String>)]
    pub rejected_date: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_db_strings() {
        for s in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
            RequestStatus::Cancelled,
        ] {
            let text = s.to_string();
            assert_eq!(text, text.to_uppercase());
            assert_eq!(text.parse::<RequestStatus>().unwrap(), s);
        }
    }

    #[test]
    fn only_pending_is_mutable() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Approved.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
        assert!(RequestStatus::Cancelled.is_terminal());
    }
}
