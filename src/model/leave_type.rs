use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum LeaveTypeStatus {
    Active,
    Inactive,
}

/// Tenant-scoped leave category with its entitlement and policy knobs.
/// `days_per_year = NULL` means the type is not entitlement-based and
/// allocation seeds it with zero days.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaveType {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 1)]
    pub tenant_id: u64,
    #[schema(example = "EL")]
    pub code: String,
    #[schema(example = "Earned Leave")]
    pub name: String,
    #[schema(example = 12.0)]
    pub days_per_year: Option<f64>,
    pub allow_carry_forward: bool,
    #[schema(example = 5.0)]
    pub max_carry_forward_days: f64,
    #[schema(example = 2)]
    pub min_notice_days: i32,
    #[schema(example = 10)]
    pub max_consecutive_days: Option<i32>,
    pub is_paid: bool,
    #[schema(example = "ACTIVE", value_type = String)]
    pub status: String,
}
