use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum HolidayType {
    Public,
    Optional,
    Restricted,
}

/// One holiday per date per tenant. Only non-optional holidays reduce
/// the working-day count.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Holiday {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 1)]
    pub tenant_id: u64,
    #[schema(example = "May Day")]
    pub name: String,
    #[schema(example = "2025-05-01", format = "date", value_type = String)]
    pub holiday_date: NaiveDate,
    #[schema(example = "PUBLIC", value_type = String)]
    pub holiday_type: String,
    pub is_optional: bool,
}
