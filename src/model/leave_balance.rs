use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Ledger row keyed by (tenant, user, leave type, year).
///
/// Invariant: `available + pending + used == total_allocated + carry_forward`
/// after every mutation. Mutations go through the ledger operations in
/// `crate::leave::ledger`, always under a row lock.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaveBalance {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 1)]
    pub tenant_id: u64,
    #[schema(example = 1000)]
    pub user_id: u64,
    #[schema(example = 1)]
    pub leave_type_id: u64,
    #[schema(example = 2025)]
    pub year: i32,
    #[schema(example = 12.0)]
    pub total_allocated: f64,
    #[schema(example = 0.0)]
    pub used: f64,
    #[schema(example = 0.0)]
    pub pending: f64,
    #[schema(example = 12.0)]
    pub available: f64,
    #[schema(example = 0.0)]
    pub carry_forward: f64,
}
