use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::leave::allocation::ensure_allocated;
use actix_web::{HttpResponse, Responder, web};
use chrono::{Datelike, Utc};
use serde::Serialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

/// Balance row joined with its leave type, the shape self-service
/// dashboards consume.
#[derive(Serialize, sqlx::FromRow, ToSchema)]
pub struct BalanceResponse {
    #[schema(example = 1)]
    pub leave_type_id: u64,
    #[schema(example = "EL")]
    pub code: String,
    #[schema(example = "Earned Leave")]
    pub name: String,
    #[schema(example = 2025)]
    pub year: i32,
    #[schema(example = 12.0)]
    pub total_allocated: f64,
    #[schema(example = 5.0)]
    pub used: f64,
    #[schema(example = 0.0)]
    pub pending: f64,
    #[schema(example = 7.0)]
    pub available: f64,
    #[schema(example = 0.0)]
    pub carry_forward: f64,
}

async fn fetch_balances(
    pool: &MySqlPool,
    tenant_id: u64,
    user_id: u64,
) -> Result<Vec<BalanceResponse>, ApiError> {
    // First touch in a year allocates the entitlement rows.
    let year = Utc::now().date_naive().year();
    ensure_allocated(pool, tenant_id, user_id, year).await?;

    sqlx::query_as::<_, BalanceResponse>(
        r#"
        SELECT b.leave_type_id, t.code, t.name, b.year,
               b.total_allocated, b.used, b.pending, b.available, b.carry_forward
        FROM leave_balances b
        JOIN leave_types t ON t.id = b.leave_type_id
        WHERE b.tenant_id = ? AND b.user_id = ?
        ORDER BY b.year DESC, t.code
        "#,
    )
    .bind(tenant_id)
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(|e| ApiError::from_db("fetch balances", e))
}

/// Own balances
#[utoipa::path(
    get,
    path = "/api/balance",
    responses(
        (status = 200, description = "Own leave balances", body = [BalanceResponse]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Balance"
)]
pub async fn my_balances(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let balances = fetch_balances(pool.get_ref(), auth.tenant_id, auth.user_id).await?;
    Ok(HttpResponse::Ok().json(balances))
}

/// Another user's balances (HR/Admin)
#[utoipa::path(
    get,
    path = "/api/balance/{user_id}",
    params(
        ("user_id" = u64, Path, description = "User whose balances to fetch")
    ),
    responses(
        (status = 200, description = "User's leave balances", body = [BalanceResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Balance"
)]
pub async fn user_balances(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let user_id = path.into_inner();
    if user_id != auth.user_id {
        auth.require_hr_or_admin()?;
    }

    let balances = fetch_balances(pool.get_ref(), auth.tenant_id, user_id).await?;
    Ok(HttpResponse::Ok().json(balances))
}
