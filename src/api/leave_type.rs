use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::leave_type::{LeaveType, LeaveTypeStatus};
use crate::utils::db_utils::is_duplicate_key;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

const TYPE_COLUMNS: &str = "id, tenant_id, code, name, days_per_year, allow_carry_forward, \
     max_carry_forward_days, min_notice_days, max_consecutive_days, is_paid, status";

#[derive(Deserialize, ToSchema)]
pub struct CreateLeaveType {
    #[schema(example = "EL")]
    pub code: String,
    #[schema(example = "Earned Leave")]
    pub name: String,
    #[schema(example = 12.0)]
    pub days_per_year: Option<f64>,
    #[serde(default)]
    pub allow_carry_forward: bool,
    #[serde(default)]
    #[schema(example = 5.0)]
    pub max_carry_forward_days: f64,
    #[serde(default)]
    #[schema(example = 2)]
    pub min_notice_days: i32,
    #[schema(example = 10)]
    pub max_consecutive_days: Option<i32>,
    #[serde(default = "default_is_paid")]
    pub is_paid: bool,
}

fn default_is_paid() -> bool {
    true
}

/* =========================
Create leave type (HR/Admin)
========================= */
#[utoipa::path(
    post,
    path = "/api/leave-type",
    request_body = CreateLeaveType,
    responses(
        (status = 201, description = "Leave type created", body = LeaveType),
        (status = 400, description = "Invalid entitlement fields"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Leave type code already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "LeaveType"
)]
pub async fn create_leave_type(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateLeaveType>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    if payload.code.trim().is_empty() {
        return Err(ApiError::bad_request("code must not be empty").into());
    }
    if payload.days_per_year.is_some_and(|d| d < 0.0)
        || payload.max_carry_forward_days < 0.0
        || payload.min_notice_days < 0
        || payload.max_consecutive_days.is_some_and(|d| d <= 0)
    {
        return Err(ApiError::bad_request("Entitlement fields must be non-negative").into());
    }

    let result = sqlx::query(
        r#"
        INSERT INTO leave_types
            (tenant_id, code, name, days_per_year, allow_carry_forward,
             max_carry_forward_days, min_notice_days, max_consecutive_days, is_paid, status)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(auth.tenant_id)
    .bind(payload.code.trim())
    .bind(payload.name.as_str())
    .bind(payload.days_per_year)
    .bind(payload.allow_carry_forward)
    .bind(payload.max_carry_forward_days)
    .bind(payload.min_notice_days)
    .bind(payload.max_consecutive_days)
    .bind(payload.is_paid)
    .bind(LeaveTypeStatus::Active.to_string())
    .execute(pool.get_ref())
    .await;

    let inserted = match result {
        Ok(r) => r,
        Err(e) if is_duplicate_key(&e) => {
            return Err(ApiError::conflict("Leave type code already exists").into());
        }
        Err(e) => return Err(ApiError::from_db("insert leave type", e).into()),
    };

    let leave_type = sqlx::query_as::<_, LeaveType>(&format!(
        "SELECT {TYPE_COLUMNS} FROM leave_types WHERE id = ?"
    ))
    .bind(inserted.last_insert_id())
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| ApiError::from_db("reload leave type", e))?;

    Ok(HttpResponse::Created().json(leave_type))
}

/* =========================
List active leave types
========================= */
#[utoipa::path(
    get,
    path = "/api/leave-type",
    responses(
        (status = 200, description = "Active leave types for the tenant", body = [LeaveType]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "LeaveType"
)]
pub async fn list_leave_types(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let types = sqlx::query_as::<_, LeaveType>(&format!(
        "SELECT {TYPE_COLUMNS} FROM leave_types WHERE tenant_id = ? AND status = ? ORDER BY code"
    ))
    .bind(auth.tenant_id)
    .bind(LeaveTypeStatus::Active.to_string())
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| ApiError::from_db("fetch leave types", e))?;

    Ok(HttpResponse::Ok().json(types))
}
