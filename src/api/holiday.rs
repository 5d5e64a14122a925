use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::holiday::{Holiday, HolidayType};
use crate::utils::db_utils::{build_update_sql, execute_update, is_duplicate_key};
use actix_web::{HttpResponse, Responder, web};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_json::Value;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

const HOLIDAY_COLUMNS: &str = "id, tenant_id, name, holiday_date, holiday_type, is_optional";

/// Columns a partial update may touch.
const UPDATABLE: &[&str] = &["name", "holiday_date", "holiday_type", "is_optional"];

#[derive(Deserialize, ToSchema)]
pub struct CreateHoliday {
    #[schema(example = "May Day")]
    pub name: String,
    #[schema(example = "2025-05-01", format = "date", value_type = String)]
    pub holiday_date: NaiveDate,
    #[schema(example = "PUBLIC")]
    pub holiday_type: HolidayType,
    #[serde(default)]
    pub is_optional: bool,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct HolidayQuery {
    #[schema(example = 2025)]
    /// List holidays of a calendar year
    pub year: Option<i32>,
    #[schema(example = "2025-01-01", format = "date", value_type = String)]
    /// Range start (used with `end`)
    pub start: Option<NaiveDate>,
    #[schema(example = "2025-06-30", format = "date", value_type = String)]
    /// Range end (used with `start`)
    pub end: Option<NaiveDate>,
}

/* =========================
Create holiday (HR/Admin)
========================= */
#[utoipa::path(
    post,
    path = "/api/holiday",
    request_body = CreateHoliday,
    responses(
        (status = 201, description = "Holiday created", body = Holiday),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "A holiday already exists on this date")
    ),
    security(("bearer_auth" = [])),
    tag = "Holiday"
)]
pub async fn create_holiday(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateHoliday>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let result = sqlx::query(
        r#"
        INSERT INTO holidays (tenant_id, name, holiday_date, holiday_type, is_optional)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(auth.tenant_id)
    .bind(payload.name.as_str())
    .bind(payload.holiday_date)
    .bind(payload.holiday_type.to_string())
    .bind(payload.is_optional)
    .execute(pool.get_ref())
    .await;

    let inserted = match result {
        Ok(r) => r,
        Err(e) if is_duplicate_key(&e) => {
            return Err(ApiError::conflict("A holiday already exists on this date").into());
        }
        Err(e) => return Err(ApiError::from_db("insert holiday", e).into()),
    };

    let holiday = sqlx::query_as::<_, Holiday>(&format!(
        "SELECT {HOLIDAY_COLUMNS} FROM holidays WHERE id = ?"
    ))
    .bind(inserted.last_insert_id())
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| ApiError::from_db("reload holiday", e))?;

    Ok(HttpResponse::Created().json(holiday))
}

/* =========================
List holidays
========================= */
#[utoipa::path(
    get,
    path = "/api/holiday",
    params(HolidayQuery),
    responses(
        (status = 200, description = "Holidays in the requested window", body = [Holiday]),
        (status = 400, description = "Invalid range"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Holiday"
)]
pub async fn list_holidays(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<HolidayQuery>,
) -> actix_web::Result<impl Responder> {
    let (start, end) = match (query.year, query.start, query.end) {
        (_, Some(start), Some(end)) => {
            if end < start {
                return Err(ApiError::bad_request("end cannot be before start").into());
            }
            (start, end)
        }
        (Some(year), _, _) => year_bounds(year)?,
        // default: current year
        (None, _, _) => year_bounds(chrono::Utc::now().date_naive().year())?,
    };

    let holidays = sqlx::query_as::<_, Holiday>(&format!(
        "SELECT {HOLIDAY_COLUMNS} FROM holidays \
         WHERE tenant_id = ? AND holiday_date BETWEEN ? AND ? ORDER BY holiday_date"
    ))
    .bind(auth.tenant_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| ApiError::from_db("fetch holidays", e))?;

    Ok(HttpResponse::Ok().json(holidays))
}

fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate), ApiError> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| ApiError::bad_request("Invalid year"))?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(|| ApiError::bad_request("Invalid year"))?;
    Ok((start, end))
}

/* =========================
Update holiday (HR/Admin)
========================= */
#[utoipa::path(
    put,
    path = "/api/holiday/{holiday_id}",
    params(
        ("holiday_id" = u64, Path, description = "Holiday ID")
    ),
    request_body(content = Object, description = "Partial update: name, holiday_date, holiday_type, is_optional"),
    responses(
        (status = 200, description = "Holiday updated", body = Holiday),
        (status = 400, description = "Unknown field in payload"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Holiday not found"),
        (status = 409, description = "A holiday already exists on this date")
    ),
    security(("bearer_auth" = [])),
    tag = "Holiday"
)]
pub async fn update_holiday(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<Value>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let holiday_id = path.into_inner();
    let update = build_update_sql("holidays", UPDATABLE, &payload, holiday_id, auth.tenant_id)?;

    let affected = match execute_update(pool.get_ref(), update).await {
        Ok(n) => n,
        Err(e) if is_duplicate_key(&e) => {
            return Err(ApiError::conflict("A holiday already exists on this date").into());
        }
        Err(e) => return Err(ApiError::from_db("update holiday", e).into()),
    };

    if affected == 0 {
        return Err(ApiError::not_found("Holiday not found").into());
    }

    let holiday = sqlx::query_as::<_, Holiday>(&format!(
        "SELECT {HOLIDAY_COLUMNS} FROM holidays WHERE id = ? AND tenant_id = ?"
    ))
    .bind(holiday_id)
    .bind(auth.tenant_id)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| ApiError::from_db("reload holiday", e))?;

    Ok(HttpResponse::Ok().json(holiday))
}

/* =========================
Delete holiday (HR/Admin)
========================= */
#[utoipa::path(
    delete,
    path = "/api/holiday/{holiday_id}",
    params(
        ("holiday_id" = u64, Path, description = "Holiday ID")
    ),
    responses(
        (status = 200, description = "Holiday deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Holiday not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Holiday"
)]
pub async fn delete_holiday(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let holiday_id = path.into_inner();
    let result = sqlx::query("DELETE FROM holidays WHERE id = ? AND tenant_id = ?")
        .bind(holiday_id)
        .bind(auth.tenant_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| ApiError::from_db("delete holiday", e))?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Holiday not found").into());
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Holiday deleted"
    })))
}
