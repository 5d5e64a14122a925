use crate::api::leave_request::LeaveDetailResponse;
use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::leave_request::{LeaveRequest, RequestStatus};
use crate::utils::user_cache::get_user_display;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct CalendarQuery {
    #[schema(example = "2025-03-01", format = "date", value_type = String)]
    pub start: NaiveDate,
    #[schema(example = "2025-03-31", format = "date", value_type = String)]
    pub end: NaiveDate,
}

/// Team calendar: approved requests overlapping the window. Pure read.
#[utoipa::path(
    get,
    path = "/api/calendar",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Approved requests overlapping the range", body = [LeaveDetailResponse]),
        (status = 400, description = "Invalid range"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Calendar"
)]
pub async fn team_calendar(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<CalendarQuery>,
) -> actix_web::Result<impl Responder> {
    if query.end < query.start {
        return Err(ApiError::bad_request("end cannot be before start").into());
    }

    let requests = sqlx::query_as::<_, LeaveRequest>(
        r#"
        SELECT id, tenant_id, user_id, leave_type_id, start_date, end_date,
               total_days, reason, status, applied_date, approved_date,
               rejected_date, rejection_reason
        FROM leave_requests
        WHERE tenant_id = ? AND status = ?
          AND start_date <= ? AND end_date >= ?
        ORDER BY start_date
        "#,
    )
    .bind(auth.tenant_id)
    .bind(RequestStatus::Approved.to_string())
    .bind(query.end)
    .bind(query.start)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| ApiError::from_db("fetch team calendar", e))?;

    let mut entries = Vec::with_capacity(requests.len());
    for request in requests {
        let user = get_user_display(pool.get_ref(), request.user_id).await;
        entries.push(LeaveDetailResponse { request, user });
    }

    Ok(HttpResponse::Ok().json(entries))
}
