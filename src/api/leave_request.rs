use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::leave::policy;
use crate::leave::workdays::count_leave_days;
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::{LeaveRequest, RequestStatus};
use crate::model::leave_type::LeaveType;
use crate::utils::db_utils::is_lock_conflict;
use crate::utils::notify::{self, LeaveEvent};
use crate::utils::user_cache::{UserDisplay, get_user_display};
use actix_web::{HttpResponse, Responder, web};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use std::collections::HashSet;
use utoipa::{IntoParams, ToSchema};

const REQUEST_COLUMNS: &str = "id, tenant_id, user_id, leave_type_id, start_date, end_date, \
     total_days, reason, status, applied_date, approved_date, rejected_date, rejection_reason";

const BALANCE_COLUMNS: &str =
    "id, tenant_id, user_id, leave_type_id, year, total_allocated, used, pending, available, carry_forward";

/// Bounded retries for deadlocks on the balance row.
const MAX_LOCK_RETRIES: u32 = 3;

#[derive(Deserialize, ToSchema)]
pub struct ApplyLeave {
    #[schema(example = 1)]
    pub leave_type_id: u64,
    #[schema(example = "2025-03-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2025-03-14", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "family event")]
    pub reason: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct ApproveLeave {
    #[schema(example = "enjoy")]
    pub comments: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct RejectLeave {
    #[schema(example = "team is at capacity that week")]
    pub reason: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveFilter {
    #[schema(example = "PENDING")]
    /// Filter by request status
    pub status: Option<String>,
    #[schema(example = 1)]
    /// Pagination page number (start with 1)
    pub page: Option<u64>, // 1-based
    #[schema(example = 10)]
    /// Pagination per page number
    pub per_page: Option<u64>, // items per page
}

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    U64(u64),
    Str(&'a str),
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: i64,
}

/// Request plus the applicant's directory info, for approver-facing views.
#[derive(Serialize, ToSchema)]
pub struct LeaveDetailResponse {
    #[serde(flatten)]
    pub request: LeaveRequest,
    pub user: UserDisplay,
}

#[derive(Serialize, ToSchema)]
pub struct PendingListResponse {
    pub data: Vec<LeaveDetailResponse>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: i64,
}

/// Outcome of a balance-row critical section: either a business error to
/// surface, or a lock conflict worth retrying.
enum TxOutcome {
    LockConflict,
    Api(ApiError),
}

impl From<ApiError> for TxOutcome {
    fn from(e: ApiError) -> Self {
        TxOutcome::Api(e)
    }
}

fn db_err(context: &'static str) -> impl FnOnce(sqlx::Error) -> TxOutcome {
    move |e| {
        if is_lock_conflict(&e) {
            TxOutcome::LockConflict
        } else {
            TxOutcome::Api(ApiError::from_db(context, e))
        }
    }
}

#[derive(Clone, Copy)]
enum Transition {
    Approve,
    Reject,
    Cancel,
}

/* =========================
Apply for leave
========================= */
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = ApplyLeave,
        description = "Leave application payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request created", body = LeaveRequest),
        (status = 400, description = "Validation failure (dates, notice, balance, overlap)"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Leave type not found"),
        (status = 409, description = "Concurrent balance update, retry")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn apply_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<ApplyLeave>,
) -> actix_web::Result<impl Responder> {
    // 1️⃣ validate dates
    if payload.end_date < payload.start_date {
        return Err(ApiError::bad_request("end_date cannot be before start_date").into());
    }

    // 2️⃣ resolve the leave type
    let leave_type = sqlx::query_as::<_, LeaveType>(
        r#"
        SELECT id, tenant_id, code, name, days_per_year, allow_carry_forward,
               max_carry_forward_days, min_notice_days, max_consecutive_days,
               is_paid, status
        FROM leave_types
        WHERE id = ? AND tenant_id = ?
        "#,
    )
    .bind(payload.leave_type_id)
    .bind(auth.tenant_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| ApiError::from_db("fetch leave type", e))?
    .ok_or_else(|| ApiError::not_found("Leave type not found"))?;

    // 3️⃣ working days: weekends and non-optional holidays do not count
    let blocked: HashSet<NaiveDate> = sqlx::query_scalar::<_, NaiveDate>(
        r#"
        SELECT holiday_date FROM holidays
        WHERE tenant_id = ? AND is_optional = FALSE AND holiday_date BETWEEN ? AND ?
        "#,
    )
    .bind(auth.tenant_id)
    .bind(payload.start_date)
    .bind(payload.end_date)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| ApiError::from_db("fetch holidays", e))?
    .into_iter()
    .collect();
    let days = count_leave_days(payload.start_date, payload.end_date, &blocked);

    // 4️⃣ policy checks
    let today = Utc::now().date_naive();
    policy::check_notice(today, payload.start_date, leave_type.min_notice_days)?;
    policy::check_consecutive(days, leave_type.max_consecutive_days)?;

    // 5️⃣ reserve against the balance row and persist, as one atomic unit
    let mut attempt = 0;
    let request = loop {
        match reserve_and_insert(pool.get_ref(), &auth, &payload, days).await {
            Ok(req) => break req,
            Err(TxOutcome::LockConflict) if attempt < MAX_LOCK_RETRIES => {
                attempt += 1;
                tracing::warn!(attempt, user_id = auth.user_id, "balance row contention, retrying apply");
            }
            Err(TxOutcome::LockConflict) => {
                return Err(
                    ApiError::conflict("Leave balance is being updated concurrently, try again")
                        .into(),
                );
            }
            Err(TxOutcome::Api(e)) => return Err(e.into()),
        }
    };

    tracing::info!(
        request_id = request.id,
        user_id = auth.user_id,
        leave_type = %leave_type.code,
        days,
        "leave request submitted"
    );

    Ok(HttpResponse::Created().json(request))
}

/// The check-then-act half of apply: lock the ledger row, re-validate
/// against it, insert the PENDING request and debit available into
/// pending. Runs in one transaction so concurrent applies cannot
/// double-spend.
async fn reserve_and_insert(
    pool: &MySqlPool,
    auth: &AuthUser,
    payload: &ApplyLeave,
    days: f64,
) -> Result<LeaveRequest, TxOutcome> {
    let year = payload.start_date.year();
    let mut tx = pool.begin().await.map_err(db_err("begin apply transaction"))?;

    let balance = sqlx::query_as::<_, LeaveBalance>(&format!(
        "SELECT {BALANCE_COLUMNS} FROM leave_balances \
         WHERE tenant_id = ? AND user_id = ? AND leave_type_id = ? AND year = ? FOR UPDATE"
    ))
    .bind(auth.tenant_id)
    .bind(auth.user_id)
    .bind(payload.leave_type_id)
    .bind(year)
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_err("lock balance row"))?;

    let mut balance = balance
        .ok_or_else(|| ApiError::bad_request("No leave balance for the requested year"))?;

    if balance.available < days {
        return Err(ApiError::bad_request("Insufficient leave balance").into());
    }

    let overlapping = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM leave_requests
        WHERE tenant_id = ? AND user_id = ? AND status IN (?, ?)
          AND start_date <= ? AND end_date >= ?
        "#,
    )
    .bind(auth.tenant_id)
    .bind(auth.user_id)
    .bind(RequestStatus::Pending.to_string())
    .bind(RequestStatus::Approved.to_string())
    .bind(payload.end_date)
    .bind(payload.start_date)
    .fetch_one(&mut *tx)
    .await
    .map_err(db_err("check overlapping requests"))?;

    if overlapping > 0 {
        return Err(ApiError::bad_request("Overlapping leave request already exists").into());
    }

    balance.reserve(days)?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO leave_requests
            (tenant_id, user_id, leave_type_id, start_date, end_date, total_days, reason, status)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(auth.tenant_id)
    .bind(auth.user_id)
    .bind(payload.leave_type_id)
    .bind(payload.start_date)
    .bind(payload.end_date)
    .bind(days)
    .bind(payload.reason.as_deref())
    .bind(RequestStatus::Pending.to_string())
    .execute(&mut *tx)
    .await
    .map_err(db_err("insert leave request"))?;
    let request_id = inserted.last_insert_id();

    sqlx::query("UPDATE leave_balances SET available = ?, pending = ? WHERE id = ?")
        .bind(balance.available)
        .bind(balance.pending)
        .bind(balance.id)
        .execute(&mut *tx)
        .await
        .map_err(db_err("update balance counters"))?;

    let request = sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM leave_requests WHERE id = ?"
    ))
    .bind(request_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(db_err("reload created request"))?;

    tx.commit().await.map_err(db_err("commit apply transaction"))?;
    Ok(request)
}

/// Shared transition body for approve/reject/cancel: lock the request,
/// lock the ledger row, move the pending amount, flip the status.
async fn finalize_request(
    pool: &MySqlPool,
    auth: &AuthUser,
    request_id: u64,
    transition: Transition,
    rejection_reason: Option<&str>,
) -> Result<LeaveRequest, TxOutcome> {
    let mut tx = pool
        .begin()
        .await
        .map_err(db_err("begin transition transaction"))?;

    let request = sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM leave_requests WHERE id = ? AND tenant_id = ? FOR UPDATE"
    ))
    .bind(request_id)
    .bind(auth.tenant_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_err("lock leave request"))?
    .ok_or_else(|| ApiError::not_found("Leave request not found"))?;

    if let Transition::Cancel = transition {
        if request.user_id != auth.user_id {
            return Err(ApiError::bad_request("Only the applicant can cancel a leave request").into());
        }
    }

    if request.status != RequestStatus::Pending.to_string() {
        return Err(ApiError::bad_request("Leave request is not pending").into());
    }

    let mut balance = sqlx::query_as::<_, LeaveBalance>(&format!(
        "SELECT {BALANCE_COLUMNS} FROM leave_balances \
         WHERE tenant_id = ? AND user_id = ? AND leave_type_id = ? AND year = ? FOR UPDATE"
    ))
    .bind(auth.tenant_id)
    .bind(request.user_id)
    .bind(request.leave_type_id)
    .bind(request.start_date.year())
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_err("lock balance row"))?
    .ok_or_else(|| ApiError::not_found("Leave balance not found"))?;

    let now = Utc::now();
    match transition {
        Transition::Approve => {
            balance.commit_used(request.total_days)?;
            sqlx::query("UPDATE leave_requests SET status = ?, approved_date = ? WHERE id = ?")
                .bind(RequestStatus::Approved.to_string())
                .bind(now)
                .bind(request.id)
                .execute(&mut *tx)
                .await
                .map_err(db_err("mark request approved"))?;
        }
        Transition::Reject => {
            balance.release(request.total_days)?;
            sqlx::query(
                "UPDATE leave_requests SET status = ?, rejected_date = ?, rejection_reason = ? WHERE id = ?",
            )
            .bind(RequestStatus::Rejected.to_string())
            .bind(now)
            .bind(rejection_reason)
            .bind(request.id)
            .execute(&mut *tx)
            .await
            .map_err(db_err("mark request rejected"))?;
        }
        Transition::Cancel => {
            balance.release(request.total_days)?;
            sqlx::query("UPDATE leave_requests SET status = ? WHERE id = ?")
                .bind(RequestStatus::Cancelled.to_string())
                .bind(request.id)
                .execute(&mut *tx)
                .await
                .map_err(db_err("mark request cancelled"))?;
        }
    }

    sqlx::query("UPDATE leave_balances SET available = ?, pending = ?, used = ? WHERE id = ?")
        .bind(balance.available)
        .bind(balance.pending)
        .bind(balance.used)
        .bind(balance.id)
        .execute(&mut *tx)
        .await
        .map_err(db_err("update balance counters"))?;

    let updated = sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM leave_requests WHERE id = ?"
    ))
    .bind(request.id)
    .fetch_one(&mut *tx)
    .await
    .map_err(db_err("reload request"))?;

    tx.commit()
        .await
        .map_err(db_err("commit transition transaction"))?;
    Ok(updated)
}

async fn run_transition(
    pool: &MySqlPool,
    auth: &AuthUser,
    request_id: u64,
    transition: Transition,
    rejection_reason: Option<&str>,
) -> actix_web::Result<LeaveRequest> {
    let mut attempt = 0;
    loop {
        match finalize_request(pool, auth, request_id, transition, rejection_reason).await {
            Ok(req) => return Ok(req),
            Err(TxOutcome::LockConflict) if attempt < MAX_LOCK_RETRIES => {
                attempt += 1;
                tracing::warn!(attempt, request_id, "balance row contention, retrying transition");
            }
            Err(TxOutcome::LockConflict) => {
                return Err(
                    ApiError::conflict("Leave balance is being updated concurrently, try again")
                        .into(),
                );
            }
            Err(TxOutcome::Api(e)) => return Err(e.into()),
        }
    }
}

/* =========================
Approve leave (HR/Admin)
========================= */
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/approve",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to approve")
    ),
    request_body(content = ApproveLeave, content_type = "application/json"),
    responses(
        (status = 200, description = "Leave approved", body = LeaveRequest),
        (status = 400, description = "Leave request is not pending"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: Option<web::Json<ApproveLeave>>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let leave_id = path.into_inner();
    let request = run_transition(pool.get_ref(), &auth, leave_id, Transition::Approve, None).await?;

    let comments = payload.and_then(|p| p.into_inner().comments);
    notify::dispatch(LeaveEvent::new(
        auth.tenant_id,
        request.id,
        request.user_id,
        request.status.clone(),
        auth.user_id,
        comments,
    ));

    Ok(HttpResponse::Ok().json(request))
}

/* =========================
Reject leave (HR/Admin)
========================= */
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/reject",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to reject")
    ),
    request_body(content = RejectLeave, content_type = "application/json"),
    responses(
        (status = 200, description = "Leave rejected", body = LeaveRequest),
        (status = 400, description = "Leave request is not pending"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<RejectLeave>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let leave_id = path.into_inner();
    let request = run_transition(
        pool.get_ref(),
        &auth,
        leave_id,
        Transition::Reject,
        Some(payload.reason.as_str()),
    )
    .await?;

    notify::dispatch(LeaveEvent::new(
        auth.tenant_id,
        request.id,
        request.user_id,
        request.status.clone(),
        auth.user_id,
        Some(payload.reason.clone()),
    ));

    Ok(HttpResponse::Ok().json(request))
}

/* =========================
Cancel leave (owner)
========================= */
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/cancel",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to cancel")
    ),
    responses(
        (status = 200, description = "Leave cancelled", body = LeaveRequest),
        (status = 400, description = "Not pending, or caller is not the applicant"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn cancel_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();
    let request = run_transition(pool.get_ref(), &auth, leave_id, Transition::Cancel, None).await?;

    notify::dispatch(LeaveEvent::new(
        auth.tenant_id,
        request.id,
        request.user_id,
        request.status.clone(),
        auth.user_id,
        None,
    ));

    Ok(HttpResponse::Ok().json(request))
}

/* =========================
Fetch one request
========================= */
#[utoipa::path(
    get,
    path = "/api/leave/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveDetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();

    let request = sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM leave_requests WHERE id = ? AND tenant_id = ?"
    ))
    .bind(leave_id)
    .bind(auth.tenant_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| ApiError::from_db("fetch leave request", e))?
    .ok_or_else(|| ApiError::not_found("Leave request not found"))?;

    if request.user_id != auth.user_id {
        auth.require_hr_or_admin()?;
    }

    let user = get_user_display(pool.get_ref(), request.user_id).await;
    Ok(HttpResponse::Ok().json(LeaveDetailResponse { request, user }))
}

/* =========================
Own requests
========================= */
#[utoipa::path(
    get,
    path = "/api/leave/my",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Paginated own leave requests", body = LeaveListResponse),
        (status = 400, description = "Unknown status filter"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn my_leaves(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<LeaveFilter>,
) -> actix_web::Result<impl Responder> {
    // -------------------------
    // Pagination
    // -------------------------
    let per_page = query.per_page.unwrap_or(10).min(100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    // -------------------------
    // WHERE clause
    // -------------------------
    let mut where_sql = String::from(" WHERE tenant_id = ? AND user_id = ?");
    let mut args: Vec<FilterValue> = vec![
        FilterValue::U64(auth.tenant_id),
        FilterValue::U64(auth.user_id),
    ];

    if let Some(status) = query.status.as_deref() {
        if status.parse::<RequestStatus>().is_err() {
            return Err(ApiError::bad_request("Unknown status filter").into());
        }
        where_sql.push_str(" AND status = ?");
        args.push(FilterValue::Str(status));
    }

    // -------------------------
    // COUNT query
    // -------------------------
    let count_sql = format!("SELECT COUNT(*) FROM leave_requests{}", where_sql);

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::U64(v) => count_q.bind(*v),
            FilterValue::Str(s) => count_q.bind(*s),
        };
    }

    let total = count_q
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| ApiError::from_db("count own leave requests", e))?;

    // -------------------------
    // DATA query
    // -------------------------
    let data_sql = format!(
        "SELECT {} FROM leave_requests{} ORDER BY applied_date DESC LIMIT ? OFFSET ?",
        REQUEST_COLUMNS, where_sql
    );

    let mut data_q = sqlx::query_as::<_, LeaveRequest>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::U64(v) => data_q.bind(v),
            FilterValue::Str(s) => data_q.bind(s),
        };
    }

    let requests = data_q
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| ApiError::from_db("fetch own leave requests", e))?;

    Ok(HttpResponse::Ok().json(LeaveListResponse {
        data: requests,
        page: page as u32,
        per_page: per_page as u32,
        total,
    }))
}

/* =========================
Pending queue (HR/Admin)
========================= */
#[utoipa::path(
    get,
    path = "/api/leave/pending",
    params(
        ("page" = Option<u64>, Query, description = "Pagination page number (start with 1)"),
        ("per_page" = Option<u64>, Query, description = "Pagination per page number")
    ),
    responses(
        (status = 200, description = "Tenant-wide pending requests", body = PendingListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn pending_leaves(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<LeaveFilter>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let per_page = query.per_page.unwrap_or(10).min(100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM leave_requests WHERE tenant_id = ? AND status = ?",
    )
    .bind(auth.tenant_id)
    .bind(RequestStatus::Pending.to_string())
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| ApiError::from_db("count pending requests", e))?;

    let requests = sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {} FROM leave_requests WHERE tenant_id = ? AND status = ? \
         ORDER BY applied_date ASC LIMIT ? OFFSET ?",
        REQUEST_COLUMNS
    ))
    .bind(auth.tenant_id)
    .bind(RequestStatus::Pending.to_string())
    .bind(per_page)
    .bind(offset)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| ApiError::from_db("fetch pending requests", e))?;

    let mut data = Vec::with_capacity(requests.len());
    for request in requests {
        let user = get_user_display(pool.get_ref(), request.user_id).await;
        data.push(LeaveDetailResponse { request, user });
    }

    Ok(HttpResponse::Ok().json(PendingListResponse {
        data,
        page: page as u32,
        per_page: per_page as u32,
        total,
    }))
}
