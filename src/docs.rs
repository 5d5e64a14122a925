use crate::api::calendar::CalendarQuery;
use crate::api::holiday::{CreateHoliday, HolidayQuery};
use crate::api::leave_balance::BalanceResponse;
use crate::api::leave_request::{
    ApplyLeave, ApproveLeave, LeaveDetailResponse, LeaveFilter, LeaveListResponse,
    PendingListResponse, RejectLeave,
};
use crate::api::leave_type::CreateLeaveType;
use crate::model::holiday::{Holiday, HolidayType};
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::{LeaveRequest, RequestStatus};
use crate::model::leave_type::{LeaveType, LeaveTypeStatus};
use crate::utils::user_cache::UserDisplay;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Management API",
        version = "1.0.0",
        description = r#"
## Multi-tenant Leave Management Service

This API manages leave entitlements and the leave-request lifecycle for
an organization.

### 🔹 Key Features
- **Leave Requests**
  - Apply, approve, reject, and cancel with balance accounting
- **Balance Ledger**
  - Per-user yearly entitlements with capped carry-forward
- **Holiday Calendar**
  - Tenant holidays that working-day counting respects
- **Team Calendar**
  - Approved absences over any date range

### 🔐 Security
All endpoints require **JWT Bearer authentication** issued by the
platform auth service. Approval operations need an **Admin** or **HR**
role.

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_request::apply_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,
        crate::api::leave_request::cancel_leave,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::my_leaves,
        crate::api::leave_request::pending_leaves,

        crate::api::leave_balance::my_balances,
        crate::api::leave_balance::user_balances,

        crate::api::calendar::team_calendar,

        crate::api::holiday::create_holiday,
        crate::api::holiday::list_holidays,
        crate::api::holiday::update_holiday,
        crate::api::holiday::delete_holiday,

        crate::api::leave_type::create_leave_type,
        crate::api::leave_type::list_leave_types
    ),
    components(
        schemas(
            ApplyLeave,
            ApproveLeave,
            RejectLeave,
            LeaveFilter,
            LeaveRequest,
            RequestStatus,
            LeaveListResponse,
            LeaveDetailResponse,
            PendingListResponse,
            LeaveBalance,
            BalanceResponse,
            CalendarQuery,
            Holiday,
            HolidayType,
            CreateHoliday,
            HolidayQuery,
            LeaveType,
            LeaveTypeStatus,
            CreateLeaveType,
            UserDisplay
        )
    ),
    tags(
        (name = "Leave", description = "Leave request lifecycle APIs"),
        (name = "Balance", description = "Leave balance ledger APIs"),
        (name = "Calendar", description = "Team calendar APIs"),
        (name = "Holiday", description = "Holiday calendar APIs"),
        (name = "LeaveType", description = "Leave type catalog APIs"),
    )
)]
pub struct ApiDoc;
