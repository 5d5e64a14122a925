use sqlx::MySqlPool;

use crate::error::ApiError;
use crate::model::leave_type::{LeaveType, LeaveTypeStatus};
use crate::utils::db_utils::is_duplicate_key;

/// Carried-over balance for a new yearly row. Carry-forward only applies
/// from 2021 onwards and is capped by the leave type's limit.
pub fn carry_forward_amount(
    year: i32,
    allow_carry_forward: bool,
    max_carry_forward_days: f64,
    prev_available: Option<f64>,
) -> f64 {
    if !allow_carry_forward || year <= 2020 {
        return 0.0;
    }
    match prev_available {
        Some(available) => available.min(max_carry_forward_days.max(0.0)),
        None => 0.0,
    }
}

/// Create the missing balance rows for (tenant, user, year), one per
/// ACTIVE leave type. Idempotent: existing rows are left untouched, and
/// a duplicate-key insert (concurrent first call for the same key) is
/// treated as already allocated.
pub async fn ensure_allocated(
    pool: &MySqlPool,
    tenant_id: u64,
    user_id: u64,
    year: i32,
) -> Result<(), ApiError> {
    let types = sqlx::query_as::<_, LeaveType>(
        r#"
        SELECT id, tenant_id, code, name, days_per_year, allow_carry_forward,
               max_carry_forward_days, min_notice_days, max_consecutive_days,
               is_paid, status
        FROM leave_types
        WHERE tenant_id = ? AND status = ?
        "#,
    )
    .bind(tenant_id)
    .bind(LeaveTypeStatus::Active.to_string())
    .fetch_all(pool)
    .await
    .map_err(|e| ApiError::from_db("list active leave types", e))?;

    for leave_type in types {
        let exists = sqlx::query_scalar::<_, u64>(
            r#"
            SELECT id FROM leave_balances
            WHERE tenant_id = ? AND user_id = ? AND leave_type_id = ? AND year = ?
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(leave_type.id)
        .bind(year)
        .fetch_optional(pool)
        .await
        .map_err(|e| ApiError::from_db("check balance existence", e))?;

        if exists.is_some() {
            continue;
        }

        let prev_available = sqlx::query_scalar::<_, f64>(
            r#"
            SELECT available FROM leave_balances
            WHERE tenant_id = ? AND user_id = ? AND leave_type_id = ? AND year = ?
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(leave_type.id)
        .bind(year - 1)
        .fetch_optional(pool)
        .await
        .map_err(|e| ApiError::from_db("read prior-year balance", e))?;

        let allocated = leave_type.days_per_year.unwrap_or(0.0);
        let carry = carry_forward_amount(
            year,
            leave_type.allow_carry_forward,
            leave_type.max_carry_forward_days,
            prev_available,
        );

        let result = sqlx::query(
            r#"
            INSERT INTO leave_balances
                (tenant_id, user_id, leave_type_id, year,
                 total_allocated, used, pending, available, carry_forward)
            VALUES (?, ?, ?, ?, ?, 0, 0, ?, ?)
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .bind(leave_type.id)
        .bind(year)
        .bind(allocated)
        .bind(allocated + carry)
        .bind(carry)
        .execute(pool)
        .await;

        match result {
            Ok(_) => {
                tracing::info!(
                    tenant_id,
                    user_id,
                    leave_type = %leave_type.code,
                    year,
                    allocated,
                    carry,
                    "leave balance allocated"
                );
            }
            // Lost the first-allocation race; the row is there now.
            Err(e) if is_duplicate_key(&e) => continue,
            Err(e) => return Err(ApiError::from_db("insert balance row", e)),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carry_forward_is_capped() {
        assert_eq!(carry_forward_amount(2025, true, 5.0, Some(10.0)), 5.0);
    }

    #[test]
    fn carry_forward_takes_the_full_remainder_under_the_cap() {
        assert_eq!(carry_forward_amount(2025, true, 5.0, Some(3.5)), 3.5);
    }

    #[test]
    fn no_carry_forward_when_disallowed() {
        assert_eq!(carry_forward_amount(2025, false, 5.0, Some(10.0)), 0.0);
    }

    #[test]
    fn no_carry_forward_without_a_prior_year_row() {
        assert_eq!(carry_forward_amount(2025, true, 5.0, None), 0.0);
    }

    #[test]
    fn no_carry_forward_up_to_2020() {
        assert_eq!(carry_forward_amount(2020, true, 5.0, Some(10.0)), 0.0);
        assert_eq!(carry_forward_amount(2021, true, 5.0, Some(10.0)), 5.0);
    }

    #[test]
    fn negative_cap_is_treated_as_zero() {
        assert_eq!(carry_forward_amount(2025, true, -1.0, Some(10.0)), 0.0);
    }
}
