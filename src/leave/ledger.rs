use crate::error::ApiError;
use crate::model::leave_balance::LeaveBalance;

/// Tolerance for f64 counter comparisons; quantities are whole days.
const EPS: f64 = 1e-6;

impl LeaveBalance {
    /// `available + pending + used == total_allocated + carry_forward`
    pub fn is_balanced(&self) -> bool {
        let lhs = self.available + self.pending + self.used;
        let rhs = self.total_allocated + self.carry_forward;
        (lhs - rhs).abs() < EPS
    }

    /// apply: move `days` from available to pending.
    pub fn reserve(&mut self, days: f64) -> Result<(), ApiError> {
        if self.available + EPS < days {
            return Err(ApiError::bad_request("Insufficient leave balance"));
        }
        self.available -= days;
        self.pending += days;
        self.check()
    }

    /// approve: move `days` from pending to used.
    pub fn commit_used(&mut self, days: f64) -> Result<(), ApiError> {
        if self.pending + EPS < days {
            tracing::error!(balance_id = self.id, days, pending = self.pending, "pending underflow");
            return Err(ApiError::Internal);
        }
        self.pending -= days;
        self.used += days;
        self.check()
    }

    /// reject/cancel: move `days` from pending back to available.
    pub fn release(&mut self, days: f64) -> Result<(), ApiError> {
        if self.pending + EPS < days {
            tracing::error!(balance_id = self.id, days, pending = self.pending, "pending underflow");
            return Err(ApiError::Internal);
        }
        self.pending -= days;
        self.available += days;
        self.check()
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.is_balanced() {
            Ok(())
        } else {
            tracing::error!(balance_id = self.id, "balance conservation violated");
            Err(ApiError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(allocated: f64, carry: f64) -> LeaveBalance {
        LeaveBalance {
            id: 1,
            tenant_id: 1,
            user_id: 1000,
            leave_type_id: 1,
            year: 2025,
            total_allocated: allocated,
            used: 0.0,
            pending: 0.0,
            available: allocated + carry,
            carry_forward: carry,
        }
    }

    #[test]
    fn reserve_then_approve_matches_the_entitlement_scenario() {
        // 12-day entitlement, 5-day request
        let mut bal = balance(12.0, 0.0);
        bal.reserve(5.0).unwrap();
        assert_eq!(bal.available, 7.0);
        assert_eq!(bal.pending, 5.0);
        assert!(bal.is_balanced());

        bal.commit_used(5.0).unwrap();
        assert_eq!(bal.available, 7.0);
        assert_eq!(bal.pending, 0.0);
        assert_eq!(bal.used, 5.0);
        assert!(bal.is_balanced());
    }

    #[test]
    fn reserve_then_release_restores_available() {
        let mut bal = balance(10.0, 2.0);
        bal.reserve(4.0).unwrap();
        bal.release(4.0).unwrap();
        assert_eq!(bal.available, 12.0);
        assert_eq!(bal.pending, 0.0);
        assert_eq!(bal.used, 0.0);
        assert!(bal.is_balanced());
    }

    #[test]
    fn reserve_fails_when_available_is_short() {
        let mut bal = balance(3.0, 0.0);
        let err = bal.reserve(4.0).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        // untouched on failure
        assert_eq!(bal.available, 3.0);
        assert_eq!(bal.pending, 0.0);
    }

    #[test]
    fn reserve_allows_spending_the_exact_remainder() {
        let mut bal = balance(3.0, 0.0);
        bal.reserve(3.0).unwrap();
        assert_eq!(bal.available, 0.0);
        assert_eq!(bal.pending, 3.0);
    }

    #[test]
    fn commit_more_than_pending_is_an_internal_error() {
        let mut bal = balance(10.0, 0.0);
        bal.reserve(2.0).unwrap();
        assert!(matches!(bal.commit_used(3.0), Err(ApiError::Internal)));
    }

    #[test]
    fn conservation_holds_across_a_mixed_sequence() {
        let mut bal = balance(20.0, 5.0);
        bal.reserve(6.0).unwrap();
        bal.reserve(3.0).unwrap();
        bal.commit_used(6.0).unwrap();
        bal.release(3.0).unwrap();
        bal.reserve(10.0).unwrap();
        assert!(bal.is_balanced());
        assert_eq!(bal.used, 6.0);
        assert_eq!(bal.pending, 10.0);
        assert_eq!(bal.available, 9.0);
    }
}
