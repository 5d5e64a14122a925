//! The leave engine: working-day counting, balance-ledger arithmetic,
//! policy checks, and yearly allocation. Everything here except
//! `allocation::ensure_allocated` is pure and synchronous; persistence
//! and locking live with the handlers.

pub mod allocation;
pub mod ledger;
pub mod policy;
pub mod workdays;
