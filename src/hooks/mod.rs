//! Record lifecycle hooks
//!
//! Logic that runs around a write: wallet accrual before a transaction is
//! committed, the audit trail computed before a booking update is applied,
//! and field derivations before catalog records are saved.

mod accrual;
mod booking;
mod presave;

pub use accrual::BalanceAccrualHook;
pub use booking::{BookingAuditHook, BOOKKEEPING_FIELDS};
pub use presave::{kebab_case, PreSave};
