//! Public types for budget lookups.

mod key_info;
mod reset;
mod status;

pub(crate) use key_info::KeyInfoResponse;

pub use key_info::KeyInfo;
pub use reset::{ResetCountdown, parse_reset_time};
pub use status::{
    BudgetStatus, CRITICAL_PERCENT, ErrorClass, ErrorSummary, Severity, WARNING_PERCENT,
};
