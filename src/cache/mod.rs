//! Caching subsystem.
//!
//! [`BudgetCache`] holds at most one [`KeyInfo`](crate::KeyInfo) and an
//! independent cooldown deadline. It lives for the process and is never
//! persisted; [`BudgetCache::reset`] returns it to its initial state.

mod budget;
mod builder;

pub use budget::{BudgetCache, CacheConfig, CacheSnapshot, CacheStatus};
pub use builder::BudgetCacheBuilder;
