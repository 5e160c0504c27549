//! The pool itself.
//!
//! - [`Pool`] - Acquire/release handle with on-demand growth
//! - [`PooledObject`] - RAII guard returning its object on drop
//! - [`PoolStats`] - Point-in-time statistics

mod engine;
mod guard;
mod stats;
mod store;

pub use engine::Pool;
pub use guard::PooledObject;
pub use stats::PoolStats;
