//! Pooled object type.
//!
//! - [`Object`] - Fixed-length byte buffer issued by a [`Pool`](crate::Pool)

mod data;

pub use data::Object;
