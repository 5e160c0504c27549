//! fixpool
//!
//! A fixed-object-size memory pool for Rust.
//!
//! `fixpool` keeps a bounded reservoir of equally sized byte buffers that
//! callers acquire and return instead of allocating on every use. It is meant
//! for hot paths in buffer-heavy code:
//!
//! - network RX/TX buffers
//! - frame and packet scratch space
//! - fixed-size records in storage engines
//!
//! The crate intentionally:
//! - does NOT do variable-size allocation
//! - does NOT defragment or compact memory
//! - does NOT place objects by NUMA node or cache line
//! - does NOT run background threads
//!
//! It only does one thing: **get a buffer → use it → put it back**
//!
//! # Example
//!
//! ```
//! use fixpool::{Pool, PoolConfig, PoolError};
//!
//! fn main() -> Result<(), PoolError> {
//!     let config = PoolConfig::new(1500, 256)?
//!         .with_grow_factor(2)
//!         .with_erase_on_return(true);
//!     let pool = Pool::new(config)?;
//!
//!     match pool.get() {
//!         Some(mut frame) => {
//!             frame[..4].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
//!             pool.put(frame);
//!         }
//!         None => {
//!             // exhausted: apply backpressure or allocate elsewhere
//!         }
//!     }
//!
//!     // Or let a guard hand the object back when it goes out of scope.
//!     if let Some(mut frame) = pool.checkout() {
//!         frame.fill(0xff);
//!     }
//!
//!     assert_eq!(pool.available(), 256);
//!     Ok(())
//! }
//! ```
//!
//! # Concurrency
//!
//! [`Pool`] is `Send + Sync` and cheap to clone. Acquire and release only
//! ever need the shared side of the store lock, so they never serialize
//! against each other. Growth takes the exclusive side; acquires and releases
//! that arrive while it runs wait for it to finish.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod object;
mod pool;

//
// Public surface (intentionally tiny)
//

pub use config::{DEFAULT_GROW_FACTOR, DEFAULT_INITIAL_COUNT, DEFAULT_OBJECT_SIZE, PoolConfig};
pub use error::PoolError;
pub use object::Object;
pub use pool::{Pool, PoolStats, PooledObject};
