//! Configuration for pool construction.
//!
//! [`PoolConfig`] is fixed at construction time; a running pool never changes
//! its object size or growth policy.
//!
//! # Example
//!
//! ```
//! use fixpool::PoolConfig;
//!
//! // 2 KiB RX buffers, 128 up front, tripling on exhaustion up to 4096.
//! let config = PoolConfig::new(2048, 128)?
//!     .with_grow_factor(3)
//!     .with_max_count(Some(4096))
//!     .with_erase_on_return(true);
//!
//! config.validate()?;
//! # Ok::<(), fixpool::PoolError>(())
//! ```

use crate::error::PoolError;

/// Default object size (4 KiB).
pub const DEFAULT_OBJECT_SIZE: usize = 4 * 1024;

/// Default number of objects allocated at construction.
pub const DEFAULT_INITIAL_COUNT: usize = 64;

/// Default grow factor (the pool never grows).
pub const DEFAULT_GROW_FACTOR: i32 = 0;

/// Configuration for a fixed-object-size pool.
///
/// - `object_size` - bytes per object, must be non-zero
/// - `initial_count` - objects allocated by [`Pool::new`](crate::Pool::new), at least 1
/// - `grow_factor` - `0` or negative never grows; `g > 0` multiplies the
///   current object count by `g` whenever the pool runs dry
/// - `erase_on_return` - zero every byte of an object when it is returned
/// - `max_count` - optional ceiling on the total object count
///
/// # Example
///
/// ```
/// use fixpool::PoolConfig;
///
/// let config = PoolConfig::default()
///     .with_object_size(16)
///     .with_initial_count(2);
///
/// assert_eq!(config.object_size(), 16);
/// assert!(!config.grows());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    object_size: usize,
    initial_count: usize,
    grow_factor: i32,
    erase_on_return: bool,
    max_count: Option<usize>,
}

impl PoolConfig {
    /// Creates a new, non-growing configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfiguration`] if `object_size` is zero
    /// or `initial_count` is zero.
    pub fn new(object_size: usize, initial_count: usize) -> Result<Self, PoolError> {
        let config = Self {
            object_size,
            initial_count,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the object size.
    ///
    /// Note: This does not validate the configuration. Use [`PoolConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_object_size(mut self, size: usize) -> Self {
        self.object_size = size;
        self
    }

    /// Sets the number of objects allocated at construction.
    ///
    /// Note: This does not validate the configuration.
    pub fn with_initial_count(mut self, count: usize) -> Self {
        self.initial_count = count;
        self
    }

    /// Sets the grow factor. `0` or negative disables growth.
    pub fn with_grow_factor(mut self, factor: i32) -> Self {
        self.grow_factor = factor;
        self
    }

    /// Enables or disables zeroing of objects on return.
    pub fn with_erase_on_return(mut self, erase: bool) -> Self {
        self.erase_on_return = erase;
        self
    }

    /// Caps the total object count growth may reach.
    ///
    /// Note: This does not validate the configuration.
    pub fn with_max_count(mut self, max: Option<usize>) -> Self {
        self.max_count = max;
        self
    }

    /// Returns the object size in bytes.
    pub fn object_size(&self) -> usize {
        self.object_size
    }

    /// Returns the number of objects allocated at construction.
    pub fn initial_count(&self) -> usize {
        self.initial_count
    }

    /// Returns the grow factor.
    pub fn grow_factor(&self) -> i32 {
        self.grow_factor
    }

    /// Returns whether objects are zeroed on return.
    pub fn erase_on_return(&self) -> bool {
        self.erase_on_return
    }

    /// Returns the growth ceiling, if any.
    pub fn max_count(&self) -> Option<usize> {
        self.max_count
    }

    /// Returns true if the pool may grow on exhaustion.
    pub fn grows(&self) -> bool {
        self.grow_factor > 0
    }

    /// Computes the object count growth should reach from `current`.
    ///
    /// The target compounds from the count after the most recent growth, so
    /// repeated exhaustion keeps multiplying instead of stalling at
    /// `initial_count * grow_factor`. A result equal to `current` means growth
    /// cannot add anything.
    ///
    /// ```
    /// use fixpool::PoolConfig;
    ///
    /// let config = PoolConfig::new(8, 1)?.with_grow_factor(3);
    /// assert_eq!(config.growth_target(1), 3);
    /// assert_eq!(config.growth_target(3), 9);
    /// # Ok::<(), fixpool::PoolError>(())
    /// ```
    pub fn growth_target(&self, current: usize) -> usize {
        if !self.grows() {
            return current;
        }

        let target = current.saturating_mul(self.grow_factor as usize);
        match self.max_count {
            Some(max) => target.min(max).max(current),
            None => target,
        }
    }

    /// Validates the current configuration.
    ///
    /// ```
    /// use fixpool::PoolConfig;
    ///
    /// let config = PoolConfig::default().with_object_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.object_size == 0 {
            return Err(PoolError::InvalidConfiguration {
                message: "object_size must be non-zero",
            });
        }

        if self.initial_count == 0 {
            return Err(PoolError::InvalidConfiguration {
                message: "initial_count must be at least 1",
            });
        }

        if let Some(max) = self.max_count {
            if max < self.initial_count {
                return Err(PoolError::InvalidConfiguration {
                    message: "max_count cannot be less than initial_count",
                });
            }
        }

        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            object_size: DEFAULT_OBJECT_SIZE,
            initial_count: DEFAULT_INITIAL_COUNT,
            grow_factor: DEFAULT_GROW_FACTOR,
            erase_on_return: false,
            max_count: None,
        }
    }
}
