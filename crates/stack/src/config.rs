//! Record stack configuration

use crate::error::{StackError, StackResult};

/// Smallest initial capacity accepted by [`StackConfig::default`]
pub const MIN_STACK_CAPACITY: usize = 16;

/// Configuration for a record stack
///
/// The configuration is consulted only at creation time and on every
/// reallocation; it never changes the records already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackConfig {
    /// Lowest initial capacity a stack may be created with
    pub min_capacity_threshold: usize,

    /// Upper bound on the backing buffer size in bytes
    ///
    /// Any creation, growth, or reservation that would need more than this
    /// fails with [`StackError::AllocationFailure`].
    pub max_bytes: Option<usize>,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            min_capacity_threshold: MIN_STACK_CAPACITY,
            max_bytes: None,
        }
    }
}

impl StackConfig {
    /// Compact configuration - accepts any non-zero initial capacity
    #[must_use]
    pub fn compact() -> Self {
        Self {
            min_capacity_threshold: 1,
            max_bytes: None,
        }
    }

    /// Bounded configuration - default threshold with a byte ceiling
    #[must_use]
    pub fn bounded(max_bytes: usize) -> Self {
        Self {
            max_bytes: Some(max_bytes),
            ..Self::default()
        }
    }

    /// Set the minimum capacity threshold
    #[must_use = "builder methods must be chained or built"]
    pub fn with_min_capacity_threshold(mut self, threshold: usize) -> Self {
        self.min_capacity_threshold = threshold;
        self
    }

    /// Set the byte ceiling
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }

    /// Check the configuration itself for consistency
    pub fn validate(&self) -> StackResult<()> {
        if self.min_capacity_threshold == 0 {
            return Err(StackError::invalid_configuration(
                "minimum capacity threshold must be at least 1",
            ));
        }
        if self.max_bytes == Some(0) {
            return Err(StackError::invalid_configuration(
                "byte ceiling must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Whether a buffer of `bytes` bytes fits under the ceiling
    pub(crate) fn allows(&self, bytes: usize) -> bool {
        self.max_bytes.is_none_or(|max| bytes <= max)
    }
}
