//! Standalone error types for nebula-stack
//!
//! Uses thiserror for clean, idiomatic Rust error definitions.

use thiserror::Error;

#[cfg(feature = "logging")]
use tracing::error;

// ============================================================================
// Main Error Types
// ============================================================================

/// Record stack errors
///
/// Every fallible stack operation leaves the stack exactly as it was before
/// the call when it returns one of these.
#[must_use = "errors should be handled"]
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    // --- Construction Errors ---
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    // --- Allocation Errors ---
    #[error("Allocation failed during {operation}: {reason}")]
    AllocationFailure {
        operation: &'static str,
        reason: String,
    },

    // --- Usage Errors ---
    #[error("Stack is empty, there is nothing to pop")]
    EmptyStack,

    #[error("Invalid argument: expected {expected} bytes, got {actual}")]
    InvalidArgument { expected: usize, actual: usize },

    #[error("Invalid state: {reason}")]
    InvalidState { reason: String },
}

impl StackError {
    /// Check if error is retryable
    ///
    /// Only allocation failures depend on conditions outside the stack.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::AllocationFailure { .. })
    }

    /// Get error code for categorization
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { .. } => "STACK:CONFIG:INVALID",
            Self::AllocationFailure { .. } => "STACK:ALLOC:FAILED",
            Self::EmptyStack => "STACK:USAGE:EMPTY",
            Self::InvalidArgument { .. } => "STACK:USAGE:ARGUMENT",
            Self::InvalidState { .. } => "STACK:SYSTEM:STATE",
        }
    }

    // ============================================================================
    // Convenience Constructors
    // ============================================================================

    /// Create invalid configuration error
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Create capacity-below-threshold error
    #[must_use]
    pub fn capacity_below_minimum(capacity: usize, minimum: usize) -> Self {
        Self::invalid_configuration(format!(
            "capacity {capacity} is below the minimum stack capacity {minimum}"
        ))
    }

    /// Create allocation failure error for a refused request of `bytes`
    #[must_use]
    pub fn allocation_failure(operation: &'static str, bytes: usize) -> Self {
        #[cfg(feature = "logging")]
        error!(
            operation = operation,
            bytes = bytes,
            "Stack allocation failed"
        );

        Self::AllocationFailure {
            operation,
            reason: format!("{bytes} bytes could not be allocated"),
        }
    }

    /// Create allocation failure error for a size that cannot be represented
    pub fn size_overflow(operation: &'static str, detail: &str) -> Self {
        #[cfg(feature = "logging")]
        error!(
            operation = operation,
            detail = detail,
            "Stack buffer size overflow"
        );

        Self::AllocationFailure {
            operation,
            reason: format!("size overflow: {detail}"),
        }
    }

    /// Create empty stack error
    #[must_use]
    pub fn empty() -> Self {
        Self::EmptyStack
    }

    /// Create invalid argument error for a record of the wrong width
    #[must_use]
    pub fn invalid_argument(expected: usize, actual: usize) -> Self {
        Self::InvalidArgument { expected, actual }
    }

    /// Create invalid state error
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }

    /// Check if this is an empty stack error
    #[must_use]
    pub fn is_empty_stack(&self) -> bool {
        matches!(self, Self::EmptyStack)
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Result type for stack operations
pub type StackResult<T> = core::result::Result<T, StackError>;

/// Generic result type alias
pub type Result<T> = StackResult<T>;

// ============================================================================
// Tests
// ============================================================================
