//! # nebula-stack
//!
//! A LIFO stack of fixed-size records stored back to back in one
//! contiguous, growable byte buffer.
//!
//! The stack never interprets the bytes it stores. Every record has the same
//! width, fixed at creation; capacity grows by a factor of 1.5 on demand and
//! only shrinks when explicitly trimmed, never below the initial capacity.
//!
//! ## Quick Start
//!
//! ```rust
//! use nebula_stack::prelude::*;
//!
//! // Raw byte records
//! let mut stack = RecordStack::new(16, 4)?;
//! stack.push(&1289i32.to_le_bytes())?;
//! assert_eq!(stack.pop()?, 1289i32.to_le_bytes());
//!
//! // Typed records over the same buffer layout
//! let mut typed = TypedStack::<u64>::new(16)?;
//! typed.push(&7)?;
//! assert_eq!(typed.debug_dump(), "1 [ 7 ]");
//! # Ok::<(), StackError>(())
//! ```
//!
//! ## Features
//!
//! - `logging` (default): reallocation and lifecycle events through `tracing`
//!
//! ## Threading
//!
//! Stacks carry no internal synchronization. Share one across threads by
//! wrapping it in a single exclusive lock held for each whole operation.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

// Error types
pub mod error;

// Core modules
pub mod config;
pub mod format;
pub mod growth;
pub mod handle;
pub mod record;
pub mod stack;

pub use crate::config::{MIN_STACK_CAPACITY, StackConfig};
pub use crate::error::{Result, StackError, StackResult};
pub use crate::format::{HexFormatter, RecordFormatter};
pub use crate::handle::{StackHandle, StackState};
pub use crate::record::{Record, TypedStack};
pub use crate::stack::RecordStack;

// Public API exports
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::config::{MIN_STACK_CAPACITY, StackConfig};
    pub use crate::error::{StackError, StackResult};
    pub use crate::format::RecordFormatter;
    pub use crate::handle::{StackHandle, StackState};
    pub use crate::record::{Record, TypedStack};
    pub use crate::stack::RecordStack;
}
