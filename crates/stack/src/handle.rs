//! Re-checkable stack slot with an explicit lifecycle
//!
//! An owned [`RecordStack`] cannot be touched after [`RecordStack::destroy`]
//! because destruction consumes it. Callers that keep a stack in a
//! long-lived slot (a struct field, a registry entry) use [`StackHandle`]
//! instead: it walks `Uninitialized -> Created -> Destroyed` and answers
//! with [`StackError::InvalidState`] when used out of order, never by
//! touching a released buffer.

#[cfg(feature = "logging")]
use tracing::warn;

use crate::config::StackConfig;
use crate::error::{StackError, StackResult};
use crate::stack::RecordStack;

/// Lifecycle position of a [`StackHandle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackState {
    /// No stack has been created yet
    Uninitialized,
    /// The handle owns a live stack
    Created,
    /// The stack was destroyed; terminal
    Destroyed,
}

#[derive(Debug, Default)]
enum Slot {
    #[default]
    Uninitialized,
    Created(RecordStack),
    Destroyed,
}

/// Slot owning at most one [`RecordStack`] over its lifetime
#[derive(Debug, Default)]
pub struct StackHandle {
    slot: Slot,
}

impl StackHandle {
    /// Create an uninitialized handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the stack with the default configuration
    pub fn create(&mut self, capacity: usize, record_size: usize) -> StackResult<()> {
        self.create_with_config(capacity, record_size, StackConfig::default())
    }

    /// Create the stack with a custom configuration
    ///
    /// Only valid on an uninitialized handle; a failed creation leaves the
    /// handle uninitialized.
    pub fn create_with_config(
        &mut self,
        capacity: usize,
        record_size: usize,
        config: StackConfig,
    ) -> StackResult<()> {
        match self.slot {
            Slot::Uninitialized => {
                let stack = RecordStack::with_config(capacity, record_size, config)?;
                self.slot = Slot::Created(stack);
                Ok(())
            }
            Slot::Created(_) => Err(StackError::invalid_state("stack already created")),
            Slot::Destroyed => Err(StackError::invalid_state("stack was destroyed")),
        }
    }

    /// Current lifecycle position
    pub fn state(&self) -> StackState {
        match self.slot {
            Slot::Uninitialized => StackState::Uninitialized,
            Slot::Created(_) => StackState::Created,
            Slot::Destroyed => StackState::Destroyed,
        }
    }

    /// Borrow the live stack
    pub fn get(&self) -> StackResult<&RecordStack> {
        match &self.slot {
            Slot::Created(stack) => Ok(stack),
            Slot::Uninitialized => Err(StackError::invalid_state("stack is uninitialized")),
            Slot::Destroyed => Err(StackError::invalid_state("stack was destroyed")),
        }
    }

    /// Mutably borrow the live stack
    pub fn get_mut(&mut self) -> StackResult<&mut RecordStack> {
        match &mut self.slot {
            Slot::Created(stack) => Ok(stack),
            Slot::Uninitialized => Err(StackError::invalid_state("stack is uninitialized")),
            Slot::Destroyed => Err(StackError::invalid_state("stack was destroyed")),
        }
    }

    /// Whether the live stack is empty
    pub fn is_empty(&self) -> StackResult<bool> {
        self.get().map(RecordStack::is_empty)
    }

    /// Number of records in the live stack
    pub fn size(&self) -> StackResult<usize> {
        self.get().map(RecordStack::size)
    }

    /// Release the stack
    ///
    /// Destroying twice, or destroying a handle that never held a stack, is
    /// reported as [`StackError::InvalidState`] and otherwise does nothing.
    pub fn destroy(&mut self) -> StackResult<()> {
        match core::mem::replace(&mut self.slot, Slot::Destroyed) {
            Slot::Created(stack) => {
                stack.destroy();
                Ok(())
            }
            Slot::Uninitialized => {
                self.slot = Slot::Uninitialized;
                Err(StackError::invalid_state("destroy on uninitialized stack"))
            }
            Slot::Destroyed => {
                #[cfg(feature = "logging")]
                warn!("Stack destroyed twice");

                Err(StackError::invalid_state("stack already destroyed"))
            }
        }
    }
}
