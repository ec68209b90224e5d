//! Contiguous-buffer stack of fixed-size opaque records
//!
//! # Layout
//!
//! Records live back to back in one owned `Vec<u8>`:
//!
//! ```text
//! | record 0 (bottom) | record 1 | ... | record count-1 (top) | unused slots ... |
//! 0                                    count * record_size    capacity * record_size
//! ```
//!
//! The vector's length is always `count * record_size`, so bytes past the
//! top record are never observable. The slot capacity is tracked separately
//! from `Vec::capacity`, which the allocator is free to round up.

use core::fmt;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

use crate::config::StackConfig;
use crate::error::{StackError, StackResult};
use crate::format::{DumpWriter, RecordFormatter};
use crate::growth;

/// LIFO stack of fixed-size byte records
///
/// # Example
/// ```
/// use nebula_stack::RecordStack;
///
/// let mut stack = RecordStack::new(16, 4)?;
/// stack.push(&55i32.to_le_bytes())?;
/// stack.push(&78i32.to_le_bytes())?;
///
/// assert_eq!(stack.pop()?, 78i32.to_le_bytes());
/// assert_eq!(stack.size(), 1);
/// # Ok::<(), nebula_stack::StackError>(())
/// ```
pub struct RecordStack {
    buffer: Vec<u8>,
    record_size: usize,
    min_capacity: usize,
    capacity: usize,
    count: usize,
    config: StackConfig,
}

impl RecordStack {
    /// Create a stack with the default configuration
    pub fn new(capacity: usize, record_size: usize) -> StackResult<Self> {
        Self::with_config(capacity, record_size, StackConfig::default())
    }

    /// Create a stack with a custom configuration
    ///
    /// `capacity` becomes both the initial slot count and the floor that
    /// [`trim_to_size`](Self::trim_to_size) never shrinks below.
    pub fn with_config(
        capacity: usize,
        record_size: usize,
        config: StackConfig,
    ) -> StackResult<Self> {
        config.validate()?;

        if capacity < config.min_capacity_threshold {
            return Err(StackError::capacity_below_minimum(
                capacity,
                config.min_capacity_threshold,
            ));
        }
        if record_size == 0 {
            return Err(StackError::invalid_configuration(
                "record size must be at least 1 byte",
            ));
        }

        let buffer = Self::allocate(&config, capacity, record_size, "create")?;

        #[cfg(feature = "logging")]
        trace!(
            capacity = capacity,
            record_size = record_size,
            "Created record stack"
        );

        Ok(Self {
            buffer,
            record_size,
            min_capacity: capacity,
            capacity,
            count: 0,
            config,
        })
    }

    /// Allocate an empty buffer with room for exactly `slots` records
    fn allocate(
        config: &StackConfig,
        slots: usize,
        record_size: usize,
        operation: &'static str,
    ) -> StackResult<Vec<u8>> {
        let Some(bytes) = growth::buffer_bytes(slots, record_size) else {
            let detail = format!("{slots} slots of {record_size} bytes");
            return Err(StackError::size_overflow(operation, &detail));
        };

        if !config.allows(bytes) {
            return Err(StackError::allocation_failure(operation, bytes));
        }

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(bytes)
            .map_err(|_| StackError::allocation_failure(operation, bytes))?;
        Ok(buffer)
    }

    /// Make room for `required` slots in total
    ///
    /// On failure nothing about the stack changes.
    fn ensure_capacity(&mut self, required: usize, operation: &'static str) -> StackResult<()> {
        let Some(new_capacity) = growth::grown_capacity(self.capacity, required) else {
            return Ok(());
        };

        let Some(bytes) = growth::buffer_bytes(new_capacity, self.record_size) else {
            let detail = format!("{new_capacity} slots of {} bytes", self.record_size);
            return Err(StackError::size_overflow(operation, &detail));
        };
        if !self.config.allows(bytes) {
            return Err(StackError::allocation_failure(operation, bytes));
        }

        // `try_reserve_exact` counts from the current length, not capacity.
        self.buffer
            .try_reserve_exact(bytes - self.buffer.len())
            .map_err(|_| StackError::allocation_failure(operation, bytes))?;

        #[cfg(feature = "logging")]
        debug!(
            from = self.capacity,
            to = new_capacity,
            record_size = self.record_size,
            "Grew record stack"
        );

        self.capacity = new_capacity;
        Ok(())
    }

    fn check_width(&self, len: usize) -> StackResult<()> {
        if len == self.record_size {
            Ok(())
        } else {
            Err(StackError::invalid_argument(self.record_size, len))
        }
    }

    /// Byte range of the top record
    fn top_range(&self) -> Option<core::ops::Range<usize>> {
        let end = self.buffer.len();
        (self.count > 0).then(|| end - self.record_size..end)
    }

    /// Push a record of exactly `record_size` bytes
    pub fn push(&mut self, record: &[u8]) -> StackResult<()> {
        self.check_width(record.len())?;
        self.push_with(|slot| slot.copy_from_slice(record))
    }

    /// Append one zeroed slot and let `fill` write the record into it
    pub(crate) fn push_with<F>(&mut self, fill: F) -> StackResult<()>
    where
        F: FnOnce(&mut [u8]),
    {
        self.ensure_capacity(self.count + 1, "push")?;

        let start = self.buffer.len();
        self.buffer.resize(start + self.record_size, 0);
        fill(&mut self.buffer[start..]);
        self.count += 1;

        debug_assert!(self.count <= self.capacity, "count exceeds capacity");
        Ok(())
    }

    /// Pop the top record
    pub fn pop(&mut self) -> StackResult<Vec<u8>> {
        let range = self.top_range().ok_or_else(StackError::empty)?;
        let record = self.buffer[range.clone()].to_vec();

        self.buffer.truncate(range.start);
        self.count -= 1;
        Ok(record)
    }

    /// Pop the top record into `out`
    ///
    /// `out` must be exactly `record_size` bytes. When the stack is empty the
    /// call fails with [`StackError::EmptyStack`] and `out` is not written.
    pub fn pop_into(&mut self, out: &mut [u8]) -> StackResult<()> {
        self.check_width(out.len())?;
        let range = self.top_range().ok_or_else(StackError::empty)?;

        out.copy_from_slice(&self.buffer[range]);
        self.discard_top()
    }

    /// Remove the top record without copying it out
    pub(crate) fn discard_top(&mut self) -> StackResult<()> {
        let range = self.top_range().ok_or_else(StackError::empty)?;
        self.buffer.truncate(range.start);
        self.count -= 1;
        Ok(())
    }

    /// Live records, bottom to top
    pub(crate) fn records(&self) -> core::slice::ChunksExact<'_, u8> {
        self.buffer.chunks_exact(self.record_size)
    }

    /// Borrow the top record without removing it
    pub fn peek(&self) -> Option<&[u8]> {
        self.top_range().map(|range| &self.buffer[range])
    }

    /// Whether the stack holds no records
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of records currently stored
    #[inline]
    pub fn size(&self) -> usize {
        self.count
    }

    /// Number of record slots currently allocated
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Capacity floor fixed at creation
    #[inline]
    pub fn min_capacity(&self) -> usize {
        self.min_capacity
    }

    /// Width of every record in bytes
    #[inline]
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    /// Bytes occupied by live records
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.buffer.len()
    }

    /// Configuration the stack was created with
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Drop every record, keeping the allocated capacity
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.count = 0;
    }

    /// Make room for at least `additional` more records
    ///
    /// Uses the same growth policy as [`push`](Self::push).
    pub fn reserve(&mut self, additional: usize) -> StackResult<()> {
        let Some(required) = self.count.checked_add(additional) else {
            let detail = format!("{} + {additional} slots", self.count);
            return Err(StackError::size_overflow("reserve", &detail));
        };
        self.ensure_capacity(required, "reserve")
    }

    /// Shrink capacity to `max(size, min_capacity)`
    ///
    /// A no-op when the stack is already that small. The shrunk buffer is
    /// allocated before the old one is released, so a failed trim leaves
    /// capacity and contents as they were.
    pub fn trim_to_size(&mut self) -> StackResult<()> {
        let Some(new_capacity) =
            growth::trimmed_capacity(self.capacity, self.count, self.min_capacity)
        else {
            return Ok(());
        };

        let mut buffer = Self::allocate(&self.config, new_capacity, self.record_size, "trim")?;
        buffer.extend_from_slice(&self.buffer);

        #[cfg(feature = "logging")]
        debug!(
            from = self.capacity,
            to = new_capacity,
            record_size = self.record_size,
            "Trimmed record stack"
        );

        self.buffer = buffer;
        self.capacity = new_capacity;
        Ok(())
    }

    /// Render every record, bottom to top, as `"<count> [ tok tok ... ]"`
    ///
    /// Each record is copied into `scratch` (exactly `record_size` bytes)
    /// before the formatter sees it; on return `scratch` holds the top
    /// record, or is untouched when the stack is empty.
    pub fn debug_dump<F>(&self, scratch: &mut [u8], formatter: &F) -> StackResult<String>
    where
        F: RecordFormatter + ?Sized,
    {
        self.check_width(scratch.len())?;

        let mut writer = DumpWriter::new(self.count);
        for record in self.records() {
            scratch.copy_from_slice(record);
            let token = formatter.render(scratch);
            writer.token(&token);
        }
        Ok(writer.finish())
    }

    /// Release the buffer
    ///
    /// Consumes the stack, so a destroyed stack cannot be used or destroyed
    /// again.
    pub fn destroy(self) {
        #[cfg(feature = "logging")]
        debug!(
            capacity = self.capacity,
            remaining = self.count,
            "Destroyed record stack"
        );

        drop(self);
    }
}

impl fmt::Debug for RecordStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStack")
            .field("record_size", &self.record_size)
            .field("count", &self.count)
            .field("capacity", &self.capacity)
            .field("min_capacity", &self.min_capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_STACK_CAPACITY;

    fn int_stack() -> RecordStack {
        RecordStack::new(16, 4).unwrap()
    }

    #[test]
    fn test_create_sets_capacity_and_floor() {
        let stack = RecordStack::new(32, 8).unwrap();
        assert_eq!(stack.capacity(), 32);
        assert_eq!(stack.min_capacity(), 32);
        assert_eq!(stack.record_size(), 8);
        assert!(stack.is_empty());
        assert_eq!(stack.size(), 0);
    }

    #[test]
    fn test_create_rejects_small_capacity() {
        let err = RecordStack::new(MIN_STACK_CAPACITY - 1, 4).unwrap_err();
        assert!(matches!(err, StackError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_create_rejects_zero_record_size() {
        let err = RecordStack::new(16, 0).unwrap_err();
        assert!(matches!(err, StackError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_create_overflowing_buffer_fails() {
        let err = RecordStack::new(usize::MAX, 2).unwrap_err();
        assert!(matches!(err, StackError::AllocationFailure { .. }));
        let text = err.to_string();
        assert!(text.contains("size overflow"), "{text}");
        assert!(text.contains(&format!("{} slots of 2 bytes", usize::MAX)));
    }

    #[test]
    fn test_push_wrong_width() {
        let mut stack = int_stack();
        let err = stack.push(&[1, 2, 3]).unwrap_err();
        assert_eq!(err, StackError::invalid_argument(4, 3));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_empty() {
        let mut stack = int_stack();
        assert_eq!(stack.pop().unwrap_err(), StackError::EmptyStack);
    }

    #[test]
    fn test_pop_into_leaves_destination_on_empty() {
        let mut stack = int_stack();
        let mut out = [9u8; 4];
        assert!(stack.pop_into(&mut out).unwrap_err().is_empty_stack());
        assert_eq!(out, [9; 4]);
    }

    #[test]
    fn test_pop_into_wrong_width() {
        let mut stack = int_stack();
        stack.push(&[1, 2, 3, 4]).unwrap();

        let mut out = [0u8; 2];
        let err = stack.pop_into(&mut out).unwrap_err();
        assert!(matches!(err, StackError::InvalidArgument { .. }));
        assert_eq!(stack.size(), 1);
    }

    #[test]
    fn test_peek() {
        let mut stack = int_stack();
        assert_eq!(stack.peek(), None);

        stack.push(&[1, 0, 0, 0]).unwrap();
        stack.push(&[2, 0, 0, 0]).unwrap();
        assert_eq!(stack.peek(), Some(&[2, 0, 0, 0][..]));
        assert_eq!(stack.size(), 2);
    }

    #[test]
    fn test_growth_follows_policy() {
        let mut stack = int_stack();
        for i in 0..17u32 {
            stack.push(&i.to_le_bytes()).unwrap();
        }
        assert_eq!(stack.capacity(), 25);
        assert_eq!(stack.byte_len(), 17 * 4);
    }

    #[test]
    fn test_growth_respects_ceiling() {
        let config = StackConfig::bounded(16 * 4);
        let mut stack = RecordStack::with_config(16, 4, config).unwrap();
        for i in 0..16u32 {
            stack.push(&i.to_le_bytes()).unwrap();
        }

        let err = stack.push(&[0xff; 4]).unwrap_err();
        assert!(matches!(err, StackError::AllocationFailure { .. }));
        assert_eq!(stack.size(), 16);
        assert_eq!(stack.capacity(), 16);
        assert_eq!(stack.peek(), Some(&15u32.to_le_bytes()[..]));
    }

    #[test]
    fn test_reserve() {
        let mut stack = int_stack();
        stack.reserve(10).unwrap();
        assert_eq!(stack.capacity(), 16);

        stack.reserve(40).unwrap();
        assert_eq!(stack.capacity(), 40);

        let err = stack.reserve(usize::MAX).unwrap_err();
        assert!(err.to_string().contains("size overflow"));
        assert_eq!(stack.capacity(), 40);
    }

    #[test]
    fn test_trim_shrinks_to_count() {
        let mut stack = int_stack();
        for i in 0..30u32 {
            stack.push(&i.to_le_bytes()).unwrap();
        }
        for _ in 0..10 {
            stack.pop().unwrap();
        }
        assert!(stack.capacity() > 20);

        stack.trim_to_size().unwrap();
        assert_eq!(stack.capacity(), 20);
        assert_eq!(stack.pop().unwrap(), 19u32.to_le_bytes());
    }

    #[test]
    fn test_trim_never_below_floor() {
        let mut stack = int_stack();
        for i in 0..40u32 {
            stack.push(&i.to_le_bytes()).unwrap();
        }
        stack.clear();

        stack.trim_to_size().unwrap();
        assert_eq!(stack.capacity(), 16);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut stack = int_stack();
        for i in 0..20u32 {
            stack.push(&i.to_le_bytes()).unwrap();
        }
        let capacity = stack.capacity();

        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.capacity(), capacity);
    }

    #[test]
    fn test_debug_dump() {
        let mut stack = int_stack();
        for value in [55i32, 48, 1289] {
            stack.push(&value.to_le_bytes()).unwrap();
        }

        let mut scratch = [0u8; 4];
        let render = |record: &[u8]| i32::from_le_bytes(record.try_into().unwrap()).to_string();
        let dump = stack.debug_dump(&mut scratch, &render).unwrap();

        assert_eq!(dump, "3 [ 55 48 1289 ]");
        assert_eq!(scratch, 1289i32.to_le_bytes());
        assert_eq!(stack.size(), 3);
    }

    #[test]
    fn test_debug_dump_rejects_wrong_scratch() {
        let stack = int_stack();
        let mut scratch = [0u8; 8];
        let err = stack
            .debug_dump(&mut scratch, &crate::format::HexFormatter)
            .unwrap_err();
        assert!(matches!(err, StackError::InvalidArgument { .. }));
    }

    #[test]
    fn test_debug_output_omits_contents() {
        let stack = int_stack();
        let text = format!("{stack:?}");
        assert!(text.contains("record_size: 4"));
        assert!(!text.contains("buffer"));
    }
}
