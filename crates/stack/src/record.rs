//! Typed records over the byte-record stack
//!
//! [`Record`] fixes how a value maps to its byte image; [`TypedStack`]
//! stores those images in a [`RecordStack`] and hands values back by copy.
//!
//! # Layout
//!
//! Built-in numeric impls use little-endian byte order, `bool` is one byte
//! (`0` or `1`), and `[u8; N]` is stored verbatim.

use core::fmt;
use core::marker::PhantomData;

use crate::config::StackConfig;
use crate::error::{StackError, StackResult};
use crate::format::DumpWriter;
use crate::stack::RecordStack;

/// A value with a fixed, documented byte image
pub trait Record: Sized {
    /// Width of the byte image
    const SIZE: usize;

    /// Write the byte image into `out`, which is exactly `SIZE` bytes
    fn encode(&self, out: &mut [u8]);

    /// Rebuild a value from exactly `SIZE` bytes
    fn decode(bytes: &[u8]) -> Self;
}

macro_rules! impl_record_le {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                const SIZE: usize = core::mem::size_of::<$ty>();

                #[inline]
                fn encode(&self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_le_bytes());
                }

                #[inline]
                fn decode(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; core::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(raw)
                }
            }
        )*
    };
}

impl_record_le! {
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64,
}

impl Record for bool {
    const SIZE: usize = 1;

    fn encode(&self, out: &mut [u8]) {
        out[0] = u8::from(*self);
    }

    fn decode(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

impl<const N: usize> Record for [u8; N] {
    const SIZE: usize = N;

    fn encode(&self, out: &mut [u8]) {
        out.copy_from_slice(self);
    }

    fn decode(bytes: &[u8]) -> Self {
        let mut raw = [0u8; N];
        raw.copy_from_slice(bytes);
        raw
    }
}

/// LIFO stack of [`Record`] values
///
/// # Example
/// ```
/// use nebula_stack::TypedStack;
///
/// let mut stack = TypedStack::<i32>::new(16)?;
/// for value in [55, 48, 1289, 78] {
///     stack.push(&value)?;
/// }
///
/// assert_eq!(stack.pop()?, 78);
/// assert_eq!(stack.pop()?, 1289);
/// assert_eq!(stack.size(), 2);
/// # Ok::<(), nebula_stack::StackError>(())
/// ```
pub struct TypedStack<R: Record> {
    inner: RecordStack,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Record> TypedStack<R> {
    /// Create a typed stack with the default configuration
    pub fn new(capacity: usize) -> StackResult<Self> {
        Self::with_config(capacity, StackConfig::default())
    }

    /// Create a typed stack with a custom configuration
    pub fn with_config(capacity: usize, config: StackConfig) -> StackResult<Self> {
        Ok(Self {
            inner: RecordStack::with_config(capacity, R::SIZE, config)?,
            _marker: PhantomData,
        })
    }

    /// Push a value
    ///
    /// The value is encoded straight into its slot in the buffer.
    pub fn push(&mut self, value: &R) -> StackResult<()> {
        self.inner.push_with(|slot| value.encode(slot))
    }

    /// Pop the top value
    pub fn pop(&mut self) -> StackResult<R> {
        let value = self.peek().ok_or_else(StackError::empty)?;
        self.inner.discard_top()?;
        Ok(value)
    }

    /// Copy of the top value without removing it
    pub fn peek(&self) -> Option<R> {
        self.inner.peek().map(R::decode)
    }

    /// Whether the stack holds no values
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of values currently stored
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    /// Number of value slots currently allocated
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Capacity floor fixed at creation
    pub fn min_capacity(&self) -> usize {
        self.inner.min_capacity()
    }

    /// Drop every value, keeping the allocated capacity
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Make room for at least `additional` more values
    pub fn reserve(&mut self, additional: usize) -> StackResult<()> {
        self.inner.reserve(additional)
    }

    /// Shrink capacity to `max(size, min_capacity)`
    pub fn trim_to_size(&mut self) -> StackResult<()> {
        self.inner.trim_to_size()
    }

    /// Render every value, bottom to top, with a caller-supplied function
    pub fn debug_dump_with<F>(&self, render: F) -> String
    where
        F: Fn(&R) -> String,
    {
        let mut writer = DumpWriter::new(self.size());
        for record in self.inner.records() {
            let scratch = R::decode(record);
            writer.token(&render(&scratch));
        }
        writer.finish()
    }

    /// Borrow the underlying byte-record stack
    pub fn as_records(&self) -> &RecordStack {
        &self.inner
    }

    /// Unwrap into the underlying byte-record stack
    pub fn into_records(self) -> RecordStack {
        self.inner
    }

    /// Release the buffer
    pub fn destroy(self) {
        self.inner.destroy();
    }
}

impl<R: Record + fmt::Display> TypedStack<R> {
    /// Render every value, bottom to top, as `"<count> [ v v ... ]"`
    pub fn debug_dump(&self) -> String {
        self.debug_dump_with(ToString::to_string)
    }
}

impl<R: Record> TryFrom<RecordStack> for TypedStack<R> {
    type Error = StackError;

    fn try_from(inner: RecordStack) -> StackResult<Self> {
        if inner.record_size() != R::SIZE {
            return Err(StackError::invalid_argument(R::SIZE, inner.record_size()));
        }
        Ok(Self {
            inner,
            _marker: PhantomData,
        })
    }
}

impl<R: Record> fmt::Debug for TypedStack<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedStack")
            .field("type", &core::any::type_name::<R>())
            .field("inner", &self.inner)
            .finish()
    }
}
