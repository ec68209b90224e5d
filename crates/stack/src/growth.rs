//! Capacity arithmetic shared by the stack and its typed wrapper
//!
//! All functions here are pure; the stack decides when to call them and
//! performs the reallocation itself.

/// Capacity to grow to when `required` slots are needed
///
/// Returns `None` when `current` already holds `required` slots, so callers
/// only reallocate when they must. Otherwise the result is at least
/// `required` and at least `current * 3 / 2 + 1`.
#[inline]
pub fn grown_capacity(current: usize, required: usize) -> Option<usize> {
    if required <= current {
        return None;
    }
    let geometric = current.saturating_mul(3) / 2 + 1;
    Some(geometric.max(required))
}

/// Capacity a trim should shrink to, or `None` when trimming is a no-op
#[inline]
pub fn trimmed_capacity(current: usize, count: usize, min_capacity: usize) -> Option<usize> {
    let target = count.max(min_capacity);
    (target < current).then_some(target)
}

/// Byte length of a buffer holding `slots` records of `record_size` bytes
///
/// `None` on overflow or when the result exceeds `isize::MAX`, the largest
/// allocation the global allocator accepts.
#[inline]
pub fn buffer_bytes(slots: usize, record_size: usize) -> Option<usize> {
    slots
        .checked_mul(record_size)
        .filter(|&bytes| isize::try_from(bytes).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_growth_when_room_left() {
        assert_eq!(grown_capacity(16, 16), None);
        assert_eq!(grown_capacity(16, 3), None);
    }

    #[test]
    fn test_geometric_growth() {
        assert_eq!(grown_capacity(16, 17), Some(25));
        assert_eq!(grown_capacity(25, 26), Some(38));
        assert_eq!(grown_capacity(1, 2), Some(2));
    }

    #[test]
    fn test_growth_jumps_to_required() {
        assert_eq!(grown_capacity(16, 100), Some(100));
    }

    #[test]
    fn test_growth_saturates() {
        let grown = grown_capacity(usize::MAX - 1, usize::MAX).unwrap();
        assert_eq!(grown, usize::MAX);
    }

    #[test]
    fn test_trim_target() {
        assert_eq!(trimmed_capacity(38, 20, 16), Some(20));
        assert_eq!(trimmed_capacity(38, 3, 16), Some(16));
        assert_eq!(trimmed_capacity(16, 3, 16), None);
        assert_eq!(trimmed_capacity(20, 20, 16), None);
    }

    #[test]
    fn test_buffer_bytes_overflow() {
        assert_eq!(buffer_bytes(16, 4), Some(64));
        assert_eq!(buffer_bytes(usize::MAX, 2), None);
        assert_eq!(buffer_bytes(usize::MAX / 2 + 1, 1), None);
    }
}
