//! Page arithmetic shared by both engines.

/// Returns `ceil(total_elements / page_size)`.
///
/// Never overflows, and returns `0` for an empty store or a non-positive
/// page size. The engines reject non-positive sizes before getting here.
#[inline]
pub fn total_pages(total_elements: i64, page_size: i64) -> i64 {
    if total_elements <= 0 || page_size <= 0 {
        return 0;
    }

    (total_elements - 1) / page_size + 1
}

/// Converts a row count reported by a store into an accumulator capacity.
#[inline]
pub(crate) fn capacity_hint(total_elements: i64) -> usize {
    usize::try_from(total_elements).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_up() {
        assert_eq!(total_pages(10, 2), 5);
        assert_eq!(total_pages(3, 1), 3);
        assert_eq!(total_pages(2, 5), 1);
        assert_eq!(total_pages(1, 1), 1);
        assert_eq!(total_pages(7, 2), 4);
        assert_eq!(total_pages(1234, 100), 13);
    }

    #[test]
    fn test_empty_store_has_no_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(0, 1), 0);
    }

    #[test]
    fn test_extreme_values() {
        assert_eq!(total_pages(i64::MAX, 1), i64::MAX);
        assert_eq!(total_pages(i64::MAX, i64::MAX), 1);
        assert_eq!(total_pages(5, i64::MAX), 1);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_capacity_from_count() {
        assert_eq!(capacity_hint(42), 42);
        assert_eq!(capacity_hint(-1), 0);
    }
}
