//! Size-based admission predicate.

/// True when `size` is within `[min_size, max_size]`, bounds inclusive.
/// Pure; evaluated only for entries that already passed the termination
/// check.
pub fn admissible(size: u64, min_size: u64, max_size: u64) -> bool {
    size >= min_size && size <= max_size
}
