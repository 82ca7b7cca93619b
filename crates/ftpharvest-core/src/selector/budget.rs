//! Space and count budget for one enumeration pass.
//!
//! Owned by a single selection pass; checked before every admission and
//! never rolled back.

/// Remaining allowed bytes and remaining allowed file count.
#[derive(Debug)]
pub struct SpaceBudget {
    available: u64,
    admitted: usize,
    max_files: usize,
}

impl SpaceBudget {
    pub fn new(space_budget: u64, max_files: usize) -> Self {
        Self {
            available: space_budget,
            admitted: 0,
            max_files,
        }
    }

    /// Bytes still available.
    pub fn available(&self) -> u64 {
        self.available
    }

    /// Files admitted so far.
    pub fn admitted(&self) -> usize {
        self.admitted
    }

    /// The termination condition: true once this entry can no longer be
    /// accommodated, by size or by count. Ends the whole scan, not just
    /// the current directory.
    pub fn exhausted_by(&self, size: u64) -> bool {
        size > self.available || self.admitted >= self.max_files
    }

    /// Record an admission. Callers must have checked `exhausted_by` first.
    pub fn admit(&mut self, size: u64) {
        debug_assert!(!self.exhausted_by(size));
        self.available = self.available.saturating_sub(size);
        self.admitted += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admission_decrements_space_and_counts() {
        let mut b = SpaceBudget::new(1000, 10);
        assert!(!b.exhausted_by(400));
        b.admit(400);
        assert_eq!(b.available(), 600);
        assert_eq!(b.admitted(), 1);
        b.admit(600);
        assert_eq!(b.available(), 0);
        assert_eq!(b.admitted(), 2);
    }

    #[test]
    fn exhausted_when_entry_exceeds_remaining_space() {
        let mut b = SpaceBudget::new(300, 10);
        b.admit(150);
        assert!(b.exhausted_by(400));
        assert!(!b.exhausted_by(150));
        // Exact fit is still admissible.
        assert!(!b.exhausted_by(b.available()));
    }

    #[test]
    fn exhausted_when_count_cap_reached() {
        let mut b = SpaceBudget::new(u64::MAX, 1);
        assert!(!b.exhausted_by(10));
        b.admit(10);
        assert!(b.exhausted_by(10));
        assert!(b.exhausted_by(0));
    }

    #[test]
    fn zero_size_entry_never_exhausts_space() {
        let b = SpaceBudget::new(0, 10);
        assert!(!b.exhausted_by(0));
        assert!(b.exhausted_by(1));
    }
}
