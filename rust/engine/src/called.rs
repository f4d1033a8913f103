use serde::Serialize;

/// Highest number that can be called.
pub const MAX_NUMBER: u8 = 75;

/// Set of called numbers in 1..=75, stored as a bitmask.
///
/// Pattern evaluation only ever sees this type, so results cannot depend on call order.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct CalledSet {
    bits: u128,
}

impl CalledSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `n`; returns false when it was already present or outside 1..=75.
    pub fn insert(&mut self, n: u8) -> bool {
        if !(1..=MAX_NUMBER).contains(&n) {
            return false;
        }
        let mask = 1u128 << n;
        let fresh = self.bits & mask == 0;
        self.bits |= mask;
        fresh
    }

    pub fn contains(&self, n: u8) -> bool {
        (1..=MAX_NUMBER).contains(&n) && self.bits & (1u128 << n) != 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Numbers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=MAX_NUMBER).filter(move |n| self.contains(*n))
    }

    /// Numbers of the 1..=75 domain not yet in the set, ascending.
    pub fn remaining(&self) -> Vec<u8> {
        (1..=MAX_NUMBER).filter(|n| !self.contains(*n)).collect()
    }
}

impl FromIterator<u8> for CalledSet {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        let mut set = CalledSet::new();
        for n in iter {
            set.insert(n);
        }
        set
    }
}

/// Calls made so far in a round: the set used for evaluation plus the ordered history
/// used for display.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct CalledNumbers {
    #[serde(skip)]
    set: CalledSet,
    /// Most recent call first.
    sequence: Vec<u8>,
}

impl CalledNumbers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a call. Duplicates and out-of-range numbers are ignored and return false.
    pub fn record(&mut self, n: u8) -> bool {
        if !self.set.insert(n) {
            return false;
        }
        self.sequence.insert(0, n);
        true
    }

    pub fn set(&self) -> &CalledSet {
        &self.set
    }

    /// Full call history, most recent first.
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn last(&self) -> Option<u8> {
        self.sequence.first().copied()
    }

    /// Up to `n` most recent calls, most recent first.
    pub fn recent(&self, n: usize) -> &[u8] {
        &self.sequence[..n.min(self.sequence.len())]
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn contains(&self, n: u8) -> bool {
        self.set.contains(n)
    }

    pub fn clear(&mut self) {
        self.set.clear();
        self.sequence.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_rejects_duplicates_and_out_of_range() {
        let mut called = CalledNumbers::new();
        assert!(called.record(12));
        assert!(!called.record(12));
        assert!(!called.record(0));
        assert!(!called.record(76));
        assert_eq!(called.len(), 1);
        assert_eq!(called.set().len(), 1);
    }

    #[test]
    fn sequence_is_most_recent_first() {
        let mut called = CalledNumbers::new();
        for n in [5, 40, 73, 18] {
            called.record(n);
        }
        assert_eq!(called.sequence(), &[18, 73, 40, 5]);
        assert_eq!(called.recent(2), &[18, 73]);
        assert_eq!(called.recent(10).len(), 4);
        assert_eq!(called.last(), Some(18));
    }

    #[test]
    fn remaining_excludes_called() {
        let set: CalledSet = [1, 75, 30].into_iter().collect();
        let rest = set.remaining();
        assert_eq!(rest.len(), 72);
        assert!(!rest.contains(&1));
        assert!(!rest.contains(&75));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 30, 75]);
    }
}
