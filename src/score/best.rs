//! Best completion time.

use serde::{Deserialize, Serialize};

/// Lowest completion time on record, in seconds.
///
/// A stored value of 0 reads as "no record yet", never as a real best.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore(Option<u32>);

impl BestScore {
    /// No record.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    /// From a raw stored value.
    #[must_use]
    pub fn from_stored(seconds: Option<u32>) -> Self {
        Self(seconds.filter(|&s| s > 0))
    }

    /// Current best, if any.
    #[must_use]
    pub fn seconds(&self) -> Option<u32> {
        self.0
    }

    /// Offer a completion time. Returns true if it became the new best.
    ///
    /// Only a strictly lower time replaces an existing record.
    pub fn record(&mut self, elapsed_seconds: u32) -> bool {
        let improved = match self.0 {
            None => true,
            Some(best) => elapsed_seconds < best,
        };
        if improved {
            self.0 = Some(elapsed_seconds);
        }
        improved
    }

    /// The better of two records.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Self(Some(a.min(b))),
            (a, b) => Self(a.or(b)),
        }
    }

    /// `"{n}s"`, or `"N/A"` when there is no record.
    #[must_use]
    pub fn label(&self) -> String {
        match self.0 {
            Some(seconds) => format!("{seconds}s"),
            None => "N/A".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_record_always_set() {
        let mut best = BestScore::none();
        assert!(best.record(50));
        assert_eq!(best.seconds(), Some(50));
    }

    #[test]
    fn test_only_strictly_lower_replaces() {
        let mut best = BestScore::from_stored(Some(45));

        assert!(best.record(30));
        assert_eq!(best.seconds(), Some(30));

        assert!(!best.record(50));
        assert!(!best.record(30));
        assert_eq!(best.seconds(), Some(30));
    }

    #[test]
    fn test_stored_zero_is_no_record() {
        let mut best = BestScore::from_stored(Some(0));
        assert_eq!(best.seconds(), None);
        assert_eq!(best.label(), "N/A");

        assert!(best.record(12));
        assert_eq!(best.label(), "12s");
    }

    #[test]
    fn test_merge_keeps_lower() {
        let thirty = BestScore::from_stored(Some(30));
        let forty = BestScore::from_stored(Some(40));

        assert_eq!(thirty.merge(forty).seconds(), Some(30));
        assert_eq!(forty.merge(thirty).seconds(), Some(30));
        assert_eq!(BestScore::none().merge(forty).seconds(), Some(40));
        assert_eq!(forty.merge(BestScore::none()).seconds(), Some(40));
        assert_eq!(BestScore::none().merge(BestScore::none()).seconds(), None);
    }

    #[test]
    fn test_zero_second_win_counts() {
        let mut best = BestScore::none();
        assert!(best.record(0));
        assert_eq!(best.seconds(), Some(0));
        assert!(!best.record(0));
    }
}
