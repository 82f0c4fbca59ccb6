//! Incremental per-key statistics.

use crate::fixed::Fixed;

/// Running min/max/sum/count summary for one key.
///
/// `count == 0` is the empty aggregate: it is the identity for
/// [`Aggregate::merge`] and means no value has been recorded yet, so `min`
/// and `max` carry no meaning. Merging is commutative and associative, which
/// makes the final result independent of worker scheduling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aggregate {
    min: Fixed,
    max: Fixed,
    sum: i64,
    count: u64,
}

impl Aggregate {
    /// Records a single value.
    pub fn update(&mut self, value: Fixed) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.sum += i64::from(value.tenths());
        self.count += 1;
    }

    /// Folds another aggregate into this one.
    pub fn merge(&mut self, other: &Aggregate) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    /// Returns true if no value has been recorded.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Smallest recorded value. Meaningless while empty.
    pub fn min(&self) -> Fixed {
        self.min
    }

    /// Largest recorded value. Meaningless while empty.
    pub fn max(&self) -> Fixed {
        self.max
    }

    /// Exact sum of all recorded values, in tenths.
    pub fn sum(&self) -> i64 {
        self.sum
    }

    /// Number of recorded values.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Arithmetic mean rounded half away from zero on the tenths digit.
    ///
    /// Must not be called on an empty aggregate.
    pub fn mean(&self) -> Fixed {
        debug_assert!(self.count > 0, "mean of empty aggregate");
        let scaled = self.sum * 10 / self.count as i64;
        let rounded = if scaled >= 0 {
            (scaled + 5) / 10
        } else {
            (scaled - 5) / 10
        };
        Fixed::from_tenths(rounded as i32)
    }
}
