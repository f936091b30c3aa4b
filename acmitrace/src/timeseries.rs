//! Time-indexed value storage.
//!
//! Every decoded quantity in a recording (property values, poses, events)
//! is stamped with the simulation clock and appended to a [`TimeSeries`].
//! Keys are kept in temporal order and are never removed, so a series is
//! an immutable history that only ever grows at the tail.

use chrono::{DateTime, Utc};

/// A simulation instant: the reference anchor plus the elapsed offset.
pub type SimTime = DateTime<Utc>;

/// An append-only mapping from simulation instants to values.
///
/// Insertion order equals temporal order because the decoder only ever
/// writes at or after the current clock. `set` at an already-present
/// instant overwrites in place instead of appending, which is how
/// repeated partial updates within one record accumulate.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<V> {
    entries: Vec<(SimTime, V)>,
}

impl<V> Default for TimeSeries<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TimeSeries<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert `value` at `time`, overwriting any existing entry at
    /// exactly that instant. Out-of-order inserts are placed so that
    /// keys stay sorted.
    pub fn set(&mut self, time: SimTime, value: V) {
        match self.entries.binary_search_by_key(&time, |(t, _)| *t) {
            Ok(idx) => self.entries[idx].1 = value,
            Err(idx) => self.entries.insert(idx, (time, value)),
        }
    }

    /// Exact lookup at `time`.
    pub fn get(&self, time: SimTime) -> Option<&V> {
        self.entries
            .binary_search_by_key(&time, |(t, _)| *t)
            .ok()
            .map(|idx| &self.entries[idx].1)
    }

    /// The earliest entry, if any.
    pub fn first(&self) -> Option<(SimTime, &V)> {
        self.entries.first().map(|(t, v)| (*t, v))
    }

    /// The most recently recorded entry, if any.
    pub fn last(&self) -> Option<(SimTime, &V)> {
        self.entries.last().map(|(t, v)| (*t, v))
    }

    /// The value whose key minimizes `|key - time|`.
    ///
    /// Returns `None` on an empty series. A tie between two keys is
    /// resolved in favor of the earlier one.
    pub fn nearest(&self, time: SimTime) -> Option<&V> {
        self.nearest_entry(time).map(|(_, v)| v)
    }

    /// Like [`nearest`](Self::nearest) but also yields the winning key.
    pub fn nearest_entry(&self, time: SimTime) -> Option<(SimTime, &V)> {
        let idx = self.entries.partition_point(|(t, _)| *t < time);
        let after = self.entries.get(idx);
        let before = idx.checked_sub(1).and_then(|i| self.entries.get(i));
        let best = match (before, after) {
            (Some(b), Some(a)) => {
                let d_before = time.signed_duration_since(b.0);
                let d_after = a.0.signed_duration_since(time);
                // <= keeps the earlier key on an exact tie
                if d_before <= d_after {
                    b
                } else {
                    a
                }
            }
            (Some(b), None) => b,
            (None, Some(a)) => a,
            (None, None) => return None,
        };
        Some((best.0, &best.1))
    }

    /// Snapshot of the recorded instants, in temporal order.
    pub fn times(&self) -> Vec<SimTime> {
        self.entries.iter().map(|(t, _)| *t).collect()
    }

    /// The recorded values, in temporal order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// `(instant, value)` pairs in temporal order.
    pub fn iter(&self) -> impl Iterator<Item = (SimTime, &V)> {
        self.entries.iter().map(|(t, v)| (*t, v))
    }
}
