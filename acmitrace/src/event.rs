//! Entity lifecycle events.

use crate::timeseries::SimTime;

/// The kinds of event an entity's timeline can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The entity's first appearance in the recording.
    Created,
    /// The recording declared the entity removed. The entity itself
    /// stays in the registry; removal only annotates its timeline.
    Removed,
}

/// An immutable timeline entry: a kind plus free-text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub message: String,
}

impl Event {
    pub fn new(kind: EventKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn created() -> Self {
        Self::new(EventKind::Created, "")
    }

    pub fn removed() -> Self {
        Self::new(EventKind::Removed, "")
    }
}

/// A push-only event timeline.
///
/// Unlike a property series, entries at the same instant coexist: an
/// entity created and removed within one clock instant keeps both
/// events. Entries are appended, never mutated or removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventLog {
    entries: Vec<(SimTime, Event)>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an event. The decoder only ever stamps at or after the
    /// current clock, so entries stay in temporal order.
    pub fn push(&mut self, time: SimTime, event: Event) {
        self.entries.push((time, event));
    }

    /// The earliest entry, if any.
    pub fn first(&self) -> Option<(SimTime, &Event)> {
        self.entries.first().map(|(t, e)| (*t, e))
    }

    /// `(instant, event)` pairs in recorded order.
    pub fn iter(&self) -> impl Iterator<Item = (SimTime, &Event)> {
        self.entries.iter().map(|(t, e)| (*t, e))
    }

    /// Snapshot of the recorded instants, in order.
    pub fn times(&self) -> Vec<SimTime> {
        self.entries.iter().map(|(t, _)| *t).collect()
    }

    /// The ordered sub-sequence of entries matching `kind`.
    pub fn of_kind(&self, kind: EventKind) -> EventLog {
        EventLog {
            entries: self
                .entries
                .iter()
                .filter(|(_, event)| event.kind == kind)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};

    fn t(secs: i64) -> SimTime {
        DateTime::UNIX_EPOCH + Duration::seconds(secs)
    }

    #[test]
    fn test_same_instant_entries_coexist() {
        let mut log = EventLog::new();
        log.push(t(0), Event::created());
        log.push(t(0), Event::removed());

        assert_eq!(log.len(), 2, "a push must never overwrite an entry");
        assert_eq!(log.of_kind(EventKind::Created).len(), 1);
        assert_eq!(log.of_kind(EventKind::Removed).len(), 1);
    }

    #[test]
    fn test_of_kind_preserves_order_and_times() {
        let mut log = EventLog::new();
        log.push(t(0), Event::created());
        log.push(t(5), Event::removed());
        log.push(t(9), Event::removed());

        let removed = log.of_kind(EventKind::Removed);
        assert_eq!(removed.times(), vec![t(5), t(9)]);
        assert_eq!(log.first().map(|(t, e)| (t, e.kind)), Some((t(0), EventKind::Created)));
    }
}
