//! The simulated-object model.
//!
//! An [`Entity`] owns a fixed set of property time series (selected once
//! at construction from one of the two catalog schemas), a position
//! track, and an event timeline. Identity is the 64-bit id parsed from
//! the recording's hexadecimal token; the launcher relationship is kept
//! as the parent's id rather than a reference, resolved on demand
//! through the registry.

use std::collections::HashMap;

use tracing::trace;

use crate::catalog::{self, Schema};
use crate::clock::DecodeContext;
use crate::error::DecodeError;
use crate::event::{Event, EventKind, EventLog};
use crate::pose::PositionTrack;
use crate::timeseries::{SimTime, TimeSeries};
use crate::value::PropertyValue;

/// One identified object in the recording.
#[derive(Debug, Clone)]
pub struct Entity {
    id: u64,
    schema: Schema,
    properties: HashMap<&'static str, TimeSeries<PropertyValue>>,
    position: PositionTrack,
    events: EventLog,
    parent: Option<u64>,
}

impl Entity {
    /// Create an entity with every property series of `schema` empty.
    pub fn new(id: u64, schema: Schema) -> Self {
        let properties = schema
            .names()
            .map(|name| (name, TimeSeries::new()))
            .collect();
        Self {
            id,
            schema,
            properties,
            position: PositionTrack::new(),
            events: EventLog::new(),
            parent: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// The launching platform's id, for weapon entities.
    pub fn parent(&self) -> Option<u64> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: u64) {
        self.parent = Some(parent);
    }

    /// Decode one record's `name=value` fields at the clock's instant.
    ///
    /// `T` fields go to the position track; recognized property names
    /// with non-empty values are coerced per the catalog and appended to
    /// their series. Names outside this entity's schema are ignored on
    /// purpose: producers emit fields this catalog does not document,
    /// and skipping them keeps old decoders forward compatible. A value
    /// that fails coercion is fatal for that field only; the rest of the
    /// record still applies and the first failure is returned at the end.
    pub fn decode(&mut self, fields: &[&str], ctx: &DecodeContext) -> Result<(), DecodeError> {
        let mut first_error = None;
        for field in fields {
            let Some((name, value)) = field.split_once('=') else {
                trace!(field, "skipping field without a value");
                continue;
            };
            if name == catalog::TRANSFORM_FIELD {
                if let Err(err) = self.position.decode(value, ctx) {
                    first_error.get_or_insert(err);
                }
                continue;
            }
            match self.schema.kind_of(name) {
                Some(kind) => {
                    if value.is_empty() {
                        continue;
                    }
                    match kind.coerce(value) {
                        Some(typed) => {
                            if let Some(series) = self.properties.get_mut(name) {
                                series.set(ctx.now, typed);
                            }
                        }
                        None => {
                            first_error.get_or_insert(DecodeError::InvalidPropertyValue {
                                name: name.to_owned(),
                                value: value.to_owned(),
                                kind,
                            });
                        }
                    }
                }
                None => {
                    // Unknown name: deliberately not an error
                    trace!(id = self.id, name, "ignoring property outside the schema");
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// The full recorded series for `name`, or `None` when the name is
    /// not in this entity's schema.
    pub fn property_series(&self, name: &str) -> Option<&TimeSeries<PropertyValue>> {
        self.properties.get(name)
    }

    /// The value of `name` sampled at `time` by nearest-recorded-instant.
    ///
    /// Returns `None` when nothing was ever recorded. A series with a
    /// single sample is treated as a time-invariant constant.
    pub fn property_at(&self, name: &str, time: SimTime) -> Option<&PropertyValue> {
        self.property_series(name)?.nearest(time)
    }

    /// The value of `name` for properties recorded exactly once.
    ///
    /// Returns `None` for empty series and for series with more than one
    /// sample, where no single value represents the property.
    pub fn property_constant(&self, name: &str) -> Option<&PropertyValue> {
        let series = self.property_series(name)?;
        if series.len() == 1 {
            series.first().map(|(_, v)| v)
        } else {
            None
        }
    }

    /// The earliest recorded value of `name` as text.
    ///
    /// Classification fields like `Type` are written at creation and read
    /// as substring probes; the earliest sample is the deterministic one.
    pub fn property_text(&self, name: &str) -> Option<&str> {
        self.property_series(name)?
            .first()
            .and_then(|(_, v)| v.as_text())
    }

    /// Whether the earliest `Type` sample contains `tag`.
    pub fn type_contains(&self, tag: &str) -> bool {
        self.property_text("Type")
            .is_some_and(|ty| ty.contains(tag))
    }

    pub fn position(&self) -> &PositionTrack {
        &self.position
    }

    /// The full event timeline.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Append to the timeline. Events at the same instant coexist;
    /// nothing is ever overwritten.
    pub fn add_event(&mut self, time: SimTime, event: Event) {
        self.events.push(time, event);
    }

    /// The time-ordered sub-sequence of events matching `kind`.
    pub fn events_by_kind(&self, kind: EventKind) -> EventLog {
        self.events.of_kind(kind)
    }

    /// The instant of the first `Created` event, if one was recorded.
    pub fn created_at(&self) -> Option<SimTime> {
        self.events_by_kind(EventKind::Created)
            .first()
            .map(|(t, _)| t)
    }
}
