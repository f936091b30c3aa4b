//! The reference entity and the shared simulation clock.
//!
//! Id 0 is not a simulated vehicle: it carries the recording's global
//! properties, among them the absolute time anchor and the map's
//! reference coordinates every transform record is recentered onto. The
//! same object supplies "now" to every decode call, so the decoder owns
//! it explicitly and threads a [`DecodeContext`] snapshot into each
//! entity decode instead of sharing mutable state.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use tracing::info;

use crate::catalog::{self, Schema};
use crate::entity::Entity;
use crate::error::DecodeError;
use crate::timeseries::SimTime;

/// Clock and reference-coordinate snapshot taken before a record is
/// decoded. Plain values, so decoding an entity cannot observe the clock
/// mid-mutation.
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext {
    /// The simulation instant every value of this record is stamped with.
    pub now: SimTime,
    /// Reference longitude in degrees, 0 when never recorded.
    pub reference_longitude: f64,
    /// Reference latitude in degrees, 0 when never recorded.
    pub reference_latitude: f64,
}

/// The distinguished id-0 entity plus the simulation clock.
#[derive(Debug, Clone)]
pub struct ReferenceClock {
    entity: Entity,
    /// Offset from the anchor. Replaced, never accumulated, by each
    /// elapsed-time directive.
    elapsed: Duration,
    /// Parsed absolute time anchor, once the recording declares one.
    anchor: Option<SimTime>,
}

impl Default for ReferenceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceClock {
    pub fn new() -> Self {
        Self {
            entity: Entity::new(0, Schema::Global),
            elapsed: Duration::zero(),
            anchor: None,
        }
    }

    /// The current simulation instant: the recorded anchor plus the
    /// elapsed offset, or the fixed fallback epoch plus the offset when
    /// the recording never declared an anchor.
    pub fn now(&self) -> SimTime {
        self.anchor.unwrap_or_else(fallback_epoch) + self.elapsed
    }

    /// Replace the elapsed offset. Directives are absolute: `#5` then
    /// `#3` leaves the offset at 3 seconds, not 8.
    pub fn set_elapsed(&mut self, seconds: f64) {
        self.elapsed = Duration::microseconds((seconds * 1e6).round() as i64);
    }

    /// The current elapsed offset in seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.num_microseconds().unwrap_or(0) as f64 / 1e6
    }

    /// Snapshot for decoding one record.
    pub fn context(&self) -> DecodeContext {
        DecodeContext {
            now: self.now(),
            reference_longitude: self.reference_coordinate("ReferenceLongitude"),
            reference_latitude: self.reference_coordinate("ReferenceLatitude"),
        }
    }

    /// Decode a record of global properties.
    ///
    /// Behaves as [`Entity::decode`], refreshes the absolute anchor when
    /// the record carries one, and emits one diagnostic line per field.
    /// Credential-bearing fields are skipped entirely: neither the name
    /// nor the value reaches the diagnostic sink.
    pub fn decode(&mut self, fields: &[&str]) -> Result<(), DecodeError> {
        let ctx = self.context();
        let mut first_error = self.entity.decode(fields, &ctx).err();

        if let Err(err) = self.refresh_anchor() {
            first_error.get_or_insert(err);
        }

        for field in fields {
            let Some((name, value)) = field.split_once('=') else {
                continue;
            };
            if catalog::is_credential(name) {
                continue;
            }
            info!("reference property {name}: {value}");
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// The reference entity's property store.
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub(crate) fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn reference_coordinate(&self, name: &str) -> f64 {
        self.entity
            .property_series(name)
            .and_then(|series| series.first())
            .and_then(|(_, value)| value.as_float())
            .unwrap_or(0.0)
    }

    fn refresh_anchor(&mut self) -> Result<(), DecodeError> {
        let Some(text) = self.entity.property_text("ReferenceTime") else {
            return Ok(());
        };
        let parsed = parse_anchor(text).ok_or_else(|| DecodeError::InvalidReferenceTime {
            value: text.to_owned(),
        })?;
        self.anchor = Some(parsed);
        Ok(())
    }
}

/// The fixed epoch used when a recording never declares an absolute
/// anchor: 0001-01-01T00:00:00Z, so offsets read as time-of-mission.
pub fn fallback_epoch() -> SimTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Parse the absolute anchor. Producers write RFC 3339 with a `Z`
/// suffix; some omit the offset, so fall back to a naive timestamp read
/// as UTC.
fn parse_anchor(text: &str) -> Option<SimTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
