//! Spatial pose decoding.
//!
//! Transform records are sparse and delta-encoded: a record carries up to
//! nine `|`-separated numeric tokens, an empty token means "unchanged",
//! and longitude/latitude are offsets from the recording's reference
//! coordinates. [`PositionTrack::decode`] reconstructs the full pose at
//! each instant by carrying unspecified fields forward from the most
//! recent pose.

use tracing::trace;

use crate::catalog::{self, PoseField};
use crate::clock::DecodeContext;
use crate::error::DecodeError;
use crate::geo;
use crate::timeseries::{SimTime, TimeSeries};

/// A full nine-field spatial pose. All fields default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// Degrees east, after recentering onto the reference longitude.
    pub longitude: f64,
    /// Degrees north, after recentering onto the reference latitude.
    pub latitude: f64,
    /// Meters above sea level.
    pub altitude: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    /// Native-coordinate lateral offset.
    pub u: f64,
    /// Native-coordinate lateral offset.
    pub v: f64,
    pub heading: f64,
}

impl Pose {
    fn set_field(&mut self, field: PoseField, value: f64) {
        match field {
            PoseField::Longitude => self.longitude = value,
            PoseField::Latitude => self.latitude = value,
            PoseField::Altitude => self.altitude = value,
            PoseField::Roll => self.roll = value,
            PoseField::Pitch => self.pitch = value,
            PoseField::Yaw => self.yaw = value,
            PoseField::U => self.u = value,
            PoseField::V => self.v = value,
            PoseField::Heading => self.heading = value,
        }
    }
}

/// An entity's position history: a time series of reconstructed poses.
#[derive(Debug, Clone, Default)]
pub struct PositionTrack {
    series: TimeSeries<Pose>,
}

impl PositionTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one transform field into the track at the clock's instant.
    ///
    /// The base pose is the entry already present at exactly this instant
    /// (so repeated partial updates within one record accumulate), else a
    /// copy of the most recent pose, else all zeros. Longitude and
    /// latitude tokens are offsets added to the reference coordinates;
    /// every other field is stored as parsed.
    ///
    /// A token that fails to parse is fatal for its field but leaves the
    /// other fields of the record intact; the first such failure is
    /// returned after the whole record has been applied.
    pub fn decode(&mut self, raw: &str, ctx: &DecodeContext) -> Result<(), DecodeError> {
        let tokens: Vec<&str> = raw.split(catalog::TRANSFORM_SEPARATOR).collect();
        let layout = catalog::transform_layout(tokens.len())
            .ok_or(DecodeError::UnknownTransformLayout {
                count: tokens.len(),
            })?;

        let mut pose = match self.series.get(ctx.now) {
            Some(existing) => *existing,
            None => self
                .series
                .last()
                .map(|(_, p)| *p)
                .unwrap_or_default(),
        };

        let mut first_error = None;
        for (token, field) in tokens.iter().zip(layout.iter()) {
            if token.is_empty() {
                // Sparse encoding: unchanged, keep the carried-forward value
                continue;
            }
            let parsed: f64 = match token.trim().parse() {
                Ok(v) => v,
                Err(_) => {
                    trace!(token, "transform token failed to parse");
                    first_error.get_or_insert(DecodeError::InvalidTransformToken {
                        token: (*token).to_owned(),
                    });
                    continue;
                }
            };
            let value = match field {
                PoseField::Longitude => parsed + ctx.reference_longitude,
                PoseField::Latitude => parsed + ctx.reference_latitude,
                _ => parsed,
            };
            pose.set_field(*field, value);
        }

        self.series.set(ctx.now, pose);
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// The pose nearest to `time`, or `None` when nothing was recorded.
    pub fn at(&self, time: SimTime) -> Option<Pose> {
        self.series.nearest(time).copied()
    }

    /// The underlying pose series.
    pub fn series(&self) -> &TimeSeries<Pose> {
        &self.series
    }

    /// Great-circle distance in nautical miles from every recorded pose
    /// to a fixed `(latitude, longitude)` pivot.
    pub fn distances_from(&self, pivot: (f64, f64)) -> TimeSeries<f64> {
        let mut distances = TimeSeries::new();
        for (time, pose) in self.series.iter() {
            distances.set(time, geo::great_circle_nm((pose.latitude, pose.longitude), pivot));
        }
        distances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ctx_at(secs: i64, ref_lon: f64, ref_lat: f64) -> DecodeContext {
        DecodeContext {
            now: Utc.timestamp_opt(secs, 0).unwrap(),
            reference_longitude: ref_lon,
            reference_latitude: ref_lat,
        }
    }

    #[test]
    fn test_recentering_onto_reference_coordinates() {
        let mut track = PositionTrack::new();
        let ctx = ctx_at(0, 10.0, 50.0);
        track.decode("0.001|0.001|1000", &ctx).unwrap();

        let pose = track.at(ctx.now).expect("pose recorded");
        assert!((pose.longitude - 10.001).abs() < 1e-9);
        assert!((pose.latitude - 50.001).abs() < 1e-9);
        assert_eq!(pose.altitude, 1000.0, "altitude is stored unrecentered");
    }

    #[test]
    fn test_sparse_record_carries_forward_unspecified_fields() {
        let mut track = PositionTrack::new();
        track.decode("1|2|3|4|5|6|7|8|9", &ctx_at(0, 0.0, 0.0)).unwrap();
        // Later record specifies only altitude
        track.decode("||500", &ctx_at(10, 0.0, 0.0)).unwrap();

        let pose = track.at(Utc.timestamp_opt(10, 0).unwrap()).unwrap();
        assert_eq!(pose.altitude, 500.0);
        assert_eq!(pose.longitude, 1.0, "unspecified field must carry forward");
        assert_eq!(pose.latitude, 2.0);
        assert_eq!(pose.roll, 4.0);
        assert_eq!(pose.heading, 9.0);
    }

    #[test]
    fn test_repeated_updates_at_one_instant_accumulate() {
        let mut track = PositionTrack::new();
        let ctx = ctx_at(0, 0.0, 0.0);
        track.decode("1|2|3", &ctx).unwrap();
        track.decode("||||||||45", &ctx).unwrap();

        assert_eq!(track.series().len(), 1, "same instant must not fork the track");
        let pose = track.at(ctx.now).unwrap();
        assert_eq!(pose.longitude, 1.0);
        assert_eq!(pose.heading, 45.0);
    }

    #[test]
    fn test_first_pose_with_no_history_starts_from_zero() {
        let mut track = PositionTrack::new();
        track.decode("||1000", &ctx_at(0, 10.0, 50.0)).unwrap();
        let pose = track.at(Utc.timestamp_opt(0, 0).unwrap()).unwrap();
        assert_eq!(pose.longitude, 0.0, "unspecified longitude defaults to zero");
        assert_eq!(pose.altitude, 1000.0);
    }

    #[test]
    fn test_unknown_layout_is_an_error() {
        let mut track = PositionTrack::new();
        let err = track
            .decode("1|2|3|4|5|6|7|8|9|10", &ctx_at(0, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnknownTransformLayout { count: 10 }
        ));
        assert!(track.series().is_empty(), "bad layout must not store a pose");
    }

    #[test]
    fn test_bad_token_does_not_corrupt_other_fields() {
        let mut track = PositionTrack::new();
        let err = track.decode("1|junk|3", &ctx_at(0, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidTransformToken { .. }));

        let pose = track.at(Utc.timestamp_opt(0, 0).unwrap()).unwrap();
        assert_eq!(pose.longitude, 1.0);
        assert_eq!(pose.altitude, 3.0, "fields after the bad token still apply");
        assert_eq!(pose.latitude, 0.0, "the bad field keeps its prior value");
    }

    #[test]
    fn test_distances_from_pivot() {
        let mut track = PositionTrack::new();
        track.decode("0|0|0", &ctx_at(0, 0.0, 0.0)).unwrap();
        track.decode("0|1|0", &ctx_at(10, 0.0, 0.0)).unwrap();

        let distances = track.distances_from((0.0, 0.0));
        assert_eq!(distances.len(), 2);
        let values: Vec<f64> = distances.values().copied().collect();
        assert!(values[0].abs() < 1e-9);
        assert!((values[1] - 60.0).abs() < 0.1, "1 degree of latitude is ~60nm");
    }
}
