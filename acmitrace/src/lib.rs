//! ACMITrace - flight-recording telemetry decoder
//!
//! This library decodes a line-oriented ACMI telemetry recording into an
//! in-memory temporal object model. Consumers can query any entity's
//! property value or position at any historical instant, enumerate
//! lifecycle events, and attribute weapon entities to the platform that
//! launched them.
//!
//! # High-Level API
//!
//! ```no_run
//! use acmitrace::decoder::Decoder;
//! use acmitrace::recording::FileRecording;
//!
//! # fn main() -> Result<(), acmitrace::error::DecodeError> {
//! let recording = FileRecording::open("sortie.txt.acmi")?;
//! let mut decoder = Decoder::new();
//! decoder.decode(&recording)?;
//!
//! for object in decoder.objects() {
//!     println!("{:x}: {:?}", object.id(), object.property_text("Type"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Decoding is strictly sequential: the clock offset and reference
//! coordinates each line reads are whatever earlier lines left behind.
//! Queries against a completed decode are read-only.

pub mod catalog;
pub mod clock;
pub mod decoder;
pub mod entity;
pub mod error;
pub mod event;
pub mod geo;
pub mod logging;
pub mod pose;
pub mod recording;
pub mod registry;
pub mod timeseries;
pub mod value;

pub use clock::{fallback_epoch, DecodeContext, ReferenceClock};
pub use decoder::Decoder;
pub use entity::Entity;
pub use error::{DecodeError, DecodeReport, LineError};
pub use event::{Event, EventKind, EventLog};
pub use pose::{Pose, PositionTrack};
pub use recording::{FileRecording, LineSource, MemoryRecording};
pub use timeseries::{SimTime, TimeSeries};
pub use value::{PropertyValue, ValueKind};

/// Version of the ACMITrace library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
