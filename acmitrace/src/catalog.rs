//! Fixed property catalog for the recording format.
//!
//! This is static configuration, not something re-derived at runtime: the
//! two disjoint property schemas (global vs. per-object), the per-name
//! value kinds, the transform field layout table, and the line-grammar
//! markers all live here so that supporting a different producer profile
//! is a data change rather than a code change.

use crate::value::ValueKind;

/// Trailing text after this marker is a comment, stripped before
/// classification.
pub const COMMENT_MARKER: &str = "//";

/// Prefix of an elapsed-time directive (`#<float>` seconds).
pub const ELAPSED_MARKER: char = '#';

/// Substring marking an in-band event record. Recognized but not decoded.
pub const EVENT_MARKER: &str = "Event=";

/// Prefix of an object-removal record (`-<hex-id>`).
pub const REMOVAL_MARKER: char = '-';

/// Separator between the id and the `name=value` fields of a record.
pub const FIELD_SEPARATOR: char = ',';

/// Separator between the numeric tokens of a transform field.
pub const TRANSFORM_SEPARATOR: char = '|';

/// Field name carrying an entity's spatial transform.
pub const TRANSFORM_FIELD: &str = "T";

/// Properties only the reference entity (id 0) may carry.
pub const GLOBAL_SCHEMA: &[(&str, ValueKind)] = &[
    ("ReferenceTime", ValueKind::Text),
    ("RecordingTime", ValueKind::Text),
    ("ReferenceLongitude", ValueKind::Float),
    ("ReferenceLatitude", ValueKind::Float),
    ("DataSource", ValueKind::Text),
    ("DataRecorder", ValueKind::Text),
    ("Author", ValueKind::Text),
    ("Title", ValueKind::Text),
    ("Category", ValueKind::Text),
    ("Briefing", ValueKind::Text),
    ("Debriefing", ValueKind::Text),
    ("Comments", ValueKind::Text),
    ("AuthenticationKey", ValueKind::Text),
];

/// Properties any non-reference entity may carry.
pub const OBJECT_SCHEMA: &[(&str, ValueKind)] = &[
    ("Type", ValueKind::Text),
    ("Name", ValueKind::Text),
    ("Pilot", ValueKind::Text),
    ("Group", ValueKind::Text),
    ("Country", ValueKind::Text),
    ("Coalition", ValueKind::Text),
    ("Color", ValueKind::Text),
    ("Registration", ValueKind::Text),
    ("Squawk", ValueKind::Text),
    ("Label", ValueKind::Text),
    ("Importance", ValueKind::Float),
    ("Slot", ValueKind::Integer),
    ("Length", ValueKind::Float),
    ("Width", ValueKind::Float),
    ("Height", ValueKind::Float),
    ("Disabled", ValueKind::Integer),
    ("Visible", ValueKind::Float),
];

/// Property names whose values are credentials and must never reach the
/// diagnostic sink.
const CREDENTIAL_PROPERTIES: &[&str] = &["AuthenticationKey"];

/// Whether `name` denotes a credential-bearing field.
pub fn is_credential(name: &str) -> bool {
    CREDENTIAL_PROPERTIES.contains(&name)
}

/// Which of the two fixed schemas an entity uses. Selected once at
/// construction and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// The reference entity's schema (id 0 only).
    Global,
    /// Every other entity's schema.
    Object,
}

impl Schema {
    /// Property names in this schema, in catalog order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        self.table().iter().map(|(name, _)| *name)
    }

    /// The value kind of `name`, or `None` when the name is not a member
    /// of this schema.
    pub fn kind_of(self, name: &str) -> Option<ValueKind> {
        self.table()
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, kind)| *kind)
    }

    fn table(self) -> &'static [(&'static str, ValueKind)] {
        match self {
            Schema::Global => GLOBAL_SCHEMA,
            Schema::Object => OBJECT_SCHEMA,
        }
    }
}

/// The nine fields of a spatial pose, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseField {
    Longitude,
    Latitude,
    Altitude,
    Roll,
    Pitch,
    Yaw,
    U,
    V,
    Heading,
}

/// Canonical wire order of pose fields in a transform record.
pub const POSE_FIELD_ORDER: [PoseField; 9] = [
    PoseField::Longitude,
    PoseField::Latitude,
    PoseField::Altitude,
    PoseField::Roll,
    PoseField::Pitch,
    PoseField::Yaw,
    PoseField::U,
    PoseField::V,
    PoseField::Heading,
];

/// Map a transform record's token count to the ordered fields those
/// tokens represent. Shorter records cover a prefix of the nine-field
/// pose; counts outside 1..=9 have no layout.
pub fn transform_layout(count: usize) -> Option<&'static [PoseField]> {
    if (1..=POSE_FIELD_ORDER.len()).contains(&count) {
        Some(&POSE_FIELD_ORDER[..count])
    } else {
        None
    }
}
