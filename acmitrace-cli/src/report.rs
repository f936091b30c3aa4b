//! Human-readable summary of a decoded recording.

use acmitrace::{Decoder, Entity, EventKind};

/// Global properties worth surfacing in the header block.
const HEADER_PROPERTIES: [&str; 5] = [
    "Title",
    "Author",
    "ReferenceTime",
    "ReferenceLongitude",
    "ReferenceLatitude",
];

/// Print the recording header and the object inventory to stdout.
pub fn print_summary(decoder: &Decoder) {
    let reference = decoder.clock().entity();
    println!("Recording");
    for name in HEADER_PROPERTIES {
        if let Some(series) = reference.property_series(name) {
            if let Some((_, value)) = series.first() {
                println!("  {name}: {value}");
            }
        }
    }

    println!();
    println!("Objects ({})", decoder.registry().len());
    for object in decoder.objects() {
        print_object(decoder, object);
    }
}

fn print_object(decoder: &Decoder, object: &Entity) {
    let kind = object.property_text("Type").unwrap_or("?");
    let label = object
        .property_text("Pilot")
        .or_else(|| object.property_text("Name"))
        .unwrap_or("-");

    let mut line = format!("  {:>8x}  {kind:<28} {label:<20}", object.id());

    if let Some(t) = object.created_at() {
        line.push_str(&format!(" created {t}"));
    }
    if let Some((t, _)) = object.events_by_kind(EventKind::Removed).first() {
        line.push_str(&format!(", removed {t}"));
    }
    if let Some(parent) = object.parent() {
        let launcher = decoder
            .object(parent)
            .and_then(|p| p.property_text("Pilot"))
            .unwrap_or("?");
        line.push_str(&format!(", launched by {parent:x} ({launcher})"));
    }

    println!("{line}");
}
