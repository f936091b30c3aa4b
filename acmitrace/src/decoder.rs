//! The line-by-line decoding state machine.
//!
//! The decoder pulls raw lines from a [`LineSource`], classifies each
//! one, and either mutates the shared clock or dispatches the record to
//! an entity. Processing is strictly sequential: the elapsed offset and
//! reference coordinates read by a line are whatever earlier lines left
//! behind, and parent inference for a weapon can only see platforms
//! registered on earlier lines. Read-only queries against a completed
//! decode are free to run concurrently; the decode pass itself is one
//! ordered traversal.

use tracing::{debug, info, trace, warn};

use crate::catalog::{self, Schema};
use crate::clock::ReferenceClock;
use crate::entity::Entity;
use crate::error::{DecodeError, DecodeReport, LineError};
use crate::event::Event;
use crate::geo;
use crate::recording::LineSource;
use crate::registry::Registry;
use crate::value::PropertyValue;

/// Substring of a `Type` value marking a weapon entity.
const WEAPON_TAG: &str = "Weapon";

/// `Type` substrings marking an entity as a launch-platform candidate.
const PLATFORM_TAGS: [&str; 3] = ["Air", "Ground", "Sea"];

/// Decoder for one recording: owns the reference clock and the entity
/// registry, nothing else persists across lines.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    clock: ReferenceClock,
    registry: Registry,
    reference_seen: bool,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a whole recording, aborting on the first failing line.
    pub fn decode(&mut self, source: &dyn LineSource) -> Result<(), DecodeError> {
        for (index, line) in source.lines()?.iter().enumerate() {
            self.decode_line(line)
                .map_err(|err| err.at_line(index + 1))?;
        }
        Ok(())
    }

    /// Decode a whole recording, collecting per-line failures instead of
    /// aborting. Lines that decode cleanly still contribute to the model.
    pub fn decode_lenient(&mut self, source: &dyn LineSource) -> Result<DecodeReport, DecodeError> {
        let mut report = DecodeReport::default();
        for (index, line) in source.lines()?.iter().enumerate() {
            report.lines_read += 1;
            if let Err(error) = self.decode_line(line) {
                warn!("line {}: {error}", index + 1);
                report.errors.push(LineError {
                    line: index + 1,
                    error,
                });
            }
        }
        Ok(report)
    }

    /// Classify and decode a single raw line.
    pub fn decode_line(&mut self, raw: &str) -> Result<(), DecodeError> {
        let line = match raw.find(catalog::COMMENT_MARKER) {
            Some(idx) => &raw[..idx],
            None => raw,
        };
        let line = line.trim();

        if line.is_empty() {
            // Blank and comment-only lines are not an error
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix(catalog::ELAPSED_MARKER) {
            let seconds: f64 = rest
                .trim()
                .parse()
                .map_err(|_| DecodeError::InvalidElapsed {
                    raw: rest.to_owned(),
                })?;
            self.clock.set_elapsed(seconds);
            return Ok(());
        }

        if line.contains(catalog::EVENT_MARKER) {
            // Event payloads are recognized but intentionally not decoded
            trace!("skipping event record");
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix(catalog::REMOVAL_MARKER) {
            return self.decode_removal(rest.trim());
        }

        let fields: Vec<&str> = line.split(catalog::FIELD_SEPARATOR).collect();
        if fields.len() < 2 {
            warn!("ignoring malformed record: {line}");
            return Ok(());
        }

        let id = parse_id(fields[0])?;
        if id == 0 {
            self.decode_reference(&fields[1..])
        } else if self.registry.contains(id) {
            let ctx = self.clock.context();
            self.registry
                .get_mut(id)
                .map(|entity| entity.decode(&fields[1..], &ctx))
                .unwrap_or(Ok(()))
        } else {
            self.decode_new_entity(id, &fields[1..])
        }
    }

    fn decode_removal(&mut self, token: &str) -> Result<(), DecodeError> {
        let id = parse_id(token)?;
        let now = self.clock.now();
        if id == 0 && self.reference_seen {
            self.clock.entity_mut().add_event(now, Event::removed());
        } else if let Some(entity) = self.registry.get_mut(id) {
            entity.add_event(now, Event::removed());
            debug!("object {id:x} removed at {now}");
        } else {
            // Removal of an id we never saw: silently ignored
            debug!("removal of unregistered id {id:x}");
        }
        Ok(())
    }

    fn decode_reference(&mut self, fields: &[&str]) -> Result<(), DecodeError> {
        let result = self.clock.decode(fields);
        if !self.reference_seen {
            self.reference_seen = true;
            info!("created reference object at {}", self.clock.now());
        }
        result
    }

    fn decode_new_entity(&mut self, id: u64, fields: &[&str]) -> Result<(), DecodeError> {
        let ctx = self.clock.context();
        let mut entity = Entity::new(id, Schema::Object);
        let decode_result = entity.decode(fields, &ctx);
        entity.add_event(ctx.now, Event::created());

        let parent_result = if entity.type_contains(WEAPON_TAG) {
            self.find_parent(&entity).map(|parent| {
                debug!("weapon {id:x} attributed to launcher {parent:x}");
                entity.set_parent(parent);
            })
        } else {
            Ok(())
        };

        debug!(
            "created object {id:x} at {}, pilot = {:?}, type = {:?}",
            ctx.now,
            entity.property_text("Pilot"),
            entity.property_text("Type"),
        );
        self.registry.insert(entity);

        decode_result?;
        parent_result
    }

    /// Attribute a weapon to the nearest launch-platform entity.
    ///
    /// Candidates are the already-registered entities whose `Type`
    /// carries an Air/Ground/Sea tag (the reference entity is never in
    /// the registry). Distance is measured great-circle at the weapon's
    /// creation instant; a tie keeps the earliest-registered candidate.
    /// With no eligible candidate the weapon's origin is undefined,
    /// which is a reportable error rather than a silent nil parent.
    pub fn find_parent(&self, weapon: &Entity) -> Result<u64, DecodeError> {
        let time = weapon.created_at().unwrap_or_else(|| self.clock.now());
        let pose = weapon
            .position()
            .at(time)
            .ok_or(DecodeError::UnresolvedParent { id: weapon.id() })?;
        let weapon_pos = (pose.latitude, pose.longitude);

        let mut best: Option<(f64, u64)> = None;
        for candidate in self.registry.iter() {
            if candidate.id() == weapon.id() {
                continue;
            }
            if !PLATFORM_TAGS
                .iter()
                .any(|tag| candidate.type_contains(tag))
            {
                continue;
            }
            let Some(candidate_pose) = candidate.position().at(time) else {
                continue;
            };
            let distance = geo::great_circle_nm(
                weapon_pos,
                (candidate_pose.latitude, candidate_pose.longitude),
            );
            // strict < keeps the earliest-registered candidate on a tie
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, candidate.id()));
            }
        }

        best.map(|(_, id)| id)
            .ok_or(DecodeError::UnresolvedParent { id: weapon.id() })
    }

    /// The shared simulation clock and reference entity.
    pub fn clock(&self) -> &ReferenceClock {
        &self.clock
    }

    /// The entity registry (non-reference entities).
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Look up any entity by id, the reference entity included.
    pub fn object(&self, id: u64) -> Option<&Entity> {
        if id == 0 {
            Some(self.clock.entity())
        } else {
            self.registry.get(id)
        }
    }

    /// Non-reference entities in registration order.
    pub fn objects(&self) -> impl Iterator<Item = &Entity> {
        self.registry.iter()
    }

    /// Every entity whose once-recorded value of `name` equals `value`.
    ///
    /// Only reliable for properties the producer records exactly once;
    /// multi-sample series never match.
    pub fn objects_by_property(&self, name: &str, value: &PropertyValue) -> Vec<&Entity> {
        std::iter::once(self.clock.entity())
            .chain(self.registry.iter())
            .filter(|entity| entity.property_constant(name) == Some(value))
            .collect()
    }
}

/// Parse a hexadecimal id token. Never substitutes a wrong id: any
/// non-hex token is refused.
fn parse_id(token: &str) -> Result<u64, DecodeError> {
    u64::from_str_radix(token.trim(), 16).map_err(|_| DecodeError::InvalidId {
        token: token.trim().to_owned(),
    })
}
