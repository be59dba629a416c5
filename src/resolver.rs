//! Registration identity assignment.
//!
//! Both input streams (explicit entries and medal results) reference
//! participants by raw id and carry no registration identifier of their own.
//! The [`Resolver`] invents one: each unique (participant, event) pair gets a
//! synthetic sequential id on first sighting, and every later sighting of the
//! same pair resolves to that id. Participants are classified as teams or
//! individual athletes purely by numeric range.

use std::collections::HashMap;

/// Participant ids below this value denote teams.
pub const TEAM_ID_LIMIT: i64 = 1000;
/// Inclusive lower bound of the athlete id range.
pub const ATHLETE_ID_MIN: i64 = 1000;
/// Inclusive upper bound of the athlete id range.
pub const ATHLETE_ID_MAX: i64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Participant {
    Team(i64),
    Athlete(i64),
}

impl Participant {
    /// Classifies a raw participant id by the numeric-range convention.
    /// Negative and non-numeric ids match neither range.
    pub fn classify(raw: &str) -> Option<Participant> {
        let id: i64 = raw.trim().parse().ok()?;
        if (0..TEAM_ID_LIMIT).contains(&id) {
            Some(Participant::Team(id))
        } else if (ATHLETE_ID_MIN..=ATHLETE_ID_MAX).contains(&id) {
            Some(Participant::Athlete(id))
        } else {
            None
        }
    }
}

/// A newly resolved (participant, event) pair.
#[derive(Debug, Clone)]
pub struct Registration {
    pub id: u32,
    pub event: String,
    pub participant: Participant,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    /// The pair was seen before; the id is returned unchanged.
    Existing(u32),
    /// First sighting: a base registration plus one subtype row are due.
    Created(Registration),
    /// Participant or event key missing; the row carries no relation.
    MissingKey,
    /// Participant id matched neither numeric range; no id was consumed.
    Unresolved { participant: String, event: String },
}

impl Outcome {
    pub fn registration_id(&self) -> Option<u32> {
        match self {
            Outcome::Existing(id) => Some(*id),
            Outcome::Created(registration) => Some(registration.id),
            Outcome::MissingKey | Outcome::Unresolved { .. } => None,
        }
    }
}

/// Single-writer map from (participant, event) to internal registration id.
/// One instance per extraction run; ids increase strictly from the base with
/// no gaps, in first-seen order across both input streams.
#[derive(Debug)]
pub struct Resolver {
    next_id: u32,
    assigned: HashMap<(String, String), u32>,
    unresolved: usize,
}

impl Resolver {
    pub fn new(first_id: u32) -> Self {
        Self {
            next_id: first_id,
            assigned: HashMap::new(),
            unresolved: 0,
        }
    }

    pub fn resolve(&mut self, participant: Option<&str>, event: Option<&str>) -> Outcome {
        let (Some(participant), Some(event)) = (participant, event) else {
            return Outcome::MissingKey;
        };
        let key = (participant.to_string(), event.to_string());
        if let Some(&id) = self.assigned.get(&key) {
            return Outcome::Existing(id);
        }
        let Some(classified) = Participant::classify(participant) else {
            self.unresolved += 1;
            return Outcome::Unresolved {
                participant: participant.to_string(),
                event: event.to_string(),
            };
        };
        let id = self.next_id;
        self.next_id += 1;
        self.assigned.insert(key, id);
        Outcome::Created(Registration {
            id,
            event: event.to_string(),
            participant: classified,
        })
    }

    /// Number of distinct registrations assigned so far.
    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }

    /// Number of participant references that matched neither id range.
    pub fn unresolved_count(&self) -> usize {
        self.unresolved
    }
}
