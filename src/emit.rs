//! SQL batch construction.
//!
//! Serializes extracted entities into `INSERT OR IGNORE` statements in
//! dependency order (disciplines, teams, athletes and memberships, events,
//! registrations, medal records), wrapped in a single BEGIN/COMMIT pair. The
//! emitter only produces text; applying the batch is the database layer's
//! concern, which keeps the transform testable without a live connection.

use itertools::Itertools;

use crate::{
    resolver::{Outcome, Participant, Registration, Resolver},
    workbook::WorkbookData,
};

const MEDAL_TABLES: [&str; 3] = ["Gold", "Silver", "Bronze"];

/// Single-quotes a value for a SQL literal, doubling embedded quotes.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn sql_text(value: Option<&str>) -> String {
    match value {
        Some(value) => quote(value),
        None => "NULL".to_string(),
    }
}

/// Numeric fields are text surrogates for exact integers and stay unquoted.
fn sql_number(value: Option<&str>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "NULL".to_string(),
    }
}

/// Builds the full statement batch for one extraction run. Statement order is
/// fixed; the resolver is the only mutable state and is driven exclusively by
/// this pass (explicit entries first, then podiums gold before silver before
/// bronze), which makes id assignment reproducible.
pub fn build_batch(data: &WorkbookData, resolver: &mut Resolver, source: &str) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("-- generated from {source}"));
    lines.push("BEGIN TRANSACTION;".to_string());

    for name in data.discipline_names() {
        lines.push(format!(
            "INSERT OR IGNORE INTO Discipline(name) VALUES ({});",
            quote(&name)
        ));
    }

    let teams = data.team_countries();
    for (team, country) in teams
        .iter()
        .sorted_by_key(|(id, _)| id.parse::<i64>().unwrap_or(i64::MAX))
    {
        lines.push(format!(
            "INSERT OR IGNORE INTO Team(team_id, country) VALUES ({team}, {});",
            sql_text(country.as_deref())
        ));
    }

    for athlete in &data.athletes {
        lines.push(format!(
            "INSERT OR IGNORE INTO Athlete(athlete_id, last_name, first_name, country, category, birth_date) VALUES ({}, {}, {}, {}, {}, {});",
            sql_number(athlete.id.as_deref()),
            sql_text(athlete.last_name.as_deref()),
            sql_text(athlete.first_name.as_deref()),
            sql_text(athlete.country.as_deref()),
            sql_text(athlete.category.as_deref()),
            sql_text(athlete.birth_date.as_deref()),
        ));
        if let Some(team) = athlete.team.as_deref() {
            lines.push(format!(
                "INSERT OR IGNORE INTO TeamMembership(athlete_id, team_id) VALUES ({}, {team});",
                sql_number(athlete.id.as_deref())
            ));
        }
    }

    for event in &data.events {
        lines.push(format!(
            "INSERT OR IGNORE INTO Event(event_id, name, form, discipline, category, event_date, athlete_count) VALUES ({}, {}, {}, {}, {}, {}, {});",
            sql_number(event.id.as_deref()),
            sql_text(event.name.as_deref()),
            sql_text(event.form.as_deref()),
            sql_text(event.discipline.as_deref()),
            sql_text(event.category.as_deref()),
            sql_text(event.date.as_deref()),
            sql_number(event.athlete_count.as_deref()),
        ));
    }

    for entry in &data.entries {
        let outcome = resolver.resolve(entry.participant.as_deref(), entry.event.as_deref());
        push_resolution(&mut lines, &outcome);
    }

    for podium in &data.podiums {
        let ranks = [&podium.gold, &podium.silver, &podium.bronze];
        for (table, participant) in MEDAL_TABLES.iter().zip(ranks) {
            let outcome = resolver.resolve(participant.as_deref(), podium.event.as_deref());
            if let Some(id) = push_resolution(&mut lines, &outcome) {
                lines.push(format!(
                    "INSERT OR IGNORE INTO {table}(event_id, registration_id) VALUES ({}, {id});",
                    sql_number(podium.event.as_deref())
                ));
            }
        }
    }

    lines.push("COMMIT;".to_string());
    lines
}

/// Appends the statements a resolution calls for and returns the internal id
/// when the pair resolved. An unresolved participant leaves only a comment so
/// the load stays partial and auditable instead of failing.
fn push_resolution(lines: &mut Vec<String>, outcome: &Outcome) -> Option<u32> {
    match outcome {
        Outcome::Created(registration) => {
            push_registration(lines, registration);
            Some(registration.id)
        }
        Outcome::Existing(id) => Some(*id),
        Outcome::MissingKey => None,
        Outcome::Unresolved { participant, event } => {
            lines.push(format!(
                "-- participant {participant} ignored for event {event}: id matches neither team nor athlete range"
            ));
            None
        }
    }
}

fn push_registration(lines: &mut Vec<String>, registration: &Registration) {
    let id = registration.id;
    let event = &registration.event;
    lines.push(format!(
        "INSERT OR IGNORE INTO Registration(registration_id, event_id) VALUES ({id}, {event});"
    ));
    match registration.participant {
        Participant::Team(team) => lines.push(format!(
            "INSERT OR IGNORE INTO TeamRegistration(registration_id, event_id, team_id) VALUES ({id}, {event}, {team});"
        )),
        Participant::Athlete(athlete) => lines.push(format!(
            "INSERT OR IGNORE INTO IndividualRegistration(registration_id, event_id, athlete_id) VALUES ({id}, {event}, {athlete});"
        )),
    }
}
