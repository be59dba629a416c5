//! Workbook extraction: sheet access, cell normalization, typed row collections.
//!
//! All spreadsheet reading flows through this module. Cells are read as text
//! only: numeric cells render exactly (whole floats as integers) and are
//! treated as text surrogates for database integers, never coerced. Blank
//! cells, error cells, and the literal text `null` all normalize to `None`,
//! which is the single missing-value representation downstream.

use std::{
    collections::{BTreeSet, HashMap},
    fs::File,
    io::BufReader,
    path::Path,
};

use anyhow::{Context, Result};
use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use chrono::NaiveTime;
use log::debug;
use serde::Serialize;
use thiserror::Error;

/// Athlete rows plus team membership (mandatory).
pub const ATHLETES_SHEET: &str = "LesSportifsEQ";
/// Event rows (mandatory).
pub const EVENTS_SHEET: &str = "LesEpreuves";
/// Explicit (participant, event) pairs (optional).
pub const ENTRIES_SHEET: &str = "LesInscriptions";
/// Medal results per event (optional).
pub const RESULTS_SHEET: &str = "LesResultats";

pub type Workbook = Xlsx<BufReader<File>>;

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("mandatory sheet '{0}' is missing from the workbook")]
    MissingSheet(String),
    #[error("sheet '{sheet}' has no '{column}' column")]
    MissingColumn { sheet: String, column: String },
}

#[derive(Debug, Clone)]
pub struct AthleteRow {
    pub id: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    pub birth_date: Option<String>,
    pub team: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EventRow {
    pub id: Option<String>,
    pub name: Option<String>,
    pub form: Option<String>,
    pub discipline: Option<String>,
    pub category: Option<String>,
    pub athlete_count: Option<String>,
    pub date: Option<String>,
}

/// One row of the explicit-entries sheet. `participant` holds an athlete or
/// team id, distinguished only by numeric range.
#[derive(Debug, Clone)]
pub struct EntryRow {
    pub participant: Option<String>,
    pub event: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PodiumRow {
    pub event: Option<String>,
    pub gold: Option<String>,
    pub silver: Option<String>,
    pub bronze: Option<String>,
}

#[derive(Debug, Default)]
pub struct WorkbookData {
    pub athletes: Vec<AthleteRow>,
    pub events: Vec<EventRow>,
    pub entries: Vec<EntryRow>,
    pub podiums: Vec<PodiumRow>,
}

impl WorkbookData {
    /// Team id mapped to its country of record. The first athlete row naming
    /// a team fixes the country; later rows never overwrite it.
    pub fn team_countries(&self) -> HashMap<String, Option<String>> {
        let mut teams = HashMap::new();
        for athlete in &self.athletes {
            if let Some(team) = &athlete.team {
                teams
                    .entry(team.clone())
                    .or_insert_with(|| athlete.country.clone());
            }
        }
        teams
    }

    /// Distinct discipline names across events, sorted, nulls dropped.
    pub fn discipline_names(&self) -> BTreeSet<String> {
        self.events
            .iter()
            .filter_map(|event| event.discipline.clone())
            .collect()
    }
}

pub fn open(path: &Path) -> Result<Workbook> {
    open_workbook(path).with_context(|| format!("Opening workbook {path:?}"))
}

/// Reads the four tabs into typed row collections. The athlete and event
/// sheets are mandatory; the entries and results sheets degrade to empty
/// collections when absent.
pub fn load(path: &Path) -> Result<WorkbookData> {
    let mut workbook = open(path)?;

    let athletes = match sheet_range(&mut workbook, ATHLETES_SHEET)? {
        Some(range) => athlete_rows(&range)?,
        None => return Err(WorkbookError::MissingSheet(ATHLETES_SHEET.to_string()).into()),
    };
    let events = match sheet_range(&mut workbook, EVENTS_SHEET)? {
        Some(range) => event_rows(&range)?,
        None => return Err(WorkbookError::MissingSheet(EVENTS_SHEET.to_string()).into()),
    };
    let entries = match sheet_range(&mut workbook, ENTRIES_SHEET)? {
        Some(range) => entry_rows(&range)?,
        None => {
            debug!("optional sheet '{ENTRIES_SHEET}' absent, treating as empty");
            Vec::new()
        }
    };
    let podiums = match sheet_range(&mut workbook, RESULTS_SHEET)? {
        Some(range) => podium_rows(&range)?,
        None => {
            debug!("optional sheet '{RESULTS_SHEET}' absent, treating as empty");
            Vec::new()
        }
    };

    Ok(WorkbookData {
        athletes,
        events,
        entries,
        podiums,
    })
}

#[derive(Debug, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
}

/// Per-sheet row and column counts for the whole workbook, in sheet order.
pub fn sheet_summaries(path: &Path) -> Result<Vec<SheetSummary>> {
    let mut workbook = open(path)?;
    let names = workbook.sheet_names();
    let mut summaries = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook
            .worksheet_range(&name)
            .with_context(|| format!("Reading sheet '{name}'"))?;
        summaries.push(SheetSummary {
            name,
            rows: range.height(),
            columns: range.width(),
        });
    }
    Ok(summaries)
}

fn sheet_range(workbook: &mut Workbook, name: &str) -> Result<Option<Range<Data>>> {
    if !workbook.sheet_names().iter().any(|sheet| sheet == name) {
        return Ok(None);
    }
    let range = workbook
        .worksheet_range(name)
        .with_context(|| format!("Reading sheet '{name}'"))?;
    Ok(Some(range))
}

/// Header row resolved to column indices, plus the data rows. Rows whose
/// cells all normalize to `None` are dropped.
struct Sheet<'a> {
    name: &'static str,
    columns: HashMap<String, usize>,
    rows: Vec<&'a [Data]>,
}

impl<'a> Sheet<'a> {
    fn new(name: &'static str, range: &'a Range<Data>) -> Self {
        let mut rows = range.rows();
        let columns = rows
            .next()
            .map(|header| {
                header
                    .iter()
                    .enumerate()
                    .filter_map(|(idx, cell)| cell_text(cell).map(|label| (label, idx)))
                    .collect()
            })
            .unwrap_or_default();
        let rows = rows
            .filter(|row| row.iter().any(|cell| cell_text(cell).is_some()))
            .collect();
        Sheet {
            name,
            columns,
            rows,
        }
    }

    fn column(&self, header: &str) -> Result<usize, WorkbookError> {
        self.columns
            .get(header)
            .copied()
            .ok_or_else(|| WorkbookError::MissingColumn {
                sheet: self.name.to_string(),
                column: header.to_string(),
            })
    }

    fn cell(row: &[Data], idx: usize) -> Option<String> {
        row.get(idx).and_then(cell_text)
    }
}

fn athlete_rows(range: &Range<Data>) -> Result<Vec<AthleteRow>> {
    let sheet = Sheet::new(ATHLETES_SHEET, range);
    let id = sheet.column("numSp")?;
    let last_name = sheet.column("nomSp")?;
    let first_name = sheet.column("prenomSp")?;
    let country = sheet.column("pays")?;
    let category = sheet.column("categorieSp")?;
    let birth_date = sheet.column("dateNaisSp")?;
    let team = sheet.column("numEq")?;
    Ok(sheet
        .rows
        .iter()
        .map(|row| AthleteRow {
            id: Sheet::cell(row, id),
            last_name: Sheet::cell(row, last_name),
            first_name: Sheet::cell(row, first_name),
            country: Sheet::cell(row, country),
            category: Sheet::cell(row, category),
            birth_date: Sheet::cell(row, birth_date),
            team: Sheet::cell(row, team),
        })
        .collect())
}

fn event_rows(range: &Range<Data>) -> Result<Vec<EventRow>> {
    let sheet = Sheet::new(EVENTS_SHEET, range);
    let id = sheet.column("numEp")?;
    let name = sheet.column("nomEp")?;
    let form = sheet.column("formeEp")?;
    let discipline = sheet.column("nomDi")?;
    let category = sheet.column("categorieEp")?;
    let athlete_count = sheet.column("nbSportifsEp")?;
    let date = sheet.column("dateEp")?;
    Ok(sheet
        .rows
        .iter()
        .map(|row| EventRow {
            id: Sheet::cell(row, id),
            name: Sheet::cell(row, name),
            form: Sheet::cell(row, form),
            discipline: Sheet::cell(row, discipline),
            category: Sheet::cell(row, category),
            athlete_count: Sheet::cell(row, athlete_count),
            date: Sheet::cell(row, date),
        })
        .collect())
}

fn entry_rows(range: &Range<Data>) -> Result<Vec<EntryRow>> {
    let sheet = Sheet::new(ENTRIES_SHEET, range);
    let participant = sheet.column("numIn")?;
    let event = sheet.column("numEp")?;
    Ok(sheet
        .rows
        .iter()
        .map(|row| EntryRow {
            participant: Sheet::cell(row, participant),
            event: Sheet::cell(row, event),
        })
        .collect())
}

fn podium_rows(range: &Range<Data>) -> Result<Vec<PodiumRow>> {
    let sheet = Sheet::new(RESULTS_SHEET, range);
    let event = sheet.column("numEp")?;
    let gold = sheet.column("gold")?;
    let silver = sheet.column("silver")?;
    let bronze = sheet.column("bronze")?;
    Ok(sheet
        .rows
        .iter()
        .map(|row| PodiumRow {
            event: Sheet::cell(row, event),
            gold: Sheet::cell(row, gold),
            silver: Sheet::cell(row, silver),
            bronze: Sheet::cell(row, bronze),
        })
        .collect())
}

fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(dt) if dt.time() == NaiveTime::MIN => dt.date().format("%Y-%m-%d").to_string(),
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => return None,
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
    };
    if text.is_empty() || text.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(text)
    }
}
