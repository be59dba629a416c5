#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use tempfile::{TempDir, tempdir};

/// One cell of a fixture sheet.
#[derive(Clone, Copy)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    /// A date cell carrying a real Excel date format, as produced by
    /// spreadsheet tools (year, month, day).
    Date(u16, u8, u8),
    Blank,
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Builds an xlsx workbook under the workspace from (sheet, rows) pairs
    /// and returns its path.
    pub fn write_workbook(&self, name: &str, sheets: &[(&str, &[&[Cell]])]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let mut workbook = Workbook::new();
        for (sheet_name, rows) in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(*sheet_name).expect("sheet name");
            for (row_idx, row) in rows.iter().enumerate() {
                for (col_idx, cell) in row.iter().enumerate() {
                    let (row_idx, col_idx) = (row_idx as u32, col_idx as u16);
                    match cell {
                        Cell::Text(value) => {
                            worksheet
                                .write_string(row_idx, col_idx, *value)
                                .expect("write string");
                        }
                        Cell::Number(value) => {
                            worksheet
                                .write_number(row_idx, col_idx, *value)
                                .expect("write number");
                        }
                        Cell::Date(year, month, day) => {
                            let date = ExcelDateTime::from_ymd(*year, *month, *day)
                                .expect("fixture date");
                            worksheet
                                .write_datetime_with_format(row_idx, col_idx, &date, &date_format)
                                .expect("write date");
                        }
                        Cell::Blank => {}
                    }
                }
            }
        }
        workbook.save(&path).expect("save workbook");
        path
    }
}

pub const ATHLETE_HEADERS: &[Cell] = &[
    Cell::Text("numSp"),
    Cell::Text("nomSp"),
    Cell::Text("prenomSp"),
    Cell::Text("pays"),
    Cell::Text("categorieSp"),
    Cell::Text("dateNaisSp"),
    Cell::Text("numEq"),
];

pub const EVENT_HEADERS: &[Cell] = &[
    Cell::Text("numEp"),
    Cell::Text("nomEp"),
    Cell::Text("formeEp"),
    Cell::Text("nomDi"),
    Cell::Text("categorieEp"),
    Cell::Text("nbSportifsEp"),
    Cell::Text("dateEp"),
];

pub const ENTRY_HEADERS: &[Cell] = &[Cell::Text("numIn"), Cell::Text("numEp")];

pub const RESULT_HEADERS: &[Cell] = &[
    Cell::Text("numEp"),
    Cell::Text("gold"),
    Cell::Text("silver"),
    Cell::Text("bronze"),
];

/// Writes the canonical four-sheet fixture shared by the pipeline tests:
/// two athletes on team 12 (with conflicting countries), one athlete without
/// a team, an individual and a team event, explicit entries including a
/// duplicate and an out-of-range participant, and one podium per event.
pub fn olympic_workbook(workspace: &TestWorkspace) -> PathBuf {
    workspace.write_workbook(
        "games.xlsx",
        &[
            (
                "LesSportifsEQ",
                &[
                    ATHLETE_HEADERS,
                    &[
                        Cell::Number(1500.0),
                        Cell::Text("Dupont"),
                        Cell::Text("Alice"),
                        Cell::Text("FRA"),
                        Cell::Text("F"),
                        Cell::Text("1995-01-01"),
                        Cell::Number(12.0),
                    ],
                    &[
                        Cell::Number(1501.0),
                        Cell::Text("Martin"),
                        Cell::Text("Bob"),
                        Cell::Text("BEL"),
                        Cell::Text("M"),
                        Cell::Blank,
                        Cell::Number(12.0),
                    ],
                    &[
                        Cell::Number(1502.0),
                        Cell::Text("O'Neill"),
                        Cell::Text("Cara"),
                        Cell::Text("IRL"),
                        Cell::Text("F"),
                        Cell::Text("null"),
                        Cell::Blank,
                    ],
                ],
            ),
            (
                "LesEpreuves",
                &[
                    EVENT_HEADERS,
                    &[
                        Cell::Number(7.0),
                        Cell::Text("100m"),
                        Cell::Text("individuelle"),
                        Cell::Text("Athletisme"),
                        Cell::Text("F"),
                        Cell::Blank,
                        Cell::Text("2024-07-30"),
                    ],
                    &[
                        Cell::Number(8.0),
                        Cell::Text("Relais 4x100m"),
                        Cell::Text("par equipe"),
                        Cell::Text("Athletisme"),
                        Cell::Text("M"),
                        Cell::Number(4.0),
                        Cell::Blank,
                    ],
                ],
            ),
            (
                "LesInscriptions",
                &[
                    ENTRY_HEADERS,
                    &[Cell::Number(1500.0), Cell::Number(7.0)],
                    &[Cell::Number(12.0), Cell::Number(8.0)],
                    &[Cell::Number(1500.0), Cell::Number(7.0)],
                    &[Cell::Number(9999.0), Cell::Number(7.0)],
                ],
            ),
            (
                "LesResultats",
                &[
                    RESULT_HEADERS,
                    &[
                        Cell::Number(7.0),
                        Cell::Number(1500.0),
                        Cell::Number(1502.0),
                        Cell::Blank,
                    ],
                    &[
                        Cell::Number(8.0),
                        Cell::Number(12.0),
                        Cell::Blank,
                        Cell::Blank,
                    ],
                ],
            ),
        ],
    )
}
