//! CSV record source.
//!
//! The first non-blank line is a header and is skipped without inspection. Every following
//! non-blank line must carry exactly six comma-separated cells in column order:
//!
//! ```text
//! id,species,pet_size,name,average_male_adult_weight,average_female_adult_weight
//! ```
//!
//! Cells are trimmed. A cell may be wrapped in double quotes to hold commas, with `""` standing
//! for a literal quote. Line numbers in errors are 1-based and count the header.

use std::path::Path;

use thiserror::Error;

use crate::db::models::breeds::Breed;

pub const COLUMNS: [&str; 6] = [
    "id",
    "species",
    "pet_size",
    "name",
    "average_male_adult_weight",
    "average_female_adult_weight",
];

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Import source is empty")]
    Empty,

    #[error("Line {line}: expected {expected} columns, found {found}")]
    ColumnCount { line: usize, expected: usize, found: usize },

    #[error("Line {line}: invalid {column} {value:?}, expected an integer")]
    InvalidNumber {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("Line {line}: unterminated quoted cell")]
    UnterminatedQuote { line: usize },
}

/// Parse breed records from CSV text, in file order
pub fn read_breeds(text: &str) -> Result<Vec<Breed>, SourceError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    if lines.next().is_none() {
        return Err(SourceError::Empty);
    }

    lines.map(|(line, raw)| parse_record(line, raw)).collect()
}

/// Read and parse a CSV file
pub async fn read_breeds_file(path: &Path) -> Result<Vec<Breed>, SourceError> {
    let text = tokio::fs::read_to_string(path).await.map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_breeds(&text)
}

fn parse_record(line: usize, raw: &str) -> Result<Breed, SourceError> {
    let mut cells = split_cells(line, raw)?;
    if cells.len() != COLUMNS.len() {
        return Err(SourceError::ColumnCount {
            line,
            expected: COLUMNS.len(),
            found: cells.len(),
        });
    }

    let number = |index: usize| {
        cells[index].parse::<i32>().map_err(|_| SourceError::InvalidNumber {
            line,
            column: COLUMNS[index],
            value: cells[index].clone(),
        })
    };
    let id = number(0)?;
    let average_male_adult_weight = number(4)?;
    let average_female_adult_weight = number(5)?;

    let name = std::mem::take(&mut cells[3]);
    let pet_size = std::mem::take(&mut cells[2]);
    let species = std::mem::take(&mut cells[1]);

    Ok(Breed {
        id,
        species,
        pet_size,
        name,
        average_male_adult_weight,
        average_female_adult_weight,
    })
}

fn split_cells(line: usize, raw: &str) -> Result<Vec<String>, SourceError> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut quoted = false;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    quoted = false;
                }
            }
            '"' if cell.trim().is_empty() => {
                cell.clear();
                quoted = true;
            }
            ',' if !quoted => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }

    if quoted {
        return Err(SourceError::UnterminatedQuote { line });
    }
    cells.push(cell.trim().to_string());
    Ok(cells)
}
