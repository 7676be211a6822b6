//! Append-only CSV score ledger.
//!
//! One row per save action: `student_id,date,<trait...>,aggregate`. The
//! header is written when the file is created. When a row carries a
//! different trait set than the last header, a new header line is appended
//! first, so new columns are additive and earlier rows stay readable.

use chrono::NaiveDate;
use gamechanger_core::{StudentId, TraitScores};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::{Result, StorageError};

const STUDENT_COLUMN: &str = "student_id";
const DATE_COLUMN: &str = "date";
const AGGREGATE_COLUMN: &str = "aggregate";

/// One saved set of trait scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Student the scores belong to
    pub student_id: StudentId,

    /// Day the scores were saved
    pub date: NaiveDate,

    /// Per-trait scores
    pub scores: TraitScores,

    /// Aggregate score
    pub aggregate: f32,
}

impl ScoreRecord {
    /// Create a record; the aggregate is the sum of trait scores.
    pub fn new(student_id: StudentId, date: NaiveDate, scores: TraitScores) -> Self {
        let aggregate = scores.aggregate();
        Self {
            student_id,
            date,
            scores,
            aggregate,
        }
    }

    fn header(&self) -> String {
        let mut columns = vec![STUDENT_COLUMN.to_string(), DATE_COLUMN.to_string()];
        columns.extend(self.scores.names().map(str::to_string));
        columns.push(AGGREGATE_COLUMN.to_string());
        join_row(&columns)
    }

    fn row(&self) -> String {
        let student = self.student_id.to_string();
        // A bare `student_id` first field would read as a header line
        let first = if student == STUDENT_COLUMN {
            format!("\"{}\"", student)
        } else {
            escape_field(&student)
        };

        let mut fields = vec![self.date.to_string()];
        fields.extend(self.scores.iter().map(|(_, s)| s.to_string()));
        fields.push(self.aggregate.to_string());
        format!("{},{}", first, join_row(&fields))
    }
}

/// CSV ledger file.
#[derive(Debug, Clone)]
pub struct ScoreLedger {
    path: PathBuf,
}

impl ScoreLedger {
    /// Create a ledger backed by `path`. The file is created on first append.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record, writing a header line first when needed.
    pub async fn append(&self, record: &ScoreRecord) -> Result<()> {
        let header = record.header();
        let last_header = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents
                .lines()
                .filter(|line| is_header(line))
                .last()
                .map(str::to_string),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        let mut out = String::new();
        match last_header {
            None => {
                out.push_str(&header);
                out.push('\n');
            }
            Some(current) if current != header => {
                warn!(
                    "Ledger columns changed for {}: appending new header {}",
                    record.student_id, header
                );
                out.push_str(&header);
                out.push('\n');
            }
            Some(_) => {}
        }
        out.push_str(&record.row());
        out.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(out.as_bytes()).await?;
        file.flush().await?;

        debug!("Appended ledger row for {}", record.student_id);
        Ok(())
    }

    /// Read every record. A missing file is an empty ledger.
    pub async fn read_all(&self) -> Result<Vec<ScoreRecord>> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        let mut columns: Option<Vec<String>> = None;

        for (i, line) in contents.lines().enumerate() {
            let line_no = i + 1;
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_row(line).map_err(|reason| StorageError::Ledger {
                line: line_no,
                reason,
            })?;

            if is_header(line) {
                columns = Some(fields);
                continue;
            }

            let Some(header) = columns.as_ref() else {
                return Err(StorageError::Ledger {
                    line: line_no,
                    reason: "row before header".to_string(),
                });
            };
            records.push(parse_record(header, &fields).map_err(|reason| StorageError::Ledger {
                line: line_no,
                reason,
            })?);
        }

        Ok(records)
    }
}

/// A header starts with an unquoted `student_id` column and has the
/// `date` and `aggregate` columns in place.
fn is_header(line: &str) -> bool {
    if !line.starts_with(STUDENT_COLUMN) || !line[STUDENT_COLUMN.len()..].starts_with(',') {
        return false;
    }
    match split_row(line) {
        Ok(fields) => {
            fields.len() >= 3
                && fields[1] == DATE_COLUMN
                && fields.last().is_some_and(|f| f == AGGREGATE_COLUMN)
        }
        Err(_) => false,
    }
}

fn parse_record(header: &[String], fields: &[String]) -> std::result::Result<ScoreRecord, String> {
    if header.len() < 3 {
        return Err("header has too few columns".to_string());
    }
    if fields.len() != header.len() {
        return Err(format!("expected {} fields, found {}", header.len(), fields.len()));
    }

    let date = fields[1]
        .parse::<NaiveDate>()
        .map_err(|e| format!("bad date {:?}: {}", fields[1], e))?;

    let last = fields.len() - 1;
    let mut scores = TraitScores::empty();
    for (name, value) in header[2..last].iter().zip(&fields[2..last]) {
        let score = value
            .parse::<f32>()
            .map_err(|e| format!("bad score for {}: {}", name, e))?;
        scores.set(name.clone(), score);
    }
    let aggregate = fields[last]
        .parse::<f32>()
        .map_err(|e| format!("bad aggregate: {}", e))?;

    Ok(ScoreRecord {
        student_id: StudentId::new(fields[0].clone()),
        date,
        scores,
        aggregate,
    })
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn join_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

fn split_row(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            ('"', true) => in_quotes = false,
            ('"', false) if current.is_empty() => in_quotes = true,
            (',', false) => fields.push(std::mem::take(&mut current)),
            (c, _) => current.push(c),
        }
    }
    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(current);
    Ok(fields)
}
