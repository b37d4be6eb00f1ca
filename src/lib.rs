//! Descriptive statistics over tabular weather observations.
//!
//! A [`Table`] holds one observation per row. Columns are positional:
//! 0 = month, 1 = temperature, 2 = rainfall, 3 = humidity (optional),
//! 4 = day of month (optional). Analysis expects at least the first three
//! columns. The month column is not clamped to 1..=12.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    str::FromStr,
};

use logos::Logos;
use miette::Diagnostic;
use thiserror::Error;
use time::Month;

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\r]+")] // Ignore this regex pattern between tokens
enum Token {
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    #[token(",")]
    Comma,
}

/// Rectangular numeric dataset. Every row has the same number of fields,
/// tracked separately so an empty table still knows its width.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    width: usize,
    rows: Vec<Vec<f64>>,
}

#[derive(Debug, Error, Diagnostic)]
pub enum DataLoadError {
    #[error("could not read `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: `{text}` is not a number")]
    BadField { line: usize, text: String },
    #[error("line {line}: expected {expected} fields, got {got}")]
    RaggedRow {
        line: usize,
        expected: usize,
        got: usize,
    },
    #[error("no data rows after the header")]
    Empty,
}

#[derive(Debug, Error, Diagnostic)]
#[error("the table has no rows")]
pub struct EmptyTableError;

#[derive(Debug, Error, Diagnostic)]
#[error("column {column} is out of bounds for a table of width {width}")]
pub struct ColumnBoundsError {
    pub column: usize,
    pub width: usize,
}

#[derive(Debug, Error, Diagnostic)]
#[error("could not write `{}`", .path.display())]
pub struct ExportIoError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

fn parse_row(line: usize, s: &str) -> Result<Vec<f64>, DataLoadError> {
    let mut fields = Token::lexer(s);
    let mut row = Vec::new();

    loop {
        match fields.next() {
            Some(Ok(Token::Number)) => row.push(fields.slice().parse().unwrap()),
            _ => {
                return Err(DataLoadError::BadField {
                    line,
                    text: fields.slice().to_string(),
                })
            }
        }
        match fields.next() {
            None => break,
            Some(Ok(Token::Comma)) => (),
            _ => {
                return Err(DataLoadError::BadField {
                    line,
                    text: fields.slice().to_string(),
                })
            }
        }
    }

    Ok(row)
}

impl FromStr for Table {
    type Err = DataLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();

        // The first line is a header whose content is never interpreted.
        lines.next().ok_or(DataLoadError::Empty)?;

        let mut rows: Vec<Vec<f64>> = Vec::new();
        for (idx, line) in lines.enumerate() {
            // 1-based, counting the header
            let line_number = idx + 2;
            if line.trim().is_empty() {
                continue;
            }

            let row = parse_row(line_number, line)?;
            if let Some(first) = rows.first() {
                if row.len() != first.len() {
                    return Err(DataLoadError::RaggedRow {
                        line: line_number,
                        expected: first.len(),
                        got: row.len(),
                    });
                }
            }
            rows.push(row);
        }

        let width = rows.first().ok_or(DataLoadError::Empty)?.len();
        Ok(Self { width, rows })
    }
}

/// Per-month arithmetic means, index-aligned with `months`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAverages {
    /// Distinct month values present in the table, ascending.
    pub months: Vec<u32>,
    pub temperature: Vec<f64>,
    pub rainfall: Vec<f64>,
    /// `None` when the table has no humidity column.
    pub humidity: Option<Vec<f64>>,
}

/// Month and value of the row maximizing one column. Ties go to the first
/// occurrence in table order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    pub month: u32,
    pub value: f64,
}

/// Raw per-row series in original row order, duplicate months preserved.
/// The unaggregated counterpart of [`MonthlyAverages`], meant for plotting
/// individual observations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trends {
    pub months: Vec<u32>,
    pub temperature: Vec<f64>,
    pub rainfall: Vec<f64>,
}

impl Table {
    /// Conventional index of the day-of-month column in five-column datasets.
    pub const DAY_COLUMN: usize = 4;

    /// Reads a delimited text file: one header line (discarded), then
    /// comma-separated numeric fields, one observation per line.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }

    /// Builds a table from in-memory rows. Fails if the rows do not all
    /// share one length; the reported `line` is the 1-based row index.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DataLoadError> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|row| row.len() != width) {
            return Err(DataLoadError::RaggedRow {
                line: bad + 1,
                expected: width,
                got: rows[bad].len(),
            });
        }
        Ok(Self { width, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Mean temperature, rainfall and (when the table has a fourth column)
    /// humidity for every distinct month, ascending. Rows are grouped by
    /// their month value truncated to an integer.
    pub fn monthly_averages(&self) -> Result<MonthlyAverages, EmptyTableError> {
        if self.rows.is_empty() {
            return Err(EmptyTableError);
        }

        let with_humidity = self.width > 3;
        let months: BTreeSet<u32> = self.rows.iter().map(|row| row[0] as u32).collect();

        let mut averages = MonthlyAverages {
            months: Vec::with_capacity(months.len()),
            temperature: Vec::with_capacity(months.len()),
            rainfall: Vec::with_capacity(months.len()),
            humidity: with_humidity.then(|| Vec::with_capacity(months.len())),
        };

        for &month in &months {
            let subset: Vec<&Vec<f64>> = self
                .rows
                .iter()
                .filter(|row| row[0] as u32 == month)
                .collect();
            let mean = |column: usize| {
                subset.iter().map(|row| row[column]).sum::<f64>() / subset.len() as f64
            };

            averages.months.push(month);
            averages.temperature.push(mean(1));
            averages.rainfall.push(mean(2));
            if let Some(humidity) = &mut averages.humidity {
                humidity.push(mean(3));
            }
        }

        Ok(averages)
    }

    fn max_in_column(&self, column: usize) -> Result<Extremum, EmptyTableError> {
        let mut best: Option<Extremum> = None;
        for row in &self.rows {
            match best {
                Some(current) if row[column] <= current.value => (),
                _ => {
                    best = Some(Extremum {
                        month: row[0] as u32,
                        value: row[column],
                    })
                }
            }
        }
        best.ok_or(EmptyTableError)
    }

    /// Month of the single highest temperature reading.
    pub fn hottest_month(&self) -> Result<Extremum, EmptyTableError> {
        self.max_in_column(1)
    }

    /// Month of the single highest rainfall reading.
    pub fn rainiest_month(&self) -> Result<Extremum, EmptyTableError> {
        self.max_in_column(2)
    }

    /// One entry per row; an empty table gives empty series.
    pub fn monthly_trends(&self) -> Trends {
        let mut trends = Trends::default();
        for row in &self.rows {
            trends.months.push(row[0] as u32);
            trends.temperature.push(row[1]);
            trends.rainfall.push(row[2]);
        }
        trends
    }

    /// Rainfall series of [`monthly_trends`](Self::monthly_trends).
    pub fn monthly_rainfall(&self) -> Vec<f64> {
        self.monthly_trends().rainfall
    }

    /// Rows whose month column equals `month` exactly, in original relative
    /// order. No match is an empty table, not an error.
    pub fn filter_by_month(&self, month: u32) -> Table {
        Table {
            width: self.width,
            rows: self
                .rows
                .iter()
                .filter(|row| row.first() == Some(&(month as f64)))
                .cloned()
                .collect(),
        }
    }

    /// [`filter_by_month`](Self::filter_by_month), then a stable ascending
    /// sort on `day_column`. Fails when the table is narrower than
    /// `day_column + 1`; see [`Table::DAY_COLUMN`] for the usual index.
    pub fn filter_by_day(
        &self,
        month: u32,
        day_column: usize,
    ) -> Result<Table, ColumnBoundsError> {
        let mut filtered = self.filter_by_month(month);
        if day_column >= self.width {
            return Err(ColumnBoundsError {
                column: day_column,
                width: self.width,
            });
        }
        filtered
            .rows
            .sort_by(|left, right| left[day_column].total_cmp(&right[day_column]));
        Ok(filtered)
    }

    /// CSV rendition of the table. The header is always the four standard
    /// column names, even when the table is narrower or wider; the loader
    /// never interprets it, so the round trip still holds.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("Month,Temperature,Rainfall,Humidity\n");
        for row in &self.rows {
            let fields: Vec<String> = row.iter().map(f64::to_string).collect();
            out.push_str(&fields.join(","));
            out.push('\n');
        }
        out
    }

    /// Writes [`to_csv`](Self::to_csv) to `path`, replacing any existing file.
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<(), ExportIoError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_csv()).map_err(|source| ExportIoError {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Calendar month for a month-column value in 1..=12.
pub fn calendar_month(month: u32) -> Option<Month> {
    u8::try_from(month)
        .ok()
        .and_then(|month| Month::try_from(month).ok())
}
