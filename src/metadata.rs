use crate::error::Result;
use calamine::{Data, Reader};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Result of looking up a column in a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    /// The row has no such column, or the cell was null.
    Absent,
    /// The column exists but the cell is blank.
    Empty,
    Present(&'a CellValue),
}

impl<'a> Field<'a> {
    pub fn value(self) -> Option<&'a CellValue> {
        match self {
            Field::Present(v) => Some(v),
            Field::Absent | Field::Empty => None,
        }
    }
}

/// One metadata row keyed by trimmed column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRow {
    cells: HashMap<String, CellValue>,
}

impl MetadataRow {
    /// Build a row, trimming whitespace around column names.
    pub fn from_cells<K, V, I>(cells: I) -> Self
    where
        K: AsRef<str>,
        V: Into<CellValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            cells: cells
                .into_iter()
                .map(|(k, v)| (k.as_ref().trim().to_string(), v.into()))
                .collect(),
        }
    }

    pub fn field(&self, column: &str) -> Field<'_> {
        match self.cells.get(column) {
            None => Field::Absent,
            Some(CellValue::Text(s)) if s.trim().is_empty() => Field::Empty,
            Some(v) => Field::Present(v),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Ordered metadata rows. Row order decides ties during episode lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataTable {
    rows: Vec<MetadataRow>,
}

impl MetadataTable {
    pub fn new(rows: Vec<MetadataRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[MetadataRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Read a CSV export of the episode sheet. The first record is the header.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
        debug!("Metadata columns: {:?}", headers);

        let mut rows = Vec::new();
        for (line, record) in rdr.records().enumerate() {
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    warn!("Skipping metadata row {}: {}", line + 1, e);
                    continue;
                }
            };
            rows.push(MetadataRow::from_cells(
                headers.iter().zip(record.iter()),
            ));
        }

        Ok(Self::new(rows))
    }

    /// Read a JSON array of row objects, as produced by a sheet-to-JSON export.
    ///
    /// Null cells are treated as absent. Array and object cells are dropped,
    /// the rest of their row is kept. Entries that are not objects are skipped.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: Vec<serde_json::Value> = serde_json::from_reader(reader)?;

        let mut rows = Vec::with_capacity(raw.len());
        for (index, value) in raw.into_iter().enumerate() {
            let serde_json::Value::Object(cells) = value else {
                warn!("Skipping metadata row {}: not an object", index + 1);
                continue;
            };
            rows.push(MetadataRow::from_cells(cells.into_iter().filter_map(
                |(column, value)| json_cell(&column, value).map(|cell| (column, cell)),
            )));
        }

        Ok(Self::new(rows))
    }

    /// Read the first worksheet of an xlsx/xls/ods workbook. Its first row is
    /// the header.
    pub fn from_workbook(path: &Path) -> Result<Self> {
        let mut workbook = calamine::open_workbook_auto(path)?;
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range?,
            None => {
                warn!("{} has no worksheets", path.display());
                return Ok(Self::default());
            }
        };

        Ok(Self::from_grid(
            range.rows().map(|row| row.iter().map(sheet_cell).collect()),
        ))
    }

    /// Build a table from raw sheet rows. Blank header cells name no column and
    /// rows without any cell are dropped.
    pub fn from_grid<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<Option<CellValue>>>,
    {
        let mut rows = rows.into_iter();
        let Some(header) = rows.next() else {
            return Self::default();
        };

        let headers: Vec<Option<String>> = header
            .into_iter()
            .map(|cell| {
                cell.map(|c| c.to_string().trim().to_string())
                    .filter(|h| !h.is_empty())
            })
            .collect();

        let rows = rows
            .map(|cells| {
                MetadataRow::from_cells(
                    headers
                        .iter()
                        .zip(cells)
                        .filter_map(|(header, cell)| Some((header.as_ref()?, cell?))),
                )
            })
            .filter(|row| !row.is_empty())
            .collect();

        Self::new(rows)
    }
}

fn json_cell(column: &str, value: serde_json::Value) -> Option<CellValue> {
    use serde_json::Value;

    match value {
        Value::String(s) => Some(CellValue::Text(s)),
        Value::Number(n) => n.as_f64().map(CellValue::Number),
        Value::Bool(b) => Some(CellValue::Bool(b)),
        Value::Null => None,
        Value::Array(_) | Value::Object(_) => {
            debug!("Ignoring nested value in column {:?}", column);
            None
        }
    }
}

fn sheet_cell(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        other => Some(CellValue::Text(other.to_string())),
    }
}

impl From<Vec<MetadataRow>> for MetadataTable {
    fn from(rows: Vec<MetadataRow>) -> Self {
        Self::new(rows)
    }
}
