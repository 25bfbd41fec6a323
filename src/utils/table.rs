use super::Result;
use csv::{ReaderBuilder, WriterBuilder};
use itertools::Itertools;
use std::io::{Read, Write};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// An in-memory delimited table with a header row. Cells are kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// Parses a comma-separated table. Blank lines are skipped, quoted cells may
    /// span lines, and short rows are padded with empty cells.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let header = csv_reader
            .headers()
            .map_err(|e| format!("Error reading CSV header: {}", e))?
            .iter()
            .enumerate()
            .map(|(i, name)| match i {
                0 => name.trim_start_matches(BYTE_ORDER_MARK).to_string(),
                _ => name.to_string(),
            })
            .collect_vec();
        if header.is_empty() {
            return Err("CSV is empty, expected a header line".to_string());
        }

        let mut table = Self::new(header);
        for result in csv_reader.records() {
            let record = result.map_err(|e| format!("Error reading CSV: {}", e))?;
            let line_number = record.position().map_or(0, |pos| pos.line());
            if record.len() > table.header.len() {
                return Err(format!(
                    "Expected {} fields at line {}, found {}",
                    table.header.len(),
                    line_number,
                    record.len()
                ));
            }
            let mut row = record.iter().map(|cell| cell.to_string()).collect_vec();
            row.resize(table.header.len(), String::new());
            table.rows.push(row);
        }
        Ok(table)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|column| column == name)
    }

    pub fn require_columns(&self, names: &[&str]) -> Result<Vec<usize>> {
        let missing = names
            .iter()
            .filter(|name| self.column_index(name).is_none())
            .collect_vec();
        if !missing.is_empty() {
            return Err(format!(
                "Missing required column(s) {:?}, available columns: {:?}",
                missing, self.header
            ));
        }
        Ok(names
            .iter()
            .filter_map(|name| self.column_index(name))
            .collect())
    }

    pub fn write_csv<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut csv_writer = WriterBuilder::new().from_writer(writer);
        csv_writer
            .write_record(&self.header)
            .map_err(|e| format!("Error writing CSV header: {}", e))?;
        for row in &self.rows {
            csv_writer
                .write_record(row)
                .map_err(|e| format!("Error writing CSV: {}", e))?;
        }
        csv_writer
            .flush()
            .map_err(|e| format!("Error writing CSV: {}", e))
    }
}
