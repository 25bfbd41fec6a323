use crate::utils::Result;
use csv::{ReaderBuilder, StringRecord};
use itertools::Itertools;
use std::collections::HashMap;
use std::io::Read;

pub const FIMO_REQUIRED_COLUMNS: [&str; 5] = ["sequence_name", "start", "stop", "strand", "score"];

/// A motif hit in 0-based half-open coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MotifHit {
    pub start: i64,
    pub stop: i64,
    pub strand: String,
    pub score: f64,
}

impl MotifHit {
    /// Converts FIMO's 1-based inclusive `[start, stop]` into `[start - 1, stop)`.
    pub fn from_fimo(start: i64, stop: i64, strand: impl Into<String>, score: f64) -> Self {
        Self {
            start: start - 1,
            stop,
            strand: strand.into(),
            score,
        }
    }
}

/// Motif hits grouped by chromosome, each group kept in input order.
#[derive(Debug, Default, Clone)]
pub struct MotifIndex {
    motifs_by_chrom: HashMap<String, Vec<MotifHit>>,
    skipped_rows: usize,
}

struct ColumnLayout {
    chrom: usize,
    start: usize,
    stop: usize,
    strand: usize,
    score: usize,
}

impl ColumnLayout {
    fn from_header(header: &StringRecord) -> Result<Self> {
        let find = |name: &str| header.iter().position(|column| column.trim() == name);
        let indices: Vec<Option<usize>> = FIMO_REQUIRED_COLUMNS.iter().map(|&c| find(c)).collect();
        match indices[..] {
            [Some(chrom), Some(start), Some(stop), Some(strand), Some(score)] => Ok(Self {
                chrom,
                start,
                stop,
                strand,
                score,
            }),
            _ => Err(format!(
                "FIMO TSV is missing one or more required columns: {:?}. Available columns: {:?}",
                FIMO_REQUIRED_COLUMNS,
                header.iter().collect_vec()
            )),
        }
    }

    /// Parses one data row, or returns the reason it has to be skipped.
    fn parse_row<'a>(
        &self,
        header: &StringRecord,
        row: &'a StringRecord,
    ) -> Result<(&'a str, MotifHit)> {
        let get = |i: usize| row.get(i).unwrap_or("");
        let (Some(start), Some(stop)) = (
            parse_coordinate(get(self.start)),
            parse_coordinate(get(self.stop)),
        ) else {
            return Err(format!(
                "missing 'start' or 'stop': {}",
                describe_row(header, row)
            ));
        };
        let Some(score) = parse_score(get(self.score)) else {
            return Err(format!("missing 'score': {}", describe_row(header, row)));
        };
        Ok((
            get(self.chrom),
            MotifHit::from_fimo(start, stop, get(self.strand), score),
        ))
    }
}

/// Accepts integral coordinates written either as `12` or `12.0`.
fn parse_coordinate(value: &str) -> Option<i64> {
    let value = value.trim();
    value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.fract() == 0.0 && *v >= i64::MIN as f64 && *v < i64::MAX as f64)
            .map(|v| v as i64)
    })
}

fn parse_score(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

impl MotifIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, chrom: impl Into<String>, hit: MotifHit) {
        self.motifs_by_chrom
            .entry(chrom.into())
            .or_default()
            .push(hit);
    }

    /// Hits on `chrom`; empty for a chromosome without motif data.
    pub fn hits(&self, chrom: &str) -> &[MotifHit] {
        self.motifs_by_chrom
            .get(chrom)
            .map(|hits| hits.as_slice())
            .unwrap_or(&[])
    }

    pub fn num_chroms(&self) -> usize {
        self.motifs_by_chrom.len()
    }

    pub fn num_hits(&self) -> usize {
        self.motifs_by_chrom.values().map(|hits| hits.len()).sum()
    }

    /// Data rows dropped while loading because they could not be parsed.
    pub fn num_skipped(&self) -> usize {
        self.skipped_rows
    }

    pub fn is_empty(&self) -> bool {
        self.motifs_by_chrom.is_empty()
    }

    /// Loads a FIMO TSV. A missing header or required column is an error;
    /// rows with a missing or non-numeric `start`, `stop` or `score` are
    /// reported and skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut tsv_reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .comment(Some(b'#'))
            .quoting(false)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut index = Self::new();
        let header = tsv_reader
            .headers()
            .map_err(|e| format!("Error reading FIMO header: {}", e))?
            .clone();
        if header.iter().all(|column| column.trim().is_empty()) {
            return Ok(index);
        }
        let layout = ColumnLayout::from_header(&header)?;

        let mut row_index = 0;
        for result in tsv_reader.records() {
            let row = result.map_err(|e| format!("Error reading FIMO row: {}", e))?;
            if row.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            row_index += 1;

            match layout.parse_row(&header, &row) {
                Ok((chrom, hit)) => index.insert(chrom, hit),
                Err(reason) => {
                    log::warn!(
                        "Skipping FIMO row {} (line {}) due to {}",
                        row_index,
                        row.position().map_or(0, |pos| pos.line()),
                        reason
                    );
                    index.skipped_rows += 1;
                }
            }
        }

        log::debug!(
            "Parsed {} FIMO rows, skipped {}",
            row_index,
            index.skipped_rows
        );
        Ok(index)
    }
}

fn describe_row(header: &StringRecord, row: &StringRecord) -> String {
    header
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{}={}", column, row.get(i).unwrap_or("")))
        .join(", ")
}
