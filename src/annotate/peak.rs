use crate::utils::{GenomicInterval, Result};
use std::io::BufRead;

/// Sample columns of the merged peak catalog produced upstream in the pipeline.
pub const DEFAULT_PEAK_COLUMNS: [&str; 7] =
    ["BJ", "H9_ESC", "iPSC", "LIS49_hESC", "MCF7", "U87", "HN_SCC"];

pub const PEAK_KEY_COLUMNS: [&str; 3] = ["chrom", "start", "end"];

#[derive(Debug, Clone, PartialEq)]
pub struct Peak {
    pub region: GenomicInterval,
    /// Caller-supplied columns after `end`, passed through untouched.
    pub fields: Vec<String>,
}

impl Peak {
    pub fn from_line(line: &str, num_fields: usize) -> Result<Self> {
        let split_line: Vec<&str> = line.split('\t').collect();
        if split_line.len() < PEAK_KEY_COLUMNS.len() {
            return Err(format!(
                "Expected at least {} tab-separated fields in the format 'chrom start end ...', found {}: {}",
                PEAK_KEY_COLUMNS.len(),
                split_line.len(),
                line
            ));
        }

        let extra = &split_line[PEAK_KEY_COLUMNS.len()..];
        if extra.len() > num_fields {
            return Err(format!(
                "Expected at most {} annotation fields after 'chrom start end', found {}: {}",
                num_fields,
                extra.len(),
                line
            ));
        }

        let parse_coord = |name: &str, value: &str| {
            value
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("Invalid {} coordinate '{}'", name, value))
        };
        let start = parse_coord("start", split_line[1])?;
        let end = parse_coord("end", split_line[2])?;

        let mut fields: Vec<String> = extra.iter().map(|s| s.to_string()).collect();
        fields.resize(num_fields, String::new());

        Ok(Peak {
            region: GenomicInterval::new(split_line[0], start, end),
            fields,
        })
    }
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("track")
        || trimmed.starts_with("browser")
}

/// Reads every peak of a BED file. Any malformed row aborts the load.
pub fn read_peaks<R: BufRead>(reader: R, column_names: &[String]) -> Result<Vec<Peak>> {
    let mut peaks = Vec::new();
    for (line_number, result_line) in reader.lines().enumerate() {
        let line =
            result_line.map_err(|e| format!("Error at BED line {}: {}", line_number + 1, e))?;
        if is_skippable(&line) {
            continue;
        }
        let peak = Peak::from_line(&line, column_names.len())
            .map_err(|e| format!("Error at BED line {}: {}", line_number + 1, e))?;
        peaks.push(peak);
    }
    Ok(peaks)
}
