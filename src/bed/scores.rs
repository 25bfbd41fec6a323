use crate::utils::Result;
use std::io::{BufRead, Write};

const SCORE_COLUMN: usize = 4;

#[derive(Debug, Default, PartialEq)]
pub struct ConvertStats {
    pub lines_read: usize,
    pub lines_written: usize,
    pub scores_converted: usize,
}

/// Truncates a floating-point score toward zero, e.g. `12.9` -> `12`.
/// Unparseable and non-finite values give `None`.
pub fn truncate_score(value: &str) -> Option<String> {
    let score = value.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    let truncated = score.trunc();
    if truncated == 0.0 {
        Some("0".to_string())
    } else {
        Some(format!("{:.0}", truncated))
    }
}

/// Returns the rewritten line and whether its score was converted, or `None`
/// for blank and comment lines, which are dropped.
pub fn convert_line(line: &str) -> Option<(String, bool)> {
    if line.trim().is_empty() || line.starts_with('#') {
        return None;
    }
    let mut fields: Vec<String> = line.trim().split('\t').map(|s| s.to_string()).collect();
    let mut converted = false;
    if let Some(score) = fields.get_mut(SCORE_COLUMN) {
        if let Some(truncated) = truncate_score(score) {
            *score = truncated;
            converted = true;
        }
    }
    Some((fields.join("\t"), converted))
}

pub fn convert_scores<R: BufRead, W: Write>(reader: R, writer: &mut W) -> Result<ConvertStats> {
    let mut stats = ConvertStats::default();
    for (line_number, result_line) in reader.lines().enumerate() {
        let line = result_line.map_err(|e| format!("Error at line {}: {}", line_number + 1, e))?;
        stats.lines_read += 1;
        let Some((converted_line, converted)) = convert_line(&line) else {
            continue;
        };
        if converted {
            stats.scores_converted += 1;
        } else if converted_line.split('\t').count() > SCORE_COLUMN {
            log::debug!("Line {}: score left unchanged", line_number + 1);
        }
        writeln!(writer, "{}", converted_line)
            .map_err(|e| format!("Error writing line {}: {}", line_number + 1, e))?;
        stats.lines_written += 1;
    }
    Ok(stats)
}
