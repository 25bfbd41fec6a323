use crate::utils::Result;
use std::io::{BufRead, Write};

const PEAK_ID_PREFIX: &str = "peak";
const MIN_FIELDS: usize = 3;

#[derive(Debug, Default, PartialEq)]
pub struct ExpandStats {
    pub lines_processed: usize,
    pub lines_written: usize,
}

/// Expands `chrom start end` into the 7-column layout
/// `chrom start end peak<N> 0 0 +`, where N is the 1-based input line number.
pub fn expand_line(line: &str, line_number: usize) -> Result<String> {
    let parts: Vec<&str> = line.trim().split('\t').collect();
    if parts.len() < MIN_FIELDS {
        return Err(format!(
            "expected at least {} columns, found {}",
            MIN_FIELDS,
            parts.len()
        ));
    }
    let peak_id = format!("{}{}", PEAK_ID_PREFIX, line_number);
    Ok([parts[0], parts[1], parts[2], peak_id.as_str(), "0", "0", "+"].join("\t"))
}

pub fn expand_bed<R: BufRead, W: Write>(reader: R, writer: &mut W) -> Result<ExpandStats> {
    let mut stats = ExpandStats::default();
    for (i, result_line) in reader.lines().enumerate() {
        let line_number = i + 1;
        let line = result_line.map_err(|e| format!("Error at line {}: {}", line_number, e))?;
        stats.lines_processed += 1;
        match expand_line(&line, line_number) {
            Ok(expanded) => {
                writeln!(writer, "{}", expanded)
                    .map_err(|e| format!("Error writing line {}: {}", line_number, e))?;
                stats.lines_written += 1;
            }
            Err(e) => log::warn!(
                "Line {} is malformed ({}). Skipping: {}",
                line_number,
                e,
                line.trim()
            ),
        }
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_expand_line() {
        assert_eq!(
            expand_line("chr1\t100\t200\n", 3).unwrap(),
            "chr1\t100\t200\tpeak3\t0\t0\t+"
        );
        assert_eq!(
            expand_line("chr1\t100\t200\textra", 1).unwrap(),
            "chr1\t100\t200\tpeak1\t0\t0\t+"
        );
    }

    #[test]
    fn test_expand_line_too_short_err() {
        assert_eq!(
            expand_line("chr1\t100", 1),
            Err("expected at least 3 columns, found 2".to_string())
        );
        assert!(expand_line("", 1).is_err());
    }

    #[test]
    fn test_expand_bed_numbers_by_input_line() {
        let data = "chr1\t1\t2\nbad line\n\nchr2\t3\t4\n";
        let mut out = Vec::new();
        let stats = expand_bed(Cursor::new(data), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "chr1\t1\t2\tpeak1\t0\t0\t+\nchr2\t3\t4\tpeak4\t0\t0\t+\n"
        );
        assert_eq!(
            stats,
            ExpandStats {
                lines_processed: 4,
                lines_written: 2,
            }
        );
    }
}
