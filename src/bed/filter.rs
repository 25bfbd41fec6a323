use crate::utils::{read_raw_line, Result};
use std::io::{BufRead, Write};

/// Inclusive range of 1-based line numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineRange {
    pub first: usize,
    pub last: usize,
}

impl LineRange {
    pub fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }

    pub fn contains(&self, line_number: usize) -> bool {
        (self.first..=self.last).contains(&line_number)
    }

    pub fn is_empty(&self) -> bool {
        self.first > self.last
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct RemoveStats {
    pub lines_read: usize,
    pub lines_removed: usize,
    pub lines_kept: usize,
}

/// Copies every line outside `range` unchanged, terminators included.
pub fn remove_line_range<R: BufRead, W: Write>(
    mut reader: R,
    writer: &mut W,
    range: LineRange,
) -> Result<RemoveStats> {
    let mut stats = RemoveStats::default();
    let mut line = String::new();
    loop {
        let bytes = read_raw_line(&mut reader, &mut line)
            .map_err(|e| format!("Error at line {}: {}", stats.lines_read + 1, e))?;
        if bytes == 0 {
            break;
        }
        stats.lines_read += 1;
        if range.contains(stats.lines_read) {
            stats.lines_removed += 1;
        } else {
            writer
                .write_all(line.as_bytes())
                .map_err(|e| format!("Error writing line {}: {}", stats.lines_read, e))?;
            stats.lines_kept += 1;
        }
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(data: &str, range: LineRange) -> (String, RemoveStats) {
        let mut out = Vec::new();
        let stats = remove_line_range(Cursor::new(data), &mut out, range).unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn test_line_range() {
        let range = LineRange::new(2, 3);
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(3));
        assert!(!range.contains(4));
        assert!(LineRange::new(5, 4).is_empty());
    }

    #[test]
    fn test_remove_inclusive_range() {
        let (out, stats) = run("l1\nl2\nl3\nl4\nl5", LineRange::new(2, 3));
        assert_eq!(out, "l1\nl4\nl5");
        assert_eq!(
            stats,
            RemoveStats {
                lines_read: 5,
                lines_removed: 2,
                lines_kept: 3,
            }
        );
    }

    #[test]
    fn test_remove_preserves_line_endings() {
        let (out, _) = run("a\r\nb\r\n\r\nc\n", LineRange::new(2, 2));
        assert_eq!(out, "a\r\n\r\nc\n");
    }

    #[test]
    fn test_remove_range_past_end() {
        let (out, stats) = run("a\nb\n", LineRange::new(10, 20));
        assert_eq!(out, "a\nb\n");
        assert_eq!(stats.lines_removed, 0);
    }

    #[test]
    fn test_reversed_range_removes_nothing() {
        let (out, stats) = run("a\nb\nc\n", LineRange::new(3, 1));
        assert_eq!(out, "a\nb\nc\n");
        assert_eq!(stats.lines_kept, 3);
    }
}
