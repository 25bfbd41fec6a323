use crate::annotate::PEAK_KEY_COLUMNS;
use crate::utils::{Result, Table};
use itertools::Itertools;
use std::collections::HashMap;
use std::str::FromStr;

pub const DEFAULT_HISTONE_MARKS: [&str; 10] = [
    "H3K27ac", "H3K27me3", "H3K36me3", "H3K4me1", "H3K4me2", "H3K79me2", "H3K9ac", "H3K9me2",
    "H3K9me3", "H4K20me1",
];

const LEFT_SUFFIX: &str = "_x";
const RIGHT_SUFFIX: &str = "_y";

/// A first-table column that is renamed and moved to the last position.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRename {
    pub from: String,
    pub to: String,
}

impl Default for ColumnRename {
    fn default() -> Self {
        Self {
            from: "H3K4ME3".to_string(),
            to: "H3K4me3".to_string(),
        }
    }
}

impl FromStr for ColumnRename {
    type Err = String;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('=') {
            Some((from, to)) if !from.is_empty() && !to.is_empty() => Ok(Self {
                from: from.to_string(),
                to: to.to_string(),
            }),
            _ => Err(format!("Rename must be in 'FROM=TO' format: '{}'", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CombineOptions {
    pub marks: Vec<String>,
    pub rename: Option<ColumnRename>,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            marks: DEFAULT_HISTONE_MARKS.iter().map(|s| s.to_string()).collect(),
            rename: Some(ColumnRename::default()),
        }
    }
}

type RowKey<'a> = (&'a str, &'a str, &'a str);

fn row_key<'a>(row: &'a [String], key_idx: &[usize]) -> RowKey<'a> {
    (
        row[key_idx[0]].as_str(),
        row[key_idx[1]].as_str(),
        row[key_idx[2]].as_str(),
    )
}

/// Inner-joins `second`'s mark columns onto `first` by `chrom,start,end`.
///
/// Rows follow `first`'s order; a key matching several rows of `second` yields
/// one output row per match. Non-key columns present on both sides are
/// suffixed with `_x` and `_y`.
pub fn combine_tables(first: &Table, second: &Table, options: &CombineOptions) -> Result<Table> {
    let left_keys = first
        .require_columns(&PEAK_KEY_COLUMNS)
        .map_err(|e| format!("First table: {}", e))?;
    let right_keys = second
        .require_columns(&PEAK_KEY_COLUMNS)
        .map_err(|e| format!("Second table: {}", e))?;

    let moved = match &options.rename {
        Some(rename) => match first.column_index(&rename.from) {
            Some(idx) => Some((idx, rename.to.clone())),
            None => {
                log::warn!(
                    "'{}' column not found in first table. It will not be renamed or moved.",
                    rename.from
                );
                None
            }
        },
        None => None,
    };
    let moved_idx = moved.as_ref().map(|(idx, _)| *idx);

    let (present, missing): (Vec<&String>, Vec<&String>) = options
        .marks
        .iter()
        .filter(|mark| !PEAK_KEY_COLUMNS.contains(&mark.as_str()))
        .unique()
        .partition(|mark| second.column_index(mark).is_some());
    if !missing.is_empty() {
        log::warn!(
            "Requested columns not found in second table, they will not be added: {:?}",
            missing
        );
    }
    let mark_idx: Vec<usize> = present
        .iter()
        .filter_map(|mark| second.column_index(mark))
        .collect();

    let left_cols: Vec<usize> = (0..first.header.len())
        .filter(|&i| Some(i) != moved_idx)
        .collect();

    let mut header = Vec::with_capacity(left_cols.len() + mark_idx.len() + 1);
    for &i in &left_cols {
        let name = &first.header[i];
        let clashes = !left_keys.contains(&i) && present.contains(&name);
        header.push(if clashes {
            format!("{}{}", name, LEFT_SUFFIX)
        } else {
            name.clone()
        });
    }
    for &i in &mark_idx {
        let name = &second.header[i];
        let clashes = left_cols
            .iter()
            .any(|&l| !left_keys.contains(&l) && &first.header[l] == name);
        header.push(if clashes {
            format!("{}{}", name, RIGHT_SUFFIX)
        } else {
            name.clone()
        });
    }

    let mut keep_cols: Vec<bool> = vec![true; header.len()];
    if let Some((_, to)) = &moved {
        for (i, name) in header.iter().enumerate() {
            if name == to {
                log::warn!(
                    "Column '{}' already exists and is replaced by the renamed column",
                    name
                );
                keep_cols[i] = false;
            }
        }
        header.push(to.clone());
        keep_cols.push(true);
    }

    let mut right_rows: HashMap<RowKey, Vec<usize>> = HashMap::new();
    for (i, row) in second.rows.iter().enumerate() {
        right_rows.entry(row_key(row, &right_keys)).or_default().push(i);
    }

    let mut combined = Table::new(
        header
            .into_iter()
            .zip(&keep_cols)
            .filter_map(|(name, &keep)| keep.then_some(name))
            .collect(),
    );
    for left_row in &first.rows {
        let Some(matches) = right_rows.get(&row_key(left_row, &left_keys)) else {
            continue;
        };
        for &r in matches {
            let right_row = &second.rows[r];
            let cells = left_cols
                .iter()
                .map(|&i| &left_row[i])
                .chain(mark_idx.iter().map(|&i| &right_row[i]))
                .chain(moved_idx.map(|i| &left_row[i]));
            let row = cells
                .zip(&keep_cols)
                .filter_map(|(cell, &keep)| keep.then(|| cell.clone()))
                .collect();
            combined.rows.push(row);
        }
    }

    log::debug!(
        "Joined {} x {} rows into {} rows",
        first.rows.len(),
        second.rows.len(),
        combined.rows.len()
    );
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn table(data: &str) -> Table {
        Table::from_csv_reader(Cursor::new(data)).unwrap()
    }

    fn options(marks: &[&str]) -> CombineOptions {
        CombineOptions {
            marks: marks.iter().map(|s| s.to_string()).collect(),
            rename: Some(ColumnRename::default()),
        }
    }

    #[test]
    fn test_rename_from_str() {
        assert_eq!(
            "A=B".parse::<ColumnRename>().unwrap(),
            ColumnRename {
                from: "A".to_string(),
                to: "B".to_string()
            }
        );
        assert!("AB".parse::<ColumnRename>().is_err());
        assert!("=B".parse::<ColumnRename>().is_err());
    }

    #[test]
    fn test_combine_moves_renamed_column_last() {
        let first = table("chrom,start,end,H3K4ME3,BJ\nchr1,1,5,1,0\nchr2,3,9,0,1\n");
        let second = table("chrom,start,end,H3K27ac,H3K9ac,Other\nchr2,3,9,1,1,x\nchr1,1,5,0,1,y\n");
        let combined = combine_tables(&first, &second, &options(&["H3K27ac", "H3K9ac"])).unwrap();
        assert_eq!(
            combined.header,
            vec!["chrom", "start", "end", "BJ", "H3K27ac", "H3K9ac", "H3K4me3"]
        );
        assert_eq!(
            combined.rows,
            vec![
                vec!["chr1", "1", "5", "0", "0", "1", "1"],
                vec!["chr2", "3", "9", "1", "1", "1", "0"],
            ]
        );
    }

    #[test]
    fn test_combine_is_inner_join() {
        let first = table("chrom,start,end,H3K4ME3\nchr1,1,5,1\nchr9,1,5,1\n");
        let second = table("chrom,start,end,H3K27ac\nchr1,1,5,1\nchr3,1,5,1\n");
        let combined = combine_tables(&first, &second, &CombineOptions::default()).unwrap();
        assert_eq!(combined.rows.len(), 1);
        assert_eq!(combined.rows[0][0], "chr1");
    }

    #[test]
    fn test_combine_duplicate_keys_multiply() {
        let first = table("chrom,start,end,A\nchr1,1,5,a1\nchr1,1,5,a2\n");
        let second = table("chrom,start,end,H3K27ac\nchr1,1,5,b1\nchr1,1,5,b2\n");
        let combined = combine_tables(&first, &second, &options(&["H3K27ac"])).unwrap();
        let pairs: Vec<(String, String)> = combined
            .rows
            .iter()
            .map(|r| (r[3].clone(), r[4].clone()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("a1".to_string(), "b1".to_string()),
                ("a1".to_string(), "b2".to_string()),
                ("a2".to_string(), "b1".to_string()),
                ("a2".to_string(), "b2".to_string()),
            ]
        );
    }

    #[test]
    fn test_combine_suffixes_clashing_columns() {
        let first = table("chrom,start,end,H3K27ac\nchr1,1,5,left\n");
        let second = table("chrom,start,end,H3K27ac\nchr1,1,5,right\n");
        let combined = combine_tables(&first, &second, &options(&["H3K27ac"])).unwrap();
        assert_eq!(
            combined.header,
            vec!["chrom", "start", "end", "H3K27ac_x", "H3K27ac_y"]
        );
        assert_eq!(combined.rows[0], vec!["chr1", "1", "5", "left", "right"]);
    }

    #[test]
    fn test_combine_missing_marks_and_rename_are_skipped() {
        let first = table("chrom,start,end,BJ\nchr1,1,5,1\n");
        let second = table("chrom,start,end,H3K9me3\nchr1,1,5,7\n");
        let combined =
            combine_tables(&first, &second, &options(&["H3K27ac", "H3K9me3"])).unwrap();
        assert_eq!(combined.header, vec!["chrom", "start", "end", "BJ", "H3K9me3"]);
        assert_eq!(combined.rows[0], vec!["chr1", "1", "5", "1", "7"]);
    }

    #[test]
    fn test_combine_existing_target_is_replaced() {
        let first = table("chrom,start,end,H3K4me3,H3K4ME3\nchr1,1,5,old,new\n");
        let second = table("chrom,start,end\nchr1,1,5\n");
        let combined = combine_tables(&first, &second, &options(&[])).unwrap();
        assert_eq!(combined.header, vec!["chrom", "start", "end", "H3K4me3"]);
        assert_eq!(combined.rows[0], vec!["chr1", "1", "5", "new"]);
    }

    #[test]
    fn test_combine_key_columns_follow_first_table_order() {
        let first = table("BJ,end,chrom,start\n1,5,chr1,1\n");
        let second = table("start,chrom,end,H3K27ac\n1,chr1,5,9\n");
        let combined = combine_tables(&first, &second, &options(&["H3K27ac"])).unwrap();
        assert_eq!(combined.header, vec!["BJ", "end", "chrom", "start", "H3K27ac"]);
        assert_eq!(combined.rows[0], vec!["1", "5", "chr1", "1", "9"]);
    }

    #[test]
    fn test_combine_missing_key_err() {
        let first = table("chrom,start,BJ\nchr1,1,1\n");
        let second = table("chrom,start,end\nchr1,1,5\n");
        let result = combine_tables(&first, &second, &CombineOptions::default());
        assert!(result.unwrap_err().starts_with("First table:"));
    }
}
