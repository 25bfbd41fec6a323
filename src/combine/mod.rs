mod join;

pub use join::{combine_tables, ColumnRename, CombineOptions, DEFAULT_HISTONE_MARKS};
