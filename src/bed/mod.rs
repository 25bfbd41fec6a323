mod expand;
mod filter;
mod scores;

pub use expand::{expand_bed, expand_line, ExpandStats};
pub use filter::{remove_line_range, LineRange, RemoveStats};
pub use scores::{convert_line, convert_scores, truncate_score, ConvertStats};
