mod annotator;
mod fimo;
mod peak;
mod sequences;
mod writers;

pub use annotator::{annotate, summarize_peak, AnnotatedPeak, MotifSummary};
pub use fimo::{MotifHit, MotifIndex, FIMO_REQUIRED_COLUMNS};
pub use peak::{read_peaks, Peak, DEFAULT_PEAK_COLUMNS, PEAK_KEY_COLUMNS};
pub use sequences::read_sequence_lengths;
pub use writers::{derived_column_names, format_float, AnnotationWriter};
