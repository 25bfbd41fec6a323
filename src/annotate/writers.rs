use super::{AnnotatedPeak, PEAK_KEY_COLUMNS};
use crate::utils::Result;
use csv::WriterBuilder;
use itertools::Itertools;
use std::io::Write;

/// Names of the five derived columns, in output order.
pub fn derived_column_names(motif_name: &str) -> [String; 5] {
    [
        format!("{} motif", motif_name),
        format!("{} motif score", motif_name),
        format!("Number of {} motifs", motif_name),
        "Strand".to_string(),
        "Total motif score".to_string(),
    ]
}

/// Prints scores the way Python's float `repr` does: integral values keep a
/// trailing `.0`, and magnitudes below `1e-4` or from `1e16` up switch to
/// exponent notation with a signed two-digit exponent.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() || value == 0.0 {
        return format!("{:?}", value);
    }
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    if !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

pub struct AnnotationWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AnnotationWriter<W> {
    pub fn new(writer: W, column_names: &[String], motif_name: &str) -> Result<Self> {
        let mut writer = WriterBuilder::new().from_writer(writer);
        let header = PEAK_KEY_COLUMNS
            .iter()
            .map(|s| s.to_string())
            .chain(column_names.iter().cloned())
            .chain(derived_column_names(motif_name))
            .collect_vec();
        writer
            .write_record(&header)
            .map_err(|e| format!("Error writing header: {}", e))?;
        Ok(Self { writer })
    }

    pub fn write(&mut self, record: &AnnotatedPeak) -> Result<()> {
        let region = &record.peak.region;
        let summary = &record.summary;
        let derived = [
            if summary.found { "1" } else { "0" }.to_string(),
            summary.score.map(format_float).unwrap_or_default(),
            summary.count.to_string(),
            summary.strand.clone().unwrap_or_default(),
            summary.total_score.map(format_float).unwrap_or_default(),
        ];
        let key = [
            region.contig.clone(),
            region.start.to_string(),
            region.end.to_string(),
        ];
        let fields = key
            .iter()
            .chain(record.peak.fields.iter())
            .chain(derived.iter());
        self.writer
            .write_record(fields)
            .map_err(|e| format!("Error writing peak {}: {}", region, e))
    }

    /// Flushes buffered records and hands back the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| format!("Error flushing annotation output: {}", e.error()))
    }
}
