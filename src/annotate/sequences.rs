use crate::utils::Result;
use bio::io::fasta;
use std::collections::HashMap;
use std::io::BufRead;

/// Lengths of the FASTA records, keyed by the first word of each header.
pub fn read_sequence_lengths<B: BufRead>(
    reader: fasta::Reader<B>,
) -> Result<HashMap<String, usize>> {
    let mut lengths = HashMap::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|e| format!("Error at FASTA record {}: {}", i + 1, e))?;
        lengths.insert(record.id().to_string(), record.seq().len());
    }
    Ok(lengths)
}
