use super::Result;
use bio::io::fasta;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read as ioRead};
use std::path::Path;

fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".gzip")
}

/// Opens a plain or gzip-compressed text file, chosen by extension.
pub fn open_text_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    let file = File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(format!("Invalid gzip header: {}", path.to_string_lossy()))
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

pub fn open_fasta_reader(path: &Path) -> Result<fasta::Reader<BufReader<Box<dyn ioRead>>>> {
    let reader = open_text_reader(path)?;
    Ok(fasta::Reader::from_bufread(reader))
}

/// Reads lines while keeping their terminators, so that a caller can copy
/// them through byte-for-byte.
pub(crate) fn read_raw_line<R: BufRead>(reader: &mut R, buf: &mut String) -> Result<usize> {
    buf.clear();
    reader.read_line(buf).map_err(|e| e.to_string())
}
