use super::Result;
use flate2::{write::GzEncoder, Compression};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub enum TextWriter {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl TextWriter {
    /// Flushes buffered output; gzip streams also get their trailer written.
    pub fn finish(self) -> Result<()> {
        match self {
            TextWriter::Plain(mut writer) => writer.flush(),
            TextWriter::Gzip(encoder) => encoder.finish().and_then(|mut w| w.flush()),
        }
        .map_err(|e| format!("Failed to finish output: {}", e))
    }
}

impl Write for TextWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            TextWriter::Plain(writer) => writer.write(buf),
            TextWriter::Gzip(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            TextWriter::Plain(writer) => writer.flush(),
            TextWriter::Gzip(encoder) => encoder.flush(),
        }
    }
}

/// Creates the output file; a `.gz` extension selects gzip compression.
pub fn open_text_writer(path: &Path) -> Result<TextWriter> {
    let file = File::create(path)
        .map_err(|e| format!("Failed to create output {}: {}", path.display(), e))?;
    let writer = BufWriter::new(file);
    let is_gzipped = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
    if is_gzipped {
        Ok(TextWriter::Gzip(GzEncoder::new(writer, Compression::default())))
    } else {
        Ok(TextWriter::Plain(writer))
    }
}

/// `dir/peaks.bed` with suffix `_expanded.bed` becomes `dir/peaks_expanded.bed`.
/// Only the last extension is stripped.
pub fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}", stem, suffix))
}

/// Writing to the input path would truncate it before it is read.
pub fn ensure_distinct_output(input: &Path, output: &Path) -> Result<()> {
    let same_file = match (input.canonicalize(), output.canonicalize()) {
        (Ok(input), Ok(output)) => input == output,
        _ => input == output,
    };
    if same_file {
        return Err(format!(
            "Output path {} must differ from the input path",
            output.display()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::MultiGzDecoder;
    use std::io::Read;

    #[test]
    fn test_derive_output_path() {
        assert_eq!(
            derive_output_path(Path::new("data/Group1.bed"), "_expanded.bed"),
            PathBuf::from("data/Group1_expanded.bed")
        );
        assert_eq!(
            derive_output_path(Path::new("peaks.sorted.bed"), "_filtered.bed"),
            PathBuf::from("peaks.sorted_filtered.bed")
        );
        assert_eq!(
            derive_output_path(Path::new("peaks"), "_filtered.bed"),
            PathBuf::from("peaks_filtered.bed")
        );
    }

    #[test]
    fn test_ensure_distinct_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("peaks.bed");
        std::fs::write(&input, "chr1\t1\t2\n").unwrap();
        let same = dir.path().join(".").join("peaks.bed");
        assert!(ensure_distinct_output(&input, &same).is_err());
        assert!(ensure_distinct_output(&input, &input).is_err());
        assert!(ensure_distinct_output(&input, &dir.path().join("out.bed")).is_ok());
        assert!(ensure_distinct_output(Path::new("a.bed"), Path::new("a.bed")).is_err());
    }

    #[test]
    fn test_gzip_writer_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv.gz");
        let mut writer = open_text_writer(&path).unwrap();
        writeln!(writer, "a,b").unwrap();
        writer.finish().unwrap();

        let mut decoded = String::new();
        MultiGzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, "a,b\n");
    }

    #[test]
    fn test_plain_writer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bed");
        let mut writer = open_text_writer(&path).unwrap();
        write!(writer, "chr1\t1\t2\n").unwrap();
        writer.finish().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "chr1\t1\t2\n");
    }
}
