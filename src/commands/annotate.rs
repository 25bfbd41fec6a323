use crate::annotate::{
    annotate as annotate_peaks, read_peaks, read_sequence_lengths, AnnotationWriter, MotifIndex,
    Peak,
};
use crate::cli::AnnotateArgs;
use crate::utils::{open_fasta_reader, open_text_reader, open_text_writer, Result};
use rayon::ThreadPoolBuilder;
use std::{path::Path, time};

pub fn annotate(args: AnnotateArgs) -> Result<()> {
    let start_timer = time::Instant::now();

    let peaks_reader = open_text_reader(&args.peaks_path)?;
    let peaks = read_peaks(peaks_reader, &args.column_names)
        .map_err(|e| format!("{}: {}", args.peaks_path.display(), e))?;
    log::info!("Loaded {} peaks from BED file", peaks.len());

    let motif_index = load_motif_index(&args.fimo_path);
    if motif_index.is_empty() {
        log::warn!("No FIMO motifs loaded. Proceeding without motif data");
    } else {
        log::info!(
            "Loaded {} FIMO motifs for {} chromosomes",
            motif_index.num_hits(),
            motif_index.num_chroms()
        );
    }

    if let Some(genome_path) = &args.genome_path {
        check_sequences(genome_path, &peaks)?;
    }

    log::debug!(
        "Initializing thread pool with {} threads...",
        args.num_threads
    );
    let pool = initialize_thread_pool(args.num_threads)?;
    let annotated = pool.install(|| annotate_peaks(&peaks, &motif_index));

    let num_found = annotated.iter().filter(|a| a.summary.found).count();
    log::info!(
        "Peaks with motif: {} / {}",
        num_found,
        annotated.len()
    );

    let output = open_text_writer(&args.output_path)?;
    let mut writer = AnnotationWriter::new(output, &args.column_names, &args.motif_name)?;
    for record in &annotated {
        writer.write(record)?;
    }
    writer.into_inner()?.finish()?;

    log::info!("Output saved to {}", args.output_path.display());
    log::info!("Total execution time: {:.2?}", start_timer.elapsed());
    Ok(())
}

/// A motif source that cannot be read degrades to an empty index so that all
/// peaks still receive the default motif fields.
fn load_motif_index(path: &Path) -> MotifIndex {
    match open_text_reader(path).and_then(MotifIndex::from_reader) {
        Ok(index) => index,
        Err(e) => {
            log::error!("Error reading FIMO TSV {}: {}", path.display(), e);
            MotifIndex::default()
        }
    }
}

fn check_sequences(genome_path: &Path, peaks: &[Peak]) -> Result<()> {
    let reader = open_fasta_reader(genome_path)?;
    let lengths = read_sequence_lengths(reader)
        .map_err(|e| format!("{}: {}", genome_path.display(), e))?;
    if lengths.is_empty() {
        log::warn!("No sequences loaded from FASTA file");
        return Ok(());
    }
    log::info!("Loaded {} sequences from FASTA file", lengths.len());

    let unknown = peaks
        .iter()
        .filter(|peak| !lengths.contains_key(&peak.region.contig))
        .count();
    if unknown > 0 {
        log::debug!(
            "{} peaks lie on sequences absent from the FASTA file",
            unknown
        );
    }
    Ok(())
}

fn initialize_thread_pool(num_threads: usize) -> Result<rayon::ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("motifbed-{}", i))
        .build()
        .map_err(|e| format!("Failed to initialize thread pool: {}", e))
}
