use crate::bed::expand_bed;
use crate::cli::ExpandArgs;
use crate::utils::{
    derive_output_path, ensure_distinct_output, open_text_reader, open_text_writer, Result,
};

const OUTPUT_SUFFIX: &str = "_expanded.bed";

pub fn expand(args: ExpandArgs) -> Result<()> {
    let output_path = args
        .output_path
        .unwrap_or_else(|| derive_output_path(&args.input_path, OUTPUT_SUFFIX));
    log::info!("Processing input file: {}", args.input_path.display());
    log::info!("Output will be saved to: {}", output_path.display());

    ensure_distinct_output(&args.input_path, &output_path)?;
    let reader = open_text_reader(&args.input_path)?;
    let mut writer = open_text_writer(&output_path)?;
    let stats = expand_bed(reader, &mut writer)
        .map_err(|e| format!("{}: {}", args.input_path.display(), e))?;
    writer.finish()?;

    log::info!(
        "Lines processed: {}, lines written: {}",
        stats.lines_processed,
        stats.lines_written
    );
    Ok(())
}
