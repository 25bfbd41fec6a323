use crate::bed::convert_scores;
use crate::cli::ConvertScoresArgs;
use crate::utils::{ensure_distinct_output, open_text_reader, open_text_writer, Result};

pub fn convert(args: ConvertScoresArgs) -> Result<()> {
    ensure_distinct_output(&args.input_path, &args.output_path)?;
    let reader = open_text_reader(&args.input_path)?;
    let mut writer = open_text_writer(&args.output_path)?;
    let stats = convert_scores(reader, &mut writer)
        .map_err(|e| format!("{}: {}", args.input_path.display(), e))?;
    writer.finish()?;

    log::info!(
        "Lines read: {}, written: {}, scores converted: {}",
        stats.lines_read,
        stats.lines_written,
        stats.scores_converted
    );
    log::info!("Converted data saved to {}", args.output_path.display());
    Ok(())
}
