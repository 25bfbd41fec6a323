use crate::bed::{remove_line_range, LineRange};
use crate::cli::RemoveLinesArgs;
use crate::utils::{
    derive_output_path, ensure_distinct_output, open_text_reader, open_text_writer, Result,
};

const OUTPUT_SUFFIX: &str = "_filtered.bed";

pub fn remove_lines(args: RemoveLinesArgs) -> Result<()> {
    let range = LineRange::new(args.first_line, args.last_line);
    if range.is_empty() {
        log::warn!(
            "Line range {}-{} is empty, no lines will be removed",
            range.first,
            range.last
        );
    }

    let output_path = args
        .output_path
        .unwrap_or_else(|| derive_output_path(&args.input_path, OUTPUT_SUFFIX));
    log::info!(
        "Removing lines {} to {} (inclusive) from {}",
        range.first,
        range.last,
        args.input_path.display()
    );

    ensure_distinct_output(&args.input_path, &output_path)?;
    let reader = open_text_reader(&args.input_path)?;
    let mut writer = open_text_writer(&output_path)?;
    let stats = remove_line_range(reader, &mut writer, range)
        .map_err(|e| format!("{}: {}", args.input_path.display(), e))?;
    writer.finish()?;

    log::info!(
        "Lines read: {}, removed: {}, kept: {}",
        stats.lines_read,
        stats.lines_removed,
        stats.lines_kept
    );
    log::info!("Filtered data saved to {}", output_path.display());
    Ok(())
}
