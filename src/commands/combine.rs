use crate::cli::CombineArgs;
use crate::combine::{combine_tables, CombineOptions};
use crate::utils::{open_text_reader, open_text_writer, Result, Table};
use std::path::Path;

fn load_table(path: &Path) -> Result<Table> {
    log::info!("Loading CSV file: {}", path.display());
    let reader = open_text_reader(path)?;
    Table::from_csv_reader(reader).map_err(|e| format!("{}: {}", path.display(), e))
}

pub fn combine(args: CombineArgs) -> Result<()> {
    let first = load_table(&args.first_path)?;
    let second = load_table(&args.second_path)?;

    let options = CombineOptions {
        marks: args.marks,
        rename: (!args.no_rename).then_some(args.rename),
    };
    log::info!("Merging tables on chrom, start, end");
    let combined = combine_tables(&first, &second, &options)?;

    let mut writer = open_text_writer(&args.output_path)?;
    combined.write_csv(&mut writer)?;
    writer.finish()?;

    log::info!(
        "Combined {} rows saved to {}",
        combined.rows.len(),
        args.output_path.display()
    );
    Ok(())
}
