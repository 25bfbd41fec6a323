use clap::Parser;
use motifbed::{
    cli::{init_verbose, Cli, Command, FULL_VERSION},
    commands::{annotate, combine, convert, expand, remove},
    utils::{handle_error_and_exit, Result},
};

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    let subcommand_name = match cli.command {
        Command::Annotate(_) => "annotate",
        Command::ConvertScores(_) => "convert-scores",
        Command::Expand(_) => "expand",
        Command::RemoveLines(_) => "remove-lines",
        Command::Combine(_) => "combine",
    };

    log::info!(
        "Running {}-{} [{}]",
        env!("CARGO_PKG_NAME"),
        *FULL_VERSION,
        subcommand_name
    );
    match cli.command {
        Command::Annotate(args) => annotate::annotate(args)?,
        Command::ConvertScores(args) => convert::convert(args)?,
        Command::Expand(args) => expand::expand(args)?,
        Command::RemoveLines(args) => remove::remove_lines(args)?,
        Command::Combine(args) => combine::combine(args)?,
    }
    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
