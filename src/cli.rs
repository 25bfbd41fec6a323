use crate::annotate::DEFAULT_PEAK_COLUMNS;
use crate::combine::{ColumnRename, DEFAULT_HISTONE_MARKS};
use crate::utils::Result;
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="motifbed",
          version=&**FULL_VERSION,
          about="Preprocessing and motif annotation of BED peak sets",
          long_about = None,
          disable_help_subcommand = true,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(global = true)]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Annotate BED peaks with overlapping FIMO motif hits")]
    Annotate(AnnotateArgs),
    #[clap(about = "Truncate the BED score column to integers")]
    ConvertScores(ConvertScoresArgs),
    #[clap(about = "Expand 3-column BED into 7-column BED with peak IDs")]
    Expand(ExpandArgs),
    #[clap(about = "Remove an inclusive range of lines from a file")]
    RemoveLines(RemoveLinesArgs),
    #[clap(about = "Combine two histone overlap tables on chrom,start,end")]
    Combine(CombineArgs),
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("annotate")))]
#[command(arg_required_else_help(true))]
pub struct AnnotateArgs {
    #[clap(required = true)]
    #[clap(short = 'b')]
    #[clap(long = "peaks")]
    #[clap(help = "BED file with peak coordinates and sample columns")]
    #[clap(value_name = "PEAKS")]
    #[arg(value_parser = check_file_exists)]
    pub peaks_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'f')]
    #[clap(long = "fimo")]
    #[clap(help = "FIMO TSV output with motif hits; an unreadable file yields no motifs")]
    #[clap(value_name = "FIMO")]
    pub fimo_path: PathBuf,

    #[clap(short = 'g')]
    #[clap(long = "genome")]
    #[clap(help = "FASTA with the scanned sequences (loaded, not used for matching)")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_file_exists)]
    pub genome_path: Option<PathBuf>,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Output CSV path")]
    #[clap(value_name = "CSV")]
    #[arg(value_parser = check_prefix_path)]
    pub output_path: PathBuf,

    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(help = "Number of threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[arg(value_parser = threads_in_range)]
    pub num_threads: usize,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "columns")]
    #[clap(value_name = "NAMES")]
    #[clap(help = "Comma-separated names of the BED columns after chrom,start,end")]
    #[clap(value_delimiter = ',')]
    #[clap(default_values_t = DEFAULT_PEAK_COLUMNS.map(String::from))]
    pub column_names: Vec<String>,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "motif-name")]
    #[clap(value_name = "NAME")]
    #[clap(help = "Motif name used in the output column headers")]
    #[clap(default_value = "Klf4")]
    #[arg(value_parser = check_name_nonempty)]
    pub motif_name: String,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("convert-scores")))]
#[command(arg_required_else_help(true))]
pub struct ConvertScoresArgs {
    #[clap(help = "Input BED file")]
    #[clap(value_name = "INPUT")]
    #[arg(value_parser = check_file_exists)]
    pub input_path: PathBuf,

    #[clap(help = "Output BED file")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_prefix_path)]
    pub output_path: PathBuf,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("expand")))]
#[command(arg_required_else_help(true))]
pub struct ExpandArgs {
    #[clap(help = "Input 3-column BED file")]
    #[clap(value_name = "INPUT")]
    #[arg(value_parser = check_file_exists)]
    pub input_path: PathBuf,

    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Output BED file [default: <INPUT stem>_expanded.bed]")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_prefix_path)]
    pub output_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("remove-lines")))]
#[command(arg_required_else_help(true))]
pub struct RemoveLinesArgs {
    #[clap(help = "Input BED file")]
    #[clap(value_name = "INPUT")]
    #[arg(value_parser = check_file_exists)]
    pub input_path: PathBuf,

    #[clap(required = true)]
    #[clap(long = "from")]
    #[clap(help = "First 1-based line number to remove")]
    #[clap(value_name = "LINE")]
    #[arg(value_parser = line_number_in_range)]
    pub first_line: usize,

    #[clap(required = true)]
    #[clap(long = "to")]
    #[clap(help = "Last 1-based line number to remove (inclusive)")]
    #[clap(value_name = "LINE")]
    #[arg(value_parser = line_number_in_range)]
    pub last_line: usize,

    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Output file [default: <INPUT stem>_filtered.bed]")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_prefix_path)]
    pub output_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("combine")))]
#[command(arg_required_else_help(true))]
pub struct CombineArgs {
    #[clap(help = "CSV whose columns are all retained")]
    #[clap(value_name = "FIRST")]
    #[arg(value_parser = check_file_exists)]
    pub first_path: PathBuf,

    #[clap(help = "CSV providing the histone mark columns")]
    #[clap(value_name = "SECOND")]
    #[arg(value_parser = check_file_exists)]
    pub second_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Output CSV path")]
    #[clap(value_name = "CSV")]
    #[arg(value_parser = check_prefix_path)]
    pub output_path: PathBuf,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "marks")]
    #[clap(value_name = "NAMES")]
    #[clap(help = "Comma-separated columns to take from the second table")]
    #[clap(value_delimiter = ',')]
    #[clap(default_values_t = DEFAULT_HISTONE_MARKS.map(String::from))]
    pub marks: Vec<String>,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "rename")]
    #[clap(value_name = "FROM=TO")]
    #[clap(help = "Column of the first table to rename and move to the end")]
    #[clap(default_value = "H3K4ME3=H3K4me3")]
    #[arg(value_parser = rename_from_string)]
    pub rename: ColumnRename,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "no-rename")]
    #[clap(help = "Keep the first table's columns as they are")]
    pub no_rename: bool,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_prefix_path(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(path.to_path_buf())
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid thread number", s))?;
    if thread >= 1 {
        Ok(thread)
    } else {
        Err("Number of threads must be at least 1".into())
    }
}

fn line_number_in_range(s: &str) -> Result<usize> {
    let line: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid line number", s))?;
    if line >= 1 {
        Ok(line)
    } else {
        Err("Line numbers start at 1".into())
    }
}

fn check_name_nonempty(s: &str) -> Result<String> {
    if s.trim().is_empty() {
        Err("Motif name cannot be an empty string".to_string())
    } else {
        Ok(s.to_string())
    }
}

fn rename_from_string(s: &str) -> Result<ColumnRename> {
    s.parse()
}
