mod readers;
mod region;
mod table;
mod writers;

pub(crate) use readers::read_raw_line;
pub use readers::{open_fasta_reader, open_text_reader};
pub use region::{intervals_overlap, GenomicInterval};
pub use table::Table;
pub use writers::{derive_output_path, ensure_distinct_output, open_text_writer, TextWriter};

pub type Result<T> = std::result::Result<T, String>;

pub fn handle_error_and_exit(err: String) -> ! {
    log::error!("{}", err);
    std::process::exit(1);
}
