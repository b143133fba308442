use crate::app::models::TextEncoding;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Dump the folder tree and file contents of a project subtree into one text file"
)]
pub struct Cli {
    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Directory the targets are resolved against (defaults to the current directory)
    #[arg(long)]
    pub base: Option<PathBuf>,

    /// Directories to snapshot, relative to the base (e.g., 'src/components')
    #[arg(long, num_args = 1..)]
    pub target: Option<Vec<String>>,

    /// File the report is written to
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Text encoding for reading sources and writing the report (utf-8, latin-1)
    #[arg(long)]
    pub encoding: Option<TextEncoding>,
}
