use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for tubedash
#[derive(Parser, Debug)]
#[command(version, about = "YouTube trending analytics dashboard in the terminal")]
pub struct Args {
    /// Path to the cleaned CSV export
    #[arg(default_value = "data/sample_cleaned.csv")]
    pub path: PathBuf,

    /// Specify the delimiter to use when reading the file
    #[arg(long = "delimiter")]
    pub delimiter: Option<u8>,

    /// Specify that the file has no header
    #[arg(long = "no-header", action)]
    pub no_header: bool,

    /// Number of rows in the top-videos ranking
    #[arg(long = "top", default_value_t = 10)]
    pub top: usize,

    /// Enable debug mode to show operational information
    #[arg(long = "debug", action)]
    pub debug: bool,
}
