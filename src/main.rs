//! CLI entry point for reconstructing shredded images

use clap::Parser;
use unshred::io::cli::{Cli, FileProcessor};

fn main() -> unshred::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()?.into_result()
}
