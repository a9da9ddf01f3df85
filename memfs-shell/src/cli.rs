use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Interactive shell over an in-memory inode filesystem")]
pub struct Cli {
    /// Read commands from this file instead of stdin
    #[arg(long, short)]
    pub script: Option<PathBuf>,

    /// Run `mkfs` with this many descriptors before the first command
    #[arg(long, short)]
    pub capacity: Option<usize>,

    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,

    /// Echo every command before its output
    #[arg(long)]
    pub echo: bool,
}
