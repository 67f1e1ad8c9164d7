use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "simple-json-log")]
#[command(about = "Formats newline-delimited log event records as compact JSON")]
pub struct AppArgs {
    #[arg(long, help = "Read event records from this file instead of stdin")]
    pub input: Option<PathBuf>,

    #[arg(long, help = "Leave out the enclosing braces of each formatted event")]
    pub omit_enclosing_object: bool,

    #[arg(
        long = "log-filter",
        help = "Diagnostic log filter (or set RUST_LOG); defaults to info"
    )]
    pub log_filter: Option<String>,
}

impl AppArgs {
    pub fn from_cli() -> Self {
        <Self as Parser>::parse()
    }
}
