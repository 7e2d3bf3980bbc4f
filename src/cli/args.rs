use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nativegen")]
#[command(about = "Generate C++ bindings from a native function schema", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to the nearest .nativegen.toml)
    #[arg(long, global = true, env = "NATIVEGEN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the declaration and definition files for every namespace
    Generate {
        /// Schema file to read
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Directory to write generated files into
        #[arg(short, long = "output-dir")]
        output_dir: Option<PathBuf>,

        /// Fail if any generated file is out of date instead of writing
        #[arg(long)]
        check: bool,
    },

    /// List declared functions deferred because of unsupported argument types
    Deferred {
        /// Schema file to read
        #[arg(long)]
        schema: Option<PathBuf>,
    },
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}
