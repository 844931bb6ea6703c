use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::civil::Date;

#[derive(Parser)]
#[command(name = "km", version, about = "Batch generator for unique license-style keys")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a batch of unique keys
    Generate {
        /// How many keys to generate (1-10000)
        #[arg(short = 'n', long)]
        count: Option<u32>,

        /// Expiry date written to the export header (YYYY-MM-DD, default today)
        #[arg(long)]
        expires: Option<Date>,

        /// Leave uppercase letters out of the alphabet
        #[arg(long)]
        no_uppercase: bool,

        /// Leave digits out of the alphabet
        #[arg(long)]
        no_digits: bool,

        /// Drop visually-similar characters (0/O, 1/I/L, 5/S, 2/Z)
        #[arg(long)]
        exclude_similar: bool,

        /// Export the batch to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the batch as JSON
        #[arg(long)]
        json: bool,

        /// Print the keys only, one per line
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show the effective alphabet for a set of options
    Alphabet {
        /// Leave uppercase letters out of the alphabet
        #[arg(long)]
        no_uppercase: bool,

        /// Leave digits out of the alphabet
        #[arg(long)]
        no_digits: bool,

        /// Drop visually-similar characters (0/O, 1/I/L, 5/S, 2/Z)
        #[arg(long)]
        exclude_similar: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify the shape of a previously exported key file
    Check {
        /// Export file to verify
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
