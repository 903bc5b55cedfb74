use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "unipi-fan")]
#[command(about = "Control fans wired to Unipi Neuron analog outputs")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Platform configuration file (JSON)
    #[arg(short, long, default_value = "unipi-fan.json", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all configured fans
    List,

    /// Show the state and capabilities of one fan
    Show {
        /// Fan name (use 'list' to see configured fans)
        name: String,
    },

    /// Turn a fan on
    On {
        /// Fan name (use 'list' to see configured fans)
        name: String,

        /// Speed in percent (defaults to 100)
        #[arg(short, long, allow_negative_numbers = true)]
        percentage: Option<i32>,
    },

    /// Turn a fan off
    Off {
        /// Fan name (use 'list' to see configured fans)
        name: String,
    },

    /// Set the speed of a fan in percent (0 = off, 100 = full speed)
    Set {
        /// Fan name (use 'list' to see configured fans)
        name: String,

        /// Values outside 0–100 are clamped when sent to the output
        #[arg(allow_negative_numbers = true)]
        percentage: i32,
    },
}
