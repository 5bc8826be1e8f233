use crate::config::CorruptHistoryPolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for rfirelog
/// CLI application to keep the intervention history of firemen
#[derive(Parser)]
#[command(
    name = "rfirelog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Keep an append-only history of fire brigade interventions and export it to Excel",
    long_about = None
)]
pub struct Cli {
    /// Use this configuration file instead of the default one
    #[arg(global = true, long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Override the output directory (histories, reports, archives)
    #[arg(global = true, long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Without a subcommand, `sync` runs with the configured values
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a configuration file with the current values
    Init {
        #[arg(long, short = 'f', help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Show or edit the configuration
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Fetch the interventions, update the histories and the reports
    Sync {
        #[arg(
            long = "nip",
            value_delimiter = ',',
            help = "NIPs to process (default: configured list)"
        )]
        nip: Vec<String>,

        #[arg(long, short = 'q', help = "Do not list added / skipped interventions")]
        quiet: bool,

        #[arg(
            long = "on-corrupt",
            value_enum,
            help = "What to do with an unreadable history file"
        )]
        on_corrupt: Option<CorruptHistoryPolicy>,
    },

    /// Regenerate the reports from the stored histories (no network)
    Render {
        #[arg(
            long = "nip",
            value_delimiter = ',',
            help = "NIPs to process (default: configured list)"
        )]
        nip: Vec<String>,
    },
}
