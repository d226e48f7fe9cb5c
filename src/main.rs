//! `table2csv` CLI - Export tables from HTML pages as CSV files

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use table2csv::ExportConfig;

#[derive(Parser)]
#[command(name = "table2csv")]
#[command(about = "Export HTML, ARIA-grid and Notion table views as CSV files")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/table2csv/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every table in a page as table0.csv, table1.csv, ...
    Download {
        /// HTML file to read ('-' for stdin)
        input: String,

        /// Directory to write CSV files to
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Print the export report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the tables found in a page
    List {
        /// HTML file to read ('-' for stdin)
        input: String,

        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Insert a download button into every table
    AddButtons {
        /// HTML file to read ('-' for stdin)
        input: String,

        /// Write the modified HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove previously inserted download buttons
    RemoveButtons {
        /// HTML file to read ('-' for stdin)
        input: String,

        /// Write the modified HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the table a download button belongs to
    Click {
        /// HTML file with download buttons ('-' for stdin)
        input: String,

        /// Zero-based index of the button in document order
        #[arg(short, long)]
        trigger: usize,

        /// Text inserted between "table" and ".csv"
        #[arg(short, long, default_value = "")]
        suffix: String,

        /// Directory to write the CSV file to
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Handle an action message such as '{"action":"downloadTable"}'
    Message {
        /// JSON message or bare action name
        message: String,

        /// HTML file to act on ('-' for stdin)
        input: String,

        /// Directory to write CSV files to
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Write the resulting HTML to this file
        #[arg(long)]
        html_out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = ExportConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Download { input, out_dir, json } => {
            cmd::download::cmd_download(&input, out_dir, json, &config)?;
        }
        Commands::List { input, json } => {
            cmd::list::cmd_list(&input, json, &config)?;
        }
        Commands::AddButtons { input, output } => {
            cmd::buttons::cmd_add_buttons(&input, output.as_deref(), &config)?;
        }
        Commands::RemoveButtons { input, output } => {
            cmd::buttons::cmd_remove_buttons(&input, output.as_deref())?;
        }
        Commands::Click { input, trigger, suffix, out_dir } => {
            cmd::click::cmd_click(&input, trigger, &suffix, out_dir, &config)?;
        }
        Commands::Message { message, input, out_dir, html_out } => {
            cmd::message::cmd_message(&message, &input, out_dir, html_out.as_deref(), &config)?;
        }
    }

    Ok(())
}

/// Log to stderr so CSV and HTML on stdout stay clean. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
