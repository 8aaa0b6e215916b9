use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use jsonstream_rs::{filter_lines, parse, FilterOptions, StreamError};

use std::io::{self, BufWriter, IsTerminal};

#[derive(Parser, Debug)]
#[command(author, version, about = "Utils to process and analyze stream of json", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Filters json stream by conditions
    Filter {
        /// Expression with condition, e.g. "user.age >= 21"
        #[arg(short, long)]
        condition: String,

        /// Skips lines that unable to parse
        #[arg(long)]
        skip_err_lines: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Filter {
            condition,
            skip_err_lines,
        } => {
            let condition = parse(&condition).context("parse filter error")?;

            let skip_err_lines = skip_err_lines
                || std::env::var("JSONSTREAM_SKIP_ERR_LINES")
                    .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                    .unwrap_or(false);

            let stdin = io::stdin();
            if stdin.is_terminal() {
                return Err(StreamError::InteractiveInput.into());
            }

            log::info!(
                "Filtering by '{}' (skip error lines: {})",
                condition,
                skip_err_lines
            );

            let options = FilterOptions { skip_err_lines };
            let stdout = BufWriter::new(io::stdout().lock());
            let stats = filter_lines(&condition, stdin.lock(), stdout, &options)
                .context("filter error")?;

            log::info!("Filter stats: {}", serde_json::to_string(&stats)?);
        }
    }

    Ok(())
}
