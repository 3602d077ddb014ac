use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use mcu_bench::VizConfig;
use std::path::PathBuf;

use crate::commands::charts::handle_charts;
use crate::commands::export::handle_export;
use crate::commands::inspect::handle_inspect;
use crate::commands::price::handle_price;
use crate::commands::table::handle_table;
use crate::logging::setup_logging;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: SettingsArgs,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by every subcommand, layered over the config file
#[derive(Args, Debug, Default)]
struct SettingsArgs {
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to a TOML config file",
        long_help = "Path to a TOML config file. Defaults to mcu-bench.toml in the working directory when present."
    )]
    config: Option<PathBuf>,

    #[arg(
        short = 'd',
        long = "data-dir",
        value_name = "DIR",
        global = true,
        help = "Root of the benchmark result tree (default: Data)"
    )]
    data_dir: Option<PathBuf>,

    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        global = true,
        help = "Directory for chart images (default: .)"
    )]
    output_dir: Option<PathBuf>,

    #[arg(
        short = 'f',
        long = "format",
        value_name = "FORMAT",
        global = true,
        help = "Chart image format (png, svg)"
    )]
    format: Option<String>,

    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::SetTrue,
        help = "Log progress information"
    )]
    verbose: bool,
}

impl SettingsArgs {
    /// Load the layered configuration, then apply flags on top
    fn resolve(&self) -> Result<VizConfig> {
        let mut config = VizConfig::load(self.config.as_deref())?;
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(format) = &self.format {
            config.save_format = format.clone();
            config.chart_format()?;
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Bar charts of every metric, grouped by model and device
    #[command(about = "Render one bar chart per metric")]
    Charts {
        #[arg(
            long = "throughput-only",
            action = clap::ArgAction::SetTrue,
            help = "Only read performance runs and chart throughput"
        )]
        throughput_only: bool,
    },

    /// Price/performance scatter and bar charts
    #[command(about = "Render price vs. throughput and energy charts")]
    Price,

    /// Text tables ready for TikZ/pgfplots
    #[command(about = "Print the price comparison as aligned text tables")]
    Table,

    /// Raw rows as CSV
    #[command(about = "Export the extracted rows to a CSV file")]
    Export {
        #[arg(
            long = "output",
            value_name = "FILE",
            default_value = "results.csv",
            help = "CSV file to write"
        )]
        output: PathBuf,
    },

    /// Key layout of a results.json file
    #[command(about = "Print the key structure of a JSON results file")]
    Inspect {
        #[arg(value_name = "FILE", default_value = "results.json")]
        file: PathBuf,
    },
}

pub fn cli() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.settings.verbose)?;

    match cli.command {
        Command::Charts { throughput_only } => {
            handle_charts(cli.settings.resolve()?, throughput_only)?;
        }
        Command::Price => {
            handle_price(cli.settings.resolve()?)?;
        }
        Command::Table => {
            handle_table(cli.settings.resolve()?)?;
        }
        Command::Export { output } => {
            handle_export(cli.settings.resolve()?, output)?;
        }
        Command::Inspect { file } => {
            handle_inspect(&file)?;
        }
    }
    Ok(())
}
