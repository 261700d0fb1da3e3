use std::path::PathBuf;

use anyhow::Result;
use catalog_oracle::analysis::{analyze_catalog, AnalysisReport};
use catalog_oracle::config::{Config, ConfigOverrides};
use catalog_oracle::dataset::{load_listings, load_products};
use catalog_oracle::matching::MatchIndex;
use catalog_oracle::output::csv::{metrics_to_csv, variants_to_csv};
use catalog_oracle::output::json::render_json;
use catalog_oracle::output::table::{
    render_matches_table, render_metrics_table, render_variants_table,
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "catalog-oracle",
    about = "Vendor/marketplace catalog reconciliation and profitability scanner"
)]
struct Cli {
    #[arg(long)]
    products: Option<PathBuf>,
    #[arg(long)]
    listings: Option<PathBuf>,
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    shipping: Option<f64>,
    #[arg(long)]
    misc: Option<f64>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Per-product profitability metrics
    Metrics,
    /// Best-variant winners per parent group
    Variants,
    /// Match coverage between the vendor catalog and the listing export
    Matches,
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        products: cli.products.clone(),
        listings: cli.listings.clone(),
        shipping: cli.shipping,
        misc: cli.misc,
    });

    if matches!(cli.command, Commands::Config { .. }) {
        return handle_config_command(&cli.command, &config, &config_path);
    }

    let costs = config.cost_inputs()?;
    let products = load_products(&config.products_path())?;
    let listings = load_listings(&config.listings_path())?;
    let index = MatchIndex::build(listings);
    let report = analyze_catalog(products, &index, costs);

    match &cli.command {
        Commands::Metrics => print_metrics(&report, cli.output)?,
        Commands::Variants => print_variants(&report, cli.output)?,
        Commands::Matches => print_matches(&report, cli.output)?,
        Commands::Config { .. } => unreachable!("config command handled before dispatch"),
    }

    Ok(())
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &PathBuf) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn print_metrics(report: &AnalysisReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_metrics_table(report)),
        OutputFormat::Json => println!("{}", render_json(report)?),
        OutputFormat::Csv => println!("{}", metrics_to_csv(report)?),
    }
    Ok(())
}

fn print_variants(report: &AnalysisReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_variants_table(report)),
        OutputFormat::Json => {
            let winners: Vec<_> = report.rows.iter().filter(|row| row.best_variant).collect();
            println!("{}", render_json(&winners)?);
        }
        OutputFormat::Csv => println!("{}", variants_to_csv(report)?),
    }
    Ok(())
}

fn print_matches(report: &AnalysisReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_matches_table(report)),
        OutputFormat::Json => println!("{}", render_json(report)?),
        OutputFormat::Csv => {
            warn!("CSV output for matches not implemented, using JSON");
            println!("{}", render_json(report)?);
        }
    }
    Ok(())
}
