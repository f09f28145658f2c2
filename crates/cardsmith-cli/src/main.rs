use anyhow::{Context, Result, bail};
use cardsmith_config::Config;
use cardsmith_engine::{CardGenerator, io};
use clap::Parser;
use std::path::PathBuf;
use std::process;

/// Render one SVG card per CSV record
#[derive(Parser, Debug)]
#[command(name = "cardsmith", author, version, about)]
struct Cli {
    /// Config file (default: ~/.config/cardsmith/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// SVG template with the card's insertion points
    #[arg(long, short)]
    template: Option<PathBuf>,

    /// CSV file whose header row names the card fields
    #[arg(long, short)]
    data: Option<PathBuf>,

    /// Directory the cards are written into
    #[arg(long, short)]
    out: Option<PathBuf>,
}

/// Inputs and outputs for one run, after merging flags over the config file.
#[derive(Debug, PartialEq)]
struct Plan {
    template: PathBuf,
    data: PathBuf,
    output_dir: PathBuf,
}

const DEFAULT_OUTPUT_DIR: &str = "cards";

impl Plan {
    fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let Some(template) = cli.template.clone().or_else(|| config.template.clone()) else {
            bail!("No template given; pass --template or set `template` in the config file");
        };
        let Some(data) = cli.data.clone().or_else(|| config.data.clone()) else {
            bail!("No data file given; pass --data or set `data` in the config file");
        };
        let output_dir = cli
            .out
            .clone()
            .or_else(|| config.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        Ok(Self {
            template,
            data,
            output_dir,
        })
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    log::debug!("Config path: {}", config_path.display());

    match Config::load_from_path(&config_path)? {
        Some(config) => {
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        }
        None if cli.config.is_some() => {
            bail!("Config file {} not found", config_path.display())
        }
        None => Ok(Config::default()),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let plan = Plan::resolve(cli, &config)?;

    let template = io::load_template(&plan.template)
        .with_context(|| format!("Loading template {}", plan.template.display()))?;
    let records = io::load_records(&plan.data)
        .with_context(|| format!("Reading records from {}", plan.data.display()))?;
    log::info!(
        "Generating {} cards from {}",
        records.len(),
        plan.data.display()
    );

    let generator = CardGenerator::new(&config.selectors, config.styles.clone(), config.layout)?
        .with_template(template);
    let summary = io::generate_batch(&generator, &records, &plan.output_dir)?;

    log::info!(
        "Wrote {} cards to {} ({} skipped)",
        summary.written.len(),
        plan.output_dir.display(),
        summary.skipped.len()
    );
    Ok(())
}

fn main() {
    // Info by default, RUST_LOG wins when set
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
