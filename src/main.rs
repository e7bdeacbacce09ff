mod config;
mod report;

use clap::{Args, Parser, Subcommand};
use crate::config::{Config, ConfigSource, OutputFormat};
use report::{CatalogReport, DesignReport, FocalReport, LayoutReport, SizesReport};
use std::path::PathBuf;
use strand::presets::{Style, find_target_size};
use strand::{Catalog, GemType, configure};

#[derive(Parser, Debug)]
#[command(name = "bracelet", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read the design from this file instead of the user config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Compute the bead sequence, size and price of a design (default)
    Design(DesignArgs),
    /// Compute 3D placements for every bead of a design
    Layout {
        #[command(flatten)]
        design: DesignArgs,
        /// Seed for spin and brightness variation
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the bead catalog
    Catalog {
        /// List the focal clusters of each style instead
        #[arg(long)]
        focals: bool,
    },
    /// List the standard target sizes
    Sizes,
    /// Write the default config file if none exists
    InitConfig,
}

#[derive(Args, Debug, Clone, Default)]
struct DesignArgs {
    /// classic, solitaire, triad or array
    #[arg(short, long)]
    style: Option<Style>,

    /// Target loop length in millimetres
    #[arg(short, long, conflicts_with = "size")]
    target_mm: Option<f64>,

    /// Standard size by inch label, e.g. 7.25
    #[arg(long)]
    size: Option<String>,

    #[arg(short, long)]
    primary: Option<GemType>,

    #[arg(long)]
    secondary: Option<GemType>,

    /// Put a spacer between neighbouring gems
    #[arg(long, conflicts_with = "no_spacers")]
    spacers: bool,

    #[arg(long)]
    no_spacers: bool,

    /// Focal option id, see `catalog --focals`
    #[arg(short, long)]
    focal: Option<String>,
}

impl DesignArgs {
    fn apply(self, config: &mut Config) -> anyhow::Result<()> {
        let design = &mut config.design;
        if let Some(style) = self.style {
            design.style = style;
        }
        if let Some(label) = self.size {
            let size = find_target_size(&label)
                .ok_or_else(|| anyhow::anyhow!("Unknown size '{}', see `bracelet sizes`", label))?;
            design.target_mm = size.mm;
        }
        if let Some(mm) = self.target_mm {
            design.target_mm = mm;
        }
        if let Some(primary) = self.primary {
            design.primary = primary;
        }
        if self.secondary.is_some() {
            design.secondary = self.secondary;
        }
        if self.spacers {
            design.spacers = true;
        }
        if self.no_spacers {
            design.spacers = false;
        }
        if self.focal.is_some() {
            design.focal = self.focal;
            config.custom_focal = None;
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let source = ConfigSource::from_arg(cli.config.as_deref());
    let load = || -> anyhow::Result<Config> {
        let mut config = source.load_or_default()?;
        if cli.json {
            config.output = OutputFormat::Json;
        }
        Ok(config)
    };
    let catalog = Catalog::standard();

    match cli.command.clone().unwrap_or(Commands::Design(DesignArgs::default())) {
        Commands::Design(args) => {
            let mut config = load()?;
            args.apply(&mut config)?;
            let sequence = configure(&config.pattern()?, catalog)?;
            let report = DesignReport::build(config.design.style, sequence, catalog)?;
            report::print(&report, config.output)
        }
        Commands::Layout { design, seed } => {
            let mut config = load()?;
            design.apply(&mut config)?;
            let sequence = configure(&config.pattern()?, catalog)?;
            let seed = seed.unwrap_or(config.jitter_seed);
            let report = LayoutReport::build(&sequence, catalog, seed)?;
            report::print(&report, config.output)
        }
        Commands::Catalog { focals: true } => report::print(&FocalReport::build(), load()?.output),
        Commands::Catalog { focals: false } => {
            report::print(&CatalogReport::build(catalog), load()?.output)
        }
        Commands::Sizes => report::print(&SizesReport::build(), load()?.output),
        Commands::InitConfig => {
            let path = source.write_default()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
