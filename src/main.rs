use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::fs;
use std::path::PathBuf;
use taluka_dash::{config, generate, output, scan};

fn version_string() -> &'static str {
    let hash = env!("GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup; called exactly once
        Box::leak(format!("{}+g{hash}", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "taluka-dash")]
#[command(about = "Static dashboard generator for taluka-level geospatial findings")]
#[command(long_about = "\
Static dashboard generator for taluka-level geospatial findings

Your filesystem is the data source. Each directory under findings/ becomes a
navigable taluka screen; a fixed assets directory feeds the Overview screen.

Data root structure:

  root/
  ├── config.toml                      # Optional (taluka-dash gen-config)
  ├── findings/
  │   ├── Dindori/                     # One directory per taluka
  │   │   ├── combined_crops_2017-2018.jpg
  │   │   ├── hotspots_2017-2018.jpg
  │   │   ├── dist_distrib_2017-2018.jpg
  │   │   ├── YoY_Single_Kharif.jpg    # One per crop category
  │   │   └── transition_map.jpg
  │   └── onion_price/                 # Price plots, matched by substring
  └── assets/
      ├── Figure_10_intro_loc.jpeg     # Overview intro image
      ├── Figure_8_heat_map.jpeg       # Overview price heatmap
      ├── pearson.csv                  # Correlation matrix
      ├── elasticity.csv               # Elasticity matrix
      ├── about.md                     # About screen body
      └── profile.md                   # Optional overview profile panel

Missing artifacts render as inline notices, never as build failures.")]
#[command(version = version_string())]
struct Cli {
    /// Data root containing the findings tree and assets directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for the intermediate scan manifest
    #[arg(long, default_value = ".taluka-dash-temp", global = true)]
    temp_dir: PathBuf,

    /// Log debug detail (ambiguous price matches, per-file outcomes)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the data root into a manifest
    Scan,
    /// Produce the static site from a previous scan
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate artifacts (full decode, CSV parse) without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.root)?;
            write_manifest(&cli.temp_dir, &manifest)?;
            output::print_scan_output(&manifest);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let manifest: scan::Manifest = serde_json::from_str(&fs::read_to_string(&manifest_path)?)?;
            init_thread_pool(&manifest.config.processing);
            let summary = generate::generate_site(&manifest, &cli.root, &cli.output)?;
            output::print_generate_output(&summary);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.root.display());
            let manifest = scan::scan(&cli.root)?;
            write_manifest(&cli.temp_dir, &manifest)?;
            output::print_scan_output(&manifest);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            init_thread_pool(&manifest.config.processing);
            let summary = generate::generate_site(&manifest, &cli.root, &cli.output)?;
            output::print_generate_output(&summary);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.root.display());
            let manifest = scan::scan(&cli.root)?;
            output::print_scan_output(&manifest);

            let problems = generate::validate(&manifest, &cli.root)?;
            if problems.is_empty() {
                println!("==> Content is valid");
            } else {
                for problem in &problems {
                    eprintln!("problem: {problem}");
                }
                return Err(format!("{} artifact(s) failed validation", problems.len()).into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn write_manifest(
    temp_dir: &std::path::Path,
    manifest: &scan::Manifest,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(temp_dir.join("manifest.json"), json)?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .build();
    let _ = TermLogger::init(level, log_config, TerminalMode::Stderr, ColorChoice::Auto);
}

/// Initialize the rayon thread pool from processing config.
///
/// Caps at the number of available CPU cores: users can constrain down,
/// not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    rayon::ThreadPoolBuilder::new()
        .num_threads(config::effective_threads(processing))
        .build_global()
        .ok();
}
