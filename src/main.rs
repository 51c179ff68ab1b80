use affiliate_site::loader::{self, DirFetcher, Fetch, HttpFetcher};
use affiliate_site::types::SiteData;
use affiliate_site::{catalog, config, generate, output};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "affiliate-site")]
#[command(about = "Static generator for affiliate product-review sites")]
#[command(long_about = "\
Static generator for affiliate product-review sites

Two JSON documents describe the site. Every page is rendered from them with
affiliate links, meta tags and schema.org structured data already in place.

Site structure:

  site/
  ├── site.toml                    # Build options (optional, see gen-config)
  ├── config/
  │   ├── site-config.json         # Title, URL, affiliate id, social links
  │   └── products.json            # { \"products\": [...], \"posts\": [...] }
  └── assets/                      # Images and other files → copied to output

Missing or broken documents fall back to defaults: the stock site config and
an empty catalog. The build still succeeds.

Set RUST_LOG=info to see per-page progress, RUST_LOG=debug for more.

Run 'affiliate-site gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Site directory holding config/*.json, site.toml and assets/
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Fetch the JSON documents from this base URL instead of --source
    #[arg(long, global = true)]
    url: Option<String>,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the documents and write the static site
    Build,
    /// Load the documents and report what was found
    Check,
    /// Search the catalog the way the listing page does
    Search {
        /// Matched against names, descriptions and keywords
        query: String,
    },
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Build => {
            println!("==> Loading site data");
            let (build_config, data) = load(&cli)?;
            output::print_load_output(&data);

            println!("==> Generating HTML → {}", cli.output.display());
            let report = generate::generate(&data, &build_config, &cli.output)?;
            output::print_generate_output(&report);

            let assets = cli.source.join("assets");
            if assets.is_dir() {
                let copied = generate::copy_assets(&assets, &cli.output.join("assets"))?;
                println!("Copied {} asset files", copied);
            }

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let (_, data) = load(&cli)?;
            output::print_load_output(&data);
        }
        Command::Search { query } => {
            let (build_config, data) = load(&cli)?;
            let min_len = build_config.search.min_query_len;
            let hits = catalog::search(&data.catalog, query, min_len);
            output::print_search_results(query, min_len, hits.as_deref());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Build options from `site.toml`, then both documents. Document failures
/// are recovered inside the loader; only config errors surface here.
fn load(cli: &Cli) -> Result<(config::BuildConfig, SiteData), Box<dyn std::error::Error>> {
    let build_config = config::load_config(&cli.source)?;
    let fetcher = make_fetcher(cli, &build_config)?;
    let data = loader::load_site_data(&*fetcher);
    Ok((build_config, data))
}

/// Documents come from `--url` when given, otherwise from `--source`.
fn make_fetcher(
    cli: &Cli,
    build_config: &config::BuildConfig,
) -> Result<Box<dyn Fetch>, loader::LoadError> {
    match &cli.url {
        Some(url) => Ok(Box::new(HttpFetcher::new(
            url,
            build_config.source.timeout(),
        )?)),
        None => Ok(Box::new(DirFetcher::new(&cli.source))),
    }
}
