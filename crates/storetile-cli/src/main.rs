mod tiles;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use storetile_core::{BaseVariantRule, SecondaryImageFallback, TileOptions};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storetile")]
#[command(about = "Build display tiles from a storefront catalog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a collection from the Storefront API and print its tiles as JSON
    Tiles {
        /// Collection handle; defaults to STORETILE_COLLECTION
        #[arg(long)]
        collection: Option<String>,

        /// Collection sort key, e.g. BEST_SELLING or CREATED_AT
        #[arg(long)]
        sort_key: Option<String>,

        /// Reverse the sort order
        #[arg(long)]
        reverse: bool,

        #[arg(long)]
        pretty: bool,
    },
    /// Build tiles from a saved payload without touching the network
    Build {
        /// A product, an array of products, or a full GraphQL response
        #[arg(long)]
        input: PathBuf,

        #[command(flatten)]
        policy: PolicyArgs,

        #[arg(long)]
        pretty: bool,
    },
    /// Show the interactive tile state for a saved payload
    Preview {
        #[arg(long)]
        input: PathBuf,

        /// Color to select on every tile before printing
        #[arg(long)]
        select: Option<String>,

        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Validate configuration and print it with secrets redacted
    Config,
}

#[derive(Debug, Clone, clap::Args)]
struct PolicyArgs {
    /// How a color's representative variant is chosen
    #[arg(
        long,
        value_enum,
        env = "STORETILE_BASE_VARIANT_RULE",
        default_value_t = BaseVariantArg::FirstMetafield
    )]
    base_variant_rule: BaseVariantArg,

    /// Hover image shown when a color has no second image
    #[arg(
        long,
        value_enum,
        env = "STORETILE_SECONDARY_IMAGE_FALLBACK",
        default_value_t = SecondaryFallbackArg::Primary
    )]
    secondary_fallback: SecondaryFallbackArg,
}

impl PolicyArgs {
    fn tile_options(&self) -> TileOptions {
        TileOptions {
            base_variant_rule: match self.base_variant_rule {
                BaseVariantArg::FirstMetafield => BaseVariantRule::FirstMetafield,
                BaseVariantArg::AnyMetafield => BaseVariantRule::AnyMetafield,
            },
            secondary_image_fallback: match self.secondary_fallback {
                SecondaryFallbackArg::Primary => SecondaryImageFallback::Primary,
                SecondaryFallbackArg::Placeholder => SecondaryImageFallback::Placeholder,
                SecondaryFallbackArg::Hidden => SecondaryImageFallback::Hidden,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BaseVariantArg {
    FirstMetafield,
    AnyMetafield,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SecondaryFallbackArg {
    Primary,
    Placeholder,
    Hidden,
}

fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Tiles {
            collection,
            sort_key,
            reverse,
            pretty,
        }) => {
            let config = storetile_core::load_storefront_config()?;
            init_tracing(&config.log_level)?;
            tiles::run_fetch_tiles(
                &config,
                collection.as_deref(),
                sort_key.as_deref(),
                reverse,
                pretty,
            )
            .await?;
        }
        Some(Commands::Build {
            input,
            policy,
            pretty,
        }) => {
            init_tracing(&offline_log_level())?;
            tiles::run_build_tiles(&input, &policy.tile_options(), pretty)?;
        }
        Some(Commands::Preview {
            input,
            select,
            policy,
        }) => {
            init_tracing(&offline_log_level())?;
            tiles::run_preview(&input, select.as_deref(), &policy.tile_options())?;
        }
        Some(Commands::Config) => {
            let config = storetile_core::load_storefront_config()?;
            println!("{config:#?}");
        }
        None => println!("storetile: run with --help to list commands"),
    }

    Ok(())
}

/// Offline commands need no store credentials, so the log level is read
/// directly rather than through the validated configuration.
fn offline_log_level() -> String {
    std::env::var("STORETILE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
}
