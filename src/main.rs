use anyhow::Result;
use clap::{Parser, Subcommand};
use priceconv::cli::convert::ConstantOverrides;
use priceconv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert a single amount
    Convert {
        /// Amount in the source currency, e.g. 1,250,000
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Override the exchange rate
        #[arg(long)]
        rate: Option<String>,
        /// Override the card divisor
        #[arg(long)]
        card_divisor: Option<String>,
        /// Override the market rate
        #[arg(long)]
        market_rate: Option<String>,
        /// Print only the formatted values, one per line
        #[arg(long)]
        plain: bool,
    },
    /// Convert amounts interactively (default)
    Session,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => priceconv::cli::setup::setup(),
        Some(Commands::Convert {
            amount,
            rate,
            card_divisor,
            market_rate,
            plain,
        }) => priceconv::run_command(
            priceconv::AppCommand::Convert {
                amount,
                overrides: ConstantOverrides {
                    rate,
                    card_divisor,
                    market_rate,
                },
                plain,
            },
            cli.config_path.as_deref(),
        ),
        Some(Commands::Session) | None => {
            priceconv::run_command(priceconv::AppCommand::Session, cli.config_path.as_deref())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
