use clap::{Parser, Subcommand};
use rowgraph::error::Result;

mod cli;

#[derive(Parser)]
#[command(name = "rowgraph")]
#[command(version = "0.1.0")]
#[command(about = "Serve wide-column store rows as GraphQL fields", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an example wirings file and row data set
    Example {
        /// Directory to write wirings.json and data.json into
        #[arg(long, default_value = ".")]
        dir: String,
    },

    /// Parse a wirings file and report what would be wired
    Check {
        /// Wirings file path
        #[arg(long, default_value = "wirings.json")]
        wirings: String,
    },

    /// Start the GraphQL server
    Serve {
        /// Wirings file path
        #[arg(long, default_value = "wirings.json")]
        wirings: String,

        /// Row data file path
        #[arg(long, default_value = "data.json")]
        data: String,

        /// Server port
        #[arg(long, default_value_t = 4000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Example { dir } => {
            cli::example::run(dir).await?;
        }
        Commands::Check { wirings } => {
            cli::check::run(wirings).await?;
        }
        Commands::Serve { wirings, data, port } => {
            cli::serve::run(wirings, data, port).await?;
        }
    }

    Ok(())
}
