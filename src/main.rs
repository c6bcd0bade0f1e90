use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use challenge_bot::category::ChallengeCategory;
use challenge_bot::gemini::GeminiClient;
use challenge_bot::{chat, library, web_server};

// Define the command-line interface structure using clap
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start the challenge bot web server.
    Serve {
        #[arg(long, default_value_t = 8080, help = "Port for the web server.")]
        port: u16,
    },
    /// Chat with the challenge bot from the terminal.
    Chat,
    /// Print today's challenge of the day from the built-in library.
    Daily,
    /// Print a random challenge from the built-in library for a category.
    Suggest {
        #[arg(help = "One of: coding, fitness, learning, productivity, mindfulness.")]
        category: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (for environment variables like API keys)
    dotenvy::dotenv().ok();

    // Initialize tracing (logging) subscriber
    // Reads log level from RUST_LOG environment variable (e.g., RUST_LOG=info)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    info!("Challenge bot starting with command: {:?}", cli.command);

    match cli.command {
        Commands::Serve { port } => {
            let client = GeminiClient::from_env();
            web_server::start_web_server(port, client)
                .await
                .context("Web server failed")?;
        }
        Commands::Chat => {
            chat::run_chat_session().await.context("Chat session failed")?;
        }
        Commands::Daily => {
            println!("{}", library::daily_challenge());
        }
        Commands::Suggest { category } => {
            let challenge = ChallengeCategory::from_label(&category)
                .and_then(library::random_challenge)
                .context("Invalid category selected.")?;
            println!("{}", challenge);
        }
    }

    Ok(())
}
