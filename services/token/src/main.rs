//! `hr-token`: mint and verify HR backend session tokens from the command line.

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use hr_token::{telemetry, AuthError, Config, Payload, TokenService};

#[derive(Parser)]
#[command(author, version, about = "Mint and verify HR backend session tokens", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint a token for a user id or an arbitrary JSON object
    Encode {
        /// User id to embed as `uid`
        #[arg(long, conflicts_with = "json", required_unless_present = "json")]
        uid: Option<String>,
        /// Raw JSON object payload
        #[arg(long)]
        json: Option<String>,
    },
    /// Verify a token and print its payload
    Decode {
        /// Token string
        token: String,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = Config::from_env().context("failed to load configuration")?;
    telemetry::init_tracing(&config);

    let service = TokenService::from_config(&config);

    match cli.command {
        Commands::Encode { uid, json } => {
            let token = match (uid, json) {
                (Some(uid), _) => service.issue_for_subject(uid)?,
                (None, Some(raw)) => {
                    let payload: Payload =
                        serde_json::from_str(&raw).context("--json must be a JSON object")?;
                    service.encode(&payload)?
                }
                (None, None) => anyhow::bail!("either --uid or --json is required"),
            };
            info!(algorithm = service.algorithm(), "token minted");
            println!("{token}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Decode { token } => match service.decode_payload(&token) {
            Ok(payload) => {
                println!("{}", serde_json::to_string_pretty(&payload)?);
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                eprintln!("{}", AuthError::from(err).client_message());
                Ok(ExitCode::FAILURE)
            }
        },
    }
}
