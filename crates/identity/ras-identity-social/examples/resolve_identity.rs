//! Resolve a social sign-in credential from the command line.
//!
//! ```text
//! cargo run --example resolve_identity -- google <access-token>
//! cargo run --example resolve_identity -- apple <code> \
//!     --client-id com.example.app --team-id TEAM1 --key-id KEY1 \
//!     --key-file AuthKey_KEY1.p8 --redirect-uri https://example-app.com/redirect
//! ```

use clap::{Parser, Subcommand};
use ras_identity_social::{
    AppleCredentials, Provider, SigningKeyInput, SocialConfig, SocialIdentityClient,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Resolve a social sign-in credential into an identity")]
struct Cli {
    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a Google access token
    Google { access_token: String },
    /// Resolve a Facebook access token
    Facebook { access_token: String },
    /// Exchange a Sign in with Apple authorization code
    Apple {
        code: String,
        #[arg(long, env = "APPLE_CLIENT_ID")]
        client_id: String,
        #[arg(long, env = "APPLE_TEAM_ID")]
        team_id: String,
        #[arg(long, env = "APPLE_KEY_ID")]
        key_id: String,
        /// Path to the `.p8` private key
        #[arg(long, env = "APPLE_KEY_FILE")]
        key_file: PathBuf,
        #[arg(long, env = "APPLE_REDIRECT_URI")]
        redirect_uri: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = SocialConfig::new().with_http_timeout(cli.timeout);

    let identity = match cli.command {
        Command::Google { access_token } => {
            SocialIdentityClient::new(config)?
                .resolve(Provider::Google, &access_token)
                .await?
        }
        Command::Facebook { access_token } => {
            SocialIdentityClient::new(config)?
                .resolve(Provider::Facebook, &access_token)
                .await?
        }
        Command::Apple {
            code,
            client_id,
            team_id,
            key_id,
            key_file,
            redirect_uri,
        } => {
            let signing_key = SigningKeyInput::from_pem(std::fs::read(key_file)?);
            let credentials = AppleCredentials::new(client_id, team_id, key_id, signing_key);

            SocialIdentityClient::new(config.with_apple_redirect_uri(redirect_uri))?
                .resolve_apple(&code, &credentials)
                .await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&identity)?);
    Ok(())
}
