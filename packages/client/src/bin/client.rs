//! Terminal chat client for the Hiroba relay.
//!
//! Connects to the relay, prints every message it receives and sends each
//! line typed at the prompt as `{"user": <name>, "text": <line>}`.
//! There is no automatic reconnection: when the connection drops the client
//! reports `Disconnected` and exits with a non-zero status.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- --user alice
//! WS_URL=ws://example.com:3001 cargo run --bin hiroba-client
//! ```

use clap::Parser;

use hiroba_client::{domain::default_user_name, run_client_session};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "Terminal client for the Hiroba WebSocket chat relay", long_about = None)]
struct Args {
    /// Display name attached to sent messages (default: User<random number>)
    #[arg(short = 'n', long)]
    user: Option<String>,

    /// WebSocket server URL
    #[arg(short = 'u', long, env = "WS_URL", default_value = "ws://localhost:3001")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();
    let user = args.user.unwrap_or_else(default_user_name);

    if let Err(e) = run_client_session(&args.url, user).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
