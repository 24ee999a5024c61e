//! Classroom poll server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin classpoll-server
//! cargo run --bin classpoll-server -- --host 127.0.0.1 --port 3000 --default-duration 30
//! ```

use clap::Parser;

use classpoll_server::{
    bootstrap::build_server,
    domain::{SessionConfig, value_object::MAX_POLL_DURATION_SECS},
};
use classpoll_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "classpoll-server")]
#[command(about = "Live classroom poll server over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "5000")]
    port: u16,

    /// Poll duration in seconds when the teacher gives none
    #[arg(
        long,
        env = "POLL_DEFAULT_DURATION",
        default_value = "60",
        value_parser = clap::value_parser!(u64).range(1..=MAX_POLL_DURATION_SECS)
    )]
    default_duration: u64,

    /// Refuse to start a poll while another one is still collecting answers
    #[arg(long, env = "POLL_REJECT_SUPERSEDING_CREATE")]
    reject_superseding_create: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let config = match SessionConfig::new(args.default_duration, args.reject_superseding_create) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let server = build_server(config);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
