//! Sequential CRUD exerciser for a users REST API.
//!
//! Probes health, then creates, reads, updates and deletes synthetic users
//! and finishes with negative-path probes. Results go to the console; the
//! exit code is 0 whatever the outcome.

use clap::Parser;
use crud_suite::{Suite, SuiteConfig};
use user_api_client::{ClientConfig, Console};

/// Command-line arguments for the exerciser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server base URL
    #[arg(long, default_value = "http://localhost:8080")]
    base_url: String,

    /// Path of the users collection
    #[arg(long, default_value = "/api/users")]
    users_path: String,

    /// Path of the health endpoint
    #[arg(long, default_value = "/actuator/health")]
    health_path: String,

    /// Number of synthetic users to create
    #[arg(short, long, default_value_t = 10)]
    users: usize,

    /// Pause after each call in milliseconds
    #[arg(long, default_value_t = 100)]
    pause_ms: u64,

    /// Id used for the negative-path probes
    #[arg(long, default_value_t = 999_999)]
    missing_id: u64,

    /// Per-request timeout in milliseconds (library default when omitted)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Skip request/response dumps
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn into_config(self) -> SuiteConfig {
        SuiteConfig {
            client: ClientConfig {
                base_url: self.base_url,
                users_path: self.users_path,
                health_path: self.health_path,
                timeout_ms: self.timeout_ms,
                quiet: self.quiet,
            },
            user_count: self.users,
            pause_ms: self.pause_ms,
            missing_id: self.missing_id,
        }
    }
}

/// Builds the suite, reporting a bad configuration on the console.
fn build_suite(config: SuiteConfig) -> Option<Suite> {
    let console = Console::new(config.client.quiet);
    match Suite::new(config) {
        Ok(suite) => Some(suite),
        Err(e) => {
            console.fail(format!("Cannot start tests: {}", e));
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    let config = args.into_config();
    tracing::debug!(?config, "starting suite");

    let Some(mut suite) = build_suite(config) else {
        return Ok(());
    };
    if let Err(abort) = suite.run().await {
        tracing::debug!(%abort, "suite aborted");
    }

    Ok(())
}
