//! repdash — entry point for rendering the reputation dashboard.

use anyhow::Context;
use clap::Parser;
use repdash_session::{DashboardConfig, DashboardState, HostContext, Session, Widget};
use repdash_types::{SocialId, WalletAddress};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repdash", about = "Reputation dashboard aggregation CLI")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings are
    /// used as the base; environment variables override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "REPDASH_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Resolve a social identity and render the full dashboard.
    Dashboard {
        /// The social identifier supplied by the host runtime.
        #[arg(long, env = "REPDASH_SOCIAL_ID")]
        social_id: u64,
    },
    /// Look up the transaction count of an arbitrary wallet address.
    Check {
        /// A 0x-prefixed wallet address.
        address: String,
    },
}

fn init_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => DashboardConfig::from_toml_file(
            path.to_str().context("config path is not valid UTF-8")?,
        )
        .with_context(|| format!("loading config from {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    let mut config = base.apply_env();
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    init_tracing(&config.log_level);
    tracing::info!(chain_id = config.chain_id, "starting repdash");

    match cli.command {
        Command::Dashboard { social_id } => {
            let mut session = Session::from_config(&config);
            let ctx = HostContext::with_social_id(SocialId::new(social_id));
            session.load(&ctx).await;
            render(session.state());
        }
        Command::Check { address } => {
            let address: WalletAddress = address.parse().context("invalid wallet address")?;
            let session = Session::from_config(&config);
            let count = session
                .lookup_transaction_count(&address)
                .await
                .context("transaction count lookup failed")?;
            println!("{address}: {count} transactions");
        }
    }

    Ok(())
}

/// Render the dashboard state as plain text, one widget per line.
fn render(state: &DashboardState) {
    match &state.identity {
        Widget::Ready(identity) => {
            println!("@{} (id {})", identity.handle, identity.social_id);
            match identity.activity_score {
                Some(score) => println!("  activity score: {:.1}%", score * 100.0),
                None => println!("  activity score: n/a"),
            }
            if let (Some(followers), Some(following)) =
                (identity.follower_count, identity.following_count)
            {
                println!("  followers: {followers}  following: {following}");
            }
        }
        Widget::Loading => println!("identity: loading"),
        Widget::Unavailable => {
            println!("identity: unresolved — connect a wallet to get started");
            return;
        }
    }

    if let Some(addresses) = &state.addresses {
        for (i, addr) in addresses.iter().enumerate() {
            let tag = if i == 0 { "custody" } else { "verified" };
            println!("  {tag}: {addr}");
        }
    }

    match &state.verification {
        Widget::Ready(v) => {
            println!(
                "  verified: identity={} social={}",
                v.identity_verified, v.social_verified
            );
        }
        Widget::Loading => println!("  verified: checking…"),
        Widget::Unavailable => println!("  verified: no data"),
    }

    match &state.reputation {
        Widget::Ready(summary) => {
            match summary.stamp_score {
                Some(score) => println!("  stamp score: {score:.2}"),
                None => println!("  stamp score: none yet — create one to get started"),
            }
            match &summary.builder {
                Some(standing) => {
                    print!(
                        "  builder: {:.0} pts / creator: {:.0} pts",
                        standing.builder_points, standing.creator_points
                    );
                    match standing.rank {
                        Some(rank) => println!(" (rank #{rank})"),
                        None => println!(),
                    }
                }
                None => println!("  builder score: no data"),
            }
        }
        Widget::Loading => println!("  reputation: loading"),
        Widget::Unavailable => println!("  reputation: no data"),
    }

    match &state.tx_count {
        Widget::Ready(count) => println!("  transactions: {count}"),
        Widget::Loading => println!("  transactions: loading"),
        Widget::Unavailable => println!("  transactions: no data"),
    }
}
