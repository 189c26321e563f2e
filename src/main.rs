use cat_discovery::{cli, config, error, render, session, source};
use cat_discovery_common::{ExclusionList, discover_with_limit};
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, ConfigUpdate};
use error::Result;
use source::CatApiClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Discover { bans, json } => {
            let bans: ExclusionList = bans.into_iter().collect();
            let client = CatApiClient::from_config(&config)?;

            let outcome = if json {
                discover_with_limit(&client, bans.rules(), config.max_attempts).await
            } else {
                session::run_with_spinner(&client, bans.rules(), config.max_attempts).await
            };
            tracing::info!(attempts = outcome.attempts(), "Discovery finished");

            let candidate = session::into_candidate(outcome)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&candidate)?);
            } else {
                println!("{}", render::format_candidate(&candidate));
            }
        }

        Commands::Session { bans } => {
            let client = CatApiClient::from_config(&config)?;
            let bans: ExclusionList = bans.into_iter().collect();
            session::run_session(&client, bans, config.max_attempts).await?;
        }

        Commands::Config {
            set_api_key,
            set_base_url,
            set_max_attempts,
            show,
        } => {
            let update = ConfigUpdate {
                api_key: set_api_key,
                api_base_url: set_base_url,
                max_attempts: set_max_attempts,
            };
            let changed = !update.is_empty();

            // 検証と保存が済んでから結果を表示する
            let config = if changed { Config::update(&update)? } else { config };
            if update.api_key.is_some() {
                println!("✔ APIキーを設定しました");
            }
            if update.api_base_url.is_some() {
                println!("✔ ベースURLを設定しました");
            }
            if update.max_attempts.is_some() {
                println!("✔ 最大試行回数を設定しました");
            }

            if show || !changed {
                let key_state = if config.api_key().is_some() { "設定済み" } else { "未設定" };
                println!("設定:");
                println!("  ベースURL: {}", config.api_base_url);
                println!("  最大試行回数: {}", config.max_attempts);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  APIキー: {}", key_state);
            }
        }
    }

    Ok(())
}

/// RUST_LOG があればそれを優先、なければ --verbose で debug
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
