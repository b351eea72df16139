//! Client entry-point: wires the HTTP adapter, the session files, and the CLI.

use std::ffi::OsString;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use client::config::ClientSettings;
use client::domain::{AccountService, ComplaintRepository, SessionStore};
use client::inbound::cli::{self, Cli};
use client::outbound::api::HttpComplaintsApi;
use client::outbound::storage::FileSessionStorage;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = Cli::parse();
    // Subcommand flags belong to clap; settings come from the environment and
    // the config file only.
    let settings = ClientSettings::load_from_iter([OsString::from("complaints")])
        .wrap_err("failed to load configuration")?;
    let base_url = settings
        .api_base_url()
        .wrap_err("invalid api_base_url setting")?;

    let api = Arc::new(
        HttpComplaintsApi::with_timeout(base_url, settings.request_timeout())
            .wrap_err("failed to build the HTTP client")?,
    );
    let sessions = SessionStore::new(Arc::new(FileSessionStorage::new(settings.state_dir())));
    let account = AccountService::new(Arc::clone(&api), sessions);
    let mut repository = ComplaintRepository::new(api);

    let lines = cli::run(args.command, &account, &mut repository).await?;
    for line in lines {
        println!("{line}");
    }
    Ok(())
}
