//! `studio-admin` entry point: loads configuration, restores the session, and
//! runs one command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use client::config::{ClientConfig, ClientSettings};
use client::inbound::cli::Cli;
use client::wiring::shell_from_config;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let settings = ClientSettings::load_from_iter([OsString::from("studio-admin")])
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let config = settings
        .resolve(&DefaultEnv::new())
        .wrap_err("invalid configuration")?;
    init_tracing(config.log_json);

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    runtime.block_on(async_main(cli, &config))
}

async fn async_main(cli: Cli, config: &ClientConfig) -> Result<ExitCode> {
    let mut shell = shell_from_config(config).wrap_err("failed to build HTTP client")?;
    shell.start().await;

    let mut stdout = io::stdout().lock();
    let status = shell
        .run(cli.command, &mut stdout)
        .await
        .wrap_err("failed to write output")?;
    Ok(if status.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
