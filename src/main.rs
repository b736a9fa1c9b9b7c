// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use tracing::info;

use podjenny::cli::Cli;
use podjenny::config::Config;
use podjenny::confirm::{AutoConfirm, Interactive};
use podjenny::kubernetes::connect;
use podjenny::runner::Runner;
use podjenny::types::Podjenny;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    podjenny::logging::init(cli.verbose);

    // Printing the CRD needs no cluster
    let Some(walkthrough) = cli.command.walkthrough() else {
        print!("{}", Podjenny::crd_yaml()?);
        return Ok(());
    };

    let config = Config::from(&cli);
    info!("Running in namespace {}", config.namespace);

    let client = connect(config.kubeconfig.as_deref()).await?;
    info!("Connected to Kubernetes cluster");

    if config.assume_yes {
        Runner::new(client, config, AutoConfirm).run(walkthrough).await?;
    } else {
        Runner::new(client, config, Interactive::stdio())
            .run(walkthrough)
            .await?;
    }

    Ok(())
}
