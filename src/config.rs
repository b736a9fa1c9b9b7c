// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::constants::{wait, DEFAULT_NAMESPACE};
use crate::kubernetes::RetryPolicy;

/// Runner configuration, resolved from the command line
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit kubeconfig; `None` infers the connection
    pub kubeconfig: Option<PathBuf>,
    pub namespace: String,
    /// Skip the confirmation gates
    pub assume_yes: bool,
    pub retry: RetryPolicy,
    /// Block after each delete until the object is gone
    pub wait_for_deletion: bool,
    pub wait_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            assume_yes: false,
            retry: RetryPolicy::default(),
            wait_for_deletion: false,
            wait_timeout: Duration::from_secs(wait::TIMEOUT_SECS),
        }
    }
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Self {
            kubeconfig: cli.kubeconfig.clone(),
            namespace: cli.namespace.clone(),
            assume_yes: cli.yes,
            retry: RetryPolicy::default().with_steps(cli.retry_steps),
            wait_for_deletion: cli.wait_deletion,
            wait_timeout: Duration::from_secs(cli.wait_timeout_secs),
        }
    }
}
