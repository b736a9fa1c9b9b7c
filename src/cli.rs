// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::{retry, wait, DEFAULT_NAMESPACE};

#[derive(Debug, Parser)]
#[command(
    name = "podjenny",
    version,
    about = "Walks Podjenny custom resources and booklist workloads through create, patch, update, list and delete"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the kubeconfig file (inferred when omitted)
    #[arg(long, global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// Namespace to create resources in
    #[arg(short = 'n', long, global = true, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Run every step without waiting for Enter
    #[arg(short = 'y', long, global = true, default_value_t = false)]
    pub yes: bool,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Attempts made by an update before giving up on conflicts
    #[arg(long, global = true, default_value_t = retry::STEPS)]
    pub retry_steps: u32,

    /// Wait for deleted objects to disappear from the cluster
    #[arg(long, global = true, default_value_t = false)]
    pub wait_deletion: bool,

    /// Timeout for deletion and CRD establishment waits
    #[arg(long, global = true, default_value_t = wait::TIMEOUT_SECS)]
    pub wait_timeout_secs: u64,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Deployment, Service and persistent storage walkthrough
    Workloads {
        /// Leave the Service out of the walkthrough
        #[arg(long, default_value_t = false)]
        skip_service: bool,
    },

    /// Podjenny custom resource walkthrough
    Podjenny {
        /// Apply the Podjenny CRD before starting
        #[arg(long, default_value_t = false)]
        install_crd: bool,
    },

    /// Print the Podjenny CustomResourceDefinition as YAML
    Crd,
}

/// A walkthrough that runs against the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walkthrough {
    Workloads { with_service: bool },
    Podjenny { install_crd: bool },
}

impl Command {
    /// The cluster walkthrough for this command; `None` for commands that
    /// run offline
    pub fn walkthrough(&self) -> Option<Walkthrough> {
        match *self {
            Command::Workloads { skip_service } => Some(Walkthrough::Workloads {
                with_service: !skip_service,
            }),
            Command::Podjenny { install_crd } => Some(Walkthrough::Podjenny { install_crd }),
            Command::Crd => None,
        }
    }
}
