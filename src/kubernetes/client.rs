// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster connection: builds the one client shared by every step

use crate::error::{DemoError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Create a Kubernetes client, either from an explicit kubeconfig file or
/// from the inferred environment (`KUBECONFIG`, `~/.kube/config`, in-cluster)
#[instrument]
pub async fn connect(kubeconfig: Option<&Path>) -> Result<Client> {
    let config = match kubeconfig {
        Some(path) => {
            info!("Loading kubeconfig from {}", path.display());
            let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
                DemoError::KubeconfigError(format!(
                    "Failed to read kubeconfig {}: {}",
                    path.display(),
                    e
                ))
            })?;
            config_from_kubeconfig(&contents).await?
        }
        None => {
            debug!("No kubeconfig path given, inferring configuration");
            KConfig::infer()
                .await
                .map_err(|e| DemoError::KubeconfigError(format!("Failed to infer config: {}", e)))?
        }
    };

    info!("Using cluster {}", config.cluster_url);

    Client::try_from(config)
        .map_err(|e| DemoError::KubeconfigError(format!("Failed to create client: {}", e)))
}

/// Build a client configuration from kubeconfig contents
async fn config_from_kubeconfig(kubeconfig: &str) -> Result<KConfig> {
    let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(kubeconfig)
        .map_err(|e| DemoError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))?;

    KConfig::from_custom_kubeconfig(kubeconfig_parsed, &KubeConfigOptions::default())
        .await
        .map_err(|e| DemoError::KubeconfigError(format!("Failed to create config: {}", e)))
}
