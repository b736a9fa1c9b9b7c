// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Podjenny CRD installation

use crate::constants::FIELD_MANAGER;
use crate::error::{DemoError, Result};
use crate::types::Podjenny;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{
    api::{Patch, PatchParams},
    Api, Client, CustomResourceExt, ResourceExt,
};
use kube_runtime::wait::{await_condition, conditions};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, instrument};

/// Server-side apply the Podjenny CRD and wait until the API server
/// reports it as established.
#[instrument(skip(client))]
pub async fn install_podjenny_crd(client: &Client, limit: Duration) -> Result<()> {
    let crds: Api<CustomResourceDefinition> = Api::all(client.clone());
    let crd = Podjenny::crd();
    let name = crd.name_any();

    info!("Applying CRD {}", name);
    crds.patch(
        &name,
        &PatchParams::apply(FIELD_MANAGER).force(),
        &Patch::Apply(&crd),
    )
    .await?;

    let established = await_condition(crds, &name, conditions::is_crd_established());
    timeout(limit, established)
        .await
        .map_err(|_| DemoError::Timeout(format!("CRD {} to be established", name)))?
        .map_err(|e| DemoError::WaitError(e.to_string()))?;

    info!("CRD {} is established", name);
    Ok(())
}
