// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Step-by-step walkthroughs against a live cluster.
//!
//! Every step waits on the confirmation gate, performs one call and prints a
//! status line to stdout. The first failing call ends the walkthrough and
//! its error is returned; objects created before that point are left in
//! place.

use crate::cli::Walkthrough;
use crate::confirm::Confirm;
use crate::config::Config;
use crate::constants::{storage, workload};
use crate::error::Result;
use crate::kubernetes::{
    create, create_or_patch, delete, install_podjenny_crd, list, update_with_retry, wait_deleted,
    DemoResource, ResourceHandle,
};
use crate::specs::{
    describe_pv, first_container, persistent_volume, persistent_volume_claim, ResourceSpec,
};
use crate::types::Podjenny;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{PersistentVolume, PersistentVolumeClaim, Service};
use kube::{
    api::{DeleteParams, ListParams},
    Api, Client, ResourceExt,
};
use tracing::{info, instrument};

pub struct Runner<C> {
    client: Client,
    config: Config,
    confirm: C,
}

impl<C: Confirm> Runner<C> {
    pub fn new(client: Client, config: Config, confirm: C) -> Self {
        Self {
            client,
            config,
            confirm,
        }
    }

    /// Run the walkthrough selected on the command line
    pub async fn run(&mut self, walkthrough: Walkthrough) -> Result<()> {
        match walkthrough {
            Walkthrough::Workloads { with_service } => self.run_workloads(with_service).await,
            Walkthrough::Podjenny { install_crd } => self.run_podjenny(install_crd).await,
        }
    }

    async fn step(&mut self, title: &str) -> Result<()> {
        self.confirm.confirm().await?;
        println!("{}", title);
        Ok(())
    }

    fn namespaced<K: DemoResource>(&self) -> Api<K>
    where
        K: kube::Resource<Scope = k8s_openapi::NamespaceResourceScope>,
    {
        Api::namespaced(self.client.clone(), &self.config.namespace)
    }

    async fn remove<K: DemoResource>(&self, api: &Api<K>, handle: &ResourceHandle) -> Result<()> {
        delete(api, &handle.name, &DeleteParams::foreground()).await?;
        if self.config.wait_for_deletion {
            wait_deleted(api, &handle.name, &handle.uid, self.config.wait_timeout).await?;
        }
        println!("Deleted {}", handle.kind);
        Ok(())
    }

    /// Storage, Deployment and (optionally) Service walkthrough
    #[instrument(skip(self), fields(namespace = %self.config.namespace))]
    pub async fn run_workloads(&mut self, with_service: bool) -> Result<()> {
        let pvs: Api<PersistentVolume> = Api::all(self.client.clone());
        let pvcs: Api<PersistentVolumeClaim> = self.namespaced();
        let deployments: Api<Deployment> = self.namespaced();
        let services: Api<Service> = self.namespaced();

        let spec = ResourceSpec::booklist_client(&self.config.namespace);

        self.step("Creating PersistentVolume...").await?;
        let pv = create(&pvs, &persistent_volume()).await?;
        println!("Created PersistentVolume - {}", pv);

        self.step("Creating PersistentVolumeClaim...").await?;
        let pvc = create(&pvcs, &persistent_volume_claim(&self.config.namespace)).await?;
        println!("Created PersistentVolumeClaim - {}", pvc);

        self.step("Creating Deployment...").await?;
        let deployment = create(&deployments, &spec.deployment()).await?;
        println!("Created Deployment - {}", deployment);

        let service = if with_service {
            self.step("Creating Service...").await?;
            let service = spec.service();
            let created = create(&services, &service).await?;
            println!("Created Service - {}", created);

            self.step("Patching Service...").await?;
            let (patched, verb) = create_or_patch(&services, &service.metadata, |mut svc: Service| {
                if let Some(port) = svc
                    .spec
                    .as_mut()
                    .and_then(|s| s.ports.as_mut())
                    .and_then(|ports| ports.first_mut())
                {
                    port.port = workload::PATCHED_SERVICE_PORT;
                }
                svc
            })
            .await?;
            println!("{} - {}", verb, ResourceHandle::of(&patched));
            Some(created)
        } else {
            info!("Skipping Service steps");
            None
        };

        self.step("Patching Deployment...").await?;
        let (patched, verb) =
            create_or_patch(&deployments, &spec.metadata(), |mut d: Deployment| {
                d.spec.get_or_insert_with(Default::default).replicas =
                    Some(workload::PATCHED_REPLICAS);
                d
            })
            .await?;
        println!("{} - {}", verb, ResourceHandle::of(&patched));

        self.step("Updating Deployment...").await?;
        let updated = update_with_retry(&deployments, &spec.name, &self.config.retry, |d| {
            if let Some(spec) = d.spec.as_mut() {
                spec.replicas = Some(workload::UPDATED_REPLICAS);
            }
            if let Some(container) = first_container(d) {
                container.image = Some(workload::UPDATED_IMAGE.to_string());
            }
        })
        .await?;
        println!("Updated Deployment - {}", ResourceHandle::of(&updated));

        self.step("Listing PVs...").await?;
        for item in list(&pvs, &ListParams::default()).await? {
            println!("{}", describe_pv(&item));
        }

        self.step("Deleting All the objects...").await?;
        self.remove(&deployments, &deployment).await?;
        self.remove(&pvcs, &pvc).await?;
        self.remove(&pvs, &pv).await?;
        if let Some(service) = service {
            self.remove(&services, &service).await?;
        }

        info!("Workloads walkthrough finished");
        Ok(())
    }

    /// Podjenny custom resource walkthrough
    #[instrument(skip(self), fields(namespace = %self.config.namespace))]
    pub async fn run_podjenny(&mut self, install_crd: bool) -> Result<()> {
        if install_crd {
            self.step("Installing Podjenny CRD...").await?;
            install_podjenny_crd(&self.client, self.config.wait_timeout).await?;
            println!("Podjenny CRD established");
        }

        let podjennies: Api<Podjenny> = self.namespaced();
        let spec = ResourceSpec::new(workload::NAME, &self.config.namespace, workload::IMAGE);

        self.step("Creating Podjenny...").await?;
        let created = create(&podjennies, &spec.podjenny()).await?;
        println!("Created Podjenny - {}", created);

        self.step("Patching Podjenny...").await?;
        let (patched, verb) = create_or_patch(&podjennies, &spec.metadata(), |mut pj: Podjenny| {
            pj.labels_mut()
                .insert("mount".to_string(), storage::MOUNT_NAME.to_string());
            pj
        })
        .await?;
        println!("{} - {}", verb, ResourceHandle::of(&patched));

        self.step("Updating Podjenny...").await?;
        let updated = update_with_retry(&podjennies, &spec.name, &self.config.retry, |pj| {
            pj.spec.image = workload::UPDATED_IMAGE.to_string();
        })
        .await?;
        println!("Updated Podjenny - {}", ResourceHandle::of(&updated));

        self.step("Listing Podjennies...").await?;
        for item in list(&podjennies, &ListParams::default()).await? {
            println!("{}", item.describe());
        }

        self.step("Deleting Podjenny...").await?;
        self.remove(&podjennies, &created).await?;

        info!("Podjenny walkthrough finished");
        Ok(())
    }
}
