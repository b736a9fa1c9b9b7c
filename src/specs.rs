// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource descriptors and the objects built from them

use crate::constants::{storage, workload};
use crate::types::{Podjenny, PodjennySpec};
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    Container, ContainerPort, HostPathVolumeSource, PersistentVolume, PersistentVolumeClaim,
    PersistentVolumeClaimSpec, PersistentVolumeClaimVolumeSource, PersistentVolumeSpec, PodSpec,
    PodTemplateSpec, Service, ServicePort, ServiceSpec, Volume, VolumeMount,
    VolumeResourceRequirements,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::api::ObjectMeta;
use kube::ResourceExt;
use std::collections::BTreeMap;

/// A named container port, exposed through a service port of its own
#[derive(Debug, Clone, PartialEq)]
pub struct PortSpec {
    pub name: String,
    pub container_port: i32,
    pub service_name: String,
    pub service_port: i32,
}

/// A volume mounted from a persistent volume claim
#[derive(Debug, Clone, PartialEq)]
pub struct MountSpec {
    pub name: String,
    pub mount_path: String,
    pub claim_name: String,
}

/// Describes a workload to submit. The same descriptor yields the
/// Deployment, the Service in front of it and the Podjenny variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSpec {
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub image: String,
    pub ports: Vec<PortSpec>,
    pub volume_mounts: Vec<MountSpec>,
    pub replicas: i32,
}

impl ResourceSpec {
    pub fn new(name: &str, namespace: &str, image: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            labels: BTreeMap::from([(workload::APP_LABEL.to_string(), name.to_string())]),
            image: image.to_string(),
            ports: Vec::new(),
            volume_mounts: Vec::new(),
            replicas: 1,
        }
    }

    pub fn with_replicas(mut self, replicas: i32) -> Self {
        self.replicas = replicas;
        self
    }

    pub fn with_port(mut self, port: PortSpec) -> Self {
        self.ports.push(port);
        self
    }

    pub fn with_volume_mount(mut self, mount: MountSpec) -> Self {
        self.volume_mounts.push(mount);
        self
    }

    /// The booklist client workload
    pub fn booklist_client(namespace: &str) -> Self {
        Self::new(workload::NAME, namespace, workload::IMAGE)
            .with_replicas(workload::INITIAL_REPLICAS)
            .with_port(PortSpec {
                name: workload::CONTAINER_PORT_NAME.to_string(),
                container_port: workload::CONTAINER_PORT,
                service_name: workload::SERVICE_PORT_NAME.to_string(),
                service_port: workload::SERVICE_PORT,
            })
            .with_volume_mount(MountSpec {
                name: storage::MOUNT_NAME.to_string(),
                mount_path: storage::MOUNT_PATH.to_string(),
                claim_name: storage::CLAIM_NAME.to_string(),
            })
    }

    pub fn metadata(&self) -> ObjectMeta {
        ObjectMeta {
            name: Some(self.name.clone()),
            namespace: Some(self.namespace.clone()),
            labels: Some(self.labels.clone()),
            ..Default::default()
        }
    }

    fn container(&self) -> Container {
        let ports: Vec<ContainerPort> = self
            .ports
            .iter()
            .map(|p| ContainerPort {
                name: Some(p.name.clone()),
                container_port: p.container_port,
                protocol: Some("TCP".to_string()),
                ..Default::default()
            })
            .collect();
        let volume_mounts: Vec<VolumeMount> = self
            .volume_mounts
            .iter()
            .map(|m| VolumeMount {
                name: m.name.clone(),
                mount_path: m.mount_path.clone(),
                ..Default::default()
            })
            .collect();

        Container {
            name: self.name.clone(),
            image: Some(self.image.clone()),
            image_pull_policy: Some("IfNotPresent".to_string()),
            ports: (!ports.is_empty()).then_some(ports),
            volume_mounts: (!volume_mounts.is_empty()).then_some(volume_mounts),
            ..Default::default()
        }
    }

    pub fn deployment(&self) -> Deployment {
        let volumes: Vec<Volume> = self
            .volume_mounts
            .iter()
            .map(|m| Volume {
                name: m.name.clone(),
                persistent_volume_claim: Some(PersistentVolumeClaimVolumeSource {
                    claim_name: m.claim_name.clone(),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .collect();

        Deployment {
            metadata: self.metadata(),
            spec: Some(DeploymentSpec {
                replicas: Some(self.replicas),
                selector: LabelSelector {
                    match_labels: Some(self.labels.clone()),
                    ..Default::default()
                },
                template: PodTemplateSpec {
                    metadata: Some(ObjectMeta {
                        name: Some(self.name.clone()),
                        labels: Some(self.labels.clone()),
                        ..Default::default()
                    }),
                    spec: Some(PodSpec {
                        containers: vec![self.container()],
                        restart_policy: Some("Always".to_string()),
                        volumes: (!volumes.is_empty()).then_some(volumes),
                        ..Default::default()
                    }),
                },
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// NodePort service targeting the named container ports
    pub fn service(&self) -> Service {
        let ports = self
            .ports
            .iter()
            .map(|p| ServicePort {
                name: Some(p.service_name.clone()),
                port: p.service_port,
                target_port: Some(IntOrString::String(p.name.clone())),
                ..Default::default()
            })
            .collect();

        Service {
            metadata: ObjectMeta {
                name: Some(self.name.clone()),
                namespace: Some(self.namespace.clone()),
                ..Default::default()
            },
            spec: Some(ServiceSpec {
                selector: Some(self.labels.clone()),
                ports: Some(ports),
                type_: Some("NodePort".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn podjenny(&self) -> Podjenny {
        Podjenny {
            metadata: self.metadata(),
            spec: PodjennySpec {
                image: self.image.clone(),
            },
        }
    }
}

/// Host path volume backing the booklist claim
pub fn persistent_volume() -> PersistentVolume {
    PersistentVolume {
        metadata: ObjectMeta {
            name: Some(storage::VOLUME_NAME.to_string()),
            labels: Some(BTreeMap::from([("type".to_string(), "local".to_string())])),
            ..Default::default()
        },
        spec: Some(PersistentVolumeSpec {
            storage_class_name: Some(storage::STORAGE_CLASS.to_string()),
            capacity: Some(BTreeMap::from([(
                "storage".to_string(),
                Quantity(storage::VOLUME_CAPACITY.to_string()),
            )])),
            access_modes: Some(vec!["ReadWriteOnce".to_string()]),
            persistent_volume_reclaim_policy: Some("Retain".to_string()),
            host_path: Some(HostPathVolumeSource {
                path: storage::HOST_PATH.to_string(),
                type_: Some("DirectoryOrCreate".to_string()),
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn persistent_volume_claim(namespace: &str) -> PersistentVolumeClaim {
    PersistentVolumeClaim {
        metadata: ObjectMeta {
            name: Some(storage::CLAIM_NAME.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        spec: Some(PersistentVolumeClaimSpec {
            storage_class_name: Some(storage::STORAGE_CLASS.to_string()),
            access_modes: Some(vec!["ReadWriteOnce".to_string()]),
            resources: Some(VolumeResourceRequirements {
                requests: Some(BTreeMap::from([(
                    "storage".to_string(),
                    Quantity(storage::CLAIM_REQUEST.to_string()),
                )])),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// One status line per persistent volume
pub fn describe_pv(pv: &PersistentVolume) -> String {
    let spec = pv.spec.clone().unwrap_or_default();
    let status = pv.status.clone().unwrap_or_default();

    let capacity = spec
        .capacity
        .as_ref()
        .and_then(|c| c.get("storage"))
        .map(|q| q.0.clone())
        .unwrap_or_default();
    let access_modes = spec.access_modes.unwrap_or_default().join(" ");
    let claim = spec
        .claim_ref
        .and_then(|c| c.name)
        .unwrap_or_else(|| "None".to_string());

    format!(
        "Persistent Volume - Name {} - Capacity {} - AccessModes [{}] - ReclaimPolicy {} - Status {} - Claim {} - StorageClass {} - Reason {}",
        pv.name_any(),
        capacity,
        access_modes,
        spec.persistent_volume_reclaim_policy.unwrap_or_default(),
        status.phase.unwrap_or_default(),
        claim,
        spec.storage_class_name.unwrap_or_default(),
        status.reason.unwrap_or_default()
    )
}

/// Mutable access to the first container of a pod template
pub fn first_container(deployment: &mut Deployment) -> Option<&mut Container> {
    deployment
        .spec
        .as_mut()?
        .template
        .spec
        .as_mut()?
        .containers
        .first_mut()
}
