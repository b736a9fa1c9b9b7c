// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes plumbing: client creation, CRD installation and the generic
//! resource operations the scenarios are built from.

pub mod client;
pub mod crd;
pub mod patch;
pub mod resources;
pub mod retry;

pub use client::connect;
pub use crd::install_podjenny_crd;
pub use resources::{
    create, create_or_patch, delete, get, list, update_with_retry, wait_deleted, DemoResource,
    ResourceHandle, Verb,
};
pub use retry::RetryPolicy;
