// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create, patch, update, list and delete calls shared by every scenario

use crate::error::{DemoError, Result};
use crate::kubernetes::patch::merge_patch;
use crate::kubernetes::retry::RetryPolicy;
use http::StatusCode;
use kube::{
    api::{DeleteParams, ListParams, ObjectMeta, Patch, PatchParams, PostParams},
    Api, Resource, ResourceExt,
};
use kube_runtime::wait::{await_condition, conditions};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, instrument, warn};

/// Bounds every resource handled by the demo operations
pub trait DemoResource:
    Resource<DynamicType = ()> + Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<K> DemoResource for K where
    K: Resource<DynamicType = ()>
        + Clone
        + Debug
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static
{
}

/// Name and server-assigned identifier of a submitted object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
    pub kind: String,
    pub name: String,
    pub uid: String,
}

impl ResourceHandle {
    pub fn of<K: DemoResource>(obj: &K) -> Self {
        Self {
            kind: K::kind(&()).to_string(),
            name: obj.name_any(),
            uid: obj.uid().unwrap_or_default(),
        }
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {:?}, UID: {:?}", self.name, self.uid)
    }
}

/// What `create_or_patch` ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Created,
    Patched,
    Unchanged,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Created => write!(f, "Created"),
            Verb::Patched => write!(f, "Patched"),
            Verb::Unchanged => write!(f, "Unchanged"),
        }
    }
}

fn is_api_error(err: &kube::Error, status: StatusCode, reason: &str) -> bool {
    matches!(err, kube::Error::Api(e) if e.code == status.as_u16() && e.reason == reason)
}

/// Write rejected because the object changed since it was read
pub fn is_conflict(err: &kube::Error) -> bool {
    is_api_error(err, StatusCode::CONFLICT, "Conflict")
}

pub fn is_already_exists(err: &kube::Error) -> bool {
    is_api_error(err, StatusCode::CONFLICT, "AlreadyExists")
}

pub fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(e) if e.code == StatusCode::NOT_FOUND.as_u16())
}

fn classify<K: DemoResource>(err: kube::Error, name: &str) -> DemoError {
    let kind = K::kind(&()).to_string();
    let name = name.to_string();
    if is_already_exists(&err) {
        DemoError::AlreadyExists { kind, name }
    } else if is_not_found(&err) {
        DemoError::NotFound { kind, name }
    } else {
        DemoError::KubeError(err)
    }
}

/// Submit a new object
#[instrument(skip(api, obj), fields(kind = %K::kind(&()), name = %obj.name_any()))]
pub async fn create<K: DemoResource>(api: &Api<K>, obj: &K) -> Result<ResourceHandle> {
    let name = obj.name_any();
    let created = api
        .create(&PostParams::default(), obj)
        .await
        .map_err(|e| classify::<K>(e, &name))?;

    debug!("{} {} created", K::kind(&()), name);
    Ok(ResourceHandle::of(&created))
}

/// Fetch an object by name
pub async fn get<K: DemoResource>(api: &Api<K>, name: &str) -> Result<K> {
    api.get(name).await.map_err(|e| classify::<K>(e, name))
}

/// Create the object described by `meta` if it is missing, otherwise patch
/// the fields changed by `transform`.
///
/// On create, `transform` receives a default object carrying `meta`. On
/// patch, it receives the stored object and only the difference between
/// the two is sent, as a JSON merge patch.
#[instrument(skip(api, meta, transform), fields(kind = %K::kind(&()), name = ?meta.name))]
pub async fn create_or_patch<K, F>(api: &Api<K>, meta: &ObjectMeta, transform: F) -> Result<(K, Verb)>
where
    K: DemoResource + Default,
    F: FnOnce(K) -> K,
{
    let Some(name) = meta.name.as_deref() else {
        return Err(DemoError::SerializationError(format!(
            "{} metadata has no name",
            K::kind(&())
        )));
    };

    let Some(current) = api.get_opt(name).await? else {
        let mut fresh = K::default();
        *fresh.meta_mut() = meta.clone();
        let desired = transform(fresh);

        let created = api
            .create(&PostParams::default(), &desired)
            .await
            .map_err(|e| classify::<K>(e, name))?;
        info!("{} {} did not exist, created it", K::kind(&()), name);
        return Ok((created, Verb::Created));
    };

    let modified = transform(current.clone());
    let patch = merge_patch(
        &serde_json::to_value(&current)?,
        &serde_json::to_value(&modified)?,
    );

    let Some(patch) = patch else {
        debug!("{} {} already up to date", K::kind(&()), name);
        return Ok((current, Verb::Unchanged));
    };

    debug!("Patching {} {} with {}", K::kind(&()), name, patch);
    let patched = api
        .patch(name, &PatchParams::default(), &Patch::Merge(&patch))
        .await
        .map_err(|e| classify::<K>(e, name))?;

    Ok((patched, Verb::Patched))
}

/// Fetch, mutate and replace an object, starting over from a fresh read
/// whenever the write hits an optimistic concurrency conflict.
///
/// Gives up with `ConflictRetriesExhausted` once `policy.steps` attempts
/// have conflicted. Read failures and other write errors end the update
/// immediately.
#[instrument(skip(api, policy, mutate), fields(kind = %K::kind(&())))]
pub async fn update_with_retry<K, F>(
    api: &Api<K>,
    name: &str,
    policy: &RetryPolicy,
    mut mutate: F,
) -> Result<K>
where
    K: DemoResource,
    F: FnMut(&mut K),
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        let mut latest = get(api, name).await?;
        mutate(&mut latest);

        match api.replace(name, &PostParams::default(), &latest).await {
            Ok(updated) => {
                debug!("{} {} updated on attempt {}", K::kind(&()), name, attempt);
                return Ok(updated);
            }
            Err(e) if is_conflict(&e) => {
                if attempt >= policy.steps {
                    return Err(DemoError::ConflictRetriesExhausted {
                        kind: K::kind(&()).to_string(),
                        name: name.to_string(),
                        attempts: attempt,
                    });
                }
                let delay = policy.delay_after(attempt);
                warn!(
                    "Conflict updating {} {} (attempt {}/{}), retrying in {:?}",
                    K::kind(&()),
                    name,
                    attempt,
                    policy.steps,
                    delay
                );
                sleep(delay).await;
            }
            Err(e) => return Err(classify::<K>(e, name)),
        }
    }
}

/// List every matching object
#[instrument(skip(api, lp), fields(kind = %K::kind(&())))]
pub async fn list<K: DemoResource>(api: &Api<K>, lp: &ListParams) -> Result<Vec<K>> {
    let items = api.list(lp).await?.items;
    debug!("Listed {} {} objects", items.len(), K::kind(&()));
    Ok(items)
}

/// Request deletion with the given propagation settings
#[instrument(skip(api, dp), fields(kind = %K::kind(&()), propagation = ?dp.propagation_policy))]
pub async fn delete<K: DemoResource>(api: &Api<K>, name: &str, dp: &DeleteParams) -> Result<()> {
    let response = api
        .delete(name, dp)
        .await
        .map_err(|e| classify::<K>(e, name))?;

    match response.left() {
        Some(obj) => debug!(
            "{} {} marked for deletion, finalizers: {:?}",
            K::kind(&()),
            name,
            obj.finalizers()
        ),
        None => debug!("{} {} deleted", K::kind(&()), name),
    }
    Ok(())
}

/// Wait until the object with the given uid is gone from the cluster.
///
/// With foreground propagation the owner only disappears once its
/// dependents have been removed, so this also covers the cascade.
#[instrument(skip(api), fields(kind = %K::kind(&())))]
pub async fn wait_deleted<K: DemoResource>(
    api: &Api<K>,
    name: &str,
    uid: &str,
    limit: Duration,
) -> Result<()> {
    let deleted = await_condition(api.clone(), name, conditions::is_deleted(uid));

    timeout(limit, deleted)
        .await
        .map_err(|_| DemoError::Timeout(format!("{} {} to be deleted", K::kind(&()), name)))?
        .map_err(|e| DemoError::WaitError(e.to_string()))?;

    info!("{} {} is gone", K::kind(&()), name);
    Ok(())
}
