// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A request as seen by the mock API server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

type Route = (String, String);

/// A mock HTTP service that returns scripted responses per method and path.
///
/// Each route holds a queue: responses are handed out in order and the last
/// one keeps being returned once the queue is drained. Every request is
/// recorded so tests can assert on the call sequence and payloads.
#[derive(Clone, Default)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<Route, VecDeque<(u16, String)>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
        self
    }

    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PATCH", path, status, body)
    }

    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    /// Serve a watch stream (newline separated watch events) for GET
    /// requests carrying `watch=true`. Without one, watches stay open and
    /// never produce an event.
    pub fn on_watch(self, path: &str, events: &str) -> Self {
        self.on("WATCH", path, 200, events)
    }

    /// Build a kube Client from this mock service; the mock stays usable for
    /// inspecting requests through its shared state
    pub fn client(&self) -> Client {
        Client::new(self.clone(), "default")
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests received for one method, in order
    pub fn requests_for(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }

    /// `METHOD path` for every request, handy for asserting call order
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    fn next_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let mut responses = self.responses.lock().unwrap();
        let queue = responses.get_mut(&(method.to_string(), path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let watch = req
            .uri()
            .query()
            .is_some_and(|q| q.split('&').any(|p| p == "watch=true"));
        let method = if watch {
            "WATCH".to_string()
        } else {
            req.method().to_string()
        };
        let path = req.uri().path().to_string();
        let content_type = req
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let response = self.next_response(&method, &path);
        let requests = self.requests.clone();

        Box::pin(async move {
            let bytes = req.into_body().collect().await?.to_bytes();
            requests.lock().unwrap().push(RecordedRequest {
                method,
                path: path.clone(),
                content_type,
                body: String::from_utf8_lossy(&bytes).to_string(),
            });

            let (status, body) = match response {
                Some(response) => response,
                None if watch => std::future::pending().await,
                None => (404, not_found_json("resource", &path)),
            };
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a failure Status response body
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    status_json(404, "NotFound", &format!("{} \"{}\" not found", resource, name))
}

/// Create a 409 already exists response
pub fn already_exists_json(resource: &str, name: &str) -> String {
    status_json(
        409,
        "AlreadyExists",
        &format!("{} \"{}\" already exists", resource, name),
    )
}

/// Create a 409 optimistic concurrency conflict response
pub fn conflict_json(resource: &str, name: &str) -> String {
    status_json(
        409,
        "Conflict",
        &format!(
            "Operation cannot be fulfilled on {} \"{}\": the object has been modified; please apply your changes to the latest version and try again",
            resource, name
        ),
    )
}

/// Create a success Status response, as returned by some deletes
pub fn success_status_json() -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Success"
    })
    .to_string()
}

/// Create a mock Deployment JSON response
pub fn deployment_json(name: &str, replicas: i32, image: &str, resource_version: &str) -> String {
    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {
            "name": name,
            "namespace": "default",
            "uid": format!("{}-uid", name),
            "resourceVersion": resource_version,
            "labels": {"app": name}
        },
        "spec": {
            "replicas": replicas,
            "selector": {"matchLabels": {"app": name}},
            "template": {
                "metadata": {"labels": {"app": name}},
                "spec": {
                    "containers": [{"name": name, "image": image}]
                }
            }
        }
    })
    .to_string()
}

/// Create a mock DeploymentList JSON response
pub fn deployment_list_json(items: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "DeploymentList",
        "metadata": {"resourceVersion": "10"},
        "items": items
    })
    .to_string()
}

/// Create one line of a watch stream
pub fn watch_event_json(event_type: &str, object: serde_json::Value) -> String {
    format!(
        "{}\n",
        serde_json::json!({"type": event_type, "object": object})
    )
}

/// Create a mock Service JSON response
pub fn service_json(name: &str, port: i32) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Service",
        "metadata": {
            "name": name,
            "namespace": "default",
            "uid": format!("{}-svc-uid", name),
            "resourceVersion": "1"
        },
        "spec": {
            "selector": {"app": name},
            "ports": [{"name": "exposeds", "port": port, "targetPort": "exposedc"}],
            "type": "NodePort"
        }
    })
    .to_string()
}

/// Create a mock PersistentVolume JSON object
pub fn pv_value(name: &str, claim: Option<&str>) -> serde_json::Value {
    let mut pv = serde_json::json!({
        "apiVersion": "v1",
        "kind": "PersistentVolume",
        "metadata": {"name": name, "uid": format!("{}-uid", name)},
        "spec": {
            "capacity": {"storage": "10Gi"},
            "accessModes": ["ReadWriteOnce"],
            "persistentVolumeReclaimPolicy": "Retain",
            "storageClassName": "manual",
            "hostPath": {"path": "/mnt/data"}
        },
        "status": {"phase": "Available"}
    });
    if let Some(claim) = claim {
        pv["spec"]["claimRef"] = serde_json::json!({"name": claim, "namespace": "default"});
        pv["status"]["phase"] = serde_json::json!("Bound");
    }
    pv
}

/// Create a mock PersistentVolume JSON response
pub fn pv_json(name: &str) -> String {
    pv_value(name, None).to_string()
}

/// Create a mock PersistentVolumeList JSON response
pub fn pv_list_json(items: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "PersistentVolumeList",
        "metadata": {"resourceVersion": "1"},
        "items": items
    })
    .to_string()
}

/// Create a mock PersistentVolumeClaimList JSON response
pub fn pvc_list_json(items: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "PersistentVolumeClaimList",
        "metadata": {"resourceVersion": "1"},
        "items": items
    })
    .to_string()
}

/// Create a mock PersistentVolumeClaim JSON response
pub fn pvc_json(name: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "PersistentVolumeClaim",
        "metadata": {
            "name": name,
            "namespace": "default",
            "uid": format!("{}-uid", name)
        },
        "spec": {
            "accessModes": ["ReadWriteOnce"],
            "storageClassName": "manual",
            "resources": {"requests": {"storage": "3Gi"}}
        }
    })
    .to_string()
}

/// Create a mock Podjenny JSON object
pub fn podjenny_value(name: &str, image: &str, resource_version: &str) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "corejenny.kfoozminus.com/v1",
        "kind": "Podjenny",
        "metadata": {
            "name": name,
            "namespace": "default",
            "uid": format!("{}-uid", name),
            "resourceVersion": resource_version,
            "labels": {"app": name}
        },
        "spec": {"image": image}
    })
}

/// Create a mock Podjenny JSON response
pub fn podjenny_json(name: &str, image: &str, resource_version: &str) -> String {
    podjenny_value(name, image, resource_version).to_string()
}

/// Create a mock PodjennyList JSON response
pub fn podjenny_list_json(items: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "apiVersion": "corejenny.kfoozminus.com/v1",
        "kind": "PodjennyList",
        "metadata": {"resourceVersion": "1"},
        "items": items
    })
    .to_string()
}

/// API paths used across tests
pub mod paths {
    pub const DEPLOYMENTS: &str = "/apis/apps/v1/namespaces/default/deployments";
    pub const SERVICES: &str = "/api/v1/namespaces/default/services";
    pub const PVS: &str = "/api/v1/persistentvolumes";
    pub const PVCS: &str = "/api/v1/namespaces/default/persistentvolumeclaims";
    pub const PODJENNIES: &str = "/apis/corejenny.kfoozminus.com/v1/namespaces/default/podjennies";
    pub const CRDS: &str = "/apis/apiextensions.k8s.io/v1/customresourcedefinitions";

    pub fn item(collection: &str, name: &str) -> String {
        format!("{}/{}", collection, name)
    }
}
