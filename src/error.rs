// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("{kind} {name:?} already exists")]
    AlreadyExists { kind: String, name: String },

    #[error("{kind} {name:?} not found")]
    NotFound { kind: String, name: String },

    #[error("Conflict while updating {kind} {name:?}, gave up after {attempts} attempts")]
    ConflictRetriesExhausted {
        kind: String,
        name: String,
        attempts: u32,
    },

    #[error("Timed out waiting for {0}")]
    Timeout(String),

    #[error("Wait failed: {0}")]
    WaitError(String),

    #[error("Serialization failed: {0}")]
    SerializationError(String),

    #[error("Confirmation failed: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for DemoError {
    fn from(e: serde_json::Error) -> Self {
        DemoError::SerializationError(e.to_string())
    }
}

impl From<serde_yaml::Error> for DemoError {
    fn from(e: serde_yaml::Error) -> Self {
        DemoError::SerializationError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DemoError>;
