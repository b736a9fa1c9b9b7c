// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Field manager used for server-side apply
pub const FIELD_MANAGER: &str = "podjenny";

/// Namespace used when none is given on the command line
pub const DEFAULT_NAMESPACE: &str = "default";

/// Names and values of the booklist workload
pub mod workload {
    pub const NAME: &str = "booklistkube-client";
    pub const APP_LABEL: &str = "app";
    pub const IMAGE: &str = "kfoozminus/booklist:alpine";
    pub const UPDATED_IMAGE: &str = "kfoozminus/booklist:ubuntu";
    pub const INITIAL_REPLICAS: i32 = 3;
    pub const PATCHED_REPLICAS: i32 = 4;
    pub const UPDATED_REPLICAS: i32 = 5;

    pub const CONTAINER_PORT_NAME: &str = "exposedc";
    pub const CONTAINER_PORT: i32 = 4321;
    pub const SERVICE_PORT_NAME: &str = "exposeds";
    pub const SERVICE_PORT: i32 = 1234;
    pub const PATCHED_SERVICE_PORT: i32 = 2345;
}

/// Persistent storage backing the booklist workload
pub mod storage {
    pub const VOLUME_NAME: &str = "task-pv-volume-client";
    pub const CLAIM_NAME: &str = "task-pv-claim-client";
    pub const MOUNT_NAME: &str = "task-pv-storage-client";
    pub const MOUNT_PATH: &str = "/etc/pvc";
    pub const HOST_PATH: &str = "/mnt/data";
    pub const STORAGE_CLASS: &str = "manual";
    pub const VOLUME_CAPACITY: &str = "10Gi";
    pub const CLAIM_REQUEST: &str = "3Gi";
}

/// Conflict retry defaults, matching the usual client default of
/// five attempts 10ms apart
pub mod retry {
    pub const STEPS: u32 = 5;
    pub const INITIAL_DELAY_MS: u64 = 10;
    pub const FACTOR: f64 = 1.0;
}

/// Timeouts for the optional wait steps
pub mod wait {
    pub const TIMEOUT_SECS: u64 = 60;
}
