// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::{CustomResource, CustomResourceExt, ResourceExt};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(
    group = "corejenny.kfoozminus.com",
    version = "v1",
    kind = "Podjenny",
    plural = "podjennies",
    shortname = "pj"
)]
#[kube(namespaced)]
#[kube(derive = "Default")]
#[kube(derive = "PartialEq")]
#[serde(rename_all = "camelCase")]
pub struct PodjennySpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,
}

impl Podjenny {
    /// One status line for listings
    pub fn describe(&self) -> String {
        let image = if self.spec.image.is_empty() {
            "None"
        } else {
            self.spec.image.as_str()
        };
        format!(
            "Podjenny - Name {} - Namespace {} - Image {}",
            self.name_any(),
            self.namespace().unwrap_or_default(),
            image
        )
    }

    /// Render the CustomResourceDefinition for this type as YAML
    pub fn crd_yaml() -> Result<String> {
        Ok(serde_yaml::to_string(&Podjenny::crd())?)
    }
}
