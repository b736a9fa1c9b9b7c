// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resource types owned by this crate.

pub mod podjenny;

pub use podjenny::{Podjenny, PodjennySpec};
