// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod cli;
pub mod config;
pub mod confirm;
pub mod constants;
pub mod error;
pub mod kubernetes;
pub mod logging;
pub mod runner;
pub mod specs;
pub mod types;

#[cfg(test)]
pub mod test_utils;
