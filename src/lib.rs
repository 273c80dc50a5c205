// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod kubeconfig;
pub mod metadata;
pub mod providers;

#[cfg(test)]
pub mod test_utils;
