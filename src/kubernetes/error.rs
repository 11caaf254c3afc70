// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for node source operations
pub type NodeSourceResult<T> = Result<T, NodeSourceError>;

/// Errors raised while connecting to a cluster or reading its nodes
#[derive(Error, Debug)]
pub enum NodeSourceError {
    /// No local kubeconfig at the expected location. Logged, not fatal.
    #[error("Kube config not found at {}", path.display())]
    Configuration { path: PathBuf },

    #[error("No worker nodes exist for the given kube config")]
    EmptyCluster,

    #[error("Node '{node}' has no InternalIP address")]
    MissingAddress { node: String },

    #[error("Failed to load kubeconfig: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    #[error("K8s API error: {0}")]
    Kube(#[from] kube::Error),
}
