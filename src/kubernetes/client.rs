use std::path::{Path, PathBuf};

use k8s_openapi::api::core::v1::Node;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config, api::ListParams};
use tracing::{debug, info, warn};

use super::error::{NodeSourceError, NodeSourceResult};
use super::node::NodeRecord;

/// Page size for paginated node list requests
const PAGE_SIZE: u32 = 500;

/// How to reach the cluster
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    /// Explicit kubeconfig file; falls back to `KUBECONFIG` / `~/.kube/config`
    pub kubeconfig: Option<PathBuf>,
    /// Kubeconfig context; falls back to the current context
    pub context: Option<String>,
}

/// Connected handle for listing cluster nodes
///
/// Created once by [`NodeSource::connect`] and borrowed by every
/// [`NodeSource::fetch_nodes`] call. The caller owns its lifetime.
pub struct NodeSource {
    client: Client,
    cluster: String,
}

impl NodeSource {
    /// Build a client from the local kubeconfig
    ///
    /// A missing kubeconfig location is only logged; the load is still
    /// attempted and fails on its own if there really are no credentials.
    pub async fn connect(options: &ConnectOptions) -> NodeSourceResult<Self> {
        let expected = options
            .kubeconfig
            .clone()
            .or_else(default_kube_dir)
            .unwrap_or_else(|| PathBuf::from(".kube"));
        if let Err(e) = check_kubeconfig(&expected) {
            warn!(error = %e, "Kube config not found!");
        }

        let kube_options = KubeConfigOptions {
            context: options.context.clone(),
            ..Default::default()
        };

        let config = match &options.kubeconfig {
            Some(path) => {
                let kubeconfig = Kubeconfig::read_from(path)?;
                Config::from_custom_kubeconfig(kubeconfig, &kube_options).await?
            }
            None => Config::from_kubeconfig(&kube_options).await?,
        };

        let cluster = config.cluster_url.to_string();
        info!(context = ?options.context, cluster = %cluster, "Connecting to Kubernetes");

        let client = Client::try_from(config)?;
        Ok(Self { client, cluster })
    }

    /// List every node in the cluster as a [`NodeRecord`]
    ///
    /// Fails with [`NodeSourceError::EmptyCluster`] when the cluster reports no
    /// nodes and [`NodeSourceError::MissingAddress`] when a node has no
    /// internal IP. API errors are returned as-is, without retries.
    pub async fn fetch_nodes(&self) -> NodeSourceResult<Vec<NodeRecord>> {
        let api: Api<Node> = Api::all(self.client.clone());
        let nodes = self.list_all(&api).await?;
        records_from_nodes(nodes)
    }

    /// List nodes with pagination, following continue tokens
    async fn list_all(&self, api: &Api<Node>) -> NodeSourceResult<Vec<Node>> {
        let mut all_items: Vec<Node> = Vec::new();
        let mut continue_token: Option<String> = None;
        let mut page_count = 0u32;

        loop {
            let mut params = ListParams::default().limit(PAGE_SIZE);
            if let Some(ref token) = continue_token {
                params = params.continue_token(token);
            }

            let list = api.list(&params).await?;
            let items_count = list.items.len();
            all_items.extend(list.items);
            page_count += 1;

            match list.metadata.continue_ {
                Some(token) if !token.is_empty() => {
                    debug!(
                        cluster = %self.cluster,
                        page = page_count,
                        items_this_page = items_count,
                        total_so_far = all_items.len(),
                        "Fetched node page, continuing"
                    );
                    continue_token = Some(token);
                }
                _ => break,
            }
        }

        debug!(
            cluster = %self.cluster,
            pages = page_count,
            total_items = all_items.len(),
            "Node listing complete"
        );

        Ok(all_items)
    }
}

/// `~/.kube`, the conventional kubeconfig directory
pub fn default_kube_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".kube"))
}

/// Check that a kubeconfig file or directory exists at `path`
pub fn check_kubeconfig(path: &Path) -> NodeSourceResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(NodeSourceError::Configuration {
            path: path.to_path_buf(),
        })
    }
}

/// Convert raw API nodes into records, rejecting an empty cluster
pub fn records_from_nodes(nodes: Vec<Node>) -> NodeSourceResult<Vec<NodeRecord>> {
    if nodes.is_empty() {
        return Err(NodeSourceError::EmptyCluster);
    }

    let records = nodes
        .into_iter()
        .map(NodeRecord::try_from)
        .collect::<NodeSourceResult<Vec<_>>>()?;

    info!(count = records.len(), "Fetched cluster nodes");
    Ok(records)
}
