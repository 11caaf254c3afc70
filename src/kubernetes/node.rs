// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Plain node records extracted from Kubernetes `Node` objects
//!
//! Only the fields needed for inventory grouping are kept: the node name,
//! its internal IP, and the label/annotation maps.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Node;

use super::error::NodeSourceError;

/// Address type used for intra-cluster reachability
pub const INTERNAL_IP: &str = "InternalIP";

/// A cluster node reduced to what the grouping strategies need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub name: String,
    pub internal_ip: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
}

#[cfg(test)]
impl NodeRecord {
    pub fn new(name: impl Into<String>, internal_ip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            internal_ip: internal_ip.into(),
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }
}

impl TryFrom<Node> for NodeRecord {
    type Error = NodeSourceError;

    /// Picks the first `InternalIP` address; a node without one is an error
    fn try_from(node: Node) -> Result<Self, Self::Error> {
        let name = node.metadata.name.unwrap_or_default();

        let internal_ip = node
            .status
            .and_then(|status| status.addresses)
            .unwrap_or_default()
            .into_iter()
            .find(|addr| addr.type_ == INTERNAL_IP)
            .map(|addr| addr.address)
            .ok_or_else(|| NodeSourceError::MissingAddress { node: name.clone() })?;

        Ok(Self {
            name,
            internal_ip,
            labels: node.metadata.labels.unwrap_or_default(),
            annotations: node.metadata.annotations.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{NodeAddress, NodeStatus};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn address(type_: &str, address: &str) -> NodeAddress {
        NodeAddress {
            address: address.to_string(),
            type_: type_.to_string(),
        }
    }

    fn node(name: &str, addresses: Vec<NodeAddress>) -> Node {
        Node {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            status: Some(NodeStatus {
                addresses: Some(addresses),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_node_record_from_node() {
        let mut n = node(
            "worker-1",
            vec![
                address("Hostname", "worker-1"),
                address("ExternalIP", "203.0.113.7"),
                address("InternalIP", "10.0.0.1"),
            ],
        );
        n.metadata.labels = Some(BTreeMap::from([("role".to_string(), "db".to_string())]));
        n.metadata.annotations =
            Some(BTreeMap::from([("owner".to_string(), "team-a".to_string())]));

        let record = NodeRecord::try_from(n).unwrap();
        assert_eq!(record.name, "worker-1");
        assert_eq!(record.internal_ip, "10.0.0.1");
        assert_eq!(record.labels.get("role").map(String::as_str), Some("db"));
        assert_eq!(
            record.annotations.get("owner").map(String::as_str),
            Some("team-a")
        );
    }

    #[test]
    fn test_node_record_first_internal_ip_wins() {
        let n = node(
            "worker-1",
            vec![
                address("InternalIP", "10.0.0.1"),
                address("InternalIP", "fd00::1"),
            ],
        );
        let record = NodeRecord::try_from(n).unwrap();
        assert_eq!(record.internal_ip, "10.0.0.1");
    }

    #[test]
    fn test_node_record_missing_metadata_maps_are_empty() {
        let record = NodeRecord::try_from(node("bare", vec![address("InternalIP", "10.0.0.9")]))
            .unwrap();
        assert!(record.labels.is_empty());
        assert!(record.annotations.is_empty());
    }

    // Reported as a typed error instead of crashing on the empty address list
    #[test]
    fn test_node_record_without_internal_ip() {
        let n = node("edge", vec![address("ExternalIP", "203.0.113.7")]);
        match NodeRecord::try_from(n) {
            Err(NodeSourceError::MissingAddress { node }) => assert_eq!(node, "edge"),
            other => panic!("expected MissingAddress, got {:?}", other),
        }
    }

    #[test]
    fn test_node_record_without_status() {
        let n = Node {
            metadata: ObjectMeta {
                name: Some("pending".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            NodeRecord::try_from(n),
            Err(NodeSourceError::MissingAddress { .. })
        ));
    }

    #[test]
    fn test_node_record_builders() {
        let record = NodeRecord::new("n1", "10.0.0.1")
            .with_label("role", "db")
            .with_annotation("zone", "a");
        assert_eq!(record.labels.len(), 1);
        assert_eq!(record.annotations.len(), 1);
    }
}
