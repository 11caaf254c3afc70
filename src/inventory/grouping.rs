// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Grouping strategies
//!
//! Each strategy turns the node list into a [`GroupMap`] of group name to
//! node IPs. Strategies are independent and never fail.

use std::collections::BTreeMap;

use crate::kubernetes::NodeRecord;

/// Group name -> IPs, unique within a group, in node order
pub type GroupMap = BTreeMap<String, Vec<String>>;

/// Name of the group that holds every worker node
pub const ALL_WORKERS: &str = "all_workers";

/// Characters that are not allowed in group names
const DISALLOWED: &[char] = &['*', '/', '\\', '!', '@', '#', '$', '%', '^', '&', '.'];

/// Replace every disallowed character with `_`
pub fn sanitize(component: &str) -> String {
    component
        .chars()
        .map(|c| if DISALLOWED.contains(&c) { '_' } else { c })
        .collect()
}

/// Single `all_workers` group with every node's IP
pub fn group_all(nodes: &[NodeRecord]) -> GroupMap {
    let ips = nodes.iter().map(|n| n.internal_ip.clone()).collect();
    GroupMap::from([(ALL_WORKERS.to_string(), ips)])
}

/// One `name_<node>` group per node
pub fn group_by_name(nodes: &[NodeRecord]) -> GroupMap {
    let mut result = GroupMap::new();
    for node in nodes {
        let group = format!("name_{}", sanitize(&node.name));
        result.insert(group, vec![node.internal_ip.clone()]);
    }
    result
}

/// One `label_<key>_<value>` group per distinct label pair
pub fn group_by_labels(nodes: &[NodeRecord]) -> GroupMap {
    group_by_pairs(nodes, "label", |n| &n.labels)
}

/// One `annotation_<key>_<value>` group per distinct annotation pair
pub fn group_by_annotations(nodes: &[NodeRecord]) -> GroupMap {
    group_by_pairs(nodes, "annotation", |n| &n.annotations)
}

fn group_by_pairs<F>(nodes: &[NodeRecord], prefix: &str, pairs: F) -> GroupMap
where
    F: Fn(&NodeRecord) -> &BTreeMap<String, String>,
{
    let mut result = GroupMap::new();
    for node in nodes {
        for (key, value) in pairs(node) {
            let group = format!("{}_{}_{}", prefix, sanitize(key), sanitize(value));
            let ips = result.entry(group).or_default();
            if !ips.contains(&node.internal_ip) {
                ips.push(node.internal_ip.clone());
            }
        }
    }
    result
}
