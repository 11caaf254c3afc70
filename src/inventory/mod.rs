// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Inventory assembly
//!
//! Runs the enabled grouping strategies over the node list and merges their
//! results into a single [`Inventory`] with the reserved `_meta` entry.

mod grouping;

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, warn};

use crate::config::GroupingConfig;
use crate::kubernetes::NodeRecord;

pub use grouping::GroupMap;
use grouping::{group_all, group_by_annotations, group_by_labels, group_by_name};

/// Reserved key holding host variables
pub const META_KEY: &str = "_meta";

/// Host variable metadata; always empty
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Meta {}

/// Merged inventory: group name -> host IPs, plus `_meta`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    pub meta: Meta,
    pub groups: BTreeMap<String, Vec<String>>,
}

#[cfg(test)]
impl Inventory {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }
}

impl Serialize for Inventory {
    /// Writes `_meta` alongside the groups in sorted key order
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len() + 1))?;
        let mut meta_written = false;
        for (name, hosts) in &self.groups {
            if !meta_written && name.as_str() > META_KEY {
                map.serialize_entry(META_KEY, &self.meta)?;
                meta_written = true;
            }
            map.serialize_entry(name, hosts)?;
        }
        if !meta_written {
            map.serialize_entry(META_KEY, &self.meta)?;
        }
        map.end()
    }
}

/// Merge group maps in order; a later group replaces an earlier one of the same name
///
/// A group named `_meta` would shadow the reserved host-variable entry and is
/// dropped.
pub fn create_inventory(groups: Vec<GroupMap>) -> Inventory {
    let mut inventory = Inventory::default();
    for group_map in groups {
        for (name, hosts) in group_map {
            if name == META_KEY {
                warn!(group = %name, dropped = ?hosts, "Group uses the reserved _meta key, skipping");
                continue;
            }
            if let Some(previous) = inventory.groups.insert(name.clone(), hosts) {
                warn!(group = %name, dropped = ?previous, "Group name collision, keeping later group");
            }
        }
    }
    inventory
}

/// Run the configured strategies and merge them
///
/// `all_workers` is always included. Merge order is all, name, labels,
/// annotations.
pub fn build_inventory(nodes: &[NodeRecord], config: &GroupingConfig) -> Inventory {
    let mut groups = vec![group_all(nodes)];

    if config.group_by_name {
        groups.push(group_by_name(nodes));
    }
    if config.group_by_labels {
        groups.push(group_by_labels(nodes));
    }
    if config.group_by_annotations {
        groups.push(group_by_annotations(nodes));
    }

    let inventory = create_inventory(groups);
    debug!(
        nodes = nodes.len(),
        groups = inventory.groups.len(),
        "Built inventory"
    );
    inventory
}
