use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Serialize, Serializer};

use super::InventoryFormatter;
use crate::inventory::{Inventory, Meta};

/// Static YAML inventory: `all.children.<group>.hosts.<ip>`
pub struct YamlFormatter;

#[derive(Serialize)]
struct StaticInventory<'a> {
    all: AllGroup<'a>,
}

#[derive(Serialize)]
struct AllGroup<'a> {
    children: BTreeMap<&'a str, HostGroup<'a>>,
}

#[derive(Serialize)]
struct HostGroup<'a> {
    #[serde(serialize_with = "hosts_in_order")]
    hosts: &'a [String],
}

/// Hosts map to empty vars, keeping node order
fn hosts_in_order<S: Serializer>(hosts: &&[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(hosts.iter().map(|h| (h, Meta::default())))
}

impl InventoryFormatter for YamlFormatter {
    fn format(inventory: &Inventory) -> Result<String> {
        let document = StaticInventory {
            all: AllGroup {
                children: inventory
                    .groups
                    .iter()
                    .map(|(name, hosts)| (name.as_str(), HostGroup { hosts }))
                    .collect(),
            },
        };
        serde_yaml::to_string(&document).context("Failed to serialize inventory as YAML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{GroupMap, create_inventory};
    use serde_yaml::Value;

    #[test]
    fn test_yaml_static_layout() {
        let inventory = create_inventory(vec![GroupMap::from([(
            "label_role_db".to_string(),
            vec!["10.0.0.2".to_string(), "10.0.0.1".to_string()],
        )])]);
        let out = YamlFormatter::format(&inventory).unwrap();
        let doc: Value = serde_yaml::from_str(&out).unwrap();

        let hosts = &doc["all"]["children"]["label_role_db"]["hosts"];
        let mapping = hosts.as_mapping().unwrap();
        let keys: Vec<_> = mapping.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, vec!["10.0.0.2", "10.0.0.1"]);
        assert!(mapping.values().all(|v| v.as_mapping().is_some_and(|m| m.is_empty())));
    }

    #[test]
    fn test_yaml_has_no_meta_group() {
        let out = YamlFormatter::format(&create_inventory(vec![])).unwrap();
        assert!(!out.contains("_meta"));
        let doc: Value = serde_yaml::from_str(&out).unwrap();
        assert!(doc["all"]["children"].as_mapping().unwrap().is_empty());
    }
}
