use std::fmt::Write;

use anyhow::Result;

use super::InventoryFormatter;
use crate::inventory::Inventory;

/// Static INI inventory: one `[group]` section per group, one host per line
pub struct IniFormatter;

impl InventoryFormatter for IniFormatter {
    fn format(inventory: &Inventory) -> Result<String> {
        let mut out = String::new();
        for (idx, (name, hosts)) in inventory.groups.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            writeln!(out, "[{}]", name)?;
            for host in hosts {
                writeln!(out, "{}", host)?;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{GroupMap, create_inventory};

    #[test]
    fn test_ini_sections() {
        let inventory = create_inventory(vec![GroupMap::from([
            (
                "name_n1".to_string(),
                vec!["10.0.0.1".to_string()],
            ),
            (
                "all_workers".to_string(),
                vec!["10.0.0.1".to_string(), "10.0.0.2".to_string()],
            ),
        ])]);
        let out = IniFormatter::format(&inventory).unwrap();
        assert_eq!(
            out,
            "[all_workers]\n10.0.0.1\n10.0.0.2\n\n[name_n1]\n10.0.0.1\n"
        );
    }

    #[test]
    fn test_ini_empty_inventory() {
        assert_eq!(IniFormatter::format(&create_inventory(vec![])).unwrap(), "");
    }
}
