use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::InventoryFormatter;
use crate::inventory::Inventory;

const INDENT: &[u8] = b"    ";

/// Dynamic inventory JSON: sorted keys, 4-space indent
pub struct JsonFormatter;

impl InventoryFormatter for JsonFormatter {
    fn format(inventory: &Inventory) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(INDENT);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        inventory
            .serialize(&mut ser)
            .context("Failed to serialize inventory as JSON")?;
        String::from_utf8(buf).context("Inventory JSON is not valid UTF-8")
    }
}
