mod ini;
mod json;
mod yaml;

pub use ini::IniFormatter;
pub use json::JsonFormatter;
pub use yaml::YamlFormatter;

use anyhow::Result;

use crate::cli::OutputFormat;
use crate::inventory::Inventory;

/// Renders an inventory as a document for the provisioning tool
pub trait InventoryFormatter {
    fn format(inventory: &Inventory) -> Result<String>;
}

pub fn render(inventory: &Inventory, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => JsonFormatter::format(inventory),
        OutputFormat::Yaml => YamlFormatter::format(inventory),
        OutputFormat::Ini => IniFormatter::format(inventory),
    }
}

/// Host variables for `--host`; always empty since `_meta` is always sent
pub fn render_host_vars() -> String {
    "{}".to_string()
}
