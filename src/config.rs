// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Grouping configuration
//!
//! Strategies are toggled from a `k8s.ini` file with a `[DEFAULT]` section:
//!
//! ```ini
//! ; all_workers is always emitted
//! [DEFAULT]
//! GROUP_BY_NAME = True
//! GROUP_BY_LABELS: yes
//! GROUP_BY_ANNOTATIONS = off
//! ```
//!
//! Keys are case-insensitive, `=` and `:` both separate key from value, and
//! values use the ini boolean words (`1/yes/true/on`, `0/no/false/off`).
//! Environment variables and CLI flags of the same name override the file.

use anyhow::{Context, Result, anyhow};
use ini::Ini;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Default config file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "k8s.ini";

/// Section holding the grouping switches
const DEFAULT_SECTION: &str = "DEFAULT";

/// Which optional grouping strategies are enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupingConfig {
    pub group_by_name: bool,
    pub group_by_labels: bool,
    pub group_by_annotations: bool,
}

impl GroupingConfig {
    /// Load config from disk, or return default if not found
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::parse(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse ini content; only the `[DEFAULT]` section is read
    pub fn parse(content: &str) -> Result<Self> {
        let ini = Ini::load_from_str(content)?;
        let mut config = Self::default();

        let Some(section) = ini
            .iter()
            .find(|(name, _)| name.is_some_and(|n| n.eq_ignore_ascii_case(DEFAULT_SECTION)))
            .map(|(_, props)| props)
        else {
            return Ok(config);
        };

        for (key, value) in section.iter() {
            let slot = match key.trim().to_ascii_uppercase().as_str() {
                "GROUP_BY_NAME" => &mut config.group_by_name,
                "GROUP_BY_LABELS" => &mut config.group_by_labels,
                "GROUP_BY_ANNOTATIONS" => &mut config.group_by_annotations,
                _ => {
                    warn!(key = %key, "Unknown config key, ignoring");
                    continue;
                }
            };
            *slot = parse_bool_word(value)
                .ok_or_else(|| anyhow!("Not a boolean for {}: {}", key, value))?;
        }

        Ok(config)
    }

    /// Apply env/CLI overrides; `None` keeps the file value
    pub fn with_overrides(
        mut self,
        group_by_name: Option<bool>,
        group_by_labels: Option<bool>,
        group_by_annotations: Option<bool>,
    ) -> Self {
        if let Some(v) = group_by_name {
            self.group_by_name = v;
        }
        if let Some(v) = group_by_labels {
            self.group_by_labels = v;
        }
        if let Some(v) = group_by_annotations {
            self.group_by_annotations = v;
        }
        self
    }
}

fn parse_bool_word(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}
