// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{Parser, ValueEnum};

use crate::config::DEFAULT_CONFIG_FILE;

#[derive(Parser, Debug)]
#[command(name = "k8s-inventory")]
#[command(
    author,
    version,
    about = "Build an Ansible inventory from Kubernetes worker nodes"
)]
pub struct Args {
    /// Print the full inventory (default action, for the dynamic inventory protocol)
    #[arg(long, conflicts_with = "host")]
    pub list: bool,

    /// Print host variables for a single host (always empty)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Grouping config file with a [DEFAULT] section
    #[arg(long, env = "K8S_INVENTORY_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Kubeconfig file (defaults to KUBECONFIG or ~/.kube/config)
    #[arg(long, value_name = "FILE")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubernetes context to use (defaults to the current context)
    #[arg(short, long, value_name = "CONTEXT")]
    pub context: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub output: OutputFormat,

    /// Group nodes by name (overrides the config file)
    #[arg(long, env = "GROUP_BY_NAME", value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub group_by_name: Option<bool>,

    /// Group nodes by label pairs (overrides the config file)
    #[arg(long, env = "GROUP_BY_LABELS", value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub group_by_labels: Option<bool>,

    /// Group nodes by annotation pairs (overrides the config file)
    #[arg(long, env = "GROUP_BY_ANNOTATIONS", value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub group_by_annotations: Option<bool>,

    /// Also write rotated log files to this directory
    #[arg(long, env = "K8S_INVENTORY_LOG_DIR", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Dynamic inventory JSON
    #[default]
    Json,
    /// Static YAML inventory
    Yaml,
    /// Static INI inventory
    Ini,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["k8s-inventory", "--list"]).unwrap();
        assert!(args.list);
        assert_eq!(args.output, OutputFormat::Json);
        assert_eq!(args.config, PathBuf::from("k8s.ini"));
        assert!(args.host.is_none());
    }

    #[test]
    fn test_args_boolish_overrides() {
        let args = Args::try_parse_from([
            "k8s-inventory",
            "--group-by-name",
            "yes",
            "--group-by-labels",
            "0",
            "-o",
            "ini",
        ])
        .unwrap();
        assert_eq!(args.group_by_name, Some(true));
        assert_eq!(args.group_by_labels, Some(false));
        assert_eq!(args.output, OutputFormat::Ini);
    }

    #[test]
    fn test_args_list_conflicts_with_host() {
        assert!(Args::try_parse_from(["k8s-inventory", "--list", "--host", "10.0.0.1"]).is_err());
    }
}
