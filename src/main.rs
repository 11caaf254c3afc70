// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

mod cli;
pub mod config;
mod inventory;
mod kubernetes;
mod output;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::prelude::*;

use cli::Args;
use config::GroupingConfig;
use kubernetes::{ConnectOptions, NodeSource};

/// Initialize logging to stderr, plus an optional rotated log file
///
/// Stdout carries the inventory document, so logs never go there.
fn init_logging(verbose: bool, log_dir: Option<&Path>) {
    use tracing_rolling_file::{RollingConditionBase, RollingFileAppenderBase};
    use tracing_subscriber::fmt::format::FmtSpan;

    let filter = if verbose {
        "k8s_inventory=debug"
    } else {
        "k8s_inventory=warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::NONE);

    // File appender with size-based rotation:
    // - Max 10MB per file
    // - Keep up to 5 files
    // - Also rotate daily
    let file_layer = log_dir.and_then(|dir| {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Warning: Could not create log directory: {}", e);
            return None;
        }
        let condition = RollingConditionBase::new()
            .daily()
            .max_size(10 * 1024 * 1024);
        match RollingFileAppenderBase::new(dir.join("k8s-inventory.log"), condition, 5) {
            Ok(appender) => {
                let (non_blocking, guard) = appender.get_non_blocking_appender();
                // Leak the guard to keep the background writer alive
                std::mem::forget(guard);
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false)
                        .with_span_events(FmtSpan::NONE),
                )
            }
            Err(e) => {
                eprintln!("Warning: Could not create log file: {}", e);
                None
            }
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
}

/// Install the rustls crypto provider (aws-lc-rs)
///
/// Returns false when a provider was already installed; that one is kept.
fn install_crypto_provider() -> bool {
    match rustls::crypto::aws_lc_rs::default_provider().install_default() {
        Ok(()) => true,
        Err(_) => {
            debug!("rustls crypto provider already installed, keeping it");
            false
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.log_dir.as_deref());

    install_crypto_provider();

    // Host variables all live in _meta, so --host never needs the cluster
    if let Some(host) = &args.host {
        info!(host = %host, "Host variables requested");
        println!("{}", output::render_host_vars());
        return Ok(());
    }

    run_list(&args).await
}

async fn run_list(args: &Args) -> Result<()> {
    debug!(explicit = args.list, config = %args.config.display(), "Listing inventory");
    let grouping = GroupingConfig::load(&args.config)?.with_overrides(
        args.group_by_name,
        args.group_by_labels,
        args.group_by_annotations,
    );
    info!(
        by_name = grouping.group_by_name,
        by_labels = grouping.group_by_labels,
        by_annotations = grouping.group_by_annotations,
        "Grouping strategies"
    );

    let source = NodeSource::connect(&ConnectOptions {
        kubeconfig: args.kubeconfig.clone(),
        context: args.context.clone(),
    })
    .await?;
    let nodes = source.fetch_nodes().await?;

    let inventory = inventory::build_inventory(&nodes, &grouping);
    println!("{}", output::render(&inventory, &args.output)?);
    Ok(())
}
