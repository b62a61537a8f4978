// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! VisionNote server entrypoint.
//!
//! Serves the landing page, the dashboard shell and the editor's image upload endpoints until
//! interrupted with Ctrl-C.

use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use visionnote::api::{router, AppState};
use visionnote::config::{
    ServerConfig, DEFAULT_AUTH_HEADER, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_UPLOAD_LIMIT,
};

const DEFAULT_LOG_FILTER: &str = "visionnote=info";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--host <addr>] [--port <port>] [--auth-header <name>] [--upload-limit <bytes>]\n\n--host selects the listen address (default {DEFAULT_HOST}; env VISIONNOTE_HOST).\n--port selects the port (0 = ephemeral; default {DEFAULT_PORT}; env VISIONNOTE_PORT).\n--auth-header names the request header carrying the signed-in user id\n  (default {DEFAULT_AUTH_HEADER}; env VISIONNOTE_AUTH_HEADER).\n--upload-limit caps API request bodies in bytes\n  (default {DEFAULT_UPLOAD_LIMIT}; env VISIONNOTE_UPLOAD_LIMIT).\n\nLog output is controlled with RUST_LOG (default {DEFAULT_LOG_FILTER})."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    host: Option<String>,
    port: Option<u16>,
    auth_header: Option<String>,
    upload_limit: Option<usize>,
}

impl CliOptions {
    fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(auth_header) = self.auth_header {
            config.auth_header = auth_header;
        }
        if let Some(upload_limit) = self.upload_limit {
            config.upload_limit = upload_limit;
        }
        config
    }
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--host" => {
                if options.host.is_some() {
                    return Err(());
                }
                let host = args.next().ok_or(())?;
                if host.is_empty() {
                    return Err(());
                }
                options.host = Some(host);
            }
            "--port" => {
                if options.port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.port = Some(port);
            }
            "--auth-header" => {
                if options.auth_header.is_some() {
                    return Err(());
                }
                let name = args.next().ok_or(())?;
                if name.is_empty() {
                    return Err(());
                }
                options.auth_header = Some(name);
            }
            "--upload-limit" => {
                if options.upload_limit.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let limit: usize = raw.parse().map_err(|_| ())?;
                options.upload_limit = Some(limit);
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "visionnote".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_logging();
        let config = options.apply(ServerConfig::from_env());
        let state = Arc::new(AppState::from_config(config.clone())?);

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let listener =
                tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
            let addr = listener.local_addr()?;
            tracing::info!(
                %addr,
                auth_header = %config.auth_header,
                upload_limit = config.upload_limit,
                "visionnote listening"
            );

            axum::serve(listener, router(state)).with_graceful_shutdown(shutdown_signal()).await?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("visionnote: {err}");
        std::process::exit(1);
    }
}
