use actix_web::{web, App, HttpServer};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

use phonebook_api::config::{PhonebookConfig, StorageBackend};
use phonebook_api::handlers::contacts::{self, PhonebookAppState};
use phonebook_api::handlers::health::health;
use phonebook_api::helpers;
use phonebook_api::ContactStore;

#[derive(Parser, Debug)]
#[command(author, version, about = "Serve the phonebook page", long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,

    /// Config file to use instead of the platform default
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Keep contacts in memory only
    #[arg(long)]
    ephemeral: bool,
}

fn init_tracing(log_file_path: Option<String>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("phonebook-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file_path);

    let loaded = match &args.config {
        Some(path) => PhonebookConfig::load_from(path).map(|config| (config, path.clone())),
        None => PhonebookConfig::load(),
    };
    let (config, config_path) = loaded.map_err(std::io::Error::other)?;
    tracing::info!("Loaded config from {:?}", config_path);

    let mut storage_config = config.storage();
    if args.ephemeral {
        storage_config.backend = StorageBackend::Memory;
    }

    let storage = helpers::storage::open_storage(&storage_config).map_err(std::io::Error::other)?;
    let store = ContactStore::open(storage).map_err(std::io::Error::other)?;
    let state = PhonebookAppState::new(store);

    let server_config = config.server();
    let (host, port) = (server_config.host, server_config.port);

    tracing::info!("Starting phonebook on http://{}:{}", host, port);

    // One worker: every request runs to completion before the next
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .service(health)
            .configure(contacts::configure)
    })
    .workers(1)
    .bind((host.as_str(), port))?
    .run()
    .await
}
