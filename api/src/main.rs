use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use pinlog_api::{config::PinlogApiConfig, server};
use pinlog_db::storage::mongodb::MongoDBStorage;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = PinlogApiConfig::parse();

    if config.dump_openapi {
        return match server::openapi().to_pretty_json() {
            Ok(json) => {
                print!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to serialize OpenAPI document: {e}");
                ExitCode::FAILURE
            }
        };
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or("pinlog_api=info,pinlog_db=info".into()),
        )
        .pretty()
        .init();

    // Without a store there is nothing useful to serve, so give up right away.
    let db = match MongoDBStorage::new(&config.mongodb_uri).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "Failed to connect to MongoDB, make sure it is running and reachable");
            return ExitCode::FAILURE;
        }
    };

    info!("MongoDB connected");

    let (router, _) = server::make(Arc::new(db));

    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, addr = %config.bind_addr, "Failed to bind to address");
            return ExitCode::FAILURE;
        }
    };

    info!("Listening on http://{:?}", config.bind_addr);

    if let Err(e) = axum::serve(listener, router).await {
        error!(error = %e, "Server stopped with an error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
